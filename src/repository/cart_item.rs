use diesel::prelude::*;
use diesel::sqlite::Sqlite;

use crate::{
    domain::cart::{CartItem as DomainCartItem, NewCartItem as DomainNewCartItem},
    models::cart_item::{CartItem as DbCartItem, NewCartItem as DbNewCartItem},
    repository::{
        CartItemReader, CartItemWriter, DieselRepository,
        errors::{RepositoryError, RepositoryResult},
    },
};

impl CartItemReader for DieselRepository {
    fn list_cart_items(&self, session_id: &str) -> RepositoryResult<Vec<DomainCartItem>> {
        use crate::schema::cart_items;

        let mut conn = self.conn()?;
        let rows = cart_items::table
            .filter(cart_items::session_id.eq(session_id))
            .order((cart_items::created_at.asc(), cart_items::id.asc()))
            .load::<DbCartItem>(&mut conn)?;

        Ok(rows.into_iter().map(Into::into).collect())
    }
}

impl CartItemWriter for DieselRepository {
    fn add_cart_item(&self, new_item: &DomainNewCartItem) -> RepositoryResult<DomainCartItem> {
        use crate::schema::cart_items;

        let mut conn = self.conn()?;
        let row = DbNewCartItem::from_domain(new_item)?;
        let created = diesel::insert_into(cart_items::table)
            .values(&row)
            .get_result::<DbCartItem>(&mut conn)?;

        Ok(created.into())
    }

    fn undo_cart_item(
        &self,
        session_id: &str,
        product_id: Option<&str>,
    ) -> RepositoryResult<Option<DomainCartItem>> {
        use crate::schema::cart_items;

        let mut conn = self.conn()?;

        conn.immediate_transaction::<Option<DomainCartItem>, RepositoryError, _>(|conn| {
            let mut newest = cart_items::table
                .filter(cart_items::session_id.eq(session_id))
                .into_boxed::<Sqlite>();

            if let Some(product_id) = product_id {
                newest = newest.filter(cart_items::product_id.eq(product_id));
            }

            let newest = newest
                .order((cart_items::created_at.desc(), cart_items::id.desc()))
                .first::<DbCartItem>(conn)
                .optional()?;

            let Some(newest) = newest else {
                return Ok(None);
            };

            diesel::delete(cart_items::table.find(newest.id)).execute(conn)?;

            Ok(Some(newest.into()))
        })
    }

    fn clear_cart(&self, session_id: &str) -> RepositoryResult<usize> {
        use crate::schema::cart_items;

        let mut conn = self.conn()?;
        let removed =
            diesel::delete(cart_items::table.filter(cart_items::session_id.eq(session_id)))
                .execute(&mut conn)?;

        Ok(removed)
    }
}
