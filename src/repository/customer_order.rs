use diesel::prelude::*;
use diesel::sqlite::Sqlite;

use crate::{
    domain::customer::{
        CustomerOrder as DomainCustomerOrder, CustomerOrderListQuery,
        NewCustomerOrder as DomainNewCustomerOrder,
    },
    models::{
        customer::{
            Customer as DbCustomer, CustomerOrder as DbCustomerOrder,
            NewCustomer as DbNewCustomer, NewCustomerOrder as DbNewCustomerOrder,
        },
        order::NewOrder as DbNewOrder,
    },
    repository::{
        CustomerOrderReader, CustomerOrderWriter, DieselRepository,
        errors::{RepositoryError, RepositoryResult},
    },
};

impl CustomerOrderReader for DieselRepository {
    fn get_customer_order(&self, id: i32) -> RepositoryResult<Option<DomainCustomerOrder>> {
        use crate::schema::{customer_orders, customers};

        let mut conn = self.conn()?;
        let row = customer_orders::table
            .inner_join(customers::table)
            .filter(customer_orders::id.eq(id))
            .select((DbCustomerOrder::as_select(), DbCustomer::as_select()))
            .first::<(DbCustomerOrder, DbCustomer)>(&mut conn)
            .optional()?;

        Ok(row.map(Into::into))
    }

    fn list_customer_orders(
        &self,
        query: CustomerOrderListQuery,
    ) -> RepositoryResult<(usize, Vec<DomainCustomerOrder>)> {
        use crate::schema::{customer_orders, customers};

        let mut conn = self.conn()?;

        let CustomerOrderListQuery { search, pagination } = query;
        let search_pattern = search.as_ref().map(|term| format!("%{}%", term));

        let mut count_query = customer_orders::table
            .inner_join(customers::table)
            .into_boxed::<Sqlite>();

        if let Some(ref pattern) = search_pattern {
            count_query = count_query.filter(
                customers::fullname
                    .like(pattern.clone())
                    .or(customers::phone.like(pattern.clone())),
            );
        }

        let total = count_query.count().get_result::<i64>(&mut conn)? as usize;

        let mut items = customer_orders::table
            .inner_join(customers::table)
            .select((DbCustomerOrder::as_select(), DbCustomer::as_select()))
            .into_boxed::<Sqlite>();

        if let Some(ref pattern) = search_pattern {
            items = items.filter(
                customers::fullname
                    .like(pattern.clone())
                    .or(customers::phone.like(pattern.clone())),
            );
        }

        items = items.order((customer_orders::created_at.asc(), customer_orders::id.asc()));

        if let Some(pagination) = pagination {
            items = items.offset(pagination.offset()).limit(pagination.limit());
        }

        let rows = items.load::<(DbCustomerOrder, DbCustomer)>(&mut conn)?;

        Ok((total, rows.into_iter().map(Into::into).collect()))
    }
}

impl CustomerOrderWriter for DieselRepository {
    fn place_customer_order(
        &self,
        new_order: &DomainNewCustomerOrder,
    ) -> RepositoryResult<DomainCustomerOrder> {
        use crate::schema::{customer_orders, customers, orders};

        let mut conn = self.conn()?;

        conn.immediate_transaction::<DomainCustomerOrder, RepositoryError, _>(|conn| {
            let customer = diesel::insert_into(customers::table)
                .values(DbNewCustomer::from(&new_order.contact))
                .get_result::<DbCustomer>(conn)?;

            let history_row = DbNewCustomerOrder::from_domain(customer.id, new_order)?;
            let order = diesel::insert_into(customer_orders::table)
                .values(&history_row)
                .get_result::<DbCustomerOrder>(conn)?;

            let queue_row = DbNewOrder::from_parts(
                &new_order.contact,
                &new_order.payment,
                &new_order.comments,
                &new_order.cart,
                new_order.total_cents,
            )?;
            diesel::insert_into(orders::table)
                .values(&queue_row)
                .execute(conn)?;

            Ok(DomainCustomerOrder::from((order, customer)))
        })
    }
}
