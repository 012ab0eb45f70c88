use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::order::{OrderPayload, TABLE as ORDERS};
use super::{OLDEST_FIRST, Params, SupabaseRepository};
use crate::domain::cart::Cart;
use crate::domain::customer::{Customer, CustomerOrder, CustomerOrderListQuery, NewCustomerOrder};
use crate::domain::order::ContactDetails;
use crate::repository::errors::RepositoryResult;
use crate::repository::{CustomerOrderReader, CustomerOrderWriter};

const CUSTOMERS: &str = "customers";
const CUSTOMER_ORDERS: &str = "customer_orders";
/// Embeds the customer; `!inner` lets filters on the customer drop orders.
const JOINED_SELECT: &str = "*,customer:customers!inner(*)";

#[derive(Debug, Deserialize)]
struct CustomerRow {
    id: i32,
    #[serde(flatten)]
    contact: ContactDetails,
    created_at: DateTime<Utc>,
}

impl From<CustomerRow> for Customer {
    fn from(row: CustomerRow) -> Self {
        Self {
            id: row.id,
            contact: row.contact,
            created_at: row.created_at.naive_utc(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct CustomerOrderRow {
    id: i32,
    customer_id: i32,
    payment: String,
    comments: String,
    #[serde(default)]
    cart: Cart,
    total_cents: i64,
    created_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
struct JoinedRow {
    #[serde(flatten)]
    order: CustomerOrderRow,
    customer: CustomerRow,
}

impl From<JoinedRow> for CustomerOrder {
    fn from(row: JoinedRow) -> Self {
        let JoinedRow { order, customer } = row;
        Self {
            id: order.id,
            customer_id: order.customer_id,
            payment: order.payment,
            comments: order.comments,
            cart: order.cart,
            total_cents: order.total_cents,
            created_at: order.created_at.naive_utc(),
            customer: customer.into(),
        }
    }
}

#[derive(Debug, Serialize)]
struct CustomerOrderPayload<'a> {
    customer_id: i32,
    payment: &'a str,
    comments: &'a str,
    cart: &'a Cart,
    total_cents: i64,
}

/// PostgREST pattern values use `*` as the wildcard; strip characters that
/// would break the `or=(...)` grammar.
fn search_filter(term: &str) -> String {
    let cleaned: String = term
        .chars()
        .filter(|c| !matches!(c, ',' | '(' | ')' | '*' | '"'))
        .collect();
    format!("(fullname.ilike.*{cleaned}*,phone.ilike.*{cleaned}*)")
}

impl CustomerOrderReader for SupabaseRepository {
    fn get_customer_order(&self, id: i32) -> RepositoryResult<Option<CustomerOrder>> {
        let params: Params = vec![
            ("select", JOINED_SELECT.to_string()),
            ("id", format!("eq.{id}")),
        ];
        let row = self.select_one::<JoinedRow>(CUSTOMER_ORDERS, params)?;
        Ok(row.map(Into::into))
    }

    fn list_customer_orders(
        &self,
        query: CustomerOrderListQuery,
    ) -> RepositoryResult<(usize, Vec<CustomerOrder>)> {
        let mut params: Params = vec![
            ("select", JOINED_SELECT.to_string()),
            ("order", OLDEST_FIRST.to_string()),
        ];

        if let Some(term) = query.search.as_deref() {
            params.push(("customer.or", search_filter(term)));
        }

        if let Some(pagination) = query.pagination {
            params.push(("offset", pagination.offset().to_string()));
            params.push(("limit", pagination.limit().to_string()));
        }

        let (total, rows) = self.select_counted::<JoinedRow>(CUSTOMER_ORDERS, &params)?;
        Ok((total, rows.into_iter().map(Into::into).collect()))
    }
}

impl CustomerOrderWriter for SupabaseRepository {
    fn place_customer_order(&self, new_order: &NewCustomerOrder) -> RepositoryResult<CustomerOrder> {
        let customer = self.insert_one::<_, CustomerRow>(CUSTOMERS, &new_order.contact)?;

        let payload = CustomerOrderPayload {
            customer_id: customer.id,
            payment: &new_order.payment,
            comments: &new_order.comments,
            cart: &new_order.cart,
            total_cents: new_order.total_cents,
        };
        let order = match self.insert_one::<_, CustomerOrderRow>(CUSTOMER_ORDERS, &payload) {
            Ok(order) => order,
            Err(err) => {
                self.compensate(CUSTOMERS, customer.id);
                return Err(err);
            }
        };

        let snapshot = OrderPayload {
            contact: &new_order.contact,
            payment: &new_order.payment,
            comments: &new_order.comments,
            cart: &new_order.cart,
            total_cents: new_order.total_cents,
        };
        if let Err(err) = self.insert::<_, serde_json::Value>(ORDERS, &[snapshot]) {
            self.compensate(CUSTOMER_ORDERS, order.id);
            self.compensate(CUSTOMERS, customer.id);
            return Err(err);
        }

        Ok(JoinedRow { order, customer }.into())
    }
}
