use crate::domain::auth::AuthenticatedUser;
use crate::domain::customer::{CustomerOrder, CustomerOrderListQuery};
use crate::domain::order::{DequeuedOrder, Order};
use crate::forms::orders::{PlaceOrderForm, QuickOrderForm};
use crate::pagination::{PageQuery, Paginated};
use crate::repository::{CustomerOrderReader, CustomerOrderWriter, OrderReader, OrderWriter};
use crate::services::{ServiceError, ServiceResult, ensure_admin, when_full};

pub const QUEUE_FULL: &str = "order queue is full";

const EXPORT_HEADER: [&str; 10] = [
    "id", "fullname", "phone", "email", "address", "city", "postal", "payment", "total",
    "created_at",
];

/// Storefront checkout: history row, customer and queue snapshot together.
pub fn place_order<R>(repo: &R, form: PlaceOrderForm) -> ServiceResult<CustomerOrder>
where
    R: CustomerOrderWriter + ?Sized,
{
    let new_order = form
        .into_new_customer_order()
        .map_err(|err| ServiceError::Form(err.to_string()))?;

    let order = repo
        .place_customer_order(&new_order)
        .map_err(ServiceError::from)?;

    log::info!(
        "order {} placed by customer {} for {} centavos",
        order.id,
        order.customer_id,
        order.total_cents
    );
    Ok(order)
}

/// Paginated order history, oldest first.
pub fn list_order_history<R>(
    repo: &R,
    user: &AuthenticatedUser,
    query: PageQuery,
) -> ServiceResult<Paginated<CustomerOrder>>
where
    R: CustomerOrderReader + ?Sized,
{
    ensure_admin(user)?;

    let pagination = query.pagination();
    let (total, orders) = repo
        .list_customer_orders(CustomerOrderListQuery::new().paginate(pagination))
        .map_err(ServiceError::from)?;

    Ok(Paginated::new(orders, pagination, total))
}

/// Enqueue an order keyed in by an operator.
pub fn quick_order<R>(
    repo: &R,
    user: &AuthenticatedUser,
    form: QuickOrderForm,
    capacity: usize,
) -> ServiceResult<Order>
where
    R: OrderWriter + ?Sized,
{
    ensure_admin(user)?;

    let new_order = form
        .into_new_order()
        .map_err(|err| ServiceError::Form(err.to_string()))?;

    repo.enqueue_order(&new_order, capacity)
        .map_err(when_full(QUEUE_FULL))
}

pub fn list_queue<R>(repo: &R, user: &AuthenticatedUser) -> ServiceResult<Vec<Order>>
where
    R: OrderReader + ?Sized,
{
    ensure_admin(user)?;
    repo.list_orders().map_err(ServiceError::from)
}

/// Accept the oldest order and suggest a note for its delivery.
pub fn dequeue_order<R>(repo: &R, user: &AuthenticatedUser) -> ServiceResult<DequeuedOrder>
where
    R: OrderWriter + ?Sized,
{
    ensure_admin(user)?;

    let order = repo
        .dequeue_order()
        .map_err(ServiceError::from)?
        .ok_or(ServiceError::NotFound)?;

    Ok(order.into())
}

/// Render the fulfilment queue as CSV.
pub fn export_queue<R>(repo: &R, user: &AuthenticatedUser) -> ServiceResult<String>
where
    R: OrderReader + ?Sized,
{
    ensure_admin(user)?;

    let orders = repo.list_orders().map_err(ServiceError::from)?;
    orders_to_csv(&orders).map_err(|err| ServiceError::Internal(err.to_string()))
}

fn orders_to_csv(orders: &[Order]) -> Result<String, Box<dyn std::error::Error>> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(EXPORT_HEADER)?;

    for order in orders {
        writer.write_record([
            order.id.to_string(),
            order.contact.fullname.clone(),
            order.contact.phone.clone(),
            order.contact.email.clone(),
            order.contact.address.clone(),
            order.contact.city.clone(),
            order.contact.postal.clone(),
            order.payment.clone(),
            format_amount(order.total_cents),
            order.created_at.format("%Y-%m-%d %H:%M:%S").to_string(),
        ])?;
    }

    let bytes = writer.into_inner().map_err(|err| err.into_error())?;
    Ok(String::from_utf8(bytes)?)
}

/// Format centavos as a decimal peso amount.
fn format_amount(cents: i64) -> String {
    let sign = if cents < 0 { "-" } else { "" };
    let cents = cents.unsigned_abs();
    format!("{sign}{}.{:02}", cents / 100, cents % 100)
}
