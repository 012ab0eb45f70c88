use crate::db::{DbConnection, DbPool};
use crate::domain::{
    cart::{CartItem, NewCartItem},
    comment::{Comment, CommentListQuery, NewComment, UpdateComment},
    courier::{Courier, CourierListQuery, NewCourier},
    customer::{CustomerOrder, CustomerOrderListQuery, NewCustomerOrder},
    delivery::{Delivery, NewDelivery, ReleasedDelivery},
    order::{NewOrder, Order},
    promotion::{NewPromotion, Promotion},
};
use crate::repository::errors::{RepositoryError, RepositoryResult};

pub mod cart_item;
pub mod comment;
pub mod courier;
pub mod customer_order;
pub mod delivery;
pub mod errors;
pub mod fallback;
pub mod order;
pub mod promotion;
pub mod supabase;

#[cfg(test)]
pub mod mock;

pub use fallback::FallbackRepository;
pub use supabase::SupabaseRepository;

#[derive(Clone)]
/// Diesel-backed repository implementation that wraps an r2d2 pool.
pub struct DieselRepository {
    pool: DbPool, // r2d2::Pool is cheap to clone
}

impl DieselRepository {
    /// Create a new repository using the provided connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    fn conn(&self) -> RepositoryResult<DbConnection> {
        Ok(self.pool.get()?)
    }
}

/// Fail with `CapacityExceeded` unless `adding` more rows fit next to
/// `current` within `capacity`.
pub(crate) fn ensure_room(current: usize, adding: usize, capacity: usize) -> RepositoryResult<()> {
    if current.saturating_add(adding) > capacity {
        return Err(RepositoryError::CapacityExceeded { current, capacity });
    }
    Ok(())
}

/// Read-only operations over the fulfilment queue.
pub trait OrderReader {
    /// All queued orders, oldest first.
    fn list_orders(&self) -> RepositoryResult<Vec<Order>>;
    fn count_orders(&self) -> RepositoryResult<usize>;
}

/// Write operations over the fulfilment queue.
pub trait OrderWriter {
    /// Append an order unless the queue already holds `capacity` rows.
    fn enqueue_order(&self, new_order: &NewOrder, capacity: usize) -> RepositoryResult<Order>;
    /// Remove and return the oldest order, if any.
    fn dequeue_order(&self) -> RepositoryResult<Option<Order>>;
}

/// Read-only operations over the storefront order history.
pub trait CustomerOrderReader {
    fn get_customer_order(&self, id: i32) -> RepositoryResult<Option<CustomerOrder>>;
    /// Orders joined with their customers, oldest first, with the total count.
    fn list_customer_orders(
        &self,
        query: CustomerOrderListQuery,
    ) -> RepositoryResult<(usize, Vec<CustomerOrder>)>;
}

/// Write operations over the storefront order history.
pub trait CustomerOrderWriter {
    /// Persist the customer, the history row and the queue snapshot.
    fn place_customer_order(&self, new_order: &NewCustomerOrder) -> RepositoryResult<CustomerOrder>;
}

pub trait DeliveryReader {
    /// All scheduled deliveries, oldest first.
    fn list_deliveries(&self) -> RepositoryResult<Vec<Delivery>>;
    fn get_delivery_by_id(&self, id: i32) -> RepositoryResult<Option<Delivery>>;
    fn count_deliveries(&self) -> RepositoryResult<usize>;
}

pub trait DeliveryWriter {
    /// Insert the delivery and reserve its courier, failing with `NotFound`
    /// when the courier does not exist and `CapacityExceeded` when
    /// `capacity` deliveries are already scheduled.
    fn schedule_delivery(
        &self,
        new_delivery: &NewDelivery,
        capacity: usize,
    ) -> RepositoryResult<Delivery>;
    /// Remove the oldest delivery and free its courier.
    fn dequeue_delivery(&self) -> RepositoryResult<Option<ReleasedDelivery>>;
    /// Remove a specific delivery and free its courier.
    fn complete_delivery(&self, id: i32) -> RepositoryResult<ReleasedDelivery>;
}

pub trait CourierReader {
    fn list_couriers(&self, query: CourierListQuery) -> RepositoryResult<Vec<Courier>>;
    fn get_courier_by_id(&self, id: i32) -> RepositoryResult<Option<Courier>>;
    fn count_couriers(&self) -> RepositoryResult<usize>;
}

pub trait CourierWriter {
    fn create_courier(&self, new_courier: &NewCourier, capacity: usize)
    -> RepositoryResult<Courier>;
    fn dequeue_courier(&self) -> RepositoryResult<Option<Courier>>;
    fn set_courier_availability(&self, id: i32, available: bool) -> RepositoryResult<Courier>;
}

pub trait CommentReader {
    fn list_comments(&self, query: CommentListQuery) -> RepositoryResult<(usize, Vec<Comment>)>;
}

pub trait CommentWriter {
    fn create_comment(&self, new_comment: &NewComment) -> RepositoryResult<Comment>;
    fn update_comment(&self, id: i32, updates: &UpdateComment) -> RepositoryResult<Comment>;
    fn delete_comment(&self, id: i32) -> RepositoryResult<()>;
}

pub trait PromotionReader {
    /// All promotions, newest first.
    fn list_promotions(&self) -> RepositoryResult<Vec<Promotion>>;
    fn count_promotions(&self) -> RepositoryResult<usize>;
}

pub trait PromotionWriter {
    fn create_promotion(
        &self,
        new_promotion: &NewPromotion,
        capacity: usize,
    ) -> RepositoryResult<Promotion>;
    /// Insert every promotion or none; the whole batch must fit in `capacity`.
    fn create_promotions(
        &self,
        new_promotions: &[NewPromotion],
        capacity: usize,
    ) -> RepositoryResult<usize>;
    /// Remove and return the newest promotion, if any.
    fn pop_promotion(&self) -> RepositoryResult<Option<Promotion>>;
    fn delete_promotion(&self, id: i32) -> RepositoryResult<()>;
}

pub trait CartItemReader {
    /// Items of one session, oldest first.
    fn list_cart_items(&self, session_id: &str) -> RepositoryResult<Vec<CartItem>>;
}

pub trait CartItemWriter {
    fn add_cart_item(&self, new_item: &NewCartItem) -> RepositoryResult<CartItem>;
    /// Remove the newest item of the session, optionally limited to one product.
    fn undo_cart_item(
        &self,
        session_id: &str,
        product_id: Option<&str>,
    ) -> RepositoryResult<Option<CartItem>>;
    fn clear_cart(&self, session_id: &str) -> RepositoryResult<usize>;
}

/// Every storage capability the HTTP layer needs, object-safe so the
/// backend can be chosen at startup.
pub trait Store:
    OrderReader
    + OrderWriter
    + CustomerOrderReader
    + CustomerOrderWriter
    + DeliveryReader
    + DeliveryWriter
    + CourierReader
    + CourierWriter
    + CommentReader
    + CommentWriter
    + PromotionReader
    + PromotionWriter
    + CartItemReader
    + CartItemWriter
    + Send
    + Sync
{
    /// Short backend label reported by the health endpoint.
    fn backend_name(&self) -> &'static str;
}

impl Store for DieselRepository {
    fn backend_name(&self) -> &'static str {
        "sqlite"
    }
}
