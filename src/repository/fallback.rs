use std::sync::Arc;

use crate::domain::{
    cart::{CartItem, NewCartItem},
    comment::{Comment, CommentListQuery, NewComment, UpdateComment},
    courier::{Courier, CourierListQuery, NewCourier},
    customer::{CustomerOrder, CustomerOrderListQuery, NewCustomerOrder},
    delivery::{Delivery, NewDelivery, ReleasedDelivery},
    order::{NewOrder, Order},
    promotion::{NewPromotion, Promotion},
};
use crate::repository::errors::RepositoryResult;
use crate::repository::{
    CartItemReader, CartItemWriter, CommentReader, CommentWriter, CourierReader, CourierWriter,
    CustomerOrderReader, CustomerOrderWriter, DeliveryReader, DeliveryWriter, OrderReader,
    OrderWriter, PromotionReader, PromotionWriter, Store,
};

/// Store that answers from `primary` and retries on `secondary` whenever
/// the primary fails for a reason other than a missing row or a conflict.
#[derive(Clone)]
pub struct FallbackRepository {
    primary: Arc<dyn Store>,
    secondary: Arc<dyn Store>,
}

impl FallbackRepository {
    pub fn new(primary: Arc<dyn Store>, secondary: Arc<dyn Store>) -> Self {
        Self { primary, secondary }
    }

    fn attempt<T>(
        &self,
        operation: &str,
        call: impl Fn(&dyn Store) -> RepositoryResult<T>,
    ) -> RepositoryResult<T> {
        match call(self.primary.as_ref()) {
            Err(err) if err.is_recoverable() => {
                log::warn!(
                    "{operation} failed on {} ({err}); retrying on {}",
                    self.primary.backend_name(),
                    self.secondary.backend_name()
                );
                call(self.secondary.as_ref())
            }
            result => result,
        }
    }
}

impl Store for FallbackRepository {
    fn backend_name(&self) -> &'static str {
        "fallback"
    }
}

impl OrderReader for FallbackRepository {
    fn list_orders(&self) -> RepositoryResult<Vec<Order>> {
        self.attempt("list_orders", |store| store.list_orders())
    }

    fn count_orders(&self) -> RepositoryResult<usize> {
        self.attempt("count_orders", |store| store.count_orders())
    }
}

impl OrderWriter for FallbackRepository {
    fn enqueue_order(&self, new_order: &NewOrder, capacity: usize) -> RepositoryResult<Order> {
        self.attempt("enqueue_order", |store| {
            store.enqueue_order(new_order, capacity)
        })
    }

    fn dequeue_order(&self) -> RepositoryResult<Option<Order>> {
        self.attempt("dequeue_order", |store| store.dequeue_order())
    }
}

impl CustomerOrderReader for FallbackRepository {
    fn get_customer_order(&self, id: i32) -> RepositoryResult<Option<CustomerOrder>> {
        self.attempt("get_customer_order", |store| store.get_customer_order(id))
    }

    fn list_customer_orders(
        &self,
        query: CustomerOrderListQuery,
    ) -> RepositoryResult<(usize, Vec<CustomerOrder>)> {
        self.attempt("list_customer_orders", |store| {
            store.list_customer_orders(query.clone())
        })
    }
}

impl CustomerOrderWriter for FallbackRepository {
    fn place_customer_order(&self, new_order: &NewCustomerOrder) -> RepositoryResult<CustomerOrder> {
        self.attempt("place_customer_order", |store| {
            store.place_customer_order(new_order)
        })
    }
}

impl DeliveryReader for FallbackRepository {
    fn list_deliveries(&self) -> RepositoryResult<Vec<Delivery>> {
        self.attempt("list_deliveries", |store| store.list_deliveries())
    }

    fn get_delivery_by_id(&self, id: i32) -> RepositoryResult<Option<Delivery>> {
        self.attempt("get_delivery_by_id", |store| store.get_delivery_by_id(id))
    }

    fn count_deliveries(&self) -> RepositoryResult<usize> {
        self.attempt("count_deliveries", |store| store.count_deliveries())
    }
}

impl DeliveryWriter for FallbackRepository {
    fn schedule_delivery(
        &self,
        new_delivery: &NewDelivery,
        capacity: usize,
    ) -> RepositoryResult<Delivery> {
        self.attempt("schedule_delivery", |store| {
            store.schedule_delivery(new_delivery, capacity)
        })
    }

    fn dequeue_delivery(&self) -> RepositoryResult<Option<ReleasedDelivery>> {
        self.attempt("dequeue_delivery", |store| store.dequeue_delivery())
    }

    fn complete_delivery(&self, id: i32) -> RepositoryResult<ReleasedDelivery> {
        self.attempt("complete_delivery", |store| store.complete_delivery(id))
    }
}

impl CourierReader for FallbackRepository {
    fn list_couriers(&self, query: CourierListQuery) -> RepositoryResult<Vec<Courier>> {
        self.attempt("list_couriers", |store| store.list_couriers(query.clone()))
    }

    fn get_courier_by_id(&self, id: i32) -> RepositoryResult<Option<Courier>> {
        self.attempt("get_courier_by_id", |store| store.get_courier_by_id(id))
    }

    fn count_couriers(&self) -> RepositoryResult<usize> {
        self.attempt("count_couriers", |store| store.count_couriers())
    }
}

impl CourierWriter for FallbackRepository {
    fn create_courier(&self, new_courier: &NewCourier, capacity: usize) -> RepositoryResult<Courier> {
        self.attempt("create_courier", |store| {
            store.create_courier(new_courier, capacity)
        })
    }

    fn dequeue_courier(&self) -> RepositoryResult<Option<Courier>> {
        self.attempt("dequeue_courier", |store| store.dequeue_courier())
    }

    fn set_courier_availability(&self, id: i32, available: bool) -> RepositoryResult<Courier> {
        self.attempt("set_courier_availability", |store| {
            store.set_courier_availability(id, available)
        })
    }
}

impl CommentReader for FallbackRepository {
    fn list_comments(&self, query: CommentListQuery) -> RepositoryResult<(usize, Vec<Comment>)> {
        self.attempt("list_comments", |store| store.list_comments(query.clone()))
    }
}

impl CommentWriter for FallbackRepository {
    fn create_comment(&self, new_comment: &NewComment) -> RepositoryResult<Comment> {
        self.attempt("create_comment", |store| store.create_comment(new_comment))
    }

    fn update_comment(&self, id: i32, updates: &UpdateComment) -> RepositoryResult<Comment> {
        self.attempt("update_comment", |store| store.update_comment(id, updates))
    }

    fn delete_comment(&self, id: i32) -> RepositoryResult<()> {
        self.attempt("delete_comment", |store| store.delete_comment(id))
    }
}

impl PromotionReader for FallbackRepository {
    fn list_promotions(&self) -> RepositoryResult<Vec<Promotion>> {
        self.attempt("list_promotions", |store| store.list_promotions())
    }

    fn count_promotions(&self) -> RepositoryResult<usize> {
        self.attempt("count_promotions", |store| store.count_promotions())
    }
}

impl PromotionWriter for FallbackRepository {
    fn create_promotion(
        &self,
        new_promotion: &NewPromotion,
        capacity: usize,
    ) -> RepositoryResult<Promotion> {
        self.attempt("create_promotion", |store| {
            store.create_promotion(new_promotion, capacity)
        })
    }

    fn create_promotions(
        &self,
        new_promotions: &[NewPromotion],
        capacity: usize,
    ) -> RepositoryResult<usize> {
        self.attempt("create_promotions", |store| {
            store.create_promotions(new_promotions, capacity)
        })
    }

    fn pop_promotion(&self) -> RepositoryResult<Option<Promotion>> {
        self.attempt("pop_promotion", |store| store.pop_promotion())
    }

    fn delete_promotion(&self, id: i32) -> RepositoryResult<()> {
        self.attempt("delete_promotion", |store| store.delete_promotion(id))
    }
}

impl CartItemReader for FallbackRepository {
    fn list_cart_items(&self, session_id: &str) -> RepositoryResult<Vec<CartItem>> {
        self.attempt("list_cart_items", |store| store.list_cart_items(session_id))
    }
}

impl CartItemWriter for FallbackRepository {
    fn add_cart_item(&self, new_item: &NewCartItem) -> RepositoryResult<CartItem> {
        self.attempt("add_cart_item", |store| store.add_cart_item(new_item))
    }

    fn undo_cart_item(
        &self,
        session_id: &str,
        product_id: Option<&str>,
    ) -> RepositoryResult<Option<CartItem>> {
        self.attempt("undo_cart_item", |store| {
            store.undo_cart_item(session_id, product_id)
        })
    }

    fn clear_cart(&self, session_id: &str) -> RepositoryResult<usize> {
        self.attempt("clear_cart", |store| store.clear_cart(session_id))
    }
}
