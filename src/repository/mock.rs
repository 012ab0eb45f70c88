use mockall::mock;

use super::{
    CartItemReader, CartItemWriter, CommentReader, CommentWriter, CourierReader, CourierWriter,
    CustomerOrderReader, CustomerOrderWriter, DeliveryReader, DeliveryWriter, OrderReader,
    OrderWriter, PromotionReader, PromotionWriter, Store as StoreBackend,
};
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

mock! {
    pub OrderQueue {}

    impl OrderReader for OrderQueue {
        fn list_orders(&self) -> RepositoryResult<Vec<Order>>;
        fn count_orders(&self) -> RepositoryResult<usize>;
    }

    impl OrderWriter for OrderQueue {
        fn enqueue_order(&self, new_order: &NewOrder, capacity: usize) -> RepositoryResult<Order>;
        fn dequeue_order(&self) -> RepositoryResult<Option<Order>>;
    }
}

mock! {
    pub CustomerOrders {}

    impl CustomerOrderReader for CustomerOrders {
        fn get_customer_order(&self, id: i32) -> RepositoryResult<Option<CustomerOrder>>;
        fn list_customer_orders(&self, query: CustomerOrderListQuery) -> RepositoryResult<(usize, Vec<CustomerOrder>)>;
    }

    impl CustomerOrderWriter for CustomerOrders {
        fn place_customer_order(&self, new_order: &NewCustomerOrder) -> RepositoryResult<CustomerOrder>;
    }
}

mock! {
    pub Deliveries {}

    impl DeliveryReader for Deliveries {
        fn list_deliveries(&self) -> RepositoryResult<Vec<Delivery>>;
        fn get_delivery_by_id(&self, id: i32) -> RepositoryResult<Option<Delivery>>;
        fn count_deliveries(&self) -> RepositoryResult<usize>;
    }

    impl DeliveryWriter for Deliveries {
        fn schedule_delivery(&self, new_delivery: &NewDelivery, capacity: usize) -> RepositoryResult<Delivery>;
        fn dequeue_delivery(&self) -> RepositoryResult<Option<ReleasedDelivery>>;
        fn complete_delivery(&self, id: i32) -> RepositoryResult<ReleasedDelivery>;
    }
}

mock! {
    pub Couriers {}

    impl CourierReader for Couriers {
        fn list_couriers(&self, query: CourierListQuery) -> RepositoryResult<Vec<Courier>>;
        fn get_courier_by_id(&self, id: i32) -> RepositoryResult<Option<Courier>>;
        fn count_couriers(&self) -> RepositoryResult<usize>;
    }

    impl CourierWriter for Couriers {
        fn create_courier(&self, new_courier: &NewCourier, capacity: usize) -> RepositoryResult<Courier>;
        fn dequeue_courier(&self) -> RepositoryResult<Option<Courier>>;
        fn set_courier_availability(&self, id: i32, available: bool) -> RepositoryResult<Courier>;
    }
}

mock! {
    pub Comments {}

    impl CommentReader for Comments {
        fn list_comments(&self, query: CommentListQuery) -> RepositoryResult<(usize, Vec<Comment>)>;
    }

    impl CommentWriter for Comments {
        fn create_comment(&self, new_comment: &NewComment) -> RepositoryResult<Comment>;
        fn update_comment(&self, id: i32, updates: &UpdateComment) -> RepositoryResult<Comment>;
        fn delete_comment(&self, id: i32) -> RepositoryResult<()>;
    }
}

mock! {
    pub Promotions {}

    impl PromotionReader for Promotions {
        fn list_promotions(&self) -> RepositoryResult<Vec<Promotion>>;
        fn count_promotions(&self) -> RepositoryResult<usize>;
    }

    impl PromotionWriter for Promotions {
        fn create_promotion(&self, new_promotion: &NewPromotion, capacity: usize) -> RepositoryResult<Promotion>;
        fn create_promotions(&self, new_promotions: &[NewPromotion], capacity: usize) -> RepositoryResult<usize>;
        fn pop_promotion(&self) -> RepositoryResult<Option<Promotion>>;
        fn delete_promotion(&self, id: i32) -> RepositoryResult<()>;
    }
}

mock! {
    pub CartItems {}

    impl CartItemReader for CartItems {
        fn list_cart_items(&self, session_id: &str) -> RepositoryResult<Vec<CartItem>>;
    }

    impl CartItemWriter for CartItems {
        fn add_cart_item(&self, new_item: &NewCartItem) -> RepositoryResult<CartItem>;
        fn undo_cart_item<'a>(&self, session_id: &str, product_id: Option<&'a str>) -> RepositoryResult<Option<CartItem>>;
        fn clear_cart(&self, session_id: &str) -> RepositoryResult<usize>;
    }
}

mock! {
    pub Store {}

    impl OrderReader for Store {
        fn list_orders(&self) -> RepositoryResult<Vec<Order>>;
        fn count_orders(&self) -> RepositoryResult<usize>;
    }

    impl OrderWriter for Store {
        fn enqueue_order(&self, new_order: &NewOrder, capacity: usize) -> RepositoryResult<Order>;
        fn dequeue_order(&self) -> RepositoryResult<Option<Order>>;
    }

    impl CustomerOrderReader for Store {
        fn get_customer_order(&self, id: i32) -> RepositoryResult<Option<CustomerOrder>>;
        fn list_customer_orders(&self, query: CustomerOrderListQuery) -> RepositoryResult<(usize, Vec<CustomerOrder>)>;
    }

    impl CustomerOrderWriter for Store {
        fn place_customer_order(&self, new_order: &NewCustomerOrder) -> RepositoryResult<CustomerOrder>;
    }

    impl DeliveryReader for Store {
        fn list_deliveries(&self) -> RepositoryResult<Vec<Delivery>>;
        fn get_delivery_by_id(&self, id: i32) -> RepositoryResult<Option<Delivery>>;
        fn count_deliveries(&self) -> RepositoryResult<usize>;
    }

    impl DeliveryWriter for Store {
        fn schedule_delivery(&self, new_delivery: &NewDelivery, capacity: usize) -> RepositoryResult<Delivery>;
        fn dequeue_delivery(&self) -> RepositoryResult<Option<ReleasedDelivery>>;
        fn complete_delivery(&self, id: i32) -> RepositoryResult<ReleasedDelivery>;
    }

    impl CourierReader for Store {
        fn list_couriers(&self, query: CourierListQuery) -> RepositoryResult<Vec<Courier>>;
        fn get_courier_by_id(&self, id: i32) -> RepositoryResult<Option<Courier>>;
        fn count_couriers(&self) -> RepositoryResult<usize>;
    }

    impl CourierWriter for Store {
        fn create_courier(&self, new_courier: &NewCourier, capacity: usize) -> RepositoryResult<Courier>;
        fn dequeue_courier(&self) -> RepositoryResult<Option<Courier>>;
        fn set_courier_availability(&self, id: i32, available: bool) -> RepositoryResult<Courier>;
    }

    impl CommentReader for Store {
        fn list_comments(&self, query: CommentListQuery) -> RepositoryResult<(usize, Vec<Comment>)>;
    }

    impl CommentWriter for Store {
        fn create_comment(&self, new_comment: &NewComment) -> RepositoryResult<Comment>;
        fn update_comment(&self, id: i32, updates: &UpdateComment) -> RepositoryResult<Comment>;
        fn delete_comment(&self, id: i32) -> RepositoryResult<()>;
    }

    impl PromotionReader for Store {
        fn list_promotions(&self) -> RepositoryResult<Vec<Promotion>>;
        fn count_promotions(&self) -> RepositoryResult<usize>;
    }

    impl PromotionWriter for Store {
        fn create_promotion(&self, new_promotion: &NewPromotion, capacity: usize) -> RepositoryResult<Promotion>;
        fn create_promotions(&self, new_promotions: &[NewPromotion], capacity: usize) -> RepositoryResult<usize>;
        fn pop_promotion(&self) -> RepositoryResult<Option<Promotion>>;
        fn delete_promotion(&self, id: i32) -> RepositoryResult<()>;
    }

    impl CartItemReader for Store {
        fn list_cart_items(&self, session_id: &str) -> RepositoryResult<Vec<CartItem>>;
    }

    impl CartItemWriter for Store {
        fn add_cart_item(&self, new_item: &NewCartItem) -> RepositoryResult<CartItem>;
        fn undo_cart_item<'a>(&self, session_id: &str, product_id: Option<&'a str>) -> RepositoryResult<Option<CartItem>>;
        fn clear_cart(&self, session_id: &str) -> RepositoryResult<usize>;
    }

    impl StoreBackend for Store {
        fn backend_name(&self) -> &'static str;
    }
}
