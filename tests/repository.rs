use chrono::{NaiveDate, NaiveTime};

use beupro_shop::domain::cart::NewCartItem;
use beupro_shop::domain::comment::{CommentListQuery, NewComment, UpdateComment};
use beupro_shop::domain::courier::{CourierListQuery, NewCourier};
use beupro_shop::domain::customer::{CustomerOrderListQuery, NewCustomerOrder};
use beupro_shop::domain::delivery::NewDelivery;
use beupro_shop::domain::order::NewOrder;
use beupro_shop::domain::promotion::NewPromotion;
use beupro_shop::pagination::Pagination;
use beupro_shop::repository::errors::RepositoryError;
use beupro_shop::repository::{
    CartItemReader, CartItemWriter, CommentReader, CommentWriter, CourierReader, CourierWriter,
    CustomerOrderReader, CustomerOrderWriter, DeliveryReader, DeliveryWriter, DieselRepository,
    OrderReader, OrderWriter, PromotionReader, PromotionWriter,
};

mod common;

const CAPACITY: usize = 100;

fn wednesday_delivery() -> NewDelivery {
    NewDelivery::new(
        NaiveDate::from_ymd_opt(2025, 3, 5).unwrap(),
        NaiveTime::from_hms_opt(10, 30, 0).unwrap(),
    )
}

#[test]
fn order_queue_is_first_in_first_out() {
    let test_db = common::TestDb::new("order_queue_is_first_in_first_out.db");
    let repo = DieselRepository::new(test_db.pool());

    for name in ["Ana Cruz", "Ben Reyes", "Carla Santos"] {
        repo.enqueue_order(
            &NewOrder::new(common::contact(name), common::set_cart()),
            CAPACITY,
        )
            .unwrap();
    }

    let queue = repo.list_orders().unwrap();
    let names: Vec<_> = queue.iter().map(|o| o.contact.fullname.as_str()).collect();
    assert_eq!(names, ["Ana Cruz", "Ben Reyes", "Carla Santos"]);
    assert_eq!(queue[0].total_cents, 118_100);
    assert_eq!(queue[0].cart, common::set_cart());

    let first = repo.dequeue_order().unwrap().expect("queue has orders");
    assert_eq!(first.contact.fullname, "Ana Cruz");
    assert_eq!(repo.count_orders().unwrap(), 2);

    repo.dequeue_order().unwrap();
    repo.dequeue_order().unwrap();
    assert!(repo.dequeue_order().unwrap().is_none());
}

#[test]
fn concurrent_enqueues_never_exceed_capacity() {
    let test_db = common::TestDb::new("concurrent_enqueues_never_exceed_capacity.db");
    let repo = DieselRepository::new(test_db.pool());

    let results: Vec<_> = std::thread::scope(|scope| {
        let handles: Vec<_> = (0..8)
            .map(|n| {
                let repo = repo.clone();
                scope.spawn(move || {
                    repo.enqueue_order(
                        &NewOrder::new(common::contact(&format!("Buyer {n}")), common::set_cart()),
                        3,
                    )
                })
            })
            .collect();
        handles
            .into_iter()
            .map(|handle| handle.join().expect("enqueue thread panicked"))
            .collect()
    });

    let accepted = results.iter().filter(|result| result.is_ok()).count();
    assert_eq!(accepted, 3);
    assert!(
        results
            .iter()
            .filter_map(|result| result.as_ref().err())
            .all(|err| matches!(err, RepositoryError::CapacityExceeded { capacity: 3, .. }))
    );
    assert_eq!(repo.count_orders().unwrap(), 3);
}

#[test]
fn blank_order_name_violates_constraint() {
    let test_db = common::TestDb::new("blank_order_name_violates_constraint.db");
    let repo = DieselRepository::new(test_db.pool());

    assert!(
        repo.enqueue_order(
            &NewOrder::new(common::contact("  "), common::set_cart()),
            CAPACITY
        )
        .is_err()
    );
    assert_eq!(repo.count_orders().unwrap(), 0);
}

#[test]
fn checkout_writes_history_and_queue_snapshot() {
    let test_db = common::TestDb::new("checkout_writes_history_and_queue_snapshot.db");
    let repo = DieselRepository::new(test_db.pool());

    let placed = repo
        .place_customer_order(
            &NewCustomerOrder::new(common::contact("Dina Lopez"), common::set_cart())
                .with_payment("cod"),
        )
        .unwrap();

    assert_eq!(placed.customer.contact.fullname, "Dina Lopez");
    assert_eq!(placed.customer_id, placed.customer.id);
    assert_eq!(placed.payment, "cod");

    let fetched = repo.get_customer_order(placed.id).unwrap().expect("stored");
    assert_eq!(fetched, placed);

    let queue = repo.list_orders().unwrap();
    assert_eq!(queue.len(), 1);
    assert_eq!(queue[0].contact.fullname, "Dina Lopez");
    assert_eq!(queue[0].total_cents, placed.total_cents);
}

#[test]
fn failed_checkout_leaves_nothing_behind() {
    let test_db = common::TestDb::new("failed_checkout_leaves_nothing_behind.db");
    let repo = DieselRepository::new(test_db.pool());

    let mut contact = common::contact("Eli Tan");
    contact.address = " ".to_string();

    assert!(
        repo.place_customer_order(&NewCustomerOrder::new(contact, common::set_cart()))
            .is_err()
    );

    let (total, _) = repo
        .list_customer_orders(CustomerOrderListQuery::new())
        .unwrap();
    assert_eq!(total, 0);
    assert_eq!(repo.count_orders().unwrap(), 0);
}

#[test]
fn order_history_is_paginated_and_searchable() {
    let test_db = common::TestDb::new("order_history_is_paginated_and_searchable.db");
    let repo = DieselRepository::new(test_db.pool());

    for name in ["Faye Uy", "Gio Lim", "Hana Go"] {
        repo.place_customer_order(&NewCustomerOrder::new(
            common::contact(name),
            common::set_cart(),
        ))
        .unwrap();
    }

    let (total, page) = repo
        .list_customer_orders(CustomerOrderListQuery::new().paginate(Pagination::new(2, 2)))
        .unwrap();
    assert_eq!(total, 3);
    assert_eq!(page.len(), 1);
    assert_eq!(page[0].customer.contact.fullname, "Hana Go");

    let (total, found) = repo
        .list_customer_orders(CustomerOrderListQuery::new().search("gio"))
        .unwrap();
    assert_eq!(total, 1);
    assert_eq!(found[0].customer.contact.fullname, "Gio Lim");
}

#[test]
fn delivery_reserves_and_restores_courier() {
    let test_db = common::TestDb::new("delivery_reserves_and_restores_courier.db");
    let repo = DieselRepository::new(test_db.pool());

    let courier = repo
        .create_courier(&NewCourier::new("Jomar", "Motorbike"), CAPACITY)
        .unwrap();
    assert!(courier.available);

    let delivery = repo
        .schedule_delivery(&wednesday_delivery().with_courier_id(courier.id), CAPACITY)
        .unwrap();
    assert_eq!(delivery.courier_id, Some(courier.id));

    let reserved = repo.get_courier_by_id(courier.id).unwrap().unwrap();
    assert!(!reserved.available);
    assert!(
        repo.list_couriers(CourierListQuery::new().available(true))
            .unwrap()
            .is_empty()
    );

    let released = repo.complete_delivery(delivery.id).unwrap();
    assert_eq!(released.delivery.id, delivery.id);
    assert_eq!(released.courier_restored, Some(courier.id));
    assert!(repo.get_courier_by_id(courier.id).unwrap().unwrap().available);
    assert!(repo.get_delivery_by_id(delivery.id).unwrap().is_none());
}

#[test]
fn unknown_courier_rolls_back_delivery() {
    let test_db = common::TestDb::new("unknown_courier_rolls_back_delivery.db");
    let repo = DieselRepository::new(test_db.pool());

    let err = repo
        .schedule_delivery(&wednesday_delivery().with_courier_id(42), CAPACITY)
        .expect_err("courier 42 does not exist");

    assert!(matches!(err, RepositoryError::NotFound));
    assert_eq!(repo.count_deliveries().unwrap(), 0);
}

#[test]
fn deliveries_dequeue_oldest_first() {
    let test_db = common::TestDb::new("deliveries_dequeue_oldest_first.db");
    let repo = DieselRepository::new(test_db.pool());

    let first = repo
        .schedule_delivery(&wednesday_delivery().with_note("first"), CAPACITY)
        .unwrap();
    repo.schedule_delivery(&wednesday_delivery().with_note("second"), CAPACITY)
        .unwrap();

    let released = repo.dequeue_delivery().unwrap().expect("two scheduled");
    assert_eq!(released.delivery.id, first.id);
    assert_eq!(released.courier_restored, None);

    let remaining = repo.list_deliveries().unwrap();
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].note, "second");

    assert!(matches!(
        repo.complete_delivery(first.id),
        Err(RepositoryError::NotFound)
    ));
}

#[test]
fn couriers_dequeue_oldest_first() {
    let test_db = common::TestDb::new("couriers_dequeue_oldest_first.db");
    let repo = DieselRepository::new(test_db.pool());

    repo.create_courier(&NewCourier::new("Jomar", "Motorbike"), CAPACITY)
        .unwrap();
    repo.create_courier(&NewCourier::new("Lito", "Van"), CAPACITY)
        .unwrap();

    assert_eq!(repo.dequeue_courier().unwrap().unwrap().name, "Jomar");
    assert_eq!(repo.count_couriers().unwrap(), 1);

    let lito = repo.list_couriers(CourierListQuery::new()).unwrap().remove(0);
    let updated = repo.set_courier_availability(lito.id, false).unwrap();
    assert!(!updated.available);
}

#[test]
fn public_comments_are_approved_pinned_then_newest() {
    let test_db = common::TestDb::new("public_comments_are_approved_pinned_then_newest.db");
    let repo = DieselRepository::new(test_db.pool());

    let older = repo
        .create_comment(&NewComment::new(None, None, "Older"))
        .unwrap();
    let newer = repo
        .create_comment(&NewComment::new(Some("Mia".into()), None, "Newer"))
        .unwrap();
    let hidden = repo
        .create_comment(&NewComment::new(None, None, "Pending"))
        .unwrap();
    assert!(!hidden.approved);
    assert_eq!(older.name, "Guest");

    repo.update_comment(older.id, &UpdateComment::new().approved(true).pinned(true))
        .unwrap();
    repo.update_comment(newer.id, &UpdateComment::new().approved(true))
        .unwrap();

    let (total, public) = repo.list_comments(CommentListQuery::public()).unwrap();
    assert_eq!(total, 2);
    let bodies: Vec<_> = public.iter().map(|c| c.body.as_str()).collect();
    assert_eq!(bodies, ["Older", "Newer"]);

    repo.update_comment(older.id, &UpdateComment::new().pinned(false))
        .unwrap();
    let (_, public) = repo.list_comments(CommentListQuery::public()).unwrap();
    assert_eq!(public[0].body, "Newer");

    let (total, all) = repo
        .list_comments(CommentListQuery::all().paginate(Pagination::new(1, 2)))
        .unwrap();
    assert_eq!(total, 3);
    assert_eq!(all[0].id, older.id);
    assert_eq!(all.len(), 2);

    repo.delete_comment(hidden.id).unwrap();
    assert!(matches!(
        repo.delete_comment(hidden.id),
        Err(RepositoryError::NotFound)
    ));
    assert!(matches!(
        repo.update_comment(hidden.id, &UpdateComment::new().approved(true)),
        Err(RepositoryError::NotFound)
    ));
}

#[test]
fn promotion_batch_is_refused_when_it_overflows() {
    let test_db = common::TestDb::new("promotion_batch_is_refused_when_it_overflows.db");
    let repo = DieselRepository::new(test_db.pool());

    repo.create_promotion(&NewPromotion::new("Kept", "https://beupro.ph/k"), 2)
        .unwrap();

    let err = repo
        .create_promotions(
            &[
                NewPromotion::new("One", "https://beupro.ph/1"),
                NewPromotion::new("Two", "https://beupro.ph/2"),
            ],
            2,
        )
        .expect_err("only one slot left");

    assert!(matches!(
        err,
        RepositoryError::CapacityExceeded {
            current: 1,
            capacity: 2
        }
    ));
    assert_eq!(repo.count_promotions().unwrap(), 1);
}

#[test]
fn promotions_behave_as_a_stack() {
    let test_db = common::TestDb::new("promotions_behave_as_a_stack.db");
    let repo = DieselRepository::new(test_db.pool());

    repo.create_promotion(&NewPromotion::new("Bottom", "https://beupro.ph/a"), CAPACITY)
        .unwrap();
    let inserted = repo
        .create_promotions(
            &[
                NewPromotion::new("Middle", "https://beupro.ph/b"),
                NewPromotion::new("Top", "https://beupro.ph/c"),
            ],
            CAPACITY,
        )
        .unwrap();
    assert_eq!(inserted, 2);

    let titles: Vec<_> = repo
        .list_promotions()
        .unwrap()
        .into_iter()
        .map(|p| p.title)
        .collect();
    assert_eq!(titles, ["Top", "Middle", "Bottom"]);

    assert_eq!(repo.pop_promotion().unwrap().unwrap().title, "Top");
    assert_eq!(repo.count_promotions().unwrap(), 2);

    let bottom = repo.list_promotions().unwrap().pop().unwrap();
    repo.delete_promotion(bottom.id).unwrap();
    assert!(matches!(
        repo.delete_promotion(bottom.id),
        Err(RepositoryError::NotFound)
    ));
}

#[test]
fn cart_undo_removes_newest_item_of_session() {
    let test_db = common::TestDb::new("cart_undo_removes_newest_item_of_session.db");
    let repo = DieselRepository::new(test_db.pool());

    let add = |session: &str, id: &str, qty: i32| {
        repo.add_cart_item(&NewCartItem::new(session, common::line(id, 14_800, qty)))
            .unwrap()
    };

    add("sess_a", "set-c-1", 1);
    add("sess_a", "extra-1", 2);
    add("sess_a", "extra-2", 1);
    add("sess_b", "extra-1", 5);

    let undone = repo.undo_cart_item("sess_a", None).unwrap().unwrap();
    assert_eq!(undone.product_id, "extra-2");

    let undone = repo
        .undo_cart_item("sess_a", Some("set-c-1"))
        .unwrap()
        .unwrap();
    assert_eq!(undone.product_id, "set-c-1");

    let remaining = repo.list_cart_items("sess_a").unwrap();
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].quantity, 2);

    assert_eq!(repo.clear_cart("sess_a").unwrap(), 1);
    assert!(repo.undo_cart_item("sess_a", None).unwrap().is_none());
    assert_eq!(repo.list_cart_items("sess_b").unwrap().len(), 1);
}
