//! PostgREST-backed storage for deployments that keep their data in Supabase.
//!
//! Every call is a blocking HTTP request, so callers must run it on a
//! blocking thread. PostgREST offers no client-side transactions, so
//! operations touching several tables run sequentially and undo earlier
//! steps when a later one fails.

use std::time::Duration;

use reqwest::Method;
use reqwest::blocking::{Client, RequestBuilder, Response};
use reqwest::header::CONTENT_RANGE;
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::repository::{Store, ensure_room};
use crate::repository::errors::{RepositoryError, RepositoryResult};

mod cart_item;
mod comment;
mod courier;
mod customer_order;
mod delivery;
mod order;
mod promotion;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);
const OLDEST_FIRST: &str = "created_at.asc,id.asc";
const NEWEST_FIRST: &str = "created_at.desc,id.desc";
const TAKE_ATTEMPTS: usize = 2;

/// Query string pairs appended to a PostgREST request.
type Params = Vec<(&'static str, String)>;

#[derive(Clone)]
pub struct SupabaseRepository {
    rest_url: String,
    api_key: String,
    client: Client,
}

impl SupabaseRepository {
    /// Build a repository for the project at `base_url` using its anon key.
    pub fn new(base_url: &str, api_key: &str) -> RepositoryResult<Self> {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|err| RepositoryError::Unavailable(err.to_string()))?;

        Ok(Self {
            rest_url: format!("{}/rest/v1", base_url.trim_end_matches('/')),
            api_key: api_key.to_string(),
            client,
        })
    }

    fn request(&self, method: Method, table: &str) -> RequestBuilder {
        self.client
            .request(method, format!("{}/{}", self.rest_url, table))
            .header("apikey", &self.api_key)
            .bearer_auth(&self.api_key)
    }

    fn send(&self, request: RequestBuilder) -> RepositoryResult<Response> {
        let response = request.send().map_err(transport_error)?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let message = response.text().unwrap_or_default();
        log::debug!("postgrest responded {status}: {message}");

        // PostgREST reports constraint violations as 409, or as 400 carrying
        // a Postgres integrity code (class 23).
        if status.as_u16() == 409 || message.contains("\"code\":\"23") {
            return Err(RepositoryError::Conflict(message));
        }

        Err(RepositoryError::Remote {
            status: status.as_u16(),
            message,
        })
    }

    fn select<T: DeserializeOwned>(&self, table: &str, params: &Params) -> RepositoryResult<Vec<T>> {
        let response = self.send(self.request(Method::GET, table).query(params))?;
        response.json::<Vec<T>>().map_err(transport_error)
    }

    fn select_one<T: DeserializeOwned>(
        &self,
        table: &str,
        mut params: Params,
    ) -> RepositoryResult<Option<T>> {
        params.push(("limit", "1".to_string()));
        Ok(self.select::<T>(table, &params)?.into_iter().next())
    }

    /// Select rows and the exact number of rows matching the filters.
    fn select_counted<T: DeserializeOwned>(
        &self,
        table: &str,
        params: &Params,
    ) -> RepositoryResult<(usize, Vec<T>)> {
        let response = self.send(
            self.request(Method::GET, table)
                .header("Prefer", "count=exact")
                .query(params),
        )?;
        let total = total_from_headers(&response)?;
        let rows = response.json::<Vec<T>>().map_err(transport_error)?;
        Ok((total, rows))
    }

    fn count(&self, table: &str, mut params: Params) -> RepositoryResult<usize> {
        params.push(("select", "id".to_string()));
        params.push(("limit", "1".to_string()));
        let response = self.send(
            self.request(Method::GET, table)
                .header("Prefer", "count=exact")
                .query(&params),
        )?;
        total_from_headers(&response)
    }

    fn insert<B, T>(&self, table: &str, body: &B) -> RepositoryResult<Vec<T>>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let response = self.send(
            self.request(Method::POST, table)
                .header("Prefer", "return=representation")
                .json(body),
        )?;
        response.json::<Vec<T>>().map_err(transport_error)
    }

    fn insert_one<B, T>(&self, table: &str, body: &B) -> RepositoryResult<T>
    where
        B: Serialize,
        T: DeserializeOwned,
    {
        self.insert::<B, T>(table, body)?
            .into_iter()
            .next()
            .ok_or_else(|| empty_representation(table))
    }

    fn update<B, T>(&self, table: &str, filters: &Params, body: &B) -> RepositoryResult<Vec<T>>
    where
        B: Serialize,
        T: DeserializeOwned,
    {
        let response = self.send(
            self.request(Method::PATCH, table)
                .header("Prefer", "return=representation")
                .query(filters)
                .json(body),
        )?;
        response.json::<Vec<T>>().map_err(transport_error)
    }

    fn delete<T: DeserializeOwned>(&self, table: &str, filters: &Params) -> RepositoryResult<Vec<T>> {
        let response = self.send(
            self.request(Method::DELETE, table)
                .header("Prefer", "return=representation")
                .query(filters),
        )?;
        response.json::<Vec<T>>().map_err(transport_error)
    }

    /// Fail with `CapacityExceeded` unless `adding` rows fit in `table`.
    ///
    /// PostgREST offers no multi-statement transaction, so a concurrent
    /// writer may still land between this count and the insert that follows.
    fn check_room(&self, table: &str, adding: usize, capacity: usize) -> RepositoryResult<()> {
        let current = self.count(table, Vec::new())?;
        ensure_room(current, adding, capacity)
    }

    /// Delete the first row in `order`, returning it when one existed.
    ///
    /// The row is looked up first and then deleted by id, so two concurrent
    /// callers can never both receive the same row. When another caller
    /// deleted the selected row first, the lookup is repeated once before
    /// giving up.
    fn take_first<T>(&self, table: &str, order: &str, mut filters: Params) -> RepositoryResult<Option<T>>
    where
        T: DeserializeOwned + HasId,
    {
        filters.push(("order", order.to_string()));
        for _ in 0..TAKE_ATTEMPTS {
            let Some(first) = self.select_one::<T>(table, filters.clone())? else {
                return Ok(None);
            };

            let removed = self.delete::<T>(table, &id_filter(first.id()))?;
            if let Some(row) = removed.into_iter().next() {
                return Ok(Some(row));
            }
            log::debug!("{table} row {} was taken concurrently", first.id());
        }
        Ok(None)
    }

    /// Best-effort removal of a row written earlier in a failed sequence.
    fn compensate(&self, table: &str, id: i32) {
        if let Err(err) = self.delete::<serde_json::Value>(table, &id_filter(id)) {
            log::error!("failed to roll back {table} row {id}: {err}");
        }
    }
}

impl Store for SupabaseRepository {
    fn backend_name(&self) -> &'static str {
        "supabase"
    }
}

/// Rows whose identifier is needed to address them in follow-up requests.
trait HasId {
    fn id(&self) -> i32;
}

fn id_filter(id: i32) -> Params {
    vec![("id", format!("eq.{id}"))]
}

fn transport_error(err: reqwest::Error) -> RepositoryError {
    RepositoryError::Unavailable(err.to_string())
}

fn empty_representation(table: &str) -> RepositoryError {
    RepositoryError::Remote {
        status: 200,
        message: format!("{table}: write returned no representation"),
    }
}

fn total_from_headers(response: &Response) -> RepositoryResult<usize> {
    let header = response
        .headers()
        .get(CONTENT_RANGE)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default();

    parse_content_range_total(header).ok_or_else(|| RepositoryError::Remote {
        status: response.status().as_u16(),
        message: format!("unexpected Content-Range header `{header}`"),
    })
}

/// Extract the total from a `Content-Range` value such as `0-24/312` or `*/0`.
fn parse_content_range_total(header: &str) -> Option<usize> {
    let (_, total) = header.rsplit_once('/')?;
    total.trim().parse().ok()
}

#[cfg(test)]
mod tests {
    use mockito::{Matcher, Server};

    use super::*;
    use crate::domain::comment::{CommentListQuery, UpdateComment};
    use crate::domain::courier::NewCourier;
    use crate::domain::delivery::NewDelivery;
    use crate::domain::promotion::NewPromotion;
    use crate::repository::{
        CommentReader, CommentWriter, CourierWriter, DeliveryWriter, OrderReader, OrderWriter,
        PromotionReader, PromotionWriter,
    };

    const ORDER_ROW: &str = r#"[{
        "id": 7,
        "fullname": "Ana Cruz",
        "phone": "0917",
        "email": "",
        "address": "12 Mabini St",
        "city": "Manila",
        "postal": "1000",
        "payment": "cod",
        "comments": "",
        "cart": {"set": {"id": "set-c-1", "name": "Set C-1", "price_cents": 88500, "qty": 1}, "extras": []},
        "total_cents": 88500,
        "created_at": "2025-03-03T08:00:00+00:00"
    }]"#;

    fn repository(server: &Server) -> SupabaseRepository {
        SupabaseRepository::new(&server.url(), "anon-key").unwrap()
    }

    #[test]
    fn parses_content_range_totals() {
        assert_eq!(parse_content_range_total("0-24/312"), Some(312));
        assert_eq!(parse_content_range_total("*/0"), Some(0));
        assert_eq!(parse_content_range_total("0-24/*"), None);
        assert_eq!(parse_content_range_total(""), None);
    }

    #[test]
    fn list_orders_sends_keys_and_oldest_first_order() {
        let mut server = Server::new();
        let mock = server
            .mock("GET", "/rest/v1/orders")
            .match_header("apikey", "anon-key")
            .match_header("authorization", "Bearer anon-key")
            .match_query(Matcher::UrlEncoded(
                "order".into(),
                "created_at.asc,id.asc".into(),
            ))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(ORDER_ROW)
            .create();

        let orders = repository(&server).list_orders().unwrap();

        mock.assert();
        assert_eq!(orders.len(), 1);
        assert_eq!(orders[0].id, 7);
        assert_eq!(orders[0].contact.fullname, "Ana Cruz");
        assert_eq!(orders[0].total_cents, 88_500);
    }

    #[test]
    fn dequeue_order_selects_oldest_then_deletes_it() {
        let mut server = Server::new();
        let select = server
            .mock("GET", "/rest/v1/orders")
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("order".into(), "created_at.asc,id.asc".into()),
                Matcher::UrlEncoded("limit".into(), "1".into()),
            ]))
            .with_status(200)
            .with_body(ORDER_ROW)
            .create();
        let delete = server
            .mock("DELETE", "/rest/v1/orders")
            .match_query(Matcher::UrlEncoded("id".into(), "eq.7".into()))
            .match_header("prefer", "return=representation")
            .with_status(200)
            .with_body(ORDER_ROW)
            .create();

        let order = repository(&server).dequeue_order().unwrap();

        select.assert();
        delete.assert();
        assert_eq!(order.map(|order| order.id), Some(7));
    }

    #[test]
    fn dequeue_retries_when_selected_row_was_taken() {
        let mut server = Server::new();
        let first_select = server
            .mock("GET", "/rest/v1/orders")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body(ORDER_ROW)
            .expect(1)
            .create();
        let second_select = server
            .mock("GET", "/rest/v1/orders")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body(ORDER_ROW.replace("\"id\": 7", "\"id\": 8"))
            .expect(1)
            .create();
        let lost_delete = server
            .mock("DELETE", "/rest/v1/orders")
            .match_query(Matcher::UrlEncoded("id".into(), "eq.7".into()))
            .with_status(200)
            .with_body("[]")
            .create();
        let won_delete = server
            .mock("DELETE", "/rest/v1/orders")
            .match_query(Matcher::UrlEncoded("id".into(), "eq.8".into()))
            .with_status(200)
            .with_body(ORDER_ROW.replace("\"id\": 7", "\"id\": 8"))
            .create();

        let order = repository(&server).dequeue_order().unwrap();

        first_select.assert();
        second_select.assert();
        lost_delete.assert();
        won_delete.assert();
        assert_eq!(order.map(|order| order.id), Some(8));
    }

    #[test]
    fn full_collection_is_refused_before_insert() {
        let mut server = Server::new();
        server
            .mock("GET", "/rest/v1/promotions")
            .match_header("prefer", "count=exact")
            .match_query(Matcher::Any)
            .with_status(206)
            .with_header("content-range", "0-0/4")
            .with_body(r#"[{"id": 1}]"#)
            .create();
        let insert = server
            .mock("POST", "/rest/v1/promotions")
            .expect(0)
            .create();

        let err = repository(&server)
            .create_promotions(
                &[
                    NewPromotion::new("A", "https://beupro.ph/a"),
                    NewPromotion::new("B", "https://beupro.ph/b"),
                ],
                5,
            )
            .unwrap_err();

        insert.assert();
        assert!(matches!(
            err,
            RepositoryError::CapacityExceeded {
                current: 4,
                capacity: 5
            }
        ));
        assert!(!err.is_recoverable());
    }

    #[test]
    fn dequeue_on_empty_queue_returns_none() {
        let mut server = Server::new();
        server
            .mock("GET", "/rest/v1/orders")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body("[]")
            .create();

        assert!(repository(&server).dequeue_order().unwrap().is_none());
    }

    #[test]
    fn counts_come_from_content_range() {
        let mut server = Server::new();
        let mock = server
            .mock("GET", "/rest/v1/promotions")
            .match_header("prefer", "count=exact")
            .match_query(Matcher::Any)
            .with_status(206)
            .with_header("content-range", "0-0/42")
            .with_body(r#"[{"id": 1}]"#)
            .create();

        let total = repository(&server).count_promotions().unwrap();

        mock.assert();
        assert_eq!(total, 42);
    }

    #[test]
    fn server_errors_are_recoverable_remote_failures() {
        let mut server = Server::new();
        server
            .mock("GET", "/rest/v1/orders")
            .match_query(Matcher::Any)
            .with_status(503)
            .with_body("upstream down")
            .create();

        let err = repository(&server).list_orders().unwrap_err();

        assert!(matches!(err, RepositoryError::Remote { status: 503, .. }));
        assert!(err.is_recoverable());
    }

    #[test]
    fn unreachable_backend_is_unavailable() {
        let repo = SupabaseRepository::new("http://127.0.0.1:1", "anon-key").unwrap();

        let err = repo.count_orders().unwrap_err();

        assert!(matches!(err, RepositoryError::Unavailable(_)));
    }

    #[test]
    fn constraint_violations_map_to_conflict() {
        let mut server = Server::new();
        server
            .mock("GET", "/rest/v1/couriers")
            .match_header("prefer", "count=exact")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_header("content-range", "*/0")
            .with_body("[]")
            .create();
        server
            .mock("POST", "/rest/v1/couriers")
            .with_status(400)
            .with_body(r#"{"code":"23514","message":"violates check constraint"}"#)
            .create();

        let err = repository(&server)
            .create_courier(&NewCourier::new(" ", "bike"), 100)
            .unwrap_err();

        assert!(matches!(err, RepositoryError::Conflict(_)));
        assert!(!err.is_recoverable());
    }

    #[test]
    fn scheduling_with_unknown_courier_is_not_found() {
        let mut server = Server::new();
        server
            .mock("GET", "/rest/v1/couriers")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body("[]")
            .create();
        let insert = server
            .mock("POST", "/rest/v1/deliveries")
            .expect(0)
            .create();

        let date = chrono::NaiveDate::from_ymd_opt(2025, 3, 3).unwrap();
        let time = chrono::NaiveTime::from_hms_opt(10, 0, 0).unwrap();
        let err = repository(&server)
            .schedule_delivery(&NewDelivery::new(date, time).with_courier_id(99), 100)
            .unwrap_err();

        insert.assert();
        assert!(matches!(err, RepositoryError::NotFound));
    }

    #[test]
    fn public_comments_filter_approved_and_pin_first() {
        let mut server = Server::new();
        let mock = server
            .mock("GET", "/rest/v1/comments")
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("approved".into(), "is.true".into()),
                Matcher::UrlEncoded(
                    "order".into(),
                    "pinned.desc,created_at.desc,id.desc".into(),
                ),
            ]))
            .with_status(200)
            .with_header("content-range", "0-0/1")
            .with_body(
                r#"[{"id": 3, "name": "Guest", "email": "", "body": "Nice",
                    "approved": true, "pinned": true,
                    "created_at": "2025-03-03T08:00:00Z"}]"#,
            )
            .create();

        let (total, comments) = repository(&server)
            .list_comments(CommentListQuery::public())
            .unwrap();

        mock.assert();
        assert_eq!(total, 1);
        assert!(comments[0].pinned);
    }

    #[test]
    fn updating_a_missing_comment_is_not_found() {
        let mut server = Server::new();
        server
            .mock("PATCH", "/rest/v1/comments")
            .match_query(Matcher::UrlEncoded("id".into(), "eq.5".into()))
            .with_status(200)
            .with_body("[]")
            .create();

        let err = repository(&server)
            .update_comment(5, &UpdateComment::new().approved(true))
            .unwrap_err();

        assert!(matches!(err, RepositoryError::NotFound));
    }
}
