//! # Wirecheck Todos suite
//!
//! The default contract suite for a Todos HTTP resource: CORS preflight,
//! create, update (PUT and PATCH), delete, and delete-verification. Every
//! item URL used by an update or delete comes from the `location` header
//! captured off a preceding create, never from a literal.
//!
//! The target collection defaults to `http://localhost:8000/todos` and can
//! be overridden with the `URL` environment variable.
//!
//! ## Example
//!
//! ```rust,ignore
//! use wirecheck_http::{Client, HarnessConfig};
//!
//! let config = HarnessConfig::from_env();
//! let client = Client::from_config(&config)?;
//!
//! for scenario in wirecheck_todos::suite(&config.collection_url) {
//!     let report = scenario.run(&client).await;
//!     assert!(report.is_passed(), "{report}");
//! }
//! ```

use wirecheck_core::{check, Method, RequestDescriptor};
use wirecheck_http::{CheckStep, HarnessConfig, RequestStep, Scenario};

/// Title used by every scenario that creates an item
pub const DEFAULT_TITLE: &str = "Walk the dog";

/// Pattern a created item's `location` header must match
pub const LOCATION_PATTERN: &str = r"^https?://.+/todos/[0-9]+$";

/// Origin sent with the CORS preflight
pub const PREFLIGHT_ORIGIN: &str = "http://someplace.com";

/// The collection endpoint under test, honoring the `URL` env override
pub fn collection_url() -> String {
    HarnessConfig::from_env().collection_url
}

/// A request step that creates an item and captures its `location`
fn create_step(collection_url: &str) -> RequestStep {
    let url = collection_url.to_string();
    RequestStep::new("create todo", move |_cx| {
        Ok(RequestDescriptor::builder(Method::Post, &url)
            .json(serde_json::json!({ "title": DEFAULT_TITLE }))
            .build())
    })
    .capture_location()
}

/// `OPTIONS` on the collection must advertise permissive CORS
pub fn cors_preflight(collection_url: &str) -> Scenario {
    let url = collection_url.to_string();
    Scenario::new("cross origin request")
        .step(RequestStep::new("preflight", move |_cx| {
            Ok(RequestDescriptor::builder(Method::Options, &url)
                .header("Origin", PREFLIGHT_ORIGIN)
                .build())
        }))
        .step(CheckStep::new("returns the CORS headers", |envelope| {
            check::expect_header_keys(
                envelope,
                &[
                    "access-control-allow-origin",
                    "access-control-allow-methods",
                    "access-control-allow-headers",
                ],
            )
        }))
        .step(CheckStep::new("allows all origins", |envelope| {
            check::expect_header(envelope, "access-control-allow-origin", "*")
        }))
}

/// Create an item, then fetch it back through the returned `location`
pub fn create_todo(collection_url: &str) -> Scenario {
    Scenario::new("create todo item")
        .step(create_step(collection_url))
        .step(CheckStep::new("returns 201 Created", |envelope| {
            check::expect_status(envelope, 201)
        }))
        .step(CheckStep::new("returns a location hyperlink", |envelope| {
            check::expect_header_matches(envelope, "location", LOCATION_PATTERN)
        }))
        .step(RequestStep::new("fetch created item", |cx| {
            Ok(RequestDescriptor::builder(Method::Get, cx.location()?).build())
        }))
        .step(CheckStep::new("item has the posted title", |envelope| {
            check::expect_status(envelope, 200)?;
            check::expect_body_field(envelope, "/title", &serde_json::json!(DEFAULT_TITLE))
        }))
}

/// Create an item, then mark it completed with `PUT` or `PATCH`
pub fn update_todo(collection_url: &str, method: Method) -> Scenario {
    Scenario::new(format!("update todo item via {}", method))
        .step(create_step(collection_url))
        .step(RequestStep::new("mark completed", move |cx| {
            Ok(RequestDescriptor::builder(method, cx.location()?)
                .json(serde_json::json!({ "completed": true }))
                .build())
        }))
        .step(CheckStep::new("update succeeds", |envelope| {
            check::expect_status(envelope, 200)
        }))
        .step(CheckStep::new("completed is true", |envelope| {
            check::expect_body_field(envelope, "/completed", &serde_json::json!(true))
        }))
}

/// Create an item, then delete it
pub fn delete_todo(collection_url: &str) -> Scenario {
    Scenario::new("delete todo item")
        .step(create_step(collection_url))
        .step(RequestStep::new("delete item", |cx| {
            Ok(RequestDescriptor::builder(Method::Delete, cx.location()?).build())
        }))
        .step(CheckStep::new("returns 204 No Content", |envelope| {
            check::expect_status(envelope, 204)?;
            check::expect_empty_body(envelope)
        }))
}

/// Create, delete, then verify the item is gone
pub fn delete_verify_gone(collection_url: &str) -> Scenario {
    Scenario::new("deleted todo item is gone")
        .step(create_step(collection_url))
        .step(RequestStep::new("delete item", |cx| {
            Ok(RequestDescriptor::builder(Method::Delete, cx.location()?).build())
        }))
        .step(RequestStep::new("fetch deleted item", |cx| {
            Ok(RequestDescriptor::builder(Method::Get, cx.location()?).build())
        }))
        .step(CheckStep::new("item is not found", |envelope| {
            check::expect_status(envelope, 404)
        }))
}

/// Every scenario in the suite, in source order
pub fn suite(collection_url: &str) -> Vec<Scenario> {
    vec![
        cors_preflight(collection_url),
        create_todo(collection_url),
        update_todo(collection_url, Method::Put),
        update_todo(collection_url, Method::Patch),
        delete_todo(collection_url),
        delete_verify_gone(collection_url),
    ]
}
