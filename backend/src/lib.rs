//! Multi-user blog backend.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
pub mod server;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use middleware::{LoginGuard, Trace};
