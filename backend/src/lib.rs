//! Habit tracker backend library.
//!
//! Layout follows ports and adapters: [`domain`] owns entities, services and
//! port traits; [`inbound`] exposes them over HTTP; [`outbound`] persists them
//! in PostgreSQL or in memory.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
pub mod settings;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use domain::TraceId;
pub use middleware::Trace;
