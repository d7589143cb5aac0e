//! Roster: a user directory with a directed follow graph.
//!
//! The crate is laid out hexagonally: [`domain`] holds the model, ports, and
//! services; [`inbound`] adapts HTTP requests onto the driving ports; and
//! [`outbound`] implements the driven ports with Diesel and reqwest.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use domain::TraceId;
pub use middleware::Trace;
