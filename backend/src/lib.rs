//! Dealership inventory API library.
//!
//! Hexagonal layout: `domain` holds the model, services and ports;
//! `inbound::http` adapts Actix requests onto the driving ports; `outbound`
//! implements the driven ports with Diesel, Argon2 and JWT.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use domain::TraceId;
pub use middleware::Trace;
