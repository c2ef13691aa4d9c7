//! Domain primitives, services and ports.
//!
//! Purpose: define the dealership inventory and account model independently
//! of HTTP and storage. Domain records carry no serde implementations;
//! inbound adapters project them into explicit response shapes.
//!
//! Public surface:
//! - Error / ErrorCode: transport-agnostic failure payload.
//! - Dealership, Vehicle, Account and their validated value types.
//! - DealershipQueryService and AccountService: driving-port implementations.
//! - ports: driven and driving port traits plus in-memory fixtures.

pub mod account;
pub mod account_service;
pub mod admin_table;
pub mod auth;
pub mod dealership;
pub mod dealership_service;
pub mod error;
pub mod ports;
pub mod trace_id;
pub mod vehicle;

pub use self::account::{
    Account, AccountId, AccountValidationError, Email, NewAccount, PasswordHash, Username,
};
pub use self::account_service::{
    AccountService, DUPLICATE_USERNAME_MESSAGE, INVALID_CREDENTIALS_MESSAGE,
};
pub use self::admin_table::{AdminRecord, AdminTable};
pub use self::auth::{
    LoginCredentials, LoginValidationError, Registration, RegistrationValidationError,
};
pub use self::dealership::{
    Dealership, DealershipId, DealershipName, DealershipValidationError, RegistrationNumber,
};
pub use self::dealership_service::DealershipQueryService;
pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
pub use self::vehicle::{
    DealershipVehicle, Vehicle, VehicleCategory, VehicleDraft, VehicleId, VehicleValidationError,
    sort_vehicles,
};

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use actix_web::HttpResponse;
/// use concessionnaire_api::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<HttpResponse> {
///     Err(Error::not_found("dealership not found"))
/// }
/// ```
pub type ApiResult<T> = Result<T, Error>;
