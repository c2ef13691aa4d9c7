//! Public account creation.
//!
//! ```text
//! POST /api/users/ {"username":"john_doe","email":"john@example.com","password":"motdepasse123"}
//! ```

use actix_web::{HttpResponse, post, web};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::domain::{Error, Registration, RegistrationValidationError};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;

/// Message returned with a freshly created account.
pub const USER_CREATED_MESSAGE: &str = "user created successfully";

/// Account creation body. Fields are optional so absent values reach
/// validation instead of failing deserialisation.
#[derive(Debug, Default, Deserialize, Serialize, utoipa::ToSchema)]
pub struct CreateUserRequest {
    #[schema(example = "john_doe")]
    pub username: Option<String>,
    #[schema(example = "john@example.com")]
    pub email: Option<String>,
    #[schema(example = "motdepasse123")]
    pub password: Option<String>,
}

impl TryFrom<&CreateUserRequest> for Registration {
    type Error = RegistrationValidationError;

    fn try_from(value: &CreateUserRequest) -> Result<Self, Self::Error> {
        Self::try_from_parts(
            value.username.as_deref(),
            value.email.as_deref(),
            value.password.as_deref(),
        )
    }
}

/// Body returned with `201 Created`.
#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
pub struct CreateUserResponse {
    #[schema(example = "user created successfully")]
    pub message: String,
    #[schema(example = "john_doe")]
    pub username: String,
    #[schema(example = "john@example.com")]
    pub email: String,
}

fn map_registration_error(err: RegistrationValidationError) -> Error {
    let message = err.to_string();
    match err {
        RegistrationValidationError::MissingFields(missing) => {
            Error::invalid_request(message).with_details(json!({ "missing": missing }))
        }
        RegistrationValidationError::Invalid(_) => Error::invalid_request(message),
    }
}

/// Create a login account. No credential is required.
#[utoipa::path(
    post,
    path = "/api/users/",
    request_body = CreateUserRequest,
    responses(
        (status = 201, description = "Account created", body = CreateUserResponse),
        (status = 400, description = "Missing fields, duplicate username or creation failure", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "createUser",
    security([])
)]
#[post("/users/")]
pub async fn create_user(
    state: web::Data<HttpState>,
    payload: web::Json<CreateUserRequest>,
) -> ApiResult<HttpResponse> {
    let registration =
        Registration::try_from(&payload.into_inner()).map_err(map_registration_error)?;
    let account = state.registration.register(registration).await?;
    Ok(HttpResponse::Created().json(CreateUserResponse {
        message: USER_CREATED_MESSAGE.to_owned(),
        username: account.username().to_string(),
        email: account.email().to_string(),
    }))
}
