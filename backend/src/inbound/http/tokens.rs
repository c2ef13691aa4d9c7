//! Bearer credential issuance.
//!
//! ```text
//! POST /api/token/          {"username":"john_doe","password":"motdepasse123"}
//! POST /api/refresh_token/  {"refresh":"<jwt>"}
//! ```

use actix_web::{post, web};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::debug;

use crate::domain::ports::TokenError;
use crate::domain::{Error, LoginCredentials, LoginValidationError};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;

/// Credentials exchanged for a token pair.
#[derive(Debug, Default, Deserialize, Serialize, utoipa::ToSchema)]
pub struct TokenRequest {
    #[schema(example = "john_doe")]
    pub username: Option<String>,
    #[schema(example = "motdepasse123")]
    pub password: Option<String>,
}

impl TryFrom<&TokenRequest> for LoginCredentials {
    type Error = LoginValidationError;

    fn try_from(value: &TokenRequest) -> Result<Self, Self::Error> {
        Self::try_from_parts(
            value.username.as_deref().unwrap_or_default(),
            value.password.as_deref().unwrap_or_default(),
        )
    }
}

/// Access and refresh tokens.
#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
pub struct TokenPairResponse {
    pub access: String,
    pub refresh: String,
}

/// Refresh token exchanged for a new access token.
#[derive(Debug, Default, Deserialize, Serialize, utoipa::ToSchema)]
pub struct RefreshRequest {
    pub refresh: Option<String>,
}

/// Freshly issued access token.
#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
pub struct AccessTokenResponse {
    pub access: String,
}

fn map_login_validation_error(err: LoginValidationError) -> Error {
    match err {
        LoginValidationError::EmptyUsername => Error::invalid_request("username is required")
            .with_details(json!({ "field": "username", "code": "empty_username" })),
        LoginValidationError::EmptyPassword => Error::invalid_request("password is required")
            .with_details(json!({ "field": "password", "code": "empty_password" })),
    }
}

fn map_token_error(err: TokenError) -> Error {
    match err {
        TokenError::Signing { message } => {
            Error::internal(format!("token signing failed: {message}"))
        }
        other => {
            debug!(error = %other, "refresh token rejected");
            Error::unauthorized("token is invalid or expired")
        }
    }
}

/// Exchange a username and password for an access/refresh pair.
#[utoipa::path(
    post,
    path = "/api/token/",
    request_body = TokenRequest,
    responses(
        (status = 200, description = "Token pair", body = TokenPairResponse),
        (status = 400, description = "Missing credentials", body = ErrorSchema),
        (status = 401, description = "Invalid credentials", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["tokens"],
    operation_id = "obtainTokenPair",
    security([])
)]
#[post("/token/")]
pub async fn obtain_token_pair(
    state: web::Data<HttpState>,
    payload: web::Json<TokenRequest>,
) -> ApiResult<web::Json<TokenPairResponse>> {
    let credentials =
        LoginCredentials::try_from(&payload.into_inner()).map_err(map_login_validation_error)?;
    let account = state.login.authenticate(&credentials).await?;
    let pair = state.tokens.issue(&account).map_err(map_token_error)?;
    Ok(web::Json(TokenPairResponse {
        access: pair.access,
        refresh: pair.refresh,
    }))
}

/// Exchange a refresh token for a new access token.
#[utoipa::path(
    post,
    path = "/api/refresh_token/",
    request_body = RefreshRequest,
    responses(
        (status = 200, description = "New access token", body = AccessTokenResponse),
        (status = 400, description = "Missing refresh token", body = ErrorSchema),
        (status = 401, description = "Invalid or expired refresh token", body = ErrorSchema)
    ),
    tags = ["tokens"],
    operation_id = "refreshAccessToken",
    security([])
)]
#[post("/refresh_token/")]
pub async fn refresh_access_token(
    state: web::Data<HttpState>,
    payload: web::Json<RefreshRequest>,
) -> ApiResult<web::Json<AccessTokenResponse>> {
    let Some(refresh) = payload.into_inner().refresh.filter(|t| !t.trim().is_empty()) else {
        return Err(Error::invalid_request("refresh is required")
            .with_details(json!({ "field": "refresh", "code": "missing_refresh" })));
    };
    let access = state.tokens.refresh(&refresh).map_err(map_token_error)?;
    Ok(web::Json(AccessTokenResponse { access }))
}
