//! Bearer authentication gate for protected handlers.
//!
//! Handlers opt in by taking an [`Authenticated`] argument. Extraction fails
//! with `401 unauthorized` before the handler body runs, so a rejected
//! request never reaches a port.

use actix_web::http::header::{AUTHORIZATION, HeaderMap};
use actix_web::{FromRequest, HttpRequest, dev::Payload, web};
use futures_util::future::{Ready, ready};
use tracing::debug;

use crate::domain::Error;
use crate::domain::ports::{AuthenticatedAccount, TokenError};

use super::state::HttpState;

const BEARER_PREFIX: &str = "Bearer ";

/// Identity of the caller proven by a valid access token.
#[derive(Debug, Clone)]
pub struct Authenticated(pub AuthenticatedAccount);

impl Authenticated {
    pub fn account(&self) -> &AuthenticatedAccount {
        &self.0
    }
}

fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(AUTHORIZATION)?.to_str().ok()?;
    let token = value.strip_prefix(BEARER_PREFIX)?.trim();
    (!token.is_empty()).then_some(token)
}

fn unauthorized(reason: &'static str) -> Error {
    Error::unauthorized(reason)
}

fn map_token_error(err: &TokenError) -> Error {
    debug!(error = %err, "bearer credential rejected");
    match err {
        TokenError::Expired => unauthorized("access token has expired"),
        _ => unauthorized("access token is invalid"),
    }
}

fn authenticate(req: &HttpRequest) -> Result<Authenticated, Error> {
    let state = req
        .app_data::<web::Data<HttpState>>()
        .ok_or_else(|| Error::internal("HTTP state is not configured"))?;
    let Some(token) = bearer_token(req.headers()) else {
        debug!(path = req.path(), "request without bearer credential");
        return Err(unauthorized("authentication credentials were not provided"));
    };
    state
        .tokens
        .verify_access(token)
        .map(Authenticated)
        .map_err(|err| map_token_error(&err))
}

impl FromRequest for Authenticated {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(authenticate(req))
    }
}
