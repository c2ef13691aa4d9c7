//! HTTP inbound adapter exposing the REST endpoints.
//!
//! Every route lives under `/api` with a trailing slash:
//!
//! ```text
//! POST /api/users/                                   public
//! POST /api/token/                                   public
//! POST /api/refresh_token/                           public
//! GET  /api/concessionnaires/                        bearer
//! GET  /api/concessionnaires/{id}/                   bearer
//! GET  /api/concessionnaires/{id}/vehicules/         bearer
//! GET  /api/concessionnaires/{id}/vehicules/{vid}/   bearer
//! ```

use actix_web::web;

pub mod auth;
pub mod dealerships;
pub mod error;
pub mod health;
pub mod projection;
pub mod schemas;
pub mod state;
#[cfg(test)]
pub mod test_utils;
pub mod tokens;
pub mod users;

pub use error::{ApiResult, json_error_handler, path_error_handler};

/// Register the `/api` scope on an application or test service.
///
/// The caller supplies `web::Data<HttpState>`.
///
/// # Examples
/// ```no_run
/// use actix_web::App;
/// use concessionnaire_api::inbound::http::configure_api;
///
/// let app = App::new().configure(configure_api);
/// ```
pub fn configure_api(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .app_data(web::JsonConfig::default().error_handler(json_error_handler))
            .app_data(web::PathConfig::default().error_handler(path_error_handler))
            .service(users::create_user)
            .service(tokens::obtain_token_pair)
            .service(tokens::refresh_access_token)
            .service(dealerships::list_dealerships)
            .service(dealerships::get_dealership)
            .service(dealerships::list_vehicles)
            .service(dealerships::get_vehicle)
            .service(crate::doc::openapi_schema),
    );
}
