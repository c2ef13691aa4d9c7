//! Live-server harness shared by the HTTP behaviour suites.
//!
//! The world owns a single-threaded Tokio runtime plus a `LocalSet` because
//! Actix uses `spawn_local` internally. Every port is backed by the in-memory
//! fixtures and the real Argon2 and JWT adapters, so scenarios exercise the
//! same wiring the binary uses without a database. Dropping the fixture stops
//! the server even if a step panics.

use std::cell::RefCell;
use std::net::TcpListener;
use std::rc::Rc;
use std::sync::Arc;

use actix_web::dev::ServerHandle;
use actix_web::http::Method;
use actix_web::http::header;
use actix_web::{App, HttpServer, web};
use awc::Client;
use concessionnaire_api::Trace;
use concessionnaire_api::domain::TRACE_ID_HEADER;
use concessionnaire_api::domain::ports::{FixtureAccountRepository, FixtureDealershipRepository};
use concessionnaire_api::domain::{AccountService, DealershipQueryService};
use concessionnaire_api::inbound::http::configure_api;
use concessionnaire_api::inbound::http::state::{HttpState, HttpStatePorts};
use concessionnaire_api::outbound::security::{
    Argon2PasswordHasher, JwtSettings, JwtTokenService,
};
use rstest::fixture;
use serde_json::Value;
use tokio::runtime::Runtime;
use tokio::task::LocalSet;

const TEST_SECRET: &[u8] = b"behaviour-suite-signing-secret";

/// Password used for every account registered by the suites.
pub(crate) const PASSWORD: &str = "motdepasse123";

pub(crate) struct HttpWorld {
    pub(crate) runtime: Runtime,
    pub(crate) local: LocalSet,
    pub(crate) base_url: String,
    pub(crate) server: ServerHandle,
    pub(crate) access_token: Option<String>,
    pub(crate) refresh_token: Option<String>,
    pub(crate) last_status: Option<u16>,
    pub(crate) last_trace_id: Option<String>,
    pub(crate) last_body: Option<Value>,
}

pub(crate) type SharedWorld = Rc<RefCell<HttpWorld>>;

pub(crate) struct WorldFixture {
    world: SharedWorld,
}

impl WorldFixture {
    pub(crate) fn world(&self) -> SharedWorld {
        self.world.clone()
    }
}

impl Drop for WorldFixture {
    fn drop(&mut self) {
        let ctx = self.world.borrow();
        let server = ctx.server.clone();
        ctx.local.block_on(&ctx.runtime, async move {
            server.stop(true).await;
        });
    }
}

fn http_state() -> HttpState {
    let accounts = Arc::new(AccountService::new(
        Arc::new(FixtureAccountRepository::default()),
        Arc::new(Argon2PasswordHasher::new()),
    ));
    HttpState::new(HttpStatePorts {
        dealerships: Arc::new(DealershipQueryService::new(Arc::new(
            FixtureDealershipRepository::seeded(),
        ))),
        registration: accounts.clone(),
        login: accounts,
        tokens: Arc::new(JwtTokenService::new(&JwtSettings::new(
            TEST_SECRET,
            300,
            86_400,
        ))),
    })
}

async fn spawn_server(state: HttpState) -> Result<(String, ServerHandle), String> {
    let listener = TcpListener::bind("127.0.0.1:0").map_err(|err| err.to_string())?;
    let addr = listener.local_addr().map_err(|err| err.to_string())?;
    let data = web::Data::new(state);

    let server = HttpServer::new(move || {
        App::new()
            .app_data(data.clone())
            .wrap(Trace)
            .configure(configure_api)
    })
    .disable_signals()
    .workers(1)
    .listen(listener)
    .map_err(|err| err.to_string())?
    .run();

    let handle = server.handle();
    actix_web::rt::spawn(server);

    Ok((format!("http://{addr}"), handle))
}

#[fixture]
pub(crate) fn world() -> WorldFixture {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .expect("tokio runtime");
    let local = LocalSet::new();

    let (base_url, server) = local
        .block_on(&runtime, spawn_server(http_state()))
        .expect("server should start");

    WorldFixture {
        world: Rc::new(RefCell::new(HttpWorld {
            runtime,
            local,
            base_url,
            server,
            access_token: None,
            refresh_token: None,
            last_status: None,
            last_trace_id: None,
            last_body: None,
        })),
    }
}

/// A request issued against the running server.
pub(crate) struct RequestSpec<'a> {
    pub(crate) method: Method,
    pub(crate) path: &'a str,
    pub(crate) payload: Option<Value>,
    pub(crate) bearer: Option<String>,
}

impl<'a> RequestSpec<'a> {
    pub(crate) fn get(path: &'a str) -> Self {
        Self {
            method: Method::GET,
            path,
            payload: None,
            bearer: None,
        }
    }

    pub(crate) fn post(path: &'a str, payload: Value) -> Self {
        Self {
            method: Method::POST,
            path,
            payload: Some(payload),
            bearer: None,
        }
    }

    pub(crate) fn with_bearer(mut self, token: Option<String>) -> Self {
        self.bearer = token;
        self
    }
}

/// Send `spec` and record status, trace id and JSON body in the world.
pub(crate) fn perform(world: &SharedWorld, spec: RequestSpec<'_>) {
    let RequestSpec {
        method,
        path,
        payload,
        bearer,
    } = spec;
    let (status, trace_id, body) = {
        let ctx = world.borrow();
        let url = format!("{}{path}", ctx.base_url);
        ctx.local.block_on(&ctx.runtime, async move {
            let mut request = Client::default().request(method, url);
            if let Some(token) = bearer {
                request = request.insert_header((header::AUTHORIZATION, format!("Bearer {token}")));
            }
            let mut response = match payload {
                Some(payload) => request.send_json(&payload).await.expect("request"),
                None => request.send().await.expect("request"),
            };
            let status = response.status().as_u16();
            let trace_id = response
                .headers()
                .get(TRACE_ID_HEADER)
                .and_then(|value| value.to_str().ok())
                .map(ToOwned::to_owned);
            let bytes = response.body().await.expect("response body");
            let body = if bytes.is_empty() {
                Value::Null
            } else {
                serde_json::from_slice(&bytes).expect("json body")
            };
            (status, trace_id, body)
        })
    };

    let mut ctx = world.borrow_mut();
    ctx.last_status = Some(status);
    ctx.last_trace_id = trace_id;
    ctx.last_body = Some(body);
}

/// Register `username` with the shared password.
pub(crate) fn register(world: &SharedWorld, username: &str) {
    perform(
        world,
        RequestSpec::post(
            "/api/users/",
            serde_json::json!({
                "username": username,
                "email": format!("{username}@example.com"),
                "password": PASSWORD,
            }),
        ),
    );
}

/// Request a token pair and keep it in the world when issued.
pub(crate) fn obtain_tokens(world: &SharedWorld, username: &str, password: &str) {
    perform(
        world,
        RequestSpec::post(
            "/api/token/",
            serde_json::json!({ "username": username, "password": password }),
        ),
    );
    let mut ctx = world.borrow_mut();
    if ctx.last_status == Some(200) {
        let body = ctx.last_body.clone().unwrap_or(Value::Null);
        ctx.access_token = body["access"].as_str().map(ToOwned::to_owned);
        ctx.refresh_token = body["refresh"].as_str().map(ToOwned::to_owned);
    }
}

/// Status and body of the last response.
pub(crate) fn last_response(world: &SharedWorld) -> (u16, Value) {
    let ctx = world.borrow();
    (
        ctx.last_status.expect("a request was sent"),
        ctx.last_body.clone().expect("a response was recorded"),
    )
}

/// Assert the last response is a 401 whose body echoes the trace header.
pub(crate) fn assert_unauthorised_with_trace_id(world: &SharedWorld) {
    let ctx = world.borrow();
    assert_eq!(ctx.last_status, Some(401));
    let trace_id = ctx.last_trace_id.as_deref().expect("trace id header");
    let body = ctx.last_body.as_ref().expect("error body");
    assert_eq!(body["code"], "unauthorized");
    assert_eq!(body.get("traceId").and_then(Value::as_str), Some(trace_id));
}
