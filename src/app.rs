use std::any::Any;
use std::sync::Arc;

use axum::{
    extract::DefaultBodyLimit,
    http::HeaderValue,
    response::{IntoResponse, Response},
    routing::{delete, get, post, put},
    Router,
};
use tower_http::{
    catch_panic::CatchPanicLayer,
    cors::{Any as CorsAny, CorsLayer},
    trace::TraceLayer,
};

use crate::config::{AppConfig, SecurityConfig};
use crate::database::{EmployeeStore, StoreError};
use crate::error::ApiError;
use crate::handlers;

/// Shared per-process state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn EmployeeStore>,
    pub expose_error_details: bool,
}

impl AppState {
    pub fn new(store: Arc<dyn EmployeeStore>, expose_error_details: bool) -> Self {
        Self {
            store,
            expose_error_details,
        }
    }

    pub fn store_error(&self, message: &'static str, err: StoreError) -> ApiError {
        ApiError::store(message, err, self.expose_error_details)
    }
}

pub fn app(state: AppState, config: &AppConfig) -> Router {
    let router = Router::new()
        .route("/", get(handlers::root))
        .route("/health", get(handlers::health))
        .merge(employee_routes())
        .fallback(handlers::not_found)
        .with_state(state)
        .layer(DefaultBodyLimit::max(config.api.max_request_size_bytes))
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(TraceLayer::new_for_http());

    match cors_layer(&config.security) {
        Some(cors) => router.layer(cors),
        None => router,
    }
}

fn employee_routes() -> Router<AppState> {
    Router::new()
        .route("/create", post(handlers::create_employee))
        .route("/employees", get(handlers::list_employees))
        .route("/update", put(handlers::update_employee))
        .route("/delete/:id", delete(handlers::delete_employee))
}

fn cors_layer(security: &SecurityConfig) -> Option<CorsLayer> {
    if !security.enable_cors {
        return None;
    }
    if security.cors_origins.is_empty() {
        return Some(CorsLayer::permissive());
    }

    let origins: Vec<HeaderValue> = security
        .cors_origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS origin: {}", origin);
                None
            }
        })
        .collect();

    Some(
        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods(CorsAny)
            .allow_headers(CorsAny),
    )
}

/// Last-resort boundary: a panicking handler yields a generic 500 and the
/// panic payload only reaches the log.
fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.as_str()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s
    } else {
        "unknown panic"
    };
    tracing::error!("Handler panicked: {}", detail);
    ApiError::Internal.into_response()
}
