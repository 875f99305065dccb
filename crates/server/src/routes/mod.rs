use std::path::Path;

use axum::{
    routing::{get, post},
    Router,
};
use shared::{
    api::{error::ServerError, response_errors::UserLookupError, Object},
    types::Uuid,
};
use tower_http::{
    cors::CorsLayer,
    services::ServeDir,
    trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

use crate::AppState;

mod landing;
pub use landing::*;

mod users;
pub use users::*;

mod exercises;
pub use exercises::*;

mod logs;
pub use logs::*;

/// Where the contents of the assets dir are served from
pub const PUBLIC_PATH: &str = "/public";

pub fn router(state: AppState, assets_dir: &Path) -> Router {
    Router::new()
        .route("/", get(landing_page))
        .route(Object::Users.path(), get(list_users).post(create_user))
        .route(Object::UserExercises.path(), post(create_exercise))
        .route(Object::UserLogs.path(), get(fetch_log))
        .nest_service(PUBLIC_PATH, ServeDir::new(assets_dir))
        .layer(CorsLayer::permissive())
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .with_state(state)
}

/// Resolves the `:id` path segment. An id that doesn't parse can't belong to
/// any user
fn parse_user_id(id: &str) -> Result<Uuid, ServerError<UserLookupError>> {
    Uuid::parse(id).map_err(|_| UserLookupError::NotFound.into())
}
