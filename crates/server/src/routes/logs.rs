use axum::{
    extract::{Path, Query},
    Json,
};
use deadpool_sqlite::Object;
use shared::api::{
    error::{ServerError, ServerErrorContext},
    payloads::{LogEntry, LogQuery, LogResponse},
    response_errors::UserLookupError,
};
use tracing::instrument;

use super::parse_user_id;
use crate::db::{
    model::{Exercise, User},
    DatabaseConnection,
};

#[instrument(skip(conn))]
pub async fn fetch_log(
    DatabaseConnection(conn): DatabaseConnection,
    Path(id): Path<String>,
    Query(query): Query<LogQuery>,
) -> Result<Json<LogResponse>, ServerError<UserLookupError>> {
    fetch(conn, &id, query)
        .await
        .context("Failed to fetch the exercise log")
}

async fn fetch(
    conn: Object,
    id: &str,
    query: LogQuery,
) -> Result<Json<LogResponse>, ServerError<UserLookupError>> {
    let user_id = parse_user_id(id)?;

    let response = conn
        .interact(move |conn| {
            let user = User::fetch_by_id(conn, &user_id)?.ok_or(UserLookupError::NotFound)?;
            let filter = query.into_filter()?;
            let log: Vec<LogEntry> = Exercise::fetch_log(conn, &user.id, &filter)?
                .into_iter()
                .map(LogEntry::from)
                .collect();

            Ok::<_, ServerError<UserLookupError>>(LogResponse {
                username: user.username,
                id: user.id,
                count: log.len(),
                log,
            })
        })
        .await??;

    Ok(Json(response))
}
