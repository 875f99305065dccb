use axum::Json;
use deadpool_sqlite::Object;
use shared::api::{
    error::{Nothing, ServerError, ServerErrorContext, ValidateModel, ValidationError},
    payloads::{NewUserPayload, UserResponse},
};
use tracing::instrument;

use crate::{
    db::{model::User, DatabaseConnection},
    Payload,
};

#[instrument(skip(conn))]
pub async fn create_user(
    DatabaseConnection(conn): DatabaseConnection,
    payload: Result<Payload<NewUserPayload>, ValidationError>,
) -> Result<Json<UserResponse>, ServerError<Nothing>> {
    create(conn, payload)
        .await
        .context("Failed to create the user")
}

async fn create(
    conn: Object,
    payload: Result<Payload<NewUserPayload>, ValidationError>,
) -> Result<Json<UserResponse>, ServerError<Nothing>> {
    let Payload(new_user) = payload?;
    new_user.validate()?;

    let user = conn
        .interact(move |conn| User::create_or_fetch(conn, &new_user.username))
        .await??;

    Ok(Json(user.into()))
}

#[instrument(skip(conn))]
pub async fn list_users(
    DatabaseConnection(conn): DatabaseConnection,
) -> Result<Json<Vec<UserResponse>>, ServerError<Nothing>> {
    list(conn).await.context("Failed to list the users")
}

async fn list(conn: Object) -> Result<Json<Vec<UserResponse>>, ServerError<Nothing>> {
    let users = conn.interact(|conn| User::fetch_all(conn)).await??;

    Ok(Json(users.into_iter().map(UserResponse::from).collect()))
}
