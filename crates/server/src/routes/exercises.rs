use axum::{extract::Path, Json};
use chrono::Utc;
use deadpool_sqlite::Object;
use shared::{
    api::{
        error::{ServerError, ServerErrorContext, ValidationError},
        payloads::{ExerciseResponse, NewExercisePayload},
        response_errors::UserLookupError,
    },
    types::display_date,
};
use tracing::{info, instrument};

use super::parse_user_id;
use crate::{
    db::{
        model::{Exercise, User},
        DatabaseConnection,
    },
    Payload,
};

#[instrument(skip(conn))]
pub async fn create_exercise(
    DatabaseConnection(conn): DatabaseConnection,
    Path(id): Path<String>,
    payload: Result<Payload<NewExercisePayload>, ValidationError>,
) -> Result<Json<ExerciseResponse>, ServerError<UserLookupError>> {
    create(conn, &id, payload)
        .await
        .context("Failed to log the exercise")
}

async fn create(
    conn: Object,
    id: &str,
    payload: Result<Payload<NewExercisePayload>, ValidationError>,
) -> Result<Json<ExerciseResponse>, ServerError<UserLookupError>> {
    let user_id = parse_user_id(id)?;

    let response = conn
        .interact(move |conn| {
            // An unknown user takes precedence over a bad body
            let user = User::fetch_by_id(conn, &user_id)?.ok_or(UserLookupError::NotFound)?;
            let Payload(payload) = payload?;
            let entry = payload.into_entry(Utc::now().date_naive())?;
            let exercise = Exercise::create(conn, user.id, entry)?;
            info!(exercise_id = %exercise.id, user_id = %user.id, "Logged exercise");

            Ok::<_, ServerError<UserLookupError>>(ExerciseResponse {
                username: user.username,
                description: exercise.description,
                duration: exercise.duration,
                id: user.id,
                date: display_date(exercise.date),
            })
        })
        .await??;

    Ok(Json(response))
}
