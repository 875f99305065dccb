use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_with::{serde_as, DisplayFromStr, PickFirst};

use crate::{
    api::error::ValidationError,
    types::{parse_date, Uuid},
};

/// Body of a request to log an exercise.
///
/// Fields are optional so that missing values are reported by [into_entry],
/// after the route has resolved the user. `duration` may arrive as a number or
/// a numeric string (form posts only carry strings).
///
/// [into_entry]: NewExercisePayload::into_entry
#[serde_as]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NewExercisePayload {
    #[serde(default)]
    pub description: Option<String>,
    #[serde_as(as = "Option<PickFirst<(_, DisplayFromStr)>>")]
    pub duration: Option<i64>,
    #[serde(default)]
    pub date: Option<String>,
}

/// A validated exercise ready to be stored
#[derive(Debug, Clone, PartialEq)]
pub struct ExerciseEntry {
    pub description: String,
    pub duration: i64,
    pub date: NaiveDate,
}

impl NewExercisePayload {
    /// Validates the payload. A missing or blank `date` falls back to `today`
    pub fn into_entry(self, today: NaiveDate) -> Result<ExerciseEntry, ValidationError> {
        let description = self.description.filter(|v| !v.trim().is_empty());
        let date = match self.date.as_deref().map(str::trim) {
            None | Some("") => Ok(today),
            Some(value) => parse_date(value),
        };

        match (description, self.duration, date) {
            (Some(description), Some(duration), Ok(date)) => Ok(ExerciseEntry {
                description,
                duration,
                date,
            }),
            (description, duration, date) => {
                let mut error_messages = Vec::new();
                if description.is_none() {
                    error_messages.push("description is required".to_owned());
                }
                if duration.is_none() {
                    error_messages.push("duration is required".to_owned());
                }
                if let Err(e) = date {
                    error_messages.push(e.to_string());
                }
                Err(ValidationError { error_messages })
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExerciseResponse {
    pub username: String,
    pub description: String,
    pub duration: i64,
    /// Id of the user the exercise belongs to
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub date: String,
}
