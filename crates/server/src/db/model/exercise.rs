use chrono::{DateTime, NaiveDate, Utc};
use exemplar::Model;
use rusqlite::{Connection, OptionalExtension};
use sea_query::{enum_def, Alias, Expr, Order, Query, SelectStatement, SqliteQueryBuilder};
use sea_query_rusqlite::RusqliteBinder;
use shared::{
    api::payloads::{ExerciseEntry, LogEntry, LogFilter},
    types::{display_date, Uuid},
};

#[derive(Debug, Clone, PartialEq, Model)]
#[table("exercise")]
#[enum_def]
pub struct Exercise {
    pub id: Uuid,
    pub user_id: Uuid,
    pub description: String,
    pub duration: i64,
    pub date: NaiveDate,
    pub creation_date: DateTime<Utc>,
}

impl From<Exercise> for LogEntry {
    fn from(exercise: Exercise) -> Self {
        Self {
            description: exercise.description,
            duration: exercise.duration,
            date: display_date(exercise.date),
        }
    }
}

impl Exercise {
    fn select_star() -> SelectStatement {
        Query::select()
            .columns([
                ExerciseIden::Id,
                ExerciseIden::UserId,
                ExerciseIden::Description,
                ExerciseIden::Duration,
                ExerciseIden::Date,
                ExerciseIden::CreationDate,
            ])
            .from(ExerciseIden::Table)
            .to_owned()
    }

    pub fn fetch_by_id(conn: &Connection, id: &Uuid) -> Result<Option<Exercise>, rusqlite::Error> {
        let (sql, values) = Self::select_star()
            .and_where(Expr::col(ExerciseIden::Id).eq(id))
            .limit(1)
            .build_rusqlite(SqliteQueryBuilder);

        let mut stmt = conn.prepare_cached(&sql)?;
        let res = stmt.query_row(&*values.as_params(), Exercise::from_row).optional()?;
        Ok(res)
    }

    pub fn create(
        conn: &mut Connection,
        user_id: Uuid,
        entry: ExerciseEntry,
    ) -> Result<Exercise, rusqlite::Error> {
        let ExerciseEntry {
            description,
            duration,
            date,
        } = entry;
        let new_exercise = Exercise {
            id: Uuid::new_v4(),
            user_id,
            description,
            duration,
            date,
            creation_date: Utc::now(),
        };

        let tx = conn.transaction()?;
        let exercise = {
            new_exercise.insert(&tx)?;
            Exercise::fetch_by_id(&tx, &new_exercise.id)?
                .ok_or(rusqlite::Error::QueryReturnedNoRows)?
        };
        tx.commit()?;

        Ok(exercise)
    }

    /// The user's exercises by ascending date, oldest logged first within a
    /// day. Bounds are inclusive and the limit applies after filtering
    pub fn fetch_log(
        conn: &Connection,
        user_id: &Uuid,
        filter: &LogFilter,
    ) -> Result<Vec<Exercise>, rusqlite::Error> {
        let mut query = Self::select_star();
        query.and_where(Expr::col(ExerciseIden::UserId).eq(user_id));

        if let Some(from) = filter.from {
            query.and_where(Expr::col(ExerciseIden::Date).gte(from));
        }
        if let Some(to) = filter.to {
            query.and_where(Expr::col(ExerciseIden::Date).lte(to));
        }

        query
            .order_by(ExerciseIden::Date, Order::Asc)
            .order_by(Alias::new("rowid"), Order::Asc);

        if let Some(limit) = filter.limit {
            query.limit(limit);
        }

        let (sql, values) = query.build_rusqlite(SqliteQueryBuilder);

        let mut stmt = conn.prepare_cached(&sql)?;
        let res = stmt
            .query_map(&*values.as_params(), Exercise::from_row)?
            .collect::<Result<_, _>>()?;
        Ok(res)
    }
}

#[cfg(test)]
mod test {
    use chrono::NaiveDate;

    use super::*;
    use crate::db::{model::User, test::memory_connection};

    fn date(value: &str) -> NaiveDate {
        NaiveDate::parse_from_str(value, "%Y-%m-%d").unwrap()
    }

    fn log(conn: &mut Connection, user_id: Uuid, description: &str, day: &str) -> Exercise {
        Exercise::create(
            conn,
            user_id,
            ExerciseEntry {
                description: description.to_owned(),
                duration: 10,
                date: date(day),
            },
        )
        .unwrap()
    }

    fn descriptions(exercises: &[Exercise]) -> Vec<&str> {
        exercises.iter().map(|e| e.description.as_str()).collect()
    }

    /// A user with five exercises logged out of date order
    fn seeded() -> (Connection, Uuid) {
        let mut conn = memory_connection();
        let user = User::create_or_fetch(&mut conn, "runner").unwrap();
        for (description, day) in [
            ("c", "2023-01-15"),
            ("a", "2022-12-31"),
            ("e", "2023-02-01"),
            ("b", "2023-01-01"),
            ("d", "2023-01-31"),
        ] {
            log(&mut conn, user.id, description, day);
        }
        (conn, user.id)
    }

    #[test]
    fn test_create_round_trips() {
        let mut conn = memory_connection();
        let user = User::create_or_fetch(&mut conn, "runner").unwrap();
        let exercise = log(&mut conn, user.id, "jog", "2023-03-04");

        assert_eq!(exercise.user_id, user.id);
        assert_eq!(exercise.date, date("2023-03-04"));
        assert_eq!(
            Exercise::fetch_by_id(&conn, &exercise.id).unwrap(),
            Some(exercise)
        );
    }

    #[test]
    fn test_unknown_user_is_rejected_by_store() {
        let mut conn = memory_connection();
        let res = Exercise::create(
            &mut conn,
            Uuid::new_v4(),
            ExerciseEntry {
                description: "ghost".into(),
                duration: 1,
                date: date("2023-01-01"),
            },
        );
        assert!(res.is_err());
    }

    #[test]
    fn test_log_is_ordered_by_date() {
        let (conn, user_id) = seeded();
        let all = Exercise::fetch_log(&conn, &user_id, &LogFilter::default()).unwrap();
        assert_eq!(descriptions(&all), ["a", "b", "c", "d", "e"]);
        assert!(all.windows(2).all(|w| w[0].date <= w[1].date));
    }

    #[test]
    fn test_same_day_keeps_logging_order() {
        let mut conn = memory_connection();
        let user = User::create_or_fetch(&mut conn, "runner").unwrap();
        for description in ["first", "second", "third"] {
            log(&mut conn, user.id, description, "2023-05-05");
        }
        let all = Exercise::fetch_log(&conn, &user.id, &LogFilter::default()).unwrap();
        assert_eq!(descriptions(&all), ["first", "second", "third"]);
    }

    #[test]
    fn test_log_range_is_inclusive() {
        let (conn, user_id) = seeded();
        let filter = LogFilter {
            from: Some(date("2023-01-01")),
            to: Some(date("2023-01-31")),
            limit: None,
        };
        let january = Exercise::fetch_log(&conn, &user_id, &filter).unwrap();
        assert_eq!(descriptions(&january), ["b", "c", "d"]);
    }

    #[test]
    fn test_log_open_ended_ranges() {
        let (conn, user_id) = seeded();
        let from = LogFilter {
            from: Some(date("2023-01-31")),
            ..Default::default()
        };
        let to = LogFilter {
            to: Some(date("2022-12-31")),
            ..Default::default()
        };
        assert_eq!(
            descriptions(&Exercise::fetch_log(&conn, &user_id, &from).unwrap()),
            ["d", "e"]
        );
        assert_eq!(
            descriptions(&Exercise::fetch_log(&conn, &user_id, &to).unwrap()),
            ["a"]
        );
    }

    #[test]
    fn test_log_limit_takes_earliest() {
        let (conn, user_id) = seeded();
        let filter = LogFilter {
            limit: Some(2),
            ..Default::default()
        };
        let first_two = Exercise::fetch_log(&conn, &user_id, &filter).unwrap();
        assert_eq!(descriptions(&first_two), ["a", "b"]);

        let none = LogFilter {
            limit: Some(0),
            ..Default::default()
        };
        assert!(Exercise::fetch_log(&conn, &user_id, &none).unwrap().is_empty());
    }

    #[test]
    fn test_log_only_contains_own_exercises() {
        let (mut conn, user_id) = seeded();
        let other = User::create_or_fetch(&mut conn, "walker").unwrap();
        log(&mut conn, other.id, "walk", "2023-01-10");

        let mine = Exercise::fetch_log(&conn, &user_id, &LogFilter::default()).unwrap();
        assert_eq!(mine.len(), 5);
        let theirs = Exercise::fetch_log(&conn, &other.id, &LogFilter::default()).unwrap();
        assert_eq!(descriptions(&theirs), ["walk"]);
    }

    #[test]
    fn test_log_entry_formats_date() {
        let (conn, user_id) = seeded();
        let first = Exercise::fetch_log(&conn, &user_id, &LogFilter::default())
            .unwrap()
            .remove(0);
        let entry = LogEntry::from(first);
        assert_eq!(entry.description, "a");
        assert_eq!(entry.duration, 10);
        assert_eq!(entry.date, "Sat Dec 31 2022");
    }
}
