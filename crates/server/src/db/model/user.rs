use chrono::{DateTime, Utc};
use exemplar::Model;
use rusqlite::{Connection, OptionalExtension, TransactionBehavior};
use sea_query::{enum_def, Alias, Expr, Order, Query, SelectStatement, SqliteQueryBuilder};
use sea_query_rusqlite::RusqliteBinder;
use shared::{api::payloads::UserResponse, types::Uuid};
use tracing::{debug, info};

#[derive(Debug, Clone, PartialEq, Model)]
#[table("user")]
#[enum_def]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub creation_date: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Model)]
#[table("user")]
pub struct NewUser {
    pub id: Uuid,
    pub username: String,
    pub creation_date: DateTime<Utc>,
}

impl NewUser {
    pub fn new<T: Into<String>>(username: T) -> Self {
        Self {
            id: Uuid::new_v4(),
            username: username.into(),
            creation_date: Utc::now(),
        }
    }
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            username: user.username,
            id: user.id,
        }
    }
}

impl User {
    fn select_star() -> SelectStatement {
        Query::select()
            .columns([UserIden::Id, UserIden::Username, UserIden::CreationDate])
            .from(UserIden::Table)
            .to_owned()
    }

    pub fn fetch_by_id(conn: &Connection, id: &Uuid) -> Result<Option<User>, rusqlite::Error> {
        let (sql, values) = Self::select_star()
            .and_where(Expr::col(UserIden::Id).eq(id))
            .limit(1)
            .build_rusqlite(SqliteQueryBuilder);

        let mut stmt = conn.prepare_cached(&sql)?;
        let user = stmt.query_row(&*values.as_params(), User::from_row).optional()?;
        Ok(user)
    }

    pub fn fetch_by_username<T: AsRef<str>>(
        conn: &Connection,
        username: T,
    ) -> Result<Option<User>, rusqlite::Error> {
        let (sql, values) = Self::select_star()
            .and_where(Expr::col(UserIden::Username).eq(username.as_ref()))
            .limit(1)
            .build_rusqlite(SqliteQueryBuilder);

        let mut stmt = conn.prepare_cached(&sql)?;
        let user = stmt.query_row(&*values.as_params(), User::from_row).optional()?;
        Ok(user)
    }

    /// Every user in the order they registered
    pub fn fetch_all(conn: &Connection) -> Result<Vec<User>, rusqlite::Error> {
        let (sql, values) = Self::select_star()
            .order_by(Alias::new("rowid"), Order::Asc)
            .build_rusqlite(SqliteQueryBuilder);

        let mut stmt = conn.prepare_cached(&sql)?;
        let users = stmt
            .query_map(&*values.as_params(), User::from_row)?
            .collect::<Result<_, _>>()?;
        Ok(users)
    }

    /// Registers `username`, or returns the existing user if it's taken.
    pub fn create_or_fetch(conn: &mut Connection, username: &str) -> Result<User, rusqlite::Error> {
        // The write lock is taken before the lookup so no other registration
        // can land between the check and the insert
        let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;

        let user = match User::fetch_by_username(&tx, username)? {
            Some(existing) => {
                debug!(id = %existing.id, username, "Username already registered");
                existing
            },
            None => {
                let new_user = NewUser::new(username);
                new_user.insert(&tx)?;
                info!(id = %new_user.id, username, "Registered user");

                User::fetch_by_id(&tx, &new_user.id)?.ok_or(rusqlite::Error::QueryReturnedNoRows)?
            },
        };
        tx.commit()?;

        Ok(user)
    }
}
