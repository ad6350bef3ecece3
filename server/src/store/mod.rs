//! Relational store for users and events, backed by SQLite.
//!
//! Every method is a single statement; uniqueness of emails and the
//! `events.owner_id -> users.id` reference are enforced by the schema.

use std::str::FromStr;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};

use crate::models::{Event, NewEvent, User, UserSummary};

static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!();

#[derive(Clone)]
pub struct Store {
    pool: SqlitePool,
}

impl Store {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Opens (creating if missing) the database at `database_url`.
    pub async fn connect(database_url: &str, max_connections: u32) -> Result<Self, sqlx::Error> {
        let options = SqliteConnectOptions::from_str(database_url)?
            .create_if_missing(true)
            .foreign_keys(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .connect_with(options)
            .await?;

        Ok(Self::new(pool))
    }

    /// A private in-memory database. It lives on a single connection that is
    /// never recycled, so the data survives for as long as the store does.
    pub async fn in_memory() -> Result<Self, sqlx::Error> {
        let options = SqliteConnectOptions::from_str("sqlite::memory:")?.foreign_keys(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await?;

        Ok(Self::new(pool))
    }

    pub async fn migrate(&self) -> Result<(), sqlx::migrate::MigrateError> {
        MIGRATOR.run(&self.pool).await
    }

    pub async fn list_users(&self) -> Result<Vec<UserSummary>, sqlx::Error> {
        sqlx::query_as::<_, UserSummary>("SELECT id, email FROM users ORDER BY id")
            .fetch_all(&self.pool)
            .await
    }

    pub async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, sqlx::Error> {
        sqlx::query_as::<_, User>("SELECT id, email, password_hash FROM users WHERE email = ?")
            .bind(email)
            .fetch_optional(&self.pool)
            .await
    }

    /// Inserts a user and returns its id. A duplicate email surfaces as the
    /// driver's unique-violation error.
    pub async fn insert_user(&self, email: &str, password_hash: &str) -> Result<i64, sqlx::Error> {
        let result = sqlx::query("INSERT INTO users (email, password_hash) VALUES (?, ?)")
            .bind(email)
            .bind(password_hash)
            .execute(&self.pool)
            .await?;
        Ok(result.last_insert_rowid())
    }

    pub async fn list_events_by_owner(&self, owner_id: i64) -> Result<Vec<Event>, sqlx::Error> {
        sqlx::query_as::<_, Event>(
            r#"SELECT id, name, category, venue, address, start_date, end_date, kind, owner_id
            FROM events WHERE owner_id = ? ORDER BY id"#,
        )
        .bind(owner_id)
        .fetch_all(&self.pool)
        .await
    }

    pub async fn find_event(&self, id: i64) -> Result<Option<Event>, sqlx::Error> {
        sqlx::query_as::<_, Event>(
            r#"SELECT id, name, category, venue, address, start_date, end_date, kind, owner_id
            FROM events WHERE id = ?"#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
    }

    pub async fn insert_event(&self, event: NewEvent) -> Result<Event, sqlx::Error> {
        let result = sqlx::query(
            r#"INSERT INTO events
                (name, category, venue, address, start_date, end_date, kind, owner_id)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?)"#,
        )
        .bind(&event.name)
        .bind(event.category)
        .bind(&event.venue)
        .bind(&event.address)
        .bind(&event.start_date)
        .bind(&event.end_date)
        .bind(event.kind)
        .bind(event.owner_id)
        .execute(&self.pool)
        .await?;

        Ok(Event {
            id: result.last_insert_rowid(),
            name: event.name,
            category: event.category,
            venue: event.venue,
            address: event.address,
            start_date: event.start_date,
            end_date: event.end_date,
            kind: event.kind,
            owner_id: event.owner_id,
        })
    }

    /// Returns `false` when no event has the given id.
    pub async fn update_event_name(&self, id: i64, name: &str) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("UPDATE events SET name = ? WHERE id = ?")
            .bind(name)
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Returns `false` when no event has the given id.
    pub async fn delete_event(&self, id: i64) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM events WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Category, EventKind};

    async fn store() -> Store {
        let store = Store::in_memory().await.unwrap();
        store.migrate().await.unwrap();
        store
    }

    fn talk(owner_id: i64) -> NewEvent {
        NewEvent {
            name: "Talk".to_string(),
            category: Category::Conference,
            venue: "Hall".to_string(),
            address: "St 1".to_string(),
            start_date: "2024-01-01".to_string(),
            end_date: "2024-01-02".to_string(),
            kind: EventKind::InPerson,
            owner_id,
        }
    }

    #[tokio::test]
    async fn test_duplicate_email_is_unique_violation() {
        let store = store().await;
        store.insert_user("a@x.com", "hash").await.unwrap();

        let err = store.insert_user("a@x.com", "other").await.unwrap_err();
        let db_err = err.as_database_error().expect("database error");
        assert!(db_err.is_unique_violation());
        assert_eq!(store.list_users().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_event_requires_existing_owner() {
        let store = store().await;

        let err = store.insert_event(talk(42)).await.unwrap_err();
        let db_err = err.as_database_error().expect("database error");
        assert!(db_err.is_foreign_key_violation());
    }

    #[tokio::test]
    async fn test_events_are_filtered_by_owner() {
        let store = store().await;
        let alice = store.insert_user("alice@x.com", "h").await.unwrap();
        let bob = store.insert_user("bob@x.com", "h").await.unwrap();

        // Bob's event gets id 1, which must not leak into a lookup for owner 1.
        let bobs = store.insert_event(talk(bob)).await.unwrap();
        let alices = store.insert_event(talk(alice)).await.unwrap();

        let listed = store.list_events_by_owner(alice).await.unwrap();
        assert_eq!(listed, vec![alices]);

        let listed = store.list_events_by_owner(bob).await.unwrap();
        assert_eq!(listed, vec![bobs]);
    }

    #[tokio::test]
    async fn test_update_and_delete_report_missing_rows() {
        let store = store().await;
        let owner = store.insert_user("a@x.com", "h").await.unwrap();
        let event = store.insert_event(talk(owner)).await.unwrap();

        assert!(store.update_event_name(event.id, "Talk2").await.unwrap());
        assert_eq!(store.find_event(event.id).await.unwrap().unwrap().name, "Talk2");

        assert!(!store.update_event_name(999, "x").await.unwrap());
        assert!(store.delete_event(event.id).await.unwrap());
        assert!(!store.delete_event(event.id).await.unwrap());
        assert!(store.find_event(event.id).await.unwrap().is_none());
    }
}
