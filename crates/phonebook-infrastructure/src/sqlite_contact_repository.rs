//! SQLite implementation of the contact repository.
//!
//! One `contacts` table; name uniqueness is enforced by the schema, and the
//! unique-violation driver error is what surfaces as a conflict to callers.

use async_trait::async_trait;
use phonebook_core::{Contact, ContactRepository, PhonebookError, Result};
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::{FromRow, SqlitePool};
use std::path::Path;
use tracing::debug;

#[derive(Debug, FromRow)]
struct ContactRow {
    name: String,
    phone_number: String,
}

impl From<ContactRow> for Contact {
    fn from(row: ContactRow) -> Self {
        Contact::new(row.name, row.phone_number)
    }
}

/// Contact repository backed by a SQLite database file.
pub struct SqliteContactRepository {
    pool: SqlitePool,
}

impl SqliteContactRepository {
    /// Opens (creating if necessary) the database at `path` and runs the
    /// idempotent schema migration.
    pub async fn new(path: &Path) -> Result<Self> {
        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| PhonebookError::data_access(format!("create {}: {e}", parent.display())))?;
        }

        let url = format!("sqlite:{}?mode=rwc", path.display());
        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect(&url)
            .await
            .map_err(storage_error)?;

        let repo = Self { pool };
        repo.run_migrations().await?;
        debug!(path = %path.display(), "opened contact database");
        Ok(repo)
    }

    async fn run_migrations(&self) -> Result<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS contacts (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                name TEXT NOT NULL UNIQUE,
                phone_number TEXT NOT NULL
            )
            "#,
        )
        .execute(&self.pool)
        .await
        .map_err(storage_error)?;

        Ok(())
    }
}

#[async_trait]
impl ContactRepository for SqliteContactRepository {
    async fn insert(&self, name: &str, phone: &str) -> Result<Contact> {
        let row = sqlx::query_as::<_, ContactRow>(
            r#"
            INSERT INTO contacts (name, phone_number)
            VALUES (?, ?)
            RETURNING name, phone_number
            "#,
        )
        .bind(name)
        .bind(phone)
        .fetch_one(&self.pool)
        .await
        .map_err(|err| insert_error(name, err))?;

        Ok(row.into())
    }

    async fn find_by_name_or_phone(&self, name: &str, phone: &str) -> Result<Option<Contact>> {
        let row = sqlx::query_as::<_, ContactRow>(
            "SELECT name, phone_number FROM contacts WHERE name = ? OR phone_number = ?",
        )
        .bind(name)
        .bind(phone)
        .fetch_optional(&self.pool)
        .await
        .map_err(storage_error)?;

        Ok(row.map(Contact::from))
    }

    async fn update_phone(&self, name: &str, phone: &str) -> Result<Contact> {
        let row = sqlx::query_as::<_, ContactRow>(
            r#"
            UPDATE contacts SET phone_number = ?
            WHERE name = ?
            RETURNING name, phone_number
            "#,
        )
        .bind(phone)
        .bind(name)
        .fetch_optional(&self.pool)
        .await
        .map_err(storage_error)?;

        row.map(Contact::from)
            .ok_or_else(|| PhonebookError::not_found("contact", name))
    }

    async fn delete_by_name_or_phone(&self, name: &str, phone: &str) -> Result<Contact> {
        let row = sqlx::query_as::<_, ContactRow>(
            r#"
            DELETE FROM contacts
            WHERE name = ? OR phone_number = ?
            RETURNING name, phone_number
            "#,
        )
        .bind(name)
        .bind(phone)
        .fetch_optional(&self.pool)
        .await
        .map_err(storage_error)?;

        row.map(Contact::from)
            .ok_or_else(|| PhonebookError::not_found("contact", target_key(name, phone)))
    }

    async fn list_all(&self) -> Result<Vec<Contact>> {
        let rows = sqlx::query_as::<_, ContactRow>(
            "SELECT name, phone_number FROM contacts ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(storage_error)?;

        Ok(rows.into_iter().map(Contact::from).collect())
    }
}

fn storage_error(err: sqlx::Error) -> PhonebookError {
    PhonebookError::data_access(err.to_string())
}

fn insert_error(name: &str, err: sqlx::Error) -> PhonebookError {
    if let sqlx::Error::Database(db_err) = &err {
        if db_err.is_unique_violation() {
            return PhonebookError::conflict(name);
        }
    }
    storage_error(err)
}

fn target_key(name: &str, phone: &str) -> String {
    if name.is_empty() {
        phone.to_string()
    } else {
        name.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    async fn open_repo(dir: &TempDir) -> SqliteContactRepository {
        SqliteContactRepository::new(&dir.path().join("contacts.db"))
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_insert_and_find_round_trip() {
        let dir = TempDir::new().unwrap();
        let repo = open_repo(&dir).await;

        repo.insert("John", "123456789").await.unwrap();

        let found = repo.find_by_name_or_phone("John", "").await.unwrap();
        assert_eq!(found, Some(Contact::new("John", "123456789")));
    }

    #[tokio::test]
    async fn test_find_by_phone() {
        let dir = TempDir::new().unwrap();
        let repo = open_repo(&dir).await;

        repo.insert("Joanna", "888777555").await.unwrap();

        let found = repo.find_by_name_or_phone("", "888777555").await.unwrap();
        assert_eq!(found.unwrap().name, "Joanna");
    }

    #[tokio::test]
    async fn test_find_miss_is_none_not_error() {
        let dir = TempDir::new().unwrap();
        let repo = open_repo(&dir).await;

        let found = repo.find_by_name_or_phone("Bob", "").await.unwrap();
        assert!(found.is_none());
    }

    #[tokio::test]
    async fn test_duplicate_name_conflicts_and_keeps_first_phone() {
        let dir = TempDir::new().unwrap();
        let repo = open_repo(&dir).await;

        repo.insert("John", "111").await.unwrap();
        let err = repo.insert("John", "222").await.unwrap_err();
        assert!(err.is_conflict());

        let found = repo.find_by_name_or_phone("John", "").await.unwrap();
        assert_eq!(found.unwrap().phone, "111");
    }

    #[tokio::test]
    async fn test_update_changes_only_the_phone() {
        let dir = TempDir::new().unwrap();
        let repo = open_repo(&dir).await;

        repo.insert("Mark", "123").await.unwrap();
        let updated = repo.update_phone("Mark", "111222333").await.unwrap();
        assert_eq!(updated, Contact::new("Mark", "111222333"));

        let all = repo.list_all().await.unwrap();
        assert_eq!(all.len(), 1);
    }

    #[tokio::test]
    async fn test_update_missing_name_fails_and_does_not_insert() {
        let dir = TempDir::new().unwrap();
        let repo = open_repo(&dir).await;

        let err = repo.update_phone("Ghost", "123").await.unwrap_err();
        assert!(err.is_not_found());
        assert!(repo.list_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_delete_by_name_returns_removed_contact() {
        let dir = TempDir::new().unwrap();
        let repo = open_repo(&dir).await;

        repo.insert("John", "123").await.unwrap();
        let removed = repo.delete_by_name_or_phone("John", "").await.unwrap();
        assert_eq!(removed.name, "John");
        assert!(repo.list_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_delete_by_phone() {
        let dir = TempDir::new().unwrap();
        let repo = open_repo(&dir).await;

        repo.insert("Joanna", "888777555").await.unwrap();
        let removed = repo.delete_by_name_or_phone("", "888777555").await.unwrap();
        assert_eq!(removed.name, "Joanna");
    }

    #[tokio::test]
    async fn test_delete_miss_is_not_found() {
        let dir = TempDir::new().unwrap();
        let repo = open_repo(&dir).await;

        let err = repo.delete_by_name_or_phone("Ghost", "").await.unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_list_all_preserves_insertion_order() {
        let dir = TempDir::new().unwrap();
        let repo = open_repo(&dir).await;

        repo.insert("John", "1").await.unwrap();
        repo.insert("Joanna", "2").await.unwrap();
        repo.insert("Mark", "3").await.unwrap();

        let names: Vec<String> = repo
            .list_all()
            .await
            .unwrap()
            .into_iter()
            .map(|c| c.name)
            .collect();
        assert_eq!(names, ["John", "Joanna", "Mark"]);
    }

    #[tokio::test]
    async fn test_list_all_empty_database() {
        let dir = TempDir::new().unwrap();
        let repo = open_repo(&dir).await;

        assert!(repo.list_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_migrations_are_idempotent() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("contacts.db");

        let repo = SqliteContactRepository::new(&path).await.unwrap();
        repo.insert("John", "123").await.unwrap();
        drop(repo);

        // Reopening runs CREATE TABLE IF NOT EXISTS again; data survives.
        let repo = SqliteContactRepository::new(&path).await.unwrap();
        assert_eq!(repo.list_all().await.unwrap().len(), 1);
    }
}
