//! # Account Directory
//!
//! Database operations for user accounts: authentication, listing, and the
//! admin management actions (create, change password, delete).
//!
//! Passwords are opaque text compared as provided; the role flag is the only
//! authorization signal the store carries.

use sqlx::SqlitePool;
use tracing::debug;

use crate::error::{DbError, DbResult};
use vetclinic_core::validation::validate_username;
use vetclinic_core::{Account, CoreError, Role};

/// Manager for account rows.
#[derive(Debug, Clone)]
pub struct AccountDirectory {
    pool: SqlitePool,
}

impl AccountDirectory {
    /// Creates a new AccountDirectory.
    pub fn new(pool: SqlitePool) -> Self {
        AccountDirectory { pool }
    }

    /// Checks credentials. Returns the matching account, or `None` when the
    /// username/password pair is wrong.
    pub async fn authenticate(&self, username: &str, password: &str) -> DbResult<Option<Account>> {
        let account = sqlx::query_as::<_, Account>(
            "SELECT id, username, password, role FROM accounts \
             WHERE username = ?1 AND password = ?2",
        )
        .bind(username)
        .bind(password)
        .fetch_optional(&self.pool)
        .await?;

        debug!(username, found = account.is_some(), "Authentication attempt");
        Ok(account)
    }

    /// Lists all accounts ordered by id.
    pub async fn list(&self) -> DbResult<Vec<Account>> {
        let accounts = sqlx::query_as::<_, Account>(
            "SELECT id, username, password, role FROM accounts ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(accounts)
    }

    /// Looks up an account by username.
    pub async fn get_by_username(&self, username: &str) -> DbResult<Option<Account>> {
        let account = sqlx::query_as::<_, Account>(
            "SELECT id, username, password, role FROM accounts WHERE username = ?1",
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;

        Ok(account)
    }

    /// Creates a new account and returns its id.
    ///
    /// Duplicate usernames surface as `UniqueViolation`.
    pub async fn create(&self, username: &str, password: &str, role: Role) -> DbResult<i64> {
        validate_username(username).map_err(|e| DbError::Domain(CoreError::Validation(e)))?;

        debug!(username, %role, "Creating account");

        let result =
            sqlx::query("INSERT INTO accounts (username, password, role) VALUES (?1, ?2, ?3)")
                .bind(username)
                .bind(password)
                .bind(role)
                .execute(&self.pool)
                .await?;

        Ok(result.last_insert_rowid())
    }

    /// Replaces an account's password.
    pub async fn change_password(&self, id: i64, new_password: &str) -> DbResult<()> {
        let result = sqlx::query("UPDATE accounts SET password = ?2 WHERE id = ?1")
            .bind(id)
            .bind(new_password)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Account", id));
        }

        Ok(())
    }

    /// Deletes an account by id.
    pub async fn delete(&self, id: i64) -> DbResult<()> {
        debug!(id, "Deleting account");

        let result = sqlx::query("DELETE FROM accounts WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Account", id));
        }

        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};

    #[tokio::test]
    async fn test_create_and_authenticate() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let directory = db.accounts();

        let id = directory.create("vet_tech", "s3cret", Role::Staff).await.unwrap();
        assert!(id > 0);

        let account = directory.authenticate("vet_tech", "s3cret").await.unwrap().unwrap();
        assert_eq!(account.username, "vet_tech");
        assert_eq!(account.role, Role::Staff);
        assert!(!account.is_admin());

        assert!(directory.authenticate("vet_tech", "wrong").await.unwrap().is_none());
        assert!(directory.authenticate("nobody", "s3cret").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_duplicate_username_rejected() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let directory = db.accounts();

        directory.create("vet_tech", "one", Role::Staff).await.unwrap();
        let err = directory.create("vet_tech", "two", Role::Admin).await.unwrap_err();
        assert!(matches!(err, DbError::UniqueViolation { .. }));
    }

    #[tokio::test]
    async fn test_invalid_username_rejected() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let err = db.accounts().create("has space", "pw", Role::Staff).await.unwrap_err();
        assert!(matches!(err, DbError::Domain(CoreError::Validation(_))));
    }

    #[tokio::test]
    async fn test_change_password() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let directory = db.accounts();
        let id = directory.create("vet_tech", "old", Role::Staff).await.unwrap();

        directory.change_password(id, "new").await.unwrap();
        assert!(directory.authenticate("vet_tech", "old").await.unwrap().is_none());
        assert!(directory.authenticate("vet_tech", "new").await.unwrap().is_some());

        assert!(matches!(
            directory.change_password(999, "x").await,
            Err(DbError::NotFound { .. })
        ));
    }

    #[tokio::test]
    async fn test_list_and_delete() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let directory = db.accounts();

        let first = directory.create("alpha", "pw", Role::Admin).await.unwrap();
        directory.create("bravo", "pw", Role::Staff).await.unwrap();

        let accounts = directory.list().await.unwrap();
        assert_eq!(accounts.len(), 2);
        assert_eq!(accounts[0].username, "alpha");

        directory.delete(first).await.unwrap();
        assert_eq!(directory.list().await.unwrap().len(), 1);
        assert!(matches!(
            directory.delete(first).await,
            Err(DbError::NotFound { .. })
        ));
    }
}
