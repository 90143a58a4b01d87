//! # Cashier Repository
//!
//! Database operations for the `cajeros` table.
//!
//! The password hash is only ever read by [`find_credentials_by_username`]
//! for login. Every other read returns a [`Cashier`], which has no hash.
//!
//! [`find_credentials_by_username`]: CashierRepository::find_credentials_by_username

use sqlx::SqlitePool;
use tracing::debug;

use crate::credentials::hash_password;
use crate::error::{DbError, DbResult};
use bingo_core::{Cashier, Role};

const CASHIER_COLUMNS: &str = r#"
    id,
    username,
    nombre_completo AS full_name,
    activo          AS active,
    rol             AS role
"#;

/// A cashier row together with its stored password hash.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct CashierCredentials {
    #[sqlx(flatten)]
    pub cashier: Cashier,
    pub password_hash: String,
}

/// Account data for a new cashier. The password is hashed on insert.
#[derive(Debug, Clone)]
pub struct NewCashier {
    pub username: String,
    pub full_name: String,
    pub password: String,
    pub role: Role,
}

/// Repository for cashier accounts.
#[derive(Debug, Clone)]
pub struct CashierRepository {
    pool: SqlitePool,
}

impl CashierRepository {
    /// Creates a new CashierRepository.
    pub fn new(pool: SqlitePool) -> Self {
        CashierRepository { pool }
    }

    /// Looks up a cashier and their password hash by username.
    pub async fn find_credentials_by_username(
        &self,
        username: &str,
    ) -> DbResult<Option<CashierCredentials>> {
        debug!(username = %username, "Looking up cashier credentials");

        let sql = format!("SELECT {CASHIER_COLUMNS}, password_hash FROM cajeros WHERE username = ?1");

        let row = sqlx::query_as::<_, CashierCredentials>(&sql)
            .bind(username)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row)
    }

    /// Gets a cashier by ID.
    pub async fn get_by_id(&self, id: i64) -> DbResult<Option<Cashier>> {
        let sql = format!("SELECT {CASHIER_COLUMNS} FROM cajeros WHERE id = ?1");

        let cashier = sqlx::query_as::<_, Cashier>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(cashier)
    }

    /// Creates a cashier account.
    ///
    /// ## Returns
    /// * `Ok(Cashier)` - The new account
    /// * `Err(DbError::UniqueViolation)` - Username already taken
    pub async fn insert(&self, new: &NewCashier) -> DbResult<Cashier> {
        debug!(username = %new.username, role = ?new.role, "Creating cashier");

        let password_hash = hash_password(&new.password)?;

        let sql = format!(
            "INSERT INTO cajeros (username, nombre_completo, password_hash, rol) \
             VALUES (?1, ?2, ?3, ?4) \
             RETURNING {CASHIER_COLUMNS}"
        );

        let result = sqlx::query_as::<_, Cashier>(&sql)
            .bind(&new.username)
            .bind(&new.full_name)
            .bind(&password_hash)
            .bind(new.role)
            .fetch_one(&self.pool)
            .await;

        match result {
            Ok(cashier) => Ok(cashier),
            Err(e) => match DbError::from(e) {
                DbError::UniqueViolation { field, .. } => {
                    Err(DbError::duplicate(field, new.username.clone()))
                }
                other => Err(other),
            },
        }
    }

    /// Enables or disables a cashier account.
    pub async fn set_active(&self, id: i64, active: bool) -> DbResult<()> {
        debug!(id, active, "Setting cashier active flag");

        let result = sqlx::query("UPDATE cajeros SET activo = ?2 WHERE id = ?1")
            .bind(id)
            .bind(active)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Cashier", id));
        }

        Ok(())
    }

    /// Counts all accounts.
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM cajeros")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}
