//! Admin account repository.

use sqlx::{PgPool, types::Json};

use tamarind_core::{AdminId, AdminPermissions, AdminRole, Email};

use super::RepositoryError;
use crate::models::AdminUser;

const ADMIN_COLUMNS: &str = "id, username, email, name, role, permissions, is_active, \
     last_login, created_at, updated_at";

/// Everything needed to persist a new admin account.
pub struct NewAdmin<'n> {
    pub username: &'n str,
    pub email: &'n Email,
    pub name: &'n str,
    pub password_hash: &'n str,
    pub role: AdminRole,
    pub permissions: AdminPermissions,
}

/// Repository for admin accounts.
pub struct AdminUserRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> AdminUserRepository<'a> {
    /// Create a new admin user repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// All admin accounts, oldest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_all(&self) -> Result<Vec<AdminUser>, RepositoryError> {
        let admins = sqlx::query_as::<_, AdminUser>(&format!(
            "SELECT {ADMIN_COLUMNS} FROM admin.admin_users ORDER BY id"
        ))
        .fetch_all(self.pool)
        .await?;

        Ok(admins)
    }

    /// Get an admin by their ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_by_id(&self, id: AdminId) -> Result<Option<AdminUser>, RepositoryError> {
        let admin = sqlx::query_as::<_, AdminUser>(&format!(
            "SELECT {ADMIN_COLUMNS} FROM admin.admin_users WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        Ok(admin)
    }

    /// Create a new admin account with a pre-hashed password.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the email or username is taken.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn create(&self, admin: NewAdmin<'_>) -> Result<AdminUser, RepositoryError> {
        let created = sqlx::query_as::<_, AdminUser>(&format!(
            "INSERT INTO admin.admin_users
                 (username, email, name, password_hash, role, permissions)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {ADMIN_COLUMNS}"
        ))
        .bind(admin.username)
        .bind(admin.email)
        .bind(admin.name)
        .bind(admin.password_hash)
        .bind(admin.role)
        .bind(Json(admin.permissions))
        .fetch_one(self.pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(ref db_err) = e
                && db_err.is_unique_violation()
            {
                return RepositoryError::Conflict("email or username already exists".to_owned());
            }
            RepositoryError::Database(e)
        })?;

        Ok(created)
    }

    /// Get an active admin and their password hash by email.
    ///
    /// Returns `None` for unknown emails and for disabled accounts; the
    /// caller distinguishes the two via [`Self::is_disabled`].
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_password_hash(
        &self,
        email: &Email,
    ) -> Result<Option<(AdminUser, String)>, RepositoryError> {
        let row = sqlx::query_as::<_, AdminWithHash>(&format!(
            "SELECT {ADMIN_COLUMNS}, password_hash FROM admin.admin_users
             WHERE email = $1 AND is_active"
        ))
        .bind(email)
        .fetch_optional(self.pool)
        .await?;

        Ok(row.map(|r| {
            let AdminWithHash {
                admin,
                password_hash,
            } = r;
            (admin, password_hash)
        }))
    }

    /// Whether a disabled account exists for this email.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn is_disabled(&self, email: &Email) -> Result<bool, RepositoryError> {
        let row: Option<(bool,)> =
            sqlx::query_as("SELECT is_active FROM admin.admin_users WHERE email = $1")
                .bind(email)
                .fetch_optional(self.pool)
                .await?;

        Ok(matches!(row, Some((false,))))
    }

    /// Get an admin's password hash by ID (for password change).
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the admin doesn't exist.
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_password_hash_by_id(&self, id: AdminId) -> Result<String, RepositoryError> {
        let hash: Option<(String,)> =
            sqlx::query_as("SELECT password_hash FROM admin.admin_users WHERE id = $1")
                .bind(id)
                .fetch_optional(self.pool)
                .await?;

        hash.map(|(h,)| h).ok_or(RepositoryError::NotFound)
    }

    /// Replace an admin's password hash.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the admin doesn't exist.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn set_password_hash(
        &self,
        id: AdminId,
        password_hash: &str,
    ) -> Result<(), RepositoryError> {
        let result = sqlx::query(
            "UPDATE admin.admin_users SET password_hash = $2, updated_at = now() WHERE id = $1",
        )
        .bind(id)
        .bind(password_hash)
        .execute(self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }

    /// Record a successful login.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn touch_last_login(&self, id: AdminId) -> Result<(), RepositoryError> {
        sqlx::query("UPDATE admin.admin_users SET last_login = now() WHERE id = $1")
            .bind(id)
            .execute(self.pool)
            .await?;
        Ok(())
    }
}

#[derive(sqlx::FromRow)]
struct AdminWithHash {
    #[sqlx(flatten)]
    admin: AdminUser,
    password_hash: String,
}
