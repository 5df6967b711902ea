//! Repository for the seeded `roles` table and role lookups for users.

use careline_core::roles::ALL_ROLES;
use careline_core::types::DbId;
use sqlx::PgPool;

use crate::models::role::Role;

const COLUMNS: &str = "id, name, description, created_at, updated_at";

/// Read access to roles. Roles are seeded by migration and never edited here.
pub struct RoleRepo;

impl RoleRepo {
    pub async fn find_by_name(pool: &PgPool, name: &str) -> Result<Option<Role>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM roles WHERE name = $1");
        sqlx::query_as::<_, Role>(&query)
            .bind(name)
            .fetch_optional(pool)
            .await
    }

    /// All roles, most privileged first. Roles unknown to the application
    /// sort last.
    pub async fn list(pool: &PgPool) -> Result<Vec<Role>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM roles
             ORDER BY array_position($1::TEXT[], name) ASC NULLS LAST, name ASC"
        );
        sqlx::query_as::<_, Role>(&query)
            .bind(ALL_ROLES)
            .fetch_all(pool)
            .await
    }

    /// Name of `role_id`, or `"unknown"` when the row is gone. An unknown
    /// role passes no section check.
    pub async fn resolve_name(pool: &PgPool, role_id: DbId) -> Result<String, sqlx::Error> {
        let name: Option<String> = sqlx::query_scalar("SELECT name FROM roles WHERE id = $1")
            .bind(role_id)
            .fetch_optional(pool)
            .await?;
        Ok(name.unwrap_or_else(|| "unknown".to_string()))
    }

    /// Current role of an active user, or `None` when the user is missing or
    /// deactivated. Checked on every authenticated request.
    pub async fn active_role_of_user(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Option<String>, sqlx::Error> {
        sqlx::query_scalar(
            "SELECT r.name FROM users u
             JOIN roles r ON r.id = u.role_id
             WHERE u.id = $1 AND u.is_active",
        )
        .bind(user_id)
        .fetch_optional(pool)
        .await
    }
}
