//! Repository for the `restricted_date_settings` singleton.

use sqlx::PgPool;

use crate::models::restricted_dates::{RestrictedDateSettings, UpdateRestrictedDateSettings};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, closed_days, blocked_dates, open_time, close_time, updated_at";

/// Provides access to the restricted-dates settings singleton.
pub struct SettingsRepo;

impl SettingsRepo {
    /// Fetch the settings row, creating it with defaults on first read.
    pub async fn get_or_create(pool: &PgPool) -> Result<RestrictedDateSettings, sqlx::Error> {
        let select = format!("SELECT {COLUMNS} FROM restricted_date_settings ORDER BY id LIMIT 1");
        if let Some(settings) = sqlx::query_as::<_, RestrictedDateSettings>(&select)
            .fetch_optional(pool)
            .await?
        {
            return Ok(settings);
        }

        let insert = format!(
            "INSERT INTO restricted_date_settings DEFAULT VALUES RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, RestrictedDateSettings>(&insert)
            .fetch_one(pool)
            .await
    }

    /// Update the settings row. Only non-`None` fields are applied.
    pub async fn update(
        pool: &PgPool,
        input: &UpdateRestrictedDateSettings,
    ) -> Result<RestrictedDateSettings, sqlx::Error> {
        // Ensure the singleton exists before patching it.
        let current = Self::get_or_create(pool).await?;

        let query = format!(
            "UPDATE restricted_date_settings SET
                closed_days = COALESCE($2, closed_days),
                blocked_dates = COALESCE($3, blocked_dates),
                open_time = COALESCE($4, open_time),
                close_time = COALESCE($5, close_time),
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, RestrictedDateSettings>(&query)
            .bind(current.id)
            .bind(&input.closed_days)
            .bind(&input.blocked_dates)
            .bind(input.open_time)
            .bind(input.close_time)
            .fetch_one(pool)
            .await
    }
}
