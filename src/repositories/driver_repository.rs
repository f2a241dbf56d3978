use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::driver::{Driver, NewDriver};
use crate::utils::errors::AppError;

pub struct DriverRepository {
    pool: PgPool,
}

impl DriverRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, driver: &NewDriver) -> Result<Driver, AppError> {
        let id = Uuid::new_v4();

        let driver = sqlx::query_as::<_, Driver>(
            r#"
            INSERT INTO drivers (id, name, license, phone, status, created_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&driver.name)
        .bind(&driver.license)
        .bind(&driver.phone)
        .bind(driver.status.as_str())
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(driver)
    }

    pub async fn replace(&self, id: Uuid, driver: &NewDriver) -> Result<Driver, AppError> {
        let updated = sqlx::query_as::<_, Driver>(
            r#"
            UPDATE drivers
            SET name = $2, license = $3, phone = $4, status = $5
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&driver.name)
        .bind(&driver.license)
        .bind(&driver.phone)
        .bind(driver.status.as_str())
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound("Conductor no encontrado".to_string()))?;

        Ok(updated)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Driver>, AppError> {
        let driver = sqlx::query_as::<_, Driver>("SELECT * FROM drivers WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(driver)
    }

    pub async fn list(&self, status: Option<&str>) -> Result<Vec<Driver>, AppError> {
        let drivers = match status {
            Some(status) => {
                sqlx::query_as::<_, Driver>(
                    "SELECT * FROM drivers WHERE status = $1 ORDER BY name",
                )
                .bind(status)
                .fetch_all(&self.pool)
                .await?
            }
            None => {
                sqlx::query_as::<_, Driver>("SELECT * FROM drivers ORDER BY name")
                    .fetch_all(&self.pool)
                    .await?
            }
        };

        Ok(drivers)
    }

    /// Verificar si la CNH ya está registrada
    pub async fn license_exists(
        &self,
        license: &str,
        exclude_id: Option<Uuid>,
    ) -> Result<bool, AppError> {
        let result: (bool,) = sqlx::query_as(
            "SELECT EXISTS(SELECT 1 FROM drivers WHERE license = $1 AND ($2::uuid IS NULL OR id <> $2))",
        )
        .bind(license)
        .bind(exclude_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(result.0)
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM drivers WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Conductor no encontrado".to_string()));
        }

        Ok(())
    }
}
