use sqlx::PgPool;
use uuid::Uuid;

use crate::dto::common::ApiResponse;
use crate::dto::driver_dto::{DriverFilters, DriverResponse, SaveDriverRequest};
use crate::models::driver::NewDriver;
use crate::models::AvailabilityStatus;
use crate::repositories::driver_repository::DriverRepository;
use crate::utils::errors::AppError;

pub struct DriverController {
    repository: DriverRepository,
}

impl DriverController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: DriverRepository::new(pool),
        }
    }

    pub async fn create(
        &self,
        request: SaveDriverRequest,
    ) -> Result<ApiResponse<DriverResponse>, AppError> {
        let driver = NewDriver::new(
            &request.name,
            &request.license,
            &request.phone,
            &request.status,
        )?;

        if self.repository.license_exists(&driver.license, None).await? {
            return Err(AppError::Conflict("La CNH ya está registrada".to_string()));
        }

        let saved = self.repository.create(&driver).await?;

        Ok(ApiResponse::success_with_message(
            DriverResponse::from(saved),
            "Conductor guardado exitosamente".to_string(),
        ))
    }

    pub async fn replace(
        &self,
        id: Uuid,
        request: SaveDriverRequest,
    ) -> Result<ApiResponse<DriverResponse>, AppError> {
        let driver = NewDriver::new(
            &request.name,
            &request.license,
            &request.phone,
            &request.status,
        )?;

        if self
            .repository
            .license_exists(&driver.license, Some(id))
            .await?
        {
            return Err(AppError::Conflict("La CNH ya está registrada".to_string()));
        }

        let saved = self.repository.replace(id, &driver).await?;

        Ok(ApiResponse::success_with_message(
            DriverResponse::from(saved),
            "Conductor actualizado exitosamente".to_string(),
        ))
    }

    pub async fn get_by_id(&self, id: Uuid) -> Result<DriverResponse, AppError> {
        let driver = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Conductor no encontrado".to_string()))?;

        Ok(DriverResponse::from(driver))
    }

    pub async fn list(&self, filters: DriverFilters) -> Result<Vec<DriverResponse>, AppError> {
        if let Some(ref status) = filters.status {
            AvailabilityStatus::parse(status)
                .map_err(|_| AppError::BadRequest("Status inválido".to_string()))?;
        }

        let drivers = self.repository.list(filters.status.as_deref()).await?;
        Ok(drivers.into_iter().map(Into::into).collect())
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        self.repository.delete(id).await
    }
}
