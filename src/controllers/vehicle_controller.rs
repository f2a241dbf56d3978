use sqlx::PgPool;
use uuid::Uuid;

use crate::dto::common::ApiResponse;
use crate::dto::vehicle_dto::{SaveVehicleRequest, VehicleFilters, VehicleResponse};
use crate::models::vehicle::NewVehicle;
use crate::models::AvailabilityStatus;
use crate::repositories::vehicle_repository::VehicleRepository;
use crate::utils::errors::AppError;

pub struct VehicleController {
    repository: VehicleRepository,
}

impl VehicleController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: VehicleRepository::new(pool),
        }
    }

    pub async fn create(
        &self,
        request: SaveVehicleRequest,
    ) -> Result<ApiResponse<VehicleResponse>, AppError> {
        let vehicle = NewVehicle::new(
            &request.model,
            &request.plate,
            request.capacity,
            &request.status,
        )?;

        // La placa es única
        if self.repository.plate_exists(&vehicle.plate, None).await? {
            return Err(AppError::Conflict(
                "La placa ya está registrada".to_string(),
            ));
        }

        let saved = self.repository.create(&vehicle).await?;

        Ok(ApiResponse::success_with_message(
            VehicleResponse::from(saved),
            "Vehículo guardado exitosamente".to_string(),
        ))
    }

    pub async fn replace(
        &self,
        id: Uuid,
        request: SaveVehicleRequest,
    ) -> Result<ApiResponse<VehicleResponse>, AppError> {
        let vehicle = NewVehicle::new(
            &request.model,
            &request.plate,
            request.capacity,
            &request.status,
        )?;

        if self.repository.plate_exists(&vehicle.plate, Some(id)).await? {
            return Err(AppError::Conflict(
                "La placa ya está registrada".to_string(),
            ));
        }

        let saved = self.repository.replace(id, &vehicle).await?;

        Ok(ApiResponse::success_with_message(
            VehicleResponse::from(saved),
            "Vehículo actualizado exitosamente".to_string(),
        ))
    }

    pub async fn get_by_id(&self, id: Uuid) -> Result<VehicleResponse, AppError> {
        let vehicle = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Vehículo no encontrado".to_string()))?;

        Ok(VehicleResponse::from(vehicle))
    }

    pub async fn list(&self, filters: VehicleFilters) -> Result<Vec<VehicleResponse>, AppError> {
        if let Some(ref status) = filters.status {
            AvailabilityStatus::parse(status)
                .map_err(|_| AppError::BadRequest("Status inválido".to_string()))?;
        }

        let vehicles = self.repository.list(filters.status.as_deref()).await?;
        Ok(vehicles.into_iter().map(Into::into).collect())
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        self.repository.delete(id).await
    }
}
