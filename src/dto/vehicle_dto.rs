//! DTOs de Vehicle

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::vehicle::Vehicle;

/// Request para crear o actualizar un vehículo
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveVehicleRequest {
    pub model: String,
    pub plate: String,
    pub capacity: i32,
    pub status: String,
}

/// Response de vehículo para la API
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VehicleResponse {
    pub id: Uuid,
    pub model: String,
    pub plate: String,
    pub capacity: i32,
    pub status: String,
    pub created_at: String,
}

impl From<Vehicle> for VehicleResponse {
    fn from(vehicle: Vehicle) -> Self {
        Self {
            id: vehicle.id,
            model: vehicle.model,
            plate: vehicle.plate,
            capacity: vehicle.capacity,
            status: vehicle.status,
            created_at: vehicle.created_at.to_rfc3339(),
        }
    }
}

/// Filtros para listado de vehículos
#[derive(Debug, Deserialize)]
pub struct VehicleFilters {
    pub status: Option<String>,
}
