//! DTOs de Driver

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::driver::Driver;
use crate::utils::validation::format_license;

/// Request para crear o actualizar un conductor
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveDriverRequest {
    pub name: String,
    pub license: String,
    pub phone: String,
    pub status: String,
}

/// Response de conductor para la API
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DriverResponse {
    pub id: Uuid,
    pub name: String,
    pub license: String,
    /// CNH formateada para exhibición: 123.456.789-01
    pub license_display: String,
    pub phone: String,
    pub status: String,
    pub created_at: String,
}

impl From<Driver> for DriverResponse {
    fn from(driver: Driver) -> Self {
        let license_display = format_license(&driver.license);
        Self {
            id: driver.id,
            name: driver.name,
            license: driver.license,
            license_display,
            phone: driver.phone,
            status: driver.status,
            created_at: driver.created_at.to_rfc3339(),
        }
    }
}

/// Filtros para listado de conductores
#[derive(Debug, Deserialize)]
pub struct DriverFilters {
    pub status: Option<String>,
}
