//! Modelos del sistema
//!
//! Tipos de registro por entidad (Booking, Vehicle, Driver) con
//! constructores que hacen cumplir las invariantes al crearlos,
//! no solo al enviar el formulario.

pub mod booking;
pub mod driver;
pub mod vehicle;

use serde::{Deserialize, Serialize};
use validator::ValidationError;

/// Disponibilidad de vehículos y conductores
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AvailabilityStatus {
    Available,
    Unavailable,
}

impl AvailabilityStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AvailabilityStatus::Available => "available",
            AvailabilityStatus::Unavailable => "unavailable",
        }
    }

    pub fn parse(value: &str) -> Result<Self, ValidationError> {
        match value {
            "available" => Ok(AvailabilityStatus::Available),
            "unavailable" => Ok(AvailabilityStatus::Unavailable),
            _ => {
                let mut error = ValidationError::new("status");
                error.add_param("value".into(), &value.to_string());
                error.add_param("allowed".into(), &"available|unavailable".to_string());
                Err(error)
            }
        }
    }
}
