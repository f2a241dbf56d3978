//! Modelo de Vehicle
//!
//! Registro persistido del vehículo y su constructor validado.
//! La placa se normaliza a mayúsculas antes de validar el patrón Mercosur.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::{ValidationError, ValidationErrors};

use crate::models::AvailabilityStatus;
use crate::utils::validation::{sanitize_string, validate_plate, validate_range};

/// Vehicle persistido - mapea a la tabla vehicles
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Vehicle {
    pub id: Uuid,
    pub model: String,
    pub plate: String,
    pub capacity: i32,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

/// Vehículo validado, listo para persistir
#[derive(Debug, Clone)]
pub struct NewVehicle {
    pub model: String,
    pub plate: String,
    pub capacity: i32,
    pub status: AvailabilityStatus,
}

impl NewVehicle {
    pub fn new(
        model: &str,
        plate: &str,
        capacity: i32,
        status: &str,
    ) -> Result<Self, ValidationErrors> {
        let mut errors = ValidationErrors::new();

        let model = sanitize_string(model);
        if model.is_empty() {
            let mut error = ValidationError::new("required");
            error.message = Some("Informa el modelo del vehículo".into());
            errors.add("model", error);
        }

        let plate = plate.trim().to_uppercase();
        if let Err(e) = validate_plate(&plate) {
            errors.add("plate", e);
        }

        // Capacidad entre 1 y 50 pasajeros
        if let Err(e) = validate_range(capacity, 1, 50) {
            errors.add("capacity", e);
        }

        let parsed_status = match AvailabilityStatus::parse(status) {
            Ok(s) => Some(s),
            Err(e) => {
                errors.add("status", e);
                None
            }
        };

        match parsed_status {
            Some(status) if errors.is_empty() => Ok(Self {
                model,
                plate,
                capacity,
                status,
            }),
            _ => Err(errors),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_vehicle_uppercases_plate() {
        let vehicle = NewVehicle::new("Sprinter 416", "abc1d23", 15, "available").unwrap();
        assert_eq!(vehicle.plate, "ABC1D23");
        assert_eq!(vehicle.status, AvailabilityStatus::Available);
    }

    #[test]
    fn test_invalid_plate_rejected() {
        let result = NewVehicle::new("Sprinter 416", "1234ABC", 15, "available");
        assert!(result.unwrap_err().field_errors().contains_key("plate"));
    }

    #[test]
    fn test_capacity_out_of_range_rejected() {
        assert!(NewVehicle::new("Kombi", "ABC1234", 0, "available").is_err());
        assert!(NewVehicle::new("Kombi", "ABC1234", 51, "available").is_err());
    }

    #[test]
    fn test_unknown_status_rejected() {
        let result = NewVehicle::new("Kombi", "ABC1234", 9, "maintenance");
        assert!(result.unwrap_err().field_errors().contains_key("status"));
    }
}
