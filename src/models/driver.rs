//! Modelo de Driver (conductor)
//!
//! CNH y teléfono se normalizan a solo dígitos y deben tener
//! exactamente 11 dígitos.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::{ValidationError, ValidationErrors};

use crate::models::AvailabilityStatus;
use crate::utils::validation::{sanitize_string, validate_digits};

/// Driver persistido - mapea a la tabla drivers
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Driver {
    pub id: Uuid,
    pub name: String,
    pub license: String,
    pub phone: String,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

/// Conductor validado, listo para persistir
#[derive(Debug, Clone)]
pub struct NewDriver {
    pub name: String,
    pub license: String,
    pub phone: String,
    pub status: AvailabilityStatus,
}

impl NewDriver {
    pub fn new(
        name: &str,
        license: &str,
        phone: &str,
        status: &str,
    ) -> Result<Self, ValidationErrors> {
        let mut errors = ValidationErrors::new();

        let name = sanitize_string(name);
        if name.chars().count() < 3 {
            let mut error = ValidationError::new("name");
            error.message = Some("El nombre debe tener al menos 3 caracteres".into());
            errors.add("name", error);
        }

        let license = match validate_digits(license, 11) {
            Ok(digits) => digits,
            Err(e) => {
                errors.add("license", e);
                String::new()
            }
        };

        let phone = match validate_digits(phone, 11) {
            Ok(digits) => digits,
            Err(e) => {
                errors.add("phone", e);
                String::new()
            }
        };

        let parsed_status = match AvailabilityStatus::parse(status) {
            Ok(s) => Some(s),
            Err(e) => {
                errors.add("status", e);
                None
            }
        };

        match parsed_status {
            Some(status) if errors.is_empty() => Ok(Self {
                name,
                license,
                phone,
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
    fn test_valid_driver_normalizes_digits() {
        let driver = NewDriver::new(
            "Carlos Pereira",
            "123.456.789-01",
            "(11) 98765-4321",
            "available",
        )
        .unwrap();

        assert_eq!(driver.license, "12345678901");
        assert_eq!(driver.phone, "11987654321");
    }

    #[test]
    fn test_short_license_rejected() {
        let result = NewDriver::new("Carlos Pereira", "12345", "11987654321", "available");
        assert!(result.unwrap_err().field_errors().contains_key("license"));
    }

    #[test]
    fn test_short_name_rejected() {
        let result = NewDriver::new("Jo", "12345678901", "11987654321", "available");
        assert!(result.unwrap_err().field_errors().contains_key("name"));
    }
}
