//! Modelo de Booking (agendamiento de viaje)
//!
//! Este módulo contiene el registro persistido y el constructor validado
//! `NewBooking`, que hace cumplir las invariantes del agendamiento:
//! horario de retorno posterior al de salida, direcciones sanitizadas de
//! al menos 5 caracteres y entre 1 y 15 pasajeros con nombres de al
//! menos 3 caracteres.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;
use uuid::Uuid;
use validator::{ValidationError, ValidationErrors};

use crate::utils::validation::{sanitize_string, validate_date, validate_time};

pub const MAX_PASSENGERS: usize = 15;
pub const MIN_ADDRESS_LEN: usize = 5;
pub const MIN_PASSENGER_NAME_LEN: usize = 3;

/// Booking persistido - mapea a la tabla bookings
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Booking {
    pub id: Uuid,
    pub date: NaiveDate,
    pub departure_time: NaiveTime,
    pub return_time: NaiveTime,
    pub departure_address: String,
    pub return_address: String,
    pub vehicle_id: Uuid,
    pub driver_id: Uuid,
    pub passengers: Json<Vec<String>>,
    pub created_at: DateTime<Utc>,
}

/// Agendamiento validado y normalizado, listo para persistir.
/// Solo se construye vía [`NewBooking::new`]; si la construcción falla,
/// ninguna llamada al gateway de persistencia se emite.
#[derive(Debug, Clone)]
pub struct NewBooking {
    pub date: NaiveDate,
    pub departure_time: NaiveTime,
    pub return_time: NaiveTime,
    pub departure_address: String,
    pub return_address: String,
    pub vehicle_id: Uuid,
    pub driver_id: Uuid,
    pub passengers: Vec<String>,
}

impl NewBooking {
    /// Validar los campos crudos del formulario y construir el registro
    /// normalizado: direcciones sanitizadas, horarios truncados a HH:MM.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        date: &str,
        departure_time: &str,
        return_time: &str,
        departure_address: &str,
        return_address: &str,
        vehicle_id: &str,
        driver_id: &str,
        passengers: &[String],
    ) -> Result<Self, ValidationErrors> {
        let mut errors = ValidationErrors::new();

        let parsed_date = match validate_date(date) {
            Ok(d) => Some(d),
            Err(e) => {
                errors.add("date", e);
                None
            }
        };

        let parsed_departure = match validate_time(departure_time) {
            Ok(t) => Some(t),
            Err(e) => {
                errors.add("departureTime", e);
                None
            }
        };

        let parsed_return = match validate_time(return_time) {
            Ok(t) => Some(t),
            Err(e) => {
                errors.add("returnTime", e);
                None
            }
        };

        // El retorno debe ser estrictamente posterior a la salida
        if let (Some(dep), Some(ret)) = (parsed_departure, parsed_return) {
            if ret <= dep {
                let mut error = ValidationError::new("time_order");
                error.message =
                    Some("El horario de retorno debe ser posterior al de salida".into());
                errors.add("returnTime", error);
            }
        }

        let departure_address = sanitize_string(departure_address);
        if departure_address.chars().count() < MIN_ADDRESS_LEN {
            errors.add("departureAddress", address_error());
        }

        let return_address = sanitize_string(return_address);
        if return_address.chars().count() < MIN_ADDRESS_LEN {
            errors.add("returnAddress", address_error());
        }

        let parsed_vehicle = match parse_reference(vehicle_id) {
            Ok(id) => Some(id),
            Err(e) => {
                errors.add("vehicleId", e);
                None
            }
        };

        let parsed_driver = match parse_reference(driver_id) {
            Ok(id) => Some(id),
            Err(e) => {
                errors.add("driverId", e);
                None
            }
        };

        let passengers = match validate_passengers(passengers) {
            Ok(list) => list,
            Err(e) => {
                errors.add("passengers", e);
                Vec::new()
            }
        };

        match (
            parsed_date,
            parsed_departure,
            parsed_return,
            parsed_vehicle,
            parsed_driver,
        ) {
            (Some(date), Some(departure_time), Some(return_time), Some(vehicle_id), Some(driver_id))
                if errors.is_empty() =>
            {
                Ok(Self {
                    date,
                    departure_time,
                    return_time,
                    departure_address,
                    return_address,
                    vehicle_id,
                    driver_id,
                    passengers,
                })
            }
            _ => Err(errors),
        }
    }
}

/// Sanitizar la lista de pasajeros: filas vacías se descartan, el resto
/// debe tener nombre de al menos 3 caracteres, con un máximo de 15.
fn validate_passengers(passengers: &[String]) -> Result<Vec<String>, ValidationError> {
    let cleaned: Vec<String> = passengers
        .iter()
        .map(|p| sanitize_string(p))
        .filter(|p| !p.is_empty())
        .collect();

    if cleaned.is_empty() {
        let mut error = ValidationError::new("passengers_min");
        error.message = Some("Agrega al menos un pasajero".into());
        return Err(error);
    }

    if cleaned.len() > MAX_PASSENGERS {
        let mut error = ValidationError::new("passengers_max");
        error.message = Some("Número máximo de pasajeros excedido (máximo: 15)".into());
        error.add_param("max".into(), &MAX_PASSENGERS);
        return Err(error);
    }

    for name in &cleaned {
        if name.chars().count() < MIN_PASSENGER_NAME_LEN {
            let mut error = ValidationError::new("passenger_name");
            error.message =
                Some("Cada nombre de pasajero debe tener al menos 3 caracteres".into());
            error.add_param("value".into(), name);
            return Err(error);
        }
    }

    Ok(cleaned)
}

fn parse_reference(value: &str) -> Result<Uuid, ValidationError> {
    Uuid::parse_str(value.trim()).map_err(|_| {
        let mut error = ValidationError::new("reference");
        error.add_param("value".into(), &value.to_string());
        error
    })
}

fn address_error() -> ValidationError {
    let mut error = ValidationError::new("address");
    error.message = Some("La dirección debe tener al menos 5 caracteres".into());
    error
}

#[cfg(test)]
mod tests {
    use super::*;

    const VEHICLE_ID: &str = "550e8400-e29b-41d4-a716-446655440000";
    const DRIVER_ID: &str = "550e8400-e29b-41d4-a716-446655440001";

    fn passengers(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_valid_booking_is_normalized() {
        let booking = NewBooking::new(
            "2024-03-15",
            "08:00:30",
            "17:30",
            "  Av. Paulista, 1000  ",
            "<b>Rua das Flores, 25</b>",
            VEHICLE_ID,
            DRIVER_ID,
            &passengers(&["María Silva", ""]),
        )
        .unwrap();

        assert_eq!(booking.departure_time.format("%H:%M:%S").to_string(), "08:00:00");
        assert_eq!(booking.departure_address, "Av. Paulista, 1000");
        assert_eq!(booking.return_address, "Rua das Flores, 25");
        assert_eq!(booking.passengers, vec!["María Silva"]);
    }

    #[test]
    fn test_return_before_departure_is_rejected() {
        let result = NewBooking::new(
            "2024-03-15",
            "08:00",
            "07:00",
            "Av. Paulista, 1000",
            "Rua das Flores, 25",
            VEHICLE_ID,
            DRIVER_ID,
            &passengers(&["María Silva"]),
        );

        let errors = result.unwrap_err();
        assert!(errors.field_errors().contains_key("returnTime"));
    }

    #[test]
    fn test_return_equal_to_departure_is_rejected() {
        let result = NewBooking::new(
            "2024-03-15",
            "08:00",
            "08:00",
            "Av. Paulista, 1000",
            "Rua das Flores, 25",
            VEHICLE_ID,
            DRIVER_ID,
            &passengers(&["María Silva"]),
        );

        assert!(result.is_err());
    }

    #[test]
    fn test_short_address_is_rejected() {
        let result = NewBooking::new(
            "2024-03-15",
            "08:00",
            "17:00",
            "Rua",
            "Rua das Flores, 25",
            VEHICLE_ID,
            DRIVER_ID,
            &passengers(&["María Silva"]),
        );

        let errors = result.unwrap_err();
        assert!(errors.field_errors().contains_key("departureAddress"));
    }

    #[test]
    fn test_empty_passenger_list_is_rejected() {
        let result = NewBooking::new(
            "2024-03-15",
            "08:00",
            "17:00",
            "Av. Paulista, 1000",
            "Rua das Flores, 25",
            VEHICLE_ID,
            DRIVER_ID,
            &passengers(&["", "  "]),
        );

        let errors = result.unwrap_err();
        assert!(errors.field_errors().contains_key("passengers"));
    }

    #[test]
    fn test_more_than_fifteen_passengers_rejected() {
        let names: Vec<String> = (0..16).map(|i| format!("Pasajero {:02}", i)).collect();
        let result = NewBooking::new(
            "2024-03-15",
            "08:00",
            "17:00",
            "Av. Paulista, 1000",
            "Rua das Flores, 25",
            VEHICLE_ID,
            DRIVER_ID,
            &names,
        );

        assert!(result.is_err());
    }

    #[test]
    fn test_short_passenger_name_rejected() {
        let result = NewBooking::new(
            "2024-03-15",
            "08:00",
            "17:00",
            "Av. Paulista, 1000",
            "Rua das Flores, 25",
            VEHICLE_ID,
            DRIVER_ID,
            &passengers(&["Jo"]),
        );

        assert!(result.is_err());
    }

    #[test]
    fn test_bad_references_rejected() {
        let result = NewBooking::new(
            "2024-03-15",
            "08:00",
            "17:00",
            "Av. Paulista, 1000",
            "Rua das Flores, 25",
            "",
            "no-es-uuid",
            &passengers(&["María Silva"]),
        );

        let errors = result.unwrap_err();
        assert!(errors.field_errors().contains_key("vehicleId"));
        assert!(errors.field_errors().contains_key("driverId"));
    }
}
