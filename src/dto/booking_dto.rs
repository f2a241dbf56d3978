//! DTOs de Booking
//!
//! El wire format usa claves camelCase con nombres completos
//! (`departureAddress`, no abreviaciones) y horarios HH:MM.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::booking::Booking;
use crate::utils::validation::format_time;

/// Request para crear o reemplazar un agendamiento.
/// Los campos llegan crudos; la validación y normalización viven en
/// `NewBooking::new`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveBookingRequest {
    /// Presente al editar (reemplazo completo del registro)
    #[serde(default)]
    pub id: Option<Uuid>,
    pub date: String,
    pub departure_time: String,
    pub return_time: String,
    pub departure_address: String,
    pub return_address: String,
    pub vehicle_id: String,
    pub driver_id: String,
    #[serde(default)]
    pub passengers: Vec<String>,
}

/// Response de agendamiento para la API
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingResponse {
    pub id: Uuid,
    pub date: NaiveDate,
    pub departure_time: String,
    pub return_time: String,
    pub departure_address: String,
    pub return_address: String,
    pub vehicle_id: Uuid,
    pub driver_id: Uuid,
    pub passengers: Vec<String>,
    pub created_at: String,
}

impl From<Booking> for BookingResponse {
    fn from(booking: Booking) -> Self {
        Self {
            id: booking.id,
            date: booking.date,
            departure_time: format_time(booking.departure_time),
            return_time: format_time(booking.return_time),
            departure_address: booking.departure_address,
            return_address: booking.return_address,
            vehicle_id: booking.vehicle_id,
            driver_id: booking.driver_id,
            passengers: booking.passengers.0,
            created_at: booking.created_at.to_rfc3339(),
        }
    }
}

/// Filtros de listado
#[derive(Debug, Deserialize)]
pub struct BookingFilters {
    pub date: Option<String>,
}

/// Parámetros de confirmación para eliminar
#[derive(Debug, Deserialize)]
pub struct DeleteParams {
    #[serde(default)]
    pub confirm: bool,
}
