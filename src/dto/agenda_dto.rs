//! DTOs de la agenda (calendario + coordinador)

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::dto::booking_dto::BookingResponse;
use crate::dto::driver_dto::DriverResponse;
use crate::dto::vehicle_dto::VehicleResponse;

/// Una celda de la grilla mensual. Las celdas de relleno (antes del día 1
/// y después del último día) llevan `day: None`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarCell {
    pub day: Option<u32>,
    /// Clave de fecha YYYY-MM-DD; ausente en celdas de relleno
    pub date: Option<String>,
    pub today: bool,
    pub selected: bool,
    /// Badge con la cantidad de agendamientos del día (0 = sin badge)
    pub bookings: u32,
}

impl CalendarCell {
    pub fn empty() -> Self {
        Self {
            day: None,
            date: None,
            today: false,
            selected: false,
            bookings: 0,
        }
    }
}

/// Grilla mensual de 7 columnas, semana iniciando en domingo
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarGrid {
    pub year: i32,
    pub month: u32,
    /// Título localizado, p.ej. "marzo de 2024"
    pub title: String,
    pub cells: Vec<CalendarCell>,
}

/// Vista completa de la agenda: calendario + detalle del día seleccionado
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AgendaView {
    pub calendar: CalendarGrid,
    pub selected_day: Option<String>,
    pub form_open: bool,
    /// Agendamientos del día seleccionado, ordenados por horario de salida
    pub day_bookings: Vec<BookingResponse>,
    /// true cuando los datos vienen del espejo offline (base de datos caída)
    pub degraded: bool,
}

#[derive(Debug, Deserialize)]
pub struct SelectDayRequest {
    pub date: String,
}

#[derive(Debug, Deserialize)]
pub struct NavigateRequest {
    /// "prev" o "next"
    pub direction: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OpenFormRequest {
    /// Presente al editar un agendamiento existente
    #[serde(default)]
    pub booking_id: Option<Uuid>,
}

/// Datos de prellenado que recibe el formulario al abrirse
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FormPrefill {
    /// Registro completo al editar; None al crear
    pub booking: Option<BookingResponse>,
    /// Fecha por defecto (el día seleccionado) al crear
    pub date: Option<String>,
    /// Solo vehículos/conductores disponibles entran al selector
    pub vehicles: Vec<VehicleResponse>,
    pub drivers: Vec<DriverResponse>,
}
