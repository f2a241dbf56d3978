//! Coordinador de la agenda
//!
//! Dueño del view state en memoria: mes visible, día seleccionado,
//! agendamientos cargados y estado del formulario. Máquina de estados
//! {sin-selección, día-seleccionado} × {formulario-cerrado,
//! formulario-abierto}. Cada acción de navegación o de datos recarga el
//! alcance visible completo y re-renderiza; no hay sync incremental.
//!
//! Las recargas solapadas se resuelven por secuenciación: cada recarga
//! toma un token creciente y su resultado se descarta si una recarga más
//! nueva ya se aplicó.

use chrono::{Datelike, Local, NaiveDate};
use futures::try_join;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::{debug, warn};
use uuid::Uuid;

use crate::cache::booking_cache::BookingCache;
use crate::dto::agenda_dto::{AgendaView, FormPrefill};
use crate::dto::booking_dto::{BookingResponse, SaveBookingRequest};
use crate::models::booking::{Booking, NewBooking};
use crate::repositories::booking_repository::BookingRepository;
use crate::repositories::driver_repository::DriverRepository;
use crate::repositories::vehicle_repository::VehicleRepository;
use crate::services::calendar::{self, MonthDirection};
use crate::state::AppState;
use crate::utils::errors::AppError;

/// View state del coordinador. Se reconstruye en cada navegación o acción
/// de datos; nunca se persiste más allá de la sesión (el espejo offline de
/// agendamientos es aparte).
#[derive(Debug, Clone)]
pub struct AgendaState {
    pub year: i32,
    pub month: u32,
    pub selected_day: Option<NaiveDate>,
    pub bookings: Vec<Booking>,
    pub form_open: bool,
    /// true cuando los agendamientos vienen del espejo offline
    pub degraded: bool,
}

impl Default for AgendaState {
    fn default() -> Self {
        let today = Local::now().date_naive();
        Self {
            year: today.year(),
            month: today.month(),
            selected_day: None,
            bookings: Vec::new(),
            form_open: false,
            degraded: false,
        }
    }
}

/// Coordinador: conecta eventos de los componentes con el gateway de
/// persistencia y reconstruye la vista tras cada cambio de estado.
pub struct AgendaService {
    app: AppState,
    bookings: BookingRepository,
    vehicles: VehicleRepository,
    drivers: DriverRepository,
    cache: BookingCache,
}

impl AgendaService {
    pub fn new(app: &AppState) -> Self {
        Self {
            app: app.clone(),
            bookings: BookingRepository::new(app.pool.clone()),
            vehicles: VehicleRepository::new(app.pool.clone()),
            drivers: DriverRepository::new(app.pool.clone()),
            cache: app.booking_cache.clone(),
        }
    }

    /// Carga inicial: hasta que una recarga se haya aplicado, la vista
    /// dispara la carga de agendamientos del mes visible
    pub async fn ensure_loaded(&self) -> Result<(), AppError> {
        if self.app.reload_applied.load(Ordering::SeqCst) == 0 {
            self.reload().await?;
        }
        Ok(())
    }

    /// Vista actual: grilla del mes + detalle del día seleccionado
    pub async fn view(&self) -> AgendaView {
        let state = self.app.agenda.read().await;
        let today = Local::now().date_naive();

        let calendar = calendar::build_month_grid(
            state.year,
            state.month,
            &state.bookings,
            state.selected_day,
            today,
        );

        AgendaView {
            calendar,
            selected_day: state
                .selected_day
                .map(|d| d.format("%Y-%m-%d").to_string()),
            form_open: state.form_open,
            day_bookings: day_detail(&state),
            degraded: state.degraded,
        }
    }

    /// Transición select-day: fija la selección y recarga el alcance
    pub async fn select_day(&self, date: &str) -> Result<AgendaView, AppError> {
        let date = crate::utils::validation::validate_date(date)
            .map_err(|_| AppError::BadRequest("Fecha inválida, usa YYYY-MM-DD".to_string()))?;

        {
            let mut state = self.app.agenda.write().await;
            state.selected_day = Some(date);
            // Seleccionar un día fuera del mes visible lo trae a la vista
            state.year = date.year();
            state.month = date.month();
        }

        self.reload().await?;
        Ok(self.view().await)
    }

    /// Transición navigate-month: la selección no cambia, solo el mes visible
    pub async fn navigate(&self, direction: &str) -> Result<AgendaView, AppError> {
        let direction = MonthDirection::parse(direction).ok_or_else(|| {
            AppError::BadRequest("Dirección inválida, usa \"prev\" o \"next\"".to_string())
        })?;

        {
            let mut state = self.app.agenda.write().await;
            let (year, month) = calendar::shift_month(state.year, state.month, direction);
            state.year = year;
            state.month = month;
        }

        self.reload().await?;
        Ok(self.view().await)
    }

    /// Transición open-form. Sin día seleccionado (y sin edición) la
    /// apertura se bloquea con un aviso. Al editar, el registro se
    /// precarga completo; si ya no existe, la vista se refresca para
    /// soltar la entrada obsoleta.
    pub async fn open_form(&self, booking_id: Option<Uuid>) -> Result<FormPrefill, AppError> {
        let booking = match booking_id {
            Some(id) => match self.bookings.find_by_id(id).await? {
                Some(booking) => Some(booking),
                None => {
                    self.reload().await.ok();
                    return Err(AppError::NotFound(
                        "El agendamiento ya no existe".to_string(),
                    ));
                }
            },
            None => None,
        };

        let default_date = {
            let state = self.app.agenda.read().await;
            if booking.is_none() && state.selected_day.is_none() {
                return Err(AppError::BadRequest(
                    "Selecciona un día del calendario antes de crear un agendamiento".to_string(),
                ));
            }
            state.selected_day
        };

        // Solo vehículos y conductores disponibles entran al selector
        let (vehicles, drivers) = try_join!(
            self.vehicles.list(Some("available")),
            self.drivers.list(Some("available")),
        )?;

        {
            let mut state = self.app.agenda.write().await;
            state.form_open = true;
        }

        Ok(FormPrefill {
            date: booking
                .as_ref()
                .map(|b| b.date)
                .or(default_date)
                .map(|d| d.format("%Y-%m-%d").to_string()),
            booking: booking.map(BookingResponse::from),
            vehicles: vehicles.into_iter().map(Into::into).collect(),
            drivers: drivers.into_iter().map(Into::into).collect(),
        })
    }

    /// Transición form-closed sin guardar: recarga el día activo
    pub async fn close_form(&self) -> Result<AgendaView, AppError> {
        {
            let mut state = self.app.agenda.write().await;
            state.form_open = false;
        }

        self.reload().await?;
        Ok(self.view().await)
    }

    /// Transición form-saved: valida, persiste (crear o reemplazo
    /// completo), cierra el formulario y recarga. Si la validación falla
    /// no se emite ninguna llamada al gateway.
    pub async fn save_form(
        &self,
        request: SaveBookingRequest,
    ) -> Result<BookingResponse, AppError> {
        let booking = NewBooking::new(
            &request.date,
            &request.departure_time,
            &request.return_time,
            &request.departure_address,
            &request.return_address,
            &request.vehicle_id,
            &request.driver_id,
            &request.passengers,
        )?;

        let saved = match request.id {
            Some(id) => self.bookings.replace(id, &booking).await?,
            None => self.bookings.create(&booking).await?,
        };

        {
            let mut state = self.app.agenda.write().await;
            state.form_open = false;
        }

        self.reload().await?;
        Ok(BookingResponse::from(saved))
    }

    /// Eliminar un agendamiento y recargar. La confirmación interactiva
    /// ya fue verificada en la ruta.
    pub async fn delete_booking(&self, id: Uuid) -> Result<(), AppError> {
        let result = self.bookings.delete(id).await;

        // También tras not-found: la recarga suelta la entrada obsoleta
        self.reload().await.ok();
        result
    }

    /// Recargar en su totalidad los agendamientos del mes visible.
    /// Con la base de datos caída, cae al espejo offline (último
    /// escritor gana, sin resolución de conflictos).
    pub async fn reload(&self) -> Result<(), AppError> {
        let token = self.app.reload_issued.fetch_add(1, Ordering::SeqCst) + 1;

        let (year, month) = {
            let state = self.app.agenda.read().await;
            (state.year, state.month)
        };

        let from = calendar::month_start(year, month);
        let to = calendar::next_month_start(year, month);

        let (bookings, degraded) = match self.bookings.list_between(from, to).await {
            Ok(bookings) => {
                if let Err(e) = self.cache.store_month(year, month, &bookings).await {
                    warn!("⚠️ No se pudo espejar agendamientos en cache: {}", e);
                }
                (bookings, false)
            }
            Err(db_error) => {
                warn!("⚠️ Base de datos no disponible, intentando espejo offline: {}", db_error);
                match self.cache.load_month(year, month).await {
                    Some(bookings) => (bookings, true),
                    None => return Err(db_error),
                }
            }
        };

        let mut state = self.app.agenda.write().await;
        if !apply_reload(&mut state, &self.app.reload_applied, token, bookings, degraded) {
            debug!(
                "Recarga {} descartada (aplicada: {})",
                token,
                self.app.reload_applied.load(Ordering::SeqCst)
            );
        }
        Ok(())
    }
}

/// Aplicar el resultado de una recarga solo si ninguna más nueva se
/// aplicó antes. Retorna false cuando el resultado se descarta.
fn apply_reload(
    state: &mut AgendaState,
    applied: &AtomicU64,
    token: u64,
    bookings: Vec<Booking>,
    degraded: bool,
) -> bool {
    if token <= applied.load(Ordering::SeqCst) {
        return false;
    }
    state.bookings = bookings;
    state.degraded = degraded;
    applied.store(token, Ordering::SeqCst);
    true
}

/// Detalle del día seleccionado, ordenado por horario de salida
/// ascendente con empates por orden de identificador
fn day_detail(state: &AgendaState) -> Vec<BookingResponse> {
    let Some(day) = state.selected_day else {
        return Vec::new();
    };

    let mut day_bookings: Vec<Booking> = state
        .bookings
        .iter()
        .filter(|b| b.date == day)
        .cloned()
        .collect();
    day_bookings.sort_by(|a, b| {
        a.departure_time
            .cmp(&b.departure_time)
            .then(a.id.cmp(&b.id))
    });

    day_bookings.into_iter().map(BookingResponse::from).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, NaiveTime, Utc};
    use sqlx::types::Json;

    fn booking(date: &str, departure: (u32, u32), id_byte: u8) -> Booking {
        Booking {
            id: Uuid::from_bytes([id_byte; 16]),
            date: NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
            departure_time: NaiveTime::from_hms_opt(departure.0, departure.1, 0).unwrap(),
            return_time: NaiveTime::from_hms_opt(23, 0, 0).unwrap(),
            departure_address: "Av. Paulista, 1000".to_string(),
            return_address: "Rua das Flores, 25".to_string(),
            vehicle_id: Uuid::new_v4(),
            driver_id: Uuid::new_v4(),
            passengers: Json(vec!["María Silva".to_string()]),
            created_at: DateTime::<Utc>::MIN_UTC,
        }
    }

    #[test]
    fn test_day_detail_sorts_by_departure_then_id() {
        let state = AgendaState {
            year: 2024,
            month: 3,
            selected_day: Some(NaiveDate::from_ymd_opt(2024, 3, 15).unwrap()),
            bookings: vec![
                booking("2024-03-15", (14, 0), 3),
                booking("2024-03-15", (8, 0), 2),
                booking("2024-03-15", (8, 0), 1),
                booking("2024-03-16", (6, 0), 4),
            ],
            form_open: false,
            degraded: false,
        };

        let detail = day_detail(&state);
        assert_eq!(detail.len(), 3);
        assert_eq!(detail[0].departure_time, "08:00");
        assert_eq!(detail[0].id, Uuid::from_bytes([1; 16]));
        assert_eq!(detail[1].id, Uuid::from_bytes([2; 16]));
        assert_eq!(detail[2].departure_time, "14:00");
    }

    #[test]
    fn test_stale_reload_result_is_discarded() {
        let mut state = AgendaState::default();
        let applied = AtomicU64::new(0);

        assert!(apply_reload(
            &mut state,
            &applied,
            2,
            vec![booking("2024-03-15", (8, 0), 1)],
            false,
        ));
        assert_eq!(state.bookings.len(), 1);

        // Recarga emitida antes pero terminada después: se descarta
        assert!(!apply_reload(&mut state, &applied, 1, vec![], false));
        assert_eq!(state.bookings.len(), 1);
        assert_eq!(applied.load(Ordering::SeqCst), 2);

        // Una recarga más nueva sí reemplaza el estado
        assert!(apply_reload(&mut state, &applied, 3, vec![], true));
        assert!(state.bookings.is_empty());
        assert!(state.degraded);
        assert_eq!(applied.load(Ordering::SeqCst), 3);
    }

    #[test]
    fn test_day_detail_empty_without_selection() {
        let state = AgendaState {
            bookings: vec![booking("2024-03-15", (8, 0), 1)],
            ..AgendaState::default()
        };
        assert!(day_detail(&state).is_empty());
    }
}
