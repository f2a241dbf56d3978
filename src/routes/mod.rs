//! Rutas HTTP
//!
//! Handlers finos de Axum que delegan en controllers y en el coordinador.

pub mod agenda_routes;
pub mod booking_routes;
pub mod driver_routes;
pub mod vehicle_routes;

use crate::utils::errors::AppError;

/// La eliminación requiere confirmación interactiva antes de llamar al
/// gateway: sin `?confirm=true` la operación se rechaza.
pub fn require_confirmation(confirm: bool) -> Result<(), AppError> {
    if !confirm {
        return Err(AppError::BadRequest(
            "Confirma la eliminación con ?confirm=true".to_string(),
        ));
    }
    Ok(())
}
