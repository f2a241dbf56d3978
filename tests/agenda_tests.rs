//! Tests del coordinador de la agenda sin servicios externos en vivo:
//! pool de Postgres perezoso (nunca conecta hasta la primera consulta) y
//! espejo offline deshabilitado.

use std::sync::atomic::Ordering;
use std::time::Duration;

use sqlx::postgres::PgPoolOptions;

use fleet_agenda::cache::booking_cache::BookingCache;
use fleet_agenda::config::environment::EnvironmentConfig;
use fleet_agenda::services::agenda::AgendaService;
use fleet_agenda::state::AppState;
use fleet_agenda::utils::errors::AppError;

fn lazy_state() -> AppState {
    let pool = PgPoolOptions::new()
        .acquire_timeout(Duration::from_millis(200))
        .connect_lazy("postgres://localhost:1/fleet_agenda_test")
        .unwrap();

    AppState::with_cache(pool, EnvironmentConfig::from_env(), BookingCache::disabled())
}

#[tokio::test]
async fn test_first_view_reaches_the_gateway() {
    let state = lazy_state();
    let service = AgendaService::new(&state);

    // Sesión nueva: la carga inicial debe llegar al gateway. Sin base de
    // datos alcanzable eso se reporta como error, en vez de renderizar
    // un calendario vacío como si no hubiera agendamientos.
    let err = service.ensure_loaded().await.unwrap_err();
    assert!(matches!(err, AppError::Database(_)));
}

#[tokio::test]
async fn test_view_skips_reload_once_applied() {
    let state = lazy_state();
    state.reload_applied.store(1, Ordering::SeqCst);

    let service = AgendaService::new(&state);
    assert!(service.ensure_loaded().await.is_ok());
}

#[tokio::test]
async fn test_open_form_without_selection_is_blocked() {
    let state = lazy_state();
    let service = AgendaService::new(&state);

    // Crear sin día seleccionado se bloquea con un aviso, antes de
    // cualquier consulta al gateway
    let err = service.open_form(None).await.unwrap_err();
    assert!(matches!(err, AppError::BadRequest(_)));
}
