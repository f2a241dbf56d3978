//! Shared application state
//!
//! Este módulo define el estado compartido de la aplicación que se pasa
//! a través del router de Axum. El coordinador de la agenda es dueño
//! exclusivo del view state en memoria.

use sqlx::PgPool;
use std::sync::atomic::AtomicU64;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::cache::booking_cache::BookingCache;
use crate::cache::redis_client::RedisClient;
use crate::config::environment::EnvironmentConfig;
use crate::services::agenda::AgendaState;

#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub config: EnvironmentConfig,
    pub booking_cache: BookingCache,
    /// View state del coordinador: mes visible, día seleccionado,
    /// agendamientos cargados y estado del formulario.
    pub agenda: Arc<RwLock<AgendaState>>,
    /// Secuenciación de recargas: una recarga solo se aplica si ninguna
    /// más nueva se aplicó antes.
    pub reload_issued: Arc<AtomicU64>,
    pub reload_applied: Arc<AtomicU64>,
}

impl AppState {
    pub fn new(pool: PgPool, config: EnvironmentConfig, redis: RedisClient) -> Self {
        Self::with_cache(pool, config, BookingCache::new(redis))
    }

    /// Construir el estado con un espejo ya armado (o deshabilitado)
    pub fn with_cache(pool: PgPool, config: EnvironmentConfig, booking_cache: BookingCache) -> Self {
        Self {
            pool,
            config,
            booking_cache,
            agenda: Arc::new(RwLock::new(AgendaState::default())),
            reload_issued: Arc::new(AtomicU64::new(0)),
            reload_applied: Arc::new(AtomicU64::new(0)),
        }
    }
}
