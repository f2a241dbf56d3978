//! Espejo offline de agendamientos
//!
//! Después de cada recarga exitosa, los agendamientos del mes visible se
//! espejan como un blob JSON por mes. Con la base de datos caída, el
//! coordinador sirve el espejo en modo degradado.

use anyhow::Result;
use log::info;

use crate::cache::redis_client::RedisClient;
use crate::cache::CacheOperations;
use crate::models::booking::Booking;

#[derive(Clone)]
pub struct BookingCache {
    client: Option<RedisClient>,
}

impl BookingCache {
    pub fn new(client: RedisClient) -> Self {
        Self {
            client: Some(client),
        }
    }

    /// Espejo deshabilitado: escrituras no-op, lecturas siempre vacías
    pub fn disabled() -> Self {
        Self { client: None }
    }

    /// Espejar los agendamientos de un mes. Último escritor gana.
    pub async fn store_month(
        &self,
        year: i32,
        month: u32,
        bookings: &[Booking],
    ) -> Result<()> {
        let Some(client) = &self.client else {
            return Ok(());
        };
        let key = client.bookings_key(year, month);
        client.set_persistent(&key, &bookings.to_vec()).await
    }

    /// Leer el espejo de un mes, si existe
    pub async fn load_month(&self, year: i32, month: u32) -> Option<Vec<Booking>> {
        let client = self.client.as_ref()?;
        let key = client.bookings_key(year, month);
        match client.get::<Vec<Booking>>(&key).await {
            Ok(Some(bookings)) => {
                info!(
                    "📥 Sirviendo {} agendamientos desde el espejo offline ({})",
                    bookings.len(),
                    key
                );
                Some(bookings)
            }
            _ => None,
        }
    }

    /// Descartar el espejo de un mes
    pub async fn invalidate_month(&self, year: i32, month: u32) -> Result<()> {
        let Some(client) = &self.client else {
            return Ok(());
        };
        let key = client.bookings_key(year, month);
        client.delete(&key).await
    }
}
