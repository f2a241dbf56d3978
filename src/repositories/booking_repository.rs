use chrono::{NaiveDate, Utc};
use sqlx::types::Json;
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::booking::{Booking, NewBooking};
use crate::utils::errors::AppError;

pub struct BookingRepository {
    pool: PgPool,
}

impl BookingRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, booking: &NewBooking) -> Result<Booking, AppError> {
        let id = Uuid::new_v4();

        let booking = sqlx::query_as::<_, Booking>(
            r#"
            INSERT INTO bookings (id, date, departure_time, return_time, departure_address, return_address, vehicle_id, driver_id, passengers, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(booking.date)
        .bind(booking.departure_time)
        .bind(booking.return_time)
        .bind(&booking.departure_address)
        .bind(&booking.return_address)
        .bind(booking.vehicle_id)
        .bind(booking.driver_id)
        .bind(Json(booking.passengers.clone()))
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(booking)
    }

    /// Reemplazo completo del registro (editar = re-enviar)
    pub async fn replace(&self, id: Uuid, booking: &NewBooking) -> Result<Booking, AppError> {
        let updated = sqlx::query_as::<_, Booking>(
            r#"
            UPDATE bookings
            SET date = $2, departure_time = $3, return_time = $4, departure_address = $5,
                return_address = $6, vehicle_id = $7, driver_id = $8, passengers = $9
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(booking.date)
        .bind(booking.departure_time)
        .bind(booking.return_time)
        .bind(&booking.departure_address)
        .bind(&booking.return_address)
        .bind(booking.vehicle_id)
        .bind(booking.driver_id)
        .bind(Json(booking.passengers.clone()))
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound("Agendamiento no encontrado".to_string()))?;

        Ok(updated)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Booking>, AppError> {
        let booking = sqlx::query_as::<_, Booking>("SELECT * FROM bookings WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(booking)
    }

    pub async fn list_all(&self) -> Result<Vec<Booking>, AppError> {
        let bookings = sqlx::query_as::<_, Booking>(
            "SELECT * FROM bookings ORDER BY date, departure_time, id",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(bookings)
    }

    /// Agendamientos de un día, ordenados por horario de salida
    /// (empates por orden de identificador)
    pub async fn list_by_date(&self, date: NaiveDate) -> Result<Vec<Booking>, AppError> {
        let bookings = sqlx::query_as::<_, Booking>(
            "SELECT * FROM bookings WHERE date = $1 ORDER BY departure_time, id",
        )
        .bind(date)
        .fetch_all(&self.pool)
        .await?;

        Ok(bookings)
    }

    /// Agendamientos en el rango [from, to) - el alcance visible del mes
    pub async fn list_between(
        &self,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<Booking>, AppError> {
        let bookings = sqlx::query_as::<_, Booking>(
            "SELECT * FROM bookings WHERE date >= $1 AND date < $2 ORDER BY date, departure_time, id",
        )
        .bind(from)
        .bind(to)
        .fetch_all(&self.pool)
        .await?;

        Ok(bookings)
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM bookings WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        // Eliminar un id inexistente se reporta como not-found, no como crash
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Agendamiento no encontrado".to_string()));
        }

        Ok(())
    }
}
