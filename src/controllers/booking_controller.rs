use sqlx::PgPool;
use uuid::Uuid;

use crate::dto::booking_dto::{BookingFilters, BookingResponse, SaveBookingRequest};
use crate::dto::common::ApiResponse;
use crate::models::booking::NewBooking;
use crate::repositories::booking_repository::BookingRepository;
use crate::utils::errors::AppError;
use crate::utils::validation::validate_date;

pub struct BookingController {
    repository: BookingRepository,
}

impl BookingController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: BookingRepository::new(pool),
        }
    }

    pub async fn create(
        &self,
        request: SaveBookingRequest,
    ) -> Result<ApiResponse<BookingResponse>, AppError> {
        // La validación bloquea antes de cualquier llamada de persistencia
        let booking = build_booking(&request)?;
        let saved = self.repository.create(&booking).await?;

        Ok(ApiResponse::success_with_message(
            BookingResponse::from(saved),
            "Agendamiento creado exitosamente".to_string(),
        ))
    }

    pub async fn replace(
        &self,
        id: Uuid,
        request: SaveBookingRequest,
    ) -> Result<ApiResponse<BookingResponse>, AppError> {
        let booking = build_booking(&request)?;
        let saved = self.repository.replace(id, &booking).await?;

        Ok(ApiResponse::success_with_message(
            BookingResponse::from(saved),
            "Agendamiento actualizado exitosamente".to_string(),
        ))
    }

    pub async fn get_by_id(&self, id: Uuid) -> Result<BookingResponse, AppError> {
        let booking = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Agendamiento no encontrado".to_string()))?;

        Ok(BookingResponse::from(booking))
    }

    pub async fn list(&self, filters: BookingFilters) -> Result<Vec<BookingResponse>, AppError> {
        let bookings = match filters.date {
            Some(ref date) => {
                let date = validate_date(date).map_err(|_| {
                    AppError::BadRequest("Fecha inválida, usa YYYY-MM-DD".to_string())
                })?;
                self.repository.list_by_date(date).await?
            }
            None => self.repository.list_all().await?,
        };

        Ok(bookings.into_iter().map(Into::into).collect())
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        self.repository.delete(id).await
    }
}

fn build_booking(request: &SaveBookingRequest) -> Result<NewBooking, AppError> {
    NewBooking::new(
        &request.date,
        &request.departure_time,
        &request.return_time,
        &request.departure_address,
        &request.return_address,
        &request.vehicle_id,
        &request.driver_id,
        &request.passengers,
    )
    .map_err(AppError::Validation)
}
