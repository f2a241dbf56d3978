use axum::{
    extract::{Path, Query, State},
    routing::{delete, get, post},
    Json, Router,
};
use uuid::Uuid;

use crate::dto::agenda_dto::{
    AgendaView, FormPrefill, NavigateRequest, OpenFormRequest, SelectDayRequest,
};
use crate::dto::booking_dto::{BookingResponse, DeleteParams, SaveBookingRequest};
use crate::dto::common::ApiResponse;
use crate::routes::require_confirmation;
use crate::services::agenda::AgendaService;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_agenda_router() -> Router<AppState> {
    Router::new()
        .route("/", get(get_view))
        .route("/select-day", post(select_day))
        .route("/navigate", post(navigate))
        .route("/form/open", post(open_form))
        .route("/form/close", post(close_form))
        .route("/form/save", post(save_form))
        .route("/booking/:id", delete(delete_booking))
}

async fn get_view(State(state): State<AppState>) -> Result<Json<AgendaView>, AppError> {
    let service = AgendaService::new(&state);
    service.ensure_loaded().await?;
    Ok(Json(service.view().await))
}

async fn select_day(
    State(state): State<AppState>,
    Json(request): Json<SelectDayRequest>,
) -> Result<Json<AgendaView>, AppError> {
    let service = AgendaService::new(&state);
    let view = service.select_day(&request.date).await?;
    Ok(Json(view))
}

async fn navigate(
    State(state): State<AppState>,
    Json(request): Json<NavigateRequest>,
) -> Result<Json<AgendaView>, AppError> {
    let service = AgendaService::new(&state);
    let view = service.navigate(&request.direction).await?;
    Ok(Json(view))
}

async fn open_form(
    State(state): State<AppState>,
    Json(request): Json<OpenFormRequest>,
) -> Result<Json<FormPrefill>, AppError> {
    let service = AgendaService::new(&state);
    let prefill = service.open_form(request.booking_id).await?;
    Ok(Json(prefill))
}

async fn close_form(State(state): State<AppState>) -> Result<Json<AgendaView>, AppError> {
    let service = AgendaService::new(&state);
    let view = service.close_form().await?;
    Ok(Json(view))
}

async fn save_form(
    State(state): State<AppState>,
    Json(request): Json<SaveBookingRequest>,
) -> Result<Json<ApiResponse<BookingResponse>>, AppError> {
    let service = AgendaService::new(&state);
    let saved = service.save_form(request).await?;
    Ok(Json(ApiResponse::success_with_message(
        saved,
        "Agendamiento guardado exitosamente".to_string(),
    )))
}

async fn delete_booking(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(params): Query<DeleteParams>,
) -> Result<Json<serde_json::Value>, AppError> {
    require_confirmation(params.confirm)?;
    let service = AgendaService::new(&state);
    service.delete_booking(id).await?;
    Ok(Json(serde_json::json!({
        "success": true,
        "message": "Agendamiento eliminado exitosamente"
    })))
}
