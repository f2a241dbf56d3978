//! Tests de integración sobre la superficie de validación y la grilla,
//! sin Postgres ni Redis en vivo: los handlers de prueba ejercitan los
//! mismos tipos validados y el mismo mapeo de errores que las rutas
//! reales.

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    routing::{delete, post},
    Json, Router,
};
use chrono::{DateTime, NaiveDate, Utc};
use http_body_util::BodyExt;
use serde_json::json;
use sqlx::types::Json as SqlJson;
use tower::ServiceExt;
use uuid::Uuid;

use fleet_agenda::dto::booking_dto::{BookingResponse, DeleteParams, SaveBookingRequest};
use fleet_agenda::models::booking::{Booking, NewBooking};
use fleet_agenda::routes::require_confirmation;
use fleet_agenda::services::calendar::{build_month_grid, GRID_CELLS};
use fleet_agenda::utils::errors::AppError;

const VEHICLE_ID: &str = "550e8400-e29b-41d4-a716-446655440000";
const DRIVER_ID: &str = "550e8400-e29b-41d4-a716-446655440001";

/// Handler de prueba: valida como el coordinador y, si pasa, arma el
/// registro persistido como lo haría el repositorio
async fn validate_and_echo(
    Json(request): Json<SaveBookingRequest>,
) -> Result<Json<BookingResponse>, AppError> {
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

    let persisted = Booking {
        id: Uuid::new_v4(),
        date: booking.date,
        departure_time: booking.departure_time,
        return_time: booking.return_time,
        departure_address: booking.departure_address,
        return_address: booking.return_address,
        vehicle_id: booking.vehicle_id,
        driver_id: booking.driver_id,
        passengers: SqlJson(booking.passengers),
        created_at: Utc::now(),
    };

    Ok(Json(BookingResponse::from(persisted)))
}

async fn delete_with_confirmation(
    axum::extract::Query(params): axum::extract::Query<DeleteParams>,
) -> Result<Json<serde_json::Value>, AppError> {
    require_confirmation(params.confirm)?;
    Ok(Json(json!({ "success": true })))
}

async fn missing_booking() -> Result<Json<serde_json::Value>, AppError> {
    Err(AppError::NotFound("Agendamiento no encontrado".to_string()))
}

fn test_app() -> Router {
    Router::new()
        .route("/booking", post(validate_and_echo))
        .route("/booking/:id", delete(delete_with_confirmation))
        .route("/missing", post(missing_booking))
}

async fn send_json(app: Router, method: Method, uri: &str, body: serde_json::Value) -> (StatusCode, serde_json::Value) {
    let response = app
        .oneshot(
            Request::builder()
                .method(method)
                .uri(uri)
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let value = if bytes.is_empty() {
        serde_json::Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

fn valid_request() -> serde_json::Value {
    json!({
        "date": "2024-03-15",
        "departureTime": "08:00:30",
        "returnTime": "17:30",
        "departureAddress": "  Av. Paulista, 1000  ",
        "returnAddress": "<b>Rua das Flores, 25</b>",
        "vehicleId": VEHICLE_ID,
        "driverId": DRIVER_ID,
        "passengers": ["María Silva", "Carlos Pereira"]
    })
}

#[tokio::test]
async fn test_valid_booking_round_trip_is_normalized() {
    let (status, body) = send_json(test_app(), Method::POST, "/booking", valid_request()).await;

    assert_eq!(status, StatusCode::OK);
    // Horarios truncados a HH:MM, direcciones saneadas
    assert_eq!(body["departureTime"], "08:00");
    assert_eq!(body["returnTime"], "17:30");
    assert_eq!(body["departureAddress"], "Av. Paulista, 1000");
    assert_eq!(body["returnAddress"], "Rua das Flores, 25");
    assert_eq!(body["date"], "2024-03-15");
    assert_eq!(body["passengers"], json!(["María Silva", "Carlos Pereira"]));
}

#[tokio::test]
async fn test_return_before_departure_rejected_before_persistence() {
    // Escenario: día seleccionado 2024-03-15 prellenado, salida 08:00,
    // retorno 07:00
    let mut request = valid_request();
    request["departureTime"] = json!("08:00");
    request["returnTime"] = json!("07:00");

    let (status, body) = send_json(test_app(), Method::POST, "/booking", request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_ERROR");
    assert!(body["details"]["returnTime"].is_array());
}

#[tokio::test]
async fn test_empty_vehicle_selection_blocked_by_required_validation() {
    // Sin vehículos disponibles el selector queda en el placeholder y el
    // submit llega con la referencia vacía
    let mut request = valid_request();
    request["vehicleId"] = json!("");

    let (status, body) = send_json(test_app(), Method::POST, "/booking", request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["details"]["vehicleId"].is_array());
}

#[tokio::test]
async fn test_address_too_short_rejected() {
    let mut request = valid_request();
    request["departureAddress"] = json!("Rua");

    let (status, body) = send_json(test_app(), Method::POST, "/booking", request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["details"]["departureAddress"].is_array());
}

#[tokio::test]
async fn test_delete_without_confirmation_is_rejected() {
    let (status, body) = send_json(
        test_app(),
        Method::DELETE,
        "/booking/550e8400-e29b-41d4-a716-446655440000",
        serde_json::Value::Null,
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "BAD_REQUEST");
}

#[tokio::test]
async fn test_delete_with_confirmation_passes_the_guard() {
    let (status, _) = send_json(
        test_app(),
        Method::DELETE,
        "/booking/550e8400-e29b-41d4-a716-446655440000?confirm=true",
        serde_json::Value::Null,
    )
    .await;

    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_not_found_maps_to_404_not_a_crash() {
    let (status, body) = send_json(
        test_app(),
        Method::POST,
        "/missing",
        serde_json::Value::Null,
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "NOT_FOUND");
}

#[test]
fn test_grid_properties_hold_for_every_month() {
    for year in [2023, 2024, 2025] {
        for month in 1..=12 {
            let grid = build_month_grid(year, month, &[], None, any_date());
            assert_eq!(grid.cells.len(), GRID_CELLS);
            assert_eq!(grid.cells.len() % 7, 0);

            let days: Vec<u32> = grid.cells.iter().filter_map(|c| c.day).collect();
            let expected: Vec<u32> =
                (1..=fleet_agenda::services::calendar::days_in_month(year, month)).collect();
            assert_eq!(days, expected, "{}-{}", year, month);
        }
    }
}

#[test]
fn test_badge_counts_match_loaded_bookings() {
    let bookings = vec![
        booking_on("2024-03-15"),
        booking_on("2024-03-15"),
        booking_on("2024-03-15"),
        booking_on("2024-03-01"),
    ];
    let grid = build_month_grid(2024, 3, &bookings, None, any_date());

    for cell in &grid.cells {
        let expected = match cell.day {
            Some(15) => 3,
            Some(1) => 1,
            _ => 0,
        };
        assert_eq!(cell.bookings, expected);
    }
}

fn any_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2020, 1, 1).unwrap()
}

fn booking_on(date: &str) -> Booking {
    Booking {
        id: Uuid::new_v4(),
        date: NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
        departure_time: chrono::NaiveTime::from_hms_opt(8, 0, 0).unwrap(),
        return_time: chrono::NaiveTime::from_hms_opt(17, 0, 0).unwrap(),
        departure_address: "Av. Paulista, 1000".to_string(),
        return_address: "Rua das Flores, 25".to_string(),
        vehicle_id: Uuid::new_v4(),
        driver_id: Uuid::new_v4(),
        passengers: SqlJson(vec!["María Silva".to_string()]),
        created_at: DateTime::<Utc>::MIN_UTC,
    }
}
