//! DTOs de la API
//!
//! Formas de request/response en camelCase (wire format canónico).

pub mod agenda_dto;
pub mod booking_dto;
pub mod common;
pub mod driver_dto;
pub mod vehicle_dto;
