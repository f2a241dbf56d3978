//! Repositorios (gateway de persistencia)
//!
//! Traducen operaciones de registro en llamadas SQL. Las lecturas sin
//! resultados retornan colecciones vacías, nunca null; las escrituras
//! retornan el registro persistido con el id asignado por el servidor.

pub mod booking_repository;
pub mod driver_repository;
pub mod vehicle_repository;
