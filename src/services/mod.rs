//! Services module
//!
//! Este módulo contiene la lógica de negocio: la grilla del calendario
//! y el coordinador de la agenda (view state + recargas).

pub mod agenda;
pub mod calendar;
