//! Controllers
//!
//! Validan la entrada, aplican las reglas de cada entidad y delegan en
//! los repositorios.

pub mod booking_controller;
pub mod driver_controller;
pub mod vehicle_controller;
