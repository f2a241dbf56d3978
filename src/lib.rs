//! Fleet Agenda - agenda de viajes de vehículos compartidos
//!
//! Servicio HTTP que expone el calendario mensual, el formulario de
//! agendamiento y el CRUD de vehículos y conductores sobre PostgreSQL,
//! con un espejo offline de agendamientos en Redis.

pub mod cache;
pub mod config;
pub mod controllers;
pub mod database;
pub mod dto;
pub mod middleware;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod services;
pub mod state;
pub mod utils;
