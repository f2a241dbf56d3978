//! Base de datos
//!
//! Este módulo maneja la conexión a PostgreSQL.

pub mod connection;

pub use connection::DatabaseConnection;
