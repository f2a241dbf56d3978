//! Middleware
//!
//! Este módulo contiene los middleware HTTP de la aplicación.

pub mod cors;
