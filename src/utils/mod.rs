//! Utilidades
//!
//! Helpers de errores, validación y sanitización compartidos.

pub mod errors;
pub mod validation;
