//! Utilidades de validación y sanitización
//!
//! Este módulo contiene funciones helper para validación de datos,
//! normalización de horarios y sanitización de texto libre.

use chrono::{NaiveDate, NaiveTime};
use lazy_static::lazy_static;
use regex::Regex;
use validator::ValidationError;

lazy_static! {
    /// Tags HTML a remover del texto libre
    static ref HTML_TAG_RE: Regex = Regex::new(r"<[^>]*>").unwrap();
    /// Placa Mercosur: ABC1234 o ABC1D23
    static ref PLATE_RE: Regex = Regex::new(r"^[A-Z]{3}[0-9][A-Z0-9][0-9]{2}$").unwrap();
}

/// Sanitizar texto libre: trim, remover tags HTML y limitar a 255 caracteres
pub fn sanitize_string(value: &str) -> String {
    let trimmed = value.trim();
    let without_tags = HTML_TAG_RE.replace_all(trimmed, "");
    without_tags.chars().take(255).collect()
}

/// Validar y convertir string a fecha (YYYY-MM-DD)
pub fn validate_date(value: &str) -> Result<NaiveDate, ValidationError> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|_| {
        let mut error = ValidationError::new("date");
        error.add_param("value".into(), &value.to_string());
        error.add_param("format".into(), &"YYYY-MM-DD".to_string());
        error
    })
}

/// Validar y convertir string a horario con precisión de minutos.
/// Acepta HH:MM y HH:MM:SS; los segundos se truncan.
pub fn validate_time(value: &str) -> Result<NaiveTime, ValidationError> {
    let parsed = NaiveTime::parse_from_str(value, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(value, "%H:%M:%S"));

    match parsed {
        Ok(time) => Ok(truncate_to_minutes(time)),
        Err(_) => {
            let mut error = ValidationError::new("time");
            error.add_param("value".into(), &value.to_string());
            error.add_param("format".into(), &"HH:MM".to_string());
            Err(error)
        }
    }
}

/// Truncar un horario a precisión de minutos
pub fn truncate_to_minutes(time: NaiveTime) -> NaiveTime {
    use chrono::Timelike;
    NaiveTime::from_hms_opt(time.hour(), time.minute(), 0).unwrap_or(time)
}

/// Formatear un horario como HH:MM para el wire format
pub fn format_time(time: NaiveTime) -> String {
    time.format("%H:%M").to_string()
}

/// Validar formato de placa Mercosur (sobre el valor ya en mayúsculas)
pub fn validate_plate(value: &str) -> Result<(), ValidationError> {
    if !PLATE_RE.is_match(value) {
        let mut error = ValidationError::new("plate");
        error.add_param("value".into(), &value.to_string());
        error.add_param("format".into(), &"ABC1234 o ABC1D23".to_string());
        return Err(error);
    }
    Ok(())
}

/// Quedarse solo con los dígitos de un valor (CNH, teléfono)
pub fn digits_only(value: &str) -> String {
    value.chars().filter(|c| c.is_ascii_digit()).collect()
}

/// Validar que un valor tenga exactamente `expected` dígitos tras normalizar
pub fn validate_digits(value: &str, expected: usize) -> Result<String, ValidationError> {
    let digits = digits_only(value);
    if digits.len() != expected {
        let mut error = ValidationError::new("digits");
        error.add_param("value".into(), &value.to_string());
        error.add_param("expected".into(), &expected);
        return Err(error);
    }
    Ok(digits)
}

/// Formatear CNH de 11 dígitos para exhibición: 123.456.789-01
pub fn format_license(license: &str) -> String {
    if license.len() != 11 || !license.chars().all(|c| c.is_ascii_digit()) {
        return license.to_string();
    }
    format!(
        "{}.{}.{}-{}",
        &license[0..3],
        &license[3..6],
        &license[6..9],
        &license[9..11]
    )
}

/// Validar longitud mínima y máxima en caracteres
pub fn validate_length(value: &str, min: usize, max: usize) -> Result<(), ValidationError> {
    let len = value.chars().count();
    if len < min || len > max {
        let mut error = ValidationError::new("length");
        error.add_param("min".into(), &min);
        error.add_param("max".into(), &max);
        error.add_param("actual".into(), &len);
        return Err(error);
    }
    Ok(())
}

/// Validar que un valor esté en un rango específico
pub fn validate_range<T: PartialOrd + serde::Serialize>(
    value: T,
    min: T,
    max: T,
) -> Result<(), ValidationError> {
    if value < min || value > max {
        let mut error = ValidationError::new("range");
        error.add_param("min".into(), &min);
        error.add_param("max".into(), &max);
        error.add_param("actual".into(), &value);
        return Err(error);
    }
    Ok(())
}
