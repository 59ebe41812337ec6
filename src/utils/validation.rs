//! Utilidades de validación
//!
//! Este módulo contiene funciones helper para validación de datos
//! y conversión de parámetros de query.

use serde::Serialize;
use validator::ValidationError;

/// Validar que un string no esté vacío (ignorando espacios)
pub fn validate_not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut error = ValidationError::new("blank");
        error.message = Some("This field may not be blank.".into());
        return Err(error);
    }
    Ok(())
}

/// Validar que un valor esté en un rango específico (cerrado)
pub fn validate_range<T: PartialOrd + std::fmt::Display + Serialize>(
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

/// Validar que un f64 sea finito (ni NaN ni infinito)
pub fn validate_finite(value: f64) -> Result<(), ValidationError> {
    if !value.is_finite() {
        let mut error = ValidationError::new("finite");
        error.add_param("value".into(), &value.to_string());
        return Err(error);
    }
    Ok(())
}

/// Validar longitud WGS84: finita y en [-180, 180]
pub fn validate_longitude(value: f64) -> Result<(), ValidationError> {
    validate_finite(value)?;
    validate_range(value, -180.0, 180.0).map_err(|mut error| {
        error.code = "longitude".into();
        error.message = Some("Longitude must be between -180 and 180.".into());
        error
    })
}

/// Validar latitud WGS84: finita y en [-90, 90]
pub fn validate_latitude(value: f64) -> Result<(), ValidationError> {
    validate_finite(value)?;
    validate_range(value, -90.0, 90.0).map_err(|mut error| {
        error.code = "latitude".into();
        error.message = Some("Latitude must be between -90 and 90.".into());
        error
    })
}

/// Validar que un valor sea no negativo
pub fn validate_non_negative<T: PartialOrd + std::fmt::Display + num_traits::Zero + Serialize>(
    value: T,
) -> Result<(), ValidationError> {
    if value < T::zero() {
        let mut error = ValidationError::new("non_negative");
        error.add_param("value".into(), &value);
        return Err(error);
    }
    Ok(())
}

/// Error "campo requerido" con el mismo texto que el resto de la API
pub fn required_field_error() -> ValidationError {
    let mut error = ValidationError::new("required");
    error.message = Some("This field is required.".into());
    error
}

/// Parsear un f64 de query string.
///
/// `None` si el texto no es un número finito.
pub fn parse_finite_f64(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|value| value.is_finite())
}
