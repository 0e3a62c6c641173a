//! Utilidades de validación
//!
//! Validadores personalizados para los formularios y conversión tolerante
//! de los valores que llegan como texto.

use chrono::NaiveDate;
use lazy_static::lazy_static;
use regex::Regex;
use validator::ValidationError;

lazy_static! {
    static ref ANIO_RE: Regex = Regex::new(r"^(19|20)\d{2}$").unwrap();
    static ref CEDULA_RE: Regex = Regex::new(r"^[0-9A-Za-z][0-9A-Za-z\-]{3,19}$").unwrap();
}

/// Valores que los formularios usan como "sí"
const YES_VALUES: [&str; 6] = ["si", "sí", "yes", "true", "on", "1"];

/// Validar que un string no esté vacío
pub fn validate_not_empty(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut error = ValidationError::new("not_empty");
        error.add_param("value".into(), &value.to_string());
        return Err(error);
    }
    Ok(())
}

/// Cédula: alfanumérica con guiones, 4 a 20 caracteres
pub fn validate_cedula(value: &str) -> Result<(), ValidationError> {
    if !CEDULA_RE.is_match(value.trim()) {
        let mut error = ValidationError::new("cedula");
        error.add_param("value".into(), &value.to_string());
        return Err(error);
    }
    Ok(())
}

/// Año del vehículo en formato de cuatro dígitos
pub fn validate_anio(value: &str) -> Result<(), ValidationError> {
    if !ANIO_RE.is_match(value.trim()) {
        let mut error = ValidationError::new("anio");
        error.add_param("value".into(), &value.to_string());
        error.add_param("format".into(), &"YYYY".to_string());
        return Err(error);
    }
    Ok(())
}

/// Validar y convertir string a fecha
pub fn validate_date(value: &str) -> Result<NaiveDate, ValidationError> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").map_err(|_| {
        let mut error = ValidationError::new("date");
        error.add_param("value".into(), &value.to_string());
        error.add_param("format".into(), &"YYYY-MM-DD".to_string());
        error
    })
}

/// Fecha opcional de formulario: vacía o mal formada se ignora
pub fn parse_optional_date(value: Option<&str>) -> Option<NaiveDate> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .and_then(|v| validate_date(v).ok())
}

/// Interpreta una casilla o selector Si/No
pub fn parse_flag(value: Option<&str>) -> bool {
    value
        .map(|v| v.trim().to_lowercase())
        .map(|v| YES_VALUES.contains(&v.as_str()))
        .unwrap_or(false)
}

/// Recorta y descarta los campos vacíos
pub fn clean(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_flag_accepts_yes_values() {
        for v in ["Si", "Sí", "SI", "yes", "true", "on", "1", " si "] {
            assert!(parse_flag(Some(v)), "{v} debería ser verdadero");
        }
        for v in ["No", "no", "", "0", "false"] {
            assert!(!parse_flag(Some(v)), "{v} debería ser falso");
        }
        assert!(!parse_flag(None));
    }

    #[test]
    fn test_validate_anio() {
        assert!(validate_anio("2019").is_ok());
        assert!(validate_anio("1998").is_ok());
        assert!(validate_anio("19").is_err());
        assert!(validate_anio("dos mil").is_err());
    }

    #[test]
    fn test_validate_cedula() {
        assert!(validate_cedula("1-2345-6789").is_ok());
        assert!(validate_cedula("A123456").is_ok());
        assert!(validate_cedula("12").is_err());
        assert!(validate_cedula("-12345").is_err());
    }

    #[test]
    fn test_parse_optional_date_is_lenient() {
        assert_eq!(
            parse_optional_date(Some("1990-05-17")),
            NaiveDate::from_ymd_opt(1990, 5, 17)
        );
        assert_eq!(parse_optional_date(Some("17/05/1990")), None);
        assert_eq!(parse_optional_date(Some("  ")), None);
        assert_eq!(parse_optional_date(None), None);
    }

    #[test]
    fn test_clean_trims_and_drops_empty() {
        assert_eq!(clean(Some("  Ana ")), Some("Ana".to_string()));
        assert_eq!(clean(Some("   ")), None);
        assert_eq!(clean(None), None);
    }

    #[test]
    fn test_validate_not_empty() {
        assert!(validate_not_empty("x").is_ok());
        assert!(validate_not_empty("  ").is_err());
    }
}
