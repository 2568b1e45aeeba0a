//! Utilidades de validación
//!
//! Validadores custom usados por los derives de `validator` en los modelos
//! y helpers de conversión de tipos para valores capturados en formularios.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use validator::ValidationError;

/// Mensaje mostrado cuando el nombre del alat viene vacío
pub const EMPTY_NAME_MESSAGE: &str = "Nama alat tidak boleh kosong";

/// Mensaje mostrado cuando el costo de un servicio es negativo
pub const NEGATIVE_COST_MESSAGE: &str = "Biaya servis tidak boleh negatif";

/// Validar que un string no esté vacío
pub fn validate_not_empty(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut error = ValidationError::new("not_empty");
        error.message = Some(EMPTY_NAME_MESSAGE.into());
        error.add_param("value".into(), &value.to_string());
        return Err(error);
    }
    Ok(())
}

/// Validar que un costo no sea negativo
pub fn validate_non_negative(value: &Decimal) -> Result<(), ValidationError> {
    if value.is_sign_negative() && !value.is_zero() {
        let mut error = ValidationError::new("non_negative");
        error.message = Some(NEGATIVE_COST_MESSAGE.into());
        error.add_param("actual".into(), &value.to_string());
        return Err(error);
    }
    Ok(())
}

/// Validación del formulario de alat: lista de mensajes, vacía si es válido
pub fn validate_tool_name(name: &str) -> Vec<String> {
    let mut errors = Vec::new();
    if validate_not_empty(name).is_err() {
        errors.push(EMPTY_NAME_MESSAGE.to_string());
    }
    errors
}

/// Validar y convertir string a fecha
pub fn validate_date(value: &str) -> Result<NaiveDate, ValidationError> {
    parse_calendar_date(value).ok_or_else(|| {
        let mut error = ValidationError::new("date");
        error.add_param("value".into(), &value.to_string());
        error.add_param("format".into(), &"YYYY-MM-DD".to_string());
        error
    })
}

/// Keterangan vacío o sólo con espacios se guarda como ausente; el resto se
/// conserva tal cual, espacios incluidos
pub fn normalize_notes(notes: Option<String>) -> Option<String> {
    notes.filter(|text| !text.trim().is_empty())
}

/// Interpretar una fecha de calendario; acepta también `YYYY-MM-DD HH:MM:SS`
/// y quita la parte de hora
pub fn parse_calendar_date(value: &str) -> Option<NaiveDate> {
    let trimmed = value.trim();
    let date_part = trimmed
        .split(|c: char| c == ' ' || c == 'T')
        .next()
        .unwrap_or(trimmed);
    NaiveDate::parse_from_str(date_part, "%Y-%m-%d").ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_not_empty() {
        assert!(validate_not_empty("Kunci Pas 10mm").is_ok());
        assert!(validate_not_empty("").is_err());
        assert!(validate_not_empty("   \t").is_err());
    }

    #[test]
    fn test_validate_non_negative() {
        assert!(validate_non_negative(&Decimal::new(50000, 0)).is_ok());
        assert!(validate_non_negative(&Decimal::ZERO).is_ok());
        assert!(validate_non_negative(&Decimal::new(-1, 0)).is_err());
    }

    #[test]
    fn test_validate_tool_name_messages() {
        assert!(validate_tool_name("Obeng").is_empty());
        assert_eq!(validate_tool_name("  "), vec![EMPTY_NAME_MESSAGE.to_string()]);
    }

    #[test]
    fn test_parse_calendar_date() {
        let expected = NaiveDate::from_ymd_opt(2024, 3, 15);
        assert_eq!(parse_calendar_date("2024-03-15"), expected);
        assert_eq!(parse_calendar_date("2024-03-15 00:00:00"), expected);
        assert_eq!(parse_calendar_date("2024-03-15T08:30:00"), expected);
        assert_eq!(parse_calendar_date("15/03/2024"), None);
        assert!(validate_date("bukan tanggal").is_err());
    }

    #[test]
    fn test_normalize_notes() {
        assert_eq!(normalize_notes(None), None);
        assert_eq!(normalize_notes(Some(String::new())), None);
        assert_eq!(normalize_notes(Some("  \t".to_string())), None);
        assert_eq!(
            normalize_notes(Some("  sisi kiri  ".to_string())).as_deref(),
            Some("  sisi kiri  ")
        );
    }
}
