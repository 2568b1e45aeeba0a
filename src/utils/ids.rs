//! Generación de IDs secuenciales
//!
//! Los IDs se derivan del ID de la última fila en el momento de escribir
//! (`ALT07` -> `ALT08`). No hay contador persistido: los huecos dejados por
//! borrados no se reutilizan y se asume un único escritor.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// Prefijo de 3 caracteres seguido del número de secuencia
    static ref SEQUENTIAL_ID_REGEX: Regex =
        Regex::new(r"^.{3}(\d+)$").expect("sequential id regex must compile");
}

/// Esquema de IDs de una colección: prefijo y ancho del número
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IdScheme {
    pub prefix: &'static str,
    pub width: usize,
}

/// IDs de alat: `ALT01`, `ALT02`, ...
pub const TOOL_ID_SCHEME: IdScheme = IdScheme {
    prefix: "ALT",
    width: 2,
};

/// IDs de servicio: `SRV001`, `SRV002`, ...
pub const SERVICE_ID_SCHEME: IdScheme = IdScheme {
    prefix: "SRV",
    width: 3,
};

impl IdScheme {
    /// Formatear un número de secuencia con el prefijo y el padding del esquema
    pub fn format(&self, sequence: u64) -> String {
        format!("{}{:0width$}", self.prefix, sequence, width = self.width)
    }

    /// Siguiente ID dado el último ID almacenado y el tamaño de la colección.
    ///
    /// Si el último ID no tiene sufijo numérico se usa `count + 1`, que no
    /// garantiza unicidad.
    pub fn next_id(&self, last_id: Option<&str>, count: usize) -> String {
        let Some(last_id) = last_id else {
            return self.format(1);
        };

        match parse_sequence(last_id) {
            Some(sequence) => self.format(sequence.saturating_add(1)),
            None => {
                tracing::warn!(
                    "⚠️ ID '{}' no sigue el formato {}NN, usando conteo de filas",
                    last_id,
                    self.prefix
                );
                self.format(count as u64 + 1)
            }
        }
    }
}

/// Número de secuencia de un ID (`ALT07` -> 7)
pub fn parse_sequence(id: &str) -> Option<u64> {
    SEQUENTIAL_ID_REGEX
        .captures(id.trim())
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse().ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_ids() {
        assert_eq!(TOOL_ID_SCHEME.next_id(None, 0), "ALT01");
        assert_eq!(SERVICE_ID_SCHEME.next_id(None, 0), "SRV001");
    }

    #[test]
    fn test_increment_from_last() {
        assert_eq!(TOOL_ID_SCHEME.next_id(Some("ALT07"), 2), "ALT08");
        assert_eq!(SERVICE_ID_SCHEME.next_id(Some("SRV099"), 99), "SRV100");
        assert_eq!(TOOL_ID_SCHEME.next_id(Some("ALT99"), 99), "ALT100");
    }

    #[test]
    fn test_fallback_uses_count() {
        assert_eq!(TOOL_ID_SCHEME.next_id(Some("manual"), 4), "ALT05");
        assert_eq!(SERVICE_ID_SCHEME.next_id(Some("SRV-x"), 11), "SRV012");
    }

    #[test]
    fn test_parse_sequence() {
        assert_eq!(parse_sequence("ALT01"), Some(1));
        assert_eq!(parse_sequence("SRV120"), Some(120));
        assert_eq!(parse_sequence("ALT"), None);
        assert_eq!(parse_sequence("ALTxx"), None);
    }
}
