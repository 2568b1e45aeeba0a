//! Almacenamiento en libro de hoja de cálculo (.xlsx)
//!
//! Un solo archivo con dos hojas: `Alat` y `Servis`. Cada lectura abre el
//! archivo completo y cada escritura lo reemplaza completo de forma atómica
//! (archivo temporal en el mismo directorio + rename).

use std::collections::HashMap;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use calamine::{open_workbook, Data, DataType, Range, Reader, Xlsx};
use chrono::{Datelike, NaiveDate};
use num_traits::{FromPrimitive, ToPrimitive};
use rust_decimal::Decimal;
use rust_xlsxwriter::{ExcelDateTime, Format, Workbook, Worksheet};
use tracing::{debug, info};

use super::store::{InventorySnapshot, InventoryStore};
use crate::config::StorageConfig;
use crate::models::{ServiceRecord, ServiceType, Tool, ToolCondition};
use crate::utils::errors::{storage_corrupt_error, AppError, AppResult};
use crate::utils::validation::parse_calendar_date;

/// Nombre de la hoja de alat
pub const TOOL_SHEET: &str = "Alat";
/// Nombre de la hoja de servicios
pub const SERVICE_SHEET: &str = "Servis";

/// Columnas de la hoja `Alat`, en orden
pub const TOOL_COLUMNS: [&str; 5] = ["ID", "Nama", "Kondisi", "Tanggal_Beli", "Keterangan"];
/// Columnas de la hoja `Servis`, en orden
pub const SERVICE_COLUMNS: [&str; 6] = [
    "ID_Servis",
    "ID_Alat",
    "Tanggal",
    "Jenis_Servis",
    "Biaya",
    "Keterangan",
];

const DATE_FORMAT: &str = "yyyy-mm-dd";

/// Rango de años que Excel puede representar como fecha
const EXCEL_YEARS: std::ops::RangeInclusive<i32> = 1900..=9999;

/// Textos que pandas escribe para una fecha ausente
const NULL_MARKERS: [&str; 3] = ["nan", "nat", "none"];

static EMPTY_CELL: Data = Data::Empty;

/// Almacenamiento respaldado por un archivo .xlsx
#[derive(Debug, Clone)]
pub struct XlsxStore {
    path: PathBuf,
}

impl XlsxStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Crear carpetas y apuntar al libro configurado
    pub fn open(config: &StorageConfig) -> AppResult<Self> {
        config.init_folders()?;
        Ok(Self::new(config.workbook_path()))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Crear el libro con sólo las cabeceras si todavía no existe.
    /// Devuelve `true` si se creó.
    pub fn init(&self) -> AppResult<bool> {
        if self.path.exists() {
            return Ok(false);
        }
        info!("📄 Inicializando libro vacío en {}", self.path.display());
        self.save(&[], &[])?;
        Ok(true)
    }

    fn read_snapshot(&self) -> AppResult<InventorySnapshot> {
        let mut workbook: Xlsx<_> = open_workbook(&self.path)?;

        let tool_range = workbook.worksheet_range(TOOL_SHEET)?;
        let service_range = workbook.worksheet_range(SERVICE_SHEET)?;

        let tools = parse_sheet(TOOL_SHEET, &tool_range, &TOOL_COLUMNS, parse_tool_row)?;
        let services =
            parse_sheet(SERVICE_SHEET, &service_range, &SERVICE_COLUMNS, parse_service_row)?;

        Ok(InventorySnapshot { tools, services })
    }

    fn render(tools: &[Tool], services: &[ServiceRecord]) -> AppResult<Vec<u8>> {
        let header_format = Format::new().set_bold();
        let date_format = Format::new().set_num_format(DATE_FORMAT);

        let mut workbook = Workbook::new();

        let sheet = workbook.add_worksheet();
        sheet.set_name(TOOL_SHEET)?;
        write_header(sheet, &TOOL_COLUMNS, &header_format)?;
        write_tool_rows(sheet, tools, &date_format)?;

        let sheet = workbook.add_worksheet();
        sheet.set_name(SERVICE_SHEET)?;
        write_header(sheet, &SERVICE_COLUMNS, &header_format)?;
        write_service_rows(sheet, services, &date_format)?;

        Ok(workbook.save_to_buffer()?)
    }
}

impl InventoryStore for XlsxStore {
    fn load(&self) -> AppResult<InventorySnapshot> {
        if !self.path.exists() {
            self.init()?;
            return Ok(InventorySnapshot::default());
        }

        let snapshot = self.read_snapshot()?;
        debug!(
            "📖 Libro leído: {} alat, {} servis",
            snapshot.tools.len(),
            snapshot.services.len()
        );
        Ok(snapshot)
    }

    fn save(&self, tools: &[Tool], services: &[ServiceRecord]) -> AppResult<()> {
        let bytes = Self::render(tools, services)?;
        write_atomic(&self.path, &bytes)?;
        debug!(
            "💾 Libro guardado: {} alat, {} servis -> {}",
            tools.len(),
            services.len(),
            self.path.display()
        );
        Ok(())
    }
}

// ==================== LECTURA ====================

/// Una fila de datos con acceso por nombre de columna
struct SheetRow<'a> {
    sheet: &'static str,
    /// Número de fila en la hoja, 1 = cabecera
    number: usize,
    cells: &'a [Data],
    columns: &'a HashMap<&'static str, usize>,
}

impl SheetRow<'_> {
    fn cell(&self, column: &str) -> &Data {
        self.columns
            .get(column)
            .and_then(|idx| self.cells.get(*idx))
            .unwrap_or(&EMPTY_CELL)
    }

    fn corrupt(&self, reason: String) -> AppError {
        storage_corrupt_error(self.sheet, self.number, &reason)
    }

    fn text(&self, column: &str) -> Option<String> {
        cell_text(self.cell(column))
    }

    /// Texto libre sin recortar (Nama, Keterangan)
    fn verbatim(&self, column: &str) -> Option<String> {
        match self.cell(column) {
            Data::String(s) if s.is_empty() => None,
            Data::String(s) => Some(s.clone()),
            other => cell_text(other),
        }
    }

    fn required_text(&self, column: &str) -> AppResult<String> {
        self.text(column)
            .ok_or_else(|| self.corrupt(format!("missing {}", column)))
    }

    fn date(&self, column: &str) -> AppResult<Option<NaiveDate>> {
        let cell = self.cell(column);
        if is_blank(cell) || is_null_marker(cell) {
            return Ok(None);
        }
        cell_date(cell)
            .map(Some)
            .ok_or_else(|| self.corrupt(format!("{} is not a date: '{}'", column, cell)))
    }

    fn decimal(&self, column: &str) -> AppResult<Decimal> {
        let cell = self.cell(column);
        cell_decimal(cell)
            .ok_or_else(|| self.corrupt(format!("{} is not a number: '{}'", column, cell)))
    }
}

/// Leer todas las filas de datos de una hoja, validando la cabecera
fn parse_sheet<T>(
    sheet: &'static str,
    range: &Range<Data>,
    expected: &[&'static str],
    parse: impl Fn(&SheetRow<'_>) -> AppResult<T>,
) -> AppResult<Vec<T>> {
    let mut rows = range.rows().enumerate();

    // Hoja totalmente vacía: se trata como colección vacía
    let Some((_, header)) = rows.next() else {
        return Ok(Vec::new());
    };
    let columns = header_columns(sheet, header, expected)?;

    rows.filter(|(_, cells)| !cells.iter().all(is_blank))
        .map(|(idx, cells)| {
            parse(&SheetRow {
                sheet,
                number: idx + 1,
                cells,
                columns: &columns,
            })
        })
        .collect()
}

fn header_columns(
    sheet: &'static str,
    header: &[Data],
    expected: &[&'static str],
) -> AppResult<HashMap<&'static str, usize>> {
    let names: Vec<Option<String>> = header.iter().map(cell_text).collect();
    let mut columns = HashMap::new();
    for column in expected {
        let idx = names
            .iter()
            .position(|name| name.as_deref() == Some(*column))
            .ok_or_else(|| {
                storage_corrupt_error(sheet, 1, &format!("missing column {}", column))
            })?;
        columns.insert(*column, idx);
    }
    Ok(columns)
}

fn parse_tool_row(row: &SheetRow<'_>) -> AppResult<Tool> {
    let condition_label = row.required_text("Kondisi")?;
    let condition = condition_label
        .parse::<ToolCondition>()
        .map_err(|e| row.corrupt(e))?;

    Ok(Tool {
        id: row.required_text("ID")?,
        name: row.verbatim("Nama").unwrap_or_default(),
        condition,
        purchase_date: row.date("Tanggal_Beli")?,
        notes: row.verbatim("Keterangan"),
    })
}

fn parse_service_row(row: &SheetRow<'_>) -> AppResult<ServiceRecord> {
    let type_label = row.required_text("Jenis_Servis")?;
    let service_type = type_label
        .parse::<ServiceType>()
        .map_err(|e| row.corrupt(e))?;
    let date = row
        .date("Tanggal")?
        .ok_or_else(|| row.corrupt("missing Tanggal".to_string()))?;

    Ok(ServiceRecord {
        id: row.required_text("ID_Servis")?,
        tool_id: row.required_text("ID_Alat")?,
        date,
        service_type,
        cost: row.decimal("Biaya")?,
        notes: row.verbatim("Keterangan"),
    })
}

fn is_blank(cell: &Data) -> bool {
    match cell {
        Data::Empty => true,
        Data::String(s) => s.trim().is_empty(),
        _ => false,
    }
}

fn is_null_marker(cell: &Data) -> bool {
    match cell {
        Data::String(s) => {
            let lowered = s.trim().to_lowercase();
            NULL_MARKERS.contains(&lowered.as_str())
        }
        _ => false,
    }
}

fn cell_text(cell: &Data) -> Option<String> {
    match cell {
        Data::Empty => None,
        Data::String(s) => {
            let trimmed = s.trim();
            (!trimmed.is_empty()).then(|| trimmed.to_string())
        }
        // Los números enteros guardados como float se muestran sin decimales
        Data::Float(f) if f.fract() == 0.0 && f.abs() < 1e15 => Some(format!("{}", *f as i64)),
        other => Some(other.to_string()),
    }
}

fn cell_date(cell: &Data) -> Option<NaiveDate> {
    match cell {
        Data::String(s) | Data::DateTimeIso(s) => parse_calendar_date(s),
        other => other.as_date(),
    }
}

fn cell_decimal(cell: &Data) -> Option<Decimal> {
    match cell {
        Data::Int(i) => Some(Decimal::from(*i)),
        Data::Float(f) => Decimal::from_f64(*f),
        Data::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

// ==================== ESCRITURA ====================

fn write_header(
    sheet: &mut Worksheet,
    columns: &[&str],
    format: &Format,
) -> AppResult<()> {
    for (col, name) in columns.iter().enumerate() {
        sheet.write_string_with_format(0, col as u16, *name, format)?;
    }
    Ok(())
}

fn write_tool_rows(sheet: &mut Worksheet, tools: &[Tool], date_format: &Format) -> AppResult<()> {
    for (idx, tool) in tools.iter().enumerate() {
        let row = idx as u32 + 1;
        sheet.write_string(row, 0, &tool.id)?;
        sheet.write_string(row, 1, &tool.name)?;
        sheet.write_string(row, 2, tool.condition.label())?;
        if let Some(date) = tool.purchase_date {
            write_date(sheet, row, 3, date, date_format)?;
        }
        if let Some(notes) = &tool.notes {
            sheet.write_string(row, 4, notes)?;
        }
    }
    Ok(())
}

fn write_service_rows(
    sheet: &mut Worksheet,
    services: &[ServiceRecord],
    date_format: &Format,
) -> AppResult<()> {
    for (idx, service) in services.iter().enumerate() {
        let row = idx as u32 + 1;
        sheet.write_string(row, 0, &service.id)?;
        sheet.write_string(row, 1, &service.tool_id)?;
        write_date(sheet, row, 2, service.date, date_format)?;
        sheet.write_string(row, 3, service.service_type.label())?;
        write_cost(sheet, row, 4, service.cost)?;
        if let Some(notes) = &service.notes {
            sheet.write_string(row, 5, notes)?;
        }
    }
    Ok(())
}

/// Fecha como celda de fecha de Excel; fuera del rango 1900-9999 se escribe
/// como texto ISO, que la lectura también acepta
fn write_date(
    sheet: &mut Worksheet,
    row: u32,
    col: u16,
    date: NaiveDate,
    date_format: &Format,
) -> AppResult<()> {
    match excel_date(date) {
        Some(excel) => sheet.write_datetime_with_format(row, col, &excel, date_format)?,
        None => sheet.write_string(row, col, date.format("%Y-%m-%d").to_string())?,
    };
    Ok(())
}

fn excel_date(date: NaiveDate) -> Option<ExcelDateTime> {
    if !EXCEL_YEARS.contains(&date.year()) {
        return None;
    }
    let year = u16::try_from(date.year()).ok()?;
    ExcelDateTime::from_ymd(year, date.month() as u8, date.day() as u8).ok()
}

/// Costo como número si f64 lo representa exacto; si no, como texto
fn write_cost(sheet: &mut Worksheet, row: u32, col: u16, cost: Decimal) -> AppResult<()> {
    match cost.to_f64().filter(|f| Decimal::from_f64(*f) == Some(cost)) {
        Some(number) => sheet.write_number(row, col, number)?,
        None => sheet.write_string(row, col, cost.to_string())?,
    };
    Ok(())
}

/// Escribir el archivo completo de forma atómica: temporal + rename
fn write_atomic(path: &Path, bytes: &[u8]) -> AppResult<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    fs::create_dir_all(dir)?;

    let mut tmp = tempfile::NamedTempFile::new_in(dir)?;
    tmp.write_all(bytes)?;
    tmp.as_file().sync_all()?;
    tmp.persist(path).map_err(|e| AppError::Io(e.error))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_text() {
        assert_eq!(cell_text(&Data::Empty), None);
        assert_eq!(cell_text(&Data::String("  ".into())), None);
        assert_eq!(cell_text(&Data::String(" Obeng ".into())), Some("Obeng".to_string()));
        assert_eq!(cell_text(&Data::Float(12.0)), Some("12".to_string()));
        assert_eq!(cell_text(&Data::Int(7)), Some("7".to_string()));
    }

    #[test]
    fn test_cell_decimal() {
        assert_eq!(cell_decimal(&Data::Float(50000.0)), Some(Decimal::new(50000, 0)));
        assert_eq!(cell_decimal(&Data::Int(75000)), Some(Decimal::new(75000, 0)));
        assert_eq!(cell_decimal(&Data::String("1250.5".into())), Some(Decimal::new(12505, 1)));
        assert_eq!(cell_decimal(&Data::Empty), None);
    }

    #[test]
    fn test_cell_date_from_text() {
        assert_eq!(
            cell_date(&Data::String("2024-01-31".into())),
            NaiveDate::from_ymd_opt(2024, 1, 31)
        );
        assert_eq!(cell_date(&Data::String("kemarin".into())), None);
    }

    #[test]
    fn test_excel_date_only_inside_excel_range() {
        assert!(excel_date(NaiveDate::from_ymd_opt(-5, 1, 1).unwrap()).is_none());
        assert!(excel_date(NaiveDate::from_ymd_opt(1899, 12, 1).unwrap()).is_none());
        assert!(excel_date(NaiveDate::from_ymd_opt(1900, 1, 1).unwrap()).is_some());
        assert!(excel_date(NaiveDate::from_ymd_opt(2024, 2, 29).unwrap()).is_some());
    }

    #[test]
    fn test_null_markers() {
        for marker in ["nan", "NaN", "NaT", "None", " nat "] {
            assert!(is_null_marker(&Data::String(marker.into())), "{}", marker);
        }
        assert!(!is_null_marker(&Data::String("2024-01-01".into())));
        assert!(!is_null_marker(&Data::Float(45000.0)));
    }
}
