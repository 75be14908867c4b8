//! Routing of typed cell values to engine write primitives

use sheetwright_core::{classify, serial_date, CellValue, Coordinate};
use sheetwright_engine::{DocumentEngine, FormatId, SheetId};

use crate::buffer::c_string;
use crate::error::{check, Result};

/// Write `value` at `at`, picking the engine primitive for its variant
///
/// Strings are copied into NUL-terminated storage that lives only for the
/// engine call. Comments ignore `format`; date/times are written as their
/// serial day number through the number primitive.
pub(crate) fn write_value<E: DocumentEngine + ?Sized>(
    engine: &mut E,
    sheet: SheetId,
    at: Coordinate,
    value: &CellValue,
    format: Option<FormatId>,
) -> Result<()> {
    let (row, col) = (at.row, at.column);
    tracing::trace!("Writing {} to {} on {}", classify(value), at, sheet);

    let status = match value {
        CellValue::Blank => engine.write_blank(sheet, row, col, format),
        CellValue::Number(number) => engine.write_number(sheet, row, col, *number, format),
        CellValue::Text(text) => {
            let text = c_string(text).map_err(|e| e.into_error(engine))?;
            engine.write_string(sheet, row, col, &text, format)
        }
        CellValue::Boolean(flag) => engine.write_boolean(sheet, row, col, *flag, format),
        CellValue::Formula(formula) => {
            let formula = c_string(formula).map_err(|e| e.into_error(engine))?;
            engine.write_formula(sheet, row, col, &formula, format)
        }
        CellValue::Hyperlink { url, text } => {
            let url = c_string(url).map_err(|e| e.into_error(engine))?;
            let text = text
                .as_deref()
                .map(c_string)
                .transpose()
                .map_err(|e| e.into_error(engine))?;
            engine.write_url(sheet, row, col, &url, format, text.as_deref())
        }
        CellValue::Comment(text) => {
            let text = c_string(text).map_err(|e| e.into_error(engine))?;
            engine.write_comment(sheet, row, col, &text)
        }
        CellValue::DateTime(datetime) => {
            engine.write_number(sheet, row, col, serial_date(datetime), format)
        }
    };

    check(engine, status, "write")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use chrono::{TimeZone, Utc};
    use pretty_assertions::assert_eq;
    use sheetwright_engine::memory::StoredValue;
    use sheetwright_engine::{MemoryEngine, Status};
    use std::ffi::CString;

    fn setup() -> (MemoryEngine, SheetId) {
        let mut engine = MemoryEngine::new();
        let path = CString::new("dispatch.xlsx").unwrap();
        let doc = engine.create_document(&path, None).unwrap();
        let sheet = engine.add_sheet(doc, None).unwrap();
        (engine, sheet)
    }

    #[test]
    fn test_each_variant_reaches_its_primitive() {
        let (mut engine, sheet) = setup();
        let values = [
            CellValue::Number(1.5),
            CellValue::text("north"),
            CellValue::Boolean(true),
            CellValue::formula("=A1*2"),
            CellValue::url_with_text("https://example.com", "site"),
        ];
        for (col, value) in values.iter().enumerate() {
            write_value(&mut engine, sheet, Coordinate::new(0, col as u16), value, None).unwrap();
        }

        assert_eq!(
            engine.cell_value(sheet, 0, 0),
            Some(&StoredValue::Number(1.5))
        );
        assert_eq!(
            engine.cell_value(sheet, 0, 1),
            Some(&StoredValue::String("north".into()))
        );
        assert_eq!(
            engine.cell_value(sheet, 0, 2),
            Some(&StoredValue::Boolean(true))
        );
        assert_eq!(
            engine.cell_value(sheet, 0, 3),
            Some(&StoredValue::Formula("A1*2".into()))
        );
        assert_eq!(
            engine.cell_value(sheet, 0, 4),
            Some(&StoredValue::Url {
                url: "https://example.com".into(),
                text: Some("site".into()),
            })
        );
    }

    #[test]
    fn test_datetime_goes_through_number() {
        let (mut engine, sheet) = setup();
        let noon = Utc.with_ymd_and_hms(1970, 1, 1, 12, 0, 0).unwrap();
        write_value(
            &mut engine,
            sheet,
            Coordinate::new(3, 0),
            &CellValue::DateTime(noon),
            None,
        )
        .unwrap();
        assert_eq!(
            engine.cell_value(sheet, 3, 0),
            Some(&StoredValue::Number(25569.5))
        );
    }

    #[test]
    fn test_interior_nul_is_a_write_error() {
        let (mut engine, sheet) = setup();
        let err = write_value(
            &mut engine,
            sheet,
            Coordinate::new(0, 0),
            &CellValue::text("a\0b"),
            None,
        )
        .unwrap_err();
        match err {
            Error::Write(err) => assert_eq!(err.code, Status::PARAMETER_VALIDATION),
            other => panic!("unexpected error: {:?}", other),
        }
        assert_eq!(engine.cell_value(sheet, 0, 0), None);
    }

    #[test]
    fn test_out_of_range_status_is_reported() {
        let (mut engine, sheet) = setup();
        let err = write_value(
            &mut engine,
            sheet,
            Coordinate::new(1_048_576, 0),
            &CellValue::Number(1.0),
            None,
        )
        .unwrap_err();
        match err {
            Error::Write(err) => {
                assert_eq!(err.code, Status::WORKSHEET_INDEX_OUT_OF_RANGE);
                assert_eq!(
                    err.message,
                    engine.error_message(Status::WORKSHEET_INDEX_OUT_OF_RANGE)
                );
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }
}
