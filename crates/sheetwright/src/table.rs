//! Table definitions and their marshalled form

use std::ffi::CString;

use sheetwright_core::CellRange;
use sheetwright_engine::{
    format_to_raw, FormatId, RawTableColumn, RawTableOptions, TableStyle, TotalFunction,
};

use crate::buffer::{c_string, BufferError, ScopedBuffer};
use crate::error::{Error, Result};

/// One column of a table
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TableColumn {
    /// Header text; the engine names unnamed columns "Column1", "Column2", ...
    pub header: Option<String>,
    /// Formula applied to the column's data cells
    pub formula: Option<String>,
    /// Label written in the total row instead of an aggregate
    pub total_label: Option<String>,
    pub total_function: TotalFunction,
    pub header_format: Option<FormatId>,
    /// Format of the data cells
    pub format: Option<FormatId>,
}

impl TableColumn {
    /// A column with a header
    pub fn new<S: Into<String>>(header: S) -> Self {
        Self {
            header: Some(header.into()),
            ..Default::default()
        }
    }

    pub fn with_formula<S: Into<String>>(mut self, formula: S) -> Self {
        self.formula = Some(formula.into());
        self
    }

    pub fn with_total_label<S: Into<String>>(mut self, label: S) -> Self {
        self.total_label = Some(label.into());
        self
    }

    pub fn with_total(mut self, function: TotalFunction) -> Self {
        self.total_function = function;
        self
    }

    pub fn with_header_format(mut self, format: FormatId) -> Self {
        self.header_format = Some(format);
        self
    }

    pub fn with_format(mut self, format: FormatId) -> Self {
        self.format = Some(format);
        self
    }
}

/// Table-wide options
#[derive(Debug, Clone, PartialEq)]
pub struct TableOptions {
    /// Table name; the engine picks "Table1", "Table2", ... when unset
    pub name: Option<String>,
    pub style: TableStyle,
    pub header_row: bool,
    pub autofilter: bool,
    pub banded_rows: bool,
    pub banded_columns: bool,
    /// Highlight the first column
    pub first_column: bool,
    /// Highlight the last column
    pub last_column: bool,
}

impl Default for TableOptions {
    fn default() -> Self {
        Self {
            name: None,
            style: TableStyle::default(),
            header_row: true,
            autofilter: true,
            banded_rows: true,
            banded_columns: false,
            first_column: false,
            last_column: false,
        }
    }
}

impl TableOptions {
    pub fn named<S: Into<String>>(name: S) -> Self {
        Self {
            name: Some(name.into()),
            ..Default::default()
        }
    }
}

/// Build columns from parallel header/format/total lists
///
/// `formats` apply to the header cells. `formats` and `totals` may be shorter
/// than `headers`; missing entries mean "unspecified". Longer lists are
/// rejected.
pub fn columns_from_lists(
    headers: &[&str],
    formats: &[Option<FormatId>],
    totals: &[TotalFunction],
) -> Result<Vec<TableColumn>> {
    if formats.len() > headers.len() {
        return Err(Error::ColumnCountMismatch {
            field: "formats",
            expected: headers.len(),
            found: formats.len(),
        });
    }
    if totals.len() > headers.len() {
        return Err(Error::ColumnCountMismatch {
            field: "totals",
            expected: headers.len(),
            found: totals.len(),
        });
    }

    Ok(headers
        .iter()
        .enumerate()
        .map(|(i, header)| TableColumn {
            header: Some((*header).to_string()),
            header_format: formats.get(i).copied().flatten(),
            total_function: totals.get(i).copied().unwrap_or_default(),
            ..Default::default()
        })
        .collect())
}

/// Whether any column asks for an aggregate in a total row
pub fn has_total_row(columns: &[TableColumn]) -> bool {
    columns.iter().any(|column| column.total_function.is_some())
}

/// The range handed to the engine: ordered, and one row taller when a total
/// row is present
pub fn engine_range(range: CellRange, total_row: bool) -> CellRange {
    let mut range = range.normalized();
    if total_row {
        range.end_row = range.end_row.saturating_add(1);
    }
    range
}

/// Owned storage behind one `add_table` call
#[derive(Debug)]
pub struct TableBuffer {
    name: Option<CString>,
    columns: ScopedBuffer<RawTableColumn>,
    options: TableOptions,
    total_row: bool,
}

impl TableBuffer {
    /// Copy the table definition into engine-ready storage
    pub fn new(
        options: &TableOptions,
        columns: &[TableColumn],
    ) -> std::result::Result<Self, BufferError> {
        let name = options.name.as_deref().map(c_string).transpose()?;
        let columns_buffer = ScopedBuffer::build(columns, |column, strings| {
            Ok(RawTableColumn {
                header: strings.push_opt(column.header.as_deref())?,
                formula: strings.push_opt(column.formula.as_deref())?,
                total_string: strings.push_opt(column.total_label.as_deref())?,
                total_function: column.total_function.code(),
                header_format: format_to_raw(column.header_format),
                format: format_to_raw(column.format),
                total_value: 0.0,
            })
        })?;

        Ok(Self {
            name,
            columns: columns_buffer,
            options: options.clone(),
            total_row: has_total_row(columns),
        })
    }

    pub fn total_row(&self) -> bool {
        self.total_row
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// The options block, borrowing this buffer's storage
    pub fn options(&self) -> RawTableOptions<'_> {
        let (style_type, style_type_number) = self.options.style.to_raw();
        let mut raw = RawTableOptions::new();
        raw.name = self
            .name
            .as_ref()
            .map_or(std::ptr::null(), |name| name.as_ptr());
        raw.no_header_row = u8::from(!self.options.header_row);
        raw.no_autofilter = u8::from(!self.options.autofilter);
        raw.no_banded_rows = u8::from(!self.options.banded_rows);
        raw.banded_columns = u8::from(self.options.banded_columns);
        raw.first_column = u8::from(self.options.first_column);
        raw.last_column = u8::from(self.options.last_column);
        raw.style_type = style_type;
        raw.style_type_number = style_type_number;
        raw.total_row = u8::from(self.total_row);
        raw.columns = self.columns.table_ptr();
        raw
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_lists_shorter_than_headers() {
        let totals = [TotalFunction::None, TotalFunction::Sum];
        let columns = columns_from_lists(&["Region", "Sales", "Units"], &[], &totals).unwrap();
        assert_eq!(columns.len(), 3);
        assert_eq!(columns[1].total_function, TotalFunction::Sum);
        assert_eq!(columns[2].total_function, TotalFunction::None);
        assert_eq!(columns[2].header_format, None);
    }

    #[test]
    fn test_list_formats_apply_to_headers() {
        let bold = FormatId::from_raw(4);
        let columns = columns_from_lists(&["Region", "Sales"], &[bold], &[]).unwrap();
        assert_eq!(columns[0].header_format, bold);
        assert_eq!(columns[0].format, None);
        assert_eq!(columns[1].header_format, None);
    }

    #[test]
    fn test_lists_longer_than_headers() {
        let err = columns_from_lists(&["A"], &[None, None], &[]).unwrap_err();
        assert!(matches!(
            err,
            Error::ColumnCountMismatch {
                field: "formats",
                expected: 1,
                found: 2
            }
        ));
    }

    #[test]
    fn test_engine_range_extension() {
        let range = CellRange::new(0, 0, 9, 2);
        assert_eq!(engine_range(range, true).end_row, 10);
        assert_eq!(engine_range(range, false).end_row, 9);
        assert_eq!(
            engine_range(CellRange::new(9, 2, 0, 0), false),
            CellRange::new(0, 0, 9, 2)
        );
    }

    #[test]
    fn test_options_view() {
        let columns = vec![
            TableColumn::new("Item"),
            TableColumn::new("Cost").with_total(TotalFunction::Sum),
        ];
        let options = TableOptions {
            banded_columns: true,
            ..TableOptions::named("Budget")
        };
        let buffer = TableBuffer::new(&options, &columns).unwrap();
        let raw = buffer.options();

        assert_eq!(raw.total_row, 1);
        assert_eq!(raw.banded_columns, 1);
        assert_eq!(raw.no_header_row, 0);
        assert_eq!(raw.style(), TableStyle::Medium(7));
        unsafe {
            assert_eq!(raw.name().unwrap().to_str().unwrap(), "Budget");
            let described = raw.columns();
            assert_eq!(described.len(), 2);
            assert_eq!(described[1].total_function(), Some(TotalFunction::Sum));
        }
    }

    #[test]
    fn test_no_columns_means_null_table() {
        let buffer = TableBuffer::new(&TableOptions::default(), &[]).unwrap();
        assert!(buffer.options().columns.is_null());
        assert!(!buffer.total_row());
        assert!(buffer.options().name.is_null());
    }
}
