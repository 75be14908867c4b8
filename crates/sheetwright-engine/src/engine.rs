//! The document engine interface

use std::ffi::CStr;

use sheetwright_core::CellRange;

use crate::format::FormatProperty;
use crate::handles::{ChartId, DocumentId, FormatId, SheetId};
use crate::sheet::{ChartOptions, ChartType, DocumentOptions, RowColOptions, SheetSetting};
use crate::status::Status;
use crate::table::RawTableOptions;

/// The low-level writer that owns documents and serializes them
///
/// Every call is synchronous and the engine is not reentrant: a single engine
/// must never be driven from two threads at once. Fallible primitives report a
/// [`Status`]; [`DocumentEngine::error_message`] turns it into the engine's own
/// diagnostic text.
///
/// Strings are NUL-terminated UTF-8 and, like every pointer reachable from
/// the arguments, are only valid until the call returns. Row and column
/// limits are checked here, not by callers.
pub trait DocumentEngine {
    /// Create a new document that will be written to `path` on close
    fn create_document(
        &mut self,
        path: &CStr,
        options: Option<&DocumentOptions>,
    ) -> Option<DocumentId>;

    /// Assemble and write the document, then release it
    fn close_document(&mut self, doc: DocumentId) -> Status;

    /// Add a worksheet; `None` lets the engine pick "SheetN"
    fn add_sheet(&mut self, doc: DocumentId, name: Option<&CStr>) -> Option<SheetId>;

    /// Look up a worksheet by name
    fn sheet_by_name(&self, doc: DocumentId, name: &CStr) -> Option<SheetId>;

    /// Check whether a worksheet name would be accepted
    fn validate_sheet_name(&self, doc: DocumentId, name: &CStr) -> Status;

    /// Register a new, empty cell format
    fn add_format(&mut self, doc: DocumentId) -> Option<FormatId>;

    /// Set one property of a format
    fn set_format_property(&mut self, format: FormatId, property: &FormatProperty<'_>);

    /// Register a new chart
    fn add_chart(&mut self, doc: DocumentId, chart_type: ChartType) -> Option<ChartId>;

    fn write_number(
        &mut self,
        sheet: SheetId,
        row: u32,
        col: u16,
        value: f64,
        format: Option<FormatId>,
    ) -> Status;

    fn write_string(
        &mut self,
        sheet: SheetId,
        row: u32,
        col: u16,
        value: &CStr,
        format: Option<FormatId>,
    ) -> Status;

    fn write_boolean(
        &mut self,
        sheet: SheetId,
        row: u32,
        col: u16,
        value: bool,
        format: Option<FormatId>,
    ) -> Status;

    fn write_formula(
        &mut self,
        sheet: SheetId,
        row: u32,
        col: u16,
        formula: &CStr,
        format: Option<FormatId>,
    ) -> Status;

    /// Write a hyperlink, optionally showing `text` instead of the URL
    fn write_url(
        &mut self,
        sheet: SheetId,
        row: u32,
        col: u16,
        url: &CStr,
        format: Option<FormatId>,
        text: Option<&CStr>,
    ) -> Status;

    /// Attach a comment to a cell without touching its value
    fn write_comment(&mut self, sheet: SheetId, row: u32, col: u16, text: &CStr) -> Status;

    fn write_blank(
        &mut self,
        sheet: SheetId,
        row: u32,
        col: u16,
        format: Option<FormatId>,
    ) -> Status;

    fn insert_chart(
        &mut self,
        sheet: SheetId,
        row: u32,
        col: u16,
        chart: ChartId,
        options: Option<&ChartOptions>,
    ) -> Status;

    /// Merge a range, writing `text` into it once
    fn merge_range(
        &mut self,
        sheet: SheetId,
        range: CellRange,
        text: &CStr,
        format: Option<FormatId>,
    ) -> Status;

    /// Add a table over `range`
    ///
    /// `range` already includes the total row when `options.total_row` is set.
    fn add_table(&mut self, sheet: SheetId, range: CellRange, options: &RawTableOptions<'_>)
        -> Status;

    /// Set column width in character units
    fn set_column(
        &mut self,
        sheet: SheetId,
        first_col: u16,
        last_col: u16,
        width: f64,
        format: Option<FormatId>,
        options: &RowColOptions,
    ) -> Status;

    /// Set column width in pixels
    fn set_column_pixels(
        &mut self,
        sheet: SheetId,
        first_col: u16,
        last_col: u16,
        pixels: u32,
        format: Option<FormatId>,
        options: &RowColOptions,
    ) -> Status;

    /// Set row height in character units
    fn set_row(
        &mut self,
        sheet: SheetId,
        row: u32,
        height: f64,
        format: Option<FormatId>,
        options: &RowColOptions,
    ) -> Status;

    /// Set row height in pixels
    fn set_row_pixels(
        &mut self,
        sheet: SheetId,
        row: u32,
        pixels: u32,
        format: Option<FormatId>,
        options: &RowColOptions,
    ) -> Status;

    fn set_print_area(&mut self, sheet: SheetId, range: CellRange) -> Status;

    fn set_autofilter(&mut self, sheet: SheetId, range: CellRange) -> Status;

    /// Apply a view or print setting
    fn configure_sheet(&mut self, sheet: SheetId, setting: &SheetSetting);

    /// The engine's description of a status code
    fn error_message(&self, status: Status) -> &'static str;
}

// Lets a workbook borrow an engine that the caller keeps afterwards
impl<E: DocumentEngine + ?Sized> DocumentEngine for &mut E {
    fn create_document(
        &mut self,
        path: &CStr,
        options: Option<&DocumentOptions>,
    ) -> Option<DocumentId> {
        (**self).create_document(path, options)
    }

    fn close_document(&mut self, doc: DocumentId) -> Status {
        (**self).close_document(doc)
    }

    fn add_sheet(&mut self, doc: DocumentId, name: Option<&CStr>) -> Option<SheetId> {
        (**self).add_sheet(doc, name)
    }

    fn sheet_by_name(&self, doc: DocumentId, name: &CStr) -> Option<SheetId> {
        (**self).sheet_by_name(doc, name)
    }

    fn validate_sheet_name(&self, doc: DocumentId, name: &CStr) -> Status {
        (**self).validate_sheet_name(doc, name)
    }

    fn add_format(&mut self, doc: DocumentId) -> Option<FormatId> {
        (**self).add_format(doc)
    }

    fn set_format_property(&mut self, format: FormatId, property: &FormatProperty<'_>) {
        (**self).set_format_property(format, property)
    }

    fn add_chart(&mut self, doc: DocumentId, chart_type: ChartType) -> Option<ChartId> {
        (**self).add_chart(doc, chart_type)
    }

    fn write_number(
        &mut self,
        sheet: SheetId,
        row: u32,
        col: u16,
        value: f64,
        format: Option<FormatId>,
    ) -> Status {
        (**self).write_number(sheet, row, col, value, format)
    }

    fn write_string(
        &mut self,
        sheet: SheetId,
        row: u32,
        col: u16,
        value: &CStr,
        format: Option<FormatId>,
    ) -> Status {
        (**self).write_string(sheet, row, col, value, format)
    }

    fn write_boolean(
        &mut self,
        sheet: SheetId,
        row: u32,
        col: u16,
        value: bool,
        format: Option<FormatId>,
    ) -> Status {
        (**self).write_boolean(sheet, row, col, value, format)
    }

    fn write_formula(
        &mut self,
        sheet: SheetId,
        row: u32,
        col: u16,
        formula: &CStr,
        format: Option<FormatId>,
    ) -> Status {
        (**self).write_formula(sheet, row, col, formula, format)
    }

    fn write_url(
        &mut self,
        sheet: SheetId,
        row: u32,
        col: u16,
        url: &CStr,
        format: Option<FormatId>,
        text: Option<&CStr>,
    ) -> Status {
        (**self).write_url(sheet, row, col, url, format, text)
    }

    fn write_comment(&mut self, sheet: SheetId, row: u32, col: u16, text: &CStr) -> Status {
        (**self).write_comment(sheet, row, col, text)
    }

    fn write_blank(
        &mut self,
        sheet: SheetId,
        row: u32,
        col: u16,
        format: Option<FormatId>,
    ) -> Status {
        (**self).write_blank(sheet, row, col, format)
    }

    fn insert_chart(
        &mut self,
        sheet: SheetId,
        row: u32,
        col: u16,
        chart: ChartId,
        options: Option<&ChartOptions>,
    ) -> Status {
        (**self).insert_chart(sheet, row, col, chart, options)
    }

    fn merge_range(
        &mut self,
        sheet: SheetId,
        range: CellRange,
        text: &CStr,
        format: Option<FormatId>,
    ) -> Status {
        (**self).merge_range(sheet, range, text, format)
    }

    fn add_table(&mut self, sheet: SheetId, range: CellRange, options: &RawTableOptions<'_>)
        -> Status {
        (**self).add_table(sheet, range, options)
    }

    fn set_column(
        &mut self,
        sheet: SheetId,
        first_col: u16,
        last_col: u16,
        width: f64,
        format: Option<FormatId>,
        options: &RowColOptions,
    ) -> Status {
        (**self).set_column(sheet, first_col, last_col, width, format, options)
    }

    fn set_column_pixels(
        &mut self,
        sheet: SheetId,
        first_col: u16,
        last_col: u16,
        pixels: u32,
        format: Option<FormatId>,
        options: &RowColOptions,
    ) -> Status {
        (**self).set_column_pixels(sheet, first_col, last_col, pixels, format, options)
    }

    fn set_row(
        &mut self,
        sheet: SheetId,
        row: u32,
        height: f64,
        format: Option<FormatId>,
        options: &RowColOptions,
    ) -> Status {
        (**self).set_row(sheet, row, height, format, options)
    }

    fn set_row_pixels(
        &mut self,
        sheet: SheetId,
        row: u32,
        pixels: u32,
        format: Option<FormatId>,
        options: &RowColOptions,
    ) -> Status {
        (**self).set_row_pixels(sheet, row, pixels, format, options)
    }

    fn set_print_area(&mut self, sheet: SheetId, range: CellRange) -> Status {
        (**self).set_print_area(sheet, range)
    }

    fn set_autofilter(&mut self, sheet: SheetId, range: CellRange) -> Status {
        (**self).set_autofilter(sheet, range)
    }

    fn configure_sheet(&mut self, sheet: SheetId, setting: &SheetSetting) {
        (**self).configure_sheet(sheet, setting)
    }

    fn error_message(&self, status: Status) -> &'static str {
        (**self).error_message(status)
    }
}
