//! # sheetwright
//!
//! Typed spreadsheet writing on top of an xlsx document engine.
//!
//! sheetwright sits between application code and a low-level document
//! engine that accepts (row, column, value, format) tuples. It provides:
//!
//! - A1 address parsing and formatting ([`Coordinate`], [`CellRange`], [`ColumnRange`])
//! - Typed cell values routed to the matching engine primitive ([`CellValue`])
//! - Tables, merged ranges and column/row properties marshalled into
//!   short-lived, leak-free buffers ([`ScopedBuffer`])
//! - One error type for address, engine and allocation failures ([`Error`])
//!
//! ## Example
//!
//! ```rust
//! use sheetwright::prelude::*;
//!
//! let mut engine = MemoryEngine::new();
//! let mut workbook = Workbook::new(&mut engine, "report.xlsx").unwrap();
//! let bold = workbook.add_format(&Format::new().bold()).unwrap();
//!
//! let mut sheet = workbook.add_worksheet(Some("Report")).unwrap();
//! sheet.write("A1", "Region", Some(bold)).unwrap();
//! sheet.write("B1", "Sales", Some(bold)).unwrap();
//! sheet.write("A2", "North", None).unwrap();
//! sheet.write("B2", 1250.0, None).unwrap();
//! sheet
//!     .set_column_properties("A:B", Dimension::Units(14.0), None, false)
//!     .unwrap();
//!
//! workbook.close().unwrap();
//! ```

pub mod buffer;
mod dispatch;
pub mod error;
pub mod format;
pub mod prelude;
pub mod structure;
pub mod table;
pub mod workbook;
pub mod worksheet;

pub use buffer::{BufferError, ScopedBuffer, StringStore};
pub use error::{Error, Result, WriteError};
pub use format::Format;
pub use structure::{Dimension, DEFAULT_COLUMN_WIDTH};
pub use table::{TableColumn, TableOptions};
pub use workbook::Workbook;
pub use worksheet::Worksheet;

// Re-export core types
pub use sheetwright_core::{
    column_to_letters, letters_to_column, parse_cell, parse_cell_range, parse_column_range,
    Address, CellRange, CellValue, ColumnRange, Coordinate, ToCellRange, ToColumnRange,
    ToCoordinate, ValueKind, MAX_COLS, MAX_ROWS,
};

// Re-export engine types
pub use sheetwright_engine::{
    Border, ChartId, ChartOptions, ChartType, Color, DocumentEngine, DocumentOptions, FormatId,
    Gridlines, HorizontalAlignment, MemoryEngine, PaperType, RowColOptions, SheetId, Status,
    TableStyle, TotalFunction, Underline, VerticalAlignment,
};
