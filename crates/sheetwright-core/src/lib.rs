//! # sheetwright-core
//!
//! Core data types for the sheetwright spreadsheet writer.
//!
//! This crate provides the pieces that do not talk to a document engine:
//! - [`Coordinate`], [`ColumnRange`], [`CellRange`] - Numeric addresses and the A1 codec
//! - [`CellValue`] - The tagged value written into a cell
//!
//! ## Example
//!
//! ```rust
//! use sheetwright_core::{CellRange, CellValue, Coordinate, ValueKind};
//!
//! let cell: Coordinate = "B7".parse().unwrap();
//! assert_eq!((cell.row, cell.column), (6, 1));
//!
//! let range = CellRange::parse("A1:D10").unwrap();
//! assert_eq!(range.end(), Coordinate::new(9, 3));
//!
//! assert_eq!(CellValue::from(3.5).kind(), ValueKind::Number);
//! ```

pub mod cell;
pub mod error;

// Re-exports for convenience
pub use cell::{
    classify, column_to_letters, letters_to_column, parse_cell, parse_cell_range,
    parse_column_range, serial_date, unix_seconds_to_serial, Address, CellRange, CellValue,
    ColumnRange, Coordinate, ToCellRange, ToColumnRange, ToCoordinate, ValueKind,
};
pub use error::{Error, Result};

/// Maximum number of rows in a worksheet (Excel limit)
pub const MAX_ROWS: u32 = 1_048_576;

/// Maximum number of columns in a worksheet (Excel limit)
pub const MAX_COLS: u16 = 16_384;

/// Maximum length of a sheet name
pub const MAX_SHEET_NAME_LEN: usize = 31;
