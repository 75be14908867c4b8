//! Cell-related types and utilities
//!
//! This module contains:
//! - [`Coordinate`], [`ColumnRange`], [`CellRange`] - Numeric addresses and the A1 codec
//! - [`CellValue`] - The tagged value written into a cell

pub mod address;
pub mod value;

pub use address::{
    column_to_letters, letters_to_column, parse_cell, parse_cell_range, parse_column_range,
    Address, CellRange, ColumnRange, Coordinate, ToCellRange, ToColumnRange, ToCoordinate,
};
pub use value::{classify, serial_date, unix_seconds_to_serial, CellValue, ValueKind};
