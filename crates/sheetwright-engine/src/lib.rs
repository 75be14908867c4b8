//! # sheetwright-engine
//!
//! The document engine boundary for sheetwright.
//!
//! A [`DocumentEngine`] owns documents, worksheets, formats and charts and is
//! driven through opaque handles and NUL-terminated strings, the same shape as
//! a C xlsx writer library. This crate provides:
//! - [`DocumentEngine`] - The engine interface
//! - [`Status`] and [`status_message`] - Engine status codes and their text
//! - [`RawTableOptions`] / [`RawTableColumn`] - The marshalled table layout
//! - [`MemoryEngine`] - An engine that keeps documents in memory
//!
//! ## Example
//!
//! ```rust
//! use std::ffi::CString;
//! use sheetwright_engine::{DocumentEngine, MemoryEngine, Status};
//!
//! let mut engine = MemoryEngine::new();
//! let path = CString::new("report.xlsx").unwrap();
//! let doc = engine.create_document(&path, None).unwrap();
//! let sheet = engine.add_sheet(doc, None).unwrap();
//!
//! assert_eq!(engine.write_number(sheet, 0, 0, 42.0, None), Status::OK);
//! assert_eq!(engine.close_document(doc), Status::OK);
//! ```

mod engine;
mod format;
mod handles;
pub mod memory;
mod sheet;
mod status;
mod table;

pub use engine::DocumentEngine;
pub use format::{
    Border, BorderEdge, Color, FormatProperty, HorizontalAlignment, Underline, VerticalAlignment,
};
pub use handles::{
    format_to_raw, ChartId, DocumentId, FormatId, Handle, HandleAllocator, SheetId, HANDLE_NULL,
};
pub use memory::MemoryEngine;
pub use sheet::{
    ChartOptions, ChartType, DocumentOptions, Gridlines, PaperType, RowColOptions, SheetSetting,
};
pub use status::{status_message, Status};
pub use table::{RawTableColumn, RawTableOptions, TableStyle, TotalFunction};
