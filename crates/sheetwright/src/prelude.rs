//! Prelude module - common imports for sheetwright users
//!
//! ```rust
//! use sheetwright::prelude::*;
//! ```

pub use crate::{
    // Addresses
    CellRange,
    // Values
    CellValue,
    // Charts
    ChartType,
    Color,
    ColumnRange,
    Coordinate,
    // Structures
    Dimension,
    // Engine
    DocumentEngine,
    // Errors
    Error,
    // Styling
    Format,
    MemoryEngine,
    Result,
    TableColumn,
    TableOptions,
    TableStyle,
    TotalFunction,
    // Main types
    Workbook,
    Worksheet,
};
