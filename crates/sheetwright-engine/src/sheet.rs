//! Document, sheet and chart option types

use std::path::PathBuf;

use crate::format::Color;

/// Options applied when a document is created
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DocumentOptions {
    /// Flush each row once a later row is written, keeping memory flat
    pub constant_memory: bool,
    /// Directory for temporary files while assembling the package
    pub tmpdir: Option<PathBuf>,
    /// Allow packages larger than 4GB
    pub use_zip64: bool,
}

/// Extra row/column properties
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(C)]
pub struct RowColOptions {
    pub hidden: bool,
    /// Outline level (0-7)
    pub level: u8,
    pub collapsed: bool,
}

/// Placement and scaling of an inserted chart
#[derive(Debug, Clone, Copy, PartialEq)]
#[repr(C)]
pub struct ChartOptions {
    pub x_offset: i32,
    pub y_offset: i32,
    pub x_scale: f64,
    pub y_scale: f64,
}

impl Default for ChartOptions {
    fn default() -> Self {
        Self {
            x_offset: 0,
            y_offset: 0,
            x_scale: 1.0,
            y_scale: 1.0,
        }
    }
}

/// Chart types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum ChartType {
    None = 0,
    Area,
    AreaStacked,
    AreaPercentStacked,
    Bar,
    BarStacked,
    BarPercentStacked,
    Column,
    ColumnStacked,
    ColumnPercentStacked,
    Doughnut,
    Line,
    LineStacked,
    LinePercentStacked,
    Pie,
    Scatter,
    ScatterStraight,
    ScatterStraightWithMarkers,
    ScatterSmooth,
    ScatterSmoothWithMarkers,
    Radar,
    RadarWithMarkers,
    RadarFilled,
}

/// Printer paper sizes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(u8)]
pub enum PaperType {
    #[default]
    PrinterDefault = 0,
    Letter,
    LetterSmall,
    Tabloid,
    Ledger,
    Legal,
    Statement,
    Executive,
    A3,
    A4,
    A4Small,
    A5,
    B4,
    B5,
    Folio,
    Quarto,
}

/// Gridline visibility
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Gridlines {
    pub screen: bool,
    pub print: bool,
}

/// Sheet-level view and print settings that cannot fail
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SheetSetting {
    Select,
    Activate,
    Hide,
    HideZero,
    TabColor(Color),
    Paper(PaperType),
    DefaultRow { height: f64, hide_unused_rows: bool },
    Gridlines(Gridlines),
    FreezePanes { row: u32, column: u16 },
    SplitPanes {
        row: u32,
        column: u16,
        top_row: u32,
        left_column: u16,
        split: bool,
    },
}
