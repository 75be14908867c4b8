//! Format properties forwarded to the engine
//!
//! The engine owns the style model; these types only name the property being
//! set and carry its value across the engine boundary.

use std::ffi::CStr;

/// An RGB color as used by the xlsx writer (0xRRGGBB)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color(pub u32);

impl Color {
    // Black is 0x1000000 so it can be told apart from "automatic" (0)
    pub const BLACK: Color = Color(0x1000000);
    pub const BLUE: Color = Color(0x0000FF);
    pub const BROWN: Color = Color(0x800000);
    pub const CYAN: Color = Color(0x00FFFF);
    pub const GRAY: Color = Color(0x808080);
    pub const GREEN: Color = Color(0x008000);
    pub const LIME: Color = Color(0x00FF00);
    pub const MAGENTA: Color = Color(0xFF00FF);
    pub const NAVY: Color = Color(0x000080);
    pub const ORANGE: Color = Color(0xFF6600);
    pub const PURPLE: Color = Color(0x800080);
    pub const RED: Color = Color(0xFF0000);
    pub const SILVER: Color = Color(0xC0C0C0);
    pub const WHITE: Color = Color(0xFFFFFF);
    pub const YELLOW: Color = Color(0xFFFF00);

    /// Create a color from a 0xRRGGBB value
    pub const fn hex(value: u32) -> Self {
        Color(value)
    }
}

/// Cell border line styles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(u8)]
pub enum Border {
    #[default]
    None = 0,
    Thin,
    Medium,
    Dashed,
    Dotted,
    Thick,
    Double,
    Hair,
    MediumDashed,
    DashDot,
    MediumDashDot,
    DashDotDot,
    MediumDashDotDot,
    SlantDashDot,
}

/// Horizontal alignment codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(u8)]
pub enum HorizontalAlignment {
    #[default]
    None = 0,
    Left,
    Center,
    Right,
    Fill,
    Justify,
    CenterAcross,
    Distributed,
}

/// Vertical alignment codes (share the alignment code space, starting at 8)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum VerticalAlignment {
    Top = 8,
    Bottom,
    Center,
    Justify,
    Distributed,
}

/// Font underline styles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Underline {
    Single = 1,
    Double,
    SingleAccounting,
    DoubleAccounting,
}

/// Which side of the cell a border applies to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BorderEdge {
    All,
    Top,
    Bottom,
    Left,
    Right,
}

/// A single format property assignment
///
/// String payloads are NUL-terminated and only borrowed for the duration of
/// the engine call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FormatProperty<'a> {
    Bold,
    Italic,
    Underline(Underline),
    FontName(&'a CStr),
    FontSize(f64),
    FontColor(Color),
    NumberFormat(&'a CStr),
    /// One of the built-in number formats
    NumberFormatIndex(u8),
    HorizontalAlign(HorizontalAlignment),
    VerticalAlign(VerticalAlignment),
    TextWrap,
    Shrink,
    Rotation(i16),
    /// Fill pattern code (1 = solid)
    Pattern(u8),
    BackgroundColor(Color),
    Border(BorderEdge, Border),
    BorderColor(Color),
}
