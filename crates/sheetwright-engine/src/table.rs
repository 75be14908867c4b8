//! Table marshalling records
//!
//! A table is handed to the engine as a [`RawTableOptions`] block whose
//! `columns` field points at a NULL-terminated array of pointers to
//! [`RawTableColumn`] records. Every pointer in these structures refers to
//! storage owned by the caller and is only valid for the duration of the
//! engine call that receives it.

use std::ffi::CStr;
use std::marker::PhantomData;
use std::os::raw::c_char;
use std::ptr;

use crate::handles::{FormatId, Handle, HANDLE_NULL};

/// Aggregate shown in a table's total row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(u8)]
pub enum TotalFunction {
    #[default]
    None = 0,
    Average = 101,
    CountNums = 102,
    Count = 103,
    Max = 104,
    Min = 105,
    StdDev = 107,
    Sum = 109,
    Var = 110,
}

impl TotalFunction {
    /// The SUBTOTAL() function number
    pub const fn code(self) -> u8 {
        self as u8
    }

    /// Decode a SUBTOTAL() function number
    pub fn from_code(code: u8) -> Option<Self> {
        Some(match code {
            0 => TotalFunction::None,
            101 => TotalFunction::Average,
            102 => TotalFunction::CountNums,
            103 => TotalFunction::Count,
            104 => TotalFunction::Max,
            105 => TotalFunction::Min,
            107 => TotalFunction::StdDev,
            109 => TotalFunction::Sum,
            110 => TotalFunction::Var,
            _ => return None,
        })
    }

    /// Whether a total row cell is produced
    pub const fn is_some(self) -> bool {
        !matches!(self, TotalFunction::None)
    }
}

/// Built-in table style families
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TableStyle {
    /// Let the engine pick its own default
    Default,
    /// "Table Style Light N" (1-21)
    Light(u8),
    /// "Table Style Medium N" (1-28)
    Medium(u8),
    /// "Table Style Dark N" (1-11)
    Dark(u8),
}

impl TableStyle {
    /// Raw (style_type, style_type_number) pair
    pub const fn to_raw(self) -> (u8, u8) {
        match self {
            TableStyle::Default => (0, 0),
            TableStyle::Light(n) => (1, n),
            TableStyle::Medium(n) => (2, n),
            TableStyle::Dark(n) => (3, n),
        }
    }

    /// Decode a raw (style_type, style_type_number) pair
    pub const fn from_raw(style_type: u8, number: u8) -> Self {
        match style_type {
            1 => TableStyle::Light(number),
            2 => TableStyle::Medium(number),
            3 => TableStyle::Dark(number),
            _ => TableStyle::Default,
        }
    }
}

impl Default for TableStyle {
    fn default() -> Self {
        TableStyle::Medium(7)
    }
}

/// One column descriptor of a table
#[derive(Debug, Clone, Copy)]
#[repr(C)]
pub struct RawTableColumn {
    /// Header text, or NULL for the engine's default ("Column1", ...)
    pub header: *const c_char,
    /// Column formula, or NULL
    pub formula: *const c_char,
    /// Label written in the total row instead of a function, or NULL
    pub total_string: *const c_char,
    /// [`TotalFunction`] code
    pub total_function: u8,
    /// Raw [`FormatId`] of the header cell, [`HANDLE_NULL`] for none
    pub header_format: Handle,
    /// Raw [`FormatId`] of the data cells, [`HANDLE_NULL`] for none
    pub format: Handle,
    /// Cached result shown for the total function
    pub total_value: f64,
}

impl RawTableColumn {
    /// A descriptor with every field unset
    pub const fn empty() -> Self {
        Self {
            header: ptr::null(),
            formula: ptr::null(),
            total_string: ptr::null(),
            total_function: 0,
            header_format: HANDLE_NULL,
            format: HANDLE_NULL,
            total_value: 0.0,
        }
    }

    /// Header text
    ///
    /// # Safety
    /// `header` must be NULL or point at a live NUL-terminated string.
    pub unsafe fn header(&self) -> Option<&CStr> {
        opt_cstr(self.header)
    }

    /// Column formula
    ///
    /// # Safety
    /// `formula` must be NULL or point at a live NUL-terminated string.
    pub unsafe fn formula(&self) -> Option<&CStr> {
        opt_cstr(self.formula)
    }

    /// Total row label
    ///
    /// # Safety
    /// `total_string` must be NULL or point at a live NUL-terminated string.
    pub unsafe fn total_string(&self) -> Option<&CStr> {
        opt_cstr(self.total_string)
    }

    pub fn header_format(&self) -> Option<FormatId> {
        FormatId::from_raw(self.header_format)
    }

    pub fn format(&self) -> Option<FormatId> {
        FormatId::from_raw(self.format)
    }

    pub fn total_function(&self) -> Option<TotalFunction> {
        TotalFunction::from_code(self.total_function)
    }
}

impl Default for RawTableColumn {
    fn default() -> Self {
        Self::empty()
    }
}

/// Table options block passed to [`DocumentEngine::add_table`]
///
/// The lifetime ties the block to the buffer that owns the name and column
/// storage, so it cannot be kept past that buffer.
///
/// [`DocumentEngine::add_table`]: crate::DocumentEngine::add_table
#[derive(Debug, Clone, Copy)]
#[repr(C)]
pub struct RawTableOptions<'a> {
    /// Table name, or NULL for the engine's default ("Table1", ...)
    pub name: *const c_char,
    pub no_header_row: u8,
    pub no_autofilter: u8,
    pub no_banded_rows: u8,
    pub banded_columns: u8,
    pub first_column: u8,
    pub last_column: u8,
    /// See [`TableStyle::to_raw`]
    pub style_type: u8,
    pub style_type_number: u8,
    /// Non-zero when the range includes a total row
    pub total_row: u8,
    /// NULL, or a NULL-terminated array of column pointers
    pub columns: *const *const RawTableColumn,
    _storage: PhantomData<&'a RawTableColumn>,
}

impl<'a> RawTableOptions<'a> {
    /// Options with no name, no columns and default flags
    pub const fn new() -> Self {
        Self {
            name: ptr::null(),
            no_header_row: 0,
            no_autofilter: 0,
            no_banded_rows: 0,
            banded_columns: 0,
            first_column: 0,
            last_column: 0,
            style_type: 0,
            style_type_number: 0,
            total_row: 0,
            columns: ptr::null(),
            _storage: PhantomData,
        }
    }

    /// Table name
    ///
    /// # Safety
    /// `name` must be NULL or point at a live NUL-terminated string.
    pub unsafe fn name(&self) -> Option<&CStr> {
        opt_cstr(self.name)
    }

    /// Column descriptors up to the NULL sentinel
    ///
    /// # Safety
    /// `columns` must be NULL or point at a NULL-terminated array of pointers
    /// to live [`RawTableColumn`] records.
    pub unsafe fn columns(&self) -> Vec<&RawTableColumn> {
        let mut columns = Vec::new();
        if self.columns.is_null() {
            return columns;
        }

        let mut cursor = self.columns;
        while !(*cursor).is_null() {
            columns.push(&**cursor);
            cursor = cursor.add(1);
        }
        columns
    }

    pub fn style(&self) -> TableStyle {
        TableStyle::from_raw(self.style_type, self.style_type_number)
    }
}

impl Default for RawTableOptions<'_> {
    fn default() -> Self {
        Self::new()
    }
}

unsafe fn opt_cstr<'a>(ptr: *const c_char) -> Option<&'a CStr> {
    if ptr.is_null() {
        None
    } else {
        Some(CStr::from_ptr(ptr))
    }
}
