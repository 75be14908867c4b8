//! A1-style address codec
//!
//! Translates between spreadsheet address text ("B7", "A:C", "A1:D10") and the
//! zero-based numeric coordinates the document engine works with.
//!
//! Only the integer widths are enforced here (`u32` rows, `u16` columns). The
//! sheet limits ([`MAX_ROWS`](crate::MAX_ROWS), [`MAX_COLS`](crate::MAX_COLS))
//! are checked by the engine when a coordinate is actually written.

use crate::error::{Error, Result};
use std::fmt;
use std::str::FromStr;

/// A zero-based cell coordinate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Coordinate {
    /// Row index (0-based internally, 1-based in display)
    pub row: u32,
    /// Column index (0-based, A=0, B=1, ..., XFD=16383)
    pub column: u16,
}

impl Coordinate {
    /// Create a coordinate from explicit row and column indices
    pub const fn new(row: u32, column: u16) -> Self {
        Self { row, column }
    }

    /// Parse a coordinate from A1-style notation
    ///
    /// # Examples
    /// ```
    /// use sheetwright_core::Coordinate;
    ///
    /// let cell = Coordinate::parse("B7").unwrap();
    /// assert_eq!(cell, Coordinate::new(6, 1));
    /// ```
    pub fn parse(s: &str) -> Result<Self> {
        parse_cell(s)
    }

    /// Format as A1-style string
    pub fn to_a1_string(&self) -> String {
        format!("{}{}", column_to_letters(self.column), u64::from(self.row) + 1)
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_a1_string())
    }
}

impl FromStr for Coordinate {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        parse_cell(s)
    }
}

impl From<(u32, u16)> for Coordinate {
    fn from((row, column): (u32, u16)) -> Self {
        Self::new(row, column)
    }
}

/// A span of whole columns (e.g., "A:C")
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ColumnRange {
    /// First column (0-based)
    pub start_column: u16,
    /// Last column (0-based, inclusive)
    pub end_column: u16,
}

impl ColumnRange {
    /// Create a column range from explicit indices
    pub const fn new(start_column: u16, end_column: u16) -> Self {
        Self {
            start_column,
            end_column,
        }
    }

    /// A range covering exactly one column
    pub const fn single(column: u16) -> Self {
        Self::new(column, column)
    }

    /// Parse a column range from "A:C", "B" or "A1:C5" text
    pub fn parse(s: &str) -> Result<Self> {
        let (start_column, end_column) = parse_column_range(s)?;
        Ok(Self::new(start_column, end_column))
    }

    /// Format as "A:C" string
    pub fn to_a1_string(&self) -> String {
        format!(
            "{}:{}",
            column_to_letters(self.start_column),
            column_to_letters(self.end_column)
        )
    }
}

impl fmt::Display for ColumnRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_a1_string())
    }
}

impl FromStr for ColumnRange {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl From<(u16, u16)> for ColumnRange {
    fn from((start_column, end_column): (u16, u16)) -> Self {
        Self::new(start_column, end_column)
    }
}

/// A rectangular range of cells (e.g., "A1:D10")
///
/// The corners are kept exactly as given: a range whose start lies after its
/// end is not reordered. Use [`CellRange::normalized`] when order matters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CellRange {
    /// First row (0-based)
    pub start_row: u32,
    /// First column (0-based)
    pub start_column: u16,
    /// Last row (0-based, inclusive)
    pub end_row: u32,
    /// Last column (0-based, inclusive)
    pub end_column: u16,
}

impl CellRange {
    /// Create a range from explicit row/column indices
    pub const fn new(start_row: u32, start_column: u16, end_row: u32, end_column: u16) -> Self {
        Self {
            start_row,
            start_column,
            end_row,
            end_column,
        }
    }

    /// Create a range spanning two coordinates
    pub const fn from_coordinates(start: Coordinate, end: Coordinate) -> Self {
        Self::new(start.row, start.column, end.row, end.column)
    }

    /// Create a single-cell range
    pub const fn single(cell: Coordinate) -> Self {
        Self::from_coordinates(cell, cell)
    }

    /// Parse a range from "A1:D10" notation
    pub fn parse(s: &str) -> Result<Self> {
        let (start, end) = parse_cell_range(s)?;
        Ok(Self::from_coordinates(start, end))
    }

    /// Top-left corner as given
    pub const fn start(&self) -> Coordinate {
        Coordinate::new(self.start_row, self.start_column)
    }

    /// Bottom-right corner as given
    pub const fn end(&self) -> Coordinate {
        Coordinate::new(self.end_row, self.end_column)
    }

    /// Whether start <= end on both axes
    pub fn is_normalized(&self) -> bool {
        self.start_row <= self.end_row && self.start_column <= self.end_column
    }

    /// Copy of this range with each axis ordered start <= end
    pub fn normalized(&self) -> Self {
        Self::new(
            self.start_row.min(self.end_row),
            self.start_column.min(self.end_column),
            self.start_row.max(self.end_row),
            self.start_column.max(self.end_column),
        )
    }

    /// Format as "A1:B10" string
    pub fn to_a1_string(&self) -> String {
        format!("{}:{}", self.start(), self.end())
    }
}

impl fmt::Display for CellRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_a1_string())
    }
}

impl FromStr for CellRange {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl From<(u32, u16, u32, u16)> for CellRange {
    fn from((start_row, start_column, end_row, end_column): (u32, u16, u32, u16)) -> Self {
        Self::new(start_row, start_column, end_row, end_column)
    }
}

impl From<(Coordinate, Coordinate)> for CellRange {
    fn from((start, end): (Coordinate, Coordinate)) -> Self {
        Self::from_coordinates(start, end)
    }
}

/// Any of the three address shapes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Address {
    /// A single cell
    Cell(Coordinate),
    /// Whole columns
    Columns(ColumnRange),
    /// A rectangle of cells
    Range(CellRange),
}

impl Address {
    /// Parse whichever shape the text describes
    ///
    /// "B7" is a cell, "A1:D10" a range, and "A:C" a column span.
    pub fn parse(s: &str) -> Result<Self> {
        if !s.contains(':') {
            return parse_cell(s).map(Address::Cell);
        }
        match parse_cell_range(s) {
            Ok((start, end)) => Ok(Address::Range(CellRange::from_coordinates(start, end))),
            Err(_) => ColumnRange::parse(s).map(Address::Columns),
        }
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Address::Cell(cell) => cell.fmt(f),
            Address::Columns(columns) => columns.fmt(f),
            Address::Range(range) => range.fmt(f),
        }
    }
}

impl FromStr for Address {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

/// Values that can be turned into a [`Coordinate`]
///
/// Lets write calls accept either parsed coordinates or address text.
pub trait ToCoordinate {
    /// Resolve to a coordinate, parsing if necessary
    fn to_coordinate(&self) -> Result<Coordinate>;
}

impl ToCoordinate for Coordinate {
    fn to_coordinate(&self) -> Result<Coordinate> {
        Ok(*self)
    }
}

impl ToCoordinate for (u32, u16) {
    fn to_coordinate(&self) -> Result<Coordinate> {
        Ok(Coordinate::from(*self))
    }
}

impl ToCoordinate for str {
    fn to_coordinate(&self) -> Result<Coordinate> {
        parse_cell(self)
    }
}

impl ToCoordinate for String {
    fn to_coordinate(&self) -> Result<Coordinate> {
        parse_cell(self)
    }
}

impl<T: ToCoordinate + ?Sized> ToCoordinate for &T {
    fn to_coordinate(&self) -> Result<Coordinate> {
        (**self).to_coordinate()
    }
}

/// Values that can be turned into a [`CellRange`]
pub trait ToCellRange {
    /// Resolve to a cell range, parsing if necessary
    fn to_cell_range(&self) -> Result<CellRange>;
}

impl ToCellRange for CellRange {
    fn to_cell_range(&self) -> Result<CellRange> {
        Ok(*self)
    }
}

impl ToCellRange for (u32, u16, u32, u16) {
    fn to_cell_range(&self) -> Result<CellRange> {
        Ok(CellRange::from(*self))
    }
}

impl ToCellRange for str {
    fn to_cell_range(&self) -> Result<CellRange> {
        CellRange::parse(self)
    }
}

impl ToCellRange for String {
    fn to_cell_range(&self) -> Result<CellRange> {
        CellRange::parse(self)
    }
}

impl<T: ToCellRange + ?Sized> ToCellRange for &T {
    fn to_cell_range(&self) -> Result<CellRange> {
        (**self).to_cell_range()
    }
}

/// Values that can be turned into a [`ColumnRange`]
pub trait ToColumnRange {
    /// Resolve to a column range, parsing if necessary
    fn to_column_range(&self) -> Result<ColumnRange>;
}

impl ToColumnRange for ColumnRange {
    fn to_column_range(&self) -> Result<ColumnRange> {
        Ok(*self)
    }
}

impl ToColumnRange for u16 {
    fn to_column_range(&self) -> Result<ColumnRange> {
        Ok(ColumnRange::single(*self))
    }
}

impl ToColumnRange for (u16, u16) {
    fn to_column_range(&self) -> Result<ColumnRange> {
        Ok(ColumnRange::from(*self))
    }
}

impl ToColumnRange for str {
    fn to_column_range(&self) -> Result<ColumnRange> {
        ColumnRange::parse(self)
    }
}

impl ToColumnRange for String {
    fn to_column_range(&self) -> Result<ColumnRange> {
        ColumnRange::parse(self)
    }
}

impl<T: ToColumnRange + ?Sized> ToColumnRange for &T {
    fn to_column_range(&self) -> Result<ColumnRange> {
        (**self).to_column_range()
    }
}

/// Parse a single cell address such as "B7" or "$B$7"
///
/// Fails if the text is empty, has no column letters, has no row digits,
/// has anything but digits after the letters, or names a column or row
/// beyond the integer width of a [`Coordinate`].
pub fn parse_cell(s: &str) -> Result<Coordinate> {
    let s = s.trim();
    if s.is_empty() {
        return Err(Error::invalid_address("empty address"));
    }

    let (letters, digits) = split_token(s)?;
    let column = letters_to_column(letters)?;

    if digits.is_empty() {
        return Err(Error::invalid_address(format!("no row number in '{}'", s)));
    }
    let row = parse_row(digits, s)?;

    Ok(Coordinate::new(row, column))
}

/// Parse the column span of "A:C", "B" or "A1:C5"
///
/// Row digits, when present, must be numeric but are otherwise ignored. A
/// single token yields `start == end`.
pub fn parse_column_range(s: &str) -> Result<(u16, u16)> {
    let s = s.trim();
    if s.is_empty() {
        return Err(Error::invalid_address("empty column range"));
    }

    let (first, second) = match s.split_once(':') {
        Some((first, second)) => (first, Some(second)),
        None => (s, None),
    };

    let start = column_token(first, s)?;
    let end = match second {
        Some(second) => column_token(second, s)?,
        None => start,
    };

    Ok((start, end))
}

/// Parse "A1:D10" into its two corner coordinates
pub fn parse_cell_range(s: &str) -> Result<(Coordinate, Coordinate)> {
    let s = s.trim();
    let (first, second) = s
        .split_once(':')
        .ok_or_else(|| Error::invalid_address(format!("missing ':' in range '{}'", s)))?;

    Ok((parse_cell(first)?, parse_cell(second)?))
}

/// Convert column index to letters (0 = A, 25 = Z, 26 = AA, etc.)
pub fn column_to_letters(col: u16) -> String {
    let mut letters = Vec::with_capacity(4);
    let mut n = u32::from(col) + 1; // 1-based for calculation

    while n > 0 {
        n -= 1;
        letters.push((n % 26) as u8 + b'A');
        n /= 26;
    }

    letters.iter().rev().map(|&b| b as char).collect()
}

/// Convert column letters to index (A = 0, Z = 25, AA = 26, etc.)
///
/// Letters are case-insensitive. Fails if the result does not fit a `u16`.
pub fn letters_to_column(letters: &str) -> Result<u16> {
    if letters.is_empty() {
        return Err(Error::invalid_address("empty column letters"));
    }

    let mut col: u32 = 0;
    for c in letters.chars() {
        if !c.is_ascii_alphabetic() {
            return Err(Error::invalid_address(format!(
                "invalid column letter '{}'",
                c
            )));
        }
        let digit = u32::from(c.to_ascii_uppercase() as u8 - b'A') + 1;
        col = col
            .checked_mul(26)
            .and_then(|col| col.checked_add(digit))
            .filter(|&col| col <= u32::from(u16::MAX) + 1)
            .ok_or_else(|| {
                Error::invalid_address(format!("column '{}' is out of range", letters))
            })?;
    }

    Ok((col - 1) as u16)
}

/// Split "$AB$12" into ("AB", "12"), rejecting digits before letters
fn split_token(s: &str) -> Result<(&str, &str)> {
    let rest = s.strip_prefix('$').unwrap_or(s);
    let letters_end = rest
        .find(|c: char| !c.is_ascii_alphabetic())
        .unwrap_or(rest.len());

    if letters_end == 0 {
        return Err(Error::invalid_address(format!(
            "no column letters in '{}'",
            s
        )));
    }

    let (letters, rest) = rest.split_at(letters_end);
    let digits = rest.strip_prefix('$').unwrap_or(rest);
    Ok((letters, digits))
}

fn parse_row(digits: &str, s: &str) -> Result<u32> {
    if !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(Error::invalid_address(format!(
            "invalid row number in '{}'",
            s
        )));
    }

    let row: u32 = digits
        .parse()
        .map_err(|_| Error::invalid_address(format!("row number out of range in '{}'", s)))?;

    // Rows are 1-based in A1 notation
    if row == 0 {
        return Err(Error::invalid_address(format!(
            "row number must be >= 1 in '{}'",
            s
        )));
    }

    Ok(row - 1)
}

fn column_token(token: &str, s: &str) -> Result<u16> {
    let token = token.trim();
    if token.is_empty() {
        return Err(Error::invalid_address(format!("missing column in '{}'", s)));
    }

    let (letters, digits) = split_token(token)?;
    if !digits.is_empty() {
        parse_row(digits, s)?;
    }
    letters_to_column(letters)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_column_to_letters() {
        assert_eq!(column_to_letters(0), "A");
        assert_eq!(column_to_letters(1), "B");
        assert_eq!(column_to_letters(25), "Z");
        assert_eq!(column_to_letters(26), "AA");
        assert_eq!(column_to_letters(27), "AB");
        assert_eq!(column_to_letters(701), "ZZ");
        assert_eq!(column_to_letters(702), "AAA");
        assert_eq!(column_to_letters(16383), "XFD");
        assert_eq!(column_to_letters(u16::MAX), "CRXP");
    }

    #[test]
    fn test_letters_to_column() {
        assert_eq!(letters_to_column("A").unwrap(), 0);
        assert_eq!(letters_to_column("Z").unwrap(), 25);
        assert_eq!(letters_to_column("AA").unwrap(), 26);
        assert_eq!(letters_to_column("ZZ").unwrap(), 701);
        assert_eq!(letters_to_column("AAA").unwrap(), 702);
        assert_eq!(letters_to_column("XFD").unwrap(), 16383);
        assert_eq!(letters_to_column("CRXP").unwrap(), u16::MAX);

        // Case insensitive
        assert_eq!(letters_to_column("xfd").unwrap(), 16383);
    }

    #[test]
    fn test_letters_out_of_range() {
        assert!(letters_to_column("CRXQ").is_err());
        assert!(letters_to_column("ZZZZZZZZZZZZ").is_err());
        assert!(letters_to_column("").is_err());
        assert!(letters_to_column("A1").is_err());
    }

    #[test]
    fn test_parse_cell() {
        assert_eq!(parse_cell("A1").unwrap(), Coordinate::new(0, 0));
        assert_eq!(parse_cell("B7").unwrap(), Coordinate::new(6, 1));
        assert_eq!(parse_cell("$C$3").unwrap(), Coordinate::new(2, 2));
        assert_eq!(parse_cell(" d4 ").unwrap(), Coordinate::new(3, 3));
        assert_eq!(
            parse_cell("XFD1048576").unwrap(),
            Coordinate::new(1_048_575, 16383)
        );
    }

    #[test]
    fn test_parse_cell_errors() {
        for bad in ["", "   ", "1A", "A", "7", "A0", "A1B", "A-1", "$", "A$", "A99999999999"] {
            assert!(
                matches!(parse_cell(bad), Err(Error::InvalidAddress(_))),
                "expected '{}' to be rejected",
                bad
            );
        }
    }

    #[test]
    fn test_sheet_limits_are_not_checked() {
        assert_eq!(
            parse_cell("XFE1048577").unwrap(),
            Coordinate::new(1_048_576, 16384)
        );
    }

    #[test]
    fn test_parse_column_range() {
        assert_eq!(parse_column_range("A:C").unwrap(), (0, 2));
        assert_eq!(parse_column_range("B").unwrap(), (1, 1));
        assert_eq!(parse_column_range("AA:AB").unwrap(), (26, 27));
        assert_eq!(parse_column_range("A1:C5").unwrap(), (0, 2));
        assert_eq!(parse_column_range("$D:$D").unwrap(), (3, 3));

        assert!(parse_column_range("").is_err());
        assert!(parse_column_range("1:2").is_err());
        assert!(parse_column_range("A:").is_err());
        assert!(parse_column_range("A:B:C").is_err());
        assert!(parse_column_range("A1x:C").is_err());
    }

    #[test]
    fn test_parse_cell_range() {
        let (start, end) = parse_cell_range("A1:D10").unwrap();
        assert_eq!(start, Coordinate::new(0, 0));
        assert_eq!(end, Coordinate::new(9, 3));

        assert!(parse_cell_range("A1").is_err());
        assert!(parse_cell_range("A1:").is_err());
        assert!(parse_cell_range(":B2").is_err());
    }

    #[test]
    fn test_swapped_range_kept_as_given() {
        let range = CellRange::parse("D10:A1").unwrap();
        assert_eq!(range, CellRange::new(9, 3, 0, 0));
        assert!(!range.is_normalized());
        assert_eq!(range.normalized(), CellRange::new(0, 0, 9, 3));
    }

    #[test]
    fn test_display() {
        assert_eq!(Coordinate::new(99, 2).to_string(), "C100");
        assert_eq!(ColumnRange::new(0, 2).to_string(), "A:C");
        assert_eq!(CellRange::new(0, 0, 9, 3).to_string(), "A1:D10");
    }

    #[test]
    fn test_address_shapes() {
        assert_eq!(
            Address::parse("B7").unwrap(),
            Address::Cell(Coordinate::new(6, 1))
        );
        assert_eq!(
            Address::parse("A1:D10").unwrap(),
            Address::Range(CellRange::new(0, 0, 9, 3))
        );
        assert_eq!(
            Address::parse("A:C").unwrap(),
            Address::Columns(ColumnRange::new(0, 2))
        );
        assert!(Address::parse("1:2").is_err());
    }

    #[test]
    fn test_conversion_traits() {
        assert_eq!("C3".to_coordinate().unwrap(), Coordinate::new(2, 2));
        assert_eq!((4u32, 1u16).to_coordinate().unwrap(), Coordinate::new(4, 1));
        assert_eq!(
            String::from("A1:B2").to_cell_range().unwrap(),
            CellRange::new(0, 0, 1, 1)
        );
        assert_eq!(3u16.to_column_range().unwrap(), ColumnRange::single(3));
    }
}
