//! Composite worksheet structures
//!
//! Tables, merged ranges, column/row properties, print areas, autofilters
//! and chart placement. Each operation resolves its addresses first, so an
//! invalid address never reaches the engine.

use sheetwright_core::{ToCellRange, ToColumnRange, ToCoordinate};
use sheetwright_engine::{
    ChartId, ChartOptions, DocumentEngine, FormatId, RowColOptions, TotalFunction,
};

use crate::buffer::c_string;
use crate::error::{check, Result};
use crate::table::{columns_from_lists, engine_range, TableBuffer, TableColumn, TableOptions};
use crate::worksheet::Worksheet;

/// Default column width in character units
pub const DEFAULT_COLUMN_WIDTH: f64 = 8.43;

/// A column width or row height
///
/// Units go to the engine's character-unit primitive and pixels to its
/// pixel primitive; neither is converted into the other.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Dimension {
    /// Character units (column width) or points (row height)
    Units(f64),
    Pixels(u32),
}

impl Default for Dimension {
    fn default() -> Self {
        Dimension::Units(DEFAULT_COLUMN_WIDTH)
    }
}

impl<'a, E: DocumentEngine> Worksheet<'a, E> {
    /// Add a table over `range`
    ///
    /// When any column has a total function the range handed to the engine
    /// gains one row for the totals. The column descriptors are copied into
    /// a buffer that is released as soon as the engine returns.
    ///
    /// # Example
    ///
    /// ```rust
    /// use sheetwright::prelude::*;
    ///
    /// let mut engine = MemoryEngine::new();
    /// let mut workbook = Workbook::new(&mut engine, "budget.xlsx").unwrap();
    /// let mut sheet = workbook.add_worksheet(None).unwrap();
    /// let columns = [
    ///     TableColumn::new("Item"),
    ///     TableColumn::new("Cost").with_total(TotalFunction::Sum),
    /// ];
    /// sheet
    ///     .add_table("A1:B5", &columns, &TableOptions::named("Budget"))
    ///     .unwrap();
    /// ```
    pub fn add_table<R: ToCellRange>(
        &mut self,
        range: R,
        columns: &[TableColumn],
        options: &TableOptions,
    ) -> Result<&mut Self> {
        let range = range.to_cell_range()?;
        let buffer = TableBuffer::new(options, columns).map_err(|e| e.into_error(&*self.engine))?;
        let range = engine_range(range, buffer.total_row());

        tracing::debug!(
            "Adding table over {} with {} columns (total row: {})",
            range,
            buffer.column_count(),
            buffer.total_row()
        );
        let status = self.engine.add_table(self.id, range, &buffer.options());
        drop(buffer);

        check(&*self.engine, status, "add_table")?;
        Ok(self)
    }

    /// Add a table from parallel header, format and total lists
    ///
    /// `formats` and `totals` may be shorter than `headers`; longer lists
    /// fail with [`Error::ColumnCountMismatch`](crate::Error::ColumnCountMismatch)
    /// before anything is sent to the engine.
    pub fn add_table_with_headers<R: ToCellRange>(
        &mut self,
        range: R,
        name: Option<&str>,
        headers: &[&str],
        formats: &[Option<FormatId>],
        totals: &[TotalFunction],
    ) -> Result<&mut Self> {
        let columns = columns_from_lists(headers, formats, totals)?;
        let options = TableOptions {
            name: name.map(str::to_string),
            ..TableOptions::default()
        };
        self.add_table(range, &columns, &options)
    }

    /// Merge a range and write `text` into it
    pub fn merge_range<R: ToCellRange>(
        &mut self,
        range: R,
        text: &str,
        format: Option<FormatId>,
    ) -> Result<&mut Self> {
        let range = range.to_cell_range()?;
        let text = c_string(text).map_err(|e| e.into_error(&*self.engine))?;
        let status = self.engine.merge_range(self.id, range, &text, format);
        check(&*self.engine, status, "merge_range")?;
        Ok(self)
    }

    /// Set width, format and visibility of one or more columns
    pub fn set_column_properties<C: ToColumnRange>(
        &mut self,
        columns: C,
        width: Dimension,
        format: Option<FormatId>,
        hidden: bool,
    ) -> Result<&mut Self> {
        let options = RowColOptions {
            hidden,
            ..RowColOptions::default()
        };
        self.set_column_options(columns, width, format, &options)
    }

    /// Like [`Worksheet::set_column_properties`] with outline options
    pub fn set_column_options<C: ToColumnRange>(
        &mut self,
        columns: C,
        width: Dimension,
        format: Option<FormatId>,
        options: &RowColOptions,
    ) -> Result<&mut Self> {
        let columns = columns.to_column_range()?;
        let (first, last) = (columns.start_column, columns.end_column);
        let status = match width {
            Dimension::Units(units) => {
                self.engine
                    .set_column(self.id, first, last, units, format, options)
            }
            Dimension::Pixels(pixels) => {
                self.engine
                    .set_column_pixels(self.id, first, last, pixels, format, options)
            }
        };
        check(&*self.engine, status, "set_column")?;
        Ok(self)
    }

    /// Hide columns; `width` is what they show when unhidden
    pub fn hide_column<C: ToColumnRange>(
        &mut self,
        columns: C,
        width: Dimension,
    ) -> Result<&mut Self> {
        self.set_column_properties(columns, width, None, true)
    }

    /// Set height, format and visibility of a row (zero-based)
    pub fn set_row_properties(
        &mut self,
        row: u32,
        height: Dimension,
        format: Option<FormatId>,
        hidden: bool,
    ) -> Result<&mut Self> {
        let options = RowColOptions {
            hidden,
            ..RowColOptions::default()
        };
        self.set_row_options(row, height, format, &options)
    }

    /// Like [`Worksheet::set_row_properties`] with outline options
    pub fn set_row_options(
        &mut self,
        row: u32,
        height: Dimension,
        format: Option<FormatId>,
        options: &RowColOptions,
    ) -> Result<&mut Self> {
        let status = match height {
            Dimension::Units(units) => self.engine.set_row(self.id, row, units, format, options),
            Dimension::Pixels(pixels) => {
                self.engine
                    .set_row_pixels(self.id, row, pixels, format, options)
            }
        };
        check(&*self.engine, status, "set_row")?;
        Ok(self)
    }

    pub fn set_print_area<R: ToCellRange>(&mut self, range: R) -> Result<&mut Self> {
        let range = range.to_cell_range()?;
        let status = self.engine.set_print_area(self.id, range);
        check(&*self.engine, status, "set_print_area")?;
        Ok(self)
    }

    pub fn set_autofilter<R: ToCellRange>(&mut self, range: R) -> Result<&mut Self> {
        let range = range.to_cell_range()?;
        let status = self.engine.set_autofilter(self.id, range);
        check(&*self.engine, status, "set_autofilter")?;
        Ok(self)
    }

    /// Place a chart with its top-left corner at `cell`
    pub fn insert_chart<C: ToCoordinate>(&mut self, cell: C, chart: ChartId) -> Result<&mut Self> {
        self.insert_chart_with(cell, chart, None)
    }

    /// Place a chart with offsets and scaling
    pub fn insert_chart_with<C: ToCoordinate>(
        &mut self,
        cell: C,
        chart: ChartId,
        options: Option<&ChartOptions>,
    ) -> Result<&mut Self> {
        let at = cell.to_coordinate()?;
        let status = self
            .engine
            .insert_chart(self.id, at.row, at.column, chart, options);
        check(&*self.engine, status, "insert_chart")?;
        Ok(self)
    }

    /// Place a chart scaled by `x_scale` and `y_scale`
    pub fn insert_chart_scaled<C: ToCoordinate>(
        &mut self,
        cell: C,
        chart: ChartId,
        x_scale: f64,
        y_scale: f64,
    ) -> Result<&mut Self> {
        let options = ChartOptions {
            x_scale,
            y_scale,
            ..ChartOptions::default()
        };
        self.insert_chart_with(cell, chart, Some(&options))
    }
}
