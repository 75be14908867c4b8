//! Worksheet writes and view settings

use sheetwright_core::{CellValue, ToCoordinate};
use sheetwright_engine::{
    Color, DocumentEngine, FormatId, Gridlines, PaperType, SheetId, SheetSetting,
};

use crate::dispatch::write_value;
use crate::error::Result;

/// A worksheet of an open workbook
///
/// Borrows the workbook's engine mutably, so only one worksheet can be
/// written at a time. Keep the [`SheetId`] from [`Worksheet::id`] and use
/// [`Workbook::worksheet`] to come back to it later.
///
/// [`Workbook::worksheet`]: crate::Workbook::worksheet
pub struct Worksheet<'a, E: DocumentEngine> {
    pub(crate) engine: &'a mut E,
    pub(crate) id: SheetId,
}

impl<'a, E: DocumentEngine> Worksheet<'a, E> {
    pub(crate) fn new(engine: &'a mut E, id: SheetId) -> Self {
        Self { engine, id }
    }

    /// The engine handle of this sheet
    pub fn id(&self) -> SheetId {
        self.id
    }

    /// Write a value
    ///
    /// `cell` is a [`Coordinate`](sheetwright_core::Coordinate), a
    /// `(row, column)` pair or A1 text. Writing the same cell again replaces
    /// the earlier value.
    ///
    /// # Example
    ///
    /// ```rust
    /// use sheetwright::prelude::*;
    ///
    /// let mut engine = MemoryEngine::new();
    /// let mut workbook = Workbook::new(&mut engine, "sales.xlsx").unwrap();
    /// let mut sheet = workbook.add_worksheet(Some("Sales")).unwrap();
    /// sheet.write("A1", "Region", None).unwrap();
    /// sheet.write((1, 0), 1250.0, None).unwrap();
    /// sheet.write("C2", CellValue::formula("=B2*2"), None).unwrap();
    /// ```
    pub fn write<C, V>(&mut self, cell: C, value: V, format: Option<FormatId>) -> Result<&mut Self>
    where
        C: ToCoordinate,
        V: Into<CellValue>,
    {
        let at = cell.to_coordinate()?;
        write_value(&mut *self.engine, self.id, at, &value.into(), format)?;
        Ok(self)
    }

    pub fn write_number<C: ToCoordinate>(
        &mut self,
        cell: C,
        number: f64,
        format: Option<FormatId>,
    ) -> Result<&mut Self> {
        self.write(cell, CellValue::Number(number), format)
    }

    pub fn write_string<C: ToCoordinate>(
        &mut self,
        cell: C,
        text: &str,
        format: Option<FormatId>,
    ) -> Result<&mut Self> {
        self.write(cell, CellValue::text(text), format)
    }

    /// Attach a comment without changing the cell's value
    pub fn write_comment<C: ToCoordinate>(&mut self, cell: C, text: &str) -> Result<&mut Self> {
        self.write(cell, CellValue::comment(text), None)
    }

    fn configure(&mut self, setting: SheetSetting) -> &mut Self {
        self.engine.configure_sheet(self.id, &setting);
        self
    }

    /// Mark the sheet as selected
    pub fn select(&mut self) -> &mut Self {
        self.configure(SheetSetting::Select)
    }

    /// Make this the sheet shown when the document opens
    pub fn activate(&mut self) -> &mut Self {
        self.configure(SheetSetting::Activate)
    }

    pub fn hide(&mut self) -> &mut Self {
        self.configure(SheetSetting::Hide)
    }

    /// Display zero values as empty cells
    pub fn hide_zero(&mut self) -> &mut Self {
        self.configure(SheetSetting::HideZero)
    }

    pub fn set_paper(&mut self, paper: PaperType) -> &mut Self {
        self.configure(SheetSetting::Paper(paper))
    }

    pub fn set_tab_color(&mut self, color: Color) -> &mut Self {
        self.configure(SheetSetting::TabColor(color))
    }

    /// Default row height, optionally hiding rows that were never written
    pub fn set_default_row(&mut self, height: f64, hide_unused_rows: bool) -> &mut Self {
        self.configure(SheetSetting::DefaultRow {
            height,
            hide_unused_rows,
        })
    }

    pub fn gridlines(&mut self, screen: bool, print: bool) -> &mut Self {
        self.configure(SheetSetting::Gridlines(Gridlines { screen, print }))
    }

    /// Freeze the rows above and the columns left of `cell`
    pub fn freeze_panes<C: ToCoordinate>(&mut self, cell: C) -> Result<&mut Self> {
        let at = cell.to_coordinate()?;
        Ok(self.configure(SheetSetting::FreezePanes {
            row: at.row,
            column: at.column,
        }))
    }

    /// Freeze panes at `cell`, scrolling the bottom-right pane to `top_left`
    ///
    /// With `split` set the panes are split instead of frozen.
    pub fn freeze_panes_scrolled<C: ToCoordinate, T: ToCoordinate>(
        &mut self,
        cell: C,
        top_left: T,
        split: bool,
    ) -> Result<&mut Self> {
        let at = cell.to_coordinate()?;
        let top_left = top_left.to_coordinate()?;
        Ok(self.configure(SheetSetting::SplitPanes {
            row: at.row,
            column: at.column,
            top_row: top_left.row,
            left_column: top_left.column,
            split,
        }))
    }
}
