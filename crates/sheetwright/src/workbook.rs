//! Workbook lifecycle

use sheetwright_engine::{
    ChartId, ChartType, DocumentEngine, DocumentId, DocumentOptions, FormatId, SheetId,
};

use crate::buffer::c_string;
use crate::error::{check, Error, Result};
use crate::format::Format;
use crate::worksheet::Worksheet;

/// An open document on a [`DocumentEngine`]
///
/// The document is written when the workbook is closed. Dropping a workbook
/// that was never closed closes it and logs a warning; use
/// [`Workbook::close`] to see the outcome.
pub struct Workbook<E: DocumentEngine> {
    engine: E,
    doc: DocumentId,
    closed: bool,
}

impl<E: DocumentEngine> Workbook<E> {
    /// Create a document that will be written to `path`
    pub fn new(engine: E, path: &str) -> Result<Self> {
        Self::create(engine, path, None)
    }

    /// Create a document with engine options
    pub fn with_options(engine: E, path: &str, options: &DocumentOptions) -> Result<Self> {
        Self::create(engine, path, Some(options))
    }

    fn create(mut engine: E, path: &str, options: Option<&DocumentOptions>) -> Result<Self> {
        let c_path = c_string(path).map_err(|e| e.into_error(&engine))?;
        let doc = engine
            .create_document(&c_path, options)
            .ok_or_else(|| Error::null_handle("create_document"))?;
        tracing::debug!("Opened workbook {} at {}", doc, path);
        Ok(Self {
            engine,
            doc,
            closed: false,
        })
    }

    /// The engine handle of the document
    pub fn id(&self) -> DocumentId {
        self.doc
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    /// Add a worksheet; without a name the engine picks "Sheet1", "Sheet2", ...
    ///
    /// A name is checked by the engine first so a rejected name reports the
    /// engine's reason instead of a bare null handle.
    pub fn add_worksheet(&mut self, name: Option<&str>) -> Result<Worksheet<'_, E>> {
        let name = name
            .map(c_string)
            .transpose()
            .map_err(|e| e.into_error(&self.engine))?;
        if let Some(name) = &name {
            let status = self.engine.validate_sheet_name(self.doc, name);
            check(&self.engine, status, "add_worksheet")?;
        }

        let id = self
            .engine
            .add_sheet(self.doc, name.as_deref())
            .ok_or_else(|| Error::null_handle("add_worksheet"))?;
        tracing::debug!("Added worksheet {} to {}", id, self.doc);
        Ok(Worksheet::new(&mut self.engine, id))
    }

    /// Return to a worksheet added earlier
    pub fn worksheet(&mut self, id: SheetId) -> Worksheet<'_, E> {
        Worksheet::new(&mut self.engine, id)
    }

    /// Look up a worksheet by its exact name
    pub fn worksheet_by_name(&mut self, name: &str) -> Result<Option<Worksheet<'_, E>>> {
        let name = c_string(name).map_err(|e| e.into_error(&self.engine))?;
        let id = self.engine.sheet_by_name(self.doc, &name);
        Ok(match id {
            Some(id) => Some(Worksheet::new(&mut self.engine, id)),
            None => None,
        })
    }

    /// Register a format and return its handle
    pub fn add_format(&mut self, format: &Format) -> Result<FormatId> {
        format.register(&mut self.engine, self.doc)
    }

    /// Register a chart for later placement with [`Worksheet::insert_chart`]
    pub fn add_chart(&mut self, chart_type: ChartType) -> Result<ChartId> {
        self.engine
            .add_chart(self.doc, chart_type)
            .ok_or_else(|| Error::null_handle("add_chart"))
    }

    /// Write the document and release it
    pub fn close(mut self) -> Result<()> {
        self.closed = true;
        let status = self.engine.close_document(self.doc);
        check(&self.engine, status, "close")?;
        tracing::debug!("Closed workbook {}", self.doc);
        Ok(())
    }
}

impl<E: DocumentEngine> Drop for Workbook<E> {
    fn drop(&mut self) {
        if self.closed {
            return;
        }
        tracing::warn!("Workbook {} dropped without close, closing now", self.doc);
        let status = self.engine.close_document(self.doc);
        if !status.is_ok() {
            tracing::warn!(
                "Closing workbook {} failed: {}",
                self.doc,
                self.engine.error_message(status)
            );
        }
    }
}
