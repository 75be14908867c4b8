//! In-memory document engine
//!
//! [`MemoryEngine`] implements [`DocumentEngine`] without producing a file. It
//! applies the same parameter validation and cell semantics as the native xlsx
//! writer (row/column limits, string limits, last write wins, unformatted
//! blanks ignored, table header and total cells) and keeps everything it was
//! given so callers can inspect the resulting document.

use std::collections::BTreeMap;
use std::ffi::CStr;

use ahash::AHashMap;
use sheetwright_core::{CellRange, Coordinate, MAX_COLS, MAX_ROWS, MAX_SHEET_NAME_LEN};

use crate::engine::DocumentEngine;
use crate::format::{
    Border, BorderEdge, Color, FormatProperty, HorizontalAlignment, Underline, VerticalAlignment,
};
use crate::handles::{ChartId, DocumentId, FormatId, HandleAllocator, SheetId};
use crate::sheet::{
    ChartOptions, ChartType, DocumentOptions, Gridlines, PaperType, RowColOptions, SheetSetting,
};
use crate::status::{status_message, Status};
use crate::table::{RawTableOptions, TableStyle, TotalFunction};

/// Maximum number of characters in a cell string
pub const MAX_STRING_LEN: usize = 32_767;

/// Maximum number of characters in a hyperlink
pub const MAX_URL_LEN: usize = 2_079;

/// Maximum number of hyperlinks per worksheet
pub const MAX_URLS_PER_SHEET: usize = 65_530;

const MAX_OUTLINE_LEVEL: u8 = 7;
const INVALID_SHEET_CHARS: &[char] = &['[', ']', ':', '*', '?', '/', '\\'];

type EngineResult = std::result::Result<(), Status>;

/// A value as stored in a cell
#[derive(Debug, Clone, PartialEq)]
pub enum StoredValue {
    Number(f64),
    String(String),
    Boolean(bool),
    /// Formula text without the leading `=`
    Formula(String),
    Url { url: String, text: Option<String> },
    Blank,
}

/// A written cell
#[derive(Debug, Clone, PartialEq)]
pub struct StoredCell {
    pub value: StoredValue,
    pub format: Option<FormatId>,
}

/// Width or height as it was requested
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Extent {
    Units(f64),
    Pixels(u32),
}

/// Properties of a column or row
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineProps {
    pub size: Extent,
    pub format: Option<FormatId>,
    pub options: RowColOptions,
}

/// A table column as decoded from the marshalled descriptors
#[derive(Debug, Clone, PartialEq)]
pub struct TableColumnRecord {
    pub header: String,
    pub formula: Option<String>,
    pub total_string: Option<String>,
    pub total_function: TotalFunction,
    pub header_format: Option<FormatId>,
    pub format: Option<FormatId>,
}

/// A table as received by [`DocumentEngine::add_table`]
#[derive(Debug, Clone, PartialEq)]
pub struct TableRecord {
    pub name: String,
    /// The range exactly as passed in, including any total row
    pub range: CellRange,
    pub style: TableStyle,
    pub header_row: bool,
    pub autofilter: bool,
    pub banded_rows: bool,
    pub banded_columns: bool,
    pub first_column: bool,
    pub last_column: bool,
    pub total_row: bool,
    /// Whether a column pointer table was supplied at all
    pub column_table_present: bool,
    /// Number of descriptors found before the NULL sentinel
    pub supplied_columns: usize,
    pub columns: Vec<TableColumnRecord>,
}

/// A chart placed on a sheet
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlacedChart {
    pub chart: ChartId,
    pub at: Coordinate,
    pub options: ChartOptions,
}

/// Frozen or split panes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Panes {
    pub row: u32,
    pub column: u16,
    pub top_row: u32,
    pub left_column: u16,
    pub split: bool,
}

/// View and print settings of a sheet
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SheetView {
    pub selected: bool,
    pub active: bool,
    pub hidden: bool,
    pub hide_zero: bool,
    pub tab_color: Option<Color>,
    pub paper: PaperType,
    pub default_row: Option<(f64, bool)>,
    pub gridlines: Option<Gridlines>,
    pub panes: Option<Panes>,
}

/// Everything written to one worksheet
#[derive(Debug, Clone)]
pub struct SheetRecord {
    pub document: DocumentId,
    pub name: String,
    cells: AHashMap<(u32, u16), StoredCell>,
    comments: AHashMap<(u32, u16), String>,
    columns: BTreeMap<u16, LineProps>,
    rows: BTreeMap<u32, LineProps>,
    pub merges: Vec<CellRange>,
    pub tables: Vec<TableRecord>,
    pub charts: Vec<PlacedChart>,
    pub print_area: Option<CellRange>,
    pub autofilter: Option<CellRange>,
    pub view: SheetView,
    url_count: usize,
}

impl SheetRecord {
    fn new(document: DocumentId, name: String) -> Self {
        Self {
            document,
            name,
            cells: AHashMap::new(),
            comments: AHashMap::new(),
            columns: BTreeMap::new(),
            rows: BTreeMap::new(),
            merges: Vec::new(),
            tables: Vec::new(),
            charts: Vec::new(),
            print_area: None,
            autofilter: None,
            view: SheetView::default(),
            url_count: 0,
        }
    }

    /// The cell at (row, col), if anything was stored there
    pub fn cell(&self, row: u32, col: u16) -> Option<&StoredCell> {
        self.cells.get(&(row, col))
    }

    /// The comment attached to (row, col)
    pub fn comment(&self, row: u32, col: u16) -> Option<&str> {
        self.comments.get(&(row, col)).map(String::as_str)
    }

    /// Properties set for a column
    pub fn column(&self, col: u16) -> Option<&LineProps> {
        self.columns.get(&col)
    }

    /// Properties set for a row
    pub fn row(&self, row: u32) -> Option<&LineProps> {
        self.rows.get(&row)
    }

    /// Number of stored cells
    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    fn store(&mut self, row: u32, col: u16, value: StoredValue, format: Option<FormatId>) {
        // Last write wins
        self.cells.insert((row, col), StoredCell { value, format });
    }
}

/// Accumulated format properties
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FormatRecord {
    pub document: Option<DocumentId>,
    pub bold: bool,
    pub italic: bool,
    pub underline: Option<Underline>,
    pub font_name: Option<String>,
    pub font_size: Option<f64>,
    pub font_color: Option<Color>,
    pub number_format: Option<String>,
    pub number_format_index: Option<u8>,
    pub horizontal_align: HorizontalAlignment,
    pub vertical_align: Option<VerticalAlignment>,
    pub text_wrap: bool,
    pub shrink: bool,
    pub rotation: i16,
    pub pattern: u8,
    pub background_color: Option<Color>,
    pub border_top: Border,
    pub border_bottom: Border,
    pub border_left: Border,
    pub border_right: Border,
    pub border_color: Option<Color>,
}

impl FormatRecord {
    fn apply(&mut self, property: &FormatProperty<'_>) {
        match *property {
            FormatProperty::Bold => self.bold = true,
            FormatProperty::Italic => self.italic = true,
            FormatProperty::Underline(underline) => self.underline = Some(underline),
            FormatProperty::FontName(name) => {
                self.font_name = Some(name.to_string_lossy().into_owned())
            }
            FormatProperty::FontSize(size) => self.font_size = Some(size),
            FormatProperty::FontColor(color) => self.font_color = Some(color),
            FormatProperty::NumberFormat(format) => {
                self.number_format = Some(format.to_string_lossy().into_owned())
            }
            FormatProperty::NumberFormatIndex(index) => self.number_format_index = Some(index),
            FormatProperty::HorizontalAlign(align) => self.horizontal_align = align,
            FormatProperty::VerticalAlign(align) => self.vertical_align = Some(align),
            FormatProperty::TextWrap => self.text_wrap = true,
            FormatProperty::Shrink => self.shrink = true,
            FormatProperty::Rotation(angle) => self.rotation = angle,
            FormatProperty::Pattern(pattern) => self.pattern = pattern,
            FormatProperty::BackgroundColor(color) => self.background_color = Some(color),
            FormatProperty::Border(edge, style) => match edge {
                BorderEdge::All => {
                    self.border_top = style;
                    self.border_bottom = style;
                    self.border_left = style;
                    self.border_right = style;
                }
                BorderEdge::Top => self.border_top = style,
                BorderEdge::Bottom => self.border_bottom = style,
                BorderEdge::Left => self.border_left = style,
                BorderEdge::Right => self.border_right = style,
            },
            FormatProperty::BorderColor(color) => self.border_color = Some(color),
        }
    }
}

/// A registered chart
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChartRecord {
    pub document: DocumentId,
    pub chart_type: ChartType,
    pub inserted: bool,
}

/// A document and its bookkeeping
#[derive(Debug, Clone)]
pub struct DocumentRecord {
    pub path: String,
    pub options: DocumentOptions,
    pub sheets: Vec<SheetId>,
    pub closed: bool,
    table_count: usize,
}

/// Document engine that keeps documents in memory
#[derive(Debug, Default)]
pub struct MemoryEngine {
    handles: HandleAllocator,
    documents: AHashMap<DocumentId, DocumentRecord>,
    sheets: AHashMap<SheetId, SheetRecord>,
    formats: AHashMap<FormatId, FormatRecord>,
    charts: AHashMap<ChartId, ChartRecord>,
}

impl MemoryEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn document(&self, doc: DocumentId) -> Option<&DocumentRecord> {
        self.documents.get(&doc)
    }

    pub fn sheet(&self, sheet: SheetId) -> Option<&SheetRecord> {
        self.sheets.get(&sheet)
    }

    pub fn format(&self, format: FormatId) -> Option<&FormatRecord> {
        self.formats.get(&format)
    }

    /// Number of formats registered across all documents
    pub fn format_count(&self) -> usize {
        self.formats.len()
    }

    pub fn chart(&self, chart: ChartId) -> Option<&ChartRecord> {
        self.charts.get(&chart)
    }

    /// The value stored at (row, col) of a sheet
    pub fn cell_value(&self, sheet: SheetId, row: u32, col: u16) -> Option<&StoredValue> {
        self.sheet(sheet)
            .and_then(|record| record.cell(row, col))
            .map(|cell| &cell.value)
    }

    fn open_document(&mut self, doc: DocumentId) -> Result<&mut DocumentRecord, Status> {
        match self.documents.get_mut(&doc) {
            Some(record) if !record.closed => Ok(record),
            _ => Err(Status::NULL_PARAMETER_IGNORED),
        }
    }

    fn open_sheet(&mut self, sheet: SheetId) -> Result<&mut SheetRecord, Status> {
        let record = self
            .sheets
            .get_mut(&sheet)
            .ok_or(Status::NULL_PARAMETER_IGNORED)?;
        let open = self
            .documents
            .get(&record.document)
            .map_or(false, |doc| !doc.closed);
        if !open {
            return Err(Status::NULL_PARAMETER_IGNORED);
        }
        Ok(record)
    }

    fn check_sheet_name(&self, doc: DocumentId, name: &CStr) -> EngineResult {
        let record = self
            .documents
            .get(&doc)
            .ok_or(Status::NULL_PARAMETER_IGNORED)?;
        let name = name.to_str().map_err(|_| Status::PARAMETER_VALIDATION)?;

        if name.is_empty() {
            return Err(Status::PARAMETER_IS_EMPTY);
        }
        if name.chars().count() > MAX_SHEET_NAME_LEN {
            return Err(Status::SHEETNAME_LENGTH_EXCEEDED);
        }
        if name.contains(INVALID_SHEET_CHARS) {
            return Err(Status::SHEETNAME_INVALID_CHARACTER);
        }
        if name.starts_with('\'') || name.ends_with('\'') {
            return Err(Status::SHEETNAME_START_END_APOSTROPHE);
        }

        if self.name_taken(record, name) {
            return Err(Status::SHEETNAME_ALREADY_USED);
        }
        Ok(())
    }

    /// Sheet names compare case-insensitively
    fn name_taken(&self, record: &DocumentRecord, name: &str) -> bool {
        let name = name.to_lowercase();
        record.sheets.iter().any(|id| {
            self.sheets
                .get(id)
                .map_or(false, |sheet| sheet.name.to_lowercase() == name)
        })
    }

    fn insert_sheet(&mut self, doc: DocumentId, name: Option<&CStr>) -> Result<SheetId, Status> {
        let name = match name {
            Some(name) => {
                self.check_sheet_name(doc, name)?;
                name.to_string_lossy().into_owned()
            }
            None => {
                self.open_document(doc)?;
                let record = self
                    .documents
                    .get(&doc)
                    .ok_or(Status::NULL_PARAMETER_IGNORED)?;
                let mut n = record.sheets.len() + 1;
                while self.name_taken(record, &format!("Sheet{}", n)) {
                    n += 1;
                }
                format!("Sheet{}", n)
            }
        };

        self.open_document(doc)?;
        let id = SheetId::new(self.handles.next());
        self.open_document(doc)?.sheets.push(id);
        self.sheets.insert(id, SheetRecord::new(doc, name));
        Ok(id)
    }

    fn put_string(
        &mut self,
        sheet: SheetId,
        row: u32,
        col: u16,
        value: &CStr,
        format: Option<FormatId>,
    ) -> EngineResult {
        let text = value.to_string_lossy();
        if text.is_empty() {
            // Empty strings are written as blanks
            return self.put_blank(sheet, row, col, format);
        }
        check_cell(row, col)?;
        check_string_len(&text)?;

        self.open_sheet(sheet)?
            .store(row, col, StoredValue::String(text.into_owned()), format);
        Ok(())
    }

    fn put_blank(
        &mut self,
        sheet: SheetId,
        row: u32,
        col: u16,
        format: Option<FormatId>,
    ) -> EngineResult {
        check_cell(row, col)?;
        let record = self.open_sheet(sheet)?;
        // Blanks without a format carry no information and are not stored
        if format.is_some() {
            record.store(row, col, StoredValue::Blank, format);
        }
        Ok(())
    }

    fn put_formula(
        &mut self,
        sheet: SheetId,
        row: u32,
        col: u16,
        formula: &str,
        format: Option<FormatId>,
    ) -> EngineResult {
        if formula.is_empty() {
            return Err(Status::PARAMETER_IS_EMPTY);
        }
        check_cell(row, col)?;
        let formula = formula.strip_prefix('=').unwrap_or(formula).to_string();
        self.open_sheet(sheet)?
            .store(row, col, StoredValue::Formula(formula), format);
        Ok(())
    }

    fn put_url(
        &mut self,
        sheet: SheetId,
        row: u32,
        col: u16,
        url: &CStr,
        format: Option<FormatId>,
        text: Option<&CStr>,
    ) -> EngineResult {
        let url = url.to_string_lossy();
        if url.is_empty() {
            return Err(Status::NULL_PARAMETER_IGNORED);
        }
        check_cell(row, col)?;
        if url.chars().count() > MAX_URL_LEN {
            return Err(Status::WORKSHEET_MAX_URL_LENGTH_EXCEEDED);
        }
        let text = text.map(|t| t.to_string_lossy().into_owned());
        if let Some(text) = &text {
            check_string_len(text)?;
        }

        let record = self.open_sheet(sheet)?;
        if record.url_count >= MAX_URLS_PER_SHEET {
            return Err(Status::WORKSHEET_MAX_NUMBER_URLS_EXCEEDED);
        }
        record.url_count += 1;
        record.store(
            row,
            col,
            StoredValue::Url {
                url: url.into_owned(),
                text,
            },
            format,
        );
        Ok(())
    }

    fn put_merge(
        &mut self,
        sheet: SheetId,
        range: CellRange,
        text: &CStr,
        format: Option<FormatId>,
    ) -> EngineResult {
        let range = check_range(range)?;
        if range.start() == range.end() {
            return Err(Status::PARAMETER_VALIDATION);
        }
        let record = self.open_sheet(sheet)?;
        if record.merges.iter().any(|merged| overlaps(merged, &range)) {
            return Err(Status::PARAMETER_VALIDATION);
        }

        self.put_string(sheet, range.start_row, range.start_column, text, format)?;
        let record = self.open_sheet(sheet)?;
        if format.is_some() {
            for row in range.start_row..=range.end_row {
                for col in range.start_column..=range.end_column {
                    if (row, col) != (range.start_row, range.start_column) {
                        record.store(row, col, StoredValue::Blank, format);
                    }
                }
            }
        }
        record.merges.push(range);
        Ok(())
    }

    fn put_table(
        &mut self,
        sheet: SheetId,
        range: CellRange,
        options: &RawTableOptions<'_>,
    ) -> EngineResult {
        let original = range;
        let range = check_range(range)?;
        let header_row = options.no_header_row == 0;
        if header_row && range.start_row == range.end_row {
            return Err(Status::PARAMETER_VALIDATION);
        }

        // SAFETY: the engine contract guarantees that every pointer reachable
        // from `options` stays valid until this call returns.
        let (name, descriptors) = unsafe {
            let name = options
                .name()
                .map(|name| name.to_str().map(str::to_owned))
                .transpose()
                .map_err(|_| Status::PARAMETER_VALIDATION)?;
            let descriptors = options
                .columns()
                .into_iter()
                .map(|column| {
                    (
                        column.header().map(|s| s.to_string_lossy().into_owned()),
                        column.formula().map(|s| s.to_string_lossy().into_owned()),
                        column
                            .total_string()
                            .map(|s| s.to_string_lossy().into_owned()),
                        column.total_function(),
                        column.header_format(),
                        column.format(),
                    )
                })
                .collect::<Vec<_>>();
            (name, descriptors)
        };
        if let Some(name) = &name {
            check_table_name(name)?;
        }

        let width = usize::from(range.end_column - range.start_column) + 1;
        let mut columns = Vec::with_capacity(width);
        for index in 0..width {
            let descriptor = descriptors.get(index);
            let header = descriptor
                .and_then(|d| d.0.clone())
                .unwrap_or_else(|| format!("Column{}", index + 1));
            let total_function = match descriptor.map(|d| d.3) {
                Some(Some(function)) => function,
                Some(None) => return Err(Status::PARAMETER_VALIDATION),
                None => TotalFunction::None,
            };
            columns.push(TableColumnRecord {
                header,
                formula: descriptor.and_then(|d| d.1.clone()),
                total_string: descriptor.and_then(|d| d.2.clone()),
                total_function,
                header_format: descriptor.and_then(|d| d.4),
                format: descriptor.and_then(|d| d.5),
            });
        }

        let mut seen = Vec::with_capacity(columns.len());
        for column in &columns {
            let key = column.header.to_lowercase();
            if seen.contains(&key) {
                return Err(Status::PARAMETER_VALIDATION);
            }
            seen.push(key);
        }

        let record = self.open_sheet(sheet)?;
        if record.tables.iter().any(|table| overlaps(&table.range, &range)) {
            return Err(Status::PARAMETER_VALIDATION);
        }
        let doc = record.document;

        let name = match name {
            Some(name) => name,
            None => format!("Table{}", self.open_document(doc)?.table_count + 1),
        };
        self.open_document(doc)?.table_count += 1;

        let total_row = options.total_row != 0;
        let record = self.open_sheet(sheet)?;
        for (offset, column) in columns.iter().enumerate() {
            let col = range.start_column + offset as u16;
            if header_row {
                record.store(
                    range.start_row,
                    col,
                    StoredValue::String(column.header.clone()),
                    column.header_format,
                );
            }
            if total_row {
                if let Some(label) = &column.total_string {
                    record.store(
                        range.end_row,
                        col,
                        StoredValue::String(label.clone()),
                        None,
                    );
                } else if column.total_function.is_some() {
                    let formula = format!(
                        "SUBTOTAL({},[{}])",
                        column.total_function.code(),
                        column.header
                    );
                    record.store(range.end_row, col, StoredValue::Formula(formula), column.format);
                }
            }
        }

        tracing::debug!("Added table {} over {}", name, original);
        record.tables.push(TableRecord {
            name,
            range: original,
            style: options.style(),
            header_row,
            autofilter: options.no_autofilter == 0,
            banded_rows: options.no_banded_rows == 0,
            banded_columns: options.banded_columns != 0,
            first_column: options.first_column != 0,
            last_column: options.last_column != 0,
            total_row,
            column_table_present: !options.columns.is_null(),
            supplied_columns: descriptors.len(),
            columns,
        });
        Ok(())
    }

    fn put_columns(
        &mut self,
        sheet: SheetId,
        first_col: u16,
        last_col: u16,
        size: Extent,
        format: Option<FormatId>,
        options: &RowColOptions,
    ) -> EngineResult {
        let (first_col, last_col) = ordered(first_col, last_col);
        if last_col >= MAX_COLS {
            return Err(Status::WORKSHEET_INDEX_OUT_OF_RANGE);
        }
        let props = LineProps {
            size,
            format,
            options: clamp_level(options),
        };
        let record = self.open_sheet(sheet)?;
        for col in first_col..=last_col {
            record.columns.insert(col, props);
        }
        Ok(())
    }

    fn put_row(
        &mut self,
        sheet: SheetId,
        row: u32,
        size: Extent,
        format: Option<FormatId>,
        options: &RowColOptions,
    ) -> EngineResult {
        if row >= MAX_ROWS {
            return Err(Status::WORKSHEET_INDEX_OUT_OF_RANGE);
        }
        let props = LineProps {
            size,
            format,
            options: clamp_level(options),
        };
        self.open_sheet(sheet)?.rows.insert(row, props);
        Ok(())
    }

    fn put_chart(
        &mut self,
        sheet: SheetId,
        row: u32,
        col: u16,
        chart: ChartId,
        options: Option<&ChartOptions>,
    ) -> EngineResult {
        check_cell(row, col)?;
        let doc = self.open_sheet(sheet)?.document;
        let record = self
            .charts
            .get_mut(&chart)
            .filter(|record| record.document == doc)
            .ok_or(Status::NULL_PARAMETER_IGNORED)?;
        if record.inserted {
            return Err(Status::PARAMETER_VALIDATION);
        }
        record.inserted = true;

        self.open_sheet(sheet)?.charts.push(PlacedChart {
            chart,
            at: Coordinate::new(row, col),
            options: options.copied().unwrap_or_default(),
        });
        Ok(())
    }
}

impl DocumentEngine for MemoryEngine {
    fn create_document(
        &mut self,
        path: &CStr,
        options: Option<&DocumentOptions>,
    ) -> Option<DocumentId> {
        let path = path.to_str().ok().filter(|path| !path.is_empty())?;
        let id = DocumentId::new(self.handles.next());
        self.documents.insert(
            id,
            DocumentRecord {
                path: path.to_string(),
                options: options.cloned().unwrap_or_default(),
                sheets: Vec::new(),
                closed: false,
                table_count: 0,
            },
        );
        tracing::debug!("Created document {} for {}", id, path);
        Some(id)
    }

    fn close_document(&mut self, doc: DocumentId) -> Status {
        let needs_sheet = match self.open_document(doc) {
            Ok(record) => record.sheets.is_empty(),
            Err(status) => return status,
        };
        // An empty document still gets one worksheet
        if needs_sheet {
            if let Err(status) = self.insert_sheet(doc, None) {
                return status;
            }
        }

        match self.open_document(doc) {
            Ok(record) => {
                record.closed = true;
                tracing::debug!("Closed document {} ({})", doc, record.path);
                Status::OK
            }
            Err(status) => status,
        }
    }

    fn add_sheet(&mut self, doc: DocumentId, name: Option<&CStr>) -> Option<SheetId> {
        match self.insert_sheet(doc, name) {
            Ok(id) => Some(id),
            Err(status) => {
                tracing::debug!("add_sheet rejected: {}", status_message(status));
                None
            }
        }
    }

    fn sheet_by_name(&self, doc: DocumentId, name: &CStr) -> Option<SheetId> {
        let name = name.to_str().ok()?;
        self.documents.get(&doc)?.sheets.iter().copied().find(|id| {
            self.sheets
                .get(id)
                .map_or(false, |sheet| sheet.name == name)
        })
    }

    fn validate_sheet_name(&self, doc: DocumentId, name: &CStr) -> Status {
        status(self.check_sheet_name(doc, name))
    }

    fn add_format(&mut self, doc: DocumentId) -> Option<FormatId> {
        self.open_document(doc).ok()?;
        let id = FormatId::new(self.handles.next());
        self.formats.insert(
            id,
            FormatRecord {
                document: Some(doc),
                ..FormatRecord::default()
            },
        );
        Some(id)
    }

    fn set_format_property(&mut self, format: FormatId, property: &FormatProperty<'_>) {
        match self.formats.get_mut(&format) {
            Some(record) => record.apply(property),
            None => tracing::debug!("Ignoring property for unknown format {}", format),
        }
    }

    fn add_chart(&mut self, doc: DocumentId, chart_type: ChartType) -> Option<ChartId> {
        if chart_type == ChartType::None {
            return None;
        }
        self.open_document(doc).ok()?;
        let id = ChartId::new(self.handles.next());
        self.charts.insert(
            id,
            ChartRecord {
                document: doc,
                chart_type,
                inserted: false,
            },
        );
        Some(id)
    }

    fn write_number(
        &mut self,
        sheet: SheetId,
        row: u32,
        col: u16,
        value: f64,
        format: Option<FormatId>,
    ) -> Status {
        tracing::trace!("write_number {} ({}, {}) = {}", sheet, row, col, value);
        status(check_cell(row, col).and_then(|_| {
            self.open_sheet(sheet)?
                .store(row, col, StoredValue::Number(value), format);
            Ok(())
        }))
    }

    fn write_string(
        &mut self,
        sheet: SheetId,
        row: u32,
        col: u16,
        value: &CStr,
        format: Option<FormatId>,
    ) -> Status {
        tracing::trace!("write_string {} ({}, {})", sheet, row, col);
        status(self.put_string(sheet, row, col, value, format))
    }

    fn write_boolean(
        &mut self,
        sheet: SheetId,
        row: u32,
        col: u16,
        value: bool,
        format: Option<FormatId>,
    ) -> Status {
        tracing::trace!("write_boolean {} ({}, {}) = {}", sheet, row, col, value);
        status(check_cell(row, col).and_then(|_| {
            self.open_sheet(sheet)?
                .store(row, col, StoredValue::Boolean(value), format);
            Ok(())
        }))
    }

    fn write_formula(
        &mut self,
        sheet: SheetId,
        row: u32,
        col: u16,
        formula: &CStr,
        format: Option<FormatId>,
    ) -> Status {
        tracing::trace!("write_formula {} ({}, {})", sheet, row, col);
        let formula = formula.to_string_lossy();
        status(self.put_formula(sheet, row, col, &formula, format))
    }

    fn write_url(
        &mut self,
        sheet: SheetId,
        row: u32,
        col: u16,
        url: &CStr,
        format: Option<FormatId>,
        text: Option<&CStr>,
    ) -> Status {
        tracing::trace!("write_url {} ({}, {})", sheet, row, col);
        status(self.put_url(sheet, row, col, url, format, text))
    }

    fn write_comment(&mut self, sheet: SheetId, row: u32, col: u16, text: &CStr) -> Status {
        tracing::trace!("write_comment {} ({}, {})", sheet, row, col);
        let text = text.to_string_lossy().into_owned();
        status(
            check_cell(row, col)
                .and_then(|_| check_string_len(&text))
                .and_then(|_| {
                    self.open_sheet(sheet)?.comments.insert((row, col), text);
                    Ok(())
                }),
        )
    }

    fn write_blank(
        &mut self,
        sheet: SheetId,
        row: u32,
        col: u16,
        format: Option<FormatId>,
    ) -> Status {
        tracing::trace!("write_blank {} ({}, {})", sheet, row, col);
        status(self.put_blank(sheet, row, col, format))
    }

    fn insert_chart(
        &mut self,
        sheet: SheetId,
        row: u32,
        col: u16,
        chart: ChartId,
        options: Option<&ChartOptions>,
    ) -> Status {
        status(self.put_chart(sheet, row, col, chart, options))
    }

    fn merge_range(
        &mut self,
        sheet: SheetId,
        range: CellRange,
        text: &CStr,
        format: Option<FormatId>,
    ) -> Status {
        status(self.put_merge(sheet, range, text, format))
    }

    fn add_table(
        &mut self,
        sheet: SheetId,
        range: CellRange,
        options: &RawTableOptions<'_>,
    ) -> Status {
        status(self.put_table(sheet, range, options))
    }

    fn set_column(
        &mut self,
        sheet: SheetId,
        first_col: u16,
        last_col: u16,
        width: f64,
        format: Option<FormatId>,
        options: &RowColOptions,
    ) -> Status {
        status(self.put_columns(
            sheet,
            first_col,
            last_col,
            Extent::Units(width),
            format,
            options,
        ))
    }

    fn set_column_pixels(
        &mut self,
        sheet: SheetId,
        first_col: u16,
        last_col: u16,
        pixels: u32,
        format: Option<FormatId>,
        options: &RowColOptions,
    ) -> Status {
        status(self.put_columns(
            sheet,
            first_col,
            last_col,
            Extent::Pixels(pixels),
            format,
            options,
        ))
    }

    fn set_row(
        &mut self,
        sheet: SheetId,
        row: u32,
        height: f64,
        format: Option<FormatId>,
        options: &RowColOptions,
    ) -> Status {
        status(self.put_row(sheet, row, Extent::Units(height), format, options))
    }

    fn set_row_pixels(
        &mut self,
        sheet: SheetId,
        row: u32,
        pixels: u32,
        format: Option<FormatId>,
        options: &RowColOptions,
    ) -> Status {
        status(self.put_row(sheet, row, Extent::Pixels(pixels), format, options))
    }

    fn set_print_area(&mut self, sheet: SheetId, range: CellRange) -> Status {
        status(check_range(range).and_then(|range| {
            let record = self.open_sheet(sheet)?;
            // A print area covering the whole sheet is the same as none
            let whole_sheet = CellRange::new(0, 0, MAX_ROWS - 1, MAX_COLS - 1);
            record.print_area = (range != whole_sheet).then_some(range);
            Ok(())
        }))
    }

    fn set_autofilter(&mut self, sheet: SheetId, range: CellRange) -> Status {
        status(check_range(range).and_then(|range| {
            self.open_sheet(sheet)?.autofilter = Some(range);
            Ok(())
        }))
    }

    fn configure_sheet(&mut self, sheet: SheetId, setting: &SheetSetting) {
        let view = match self.open_sheet(sheet) {
            Ok(record) => &mut record.view,
            Err(_) => {
                tracing::debug!("Ignoring setting for unknown sheet {}", sheet);
                return;
            }
        };

        match *setting {
            SheetSetting::Select => view.selected = true,
            SheetSetting::Activate => {
                view.active = true;
                view.selected = true;
                view.hidden = false;
            }
            SheetSetting::Hide => {
                view.hidden = true;
                view.selected = false;
            }
            SheetSetting::HideZero => view.hide_zero = true,
            SheetSetting::TabColor(color) => view.tab_color = Some(color),
            SheetSetting::Paper(paper) => view.paper = paper,
            SheetSetting::DefaultRow {
                height,
                hide_unused_rows,
            } => view.default_row = Some((height, hide_unused_rows)),
            SheetSetting::Gridlines(gridlines) => view.gridlines = Some(gridlines),
            SheetSetting::FreezePanes { row, column } => {
                view.panes = Some(Panes {
                    row,
                    column,
                    top_row: row,
                    left_column: column,
                    split: false,
                })
            }
            SheetSetting::SplitPanes {
                row,
                column,
                top_row,
                left_column,
                split,
            } => {
                view.panes = Some(Panes {
                    row,
                    column,
                    top_row,
                    left_column,
                    split,
                })
            }
        }
    }

    fn error_message(&self, status: Status) -> &'static str {
        status_message(status)
    }
}

fn status(result: EngineResult) -> Status {
    result.err().unwrap_or(Status::OK)
}

fn check_cell(row: u32, col: u16) -> EngineResult {
    if row >= MAX_ROWS || col >= MAX_COLS {
        return Err(Status::WORKSHEET_INDEX_OUT_OF_RANGE);
    }
    Ok(())
}

/// Bounds-check both corners and return the range with start <= end
fn check_range(range: CellRange) -> Result<CellRange, Status> {
    check_cell(range.start_row, range.start_column)?;
    check_cell(range.end_row, range.end_column)?;
    Ok(range.normalized())
}

fn check_string_len(text: &str) -> EngineResult {
    if text.chars().count() > MAX_STRING_LEN {
        return Err(Status::MAX_STRING_LENGTH_EXCEEDED);
    }
    Ok(())
}

fn check_table_name(name: &str) -> EngineResult {
    if name.is_empty() {
        return Err(Status::PARAMETER_IS_EMPTY);
    }
    if name.chars().count() > 255 {
        return Err(Status::STRING_255_LENGTH_EXCEEDED);
    }

    let mut chars = name.chars();
    let leading_ok = chars
        .next()
        .map_or(false, |c| c.is_alphabetic() || c == '_' || c == '\\');
    let rest_ok = chars.all(|c| c.is_alphanumeric() || c == '_' || c == '.');
    // Names that read as cell references are ambiguous in formulas
    let like_reference = sheetwright_core::parse_cell(name).is_ok();

    if !leading_ok || !rest_ok || like_reference {
        return Err(Status::PARAMETER_VALIDATION);
    }
    Ok(())
}

fn overlaps(a: &CellRange, b: &CellRange) -> bool {
    a.start_row <= b.end_row
        && a.end_row >= b.start_row
        && a.start_column <= b.end_column
        && a.end_column >= b.start_column
}

fn ordered<T: Ord>(a: T, b: T) -> (T, T) {
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}

fn clamp_level(options: &RowColOptions) -> RowColOptions {
    RowColOptions {
        level: options.level.min(MAX_OUTLINE_LEVEL),
        ..*options
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::RawTableColumn;
    use pretty_assertions::assert_eq;
    use std::ffi::CString;
    use std::ptr;

    fn cstr(s: &str) -> CString {
        CString::new(s).unwrap()
    }

    fn engine_with_sheet() -> (MemoryEngine, DocumentId, SheetId) {
        let mut engine = MemoryEngine::new();
        let doc = engine
            .create_document(&cstr("book.xlsx"), None)
            .unwrap();
        let sheet = engine.add_sheet(doc, None).unwrap();
        (engine, doc, sheet)
    }

    #[test]
    fn test_last_write_wins() {
        let (mut engine, _, sheet) = engine_with_sheet();
        assert_eq!(engine.write_number(sheet, 0, 0, 1.0, None), Status::OK);
        assert_eq!(
            engine.write_string(sheet, 0, 0, &cstr("second"), None),
            Status::OK
        );
        assert_eq!(
            engine.cell_value(sheet, 0, 0),
            Some(&StoredValue::String("second".into()))
        );
        assert_eq!(engine.sheet(sheet).unwrap().cell_count(), 1);
    }

    #[test]
    fn test_index_out_of_range() {
        let (mut engine, _, sheet) = engine_with_sheet();
        assert_eq!(
            engine.write_number(sheet, MAX_ROWS, 0, 1.0, None),
            Status::WORKSHEET_INDEX_OUT_OF_RANGE
        );
        assert_eq!(
            engine.write_boolean(sheet, 0, MAX_COLS, true, None),
            Status::WORKSHEET_INDEX_OUT_OF_RANGE
        );
    }

    #[test]
    fn test_unformatted_blank_is_ignored() {
        let (mut engine, doc, sheet) = engine_with_sheet();
        assert_eq!(engine.write_blank(sheet, 1, 1, None), Status::OK);
        assert!(engine.sheet(sheet).unwrap().cell(1, 1).is_none());

        let format = engine.add_format(doc).unwrap();
        assert_eq!(engine.write_blank(sheet, 1, 1, Some(format)), Status::OK);
        assert_eq!(
            engine.sheet(sheet).unwrap().cell(1, 1),
            Some(&StoredCell {
                value: StoredValue::Blank,
                format: Some(format)
            })
        );
    }

    #[test]
    fn test_formula_strips_equals() {
        let (mut engine, _, sheet) = engine_with_sheet();
        engine.write_formula(sheet, 0, 0, &cstr("=SUM(A2:A3)"), None);
        assert_eq!(
            engine.cell_value(sheet, 0, 0),
            Some(&StoredValue::Formula("SUM(A2:A3)".into()))
        );
        assert_eq!(
            engine.write_formula(sheet, 0, 1, &cstr(""), None),
            Status::PARAMETER_IS_EMPTY
        );
    }

    #[test]
    fn test_comment_keeps_value() {
        let (mut engine, _, sheet) = engine_with_sheet();
        engine.write_number(sheet, 2, 2, 5.0, None);
        engine.write_comment(sheet, 2, 2, &cstr("checked"));
        let record = engine.sheet(sheet).unwrap();
        assert_eq!(record.comment(2, 2), Some("checked"));
        assert_eq!(record.cell(2, 2).unwrap().value, StoredValue::Number(5.0));
    }

    #[test]
    fn test_long_url_rejected() {
        let (mut engine, _, sheet) = engine_with_sheet();
        let url = format!("https://example.com/{}", "a".repeat(MAX_URL_LEN));
        assert_eq!(
            engine.write_url(sheet, 0, 0, &cstr(&url), None, None),
            Status::WORKSHEET_MAX_URL_LENGTH_EXCEEDED
        );
    }

    #[test]
    fn test_sheet_name_validation() {
        let (mut engine, doc, _) = engine_with_sheet();
        assert_eq!(
            engine.validate_sheet_name(doc, &cstr("sheet1")),
            Status::SHEETNAME_ALREADY_USED
        );
        assert_eq!(
            engine.validate_sheet_name(doc, &cstr("a/b")),
            Status::SHEETNAME_INVALID_CHARACTER
        );
        assert_eq!(
            engine.validate_sheet_name(doc, &cstr("'quoted")),
            Status::SHEETNAME_START_END_APOSTROPHE
        );
        assert_eq!(
            engine.validate_sheet_name(doc, &cstr(&"x".repeat(32))),
            Status::SHEETNAME_LENGTH_EXCEEDED
        );
        assert_eq!(
            engine.validate_sheet_name(doc, &cstr("")),
            Status::PARAMETER_IS_EMPTY
        );
        assert!(engine.add_sheet(doc, Some(&cstr("a/b"))).is_none());

        let data = engine.add_sheet(doc, Some(&cstr("Data"))).unwrap();
        assert_eq!(engine.sheet_by_name(doc, &cstr("Data")), Some(data));
    }

    #[test]
    fn test_generated_name_skips_taken_names() {
        let (mut engine, doc, first) = engine_with_sheet();
        let named = engine.add_sheet(doc, Some(&cstr("sheet2"))).unwrap();
        let generated = engine.add_sheet(doc, None).unwrap();

        assert_eq!(engine.sheet(first).unwrap().name, "Sheet1");
        assert_eq!(engine.sheet(generated).unwrap().name, "Sheet3");
        assert_eq!(engine.sheet_by_name(doc, &cstr("Sheet3")), Some(generated));
        assert_eq!(engine.sheet_by_name(doc, &cstr("sheet2")), Some(named));
    }

    #[test]
    fn test_table_without_columns() {
        let (mut engine, _, sheet) = engine_with_sheet();
        let options = RawTableOptions::new();
        assert_eq!(
            engine.add_table(sheet, CellRange::new(0, 0, 4, 1), &options),
            Status::OK
        );

        let table = &engine.sheet(sheet).unwrap().tables[0];
        assert_eq!(table.name, "Table1");
        assert!(!table.column_table_present);
        assert_eq!(table.columns[1].header, "Column2");
        assert_eq!(
            engine.cell_value(sheet, 0, 0),
            Some(&StoredValue::String("Column1".into()))
        );
    }

    #[test]
    fn test_table_total_row_cells() {
        let (mut engine, _, sheet) = engine_with_sheet();
        let header = cstr("Amount");
        let label = cstr("Total");
        let mut label_column = RawTableColumn::empty();
        label_column.total_string = label.as_ptr();
        let mut sum_column = RawTableColumn::empty();
        sum_column.header = header.as_ptr();
        sum_column.total_function = TotalFunction::Sum.code();
        let table: [*const RawTableColumn; 3] = [&label_column, &sum_column, ptr::null()];

        let mut options = RawTableOptions::new();
        options.total_row = 1;
        options.columns = table.as_ptr();

        assert_eq!(
            engine.add_table(sheet, CellRange::new(0, 0, 5, 1), &options),
            Status::OK
        );
        assert_eq!(
            engine.cell_value(sheet, 5, 0),
            Some(&StoredValue::String("Total".into()))
        );
        assert_eq!(
            engine.cell_value(sheet, 5, 1),
            Some(&StoredValue::Formula("SUBTOTAL(109,[Amount])".into()))
        );
    }

    #[test]
    fn test_table_rejects_duplicates_and_overlap() {
        let (mut engine, _, sheet) = engine_with_sheet();
        let header = cstr("Same");
        let mut first = RawTableColumn::empty();
        first.header = header.as_ptr();
        let mut second = RawTableColumn::empty();
        second.header = header.as_ptr();
        let table: [*const RawTableColumn; 3] = [&first, &second, ptr::null()];
        let mut options = RawTableOptions::new();
        options.columns = table.as_ptr();
        assert_eq!(
            engine.add_table(sheet, CellRange::new(0, 0, 3, 1), &options),
            Status::PARAMETER_VALIDATION
        );

        let plain = RawTableOptions::new();
        assert_eq!(
            engine.add_table(sheet, CellRange::new(0, 0, 3, 1), &plain),
            Status::OK
        );
        assert_eq!(
            engine.add_table(sheet, CellRange::new(2, 1, 6, 2), &plain),
            Status::PARAMETER_VALIDATION
        );
    }

    #[test]
    fn test_table_name_rules() {
        assert!(check_table_name("Sales_2024").is_ok());
        assert!(check_table_name("_private").is_ok());
        assert_eq!(check_table_name("A1"), Err(Status::PARAMETER_VALIDATION));
        assert_eq!(check_table_name("2nd"), Err(Status::PARAMETER_VALIDATION));
        assert_eq!(check_table_name("has space"), Err(Status::PARAMETER_VALIDATION));
    }

    #[test]
    fn test_merge_range() {
        let (mut engine, doc, sheet) = engine_with_sheet();
        let format = engine.add_format(doc).unwrap();
        assert_eq!(
            engine.merge_range(sheet, CellRange::new(2, 2, 0, 0), &cstr("Title"), Some(format)),
            Status::OK
        );
        let record = engine.sheet(sheet).unwrap();
        assert_eq!(record.merges, vec![CellRange::new(0, 0, 2, 2)]);
        assert_eq!(
            record.cell(0, 0).unwrap().value,
            StoredValue::String("Title".into())
        );
        assert_eq!(record.cell(2, 2).unwrap().value, StoredValue::Blank);

        assert_eq!(
            engine.merge_range(sheet, CellRange::new(1, 1, 4, 4), &cstr("x"), None),
            Status::PARAMETER_VALIDATION
        );
        assert_eq!(
            engine.merge_range(sheet, CellRange::new(9, 9, 9, 9), &cstr("x"), None),
            Status::PARAMETER_VALIDATION
        );
    }

    #[test]
    fn test_column_and_row_extents() {
        let (mut engine, _, sheet) = engine_with_sheet();
        let options = RowColOptions {
            hidden: true,
            level: 9,
            collapsed: false,
        };
        engine.set_column(sheet, 3, 1, 12.5, None, &options);
        engine.set_row_pixels(sheet, 4, 30, None, &RowColOptions::default());

        let record = engine.sheet(sheet).unwrap();
        let col = record.column(2).unwrap();
        assert_eq!(col.size, Extent::Units(12.5));
        assert!(col.options.hidden);
        assert_eq!(col.options.level, 7);
        assert_eq!(record.row(4).unwrap().size, Extent::Pixels(30));
        assert_eq!(
            engine.set_row(sheet, MAX_ROWS, 10.0, None, &RowColOptions::default()),
            Status::WORKSHEET_INDEX_OUT_OF_RANGE
        );
    }

    #[test]
    fn test_close_adds_default_sheet() {
        let mut engine = MemoryEngine::new();
        let doc = engine.create_document(&cstr("empty.xlsx"), None).unwrap();
        assert_eq!(engine.close_document(doc), Status::OK);

        let record = engine.document(doc).unwrap();
        assert!(record.closed);
        assert_eq!(record.sheets.len(), 1);
        assert_eq!(engine.sheet(record.sheets[0]).unwrap().name, "Sheet1");
        assert_eq!(engine.close_document(doc), Status::NULL_PARAMETER_IGNORED);
    }

    #[test]
    fn test_closed_document_rejects_writes() {
        let (mut engine, doc, sheet) = engine_with_sheet();
        engine.close_document(doc);
        assert_eq!(
            engine.write_number(sheet, 0, 0, 1.0, None),
            Status::NULL_PARAMETER_IGNORED
        );
    }

    #[test]
    fn test_chart_inserted_once() {
        let (mut engine, doc, sheet) = engine_with_sheet();
        let chart = engine.add_chart(doc, ChartType::Line).unwrap();
        assert_eq!(engine.insert_chart(sheet, 1, 1, chart, None), Status::OK);
        assert_eq!(
            engine.insert_chart(sheet, 5, 5, chart, None),
            Status::PARAMETER_VALIDATION
        );
        assert!(engine.add_chart(doc, ChartType::None).is_none());
    }

    #[test]
    fn test_format_properties() {
        let (mut engine, doc, _) = engine_with_sheet();
        let format = engine.add_format(doc).unwrap();
        let font = cstr("Consolas");
        engine.set_format_property(format, &FormatProperty::Bold);
        engine.set_format_property(format, &FormatProperty::FontName(&font));
        engine.set_format_property(format, &FormatProperty::Border(BorderEdge::All, Border::Thin));

        let record = engine.format(format).unwrap();
        assert!(record.bold);
        assert_eq!(record.font_name.as_deref(), Some("Consolas"));
        assert_eq!(record.border_left, Border::Thin);
        assert_eq!(record.border_top, Border::Thin);
    }

    #[test]
    fn test_whole_sheet_print_area_is_dropped() {
        let (mut engine, _, sheet) = engine_with_sheet();
        engine.set_print_area(sheet, CellRange::new(0, 0, 9, 3));
        assert_eq!(
            engine.sheet(sheet).unwrap().print_area,
            Some(CellRange::new(0, 0, 9, 3))
        );
        engine.set_print_area(sheet, CellRange::new(0, 0, MAX_ROWS - 1, MAX_COLS - 1));
        assert_eq!(engine.sheet(sheet).unwrap().print_area, None);
    }
}
