//! Cell format builder
//!
//! A [`Format`] records property assignments; [`Workbook::add_format`]
//! registers it with the engine and returns the handle to pass to writes.
//!
//! [`Workbook::add_format`]: crate::Workbook::add_format

use sheetwright_engine::{
    Border, BorderEdge, Color, DocumentEngine, DocumentId, FormatId, FormatProperty,
    HorizontalAlignment, Underline, VerticalAlignment,
};

use crate::buffer::c_string;
use crate::error::{Error, Result};

#[derive(Debug, Clone, PartialEq)]
enum Setting {
    Bold,
    Italic,
    Underline(Underline),
    FontName(String),
    FontSize(f64),
    FontColor(Color),
    NumberFormat(String),
    NumberFormatIndex(u8),
    HorizontalAlign(HorizontalAlignment),
    VerticalAlign(VerticalAlignment),
    TextWrap,
    Shrink,
    Rotation(i16),
    Pattern(u8),
    BackgroundColor(Color),
    Border(BorderEdge, Border),
    BorderColor(Color),
}

/// Cell format definition
///
/// Properties are applied in the order they were set, so a later setting of
/// the same property wins.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Format {
    settings: Vec<Setting>,
}

impl Format {
    pub fn new() -> Self {
        Self::default()
    }

    fn with(mut self, setting: Setting) -> Self {
        self.settings.push(setting);
        self
    }

    pub fn bold(self) -> Self {
        self.with(Setting::Bold)
    }

    pub fn italic(self) -> Self {
        self.with(Setting::Italic)
    }

    pub fn underline(self, underline: Underline) -> Self {
        self.with(Setting::Underline(underline))
    }

    pub fn font_name<S: Into<String>>(self, name: S) -> Self {
        self.with(Setting::FontName(name.into()))
    }

    pub fn font_size(self, size: f64) -> Self {
        self.with(Setting::FontSize(size))
    }

    pub fn font_color(self, color: Color) -> Self {
        self.with(Setting::FontColor(color))
    }

    /// Custom number format such as "0.00%" or "yyyy-mm-dd"
    pub fn number_format<S: Into<String>>(self, format: S) -> Self {
        self.with(Setting::NumberFormat(format.into()))
    }

    /// One of the built-in number formats by index
    pub fn number_format_index(self, index: u8) -> Self {
        self.with(Setting::NumberFormatIndex(index))
    }

    pub fn align(self, align: HorizontalAlignment) -> Self {
        self.with(Setting::HorizontalAlign(align))
    }

    pub fn vertical_align(self, align: VerticalAlignment) -> Self {
        self.with(Setting::VerticalAlign(align))
    }

    /// Center horizontally and vertically
    pub fn center(self) -> Self {
        self.align(HorizontalAlignment::Center)
            .vertical_align(VerticalAlignment::Center)
    }

    pub fn text_wrap(self) -> Self {
        self.with(Setting::TextWrap)
    }

    /// Shrink text to fit the cell
    pub fn shrink(self) -> Self {
        self.with(Setting::Shrink)
    }

    /// Text rotation in degrees (-90 to 90, or 270 for stacked text)
    pub fn rotation(self, angle: i16) -> Self {
        self.with(Setting::Rotation(angle))
    }

    /// Solid background fill
    pub fn background_color(self, color: Color) -> Self {
        self.with(Setting::Pattern(1))
            .with(Setting::BackgroundColor(color))
    }

    pub fn border(self, style: Border) -> Self {
        self.with(Setting::Border(BorderEdge::All, style))
    }

    pub fn border_top(self, style: Border) -> Self {
        self.with(Setting::Border(BorderEdge::Top, style))
    }

    pub fn border_bottom(self, style: Border) -> Self {
        self.with(Setting::Border(BorderEdge::Bottom, style))
    }

    pub fn border_left(self, style: Border) -> Self {
        self.with(Setting::Border(BorderEdge::Left, style))
    }

    pub fn border_right(self, style: Border) -> Self {
        self.with(Setting::Border(BorderEdge::Right, style))
    }

    pub fn border_color(self, color: Color) -> Self {
        self.with(Setting::BorderColor(color))
    }

    /// Number of recorded property assignments
    pub fn len(&self) -> usize {
        self.settings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.settings.is_empty()
    }

    /// Register a new engine format carrying every setting
    ///
    /// Text properties are encoded before the engine sees anything, so a
    /// rejected string never leaves a partly configured format behind.
    pub(crate) fn register<E: DocumentEngine + ?Sized>(
        &self,
        engine: &mut E,
        doc: DocumentId,
    ) -> Result<FormatId> {
        let texts = self
            .settings
            .iter()
            .filter_map(|setting| match setting {
                Setting::FontName(text) | Setting::NumberFormat(text) => Some(c_string(text)),
                _ => None,
            })
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(|e| e.into_error(engine))?;

        let format = engine
            .add_format(doc)
            .ok_or_else(|| Error::null_handle("add_format"))?;

        let mut texts = texts.iter();
        for setting in &self.settings {
            let property = match *setting {
                Setting::FontName(_) => match texts.next() {
                    Some(name) => FormatProperty::FontName(name.as_c_str()),
                    None => continue,
                },
                Setting::NumberFormat(_) => match texts.next() {
                    Some(pattern) => FormatProperty::NumberFormat(pattern.as_c_str()),
                    None => continue,
                },
                Setting::Bold => FormatProperty::Bold,
                Setting::Italic => FormatProperty::Italic,
                Setting::Underline(u) => FormatProperty::Underline(u),
                Setting::FontSize(size) => FormatProperty::FontSize(size),
                Setting::FontColor(color) => FormatProperty::FontColor(color),
                Setting::NumberFormatIndex(index) => FormatProperty::NumberFormatIndex(index),
                Setting::HorizontalAlign(a) => FormatProperty::HorizontalAlign(a),
                Setting::VerticalAlign(a) => FormatProperty::VerticalAlign(a),
                Setting::TextWrap => FormatProperty::TextWrap,
                Setting::Shrink => FormatProperty::Shrink,
                Setting::Rotation(angle) => FormatProperty::Rotation(angle),
                Setting::Pattern(pattern) => FormatProperty::Pattern(pattern),
                Setting::BackgroundColor(color) => FormatProperty::BackgroundColor(color),
                Setting::Border(edge, style) => FormatProperty::Border(edge, style),
                Setting::BorderColor(color) => FormatProperty::BorderColor(color),
            };
            engine.set_format_property(format, &property);
        }
        Ok(format)
    }
}
