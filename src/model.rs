//! The document-source data model.
//!
//! A document source (DOCX reader, test builder, ...) hands the engine a tree
//! of these nodes in document order, with style references already resolved
//! into override records and image extents already measured. The engine never
//! parses markup and never re-measures an extent it is given.

use std::collections::HashMap;

use crate::style::{Borders, HAlignment, Style, VAlignment};

/// The fixed-point length unit shared by page geometry, text metrics and
/// draw coordinates: 1/1440 inch.
pub type Twips = i32;

pub struct Document {
    pub sections: Vec<Section>,
    pub styles: StyleSheet,
    pub numbering: NumberingCatalog,
}

/// A document region with its own page geometry and header/footer policy.
pub struct Section {
    pub layout: PageLayout,
    pub blocks: Vec<Block>,
}

/// Per-section page geometry. Immutable once handed to the engine.
#[derive(Clone)]
pub struct PageLayout {
    pub width: Twips,
    pub height: Twips,
    pub top_margin: Twips,
    pub right_margin: Twips,
    pub bottom_margin: Twips,
    pub left_margin: Twips,
    pub header_margin: Twips,
    pub footer_margin: Twips,
    pub headers: HeaderFooterSet,
    pub footers: HeaderFooterSet,
}

/// Header (or footer) variants for a section. Page 1 prefers `first`;
/// other pages pick by parity and fall back to `default`.
#[derive(Clone, Default)]
pub struct HeaderFooterSet {
    pub first: Option<HeaderFooter>,
    pub even: Option<HeaderFooter>,
    pub odd: Option<HeaderFooter>,
    pub default: Option<HeaderFooter>,
}

impl HeaderFooterSet {
    pub fn for_page(&self, page: u32) -> Option<&HeaderFooter> {
        if page == 1 && self.first.is_some() {
            return self.first.as_ref();
        }
        let parity = if page % 2 == 0 { &self.even } else { &self.odd };
        parity.as_ref().or(self.default.as_ref())
    }
}

#[derive(Clone)]
pub struct HeaderFooter {
    pub blocks: Vec<Block>,
}

#[derive(Clone)]
pub enum Block {
    Paragraph(Paragraph),
    Table(Table),
}

#[derive(Clone)]
pub struct Paragraph {
    pub props: ParagraphProps,
    pub children: Vec<Inline>,
}

impl Paragraph {
    /// A paragraph holding a single run of plain text with no overrides.
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            props: ParagraphProps::default(),
            children: vec![Inline::Run(Run::text(text))],
        }
    }
}

#[derive(Clone)]
pub enum Inline {
    Run(Run),
    Hyperlink(Hyperlink),
}

/// A grouping node; the drawing sink has no link command, so hyperlink runs
/// flow like ordinary styled runs.
#[derive(Clone)]
pub struct Hyperlink {
    pub target: String,
    pub runs: Vec<Run>,
}

#[derive(Clone)]
pub struct Run {
    pub props: RunProps,
    pub content: Vec<RunContent>,
}

impl Run {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            props: RunProps::default(),
            content: vec![RunContent::Text(text.into())],
        }
    }
}

#[derive(Clone)]
pub enum RunContent {
    Text(String),
    Tab,
    Break(BreakKind),
    Image(Image),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BreakKind {
    Line,
    Page,
}

/// An inline image. The display extent is precomputed by the supplier from
/// the decoded pixel dimensions; the engine only reserves and places the box.
#[derive(Clone)]
pub struct Image {
    pub width: Twips,
    pub height: Twips,
    pub source: ImageRef,
}

/// Opaque resource key understood by the [`crate::image::ImageResolver`].
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ImageRef(pub String);

#[derive(Clone)]
pub struct Table {
    /// Grid column widths; cell widths are sums of consecutive entries.
    pub grid: Vec<Twips>,
    /// Table-level default cell margins, overridable per cell.
    pub cell_margins: CellMargins,
    pub rows: Vec<TableRow>,
}

#[derive(Clone)]
pub struct TableRow {
    pub cells: Vec<TableCell>,
    pub min_height: Option<Twips>,
}

#[derive(Clone)]
pub struct TableCell {
    pub props: CellProps,
    pub blocks: Vec<Block>,
}

#[derive(Clone)]
pub struct CellProps {
    /// Number of grid columns this cell spans (horizontal merge); at least 1.
    pub grid_span: u32,
    pub margins: Option<CellMargins>,
    pub fill: Option<[u8; 3]>,
    pub borders: Borders,
    pub v_align: Option<VAlignment>,
}

impl Default for CellProps {
    fn default() -> Self {
        Self {
            grid_span: 1,
            margins: None,
            fill: None,
            borders: Borders::default(),
            v_align: None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CellMargins {
    pub top: Twips,
    pub left: Twips,
    pub bottom: Twips,
    pub right: Twips,
}

impl Default for CellMargins {
    fn default() -> Self {
        // Word's defaults: 0.08" left/right, nothing above or below.
        Self {
            top: 0,
            left: 115,
            bottom: 0,
            right: 115,
        }
    }
}

/// Resolved style records keyed by id, plus the document defaults every
/// cascade bottoms out in.
pub struct StyleSheet {
    pub defaults: Style,
    pub named: HashMap<String, NamedStyle>,
}

impl StyleSheet {
    pub fn empty() -> Self {
        Self {
            defaults: Style::default(),
            named: HashMap::new(),
        }
    }
}

pub struct NamedStyle {
    pub based_on: Option<String>,
    pub paragraph: ParagraphProps,
    pub run: RunProps,
}

/// Paragraph-level overrides; absent fields inherit through the cascade.
#[derive(Clone, Default)]
pub struct ParagraphProps {
    pub style_id: Option<String>,
    pub line_spacing: Option<Twips>,
    pub space_before: Option<Twips>,
    pub space_after: Option<Twips>,
    pub indent_left: Option<Twips>,
    pub indent_right: Option<Twips>,
    pub indent_hanging: Option<Twips>,
    pub alignment: Option<HAlignment>,
    pub numbering: Option<NumberingRef>,
}

/// Run-level overrides.
#[derive(Clone, Default)]
pub struct RunProps {
    pub font_name: Option<String>,
    pub font_size: Option<Twips>,
    pub bold: Option<bool>,
    pub italic: Option<bool>,
    pub underline: Option<bool>,
    pub strikethrough: Option<bool>,
    pub superscript: Option<bool>,
    pub color: Option<ColorSpec>,
}

impl RunProps {
    pub fn is_empty(&self) -> bool {
        self.font_name.is_none()
            && self.font_size.is_none()
            && self.bold.is_none()
            && self.italic.is_none()
            && self.underline.is_none()
            && self.strikethrough.is_none()
            && self.superscript.is_none()
            && self.color.is_none()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ColorSpec {
    /// Resolves to the fixed default color rather than being copied literally.
    Auto,
    Rgb([u8; 3]),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NumberingRef {
    pub id: String,
    pub level: u8,
}

#[derive(Default)]
pub struct NumberingCatalog {
    pub definitions: HashMap<String, AbstractNumbering>,
}

impl NumberingCatalog {
    pub fn level(&self, id: &str, level: u8) -> Option<&NumberingLevel> {
        self.definitions.get(id).and_then(|d| d.levels.get(&level))
    }
}

#[derive(Default)]
pub struct AbstractNumbering {
    pub levels: HashMap<u8, NumberingLevel>,
}

pub struct NumberingLevel {
    /// Only bullet levels decorate paragraphs; ordinal formats are skipped.
    pub bullet: bool,
    pub glyph: String,
    pub indent_left: Twips,
    pub indent_hanging: Twips,
    pub paragraph: ParagraphProps,
}
