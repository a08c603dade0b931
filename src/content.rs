//! The layout buffer model: columns accumulate rows of measured content,
//! and pagination drains them row by row.

use std::collections::VecDeque;

use crate::error::Overflow;
use crate::model::{ImageRef, Twips};
use crate::style::{Borders, FontConfig, HAlignment, VAlignment};

/// A measured fragment placed on a line. Extents are precomputed by the
/// text-metrics / image-resolver collaborators.
#[derive(Clone, Debug)]
pub enum Content {
    /// Pure horizontal advance, nothing drawn.
    Spacer { width: Twips, height: Twips },
    Text {
        width: Twips,
        height: Twips,
        text: String,
    },
    Image {
        width: Twips,
        height: Twips,
        image: ImageRef,
    },
}

impl Content {
    pub fn width(&self) -> Twips {
        match self {
            Content::Spacer { width, .. }
            | Content::Text { width, .. }
            | Content::Image { width, .. } => *width,
        }
    }

    pub fn height(&self) -> Twips {
        match self {
            Content::Spacer { height, .. }
            | Content::Text { height, .. }
            | Content::Image { height, .. } => *height,
        }
    }
}

/// An entry in a line: content, or a style-change marker that takes effect
/// at its position in the flow.
#[derive(Clone, Debug)]
pub enum LineItem {
    Content(Content),
    Font(FontConfig),
    Color([u8; 3]),
    Alignment(HAlignment),
}

/// Horizontally flowed content that must fit its column's width.
#[derive(Debug)]
pub struct Line {
    pub width: Twips,
    pub content_width: Twips,
    pub content_height: Twips,
    pub items: Vec<LineItem>,
}

impl Line {
    pub fn new(width: Twips) -> Self {
        Self {
            width,
            content_width: 0,
            content_height: 0,
            items: Vec::new(),
        }
    }

    pub fn can_fit(&self, content_width: Twips) -> bool {
        self.content_width + content_width <= self.width
    }

    /// Strict append: fails without mutating when the content does not fit.
    pub fn add_content(&mut self, content: Content) -> Result<(), Overflow> {
        if !self.can_fit(content.width()) {
            return Err(Overflow);
        }
        self.add_content_forced(content);
        Ok(())
    }

    /// Unchecked append; may leave `content_width > width`, in which case the
    /// line renders as overflowing rather than erroring.
    pub fn add_content_forced(&mut self, content: Content) {
        self.content_width += content.width();
        self.content_height = self.content_height.max(content.height());
        self.items.push(LineItem::Content(content));
    }

    /// Markers occupy no width and do not affect the line height.
    pub fn add_marker(&mut self, item: LineItem) {
        self.items.push(item);
    }
}

/// Pure vertical space: paragraph spacing, empty paragraphs, cell margins.
#[derive(Debug)]
pub struct BlankRow {
    pub height: Twips,
}

/// Sibling cell columns rendered in lock-step from the same start position.
#[derive(Debug)]
pub struct TableRow {
    pub columns: Vec<Column>,
    pub min_height: Twips,
}

impl TableRow {
    pub fn content_height(&self) -> Twips {
        let cells = self
            .columns
            .iter()
            .map(Column::content_height)
            .max()
            .unwrap_or(0);
        self.min_height.max(cells)
    }

    /// True while any cell still holds undrained rows.
    pub fn has_content(&self) -> bool {
        self.columns.iter().any(|c| !c.is_empty())
    }

    /// Total undrained row count across cells; used to detect a render pass
    /// that made no progress.
    pub fn pending_rows(&self) -> usize {
        self.columns.iter().map(|c| c.rows.len()).sum()
    }
}

#[derive(Debug)]
pub enum Row {
    Line(Line),
    Blank(BlankRow),
    Table(TableRow),
}

impl Row {
    pub fn content_height(&self) -> Twips {
        match self {
            Row::Line(line) => line.content_height,
            Row::Blank(blank) => blank.height,
            Row::Table(table) => table.content_height(),
        }
    }
}

/// A vertical layout region of fixed width accumulating rows.
///
/// Columns are drained, not merely read: pagination removes each fully
/// rendered row. A buffered column suppresses rendering while content keeps
/// accumulating for a later height query (footer probe, table-cell pre-pass).
#[derive(Debug)]
pub struct Column {
    pub x_offset: Twips,
    pub width: Twips,
    pub fill: Option<[u8; 3]>,
    pub borders: Borders,
    pub v_align: Option<VAlignment>,
    pub buffered: bool,
    pub rows: VecDeque<Row>,
    open_line: bool,
}

impl Column {
    pub fn new(x_offset: Twips, width: Twips) -> Self {
        Self {
            x_offset,
            width,
            fill: None,
            borders: Borders::default(),
            v_align: None,
            buffered: false,
            rows: VecDeque::new(),
            open_line: false,
        }
    }

    pub fn content_height(&self) -> Twips {
        self.rows.iter().map(Row::content_height).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// The open line, lazily created at the back of the row queue.
    pub fn current_line(&mut self) -> &mut Line {
        if !self.open_line {
            self.rows.push_back(Row::Line(Line::new(self.width)));
            self.open_line = true;
        }
        match self.rows.back_mut() {
            Some(Row::Line(line)) => line,
            _ => unreachable!("open line is always the back row"),
        }
    }

    /// Width already used on the open line, zero if none is open.
    pub fn current_content_width(&self) -> Twips {
        if !self.open_line {
            return 0;
        }
        match self.rows.back() {
            Some(Row::Line(line)) => line.content_width,
            _ => 0,
        }
    }

    /// Whether `content_width` would fit on the open line (or a fresh one).
    pub fn fits(&self, content_width: Twips) -> bool {
        if !self.open_line {
            return content_width <= self.width;
        }
        match self.rows.back() {
            Some(Row::Line(line)) => line.can_fit(content_width),
            _ => content_width <= self.width,
        }
    }

    /// Close the open line so the next content starts a new one.
    pub fn close_line(&mut self) {
        self.open_line = false;
    }

    /// Close the open line and append blank space when `height > 0`.
    pub fn add_vertical_space(&mut self, height: Twips) {
        if height > 0 {
            self.rows.push_back(Row::Blank(BlankRow { height }));
        }
        self.open_line = false;
    }

    /// Wrap-aware append: fits on the current line, or flushes vertical space
    /// and starts a new line. Fails without mutating when the content cannot
    /// fit even alone on an empty line.
    pub fn add_content(&mut self, content: Content, vertical_space: Twips) -> Result<(), Overflow> {
        if content.width() > self.width {
            return Err(Overflow);
        }
        if !self.fits(content.width()) {
            self.add_vertical_space(vertical_space);
        }
        self.current_line().add_content(content)
    }

    /// Append bypassing the fit check; bullet glyphs and images must render
    /// even when nominally oversized.
    pub fn add_content_forced(&mut self, content: Content) {
        self.current_line().add_content_forced(content);
    }

    /// Zero-height advance through the checked path.
    pub fn add_horizontal_space(
        &mut self,
        width: Twips,
        vertical_space: Twips,
    ) -> Result<(), Overflow> {
        self.add_content(Content::Spacer { width, height: 0 }, vertical_space)
    }

    pub fn add_marker(&mut self, item: LineItem) {
        self.current_line().add_marker(item);
    }

    pub fn add_table_row(&mut self, table_row: TableRow) {
        self.rows.push_back(Row::Table(table_row));
        self.open_line = false;
    }

    pub fn front_row(&self) -> Option<&Row> {
        self.rows.front()
    }

    pub fn front_row_mut(&mut self) -> Option<&mut Row> {
        self.rows.front_mut()
    }

    /// Remove the front row once pagination has fully rendered it.
    pub fn pop_row(&mut self) -> Option<Row> {
        let row = self.rows.pop_front();
        if self.rows.is_empty() {
            self.open_line = false;
        }
        row
    }
}
