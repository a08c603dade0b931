//! Pagination: the render loop that drains columns row by row, decides page
//! breaks against the body bottom bound, and drives page initiation
//! (header/footer layout) on every new page.

use crate::content::{Column, Content, Line, LineItem, Row, TableRow};
use crate::error::Error;
use crate::model::Twips;
use crate::style::{DEFAULT_COLOR, HAlignment};

use super::Engine;

enum Peek {
    Line(Twips),
    Blank(Twips),
    Table,
}

impl<'a> Engine<'a> {
    /// Render the column's rows at the current cursor position.
    ///
    /// `force` bypasses the page-bottom check (footers must land on the page
    /// being initiated); `delay` returns instead of breaking the page so that
    /// table cells leave their remainder queued for the continuation pass;
    /// `content_height` is the vertical span the fill/border decorations
    /// cover — the row height for table cells, the column's own height
    /// otherwise.
    pub(super) fn render_column(
        &mut self,
        column: &mut Column,
        force: bool,
        delay: bool,
        content_height: Twips,
    ) -> Result<(), Error> {
        if column.buffered {
            // Measurement-only pass; content stays queued for a height query.
            return Ok(());
        }

        self.paint_decorations(column, content_height);

        loop {
            let peek = match column.front_row() {
                None => break,
                Some(Row::Line(line)) => Peek::Line(line.content_height),
                Some(Row::Blank(blank)) => Peek::Blank(blank.height),
                Some(Row::Table(_)) => Peek::Table,
            };

            match peek {
                Peek::Line(height) => {
                    if !force && self.cursor.y + height > self.cursor.end_position {
                        if delay {
                            return Ok(());
                        }
                        self.new_page()?;
                    }
                    let Some(Row::Line(line)) = column.pop_row() else {
                        unreachable!("peeked row vanished");
                    };
                    self.render_line(&line, column.x_offset);
                }
                Peek::Blank(height) => {
                    self.cursor.y += height;
                    column.pop_row();
                }
                Peek::Table => {
                    self.cursor.table_nesting += 1;
                    let outcome = match column.front_row_mut() {
                        Some(Row::Table(table_row)) => self.render_table_row(table_row),
                        _ => unreachable!("peeked row vanished"),
                    };
                    self.cursor.table_nesting -= 1;
                    outcome?;

                    let drained = match column.front_row() {
                        Some(Row::Table(table_row)) => !table_row.has_content(),
                        _ => true,
                    };

                    // Only the outermost table row triggers page breaks; a
                    // nested row with remaining content is left queued for
                    // the outer continuation pass.
                    if self.cursor.table_nesting > 0 {
                        if drained {
                            column.pop_row();
                            continue;
                        }
                        return Ok(());
                    }
                    self.continue_table_row(column)?;
                    column.pop_row();
                }
            }
        }
        Ok(())
    }

    /// Re-render a partially drained table row on fresh pages until its cells
    /// are empty, keeping every continuation cell anchored at the same y.
    fn continue_table_row(&mut self, column: &mut Column) -> Result<(), Error> {
        loop {
            let pending = match column.front_row() {
                Some(Row::Table(table_row)) if table_row.has_content() => {
                    table_row.pending_rows()
                }
                _ => return Ok(()),
            };

            self.new_page()?;
            match column.front_row_mut() {
                Some(Row::Table(table_row)) => self.render_table_row(table_row)?,
                _ => unreachable!("peeked row vanished"),
            }

            let remaining = match column.front_row() {
                Some(Row::Table(table_row)) => table_row.pending_rows(),
                _ => 0,
            };
            if remaining == pending {
                log::error!("table row taller than a page, dropping {remaining} queued rows");
                return Ok(());
            }
        }
    }

    /// Render every cell column from the same start position, tracking the
    /// lowest point any cell reaches.
    fn render_table_row(&mut self, row: &mut TableRow) -> Result<(), Error> {
        let start = self.cursor.y;
        let height = row.content_height();
        let mut max_y = start;

        for cell in row.columns.iter_mut() {
            self.cursor.y = start;
            self.render_column(cell, false, true, height)?;
            max_y = max_y.max(self.cursor.y);
        }

        self.cursor.y = if row.has_content() {
            max_y
        } else {
            // A fully drained row still occupies its minimum height.
            max_y.max(start + height)
        };
        Ok(())
    }

    fn render_line(&mut self, line: &Line, origin: Twips) {
        self.cursor.y += line.content_height;

        // The last alignment marker inside the line wins; otherwise the
        // cursor's sticky alignment applies (wrapped continuation lines).
        let mut alignment = self.cursor.h_align;
        for item in &line.items {
            if let LineItem::Alignment(a) = item {
                alignment = *a;
            }
        }

        let mut x = origin
            + match alignment {
                HAlignment::Right => line.width - line.content_width,
                HAlignment::Center => (line.width - line.content_width) / 2,
                HAlignment::Left => 0,
            };

        for item in &line.items {
            match item {
                LineItem::Content(Content::Text { width, text, .. }) => {
                    self.sink.draw_text(text, x, self.cursor.y);
                    x += *width;
                }
                LineItem::Content(Content::Image {
                    width,
                    height,
                    image,
                }) => {
                    match self.images.resolve(image) {
                        Ok(data) => self.sink.draw_image(
                            image,
                            &data,
                            x,
                            self.cursor.y - *height,
                            *width,
                            *height,
                        ),
                        // The reserved box stays; only the draw is skipped.
                        Err(err) => log::error!("skipping image '{}': {err}", image.0),
                    }
                    x += *width;
                }
                LineItem::Content(Content::Spacer { width, .. }) => x += *width,
                LineItem::Font(font) => {
                    self.sink.set_font(font);
                    self.cursor.font = Some(font.clone());
                }
                LineItem::Color(color) => {
                    self.sink.set_color(*color);
                    self.cursor.color = Some(*color);
                }
                LineItem::Alignment(a) => self.cursor.h_align = *a,
            }
        }
    }

    fn paint_decorations(&mut self, column: &Column, content_height: Twips) {
        if column.fill.is_none() && column.borders.is_empty() {
            return;
        }
        let x = column.x_offset;
        let y = self.cursor.y;
        let w = column.width;

        if let Some(fill) = column.fill {
            self.sink.set_color(fill);
            self.sink.fill_rect(x, y, w, content_height);
        }
        if let Some(border) = column.borders.top {
            self.sink.set_color(border.color);
            self.sink.draw_line(x, y, x + w, y, border.size);
        }
        if let Some(border) = column.borders.right {
            self.sink.set_color(border.color);
            self.sink
                .draw_line(x + w, y, x + w, y + content_height, border.size);
        }
        if let Some(border) = column.borders.bottom {
            self.sink.set_color(border.color);
            self.sink
                .draw_line(x, y + content_height, x + w, y + content_height, border.size);
        }
        if let Some(border) = column.borders.left {
            self.sink.set_color(border.color);
            self.sink.draw_line(x, y, x, y + content_height, border.size);
        }

        self.sink
            .set_color(self.cursor.color.unwrap_or(DEFAULT_COLOR));
    }

    pub(super) fn new_page(&mut self) -> Result<(), Error> {
        self.create_page_from_layout()
    }

    /// Cross into the next section: pop its page geometry and start a page.
    pub(super) fn advance_section(&mut self) -> Result<(), Error> {
        self.layout = self.layouts.pop_front().ok_or(Error::MissingPageLayout)?;
        self.create_page_from_layout()
    }

    /// Two-phase page initiation: begin the page, lay out the header at the
    /// header margin, measure the footer in a buffered column and render it
    /// forced so its bottom aligns with the footer margin, then publish the
    /// body bounds and reset the cursor to the post-header start.
    pub(super) fn create_page_from_layout(&mut self) -> Result<(), Error> {
        let layout = self.layout;

        self.cursor.y = 0;
        self.cursor.page_width = layout.width;
        self.cursor.page_height = layout.height;
        self.cursor.end_position = layout.height;
        self.sink
            .begin_page(self.cursor.page_width, self.cursor.page_height);

        // Carry the active font and color across the page boundary.
        if let Some(font) = self.cursor.font.clone() {
            self.sink.set_font(&font);
        }
        if let Some(color) = self.cursor.color {
            self.sink.set_color(color);
        }

        let page = self.page;

        if let Some(header) = layout.headers.for_page(page) {
            self.cursor.y = layout.header_margin;
            let mut column = Column::new(layout.left_margin, layout.width);
            self.walk_blocks(&header.blocks, &mut column)?;
            self.flush(&mut column)?;
        }

        let mut end_position = layout.height - layout.bottom_margin;
        if let Some(footer) = layout.footers.for_page(page) {
            let mut column = Column::new(layout.left_margin, layout.width);
            column.buffered = true;
            self.cursor.y = layout.height;
            self.walk_blocks(&footer.blocks, &mut column)?;
            column.buffered = false;

            let footer_height = column.content_height();
            let footer_top = layout.height - layout.footer_margin - footer_height;
            self.cursor.y = footer_top;
            self.render_column(&mut column, true, false, footer_height)?;
            end_position = end_position.min(footer_top);
        }

        self.cursor.end_position = end_position;
        self.page += 1;
        self.cursor.y = layout.top_margin;
        self.body_start = layout.top_margin;
        Ok(())
    }
}
