//! The layout engine: a depth-first walker over the document tree feeding
//! measured content into columns, and the pagination loop draining them.
//!
//! One `Engine` value owns the render cursor, the cascade state and the
//! collaborator handles for the whole conversion; everything is threaded
//! through `&mut self`, so the traversal is strictly sequential.

mod render;
mod table;
mod wrap;

use std::collections::VecDeque;

use crate::content::{Column, Content, LineItem};
use crate::error::Error;
use crate::image::ImageResolver;
use crate::metrics::TextMetrics;
use crate::model::{
    Block, BreakKind, Document, Hyperlink, Image as ImageNode, Inline, NumberingRef, PageLayout,
    Paragraph, Run, RunContent, Twips,
};
use crate::sink::DrawingSink;
use crate::style::{self, FontConfig, HAlignment, Style};

pub(crate) struct Engine<'a> {
    doc: &'a Document,
    sink: &'a mut dyn DrawingSink,
    metrics: &'a dyn TextMetrics,
    images: &'a dyn ImageResolver,
    /// Section geometry queue, consumed front-to-back at section boundaries.
    layouts: VecDeque<&'a PageLayout>,
    layout: &'a PageLayout,
    page: u32,
    cursor: Cursor,
    /// Post-header body start of the current page.
    body_start: Twips,
    default_style: Style,
    para_style: Style,
    run_style: Option<Style>,
    emitted_font: Option<FontConfig>,
    emitted_color: Option<[u8; 3]>,
    emitted_alignment: HAlignment,
}

/// Mutable render state, reset per page.
struct Cursor {
    y: Twips,
    /// Page bottom bound for body flow: footer start or bottom margin.
    end_position: Twips,
    page_width: Twips,
    page_height: Twips,
    h_align: HAlignment,
    table_nesting: u32,
    /// Last font/color applied to the sink, replayed onto each new page.
    font: Option<FontConfig>,
    color: Option<[u8; 3]>,
}

impl<'a> Engine<'a> {
    pub(crate) fn new(
        doc: &'a Document,
        sink: &'a mut dyn DrawingSink,
        metrics: &'a dyn TextMetrics,
        images: &'a dyn ImageResolver,
    ) -> Result<Self, Error> {
        let first = doc.sections.first().ok_or(Error::MissingPageLayout)?;
        let default_style = doc.styles.defaults.clone();

        Ok(Self {
            layouts: doc.sections.iter().map(|s| &s.layout).collect(),
            layout: &first.layout,
            page: 1,
            cursor: Cursor {
                y: 0,
                end_position: 0,
                page_width: 0,
                page_height: 0,
                h_align: HAlignment::Left,
                table_nesting: 0,
                font: None,
                color: None,
            },
            body_start: 0,
            para_style: default_style.clone(),
            default_style,
            run_style: None,
            emitted_font: None,
            emitted_color: None,
            emitted_alignment: HAlignment::Left,
            doc,
            sink,
            metrics,
            images,
        })
    }

    /// Convert the whole document; returns the number of pages begun.
    pub(crate) fn run(&mut self) -> Result<u32, Error> {
        let doc = self.doc;
        for section in &doc.sections {
            self.advance_section()?;
            let layout = self.layout;
            let mut column = Column::new(
                layout.left_margin,
                layout.width - layout.left_margin - layout.right_margin,
            );
            self.walk_blocks(&section.blocks, &mut column)?;
            self.flush(&mut column)?;
        }
        Ok(self.page - 1)
    }

    pub(super) fn walk_blocks(
        &mut self,
        blocks: &'a [Block],
        column: &mut Column,
    ) -> Result<(), Error> {
        for block in blocks {
            match block {
                Block::Paragraph(paragraph) => self.paragraph(paragraph, column)?,
                Block::Table(table) => self.process_table(table, column)?,
            }
        }
        Ok(())
    }

    fn paragraph(&mut self, paragraph: &'a Paragraph, column: &mut Column) -> Result<(), Error> {
        let style = style::apply_paragraph(&self.default_style, &paragraph.props, &self.doc.styles);

        // Spacing before is suppressed at the top of the body.
        if self.cursor.y != self.body_start {
            column.add_vertical_space(style.space_before);
        }

        self.para_style = style;
        if self.para_style.alignment != self.emitted_alignment {
            column.add_marker(LineItem::Alignment(self.para_style.alignment));
            self.emitted_alignment = self.para_style.alignment;
        }

        if let Some(numbering) = &paragraph.props.numbering {
            self.bullet(numbering, column);
        } else {
            let first_line_shift = self.para_style.indent_left - self.para_style.indent_hanging;
            if first_line_shift > 0 && column.add_horizontal_space(first_line_shift, 0).is_err() {
                log::warn!("paragraph indent exceeds column width, ignoring");
            }
        }

        if paragraph.children.is_empty() {
            let height = self.metrics.measure(&self.para_style.font, "").height;
            column.add_vertical_space(height);
        } else {
            for child in &paragraph.children {
                match child {
                    Inline::Run(run) => self.text_run(run, column)?,
                    Inline::Hyperlink(link) => self.hyperlink(link, column)?,
                }
            }
        }

        column.add_vertical_space(self.para_style.space_after);
        self.flush(column)
    }

    fn text_run(&mut self, run: &'a Run, column: &mut Column) -> Result<(), Error> {
        let style = style::apply_run(&self.para_style, &run.props);
        self.emit_style_markers(column, &style);
        self.run_style = Some(style);

        if run.content.is_empty() {
            if !run.props.is_empty() {
                // A contentless run carrying explicit properties still
                // advances by one empty line height.
                self.cursor.y += self.metrics.measure(&self.para_style.font, "").height;
            }
            return Ok(());
        }

        for item in &run.content {
            match item {
                RunContent::Text(text) => self.wrap_text(text, column)?,
                RunContent::Tab => self.advance_tab(column),
                RunContent::Break(BreakKind::Line) => self.flush(column)?,
                RunContent::Break(BreakKind::Page) => {
                    self.flush(column)?;
                    self.create_page_from_layout()?;
                }
                RunContent::Image(image) => self.inline_image(image, column)?,
            }
        }
        Ok(())
    }

    fn hyperlink(&mut self, link: &'a Hyperlink, column: &mut Column) -> Result<(), Error> {
        for run in &link.runs {
            self.text_run(run, column)?;
        }
        Ok(())
    }

    fn inline_image(&mut self, image: &ImageNode, column: &mut Column) -> Result<(), Error> {
        if !column.fits(image.width) {
            self.flush(column)?;
        }
        column.add_content_forced(Content::Image {
            width: image.width,
            height: image.height,
            image: image.source.clone(),
        });
        Ok(())
    }

    /// Hanging-indent bullet decoration, driven by the numbering level's own
    /// indent values.
    fn bullet(&mut self, numbering: &NumberingRef, column: &mut Column) {
        let Some(level) = self.doc.numbering.level(&numbering.id, numbering.level) else {
            log::warn!(
                "no numbering definition for id '{}' level {}, skipping bullet",
                numbering.id,
                numbering.level
            );
            return;
        };
        if !level.bullet {
            // Ordinal formats are not rendered.
            return;
        }

        self.para_style =
            style::apply_paragraph(&self.para_style, &level.paragraph, &self.doc.styles);
        let bullet_style = self.para_style.clone();
        self.emit_style_markers(column, &bullet_style);

        let glyph = self.metrics.measure(&bullet_style.font, &level.glyph);
        let lead = level.indent_left - level.indent_hanging;
        if lead > 0 && column.add_horizontal_space(lead, 0).is_err() {
            log::warn!("bullet indent exceeds column width, ignoring");
        }
        column.add_content_forced(Content::Text {
            width: glyph.width,
            height: glyph.height,
            text: level.glyph.clone(),
        });
        if level.indent_hanging > 0 && column.add_horizontal_space(level.indent_hanging, 0).is_err()
        {
            log::warn!("bullet hanging indent exceeds column width, ignoring");
        }
    }

    /// Push font/color markers only when they differ from what the sink has
    /// last been told; `FontConfig` equality is what elides the rest.
    fn emit_style_markers(&mut self, column: &mut Column, style: &Style) {
        if self.emitted_font.as_ref() != Some(&style.font) {
            column.add_marker(LineItem::Font(style.font.clone()));
            self.emitted_font = Some(style.font.clone());
        }
        if self.emitted_color != Some(style.color) {
            column.add_marker(LineItem::Color(style.color));
            self.emitted_color = Some(style.color);
        }
    }

    /// Close the open line and render everything queued in the column.
    pub(super) fn flush(&mut self, column: &mut Column) -> Result<(), Error> {
        column.close_line();
        let height = column.content_height();
        self.render_column(column, false, false, height)
    }
}
