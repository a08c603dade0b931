#![allow(dead_code)]

use docflow::Twips;
use docflow::image::{ImageData, ImageResolver, ResourceError};
use docflow::metrics::{Extent, TextMetrics};
use docflow::model::{
    Block, Document, HeaderFooterSet, ImageRef, NumberingCatalog, PageLayout, Paragraph, Section,
    StyleSheet,
};
use docflow::sink::DrawingSink;
use docflow::style::FontConfig;

pub fn init_logs() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Deterministic metrics: every character advances `CHAR_W`, every line is
/// `LINE_H` tall (the empty string included).
pub const CHAR_W: Twips = 10;
pub const LINE_H: Twips = 200;

pub struct FixedMetrics;

impl TextMetrics for FixedMetrics {
    fn measure(&self, _font: &FontConfig, text: &str) -> Extent {
        Extent {
            width: text.chars().count() as Twips * CHAR_W,
            height: LINE_H,
        }
    }
}

pub struct NoImages;

impl ImageResolver for NoImages {
    fn resolve(&self, _image: &ImageRef) -> Result<ImageData, ResourceError> {
        Err(ResourceError::NotFound)
    }
}

/// Resolves every reference to a 1x1 placeholder so draw commands appear.
pub struct StubImages;

impl ImageResolver for StubImages {
    fn resolve(&self, _image: &ImageRef) -> Result<ImageData, ResourceError> {
        Ok(ImageData {
            bytes: vec![0],
            pixel_width: 1,
            pixel_height: 1,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    SetColor([u8; 3]),
    SetFont { name: String, size: Twips },
    Text { text: String, x: Twips, y: Twips },
    Image { key: String, x: Twips, y: Twips, width: Twips, height: Twips },
    Line { x1: Twips, y1: Twips, x2: Twips, y2: Twips, thickness: Twips },
    Rect { x: Twips, y: Twips, width: Twips, height: Twips },
}

pub struct Page {
    pub width: Twips,
    pub height: Twips,
    pub commands: Vec<Command>,
}

/// Captures the command stream per page, the way the engine's sinks see it.
#[derive(Default)]
pub struct RecordingSink {
    pub pages: Vec<Page>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    fn current(&mut self) -> &mut Page {
        self.pages.last_mut().expect("begin_page precedes commands")
    }

    /// Drawn text on a page as (text, x, y) triples.
    pub fn texts(&self, page: usize) -> Vec<(&str, Twips, Twips)> {
        self.pages[page]
            .commands
            .iter()
            .filter_map(|c| match c {
                Command::Text { text, x, y } => Some((text.as_str(), *x, *y)),
                _ => None,
            })
            .collect()
    }
}

impl DrawingSink for RecordingSink {
    fn begin_page(&mut self, width: Twips, height: Twips) {
        self.pages.push(Page {
            width,
            height,
            commands: Vec::new(),
        });
    }

    fn set_color(&mut self, color: [u8; 3]) {
        self.current().commands.push(Command::SetColor(color));
    }

    fn set_font(&mut self, font: &FontConfig) {
        let command = Command::SetFont {
            name: font.name.clone(),
            size: font.size,
        };
        self.current().commands.push(command);
    }

    fn draw_text(&mut self, text: &str, x: Twips, y: Twips) {
        let command = Command::Text {
            text: text.to_string(),
            x,
            y,
        };
        self.current().commands.push(command);
    }

    fn draw_image(
        &mut self,
        image: &ImageRef,
        _data: &ImageData,
        x: Twips,
        y: Twips,
        width: Twips,
        height: Twips,
    ) {
        let command = Command::Image {
            key: image.0.clone(),
            x,
            y,
            width,
            height,
        };
        self.current().commands.push(command);
    }

    fn draw_line(&mut self, x1: Twips, y1: Twips, x2: Twips, y2: Twips, thickness: Twips) {
        self.current()
            .commands
            .push(Command::Line { x1, y1, x2, y2, thickness });
    }

    fn fill_rect(&mut self, x: Twips, y: Twips, width: Twips, height: Twips) {
        self.current()
            .commands
            .push(Command::Rect { x, y, width, height });
    }
}

/// A tall page with a 520-twip body column (52 fixed-width characters).
pub fn narrow_layout() -> PageLayout {
    PageLayout {
        width: 720,
        height: 100_000,
        top_margin: 1000,
        right_margin: 100,
        bottom_margin: 1000,
        left_margin: 100,
        header_margin: 500,
        footer_margin: 500,
        headers: HeaderFooterSet::default(),
        footers: HeaderFooterSet::default(),
    }
}

/// A short page: body flows from y=400 down to 1600, six LINE_H lines.
pub fn short_layout() -> PageLayout {
    PageLayout {
        width: 720,
        height: 2000,
        top_margin: 400,
        right_margin: 100,
        bottom_margin: 400,
        left_margin: 100,
        header_margin: 100,
        footer_margin: 100,
        headers: HeaderFooterSet::default(),
        footers: HeaderFooterSet::default(),
    }
}

/// A wide page for table tests: body starts at x=1000.
pub fn wide_layout() -> PageLayout {
    PageLayout {
        width: 12000,
        height: 10_000,
        top_margin: 400,
        right_margin: 1000,
        bottom_margin: 400,
        left_margin: 1000,
        header_margin: 200,
        footer_margin: 200,
        headers: HeaderFooterSet::default(),
        footers: HeaderFooterSet::default(),
    }
}

pub fn doc_with(layout: PageLayout, blocks: Vec<Block>) -> Document {
    Document {
        sections: vec![Section { layout, blocks }],
        styles: StyleSheet::empty(),
        numbering: NumberingCatalog::default(),
    }
}

pub fn para(text: &str) -> Block {
    Block::Paragraph(Paragraph::text(text))
}

/// `words` space-separated words of `word_len` characters each.
pub fn word_soup(words: usize, word_len: usize) -> String {
    let word: String = std::iter::repeat('a').take(word_len).collect();
    std::iter::repeat(word)
        .take(words)
        .collect::<Vec<_>>()
        .join(" ")
}
