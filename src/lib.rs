//! docflow converts a styled document tree into page-sized drawing command
//! streams.
//!
//! The caller supplies the parsed document ([`model::Document`]), a drawing
//! sink receiving the per-page commands, a text-metrics provider, and an
//! image resolver; [`render`] walks the tree, wraps and paginates the
//! content, and drives the sink. Parsing the source container and producing
//! the final raster/PDF output are the caller's business.

pub mod content;
mod error;
pub mod image;
mod layout;
pub mod metrics;
pub mod model;
pub mod sink;
pub mod style;

pub use error::{Error, Overflow};
pub use model::Twips;

use std::time::Instant;

use crate::image::ImageResolver;
use crate::metrics::TextMetrics;
use crate::model::Document;
use crate::sink::DrawingSink;

/// Convert `doc` into drawing commands, emitted to `sink` page by page.
pub fn render(
    doc: &Document,
    sink: &mut dyn DrawingSink,
    metrics: &dyn TextMetrics,
    images: &dyn ImageResolver,
) -> Result<(), Error> {
    let t0 = Instant::now();

    let mut engine = layout::Engine::new(doc, sink, metrics, images)?;
    let pages = engine.run()?;

    log::info!(
        "Layout: {} section(s) onto {} page(s) in {:.1}ms",
        doc.sections.len(),
        pages,
        t0.elapsed().as_secs_f64() * 1000.0,
    );

    Ok(())
}
