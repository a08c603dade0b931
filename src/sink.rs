//! The drawing sink: the engine's only output channel.

use crate::image::ImageData;
use crate::model::{ImageRef, Twips};
use crate::style::FontConfig;

/// Receives an ordered stream of drawing commands per page.
///
/// Commands arrive in document order within a page and pages are requested
/// strictly in increasing order; a page's footer is finalized during that
/// page's initiation, before any body content. The sink feeds nothing back.
///
/// Coordinates use the same twips unit as page geometry; the y axis grows
/// downward from the page top. `draw_text` receives the line's bottom edge,
/// `draw_image` the image's top-left corner.
pub trait DrawingSink {
    fn begin_page(&mut self, width: Twips, height: Twips);

    fn set_color(&mut self, color: [u8; 3]);

    fn set_font(&mut self, font: &FontConfig);

    fn draw_text(&mut self, text: &str, x: Twips, y: Twips);

    fn draw_image(
        &mut self,
        image: &ImageRef,
        data: &ImageData,
        x: Twips,
        y: Twips,
        width: Twips,
        height: Twips,
    );

    fn draw_line(&mut self, x1: Twips, y1: Twips, x2: Twips, y2: Twips, thickness: Twips);

    fn fill_rect(&mut self, x: Twips, y: Twips, width: Twips, height: Twips);
}
