//! Greedy word wrap and tab advancement.

use crate::content::{Column, Content};
use crate::error::Error;
use crate::model::Twips;

use super::Engine;

/// Fixed tab interval.
const TAB_WIDTH: Twips = 712;

impl<'a> Engine<'a> {
    /// Fit text into the column, wrapping across lines as needed.
    ///
    /// The whole text is tried first; otherwise words are accumulated
    /// greedily, measuring the joined candidate after each addition so the
    /// inter-word space width is counted. When not even the first word fits,
    /// a character-by-character pass takes what does. Each emitted piece is
    /// followed by a line flush, then the trimmed remainder recurses. If no
    /// progress can be made (a single glyph wider than the column) the
    /// remainder is dropped with a logged error rather than looping.
    pub(super) fn wrap_text(&mut self, text: &str, column: &mut Column) -> Result<(), Error> {
        if text.is_empty() {
            return Ok(());
        }

        let font = match &self.run_style {
            Some(style) => style.font.clone(),
            None => self.para_style.font.clone(),
        };

        let extent = self.metrics.measure(&font, text);
        if column.fits(extent.width) {
            column.add_content_forced(Content::Text {
                width: extent.width,
                height: extent.height,
                text: text.to_string(),
            });
            return Ok(());
        }

        let mut fitted = String::new();
        for (i, word) in text.split(' ').enumerate() {
            let candidate = if fitted.is_empty() {
                word.to_string()
            } else {
                format!("{fitted} {word}")
            };
            if !column.fits(self.metrics.measure(&font, &candidate).width) {
                if i == 0 {
                    for ch in text.chars() {
                        let mut probe = fitted.clone();
                        probe.push(ch);
                        if column.fits(self.metrics.measure(&font, &probe).width) {
                            fitted.push(ch);
                        } else {
                            break;
                        }
                    }
                }
                break;
            }
            fitted = candidate;
        }

        let remainder = text[fitted.len()..].trim();
        if remainder == text {
            log::error!("unable to fit content, skipping: {remainder}");
            return Ok(());
        }

        if !fitted.is_empty() {
            let fitted_extent = self.metrics.measure(&font, &fitted);
            column.add_content_forced(Content::Text {
                width: fitted_extent.width,
                height: fitted_extent.height,
                text: fitted,
            });
        }
        self.flush(column)?;
        self.wrap_text(remainder, column)
    }

    /// Advance to the next tab stop. A tab that cannot reach its stop on the
    /// current line advances by exactly one interval instead of wrapping.
    pub(super) fn advance_tab(&mut self, column: &mut Column) {
        let used = column.current_content_width();
        let offset = TAB_WIDTH - (used % TAB_WIDTH);
        if column.fits(offset) {
            column.add_horizontal_space(offset, 0).ok();
        } else {
            column.add_content_forced(Content::Spacer {
                width: TAB_WIDTH,
                height: 0,
            });
        }
    }
}
