//! Resolved styles and the paragraph/run cascade.
//!
//! Styles are built copy-on-write: every cascade step clones its base and
//! merges only the fields a properties record explicitly carries. Nothing in
//! here holds a reference back into the style sheet, so a resolved [`Style`]
//! can be attached to emitted content without aliasing.

use crate::model::{ColorSpec, ParagraphProps, RunProps, StyleSheet, Twips};

/// Color resolved from the `auto` specifier.
pub const DEFAULT_COLOR: [u8; 3] = [0, 0, 0];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HAlignment {
    Left,
    Center,
    Right,
}

/// Vertical alignment inside a table cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum VAlignment {
    Top,
    Center,
    Bottom,
}

/// Font selection plus style flags. Structural equality is what the walker
/// uses to detect "font changed" transitions, so redundant sink `set_font`
/// commands are elided.
#[derive(Clone, Debug, PartialEq)]
pub struct FontConfig {
    pub name: String,
    /// Size in twips (points x 20).
    pub size: Twips,
    pub bold: bool,
    pub italic: bool,
    pub underline: bool,
    pub strikethrough: bool,
    pub superscript: bool,
}

impl Default for FontConfig {
    fn default() -> Self {
        Self {
            name: "serif".to_string(),
            size: 240,
            bold: false,
            italic: false,
            underline: false,
            strikethrough: false,
            superscript: false,
        }
    }
}

/// A fully resolved paragraph + run style.
#[derive(Clone, Debug, PartialEq)]
pub struct Style {
    pub line_spacing: Twips,
    pub space_before: Twips,
    pub space_after: Twips,
    pub indent_left: Twips,
    pub indent_right: Twips,
    pub indent_hanging: Twips,
    pub alignment: HAlignment,
    pub color: [u8; 3],
    pub font: FontConfig,
}

impl Default for Style {
    fn default() -> Self {
        Self {
            line_spacing: 0,
            space_before: 0,
            space_after: 0,
            indent_left: 0,
            indent_right: 0,
            indent_hanging: 0,
            alignment: HAlignment::Left,
            color: DEFAULT_COLOR,
            font: FontConfig::default(),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Border {
    pub color: [u8; 3],
    pub size: Twips,
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Borders {
    pub top: Option<Border>,
    pub right: Option<Border>,
    pub bottom: Option<Border>,
    pub left: Option<Border>,
}

impl Borders {
    pub fn is_empty(&self) -> bool {
        self.top.is_none() && self.right.is_none() && self.bottom.is_none() && self.left.is_none()
    }
}

/// Resolve paragraph-level properties against a base style.
///
/// A named style reference is resolved first (walking its `based_on` chain
/// down to the base), then the local overrides are merged on top. Absent
/// fields keep the inherited value.
pub fn apply_paragraph(base: &Style, props: &ParagraphProps, sheet: &StyleSheet) -> Style {
    let mut style = match &props.style_id {
        Some(id) => resolve_named(base, id, sheet, &mut Vec::new()),
        None => base.clone(),
    };

    if let Some(v) = props.line_spacing {
        style.line_spacing = v;
    }
    if let Some(v) = props.space_before {
        style.space_before = v;
    }
    if let Some(v) = props.space_after {
        style.space_after = v;
    }
    if let Some(v) = props.indent_left {
        style.indent_left = v;
    }
    if let Some(v) = props.indent_right {
        style.indent_right = v;
    }
    if let Some(v) = props.indent_hanging {
        style.indent_hanging = v;
    }
    if let Some(v) = props.alignment {
        style.alignment = v;
    }

    style
}

/// Resolve run-level properties against a base style.
pub fn apply_run(base: &Style, props: &RunProps) -> Style {
    let mut style = base.clone();

    if let Some(ref name) = props.font_name {
        style.font.name = name.clone();
    }
    if let Some(size) = props.font_size {
        style.font.size = size;
    }
    if let Some(v) = props.bold {
        style.font.bold = v;
    }
    if let Some(v) = props.italic {
        style.font.italic = v;
    }
    if let Some(v) = props.underline {
        style.font.underline = v;
    }
    if let Some(v) = props.strikethrough {
        style.font.strikethrough = v;
    }
    if let Some(v) = props.superscript {
        style.font.superscript = v;
    }
    match props.color {
        Some(ColorSpec::Auto) => style.color = DEFAULT_COLOR,
        Some(ColorSpec::Rgb(rgb)) => style.color = rgb,
        None => {}
    }

    style
}

/// Resolve a named style id, recursing through `based_on` parents. `seen`
/// breaks reference cycles; an unknown id falls back to the inherited base.
fn resolve_named<'a>(
    base: &Style,
    id: &'a str,
    sheet: &'a StyleSheet,
    seen: &mut Vec<&'a str>,
) -> Style {
    let Some(named) = sheet.named.get(id) else {
        log::warn!("unresolved style reference '{id}', using inherited style");
        return base.clone();
    };

    if seen.contains(&id) {
        return base.clone();
    }
    seen.push(id);

    let parent = match &named.based_on {
        Some(parent_id) => resolve_named(base, parent_id, sheet, seen),
        None => base.clone(),
    };

    let style = merge_paragraph_fields(&parent, &named.paragraph);
    apply_run(&style, &named.run)
}

/// Field-by-field paragraph merge without following a nested style id; named
/// styles reference each other through `based_on`, not through `style_id`.
fn merge_paragraph_fields(base: &Style, props: &ParagraphProps) -> Style {
    let mut detached = props.clone();
    detached.style_id = None;
    // The sheet is not consulted on this path, so an empty one is fine.
    apply_paragraph(base, &detached, &StyleSheet::empty())
}
