//! Word wrap, tabs, and line alignment, observed through the command stream.

mod common;

use common::{CHAR_W, FixedMetrics, LINE_H, NoImages, RecordingSink, para, word_soup};
use docflow::model::{Block, Inline, Paragraph, ParagraphProps, Run, RunContent};
use docflow::style::HAlignment;

#[test]
fn short_text_stays_on_one_line() {
    common::init_logs();
    let doc = common::doc_with(common::narrow_layout(), vec![para("hello")]);
    let mut sink = RecordingSink::new();
    docflow::render(&doc, &mut sink, &FixedMetrics, &NoImages).unwrap();

    assert_eq!(sink.pages.len(), 1);
    let texts = sink.texts(0);
    assert_eq!(texts, vec![("hello", 100, 1000 + LINE_H)]);
}

#[test]
fn long_paragraph_wraps_to_seven_increasing_lines() {
    common::init_logs();
    // 35 nine-character words against a 52-character column: five words per
    // line, seven lines.
    let source = word_soup(35, 9);
    let doc = common::doc_with(common::narrow_layout(), vec![para(&source)]);
    let mut sink = RecordingSink::new();
    docflow::render(&doc, &mut sink, &FixedMetrics, &NoImages).unwrap();

    let texts = sink.texts(0);
    assert_eq!(texts.len(), 7);

    let mut previous_y = 0;
    for &(text, x, y) in &texts {
        assert_eq!(x, 100);
        assert!(y > previous_y, "line y must strictly increase");
        previous_y = y;
        assert!(text.chars().count() as i32 * CHAR_W <= 520);
    }

    let rebuilt = texts
        .iter()
        .map(|&(t, _, _)| t)
        .collect::<Vec<_>>()
        .join(" ");
    assert_eq!(rebuilt, source);
}

#[test]
fn first_word_wider_than_column_splits_by_characters() {
    common::init_logs();
    let word = "a".repeat(60); // 600 twips, column fits 52 chars
    let doc = common::doc_with(common::narrow_layout(), vec![para(&word)]);
    let mut sink = RecordingSink::new();
    docflow::render(&doc, &mut sink, &FixedMetrics, &NoImages).unwrap();

    let texts = sink.texts(0);
    assert_eq!(texts.len(), 2);
    assert_eq!(texts[0].0.len(), 52);
    assert_eq!(texts[1].0.len(), 8);
    let rebuilt: String = texts.iter().map(|&(t, _, _)| t).collect();
    assert_eq!(rebuilt, word);
}

#[test]
fn unfittable_glyph_is_dropped_not_looped() {
    common::init_logs();
    // A 5-twip column cannot hold a single 10-twip character.
    let mut layout = common::narrow_layout();
    layout.width = 205;
    let doc = common::doc_with(layout, vec![para("abc"), para("")]);
    let mut sink = RecordingSink::new();

    // Must terminate; the unfittable text is dropped with a logged error.
    docflow::render(&doc, &mut sink, &FixedMetrics, &NoImages).unwrap();
    assert_eq!(sink.pages.len(), 1);
    assert!(sink.texts(0).is_empty());
}

#[test]
fn tab_advances_to_next_stop() {
    common::init_logs();
    let paragraph = Paragraph {
        props: ParagraphProps::default(),
        children: vec![Inline::Run(Run {
            props: Default::default(),
            content: vec![
                RunContent::Text("ab".into()),
                RunContent::Tab,
                RunContent::Text("cd".into()),
                RunContent::Tab,
                RunContent::Text("ef".into()),
            ],
        })],
    };
    let doc = common::doc_with(
        common::wide_layout(),
        vec![Block::Paragraph(paragraph)],
    );
    let mut sink = RecordingSink::new();
    docflow::render(&doc, &mut sink, &FixedMetrics, &NoImages).unwrap();

    // Tab stops every 712 twips from the column origin at x=1000.
    let texts = sink.texts(0);
    assert_eq!(texts[0], ("ab", 1000, 600));
    assert_eq!(texts[1], ("cd", 1000 + 712, 600));
    assert_eq!(texts[2], ("ef", 1000 + 1424, 600));
}

fn aligned_layout_and_para(alignment: HAlignment) -> docflow::model::Document {
    let paragraph = Paragraph {
        props: ParagraphProps {
            alignment: Some(alignment),
            ..ParagraphProps::default()
        },
        children: vec![Inline::Run(Run::text("hi"))],
    };
    common::doc_with(common::narrow_layout(), vec![Block::Paragraph(paragraph)])
}

#[test]
fn right_alignment_shifts_by_free_width() {
    common::init_logs();
    let doc = aligned_layout_and_para(HAlignment::Right);
    let mut sink = RecordingSink::new();
    docflow::render(&doc, &mut sink, &FixedMetrics, &NoImages).unwrap();
    // x = origin + (width - content_width) = 100 + (520 - 20)
    assert_eq!(sink.texts(0), vec![("hi", 600, 1200)]);
}

#[test]
fn center_alignment_shifts_by_half_free_width() {
    common::init_logs();
    let doc = aligned_layout_and_para(HAlignment::Center);
    let mut sink = RecordingSink::new();
    docflow::render(&doc, &mut sink, &FixedMetrics, &NoImages).unwrap();
    assert_eq!(sink.texts(0), vec![("hi", 350, 1200)]);
}

#[test]
fn font_markers_are_elided_until_the_style_changes() {
    common::init_logs();
    let mut big = Run::text("big");
    big.props.font_size = Some(480);
    let paragraph = Paragraph {
        props: ParagraphProps::default(),
        children: vec![
            Inline::Run(Run::text("one")),
            Inline::Run(Run::text("two")),
            Inline::Run(big),
        ],
    };
    let doc = common::doc_with(
        common::wide_layout(),
        vec![Block::Paragraph(paragraph)],
    );
    let mut sink = RecordingSink::new();
    docflow::render(&doc, &mut sink, &FixedMetrics, &NoImages).unwrap();

    let font_sizes: Vec<i32> = sink.pages[0]
        .commands
        .iter()
        .filter_map(|c| match c {
            common::Command::SetFont { size, .. } => Some(*size),
            _ => None,
        })
        .collect();
    // One set_font for the first run, none for the identical second, one for
    // the resized third.
    assert_eq!(font_sizes, vec![240, 480]);
}

#[test]
fn layout_must_provide_a_section() {
    common::init_logs();
    let doc = docflow::model::Document {
        sections: vec![],
        styles: docflow::model::StyleSheet::empty(),
        numbering: Default::default(),
    };
    let mut sink = RecordingSink::new();
    let err = docflow::render(&doc, &mut sink, &FixedMetrics, &NoImages).unwrap_err();
    assert!(matches!(err, docflow::Error::MissingPageLayout));
}
