//! Integration tests for the font-metrics pipeline.

use unoutline::render::{to_json, JsonFormat};
use unoutline::{outline_from_fragments, Fragment, HeadingLevel, OutlineOptions};

fn report_fragments() -> Vec<Fragment> {
    vec![
        Fragment::new(1, 24.0, "Report Title"),
        Fragment::new(1, 18.0, "Intro"),
        Fragment::new(2, 18.0, "Methods"),
        Fragment::new(2, 12.0, "body text"),
    ]
}

#[test]
fn test_two_level_report() {
    let options = OutlineOptions::new().with_max_levels(2);
    let outline = outline_from_fragments(&report_fragments(), &options);

    assert_eq!(
        to_json(&outline, JsonFormat::Compact).unwrap(),
        concat!(
            r#"{"title":"Report Title","outline":["#,
            r#"{"level":"H1","text":"Report Title","page":1},"#,
            r#"{"level":"H2","text":"Intro","page":1},"#,
            r#"{"level":"H2","text":"Methods","page":2}]}"#
        )
    );
}

#[test]
fn test_deterministic_output() {
    let options = OutlineOptions::default();
    let first = outline_from_fragments(&report_fragments(), &options);
    for _ in 0..10 {
        assert_eq!(outline_from_fragments(&report_fragments(), &options), first);
    }
}

#[test]
fn test_order_page_then_level_then_size() {
    let fragments = vec![
        Fragment::new(2, 14.0, "Sub on two"),
        Fragment::new(1, 14.0, "Sub on one"),
        Fragment::new(2, 20.0, "Top on two"),
        Fragment::new(1, 20.0, "Top on one"),
        Fragment::new(1, 10.0, "Body"),
    ];
    let outline = outline_from_fragments(&fragments, &OutlineOptions::new().with_max_levels(2));

    let entries: Vec<(u32, &str)> = outline
        .outline
        .iter()
        .map(|e| (e.page, e.text.as_str()))
        .collect();
    assert_eq!(
        entries,
        vec![
            (1, "Top on one"),
            (1, "Sub on one"),
            (2, "Top on two"),
            (2, "Sub on two"),
        ]
    );
}

#[test]
fn test_equal_keys_keep_extraction_order() {
    let fragments = vec![
        Fragment::new(1, 16.0, "Second"),
        Fragment::new(1, 16.0, "First"),
        Fragment::new(1, 9.0, "Body"),
    ];
    let outline = outline_from_fragments(&fragments, &OutlineOptions::new().with_max_levels(1));

    assert_eq!(outline.title, "Second");
    let texts: Vec<&str> = outline.outline.iter().map(|e| e.text.as_str()).collect();
    assert_eq!(texts, vec!["Second", "First"]);
}

#[test]
fn test_hard_cutoff_on_distinct_sizes() {
    let fragments: Vec<Fragment> = [30.0, 26.0, 22.0, 18.0, 14.0, 10.0]
        .iter()
        .enumerate()
        .map(|(i, size)| Fragment::new(1, *size, format!("Size {}", i)))
        .collect();

    let outline = outline_from_fragments(&fragments, &OutlineOptions::default());
    assert_eq!(outline.len(), 3);
    assert_eq!(
        outline.levels().into_iter().collect::<Vec<_>>(),
        vec![HeadingLevel::H1, HeadingLevel::H2, HeadingLevel::H3]
    );
}

#[test]
fn test_fewer_sizes_than_levels() {
    // With only two sizes in the document every fragment is a heading
    let fragments = vec![
        Fragment::new(1, 12.0, "Only text"),
        Fragment::new(1, 10.0, "Smaller text"),
    ];
    let outline = outline_from_fragments(&fragments, &OutlineOptions::default());
    assert_eq!(outline.len(), 2);
    assert_eq!(outline.outline[1].level, HeadingLevel::H2);
}

#[test]
fn test_near_identical_sizes_share_a_level() {
    let fragments = vec![
        Fragment::new(1, 18.0, "Chapter A"),
        Fragment::new(2, 17.999_998, "Chapter B"),
        Fragment::new(2, 11.0, "Body"),
        Fragment::new(3, 9.0, "Footnote"),
    ];
    let outline = outline_from_fragments(&fragments, &OutlineOptions::new().with_max_levels(1));

    let texts: Vec<&str> = outline.outline.iter().map(|e| e.text.as_str()).collect();
    assert_eq!(texts, vec!["Chapter A", "Chapter B"]);
}

#[test]
fn test_no_title_without_page_one_candidates() {
    let fragments = vec![
        Fragment::new(2, 20.0, "Late Heading"),
        Fragment::new(1, 8.0, "tiny"),
        Fragment::new(1, 7.0, "tinier"),
        Fragment::new(1, 6.0, "tiniest"),
    ];
    let outline = outline_from_fragments(&fragments, &OutlineOptions::new().with_max_levels(1));

    assert_eq!(outline.title, "");
    assert_eq!(outline.len(), 1);

    let options = OutlineOptions::new()
        .with_max_levels(1)
        .with_untitled("Untitled");
    assert_eq!(outline_from_fragments(&fragments, &options).title, "Untitled");
}

#[test]
fn test_heading_text_is_cleaned() {
    let fragments = vec![
        Fragment::new(1, 20.0, "**Overview** ........ 3"),
        Fragment::new(1, 10.0, "Body"),
    ];
    let outline = outline_from_fragments(&fragments, &OutlineOptions::new().with_max_levels(1));

    assert_eq!(outline.title, "Overview");
    assert_eq!(outline.outline[0].text, "Overview");
}

#[test]
fn test_empty_input() {
    let outline = outline_from_fragments(&[], &OutlineOptions::default());
    assert_eq!(outline.title, "");
    assert!(outline.is_empty());
}
