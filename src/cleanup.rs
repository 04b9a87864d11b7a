//! Heading text normalization.
//!
//! Layout-derived heading text carries rendering noise: typographic
//! punctuation, markdown emphasis, code spans, separator leftovers and page
//! or footnote numbers glued to the end. [`normalize`] strips all of it and
//! yields the canonical form used both for display and for comparing
//! headings against table-of-contents entries.
//!
//! Every stage only removes characters or maps them to ASCII, and the
//! stages are repeated until the text stops changing, so the function is
//! idempotent.

use std::sync::LazyLock;

use regex::{Captures, Regex};
use unicode_normalization::UnicodeNormalization;

/// Typographic characters and their ASCII replacements.
const TYPOGRAPHIC_MAP: &[(char, &str)] = &[
    ('\u{2018}', "'"),   // left single quote
    ('\u{2019}', "'"),   // right single quote
    ('\u{201C}', "\""),  // left double quote
    ('\u{201D}', "\""),  // right double quote
    ('\u{2013}', "-"),   // en dash
    ('\u{2014}', "-"),   // em dash
    ('\u{2026}', "..."), // ellipsis
    ('\u{00A0}', " "),   // no-break space
    ('\u{FB00}', "ff"),  // ﬀ
    ('\u{FB01}', "fi"),  // ﬁ
    ('\u{FB02}', "fl"),  // ﬂ
    ('\u{FB03}', "ffi"), // ﬃ
    ('\u{FB04}', "ffl"), // ﬄ
];

/// Words after which a trailing number is part of the heading ("Chapter 1").
const NUMBERED_LABELS: &[&str] = &[
    "annex", "appendix", "article", "book", "chapter", "clause", "day", "exercise", "figure",
    "lesson", "level", "module", "no", "part", "phase", "question", "schedule", "section",
    "stage", "step", "table", "task", "unit", "version", "volume", "week",
];

static CODE_SPAN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"`([^`]+)`").expect("valid regex"));

// A digit run glued to the closing delimiter is captured so it stays a
// separate token once the delimiters are gone.
static BOLD_STAR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"_?\*\*(.*?)\*\*_?(\d*)").expect("valid regex"));

static BOLD_UNDERSCORE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"__(.+?)__(\d*)").expect("valid regex"));

static ITALIC_STAR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\*([^*\s](?:[^*]*[^*\s])?)\*").expect("valid regex"));

static ITALIC_UNDERSCORE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(^|[^\w])_([^_\s](?:[^_]*[^_\s])?)_([^\w]|$)").expect("valid regex")
});

static SEPARATOR_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"[.\-,"=]{2,}"#).expect("valid regex"));

static TRAILING_NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b\d+$").expect("valid regex"));

static EMPHASIS_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:_?\*\*(.+?)\*\*_?|__(.+?)__)$").expect("valid regex")
});

/// Normalize heading text to its canonical form.
///
/// # Example
///
/// ```
/// use unoutline::cleanup::normalize;
///
/// assert_eq!(normalize("**Chapter 1** 42"), "Chapter 1");
/// assert_eq!(normalize("“Results” – `summary`"), "\"Results\" - summary");
/// ```
pub fn normalize(text: &str) -> String {
    let mut current = normalize_once(text);
    loop {
        let next = normalize_once(&current);
        if next == current {
            return current;
        }
        current = next;
    }
}

/// Unicode NFC plus the typographic replacement table.
///
/// This is the only stage applied to raw markdown lines before heading
/// markers are recognized.
pub fn normalize_punctuation(text: &str) -> String {
    let composed: String = text.nfc().collect();
    let mut result = String::with_capacity(composed.len());
    for c in composed.chars() {
        match TYPOGRAPHIC_MAP.iter().find(|(from, _)| *from == c) {
            Some((_, to)) => result.push_str(to),
            None => result.push(c),
        }
    }
    result
}

/// Return the inner text if the whole line is a single bold run.
///
/// Recognizes `**text**`, `_**text**_` and `__text__`. Lines holding more
/// than one run (`**a** and **b**`) are not a single run.
pub fn emphasis_run(line: &str) -> Option<&str> {
    let caps = EMPHASIS_LINE.captures(line.trim())?;
    let inner = caps.get(1).or_else(|| caps.get(2))?.as_str();
    if inner.contains("**") || inner.contains("__") || inner.trim().is_empty() {
        return None;
    }
    Some(inner)
}

fn normalize_once(text: &str) -> String {
    let mut result = normalize_punctuation(text);
    result = strip_code_spans(&result);
    result = strip_emphasis(&result);
    result = SEPARATOR_RUN.replace_all(&result, "").into_owned();
    result = collapse_whitespace(&result);
    strip_trailing_markers(&result)
}

fn strip_code_spans(text: &str) -> String {
    CODE_SPAN.replace_all(text, "${1}").into_owned()
}

fn strip_emphasis(text: &str) -> String {
    let keep_marker_apart = |caps: &Captures| match caps.get(2).map(|m| m.as_str()) {
        Some(digits) if !digits.is_empty() => format!("{} {}", &caps[1], digits),
        _ => caps[1].to_string(),
    };

    let result = BOLD_STAR.replace_all(text, keep_marker_apart);
    let result = BOLD_UNDERSCORE.replace_all(&result, keep_marker_apart);
    let result = ITALIC_STAR.replace_all(&result, "${1}");
    ITALIC_UNDERSCORE
        .replace_all(&result, "${1}${2}${3}")
        .into_owned()
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Drop a trailing digit run that starts at a word boundary (page numbers,
/// footnote markers).
///
/// Expects whitespace-collapsed input. A number right after a numbered
/// label is kept.
fn strip_trailing_markers(text: &str) -> String {
    let mut current = text;

    while let Some(marker) = TRAILING_NUMBER.find(current) {
        let head = &current[..marker.start()];
        let follows_label = head.ends_with(' ')
            && head
                .trim_end()
                .rsplit(' ')
                .next()
                .is_some_and(is_numbered_label);
        if follows_label {
            break;
        }
        current = head.trim_end();
    }

    current.to_string()
}

fn is_numbered_label(token: &str) -> bool {
    let word = token.trim_end_matches(['.', ':']).to_lowercase();
    NUMBERED_LABELS.contains(&word.as_str())
}
