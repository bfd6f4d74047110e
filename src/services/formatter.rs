//! Verse number formatting for liturgical text.
//!
//! The service embeds verse numbers straight into the text: sometimes
//! separated from the first word by a space ("12 João"), sometimes glued to
//! it ("12João"). Separated numbers are emphasized; glued numbers get a single
//! space and stay plain. Everything else, line breaks included, passes
//! through untouched.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// A maximal digit run, the whitespace after it (possibly none) and the
    /// letter that follows. Letters are ASCII plus Latin-1 accented letters.
    #[allow(clippy::expect_used)]
    static ref VERSE_NUMBER_RE: Regex = Regex::new(r"([0-9]+)(\s*)([A-Za-zÀ-ÖØ-öø-ÿ])")
        .expect("valid regex: VERSE_NUMBER_RE");
}

/// Opening tag of the markup form.
pub const EMPHASIS_OPEN: &str = "<b>";
/// Closing tag of the markup form.
pub const EMPHASIS_CLOSE: &str = "</b>";

/// A run of formatted text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    /// The text itself, line breaks included.
    pub text: String,
    /// Whether the run should be rendered bold.
    pub emphasized: bool,
}

impl Segment {
    /// A plain segment.
    pub fn plain(text: impl Into<String>) -> Self {
        Self { text: text.into(), emphasized: false }
    }

    /// An emphasized segment.
    pub fn emphasized(text: impl Into<String>) -> Self {
        Self { text: text.into(), emphasized: true }
    }
}

/// Collects segments, merging adjacent plain text and dropping empty runs.
#[derive(Default)]
struct SegmentBuilder {
    segments: Vec<Segment>,
}

impl SegmentBuilder {
    fn push(&mut self, text: &str, emphasized: bool) {
        if text.is_empty() {
            return;
        }
        match self.segments.last_mut() {
            Some(last) if !emphasized && !last.emphasized => last.text.push_str(text),
            _ => self.segments.push(Segment { text: text.to_string(), emphasized }),
        }
    }

    fn finish(self) -> Vec<Segment> {
        self.segments
    }
}

/// Split raw text into plain and emphasized segments.
///
/// Numbers followed by whitespace and a letter are emphasized. Numbers glued
/// to a letter get one space inserted and are not emphasized. A number is
/// handled by exactly one of the two rules.
pub fn format_segments(raw: &str) -> Vec<Segment> {
    let mut out = SegmentBuilder::default();
    let mut last = 0;

    for caps in VERSE_NUMBER_RE.captures_iter(raw) {
        let (Some(whole), Some(number), Some(gap), Some(letter)) =
            (caps.get(0), caps.get(1), caps.get(2), caps.get(3))
        else {
            continue;
        };

        out.push(&raw[last..whole.start()], false);
        if gap.as_str().is_empty() {
            out.push(number.as_str(), false);
            out.push(" ", false);
        } else {
            out.push(number.as_str(), true);
            out.push(gap.as_str(), false);
        }
        out.push(letter.as_str(), false);
        last = whole.end();
    }
    out.push(&raw[last..], false);

    out.finish()
}

/// Render segments in the `<b>…</b>` markup form.
pub fn to_markup(segments: &[Segment]) -> String {
    let mut markup = String::new();
    for segment in segments {
        if segment.emphasized {
            markup.push_str(EMPHASIS_OPEN);
            markup.push_str(&segment.text);
            markup.push_str(EMPHASIS_CLOSE);
        } else {
            markup.push_str(&segment.text);
        }
    }
    markup
}

/// Concatenate segment text, dropping emphasis.
pub fn to_plain(segments: &[Segment]) -> String {
    segments.iter().map(|s| s.text.as_str()).collect()
}

/// Format raw text into the markup form. Total: never fails.
pub fn format_text(raw: &str) -> String {
    to_markup(&format_segments(raw))
}
