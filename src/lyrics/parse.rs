use crate::lyrics::types::LyricLine;
use once_cell::sync::Lazy;
use regex::{Captures, Regex};

// Text stops at any line terminator, so a stray CR never leaks into a line.
static TIME_TAG_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"\[(?P<min>[0-9]+):(?P<sec>[0-9]+)[.|:](?P<ms>[0-9]+)\](?P<text>[^\r\n\x{2028}\x{2029}]+)",
    )
    .unwrap()
});

static LEGACY_TAG_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\[(?P<min>[0-9]+):(?P<sec>[0-9]+)\](?P<text>[^\r\n\x{2028}\x{2029}]+)").unwrap()
});

static STRIP_TIME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\[[0-9]+:[0-9]+[.|:][0-9]+\]").unwrap());

static STRIP_LEGACY_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\[[0-9]+:[0-9]+\]").unwrap());

static OFFSET_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\[offset:\s*(?P<offset>[+-]?[0-9]+)\]").unwrap());

/// Parse LRC text into lines sorted by time, honoring its `[offset:N]` directive.
pub fn parse_lrc(raw: &str) -> Vec<LyricLine> {
    parse_with_offset(raw, find_offset(raw))
}

/// Locate the first `[offset:N]` directive anywhere in `raw`.
///
/// Returns 0 when there is none or the number does not fit.
pub fn find_offset(raw: &str) -> i64 {
    OFFSET_RE
        .captures(raw)
        .and_then(|cap| cap.name("offset"))
        .and_then(|m| m.as_str().parse::<i64>().ok())
        .unwrap_or(0)
}

/// Parse LRC text, shifting every timestamp by `offset_ms`.
///
/// Escaped `\n` sequences count as line breaks. A line may carry several
/// time tags; each produces its own entry with the shared text. Lines without
/// a time tag, or whose text is empty once tags are removed, are skipped.
pub fn parse_with_offset(raw: &str, offset_ms: i64) -> Vec<LyricLine> {
    let normalized = raw.replace("\\n", "\n");
    let mut lines = Vec::new();
    for line in normalized.lines() {
        collect_tagged(line, offset_ms, &mut lines);
    }
    // Stable: equal timestamps keep the order they appeared in.
    lines.sort_by_key(|line| line.time_ms);
    tracing::trace!(lines = lines.len(), offset_ms, "parsed lrc");
    lines
}

/// Emit one line per time tag found in `line`, walking the remainder after
/// each matched tag until no tag is left.
fn collect_tagged(line: &str, offset_ms: i64, out: &mut Vec<LyricLine>) {
    let mut remainder = line;
    while let Some(cap) = TIME_TAG_RE
        .captures(remainder)
        .or_else(|| LEGACY_TAG_RE.captures(remainder))
    {
        let Some(rest) = cap.name("text") else {
            return;
        };
        let text = strip_time_tags(rest.as_str());
        if text.is_empty() {
            return;
        }
        out.push(LyricLine {
            time_ms: tag_millis(&cap).saturating_add(offset_ms),
            text,
        });
        remainder = rest.as_str();
    }
}

fn tag_millis(cap: &Captures<'_>) -> i64 {
    let min = numeric_field(cap, "min");
    let sec = numeric_field(cap, "sec");
    // The fraction is read as a plain millisecond count, whatever its width.
    let ms = numeric_field(cap, "ms");
    min.saturating_mul(60_000)
        .saturating_add(sec.saturating_mul(1000))
        .saturating_add(ms)
}

fn numeric_field(cap: &Captures<'_>, name: &str) -> i64 {
    cap.name(name)
        .and_then(|m| m.as_str().parse::<i64>().ok())
        .unwrap_or(0)
}

fn strip_time_tags(text: &str) -> String {
    let without_full = STRIP_TIME_RE.replace_all(text, "");
    STRIP_LEGACY_RE.replace_all(&without_full, "").into_owned()
}
