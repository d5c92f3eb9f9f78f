//! Repairs the structural quirks of the schedule page before it is parsed.
//!
//! The page is produced by a legacy PHP script that routinely forgets row
//! tags, leaves `href` values unquoted and wraps anchor tags across lines.
//! Every pass is a local regex substitution, so a pass that finds nothing to
//! repair leaves the input untouched.

use std::borrow::Cow;
use std::sync::LazyLock;

use regex::{Captures, Regex};

/// A `</tr>` directly followed (modulo whitespace) by a cell opener: the row
/// opener was dropped. Group 1 is the cell opener.
static STRAY_CELL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"</tr>\s*(<td[^>]*>)").expect("STRAY_CELL_RE: hardcoded regex is valid")
});

/// A `</td>` directly followed by a new row, a table or end of input: the
/// row closer was dropped. Group 1 is the cell closer, group 2 the follower
/// (empty at end of input).
static UNCLOSED_ROW_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(</td>)\s*(<tr|<table|$)").expect("UNCLOSED_ROW_RE: hardcoded regex is valid")
});

/// An anchor whose `href` value does not start with a quote. Group 1 is the
/// bare value (up to whitespace or `>`), group 2 the remaining attributes.
static BARE_HREF_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"<a\s+href=([^\s"'>][^\s>]*)([^>]*?)>"#)
        .expect("BARE_HREF_RE: hardcoded regex is valid")
});

/// A complete anchor opening tag, attributes included.
static ANCHOR_TAG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<a\b[^>]*>").expect("ANCHOR_TAG_RE: hardcoded regex is valid"));

static LINE_BREAKS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\r\n]+").expect("LINE_BREAKS_RE: hardcoded regex is valid"));

const NBSP_ENTITY: &str = "&nbsp;";

/// Normalize raw schedule HTML.
///
/// Passes run in a fixed order because the later ones assume the earlier
/// ones already ran:
/// 1. open rows for cells that follow a `</tr>`,
/// 2. close rows whose last `</td>` runs into `<tr`, `<table` or the end,
/// 3. quote bare `href` values,
/// 4. collapse line breaks inside anchor tags to a single space,
/// 5. replace `&nbsp;` with a plain space.
///
/// Total and deterministic; idempotent on already well-formed input.
pub fn normalize_html(raw: &str) -> String {
    let html = STRAY_CELL_RE.replace_all(raw, "</tr><tr>${1}");
    let html = UNCLOSED_ROW_RE.replace_all(&html, "${1}</tr>${2}");
    let html = BARE_HREF_RE.replace_all(&html, r#"<a href="${1}"${2}>"#);
    let html = collapse_anchor_line_breaks(&html);
    html.replace(NBSP_ENTITY, " ")
}

fn collapse_anchor_line_breaks(html: &str) -> Cow<'_, str> {
    ANCHOR_TAG_RE.replace_all(html, |caps: &Captures| {
        LINE_BREAKS_RE.replace_all(&caps[0], " ").into_owned()
    })
}

#[cfg(test)]
mod tests {
    use super::collapse_anchor_line_breaks;

    #[test]
    fn every_break_run_inside_an_anchor_becomes_one_space() {
        let html = "<a\r\nhref=\"x\"\n\nclass=\"y\">t\n</a>";
        assert_eq!(
            collapse_anchor_line_breaks(html),
            "<a href=\"x\" class=\"y\">t\n</a>"
        );
    }

    #[test]
    fn abbr_tags_are_not_anchors() {
        let html = "<abbr\ntitle=\"x\">y</abbr>";
        assert_eq!(collapse_anchor_line_breaks(html), html);
    }
}
