//! Lesson field extraction from a single schedule cell.
//!
//! Cells hold free text of the shape
//! `Subject -Type, Teacher, ауд. Room` with any part possibly missing, an
//! optional `ОНЛАЙН` marker and an optional meeting link. The regexes below
//! define the behavior; there is no grammar beyond them.

use std::sync::LazyLock;

use regex::Regex;
use scraper::{ElementRef, Selector};

use crate::extract::element_text;

/// Marker the schedule uses for remote lessons. Plain substring match.
pub const ONLINE_MARKER: &str = "ОНЛАЙН";

/// Subject is the shortest prefix without a comma; the type is an optional
/// whitespace + `-` introduced token. The match must end at a comma or at the
/// end of the text, otherwise there is no subject.
static SUBJECT_TYPE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([^,]+?)(?:\s+-([^,]+))?(?:,|$)")
        .expect("SUBJECT_TYPE_RE: hardcoded regex is valid")
});

/// Teacher is the first comma-delimited segment after the first comma.
static TEACHER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r",\s*([^,]+?)\s*(?:,|$)").expect("TEACHER_RE: hardcoded regex is valid")
});

/// Classroom is the token after `ауд.` up to a comma or whitespace.
static CLASSROOM_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"ауд\.\s*([^,\s]+)").expect("CLASSROOM_RE: hardcoded regex is valid")
});

static ANCHOR_SELECTOR: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse("a").expect("ANCHOR_SELECTOR: hardcoded selector is valid")
});

/// Structured content of one schedule cell.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LessonRecord {
    pub subject: Option<String>,
    pub lesson_type: Option<String>,
    pub teacher: Option<String>,
    pub classroom: Option<String>,
    pub is_online: bool,
    pub link: Option<String>,
}

impl LessonRecord {
    /// Records without a subject are not lessons (headers, notes) and are
    /// skipped when rendering.
    pub fn is_lesson(&self) -> bool {
        self.subject.as_deref().is_some_and(|s| !s.is_empty())
    }
}

/// Extract the lesson held by `cell`.
///
/// Missing cells and cells whose trimmed text is empty produce `None`.
pub fn extract_lesson(cell: Option<ElementRef<'_>>) -> Option<LessonRecord> {
    let cell = cell?;
    let text = element_text(cell);
    let link = cell
        .select(&ANCHOR_SELECTOR)
        .next()
        .and_then(|anchor| anchor.value().attr("href"))
        .map(clean_link);

    let mut record = parse_lesson_text(&text)?;
    record.link = link;
    Some(record)
}

/// Parse the fields of a cell's text. `None` for blank text.
pub fn parse_lesson_text(text: &str) -> Option<LessonRecord> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }

    let mut record = LessonRecord {
        is_online: text.contains(ONLINE_MARKER),
        ..LessonRecord::default()
    };

    if let Some(caps) = SUBJECT_TYPE_RE.captures(text) {
        record.subject = caps.get(1).map(|m| m.as_str().trim().to_string());
        record.lesson_type = caps.get(2).map(|m| m.as_str().trim().to_string());
    }
    record.teacher = TEACHER_RE
        .captures(text)
        .map(|caps| caps[1].trim().to_string());
    record.classroom = CLASSROOM_RE
        .captures(text)
        .map(|caps| caps[1].trim().to_string());

    Some(record)
}

/// Trim an `href`, drop embedded line breaks and percent-encode spaces.
pub fn clean_link(href: &str) -> String {
    href.trim()
        .replace(['\r', '\n'], "")
        .replace(' ', "%20")
}
