use std::sync::LazyLock;

use scraper::{ElementRef, Html, Selector};

use crate::normalize::normalize_html;

pub const DEFAULT_TITLE: &str = "Расписание занятий";

static TITLE_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("h4").expect("TITLE_SELECTOR: hardcoded selector is valid"));

static TABLE_SELECTOR: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse("table").expect("TABLE_SELECTOR: hardcoded selector is valid")
});

/// A parsed schedule page.
///
/// Holds the document tree built from the normalized markup; the table and
/// title accessors borrow from it.
pub struct ScheduleDocument {
    html: Html,
}

impl ScheduleDocument {
    /// Normalize `raw` and build the document tree from the result.
    pub fn parse(raw: &str) -> Self {
        let normalized = normalize_html(raw);
        Self {
            html: Html::parse_document(&normalized),
        }
    }

    /// Text of the first `<h4>` heading, trimmed. Absent or blank headings
    /// yield `None`.
    pub fn title(&self) -> Option<String> {
        self.html
            .select(&TITLE_SELECTOR)
            .next()
            .map(element_text)
            .filter(|text| !text.is_empty())
    }

    /// Heading text or [`DEFAULT_TITLE`].
    pub fn title_or_default(&self) -> String {
        self.title().unwrap_or_else(|| DEFAULT_TITLE.to_string())
    }

    /// The first table of the document, which carries the schedule.
    pub fn table(&self) -> Option<ElementRef<'_>> {
        self.html.select(&TABLE_SELECTOR).next()
    }
}

/// Concatenated descendant text of `element`, trimmed.
pub(crate) fn element_text(element: ElementRef<'_>) -> String {
    element.text().collect::<String>().trim().to_string()
}
