use std::sync::LazyLock;

use regex::Regex;
use scraper::{ElementRef, Selector};

use crate::extract::element_text;

/// Date label contract: one or two digit day, `.`, two digit month,
/// whitespace, a two letter weekday and a word boundary (`02.03 Пн`,
/// `7.11 Сб`). Searched anywhere in the trimmed first-cell text.
static DATE_LABEL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\d{1,2}\.\d{2}\s+\w{2}\b").expect("DATE_LABEL_RE: hardcoded regex is valid")
});

static ROW_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("tr").expect("ROW_SELECTOR: hardcoded selector is valid"));

static CELL_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("td").expect("CELL_SELECTOR: hardcoded selector is valid"));

/// A table row whose first cell names a calendar date.
#[derive(Debug, Clone)]
pub struct DateRow<'a> {
    pub date: String,
    /// Cells after the date cell, one per time slot.
    pub cells: Vec<ElementRef<'a>>,
}

pub fn is_date_label(text: &str) -> bool {
    DATE_LABEL_RE.is_match(text)
}

/// Classify the rows of `table`, keeping document order.
///
/// Rows without cells or whose first cell is not a date label are skipped.
pub fn classify_rows<'a>(table: ElementRef<'a>) -> Vec<DateRow<'a>> {
    table
        .select(&ROW_SELECTOR)
        .filter_map(|row| {
            let mut cells = row.select(&CELL_SELECTOR);
            let date = element_text(cells.next()?);
            if !is_date_label(&date) {
                return None;
            }
            Some(DateRow {
                date,
                cells: cells.collect(),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::is_date_label;

    #[test]
    fn accepts_short_and_long_days() {
        assert!(is_date_label("02.03 Пн"));
        assert!(is_date_label("7.11  Сб"));
        assert!(is_date_label("12.05\nВт"));
    }

    #[test]
    fn rejects_headers_and_long_weekday_words() {
        assert!(!is_date_label("Дата"));
        assert!(!is_date_label("18:30-20:00"));
        assert!(!is_date_label("02.3 Пн"));
        assert!(!is_date_label("02.03 Понедельник"));
    }
}
