use std::sync::LazyLock;

use scraper::{ElementRef, Selector};

use crate::extract::element_text;

/// Start times of the two evening periods. A header cell is a time slot only
/// if its text mentions one of them.
pub const SLOT_MARKERS: [&str; 2] = ["18:30", "20:10"];

/// Header cells are painted with this background.
static HIGHLIGHTED_CELL_SELECTOR: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse(r#"td[style*="background-color: #f6ecc8"]"#)
        .expect("HIGHLIGHTED_CELL_SELECTOR: hardcoded selector is valid")
});

static BOLD_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("b").expect("BOLD_SELECTOR: hardcoded selector is valid"));

static CELL_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("td").expect("CELL_SELECTOR: hardcoded selector is valid"));

/// Ordered time-slot labels, index-aligned with the lesson cells of a date row.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TimeSlots {
    labels: Vec<String>,
}

impl TimeSlots {
    pub fn new(labels: Vec<String>) -> Self {
        Self { labels }
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Label of the lesson cell at `index` (0-based, date cell excluded).
    ///
    /// Positions past the detected labels get a synthesized `Слот N` label
    /// with `N` counted from 1.
    pub fn label(&self, index: usize) -> String {
        self.labels
            .get(index)
            .cloned()
            .unwrap_or_else(|| format!("Слот {}", index + 1))
    }
}

/// Collect time-slot labels from the schedule table.
///
/// Highlighted cells containing bold text come first; only when none of them
/// mentions a slot marker does every cell of the table get scanned instead.
pub fn extract_time_slots(table: ElementRef<'_>) -> TimeSlots {
    let mut labels: Vec<String> = table
        .select(&HIGHLIGHTED_CELL_SELECTOR)
        .filter(|cell| cell.select(&BOLD_SELECTOR).next().is_some())
        .map(element_text)
        .filter(|text| mentions_slot_marker(text))
        .collect();

    if labels.is_empty() {
        labels = table
            .select(&CELL_SELECTOR)
            .map(element_text)
            .filter(|text| mentions_slot_marker(text))
            .collect();
    }

    TimeSlots::new(labels)
}

fn mentions_slot_marker(text: &str) -> bool {
    SLOT_MARKERS.iter().any(|marker| text.contains(marker))
}

#[cfg(test)]
mod tests {
    use super::TimeSlots;

    #[test]
    fn missing_labels_are_synthesized_from_one() {
        let slots = TimeSlots::new(vec!["18:30-20:00".to_string()]);
        assert_eq!(slots.label(0), "18:30-20:00");
        assert_eq!(slots.label(1), "Слот 2");
        assert_eq!(TimeSlots::default().label(0), "Слот 1");
    }
}
