/// Lesson type prefixes and their icons, in match order.
///
/// Keys are matched by substring containment against the extracted type and
/// the first matching entry wins, so `"Лекц+Прак"` renders as a lecture.
pub const LESSON_ICONS: [(&str, &str); 5] = [
    ("Лекц", "🟢"),
    ("Прак", "🔵"),
    ("Экз", "🔴"),
    ("Зач", "🟠"),
    ("Лаб", "🟣"),
];

pub const DEFAULT_ICON: &str = "📚";

/// Icon for a lesson type. Total: unknown, empty and absent types all map to
/// [`DEFAULT_ICON`].
pub fn icon_for(lesson_type: Option<&str>) -> &'static str {
    let Some(lesson_type) = lesson_type.filter(|t| !t.is_empty()) else {
        return DEFAULT_ICON;
    };
    LESSON_ICONS
        .iter()
        .find(|(key, _)| lesson_type.contains(*key))
        .map(|(_, icon)| *icon)
        .unwrap_or(DEFAULT_ICON)
}

#[cfg(test)]
mod tests {
    use super::{icon_for, DEFAULT_ICON, LESSON_ICONS};

    #[test]
    fn every_known_prefix_has_its_own_icon() {
        for (key, icon) in LESSON_ICONS {
            assert_eq!(icon_for(Some(key)), icon);
        }
    }

    #[test]
    fn longer_type_names_match_by_containment() {
        assert_eq!(icon_for(Some("Лекция")), "🟢");
        assert_eq!(icon_for(Some("Лаб.раб")), "🟣");
    }

    #[test]
    fn first_declared_key_wins() {
        assert_eq!(icon_for(Some("Зач/Экз")), "🔴");
    }

    #[test]
    fn mapping_is_total() {
        assert_eq!(icon_for(None), DEFAULT_ICON);
        assert_eq!(icon_for(Some("")), DEFAULT_ICON);
        assert_eq!(icon_for(Some("Семинар")), DEFAULT_ICON);
    }
}
