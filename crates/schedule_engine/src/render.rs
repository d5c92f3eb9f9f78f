use bot_logging::{bot_debug, bot_info, bot_warn};

use crate::extract::ScheduleDocument;
use crate::icon::icon_for;
use crate::lesson::{extract_lesson, LessonRecord};
use crate::message::{Line, RenderedMessage};
use crate::rows::classify_rows;
use crate::timeslots::extract_time_slots;

pub const TABLE_NOT_FOUND_TEXT: &str = "Таблица с расписанием не найдена!";
pub const JOIN_LINK_LABEL: &str = "Вход на лекцию";

/// Normalize, parse and render a raw schedule page.
pub fn render_document(raw_html: &str) -> RenderedMessage {
    let document = ScheduleDocument::parse(raw_html);
    render_schedule(&document)
}

/// Render a parsed schedule page.
///
/// Layout: title line and a blank line, then per date row a date header and
/// a blank line, then per lesson its block followed by one blank line. A page
/// without a table renders the title and a notice instead.
pub fn render_schedule(document: &ScheduleDocument) -> RenderedMessage {
    let mut message = RenderedMessage::new();
    message.push(Line::new().text("📅 ").bold(document.title_or_default()));
    message.push(Line::blank());

    let Some(table) = document.table() else {
        bot_warn!("schedule table not found");
        message.push(Line::new().text(TABLE_NOT_FOUND_TEXT));
        return message;
    };

    let slots = extract_time_slots(table);
    bot_info!("detected time slots: {:?}", slots.labels());

    let rows = classify_rows(table);
    bot_debug!("classified {} date rows", rows.len());

    for row in rows {
        // A lone date cell carries no lessons.
        if row.cells.is_empty() {
            continue;
        }
        message.push(Line::new().text("🗓 ").bold(&row.date));
        message.push(Line::blank());

        for (index, cell) in row.cells.iter().enumerate() {
            let Some(lesson) = extract_lesson(Some(*cell)) else {
                continue;
            };
            if !lesson.is_lesson() {
                continue;
            }
            push_lesson(&mut message, &slots.label(index), &lesson);
        }
    }

    message
}

fn push_lesson(message: &mut RenderedMessage, slot: &str, lesson: &LessonRecord) {
    let lesson_type = lesson.lesson_type.as_deref().filter(|t| !t.is_empty());
    let subject = lesson.subject.as_deref().unwrap_or_default();

    message.push(Line::new().text("⏰ ").bold(slot));

    let mut subject_line = Line::new()
        .text(format!("{} ", icon_for(lesson_type)))
        .bold(subject);
    if let Some(lesson_type) = lesson_type {
        subject_line = subject_line.text(format!(" ({lesson_type})"));
    }
    message.push(subject_line);

    if let Some(teacher) = lesson.teacher.as_deref().filter(|t| !t.is_empty()) {
        message.push(Line::new().text(format!("👨‍🏫 {teacher}")));
    }
    if let Some(classroom) = lesson.classroom.as_deref().filter(|c| !c.is_empty()) {
        message.push(Line::new().text(format!("🏛 Ауд: {classroom}")));
    }
    if lesson.is_online {
        message.push(Line::new().text("💻 ").bold("ОНЛАЙН"));
    }
    if let Some(link) = lesson.link.as_deref().filter(|l| !l.is_empty()) {
        message.push(Line::new().text("🔗 ").link(link, JOIN_LINK_LABEL));
    }
    message.push(Line::blank());
}
