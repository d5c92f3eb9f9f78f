use pretty_assertions::assert_eq;
use schedule_engine::{split_message, Line, RenderedMessage, MAX_MESSAGE_CHARS};

fn long_schedule(lessons: usize) -> RenderedMessage {
    let mut message = RenderedMessage::new();
    message.push(Line::new().text("📅 ").bold("Группа 2471"));
    message.push(Line::blank());
    for i in 0..lessons {
        message.push(Line::new().text("⏰ ").bold(format!("Слот {}", i + 1)));
        message.push(
            Line::new()
                .text("🟢 ")
                .bold(format!("Предмет номер {i} & co"))
                .text(" (Лекц)"),
        );
        message.push(Line::new().text("🔗 ").link(
            format!("https://meet.example/room/{i}?a=1&b=2"),
            "Вход на лекцию",
        ));
        message.push(Line::blank());
    }
    message
}

#[test]
fn short_messages_stay_in_one_chunk() {
    let message = long_schedule(2);
    let chunks = message.to_chunks(MAX_MESSAGE_CHARS);
    assert_eq!(chunks, vec![message.to_html()]);
}

#[test]
fn oversized_messages_split_on_line_boundaries() {
    let message = long_schedule(200);
    let html = message.to_html();
    assert!(html.chars().count() > MAX_MESSAGE_CHARS);

    let chunks = message.to_chunks(MAX_MESSAGE_CHARS);
    assert!(chunks.len() > 1);
    assert!(chunks
        .iter()
        .all(|chunk| chunk.chars().count() <= MAX_MESSAGE_CHARS));
    assert!(chunks.iter().all(|chunk| chunk.ends_with('\n')));
    assert_eq!(chunks.concat(), html);
}

#[test]
fn a_single_overlong_line_is_split_without_breaking_markup() {
    let line = "<b>word</b> &amp; ".repeat(400);
    let text = format!("head\n{line}\ntail\n");

    let chunks = split_message(&text, 1000);
    assert!(chunks.iter().all(|chunk| chunk.chars().count() <= 1000));
    assert_eq!(chunks.concat(), text);
    for chunk in &chunks {
        assert_eq!(chunk.matches("<b>").count(), chunk.matches("</b>").count());
        assert_eq!(chunk.matches('&').count(), chunk.matches("&amp;").count());
    }
}

#[test]
fn empty_text_has_no_chunks() {
    assert!(split_message("", MAX_MESSAGE_CHARS).is_empty());
}
