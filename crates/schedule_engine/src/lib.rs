//! Schedule engine: page fetching, HTML repair, lesson extraction and
//! message rendering.
mod cache;
mod chunk;
mod decode;
mod engine;
mod extract;
mod fetch;
mod icon;
mod lesson;
mod message;
mod normalize;
mod persist;
mod render;
mod rows;
mod timeslots;
mod types;

pub use cache::{CacheError, ScheduleCache};
pub use chunk::{split_message, MAX_MESSAGE_CHARS};
pub use decode::{decode_html, DecodedHtml};
pub use engine::{
    EngineConfig, RefreshError, ScheduleEngine, DEFAULT_SCHEDULE_URL, MISSING_SOURCE_TEXT,
};
pub use extract::{ScheduleDocument, DEFAULT_TITLE};
pub use fetch::{
    FetchSettings, Fetcher, LogProgressSink, ProgressSink, ReqwestFetcher, ScheduleRequest,
};
pub use icon::{icon_for, DEFAULT_ICON, LESSON_ICONS};
pub use lesson::{clean_link, extract_lesson, parse_lesson_text, LessonRecord, ONLINE_MARKER};
pub use message::{escape_text, escape_url, Line, RenderedMessage, Segment};
pub use normalize::normalize_html;
pub use persist::{ensure_dir, write_atomic, PersistError};
pub use render::{render_document, render_schedule, JOIN_LINK_LABEL, TABLE_NOT_FOUND_TEXT};
pub use rows::{classify_rows, is_date_label, DateRow};
pub use timeslots::{extract_time_slots, TimeSlots, SLOT_MARKERS};
pub use types::{FailureKind, FetchError, FetchMetadata, FetchOutput, FetchProgress, Stage};
