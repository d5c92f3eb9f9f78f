use chrono::NaiveDate;

/// Date format used both in commands and in the schedule form.
pub const DATE_FORMAT: &str = "%d.%m.%Y";

pub const USAGE_TEXT: &str = "Использование: /rasspisan <начальная дата> - <конечная дата>\n\
Пример: /rasspisan 02.03.2025 - 05.03.2025";

/// Inclusive range of days to fetch a schedule for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub from: NaiveDate,
    pub to: NaiveDate,
}

impl DateRange {
    pub fn from_label(&self) -> String {
        self.from.format(DATE_FORMAT).to_string()
    }

    pub fn to_label(&self) -> String {
        self.to.format(DATE_FORMAT).to_string()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// `/schedule`: render whatever page is cached.
    Schedule,
    /// `/rasspisan <from> - <to>` with valid dates.
    Range(DateRange),
    /// `/rasspisan` with the wrong shape or an unparseable date.
    InvalidRange,
    /// `/start` or `/help`.
    Help,
}

/// Parse a chat message into a bot command.
///
/// Returns `None` for plain text and for commands the bot does not know.
/// A `@botname` suffix on the command word is ignored.
pub fn parse_command(text: &str) -> Option<Command> {
    let mut words = text.split_whitespace();
    let head = words.next()?.strip_prefix('/')?;
    let name = head.split_once('@').map_or(head, |(name, _)| name);
    let args: Vec<&str> = words.collect();

    match name {
        "schedule" => Some(Command::Schedule),
        "rasspisan" => Some(parse_range(&args).map_or(Command::InvalidRange, Command::Range)),
        "start" | "help" => Some(Command::Help),
        _ => None,
    }
}

fn parse_range(args: &[&str]) -> Option<DateRange> {
    let [from, "-", to] = args else {
        return None;
    };
    Some(DateRange {
        from: parse_date(from)?,
        to: parse_date(to)?,
    })
}

/// Parse `DD.MM.YYYY`; single-digit day and month are accepted.
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw, DATE_FORMAT).ok()
}
