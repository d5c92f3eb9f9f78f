//! Schedule bot core: command parsing and the pure request state machine.
mod command;
mod effect;
mod msg;
mod state;
mod update;

pub use command::{parse_command, parse_date, Command, DateRange, DATE_FORMAT, USAGE_TEXT};
pub use effect::Effect;
pub use msg::Msg;
pub use state::{AppState, ChatId, PendingFetch};
pub use update::update;
