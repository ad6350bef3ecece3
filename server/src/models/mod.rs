pub mod event;
pub mod user;

pub use event::{Category, Event, EventKind, NewEvent};
pub use user::{User, UserSummary};
