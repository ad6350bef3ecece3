use std::fmt;

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Event category, carried on the wire and in the store as an integer code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(try_from = "i32", into = "i32")]
#[repr(i32)]
pub enum Category {
    Conference = 1,
    Seminar = 2,
    Congress = 3,
    Course = 4,
}

/// Whether an event happens on site or online.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(try_from = "i32", into = "i32")]
#[repr(i32)]
pub enum EventKind {
    InPerson = 1,
    Virtual = 2,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownCode {
    field: &'static str,
    code: i32,
}

impl fmt::Display for UnknownCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown {} code {}", self.field, self.code)
    }
}

impl TryFrom<i32> for Category {
    type Error = UnknownCode;

    fn try_from(code: i32) -> Result<Self, Self::Error> {
        match code {
            1 => Ok(Category::Conference),
            2 => Ok(Category::Seminar),
            3 => Ok(Category::Congress),
            4 => Ok(Category::Course),
            code => Err(UnknownCode {
                field: "category",
                code,
            }),
        }
    }
}

impl From<Category> for i32 {
    fn from(category: Category) -> Self {
        category as i32
    }
}

impl TryFrom<i32> for EventKind {
    type Error = UnknownCode;

    fn try_from(code: i32) -> Result<Self, Self::Error> {
        match code {
            1 => Ok(EventKind::InPerson),
            2 => Ok(EventKind::Virtual),
            code => Err(UnknownCode { field: "kind", code }),
        }
    }
}

impl From<EventKind> for i32 {
    fn from(kind: EventKind) -> Self {
        kind as i32
    }
}

/// A persisted event. Dates are kept verbatim as the client sent them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromRow)]
pub struct Event {
    pub id: i64,
    pub name: String,
    pub category: Category,
    pub venue: String,
    pub address: String,
    pub start_date: String,
    pub end_date: String,
    pub kind: EventKind,
    pub owner_id: i64,
}

/// Validated fields for an event about to be inserted.
#[derive(Debug, Clone)]
pub struct NewEvent {
    pub name: String,
    pub category: Category,
    pub venue: String,
    pub address: String,
    pub start_date: String,
    pub end_date: String,
    pub kind: EventKind,
    pub owner_id: i64,
}
