// src/error.rs

use thiserror::Error;

/// A date cell that could not be resolved to a calendar date.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("unrecognized date {raw:?}")]
pub struct DateParseError {
    pub raw: String,
}

/// A time cell that matched neither accepted grammar.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("unrecognized time {raw:?}")]
pub struct TimeParseError {
    pub raw: String,
}

/// Everything that can go wrong between a RawGrid and the final event
/// sequence. Per-record failures carry the event name so a single bad cell
/// in the sheet is attributable.
#[derive(Debug, Error)]
pub enum ScheduleError {
    #[error("player {0:?} not found in the roster block")]
    PlayerNotFound(String),

    #[error("player {name:?} matches {matches} roster rows")]
    AmbiguousPlayer { name: String, matches: usize },

    #[error("roster row for {player:?} covers {found} columns but the schedule spans {expected}")]
    BlockAlignment {
        player: String,
        expected: usize,
        found: usize,
    },

    #[error("schedule block has no {0:?} row")]
    SchemaFieldMissing(&'static str),

    #[error("event {event:?}: {source}")]
    Date {
        event: String,
        #[source]
        source: DateParseError,
    },

    #[error("event {event:?}: {source}")]
    Time {
        event: String,
        #[source]
        source: TimeParseError,
    },
}
