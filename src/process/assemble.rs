// src/process/assemble.rs

use chrono::{NaiveDateTime, NaiveTime};
use serde::Serialize;

use super::{date, time, RawEventRecord};
use crate::error::{ScheduleError, TimeParseError};

/// The canonical exported record. Field names serialize to the column set
/// the export side expects: {Event, loc, Attendance, start_dt, end_dt,
/// all_day}. All-day events carry midnight on both bounds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NormalizedEvent {
    #[serde(rename = "Event")]
    pub event: String,
    pub loc: String,
    #[serde(rename = "Attendance")]
    pub attendance: Option<String>,
    pub start_dt: NaiveDateTime,
    pub end_dt: NaiveDateTime,
    pub all_day: bool,
}

/// Merge one record's parsed date pair, parsed time result, and attendance
/// marker into a NormalizedEvent. Parse failures are attributed to the
/// record's event name.
pub fn assemble(rec: RawEventRecord, year: i32) -> Result<NormalizedEvent, ScheduleError> {
    let (start_date, end_date) =
        date::parse_date_span(&rec.date, year).map_err(|source| ScheduleError::Date {
            event: rec.event.clone(),
            source,
        })?;
    let times =
        time::parse_time_span(rec.time.as_deref()).map_err(|source| ScheduleError::Time {
            event: rec.event.clone(),
            source,
        })?;

    // all-day is decided before any time-of-day is applied: a multi-day
    // span, or no listed time
    let (start_dt, end_dt, all_day) = match times {
        Some((start, end)) if start_date == end_date => {
            let start_dt = start_date.and_time(start);
            let end_dt = end_date.and_time(end);
            if end_dt < start_dt {
                // "9pm-1am" style listings; ranges here never cross midnight
                return Err(ScheduleError::Time {
                    event: rec.event,
                    source: TimeParseError {
                        raw: rec.time.unwrap_or_default(),
                    },
                });
            }
            (start_dt, end_dt, false)
        }
        _ => (
            start_date.and_time(NaiveTime::MIN),
            end_date.and_time(NaiveTime::MIN),
            true,
        ),
    };

    Ok(NormalizedEvent {
        event: rec.event,
        loc: rec.location,
        attendance: rec.attendance,
        start_dt,
        end_dt,
        all_day,
    })
}
