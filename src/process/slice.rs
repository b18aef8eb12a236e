// src/process/slice.rs

use tracing::{debug, warn};

use super::RawEventRecord;
use crate::config::SheetLayout;
use crate::error::ScheduleError;
use crate::grid::RawGrid;

/// The schedule attributes a record is built from. Labels in the sheet's
/// first column are bound to these once, before any transposition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScheduleField {
    Date,
    Time,
    Event,
    Location,
}

impl ScheduleField {
    fn from_label(label: &str) -> Option<Self> {
        match label.trim() {
            "Date" => Some(Self::Date),
            "Time" => Some(Self::Time),
            "Event" => Some(Self::Event),
            // the sheet titles this row "Location (subject to change)"
            l if l.starts_with("Location") => Some(Self::Location),
            _ => None,
        }
    }

    fn name(self) -> &'static str {
        match self {
            Self::Date => "Date",
            Self::Time => "Time",
            Self::Event => "Event",
            Self::Location => "Location",
        }
    }
}

/// Carve the grid into its schedule and roster blocks and transpose the
/// schedule's label×occurrence layout into one RawEventRecord per
/// occurrence, attaching the target player's attendance markers by column
/// position.
pub fn slice_blocks(
    grid: &RawGrid,
    layout: &SheetLayout,
    player: &str,
) -> Result<Vec<RawEventRecord>, ScheduleError> {
    // bind each labeled schedule row to its field, once
    let mut field_rows: [Option<usize>; 4] = [None; 4];
    for row in layout.schedule_start_row..layout.schedule_end_row.min(grid.height()) {
        let Some(label) = grid.cell(row, 0) else {
            continue;
        };
        match ScheduleField::from_label(label) {
            Some(field) if field_rows[field as usize].is_none() => {
                field_rows[field as usize] = Some(row);
            }
            Some(_) => warn!(label, row, "duplicate schedule label; keeping the first"),
            None => warn!(label, row, "unrecognized schedule label"),
        }
    }
    let row_of = |field: ScheduleField| {
        field_rows[field as usize].ok_or(ScheduleError::SchemaFieldMissing(field.name()))
    };
    let date_row = row_of(ScheduleField::Date)?;
    let time_row = row_of(ScheduleField::Time)?;
    let event_row = row_of(ScheduleField::Event)?;
    let location_row = row_of(ScheduleField::Location)?;

    // the sheet is usually narrower than the configured span; trailing
    // columns with neither a date nor an event are not occurrences
    let mut end_col = layout.first_event_col;
    for col in layout.first_event_col..layout.end_event_col {
        if grid.cell(date_row, col).is_some() || grid.cell(event_row, col).is_some() {
            end_col = col + 1;
        }
    }
    if end_col < layout.end_event_col {
        debug!(
            dropped = layout.end_event_col - end_col,
            "dropped trailing empty occurrence columns"
        );
    }

    // roster block: exactly one row may carry the player's name
    let roster_end = layout.roster_end_row.min(grid.height());
    let mut matching = (layout.roster_start_row..roster_end)
        .filter(|&row| grid.cell(row, 0) == Some(player));
    let player_row = match (matching.next(), matching.count()) {
        (None, _) => return Err(ScheduleError::PlayerNotFound(player.to_string())),
        (Some(row), 0) => row,
        (Some(_), extra) => {
            return Err(ScheduleError::AmbiguousPlayer {
                name: player.to_string(),
                matches: extra + 1,
            })
        }
    };

    // both blocks must span the same occurrence columns
    let expected = end_col - layout.first_event_col;
    let found = grid
        .row_width(player_row)
        .saturating_sub(layout.first_event_col);
    if found < expected {
        return Err(ScheduleError::BlockAlignment {
            player: player.to_string(),
            expected,
            found,
        });
    }

    let records = (layout.first_event_col..end_col)
        .map(|col| RawEventRecord {
            occurrence: col - layout.first_event_col,
            event: grid.cell(event_row, col).unwrap_or_default().to_string(),
            date: grid.cell(date_row, col).unwrap_or_default().to_string(),
            time: grid.cell(time_row, col).map(str::to_string),
            location: grid
                .cell(location_row, col)
                .unwrap_or_default()
                .to_string(),
            attendance: grid.cell(player_row, col).map(str::to_string),
        })
        .collect();
    Ok(records)
}
