// src/process/mod.rs

pub mod assemble;
pub mod date;
pub mod slice;
pub mod time;

use tracing::instrument;

use crate::config::Config;
use crate::error::ScheduleError;
use crate::grid::RawGrid;
use assemble::NormalizedEvent;

/// One schedule column after transposition: the raw text of each attribute,
/// plus the selected player's attendance marker for that column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawEventRecord {
    /// Zero-based occurrence index, in original grid column order.
    pub occurrence: usize,
    pub event: String,
    pub date: String,
    pub time: Option<String>,
    pub location: String,
    pub attendance: Option<String>,
}

/// Run the normalization pipeline over a fetched grid: slice the schedule
/// and roster blocks, then parse and assemble each record in occurrence
/// order. Fails on the first malformed record rather than emitting a
/// partial batch.
#[instrument(level = "info", skip(grid, cfg), fields(player = %cfg.player_name))]
pub fn normalize_schedule(
    grid: &RawGrid,
    cfg: &Config,
) -> Result<Vec<NormalizedEvent>, ScheduleError> {
    let records = slice::slice_blocks(grid, &cfg.layout, &cfg.player_name)?;
    records
        .into_iter()
        .map(|rec| assemble::assemble(rec, cfg.year))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SheetLayout;
    use chrono::{NaiveDate, NaiveTime};
    use tracing_subscriber::{EnvFilter, FmtSubscriber};

    fn init_test_logging() {
        let subscriber = FmtSubscriber::builder()
            .with_env_filter(
                EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| EnvFilter::new("info,rostercal::process=debug")),
            )
            .with_test_writer()
            .finish();
        let _ = tracing::subscriber::set_global_default(subscriber);
    }

    fn row(cells: &[&str]) -> Vec<Option<String>> {
        cells
            .iter()
            .map(|c| (!c.is_empty()).then(|| c.to_string()))
            .collect()
    }

    fn test_config() -> Config {
        Config {
            gsheet_key: "key".to_string(),
            sheet_name: "Practice Schedule".to_string(),
            player_name: "Kevin Fan".to_string(),
            year: 2025,
            calendar_name: "Murmur 2025 Schedule".to_string(),
            output: None,
            layout: SheetLayout {
                schedule_start_row: 0,
                schedule_end_row: 4,
                roster_start_row: 5,
                roster_end_row: 8,
                first_event_col: 1,
                end_event_col: 6,
            },
        }
    }

    /// A small sheet in the real layout: four attribute rows, a roster
    /// block, one attendance marker for the target player.
    fn test_grid() -> RawGrid {
        RawGrid::new(vec![
            row(&["Date", "Sep 14th", "Sep. 20-21", "Oct. 3rd"]),
            row(&["Time", "10am-11:30am", "", ""]),
            row(&["Event", "Scrimmage", "Fall Tournament", "Team Social"]),
            row(&[
                "Location (subject to change)",
                "Riverside Park",
                "Out of town",
                "TBD",
            ]),
            row(&["Player"]),
            row(&["Alex Wong", "Y", "N", "Y"]),
            row(&["Kevin Fan", "", "", "Y"]),
        ])
    }

    #[test]
    fn pipeline_normalizes_the_whole_sheet() {
        init_test_logging();
        let events = normalize_schedule(&test_grid(), &test_config()).unwrap();
        assert_eq!(events.len(), 3);

        let scrimmage = &events[0];
        assert_eq!(scrimmage.event, "Scrimmage");
        assert_eq!(scrimmage.loc, "Riverside Park");
        assert!(!scrimmage.all_day);
        assert_eq!(
            scrimmage.start_dt,
            NaiveDate::from_ymd_opt(2025, 9, 14)
                .unwrap()
                .and_time(NaiveTime::from_hms_opt(10, 0, 0).unwrap())
        );
        assert_eq!(
            scrimmage.end_dt,
            NaiveDate::from_ymd_opt(2025, 9, 14)
                .unwrap()
                .and_time(NaiveTime::from_hms_opt(11, 30, 0).unwrap())
        );

        let tournament = &events[1];
        assert!(tournament.all_day);
        assert_eq!(
            tournament.start_dt.date(),
            NaiveDate::from_ymd_opt(2025, 9, 20).unwrap()
        );
        assert_eq!(
            tournament.end_dt.date(),
            NaiveDate::from_ymd_opt(2025, 9, 21).unwrap()
        );

        // only the marked column carries attendance for this player
        assert_eq!(events[0].attendance, None);
        assert_eq!(events[1].attendance, None);
        assert_eq!(events[2].attendance.as_deref(), Some("Y"));

        for ev in &events {
            assert!(ev.start_dt <= ev.end_dt);
        }
    }

    #[test]
    fn pipeline_fails_fast_with_the_event_name() {
        init_test_logging();
        let mut grid = test_grid();
        grid.rows[0][2] = Some("Oct 40th".to_string());
        let err = normalize_schedule(&grid, &test_config()).unwrap_err();
        match err {
            ScheduleError::Date { ref event, .. } => assert_eq!(event, "Fall Tournament"),
            other => panic!("expected date error, got {other:?}"),
        }
    }
}
