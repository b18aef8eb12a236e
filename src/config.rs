// src/config.rs

use anyhow::{Context, Result};
use chrono::{Datelike, Local};
use serde::Deserialize;
use std::{fs, path::Path};
use url::Url;

/// Where the two blocks live inside the worksheet. The defaults match the
/// sheet this tool was written against: four attribute rows up top, the
/// roster starting at row 9, events in columns 1..20.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SheetLayout {
    /// First row of the schedule block (inclusive).
    pub schedule_start_row: usize,
    /// One past the last schedule row.
    pub schedule_end_row: usize,
    /// First row of the roster block (inclusive).
    pub roster_start_row: usize,
    /// One past the last roster row.
    pub roster_end_row: usize,
    /// First occurrence column (column 0 holds labels / player names).
    pub first_event_col: usize,
    /// One past the last occurrence column.
    pub end_event_col: usize,
}

impl Default for SheetLayout {
    fn default() -> Self {
        Self {
            schedule_start_row: 0,
            schedule_end_row: 4,
            roster_start_row: 9,
            roster_end_row: 50,
            first_event_col: 1,
            end_event_col: 20,
        }
    }
}

/// Run configuration, loaded from YAML.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub gsheet_key: String,
    pub sheet_name: String,
    pub player_name: String,
    /// Calendar year the sheet's dates belong to. Defaults to the current
    /// local year when omitted.
    #[serde(default = "current_year")]
    pub year: i32,
    /// X-WR-CALNAME for the exported calendar.
    #[serde(default = "default_calendar_name")]
    pub calendar_name: String,
    /// Output .ics path. Defaults to `<player_name>.ics`.
    #[serde(default)]
    pub output: Option<String>,
    #[serde(default)]
    pub layout: SheetLayout,
}

fn current_year() -> i32 {
    Local::now().year()
}

fn default_calendar_name() -> String {
    "Practice Schedule".to_string()
}

impl Config {
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)
            .with_context(|| format!("reading config file {}", path.display()))?;
        let cfg: Config = serde_yaml::from_str(&text)
            .with_context(|| format!("parsing config file {}", path.display()))?;
        Ok(cfg)
    }

    /// The xlsx export endpoint for the configured sheet key.
    pub fn export_url(&self) -> Result<Url> {
        let raw = format!(
            "https://docs.google.com/spreadsheet/ccc?key={}&output=xlsx",
            self.gsheet_key
        );
        Url::parse(&raw).with_context(|| format!("building export URL from {:?}", self.gsheet_key))
    }

    pub fn output_path(&self) -> String {
        self.output
            .clone()
            .unwrap_or_else(|| format!("{}.ics", self.player_name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_minimal_yaml_with_defaults() {
        let yaml = r#"
gsheet_key: 1TG5w2ETvf9H3eIB1KJG-yDtwizyyYC-lXnq10gt4kdc
sheet_name: Murmur - Practice Schedule
player_name: Kevin Fan
"#;
        let cfg: Config = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(cfg.player_name, "Kevin Fan");
        assert_eq!(cfg.year, Local::now().year());
        assert_eq!(cfg.layout.schedule_end_row, 4);
        assert_eq!(cfg.layout.roster_start_row, 9);
        assert_eq!(cfg.output_path(), "Kevin Fan.ics");

        let url = cfg.export_url().unwrap();
        assert_eq!(url.domain(), Some("docs.google.com"));
        assert!(url.as_str().ends_with("output=xlsx"));
    }

    #[test]
    fn explicit_fields_override_defaults() {
        let yaml = r#"
gsheet_key: abc123
sheet_name: Schedule
player_name: Sam
year: 2024
calendar_name: Club 2024
output: club.ics
layout:
  roster_start_row: 6
  roster_end_row: 30
"#;
        let cfg: Config = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(cfg.year, 2024);
        assert_eq!(cfg.calendar_name, "Club 2024");
        assert_eq!(cfg.output_path(), "club.ics");
        assert_eq!(cfg.layout.roster_start_row, 6);
        // unspecified layout fields keep their defaults
        assert_eq!(cfg.layout.first_event_col, 1);
    }
}
