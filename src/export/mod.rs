// src/export/mod.rs

use anyhow::{Context, Result};
use chrono::{Days, Utc};
use std::{
    fs::File,
    io::{BufWriter, Write},
    path::Path,
};
use tracing::{info, instrument};

use crate::process::assemble::NormalizedEvent;

/// Renders normalized events as an RFC 5545 VCALENDAR and writes it out.
pub struct IcsWriter {
    calendar_name: String,
}

impl IcsWriter {
    pub fn new(calendar_name: impl Into<String>) -> Self {
        Self {
            calendar_name: calendar_name.into(),
        }
    }

    /// Render the full document. All-day events use date-valued bounds with
    /// the exclusive-end convention; timed events use floating local
    /// date-times (the sheet carries no zone information).
    pub fn render(&self, events: &[NormalizedEvent]) -> String {
        let stamp = Utc::now().format("%Y%m%dT%H%M%SZ").to_string();
        let mut out = String::new();
        out.push_str("BEGIN:VCALENDAR\r\n");
        out.push_str("VERSION:2.0\r\n");
        out.push_str("PRODID:-//rostercal//EN\r\n");
        out.push_str(&format!(
            "X-WR-CALNAME:{}\r\n",
            escape_text(&self.calendar_name)
        ));
        for (seq, ev) in events.iter().enumerate() {
            push_event(&mut out, ev, seq, &stamp);
        }
        out.push_str("END:VCALENDAR\r\n");
        out
    }

    /// Render and write to `path`.
    #[instrument(level = "info", skip(self, events, path), fields(path = %path.as_ref().display()))]
    pub fn write_to(&self, events: &[NormalizedEvent], path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let file =
            File::create(path).with_context(|| format!("creating {}", path.display()))?;
        let mut writer = BufWriter::new(file);
        writer
            .write_all(self.render(events).as_bytes())
            .with_context(|| format!("writing {}", path.display()))?;
        info!(events = events.len(), "wrote calendar");
        Ok(())
    }
}

fn push_event(out: &mut String, ev: &NormalizedEvent, seq: usize, stamp: &str) {
    out.push_str("BEGIN:VEVENT\r\n");
    out.push_str(&format!(
        "UID:{}-{}@rostercal\r\n",
        ev.start_dt.format("%Y%m%dT%H%M%S"),
        seq
    ));
    out.push_str(&format!("DTSTAMP:{}\r\n", stamp));
    out.push_str(&format!("SUMMARY:{}\r\n", escape_text(&ev.event)));
    if !ev.loc.is_empty() {
        out.push_str(&format!("LOCATION:{}\r\n", escape_text(&ev.loc)));
    }
    if let Some(marker) = &ev.attendance {
        out.push_str(&format!(
            "DESCRIPTION:Attendance: {}\r\n",
            escape_text(marker)
        ));
    }
    if ev.all_day {
        // DTEND is exclusive for date-valued events
        let end = ev.end_dt.date() + Days::new(1);
        out.push_str(&format!(
            "DTSTART;VALUE=DATE:{}\r\n",
            ev.start_dt.format("%Y%m%d")
        ));
        out.push_str(&format!("DTEND;VALUE=DATE:{}\r\n", end.format("%Y%m%d")));
    } else {
        out.push_str(&format!("DTSTART:{}\r\n", ev.start_dt.format("%Y%m%dT%H%M%S")));
        out.push_str(&format!("DTEND:{}\r\n", ev.end_dt.format("%Y%m%dT%H%M%S")));
    }
    out.push_str("END:VEVENT\r\n");
}

/// RFC 5545 §3.3.11 TEXT escaping.
fn escape_text(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '\\' => out.push_str(r"\\"),
            ';' => out.push_str(r"\;"),
            ',' => out.push_str(r"\,"),
            '\n' => out.push_str(r"\n"),
            '\r' => {}
            c => out.push(c),
        }
    }
    out
}
