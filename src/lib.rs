// src/lib.rs

pub mod config;
pub mod error;
pub mod export;
pub mod fetch;
pub mod grid;
pub mod process;

pub use config::Config;
pub use error::ScheduleError;
pub use grid::RawGrid;
pub use process::assemble::NormalizedEvent;
