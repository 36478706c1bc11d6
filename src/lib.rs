//! Consumption analytics over cumulative counter readings.
//!
//! Industrial totalizers (energy meters, flow meters, hour counters) only ever
//! count up, and operators read them at irregular times. This crate
//! reconstructs what was actually consumed: it partitions readings per asset,
//! differences consecutive readings into intervals, normalizes irregular spans
//! into comparable rates, and aggregates the result into selection-wide
//! summaries and per-day series.
//!
//! The derivation is a pure function of the current snapshot — re-run it
//! whenever the reading set changes. Gaps, unknown assets, counter resets and
//! out-of-order entry all degrade into zero contributions instead of errors.

pub mod config;
pub mod demo;
mod prelude;
pub mod quantity;
pub mod reading;
pub mod render;
pub mod series;
pub mod statistics;
pub mod storage;

pub use self::{
    config::{Asset, AssetType, Config, ExtractionPoint, Selection},
    demo::Generator,
    quantity::{
        energy::KilowattHours, hours::RunningHours, power::Kilowatts, time_range::TimeRange,
        volume::CubicMeters,
    },
    reading::{Counters, Reading, ReadingLog},
    series::{Deltas, GroupByAsset, Interval},
    statistics::{DailyStat, ReportRow, Summary, build_report, daily_series, summarize},
    storage::{BlobStore, FsStore, MemoryStore, Repository, Snapshot},
};
