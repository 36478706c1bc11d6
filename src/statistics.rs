mod daily;
mod report;
mod summary;

pub use self::{
    daily::{DailyStat, daily_series},
    report::{ReportRow, build_report},
    summary::{Summary, summarize},
};
