use std::cmp::Reverse;

use chrono::NaiveDateTime;
use itertools::Itertools;

use crate::{
    config::Config,
    quantity::{energy::KilowattHours, volume::CubicMeters},
    reading::ReadingLog,
    series::{GroupByAsset, Interval},
};

/// One interval of one asset, labelled for the tabular report.
#[derive(Clone, Debug, PartialEq)]
pub struct ReportRow {
    /// Identity of the interval's later reading.
    pub reading_id: u64,
    pub date: NaiveDateTime,
    pub asset_id: String,
    pub asset_name: String,

    /// Raw counter values of the later reading, shown next to the deltas.
    pub read_energy: Option<KilowattHours>,
    pub read_volume: Option<CubicMeters>,

    pub interval: Interval,
}

/// Every interval across all assets, newest first, labelled with the
/// configured asset name — or the bare asset id when the asset has since been
/// deleted from the configuration.
#[must_use]
pub fn build_report(readings: &ReadingLog, config: &Config) -> Vec<ReportRow> {
    let index = config.asset_index();
    let mut rows = Vec::new();
    for (asset_id, group) in readings.iter().group_by_asset() {
        let asset_name =
            index.get(asset_id).map_or_else(|| asset_id.to_owned(), |asset| asset.name.clone());
        for (prev, curr) in group.iter().copied().tuple_windows() {
            rows.push(ReportRow {
                reading_id: curr.id,
                date: curr.date,
                asset_id: asset_id.to_owned(),
                asset_name: asset_name.clone(),
                read_energy: curr.energy(),
                read_volume: curr.volume(),
                interval: Interval::between(prev, curr),
            });
        }
    }
    rows.sort_by_key(|row| Reverse(row.date));
    rows
}
