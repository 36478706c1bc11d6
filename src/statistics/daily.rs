use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::Serialize;

use crate::{
    config::Selection,
    quantity::{energy::KilowattHours, volume::CubicMeters},
    reading::ReadingLog,
    series::{Deltas, GroupByAsset},
};

/// One calendar day's consumption summed over the selection.
#[derive(Copy, Clone, Debug, PartialEq, Serialize)]
pub struct DailyStat {
    pub date: NaiveDate,
    pub energy: KilowattHours,
    pub volume: CubicMeters,
}

/// Bucket every interval under the calendar date of its later reading and sum
/// across the selection, ascending by date.
///
/// Days without any interval produce no entry — gaps are not zero-filled. A
/// day with intervals whose deltas are all absent still gets a zero entry.
#[must_use]
pub fn daily_series(readings: &ReadingLog, selection: &Selection) -> Vec<DailyStat> {
    let mut buckets: BTreeMap<NaiveDate, (KilowattHours, CubicMeters)> = BTreeMap::new();

    let groups =
        readings.iter().filter(|reading| selection.includes(&reading.asset_id)).group_by_asset();
    for group in groups.values() {
        for interval in group.iter().copied().deltas() {
            let bucket = buckets.entry(interval.time_range.end.date()).or_default();
            if let Some(energy) = interval.energy {
                bucket.0 += energy;
            }
            if let Some(volume) = interval.volume {
                bucket.1 += volume;
            }
        }
    }

    buckets
        .into_iter()
        .map(|(date, (energy, volume))| DailyStat { date, energy, volume })
        .collect()
}
