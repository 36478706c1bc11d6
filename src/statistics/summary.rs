use chrono::NaiveDateTime;
use serde::Serialize;

use crate::{
    config::Selection,
    quantity::{energy::KilowattHours, volume::CubicMeters},
    reading::ReadingLog,
    series::{Deltas, GroupByAsset},
};

/// Floor on the observation window so sub-day windows don't explode the
/// per-day averages.
const MIN_DAYS_SPAN: f64 = 0.1;

const SECONDS_PER_DAY: f64 = 86_400.0;

/// Selection-wide consumption totals and per-day averages.
#[derive(Copy, Clone, Debug, PartialEq, Serialize)]
pub struct Summary {
    pub total_energy: KilowattHours,
    pub total_volume: CubicMeters,
    pub avg_energy_per_day: KilowattHours,
    pub avg_volume_per_day: CubicMeters,

    /// Whether anything was consumed at all — drives the empty state in the
    /// presentation layer.
    pub has_data: bool,
}

/// Sum interval deltas over every asset in the selection and normalize them by
/// the observation window.
///
/// The window is bounded by the *later* timestamp of each interval, so a
/// single interval spans no time and yields zero averages.
#[must_use]
pub fn summarize(readings: &ReadingLog, selection: &Selection) -> Summary {
    let mut total_energy = KilowattHours::ZERO;
    let mut total_volume = CubicMeters::ZERO;
    let mut window: Option<(NaiveDateTime, NaiveDateTime)> = None;

    let groups =
        readings.iter().filter(|reading| selection.includes(&reading.asset_id)).group_by_asset();
    for group in groups.values() {
        for interval in group.iter().copied().deltas() {
            if let Some(energy) = interval.energy {
                total_energy += energy;
            }
            if let Some(volume) = interval.volume {
                total_volume += volume;
            }
            let end = interval.time_range.end;
            window = match window {
                None => Some((end, end)),
                Some((first, last)) => Some((first.min(end), last.max(end))),
            };
        }
    }

    let (avg_energy_per_day, avg_volume_per_day) = match window {
        Some((first, last)) if last > first => {
            let days = (last - first).as_seconds_f64() / SECONDS_PER_DAY;
            let days = days.max(MIN_DAYS_SPAN);
            (total_energy / days, total_volume / days)
        }
        _ => (KilowattHours::ZERO, CubicMeters::ZERO),
    };

    Summary {
        total_energy,
        total_volume,
        avg_energy_per_day,
        avg_volume_per_day,
        has_data: total_energy > KilowattHours::ZERO || total_volume > CubicMeters::ZERO,
    }
}
