use chrono::TimeDelta;
use itertools::Itertools;

use crate::{
    quantity::{
        energy::KilowattHours, hours::RunningHours, power::Kilowatts, time_range::TimeRange,
        volume::CubicMeters,
    },
    reading::Reading,
};

/// Spans shorter than this produce no rate: dividing a counter delta by a
/// near-zero elapsed time would blow up into a nonsense power figure.
const MIN_RATE_SPAN_HOURS: f64 = 0.01;

/// Consumption between two consecutive readings of one asset.
///
/// `energy` and `volume` are present only when *both* endpoints define the
/// counter, and are clamped at zero: a decreasing totalizer (counter reset or
/// meter replacement) yields a zero delta, never a negative one and never an
/// error. There is no way to tell a rollback from a swap, so the consumption
/// that ran up the old meter's last digits is knowingly under-counted.
///
/// `connected` and `running` are raw hour-counter differences carried for
/// display; they take no part in aggregation.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Interval {
    pub time_range: TimeRange,
    pub energy: Option<KilowattHours>,
    pub volume: Option<CubicMeters>,
    pub connected: Option<RunningHours>,
    pub running: Option<RunningHours>,
}

impl Interval {
    #[must_use]
    pub fn between(prev: &Reading, curr: &Reading) -> Self {
        Self {
            time_range: TimeRange::new(prev.date, curr.date),
            energy: curr
                .energy()
                .zip(prev.energy())
                .map(|(curr, prev)| (curr - prev).max(KilowattHours::ZERO)),
            volume: curr
                .volume()
                .zip(prev.volume())
                .map(|(curr, prev)| (curr - prev).max(CubicMeters::ZERO)),
            connected: curr
                .connected_hours()
                .zip(prev.connected_hours())
                .map(|(curr, prev)| curr - prev),
            running: curr.run_hours().zip(prev.run_hours()).map(|(curr, prev)| curr - prev),
        }
    }

    #[must_use]
    pub fn elapsed(&self) -> TimeDelta {
        self.time_range.delta()
    }

    #[must_use]
    pub fn elapsed_hours(&self) -> f64 {
        self.elapsed().as_seconds_f64() / 3600.0
    }

    /// Average consumption rate over the interval, zero when no energy delta
    /// is computable or the interval is too short for a meaningful rate.
    #[must_use]
    pub fn power(&self) -> Kilowatts {
        match self.energy {
            Some(energy) if self.elapsed_hours() > MIN_RATE_SPAN_HOURS => energy / self.elapsed(),
            _ => Kilowatts::ZERO,
        }
    }

    /// What the interval's observed rate would consume over a full day — a
    /// projection that puts intervals of unequal length on a common footing.
    #[must_use]
    pub fn normalized_24h(&self) -> KilowattHours {
        self.power() * TimeDelta::hours(24)
    }
}

impl<T> Deltas for T where T: ?Sized {}

pub trait Deltas {
    /// Intervals between consecutive readings; fewer than two readings yield
    /// nothing — a delta takes two points.
    fn deltas<'a>(self) -> impl Iterator<Item = Interval>
    where
        Self: Iterator<Item = &'a Reading> + Sized,
    {
        self.tuple_windows().map(|(prev, curr)| Interval::between(prev, curr))
    }
}
