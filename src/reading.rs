use std::cmp::Reverse;

use chrono::NaiveDateTime;
use itertools::Itertools;
use serde::{Deserialize, Serialize};

use crate::{
    prelude::*,
    quantity::{energy::KilowattHours, hours::RunningHours, volume::CubicMeters},
};

/// One operator-entered sample of an asset's cumulative counters.
///
/// `id` is pure identity (deletion handle), never an ordering key; ordering is
/// always by `date`. The referenced asset may since have been deleted from the
/// configuration — derivation still runs over such readings.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize, derive_more::Constructor)]
#[serde(try_from = "RawReading", into = "RawReading")]
pub struct Reading {
    pub id: u64,
    pub date: NaiveDateTime,
    pub asset_id: String,
    pub counters: Counters,
}

impl Reading {
    #[must_use]
    pub const fn energy(&self) -> Option<KilowattHours> {
        match self.counters {
            Counters::Rotating { energy, .. } => energy,
            Counters::Flow { .. } => None,
        }
    }

    #[must_use]
    pub const fn volume(&self) -> Option<CubicMeters> {
        match self.counters {
            Counters::Rotating { .. } => None,
            Counters::Flow { volume } => volume,
        }
    }

    #[must_use]
    pub const fn connected_hours(&self) -> Option<RunningHours> {
        match self.counters {
            Counters::Rotating { connected, .. } => connected,
            Counters::Flow { .. } => None,
        }
    }

    #[must_use]
    pub const fn run_hours(&self) -> Option<RunningHours> {
        match self.counters {
            Counters::Rotating { running, .. } => running,
            Counters::Flow { .. } => None,
        }
    }
}

/// The counters a reading carries, split by equipment family so a flow record
/// cannot smuggle energy fields and vice versa.
///
/// Fields inside a variant stay optional: operators record only what they read
/// off the meter that day, and an absent field is never the same as zero.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Counters {
    Rotating {
        energy: Option<KilowattHours>,
        connected: Option<RunningHours>,
        running: Option<RunningHours>,
    },
    Flow {
        volume: Option<CubicMeters>,
    },
}

impl Counters {
    #[must_use]
    pub const fn energy_only(energy: KilowattHours) -> Self {
        Self::Rotating { energy: Some(energy), connected: None, running: None }
    }

    #[must_use]
    pub const fn volume_only(volume: CubicMeters) -> Self {
        Self::Flow { volume: Some(volume) }
    }
}

/// Stored wire shape: the flat optional-field record the register form writes.
#[derive(Clone, Deserialize, Serialize)]
struct RawReading {
    id: u64,
    date: NaiveDateTime,
    #[serde(rename = "assetId")]
    asset_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    kwh: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    h_conn: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    h_run: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    m3: Option<f64>,
}

impl TryFrom<RawReading> for Reading {
    type Error = Error;

    fn try_from(raw: RawReading) -> Result<Self> {
        let counters = match raw {
            RawReading { m3: Some(_), kwh: Some(_), .. }
            | RawReading { m3: Some(_), h_conn: Some(_), .. }
            | RawReading { m3: Some(_), h_run: Some(_), .. } => {
                bail!("reading {} carries both flow and rotating counters", raw.id)
            }
            RawReading { m3: Some(m3), .. } => Counters::Flow { volume: Some(m3.into()) },
            RawReading { m3: None, kwh, h_conn, h_run, .. } => Counters::Rotating {
                energy: kwh.map(KilowattHours::from),
                connected: h_conn.map(RunningHours::from),
                running: h_run.map(RunningHours::from),
            },
        };
        Ok(Self { id: raw.id, date: raw.date, asset_id: raw.asset_id, counters })
    }
}

impl From<Reading> for RawReading {
    fn from(reading: Reading) -> Self {
        let (kwh, h_conn, h_run, m3) = match reading.counters {
            Counters::Rotating { energy, connected, running } => (
                energy.map(|quantity| quantity.0),
                connected.map(|quantity| quantity.0),
                running.map(|quantity| quantity.0),
                None,
            ),
            Counters::Flow { volume } => (None, None, None, volume.map(|quantity| quantity.0)),
        };
        Self { id: reading.id, date: reading.date, asset_id: reading.asset_id, kwh, h_conn, h_run, m3 }
    }
}

/// The current snapshot of all recorded readings.
///
/// Appended by the data-entry form, pruned by id on operator request; the
/// derivation engine only ever reads it.
#[derive(
    Clone,
    Debug,
    Default,
    PartialEq,
    Deserialize,
    Serialize,
    derive_more::From,
    derive_more::IntoIterator,
)]
pub struct ReadingLog(Vec<Reading>);

impl ReadingLog {
    pub fn append(&mut self, reading: Reading) {
        self.0.push(reading);
    }

    /// Remove by identity; reports whether anything matched.
    pub fn remove(&mut self, id: u64) -> bool {
        let count = self.0.len();
        self.0.retain(|reading| reading.id != id);
        self.0.len() != count
    }

    /// Latest entries first, for the data-entry history panel.
    #[must_use]
    pub fn recent(&self, count: usize) -> Vec<&Reading> {
        self.0.iter().sorted_by_key(|reading| Reverse(reading.date)).take(count).collect()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Reading> {
        self.0.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    fn at(day: u32, hour: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 3, day).unwrap().and_hms_opt(hour, 0, 0).unwrap()
    }

    #[test]
    fn test_serialize_flat_shape() {
        let reading = Reading::new(
            42,
            at(1, 8),
            "b_tbo_3".to_owned(),
            Counters::Rotating {
                energy: Some(KilowattHours::from(1250.5)),
                connected: Some(RunningHours::from(300.0)),
                running: None,
            },
        );
        let json = serde_json::to_value(&reading).unwrap();
        assert_eq!(json["assetId"], "b_tbo_3");
        assert_eq!(json["kwh"], 1250.5);
        assert_eq!(json["h_conn"], 300.0);
        assert!(json.get("h_run").is_none());
        assert!(json.get("m3").is_none());
    }

    #[test]
    fn test_round_trip() {
        let reading = Reading::new(
            7,
            at(2, 9),
            "fit_64".to_owned(),
            Counters::volume_only(CubicMeters::from(50_000.0)),
        );
        let json = serde_json::to_string(&reading).unwrap();
        let back: Reading = serde_json::from_str(&json).unwrap();
        assert_eq!(back, reading);
    }

    #[test]
    fn test_rejects_mixed_counters() {
        let json = r#"{"id":1,"date":"2025-03-01T08:00:00","assetId":"x","kwh":10.0,"m3":5.0}"#;
        assert!(serde_json::from_str::<Reading>(json).is_err());
    }

    #[test]
    fn test_missing_fields_deserialize_as_absent() {
        let json = r#"{"id":1,"date":"2025-03-01T08:00:00","assetId":"b_42","h_run":120.5}"#;
        let reading: Reading = serde_json::from_str(json).unwrap();
        assert_eq!(reading.energy(), None);
        assert_eq!(reading.run_hours(), Some(RunningHours::from(120.5)));
    }

    #[test]
    fn test_remove_by_id() {
        let mut log = ReadingLog::default();
        log.append(Reading::new(1, at(1, 8), "a".to_owned(), Counters::energy_only(1.0.into())));
        log.append(Reading::new(2, at(2, 8), "a".to_owned(), Counters::energy_only(2.0.into())));
        assert!(log.remove(1));
        assert!(!log.remove(1));
        assert_eq!(log.len(), 1);
        assert_eq!(log.iter().next().unwrap().id, 2);
    }

    #[test]
    fn test_recent_is_newest_first() {
        let mut log = ReadingLog::default();
        log.append(Reading::new(1, at(1, 8), "a".to_owned(), Counters::energy_only(1.0.into())));
        log.append(Reading::new(2, at(3, 8), "a".to_owned(), Counters::energy_only(2.0.into())));
        log.append(Reading::new(3, at(2, 8), "a".to_owned(), Counters::energy_only(3.0.into())));
        let ids = log.recent(2).into_iter().map(|reading| reading.id).collect::<Vec<_>>();
        assert_eq!(ids, [2, 3]);
    }
}
