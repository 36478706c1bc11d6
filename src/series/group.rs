use std::collections::BTreeMap;

use crate::reading::Reading;

impl<T> GroupByAsset for T where T: ?Sized {}

pub trait GroupByAsset {
    /// Partition readings by asset identity and order every partition by
    /// ascending date.
    ///
    /// Readings referencing asset ids unknown to the configuration still form
    /// their own partition. The sort is stable, so equal timestamps keep their
    /// original relative order, and the [`BTreeMap`] makes cross-asset
    /// iteration deterministic: re-running an aggregation over an unchanged
    /// snapshot reproduces its output exactly.
    fn group_by_asset<'a>(self) -> BTreeMap<&'a str, Vec<&'a Reading>>
    where
        Self: Iterator<Item = &'a Reading> + Sized,
    {
        let mut groups: BTreeMap<&str, Vec<&Reading>> = BTreeMap::new();
        for reading in self {
            groups.entry(reading.asset_id.as_str()).or_default().push(reading);
        }
        for readings in groups.values_mut() {
            readings.sort_by_key(|reading| reading.date);
        }
        groups
    }
}

#[cfg(test)]
mod tests {
    use chrono::{NaiveDate, NaiveDateTime};

    use super::*;
    use crate::reading::Counters;

    fn at(day: u32, hour: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 3, day).unwrap().and_hms_opt(hour, 0, 0).unwrap()
    }

    #[test]
    fn test_empty_input() {
        assert!(std::iter::empty::<&Reading>().group_by_asset().is_empty());
    }

    #[test]
    fn test_partitions_and_sorts() {
        let readings = [
            Reading::new(1, at(2, 8), "b".to_owned(), Counters::energy_only(200.0.into())),
            Reading::new(2, at(1, 8), "a".to_owned(), Counters::energy_only(10.0.into())),
            Reading::new(3, at(1, 9), "b".to_owned(), Counters::energy_only(100.0.into())),
        ];
        let groups = readings.iter().group_by_asset();
        assert_eq!(groups.len(), 2);
        assert_eq!(groups["a"].len(), 1);
        let ids = groups["b"].iter().map(|reading| reading.id).collect::<Vec<_>>();
        assert_eq!(ids, [3, 1]);
    }

    #[test]
    fn test_equal_timestamps_keep_entry_order() {
        let readings = [
            Reading::new(1, at(1, 8), "a".to_owned(), Counters::energy_only(1.0.into())),
            Reading::new(2, at(1, 8), "a".to_owned(), Counters::energy_only(2.0.into())),
            Reading::new(3, at(1, 8), "a".to_owned(), Counters::energy_only(3.0.into())),
        ];
        let groups = readings.iter().group_by_asset();
        let ids = groups["a"].iter().map(|reading| reading.id).collect::<Vec<_>>();
        assert_eq!(ids, [1, 2, 3]);
    }
}
