use std::{
    fmt::{Debug, Display, Formatter},
    ops::Div,
};

use chrono::TimeDelta;

use crate::quantity::{Quantity, power::Kilowatts};

/// Cumulative or incremental electrical energy.
pub type KilowattHours = Quantity<f64, 1, 1, 0>;

impl Default for KilowattHours {
    fn default() -> Self {
        Self(0.0)
    }
}

impl Display for KilowattHours {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.1} kWh", self.0)
    }
}

impl Debug for KilowattHours {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.1}kWh", self.0)
    }
}

impl Div<TimeDelta> for KilowattHours {
    type Output = Kilowatts;

    fn div(self, rhs: TimeDelta) -> Self::Output {
        let hours = rhs.as_seconds_f64() / 3600.0;
        Quantity(self.0 / hours)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_div_time_delta() {
        let power = KilowattHours::from(50.0) / TimeDelta::hours(1);
        assert_eq!(power, Kilowatts::from(50.0));
    }
}
