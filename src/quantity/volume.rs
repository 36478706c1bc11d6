use std::fmt::{Debug, Display, Formatter};

use crate::quantity::Quantity;

/// Cumulative or incremental water volume from a flow totalizer.
pub type CubicMeters = Quantity<f64, 0, 0, 1>;

impl Default for CubicMeters {
    fn default() -> Self {
        Self(0.0)
    }
}

impl Display for CubicMeters {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.0} m³", self.0)
    }
}

impl Debug for CubicMeters {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.0}m³", self.0)
    }
}
