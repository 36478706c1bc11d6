use std::fmt::{Debug, Display, Formatter};

use crate::quantity::Quantity;

/// Operating-hour counter value: time a machine spent connected or running.
pub type RunningHours = Quantity<f64, 0, 1, 0>;

impl Default for RunningHours {
    fn default() -> Self {
        Self(0.0)
    }
}

impl Display for RunningHours {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.1} h", self.0)
    }
}

impl Debug for RunningHours {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.1}h", self.0)
    }
}
