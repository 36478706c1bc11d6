mod delta;
mod group;

pub use self::{
    delta::{Deltas, Interval},
    group::GroupByAsset,
};
