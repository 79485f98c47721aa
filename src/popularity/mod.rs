//! View-popularity tracking with time-bucketed aggregation and durable
//! persistence.

mod period;
mod tracker;

pub use period::{ParsePeriodError, Period};
pub use tracker::{
    DayCounts, PersistError, PopularEntry, PopularityTracker, ViewHistory, ViewStats,
};
