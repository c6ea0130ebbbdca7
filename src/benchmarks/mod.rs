pub mod timing;

pub use timing::{overhead_percent, OverheadRow, TimingError, TimingSample, TimingSet};
