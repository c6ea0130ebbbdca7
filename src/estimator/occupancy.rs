//! GPU occupancy under register pressure

use crate::config::EstimatorConstants;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OccupancyEstimate {
    pub without_percent: u32,
    pub with_percent: u32,
}

impl OccupancyEstimate {
    /// Occupancy points lost to the extra registers
    pub fn drop_percent(&self) -> u32 {
        self.without_percent.saturating_sub(self.with_percent)
    }
}

/// Occupancy for a per-thread register count, clamped to the configured range
pub fn occupancy_for_registers(registers_per_thread: u32, constants: &EstimatorConstants) -> u32 {
    let lo = constants.min_occupancy_percent.min(constants.max_occupancy_percent);
    let hi = constants.min_occupancy_percent.max(constants.max_occupancy_percent);

    if constants.max_threads_per_sm == 0 {
        return lo;
    }

    let registers = registers_per_thread.max(1);
    let threads = (constants.registers_per_sm / registers).min(constants.max_threads_per_sm);

    // Threads are scheduled a warp at a time
    let warp = constants.warp_size.max(1);
    let threads = threads / warp * warp;

    let percent = u64::from(threads) * 100 / u64::from(constants.max_threads_per_sm);
    (percent.min(u64::from(u32::MAX)) as u32).clamp(lo, hi)
}

/// Occupancy without and with the geometry register overhead
pub fn estimate_occupancy(
    base_registers: u32,
    overhead_registers: u32,
    constants: &EstimatorConstants,
) -> OccupancyEstimate {
    OccupancyEstimate {
        without_percent: occupancy_for_registers(base_registers, constants),
        with_percent: occupancy_for_registers(
            base_registers.saturating_add(overhead_registers),
            constants,
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_registers() {
        let occ = estimate_occupancy(64, 32, &EstimatorConstants::default());
        assert_eq!(occ.without_percent, 50);
        // 65536 / 96 = 682 threads, 672 after warp rounding
        assert_eq!(occ.with_percent, 32);
        assert_eq!(occ.drop_percent(), 18);
    }

    #[test]
    fn test_extremes_are_clamped() {
        let c = EstimatorConstants::default();
        assert_eq!(occupancy_for_registers(0, &c), 100);
        assert_eq!(occupancy_for_registers(10_000, &c), 10);
        assert_eq!(occupancy_for_registers(u32::MAX, &c), 10);

        let occ = estimate_occupancy(u32::MAX, u32::MAX, &c);
        assert_eq!(occ.with_percent, 10);
    }
}
