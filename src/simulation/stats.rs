//! Running statistics for a simulation

use log::info;

/// Counters updated as vehicles arrive and pass through
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SimulationStats {
    pub total_vehicles_arrived: u64,
    pub total_vehicles_passed: u64,
    pub vehicles_waiting: u64,
    pub total_wait_time: u64,
    pub longest_wait_time: u32,
    pub elapsed_steps: u32,
}

impl SimulationStats {
    pub fn record_arrival(&mut self) {
        self.total_vehicles_arrived += 1;
        self.vehicles_waiting += 1;
    }

    pub fn record_departure(&mut self, wait_time: u32) {
        debug_assert!(
            self.vehicles_waiting > 0,
            "departure recorded with no vehicle waiting"
        );
        self.total_vehicles_passed += 1;
        self.vehicles_waiting = self.vehicles_waiting.saturating_sub(1);
        self.total_wait_time += u64::from(wait_time);
        self.longest_wait_time = self.longest_wait_time.max(wait_time);
    }

    /// Mean wait of the vehicles that have passed, 0 when none have
    pub fn average_wait_time(&self) -> f64 {
        if self.total_vehicles_passed == 0 {
            0.0
        } else {
            self.total_wait_time as f64 / self.total_vehicles_passed as f64
        }
    }

    /// Log the end-of-run summary
    pub fn log_summary(&self) {
        info!("=== SIMULATION COMPLETE ===");
        info!("Total time: {} steps", self.elapsed_steps);
        info!("Total vehicles: {}", self.total_vehicles_arrived);
        info!("Total vehicles passed: {}", self.total_vehicles_passed);
        info!("Longest wait time: {} turns", self.longest_wait_time);
        info!("Total wait time: {} turns", self.total_wait_time);
        info!("Average wait time: {:.2} turns", self.average_wait_time());
    }
}
