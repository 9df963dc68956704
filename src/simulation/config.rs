//! Simulation parameters

use std::collections::HashSet;
use std::str::FromStr;

use super::error::{SimError, SimResult};
use super::types::MAX_ROADS;

/// Name and green time of one road
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoadConfig {
    pub name: String,
    pub green_time: u32,
}

impl RoadConfig {
    pub fn new(name: impl Into<String>, green_time: u32) -> Self {
        Self {
            name: name.into(),
            green_time,
        }
    }
}

/// Parses `NAME:GREEN_TIME`, e.g. `Main St:6`
impl FromStr for RoadConfig {
    type Err = SimError;

    fn from_str(s: &str) -> SimResult<Self> {
        let (name, green_time) = s
            .rsplit_once(':')
            .ok_or_else(|| SimError::invalid(format!("expected NAME:GREEN_TIME, got '{s}'")))?;
        let green_time = green_time
            .trim()
            .parse()
            .map_err(|_| SimError::invalid(format!("invalid green time in '{s}'")))?;
        Ok(Self::new(name.trim(), green_time))
    }
}

/// Everything needed to run one simulation
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationConfig {
    /// Number of steps during which vehicles may arrive
    pub simulation_time: u32,
    /// Chance of an arrival per lane per step
    pub arrival_probability: f64,
    pub roads: Vec<RoadConfig>,
    /// Seed for reproducible arrivals
    pub seed: Option<u64>,
}

impl SimulationConfig {
    pub fn validate(&self) -> SimResult<()> {
        if self.simulation_time == 0 {
            return Err(SimError::invalid("simulation time must be positive"));
        }
        if !(self.arrival_probability > 0.0 && self.arrival_probability <= 1.0) {
            return Err(SimError::invalid(format!(
                "arrival probability must be in (0, 1], got {}",
                self.arrival_probability
            )));
        }
        if self.roads.is_empty() || self.roads.len() > MAX_ROADS {
            return Err(SimError::invalid(format!(
                "expected 1 to {MAX_ROADS} roads, got {}",
                self.roads.len()
            )));
        }

        let mut names = HashSet::new();
        for road in &self.roads {
            if road.name.trim().is_empty() {
                return Err(SimError::invalid("road name must not be empty"));
            }
            if road.green_time == 0 {
                return Err(SimError::invalid(format!(
                    "green time for road {} must be positive",
                    road.name
                )));
            }
            if !names.insert(road.name.as_str()) {
                return Err(SimError::invalid(format!(
                    "duplicate road name {}",
                    road.name
                )));
            }
        }
        Ok(())
    }
}
