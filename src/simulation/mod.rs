//! Intersection simulation
//!
//! The scheduler core (lanes, roads and the round-robin intersection) plus the
//! step-driven driver that feeds it random arrivals. Everything here runs
//! without any terminal or input handling.

mod arrivals;
mod config;
mod display;
mod error;
mod intersection;
mod lane_queue;
mod simulator;
mod stats;
mod two_way_road;
mod types;

pub use arrivals::BooleanSource;
pub use config::{RoadConfig, SimulationConfig};
pub use error::{SimError, SimResult};
pub use intersection::Intersection;
pub use lane_queue::LaneQueue;
pub use simulator::{Arrival, Departure, IntersectionSimulator, SignalLabel, StepReport};
pub use stats::SimulationStats;
pub use two_way_road::{Release, TwoWayRoad};
pub use types::{
    Direction, Lane, LightValue, SerialCounter, Vehicle, VehicleId, LEFT_SIGNAL_DIVISOR, MAX_ROADS,
    NUM_DIRECTIONS, NUM_LANES,
};
