//! Core types for the intersection simulation
//!
//! Directions, lanes, light phases and the vehicle record.

use std::fmt;

use super::error::{SimError, SimResult};

/// Maximum number of roads that may cross at one intersection
pub const MAX_ROADS: usize = 4;

/// Number of travel directions on a two-way road
pub const NUM_DIRECTIONS: usize = 2;

/// Number of lanes per direction
pub const NUM_LANES: usize = 3;

/// A road's left-signal time is its green time divided by this, rounded down
pub const LEFT_SIGNAL_DIVISOR: u32 = 3;

/// Direction of travel on a two-way road
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Forward,
    Backward,
}

impl Direction {
    pub const ALL: [Direction; NUM_DIRECTIONS] = [Direction::Forward, Direction::Backward];

    pub fn index(self) -> usize {
        match self {
            Direction::Forward => 0,
            Direction::Backward => 1,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Direction::Forward => "FORWARD",
            Direction::Backward => "BACKWARD",
        }
    }
}

impl TryFrom<usize> for Direction {
    type Error = SimError;

    fn try_from(index: usize) -> SimResult<Self> {
        Direction::ALL
            .get(index)
            .copied()
            .ok_or_else(|| SimError::invalid(format!("direction index {index} out of range")))
    }
}

/// A lane within one direction of a road
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Lane {
    Left,
    Middle,
    Right,
}

impl Lane {
    pub const ALL: [Lane; NUM_LANES] = [Lane::Left, Lane::Middle, Lane::Right];

    /// Lanes released during a GREEN phase
    pub const THROUGH: [Lane; 2] = [Lane::Middle, Lane::Right];

    pub fn index(self) -> usize {
        match self {
            Lane::Left => 0,
            Lane::Middle => 1,
            Lane::Right => 2,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Lane::Left => "LEFT",
            Lane::Middle => "MIDDLE",
            Lane::Right => "RIGHT",
        }
    }
}

impl TryFrom<usize> for Lane {
    type Error = SimError;

    fn try_from(index: usize) -> SimResult<Self> {
        Lane::ALL
            .get(index)
            .copied()
            .ok_or_else(|| SimError::invalid(format!("lane index {index} out of range")))
    }
}

/// Phase of a road's light
///
/// GREEN releases the middle and right lanes, LEFT_SIGNAL releases the left
/// lanes, RED releases nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LightValue {
    Green,
    LeftSignal,
    Red,
}

impl fmt::Display for LightValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            LightValue::Green => "GREEN",
            LightValue::LeftSignal => "LEFT_SIGNAL",
            LightValue::Red => "RED",
        };
        f.write_str(name)
    }
}

/// Serial number of a vehicle, assigned in arrival order starting at 1
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct VehicleId(pub u64);

/// A vehicle waiting at (or passing through) the intersection
///
/// Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Vehicle {
    serial_id: VehicleId,
    arrival_time: u32,
}

impl Vehicle {
    pub fn new(serial_id: u64, arrival_time: u32) -> SimResult<Self> {
        if serial_id == 0 {
            return Err(SimError::invalid("vehicle serial id must be positive"));
        }
        if arrival_time == 0 {
            return Err(SimError::invalid("vehicle arrival time must be positive"));
        }
        Ok(Self {
            serial_id: VehicleId(serial_id),
            arrival_time,
        })
    }

    pub fn serial_id(&self) -> VehicleId {
        self.serial_id
    }

    pub fn arrival_time(&self) -> u32 {
        self.arrival_time
    }

    /// Number of steps spent waiting if the vehicle leaves at `time_step`
    pub fn wait_time(&self, time_step: u32) -> u32 {
        time_step.saturating_sub(self.arrival_time)
    }
}

impl fmt::Display for Vehicle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{:03}]", self.serial_id.0)
    }
}

/// Issues vehicles with consecutive serial ids for one simulation run
#[derive(Debug, Clone, Default)]
pub struct SerialCounter {
    issued: u64,
}

impl SerialCounter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create the next vehicle, arriving at `arrival_time`
    ///
    /// The counter only advances when the vehicle is valid.
    pub fn issue(&mut self, arrival_time: u32) -> SimResult<Vehicle> {
        let vehicle = Vehicle::new(self.issued + 1, arrival_time)?;
        self.issued += 1;
        Ok(vehicle)
    }

    /// Number of vehicles issued so far
    pub fn issued(&self) -> u64 {
        self.issued
    }
}
