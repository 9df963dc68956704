//! FIFO queue of vehicles waiting in one lane

use std::collections::VecDeque;

use super::error::{SimError, SimResult};
use super::types::Vehicle;

/// Vehicles waiting in a single lane, released in arrival order
#[derive(Debug, Clone, Default)]
pub struct LaneQueue {
    vehicles: VecDeque<Vehicle>,
}

impl LaneQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a vehicle to the rear of the lane
    pub fn enqueue(&mut self, vehicle: Vehicle) {
        self.vehicles.push_back(vehicle);
    }

    /// Remove the vehicle at the front of the lane
    pub fn dequeue(&mut self) -> SimResult<Vehicle> {
        self.vehicles.pop_front().ok_or(SimError::EmptyQueue)
    }

    /// The vehicle that would be released next
    pub fn peek(&self) -> Option<&Vehicle> {
        self.vehicles.front()
    }

    /// Vehicle at `index`, counted from the front
    pub fn get(&self, index: usize) -> Option<&Vehicle> {
        self.vehicles.get(index)
    }

    pub fn is_empty(&self) -> bool {
        self.vehicles.is_empty()
    }

    pub fn len(&self) -> usize {
        self.vehicles.len()
    }

    /// Iterate front to rear
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &Vehicle> + ExactSizeIterator {
        self.vehicles.iter()
    }
}
