//! One road crossing the intersection
//!
//! A two-way road holds three lanes in each direction and runs the two-phase
//! light that decides which lanes may release a vehicle on each call.

use log::trace;

use super::error::{SimError, SimResult};
use super::lane_queue::LaneQueue;
use super::types::{
    Direction, Lane, LightValue, Vehicle, LEFT_SIGNAL_DIVISOR, NUM_DIRECTIONS, NUM_LANES,
};

/// Outcome of advancing a road's light by one step
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Release {
    /// Nothing could be released; the intersection should look elsewhere
    Idle,
    /// Vehicles that passed through, in lane order (forward before backward)
    Vehicles(Vec<Vehicle>),
}

impl Release {
    pub fn is_idle(&self) -> bool {
        matches!(self, Release::Idle)
    }

    pub fn vehicles(&self) -> &[Vehicle] {
        match self {
            Release::Idle => &[],
            Release::Vehicles(vehicles) => vehicles,
        }
    }

    pub fn into_vehicles(self) -> Vec<Vehicle> {
        match self {
            Release::Idle => Vec::new(),
            Release::Vehicles(vehicles) => vehicles,
        }
    }
}

/// A road with FORWARD and BACKWARD directions, each with LEFT, MIDDLE and
/// RIGHT lanes
#[derive(Debug, Clone)]
pub struct TwoWayRoad {
    name: String,
    /// Total steps this road may hold the light, left signal included
    green_time: u32,
    /// Trailing part of the green time reserved for the left signal
    left_signal_time: u32,
    lanes: [[LaneQueue; NUM_LANES]; NUM_DIRECTIONS],
    light_value: LightValue,
}

impl TwoWayRoad {
    pub fn new(name: impl Into<String>, green_time: u32) -> SimResult<Self> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(SimError::invalid("road name must not be empty"));
        }
        if green_time == 0 {
            return Err(SimError::invalid(format!(
                "green time for road {name} must be positive"
            )));
        }

        Ok(Self {
            name,
            green_time,
            left_signal_time: green_time / LEFT_SIGNAL_DIVISOR,
            lanes: Default::default(),
            light_value: LightValue::Red,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn green_time(&self) -> u32 {
        self.green_time
    }

    pub fn left_signal_time(&self) -> u32 {
        self.left_signal_time
    }

    pub fn light_value(&self) -> LightValue {
        self.light_value
    }

    /// Read-only view of one lane
    pub fn lane(&self, direction: Direction, lane: Lane) -> &LaneQueue {
        &self.lanes[direction.index()][lane.index()]
    }

    fn lane_mut(&mut self, direction: Direction, lane: Lane) -> &mut LaneQueue {
        &mut self.lanes[direction.index()][lane.index()]
    }

    pub fn enqueue_vehicle(&mut self, direction: Direction, lane: Lane, vehicle: Vehicle) {
        self.lane_mut(direction, lane).enqueue(vehicle);
    }

    pub fn is_lane_empty(&self, direction: Direction, lane: Lane) -> bool {
        self.lane(direction, lane).is_empty()
    }

    pub fn all_lanes_empty(&self) -> bool {
        self.lanes.iter().flatten().all(LaneQueue::is_empty)
    }

    /// Total number of vehicles waiting on this road
    pub fn waiting_count(&self) -> usize {
        self.lanes.iter().flatten().map(LaneQueue::len).sum()
    }

    fn lanes_empty(&self, lanes: &[Lane]) -> bool {
        Direction::ALL
            .iter()
            .all(|&direction| lanes.iter().all(|&lane| self.is_lane_empty(direction, lane)))
    }

    /// Run one step of this road's light with `timer_val` steps left in its
    /// slice
    ///
    /// The left signal takes over once the timer enters the left-signal
    /// window or the through lanes run dry. If the left lanes are empty as
    /// well the light goes RED and [`Release::Idle`] is returned. Otherwise at
    /// most one vehicle leaves each released lane. The light turns RED after
    /// the last step of the slice (`timer_val == 1`).
    pub fn advance(&mut self, timer_val: u32) -> SimResult<Release> {
        if timer_val == 0 {
            return Err(SimError::invalid(format!(
                "timer for road {} must be positive",
                self.name
            )));
        }

        let left_empty = self.lanes_empty(&[Lane::Left]);
        let through_empty = self.lanes_empty(&Lane::THROUGH);

        let phase = if timer_val <= self.left_signal_time || through_empty {
            if left_empty {
                LightValue::Red
            } else {
                LightValue::LeftSignal
            }
        } else {
            LightValue::Green
        };
        trace!(
            "road {}: timer={} left_empty={} through_empty={} -> {}",
            self.name,
            timer_val,
            left_empty,
            through_empty,
            phase
        );

        let released_lanes: &[Lane] = match phase {
            LightValue::Green => &Lane::THROUGH,
            LightValue::LeftSignal => &[Lane::Left],
            LightValue::Red => {
                self.light_value = LightValue::Red;
                return Ok(Release::Idle);
            }
        };

        let mut released = Vec::with_capacity(NUM_DIRECTIONS * released_lanes.len());
        for direction in Direction::ALL {
            for &lane in released_lanes {
                let queue = self.lane_mut(direction, lane);
                if !queue.is_empty() {
                    released.push(queue.dequeue()?);
                }
            }
        }

        self.light_value = if timer_val == 1 {
            LightValue::Red
        } else {
            phase
        };
        Ok(Release::Vehicles(released))
    }
}
