//! Round-robin light controller for the roads crossing at an intersection

use log::debug;

use super::error::{SimError, SimResult};
use super::two_way_road::{Release, TwoWayRoad};
use super::types::{Direction, Lane, LightValue, Vehicle, MAX_ROADS};

/// An intersection of one to four roads sharing a single light cycle
///
/// Exactly one road holds the light at a time. It keeps it for its full green
/// time, then the light moves to the next road in order. A road with nothing
/// to release is skipped for the step.
#[derive(Debug, Clone)]
pub struct Intersection {
    roads: Vec<TwoWayRoad>,
    /// Index of the road holding the light
    light_index: usize,
    /// Steps the active road may still hold the light
    countdown_timer: u32,
}

impl Intersection {
    pub fn new(roads: Vec<TwoWayRoad>) -> SimResult<Self> {
        if roads.is_empty() {
            return Err(SimError::invalid("an intersection needs at least one road"));
        }
        if roads.len() > MAX_ROADS {
            return Err(SimError::invalid(format!(
                "an intersection holds at most {MAX_ROADS} roads, got {}",
                roads.len()
            )));
        }

        let countdown_timer = roads[0].green_time();
        Ok(Self {
            roads,
            light_index: 0,
            countdown_timer,
        })
    }

    /// Build from possibly missing road slots; any missing slot is rejected
    pub fn from_slots(slots: Vec<Option<TwoWayRoad>>) -> SimResult<Self> {
        let roads = slots
            .into_iter()
            .enumerate()
            .map(|(index, slot)| {
                slot.ok_or_else(|| SimError::invalid(format!("road slot {index} is empty")))
            })
            .collect::<SimResult<Vec<_>>>()?;
        Self::new(roads)
    }

    /// Queue a vehicle on one lane of one road
    pub fn enqueue_vehicle(
        &mut self,
        road_index: usize,
        direction: Direction,
        lane: Lane,
        vehicle: Vehicle,
    ) -> SimResult<()> {
        let num_roads = self.roads.len();
        let road = self.roads.get_mut(road_index).ok_or_else(|| {
            SimError::invalid(format!(
                "road index {road_index} out of range for {num_roads} roads"
            ))
        })?;
        road.enqueue_vehicle(direction, lane, vehicle);
        Ok(())
    }

    /// Same as [`Intersection::enqueue_vehicle`] with raw direction and lane
    /// indices
    pub fn enqueue_vehicle_at(
        &mut self,
        road_index: usize,
        direction_index: usize,
        lane_index: usize,
        vehicle: Vehicle,
    ) -> SimResult<()> {
        let direction = Direction::try_from(direction_index)?;
        let lane = Lane::try_from(lane_index)?;
        self.enqueue_vehicle(road_index, direction, lane, vehicle)
    }

    fn next_index(&self, index: usize) -> usize {
        (index + 1) % self.roads.len()
    }

    /// Hand the light to the next road with a fresh budget
    fn rotate(&mut self) {
        self.light_index = self.next_index(self.light_index);
        self.countdown_timer = self.roads[self.light_index].green_time();
    }

    /// Advance the intersection by one time step
    ///
    /// Returns the vehicles that passed through, or [`Release::Idle`] when
    /// every road was idle.
    pub fn step(&mut self) -> SimResult<Release> {
        if self.countdown_timer == 0 {
            self.rotate();
            debug!(
                "light passes to {} for {} steps",
                self.roads[self.light_index].name(),
                self.countdown_timer
            );
        }

        let start_index = self.light_index;
        let start_timer = self.countdown_timer;
        let mut release = self.roads[start_index].advance(start_timer)?;

        while release.is_idle() {
            self.light_index = self.next_index(self.light_index);
            if self.light_index == start_index {
                debug!("all roads idle, holding light on {}", self.roads[start_index].name());
                self.countdown_timer = start_timer - 1;
                return Ok(Release::Idle);
            }
            self.countdown_timer = self.roads[self.light_index].green_time();
            debug!(
                "skipping idle road, trying {}",
                self.roads[self.light_index].name()
            );
            release = self.roads[self.light_index].advance(self.countdown_timer)?;
        }

        self.countdown_timer -= 1;
        Ok(release)
    }

    pub fn num_roads(&self) -> usize {
        self.roads.len()
    }

    pub fn active_road_index(&self) -> usize {
        self.light_index
    }

    pub fn active_road(&self) -> &TwoWayRoad {
        &self.roads[self.light_index]
    }

    pub fn active_countdown(&self) -> u32 {
        self.countdown_timer
    }

    pub fn active_light_phase(&self) -> LightValue {
        self.active_road().light_value()
    }

    pub fn roads(&self) -> &[TwoWayRoad] {
        &self.roads
    }

    pub fn road(&self, index: usize) -> Option<&TwoWayRoad> {
        self.roads.get(index)
    }

    /// True when no vehicle waits in any lane of any road
    pub fn all_roads_empty(&self) -> bool {
        self.roads.iter().all(TwoWayRoad::all_lanes_empty)
    }

    /// Total number of vehicles waiting across all roads
    pub fn waiting_count(&self) -> usize {
        self.roads.iter().map(TwoWayRoad::waiting_count).sum()
    }
}
