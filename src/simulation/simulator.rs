//! Step-driven simulation driver
//!
//! Feeds random arrivals into the intersection, advances it one time step at
//! a time and keeps the statistics.

use log::debug;

use super::arrivals::BooleanSource;
use super::config::SimulationConfig;
use super::error::SimResult;
use super::intersection::Intersection;
use super::stats::SimulationStats;
use super::two_way_road::TwoWayRoad;
use super::types::{Direction, Lane, LightValue, SerialCounter, Vehicle};

/// A vehicle that joined a lane this step
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Arrival {
    pub vehicle: Vehicle,
    pub road_name: String,
    pub direction: Direction,
    pub lane: Lane,
}

/// A vehicle that passed through this step
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Departure {
    pub vehicle: Vehicle,
    pub wait_time: u32,
}

/// Light label shown for a step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignalLabel {
    GreenLight,
    LeftSignal,
    RedLight,
}

impl SignalLabel {
    pub fn as_str(self) -> &'static str {
        match self {
            SignalLabel::GreenLight => "Green Light",
            SignalLabel::LeftSignal => "Left Signal",
            SignalLabel::RedLight => "Red Light",
        }
    }
}

/// What happened during one time step
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepReport {
    pub time_step: u32,
    /// Whether vehicles could still arrive this step
    pub arrivals_open: bool,
    pub arrivals: Vec<Arrival>,
    pub departures: Vec<Departure>,
    pub active_road: String,
    pub signal: SignalLabel,
    /// Countdown as shown to the user, one above the stored timer
    pub timer: u32,
}

/// Runs a full simulation over an [`Intersection`]
#[derive(Debug, Clone)]
pub struct IntersectionSimulator {
    config: SimulationConfig,
    intersection: Intersection,
    arrivals: BooleanSource,
    serials: SerialCounter,
    stats: SimulationStats,
    /// The step about to run, starting at 1
    time_step: u32,
}

impl IntersectionSimulator {
    pub fn new(config: SimulationConfig) -> SimResult<Self> {
        config.validate()?;

        let roads = config
            .roads
            .iter()
            .map(|road| TwoWayRoad::new(road.name.clone(), road.green_time))
            .collect::<SimResult<Vec<_>>>()?;
        let intersection = Intersection::new(roads)?;

        let arrivals = match config.seed {
            Some(seed) => BooleanSource::with_seed(config.arrival_probability, seed)?,
            None => BooleanSource::new(config.arrival_probability)?,
        };

        Ok(Self {
            config,
            intersection,
            arrivals,
            serials: SerialCounter::new(),
            stats: SimulationStats::default(),
            time_step: 1,
        })
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    pub fn intersection(&self) -> &Intersection {
        &self.intersection
    }

    pub fn stats(&self) -> &SimulationStats {
        &self.stats
    }

    /// The step that will run next
    pub fn time_step(&self) -> u32 {
        self.time_step
    }

    fn arrivals_open(&self) -> bool {
        self.time_step <= self.config.simulation_time
    }

    /// True once arrivals have stopped and every lane has drained
    pub fn is_finished(&self) -> bool {
        !self.arrivals_open() && self.intersection.all_roads_empty()
    }

    fn generate_arrivals(&mut self) -> SimResult<Vec<Arrival>> {
        let mut arrivals = Vec::new();
        for road_index in 0..self.intersection.num_roads() {
            for direction in Direction::ALL {
                for lane in Lane::ALL {
                    if !self.arrivals.occurs() {
                        continue;
                    }
                    let vehicle = self.serials.issue(self.time_step)?;
                    self.intersection
                        .enqueue_vehicle(road_index, direction, lane, vehicle.clone())?;
                    self.stats.record_arrival();
                    arrivals.push(Arrival {
                        vehicle,
                        road_name: self.intersection.roads()[road_index].name().to_string(),
                        direction,
                        lane,
                    });
                }
            }
        }
        Ok(arrivals)
    }

    /// Run one time step: arrivals, then the light
    pub fn step(&mut self) -> SimResult<StepReport> {
        let arrivals_open = self.arrivals_open();
        let arrivals = if arrivals_open {
            self.generate_arrivals()?
        } else {
            Vec::new()
        };

        let release = self.intersection.step()?;
        let departures: Vec<Departure> = release
            .into_vehicles()
            .into_iter()
            .map(|vehicle| {
                let wait_time = vehicle.wait_time(self.time_step);
                self.stats.record_departure(wait_time);
                Departure { vehicle, wait_time }
            })
            .collect();

        let signal = if arrivals.is_empty() && departures.is_empty() {
            SignalLabel::RedLight
        } else {
            match self.intersection.active_light_phase() {
                LightValue::Green => SignalLabel::GreenLight,
                LightValue::LeftSignal | LightValue::Red => SignalLabel::LeftSignal,
            }
        };

        let report = StepReport {
            time_step: self.time_step,
            arrivals_open,
            arrivals,
            departures,
            active_road: self.intersection.active_road().name().to_string(),
            signal,
            timer: self.intersection.active_countdown() + 1,
        };
        debug!(
            "step {}: {} arrived, {} passed, {} waiting",
            report.time_step,
            report.arrivals.len(),
            report.departures.len(),
            self.intersection.waiting_count()
        );

        self.stats.elapsed_steps = self.time_step;
        self.time_step += 1;
        Ok(report)
    }

    /// Step until finished, handing every report to `on_step`
    pub fn run<F>(&mut self, mut on_step: F) -> SimResult<SimulationStats>
    where
        F: FnMut(&StepReport, &Intersection, &SimulationStats),
    {
        while !self.is_finished() {
            let report = self.step()?;
            on_step(&report, &self.intersection, &self.stats);
        }
        self.stats.log_summary();
        Ok(self.stats.clone())
    }
}
