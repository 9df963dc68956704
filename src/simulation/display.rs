//! Terminal rendering of roads, step reports and statistics

use std::fmt;

use super::intersection::Intersection;
use super::simulator::StepReport;
use super::stats::SimulationStats;
use super::two_way_road::TwoWayRoad;
use super::types::{Direction, Lane, LightValue};

const LANE_WIDTH: usize = 30;
const MEDIAN_WIDTH: usize = 14;

fn lane_tag(lane: Lane) -> &'static str {
    match lane {
        Lane::Left => " [L] ",
        Lane::Middle => " [M] ",
        Lane::Right => " [R] ",
    }
}

/// `x` when the lane is stopped under `light`
fn stop_marker(light: LightValue, lane: Lane) -> char {
    let stopped = match light {
        LightValue::Green => lane == Lane::Left,
        LightValue::LeftSignal => lane != Lane::Left,
        LightValue::Red => true,
    };
    if stopped {
        'x'
    } else {
        ' '
    }
}

fn edge(f: &mut fmt::Formatter<'_>, fill: &str) -> fmt::Result {
    writeln!(
        f,
        "{}{}{}",
        fill.repeat(LANE_WIDTH),
        " ".repeat(MEDIAN_WIDTH),
        fill.repeat(LANE_WIDTH + 1)
    )
}

/// Forward lanes run right to left with the front at the median; backward
/// lanes mirror them on the other side.
impl fmt::Display for TwoWayRoad {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}FORWARD{}BACKWARD", " ".repeat(23), " ".repeat(15))?;
        edge(f, "=")?;

        let light = self.light_value();
        for (row, forward_lane) in Lane::ALL.into_iter().enumerate() {
            let backward_lane = Lane::ALL[Lane::ALL.len() - 1 - row];

            let forward: String = self
                .lane(Direction::Forward, forward_lane)
                .iter()
                .rev()
                .map(ToString::to_string)
                .collect();
            let backward: String = self
                .lane(Direction::Backward, backward_lane)
                .iter()
                .map(ToString::to_string)
                .collect();

            writeln!(
                f,
                "{:>width$}{}{}   {}{}{:<width$}",
                forward,
                lane_tag(forward_lane),
                stop_marker(light, forward_lane),
                stop_marker(light, backward_lane),
                lane_tag(backward_lane),
                backward,
                width = LANE_WIDTH
            )?;
            if row + 1 < Lane::ALL.len() {
                edge(f, "-")?;
            }
        }
        edge(f, "=")
    }
}

impl fmt::Display for Intersection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for road in self.roads() {
            writeln!(f, "{}:", road.name())?;
            writeln!(f, "{road}")?;
        }
        Ok(())
    }
}

impl fmt::Display for StepReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}\n", "#".repeat(80))?;
        writeln!(f, "Time step: {}\n", self.time_step)?;
        writeln!(f, "{} for {}.", self.signal.as_str(), self.active_road)?;
        writeln!(f, "Timer = {}\n", self.timer)?;

        if !self.arrivals_open {
            writeln!(f, "Cars no longer arriving.\n")?;
        }
        writeln!(f, "ARRIVING CARS:")?;
        for arrival in &self.arrivals {
            writeln!(
                f,
                "    Car{} entered {}, going {} in {} lane.",
                arrival.vehicle,
                arrival.road_name,
                arrival.direction.label(),
                arrival.lane.label()
            )?;
        }
        writeln!(f)?;

        writeln!(f, "PASSING CARS:")?;
        for departure in &self.departures {
            writeln!(
                f,
                "    Car{} passes through. Wait time of {}.",
                departure.vehicle, departure.wait_time
            )?;
        }
        Ok(())
    }
}

impl fmt::Display for SimulationStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "STATISTICS:")?;
        writeln!(f, "    {:<25}{} cars", "Cars currently waiting:", self.vehicles_waiting)?;
        writeln!(f, "    {:<25}{} cars", "Total cars passed:", self.total_vehicles_passed)?;
        writeln!(f, "    {:<25}{} turns", "Total wait time:", self.total_wait_time)?;
        writeln!(
            f,
            "    {:<25}{:.2} turns",
            "Average wait time:",
            self.average_wait_time()
        )
    }
}
