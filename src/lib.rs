//! Intersection Simulation Library
//!
//! A time-division traffic light simulation for an intersection of up to four
//! two-way roads.

pub mod simulation;
