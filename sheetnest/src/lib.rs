//! `sheetnest` is a nesting engine for irregular 2D parts on fixed-size
//! rectangular sheets.
//!
//! The engine discretizes a sheet into an occupancy grid, rasterizes part
//! outlines onto it and searches for collision-free placements. Besides the
//! reference grid-scan packer, alternative strategies (greedy no-fit-polygon
//! nesting, simulated annealing, a genetic algorithm) are available behind a
//! common [`Strategy`](opt::Strategy) interface, and a production scheduler
//! distributes per-part copy counts across a fixed number of sheets.
//!
//! All strategies validate candidate placements against the same occupancy
//! grid, so every result honors the same collision and bounds guarantees.

pub mod collision;
pub mod config;
pub mod entities;
pub mod geometry;
pub mod io;
pub mod opt;
pub mod sched;
pub mod util;
