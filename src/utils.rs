//! Utility functions and structures for the local search.

use std::fs::File;
use std::io::Write;
use std::path::Path;
use std::time::{Duration, Instant};

use itertools::Itertools;
use serde::Serialize;

use crate::evaluation::{route_distance, route_load};
use crate::problem::Problem;
use crate::solution::Solution;

/// Source of elapsed time for deadline and stagnation checks.
pub trait Clock {
    /// Start measuring from now.
    fn restart(&mut self);
    /// Time since the last restart.
    fn elapsed(&self) -> Duration;
}

/// Monotonic wall clock.
#[derive(Debug, Clone, Copy)]
pub struct Stopwatch {
    start: Instant,
}

impl Stopwatch {
    pub fn new() -> Self {
        Stopwatch {
            start: Instant::now(),
        }
    }
}

impl Default for Stopwatch {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for Stopwatch {
    fn restart(&mut self) {
        self.start = Instant::now();
    }

    fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }
}

/// Format a duration as hours, minutes, and seconds.
pub fn format_duration(duration: Duration) -> String {
    let total_seconds = duration.as_secs();
    let hours = total_seconds / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let seconds = total_seconds % 60;

    format!("{}h {:02}m {:02}s", hours, minutes, seconds)
}

/// All routes flattened into one line, e.g. `0 1 2 0 0 3 0`.
pub fn solution_line(solution: &Solution) -> String {
    solution.routes.iter().flatten().join(" ")
}

/// Save a solution to a file.
pub fn save_solution<P: AsRef<Path>>(
    solution: &Solution,
    problem: &Problem,
    path: P,
) -> std::io::Result<()> {
    let mut file = File::create(path)?;

    writeln!(file, "CVRP Solution for instance: {}", problem.name)?;
    writeln!(file, "Total Distance: {:.2}", solution.total_distance)?;
    writeln!(file, "Is Feasible: {}", solution.is_feasible)?;
    writeln!(file, "Number of Routes: {}", solution.routes.len())?;
    writeln!(file)?;

    for (i, route) in solution.routes.iter().enumerate() {
        write!(file, "Route #{}: ", i + 1)?;

        if route.len() <= 2 {
            writeln!(file, "Empty")?;
            continue;
        }

        writeln!(file, "{}", route.iter().join(" -> "))?;
        writeln!(file, "  Distance: {:.2}", route_distance(route, problem))?;
        writeln!(
            file,
            "  Load: {:.2} / {:.2}",
            route_load(route, problem),
            problem.vehicle_capacity
        )?;
        writeln!(file)?;
    }

    Ok(())
}

/// Counters collected during a search.
#[derive(Debug, Clone, Default, Serialize)]
pub struct SearchStatistics {
    pub iterations: u64,
    pub accepted_moves: u64,
    pub incumbent_improvements: u64,
    pub schedule_resets: u64,
    pub iterations_without_feasible_move: u64,
    pub initial_distance: f64,
    pub best_distance: f64,
    pub final_tolerance: f64,
    pub runtime: Duration,
}

impl SearchStatistics {
    /// Format the statistics as a string.
    pub fn format(&self) -> String {
        format!(
            "Search Statistics:
- Iterations: {}
- Runtime: {}
- Accepted Moves: {}
- Incumbent Improvements: {}
- Schedule Resets: {}
- Iterations Without Feasible Move: {}
- Initial Distance: {:.2}
- Best Distance: {:.2}
- Final Tolerance: {:.2}",
            self.iterations,
            format_duration(self.runtime),
            self.accepted_moves,
            self.incumbent_improvements,
            self.schedule_resets,
            self.iterations_without_feasible_move,
            self.initial_distance,
            self.best_distance,
            self.final_tolerance
        )
    }
}
