//! # LS-CVRP
//!
//! Threshold-accepting local search for the Capacitated Vehicle Routing
//! Problem (CVRP).
//!
//! Starting from a feasible assignment, the search repeatedly asks a roster of
//! randomized move operators for neighbors of the current solution, keeps the
//! best feasible one if it is not worse than the current solution by more than
//! a tolerance, and tracks the best solution seen. When the best solution
//! stagnates, the search returns to it, halves the tolerance and restarts the
//! operators. The search stops at a wall-clock deadline.

pub mod config;
pub mod construction;
pub mod error;
pub mod evaluation;
pub mod moves;
pub mod problem;
pub mod schedule;
pub mod solution;
pub mod utils;

use crate::config::Config;
use crate::construction::InitialSolver;
use crate::error::SearchError;
use crate::moves::{build_roster, MoveOperator};
use crate::problem::Problem;
use crate::schedule::ThresholdSchedule;
use crate::solution::Solution;
use crate::utils::{Clock, SearchStatistics, Stopwatch};

use log::{debug, info, warn};
use std::time::Duration;

/// Lifecycle of a search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchState {
    Initializing,
    Searching,
    Terminated,
}

/// The search controller: owns the incumbent, the current solution, the
/// acceptance schedule and the operator roster.
pub struct LocalSearch<C: Clock = Stopwatch> {
    pub problem: Problem,
    pub config: Config,
    pub state: SearchState,
    /// The working solution the operators explore from
    pub current: Option<Solution>,
    /// The best feasible solution found so far
    pub incumbent: Option<Solution>,
    pub schedule: ThresholdSchedule,
    /// Operators return neighborhoods instead of single neighbors
    pub multi_move: bool,
    pub operators: Vec<Box<dyn MoveOperator>>,
    /// Elapsed time at the last incumbent improvement or schedule reset
    pub last_improvement: Duration,
    pub statistics: SearchStatistics,
    clock: C,
}

impl LocalSearch<Stopwatch> {
    /// Create a new search for the given problem and configuration.
    pub fn new(problem: Problem, config: Config) -> Self {
        Self::with_clock(problem, config, Stopwatch::new())
    }
}

impl<C: Clock> LocalSearch<C> {
    /// Create a new search measuring time with the given clock.
    pub fn with_clock(problem: Problem, config: Config, clock: C) -> Self {
        let schedule = ThresholdSchedule::new(config.min_tolerance, config.min_tolerance);
        let operators = build_roster(&config.operators, config.seed);

        LocalSearch {
            problem,
            config,
            state: SearchState::Initializing,
            current: None,
            incumbent: None,
            schedule,
            multi_move: false,
            operators,
            last_improvement: Duration::ZERO,
            statistics: SearchStatistics::default(),
            clock,
        }
    }

    /// Obtain the initial solution and prepare the schedule.
    pub fn initialize<S: InitialSolver + ?Sized>(&mut self, solver: &S) -> Result<(), SearchError> {
        self.state = SearchState::Initializing;

        let Some(initial) = solver.solve_initial(&self.problem) else {
            warn!("problem is infeasible, search not started");
            self.state = SearchState::Terminated;
            return Err(self.infeasible());
        };

        if let Some(violation) = initial.violation(&self.problem) {
            warn!("initial solution rejected: {}", violation);
            self.state = SearchState::Terminated;
            return Err(SearchError::InvalidInitialSolution(violation));
        }

        self.schedule = ThresholdSchedule::from_initial_distance(
            initial.total_distance,
            self.config.max_tolerance_exponent,
            self.config.min_tolerance,
        );
        self.multi_move = false;
        self.operators = build_roster(&self.config.operators, self.config.seed);
        self.last_improvement = self.clock.elapsed();
        self.statistics = SearchStatistics {
            initial_distance: initial.total_distance,
            best_distance: initial.total_distance,
            final_tolerance: self.schedule.tolerance(),
            ..SearchStatistics::default()
        };

        info!(
            "initial solution: distance {:.2}, {} routes used, tolerance {}",
            initial.total_distance,
            initial.get_used_route_count(),
            self.schedule.tolerance()
        );

        self.current = Some(initial.clone());
        self.incumbent = Some(initial);
        self.state = SearchState::Searching;
        Ok(())
    }

    /// Run the search until the time limit and return the best solution.
    pub fn run<S: InitialSolver + ?Sized>(&mut self, solver: &S) -> Result<&Solution, SearchError> {
        self.clock.restart();
        self.initialize(solver)?;

        while self.clock.elapsed() < self.config.time_limit {
            self.iterate();
        }
        self.terminate();

        match self.incumbent.as_ref() {
            Some(solution) => Ok(solution),
            None => Err(self.infeasible()),
        }
    }

    /// Perform one search iteration.
    pub fn iterate(&mut self) {
        if self.state != SearchState::Searching {
            return;
        }
        self.statistics.iterations += 1;

        if !self.multi_move && self.schedule.tolerance() < self.config.multi_move_threshold {
            info!(
                "tolerance {} below {}, switching to multi-move neighborhoods",
                self.schedule.tolerance(),
                self.config.multi_move_threshold
            );
            self.multi_move = true;
        }

        let now = self.clock.elapsed();
        if now.saturating_sub(self.last_improvement) >= self.config.stagnation_window {
            self.reset_schedule(now);
        }

        let Some(current) = self.current.as_ref() else {
            return;
        };
        let current_distance = current.total_distance;
        let batch = self.multi_move.then_some(self.config.neighborhood_size);
        let candidates = generate_candidates(&mut self.operators, current, &self.problem, batch);

        match select_best(candidates) {
            None => {
                self.statistics.iterations_without_feasible_move += 1;
                debug!("couldn't move: no feasible neighbors, falling back to the best solution");
                self.current = self.incumbent.clone();
            }
            Some(candidate) => {
                if self.schedule.accepts(candidate.total_distance, current_distance) {
                    self.accept(candidate);
                }
            }
        }
    }

    /// Make the candidate current, and the incumbent if it improves on it.
    fn accept(&mut self, candidate: Solution) {
        self.statistics.accepted_moves += 1;

        let improves = self
            .incumbent
            .as_ref()
            .map_or(true, |best| candidate.total_distance < best.total_distance);
        if improves {
            debug!("new best solution: distance {:.2}", candidate.total_distance);
            self.statistics.incumbent_improvements += 1;
            self.statistics.best_distance = candidate.total_distance;
            self.last_improvement = self.clock.elapsed();
            self.incumbent = Some(candidate.clone());
        }

        self.current = Some(candidate);
    }

    /// Return to the incumbent, halve the tolerance and restart the operators.
    fn reset_schedule(&mut self, now: Duration) {
        self.current = self.incumbent.clone();
        self.last_improvement = now;
        let tolerance = self.schedule.cool();
        self.operators = build_roster(&self.config.operators, self.config.seed);
        self.statistics.schedule_resets += 1;

        info!(
            "no improvement for {:?}: back to best solution ({:.2}), tolerance {}",
            self.config.stagnation_window,
            self.statistics.best_distance,
            tolerance
        );
    }

    /// Stop the search and record the final statistics.
    fn terminate(&mut self) {
        self.state = SearchState::Terminated;
        self.statistics.runtime = self.clock.elapsed();
        self.statistics.final_tolerance = self.schedule.tolerance();

        info!(
            "search finished after {} iterations: best distance {:.2}",
            self.statistics.iterations, self.statistics.best_distance
        );
    }

    /// The best solution found so far.
    pub fn best_solution(&self) -> Option<&Solution> {
        self.incumbent.as_ref()
    }

    fn infeasible(&self) -> SearchError {
        SearchError::InstanceInfeasible {
            total_demand: self.problem.total_demand(),
            fleet_capacity: self.problem.fleet_capacity(),
        }
    }
}

/// Ask every operator for one neighbor, or for `batch` neighbors, and pool them.
pub fn generate_candidates(
    operators: &mut [Box<dyn MoveOperator>],
    current: &Solution,
    problem: &Problem,
    batch: Option<usize>,
) -> Vec<Solution> {
    let mut candidates = Vec::new();
    for operator in operators.iter_mut() {
        match batch {
            Some(count) => candidates.extend(operator.neighborhood(current, problem, count)),
            None => candidates.push(operator.single_neighbor(current, problem)),
        }
    }
    candidates
}

/// The feasible candidate with the smallest distance; the first one wins ties.
pub fn select_best(candidates: Vec<Solution>) -> Option<Solution> {
    let mut best: Option<Solution> = None;
    for candidate in candidates.into_iter().filter(|c| c.is_feasible) {
        match &best {
            Some(b) if b.total_distance <= candidate.total_distance => {}
            _ => best = Some(candidate),
        }
    }
    best
}
