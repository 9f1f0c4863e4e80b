//! Errors that end a search before it starts.

use crate::evaluation::Violation;
use std::error::Error;
use std::fmt;

/// Failure surfaced by the search controller.
#[derive(Debug, Clone, PartialEq)]
pub enum SearchError {
    /// No assignment serves every customer within the vehicle capacities.
    InstanceInfeasible {
        total_demand: f64,
        fleet_capacity: f64,
    },
    /// The initial solution supplied to the search breaks a feasibility condition.
    InvalidInitialSolution(Violation),
}

impl fmt::Display for SearchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SearchError::InstanceInfeasible {
                total_demand,
                fleet_capacity,
            } => write!(
                f,
                "problem is infeasible: no initial assignment found (total demand {:.2}, fleet capacity {:.2})",
                total_demand, fleet_capacity
            ),
            SearchError::InvalidInitialSolution(violation) => {
                write!(f, "initial solution is not feasible: {}", violation)
            }
        }
    }
}

impl Error for SearchError {}
