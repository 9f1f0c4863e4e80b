//! Solution representation for the CVRP.

use crate::evaluation::{self, Violation};
use crate::problem::{Problem, DEPOT};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A route is the sequence of visited nodes, bracketed by the depot.
pub type Route = Vec<usize>;

/// Represents a complete solution to a CVRP instance.
///
/// Solutions are values: neighbors are produced by cloning and editing the
/// clone, then calling [`Solution::evaluate`] so that the derived fields are
/// consistent with the routes again.
#[derive(Clone, PartialEq, Serialize, Deserialize)]
pub struct Solution {
    /// One route per vehicle, each starting and ending at the depot
    pub routes: Vec<Route>,
    /// The total traveled distance
    pub total_distance: f64,
    /// Coverage, route structure and capacity all hold
    pub is_feasible: bool,
}

impl Solution {
    /// Create a solution from routes and evaluate it.
    pub fn from_routes(routes: Vec<Route>, problem: &Problem) -> Self {
        let mut solution = Solution {
            routes,
            total_distance: 0.0,
            is_feasible: false,
        };
        solution.evaluate(problem);
        solution
    }

    /// Create a solution from per-vehicle customer assignments, adding the depot
    /// at both ends of every route.
    pub fn from_assignment(assignment: Vec<Vec<usize>>, problem: &Problem) -> Self {
        let routes = assignment
            .into_iter()
            .map(|customers| {
                let mut route = Vec::with_capacity(customers.len() + 2);
                route.push(DEPOT);
                route.extend(customers);
                route.push(DEPOT);
                route
            })
            .collect();
        Self::from_routes(routes, problem)
    }

    /// Recompute total distance and feasibility from the routes.
    ///
    /// Routes visiting nodes outside the instance get an infinite distance.
    pub fn evaluate(&mut self, problem: &Problem) {
        self.is_feasible = evaluation::is_feasible(&self.routes, problem);
        self.total_distance = if evaluation::visits_known_nodes(&self.routes, problem) {
            evaluation::compute_total_distance(&self.routes, problem)
        } else {
            f64::INFINITY
        };
    }

    /// Report the first violated feasibility condition, if any.
    pub fn violation(&self, problem: &Problem) -> Option<Violation> {
        evaluation::check_feasibility(&self.routes, problem).err()
    }

    /// Get the number of routes.
    pub fn get_route_count(&self) -> usize {
        self.routes.len()
    }

    /// Number of routes serving at least one customer.
    pub fn get_used_route_count(&self) -> usize {
        self.routes.iter().filter(|route| route.len() > 2).count()
    }

    /// Customers of a route, without the depot brackets.
    pub fn customers(&self, route_idx: usize) -> &[usize] {
        let route = &self.routes[route_idx];
        if route.len() < 2 {
            return &[];
        }
        &route[1..route.len() - 1]
    }

    /// All served customers in route order.
    pub fn customer_sequence(&self) -> Vec<usize> {
        (0..self.routes.len())
            .flat_map(|r_idx| self.customers(r_idx).iter().copied())
            .collect()
    }

    /// Get the cost of the solution considering only feasible solutions.
    pub fn get_feasible_cost(&self) -> f64 {
        if self.is_feasible {
            self.total_distance
        } else {
            f64::INFINITY
        }
    }
}

impl fmt::Debug for Solution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Solution:")?;
        writeln!(f, "  Distance: {:.2}", self.total_distance)?;
        writeln!(f, "  Feasible: {}", self.is_feasible)?;
        writeln!(f, "  Routes: {}", self.routes.len())?;

        for (i, route) in self.routes.iter().enumerate() {
            writeln!(f, "  Route {}: {:?}", i, route)?;
        }

        Ok(())
    }
}
