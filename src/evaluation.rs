//! Feasibility and cost evaluation of route sets.
//!
//! Every function here is pure: it reads the routes and the problem and
//! never caches anything, so callers recompute after each structural change.

use crate::problem::{Problem, DEPOT};
use std::fmt;

/// The first feasibility condition a set of routes violates.
#[derive(Debug, Clone, PartialEq)]
pub enum Violation {
    /// More routes than vehicles in the fleet.
    RouteCount { expected: usize, found: usize },
    /// The route has fewer than two entries or is not bracketed by the depot.
    MalformedRoute { route: usize },
    /// A customer occurs twice within the same route.
    RepeatedCustomer { route: usize, customer: usize },
    /// The route refers to a node that does not exist.
    UnknownCustomer { route: usize, customer: usize },
    /// A customer is served by more than one route.
    DuplicateCustomer { customer: usize },
    /// A customer is not served at all.
    MissingCustomer { customer: usize },
    /// The demand on the route exceeds the vehicle capacity.
    CapacityExceeded { route: usize, load: f64 },
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Violation::RouteCount { expected, found } => {
                write!(f, "{found} routes for a fleet of {expected} vehicles")
            }
            Violation::MalformedRoute { route } => {
                write!(f, "route {route} is not bracketed by the depot")
            }
            Violation::RepeatedCustomer { route, customer } => {
                write!(f, "customer {customer} repeated in route {route}")
            }
            Violation::UnknownCustomer { route, customer } => {
                write!(f, "route {route} visits unknown node {customer}")
            }
            Violation::DuplicateCustomer { customer } => {
                write!(f, "customer {customer} is served by several routes")
            }
            Violation::MissingCustomer { customer } => {
                write!(f, "customer {customer} is not served")
            }
            Violation::CapacityExceeded { route, load } => {
                write!(f, "route {route} carries {load:.2} above capacity")
            }
        }
    }
}

/// Distance of a single depot-bracketed route.
pub fn route_distance(route: &[usize], problem: &Problem) -> f64 {
    route
        .windows(2)
        .map(|pair| problem.get_distance(pair[0], pair[1]))
        .sum()
}

/// Total demand served by a route. Depot entries contribute nothing.
pub fn route_load(route: &[usize], problem: &Problem) -> f64 {
    route
        .iter()
        .filter(|&&node| node != DEPOT)
        .map(|&node| problem.demand(node))
        .sum()
}

/// Sum of the route distances.
pub fn compute_total_distance(routes: &[Vec<usize>], problem: &Problem) -> f64 {
    routes
        .iter()
        .map(|route| route_distance(route, problem))
        .sum()
}

/// Check whether every node of every route belongs to the instance.
pub fn visits_known_nodes(routes: &[Vec<usize>], problem: &Problem) -> bool {
    let node_count = problem.nodes.len();
    routes.iter().flatten().all(|&node| node < node_count)
}

/// Check whether a route starts and ends at the depot and has at least two entries.
pub fn is_bracketed(route: &[usize]) -> bool {
    route.len() >= 2 && route[0] == DEPOT && route[route.len() - 1] == DEPOT
}

/// Check all feasibility conditions and report the first one violated.
pub fn check_feasibility(routes: &[Vec<usize>], problem: &Problem) -> Result<(), Violation> {
    let node_count = problem.nodes.len();
    if routes.len() > problem.num_vehicles {
        return Err(Violation::RouteCount {
            expected: problem.num_vehicles,
            found: routes.len(),
        });
    }

    let mut served_by: Vec<Option<usize>> = vec![None; node_count];

    for (r_idx, route) in routes.iter().enumerate() {
        if !is_bracketed(route) {
            return Err(Violation::MalformedRoute { route: r_idx });
        }

        for &customer in &route[1..route.len() - 1] {
            if customer == DEPOT {
                return Err(Violation::MalformedRoute { route: r_idx });
            }
            if customer >= node_count {
                return Err(Violation::UnknownCustomer {
                    route: r_idx,
                    customer,
                });
            }
            match served_by[customer] {
                Some(other) if other == r_idx => {
                    return Err(Violation::RepeatedCustomer {
                        route: r_idx,
                        customer,
                    });
                }
                Some(_) => return Err(Violation::DuplicateCustomer { customer }),
                None => served_by[customer] = Some(r_idx),
            }
        }

        let load = route_load(route, problem);
        if load > problem.vehicle_capacity + 1e-9 {
            return Err(Violation::CapacityExceeded { route: r_idx, load });
        }
    }

    if let Some(customer) = (1..node_count).find(|&c| served_by[c].is_none()) {
        return Err(Violation::MissingCustomer { customer });
    }

    Ok(())
}

/// Check whether the routes form a feasible solution.
pub fn is_feasible(routes: &[Vec<usize>], problem: &Problem) -> bool {
    check_feasibility(routes, problem).is_ok()
}
