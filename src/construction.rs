//! Construction of an initial feasible solution.
//!
//! The search only needs some assignment that serves every customer once and
//! respects the capacities; any [`InitialSolver`] can provide it.

use crate::problem::{Problem, DEPOT};
use crate::solution::Solution;
use log::{debug, warn};
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

const CAPACITY_EPSILON: f64 = 1e-9;

/// Supplies the initial feasible solution, or `None` if the instance is infeasible.
pub trait InitialSolver {
    fn solve_initial(&self, problem: &Problem) -> Option<Solution>;
}

impl<F> InitialSolver for F
where
    F: Fn(&Problem) -> Option<Solution>,
{
    fn solve_initial(&self, problem: &Problem) -> Option<Solution> {
        self(problem)
    }
}

/// Capacity-aware greedy assignment.
///
/// Tries best-fit decreasing first, then a number of seeded random orders
/// with first-fit. Customers of each vehicle are sequenced nearest-neighbour
/// from the depot.
#[derive(Debug, Clone)]
pub struct GreedyConstruction {
    /// Randomized first-fit attempts after best-fit decreasing fails
    pub attempts: usize,
    pub seed: u64,
}

impl Default for GreedyConstruction {
    fn default() -> Self {
        GreedyConstruction {
            attempts: 200,
            seed: 0,
        }
    }
}

impl GreedyConstruction {
    pub fn new(attempts: usize, seed: u64) -> Self {
        GreedyConstruction { attempts, seed }
    }

    /// Assign customers in the given order. With `best_fit`, each customer goes
    /// to the fitting vehicle with the least spare capacity, otherwise to the
    /// first fitting vehicle.
    fn assign(order: &[usize], problem: &Problem, best_fit: bool) -> Option<Vec<Vec<usize>>> {
        let capacity = problem.vehicle_capacity + CAPACITY_EPSILON;
        let mut loads = vec![0.0; problem.num_vehicles];
        let mut assignment = vec![Vec::new(); problem.num_vehicles];

        for &customer in order {
            let demand = problem.demand(customer);
            let fitting = (0..problem.num_vehicles).filter(|&v| loads[v] + demand <= capacity);

            let vehicle = if best_fit {
                fitting.min_by(|&a, &b| loads[b].total_cmp(&loads[a]))
            } else {
                fitting.min()
            }?;

            loads[vehicle] += demand;
            assignment[vehicle].push(customer);
        }

        Some(assignment)
    }

    /// Sequence a vehicle's customers nearest-neighbour, starting at the depot.
    fn sequence(mut customers: Vec<usize>, problem: &Problem) -> Vec<usize> {
        let mut ordered = Vec::with_capacity(customers.len());
        let mut last = DEPOT;

        while let Some(idx) = customers
            .iter()
            .enumerate()
            .min_by(|a, b| {
                problem
                    .get_distance(last, *a.1)
                    .total_cmp(&problem.get_distance(last, *b.1))
            })
            .map(|(idx, _)| idx)
        {
            last = customers.swap_remove(idx);
            ordered.push(last);
        }

        ordered
    }

    fn build(assignment: Vec<Vec<usize>>, problem: &Problem) -> Option<Solution> {
        let assignment = assignment
            .into_iter()
            .map(|customers| Self::sequence(customers, problem))
            .collect();
        let solution = Solution::from_assignment(assignment, problem);
        solution.is_feasible.then_some(solution)
    }
}

impl InitialSolver for GreedyConstruction {
    fn solve_initial(&self, problem: &Problem) -> Option<Solution> {
        let capacity = problem.vehicle_capacity + CAPACITY_EPSILON;

        if let Some(node) = problem.nodes.iter().skip(1).find(|n| n.demand > capacity) {
            warn!(
                "customer {} demands {:.2}, above the vehicle capacity {:.2}",
                node.id, node.demand, problem.vehicle_capacity
            );
            return None;
        }
        if problem.total_demand() > problem.fleet_capacity() + CAPACITY_EPSILON {
            warn!(
                "total demand {:.2} exceeds the fleet capacity {:.2}",
                problem.total_demand(),
                problem.fleet_capacity()
            );
            return None;
        }

        let mut order: Vec<usize> = (1..problem.nodes.len()).collect();
        order.sort_by(|&a, &b| problem.demand(b).total_cmp(&problem.demand(a)));

        if let Some(assignment) = Self::assign(&order, problem, true) {
            debug!("initial assignment found with best-fit decreasing");
            return Self::build(assignment, problem);
        }

        let mut rng = ChaCha8Rng::seed_from_u64(self.seed);
        for attempt in 0..self.attempts {
            order.shuffle(&mut rng);
            if let Some(assignment) = Self::assign(&order, problem, false) {
                debug!("initial assignment found after {} random orders", attempt + 1);
                return Self::build(assignment, problem);
            }
        }

        warn!(
            "no initial assignment found after {} attempts",
            self.attempts + 1
        );
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::problem::Node;

    #[test]
    fn sequence_visits_nearest_first() {
        let nodes = vec![
            Node::new(0, 0.0, 0.0, 0.0),
            Node::new(1, 5.0, 0.0, 1.0),
            Node::new(2, 1.0, 0.0, 1.0),
            Node::new(3, 3.0, 0.0, 1.0),
        ];
        let problem = Problem::new("seq".to_string(), nodes, 1, 10.0);

        assert_eq!(
            GreedyConstruction::sequence(vec![1, 2, 3], &problem),
            vec![2, 3, 1]
        );
    }

    #[test]
    fn best_fit_fills_tightest_vehicle() {
        let nodes = vec![
            Node::new(0, 0.0, 0.0, 0.0),
            Node::new(1, 1.0, 0.0, 6.0),
            Node::new(2, 2.0, 0.0, 4.0),
            Node::new(3, 3.0, 0.0, 3.0),
        ];
        let problem = Problem::new("fit".to_string(), nodes, 2, 10.0);

        let assignment = GreedyConstruction::assign(&[1, 2, 3], &problem, true).unwrap();
        assert_eq!(assignment[0], vec![1, 2]);
        assert_eq!(assignment[1], vec![3]);
    }
}
