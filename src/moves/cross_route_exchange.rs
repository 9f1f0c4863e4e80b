//! Exchange of two customers served by different routes.

use crate::problem::Problem;
use crate::solution::Solution;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use super::utils::pick_customer;
use super::MoveOperator;

/// Attempts to find two customers in different routes before giving up.
const NUM_TRIES: usize = 5;

/// Swaps the positions of two random customers from different routes.
///
/// A neighborhood request composes `routes / 2` such swaps into one candidate.
pub struct CrossRouteCustomerExchange {
    rng: ChaCha8Rng,
}

impl CrossRouteCustomerExchange {
    pub const SEED: u64 = 250;

    /// Create a new operator with its own random stream.
    pub fn new(seed: u64) -> Self {
        CrossRouteCustomerExchange {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Swap one pair of customers in place. Returns false when no pair from
    /// different routes was found.
    fn swap_once(&mut self, solution: &mut Solution) -> bool {
        for _ in 0..NUM_TRIES {
            let (Some((r1, p1)), Some((r2, p2))) = (
                pick_customer(&mut self.rng, solution),
                pick_customer(&mut self.rng, solution),
            ) else {
                return false;
            };

            if r1 == r2 {
                continue;
            }

            let first = solution.routes[r1][p1];
            solution.routes[r1][p1] = solution.routes[r2][p2];
            solution.routes[r2][p2] = first;
            return true;
        }
        false
    }

    /// Apply `swaps` exchanges to one copy of the solution.
    pub fn compose_swaps(&mut self, solution: &Solution, problem: &Problem, swaps: usize) -> Solution {
        let mut neighbor = solution.clone();
        let mut changed = false;
        for _ in 0..swaps {
            changed |= self.swap_once(&mut neighbor);
        }
        if changed {
            neighbor.evaluate(problem);
        }
        neighbor
    }
}

impl Default for CrossRouteCustomerExchange {
    fn default() -> Self {
        CrossRouteCustomerExchange::new(Self::SEED)
    }
}

impl MoveOperator for CrossRouteCustomerExchange {
    fn name(&self) -> &'static str {
        "cross-route-exchange"
    }

    fn single_neighbor(&mut self, solution: &Solution, problem: &Problem) -> Solution {
        self.compose_swaps(solution, problem, 1)
    }

    /// One candidate built from several sequential swaps; `count` is not used.
    fn neighborhood(
        &mut self,
        solution: &Solution,
        problem: &Problem,
        _count: usize,
    ) -> Vec<Solution> {
        let swaps = (solution.routes.len() / 2).max(1);
        vec![self.compose_swaps(solution, problem, swaps)]
    }
}
