//! Moves a random customer into another route at the same position.

use crate::problem::Problem;
use crate::solution::Solution;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use super::utils::{pick_customer, pick_other_route, relocate};
use super::MoveOperator;

/// Relocates one random customer into other routes, keeping its position index.
///
/// The full neighborhood of a picked customer is the customer moved to every
/// other route, one candidate per destination.
pub struct CrossRouteCustomerMove {
    rng: ChaCha8Rng,
}

impl CrossRouteCustomerMove {
    pub const SEED: u64 = 350;

    /// Create a new operator with its own random stream.
    pub fn new(seed: u64) -> Self {
        CrossRouteCustomerMove {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Move the customer at `pos` of route `from` into route `to` at the same
    /// position index, bounded by the destination's length.
    pub fn move_customer(
        solution: &Solution,
        problem: &Problem,
        from: usize,
        pos: usize,
        to: usize,
    ) -> Solution {
        let mut neighbor = solution.clone();
        relocate(&mut neighbor.routes, from, pos, to, pos);
        neighbor.evaluate(problem);
        neighbor
    }

    /// Pick a customer and move it to every other route.
    pub fn full_neighborhood(&mut self, solution: &Solution, problem: &Problem) -> Vec<Solution> {
        if solution.routes.len() < 2 {
            return vec![solution.clone()];
        }
        let Some((from, pos)) = pick_customer(&mut self.rng, solution) else {
            return vec![solution.clone()];
        };

        (0..solution.routes.len())
            .filter(|&to| to != from)
            .map(|to| Self::move_customer(solution, problem, from, pos, to))
            .collect()
    }
}

impl Default for CrossRouteCustomerMove {
    fn default() -> Self {
        CrossRouteCustomerMove::new(Self::SEED)
    }
}

impl MoveOperator for CrossRouteCustomerMove {
    fn name(&self) -> &'static str {
        "cross-route-move"
    }

    fn single_neighbor(&mut self, solution: &Solution, problem: &Problem) -> Solution {
        if solution.routes.len() < 2 {
            return solution.clone();
        }
        let Some((from, pos)) = pick_customer(&mut self.rng, solution) else {
            return solution.clone();
        };

        let to = pick_other_route(&mut self.rng, solution.routes.len(), from);
        Self::move_customer(solution, problem, from, pos, to)
    }

    /// One picked customer per call; `count` is not used.
    fn neighborhood(
        &mut self,
        solution: &Solution,
        problem: &Problem,
        _count: usize,
    ) -> Vec<Solution> {
        self.full_neighborhood(solution, problem)
    }
}
