//! Reinsertion of a random customer anywhere in its route or into another route.

use crate::problem::Problem;
use crate::solution::Solution;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use super::utils::{pick_customer, relocate};
use super::MoveOperator;

/// Picks a random customer and moves it to a new place.
///
/// The neighborhood of the picked customer is every other position within its
/// own route plus the customer moved to every other route (at its current
/// position index).
pub struct RandomCustomerMovement {
    rng: ChaCha8Rng,
}

impl RandomCustomerMovement {
    pub const SEED: u64 = 450;

    /// Create a new operator with its own random stream.
    pub fn new(seed: u64) -> Self {
        RandomCustomerMovement {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// All `(route, position)` targets for the customer at `pos` of route `from`.
    ///
    /// Same-route positions refer to the route after the customer is removed.
    pub fn targets(solution: &Solution, from: usize, pos: usize) -> Vec<(usize, usize)> {
        let origin_len = solution.routes[from].len();
        let mut targets: Vec<(usize, usize)> = (1..origin_len - 1)
            .filter(|&q| q != pos)
            .map(|q| (from, q))
            .collect();

        targets.extend(
            (0..solution.routes.len())
                .filter(|&to| to != from)
                .map(|to| (to, pos)),
        );
        targets
    }

    fn apply(
        solution: &Solution,
        problem: &Problem,
        from: usize,
        pos: usize,
        (to, to_pos): (usize, usize),
    ) -> Solution {
        let mut neighbor = solution.clone();
        relocate(&mut neighbor.routes, from, pos, to, to_pos);
        neighbor.evaluate(problem);
        neighbor
    }

    /// Pick a customer and enumerate every reinsertion of it.
    pub fn full_neighborhood(&mut self, solution: &Solution, problem: &Problem) -> Vec<Solution> {
        let Some((from, pos)) = pick_customer(&mut self.rng, solution) else {
            return vec![solution.clone()];
        };

        let targets = Self::targets(solution, from, pos);
        if targets.is_empty() {
            return vec![solution.clone()];
        }
        targets
            .into_iter()
            .map(|target| Self::apply(solution, problem, from, pos, target))
            .collect()
    }
}

impl Default for RandomCustomerMovement {
    fn default() -> Self {
        RandomCustomerMovement::new(Self::SEED)
    }
}

impl MoveOperator for RandomCustomerMovement {
    fn name(&self) -> &'static str {
        "random-customer-movement"
    }

    fn single_neighbor(&mut self, solution: &Solution, problem: &Problem) -> Solution {
        let Some((from, pos)) = pick_customer(&mut self.rng, solution) else {
            return solution.clone();
        };

        let targets = Self::targets(solution, from, pos);
        match targets.choose(&mut self.rng) {
            Some(&target) => Self::apply(solution, problem, from, pos, target),
            None => solution.clone(),
        }
    }
}
