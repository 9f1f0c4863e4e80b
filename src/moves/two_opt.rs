//! 2-Opt neighborhood (intra-route).

use crate::problem::Problem;
use crate::solution::{Route, Solution};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use super::utils::pick_customer_position;
use super::MoveOperator;

/// Reverses a random segment of one random route.
///
/// For `0 -> 5 -> 1 -> 2 -> 3 -> 4 -> 6 -> 0`, picking the positions of `2`
/// and `3` gives `0 -> 5 -> 1 -> 3 -> 2 -> 4 -> 6 -> 0`.
pub struct TwoOpt {
    rng: ChaCha8Rng,
}

impl TwoOpt {
    pub const SEED: u64 = 550;

    /// Create a new operator with its own random stream.
    pub fn new(seed: u64) -> Self {
        TwoOpt {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Reverse the route between positions `i` and `j`, both inclusive.
    pub fn reverse_segment(route: &mut Route, i: usize, j: usize) {
        let (start, end) = if i <= j { (i, j) } else { (j, i) };
        route[start..=end].reverse();
    }
}

impl Default for TwoOpt {
    fn default() -> Self {
        TwoOpt::new(Self::SEED)
    }
}

impl MoveOperator for TwoOpt {
    fn name(&self) -> &'static str {
        "two-opt"
    }

    fn single_neighbor(&mut self, solution: &Solution, problem: &Problem) -> Solution {
        let mut neighbor = solution.clone();
        if neighbor.routes.is_empty() {
            return neighbor;
        }

        let r_idx = self.rng.gen_range(0..neighbor.routes.len());
        let route = &mut neighbor.routes[r_idx];

        // Need at least 2 customers
        if route.len() < 4 {
            return neighbor;
        }

        let mut i = pick_customer_position(&mut self.rng, route);
        let mut j = i;
        while i == j {
            i = pick_customer_position(&mut self.rng, route);
            j = pick_customer_position(&mut self.rng, route);
        }

        Self::reverse_segment(route, i, j);
        neighbor.evaluate(problem);
        neighbor
    }
}
