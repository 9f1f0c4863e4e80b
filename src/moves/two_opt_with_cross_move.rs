//! 2-Opt interleaved with periodic cross-route moves.

use crate::problem::Problem;
use crate::solution::Solution;

use super::{CrossRouteCustomerMove, MoveOperator, TwoOpt};

/// Number of calls per cross-route move, the cross move included.
pub const CROSS_MOVE_INTERVAL: usize = 5;

/// Uses 2-Opt by default and a cross-route customer move on every fifth call.
pub struct TwoOptWithCrossRouteCustomerMove {
    two_opt: TwoOpt,
    cross_route_move: CrossRouteCustomerMove,
    calls_since_cross_move: usize,
}

impl TwoOptWithCrossRouteCustomerMove {
    /// Create the composite with both sub-operators at their base seeds.
    pub fn new() -> Self {
        Self::with_seed(0)
    }

    /// Create the composite with both base seeds offset by `seed`.
    pub fn with_seed(seed: u64) -> Self {
        TwoOptWithCrossRouteCustomerMove {
            two_opt: TwoOpt::new(TwoOpt::SEED.wrapping_add(seed)),
            cross_route_move: CrossRouteCustomerMove::new(
                CrossRouteCustomerMove::SEED.wrapping_add(seed),
            ),
            calls_since_cross_move: 0,
        }
    }

    /// Calls made since the cross-route move last fired.
    pub fn calls_since_cross_move(&self) -> usize {
        self.calls_since_cross_move
    }
}

impl Default for TwoOptWithCrossRouteCustomerMove {
    fn default() -> Self {
        Self::new()
    }
}

impl MoveOperator for TwoOptWithCrossRouteCustomerMove {
    fn name(&self) -> &'static str {
        "two-opt-with-cross-move"
    }

    fn single_neighbor(&mut self, solution: &Solution, problem: &Problem) -> Solution {
        self.calls_since_cross_move += 1;
        if self.calls_since_cross_move >= CROSS_MOVE_INTERVAL {
            self.calls_since_cross_move = 0;
            return self.cross_route_move.single_neighbor(solution, problem);
        }
        self.two_opt.single_neighbor(solution, problem)
    }
}
