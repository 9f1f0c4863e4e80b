//! Neighborhood operators for the local search.
//!
//! Each operator owns a private, deterministically seeded random stream, so a
//! roster rebuilt from the same kinds and seed replays the same moves.

pub mod cross_route_exchange;
pub mod cross_route_move;
pub mod random_customer_movement;
pub mod two_opt;
pub mod two_opt_with_cross_move;
pub mod utils;

use crate::problem::Problem;
use crate::solution::Solution;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

pub use self::cross_route_exchange::CrossRouteCustomerExchange;
pub use self::cross_route_move::CrossRouteCustomerMove;
pub use self::random_customer_movement::RandomCustomerMovement;
pub use self::two_opt::TwoOpt;
pub use self::two_opt_with_cross_move::TwoOptWithCrossRouteCustomerMove;

/// A strategy that generates candidate neighbors of a solution.
///
/// Candidates are fresh copies and may be infeasible; the caller filters them.
/// An operator that cannot perform its move returns an unchanged copy.
pub trait MoveOperator {
    /// Short name used in logs.
    fn name(&self) -> &'static str;

    /// Produce exactly one candidate neighbor.
    fn single_neighbor(&mut self, solution: &Solution, problem: &Problem) -> Solution;

    /// Produce a batch of candidates, by default `count` independent single neighbors.
    fn neighborhood(
        &mut self,
        solution: &Solution,
        problem: &Problem,
        count: usize,
    ) -> Vec<Solution> {
        (0..count)
            .map(|_| self.single_neighbor(solution, problem))
            .collect()
    }
}

/// The available operators, used to (re)build a roster from configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum OperatorKind {
    TwoOpt,
    CrossRouteCustomerMove,
    RandomCustomerMovement,
    CrossRouteCustomerExchange,
    TwoOptWithCrossRouteCustomerMove,
}

impl OperatorKind {
    /// The roster used when nothing else is configured.
    pub fn default_roster() -> Vec<OperatorKind> {
        vec![
            OperatorKind::TwoOpt,
            OperatorKind::CrossRouteCustomerMove,
            OperatorKind::RandomCustomerMovement,
            OperatorKind::CrossRouteCustomerExchange,
        ]
    }

    /// Instantiate a fresh operator. `seed` offsets the operator's base seed.
    pub fn build(self, seed: u64) -> Box<dyn MoveOperator> {
        match self {
            OperatorKind::TwoOpt => Box::new(TwoOpt::new(TwoOpt::SEED.wrapping_add(seed))),
            OperatorKind::CrossRouteCustomerMove => Box::new(CrossRouteCustomerMove::new(
                CrossRouteCustomerMove::SEED.wrapping_add(seed),
            )),
            OperatorKind::RandomCustomerMovement => Box::new(RandomCustomerMovement::new(
                RandomCustomerMovement::SEED.wrapping_add(seed),
            )),
            OperatorKind::CrossRouteCustomerExchange => Box::new(CrossRouteCustomerExchange::new(
                CrossRouteCustomerExchange::SEED.wrapping_add(seed),
            )),
            OperatorKind::TwoOptWithCrossRouteCustomerMove => {
                Box::new(TwoOptWithCrossRouteCustomerMove::with_seed(seed))
            }
        }
    }
}

/// Build a fresh roster in the given order.
pub fn build_roster(kinds: &[OperatorKind], seed: u64) -> Vec<Box<dyn MoveOperator>> {
    kinds.iter().map(|kind| kind.build(seed)).collect()
}
