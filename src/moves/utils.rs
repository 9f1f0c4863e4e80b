//! Utility functions shared by the move operators.

use crate::solution::{Route, Solution};
use rand::seq::SliceRandom;
use rand::Rng;

/// Pick a route serving at least one customer, uniformly among such routes.
pub fn pick_route_with_customers<R: Rng>(rng: &mut R, solution: &Solution) -> Option<usize> {
    let candidates: Vec<usize> = solution
        .routes
        .iter()
        .enumerate()
        .filter(|(_, route)| route.len() > 2)
        .map(|(idx, _)| idx)
        .collect();

    candidates.choose(rng).copied()
}

/// Pick an interior position of a route, never one of the depot ends.
///
/// The route must serve at least one customer.
pub fn pick_customer_position<R: Rng>(rng: &mut R, route: &Route) -> usize {
    1 + rng.gen_range(0..route.len() - 2)
}

/// Pick a random customer: its route and its position within that route.
pub fn pick_customer<R: Rng>(rng: &mut R, solution: &Solution) -> Option<(usize, usize)> {
    let route_idx = pick_route_with_customers(rng, solution)?;
    let pos = pick_customer_position(rng, &solution.routes[route_idx]);
    Some((route_idx, pos))
}

/// Pick a route index different from `excluded`, uniformly.
///
/// Requires at least two routes.
pub fn pick_other_route<R: Rng>(rng: &mut R, route_count: usize, excluded: usize) -> usize {
    let idx = rng.gen_range(0..route_count - 1);
    if idx >= excluded {
        idx + 1
    } else {
        idx
    }
}

/// Clamp an insertion index so the customer lands between the depot brackets.
pub fn insertion_position(pos: usize, route: &Route) -> usize {
    pos.clamp(1, route.len() - 1)
}

/// Remove the customer at `from_pos` in `from_route` and insert it into
/// `to_route` at `to_pos`, clamped to the interior of the destination.
///
/// When both routes are the same, `to_pos` refers to the route after removal.
pub fn relocate(
    routes: &mut [Route],
    from_route: usize,
    from_pos: usize,
    to_route: usize,
    to_pos: usize,
) {
    let customer = routes[from_route].remove(from_pos);
    let destination = &mut routes[to_route];
    let pos = insertion_position(to_pos, destination);
    destination.insert(pos, customer);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn relocate_keeps_depot_brackets() {
        let mut routes = vec![vec![0, 1, 2, 3, 0], vec![0, 4, 0]];

        relocate(&mut routes, 0, 3, 1, 3);

        assert_eq!(routes[0], vec![0, 1, 2, 0]);
        assert_eq!(routes[1], vec![0, 4, 3, 0]);
    }

    #[test]
    fn relocate_into_empty_route() {
        let mut routes = vec![vec![0, 1, 2, 0], vec![0, 0]];

        relocate(&mut routes, 0, 2, 1, 2);

        assert_eq!(routes[1], vec![0, 2, 0]);
    }

    #[test]
    fn other_route_is_never_the_excluded_one() {
        use rand::SeedableRng;
        let mut rng = rand_chacha::ChaCha8Rng::seed_from_u64(7);

        for _ in 0..100 {
            let idx = pick_other_route(&mut rng, 3, 1);
            assert!(idx == 0 || idx == 2);
        }
    }
}
