//! Tests for the initial solution construction.

use ls_cvrp::construction::{GreedyConstruction, InitialSolver};
use ls_cvrp::problem::{Node, Problem};

/// Creates a problem where demands fit the fleet only in a particular packing.
fn create_tight_problem() -> Problem {
    let demands = [0.0, 5.0, 5.0, 4.0, 4.0, 3.0, 3.0, 3.0, 3.0];
    let nodes = demands
        .iter()
        .enumerate()
        .map(|(id, &demand)| Node::new(id, id as f64, (id * id) as f64 % 7.0, demand))
        .collect();

    // Total demand 30 in 3 vehicles of capacity 10: only {5,5}, {4,3,3}, {4,3,3}
    Problem::new("Tight".to_string(), nodes, 3, 10.0)
}

#[test]
fn test_greedy_solution_is_feasible() {
    let problem = create_tight_problem();

    let solution = GreedyConstruction::default().solve_initial(&problem).unwrap();

    assert!(solution.is_feasible);
    assert_eq!(solution.routes.len(), problem.num_vehicles);
    let mut customers = solution.customer_sequence();
    customers.sort_unstable();
    assert_eq!(customers, (1..=8).collect::<Vec<_>>());
}

#[test]
fn test_customer_above_capacity() {
    let nodes = vec![Node::new(0, 0.0, 0.0, 0.0), Node::new(1, 1.0, 1.0, 11.0)];
    let problem = Problem::new("TooBig".to_string(), nodes, 5, 10.0);

    assert!(GreedyConstruction::default().solve_initial(&problem).is_none());
}

#[test]
fn test_total_demand_above_fleet_capacity() {
    let mut problem = create_tight_problem();
    problem.vehicle_capacity = 9.0;

    assert!(GreedyConstruction::default().solve_initial(&problem).is_none());
}

#[test]
fn test_unpackable_instance() {
    // Total demand 18 fits 3 x 6 on paper, but no two 4s share a vehicle
    let demands = [0.0, 4.0, 4.0, 4.0, 4.0, 2.0];
    let nodes = demands
        .iter()
        .enumerate()
        .map(|(id, &demand)| Node::new(id, id as f64, 0.0, demand))
        .collect();
    let problem = Problem::new("Unpackable".to_string(), nodes, 3, 6.0);

    assert!(GreedyConstruction::new(20, 1).solve_initial(&problem).is_none());
}

#[test]
fn test_instance_without_customers() {
    let problem = Problem::new(
        "DepotOnly".to_string(),
        vec![Node::new(0, 0.0, 0.0, 0.0)],
        2,
        10.0,
    );

    let solution = GreedyConstruction::default().solve_initial(&problem).unwrap();

    assert!(solution.is_feasible);
    assert_eq!(solution.routes, vec![vec![0, 0], vec![0, 0]]);
    assert_eq!(solution.total_distance, 0.0);
}

#[test]
fn test_closure_as_initial_solver() {
    let problem = create_tight_problem();
    let greedy = GreedyConstruction::default();

    let wrapped = |p: &Problem| greedy.solve_initial(p);

    assert_eq!(wrapped.solve_initial(&problem), greedy.solve_initial(&problem));
}
