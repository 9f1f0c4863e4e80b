//! Tests for utilities, instance loading and configuration files.

use ls_cvrp::config::Config;
use ls_cvrp::moves::OperatorKind;
use ls_cvrp::problem::{Node, Problem};
use ls_cvrp::solution::Solution;
use ls_cvrp::utils::{format_duration, save_solution, solution_line, Clock, SearchStatistics, Stopwatch};
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

/// Creates a simple test problem with a depot and some customers.
fn create_test_problem() -> Problem {
    let mut nodes = Vec::new();

    // Depot at (0, 0)
    nodes.push(Node::new(0, 0.0, 0.0, 0.0));

    nodes.push(Node::new(1, 10.0, 0.0, 1.0));
    nodes.push(Node::new(2, 0.0, 10.0, 1.0));
    nodes.push(Node::new(3, 10.0, 10.0, 1.0));

    Problem::new("TestProblem".to_string(), nodes, 3, 5.0)
}

fn temp_path(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("ls_cvrp_{}_{}", std::process::id(), name))
}

#[test]
fn test_format_duration() {
    assert_eq!(format_duration(Duration::from_secs(0)), "0h 00m 00s");
    assert_eq!(format_duration(Duration::from_secs(59)), "0h 00m 59s");
    assert_eq!(format_duration(Duration::from_secs(3725)), "1h 02m 05s");
}

#[test]
fn test_solution_line() {
    let problem = create_test_problem();
    let solution = Solution::from_routes(vec![vec![0, 1, 3, 0], vec![0, 2, 0], vec![0, 0]], &problem);

    assert_eq!(solution_line(&solution), "0 1 3 0 0 2 0 0 0");
}

#[test]
fn test_save_solution() {
    let problem = create_test_problem();
    let solution = Solution::from_routes(vec![vec![0, 1, 3, 0], vec![0, 2, 0], vec![0, 0]], &problem);
    let path = temp_path("solution.txt");

    save_solution(&solution, &problem, &path).unwrap();
    let content = fs::read_to_string(&path).unwrap();
    fs::remove_file(&path).ok();

    assert!(content.contains("CVRP Solution for instance: TestProblem"));
    assert!(content.contains("Route #1: 0 -> 1 -> 3 -> 0"));
    assert!(content.contains("Route #3: Empty"));
    assert!(content.contains("Load: 2.00 / 5.00"));
}

#[test]
fn test_statistics_format() {
    let statistics = SearchStatistics {
        iterations: 12,
        schedule_resets: 2,
        best_distance: 42.5,
        runtime: Duration::from_secs(61),
        ..SearchStatistics::default()
    };

    let text = statistics.format();
    assert!(text.contains("Iterations: 12"));
    assert!(text.contains("Schedule Resets: 2"));
    assert!(text.contains("Best Distance: 42.50"));
    assert!(text.contains("Runtime: 0h 01m 01s"));
}

#[test]
fn test_stopwatch_is_monotonic() {
    let mut stopwatch = Stopwatch::new();
    let first = stopwatch.elapsed();
    let second = stopwatch.elapsed();
    assert!(second >= first);

    stopwatch.restart();
    assert!(stopwatch.elapsed() < Duration::from_secs(1));
}

#[test]
fn test_problem_from_file() {
    let path = temp_path("instance.vrp");
    fs::write(&path, "4 2 10\n0 0 0\n3 3 4\n4 -3 4\n5 0 -5\n").unwrap();

    let problem = Problem::from_file(&path).unwrap();
    fs::remove_file(&path).ok();

    assert_eq!(problem.get_customer_count(), 3);
    assert_eq!(problem.num_vehicles, 2);
    assert_eq!(problem.vehicle_capacity, 10.0);
    assert_eq!(problem.total_demand(), 12.0);
    assert!((problem.get_distance(0, 1) - 5.0).abs() < 1e-9);
    assert!((problem.get_distance(1, 2) - 6.0).abs() < 1e-9);
    assert!(problem.name.ends_with("instance.vrp"));
}

#[test]
fn test_problem_from_missing_file() {
    assert!(Problem::from_file(temp_path("does_not_exist.vrp")).is_err());
}

#[test]
fn test_problem_from_distance_matrix() {
    let matrix = vec![
        vec![0.0, 2.0, 3.0],
        vec![2.0, 0.0, 4.0],
        vec![3.0, 4.0, 0.0],
    ];
    let problem =
        Problem::from_distance_matrix("Matrix".to_string(), vec![0.0, 1.0, 1.0], matrix, 1, 5.0)
            .unwrap();

    let solution = Solution::from_routes(vec![vec![0, 1, 2, 0]], &problem);
    assert!(solution.is_feasible);
    assert_eq!(solution.total_distance, 9.0);
}

#[test]
fn test_config_from_json_file() {
    let path = temp_path("config.json");
    fs::write(
        &path,
        r#"{
            "time_limit": { "secs": 5, "nanos": 0 },
            "neighborhood_size": 4,
            "operators": ["two_opt", "two_opt_with_cross_route_customer_move"],
            "seed": 9
        }"#,
    )
    .unwrap();

    let config = Config::from_json_file(&path).unwrap();
    fs::remove_file(&path).ok();

    assert_eq!(config.time_limit, Duration::from_secs(5));
    assert_eq!(config.neighborhood_size, 4);
    assert_eq!(
        config.operators,
        vec![
            OperatorKind::TwoOpt,
            OperatorKind::TwoOptWithCrossRouteCustomerMove
        ]
    );
    assert_eq!(config.seed, 9);
    // Unspecified fields keep their defaults
    assert_eq!(config.stagnation_window, Duration::from_secs(10));
    assert_eq!(config.min_tolerance, 0.5);
}

#[test]
fn test_bundled_demo_instance_loads() {
    let path = concat!(env!("CARGO_MANIFEST_DIR"), "/demos/data/small.vrp");
    let problem = Problem::from_file(path).unwrap();

    assert_eq!(problem.name, "small.vrp");
    assert_eq!(problem.get_customer_count(), 8);
    assert_eq!(problem.num_vehicles, 3);
    assert!(problem.total_demand() <= problem.fleet_capacity());
}
