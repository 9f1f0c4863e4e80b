//! Basic example of using the LS-CVRP library.

use ls_cvrp::config::Config;
use ls_cvrp::construction::GreedyConstruction;
use ls_cvrp::problem::Problem;
use ls_cvrp::utils::{format_duration, save_solution, solution_line};
use std::env;
use std::time::Duration;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    // Get instance path from command line or use the bundled instance
    let args: Vec<String> = env::args().collect();
    let instance_path = if args.len() > 1 {
        args[1].as_str()
    } else {
        concat!(env!("CARGO_MANIFEST_DIR"), "/demos/data/small.vrp")
    };

    // Load problem
    println!("Loading problem from: {}", instance_path);
    let problem = Problem::from_file(instance_path)?;
    println!(
        "Loaded problem: {} with {} customers and {} vehicles",
        problem.name,
        problem.get_customer_count(),
        problem.num_vehicles
    );

    // Configure search
    let config = Config::new()
        .with_time_limit(Duration::from_secs(30))
        .with_stagnation_window(Duration::from_secs(2));

    let mut search = ls_cvrp::LocalSearch::new(problem.clone(), config);

    println!("Starting search (time limit: 30s)");
    let best_solution = search.run(&GreedyConstruction::default())?.clone();

    // Print results
    println!(
        "Search completed in {}",
        format_duration(search.statistics.runtime)
    );
    println!("Best solution distance: {:.2}", best_solution.total_distance);
    println!("Routes used: {}", best_solution.get_used_route_count());
    println!("Solution: {}", solution_line(&best_solution));
    println!("{}", search.statistics.format());

    // Save solution
    let output_path = format!("{}.sol", problem.name);
    println!("Saving solution to: {}", output_path);
    save_solution(&best_solution, &problem, &output_path)?;

    Ok(())
}
