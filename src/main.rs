use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use log::info;
use serde_json::json;

use ls_cvrp::config::Config;
use ls_cvrp::construction::GreedyConstruction;
use ls_cvrp::moves::OperatorKind;
use ls_cvrp::problem::Problem;
use ls_cvrp::utils::{save_solution, solution_line};
use ls_cvrp::LocalSearch;

#[derive(Parser, Debug)]
#[command(version, about = "Threshold-accepting local search for the CVRP")]
struct ProgramArguments {
    #[arg(help = "instance file path")]
    instance: PathBuf,

    #[arg(long, help = "JSON configuration file")]
    config: Option<PathBuf>,

    #[arg(long, help = "time limit in seconds")]
    time_limit: Option<f64>,

    #[arg(long, help = "seconds without improvement before the schedule is reset")]
    stagnation_window: Option<f64>,

    #[arg(long, help = "offset added to every operator seed")]
    seed: Option<u64>,

    #[arg(long, value_enum, value_delimiter = ',', help = "operator roster")]
    operators: Vec<OperatorKind>,

    #[arg(short, long, help = "solution file path")]
    solution: Option<PathBuf>,
}

/// Convert a seconds argument, rejecting negative, NaN and overflowing values.
fn parse_seconds(flag: &str, seconds: f64) -> anyhow::Result<Duration> {
    Duration::try_from_secs_f64(seconds)
        .map_err(|err| anyhow::Error::msg(format!("invalid --{} {}: {}", flag, seconds, err)))
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = ProgramArguments::parse();
    info!("{:?}", &args);

    let problem = Problem::from_file(&args.instance)?;
    info!(
        "loaded {} with {} customers and {} vehicles",
        problem.name,
        problem.get_customer_count(),
        problem.num_vehicles
    );

    let mut config = match &args.config {
        Some(path) => Config::from_json_file(path)?,
        None => Config::new(),
    };
    if let Some(seconds) = args.time_limit {
        config = config.with_time_limit(parse_seconds("time-limit", seconds)?);
    }
    if let Some(seconds) = args.stagnation_window {
        config = config.with_stagnation_window(parse_seconds("stagnation-window", seconds)?);
    }
    if let Some(seed) = args.seed {
        config = config.with_seed(seed);
    }
    if !args.operators.is_empty() {
        config = config.with_operators(args.operators.clone());
    }

    let mut search = LocalSearch::new(problem, config);
    let best = search.run(&GreedyConstruction::default())?.clone();
    info!("{}", search.statistics.format());

    if let Some(path) = &args.solution {
        save_solution(&best, &search.problem, path)?;
        info!("solution written to {}", path.display());
    }

    let result = json!({
        "Instance": search.problem.name,
        "Time": (search.statistics.runtime.as_secs_f64() * 100.0).round() / 100.0,
        "Result": (best.total_distance * 100.0).round() / 100.0,
        "Solution": solution_line(&best),
    });
    println!("{}", result);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_valid_seconds() {
        assert_eq!(
            parse_seconds("time-limit", 1.5).unwrap(),
            Duration::from_millis(1500)
        );
        assert_eq!(parse_seconds("time-limit", 0.0).unwrap(), Duration::ZERO);
    }

    #[test]
    fn rejects_invalid_seconds() {
        assert!(parse_seconds("time-limit", -1.0).is_err());
        assert!(parse_seconds("stagnation-window", f64::NAN).is_err());
        assert!(parse_seconds("stagnation-window", f64::INFINITY).is_err());

        let message = parse_seconds("time-limit", -2.0).unwrap_err().to_string();
        assert!(message.contains("--time-limit"));
    }
}
