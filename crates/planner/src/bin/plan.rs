use bunkatsu_clock::SystemClock;
use bunkatsu_planner::{
    FileRateSource, PlanRequest, Planner, PlannerConfig, PlannerResult, RateCache, RateFetcher,
};
use std::sync::Arc;

fn print_help() {
    eprintln!(
        r#"Bunkatsu - split-entry position planner

USAGE:
    bunkatsu-plan <REQUEST> <RATES> [PLANNER]

ARGS:
    <REQUEST>    Calculation request (JSON)
    <RATES>      Rate snapshot, every currency quoted per USD (JSON)
    <PLANNER>    Planner settings (JSON, optional)

ENVIRONMENT VARIABLES:
    RUST_LOG     Log level filter (default: info)
"#
    );
}

async fn run(request_path: &str, rates_path: &str, config_path: Option<&str>) -> PlannerResult<()> {
    let config = match config_path {
        Some(path) => {
            log::info!("Loading planner settings from: {}", path);
            PlannerConfig::from_file(path)?
        }
        None => PlannerConfig::default(),
    };
    let request = PlanRequest::from_file(request_path)?;

    let source = Arc::new(FileRateSource::new(rates_path));
    let fetcher = RateFetcher::from_config(source, &config);
    let mut cache = RateCache::new(config.cache_ttl());
    let snapshot = cache.get_or_fetch(&fetcher, &SystemClock::new()).await?;

    let report = Planner::new(config).plan(&request, &snapshot)?;
    println!("{}", report);
    Ok(())
}

#[tokio::main]
async fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args: Vec<String> = std::env::args().collect();
    if args.iter().any(|a| a == "--help" || a == "-h") {
        print_help();
        return;
    }
    if args.len() < 3 || args.len() > 4 {
        print_help();
        std::process::exit(1);
    }

    if let Err(e) = run(&args[1], &args[2], args.get(3).map(String::as_str)).await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
