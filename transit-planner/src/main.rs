use std::process::ExitCode;
use std::sync::Arc;

use transit_planner::cost::{CostModel, Mode};
use transit_planner::network::{JsonFileSource, NetworkRepository};
use transit_planner::planner::{JourneyPlanner, NoJourneyReason, PlanOutcome, PlannerConfig};

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let args: Vec<String> = std::env::args().collect();
    let [_, network_path, origin_lat, origin_lon, dest_lat, dest_lon] = &args[..] else {
        eprintln!(
            "Usage: transit-planner <network.json> <origin-lat> <origin-lon> <dest-lat> <dest-lon>"
        );
        return ExitCode::FAILURE;
    };

    let Ok(origin) = parse_pair(origin_lat, origin_lon) else {
        eprintln!("Origin coordinates must be decimal degrees");
        return ExitCode::FAILURE;
    };
    let Ok(destination) = parse_pair(dest_lat, dest_lon) else {
        eprintln!("Destination coordinates must be decimal degrees");
        return ExitCode::FAILURE;
    };

    // A missing or invalid network is fatal: there is nothing to plan over.
    let repository = NetworkRepository::new();
    if let Err(e) = repository.load(&JsonFileSource::new(network_path.as_str())) {
        eprintln!("Failed to load network from {network_path}: {e}");
        return ExitCode::FAILURE;
    }
    let network = repository.snapshot();
    println!(
        "Loaded {} stops across {} routes",
        network.stop_count(),
        network.route_count()
    );

    let planner = JourneyPlanner::new(
        Arc::clone(&network),
        CostModel::default(),
        PlannerConfig::default(),
    );

    match planner.plan_journey(origin, destination) {
        Ok(PlanOutcome::Journey(journey)) => {
            print_journey(&network, &planner, &journey);
            ExitCode::SUCCESS
        }
        Ok(PlanOutcome::NoJourney(NoJourneyReason::OutOfServiceArea)) => {
            println!("No bus stop within reach of the origin or destination.");
            ExitCode::SUCCESS
        }
        Ok(PlanOutcome::NoJourney(NoJourneyReason::NoRouteFound)) => {
            println!("Nearby stops exist, but no route connects them.");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Planning failed: {e}");
            ExitCode::FAILURE
        }
    }
}

fn parse_pair(lat: &str, lon: &str) -> Result<(f64, f64), std::num::ParseFloatError> {
    Ok((lat.parse()?, lon.parse()?))
}

fn print_journey(
    network: &transit_planner::network::TransitNetwork,
    planner: &JourneyPlanner,
    journey: &transit_planner::domain::Journey,
) {
    let stop_name = |id: &transit_planner::domain::StopId| {
        network
            .stop(id)
            .map(|s| s.name.clone())
            .unwrap_or_else(|| id.to_string())
    };

    println!();
    println!(
        "Walk {:.0} m to {} and board {}",
        journey.walk_to_board_m(),
        stop_name(journey.boarding()),
        journey.routes()[0]
    );
    if let Some(transfer) = journey.transfer_stop() {
        println!(
            "Change at {} to {}",
            stop_name(transfer),
            journey.routes()[1]
        );
    }
    println!(
        "Alight at {} and walk {:.0} m to your destination",
        stop_name(journey.alighting()),
        journey.walk_from_alight_m()
    );
    println!();
    println!(
        "Bus leg: {:.1} km, ~{:.0} min",
        journey.bus_distance_m() / 1_000.0,
        journey.bus_duration_mins()
    );
    println!(
        "Total:   {:.1} km, ~{:.0} min",
        journey.total_distance_m() / 1_000.0,
        journey.total_duration_mins()
    );

    let access = planner.cost_model().suggest_mode(journey.walk_to_board_m());
    if access != Mode::Walking {
        println!("Tip: consider a {access} for the first leg.");
    }
}
