mod util;

use std::time::Instant;

use clap::Parser;
use log::LevelFilter;
use wardrop_solver::{price_of_anarchy, Assignment, Network, Options};

use util::{run_benchmark, setup_logger, Args, Commands};

#[macro_export]
macro_rules! attempt {
    ($e:expr) => {
        match $e {
            Ok(value) => value,
            Err(error) => {
                log::error!("{error}");
                std::process::exit(1);
            }
        }
    };
}

fn main() {
    let args = Args::parse();

    setup_logger(if args.quiet {
        LevelFilter::Off
    } else if args.trace {
        LevelFilter::Trace
    } else if args.debug {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    });

    let options = Options {
        step_size: args.step_size,
        iteration_limit: args.iteration_limit,
        convergence_threshold: args.threshold,
        max_paths: Some(args.max_paths),
    };

    match args.command {
        Commands::Solve {
            file,
            source,
            sink,
            vehicles,
            round,
            output,
        } => {
            let network = attempt!(Network::from_file(&file, options));
            let demand = attempt!(network.demand(&source, &sink, vehicles));

            let start_solve = Instant::now();
            let assignment = attempt!(network.solve(&demand, args.objective));
            let elapsed_solve = start_solve.elapsed();

            println!("{}", network.display_assignment(&assignment));
            if round {
                println!("Whole-driver apportionment:");
                let rounded = assignment.rounded();
                for (&(u, v), &drivers) in rounded.iter() {
                    println!(
                        "  ({}->{}): {} drivers",
                        network.nodes[u], network.nodes[v], drivers
                    );
                }
            }
            println!(
                "Solving took {}s and {}ms.",
                elapsed_solve.as_secs(),
                elapsed_solve.subsec_millis()
            );

            if let Some(filename) = output {
                attempt!(write_summary(&network, &assignment, &filename));
            }
        }
        Commands::Compare {
            file,
            source,
            sink,
            vehicles,
        } => {
            let network = attempt!(Network::from_file(&file, options));
            let demand = attempt!(network.demand(&source, &sink, vehicles));

            let equilibrium = attempt!(network.solve_user_equilibrium(&demand));
            let optimum = attempt!(network.solve_system_optimum(&demand));

            println!("{}", network.display_assignment(&equilibrium));
            println!();
            println!("{}", network.display_assignment(&optimum));
            println!();
            println!(
                "Price of anarchy: {:.4}",
                price_of_anarchy(&network, &equilibrium, &optimum)
            );
        }
        Commands::Random {
            nodes,
            output,
            arc_density,
            amin,
            amax,
            bmin,
            bmax,
        } => {
            let network = attempt!(Network::from_random(
                &options,
                nodes,
                arc_density,
                (amin, amax),
                (bmin, bmax),
            ));
            println!("{network}");
            attempt!(network.serialize(&output));
        }
        Commands::Latex {
            in_file,
            out_file,
            source,
            sink,
            vehicles,
            no_text,
            width,
        } => {
            let network = attempt!(Network::from_file(&in_file, options));
            let demand = attempt!(network.demand(&source, &sink, vehicles));
            let assignment = attempt!(network.solve(&demand, args.objective));
            attempt!(network.to_latex(&assignment, &out_file, width, no_text));
        }
        Commands::Benchmark {
            file,
            source,
            sink,
            vehicles,
            iterations,
        } => {
            let network = attempt!(Network::from_file(&file, options));
            let demand = attempt!(network.demand(&source, &sink, vehicles));
            run_benchmark(&network, &demand, args.objective, iterations);
        }
    }
}

fn write_summary(
    network: &Network,
    assignment: &Assignment,
    filename: &str,
) -> wardrop_solver::Result<()> {
    let rounded = assignment.rounded();
    let edges: Vec<serde_json::Value> = assignment
        .flows
        .iter()
        .map(|(&(u, v), &flow)| {
            serde_json::json!({
                "from": network.nodes[u].name,
                "to": network.nodes[v].name,
                "flow": flow,
                "drivers": rounded.get(u, v),
            })
        })
        .collect();

    let summary = serde_json::json!({
        "objective": assignment.objective.to_string(),
        "converged": assignment.termination.converged(),
        "total_travel_time": assignment.total_travel_time(network),
        "edges": edges,
    });

    log::debug!("Writing assignment summary to {filename}");
    std::fs::write(filename, serde_json::to_string_pretty(&summary)?)?;
    Ok(())
}
