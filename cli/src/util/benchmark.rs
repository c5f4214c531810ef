use std::time::{Duration, Instant};

use wardrop_solver::{Demand, Network, Objective};

pub(crate) fn run_benchmark(
    network: &Network,
    demand: &Demand,
    objective: Objective,
    iterations: usize,
) {
    let mut solve = Duration::ZERO;

    for _ in 0..iterations {
        let start_solve = Instant::now();
        crate::attempt!(network.solve(demand, objective));
        solve += start_solve.elapsed();
    }

    solve /= iterations as u32;

    println!(
        "Solving {} took {}s and {}ms on average (n={}).",
        objective,
        solve.as_secs(),
        solve.subsec_millis(),
        iterations,
    );
}
