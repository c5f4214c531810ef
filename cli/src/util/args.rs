use clap::{Parser, Subcommand};
use wardrop_solver::Objective;

/// CLI for the Wardrop traffic assignment solver library.
#[derive(Parser, Debug)]
#[command()]
pub(crate) struct Args {
    #[command(subcommand)]
    pub(crate) command: Commands,

    /// Enable [v]erbose debug logging
    #[arg(long, short = 'v', global = true, display_order = 1)]
    pub(crate) debug: bool,

    /// Enable [t]race logging
    #[arg(long, short, global = true, display_order = 2)]
    pub(crate) trace: bool,

    /// Disable logging, [q]uieting output. Takes precedence over debug.
    #[arg(long, short, global = true, display_order = 3)]
    pub(crate) quiet: bool,

    /// Objective to route on
    #[arg(long, value_enum, default_value_t = Objective::UserEquilibrium, global = true, display_order = 11, help_heading = "Solver Parameters")]
    pub(crate) objective: Objective,

    /// Fraction of flow shifted toward the cheapest path per iteration
    #[arg(long, default_value_t = 0.5, global = true, display_order = 12, help_heading = "Solver Parameters")]
    pub(crate) step_size: f64,

    /// Maximum number of flow-shifting iterations per solve
    #[arg(long, default_value_t = 100, global = true, display_order = 13, help_heading = "Solver Parameters")]
    pub(crate) iteration_limit: usize,

    /// Absolute cost tolerance for declaring an equilibrium
    #[arg(long, default_value_t = 0.001, global = true, display_order = 14, help_heading = "Solver Parameters")]
    pub(crate) threshold: f64,

    /// Ceiling on enumerated simple paths before truncation
    #[arg(long, default_value_t = 10_000, global = true, display_order = 15, help_heading = "Solver Parameters")]
    pub(crate) max_paths: usize,
}

#[derive(Subcommand, Debug)]
pub(crate) enum Commands {
    /// Assign a demand onto a network under one objective.
    Solve {
        /// Path to a file containing a network to be used as input.
        file: String,

        /// Name of the origin node.
        source: String,

        /// Name of the destination node.
        sink: String,

        /// Number of vehicles travelling from source to sink.
        vehicles: u64,

        /// Print whole-driver counts next to the continuous flows.
        #[arg(long, short, display_order = 0)]
        round: bool,

        /// Path to an [o]utput file to save the assignment summary in.
        #[arg(long, short = 'O', display_order = 1)]
        output: Option<String>,
    },
    /// Solve both objectives and report the price of anarchy.
    Compare {
        /// Path to a file containing a network to be used as input.
        file: String,

        /// Name of the origin node.
        source: String,

        /// Name of the destination node.
        sink: String,

        /// Number of vehicles travelling from source to sink.
        vehicles: u64,
    },
    /// Create a completely random network instead of using an input file.
    Random {
        /// Number of nodes.
        nodes: usize,

        /// Path to [o]utput file to save the network in.
        #[arg(short, long, display_order = 0)]
        output: String,

        /// Probability of each ordered node pair carrying an edge.
        #[arg(long, default_value_t = 0.3, display_order = 100, help_heading = "Random Edges")]
        arc_density: f64,

        /// Minimum congestion sensitivity a.
        #[arg(long, default_value_t = 0.0, display_order = 101, help_heading = "Random Edges")]
        amin: f64,

        /// Maximum congestion sensitivity a.
        #[arg(long, default_value_t = 3.0, display_order = 102, help_heading = "Random Edges")]
        amax: f64,

        /// Minimum free-flow cost b.
        #[arg(long, default_value_t = 1.0, display_order = 103, help_heading = "Random Edges")]
        bmin: f64,

        /// Maximum free-flow cost b.
        #[arg(long, default_value_t = 10.0, display_order = 104, help_heading = "Random Edges")]
        bmax: f64,
    },
    /// Export a solved assignment as a latex figure.
    Latex {
        /// Path to a file containing a network to be used as input.
        in_file: String,

        /// Where to save the output to.
        out_file: String,

        /// Name of the origin node.
        source: String,

        /// Name of the destination node.
        sink: String,

        /// Number of vehicles travelling from source to sink.
        vehicles: u64,

        /// Disable node and edge labels. Useful for large networks.
        #[arg(long, display_order = 0)]
        no_text: bool,

        /// Width of the resulting tikz picture.
        #[arg(long, display_order = 0, default_value_t = 12.0)]
        width: f32,
    },
    /// Benchmark the solution process.
    Benchmark {
        /// Path to a file containing a network to be used as input.
        file: String,

        /// Name of the origin node.
        source: String,

        /// Name of the destination node.
        sink: String,

        /// Number of vehicles travelling from source to sink.
        vehicles: u64,

        /// Number of [i]terations over which to average
        #[arg(short, long, display_order = 0)]
        iterations: usize,
    },
}
