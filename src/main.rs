use std::io::{self, BufRead, Write};

use anyhow::{bail, Context, Result};
use clap::Parser;
use log::warn;

use intersection_sim::simulation::{
    IntersectionSimulator, RoadConfig, SimulationConfig, SimulationStats, MAX_ROADS,
};

#[derive(Parser)]
#[command(name = "intersection_sim")]
#[command(about = "Traffic light simulation for a multi-road intersection")]
struct Cli {
    /// Number of time steps during which vehicles may arrive
    #[arg(long, short = 't')]
    time: Option<u32>,

    /// Probability that a vehicle arrives in a lane on a time step
    #[arg(long, short = 'p')]
    probability: Option<f64>,

    /// Road as NAME:GREEN_TIME, repeat for up to four roads
    #[arg(long = "road", short = 'r')]
    roads: Vec<RoadConfig>,

    /// Seed for reproducible arrivals
    #[arg(long)]
    seed: Option<u64>,

    /// Only print the final summary
    #[arg(long, short = 'q')]
    quiet: bool,

    /// Prompt for the simulation parameters on stdin
    #[arg(long, short = 'i')]
    interactive: bool,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let config = if cli.interactive || cli.roads.is_empty() {
        if cli.time.is_some() || cli.probability.is_some() {
            warn!("--time and --probability are ignored without --road; prompting instead");
        }
        prompt_config(cli.seed)?
    } else {
        config_from_args(&cli)?
    };

    run(config, cli.quiet)
}

fn config_from_args(cli: &Cli) -> Result<SimulationConfig> {
    let Some(simulation_time) = cli.time else {
        bail!("--time is required when roads are given on the command line");
    };
    let Some(arrival_probability) = cli.probability else {
        bail!("--probability is required when roads are given on the command line");
    };

    let config = SimulationConfig {
        simulation_time,
        arrival_probability,
        roads: cli.roads.clone(),
        seed: cli.seed,
    };
    config.validate().context("invalid simulation parameters")?;
    Ok(config)
}

/// Ask one question and return the trimmed answer
fn ask(input: &mut impl BufRead, question: &str) -> Result<String> {
    print!("{question}");
    io::stdout().flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Err(io::Error::new(io::ErrorKind::UnexpectedEof, "input closed").into());
    }
    Ok(line.trim().to_string())
}

fn read_config(input: &mut impl BufRead, seed: Option<u64>) -> Result<SimulationConfig> {
    let simulation_time: u32 = ask(input, "Input the simulation time: ")?
        .parse()
        .context("simulation time must be a whole number")?;
    let arrival_probability: f64 = ask(input, "Input the arrival probability: ")?
        .parse()
        .context("arrival probability must be a number")?;
    let num_roads: usize = ask(input, "Input number of streets: ")?
        .parse()
        .context("number of streets must be a whole number")?;
    if num_roads == 0 || num_roads > MAX_ROADS {
        bail!("number of streets must be between 1 and {MAX_ROADS}");
    }

    let mut names: Vec<String> = Vec::with_capacity(num_roads);
    for i in 1..=num_roads {
        let mut name = ask(input, &format!("Input Street {i} name: "))?;
        while names.contains(&name) {
            println!("Duplicate Detected.");
            name = ask(input, &format!("Input Street {i} name: "))?;
        }
        names.push(name);
    }

    let mut roads = Vec::with_capacity(num_roads);
    for name in names {
        let green_time: u32 = ask(input, &format!("Input max green time for {name}: "))?
            .parse()
            .context("green time must be a whole number")?;
        roads.push(RoadConfig::new(name, green_time));
    }

    let config = SimulationConfig {
        simulation_time,
        arrival_probability,
        roads,
        seed,
    };
    config.validate()?;
    Ok(config)
}

/// Prompt until a valid configuration is entered
fn prompt_config(seed: Option<u64>) -> Result<SimulationConfig> {
    let stdin = io::stdin();
    let mut input = stdin.lock();
    loop {
        match read_config(&mut input, seed) {
            Ok(config) => return Ok(config),
            Err(e) if e.downcast_ref::<io::Error>().is_some() => return Err(e),
            Err(e) => {
                warn!("rejected input: {e:#}");
                println!("Invalid Input");
            }
        }
    }
}

fn run(config: SimulationConfig, quiet: bool) -> Result<()> {
    let mut simulator =
        IntersectionSimulator::new(config).context("invalid simulation parameters")?;

    println!("\nStarting Simulation...\n");
    let stats = simulator.run(|report, intersection, stats| {
        if !quiet {
            println!("{report}");
            println!("{intersection}");
            println!("{stats}");
        }
    })?;

    print_summary(&stats);
    Ok(())
}

fn print_summary(stats: &SimulationStats) {
    let banner = format!("{}\n", "#".repeat(80)).repeat(3);
    println!("{banner}");
    println!("SIMULATION SUMMARY\n");
    println!("    {:<22}{} steps", "Total Time:", stats.elapsed_steps);
    println!("    {:<22}{} vehicles", "Total vehicles:", stats.total_vehicles_arrived);
    println!("    {:<22}{} turns", "Longest wait time:", stats.longest_wait_time);
    println!("    {:<22}{} turns", "Total wait time:", stats.total_wait_time);
    println!(
        "    {:<22}{:.2} turns\n",
        "Average wait time:",
        stats.average_wait_time()
    );
    println!("End simulation.");
}
