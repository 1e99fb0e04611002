//! Main CLI application for the automaton simulator

use anyhow::{Context, Result};
use automata_sim::{
    automaton::{io, RuleSet},
    config::{CliOverrides, Settings},
    driver::{server, terminal},
    utils::display::{format_grid_with_coords, ColorOutput},
    utils::rng,
    Grid2,
};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::time::Duration;

#[derive(Parser)]
#[command(name = "automata_sim")]
#[command(about = "2D and 3D cellular automaton simulator")]
#[command(version = "0.1.0")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the 2D simulation in the terminal
    Run {
        /// Configuration file path
        #[arg(short, long, default_value = "config/default.yaml")]
        config: PathBuf,

        /// Grid width (overrides config)
        #[arg(long)]
        width: Option<usize>,

        /// Grid height (overrides config)
        #[arg(long)]
        height: Option<usize>,

        /// Milliseconds between generations (overrides config)
        #[arg(short, long)]
        delay: Option<u64>,

        /// RNG seed (overrides config)
        #[arg(short, long)]
        seed: Option<u64>,

        /// Seed the grid from a file instead of randomly
        #[arg(long)]
        seed_file: Option<PathBuf>,
    },

    /// Stream the 3D simulation to clients as JSON frames
    Serve {
        /// Configuration file path
        #[arg(short, long, default_value = "config/default.yaml")]
        config: PathBuf,

        /// Bind address (overrides config)
        #[arg(short, long)]
        bind: Option<String>,

        /// Milliseconds between frames (overrides config)
        #[arg(short, long)]
        interval: Option<u64>,

        /// Stamp template file (overrides config)
        #[arg(short, long)]
        pattern: Option<PathBuf>,

        /// RNG seed (overrides config)
        #[arg(short, long)]
        seed: Option<u64>,
    },

    /// Advance a grid file by N generations and print the result
    Step {
        /// Input grid file
        #[arg(short, long)]
        input: PathBuf,

        /// Number of generations to advance
        #[arg(short, long, default_value_t = 1)]
        generations: usize,

        /// Save the final state here instead of printing it
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Print every intermediate generation
        #[arg(long)]
        show_evolution: bool,
    },

    /// Create example configuration and pattern files
    Setup {
        /// Directory to create files in
        #[arg(short, long, default_value = ".")]
        directory: PathBuf,

        /// Force overwrite existing files
        #[arg(short, long)]
        force: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            config,
            width,
            height,
            delay,
            seed,
            seed_file,
        } => run_command(config, width, height, delay, seed, seed_file),
        Commands::Serve {
            config,
            bind,
            interval,
            pattern,
            seed,
        } => serve_command(config, bind, interval, pattern, seed),
        Commands::Step {
            input,
            generations,
            output,
            show_evolution,
        } => step_command(input, generations, output, show_evolution),
        Commands::Setup { directory, force } => setup_command(directory, force),
    }
}

fn load_settings(config_path: &PathBuf) -> Result<Settings> {
    if config_path.exists() {
        Settings::from_file(config_path)
            .with_context(|| format!("Failed to load config from {}", config_path.display()))
    } else {
        println!(
            "{}",
            ColorOutput::warning(&format!(
                "Config file {} not found, using defaults",
                config_path.display()
            ))
        );
        Ok(Settings::default())
    }
}

fn run_command(
    config_path: PathBuf,
    width: Option<usize>,
    height: Option<usize>,
    delay: Option<u64>,
    seed: Option<u64>,
    seed_file: Option<PathBuf>,
) -> Result<()> {
    let mut settings = load_settings(&config_path)?;
    settings.merge_with_cli(&CliOverrides {
        width,
        height,
        seed,
        frame_delay_ms: delay,
        ..Default::default()
    });
    settings
        .validate()
        .context("Configuration validation failed")?;

    let (mut rng, seed) = rng::seeded(settings.simulation.seed);

    let grid = match seed_file {
        Some(path) => io::load_grid_from_file(&path)?,
        None => {
            let mut grid = Grid2::new(settings.grid2d);
            grid.randomize(&mut rng, settings.simulation.fill_density);
            grid
        }
    };

    println!(
        "{}",
        ColorOutput::info(&format!(
            "Starting {}x{} simulation (seed {}), press q to quit",
            grid.width(),
            grid.height(),
            seed
        ))
    );

    let frame_delay = Duration::from_millis(settings.terminal.frame_delay_ms);
    let generations = terminal::run(grid, frame_delay)?;

    println!(
        "{}",
        ColorOutput::success(&format!("Simulated {} generations", generations))
    );
    Ok(())
}

fn serve_command(
    config_path: PathBuf,
    bind: Option<String>,
    interval: Option<u64>,
    pattern: Option<PathBuf>,
    seed: Option<u64>,
) -> Result<()> {
    let mut settings = load_settings(&config_path)?;
    settings.merge_with_cli(&CliOverrides {
        seed,
        bind_address: bind,
        broadcast_interval_ms: interval,
        pattern_file: pattern,
        ..Default::default()
    });
    settings
        .validate()
        .context("Configuration validation failed")?;

    tracing_subscriber::fmt::init();

    let (_, seed) = rng::seeded(settings.simulation.seed);
    tracing::info!(seed, "starting 3D automaton server");

    let runtime = tokio::runtime::Runtime::new().context("Failed to start async runtime")?;
    runtime.block_on(server::serve(settings, seed))
}

fn step_command(
    input: PathBuf,
    generations: usize,
    output: Option<PathBuf>,
    show_evolution: bool,
) -> Result<()> {
    let mut grid = io::load_grid_from_file(&input)?;
    println!(
        "{}",
        ColorOutput::info(&format!(
            "Loaded {}x{} grid with {} living cells",
            grid.width(),
            grid.height(),
            grid.alive_count()
        ))
    );

    let rule = RuleSet::conway();
    for generation in 1..=generations {
        grid = grid.step(&rule);
        if show_evolution {
            println!("Generation {}:", generation);
            println!("{}", grid);
        }
    }

    if let Some(path) = output {
        io::save_grid_to_file(&grid, &path)?;
        println!(
            "{}",
            ColorOutput::success(&format!("Saved final state to {}", path.display()))
        );
    } else if !show_evolution {
        println!("Final state after {} generations:", generations);
        println!("{}", format_grid_with_coords(&grid));
    }

    Ok(())
}

fn setup_command(directory: PathBuf, force: bool) -> Result<()> {
    println!("{}", ColorOutput::info("🛠️  Setting up project structure..."));

    let config_dir = directory.join("config");
    let patterns_dir = directory.join("patterns");

    for dir in [&config_dir, &patterns_dir] {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create directory {}", dir.display()))?;
    }

    let config_path = config_dir.join("default.yaml");
    if !config_path.exists() || force {
        Settings::default()
            .to_file(&config_path)
            .context("Failed to create default configuration")?;
        println!("Created: {}", config_path.display());
    } else {
        println!("Skipped: {} (already exists)", config_path.display());
    }

    io::create_example_patterns(&patterns_dir).context("Failed to create example patterns")?;
    println!("Created example patterns in: {}", patterns_dir.display());

    println!("\n{}", ColorOutput::success("✅ Setup complete!"));
    println!("\nNext steps:");
    println!("1. Run the terminal simulation: cargo run -- run");
    println!("2. Stream the 3D simulation: cargo run -- serve --pattern patterns/stamp.txt");
    println!("3. Evolve a grid offline: cargo run -- step --input patterns/glider.txt -g 4");

    Ok(())
}
