use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "studycat-cli", version, about = "StudyCat CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Task management
    Task {
        #[command(subcommand)]
        action: commands::task::TaskAction,
    },
    /// Study time logging
    Study {
        #[command(subcommand)]
        action: commands::study::StudyAction,
    },
    /// Focus session events from the timer
    Pomodoro {
        #[command(subcommand)]
        action: commands::pomodoro::PomodoroAction,
    },
    /// Catcoin balance
    Coins {
        #[command(subcommand)]
        action: commands::coins::CoinsAction,
    },
    /// Achievement badges
    Badge {
        #[command(subcommand)]
        action: commands::badge::BadgeAction,
    },
    /// Pet status and shop
    Pet {
        #[command(subcommand)]
        action: commands::pet::PetAction,
    },
    /// Study statistics
    Stats {
        #[command(subcommand)]
        action: commands::stats::StatsAction,
    },
    /// Raw state snapshot
    State {
        #[command(subcommand)]
        action: commands::state::StateAction,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
    /// Run the periodic night-owl check until Ctrl-C
    Watch,
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env("STUDYCAT_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    init_tracing();

    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Task { action } => commands::task::run(action),
        Commands::Study { action } => commands::study::run(action),
        Commands::Pomodoro { action } => commands::pomodoro::run(action),
        Commands::Coins { action } => commands::coins::run(action),
        Commands::Badge { action } => commands::badge::run(action),
        Commands::Pet { action } => commands::pet::run(action),
        Commands::Stats { action } => commands::stats::run(action),
        Commands::State { action } => commands::state::run(action),
        Commands::Config { action } => commands::config::run(action),
        Commands::Watch => commands::watch::run(),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
