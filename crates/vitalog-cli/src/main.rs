use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "vitalog", version, about = "Vitalog CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Supplement catalog and daily intake
    Supplement {
        #[command(subcommand)]
        action: commands::supplement::SupplementAction,
    },
    /// Quiz sessions and history
    Quiz {
        #[command(subcommand)]
        action: commands::quiz::QuizAction,
    },
    /// Coin balance, transactions, and achievements
    Rewards {
        #[command(subcommand)]
        action: commands::rewards::RewardsAction,
    },
    /// User profile management
    Profile {
        #[command(subcommand)]
        action: commands::profile::ProfileAction,
    },
    /// Local account sessions
    Auth {
        #[command(subcommand)]
        action: commands::auth::AuthAction,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
}

fn main() {
    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Supplement { action } => commands::supplement::run(action),
        Commands::Quiz { action } => commands::quiz::run(action),
        Commands::Rewards { action } => commands::rewards::run(action),
        Commands::Profile { action } => commands::profile::run(action),
        Commands::Auth { action } => commands::auth::run(action),
        Commands::Config { action } => commands::config::run(action),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
