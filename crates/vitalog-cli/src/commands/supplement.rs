//! Supplement catalog and daily intake commands.

use clap::Subcommand;
use vitalog_core::reminders::{next_reminder, ReminderTimes};
use vitalog_core::storage::{Config, Database};
use vitalog_core::RewardsLedger;

use super::{load_catalog, parse_date_arg};

#[derive(Subcommand)]
pub enum SupplementAction {
    /// List catalog entries
    List,
    /// Show one catalog entry
    Show {
        /// Supplement ID
        id: String,
    },
    /// Mark a supplement as taken
    Take {
        /// Supplement ID
        id: String,
        /// Calendar day (yyyy-MM-dd, default: today)
        #[arg(long)]
        date: Option<String>,
    },
    /// Intake records for a day
    Today {
        /// Calendar day (yyyy-MM-dd, default: today)
        #[arg(long)]
        date: Option<String>,
    },
    /// Toggle favorite status
    Favorite {
        /// Supplement ID
        id: String,
    },
    /// List favorites
    Favorites,
    /// Next reminder time for a supplement
    Next {
        /// Supplement ID
        id: String,
    },
}

pub fn run(action: SupplementAction) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load_or_default();
    let catalog = load_catalog(&config)?;

    match action {
        SupplementAction::List => {
            println!("{}", serde_json::to_string_pretty(catalog.all())?);
        }
        SupplementAction::Show { id } => match catalog.get(&id) {
            Some(supplement) => println!("{}", serde_json::to_string_pretty(supplement)?),
            None => println!("Supplement not found: {id}"),
        },
        SupplementAction::Take { id, date } => {
            let date = parse_date_arg(date)?;
            let name = catalog
                .get(&id)
                .map(|s| s.name.clone())
                .unwrap_or_else(|| id.clone());
            let mut ledger = RewardsLedger::new(Database::open()?);
            let coins = ledger.mark_supplement_taken(&id, &name, date)?;
            if coins > 0 {
                println!("Took {name}: +{coins} coins");
            } else {
                println!("{name} already taken on {date}");
            }
        }
        SupplementAction::Today { date } => {
            let date = parse_date_arg(date)?;
            let db = Database::open()?;
            let records = db.daily_records_for(date)?;
            println!("{}", serde_json::to_string_pretty(&records)?);
        }
        SupplementAction::Favorite { id } => {
            let mut ledger = RewardsLedger::new(Database::open()?);
            if ledger.toggle_favorite(&id)? {
                println!("{id} favorited");
            } else {
                println!("{id} unfavorited");
            }
        }
        SupplementAction::Favorites => {
            let ledger = RewardsLedger::new(Database::open()?);
            println!("{}", serde_json::to_string_pretty(&ledger.favorites()?)?);
        }
        SupplementAction::Next { id } => {
            let supplement = catalog.get(&id).ok_or(format!("Supplement not found: {id}"))?;
            let times = ReminderTimes::from_config(&config.notifications);
            let at = next_reminder(supplement, chrono::Local::now().naive_local(), &times);
            println!("{}", at.format("%Y-%m-%d %H:%M"));
        }
    }
    Ok(())
}
