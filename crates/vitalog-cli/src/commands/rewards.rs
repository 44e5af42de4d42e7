//! Coin balance and transaction log commands.

use clap::Subcommand;
use vitalog_core::storage::Database;
use vitalog_core::RewardsLedger;

use super::parse_date_arg;

#[derive(Subcommand)]
pub enum RewardsAction {
    /// Coin totals, streaks, and achievements
    Summary,
    /// Recent reward transactions
    Transactions {
        /// Maximum rows to show
        #[arg(long, default_value = "20")]
        limit: usize,
    },
    /// Progress for a day
    Today {
        /// Calendar day (yyyy-MM-dd, default: today)
        #[arg(long)]
        date: Option<String>,
    },
    /// Spend coins from the available balance
    Spend {
        /// Coins to spend
        amount: i64,
        /// What the coins are spent on
        #[arg(long, default_value = "Reward redeemed")]
        title: String,
    },
}

pub fn run(action: RewardsAction) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        RewardsAction::Summary => {
            let ledger = RewardsLedger::new(Database::open()?);
            println!("{}", serde_json::to_string_pretty(&ledger.summary()?)?);
        }
        RewardsAction::Transactions { limit } => {
            let ledger = RewardsLedger::new(Database::open()?);
            let transactions = ledger.recent_transactions(limit)?;
            println!("{}", serde_json::to_string_pretty(&transactions)?);
        }
        RewardsAction::Today { date } => {
            let date = parse_date_arg(date)?;
            let ledger = RewardsLedger::new(Database::open()?);
            let (taken, total) = ledger.day_stats(date)?;
            let coins = ledger.earned_on(date)?;
            println!("{date}: {taken}/{total} supplements taken, {coins} coins earned");
        }
        RewardsAction::Spend { amount, title } => {
            let mut ledger = RewardsLedger::new(Database::open()?);
            let summary = ledger.spend_coins(amount, &title)?;
            println!(
                "Spent {amount} coins on \"{title}\" ({} available)",
                summary.available_coins()
            );
        }
    }
    Ok(())
}
