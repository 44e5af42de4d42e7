//! User profile commands.

use clap::Subcommand;
use vitalog_core::storage::Database;
use vitalog_core::{Gender, LifeStage, LOCAL_USER};

#[derive(Subcommand)]
pub enum ProfileAction {
    /// Show the current profile
    Show,
    /// Create or update the profile
    Set {
        /// Display name
        #[arg(long)]
        name: Option<String>,
        /// Email address
        #[arg(long)]
        email: Option<String>,
        /// Age in years
        #[arg(long)]
        age: Option<i64>,
        /// Gender: male, female, or other
        #[arg(long)]
        gender: Option<String>,
        /// Life stage: child, teenager, adult, or senior
        #[arg(long)]
        life_stage: Option<String>,
    },
}

pub fn run(action: ProfileAction) -> Result<(), Box<dyn std::error::Error>> {
    let db = Database::open()?;

    match action {
        ProfileAction::Show => match db.latest_user()? {
            Some(user) => println!("{}", serde_json::to_string_pretty(&user)?),
            None => println!("No profile yet. Create one with `vitalog profile set --name ...`"),
        },
        ProfileAction::Set {
            name,
            email,
            age,
            gender,
            life_stage,
        } => {
            let existing = db.latest_user()?;
            let id = existing
                .as_ref()
                .map(|u| u.id.clone())
                .unwrap_or_else(|| LOCAL_USER.to_string());
            let name = name
                .or_else(|| existing.as_ref().map(|u| u.user_name.clone()))
                .ok_or("--name required for a new profile")?;
            let email = email
                .or_else(|| existing.as_ref().map(|u| u.email.clone()))
                .unwrap_or_default();
            let age = age.or_else(|| existing.as_ref().and_then(|u| u.age));
            let gender = match gender {
                Some(s) => Some(Gender::parse(&s).ok_or(format!("unknown gender: {s}"))?),
                None => existing.as_ref().and_then(|u| u.gender),
            };
            let life_stage = match life_stage {
                Some(s) => Some(LifeStage::parse(&s).ok_or(format!("unknown life stage: {s}"))?),
                None => existing.as_ref().and_then(|u| u.life_stage),
            };

            let user = db.create_or_update_user(&id, &name, &email, age, gender, life_stage)?;
            println!("{}", serde_json::to_string_pretty(&user)?);
        }
    }
    Ok(())
}
