pub mod auth;
pub mod config;
pub mod profile;
pub mod quiz;
pub mod rewards;
pub mod supplement;

use chrono::{Local, NaiveDate};
use vitalog_core::{Config, QuestionBank, QuizDifficulty, SupplementCatalog};

/// Catalog from the configured path, bundled data otherwise.
pub fn load_catalog(config: &Config) -> Result<SupplementCatalog, Box<dyn std::error::Error>> {
    match &config.catalog_path {
        Some(path) => Ok(SupplementCatalog::load(path)?),
        None => Ok(SupplementCatalog::builtin()),
    }
}

/// Question bank from the configured path, bundled data otherwise.
pub fn load_question_bank(config: &Config) -> Result<QuestionBank, Box<dyn std::error::Error>> {
    match &config.questions_path {
        Some(path) => Ok(QuestionBank::load(path)?),
        None => Ok(QuestionBank::builtin()),
    }
}

/// Parse a `yyyy-MM-dd` argument, defaulting to the local calendar day.
pub fn parse_date_arg(date: Option<String>) -> Result<NaiveDate, Box<dyn std::error::Error>> {
    match date {
        Some(s) => Ok(NaiveDate::parse_from_str(&s, "%Y-%m-%d")
            .map_err(|_| format!("invalid date (expected yyyy-MM-dd): {s}"))?),
        None => Ok(Local::now().date_naive()),
    }
}

/// Parse an optional difficulty argument.
pub fn parse_difficulty_arg(
    difficulty: Option<String>,
) -> Result<Option<QuizDifficulty>, Box<dyn std::error::Error>> {
    match difficulty {
        Some(s) => Ok(Some(
            QuizDifficulty::parse(&s).ok_or(format!("unknown difficulty: {s}"))?,
        )),
        None => Ok(None),
    }
}
