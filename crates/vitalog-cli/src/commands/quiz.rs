//! Quiz session commands.

use std::io::{BufRead, Write};

use clap::Subcommand;
use vitalog_core::storage::{Config, Database};
use vitalog_core::{QuizSession, RewardsLedger};

use super::{load_question_bank, parse_difficulty_arg};

#[derive(Subcommand)]
pub enum QuizAction {
    /// Run an interactive quiz session
    Run {
        /// Difficulty filter: easy, medium, or hard
        #[arg(long)]
        difficulty: Option<String>,
    },
    /// Past quiz attempts
    History {
        /// Maximum rows to show
        #[arg(long, default_value = "10")]
        limit: usize,
    },
    /// List the question pool
    Questions,
}

pub fn run(action: QuizAction) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load_or_default();

    match action {
        QuizAction::Run { difficulty } => {
            let difficulty =
                parse_difficulty_arg(difficulty.or(config.quiz.default_difficulty.clone()))?;
            let bank = load_question_bank(&config)?;
            if bank.is_empty() {
                return Err("question pool is empty".into());
            }

            let mut session = QuizSession::new();
            session.load_questions(&bank, difficulty);

            let stdin = std::io::stdin();
            let mut lines = stdin.lock().lines();

            loop {
                let question = match session.current_question() {
                    Some(q) => q.clone(),
                    None => break,
                };
                println!(
                    "\nQuestion {}/{}: {}",
                    session.index() + 1,
                    session.question_count(),
                    question.question
                );
                for (i, option) in question.options.iter().enumerate() {
                    println!("  {}. {option}", i + 1);
                }
                print!("> ");
                std::io::stdout().flush()?;

                let line = match lines.next() {
                    Some(line) => line?,
                    None => {
                        println!("\nSession abandoned.");
                        return Ok(());
                    }
                };
                let choice: usize = match line.trim().parse() {
                    Ok(n) if n >= 1 && n <= question.options.len() => n,
                    _ => {
                        println!("Enter a number between 1 and {}.", question.options.len());
                        continue;
                    }
                };

                session.select_answer(&question.options[choice - 1])?;
                if session.reveal_answer()? {
                    println!("Correct!");
                } else {
                    println!("Incorrect. Answer: {}", question.correct_answer);
                }
                if let Some(explanation) = &question.explanation {
                    println!("{explanation}");
                }

                if let Some(result) = session.next()? {
                    println!(
                        "\n{} {}/{} correct, +{} coins",
                        result.performance_level(),
                        result.correct,
                        result.total(),
                        result.coins_earned
                    );
                    let mut ledger = RewardsLedger::new(Database::open()?);
                    ledger.save_completed_quiz(&result, difficulty)?;
                    break;
                }
            }
        }
        QuizAction::History { limit } => {
            let ledger = RewardsLedger::new(Database::open()?);
            let history = ledger.quiz_history(limit)?;
            println!("{}", serde_json::to_string_pretty(&history)?);
        }
        QuizAction::Questions => {
            let bank = load_question_bank(&config)?;
            println!("{}", serde_json::to_string_pretty(bank.questions())?);
        }
    }
    Ok(())
}
