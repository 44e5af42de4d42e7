//! Quiz question bank and session state machine.
//!
//! Questions load from a JSON file (bundled sample set as fallback). The
//! session state machine lives in [`session`].

pub mod session;

use std::path::Path;

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::CoreError;

pub use session::{QuizPhase, QuizResult, QuizSession, QUESTIONS_PER_SESSION};

const BUILTIN_QUESTIONS: &str = include_str!("../../data/questions.json");

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum QuizDifficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl QuizDifficulty {
    /// Coins awarded for a correct answer at this difficulty.
    pub fn coins_reward(&self) -> i64 {
        match self {
            QuizDifficulty::Easy => 5,
            QuizDifficulty::Medium => 10,
            QuizDifficulty::Hard => 15,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            QuizDifficulty::Easy => "Easy",
            QuizDifficulty::Medium => "Medium",
            QuizDifficulty::Hard => "Hard",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "Easy" | "easy" => Some(QuizDifficulty::Easy),
            "Medium" | "medium" => Some(QuizDifficulty::Medium),
            "Hard" | "hard" => Some(QuizDifficulty::Hard),
            _ => None,
        }
    }
}

/// A single quiz question with its answer key.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizQuestion {
    #[serde(default = "new_question_id")]
    pub id: String,
    pub question: String,
    pub options: Vec<String>,
    pub correct_answer: String,
    #[serde(default)]
    pub explanation: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub difficulty: QuizDifficulty,
}

fn new_question_id() -> String {
    Uuid::new_v4().to_string()
}

/// Bundled or file-backed question pool.
#[derive(Debug, Clone)]
pub struct QuestionBank {
    questions: Vec<QuizQuestion>,
}

impl QuestionBank {
    /// Bundled sample questions.
    pub fn builtin() -> Self {
        let questions = serde_json::from_str(BUILTIN_QUESTIONS).unwrap_or_default();
        Self { questions }
    }

    /// Load questions from a JSON file.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self, CoreError> {
        let content = std::fs::read_to_string(path)?;
        let questions: Vec<QuizQuestion> = serde_json::from_str(&content)?;
        Ok(Self { questions })
    }

    pub fn questions(&self) -> &[QuizQuestion] {
        &self.questions
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    /// Draw up to `limit` questions in randomized order.
    ///
    /// Filters by difficulty when the filter matches at least one question,
    /// otherwise draws from the whole pool.
    pub fn draw<R: Rng>(
        &self,
        difficulty: Option<QuizDifficulty>,
        limit: usize,
        rng: &mut R,
    ) -> Vec<QuizQuestion> {
        let mut pool: Vec<QuizQuestion> = match difficulty {
            Some(level) => {
                let filtered: Vec<QuizQuestion> = self
                    .questions
                    .iter()
                    .filter(|q| q.difficulty == level)
                    .cloned()
                    .collect();
                if filtered.is_empty() {
                    self.questions.clone()
                } else {
                    filtered
                }
            }
            None => self.questions.clone(),
        };
        pool.shuffle(rng);
        pool.truncate(limit);
        pool
    }
}
