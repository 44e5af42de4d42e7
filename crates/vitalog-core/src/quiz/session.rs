//! Quiz session state machine.
//!
//! ## State Transitions
//!
//! ```text
//! Idle -> InProgress -> Completed
//! ```
//!
//! The session scores answers on reveal and emits a [`QuizResult`] exactly
//! once, when `next()` advances past the last question. The caller passes
//! that result to the rewards ledger; the session itself never touches
//! storage.

use chrono::{DateTime, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::{QuestionBank, QuizDifficulty, QuizQuestion};
use crate::error::QuizError;

/// Questions drawn per session.
pub const QUESTIONS_PER_SESSION: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuizPhase {
    Idle,
    InProgress,
    Completed,
}

/// Outcome of one completed quiz session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuizResult {
    pub correct: i64,
    pub incorrect: i64,
    pub coins_earned: i64,
    pub date: DateTime<Utc>,
}

impl QuizResult {
    pub fn total(&self) -> i64 {
        self.correct + self.incorrect
    }

    pub fn percentage(&self) -> f64 {
        let total = self.total();
        if total == 0 {
            return 0.0;
        }
        self.correct as f64 / total as f64 * 100.0
    }

    pub fn performance_level(&self) -> &'static str {
        let pct = self.percentage();
        if pct >= 90.0 {
            "Excellent!"
        } else if pct >= 80.0 {
            "Great Job!"
        } else if pct >= 70.0 {
            "Good Work!"
        } else if pct >= 60.0 {
            "Not Bad!"
        } else if pct >= 50.0 {
            "Keep Trying!"
        } else {
            "Need Practice!"
        }
    }
}

/// In-memory question sequencing, answer reveal, and scoring.
///
/// Answer history for visited questions is not retained: going back and
/// revisiting a question loses its reveal state.
#[derive(Debug, Clone)]
pub struct QuizSession {
    questions: Vec<QuizQuestion>,
    phase: QuizPhase,
    index: usize,
    selected_answer: Option<String>,
    revealed: bool,
    correct_count: i64,
    incorrect_count: i64,
    coins_earned: i64,
}

impl QuizSession {
    pub fn new() -> Self {
        Self {
            questions: Vec::new(),
            phase: QuizPhase::Idle,
            index: 0,
            selected_answer: None,
            revealed: false,
            correct_count: 0,
            incorrect_count: 0,
            coins_earned: 0,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn phase(&self) -> QuizPhase {
        self.phase
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn question_count(&self) -> usize {
        self.questions.len()
    }

    pub fn current_question(&self) -> Option<&QuizQuestion> {
        if self.phase != QuizPhase::InProgress {
            return None;
        }
        self.questions.get(self.index)
    }

    pub fn selected_answer(&self) -> Option<&str> {
        self.selected_answer.as_deref()
    }

    pub fn is_revealed(&self) -> bool {
        self.revealed
    }

    pub fn correct_count(&self) -> i64 {
        self.correct_count
    }

    pub fn incorrect_count(&self) -> i64 {
        self.incorrect_count
    }

    pub fn coins_earned(&self) -> i64 {
        self.coins_earned
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Draw up to [`QUESTIONS_PER_SESSION`] questions in randomized order
    /// and start a fresh session.
    ///
    /// Stays `Idle` when the bank is empty.
    pub fn load_questions(&mut self, bank: &QuestionBank, difficulty: Option<QuizDifficulty>) {
        self.load_questions_with(bank, difficulty, &mut rand::thread_rng());
    }

    /// [`Self::load_questions`] with an explicit randomness source.
    pub fn load_questions_with<R: Rng>(
        &mut self,
        bank: &QuestionBank,
        difficulty: Option<QuizDifficulty>,
        rng: &mut R,
    ) {
        self.questions = bank.draw(difficulty, QUESTIONS_PER_SESSION, rng);
        self.index = 0;
        self.selected_answer = None;
        self.revealed = false;
        self.correct_count = 0;
        self.incorrect_count = 0;
        self.coins_earned = 0;
        self.phase = if self.questions.is_empty() {
            QuizPhase::Idle
        } else {
            QuizPhase::InProgress
        };
    }

    /// Select an answer for the current question. Does not score.
    pub fn select_answer(&mut self, option: &str) -> Result<(), QuizError> {
        self.require_in_progress()?;
        if self.revealed {
            return Err(QuizError::AlreadyRevealed);
        }
        self.selected_answer = Some(option.to_string());
        Ok(())
    }

    /// Reveal the correct answer and score the selection.
    ///
    /// Returns whether the selection was correct. Calling again while
    /// already revealed is a no-op that never scores twice.
    pub fn reveal_answer(&mut self) -> Result<bool, QuizError> {
        self.require_in_progress()?;
        let selected = self
            .selected_answer
            .clone()
            .ok_or(QuizError::NoSelection)?;
        let question = self
            .questions
            .get(self.index)
            .ok_or(QuizError::NotInProgress)?;
        let correct = selected == question.correct_answer;
        if self.revealed {
            return Ok(correct);
        }
        self.revealed = true;
        if correct {
            self.correct_count += 1;
            self.coins_earned += question.difficulty.coins_reward();
        } else {
            self.incorrect_count += 1;
        }
        Ok(correct)
    }

    /// Advance to the next question, or complete the session.
    ///
    /// Returns `Some(QuizResult)` exactly once, on the transition to
    /// `Completed`. Requires the current answer to be revealed.
    pub fn next(&mut self) -> Result<Option<QuizResult>, QuizError> {
        self.require_in_progress()?;
        if !self.revealed {
            return Err(QuizError::NotRevealed);
        }
        if self.index + 1 < self.questions.len() {
            self.index += 1;
            self.selected_answer = None;
            self.revealed = false;
            Ok(None)
        } else {
            self.phase = QuizPhase::Completed;
            Ok(Some(QuizResult {
                correct: self.correct_count,
                incorrect: self.incorrect_count,
                coins_earned: self.coins_earned,
                date: Utc::now(),
            }))
        }
    }

    /// Go back one question, losing the current selection and reveal.
    pub fn previous(&mut self) -> Result<(), QuizError> {
        self.require_in_progress()?;
        if self.index == 0 {
            return Err(QuizError::AtFirstQuestion);
        }
        self.index -= 1;
        self.selected_answer = None;
        self.revealed = false;
        Ok(())
    }

    /// Return to `Idle`, clearing all questions and counters.
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    fn require_in_progress(&self) -> Result<(), QuizError> {
        match self.phase {
            QuizPhase::InProgress => Ok(()),
            QuizPhase::Completed => Err(QuizError::SessionCompleted),
            QuizPhase::Idle => Err(QuizError::NotInProgress),
        }
    }
}

impl Default for QuizSession {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn question(text: &str, correct: &str, difficulty: QuizDifficulty) -> QuizQuestion {
        QuizQuestion {
            id: text.to_string(),
            question: text.to_string(),
            options: vec!["a".into(), "b".into(), correct.to_string()],
            correct_answer: correct.to_string(),
            explanation: None,
            category: None,
            difficulty,
        }
    }

    fn session_with(questions: Vec<QuizQuestion>) -> QuizSession {
        let bank = QuestionBank { questions };
        let mut session = QuizSession::new();
        session.load_questions(&bank, None);
        session
    }

    fn medium_session(n: usize) -> QuizSession {
        session_with(
            (0..n)
                .map(|i| question(&format!("q{i}"), "right", QuizDifficulty::Medium))
                .collect(),
        )
    }

    fn answer_current(session: &mut QuizSession, correctly: bool) {
        let option = if correctly { "right" } else { "a" };
        session.select_answer(option).unwrap();
        session.reveal_answer().unwrap();
    }

    #[test]
    fn empty_bank_stays_idle() {
        let session = session_with(Vec::new());
        assert_eq!(session.phase(), QuizPhase::Idle);
        assert!(session.current_question().is_none());
    }

    #[test]
    fn select_requires_unrevealed() {
        let mut session = medium_session(2);
        answer_current(&mut session, true);
        assert_eq!(
            session.select_answer("b"),
            Err(QuizError::AlreadyRevealed)
        );
    }

    #[test]
    fn reveal_requires_selection() {
        let mut session = medium_session(2);
        assert_eq!(session.reveal_answer(), Err(QuizError::NoSelection));
    }

    #[test]
    fn repeated_reveal_never_double_scores() {
        let mut session = medium_session(1);
        session.select_answer("right").unwrap();
        assert!(session.reveal_answer().unwrap());
        assert!(session.reveal_answer().unwrap());
        assert_eq!(session.correct_count(), 1);
        assert_eq!(session.coins_earned(), 10);
    }

    #[test]
    fn next_requires_reveal() {
        let mut session = medium_session(2);
        session.select_answer("right").unwrap();
        assert_eq!(session.next(), Err(QuizError::NotRevealed));
    }

    #[test]
    fn scoring_three_correct_of_five_medium() {
        let mut session = medium_session(5);
        let mut result = None;
        for i in 0..5 {
            answer_current(&mut session, i < 3);
            result = session.next().unwrap();
        }
        let result = result.expect("session should complete");
        assert_eq!(result.correct, 3);
        assert_eq!(result.incorrect, 2);
        assert_eq!(result.coins_earned, 30);
        assert_eq!(session.phase(), QuizPhase::Completed);
    }

    #[test]
    fn result_emitted_exactly_once() {
        let mut session = medium_session(1);
        answer_current(&mut session, true);
        assert!(session.next().unwrap().is_some());
        assert_eq!(session.next(), Err(QuizError::SessionCompleted));
    }

    #[test]
    fn previous_loses_reveal_state() {
        let mut session = medium_session(3);
        answer_current(&mut session, true);
        session.next().unwrap();
        answer_current(&mut session, true);
        session.previous().unwrap();
        assert_eq!(session.index(), 0);
        assert!(!session.is_revealed());
        assert!(session.selected_answer().is_none());
        // Scores from the revisited question stay counted.
        assert_eq!(session.correct_count(), 2);
    }

    #[test]
    fn previous_at_first_question_rejected() {
        let mut session = medium_session(2);
        assert_eq!(session.previous(), Err(QuizError::AtFirstQuestion));
    }

    #[test]
    fn reset_returns_to_idle() {
        let mut session = medium_session(2);
        answer_current(&mut session, true);
        session.reset();
        assert_eq!(session.phase(), QuizPhase::Idle);
        assert_eq!(session.coins_earned(), 0);
    }

    #[test]
    fn difficulty_reward_applied_per_question() {
        let mut session = session_with(vec![
            question("q0", "right", QuizDifficulty::Easy),
            question("q1", "right", QuizDifficulty::Hard),
        ]);
        // Draw order is shuffled; both answers correct either way.
        answer_current(&mut session, true);
        session.next().unwrap();
        answer_current(&mut session, true);
        let result = session.next().unwrap().unwrap();
        assert_eq!(result.coins_earned, 20);
    }

    #[test]
    fn performance_levels() {
        let result = QuizResult {
            correct: 5,
            incorrect: 0,
            coins_earned: 50,
            date: Utc::now(),
        };
        assert_eq!(result.performance_level(), "Excellent!");
        let result = QuizResult {
            correct: 0,
            incorrect: 5,
            coins_earned: 0,
            date: Utc::now(),
        };
        assert_eq!(result.performance_level(), "Need Practice!");
    }
}
