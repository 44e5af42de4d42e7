//! Rewards ledger: coin awards, append-only transactions, running summary.
//!
//! The ledger owns the entity store and is the only writer for reward
//! state. Mutation methods return the awarded coins or the updated
//! summary; the presentation layer polls rather than observing. Expected
//! business outcomes (re-taking a supplement on the same day) return
//! sentinel values instead of errors.

pub mod achievements;
pub mod models;
pub mod streak;

use chrono::{NaiveDate, Utc};

pub use models::{
    DailyRecord, FavoriteSupplement, QuizHistoryRecord, RewardTransaction, RewardsSummary,
    TransactionKind, LOCAL_USER,
};
pub use streak::{StreakBonus, SEVEN_DAY_BONUS, THIRTY_DAY_BONUS};

use crate::error::{LedgerError, StorageError};
use crate::quiz::{QuizDifficulty, QuizResult};
use crate::storage::Database;

/// Coins awarded for taking a supplement.
pub const SUPPLEMENT_TAKEN_COINS: i64 = 5;

/// Coin ledger and gamification service.
///
/// Holds an owned [`Database`]; construct one per logical actor and pass
/// it explicitly -- there is no global instance.
pub struct RewardsLedger {
    db: Database,
    user_id: String,
}

impl RewardsLedger {
    /// Ledger for the offline singleton user.
    pub fn new(db: Database) -> Self {
        Self::for_user(db, LOCAL_USER)
    }

    pub fn for_user(db: Database, user_id: impl Into<String>) -> Self {
        Self {
            db,
            user_id: user_id.into(),
        }
    }

    pub fn database(&self) -> &Database {
        &self.db
    }

    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    // ── Supplement intake ────────────────────────────────────────────

    /// Mark a supplement taken on a calendar day.
    ///
    /// Idempotent per (supplement, day): the first call awards
    /// [`SUPPLEMENT_TAKEN_COINS`], appends the transaction, updates the
    /// streak and achievements, and returns the coins; repeat calls
    /// return 0 without touching any state.
    ///
    /// # Errors
    /// Returns an error if any persistence write fails.
    pub fn mark_supplement_taken(
        &mut self,
        supplement_id: &str,
        supplement_name: &str,
        date: NaiveDate,
    ) -> Result<i64, StorageError> {
        let user_id = self.user_id.clone();
        self.db.with_tx(|db| {
            let mut record =
                db.get_or_create_daily_record(supplement_id, supplement_name, date)?;

            if record.is_taken {
                return Ok(0);
            }

            record.user_id = Some(user_id.clone());
            record.is_taken = true;
            record.taken_at = Some(Utc::now());
            record.coins_awarded = SUPPLEMENT_TAKEN_COINS;
            db.save_daily_record(&record)?;

            db.insert_transaction(
                &RewardTransaction::new(
                    TransactionKind::SupplementTaken,
                    SUPPLEMENT_TAKEN_COINS,
                    format!("Took {supplement_name}"),
                    Some(supplement_id.to_string()),
                )
                .with_user(user_id.as_str()),
            )?;

            let mut summary = db.get_or_create_summary(&user_id)?;
            summary.total_coins_earned += SUPPLEMENT_TAKEN_COINS;
            summary.supplements_taken += 1;

            if let Some(bonus) = streak::update_streak(&mut summary, date) {
                db.insert_transaction(
                    &RewardTransaction::new(
                        TransactionKind::StreakBonus,
                        bonus.coins,
                        bonus.title,
                        None,
                    )
                    .with_user(user_id.as_str()),
                )?;
                summary.total_coins_earned += bonus.coins;
            }

            achievements::check_achievements(&mut summary);
            db.save_summary(&summary)?;

            Ok(SUPPLEMENT_TAKEN_COINS)
        })
    }

    // ── Quiz results ─────────────────────────────────────────────────

    /// Record a completed quiz attempt.
    ///
    /// Append-only: every call creates a new history row and transaction.
    /// Quiz completion never affects the streak.
    ///
    /// # Errors
    /// Returns an error if any persistence write fails.
    pub fn save_quiz_result(
        &mut self,
        total_questions: i64,
        correct_count: i64,
        incorrect_count: i64,
        coins_earned: i64,
        difficulty: Option<QuizDifficulty>,
    ) -> Result<(), StorageError> {
        let user_id = self.user_id.clone();
        self.db.with_tx(|db| {
            db.insert_quiz_history(
                &QuizHistoryRecord::new(
                    total_questions,
                    correct_count,
                    incorrect_count,
                    coins_earned,
                    difficulty,
                )
                .with_user(user_id.as_str()),
            )?;

            db.insert_transaction(
                &RewardTransaction::new(
                    TransactionKind::QuizCompleted,
                    coins_earned,
                    format!("Quiz: {correct_count}/{total_questions} correct"),
                    None,
                )
                .with_user(user_id.as_str()),
            )?;

            let mut summary = db.get_or_create_summary(&user_id)?;
            summary.total_coins_earned += coins_earned;
            summary.quizzes_completed += 1;
            achievements::check_achievements(&mut summary);
            db.save_summary(&summary)?;

            Ok(())
        })
    }

    /// Record a [`QuizResult`] emitted by the session state machine.
    ///
    /// # Errors
    /// Returns an error if any persistence write fails.
    pub fn save_completed_quiz(
        &mut self,
        result: &QuizResult,
        difficulty: Option<QuizDifficulty>,
    ) -> Result<(), StorageError> {
        self.save_quiz_result(
            result.total(),
            result.correct,
            result.incorrect,
            result.coins_earned,
            difficulty,
        )
    }

    // ── Coin debits ──────────────────────────────────────────────────

    /// Spend coins from the available balance.
    ///
    /// Appends a negative `spend` transaction and bumps
    /// `total_coins_spent`. Rejected when it would overdraw.
    ///
    /// # Errors
    /// Returns an error on overdraft, a non-positive amount, or a failed
    /// persistence write.
    pub fn spend_coins(&mut self, coins: i64, title: &str) -> Result<RewardsSummary, LedgerError> {
        if coins <= 0 {
            return Err(LedgerError::InvalidAmount(coins));
        }
        let user_id = self.user_id.clone();
        self.db.with_tx(|db| {
            let mut summary = db.get_or_create_summary(&user_id)?;
            let available = summary.available_coins();
            if coins > available {
                return Err(LedgerError::InsufficientCoins {
                    requested: coins,
                    available,
                });
            }
            db.insert_transaction(
                &RewardTransaction::new(TransactionKind::Spend, -coins, title, None)
                    .with_user(user_id.as_str()),
            )?;
            summary.total_coins_spent += coins;
            db.save_summary(&summary)?;
            Ok(summary)
        })
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn summary(&self) -> Result<RewardsSummary, StorageError> {
        self.db.get_or_create_summary(&self.user_id)
    }

    pub fn recent_transactions(
        &self,
        limit: usize,
    ) -> Result<Vec<RewardTransaction>, StorageError> {
        self.db.transactions(&self.user_id, limit)
    }

    pub fn quiz_history(&self, limit: usize) -> Result<Vec<QuizHistoryRecord>, StorageError> {
        self.db.quiz_history(&self.user_id, limit)
    }

    /// (taken, total) record counts for a calendar day.
    pub fn day_stats(&self, date: NaiveDate) -> Result<(usize, usize), StorageError> {
        let records = self.db.daily_records_for(date)?;
        let taken = records.iter().filter(|r| r.is_taken).count();
        Ok((taken, records.len()))
    }

    /// Net coins from all transactions within a calendar day.
    pub fn earned_on(&self, date: NaiveDate) -> Result<i64, StorageError> {
        self.db.coins_on_day(&self.user_id, date)
    }

    pub fn toggle_favorite(&mut self, supplement_id: &str) -> Result<bool, StorageError> {
        self.db.toggle_favorite(&self.user_id, supplement_id)
    }

    pub fn is_favorite(&self, supplement_id: &str) -> Result<bool, StorageError> {
        self.db.is_favorite(&self.user_id, supplement_id)
    }

    pub fn favorites(&self) -> Result<Vec<FavoriteSupplement>, StorageError> {
        self.db.favorites(&self.user_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ledger() -> RewardsLedger {
        RewardsLedger::new(Database::open_memory().unwrap())
    }

    fn day(n: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, n).unwrap()
    }

    #[test]
    fn first_take_awards_five_repeat_awards_zero() {
        let mut ledger = ledger();
        assert_eq!(
            ledger.mark_supplement_taken("zinc", "Zinc", day(1)).unwrap(),
            5
        );
        assert_eq!(
            ledger.mark_supplement_taken("zinc", "Zinc", day(1)).unwrap(),
            0
        );
        let summary = ledger.summary().unwrap();
        assert_eq!(summary.supplements_taken, 1);
        assert_eq!(summary.total_coins_earned, 5);
    }

    #[test]
    fn take_appends_titled_transaction() {
        let mut ledger = ledger();
        ledger
            .mark_supplement_taken("vitamin_c", "Vitamin C", day(1))
            .unwrap();
        let txs = ledger.recent_transactions(10).unwrap();
        assert_eq!(txs.len(), 1);
        assert_eq!(txs[0].kind, TransactionKind::SupplementTaken);
        assert_eq!(txs[0].title, "Took Vitamin C");
        assert_eq!(txs[0].related_id.as_deref(), Some("vitamin_c"));
    }

    #[test]
    fn quiz_result_is_append_only() {
        let mut ledger = ledger();
        ledger
            .save_quiz_result(5, 3, 2, 30, Some(QuizDifficulty::Medium))
            .unwrap();
        ledger
            .save_quiz_result(5, 3, 2, 30, Some(QuizDifficulty::Medium))
            .unwrap();
        // Duplicate completions create duplicate rows by design.
        assert_eq!(ledger.quiz_history(10).unwrap().len(), 2);
        let summary = ledger.summary().unwrap();
        assert_eq!(summary.quizzes_completed, 2);
        assert_eq!(summary.total_coins_earned, 60);
    }

    #[test]
    fn quiz_does_not_touch_streak() {
        let mut ledger = ledger();
        ledger.mark_supplement_taken("zinc", "Zinc", day(1)).unwrap();
        ledger.save_quiz_result(5, 5, 0, 50, None).unwrap();
        let summary = ledger.summary().unwrap();
        assert_eq!(summary.current_streak, 1);
        assert_eq!(summary.last_activity_date, Some(day(1)));
    }

    #[test]
    fn spend_rejects_overdraft() {
        let mut ledger = ledger();
        ledger.mark_supplement_taken("zinc", "Zinc", day(1)).unwrap();
        let err = ledger.spend_coins(10, "Sticker pack").unwrap_err();
        assert!(matches!(
            err,
            LedgerError::InsufficientCoins {
                requested: 10,
                available: 5
            }
        ));
    }

    #[test]
    fn spend_within_balance_updates_summary_and_ledger() {
        let mut ledger = ledger();
        ledger.mark_supplement_taken("zinc", "Zinc", day(1)).unwrap();
        let summary = ledger.spend_coins(3, "Sticker pack").unwrap();
        assert_eq!(summary.total_coins_spent, 3);
        assert_eq!(summary.available_coins(), 2);

        let txs = ledger.recent_transactions(10).unwrap();
        let spend = txs.iter().find(|t| t.kind == TransactionKind::Spend).unwrap();
        assert_eq!(spend.coins, -3);
        // Earn total stays reconciled after the debit.
        assert_eq!(ledger.database().total_earned(LOCAL_USER).unwrap(), 5);
    }

    #[test]
    fn spend_rejects_non_positive_amount() {
        let mut ledger = ledger();
        assert!(matches!(
            ledger.spend_coins(0, "nothing").unwrap_err(),
            LedgerError::InvalidAmount(0)
        ));
    }

    #[test]
    fn day_stats_counts_taken() {
        let mut ledger = ledger();
        ledger.mark_supplement_taken("zinc", "Zinc", day(1)).unwrap();
        ledger
            .database()
            .get_or_create_daily_record("iron", "Iron", day(1))
            .unwrap();
        assert_eq!(ledger.day_stats(day(1)).unwrap(), (1, 2));
    }
}
