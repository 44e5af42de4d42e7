//! Persistent rewards entities.
//!
//! Entities are owned by the entity store; relations are by foreign-key
//! string (supplement id, user id), never by shared reference.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::date_key::{daily_record_id, favorite_id};
use crate::quiz::QuizDifficulty;

/// The singleton user id used for offline mode.
pub const LOCAL_USER: &str = "local";

/// One supplement-intake record per supplement per calendar day.
///
/// Identity is the composite natural key `{supplement_id}_{yyyy-MM-dd}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DailyRecord {
    pub id: String,
    pub user_id: Option<String>,
    pub supplement_id: String,
    pub supplement_name: String,
    pub date: NaiveDate,
    pub is_taken: bool,
    pub is_favorite: bool,
    pub coins_awarded: i64,
    pub taken_at: Option<DateTime<Utc>>,
}

impl DailyRecord {
    pub fn new(
        supplement_id: impl Into<String>,
        supplement_name: impl Into<String>,
        date: NaiveDate,
    ) -> Self {
        let supplement_id = supplement_id.into();
        Self {
            id: daily_record_id(&supplement_id, date),
            user_id: None,
            supplement_id,
            supplement_name: supplement_name.into(),
            date,
            is_taken: false,
            is_favorite: true,
            coins_awarded: 0,
            taken_at: None,
        }
    }
}

/// Append-only log entry for one completed quiz attempt.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuizHistoryRecord {
    pub id: String,
    pub user_id: Option<String>,
    pub attempt_date: DateTime<Utc>,
    pub total_questions: i64,
    pub correct_count: i64,
    pub incorrect_count: i64,
    pub coins_earned: i64,
    pub difficulty: Option<QuizDifficulty>,
}

impl QuizHistoryRecord {
    pub fn new(
        total_questions: i64,
        correct_count: i64,
        incorrect_count: i64,
        coins_earned: i64,
        difficulty: Option<QuizDifficulty>,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            user_id: None,
            attempt_date: Utc::now(),
            total_questions,
            correct_count,
            incorrect_count,
            coins_earned,
            difficulty,
        }
    }

    /// Attribute the attempt to a user.
    pub fn with_user(mut self, user_id: impl Into<String>) -> Self {
        self.user_id = Some(user_id.into());
        self
    }

    pub fn percentage(&self) -> f64 {
        if self.total_questions == 0 {
            return 0.0;
        }
        self.correct_count as f64 / self.total_questions as f64 * 100.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionKind {
    SupplementTaken,
    QuizCompleted,
    StreakBonus,
    Achievement,
    /// Debit entry; coins are negative. No spend surface exists yet, the
    /// ledger accepts debits so one can be added without schema changes.
    Spend,
}

impl TransactionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionKind::SupplementTaken => "supplement_taken",
            TransactionKind::QuizCompleted => "quiz_completed",
            TransactionKind::StreakBonus => "streak_bonus",
            TransactionKind::Achievement => "achievement",
            TransactionKind::Spend => "spend",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "supplement_taken" => Some(TransactionKind::SupplementTaken),
            "quiz_completed" => Some(TransactionKind::QuizCompleted),
            "streak_bonus" => Some(TransactionKind::StreakBonus),
            "achievement" => Some(TransactionKind::Achievement),
            "spend" => Some(TransactionKind::Spend),
            _ => None,
        }
    }

    /// Whether entries of this kind count toward `total_coins_earned`.
    pub fn is_earn(&self) -> bool {
        !matches!(self, TransactionKind::Spend)
    }
}

/// Append-only coin ledger entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RewardTransaction {
    pub id: String,
    pub user_id: Option<String>,
    pub kind: TransactionKind,
    /// Signed; positive for earns, negative for debits.
    pub coins: i64,
    pub title: String,
    pub timestamp: DateTime<Utc>,
    pub related_id: Option<String>,
}

impl RewardTransaction {
    pub fn new(
        kind: TransactionKind,
        coins: i64,
        title: impl Into<String>,
        related_id: Option<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            user_id: None,
            kind,
            coins,
            title: title.into(),
            timestamp: Utc::now(),
            related_id,
        }
    }

    /// Attribute the entry to a user.
    pub fn with_user(mut self, user_id: impl Into<String>) -> Self {
        self.user_id = Some(user_id.into());
        self
    }
}

/// Running aggregate per user, keyed by user id (`"local"` offline).
///
/// Invariant: `total_coins_earned` equals the sum of all earn-kind
/// transaction coins. Achievement flags are monotonic: once set they are
/// never cleared.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RewardsSummary {
    pub id: String,
    pub user_id: String,
    pub total_coins_earned: i64,
    pub total_coins_spent: i64,
    pub current_streak: i64,
    pub longest_streak: i64,
    pub last_activity_date: Option<NaiveDate>,
    pub supplements_taken: i64,
    pub quizzes_completed: i64,
    // Achievement flags
    pub has_first_step_achievement: bool,
    pub has_week_warrior_achievement: bool,
    pub has_quiz_master_achievement: bool,
    pub has_supplement_pro_achievement: bool,
    pub has_30_day_streak_achievement: bool,
    pub has_health_guru_achievement: bool,
}

impl RewardsSummary {
    pub fn new(user_id: impl Into<String>) -> Self {
        let user_id = user_id.into();
        Self {
            id: user_id.clone(),
            user_id,
            total_coins_earned: 0,
            total_coins_spent: 0,
            current_streak: 0,
            longest_streak: 0,
            last_activity_date: None,
            supplements_taken: 0,
            quizzes_completed: 0,
            has_first_step_achievement: false,
            has_week_warrior_achievement: false,
            has_quiz_master_achievement: false,
            has_supplement_pro_achievement: false,
            has_30_day_streak_achievement: false,
            has_health_guru_achievement: false,
        }
    }

    pub fn available_coins(&self) -> i64 {
        self.total_coins_earned - self.total_coins_spent
    }
}

/// Presence of a row means the supplement is favorited.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FavoriteSupplement {
    pub id: String,
    pub supplement_id: String,
    pub added_at: DateTime<Utc>,
    /// "morning", "midday", or "evening".
    pub timing: String,
}

impl FavoriteSupplement {
    pub fn new(user_id: &str, supplement_id: impl Into<String>) -> Self {
        let supplement_id = supplement_id.into();
        Self {
            id: favorite_id(user_id, &supplement_id),
            supplement_id,
            added_at: Utc::now(),
            timing: "morning".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn daily_record_key_is_composite() {
        let date = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();
        let record = DailyRecord::new("zinc", "Zinc", date);
        assert_eq!(record.id, "zinc_2024-05-01");
        assert!(!record.is_taken);
        assert_eq!(record.coins_awarded, 0);
    }

    #[test]
    fn transaction_kind_roundtrip() {
        for kind in [
            TransactionKind::SupplementTaken,
            TransactionKind::QuizCompleted,
            TransactionKind::StreakBonus,
            TransactionKind::Achievement,
            TransactionKind::Spend,
        ] {
            assert_eq!(TransactionKind::parse(kind.as_str()), Some(kind));
        }
        assert_eq!(TransactionKind::parse("bogus"), None);
    }

    #[test]
    fn available_coins_subtracts_spent() {
        let mut summary = RewardsSummary::new(LOCAL_USER);
        summary.total_coins_earned = 100;
        summary.total_coins_spent = 30;
        assert_eq!(summary.available_coins(), 70);
    }

    #[test]
    fn quiz_history_percentage() {
        let record = QuizHistoryRecord::new(5, 3, 2, 30, None);
        assert!((record.percentage() - 60.0).abs() < f64::EPSILON);
    }
}
