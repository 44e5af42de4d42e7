//! # Vitalog Core Library
//!
//! This library provides the core business logic for Vitalog, a personal
//! supplement tracker with gamified rewards. It implements a CLI-first
//! philosophy where all operations are available via a standalone CLI
//! binary, with any GUI being a thin layer over the same core library.
//!
//! ## Architecture
//!
//! - **Rewards Ledger**: coin awards, an append-only transaction log, and
//!   a running per-user summary that must reconcile with the log
//! - **Streak Engine**: consecutive-day activity streaks with one-time
//!   milestone bonuses
//! - **Achievement Evaluator**: monotonic one-way unlock flags
//! - **Quiz Session**: in-memory question sequencing, answer reveal, and
//!   scoring state machine
//! - **Storage**: SQLite entity store and TOML-based configuration
//!
//! ## Key Components
//!
//! - [`RewardsLedger`]: coin ledger and gamification service
//! - [`QuizSession`]: quiz state machine
//! - [`Database`]: entity persistence
//! - [`Config`]: application configuration management

pub mod auth;
pub mod date_key;
pub mod error;
pub mod quiz;
pub mod reminders;
pub mod rewards;
pub mod storage;
pub mod supplement;
pub mod user;

pub use auth::{AuthManager, AuthUser};
pub use error::{AuthError, ConfigError, CoreError, LedgerError, QuizError, StorageError};
pub use quiz::{
    QuestionBank, QuizDifficulty, QuizPhase, QuizQuestion, QuizResult, QuizSession,
    QUESTIONS_PER_SESSION,
};
pub use rewards::{
    DailyRecord, FavoriteSupplement, QuizHistoryRecord, RewardTransaction, RewardsLedger,
    RewardsSummary, TransactionKind, LOCAL_USER, SUPPLEMENT_TAKEN_COINS,
};
pub use storage::{Config, Database};
pub use supplement::{Supplement, SupplementCatalog, SupplementCategory};
pub use user::{Gender, LifeStage, UserProfile};
