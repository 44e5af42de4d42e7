//! SQLite-backed entity store.
//!
//! Persists users, daily intake records, quiz attempts, reward
//! transactions, the rewards summary, and favorites. All operations are
//! synchronous; a single logical actor owns the connection, so no locking
//! is needed. Lookups return `Ok(None)` for absence -- callers treat
//! absence as create-on-demand for daily records and summaries. Write
//! failures propagate as `Err`; in-memory state is never advanced past
//! what is durable.

use chrono::{DateTime, NaiveDate, Utc};
use rusqlite::{params, Connection, OptionalExtension};

use super::data_dir;
use crate::date_key::{date_key, daily_record_id, favorite_id};
use crate::error::{CoreError, StorageError};
use crate::quiz::QuizDifficulty;
use crate::rewards::models::{
    DailyRecord, FavoriteSupplement, QuizHistoryRecord, RewardTransaction, RewardsSummary,
    TransactionKind,
};
use crate::user::{Gender, LifeStage, UserProfile};

// === Helper Functions ===

/// Parse an RFC3339 datetime from the database, falling back to now.
fn parse_datetime_fallback(dt_str: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(dt_str)
        .map(|dt| dt.with_timezone(&Utc))
        .unwrap_or_else(|_| Utc::now())
}

/// Parse a `yyyy-MM-dd` date column.
fn parse_date(date_str: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(date_str, "%Y-%m-%d").ok()
}

fn row_to_user(row: &rusqlite::Row) -> Result<UserProfile, rusqlite::Error> {
    let gender_str: Option<String> = row.get(5)?;
    let life_stage_str: Option<String> = row.get(6)?;
    let created_at_str: String = row.get(7)?;
    let updated_at_str: String = row.get(8)?;
    let reminder_str: Option<String> = row.get(10)?;
    Ok(UserProfile {
        id: row.get(0)?,
        user_name: row.get(1)?,
        email: row.get(2)?,
        age: row.get(3)?,
        weight: row.get(4)?,
        gender: gender_str.as_deref().and_then(Gender::parse),
        life_stage: life_stage_str.as_deref().and_then(LifeStage::parse),
        created_at: parse_datetime_fallback(&created_at_str),
        updated_at: parse_datetime_fallback(&updated_at_str),
        notifications_enabled: row.get(9)?,
        reminder_time: reminder_str
            .as_deref()
            .and_then(|s| chrono::NaiveTime::parse_from_str(s, "%H:%M:%S").ok()),
        language: row.get(11)?,
    })
}

fn row_to_daily_record(row: &rusqlite::Row) -> Result<DailyRecord, rusqlite::Error> {
    let date_str: String = row.get(4)?;
    let taken_at_str: Option<String> = row.get(8)?;
    Ok(DailyRecord {
        id: row.get(0)?,
        user_id: row.get(1)?,
        supplement_id: row.get(2)?,
        supplement_name: row.get(3)?,
        date: parse_date(&date_str).unwrap_or_default(),
        is_taken: row.get(5)?,
        is_favorite: row.get(6)?,
        coins_awarded: row.get(7)?,
        taken_at: taken_at_str.as_deref().map(parse_datetime_fallback),
    })
}

fn row_to_quiz_history(row: &rusqlite::Row) -> Result<QuizHistoryRecord, rusqlite::Error> {
    let attempt_str: String = row.get(2)?;
    let difficulty_str: Option<String> = row.get(7)?;
    Ok(QuizHistoryRecord {
        id: row.get(0)?,
        user_id: row.get(1)?,
        attempt_date: parse_datetime_fallback(&attempt_str),
        total_questions: row.get(3)?,
        correct_count: row.get(4)?,
        incorrect_count: row.get(5)?,
        coins_earned: row.get(6)?,
        difficulty: difficulty_str.as_deref().and_then(QuizDifficulty::parse),
    })
}

fn row_to_transaction(row: &rusqlite::Row) -> Result<RewardTransaction, rusqlite::Error> {
    let kind_str: String = row.get(2)?;
    let timestamp_str: String = row.get(5)?;
    Ok(RewardTransaction {
        id: row.get(0)?,
        user_id: row.get(1)?,
        kind: TransactionKind::parse(&kind_str).unwrap_or(TransactionKind::SupplementTaken),
        coins: row.get(3)?,
        title: row.get(4)?,
        timestamp: parse_datetime_fallback(&timestamp_str),
        related_id: row.get(6)?,
    })
}

fn row_to_summary(row: &rusqlite::Row) -> Result<RewardsSummary, rusqlite::Error> {
    let last_activity_str: Option<String> = row.get(7)?;
    Ok(RewardsSummary {
        id: row.get(0)?,
        user_id: row.get(1)?,
        total_coins_earned: row.get(2)?,
        total_coins_spent: row.get(3)?,
        current_streak: row.get(4)?,
        longest_streak: row.get(5)?,
        supplements_taken: row.get(6)?,
        last_activity_date: last_activity_str.as_deref().and_then(parse_date),
        quizzes_completed: row.get(8)?,
        has_first_step_achievement: row.get(9)?,
        has_week_warrior_achievement: row.get(10)?,
        has_quiz_master_achievement: row.get(11)?,
        has_supplement_pro_achievement: row.get(12)?,
        has_30_day_streak_achievement: row.get(13)?,
        has_health_guru_achievement: row.get(14)?,
    })
}

fn row_to_favorite(row: &rusqlite::Row) -> Result<FavoriteSupplement, rusqlite::Error> {
    let added_at_str: String = row.get(2)?;
    Ok(FavoriteSupplement {
        id: row.get(0)?,
        supplement_id: row.get(1)?,
        added_at: parse_datetime_fallback(&added_at_str),
        timing: row.get(3)?,
    })
}

/// SQLite entity store.
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Get a reference to the underlying SQLite connection.
    pub fn conn(&self) -> &Connection {
        &self.conn
    }

    /// Open the database at `~/.config/vitalog/vitalog.db`.
    ///
    /// Creates the database file and schema if they don't exist.
    ///
    /// # Errors
    /// Returns an error if the database cannot be opened or migrated.
    pub fn open() -> Result<Self, CoreError> {
        let path = data_dir()?.join("vitalog.db");
        let conn = Connection::open(&path).map_err(|source| StorageError::OpenFailed {
            path: path.clone(),
            source,
        })?;
        let db = Self { conn };
        db.migrate()?;
        Ok(db)
    }

    /// Open the database at an explicit path.
    ///
    /// # Errors
    /// Returns an error if the database cannot be opened or migrated.
    pub fn open_at(path: &std::path::Path) -> Result<Self, CoreError> {
        let conn = Connection::open(path).map_err(|source| StorageError::OpenFailed {
            path: path.to_path_buf(),
            source,
        })?;
        let db = Self { conn };
        db.migrate()?;
        Ok(db)
    }

    /// Open an in-memory database (for tests and ephemeral use).
    ///
    /// # Errors
    /// Returns an error if the schema cannot be created.
    pub fn open_memory() -> Result<Self, CoreError> {
        let conn = Connection::open_in_memory()
            .map_err(|e| StorageError::QueryFailed(e.to_string()))?;
        let db = Self { conn };
        db.migrate()?;
        Ok(db)
    }

    /// Run `f` inside a SQLite transaction.
    ///
    /// Commits when `f` returns `Ok`; any `Err` rolls back every write
    /// made inside, so multi-table mutations land all-or-nothing.
    pub fn with_tx<T, E>(&self, f: impl FnOnce(&Self) -> Result<T, E>) -> Result<T, E>
    where
        E: From<StorageError>,
    {
        let tx = self.conn.unchecked_transaction().map_err(StorageError::from)?;
        let value = f(self)?;
        tx.commit().map_err(StorageError::from)?;
        Ok(value)
    }

    fn migrate(&self) -> Result<(), StorageError> {
        self.conn
            .execute_batch(
                "CREATE TABLE IF NOT EXISTS users (
                    id                    TEXT PRIMARY KEY,
                    user_name             TEXT NOT NULL,
                    email                 TEXT NOT NULL,
                    age                   INTEGER,
                    weight                REAL,
                    gender                TEXT,
                    life_stage            TEXT,
                    created_at            TEXT NOT NULL,
                    updated_at            TEXT NOT NULL,
                    notifications_enabled INTEGER NOT NULL DEFAULT 1,
                    reminder_time         TEXT,
                    language              TEXT NOT NULL DEFAULT 'English'
                );

                CREATE TABLE IF NOT EXISTS daily_records (
                    id              TEXT PRIMARY KEY,
                    user_id         TEXT,
                    supplement_id   TEXT NOT NULL,
                    supplement_name TEXT NOT NULL,
                    date            TEXT NOT NULL,
                    is_taken        INTEGER NOT NULL DEFAULT 0,
                    is_favorite     INTEGER NOT NULL DEFAULT 1,
                    coins_awarded   INTEGER NOT NULL DEFAULT 0,
                    taken_at        TEXT
                );

                CREATE TABLE IF NOT EXISTS quiz_history (
                    id              TEXT PRIMARY KEY,
                    user_id         TEXT,
                    attempt_date    TEXT NOT NULL,
                    total_questions INTEGER NOT NULL,
                    correct_count   INTEGER NOT NULL,
                    incorrect_count INTEGER NOT NULL,
                    coins_earned    INTEGER NOT NULL,
                    difficulty      TEXT
                );

                CREATE TABLE IF NOT EXISTS reward_transactions (
                    id         TEXT PRIMARY KEY,
                    user_id    TEXT,
                    type       TEXT NOT NULL,
                    coins      INTEGER NOT NULL,
                    title      TEXT NOT NULL,
                    timestamp  TEXT NOT NULL,
                    related_id TEXT
                );

                CREATE TABLE IF NOT EXISTS rewards_summary (
                    id                  TEXT PRIMARY KEY,
                    user_id             TEXT NOT NULL,
                    total_coins_earned  INTEGER NOT NULL DEFAULT 0,
                    total_coins_spent   INTEGER NOT NULL DEFAULT 0,
                    current_streak      INTEGER NOT NULL DEFAULT 0,
                    longest_streak      INTEGER NOT NULL DEFAULT 0,
                    supplements_taken   INTEGER NOT NULL DEFAULT 0,
                    last_activity_date  TEXT,
                    quizzes_completed   INTEGER NOT NULL DEFAULT 0,
                    has_first_step      INTEGER NOT NULL DEFAULT 0,
                    has_week_warrior    INTEGER NOT NULL DEFAULT 0,
                    has_quiz_master     INTEGER NOT NULL DEFAULT 0,
                    has_supplement_pro  INTEGER NOT NULL DEFAULT 0,
                    has_30_day_streak   INTEGER NOT NULL DEFAULT 0,
                    has_health_guru     INTEGER NOT NULL DEFAULT 0
                );

                CREATE TABLE IF NOT EXISTS favorites (
                    id            TEXT PRIMARY KEY,
                    supplement_id TEXT NOT NULL,
                    added_at      TEXT NOT NULL,
                    timing        TEXT NOT NULL DEFAULT 'morning'
                );

                CREATE TABLE IF NOT EXISTS kv (
                    key   TEXT PRIMARY KEY,
                    value TEXT NOT NULL
                );

                -- Indexes for common query patterns
                CREATE INDEX IF NOT EXISTS idx_daily_records_date ON daily_records(date);
                CREATE INDEX IF NOT EXISTS idx_quiz_history_attempt_date ON quiz_history(attempt_date);
                CREATE INDEX IF NOT EXISTS idx_transactions_timestamp ON reward_transactions(timestamp);",
            )
            .map_err(|e| StorageError::MigrationFailed(e.to_string()))?;
        Ok(())
    }

    // ── Users ────────────────────────────────────────────────────────

    /// Insert or update a user profile.
    ///
    /// # Errors
    /// Returns an error if the write fails.
    pub fn upsert_user(&self, user: &UserProfile) -> Result<(), StorageError> {
        self.conn.execute(
            "INSERT OR REPLACE INTO users
             (id, user_name, email, age, weight, gender, life_stage,
              created_at, updated_at, notifications_enabled, reminder_time, language)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)",
            params![
                user.id,
                user.user_name,
                user.email,
                user.age,
                user.weight,
                user.gender.map(|g| g.as_str()),
                user.life_stage.map(|l| l.as_str()),
                user.created_at.to_rfc3339(),
                user.updated_at.to_rfc3339(),
                user.notifications_enabled,
                user.reminder_time.map(|t| t.format("%H:%M:%S").to_string()),
                user.language,
            ],
        )?;
        Ok(())
    }

    /// Look up a user by id.
    pub fn get_user(&self, id: &str) -> Result<Option<UserProfile>, StorageError> {
        let mut stmt = self.conn.prepare(
            "SELECT id, user_name, email, age, weight, gender, life_stage,
                    created_at, updated_at, notifications_enabled, reminder_time, language
             FROM users WHERE id = ?1",
        )?;
        Ok(stmt.query_row(params![id], row_to_user).optional()?)
    }

    /// Create a user or update an existing one in place.
    ///
    /// Updates touch `updated_at` and leave `created_at` alone; new rows
    /// set both.
    ///
    /// # Errors
    /// Returns an error if the lookup or write fails.
    #[allow(clippy::too_many_arguments)]
    pub fn create_or_update_user(
        &self,
        id: &str,
        user_name: &str,
        email: &str,
        age: Option<i64>,
        gender: Option<Gender>,
        life_stage: Option<LifeStage>,
    ) -> Result<UserProfile, StorageError> {
        let user = match self.get_user(id)? {
            Some(mut existing) => {
                existing.user_name = user_name.to_string();
                existing.email = email.to_string();
                existing.age = age;
                existing.gender = gender;
                existing.life_stage = life_stage;
                existing.updated_at = Utc::now();
                existing
            }
            None => {
                let mut user = UserProfile::new(user_name, email);
                user.id = id.to_string();
                user.age = age;
                user.gender = gender;
                user.life_stage = life_stage;
                user
            }
        };
        self.upsert_user(&user)?;
        Ok(user)
    }

    /// Most recently created user, if any.
    pub fn latest_user(&self) -> Result<Option<UserProfile>, StorageError> {
        let mut stmt = self.conn.prepare(
            "SELECT id, user_name, email, age, weight, gender, life_stage,
                    created_at, updated_at, notifications_enabled, reminder_time, language
             FROM users ORDER BY created_at DESC LIMIT 1",
        )?;
        Ok(stmt.query_row([], row_to_user).optional()?)
    }

    // ── Daily records ────────────────────────────────────────────────

    /// Look up a daily record by its composite key.
    pub fn get_daily_record(
        &self,
        supplement_id: &str,
        date: NaiveDate,
    ) -> Result<Option<DailyRecord>, StorageError> {
        let id = daily_record_id(supplement_id, date);
        let mut stmt = self.conn.prepare(
            "SELECT id, user_id, supplement_id, supplement_name, date, is_taken,
                    is_favorite, coins_awarded, taken_at
             FROM daily_records WHERE id = ?1",
        )?;
        Ok(stmt.query_row(params![id], row_to_daily_record).optional()?)
    }

    /// Fetch the record for (supplement, day), creating it lazily.
    ///
    /// # Errors
    /// Returns an error if the lookup or insert fails.
    pub fn get_or_create_daily_record(
        &self,
        supplement_id: &str,
        supplement_name: &str,
        date: NaiveDate,
    ) -> Result<DailyRecord, StorageError> {
        if let Some(existing) = self.get_daily_record(supplement_id, date)? {
            return Ok(existing);
        }
        let record = DailyRecord::new(supplement_id, supplement_name, date);
        self.save_daily_record(&record)?;
        Ok(record)
    }

    /// Persist a daily record (insert or replace by composite key).
    ///
    /// # Errors
    /// Returns an error if the write fails.
    pub fn save_daily_record(&self, record: &DailyRecord) -> Result<(), StorageError> {
        self.conn.execute(
            "INSERT OR REPLACE INTO daily_records
             (id, user_id, supplement_id, supplement_name, date, is_taken, is_favorite, coins_awarded, taken_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
            params![
                record.id,
                record.user_id,
                record.supplement_id,
                record.supplement_name,
                date_key(record.date),
                record.is_taken,
                record.is_favorite,
                record.coins_awarded,
                record.taken_at.map(|t| t.to_rfc3339()),
            ],
        )?;
        Ok(())
    }

    /// All records for a calendar day, sorted by supplement name.
    pub fn daily_records_for(&self, date: NaiveDate) -> Result<Vec<DailyRecord>, StorageError> {
        let mut stmt = self.conn.prepare(
            "SELECT id, user_id, supplement_id, supplement_name, date, is_taken,
                    is_favorite, coins_awarded, taken_at
             FROM daily_records WHERE date = ?1 ORDER BY supplement_name",
        )?;
        let rows = stmt.query_map(params![date_key(date)], row_to_daily_record)?;
        rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
    }

    // ── Favorites ────────────────────────────────────────────────────

    pub fn is_favorite(&self, user_id: &str, supplement_id: &str) -> Result<bool, StorageError> {
        let id = favorite_id(user_id, supplement_id);
        let mut stmt = self
            .conn
            .prepare("SELECT 1 FROM favorites WHERE id = ?1")?;
        Ok(stmt
            .query_row(params![id], |row| row.get::<_, i64>(0))
            .optional()?
            .is_some())
    }

    /// Toggle favorite status. Returns the new status.
    ///
    /// # Errors
    /// Returns an error if the write fails.
    pub fn toggle_favorite(
        &self,
        user_id: &str,
        supplement_id: &str,
    ) -> Result<bool, StorageError> {
        let id = favorite_id(user_id, supplement_id);
        if self.is_favorite(user_id, supplement_id)? {
            self.conn
                .execute("DELETE FROM favorites WHERE id = ?1", params![id])?;
            Ok(false)
        } else {
            let favorite = FavoriteSupplement::new(user_id, supplement_id);
            self.conn.execute(
                "INSERT INTO favorites (id, supplement_id, added_at, timing)
                 VALUES (?1, ?2, ?3, ?4)",
                params![
                    favorite.id,
                    favorite.supplement_id,
                    favorite.added_at.to_rfc3339(),
                    favorite.timing,
                ],
            )?;
            Ok(true)
        }
    }

    /// Favorites for a user, newest first.
    pub fn favorites(&self, user_id: &str) -> Result<Vec<FavoriteSupplement>, StorageError> {
        let prefix = format!("{user_id}_");
        let mut stmt = self.conn.prepare(
            "SELECT id, supplement_id, added_at, timing
             FROM favorites WHERE id LIKE ?1 || '%' ORDER BY added_at DESC",
        )?;
        let rows = stmt.query_map(params![prefix], row_to_favorite)?;
        rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
    }

    // ── Quiz history ─────────────────────────────────────────────────

    /// Append a quiz attempt. Always inserts a new row.
    ///
    /// # Errors
    /// Returns an error if the insert fails.
    pub fn insert_quiz_history(&self, record: &QuizHistoryRecord) -> Result<(), StorageError> {
        self.conn.execute(
            "INSERT INTO quiz_history
             (id, user_id, attempt_date, total_questions, correct_count, incorrect_count, coins_earned, difficulty)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
            params![
                record.id,
                record.user_id,
                record.attempt_date.to_rfc3339(),
                record.total_questions,
                record.correct_count,
                record.incorrect_count,
                record.coins_earned,
                record.difficulty.map(|d| d.as_str()),
            ],
        )?;
        Ok(())
    }

    /// A user's quiz attempts, newest first.
    pub fn quiz_history(
        &self,
        user_id: &str,
        limit: usize,
    ) -> Result<Vec<QuizHistoryRecord>, StorageError> {
        let mut stmt = self.conn.prepare(
            "SELECT id, user_id, attempt_date, total_questions, correct_count, incorrect_count,
                    coins_earned, difficulty
             FROM quiz_history WHERE user_id = ?1 ORDER BY attempt_date DESC LIMIT ?2",
        )?;
        let rows = stmt.query_map(params![user_id, limit as i64], row_to_quiz_history)?;
        rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
    }

    // ── Reward transactions ──────────────────────────────────────────

    /// Append a ledger entry.
    ///
    /// # Errors
    /// Returns an error if the insert fails.
    pub fn insert_transaction(&self, tx: &RewardTransaction) -> Result<(), StorageError> {
        self.conn.execute(
            "INSERT INTO reward_transactions (id, user_id, type, coins, title, timestamp, related_id)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            params![
                tx.id,
                tx.user_id,
                tx.kind.as_str(),
                tx.coins,
                tx.title,
                tx.timestamp.to_rfc3339(),
                tx.related_id,
            ],
        )?;
        Ok(())
    }

    /// A user's ledger entries, newest first.
    pub fn transactions(
        &self,
        user_id: &str,
        limit: usize,
    ) -> Result<Vec<RewardTransaction>, StorageError> {
        let mut stmt = self.conn.prepare(
            "SELECT id, user_id, type, coins, title, timestamp, related_id
             FROM reward_transactions WHERE user_id = ?1 ORDER BY timestamp DESC LIMIT ?2",
        )?;
        let rows = stmt.query_map(params![user_id, limit as i64], row_to_transaction)?;
        rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
    }

    /// Sum of a user's transaction coins within a calendar day.
    pub fn coins_on_day(&self, user_id: &str, date: NaiveDate) -> Result<i64, StorageError> {
        let start = format!("{}T00:00:00+00:00", date_key(date));
        let end = format!(
            "{}T00:00:00+00:00",
            date_key(date.succ_opt().unwrap_or(date))
        );
        let mut stmt = self.conn.prepare(
            "SELECT COALESCE(SUM(coins), 0) FROM reward_transactions
             WHERE user_id = ?1 AND timestamp >= ?2 AND timestamp < ?3",
        )?;
        Ok(stmt.query_row(params![user_id, start, end], |row| row.get(0))?)
    }

    /// Sum of a user's earn-kind transaction coins (excludes debits).
    ///
    /// Must reconcile with `rewards_summary.total_coins_earned`.
    pub fn total_earned(&self, user_id: &str) -> Result<i64, StorageError> {
        let mut stmt = self.conn.prepare(
            "SELECT COALESCE(SUM(coins), 0) FROM reward_transactions
             WHERE user_id = ?1 AND type != 'spend'",
        )?;
        Ok(stmt.query_row(params![user_id], |row| row.get(0))?)
    }

    // ── Rewards summary ──────────────────────────────────────────────

    /// Look up the summary for a user.
    pub fn get_summary(&self, user_id: &str) -> Result<Option<RewardsSummary>, StorageError> {
        let mut stmt = self.conn.prepare(
            "SELECT id, user_id, total_coins_earned, total_coins_spent, current_streak,
                    longest_streak, supplements_taken, last_activity_date, quizzes_completed,
                    has_first_step, has_week_warrior, has_quiz_master, has_supplement_pro,
                    has_30_day_streak, has_health_guru
             FROM rewards_summary WHERE user_id = ?1",
        )?;
        Ok(stmt.query_row(params![user_id], row_to_summary).optional()?)
    }

    /// Fetch the summary for a user, creating it lazily.
    ///
    /// # Errors
    /// Returns an error if the lookup or insert fails.
    pub fn get_or_create_summary(&self, user_id: &str) -> Result<RewardsSummary, StorageError> {
        if let Some(existing) = self.get_summary(user_id)? {
            return Ok(existing);
        }
        let summary = RewardsSummary::new(user_id);
        self.save_summary(&summary)?;
        Ok(summary)
    }

    /// Persist the summary (insert or replace by user id).
    ///
    /// # Errors
    /// Returns an error if the write fails.
    pub fn save_summary(&self, summary: &RewardsSummary) -> Result<(), StorageError> {
        self.conn.execute(
            "INSERT OR REPLACE INTO rewards_summary
             (id, user_id, total_coins_earned, total_coins_spent, current_streak,
              longest_streak, supplements_taken, last_activity_date, quizzes_completed,
              has_first_step, has_week_warrior, has_quiz_master, has_supplement_pro,
              has_30_day_streak, has_health_guru)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15)",
            params![
                summary.id,
                summary.user_id,
                summary.total_coins_earned,
                summary.total_coins_spent,
                summary.current_streak,
                summary.longest_streak,
                summary.supplements_taken,
                summary.last_activity_date.map(date_key),
                summary.quizzes_completed,
                summary.has_first_step_achievement,
                summary.has_week_warrior_achievement,
                summary.has_quiz_master_achievement,
                summary.has_supplement_pro_achievement,
                summary.has_30_day_streak_achievement,
                summary.has_health_guru_achievement,
            ],
        )?;
        Ok(())
    }

    // ── Key-value store ──────────────────────────────────────────────

    /// Get a value from the kv store.
    pub fn kv_get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let mut stmt = self.conn.prepare("SELECT value FROM kv WHERE key = ?1")?;
        Ok(stmt
            .query_row(params![key], |row| row.get::<_, String>(0))
            .optional()?)
    }

    /// Set a value in the kv store.
    pub fn kv_set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.conn.execute(
            "INSERT OR REPLACE INTO kv (key, value) VALUES (?1, ?2)",
            params![key, value],
        )?;
        Ok(())
    }

    /// Delete a key from the kv store.
    pub fn kv_delete(&self, key: &str) -> Result<(), StorageError> {
        self.conn
            .execute("DELETE FROM kv WHERE key = ?1", params![key])?;
        Ok(())
    }
}
