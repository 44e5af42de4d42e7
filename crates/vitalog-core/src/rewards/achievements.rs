//! Monotonic achievement flags.
//!
//! Re-checked after any summary mutation. Flags only ever flip from false
//! to true; no transaction is emitted for an unlock.

use super::models::RewardsSummary;

/// Set every achievement flag whose threshold is reached.
pub fn check_achievements(summary: &mut RewardsSummary) {
    // First Step: take the first supplement
    if summary.supplements_taken >= 1 {
        summary.has_first_step_achievement = true;
    }
    // Week Warrior: 7-day streak
    if summary.current_streak >= 7 {
        summary.has_week_warrior_achievement = true;
    }
    // Quiz Master: complete 10 quizzes
    if summary.quizzes_completed >= 10 {
        summary.has_quiz_master_achievement = true;
    }
    // Supplement Pro: take 50 supplements
    if summary.supplements_taken >= 50 {
        summary.has_supplement_pro_achievement = true;
    }
    // 30 Day Streak
    if summary.current_streak >= 30 {
        summary.has_30_day_streak_achievement = true;
    }
    // Health Guru: 100 supplements + 20 quizzes
    if summary.supplements_taken >= 100 && summary.quizzes_completed >= 20 {
        summary.has_health_guru_achievement = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rewards::models::LOCAL_USER;

    #[test]
    fn first_step_at_one_supplement() {
        let mut summary = RewardsSummary::new(LOCAL_USER);
        check_achievements(&mut summary);
        assert!(!summary.has_first_step_achievement);
        summary.supplements_taken = 1;
        check_achievements(&mut summary);
        assert!(summary.has_first_step_achievement);
    }

    #[test]
    fn flags_never_reset() {
        let mut summary = RewardsSummary::new(LOCAL_USER);
        summary.current_streak = 7;
        check_achievements(&mut summary);
        assert!(summary.has_week_warrior_achievement);

        // Streak broken later; the flag stays.
        summary.current_streak = 1;
        check_achievements(&mut summary);
        assert!(summary.has_week_warrior_achievement);
    }

    #[test]
    fn thresholds() {
        let mut summary = RewardsSummary::new(LOCAL_USER);
        summary.supplements_taken = 49;
        summary.quizzes_completed = 9;
        check_achievements(&mut summary);
        assert!(!summary.has_supplement_pro_achievement);
        assert!(!summary.has_quiz_master_achievement);

        summary.supplements_taken = 50;
        summary.quizzes_completed = 10;
        check_achievements(&mut summary);
        assert!(summary.has_supplement_pro_achievement);
        assert!(summary.has_quiz_master_achievement);
    }

    #[test]
    fn health_guru_requires_both_conditions() {
        let mut summary = RewardsSummary::new(LOCAL_USER);
        summary.supplements_taken = 100;
        summary.quizzes_completed = 19;
        check_achievements(&mut summary);
        assert!(!summary.has_health_guru_achievement);

        summary.quizzes_completed = 20;
        check_achievements(&mut summary);
        assert!(summary.has_health_guru_achievement);
    }

    #[test]
    fn thirty_day_streak_threshold() {
        let mut summary = RewardsSummary::new(LOCAL_USER);
        summary.current_streak = 30;
        check_achievements(&mut summary);
        assert!(summary.has_30_day_streak_achievement);
    }
}
