//! Consecutive-day activity streak computation.
//!
//! Invoked only on supplement-taken events; quiz completion never touches
//! the streak. Bonuses fire on the exact day the streak becomes 7 or 30,
//! not every day at or above those values.

use chrono::NaiveDate;

use super::models::RewardsSummary;

/// Coins for reaching a 7-day streak.
pub const SEVEN_DAY_BONUS: i64 = 50;
/// Coins for reaching a 30-day streak.
pub const THIRTY_DAY_BONUS: i64 = 200;

/// A one-time bonus triggered by a streak milestone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StreakBonus {
    pub coins: i64,
    pub title: &'static str,
}

/// Update the streak counters for activity on `today`.
///
/// Returns the milestone bonus when the streak becomes exactly 7 or 30.
/// The caller appends the bonus transaction and adds the coins to the
/// summary. `last_activity_date` is set to `today` except for backdated
/// activity, which leaves the streak untouched.
pub fn update_streak(summary: &mut RewardsSummary, today: NaiveDate) -> Option<StreakBonus> {
    let mut bonus = None;

    match summary.last_activity_date {
        None => {
            summary.current_streak = 1;
        }
        Some(last) => {
            let days = (today - last).num_days();
            if days < 0 {
                // Backdated activity never rewinds the streak clock.
                return None;
            } else if days == 0 {
                // Same-day repeat activity, no change.
            } else if days == 1 {
                summary.current_streak += 1;
                if summary.current_streak > summary.longest_streak {
                    summary.longest_streak = summary.current_streak;
                }
                if summary.current_streak == 7 {
                    bonus = Some(StreakBonus {
                        coins: SEVEN_DAY_BONUS,
                        title: "7-day streak bonus!",
                    });
                } else if summary.current_streak == 30 {
                    bonus = Some(StreakBonus {
                        coins: THIRTY_DAY_BONUS,
                        title: "30-day streak bonus!",
                    });
                }
            } else {
                // Streak broken; the break itself is not recorded.
                summary.current_streak = 1;
            }
        }
    }

    summary.last_activity_date = Some(today);
    bonus
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rewards::models::LOCAL_USER;

    fn day(n: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, n).unwrap()
    }

    #[test]
    fn first_activity_starts_streak_at_one() {
        let mut summary = RewardsSummary::new(LOCAL_USER);
        assert_eq!(update_streak(&mut summary, day(1)), None);
        assert_eq!(summary.current_streak, 1);
        assert_eq!(summary.last_activity_date, Some(day(1)));
    }

    #[test]
    fn consecutive_days_increment() {
        let mut summary = RewardsSummary::new(LOCAL_USER);
        update_streak(&mut summary, day(1));
        update_streak(&mut summary, day(2));
        assert_eq!(summary.current_streak, 2);
        assert_eq!(summary.longest_streak, 2);
    }

    #[test]
    fn same_day_repeat_does_not_double_count() {
        let mut summary = RewardsSummary::new(LOCAL_USER);
        update_streak(&mut summary, day(1));
        update_streak(&mut summary, day(1));
        assert_eq!(summary.current_streak, 1);
    }

    #[test]
    fn backdated_activity_leaves_streak_untouched() {
        let mut summary = RewardsSummary::new(LOCAL_USER);
        update_streak(&mut summary, day(4));
        update_streak(&mut summary, day(5));
        assert_eq!(update_streak(&mut summary, day(2)), None);
        assert_eq!(summary.current_streak, 2);
        assert_eq!(summary.last_activity_date, Some(day(5)));
        // The next real day continues from day 5, not day 2.
        update_streak(&mut summary, day(6));
        assert_eq!(summary.current_streak, 3);
    }

    #[test]
    fn gap_resets_to_one() {
        let mut summary = RewardsSummary::new(LOCAL_USER);
        update_streak(&mut summary, day(1));
        update_streak(&mut summary, day(2));
        update_streak(&mut summary, day(5));
        assert_eq!(summary.current_streak, 1);
        assert_eq!(summary.longest_streak, 2);
    }

    #[test]
    fn seven_day_bonus_fires_exactly_once() {
        let mut summary = RewardsSummary::new(LOCAL_USER);
        let mut bonuses = Vec::new();
        for n in 1..=8 {
            if let Some(bonus) = update_streak(&mut summary, day(n)) {
                bonuses.push((n, bonus));
            }
        }
        assert_eq!(bonuses.len(), 1);
        assert_eq!(bonuses[0].0, 7);
        assert_eq!(bonuses[0].1.coins, SEVEN_DAY_BONUS);
        assert_eq!(bonuses[0].1.title, "7-day streak bonus!");
        assert_eq!(summary.current_streak, 8);
    }

    #[test]
    fn thirty_day_bonus_at_exactly_thirty() {
        let mut summary = RewardsSummary::new(LOCAL_USER);
        summary.current_streak = 29;
        summary.longest_streak = 29;
        summary.last_activity_date = Some(day(29));
        let bonus = update_streak(&mut summary, day(30)).expect("milestone bonus");
        assert_eq!(bonus.coins, THIRTY_DAY_BONUS);
        assert_eq!(summary.current_streak, 30);
        assert_eq!(update_streak(&mut summary, day(31)), None);
    }

    #[test]
    fn no_bonus_after_streak_break_before_seven() {
        let mut summary = RewardsSummary::new(LOCAL_USER);
        for n in 1..=6 {
            update_streak(&mut summary, day(n));
        }
        // Skip a day right before the milestone.
        assert_eq!(update_streak(&mut summary, day(8)), None);
        assert_eq!(summary.current_streak, 1);
    }
}
