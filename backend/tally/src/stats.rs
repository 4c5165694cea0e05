//! # Earnings and Progress
//!
//! A subtopic pays out `goal_amount` once `reps_goal` reps are done, pro-rated per rep:
//! `earned = reps_completed * goal_amount / reps_goal`.
//!
//! A topic's earnings are the sum over its subtopics and stay unrounded until presentation.
//! Its completion percentage is completed reps over goal reps across all subtopics.
//!
//! Both values are monotonic in `reps_completed`.
use crate::{payloads::Subtopic, rows::SubtopicRow};

/// Anything carrying a subtopic's rep counts and payout.
pub trait Payout {
    fn reps_completed(&self) -> i64;
    fn reps_goal(&self) -> i64;
    fn goal_amount(&self) -> f64;
}

impl Payout for SubtopicRow {
    fn reps_completed(&self) -> i64 {
        self.reps_completed
    }

    fn reps_goal(&self) -> i64 {
        self.reps_goal
    }

    fn goal_amount(&self) -> f64 {
        self.goal_amount
    }
}

impl Payout for Subtopic {
    fn reps_completed(&self) -> i64 {
        self.reps_completed
    }

    fn reps_goal(&self) -> i64 {
        self.reps_goal
    }

    fn goal_amount(&self) -> f64 {
        self.goal_amount
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TopicStats {
    pub completion_percentage: i64,
    pub earnings: f64,
}

impl TopicStats {
    pub const ZERO: Self = Self {
        completion_percentage: 0,
        earnings: 0.0,
    };

    /// Earnings as shown to the client.
    pub fn rounded_earnings(&self) -> i64 {
        round(self.earnings)
    }
}

pub fn earned_amount<P: Payout + ?Sized>(subtopic: &P) -> f64 {
    let goal = subtopic.reps_goal();
    let amount = subtopic.goal_amount();

    if goal <= 0 || amount <= 0.0 {
        return 0.0;
    }

    subtopic.reps_completed() as f64 * (amount / goal as f64)
}

pub fn topic_stats<'a, P, I>(subtopics: I) -> TopicStats
where
    P: Payout + 'a,
    I: IntoIterator<Item = &'a P>,
{
    let mut seen = false;
    // i64 counts summed wide so large goals can't overflow
    let mut completed = 0i128;
    let mut goal = 0i128;
    let mut earnings = 0.0;

    for subtopic in subtopics {
        seen = true;
        completed += i128::from(subtopic.reps_completed());
        goal += i128::from(subtopic.reps_goal());
        earnings += earned_amount(subtopic);
    }

    if !seen {
        return TopicStats::ZERO;
    }

    TopicStats {
        completion_percentage: percentage(completed as f64, goal as f64),
        earnings,
    }
}

/// `round(100 * part / whole)`, or 0 when `whole` is not positive.
pub fn percentage(part: f64, whole: f64) -> i64 {
    if whole <= 0.0 {
        return 0;
    }

    round(part / whole * 100.0)
}

/// Half-up rounding, matching what the frontend displays.
pub fn round(value: f64) -> i64 {
    (value + 0.5).floor() as i64
}
