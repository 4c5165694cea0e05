use crate::{
    payloads::{Dashboard, TopicSummary},
    rows::TopicWithSubtopics,
    stats::percentage,
};

/// Rolls every topic up against the global goal.
///
/// `current_earnings` sums the per-topic earnings as displayed, so the total always
/// matches the rounded figures next to it.
pub fn summarize(global_goal: f64, topics: &[TopicWithSubtopics]) -> Dashboard {
    let topics: Vec<TopicSummary> = topics.iter().map(TopicSummary::from).collect();
    let current_earnings: i64 = topics.iter().map(|topic| topic.earnings).sum();

    Dashboard {
        global_goal,
        current_earnings,
        progress: percentage(current_earnings as f64, global_goal),
        topics,
    }
}
