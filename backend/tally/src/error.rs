use thiserror::Error;

/// Input that is well-formed JSON but breaks a domain rule.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("Invalid reps value. Must be 1 or -1.")]
    InvalidRepDelta(f64),

    #[error("Rep limit reached: reps cannot go below 0.")]
    BelowZero,

    #[error("Rep limit reached: goal of {goal} reps already met.")]
    GoalReached { goal: i64 },

    #[error("Invalid goal amount")]
    InvalidGlobalGoal,

    #[error("{field} must not be empty")]
    Blank { field: &'static str },

    #[error("{field} must be a non-negative number")]
    Negative { field: &'static str },

    #[error("{field} must be at most {max}")]
    TooLarge { field: &'static str, max: i64 },

    #[error("repsCompleted ({completed}) must be between 0 and repsGoal ({goal})")]
    RepsOutOfRange { completed: i64, goal: i64 },

    #[error("moneyPer5Reps is locked")]
    RateLocked,
}
