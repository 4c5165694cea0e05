//! # Rep Logging
//!
//! The only guarded transition in the domain. A log request moves `reps_completed`
//! by exactly one in either direction and must stay within `[0, reps_goal]`.
use crate::error::ValidationError;

/// Largest rep goal the `integer` columns hold.
pub const MAX_REPS_GOAL: i64 = i32::MAX as i64;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RepDelta {
    Increment,
    Decrement,
}

impl RepDelta {
    pub fn value(self) -> i64 {
        match self {
            RepDelta::Increment => 1,
            RepDelta::Decrement => -1,
        }
    }
}

/// Any JSON number equal to 1 or -1 is a delta, so `1.0` counts as well as `1`.
impl TryFrom<f64> for RepDelta {
    type Error = ValidationError;

    fn try_from(reps: f64) -> Result<Self, Self::Error> {
        if reps == 1.0 {
            Ok(RepDelta::Increment)
        } else if reps == -1.0 {
            Ok(RepDelta::Decrement)
        } else {
            Err(ValidationError::InvalidRepDelta(reps))
        }
    }
}

/// New completed count after applying `delta`, or the bound it would cross.
pub fn next_reps(completed: i64, goal: i64, delta: RepDelta) -> Result<i64, ValidationError> {
    let Some(next) = completed.checked_add(delta.value()) else {
        return Err(match delta {
            RepDelta::Increment => ValidationError::GoalReached { goal },
            RepDelta::Decrement => ValidationError::BelowZero,
        });
    };

    if next < 0 {
        return Err(ValidationError::BelowZero);
    }
    if next > goal {
        return Err(ValidationError::GoalReached { goal });
    }

    Ok(next)
}

/// Checks the `0 <= completed <= goal` invariant for a full write.
pub fn check_bounds(completed: i64, goal: i64) -> Result<(), ValidationError> {
    if goal < 0 {
        return Err(ValidationError::Negative { field: "repsGoal" });
    }
    if goal > MAX_REPS_GOAL {
        return Err(ValidationError::TooLarge {
            field: "repsGoal",
            max: MAX_REPS_GOAL,
        });
    }
    if completed < 0 || completed > goal {
        return Err(ValidationError::RepsOutOfRange { completed, goal });
    }

    Ok(())
}
