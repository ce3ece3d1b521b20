//! Field and counter checks shared by the transition handlers.

use super::errors::{SocialError, SocialResult};

/// Reject strings longer than `max` bytes.
pub fn check_len(field: &'static str, value: &str, max: usize) -> SocialResult<()> {
    if value.len() > max {
        return Err(SocialError::FieldTooLong {
            field,
            max,
            actual: value.len(),
        });
    }
    Ok(())
}

/// Reject empty strings and strings longer than `max` bytes.
pub fn check_required(field: &'static str, value: &str, max: usize) -> SocialResult<()> {
    if value.is_empty() {
        return Err(SocialError::EmptyField { field });
    }
    check_len(field, value, max)
}

pub fn increment(counter: &'static str, value: u64) -> SocialResult<u64> {
    value
        .checked_add(1)
        .ok_or(SocialError::ArithmeticOverflow { counter })
}

pub fn decrement(counter: &'static str, value: u64) -> SocialResult<u64> {
    value
        .checked_sub(1)
        .ok_or(SocialError::CounterUnderflow { counter })
}

pub fn add(counter: &'static str, value: u64, amount: u64) -> SocialResult<u64> {
    value
        .checked_add(amount)
        .ok_or(SocialError::ArithmeticOverflow { counter })
}

pub fn increment_tally(value: u32) -> SocialResult<u32> {
    value.checked_add(1).ok_or(SocialError::ArithmeticOverflow {
        counter: "votes_per_option",
    })
}
