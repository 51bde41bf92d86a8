//! Validity window arithmetic: `[since, till)` in whole days.

use crate::types::{Error, Subscription, MAX_SUBSCRIPTION_DAYS, SECONDS_PER_DAY};

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct ValidityWindow {
    pub since: u64,
    pub till: u64,
}

impl ValidityWindow {
    /// Window of `days` whole days starting at `since`.
    pub fn starting_at(since: u64, days: u32) -> Result<Self, Error> {
        let span = (days as u64)
            .checked_mul(SECONDS_PER_DAY)
            .ok_or(Error::Overflow)?;
        let till = since.checked_add(span).ok_or(Error::Overflow)?;
        Ok(Self { since, till })
    }

    pub fn of(sub: &Subscription) -> Self {
        Self {
            since: sub.valid_since,
            till: sub.valid_till,
        }
    }

    /// Length of the window in days.
    pub fn duration_days(&self) -> u32 {
        (self.till.saturating_sub(self.since) / SECONDS_PER_DAY) as u32
    }

    pub fn is_active(&self, now: u64) -> bool {
        self.till > now
    }

    /// Seconds left before the window closes; zero once expired.
    pub fn remaining(&self, now: u64) -> u64 {
        self.till.saturating_sub(now)
    }
}

/// Rejects durations outside `1..=MAX_SUBSCRIPTION_DAYS`.
pub fn validate_duration(days: u32) -> Result<(), Error> {
    if days == 0 || days > MAX_SUBSCRIPTION_DAYS {
        return Err(Error::InvalidDuration);
    }
    Ok(())
}

pub fn cap_duration(days: u32) -> u32 {
    days.min(MAX_SUBSCRIPTION_DAYS)
}
