//! Read-only entrypoints: fee quotes, coverage checks and record lookups.

use crate::billing::BillingPolicy;
use crate::consumers::{consumer_set, subscriptions_of_consumer};
use crate::registry::require_bound_dataset;
use crate::storage;
use crate::types::{DataKey, Error, FeeQuote, Subscription, MAX_SUBSCRIPTION_DAYS};
use crate::window::{validate_duration, ValidityWindow};
use soroban_sdk::{log, Address, Env, Vec};

pub fn get_subscription(env: &Env, subscription_id: u64) -> Result<Subscription, Error> {
    storage::load(env, &DataKey::Subscription(subscription_id)).ok_or(Error::NotFound)
}

/// Number of subscriptions created so far. Ids run `1..=count`.
pub fn subscription_count(env: &Env) -> u64 {
    let next: u64 = env.storage().instance().get(&DataKey::NextId).unwrap_or(1);
    next - 1
}

/// Validates a quote request the same way creation does.
pub fn validate_request(
    env: &Env,
    dataset_id: u128,
    duration_days: u32,
    seats: u32,
) -> Result<(), Error> {
    require_bound_dataset(env, dataset_id)?;
    if let Err(e) = validate_duration(duration_days) {
        log!(env, "invalid duration", 1u32, MAX_SUBSCRIPTION_DAYS, duration_days);
        return Err(e);
    }
    if seats == 0 {
        return Err(Error::ZeroConsumers);
    }
    Ok(())
}

pub fn quote<P: BillingPolicy>(
    env: &Env,
    policy: &P,
    dataset_id: u128,
    duration_days: u32,
    seats: u32,
) -> Result<FeeQuote, Error> {
    validate_request(env, dataset_id, duration_days, seats)?;
    policy.quote_fee(env, duration_days, seats)
}

/// Cost of adding `extra_seats` for the rest of the current window.
///
/// Only defined while the subscription is still valid.
pub fn quote_extra_seats<P: BillingPolicy>(
    env: &Env,
    policy: &P,
    subscription_id: u64,
    extra_seats: u32,
) -> Result<i128, Error> {
    if extra_seats == 0 {
        return Err(Error::ZeroConsumers);
    }
    let sub = get_subscription(env, subscription_id)?;
    let window = ValidityWindow::of(&sub);
    if !window.is_active(env.ledger().timestamp()) {
        return Err(Error::SubscriptionEnded);
    }

    let days = window.duration_days();
    let seats = sub
        .paid_seats
        .checked_add(extra_seats)
        .ok_or(Error::Overflow)?;
    let current = policy.quote_fee(env, days, sub.paid_seats)?.amount;
    let new = policy.quote_fee(env, days, seats)?.amount;
    Ok(if new > current { new - current } else { 0 })
}

/// True if `consumer` is a seat holder on at least one subscription whose
/// window is still open.
pub fn is_covered(env: &Env, dataset_id: u128, consumer: Address) -> Result<bool, Error> {
    require_bound_dataset(env, dataset_id)?;
    let now = env.ledger().timestamp();
    for id in subscriptions_of_consumer(env, &consumer).keys().iter() {
        if let Some(sub) = storage::load::<Subscription>(env, &DataKey::Subscription(id)) {
            if ValidityWindow::of(&sub).is_active(now) {
                return Ok(true);
            }
        }
    }
    Ok(false)
}

pub fn is_subscription_active(env: &Env, subscription_id: u64) -> Result<bool, Error> {
    let sub = get_subscription(env, subscription_id)?;
    Ok(ValidityWindow::of(&sub).is_active(env.ledger().timestamp()))
}

pub fn subscription_consumers(env: &Env, subscription_id: u64) -> Result<Vec<Address>, Error> {
    get_subscription(env, subscription_id)?;
    Ok(consumer_set(env, subscription_id).keys())
}

pub fn consumer_subscriptions(env: &Env, consumer: Address) -> Vec<u64> {
    subscriptions_of_consumer(env, &consumer).keys()
}
