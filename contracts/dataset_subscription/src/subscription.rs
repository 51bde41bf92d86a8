//! Subscription lifecycle: create, extend.
//!
//! Each operation validates first, charges through the [`BillingPolicy`]
//! second, and only then writes state, so a failed charge leaves nothing
//! behind.
//!
//! **PRs that only change subscription lifecycle or billing should edit this file only.**

use crate::billing::BillingPolicy;
use crate::consumers::add_to_seats;
use crate::ownership::{balance_of, mint};
use crate::queries::{get_subscription, validate_request};
use crate::storage;
use crate::types::{
    DataKey, Error, Subscription, SubscriptionPaidEvent, MAX_EXTENSION_DAYS, SECONDS_PER_DAY,
};
use crate::window::{cap_duration, ValidityWindow};
use soroban_sdk::{log, symbol_short, Address, Env, Vec};

/// Allocate the next subscription id.
///
/// Ids start at `1` and are never reused.
fn next_id(env: &Env) -> Result<u64, Error> {
    let id: u64 = env
        .storage()
        .instance()
        .get(&DataKey::NextId)
        .ok_or(Error::NotInitialized)?;
    let next = id.checked_add(1).ok_or(Error::Overflow)?;
    env.storage().instance().set(&DataKey::NextId, &next);
    Ok(id)
}

fn publish_paid(env: &Env, subscription_id: u64, sub: &Subscription) {
    env.events().publish(
        (symbol_short!("sub_paid"), subscription_id),
        SubscriptionPaidEvent {
            subscription_id,
            valid_since: sub.valid_since,
            valid_till: sub.valid_till,
            paid_seats: sub.paid_seats,
        },
    );
}

/// Pay for `seats` seats over `duration_days` days starting now and mint the
/// subscription token to `payer`.
///
/// A payer that still holds a subscription token cannot create another one
/// until it transfers the old token away.
pub fn do_create_subscription<P: BillingPolicy>(
    env: &Env,
    policy: &P,
    dataset_id: u128,
    duration_days: u32,
    seats: u32,
    payer: Address,
) -> Result<u64, Error> {
    validate_request(env, dataset_id, duration_days, seats)?;
    payer.require_auth();

    if balance_of(env, &payer) > 0 {
        return Err(Error::ConsumerAlreadySubscribed);
    }

    let fee = policy.quote_fee(env, duration_days, seats)?;
    policy.charge(env, &payer, fee.amount)?;

    let id = next_id(env)?;
    let window = ValidityWindow::starting_at(env.ledger().timestamp(), duration_days)?;
    let sub = Subscription {
        valid_since: window.since,
        valid_till: window.till,
        paid_seats: seats,
    };
    storage::save(env, &DataKey::Subscription(id), &sub);
    mint(env, &payer, id);

    publish_paid(env, id, &sub);
    Ok(id)
}

/// [`do_create_subscription`] followed by seat assignment for `consumers`.
pub fn do_create_with_consumers<P: BillingPolicy>(
    env: &Env,
    policy: &P,
    dataset_id: u128,
    duration_days: u32,
    seats: u32,
    payer: Address,
    consumers: Vec<Address>,
) -> Result<u64, Error> {
    validate_request(env, dataset_id, duration_days, seats)?;
    if consumers.len() > seats {
        log!(env, "max seats exceeded", seats, consumers.len());
        return Err(Error::MaxSeatsExceeded);
    }
    let id = do_create_subscription(env, policy, dataset_id, duration_days, seats, payer)?;
    let sub = get_subscription(env, id)?;
    add_to_seats(env, id, &sub, &consumers)?;
    Ok(id)
}

/// Buy more days and/or seats for an existing subscription.
///
/// * Still valid: only allowed to add days once at most `MAX_EXTENSION_DAYS`
///   remain. The window keeps its start and the payer owes the difference
///   between the fee of the new window and the fee of the current one.
/// * Expired: the window restarts now and lasts `extra_duration_days`; the
///   payer owes the full fee of the new window.
///
/// The resulting window is capped at `MAX_SUBSCRIPTION_DAYS`. Fails with
/// `NothingToPay` unless the fee strictly increases.
///
/// An expired subscription extended with zero extra days ends up with
/// `valid_till == now`: the seats are paid for but access is not restored.
pub fn do_extend_subscription<P: BillingPolicy>(
    env: &Env,
    policy: &P,
    subscription_id: u64,
    extra_duration_days: u32,
    extra_seats: u32,
    payer: Address,
) -> Result<(), Error> {
    payer.require_auth();
    let sub = get_subscription(env, subscription_id)?;
    let now = env.ledger().timestamp();
    let window = ValidityWindow::of(&sub);

    let (current_fee, new_since, new_days) = if window.is_active(now) {
        let max_remaining = MAX_EXTENSION_DAYS as u64 * SECONDS_PER_DAY;
        if extra_duration_days > 0 && window.remaining(now) > max_remaining {
            log!(env, "remaining duration too long", window.remaining(now), max_remaining);
            return Err(Error::RemainingDurationTooLong);
        }
        let current_days = window.duration_days();
        let current_fee = policy.quote_fee(env, current_days, sub.paid_seats)?.amount;
        let new_days = current_days
            .checked_add(extra_duration_days)
            .ok_or(Error::Overflow)?;
        (current_fee, window.since, new_days)
    } else {
        (0, now, extra_duration_days)
    };

    let new_days = cap_duration(new_days);
    let new_seats = sub
        .paid_seats
        .checked_add(extra_seats)
        .ok_or(Error::Overflow)?;
    let new_fee = policy.quote_fee(env, new_days, new_seats)?.amount;
    if new_fee <= current_fee {
        return Err(Error::NothingToPay);
    }

    policy.charge(env, &payer, new_fee - current_fee)?;

    let window = ValidityWindow::starting_at(new_since, new_days)?;
    let sub = Subscription {
        valid_since: window.since,
        valid_till: window.till,
        paid_seats: new_seats,
    };
    storage::save(env, &DataKey::Subscription(subscription_id), &sub);

    publish_paid(env, subscription_id, &sub);
    Ok(())
}
