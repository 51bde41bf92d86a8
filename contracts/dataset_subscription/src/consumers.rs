//! Seat management: the per-subscription consumer set and the reverse index.
//!
//! Every write to either structure goes through [`SeatChanges`], which stages
//! membership changes in memory and applies them to both maps in one commit,
//! so `consumer ∈ Consumers(id) ⇔ id ∈ ConsumerSubs(consumer)` always holds.
//!
//! **PRs that only change how seats are assigned should edit this file only.**

use crate::ownership::require_subscription_owner;
use crate::queries::get_subscription;
use crate::storage;
use crate::types::{ConsumerChangedEvent, DataKey, Error, Subscription};
use soroban_sdk::{log, symbol_short, Address, Env, Map, Vec};

pub fn consumer_set(env: &Env, subscription_id: u64) -> Map<Address, bool> {
    storage::load(env, &DataKey::Consumers(subscription_id)).unwrap_or(Map::new(env))
}

pub fn subscriptions_of_consumer(env: &Env, consumer: &Address) -> Map<u64, bool> {
    storage::load(env, &DataKey::ConsumerSubs(consumer.clone())).unwrap_or(Map::new(env))
}

/// Staged membership changes for one subscription.
struct SeatChanges {
    subscription_id: u64,
    members: Map<Address, bool>,
    /// `(consumer, added)` in the order the changes were made.
    ops: Vec<(Address, bool)>,
}

impl SeatChanges {
    fn load(env: &Env, subscription_id: u64) -> Self {
        Self {
            subscription_id,
            members: consumer_set(env, subscription_id),
            ops: Vec::new(env),
        }
    }

    fn len(&self) -> u32 {
        self.members.len()
    }

    fn insert(&mut self, consumer: Address) -> bool {
        if self.members.contains_key(consumer.clone()) {
            return false;
        }
        self.members.set(consumer.clone(), true);
        self.ops.push_back((consumer, true));
        true
    }

    fn remove(&mut self, consumer: Address) -> bool {
        if self.members.remove(consumer.clone()).is_none() {
            return false;
        }
        self.ops.push_back((consumer, false));
        true
    }

    fn commit(self, env: &Env) {
        if self.ops.is_empty() {
            return;
        }
        let id = self.subscription_id;

        let set_key = DataKey::Consumers(id);
        if self.members.is_empty() {
            storage::erase(env, &set_key);
        } else {
            storage::save(env, &set_key, &self.members);
        }

        for (consumer, added) in self.ops.iter() {
            let index_key = DataKey::ConsumerSubs(consumer.clone());
            let mut subs = subscriptions_of_consumer(env, &consumer);
            let topic = if added {
                subs.set(id, true);
                symbol_short!("con_add")
            } else {
                subs.remove(id);
                symbol_short!("con_rm")
            };
            if subs.is_empty() {
                storage::erase(env, &index_key);
            } else {
                storage::save(env, &index_key, &subs);
            }
            env.events().publish(
                (topic, id),
                ConsumerChangedEvent {
                    subscription_id: id,
                    consumer,
                },
            );
        }
    }
}

pub fn do_add_consumers(
    env: &Env,
    subscription_id: u64,
    caller: Address,
    consumers: Vec<Address>,
) -> Result<(), Error> {
    require_subscription_owner(env, subscription_id, &caller)?;
    let sub = get_subscription(env, subscription_id)?;
    add_to_seats(env, subscription_id, &sub, &consumers)
}

/// Adds `consumers` to the subscription's seats without an ownership check.
///
/// The whole batch is counted against `paid_seats`, duplicates included, and
/// rejected in full if it does not fit. Consumers already present are skipped.
pub(crate) fn add_to_seats(
    env: &Env,
    subscription_id: u64,
    sub: &Subscription,
    consumers: &Vec<Address>,
) -> Result<(), Error> {
    let mut changes = SeatChanges::load(env, subscription_id);
    let attempted = changes
        .len()
        .checked_add(consumers.len())
        .ok_or(Error::Overflow)?;
    if attempted > sub.paid_seats {
        log!(env, "max seats exceeded", sub.paid_seats, attempted);
        return Err(Error::MaxSeatsExceeded);
    }

    for consumer in consumers.iter() {
        changes.insert(consumer);
    }
    changes.commit(env);
    Ok(())
}

/// Removes each listed consumer that is present; absent ones are skipped.
/// Paid seats are not refunded.
pub fn do_remove_consumers(
    env: &Env,
    subscription_id: u64,
    caller: Address,
    consumers: Vec<Address>,
) -> Result<(), Error> {
    require_subscription_owner(env, subscription_id, &caller)?;
    get_subscription(env, subscription_id)?;

    let mut changes = SeatChanges::load(env, subscription_id);
    for consumer in consumers.iter() {
        changes.remove(consumer);
    }
    changes.commit(env);
    Ok(())
}

/// Swaps `old[i]` for `new[i]`, pair by pair.
///
/// Every `old[i]` must be a member when its pair is reached; otherwise nothing
/// is applied and the call fails with `ConsumerNotFound`.
pub fn do_replace_consumers(
    env: &Env,
    subscription_id: u64,
    caller: Address,
    old_consumers: Vec<Address>,
    new_consumers: Vec<Address>,
) -> Result<(), Error> {
    require_subscription_owner(env, subscription_id, &caller)?;
    if old_consumers.len() != new_consumers.len() {
        return Err(Error::ArrayLengthMismatch);
    }
    get_subscription(env, subscription_id)?;

    let mut changes = SeatChanges::load(env, subscription_id);
    for (old, new) in old_consumers.iter().zip(new_consumers.iter()) {
        if !changes.remove(old) {
            return Err(Error::ConsumerNotFound);
        }
        changes.insert(new);
    }
    changes.commit(env);
    Ok(())
}
