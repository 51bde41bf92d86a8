//! Subscription tokens: one transferable owner per subscription id.
//!
//! Holdings are enumerable so creation can refuse a payer that still holds
//! a token.

use crate::storage;
use crate::types::{DataKey, Error, SubscriptionTransferredEvent};
use soroban_sdk::{symbol_short, Address, Env, Vec};

pub fn owner_of(env: &Env, subscription_id: u64) -> Result<Address, Error> {
    storage::load(env, &DataKey::Owner(subscription_id)).ok_or(Error::NotFound)
}

pub fn holdings_of(env: &Env, owner: &Address) -> Vec<u64> {
    storage::load(env, &DataKey::Holdings(owner.clone())).unwrap_or(Vec::new(env))
}

pub fn balance_of(env: &Env, owner: &Address) -> u32 {
    holdings_of(env, owner).len()
}

/// `caller` must authorize and currently hold `subscription_id`.
pub fn require_subscription_owner(
    env: &Env,
    subscription_id: u64,
    caller: &Address,
) -> Result<(), Error> {
    caller.require_auth();
    if owner_of(env, subscription_id)? != *caller {
        return Err(Error::NotSubscriptionOwner);
    }
    Ok(())
}

pub(crate) fn mint(env: &Env, to: &Address, subscription_id: u64) {
    storage::save(env, &DataKey::Owner(subscription_id), to);
    add_holding(env, to, subscription_id);
}

pub fn do_transfer(
    env: &Env,
    from: Address,
    to: Address,
    subscription_id: u64,
) -> Result<(), Error> {
    require_subscription_owner(env, subscription_id, &from)?;
    if from == to {
        return Ok(());
    }

    storage::save(env, &DataKey::Owner(subscription_id), &to);
    remove_holding(env, &from, subscription_id);
    add_holding(env, &to, subscription_id);

    env.events().publish(
        (symbol_short!("transfer"), subscription_id),
        SubscriptionTransferredEvent {
            subscription_id,
            from,
            to,
        },
    );
    Ok(())
}

fn add_holding(env: &Env, owner: &Address, subscription_id: u64) {
    let mut ids = holdings_of(env, owner);
    ids.push_back(subscription_id);
    storage::save(env, &DataKey::Holdings(owner.clone()), &ids);
}

fn remove_holding(env: &Env, owner: &Address, subscription_id: u64) {
    let key = DataKey::Holdings(owner.clone());
    let mut ids = holdings_of(env, owner);
    if let Some(idx) = ids.first_index_of(subscription_id) {
        ids.remove(idx);
    }
    if ids.is_empty() {
        storage::erase(env, &key);
    } else {
        storage::save(env, &key, &ids);
    }
}
