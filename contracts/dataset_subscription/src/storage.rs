//! Storage helpers shared by the engine modules.
//!
//! Every read or write of a persistent entry pushes its TTL back out to
//! [`PERSISTENT_BUMP_LEDGERS`], so records touched while a subscription is in
//! use never outlive their window by less than a full year.

use crate::types::{
    DataKey, INSTANCE_BUMP_LEDGERS, INSTANCE_BUMP_THRESHOLD, PERSISTENT_BUMP_LEDGERS,
    PERSISTENT_BUMP_THRESHOLD,
};
use soroban_sdk::{Env, IntoVal, TryFromVal, Val};

/// Keep the contract instance (config and id counter) alive.
/// Called at the top of every entrypoint.
pub fn bump_instance(env: &Env) {
    env.storage()
        .instance()
        .extend_ttl(INSTANCE_BUMP_THRESHOLD, INSTANCE_BUMP_LEDGERS);
}

fn bump(env: &Env, key: &DataKey) {
    env.storage()
        .persistent()
        .extend_ttl(key, PERSISTENT_BUMP_THRESHOLD, PERSISTENT_BUMP_LEDGERS);
}

/// Read `key`, extending its TTL on a hit.
pub fn load<V>(env: &Env, key: &DataKey) -> Option<V>
where
    V: TryFromVal<Env, Val>,
{
    let value: Option<V> = env.storage().persistent().get(key);
    if value.is_some() {
        bump(env, key);
    }
    value
}

/// Write `value` under `key` and extend the entry's TTL.
pub fn save<V>(env: &Env, key: &DataKey, value: &V)
where
    V: IntoVal<Env, Val>,
{
    env.storage().persistent().set(key, value);
    bump(env, key);
}

pub fn erase(env: &Env, key: &DataKey) {
    env.storage().persistent().remove(key);
}
