//! Dataset ownership registry interface and resource-binding checks.

use crate::types::{Binding, DataKey, Error};
use soroban_sdk::{contractclient, log, Address, Env};

/// External registry that tracks who owns each dataset.
#[contractclient(name = "ResourceRegistryClient")]
pub trait ResourceRegistry {
    fn owner_of(env: Env, dataset_id: u128) -> Address;
}

pub fn get_binding(env: &Env) -> Result<Binding, Error> {
    env.storage()
        .instance()
        .get(&DataKey::Binding)
        .ok_or(Error::NotInitialized)
}

/// Fails with `UnsupportedResource` unless `dataset_id` is the bound dataset.
pub fn require_bound_dataset(env: &Env, dataset_id: u128) -> Result<Binding, Error> {
    let binding = get_binding(env)?;
    if binding.dataset_id != dataset_id {
        log!(env, "unsupported dataset", dataset_id, binding.dataset_id);
        return Err(Error::UnsupportedResource);
    }
    Ok(binding)
}

/// Current owner of `binding.dataset_id` according to the registry.
pub fn dataset_owner(env: &Env, binding: &Binding) -> Address {
    ResourceRegistryClient::new(env, &binding.registry).owner_of(&binding.dataset_id)
}

/// `caller` must authorize and own the bound dataset.
pub fn require_dataset_owner(env: &Env, caller: &Address) -> Result<(), Error> {
    let binding = get_binding(env)?;
    caller.require_auth();
    if *caller != dataset_owner(env, &binding) {
        return Err(Error::NotResourceOwner);
    }
    Ok(())
}
