//! Admin and config: init, fee model administration.
//!
//! **PRs that only change configuration or fee administration should edit this file only.**

use crate::billing::get_fee_model;
use crate::registry::{dataset_owner, get_binding, require_dataset_owner};
use crate::types::{Binding, DataKey, Error, FeeModel, FeeSetEvent};
use soroban_sdk::{symbol_short, Address, Env};

/// Bind the contract to one dataset and set the initial fee model.
///
/// The dataset owner reported by `registry` must authorize the call.
pub fn do_init(
    env: &Env,
    registry: Address,
    dataset_id: u128,
    token: Address,
    fee_per_seat_per_day: i128,
) -> Result<(), Error> {
    if env.storage().instance().has(&DataKey::Binding) {
        return Err(Error::AlreadyInitialized);
    }
    if fee_per_seat_per_day < 0 {
        return Err(Error::InvalidAmount);
    }

    let binding = Binding {
        registry,
        dataset_id,
    };
    dataset_owner(env, &binding).require_auth();

    env.storage().instance().set(&DataKey::Binding, &binding);
    env.storage().instance().set(
        &DataKey::FeeModel,
        &FeeModel {
            token,
            fee_per_seat_per_day,
        },
    );
    env.storage().instance().set(&DataKey::NextId, &1u64);
    Ok(())
}

/// Replace the fee model. Only callable by the dataset owner.
///
/// Existing subscriptions keep their windows and seats; later quotes,
/// extensions and creations use the new price.
pub fn do_set_fee(
    env: &Env,
    caller: Address,
    token: Address,
    fee_per_seat_per_day: i128,
) -> Result<(), Error> {
    require_dataset_owner(env, &caller)?;
    if fee_per_seat_per_day < 0 {
        return Err(Error::InvalidAmount);
    }
    env.storage().instance().set(
        &DataKey::FeeModel,
        &FeeModel {
            token: token.clone(),
            fee_per_seat_per_day,
        },
    );
    env.events().publish(
        (symbol_short!("fee_set"),),
        FeeSetEvent {
            token,
            fee_per_seat_per_day,
        },
    );
    Ok(())
}

pub fn do_get_fee(env: &Env) -> Result<FeeModel, Error> {
    get_fee_model(env)
}

pub fn do_get_binding(env: &Env) -> Result<Binding, Error> {
    get_binding(env)
}
