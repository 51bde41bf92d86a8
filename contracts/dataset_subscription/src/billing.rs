//! Pluggable billing: how much a subscription costs and how it is collected.
//!
//! The lifecycle engine only decides *how much* is owed and *when*; a
//! [`BillingPolicy`] decides the price and moves the money. The contract
//! entrypoints inject [`LinearBilling`].

use crate::registry::{dataset_owner, get_binding};
use crate::types::{Binding, DataKey, Error, FeeModel, FeeQuote};
use soroban_sdk::{token::TokenClient, Address, Env};

pub trait BillingPolicy {
    /// Fee for holding `seats` seats for `duration_days` days. Must be a pure
    /// function of its inputs.
    fn quote_fee(&self, env: &Env, duration_days: u32, seats: u32) -> Result<FeeQuote, Error>;

    /// Collect `amount` from `payer`. Errors are propagated to the caller
    /// unchanged.
    fn charge(&self, env: &Env, payer: &Address, amount: i128) -> Result<(), Error>;
}

/// Per-seat, per-day pricing paid in a single token to the dataset owner.
pub struct LinearBilling {
    binding: Binding,
    model: FeeModel,
}

impl LinearBilling {
    pub fn load(env: &Env) -> Result<Self, Error> {
        Ok(Self {
            binding: get_binding(env)?,
            model: get_fee_model(env)?,
        })
    }
}

impl BillingPolicy for LinearBilling {
    fn quote_fee(&self, _env: &Env, duration_days: u32, seats: u32) -> Result<FeeQuote, Error> {
        let amount = self
            .model
            .fee_per_seat_per_day
            .checked_mul(duration_days as i128)
            .and_then(|v| v.checked_mul(seats as i128))
            .ok_or(Error::Overflow)?;
        Ok(FeeQuote {
            token: self.model.token.clone(),
            amount,
        })
    }

    fn charge(&self, env: &Env, payer: &Address, amount: i128) -> Result<(), Error> {
        if amount < 0 {
            return Err(Error::InvalidAmount);
        }
        if amount == 0 {
            return Ok(());
        }
        let beneficiary = dataset_owner(env, &self.binding);
        TokenClient::new(env, &self.model.token).transfer(payer, &beneficiary, &amount);
        Ok(())
    }
}

pub fn get_fee_model(env: &Env) -> Result<FeeModel, Error> {
    env.storage()
        .instance()
        .get(&DataKey::FeeModel)
        .ok_or(Error::NotInitialized)
}
