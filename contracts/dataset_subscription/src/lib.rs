#![no_std]

// ── Modules ──────────────────────────────────────────────────────────────────
mod admin;
mod billing;
mod consumers;
mod ownership;
mod queries;
mod registry;
mod storage;
mod subscription;
mod types;
mod window;

// ── Re-exports (used by tests and external consumers) ────────────────────────
pub use billing::{BillingPolicy, LinearBilling};
pub use registry::{ResourceRegistry, ResourceRegistryClient};
pub use types::*;
pub use window::ValidityWindow;

use soroban_sdk::{contract, contractimpl, Address, Env, Vec};

// ── Contract ─────────────────────────────────────────────────────────────────

/// Sells seat-limited, time-bounded access to a single dataset.
///
/// Each subscription is a transferable token. Its owner assigns up to
/// `paid_seats` consumer identities, and any of them is covered while the
/// subscription's window is open.
#[contract]
pub struct DatasetSubscriptionManager;

#[contractimpl]
impl DatasetSubscriptionManager {
    // ── Admin / Config ───────────────────────────────────────────────────

    /// Bind the contract to `dataset_id` in `registry` and set the linear fee.
    /// Must be authorized by the dataset's current owner. Callable once.
    pub fn init(
        env: Env,
        registry: Address,
        dataset_id: u128,
        token: Address,
        fee_per_seat_per_day: i128,
    ) -> Result<(), Error> {
        storage::bump_instance(&env);
        admin::do_init(&env, registry, dataset_id, token, fee_per_seat_per_day)
    }

    /// Replace the fee model. Only callable by the dataset owner.
    pub fn set_fee(
        env: Env,
        caller: Address,
        token: Address,
        fee_per_seat_per_day: i128,
    ) -> Result<(), Error> {
        storage::bump_instance(&env);
        admin::do_set_fee(&env, caller, token, fee_per_seat_per_day)
    }

    /// Current fee model.
    pub fn get_fee(env: Env) -> Result<FeeModel, Error> {
        storage::bump_instance(&env);
        admin::do_get_fee(&env)
    }

    /// Registry and dataset this contract sells access to.
    pub fn get_binding(env: Env) -> Result<Binding, Error> {
        storage::bump_instance(&env);
        admin::do_get_binding(&env)
    }

    // ── Quotes ───────────────────────────────────────────────────────────

    /// Fee for a new subscription of `duration_days` days and `seats` seats.
    pub fn quote(
        env: Env,
        dataset_id: u128,
        duration_days: u32,
        seats: u32,
    ) -> Result<FeeQuote, Error> {
        storage::bump_instance(&env);
        let policy = LinearBilling::load(&env)?;
        queries::quote(&env, &policy, dataset_id, duration_days, seats)
    }

    /// Extra fee for adding `extra_seats` to a subscription that is still valid.
    pub fn quote_extra_seats(
        env: Env,
        subscription_id: u64,
        extra_seats: u32,
    ) -> Result<i128, Error> {
        storage::bump_instance(&env);
        let policy = LinearBilling::load(&env)?;
        queries::quote_extra_seats(&env, &policy, subscription_id, extra_seats)
    }

    // ── Subscription lifecycle ───────────────────────────────────────────

    /// Pay for and mint a new subscription owned by `payer`.
    ///
    /// # Errors
    /// Returns [`Error::ConsumerAlreadySubscribed`] while `payer` still holds
    /// a subscription token.
    pub fn create_subscription(
        env: Env,
        dataset_id: u128,
        duration_days: u32,
        seats: u32,
        payer: Address,
    ) -> Result<u64, Error> {
        storage::bump_instance(&env);
        let policy = LinearBilling::load(&env)?;
        subscription::do_create_subscription(&env, &policy, dataset_id, duration_days, seats, payer)
    }

    /// Create a subscription and assign its first consumers in one call.
    pub fn create_with_consumers(
        env: Env,
        dataset_id: u128,
        duration_days: u32,
        seats: u32,
        payer: Address,
        consumers: Vec<Address>,
    ) -> Result<u64, Error> {
        storage::bump_instance(&env);
        let policy = LinearBilling::load(&env)?;
        subscription::do_create_with_consumers(
            &env,
            &policy,
            dataset_id,
            duration_days,
            seats,
            payer,
            consumers,
        )
    }

    /// Buy extra days and/or seats. Anyone may pay for an extension.
    pub fn extend_subscription(
        env: Env,
        subscription_id: u64,
        extra_duration_days: u32,
        extra_seats: u32,
        payer: Address,
    ) -> Result<(), Error> {
        storage::bump_instance(&env);
        let policy = LinearBilling::load(&env)?;
        subscription::do_extend_subscription(
            &env,
            &policy,
            subscription_id,
            extra_duration_days,
            extra_seats,
            payer,
        )
    }

    // ── Seats ────────────────────────────────────────────────────────────

    /// Assign consumers to free seats. Owner only; allowed after expiry.
    pub fn add_consumers(
        env: Env,
        subscription_id: u64,
        caller: Address,
        consumers: Vec<Address>,
    ) -> Result<(), Error> {
        storage::bump_instance(&env);
        consumers::do_add_consumers(&env, subscription_id, caller, consumers)
    }

    /// Free the seats held by `consumers`. Owner only; no refund.
    pub fn remove_consumers(
        env: Env,
        subscription_id: u64,
        caller: Address,
        consumers: Vec<Address>,
    ) -> Result<(), Error> {
        storage::bump_instance(&env);
        consumers::do_remove_consumers(&env, subscription_id, caller, consumers)
    }

    /// Swap each `old_consumers[i]` for `new_consumers[i]`. Owner only.
    pub fn replace_consumers(
        env: Env,
        subscription_id: u64,
        caller: Address,
        old_consumers: Vec<Address>,
        new_consumers: Vec<Address>,
    ) -> Result<(), Error> {
        storage::bump_instance(&env);
        consumers::do_replace_consumers(&env, subscription_id, caller, old_consumers, new_consumers)
    }

    // ── Subscription tokens ──────────────────────────────────────────────

    /// Current holder of the subscription token.
    pub fn owner_of(env: Env, subscription_id: u64) -> Result<Address, Error> {
        storage::bump_instance(&env);
        ownership::owner_of(&env, subscription_id)
    }

    /// Number of subscription tokens held by `owner`.
    pub fn balance_of(env: Env, owner: Address) -> u32 {
        storage::bump_instance(&env);
        ownership::balance_of(&env, &owner)
    }

    /// Subscription ids currently held by `owner`, in acquisition order.
    pub fn subscriptions_of(env: Env, owner: Address) -> Vec<u64> {
        storage::bump_instance(&env);
        ownership::holdings_of(&env, &owner)
    }

    /// Move a subscription token to `to`. `from` must be the current owner.
    pub fn transfer(
        env: Env,
        from: Address,
        to: Address,
        subscription_id: u64,
    ) -> Result<(), Error> {
        storage::bump_instance(&env);
        ownership::do_transfer(&env, from, to, subscription_id)
    }

    // ── Queries ──────────────────────────────────────────────────────────

    /// True if `consumer` holds a seat on any subscription that has not expired.
    pub fn is_covered(env: Env, dataset_id: u128, consumer: Address) -> Result<bool, Error> {
        storage::bump_instance(&env);
        queries::is_covered(&env, dataset_id, consumer)
    }

    /// Read a subscription record by id.
    pub fn get_subscription(env: Env, subscription_id: u64) -> Result<Subscription, Error> {
        storage::bump_instance(&env);
        queries::get_subscription(&env, subscription_id)
    }

    /// True while the subscription's window is open.
    pub fn is_subscription_active(env: Env, subscription_id: u64) -> Result<bool, Error> {
        storage::bump_instance(&env);
        queries::is_subscription_active(&env, subscription_id)
    }

    /// Identities currently holding a seat on the subscription.
    pub fn subscription_consumers(env: Env, subscription_id: u64) -> Result<Vec<Address>, Error> {
        storage::bump_instance(&env);
        queries::subscription_consumers(&env, subscription_id)
    }

    /// Subscriptions that list `consumer`, expired ones included.
    pub fn consumer_subscriptions(env: Env, consumer: Address) -> Vec<u64> {
        storage::bump_instance(&env);
        queries::consumer_subscriptions(&env, consumer)
    }

    /// Total number of subscriptions ever created.
    pub fn subscription_count(env: Env) -> u64 {
        storage::bump_instance(&env);
        queries::subscription_count(&env)
    }
}
