//! Contract types: errors, storage keys, subscription records and events.
//!
//! Kept in a separate module to reduce merge conflicts when editing the
//! lifecycle engine or contract entrypoints.

use soroban_sdk::{contracterror, contracttype, Address};

/// Seconds in one billing day.
pub const SECONDS_PER_DAY: u64 = 86_400;

/// Longest validity window a subscription may ever hold.
pub const MAX_SUBSCRIPTION_DAYS: u32 = 365;

/// A still-valid subscription may only be lengthened once its remaining
/// time has dropped to this many days or fewer.
pub const MAX_EXTENSION_DAYS: u32 = 30;

/// Ledgers closed per day at 5 s/ledger.
pub const LEDGERS_PER_DAY: u32 = 17_280;

/// Storage TTL in ledgers. Covers the longest window a subscription can hold.
pub const PERSISTENT_BUMP_LEDGERS: u32 = MAX_SUBSCRIPTION_DAYS * LEDGERS_PER_DAY;

/// Bump entries once their TTL falls a day below the full amount.
pub const PERSISTENT_BUMP_THRESHOLD: u32 = PERSISTENT_BUMP_LEDGERS - LEDGERS_PER_DAY;

/// Instance storage (binding, fee model, id counter) uses the same lifetime.
pub const INSTANCE_BUMP_LEDGERS: u32 = PERSISTENT_BUMP_LEDGERS;
pub const INSTANCE_BUMP_THRESHOLD: u32 = PERSISTENT_BUMP_THRESHOLD;

/// Storage keys.
///
/// Instance keys (`Binding`, `FeeModel`, `NextId`) hold small, fixed config.
/// Every other key lives in persistent storage with its own TTL.
#[contracttype]
#[derive(Clone)]
pub enum DataKey {
    Binding,
    FeeModel,
    NextId,
    /// Subscription record by id.
    Subscription(u64),
    /// Consumer set of a subscription (`Map<Address, bool>` used as a set).
    Consumers(u64),
    /// Reverse index: subscriptions that list an identity as a consumer.
    ConsumerSubs(Address),
    /// Current holder of a subscription token.
    Owner(u64),
    /// Subscription tokens currently held by an identity.
    Holdings(Address),
}

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum Error {
    Overflow = 403,
    NotFound = 404,

    AlreadyInitialized = 1001,
    NotInitialized = 1002,
    /// The dataset id does not match the one this contract is bound to.
    UnsupportedResource = 1003,
    /// Duration outside `1..=MAX_SUBSCRIPTION_DAYS`.
    InvalidDuration = 1004,
    /// Zero seats requested on creation or zero extra seats quoted.
    ZeroConsumers = 1005,
    /// The payer still holds a subscription token.
    ConsumerAlreadySubscribed = 1006,
    /// The batch would push the consumer count above the paid seats.
    MaxSeatsExceeded = 1007,
    /// A replaced consumer is not a member of the subscription.
    ConsumerNotFound = 1008,
    ArrayLengthMismatch = 1009,
    NotSubscriptionOwner = 1010,
    NotResourceOwner = 1011,
    /// The subscription's validity window has already closed.
    SubscriptionEnded = 1012,
    /// More than `MAX_EXTENSION_DAYS` remain on the current window.
    RemainingDurationTooLong = 1013,
    /// The extension would not increase the fee.
    NothingToPay = 1014,
    /// A fee value is negative.
    InvalidAmount = 1015,
    /// A billing policy refused to collect the payment.
    PaymentRejected = 1016,
}

/// Contract-to-dataset binding, fixed at `init`.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Binding {
    /// Registry contract that tracks dataset ownership.
    pub registry: Address,
    /// The single dataset this contract sells access to.
    pub dataset_id: u128,
}

/// Linear fee model: every seat costs the same amount per day.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct FeeModel {
    pub token: Address,
    pub fee_per_seat_per_day: i128,
}

/// Amount owed for a given duration and seat count.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct FeeQuote {
    pub token: Address,
    pub amount: i128,
}

/// Stored subscription record.
///
/// There is no status field: a subscription is active while
/// `valid_till > now` and expired otherwise. `valid_till - valid_since` is
/// always a whole number of days.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Subscription {
    pub valid_since: u64,
    pub valid_till: u64,
    pub paid_seats: u32,
}

// Event types

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SubscriptionPaidEvent {
    pub subscription_id: u64,
    pub valid_since: u64,
    pub valid_till: u64,
    pub paid_seats: u32,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ConsumerChangedEvent {
    pub subscription_id: u64,
    pub consumer: Address,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SubscriptionTransferredEvent {
    pub subscription_id: u64,
    pub from: Address,
    pub to: Address,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct FeeSetEvent {
    pub token: Address,
    pub fee_per_seat_per_day: i128,
}
