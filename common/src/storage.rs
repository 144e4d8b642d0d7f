//! Storage helpers shared by the escrow ledger and the asset registry.
//!
//! Instance storage carries contract-wide state: configuration, the pooled
//! balance and the token counter. Persistent storage carries one entry per
//! asset or per holder: escrow records, owners, approvals and balances.

use soroban_sdk::{Env, IntoVal, TryFromVal, Val};

const DAY_IN_LEDGERS: u32 = 60 * 60 * 24 / 5;
/// Entries are topped back up to the maximum TTL once they are within a
/// week of it.
const BUMP_WINDOW: u32 = 7 * DAY_IN_LEDGERS;

fn bump_threshold(env: &Env) -> (u32, u32) {
    let max_ttl: u32 = env.storage().max_ttl();
    (max_ttl.saturating_sub(BUMP_WINDOW), max_ttl)
}

pub fn bump_instance(env: &Env) {
    let (threshold, max_ttl) = bump_threshold(env);
    env.storage().instance().extend_ttl(threshold, max_ttl);
}

pub fn bump_persistent<K>(env: &Env, key: &K)
where
    K: IntoVal<Env, Val>,
{
    let (threshold, max_ttl) = bump_threshold(env);
    env.storage()
        .persistent()
        .extend_ttl::<K>(key, threshold, max_ttl);
}

// PERSISTENT STORAGE
// Writes bump the entry so a deal that runs for months is not archived
// halfway through.
pub fn store_persistent<K, V>(env: &Env, key: &K, val: &V)
where
    K: IntoVal<Env, Val>,
    V: IntoVal<Env, Val>,
{
    env.storage().persistent().set(key, val);
    bump_persistent(env, key);
}

pub fn get_persistent<K, V>(env: &Env, key: &K) -> Option<V>
where
    K: IntoVal<Env, Val>,
    V: TryFromVal<Env, Val>,
{
    env.storage().persistent().get(key)
}

/// Read-modify-write of a persistent entry, returning the stored value.
pub fn update_persistent<K, V, F>(env: &Env, key: &K, update: F) -> V
where
    K: IntoVal<Env, Val>,
    V: IntoVal<Env, Val> + TryFromVal<Env, Val>,
    F: FnOnce(Option<V>) -> V,
{
    let updated: V = update(get_persistent(env, key));
    store_persistent(env, key, &updated);
    updated
}

pub fn remove_persistent<K>(env: &Env, key: &K)
where
    K: IntoVal<Env, Val>,
{
    env.storage().persistent().remove(key)
}

pub fn has_persistent<K>(env: &Env, key: &K) -> bool
where
    K: IntoVal<Env, Val>,
{
    env.storage().persistent().has(key)
}

// INSTANCE STORAGE
pub fn store_data<K, V>(env: &Env, key: &K, val: &V)
where
    K: IntoVal<Env, Val>,
    V: IntoVal<Env, Val>,
{
    env.storage().instance().set(key, val);
    bump_instance(env);
}

pub fn get_data<K, V>(env: &Env, key: &K) -> Option<V>
where
    K: IntoVal<Env, Val>,
    V: TryFromVal<Env, Val>,
{
    env.storage().instance().get(key)
}

/// Read-modify-write of an instance entry, returning the stored value.
pub fn update_data<K, V, F>(env: &Env, key: &K, update: F) -> V
where
    K: IntoVal<Env, Val>,
    V: IntoVal<Env, Val> + TryFromVal<Env, Val>,
    F: FnOnce(Option<V>) -> V,
{
    let updated: V = update(get_data(env, key));
    store_data(env, key, &updated);
    updated
}

pub fn has_data<K>(env: &Env, key: &K) -> bool
where
    K: IntoVal<Env, Val>,
{
    env.storage().instance().has(key)
}
