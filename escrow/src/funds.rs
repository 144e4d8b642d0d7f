use common::{
    escrow::types::{EscrowConfig, EscrowDataKey as DataKey, EscrowError as Error, EscrowRecord},
    storage::{get_data, update_data},
};
use soroban_sdk::{log, token, Address, Env, Map};

// Every unit the ledger holds belongs to exactly one record, so the pooled
// balance is always the sum of `funded` across records.

pub fn pooled_balance(env: &Env) -> i128 {
    get_data(env, &DataKey::PooledBalance).unwrap_or(0)
}

fn adjust_pooled_balance(env: &Env, delta: i128) {
    update_data(env, &DataKey::PooledBalance, |pool: Option<i128>| {
        pool.unwrap_or(0) + delta
    });
}

/// Pull `amount` from `from` into the ledger and credit it to `record`.
pub fn collect(
    env: &Env,
    config: &EscrowConfig,
    record: &mut EscrowRecord,
    from: &Address,
    amount: i128,
) -> Result<(), Error> {
    let token_client: token::Client<'_> = token::Client::new(env, &config.payment_token);
    match token_client.try_transfer(from, &env.current_contract_address(), &amount) {
        Ok(Ok(())) => {}
        _ => {
            log!(env, "token transfer of {} into escrow failed", amount);
            return Err(Error::InsufficientFunds);
        }
    }

    let contributed: i128 = record.contribution_of(from);
    record.contributions.set(from.clone(), contributed + amount);
    record.funded += amount;
    adjust_pooled_balance(env, amount);
    Ok(())
}

/// Pay `amount` of `record`'s funds out to `to`.
pub fn disburse(
    env: &Env,
    config: &EscrowConfig,
    record: &mut EscrowRecord,
    to: &Address,
    amount: i128,
) -> Result<(), Error> {
    if amount <= 0 {
        return Ok(());
    }
    if amount > record.funded {
        log!(env, "asset {} holds {}, cannot pay {}", record.asset_id, record.funded, amount);
        return Err(Error::InsufficientFunds);
    }

    let token_client: token::Client<'_> = token::Client::new(env, &config.payment_token);
    match token_client.try_transfer(&env.current_contract_address(), to, &amount) {
        Ok(Ok(())) => {}
        _ => return Err(Error::InsufficientFunds),
    }

    record.funded -= amount;
    adjust_pooled_balance(env, -amount);
    Ok(())
}

/// Pay `price` to `payee` and hand every unit above it back to whoever put
/// it in. The buyer's own contributions cover the price first; other
/// contributors only cover what is left, in address order.
pub fn settle(
    env: &Env,
    config: &EscrowConfig,
    record: &mut EscrowRecord,
    payee: &Address,
    price: i128,
) -> Result<(), Error> {
    disburse(env, config, record, payee, price)?;

    let buyer: Address = record.buyer.clone();
    let buyer_share: i128 = record.contribution_of(&buyer);
    let from_buyer: i128 = buyer_share.min(price);
    disburse(env, config, record, &buyer, buyer_share - from_buyer)?;

    let mut uncovered: i128 = price - from_buyer;
    let contributions: Map<Address, i128> = record.contributions.clone();
    for (contributor, contributed) in contributions.iter() {
        if contributor == buyer {
            continue;
        }
        let covered: i128 = contributed.min(uncovered);
        uncovered -= covered;
        disburse(env, config, record, &contributor, contributed - covered)?;
    }
    Ok(())
}
