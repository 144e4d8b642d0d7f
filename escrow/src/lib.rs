#![no_std]

mod custody;
mod events;
mod funds;

use common::{
    escrow::{
        interface::EscrowLedgerTrait,
        types::{
            EscrowConfig, EscrowDataKey as DataKey, EscrowError as Error, EscrowRecord,
            EscrowStatus, CONFIG,
        },
    },
    storage::{get_data, get_persistent, has_data, store_data, store_persistent},
};
use custody::AssetCustody;
use events::EscrowEvent;
use soroban_sdk::{contract, contractimpl, log, Address, Env, Map};

#[contract]
pub struct EscrowLedgerContract;

#[contractimpl]
impl EscrowLedgerTrait for EscrowLedgerContract {
    // Roles are bound once and never rebound.
    fn initialize(
        env: Env,
        registry: Address,
        payment_token: Address,
        seller: Address,
        inspector: Address,
        lender: Address,
    ) -> Result<(), Error> {
        seller.require_auth();
        if has_data(&env, &CONFIG) {
            return Err(Error::AlreadyInitialized);
        }

        let config = EscrowConfig {
            registry,
            payment_token,
            seller: seller.clone(),
            inspector: inspector.clone(),
            lender: lender.clone(),
        };
        store_data(&env, &CONFIG, &config);
        store_data(&env, &DataKey::PooledBalance, &0i128);

        EscrowEvent::Initialized(seller, inspector, lender).publish(&env);
        Ok(())
    }

    fn version() -> u32 {
        1
    }

    fn list(
        env: Env,
        caller: Address,
        asset_id: u64,
        buyer: Address,
        purchase_price: i128,
        escrow_amount: i128,
    ) -> Result<EscrowRecord, Error> {
        caller.require_auth();
        let config: EscrowConfig = load_config(&env)?;

        if caller != config.seller {
            log!(&env, "list of asset {} by non-seller {}", asset_id, caller);
            return Err(Error::NotOwnerOrSeller);
        }
        if purchase_price <= 0 || escrow_amount < 0 || escrow_amount > purchase_price {
            return Err(Error::InvalidAmount);
        }
        let existing: Option<EscrowRecord> = get_persistent(&env, &DataKey::Escrow(asset_id));
        if let Some(existing) = existing {
            return Err(if existing.is_listed() {
                Error::AlreadyListed
            } else {
                Error::RecordClosed
            });
        }

        AssetCustody::new(&env, &config).pull_into_custody(&config.seller, asset_id)?;

        let record = EscrowRecord {
            asset_id,
            status: EscrowStatus::Listed,
            buyer: buyer.clone(),
            purchase_price,
            escrow_amount,
            inspection_passed: false,
            approvals: Map::new(&env),
            funded: 0,
            contributions: Map::new(&env),
        };
        store_record(&env, &record);

        EscrowEvent::Listed(asset_id, buyer, purchase_price, escrow_amount).publish(&env);
        Ok(record)
    }

    fn deposit_earnest(env: Env, caller: Address, asset_id: u64, amount: i128) -> Result<(), Error> {
        caller.require_auth();
        let config: EscrowConfig = load_config(&env)?;
        let mut record: EscrowRecord = open_record(&env, asset_id)?;

        if caller != record.buyer {
            return Err(Error::OnlyBuyer);
        }
        if amount <= 0 || amount < record.escrow_amount {
            log!(&env, "earnest {} below required {}", amount, record.escrow_amount);
            return Err(Error::InsufficientEarnestAmount);
        }

        funds::collect(&env, &config, &mut record, &caller, amount)?;
        store_record(&env, &record);

        EscrowEvent::EarnestDeposited(asset_id, caller, amount).publish(&env);
        Ok(())
    }

    // Anyone may top up a listing; the lender uses this for the balance of
    // the purchase price.
    fn fund(env: Env, caller: Address, asset_id: u64, amount: i128) -> Result<(), Error> {
        caller.require_auth();
        let config: EscrowConfig = load_config(&env)?;
        let mut record: EscrowRecord = open_record(&env, asset_id)?;

        if amount <= 0 {
            return Err(Error::InvalidAmount);
        }

        funds::collect(&env, &config, &mut record, &caller, amount)?;
        store_record(&env, &record);

        EscrowEvent::Funded(asset_id, caller, amount).publish(&env);
        Ok(())
    }

    fn update_inspection_status(
        env: Env,
        caller: Address,
        asset_id: u64,
        passed: bool,
    ) -> Result<(), Error> {
        caller.require_auth();
        let config: EscrowConfig = load_config(&env)?;
        let mut record: EscrowRecord = open_record(&env, asset_id)?;

        if caller != config.inspector {
            return Err(Error::OnlyInspector);
        }

        record.inspection_passed = passed;
        store_record(&env, &record);

        EscrowEvent::InspectionUpdated(asset_id, passed).publish(&env);
        Ok(())
    }

    // No role check: only the buyer, seller and lender entries count toward
    // the quorum at finalization.
    fn approve_sale(env: Env, caller: Address, asset_id: u64) -> Result<(), Error> {
        caller.require_auth();
        load_config(&env)?;
        let mut record: EscrowRecord = open_record(&env, asset_id)?;

        if !record.has_approved(&caller) {
            record.approvals.set(caller.clone(), true);
            store_record(&env, &record);
        }

        EscrowEvent::SaleApproved(asset_id, caller).publish(&env);
        Ok(())
    }

    fn finalize_sale(env: Env, caller: Address, asset_id: u64) -> Result<(), Error> {
        caller.require_auth();
        let config: EscrowConfig = load_config(&env)?;
        let mut record: EscrowRecord = open_record(&env, asset_id)?;

        if !record.inspection_passed {
            return Err(Error::InspectionNotPassed);
        }
        let quorum = record.has_approved(&record.buyer)
            && record.has_approved(&config.seller)
            && record.has_approved(&config.lender);
        if !quorum {
            return Err(Error::NotAllPartiesApproved);
        }
        if record.funded < record.purchase_price {
            log!(
                &env,
                "asset {} funded {} of {}",
                asset_id,
                record.funded,
                record.purchase_price
            );
            return Err(Error::InsufficientFunds);
        }

        let buyer: Address = record.buyer.clone();
        AssetCustody::new(&env, &config).release_to(&buyer, asset_id)?;

        let price: i128 = record.purchase_price;
        funds::settle(&env, &config, &mut record, &config.seller, price)?;

        record.contributions = Map::new(&env);
        record.status = EscrowStatus::Finalized;
        store_record(&env, &record);

        EscrowEvent::SaleFinalized(asset_id, buyer, config.seller, price).publish(&env);
        Ok(())
    }

    fn cancel_sale(env: Env, caller: Address, asset_id: u64) -> Result<(), Error> {
        caller.require_auth();
        let config: EscrowConfig = load_config(&env)?;
        let mut record: EscrowRecord = open_record(&env, asset_id)?;

        if caller != record.buyer && caller != config.seller {
            log!(&env, "cancel of asset {} by non-party {}", asset_id, caller);
            return Err(Error::OnlyPartyCanCancel);
        }

        // The buyer forfeits the earnest once inspection has cleared.
        let buyer: Address = record.buyer.clone();
        let earnest: i128 = record.escrow_amount.min(record.contribution_of(&buyer));
        let earnest_payee: Address = if record.inspection_passed {
            config.seller.clone()
        } else {
            buyer.clone()
        };

        AssetCustody::new(&env, &config).release_to(&config.seller, asset_id)?;

        funds::disburse(&env, &config, &mut record, &earnest_payee, earnest)?;
        let contributions: Map<Address, i128> = record.contributions.clone();
        for (contributor, contributed) in contributions.iter() {
            let refund: i128 = if contributor == buyer {
                contributed - earnest
            } else {
                contributed
            };
            funds::disburse(&env, &config, &mut record, &contributor, refund)?;
        }

        record.contributions = Map::new(&env);
        record.status = EscrowStatus::Cancelled;
        store_record(&env, &record);

        EscrowEvent::SaleCancelled(asset_id, caller, earnest_payee, earnest).publish(&env);
        Ok(())
    }

    fn get_balance(env: Env) -> i128 {
        funds::pooled_balance(&env)
    }

    fn escrowed_balance(env: Env, asset_id: u64) -> Result<i128, Error> {
        Ok(read_record(&env, asset_id)?.funded)
    }

    fn get_escrow(env: Env, asset_id: u64) -> Result<EscrowRecord, Error> {
        read_record(&env, asset_id)
    }

    fn status(env: Env, asset_id: u64) -> Result<EscrowStatus, Error> {
        Ok(read_record(&env, asset_id)?.status)
    }

    fn is_listed(env: Env, asset_id: u64) -> bool {
        read_record(&env, asset_id)
            .map(|record| record.is_listed())
            .unwrap_or(false)
    }

    fn buyer(env: Env, asset_id: u64) -> Result<Address, Error> {
        Ok(read_record(&env, asset_id)?.buyer)
    }

    fn purchase_price(env: Env, asset_id: u64) -> Result<i128, Error> {
        Ok(read_record(&env, asset_id)?.purchase_price)
    }

    fn escrow_amount(env: Env, asset_id: u64) -> Result<i128, Error> {
        Ok(read_record(&env, asset_id)?.escrow_amount)
    }

    fn inspection_passed(env: Env, asset_id: u64) -> Result<bool, Error> {
        Ok(read_record(&env, asset_id)?.inspection_passed)
    }

    fn approval(env: Env, asset_id: u64, party: Address) -> bool {
        read_record(&env, asset_id)
            .map(|record| record.has_approved(&party))
            .unwrap_or(false)
    }

    fn seller(env: Env) -> Result<Address, Error> {
        Ok(load_config(&env)?.seller)
    }

    fn inspector(env: Env) -> Result<Address, Error> {
        Ok(load_config(&env)?.inspector)
    }

    fn lender(env: Env) -> Result<Address, Error> {
        Ok(load_config(&env)?.lender)
    }

    fn registry(env: Env) -> Result<Address, Error> {
        Ok(load_config(&env)?.registry)
    }

    fn payment_token(env: Env) -> Result<Address, Error> {
        Ok(load_config(&env)?.payment_token)
    }
}

fn load_config(env: &Env) -> Result<EscrowConfig, Error> {
    get_data(env, &CONFIG).ok_or(Error::NotInitialized)
}

fn read_record(env: &Env, asset_id: u64) -> Result<EscrowRecord, Error> {
    get_persistent(env, &DataKey::Escrow(asset_id)).ok_or(Error::EscrowNotFound)
}

// A record that can still be mutated: finalized and cancelled deals are closed.
fn open_record(env: &Env, asset_id: u64) -> Result<EscrowRecord, Error> {
    let record: EscrowRecord = read_record(env, asset_id)?;
    if !record.is_listed() {
        log!(env, "asset {} escrow is closed", asset_id);
        return Err(Error::RecordClosed);
    }
    Ok(record)
}

fn store_record(env: &Env, record: &EscrowRecord) {
    store_persistent(env, &DataKey::Escrow(record.asset_id), record);
}

#[cfg(test)]
mod test;
