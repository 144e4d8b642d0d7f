use soroban_sdk::{contract, contractimpl, Address, Env, String};

use crate::events::RegistryEvent;
use common::{
    registry::{
        interface::AssetRegistryTrait,
        types::{RegistryDataKey as DataKey, RegistryError as Error},
    },
    storage::{
        get_data, get_persistent, has_persistent, remove_persistent, store_persistent,
        update_data, update_persistent,
    },
};

const NAME: &str = "Tokenized Property";
const SYMBOL: &str = "PROP";

#[contract]
pub struct PropertyRegistryContract;

#[contractimpl]
impl AssetRegistryTrait for PropertyRegistryContract {
    fn name(env: Env) -> String {
        String::from_str(&env, NAME)
    }

    fn symbol(env: Env) -> String {
        String::from_str(&env, SYMBOL)
    }

    // Anyone may tokenize a property they hold; ids are sequential from 1.
    fn mint(env: Env, to: Address, token_uri: String) -> u64 {
        to.require_auth();

        let token_id: u64 =
            update_data(&env, &DataKey::TokenCount, |last: Option<u64>| last.unwrap_or(0) + 1);

        store_persistent(&env, &DataKey::Owner(token_id), &to);
        store_persistent(&env, &DataKey::TokenUri(token_id), &token_uri);
        add_balance(&env, &to, 1);

        RegistryEvent::Mint(token_id, to).publish(&env);

        token_id
    }

    fn owner_of(env: Env, token_id: u64) -> Result<Address, Error> {
        get_persistent(&env, &DataKey::Owner(token_id)).ok_or(Error::TokenNotFound)
    }

    fn balance_of(env: Env, owner: Address) -> u32 {
        get_persistent(&env, &DataKey::Balance(owner)).unwrap_or(0)
    }

    fn total_supply(env: Env) -> u64 {
        get_data(&env, &DataKey::TokenCount).unwrap_or(0)
    }

    fn token_uri(env: Env, token_id: u64) -> Result<String, Error> {
        get_persistent(&env, &DataKey::TokenUri(token_id)).ok_or(Error::TokenNotFound)
    }

    fn exists(env: Env, token_id: u64) -> bool {
        has_persistent(&env, &DataKey::Owner(token_id))
    }

    fn approve(env: Env, owner: Address, operator: Address, token_id: u64) -> Result<(), Error> {
        owner.require_auth();

        let current_owner: Address = Self::owner_of(env.clone(), token_id)?;
        if current_owner != owner {
            return Err(Error::NotOwner);
        }

        store_persistent(&env, &DataKey::Approved(token_id), &operator);
        RegistryEvent::Approval(token_id, owner, operator).publish(&env);
        Ok(())
    }

    fn get_approved(env: Env, token_id: u64) -> Option<Address> {
        get_persistent(&env, &DataKey::Approved(token_id))
    }

    fn set_approval_for_all(env: Env, owner: Address, operator: Address, approved: bool) {
        owner.require_auth();

        let key = DataKey::Operator(owner.clone(), operator.clone());
        if approved {
            store_persistent(&env, &key, &true);
        } else {
            remove_persistent(&env, &key);
        }

        RegistryEvent::ApprovalForAll(owner, operator, approved).publish(&env);
    }

    fn is_approved_for_all(env: Env, owner: Address, operator: Address) -> bool {
        get_persistent(&env, &DataKey::Operator(owner, operator)).unwrap_or(false)
    }

    fn transfer_from(
        env: Env,
        spender: Address,
        from: Address,
        to: Address,
        token_id: u64,
    ) -> Result<(), Error> {
        spender.require_auth();

        let owner: Address = Self::owner_of(env.clone(), token_id)?;
        if owner != from {
            return Err(Error::NotOwner);
        }

        let approved: Option<Address> = Self::get_approved(env.clone(), token_id);
        let authorized = spender == owner
            || approved.as_ref() == Some(&spender)
            || Self::is_approved_for_all(env.clone(), owner.clone(), spender.clone());
        if !authorized {
            return Err(Error::NotAuthorized);
        }

        // A single-token approval does not survive a change of owner
        if approved.is_some() {
            remove_persistent(&env, &DataKey::Approved(token_id));
        }

        store_persistent(&env, &DataKey::Owner(token_id), &to);
        add_balance(&env, &from, -1);
        add_balance(&env, &to, 1);

        RegistryEvent::Transfer(token_id, from, to).publish(&env);
        Ok(())
    }
}

fn add_balance(env: &Env, owner: &Address, delta: i32) {
    update_persistent(env, &DataKey::Balance(owner.clone()), |held: Option<u32>| {
        held.unwrap_or(0).saturating_add_signed(delta)
    });
}
