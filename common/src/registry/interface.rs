use soroban_sdk::{contractclient, Address, Env, String};
use super::types::RegistryError as Error;

/// Unique-asset ownership ledger. The escrow only relies on `owner_of` and
/// `transfer_from`; the rest is what sellers use to mint and approve.
#[contractclient(name = "AssetRegistryClient")]
pub trait AssetRegistryTrait {
    fn name(env: Env) -> String;
    fn symbol(env: Env) -> String;
    fn mint(env: Env, to: Address, token_uri: String) -> u64;
    fn owner_of(env: Env, token_id: u64) -> Result<Address, Error>;
    fn balance_of(env: Env, owner: Address) -> u32;
    fn total_supply(env: Env) -> u64;
    fn token_uri(env: Env, token_id: u64) -> Result<String, Error>;
    fn exists(env: Env, token_id: u64) -> bool;
    fn approve(env: Env, owner: Address, operator: Address, token_id: u64) -> Result<(), Error>;
    fn get_approved(env: Env, token_id: u64) -> Option<Address>;
    fn set_approval_for_all(env: Env, owner: Address, operator: Address, approved: bool);
    fn is_approved_for_all(env: Env, owner: Address, operator: Address) -> bool;
    fn transfer_from(
        env: Env,
        spender: Address,
        from: Address,
        to: Address,
        token_id: u64,
    ) -> Result<(), Error>;
}
