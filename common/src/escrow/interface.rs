use soroban_sdk::{contractclient, Address, Env};
use super::types::{EscrowError as Error, EscrowRecord, EscrowStatus};

#[contractclient(name = "EscrowLedgerClient")]
pub trait EscrowLedgerTrait {
    fn initialize(
        env: Env,
        registry: Address,
        payment_token: Address,
        seller: Address,
        inspector: Address,
        lender: Address,
    ) -> Result<(), Error>;
    fn version() -> u32;

    fn list(
        env: Env,
        caller: Address,
        asset_id: u64,
        buyer: Address,
        purchase_price: i128,
        escrow_amount: i128,
    ) -> Result<EscrowRecord, Error>;
    fn deposit_earnest(env: Env, caller: Address, asset_id: u64, amount: i128) -> Result<(), Error>;
    fn fund(env: Env, caller: Address, asset_id: u64, amount: i128) -> Result<(), Error>;
    fn update_inspection_status(
        env: Env,
        caller: Address,
        asset_id: u64,
        passed: bool,
    ) -> Result<(), Error>;
    fn approve_sale(env: Env, caller: Address, asset_id: u64) -> Result<(), Error>;
    fn finalize_sale(env: Env, caller: Address, asset_id: u64) -> Result<(), Error>;
    fn cancel_sale(env: Env, caller: Address, asset_id: u64) -> Result<(), Error>;

    fn get_balance(env: Env) -> i128;
    fn escrowed_balance(env: Env, asset_id: u64) -> Result<i128, Error>;
    fn get_escrow(env: Env, asset_id: u64) -> Result<EscrowRecord, Error>;
    fn status(env: Env, asset_id: u64) -> Result<EscrowStatus, Error>;
    fn is_listed(env: Env, asset_id: u64) -> bool;
    fn buyer(env: Env, asset_id: u64) -> Result<Address, Error>;
    fn purchase_price(env: Env, asset_id: u64) -> Result<i128, Error>;
    fn escrow_amount(env: Env, asset_id: u64) -> Result<i128, Error>;
    fn inspection_passed(env: Env, asset_id: u64) -> Result<bool, Error>;
    fn approval(env: Env, asset_id: u64, party: Address) -> bool;

    fn seller(env: Env) -> Result<Address, Error>;
    fn inspector(env: Env) -> Result<Address, Error>;
    fn lender(env: Env) -> Result<Address, Error>;
    fn registry(env: Env) -> Result<Address, Error>;
    fn payment_token(env: Env) -> Result<Address, Error>;
}
