#![cfg(test)]
extern crate std;

use super::*;
use common::escrow::interface::EscrowLedgerClient;
use common::registry::interface::AssetRegistryClient;
use registry::PropertyRegistryContract;
use rejecting_registry::{RejectingRegistry, RejectingRegistryClient};
use soroban_sdk::testutils::{Address as _, StellarAssetContract};
use soroban_sdk::{token, String};

pub const ASSET_ID: u64 = 1;
pub const PRICE: i128 = 10_0_000_000; // 10 in 7 decimals
pub const EARNEST: i128 = 5_0_000_000;
pub const STARTING_FUNDS: i128 = 100_0_000_000;

const PROPERTY_URI: &str =
    "https://ipfs.io/ipfs/QmQVcpsjrA6cr1iJjZAodYwmPekYgbnXGo4DFubJiLc2EB/1.json";

fn create_escrow_contract<'a>(env: &Env) -> EscrowLedgerClient<'a> {
    let contract_id: Address = env.register(EscrowLedgerContract, ());
    EscrowLedgerClient::new(env, &contract_id)
}

fn create_registry_contract<'a>(env: &Env) -> AssetRegistryClient<'a> {
    let contract_id: Address = env.register(PropertyRegistryContract, ());
    AssetRegistryClient::new(env, &contract_id)
}

fn create_token_contract<'a>(
    e: &Env,
    admin: &Address,
) -> (token::Client<'a>, token::StellarAssetClient<'a>) {
    let sac: StellarAssetContract = e.register_stellar_asset_contract_v2(admin.clone());
    (
        token::Client::new(e, &sac.address()),
        token::StellarAssetClient::new(e, &sac.address()),
    )
}

pub struct EscrowTest {
    env: Env,
    escrow_client: EscrowLedgerClient<'static>,
    registry_client: AssetRegistryClient<'static>,
    token_client: token::TokenClient<'static>,
    buyer: Address,
    seller: Address,
    inspector: Address,
    lender: Address,
    other: Address,
}

impl EscrowTest {
    /// Ledger initialized and property 1 listed for `buyer` at PRICE/EARNEST.
    fn setup() -> Self {
        let test = Self::setup_no_list();
        test.mint_and_approve();
        test.escrow_client
            .list(&test.seller, &ASSET_ID, &test.buyer, &PRICE, &EARNEST);
        test
    }

    /// Ledger initialized, nothing minted or listed.
    fn setup_no_list() -> Self {
        let env: Env = Env::default();
        let test = Self::setup_no_init(env);
        test.escrow_client.initialize(
            &test.registry_client.address,
            &test.token_client.address,
            &test.seller,
            &test.inspector,
            &test.lender,
        );
        test
    }

    /// Property 1 listed through a registry that can later be told to
    /// refuse every transfer.
    fn setup_rejecting_registry() -> (Self, RejectingRegistryClient<'static>) {
        let mut test = Self::setup_no_init(Env::default());
        let registry_id: Address = test.env.register(RejectingRegistry, ());
        test.registry_client = AssetRegistryClient::new(&test.env, &registry_id);
        test.escrow_client.initialize(
            &registry_id,
            &test.token_client.address,
            &test.seller,
            &test.inspector,
            &test.lender,
        );
        test.mint_and_approve();
        test.escrow_client
            .list(&test.seller, &ASSET_ID, &test.buyer, &PRICE, &EARNEST);

        let rejecting: RejectingRegistryClient<'static> =
            RejectingRegistryClient::new(&test.env, &registry_id);
        (test, rejecting)
    }

    fn setup_no_init(env: Env) -> Self {
        env.mock_all_auths();

        let escrow_client: EscrowLedgerClient<'_> = create_escrow_contract(&env);
        let registry_client: AssetRegistryClient<'_> = create_registry_contract(&env);

        let buyer: Address = Address::generate(&env);
        let seller: Address = Address::generate(&env);
        let inspector: Address = Address::generate(&env);
        let lender: Address = Address::generate(&env);
        let other: Address = Address::generate(&env);
        let token_admin: Address = Address::generate(&env);

        assert_ne!(buyer, seller);
        assert_ne!(inspector, lender);

        let (token_client, token_admin_client) = create_token_contract(&env, &token_admin);
        token_admin_client.mint(&buyer, &STARTING_FUNDS);
        token_admin_client.mint(&lender, &STARTING_FUNDS);
        token_admin_client.mint(&other, &STARTING_FUNDS);

        EscrowTest {
            env,
            escrow_client,
            registry_client,
            token_client,
            buyer,
            seller,
            inspector,
            lender,
            other,
        }
    }

    /// Mint the next property to the seller and approve the ledger for it.
    fn mint_and_approve(&self) -> u64 {
        let asset_id: u64 = self.mint_property();
        self.registry_client
            .approve(&self.seller, &self.escrow_client.address, &asset_id);
        asset_id
    }

    fn mint_property(&self) -> u64 {
        self.registry_client
            .mint(&self.seller, &String::from_str(&self.env, PROPERTY_URI))
    }

    fn deposit_earnest(&self) {
        self.escrow_client
            .deposit_earnest(&self.buyer, &ASSET_ID, &EARNEST);
    }

    fn pass_inspection(&self) {
        self.escrow_client
            .update_inspection_status(&self.inspector, &ASSET_ID, &true);
    }

    fn approve_all(&self) {
        self.escrow_client.approve_sale(&self.buyer, &ASSET_ID);
        self.escrow_client.approve_sale(&self.seller, &ASSET_ID);
        self.escrow_client.approve_sale(&self.lender, &ASSET_ID);
    }

    fn lender_funds_remainder(&self) {
        self.escrow_client
            .fund(&self.lender, &ASSET_ID, &(PRICE - EARNEST));
    }

    /// Everything `finalize_sale` needs for property 1.
    fn ready_to_finalize(&self) {
        self.deposit_earnest();
        self.pass_inspection();
        self.approve_all();
        self.lender_funds_remainder();
    }

    fn balance_of(&self, who: &Address) -> i128 {
        self.token_client.balance(who)
    }

    /// The bookkept pool always matches what the ledger actually holds.
    fn assert_pool_matches_token_balance(&self) {
        assert_eq!(
            self.escrow_client.get_balance(),
            self.token_client.balance(&self.escrow_client.address)
        );
    }
}

mod inspection;
