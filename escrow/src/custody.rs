use common::{
    escrow::types::{EscrowConfig, EscrowError as Error},
    registry::interface::AssetRegistryClient,
};
use soroban_sdk::{log, Address, Env};

/// Custody moves against the asset registry, always with the ledger as the
/// spender. Registry rejections come back as `AssetTransferFailed` instead of
/// trapping, so callers decide what to do before touching their own state.
pub struct AssetCustody<'a> {
    env: &'a Env,
    client: AssetRegistryClient<'a>,
}

impl<'a> AssetCustody<'a> {
    pub fn new(env: &'a Env, config: &EscrowConfig) -> Self {
        AssetCustody {
            env,
            client: AssetRegistryClient::new(env, &config.registry),
        }
    }

    pub fn owner_of(&self, asset_id: u64) -> Option<Address> {
        match self.client.try_owner_of(&asset_id) {
            Ok(Ok(owner)) => Some(owner),
            _ => None,
        }
    }

    pub fn in_custody(&self, asset_id: u64) -> bool {
        self.owner_of(asset_id) == Some(self.env.current_contract_address())
    }

    // Seller must have approved the ledger (or made it an operator) beforehand.
    pub fn pull_into_custody(&self, from: &Address, asset_id: u64) -> Result<(), Error> {
        self.transfer(from, &self.env.current_contract_address(), asset_id)?;

        if !self.in_custody(asset_id) {
            log!(self.env, "asset {} not held by the ledger after transfer", asset_id);
            return Err(Error::AssetTransferFailed);
        }
        Ok(())
    }

    pub fn release_to(&self, to: &Address, asset_id: u64) -> Result<(), Error> {
        self.transfer(&self.env.current_contract_address(), to, asset_id)
    }

    fn transfer(&self, from: &Address, to: &Address, asset_id: u64) -> Result<(), Error> {
        let ledger: Address = self.env.current_contract_address();
        match self.client.try_transfer_from(&ledger, from, to, &asset_id) {
            Ok(Ok(())) => Ok(()),
            _ => {
                log!(self.env, "registry rejected transfer of asset {}", asset_id);
                Err(Error::AssetTransferFailed)
            }
        }
    }
}
