use soroban_sdk::{Address, Env, IntoVal, Val, Vec};

pub enum EscrowEvent {
    Initialized(Address, Address, Address),
    Listed(u64, Address, i128, i128),
    EarnestDeposited(u64, Address, i128),
    Funded(u64, Address, i128),
    InspectionUpdated(u64, bool),
    SaleApproved(u64, Address),
    SaleFinalized(u64, Address, Address, i128),
    SaleCancelled(u64, Address, Address, i128),
}

impl EscrowEvent {
    pub fn name(&self) -> &'static str {
        match self {
            EscrowEvent::Initialized(..) => stringify!(Initialized),
            EscrowEvent::Listed(..) => stringify!(Listed),
            EscrowEvent::EarnestDeposited(..) => stringify!(EarnestDeposited),
            EscrowEvent::Funded(..) => stringify!(Funded),
            EscrowEvent::InspectionUpdated(..) => stringify!(InspectionUpdated),
            EscrowEvent::SaleApproved(..) => stringify!(SaleApproved),
            EscrowEvent::SaleFinalized(..) => stringify!(SaleFinalized),
            EscrowEvent::SaleCancelled(..) => stringify!(SaleCancelled),
        }
    }

    pub fn publish(&self, env: &Env) {
        let mut v: Vec<Val> = Vec::new(env);

        match self {
            EscrowEvent::Initialized(seller, inspector, lender) => {
                v.push_back(seller.into_val(env));
                v.push_back(inspector.into_val(env));
                v.push_back(lender.into_val(env));
            }
            EscrowEvent::Listed(asset_id, buyer, purchase_price, escrow_amount) => {
                v.push_back(asset_id.into_val(env));
                v.push_back(buyer.into_val(env));
                v.push_back(purchase_price.into_val(env));
                v.push_back(escrow_amount.into_val(env));
            }
            EscrowEvent::EarnestDeposited(asset_id, buyer, amount) => {
                v.push_back(asset_id.into_val(env));
                v.push_back(buyer.into_val(env));
                v.push_back(amount.into_val(env));
            }
            EscrowEvent::Funded(asset_id, funder, amount) => {
                v.push_back(asset_id.into_val(env));
                v.push_back(funder.into_val(env));
                v.push_back(amount.into_val(env));
            }
            EscrowEvent::InspectionUpdated(asset_id, passed) => {
                v.push_back(asset_id.into_val(env));
                v.push_back(passed.into_val(env));
            }
            EscrowEvent::SaleApproved(asset_id, approver) => {
                v.push_back(asset_id.into_val(env));
                v.push_back(approver.into_val(env));
            }
            // (asset, buyer, seller, price)
            EscrowEvent::SaleFinalized(asset_id, buyer, seller, price) => {
                v.push_back(asset_id.into_val(env));
                v.push_back(buyer.into_val(env));
                v.push_back(seller.into_val(env));
                v.push_back(price.into_val(env));
            }
            // (asset, cancelled by, earnest paid to, earnest)
            EscrowEvent::SaleCancelled(asset_id, caller, payee, earnest) => {
                v.push_back(asset_id.into_val(env));
                v.push_back(caller.into_val(env));
                v.push_back(payee.into_val(env));
                v.push_back(earnest.into_val(env));
            }
        }

        env.events().publish((self.name(),), v)
    }
}
