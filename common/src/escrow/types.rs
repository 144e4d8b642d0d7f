use soroban_sdk::{contracterror, contracttype, symbol_short, Address, Map, Symbol};

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum EscrowError {
    // Wrong caller role
    OnlyBuyer = 1,
    OnlyInspector = 2,
    OnlyPartyCanCancel = 3,
    NotOwnerOrSeller = 4,
    // Business rule not met
    InsufficientEarnestAmount = 10,
    InspectionNotPassed = 11,
    NotAllPartiesApproved = 12,
    InsufficientFunds = 13,
    InvalidAmount = 14,
    // Asset registry rejected a transfer
    AssetTransferFailed = 20,
    // Record or contract in the wrong state
    EscrowNotFound = 30,
    AlreadyListed = 31,
    RecordClosed = 32,
    AlreadyInitialized = 33,
    NotInitialized = 34,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum ErrorClass {
    Authorization,
    Precondition,
    Collaborator,
    State,
}

impl EscrowError {
    pub fn class(&self) -> ErrorClass {
        match self {
            EscrowError::OnlyBuyer
            | EscrowError::OnlyInspector
            | EscrowError::OnlyPartyCanCancel
            | EscrowError::NotOwnerOrSeller => ErrorClass::Authorization,
            EscrowError::InsufficientEarnestAmount
            | EscrowError::InspectionNotPassed
            | EscrowError::NotAllPartiesApproved
            | EscrowError::InsufficientFunds
            | EscrowError::InvalidAmount => ErrorClass::Precondition,
            EscrowError::AssetTransferFailed => ErrorClass::Collaborator,
            EscrowError::EscrowNotFound
            | EscrowError::AlreadyListed
            | EscrowError::RecordClosed
            | EscrowError::AlreadyInitialized
            | EscrowError::NotInitialized => ErrorClass::State,
        }
    }
}

/// Roles and collaborators fixed for the lifetime of a ledger.
#[derive(Clone, Debug, Eq, PartialEq)]
#[contracttype]
pub struct EscrowConfig {
    pub registry: Address,
    pub payment_token: Address,
    pub seller: Address,
    pub inspector: Address,
    pub lender: Address,
}

/// Escrow state for one listed asset.
///
/// `funded` is the share of the pooled balance held for this asset and
/// `contributions` records who paid it in, so a cancelled deal can hand
/// every unit back to the address it came from.
#[derive(Clone, Debug, Eq, PartialEq)]
#[contracttype]
pub struct EscrowRecord {
    pub asset_id: u64,
    pub status: EscrowStatus,
    pub buyer: Address,
    pub purchase_price: i128,
    pub escrow_amount: i128,
    pub inspection_passed: bool,
    pub approvals: Map<Address, bool>,
    pub funded: i128,
    pub contributions: Map<Address, i128>,
}

impl EscrowRecord {
    pub fn is_listed(&self) -> bool {
        self.status == EscrowStatus::Listed
    }

    pub fn has_approved(&self, party: &Address) -> bool {
        self.approvals.contains_key(party.clone())
    }

    pub fn contribution_of(&self, party: &Address) -> i128 {
        self.contributions.get(party.clone()).unwrap_or(0)
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[contracttype]
pub enum EscrowStatus {
    Listed = 1,
    Finalized = 2,
    Cancelled = 3,
}

#[derive(Clone)]
#[contracttype]
pub enum EscrowDataKey {
    Escrow(u64),   // EscrowRecord per asset id
    PooledBalance, // Sum of every record's `funded`
}

pub const CONFIG: Symbol = symbol_short!("CONFIG");
