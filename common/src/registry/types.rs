use soroban_sdk::{contracterror, contracttype, Address};

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum RegistryError {
    TokenNotFound = 1,
    NotOwner = 2,
    NotAuthorized = 3,
}

#[derive(Clone)]
#[contracttype]
pub enum RegistryDataKey {
    TokenCount,                 // Last minted token id
    Owner(u64),                 // Current owner of a token
    TokenUri(u64),              // Metadata location, never interpreted on-chain
    Balance(Address),           // Number of tokens held by an address
    Approved(u64),              // Single-token transfer approval
    Operator(Address, Address), // (owner, operator) blanket approval
}
