use soroban_sdk::{Address, Env, IntoVal, Val, Vec};

pub enum RegistryEvent {
    Mint(u64, Address),
    Transfer(u64, Address, Address),
    Approval(u64, Address, Address),
    ApprovalForAll(Address, Address, bool),
}

impl RegistryEvent {
    pub fn name(&self) -> &'static str {
        match self {
            RegistryEvent::Mint(..) => stringify!(Mint),
            RegistryEvent::Transfer(..) => stringify!(Transfer),
            RegistryEvent::Approval(..) => stringify!(Approval),
            RegistryEvent::ApprovalForAll(..) => stringify!(ApprovalForAll),
        }
    }

    pub fn publish(&self, env: &Env) {
        let mut v: Vec<Val> = Vec::new(env);

        match self {
            RegistryEvent::Mint(token_id, owner) => {
                v.push_back(token_id.into_val(env));
                v.push_back(owner.into_val(env));
            }
            RegistryEvent::Transfer(token_id, from, to) => {
                v.push_back(token_id.into_val(env));
                v.push_back(from.into_val(env));
                v.push_back(to.into_val(env));
            }
            RegistryEvent::Approval(token_id, owner, operator) => {
                v.push_back(token_id.into_val(env));
                v.push_back(owner.into_val(env));
                v.push_back(operator.into_val(env));
            }
            RegistryEvent::ApprovalForAll(owner, operator, approved) => {
                v.push_back(owner.into_val(env));
                v.push_back(operator.into_val(env));
                v.push_back(approved.into_val(env));
            }
        }

        env.events().publish((self.name(),), v)
    }
}
