use crate::types::AccountId;

/// The well known accounts every engine starts with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DefaultAccounts {
    pub alice: AccountId,
    pub bob: AccountId,
    pub charlie: AccountId,
    pub django: AccountId,
    pub eve: AccountId,
    pub frank: AccountId,
}

impl DefaultAccounts {
    pub const NAMES: [&'static str; 6] = ["alice", "bob", "charlie", "django", "eve", "frank"];

    pub const fn new() -> Self {
        DefaultAccounts {
            alice: AccountId::new([0x01; 32]),
            bob: AccountId::new([0x02; 32]),
            charlie: AccountId::new([0x03; 32]),
            django: AccountId::new([0x04; 32]),
            eve: AccountId::new([0x05; 32]),
            frank: AccountId::new([0x06; 32]),
        }
    }

    pub fn by_name(&self, name: &str) -> Option<AccountId> {
        match name.to_ascii_lowercase().as_str() {
            "alice" => Some(self.alice),
            "bob" => Some(self.bob),
            "charlie" => Some(self.charlie),
            "django" => Some(self.django),
            "eve" => Some(self.eve),
            "frank" => Some(self.frank),
            _ => None,
        }
    }

    pub fn name_of(&self, account: &AccountId) -> Option<&'static str> {
        Self::NAMES
            .iter()
            .copied()
            .find(|name| self.by_name(name).as_ref() == Some(account))
    }
}

impl Default for DefaultAccounts {
    fn default() -> Self {
        Self::new()
    }
}
