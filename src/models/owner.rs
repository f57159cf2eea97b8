//! Owner model
//!
//! A registered user: login, password hash and the ledger they exclusively
//! own. Logins compare exactly, without case folding.

use serde::{Deserialize, Serialize};

use crate::ledger::Ledger;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Owner {
    login: String,
    /// Argon2 PHC string
    password_hash: String,
    ledger: Ledger,
}

impl Owner {
    /// A new owner with a freshly seeded ledger
    pub fn new(login: impl Into<String>, password_hash: impl Into<String>) -> Self {
        Self {
            login: login.into(),
            password_hash: password_hash.into(),
            ledger: Ledger::new(),
        }
    }

    pub fn login(&self) -> &str {
        &self.login
    }

    pub fn password_hash(&self) -> &str {
        &self.password_hash
    }

    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    pub fn ledger_mut(&mut self) -> &mut Ledger {
        &mut self.ledger
    }

    /// Swap in an imported ledger wholesale
    pub fn replace_ledger(&mut self, ledger: Ledger) -> Ledger {
        std::mem::replace(&mut self.ledger, ledger)
    }
}
