use crate::utils::DELIMITER;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    name: String,
    address: String,
}

impl Contact {
    pub fn new(name: impl Into<String>, address: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            address: address.into(),
        }
    }

    /// Maps one line to a contact. Lines with fewer than two tab-separated
    /// columns yield `None`; columns past the second are ignored.
    pub fn parse(line: &str) -> Option<Self> {
        let mut columns = line.split(DELIMITER);
        let name = columns.next()?;
        let address = columns.next()?;
        Some(Self::new(name, address))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn address(&self) -> &str {
        &self.address
    }

    pub fn into_columns(self) -> (String, String) {
        (self.name, self.address)
    }
}
