use serde::{Deserialize, Serialize};

use crate::errors::ModelError;
use crate::Keyed;

/// A directory entry: person name and free-text postal address.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    pub name: String,
    pub address: String,
}

impl Customer {
    pub fn new(name: impl Into<String>, address: impl Into<String>) -> Self {
        Self { name: name.into(), address: address.into() }
    }
}

impl Keyed for Customer {
    fn key(&self) -> &str { &self.name }

    fn validate(&self) -> Result<(), ModelError> {
        if self.name.trim().is_empty() { return Err(ModelError::Validation("customer name required".into())); }
        Ok(())
    }
}

/// Records loaded into an empty directory at boot, in listing order.
pub fn seed() -> Vec<Customer> {
    vec![
        Customer::new("Jean Dupont", "12 Rue de la Paix, Paris"),
        Customer::new("Marie Martin", "34 Avenue des Champs, Lyon"),
        Customer::new("Pierre Bernard", "56 Boulevard Victor Hugo, Marseille"),
        Customer::new("Sophie Dubois", "78 Rue du Commerce, Toulouse"),
        Customer::new("Luc Petit", "90 Place de la République, Nice"),
    ]
}
