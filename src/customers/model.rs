//! Customer record and request payloads.

use serde::{Deserialize, Serialize};

/// A stored customer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    pub id: String,
    pub name: String,
    pub role: String,
    pub email: String,
    pub phone: String,
    pub contacted: bool,
}

impl Customer {
    /// Build a record from a create payload and a repository-assigned id.
    pub fn from_create(id: impl Into<String>, create: CreateCustomer) -> Self {
        Self {
            id: id.into(),
            name: create.name,
            role: create.role,
            email: create.email,
            phone: create.phone,
            contacted: create.contacted,
        }
    }

    /// Overwrite only the fields present in `update`.
    pub fn apply(&mut self, update: UpdateCustomer) {
        if let Some(name) = update.name {
            self.name = name;
        }
        if let Some(role) = update.role {
            self.role = role;
        }
        if let Some(email) = update.email {
            self.email = email;
        }
        if let Some(phone) = update.phone {
            self.phone = phone;
        }
        if let Some(contacted) = update.contacted {
            self.contacted = contacted;
        }
    }
}

/// Body of `POST /customers`. Every field is required.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateCustomer {
    pub name: String,
    pub role: String,
    pub email: String,
    pub phone: String,
    pub contacted: bool,
}

/// Body of `PUT /customers/:id`.
///
/// `None` means "leave unchanged"; `Some("")` and `Some(false)` are real values.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateCustomer {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contacted: Option<bool>,
}
