//! Customer storage.
//!
//! # Responsibilities
//! - Own the customer collection for the lifetime of the process
//! - Assign identifiers on create (UUID v4)
//! - Look up, patch and remove records by identifier
//!
//! # Design Decisions
//! - Storage is a `Vec` so listing preserves insertion order
//! - Lookups are linear scans; the collection is expected to be small
//! - Engines dispatch on tokio tasks, so the store is shared behind a single
//!   `Mutex` guarding the whole collection

use std::sync::{Arc, Mutex};
use uuid::Uuid;

use super::error::RepositoryError;
use super::model::{CreateCustomer, Customer, UpdateCustomer};

/// Identifier of the sample record seeded by [`InMemoryCustomerRepository::seeded`].
pub const SAMPLE_CUSTOMER_ID: &str = "867836be-ba5f-4877-b7a7-27fa26a1f6da";

/// Storage contract for customers.
pub trait CustomerRepository {
    /// All customers in storage order.
    fn get_customers(&self) -> &[Customer];

    /// Find one customer by identifier.
    fn get_customer_by_id(&self, id: &str) -> Result<&Customer, RepositoryError>;

    /// Store a new customer under a freshly generated identifier.
    fn add_customer(&mut self, customer: CreateCustomer) -> Customer;

    /// Patch the fields present in `update` and return the stored record.
    fn update_customer(
        &mut self,
        id: &str,
        update: UpdateCustomer,
    ) -> Result<Customer, RepositoryError>;

    /// Remove a customer, keeping the relative order of the rest.
    fn delete_customer(&mut self, id: &str) -> Result<(), RepositoryError>;
}

/// Repository handle shared between request tasks.
pub type SharedRepository = Arc<Mutex<dyn CustomerRepository + Send>>;

/// Wrap a repository for use by the HTTP layer.
pub fn shared<R>(repo: R) -> SharedRepository
where
    R: CustomerRepository + Send + 'static,
{
    Arc::new(Mutex::new(repo))
}

/// Process-lifetime, vector-backed repository.
#[derive(Debug, Default, Clone)]
pub struct InMemoryCustomerRepository {
    customers: Vec<Customer>,
}

impl InMemoryCustomerRepository {
    /// Create an empty repository.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a repository holding the given records, in order.
    pub fn with_customers(customers: Vec<Customer>) -> Self {
        Self { customers }
    }

    /// Create a repository holding one sample customer.
    pub fn seeded() -> Self {
        Self::with_customers(vec![Customer {
            id: SAMPLE_CUSTOMER_ID.to_string(),
            name: "Test".to_string(),
            role: "enginner".to_string(),
            email: "test@test.com".to_string(),
            phone: "18 2818312301".to_string(),
            contacted: true,
        }])
    }

    fn position(&self, id: &str) -> Result<usize, RepositoryError> {
        self.customers
            .iter()
            .position(|c| c.id == id)
            .ok_or(RepositoryError::NotFound)
    }
}

impl CustomerRepository for InMemoryCustomerRepository {
    fn get_customers(&self) -> &[Customer] {
        &self.customers
    }

    fn get_customer_by_id(&self, id: &str) -> Result<&Customer, RepositoryError> {
        let idx = self.position(id)?;
        Ok(&self.customers[idx])
    }

    fn add_customer(&mut self, customer: CreateCustomer) -> Customer {
        let customer = Customer::from_create(Uuid::new_v4().to_string(), customer);
        tracing::debug!(customer_id = %customer.id, "Customer stored");
        self.customers.push(customer.clone());
        customer
    }

    fn update_customer(
        &mut self,
        id: &str,
        update: UpdateCustomer,
    ) -> Result<Customer, RepositoryError> {
        let idx = self.position(id)?;
        let customer = &mut self.customers[idx];
        customer.apply(update);
        Ok(customer.clone())
    }

    fn delete_customer(&mut self, id: &str) -> Result<(), RepositoryError> {
        let idx = self.position(id)?;
        self.customers.remove(idx);
        Ok(())
    }
}
