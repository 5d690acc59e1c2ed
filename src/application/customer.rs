use crate::domain::customer::{Address, Customer};
use crate::domain::{DomainEventDispatcher, Repository};
use crate::infrastructure::RepositoryError;

use super::{publish, ApplicationError};

/// Customer use cases
pub struct CustomerService<'a, R> {
    repository: &'a R,
    dispatcher: &'a DomainEventDispatcher,
}

impl<'a, R> CustomerService<'a, R>
where
    R: Repository<Customer, Error = RepositoryError>,
{
    pub fn new(repository: &'a R, dispatcher: &'a DomainEventDispatcher) -> Self {
        Self { repository, dispatcher }
    }

    /// Create and persist a customer, then publish CustomerCreated
    pub async fn register(&self, id: &str, name: &str) -> Result<Customer, ApplicationError> {
        let customer = Customer::new(id, name)?;
        self.repository.create(&customer).await?;

        tracing::info!(customer_id = %customer.id(), "Registered customer");

        publish(self.dispatcher, customer.created_event())?;
        Ok(customer)
    }

    /// Move a stored customer to a new address, then publish CustomerAddressChanged
    pub async fn change_address(&self, id: &str, address: Address) -> Result<Customer, ApplicationError> {
        let mut customer = self.repository.find(id).await?;
        let event = customer.change_address(address);
        self.repository.update(&customer).await?;

        tracing::info!(customer_id = %customer.id(), address = %event.data.address, "Changed customer address");

        publish(self.dispatcher, event)?;
        Ok(customer)
    }

    pub async fn activate(&self, id: &str) -> Result<Customer, ApplicationError> {
        let mut customer = self.repository.find(id).await?;
        customer.activate()?;
        self.repository.update(&customer).await?;
        Ok(customer)
    }
}
