use crate::domain::events::{write_console_line, DomainEvent};
use crate::event_dispatch::{EventHandler, HandlerError};

// ============================================================================
// Customer Event Handlers - console notifications
// ============================================================================

/// First of the two CustomerCreated listeners
pub struct FirstCustomerCreatedLogHandler;

impl FirstCustomerCreatedLogHandler {
    pub fn message(&self, event: &DomainEvent) -> Option<String> {
        match event {
            DomainEvent::CustomerCreated(_) => {
                Some("This is the first console.log of the event: CustomerCreated".to_string())
            }
            _ => None,
        }
    }
}

impl EventHandler<DomainEvent> for FirstCustomerCreatedLogHandler {
    fn handle(&self, event: &DomainEvent) -> Result<(), HandlerError> {
        match self.message(event) {
            Some(line) => write_console_line(&line),
            None => Ok(()),
        }
    }

    fn name(&self) -> &'static str {
        "FirstCustomerCreatedLogHandler"
    }
}

/// Second of the two CustomerCreated listeners
pub struct SecondCustomerCreatedLogHandler;

impl SecondCustomerCreatedLogHandler {
    pub fn message(&self, event: &DomainEvent) -> Option<String> {
        match event {
            DomainEvent::CustomerCreated(_) => {
                Some("This is the second console.log of the event: CustomerCreated".to_string())
            }
            _ => None,
        }
    }
}

impl EventHandler<DomainEvent> for SecondCustomerCreatedLogHandler {
    fn handle(&self, event: &DomainEvent) -> Result<(), HandlerError> {
        match self.message(event) {
            Some(line) => write_console_line(&line),
            None => Ok(()),
        }
    }

    fn name(&self) -> &'static str {
        "SecondCustomerCreatedLogHandler"
    }
}

pub struct CustomerAddressChangedLogHandler;

impl CustomerAddressChangedLogHandler {
    pub fn message(&self, event: &DomainEvent) -> Option<String> {
        match event {
            DomainEvent::CustomerAddressChanged(e) => Some(format!(
                "Address of customer: {}, {} changed to: {}",
                e.data.id, e.data.name, e.data.address
            )),
            _ => None,
        }
    }
}

impl EventHandler<DomainEvent> for CustomerAddressChangedLogHandler {
    fn handle(&self, event: &DomainEvent) -> Result<(), HandlerError> {
        match self.message(event) {
            Some(line) => write_console_line(&line),
            None => Ok(()),
        }
    }

    fn name(&self) -> &'static str {
        "CustomerAddressChangedLogHandler"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::customer::{Address, CustomerAddressChangedEvent, CustomerCreatedEvent};

    fn created() -> DomainEvent {
        DomainEvent::CustomerCreated(CustomerCreatedEvent::new("123", "Customer 1"))
    }

    fn address_changed() -> DomainEvent {
        let address = Address::new("Street 1", 123, "13330-250", "São Paulo").unwrap();
        DomainEvent::CustomerAddressChanged(CustomerAddressChangedEvent::new("123", "Customer 1", address))
    }

    #[test]
    fn test_created_handlers_messages() {
        assert_eq!(
            FirstCustomerCreatedLogHandler.message(&created()).unwrap(),
            "This is the first console.log of the event: CustomerCreated"
        );
        assert_eq!(
            SecondCustomerCreatedLogHandler.message(&created()).unwrap(),
            "This is the second console.log of the event: CustomerCreated"
        );
    }

    #[test]
    fn test_address_changed_message_renders_address() {
        assert_eq!(
            CustomerAddressChangedLogHandler.message(&address_changed()).unwrap(),
            "Address of customer: 123, Customer 1 changed to: Street 1, 123, 13330-250 São Paulo"
        );
    }

    #[test]
    fn test_handlers_ignore_other_events() {
        assert!(FirstCustomerCreatedLogHandler.message(&address_changed()).is_none());
        assert!(CustomerAddressChangedLogHandler.message(&created()).is_none());
        assert!(CustomerAddressChangedLogHandler.handle(&created()).is_ok());
    }

    #[test]
    fn test_handle_writes_without_error() {
        assert!(FirstCustomerCreatedLogHandler.handle(&created()).is_ok());
        assert!(CustomerAddressChangedLogHandler.handle(&address_changed()).is_ok());
    }
}
