use crate::domain::events::{write_console_line, DomainEvent};
use crate::event_dispatch::{EventHandler, HandlerError};

/// Announces new products on the console
pub struct SendEmailWhenProductIsCreatedHandler;

impl SendEmailWhenProductIsCreatedHandler {
    pub fn message(&self, event: &DomainEvent) -> Option<String> {
        match event {
            DomainEvent::ProductCreated(e) => Some(format!(
                "Sending email to product subscribers: {} ({}) is now available for {:.2}",
                e.data.name, e.data.id, e.data.price
            )),
            _ => None,
        }
    }
}

impl EventHandler<DomainEvent> for SendEmailWhenProductIsCreatedHandler {
    fn handle(&self, event: &DomainEvent) -> Result<(), HandlerError> {
        match self.message(event) {
            Some(line) => write_console_line(&line),
            None => Ok(()),
        }
    }

    fn name(&self) -> &'static str {
        "SendEmailWhenProductIsCreatedHandler"
    }
}
