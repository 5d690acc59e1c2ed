use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt::{Debug, Display};
use std::hash::Hash;

// ============================================================================
// Event Trait
// ============================================================================

/// An event that can travel through an [`EventDispatcher`](crate::event_dispatch::EventDispatcher).
///
/// Handlers are keyed by `Kind`, a closed tag type (usually a fieldless enum),
/// so dispatch never depends on runtime type names.
pub trait Event: Debug + Send + Sync {
    type Kind: Copy + Eq + Hash + Debug + Display + Send + Sync;

    /// Tag used to look up the handlers for this event
    fn kind(&self) -> Self::Kind;

    /// When the event was created
    fn occurred_at(&self) -> DateTime<Utc>;
}

// ============================================================================
// Serialization Helper
// ============================================================================

pub fn serialize_event<E: Serialize>(event: &E) -> Result<String, serde_json::Error> {
    serde_json::to_string(event)
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    enum Kind {
        Ping,
    }

    impl Display for Kind {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            write!(f, "Ping")
        }
    }

    #[derive(Debug, Serialize)]
    struct Ping {
        occurred_at: DateTime<Utc>,
        data: String,
    }

    impl Event for Ping {
        type Kind = Kind;

        fn kind(&self) -> Kind {
            Kind::Ping
        }

        fn occurred_at(&self) -> DateTime<Utc> {
            self.occurred_at
        }
    }

    #[test]
    fn test_event_kind_and_timestamp() {
        let now = Utc::now();
        let event = Ping { occurred_at: now, data: "x".to_string() };

        assert_eq!(event.kind(), Kind::Ping);
        assert_eq!(event.occurred_at(), now);
        assert_eq!(event.kind().to_string(), "Ping");
    }

    #[test]
    fn test_event_serialization() {
        let event = Ping { occurred_at: Utc::now(), data: "payload".to_string() };

        let json = serialize_event(&event).unwrap();
        assert!(json.contains("\"data\":\"payload\""));
        assert!(json.contains("occurred_at"));
    }
}
