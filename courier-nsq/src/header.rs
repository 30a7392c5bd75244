//! Header carriers published with the transport.

use opentelemetry::propagation::{Extractor, Injector};

/// Key/value headers attached to a request or reply.
pub trait Header: Send + Sync {
    /// Value stored under `key`.
    fn get(&self, key: &str) -> Option<&str>;

    /// Store a key/value pair.
    fn set(&mut self, key: &str, value: &str);

    /// Keys stored in this carrier.
    fn keys(&self) -> Vec<&str>;
}

/// Header carrier for NSQ messages.
///
/// NSQ frames carry no headers, so the carrier is always empty: writes are
/// dropped and reads find nothing. Trace context therefore does not
/// propagate through it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HeaderCarrier;

impl Header for HeaderCarrier {
    fn get(&self, _key: &str) -> Option<&str> {
        None
    }

    fn set(&mut self, _key: &str, _value: &str) {}

    fn keys(&self) -> Vec<&str> {
        Vec::new()
    }
}

impl Injector for HeaderCarrier {
    fn set(&mut self, key: &str, value: String) {
        Header::set(self, key, &value);
    }
}

impl Extractor for HeaderCarrier {
    fn get(&self, key: &str) -> Option<&str> {
        Header::get(self, key)
    }

    fn keys(&self) -> Vec<&str> {
        Header::keys(self)
    }
}
