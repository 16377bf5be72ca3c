//! Link-time registration of handlers and message kinds via `inventory`.
//!
//! Each module submits its own entries at start-up with the
//! `register_*!` macros; `InventoryIntrospector` enumerates them all.
//!
//! The enumeration order of `inventory` is unspecified, so when two handlers
//! declare the same message type the surviving one is not deterministic across
//! builds. Use `Manifest` when the winner matters.

use crate::domain::DiscoveryError;
use crate::ports::TypeIntrospector;
use crate::typed::{HandlerCandidate, MessageKind};

/// A handler type submitted with `register_handler!` or `register_untyped_handler!`.
pub struct HandlerRegistration {
    pub candidate: fn() -> HandlerCandidate,
}

/// A message kind submitted with `register_message!` or `register_opaque_message!`.
pub struct MessageRegistration {
    pub kind: fn() -> MessageKind,
}

inventory::collect!(HandlerRegistration);
inventory::collect!(MessageRegistration);

/// Registers `$handler` as the `MessageHandler<$message>` implementation.
#[macro_export]
macro_rules! register_handler {
    ($message:ty, $handler:ty) => {
        $crate::inventory::submit! {
            $crate::impls::registration::HandlerRegistration {
                candidate: $crate::typed::HandlerCandidate::typed::<$message, $handler>,
            }
        }
    };
}

/// Registers a handler that does not declare its message type.
#[macro_export]
macro_rules! register_untyped_handler {
    ($handler:ty) => {
        $crate::inventory::submit! {
            $crate::impls::registration::HandlerRegistration {
                candidate: $crate::typed::HandlerCandidate::untyped::<$handler>,
            }
        }
    };
}

/// Registers a message kind that exposes a decoder through `Decodable`.
#[macro_export]
macro_rules! register_message {
    ($message:ty) => {
        $crate::inventory::submit! {
            $crate::impls::registration::MessageRegistration {
                kind: $crate::typed::MessageKind::decodable::<$message>,
            }
        }
    };
}

/// Registers a message kind without a decoder.
#[macro_export]
macro_rules! register_opaque_message {
    ($message:ty) => {
        $crate::inventory::submit! {
            $crate::impls::registration::MessageRegistration {
                kind: $crate::typed::MessageKind::opaque::<$message>,
            }
        }
    };
}

/// Enumerates everything submitted through the registration macros.
#[derive(Debug, Clone, Copy, Default)]
pub struct InventoryIntrospector;

impl InventoryIntrospector {
    pub fn new() -> Self {
        Self
    }
}

impl TypeIntrospector for InventoryIntrospector {
    fn find_handler_implementors(&self) -> Result<Vec<HandlerCandidate>, DiscoveryError> {
        Ok(inventory::iter::<HandlerRegistration>
            .into_iter()
            .map(|reg| (reg.candidate)())
            .collect())
    }

    fn find_message_kinds(&self) -> Result<Vec<MessageKind>, DiscoveryError> {
        Ok(inventory::iter::<MessageRegistration>
            .into_iter()
            .map(|reg| (reg.kind)())
            .collect())
    }
}
