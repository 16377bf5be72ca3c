//! Domain model (message types, envelopes, errors, build events).

pub mod envelope;
pub mod errors;
pub mod events;
pub mod ids;
pub mod message_type;

pub use self::envelope::MessageEnvelope;
pub use self::errors::{BoxError, DiscoveryError, ErrorKind, HandlerError, ResolutionError};
pub use self::events::{BuildEvent, BuildReport};
pub use self::ids::MessageId;
pub use self::message_type::MessageType;
