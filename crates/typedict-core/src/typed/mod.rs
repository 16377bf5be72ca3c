//! Typed - 型付きメッセージ API
//!
//! このモジュールは MessageType の typo を型で排除し、
//! Handler と Parser の対応付けを静的に保証します。
//!
//! # 二層構造
//! - **表層（Typed）**: `Message` trait, `MessageHandler<M>` trait, `Decodable` - 型安全
//! - **内部（Dyn）**: `DynMessageHandler`, `AnyMessage`, `Parser` - object-safe, type erasure

pub mod candidate;
pub mod codec;
pub mod handler;
pub mod message;
pub mod registry;

#[cfg(test)]
pub(crate) mod fixtures;

// 主要な trait/型 を再エクスポート
pub use self::candidate::{Declaration, HandlerCandidate, HandlerTypeId, Instance, MessageKind};
pub use self::codec::{DecodeError, Decodable, JsonParser, Parser};
pub use self::handler::{DynMessageHandler, MessageHandler, TypedHandler};
pub use self::message::{AnyMessage, Message};
pub use self::registry::{HandlerRegistry, ParserRegistry};
