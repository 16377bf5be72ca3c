//! typedict-core
//!
//! メッセージ消費サービスのための型辞書（`MessageType → handler` / `MessageType → parser`）。
//!
//! # モジュール構成
//! - **domain**: ドメインモデル（MessageType, MessageEnvelope, errors, build events）
//! - **typed**: 型付き API（Message, MessageHandler<M>, Parser, 候補, レジストリ）
//! - **ports**: 抽象化レイヤー（TypeIntrospector, ObjectResolver）
//! - **impls**: 実装（Manifest, InventoryIntrospector, Container）
//! - **app**: 型辞書の構築と利用（TypeDictionaryFactory, TypeDictionary, Dispatcher）

pub mod app;
pub mod config;
pub mod domain;
pub mod impls;
pub mod observability;
pub mod ports;
pub mod typed;

#[doc(hidden)]
pub use inventory;

pub use app::{BuildError, Dispatcher, TypeDictionary, TypeDictionaryFactory};
pub use domain::{MessageEnvelope, MessageType};
