//! Registry - MessageType をキーにした handler / parser のマッピング
//!
//! # 学習ポイント
//! - HashMap での型消去された trait object の管理
//! - Arc による共有所有権
//! - `insert` が置き換えた値を返すことで「後勝ち」を呼び出し側に知らせる

use std::collections::HashMap;
use std::sync::Arc;

use super::codec::Parser;
use super::handler::{DynMessageHandler, MessageHandler, TypedHandler};
use super::message::Message;
use crate::domain::MessageType;

/// HandlerRegistry は MessageType ごとに一つの handler を持つ
///
/// # 使用例
/// ```ignore
/// let mut registry = HandlerRegistry::new();
/// registry.register::<OrderPlaced, _>(OrderPlacedHandler::new(db));
///
/// let handler = registry.get(&MessageType::of::<OrderPlaced>());
/// ```
#[derive(Default)]
pub struct HandlerRegistry {
    handlers: HashMap<MessageType, Arc<dyn DynMessageHandler>>,
}

impl HandlerRegistry {
    pub fn new() -> Self {
        Self {
            handlers: HashMap::new(),
        }
    }

    /// handler を登録。既存のエントリがあれば置き換え、古い方を返す
    pub fn insert(
        &mut self,
        message_type: MessageType,
        handler: Arc<dyn DynMessageHandler>,
    ) -> Option<Arc<dyn DynMessageHandler>> {
        self.handlers.insert(message_type, handler)
    }

    /// 型付き handler を直接登録
    pub fn register<M: Message, H: MessageHandler<M> + 'static>(
        &mut self,
        handler: H,
    ) -> Option<Arc<dyn DynMessageHandler>> {
        self.insert(MessageType::of::<M>(), Arc::new(TypedHandler::<M, H>::new(handler)))
    }

    pub fn get(&self, message_type: &MessageType) -> Option<Arc<dyn DynMessageHandler>> {
        self.handlers.get(message_type).cloned()
    }

    pub fn contains(&self, message_type: &MessageType) -> bool {
        self.handlers.contains_key(message_type)
    }

    /// 登録済みの MessageType（ソート済み）
    pub fn message_types(&self) -> Vec<MessageType> {
        let mut types: Vec<MessageType> = self.handlers.keys().cloned().collect();
        types.sort();
        types
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}

/// ParserRegistry は MessageType ごとに一つの decoder を持つ
#[derive(Default)]
pub struct ParserRegistry {
    parsers: HashMap<MessageType, Arc<dyn Parser>>,
}

impl ParserRegistry {
    pub fn new() -> Self {
        Self {
            parsers: HashMap::new(),
        }
    }

    pub fn insert(
        &mut self,
        message_type: MessageType,
        parser: Arc<dyn Parser>,
    ) -> Option<Arc<dyn Parser>> {
        self.parsers.insert(message_type, parser)
    }

    pub fn get(&self, message_type: &MessageType) -> Option<Arc<dyn Parser>> {
        self.parsers.get(message_type).cloned()
    }

    pub fn contains(&self, message_type: &MessageType) -> bool {
        self.parsers.contains_key(message_type)
    }

    pub fn message_types(&self) -> Vec<MessageType> {
        let mut types: Vec<MessageType> = self.parsers.keys().cloned().collect();
        types.sort();
        types
    }

    pub fn len(&self) -> usize {
        self.parsers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parsers.is_empty()
    }
}
