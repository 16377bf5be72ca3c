//! テスト用のメッセージと handler

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::codec::{Decodable, JsonParser, Parser};
use super::handler::MessageHandler;
use super::message::Message;
use crate::domain::HandlerError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderPlaced {
    pub order_id: String,
    pub amount: u64,
}

impl Message for OrderPlaced {
    const TYPE_NAME: &'static str = "acme.orders.OrderPlaced";
}

impl Decodable for OrderPlaced {
    fn parser() -> Arc<dyn Parser> {
        JsonParser::<Self>::shared()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderCancelled {
    pub order_id: String,
}

impl Message for OrderCancelled {
    const TYPE_NAME: &'static str = "acme.orders.OrderCancelled";
}

impl Decodable for OrderCancelled {
    fn parser() -> Arc<dyn Parser> {
        JsonParser::<Self>::shared()
    }
}

/// decoder を公開しないメッセージ
#[derive(Debug, Clone, PartialEq)]
pub struct Heartbeat;

impl Message for Heartbeat {
    const TYPE_NAME: &'static str = "acme.system.Heartbeat";
}

/// handler が受け取ったメッセージを記録する共有バッファ
#[derive(Debug, Clone, Default)]
pub struct Recorder {
    entries: Arc<Mutex<Vec<String>>>,
}

impl Recorder {
    pub fn record(&self, entry: String) {
        if let Ok(mut entries) = self.entries.lock() {
            entries.push(entry);
        }
    }

    pub fn entries(&self) -> Vec<String> {
        self.entries.lock().map(|e| e.clone()).unwrap_or_default()
    }
}

pub struct OrderPlacedHandler {
    recorder: Recorder,
}

impl OrderPlacedHandler {
    pub fn new(recorder: Recorder) -> Self {
        Self { recorder }
    }
}

#[async_trait]
impl MessageHandler<OrderPlaced> for OrderPlacedHandler {
    async fn on_message(&self, message: OrderPlaced) -> Result<(), HandlerError> {
        self.recorder
            .record(format!("OrderPlacedHandler:{}", message.order_id));
        Ok(())
    }
}

/// OrderPlaced を扱う二つ目の handler（重複登録の検証用）
pub struct AuditingOrderHandler {
    recorder: Recorder,
}

impl AuditingOrderHandler {
    pub fn new(recorder: Recorder) -> Self {
        Self { recorder }
    }
}

#[async_trait]
impl MessageHandler<OrderPlaced> for AuditingOrderHandler {
    async fn on_message(&self, message: OrderPlaced) -> Result<(), HandlerError> {
        self.recorder
            .record(format!("AuditingOrderHandler:{}", message.order_id));
        Ok(())
    }
}

pub struct OrderCancelledHandler {
    recorder: Recorder,
}

impl OrderCancelledHandler {
    pub fn new(recorder: Recorder) -> Self {
        Self { recorder }
    }
}

#[async_trait]
impl MessageHandler<OrderCancelled> for OrderCancelledHandler {
    async fn on_message(&self, message: OrderCancelled) -> Result<(), HandlerError> {
        if message.order_id.is_empty() {
            return Err(HandlerError::permanent("empty order id"));
        }
        self.recorder
            .record(format!("OrderCancelledHandler:{}", message.order_id));
        Ok(())
    }
}

/// 型引数を持たない handler
pub struct RawHandler;
