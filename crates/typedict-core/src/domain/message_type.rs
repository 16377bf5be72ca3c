//! MessageType - メッセージ種別の正準識別子
//!
//! # 学習ポイント
//! - Newtype パターン（`String` をラップして型で区別）
//! - `Hash + Eq` を満たすことで HashMap のキーにできる

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::typed::message::Message;

/// MessageType はメッセージ種別を一意に識別する
///
/// スキーマの完全修飾名（例: `acme.orders.OrderPlaced`）から決定的に導出されます。
/// 同じ記述子からは常に同じ値が得られるため、handler 側の宣言と
/// 発見されたメッセージ種別の両方で同じキーとして使えます。
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MessageType(String);

impl MessageType {
    pub fn new(descriptor: impl Into<String>) -> Self {
        Self(descriptor.into())
    }

    /// `M::TYPE_NAME` から MessageType を導出
    pub fn of<M: Message>() -> Self {
        Self::new(M::TYPE_NAME)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MessageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<&str> for MessageType {
    fn from(descriptor: &str) -> Self {
        Self::new(descriptor)
    }
}

impl From<String> for MessageType {
    fn from(descriptor: String) -> Self {
        Self(descriptor)
    }
}
