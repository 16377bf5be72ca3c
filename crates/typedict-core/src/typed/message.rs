//! Message trait - 型付きメッセージの定義
//!
//! # 学習ポイント
//! - Associated Constants (`const TYPE_NAME`)
//! - Blanket impl による object-safe な型消去（`AnyMessage`）

use std::any::Any;
use std::fmt::Debug;

use crate::domain::MessageType;

/// Message はメッセージ種別と Rust の型を対応付ける
///
/// # 使用例
/// ```ignore
/// #[derive(Debug, Deserialize)]
/// struct OrderPlaced {
///     order_id: String,
/// }
///
/// impl Message for OrderPlaced {
///     const TYPE_NAME: &'static str = "acme.orders.OrderPlaced";
/// }
/// ```
pub trait Message: Debug + Send + Sync + 'static {
    /// スキーマの完全修飾名
    const TYPE_NAME: &'static str;
}

/// AnyMessage は object-safe なメッセージ表現
///
/// Parser が返し、DynMessageHandler が受け取る。
/// 具体的な型へは `into_any()` → `downcast` で戻します。
pub trait AnyMessage: Debug + Send + Sync {
    fn message_type(&self) -> MessageType;

    fn as_any(&self) -> &dyn Any;

    fn into_any(self: Box<Self>) -> Box<dyn Any + Send + Sync>;
}

impl<M: Message> AnyMessage for M {
    fn message_type(&self) -> MessageType {
        MessageType::of::<M>()
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn into_any(self: Box<Self>) -> Box<dyn Any + Send + Sync> {
        self
    }
}
