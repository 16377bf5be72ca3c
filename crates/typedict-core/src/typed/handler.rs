//! MessageHandler trait - メッセージを処理する Handler の定義
//!
//! # 学習ポイント
//! - ジェネリック trait (`MessageHandler<M>`): 型引数が「処理する MessageType」の宣言になる
//! - Object-safe trait (`DynMessageHandler`)
//! - Type erasure パターン (`TypedHandler<M, H>` → `DynMessageHandler`)

use std::marker::PhantomData;

use async_trait::async_trait;

use super::candidate::HandlerTypeId;
use super::message::{AnyMessage, Message};
use crate::domain::{HandlerError, MessageType};

/// MessageHandler は M 型のメッセージを処理する
///
/// # 使用例
/// ```ignore
/// struct OrderPlacedHandler {
///     db: Arc<Database>,
/// }
///
/// #[async_trait]
/// impl MessageHandler<OrderPlaced> for OrderPlacedHandler {
///     async fn on_message(&self, message: OrderPlaced) -> Result<(), HandlerError> {
///         self.db.insert(&message.order_id).await
///     }
/// }
/// ```
///
/// # ジェネリクスによる型安全性
/// - `MessageHandler<OrderPlaced>` は `OrderPlaced` しか受け取れない
/// - handler の作者が MessageType を別途書く必要はない
#[async_trait]
pub trait MessageHandler<M: Message>: Send + Sync {
    async fn on_message(&self, message: M) -> Result<(), HandlerError>;
}

/// DynMessageHandler は object-safe な MessageHandler の抽象化
///
/// `TypedHandler<M, H>` を経由することで
/// `HashMap<MessageType, Arc<dyn DynMessageHandler>>` に格納できます。
#[async_trait]
pub trait DynMessageHandler: Send + Sync {
    async fn handle_dyn(&self, message: Box<dyn AnyMessage>) -> Result<(), HandlerError>;

    fn message_type(&self) -> MessageType;

    /// 診断ログで使う handler の型
    fn handler_type(&self) -> HandlerTypeId;
}

pub struct TypedHandler<M: Message, H: MessageHandler<M>> {
    handler: H,
    _marker: PhantomData<fn(M)>,
}

impl<M: Message, H: MessageHandler<M>> TypedHandler<M, H> {
    pub fn new(handler: H) -> Self {
        Self {
            handler,
            _marker: PhantomData,
        }
    }

    pub fn inner(&self) -> &H {
        &self.handler
    }
}

#[async_trait]
impl<M: Message, H: MessageHandler<M> + 'static> DynMessageHandler for TypedHandler<M, H> {
    async fn handle_dyn(&self, message: Box<dyn AnyMessage>) -> Result<(), HandlerError> {
        let actual = message.message_type();
        let message = message.into_any().downcast::<M>().map_err(|_| {
            HandlerError::permanent(format!(
                "message of type '{actual}' routed to handler for '{}'",
                M::TYPE_NAME
            ))
        })?;
        self.handler.on_message(*message).await
    }

    fn message_type(&self) -> MessageType {
        MessageType::of::<M>()
    }

    fn handler_type(&self) -> HandlerTypeId {
        HandlerTypeId::of::<H>()
    }
}
