//! Dispatcher - 一つのメッセージを handler に届ける
//!
//! # フロー
//! 1. MessageEnvelope の MessageType から handler を引く
//! 2. 同じ MessageType の parser で payload をデコード
//! 3. handler を実行
//!
//! 受信ループ・オフセット管理はこのモジュールの責務ではありません。

use std::sync::Arc;

use tracing::debug;

use super::dictionary::TypeDictionary;
use crate::domain::{HandlerError, MessageEnvelope, MessageType};
use crate::typed::DecodeError;

#[derive(Debug, thiserror::Error)]
pub enum DispatchError {
    #[error("no handler registered for message_type={0}")]
    NoHandler(MessageType),

    #[error("no parser registered for message_type={0}")]
    NoParser(MessageType),

    #[error(transparent)]
    Decode(#[from] DecodeError),

    #[error(transparent)]
    Handler(#[from] HandlerError),
}

/// Dispatcher は TypeDictionary を使ってメッセージをルーティングする
#[derive(Clone)]
pub struct Dispatcher {
    dictionary: Arc<TypeDictionary>,
}

impl Dispatcher {
    pub fn new(dictionary: Arc<TypeDictionary>) -> Self {
        Self { dictionary }
    }

    pub fn dictionary(&self) -> &TypeDictionary {
        &self.dictionary
    }

    pub async fn dispatch(&self, envelope: &MessageEnvelope) -> Result<(), DispatchError> {
        let message_type = envelope.message_type();
        let handler = self
            .dictionary
            .handler_for(message_type)
            .ok_or_else(|| DispatchError::NoHandler(message_type.clone()))?;
        let parser = self
            .dictionary
            .parser_for(message_type)
            .ok_or_else(|| DispatchError::NoParser(message_type.clone()))?;

        let message = parser.parse_from(envelope.payload())?;
        debug!(
            message_id = %envelope.id(),
            message_type = %message_type,
            handler = %handler.handler_type(),
            "Dispatching message"
        );
        handler.handle_dyn(message).await?;
        Ok(())
    }
}
