//! Parser - wire bytes からメッセージへのデコード
//!
//! # デシリアライズフロー
//! 1. MessageEnvelope から payload bytes を取得
//! 2. TypeDictionary から MessageType に対応する Parser を取得
//! 3. `parse_from` で `Box<dyn AnyMessage>` にデコード
//!
//! Parser はステートレスで、メッセージ種別ごとに一度だけ取得して共有します。

use std::marker::PhantomData;
use std::sync::Arc;

use serde::de::DeserializeOwned;

use super::message::{AnyMessage, Message};
use crate::domain::MessageType;

/// DecodeError は payload のデコード失敗
#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    #[error("malformed payload for '{message_type}': {source}")]
    Malformed {
        message_type: MessageType,
        #[source]
        source: serde_json::Error,
    },
}

/// Parser は一つの MessageType の decoder
pub trait Parser: Send + Sync {
    fn message_type(&self) -> MessageType;

    fn parse_from(&self, bytes: &[u8]) -> Result<Box<dyn AnyMessage>, DecodeError>;
}

/// Decodable はメッセージ種別自身が持つ「引数なしの decoder アクセサ」
///
/// 実装しないメッセージ種別は decoder を持たないものとして扱われます。
pub trait Decodable: Message {
    fn parser() -> Arc<dyn Parser>;
}

/// JsonParser は serde_json で M にデシリアライズする
pub struct JsonParser<M> {
    _marker: PhantomData<fn() -> M>,
}

impl<M: Message + DeserializeOwned> JsonParser<M> {
    pub fn new() -> Self {
        Self {
            _marker: PhantomData,
        }
    }

    /// `Decodable::parser` の実装にそのまま使える共有インスタンス
    pub fn shared() -> Arc<dyn Parser> {
        Arc::new(Self::new())
    }

    pub fn parse(&self, bytes: &[u8]) -> Result<M, DecodeError> {
        serde_json::from_slice(bytes).map_err(|source| DecodeError::Malformed {
            message_type: MessageType::of::<M>(),
            source,
        })
    }
}

impl<M: Message + DeserializeOwned> Default for JsonParser<M> {
    fn default() -> Self {
        Self::new()
    }
}

impl<M: Message + DeserializeOwned> Parser for JsonParser<M> {
    fn message_type(&self) -> MessageType {
        MessageType::of::<M>()
    }

    fn parse_from(&self, bytes: &[u8]) -> Result<Box<dyn AnyMessage>, DecodeError> {
        Ok(Box::new(self.parse(bytes)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::typed::fixtures::OrderPlaced;
    use serde_json::json;

    #[test]
    fn parses_json_payload() {
        let parser = JsonParser::<OrderPlaced>::new();
        let bytes = serde_json::to_vec(&json!({ "order_id": "o-1", "amount": 42 })).unwrap();

        let msg = parser.parse_from(&bytes).unwrap();
        assert_eq!(msg.message_type(), MessageType::of::<OrderPlaced>());

        let order = msg.into_any().downcast::<OrderPlaced>().unwrap();
        assert_eq!(order.amount, 42);
    }

    #[test]
    fn malformed_payload_names_message_type() {
        let parser = JsonParser::<OrderPlaced>::new();
        let err = parser.parse_from(b"not json").unwrap_err();
        assert!(err.to_string().contains(OrderPlaced::TYPE_NAME));
    }

    #[test]
    fn decodable_accessor_returns_matching_parser() {
        let parser = OrderPlaced::parser();
        assert_eq!(parser.message_type(), MessageType::of::<OrderPlaced>());
    }
}
