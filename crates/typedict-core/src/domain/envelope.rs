//! MessageEnvelope - 受信したメッセージの運搬用データ
//!
//! payload はまだデコードされていない wire bytes のままです。
//! デコードは TypeDictionary から引いた Parser が担当します。

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::ids::MessageId;
use super::message_type::MessageType;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MessageEnvelope {
    id: MessageId,
    message_type: MessageType,
    payload: Vec<u8>,
    received_at: DateTime<Utc>,
}

impl MessageEnvelope {
    /// 新しい ID と現在時刻でエンベロープを作成
    pub fn new(message_type: MessageType, payload: impl Into<Vec<u8>>) -> Self {
        Self::with_id(MessageId::generate(), message_type, payload, Utc::now())
    }

    pub fn with_id(
        id: MessageId,
        message_type: MessageType,
        payload: impl Into<Vec<u8>>,
        received_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            message_type,
            payload: payload.into(),
            received_at,
        }
    }

    pub fn id(&self) -> MessageId {
        self.id
    }

    pub fn message_type(&self) -> &MessageType {
        &self.message_type
    }

    pub fn payload(&self) -> &[u8] {
        &self.payload
    }

    pub fn received_at(&self) -> DateTime<Utc> {
        self.received_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use ulid::Ulid;

    #[test]
    fn with_id_keeps_all_fields() {
        let id = MessageId::from_ulid(Ulid::new());
        let at = Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap();
        let env = MessageEnvelope::with_id(id, MessageType::new("a.B"), b"{}".to_vec(), at);

        assert_eq!(env.id(), id);
        assert_eq!(env.message_type().as_str(), "a.B");
        assert_eq!(env.payload(), b"{}");
        assert_eq!(env.received_at(), at);
    }
}
