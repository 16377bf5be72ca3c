//! Events - 型辞書の構築中に発生した診断イベント
//!
//! ログ（tracing）と同じ内容を構造化して残すことで、
//! 起動後に「どの handler がなぜ除外・置換されたか」を説明できます。

use serde::{Deserialize, Serialize};

use super::message_type::MessageType;

/// BuildEvent は構築パスで起きた一つの出来事
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum BuildEvent {
    HandlerAdded {
        handler: String,
        message_type: MessageType,
    },
    /// 同じ MessageType の handler が後から来たもので置き換えられた
    HandlerReplaced {
        replaced: String,
        replacement: String,
        message_type: MessageType,
    },
    /// 型引数を持たない宣言なので除外された
    UntypedHandlerExcluded { handler: String },
    HandlerConstructionFailed {
        handler: String,
        message_type: MessageType,
        reason: String,
    },
    ParserAdded { message_type: MessageType },
    /// decoder を持たないメッセージ種別（想定内、エラーではない）
    ParserSkipped { kind: String },
}

/// BuildReport は BuildEvent を発生順に保持する
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildReport {
    events: Vec<BuildEvent>,
}

impl BuildReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, event: BuildEvent) {
        self.events.push(event);
    }

    pub fn events(&self) -> &[BuildEvent] {
        &self.events
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// 別のレポートのイベントを末尾に連結
    pub fn extend(&mut self, other: BuildReport) {
        self.events.extend(other.events);
    }

    pub fn count(&self, predicate: impl Fn(&BuildEvent) -> bool) -> usize {
        self.events.iter().filter(|&e| predicate(e)).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn events_serialize_with_snake_case_tag() {
        let e = BuildEvent::UntypedHandlerExcluded {
            handler: "RawHandler".to_string(),
        };
        let v = serde_json::to_value(&e).unwrap();
        assert_eq!(v["event"], "untyped_handler_excluded");
        assert_eq!(v["handler"], "RawHandler");
    }

    #[test]
    fn extend_keeps_order() {
        let mut a = BuildReport::new();
        a.push(BuildEvent::ParserAdded {
            message_type: MessageType::new("a"),
        });
        let mut b = BuildReport::new();
        b.push(BuildEvent::ParserSkipped {
            kind: "b".to_string(),
        });
        a.extend(b);

        assert_eq!(a.events().len(), 2);
        assert!(matches!(a.events()[1], BuildEvent::ParserSkipped { .. }));
        assert_eq!(a.count(|e| matches!(e, BuildEvent::ParserAdded { .. })), 1);
    }
}
