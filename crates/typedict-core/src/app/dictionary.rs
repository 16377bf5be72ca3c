//! TypeDictionary - 構築済みの不変な型辞書
//!
//! 起動時に一度だけ組み立てられ、以後は読み取り専用です。
//! `&self` のルックアップしか公開しないため、`Arc<TypeDictionary>` で
//! 複数のコンシューマスレッドからロックなしで共有できます。

use std::sync::Arc;

use crate::domain::{BuildReport, MessageType};
use crate::observability::DictionarySummary;
use crate::typed::{DynMessageHandler, HandlerRegistry, Parser, ParserRegistry};

pub struct TypeDictionary {
    handlers: HandlerRegistry,
    parsers: ParserRegistry,
    report: BuildReport,
}

impl TypeDictionary {
    pub fn new(handlers: HandlerRegistry, parsers: ParserRegistry) -> Self {
        Self::with_report(handlers, parsers, BuildReport::new())
    }

    pub fn with_report(
        handlers: HandlerRegistry,
        parsers: ParserRegistry,
        report: BuildReport,
    ) -> Self {
        Self {
            handlers,
            parsers,
            report,
        }
    }

    pub fn empty() -> Self {
        Self::new(HandlerRegistry::new(), ParserRegistry::new())
    }

    pub fn handler_for(&self, message_type: &MessageType) -> Option<Arc<dyn DynMessageHandler>> {
        self.handlers.get(message_type)
    }

    pub fn parser_for(&self, message_type: &MessageType) -> Option<Arc<dyn Parser>> {
        self.parsers.get(message_type)
    }

    /// handler が登録された MessageType（ソート済み）
    pub fn handled_types(&self) -> Vec<MessageType> {
        self.handlers.message_types()
    }

    /// parser が登録された MessageType（ソート済み）
    pub fn parseable_types(&self) -> Vec<MessageType> {
        self.parsers.message_types()
    }

    /// handler はあるが parser がない MessageType
    pub fn handled_without_parser(&self) -> Vec<MessageType> {
        self.handlers
            .message_types()
            .into_iter()
            .filter(|t| !self.parsers.contains(t))
            .collect()
    }

    pub fn handler_count(&self) -> usize {
        self.handlers.len()
    }

    pub fn parser_count(&self) -> usize {
        self.parsers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty() && self.parsers.is_empty()
    }

    pub fn report(&self) -> &BuildReport {
        &self.report
    }

    pub fn summary(&self) -> DictionarySummary {
        DictionarySummary::new(self.handler_count(), self.parser_count(), &self.report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::typed::JsonParser;
    use crate::typed::fixtures::{
        OrderCancelled, OrderCancelledHandler, OrderPlaced, OrderPlacedHandler, Recorder,
    };

    fn dictionary() -> TypeDictionary {
        let mut handlers = HandlerRegistry::new();
        handlers.register::<OrderPlaced, _>(OrderPlacedHandler::new(Recorder::default()));
        handlers.register::<OrderCancelled, _>(OrderCancelledHandler::new(Recorder::default()));

        let mut parsers = ParserRegistry::new();
        parsers.insert(MessageType::of::<OrderPlaced>(), JsonParser::<OrderPlaced>::shared());

        TypeDictionary::new(handlers, parsers)
    }

    #[test]
    fn lookups_hit_and_miss() {
        let dict = dictionary();
        assert!(dict.handler_for(&MessageType::of::<OrderPlaced>()).is_some());
        assert!(dict.parser_for(&MessageType::of::<OrderPlaced>()).is_some());
        assert!(dict.parser_for(&MessageType::of::<OrderCancelled>()).is_none());
        assert!(dict.handler_for(&MessageType::new("acme.unknown")).is_none());
    }

    #[test]
    fn reports_handled_types_without_parser() {
        let dict = dictionary();
        assert_eq!(dict.handled_without_parser(), vec![MessageType::of::<OrderCancelled>()]);
        assert_eq!(dict.handler_count(), 2);
        assert_eq!(dict.parser_count(), 1);
    }

    #[test]
    fn empty_dictionary_has_no_entries() {
        let dict = TypeDictionary::empty();
        assert!(dict.is_empty());
        assert_eq!(dict.summary(), DictionarySummary::default());
    }

    #[test]
    fn dictionary_is_shareable_across_threads() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<TypeDictionary>();

        let dict = Arc::new(dictionary());
        let reader = {
            let dict = Arc::clone(&dict);
            std::thread::spawn(move || dict.handler_for(&MessageType::of::<OrderPlaced>()).is_some())
        };
        assert!(reader.join().unwrap());
    }
}
