//! Parser registry builder
//!
//! メッセージ種別ごとに自身の decoder アクセサを呼び、取得できたものだけを登録します。
//! decoder を持たない種別は想定内の頻出ケースなので、エラーにも警告にもしません。

use tracing::{debug, trace};

use crate::domain::{BuildEvent, BuildReport};
use crate::typed::{MessageKind, ParserRegistry};

pub fn build_parser_registry(
    kinds: impl IntoIterator<Item = MessageKind>,
    report: &mut BuildReport,
) -> ParserRegistry {
    let mut registry = ParserRegistry::new();

    for kind in kinds {
        match kind.parser() {
            Some(parser) => {
                debug!(message_type = %kind.message_type(), "Added parser");
                registry.insert(kind.message_type().clone(), parser);
                report.push(BuildEvent::ParserAdded {
                    message_type: kind.message_type().clone(),
                });
            }
            None => {
                trace!(kind = kind.type_name(), "Ignoring message kind without decoder");
                report.push(BuildEvent::ParserSkipped {
                    kind: kind.type_name().to_string(),
                });
            }
        }
    }

    registry
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::MessageType;
    use crate::typed::fixtures::{Heartbeat, OrderCancelled, OrderPlaced};
    use rstest::rstest;

    #[test]
    fn empty_kinds_yield_empty_registry() {
        let mut report = BuildReport::new();
        let registry = build_parser_registry(Vec::<MessageKind>::new(), &mut report);
        assert!(registry.is_empty());
    }

    #[test]
    fn decodable_kinds_are_keyed_by_their_message_type() {
        let mut report = BuildReport::new();
        let registry = build_parser_registry(
            vec![
                MessageKind::decodable::<OrderPlaced>(),
                MessageKind::decodable::<OrderCancelled>(),
            ],
            &mut report,
        );

        assert_eq!(
            registry.message_types(),
            vec![MessageType::of::<OrderCancelled>(), MessageType::of::<OrderPlaced>()]
        );
        let parser = registry.get(&MessageType::of::<OrderPlaced>()).unwrap();
        assert_eq!(parser.message_type(), MessageType::of::<OrderPlaced>());
    }

    #[rstest]
    #[case::opaque(MessageKind::opaque::<Heartbeat>())]
    #[case::base_kind(MessageKind::named("acme.orders.OrderEvent"))]
    #[case::inaccessible(MessageKind::with_accessor("acme.orders.Sealed", || None))]
    fn kinds_without_decoder_are_skipped(#[case] kind: MessageKind) {
        let mut report = BuildReport::new();
        let message_type = kind.message_type().clone();
        let registry = build_parser_registry(vec![kind], &mut report);

        assert!(!registry.contains(&message_type));
        assert!(matches!(report.events(), [BuildEvent::ParserSkipped { .. }]));
    }

    #[test]
    fn skipped_kinds_do_not_affect_others() {
        let mut report = BuildReport::new();
        let registry = build_parser_registry(
            vec![
                MessageKind::opaque::<Heartbeat>(),
                MessageKind::decodable::<OrderPlaced>(),
            ],
            &mut report,
        );

        assert_eq!(registry.len(), 1);
        assert!(registry.contains(&MessageType::of::<OrderPlaced>()));
    }
}
