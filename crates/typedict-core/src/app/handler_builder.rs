//! Handler registry builder
//!
//! 発見された handler 候補ごとに:
//! 1. 宣言された MessageType を取り出す（型引数なしの宣言は除外）
//! 2. ObjectResolver に依存配線済みのインスタンスを要求する（失敗したら除外）
//! 3. マッピングに挿入する（既存エントリは後から来た方で置き換え）
//!
//! 個々の候補の失敗でビルドが中断することはありません。

use tracing::{info, warn};

use crate::domain::{BuildEvent, BuildReport};
use crate::ports::ObjectResolver;
use crate::typed::{HandlerCandidate, HandlerRegistry};

pub fn build_handler_registry<R>(
    candidates: impl IntoIterator<Item = HandlerCandidate>,
    resolver: &R,
    report: &mut BuildReport,
) -> HandlerRegistry
where
    R: ObjectResolver + ?Sized,
{
    let mut registry = HandlerRegistry::new();

    for candidate in candidates {
        let handler_type = candidate.handler_type();

        let Some(message_type) = candidate.declared_message_type().cloned() else {
            warn!(
                handler = %handler_type,
                "Cannot add untyped message handler to type dictionary"
            );
            report.push(BuildEvent::UntypedHandlerExcluded {
                handler: handler_type.name().to_string(),
            });
            continue;
        };

        let handler = match resolver
            .resolve(handler_type)
            .and_then(|instance| candidate.to_handler(instance))
        {
            Ok(handler) => handler,
            Err(err) => {
                warn!(
                    handler = %handler_type,
                    message_type = %message_type,
                    error = %err,
                    "Cannot instantiate message handler"
                );
                report.push(BuildEvent::HandlerConstructionFailed {
                    handler: handler_type.name().to_string(),
                    message_type,
                    reason: err.to_string(),
                });
                continue;
            }
        };

        match registry.insert(message_type.clone(), handler) {
            None => {
                info!(
                    handler = %handler_type,
                    message_type = %message_type,
                    "Added message handler"
                );
                report.push(BuildEvent::HandlerAdded {
                    handler: handler_type.name().to_string(),
                    message_type,
                });
            }
            Some(previous) => {
                let replaced = previous.handler_type();
                warn!(
                    replaced = %replaced,
                    replacement = %handler_type,
                    message_type = %message_type,
                    "Duplicate message handler was replaced"
                );
                report.push(BuildEvent::HandlerReplaced {
                    replaced: replaced.name().to_string(),
                    replacement: handler_type.name().to_string(),
                    message_type,
                });
            }
        }
    }

    registry
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{MessageType, ResolutionError};
    use crate::impls::Container;
    use crate::typed::HandlerTypeId;
    use crate::typed::fixtures::{
        AuditingOrderHandler, OrderCancelled, OrderCancelledHandler, OrderPlaced,
        OrderPlacedHandler, RawHandler, Recorder,
    };

    fn container() -> Container {
        Container::new()
            .bind_instance(Recorder::default())
            .bind(|c| Ok(OrderPlacedHandler::new(c.get()?)))
            .bind(|c| Ok(AuditingOrderHandler::new(c.get()?)))
            .bind(|c| Ok(OrderCancelledHandler::new(c.get()?)))
            .bind(|_| Ok(RawHandler))
    }

    #[test]
    fn empty_candidates_yield_empty_registry() {
        let mut report = BuildReport::new();
        let registry =
            build_handler_registry(Vec::<HandlerCandidate>::new(), &container(), &mut report);
        assert!(registry.is_empty());
        assert!(report.is_empty());
    }

    #[test]
    fn last_candidate_wins_for_duplicate_message_type() {
        let mut report = BuildReport::new();
        let registry = build_handler_registry(
            vec![
                HandlerCandidate::typed::<OrderPlaced, OrderPlacedHandler>(),
                HandlerCandidate::typed::<OrderPlaced, AuditingOrderHandler>(),
            ],
            &container(),
            &mut report,
        );

        assert_eq!(registry.len(), 1);
        let handler = registry.get(&MessageType::of::<OrderPlaced>()).unwrap();
        assert_eq!(handler.handler_type(), HandlerTypeId::of::<AuditingOrderHandler>());

        let replaced = report
            .events()
            .iter()
            .find(|e| matches!(e, BuildEvent::HandlerReplaced { .. }))
            .unwrap();
        match replaced {
            BuildEvent::HandlerReplaced {
                replaced,
                replacement,
                message_type,
            } => {
                assert!(replaced.ends_with("OrderPlacedHandler"));
                assert!(replacement.ends_with("AuditingOrderHandler"));
                assert_eq!(message_type, &MessageType::of::<OrderPlaced>());
            }
            _ => unreachable!(),
        }
    }

    #[test]
    fn untyped_candidate_is_excluded_even_if_constructible() {
        let mut report = BuildReport::new();
        let registry = build_handler_registry(
            vec![HandlerCandidate::untyped::<RawHandler>()],
            &container(),
            &mut report,
        );

        assert!(registry.is_empty());
        assert_eq!(
            report.events(),
            &[BuildEvent::UntypedHandlerExcluded {
                handler: HandlerTypeId::of::<RawHandler>().name().to_string(),
            }]
        );
    }

    #[test]
    fn construction_failure_does_not_block_other_candidates() {
        let resolver = Container::new()
            .bind_instance(Recorder::default())
            .bind::<OrderPlacedHandler, _>(|_| {
                Err(ResolutionError::provisioning::<OrderPlacedHandler>("db unavailable"))
            })
            .bind(|c| Ok(OrderCancelledHandler::new(c.get()?)));

        let mut report = BuildReport::new();
        let registry = build_handler_registry(
            vec![
                HandlerCandidate::typed::<OrderPlaced, OrderPlacedHandler>(),
                HandlerCandidate::typed::<OrderCancelled, OrderCancelledHandler>(),
            ],
            &resolver,
            &mut report,
        );

        assert!(!registry.contains(&MessageType::of::<OrderPlaced>()));
        assert!(registry.contains(&MessageType::of::<OrderCancelled>()));
        assert_eq!(
            report.count(|e| matches!(e, BuildEvent::HandlerConstructionFailed { .. })),
            1
        );
    }

    #[test]
    fn failed_candidate_does_not_replace_existing_entry() {
        let resolver = Container::new()
            .bind_instance(Recorder::default())
            .bind(|c| Ok(OrderPlacedHandler::new(c.get()?)));

        let mut report = BuildReport::new();
        let registry = build_handler_registry(
            vec![
                HandlerCandidate::typed::<OrderPlaced, OrderPlacedHandler>(),
                // AuditingOrderHandler has no binding
                HandlerCandidate::typed::<OrderPlaced, AuditingOrderHandler>(),
            ],
            &resolver,
            &mut report,
        );

        let handler = registry.get(&MessageType::of::<OrderPlaced>()).unwrap();
        assert_eq!(handler.handler_type(), HandlerTypeId::of::<OrderPlacedHandler>());
        assert_eq!(report.count(|e| matches!(e, BuildEvent::HandlerReplaced { .. })), 0);
    }
}
