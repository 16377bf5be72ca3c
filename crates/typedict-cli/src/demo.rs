//! Demo shipping domain: messages, handlers and their wiring.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::info;
use typedict_core::domain::{HandlerError, ResolutionError};
use typedict_core::impls::{Container, Manifest};
use typedict_core::typed::{Decodable, JsonParser, Message, MessageHandler, MessageKind, Parser};
use typedict_core::{
    register_handler, register_message, register_opaque_message, register_untyped_handler,
};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParcelScanned {
    pub parcel_id: String,
    pub depot: String,
}

impl Message for ParcelScanned {
    const TYPE_NAME: &'static str = "acme.shipping.ParcelScanned";
}

impl Decodable for ParcelScanned {
    fn parser() -> Arc<dyn Parser> {
        JsonParser::<Self>::shared()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParcelDelivered {
    pub parcel_id: String,
    pub recipient: String,
}

impl Message for ParcelDelivered {
    const TYPE_NAME: &'static str = "acme.shipping.ParcelDelivered";
}

impl Decodable for ParcelDelivered {
    fn parser() -> Arc<dyn Parser> {
        JsonParser::<Self>::shared()
    }
}

/// Internal routing event; it has no public wire format.
#[derive(Debug, Clone)]
pub struct RouteRecalculated;

impl Message for RouteRecalculated {
    const TYPE_NAME: &'static str = "acme.shipping.RouteRecalculated";
}

/// Outbound notifications, shared by handlers.
#[derive(Debug, Clone, Default)]
pub struct Notifier {
    sent: Arc<Mutex<Vec<String>>>,
}

impl Notifier {
    pub fn send(&self, text: String) {
        info!(%text, "Notification sent");
        if let Ok(mut sent) = self.sent.lock() {
            sent.push(text);
        }
    }
}

pub struct ScanLogger;

#[async_trait]
impl MessageHandler<ParcelScanned> for ScanLogger {
    async fn on_message(&self, message: ParcelScanned) -> Result<(), HandlerError> {
        info!(parcel = %message.parcel_id, depot = %message.depot, "Parcel scanned");
        Ok(())
    }
}

/// Also handles `ParcelScanned`; only one of the two survives the build.
pub struct ScanAuditor {
    notifier: Notifier,
}

#[async_trait]
impl MessageHandler<ParcelScanned> for ScanAuditor {
    async fn on_message(&self, message: ParcelScanned) -> Result<(), HandlerError> {
        self.notifier
            .send(format!("audit: {} at {}", message.parcel_id, message.depot));
        Ok(())
    }
}

pub struct DeliveryNotifier {
    notifier: Notifier,
}

#[async_trait]
impl MessageHandler<ParcelDelivered> for DeliveryNotifier {
    async fn on_message(&self, message: ParcelDelivered) -> Result<(), HandlerError> {
        if message.recipient.is_empty() {
            return Err(HandlerError::permanent("delivery without recipient"));
        }
        self.notifier.send(format!(
            "{} delivered to {}",
            message.parcel_id, message.recipient
        ));
        Ok(())
    }
}

/// Its binding fails to provision, so it is excluded at build time.
pub struct RouteArchiver;

#[async_trait]
impl MessageHandler<RouteRecalculated> for RouteArchiver {
    async fn on_message(&self, _message: RouteRecalculated) -> Result<(), HandlerError> {
        Ok(())
    }
}

/// Predates typed handlers and does not declare a message type.
pub struct LegacyTelemetryHandler;

register_handler!(ParcelScanned, ScanLogger);
register_handler!(ParcelScanned, ScanAuditor);
register_handler!(ParcelDelivered, DeliveryNotifier);
register_handler!(RouteRecalculated, RouteArchiver);
register_untyped_handler!(LegacyTelemetryHandler);
register_message!(ParcelScanned);
register_message!(ParcelDelivered);
register_opaque_message!(RouteRecalculated);

/// The same registrations as above, in a fixed order.
pub fn manifest() -> Manifest {
    Manifest::new()
        .handler::<ParcelScanned, ScanLogger>()
        .handler::<ParcelScanned, ScanAuditor>()
        .handler::<ParcelDelivered, DeliveryNotifier>()
        .handler::<RouteRecalculated, RouteArchiver>()
        .untyped_handler::<LegacyTelemetryHandler>()
        .message::<ParcelScanned>()
        .message::<ParcelDelivered>()
        .opaque_message::<RouteRecalculated>()
        .message_kind(MessageKind::named("acme.shipping.ShippingEvent"))
}

pub fn container() -> Container {
    Container::new()
        .bind_instance(Notifier::default())
        .bind(|_| Ok(ScanLogger))
        .bind(|c| {
            Ok(ScanAuditor {
                notifier: c.get()?,
            })
        })
        .bind(|c| {
            Ok(DeliveryNotifier {
                notifier: c.get()?,
            })
        })
        .bind(|_| Ok(LegacyTelemetryHandler))
        .bind::<RouteArchiver, _>(|_| {
            Err(ResolutionError::provisioning::<RouteArchiver>(
                "archive bucket is not configured",
            ))
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use typedict_core::impls::InventoryIntrospector;
    use typedict_core::typed::HandlerTypeId;
    use typedict_core::{MessageType, TypeDictionaryFactory};

    #[test]
    fn manifest_build_keeps_last_scan_handler() {
        let dictionary = TypeDictionaryFactory::new(manifest(), container())
            .create_from_discovery()
            .unwrap();

        let scanned = dictionary
            .handler_for(&MessageType::of::<ParcelScanned>())
            .unwrap();
        assert_eq!(scanned.handler_type(), HandlerTypeId::of::<ScanAuditor>());
        assert!(dictionary.handler_for(&MessageType::of::<RouteRecalculated>()).is_none());
        assert!(dictionary.parser_for(&MessageType::of::<RouteRecalculated>()).is_none());
        assert!(dictionary.parser_for(&MessageType::of::<ParcelDelivered>()).is_some());

        let summary = dictionary.summary();
        assert_eq!(summary.handlers, 2);
        assert_eq!(summary.replaced_handlers, 1);
        assert_eq!(summary.untyped_handlers, 1);
        assert_eq!(summary.failed_handlers, 1);
        assert_eq!(summary.skipped_kinds, 2);
    }

    #[test]
    fn inventory_build_registers_one_scan_handler() {
        let dictionary = TypeDictionaryFactory::new(InventoryIntrospector::new(), container())
            .create_from_discovery()
            .unwrap();

        let scanned = dictionary
            .handler_for(&MessageType::of::<ParcelScanned>())
            .unwrap()
            .handler_type();
        // either registration may win; enumeration order is unspecified
        assert!(
            scanned == HandlerTypeId::of::<ScanLogger>()
                || scanned == HandlerTypeId::of::<ScanAuditor>()
        );
        assert_eq!(dictionary.handler_count(), 2);
        assert_eq!(dictionary.parser_count(), 2);
    }
}
