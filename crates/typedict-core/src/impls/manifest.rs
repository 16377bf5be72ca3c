//! Manifest - 明示的な登録リストによる TypeIntrospector
//!
//! クラスパススキャンの代わりに、起動時に組み立てた一覧をそのまま列挙します。
//! 列挙順は登録順なので、重複 handler の勝者は決定的です。

use crate::domain::DiscoveryError;
use crate::ports::TypeIntrospector;
use crate::typed::{Decodable, HandlerCandidate, Message, MessageHandler, MessageKind};

/// Manifest は handler とメッセージ種別の登録リスト
///
/// # 使用例
/// ```ignore
/// let manifest = Manifest::new()
///     .handler::<OrderPlaced, OrderPlacedHandler>()
///     .message::<OrderPlaced>()
///     .opaque_message::<Heartbeat>();
/// ```
#[derive(Debug, Clone, Default)]
pub struct Manifest {
    handlers: Vec<HandlerCandidate>,
    kinds: Vec<MessageKind>,
}

impl Manifest {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn handler<M: Message, H: MessageHandler<M> + 'static>(mut self) -> Self {
        self.handlers.push(HandlerCandidate::typed::<M, H>());
        self
    }

    /// 型引数なしで宣言された handler（辞書からは除外される）
    pub fn untyped_handler<H: 'static>(mut self) -> Self {
        self.handlers.push(HandlerCandidate::untyped::<H>());
        self
    }

    pub fn handler_candidate(mut self, candidate: HandlerCandidate) -> Self {
        self.handlers.push(candidate);
        self
    }

    pub fn message<M: Decodable>(mut self) -> Self {
        self.kinds.push(MessageKind::decodable::<M>());
        self
    }

    pub fn opaque_message<M: Message>(mut self) -> Self {
        self.kinds.push(MessageKind::opaque::<M>());
        self
    }

    pub fn message_kind(mut self, kind: MessageKind) -> Self {
        self.kinds.push(kind);
        self
    }

    pub fn handlers(&self) -> &[HandlerCandidate] {
        &self.handlers
    }

    pub fn kinds(&self) -> &[MessageKind] {
        &self.kinds
    }
}

impl TypeIntrospector for Manifest {
    fn find_handler_implementors(&self) -> Result<Vec<HandlerCandidate>, DiscoveryError> {
        Ok(self.handlers.clone())
    }

    fn find_message_kinds(&self) -> Result<Vec<MessageKind>, DiscoveryError> {
        Ok(self.kinds.clone())
    }
}
