//! Candidate - 型発見で見つかった「登録候補」
//!
//! 実行時リフレクションの代わりに、候補自身が自分の宣言を持ち運びます。
//! - `HandlerCandidate`: handler の型と、宣言した MessageType（または型引数なし）
//! - `MessageKind`: メッセージ種別と、任意の decoder アクセサ

use std::any::{Any, TypeId, type_name};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use super::codec::{Decodable, Parser};
use super::handler::{DynMessageHandler, MessageHandler, TypedHandler};
use super::message::Message;
use crate::domain::{MessageType, ResolutionError};

/// object-construction collaborator が返す、型消去されたインスタンス
pub type Instance = Box<dyn Any + Send + Sync>;

type EraseFn = fn(Instance) -> Result<Arc<dyn DynMessageHandler>, ResolutionError>;

type ParserAccessor = fn() -> Option<Arc<dyn Parser>>;

/// HandlerTypeId は handler の型の同一性
///
/// 比較とハッシュは `TypeId` のみで行い、`name` は診断用です。
#[derive(Debug, Clone, Copy)]
pub struct HandlerTypeId {
    id: TypeId,
    name: &'static str,
}

impl HandlerTypeId {
    pub fn of<H: Any>() -> Self {
        Self {
            id: TypeId::of::<H>(),
            name: type_name::<H>(),
        }
    }

    pub fn type_id(&self) -> TypeId {
        self.id
    }

    pub fn name(&self) -> &'static str {
        self.name
    }
}

impl PartialEq for HandlerTypeId {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for HandlerTypeId {}

impl Hash for HandlerTypeId {
    fn hash<S: Hasher>(&self, state: &mut S) {
        self.id.hash(state);
    }
}

impl fmt::Display for HandlerTypeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

/// Declaration は handler が「何を処理するか」の宣言
#[derive(Debug, Clone)]
pub enum Declaration {
    /// `MessageHandler<M>` の具体的な特殊化
    Typed {
        message_type: MessageType,
        erase: EraseFn,
    },
    /// 型引数を持たない生の宣言（辞書には登録できない）
    Untyped,
}

/// HandlerCandidate は発見された handler 型
#[derive(Debug, Clone)]
pub struct HandlerCandidate {
    handler_type: HandlerTypeId,
    declaration: Declaration,
}

impl HandlerCandidate {
    /// `H: MessageHandler<M>` の候補
    pub fn typed<M: Message, H: MessageHandler<M> + 'static>() -> Self {
        Self {
            handler_type: HandlerTypeId::of::<H>(),
            declaration: Declaration::Typed {
                message_type: MessageType::of::<M>(),
                erase: erase_typed::<M, H>,
            },
        }
    }

    /// 型引数なしで宣言された handler の候補
    pub fn untyped<H: Any>() -> Self {
        Self {
            handler_type: HandlerTypeId::of::<H>(),
            declaration: Declaration::Untyped,
        }
    }

    pub fn handler_type(&self) -> HandlerTypeId {
        self.handler_type
    }

    pub fn declaration(&self) -> &Declaration {
        &self.declaration
    }

    pub fn declared_message_type(&self) -> Option<&MessageType> {
        match &self.declaration {
            Declaration::Typed { message_type, .. } => Some(message_type),
            Declaration::Untyped => None,
        }
    }

    /// resolver が返したインスタンスを DynMessageHandler に変換
    pub fn to_handler(
        &self,
        instance: Instance,
    ) -> Result<Arc<dyn DynMessageHandler>, ResolutionError> {
        match &self.declaration {
            Declaration::Typed { erase, .. } => erase(instance),
            Declaration::Untyped => Err(ResolutionError::TypeMismatch {
                expected: self.handler_type.name(),
            }),
        }
    }
}

fn erase_typed<M: Message, H: MessageHandler<M> + 'static>(
    instance: Instance,
) -> Result<Arc<dyn DynMessageHandler>, ResolutionError> {
    let handler = instance
        .downcast::<H>()
        .map_err(|_| ResolutionError::TypeMismatch {
            expected: type_name::<H>(),
        })?;
    Ok(Arc::new(TypedHandler::<M, H>::new(*handler)))
}

fn parser_of<M: Decodable>() -> Option<Arc<dyn Parser>> {
    Some(M::parser())
}

/// MessageKind は発見されたメッセージ種別
#[derive(Debug, Clone)]
pub struct MessageKind {
    message_type: MessageType,
    type_name: &'static str,
    parser: Option<ParserAccessor>,
}

impl MessageKind {
    /// decoder アクセサを持つ末端のメッセージ種別
    pub fn decodable<M: Decodable>() -> Self {
        Self {
            message_type: MessageType::of::<M>(),
            type_name: type_name::<M>(),
            parser: Some(parser_of::<M>),
        }
    }

    /// decoder を公開しないメッセージ種別
    pub fn opaque<M: Message>() -> Self {
        Self {
            message_type: MessageType::of::<M>(),
            type_name: type_name::<M>(),
            parser: None,
        }
    }

    /// Rust の型を持たない種別（基底・抽象的な種別など）
    pub fn named(type_name: &'static str) -> Self {
        Self {
            message_type: MessageType::new(type_name),
            type_name,
            parser: None,
        }
    }

    /// アクセサが `None` を返す場合（アクセスできない decoder）の種別
    pub fn with_accessor(type_name: &'static str, accessor: ParserAccessor) -> Self {
        Self {
            message_type: MessageType::new(type_name),
            type_name,
            parser: Some(accessor),
        }
    }

    pub fn message_type(&self) -> &MessageType {
        &self.message_type
    }

    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    pub fn has_parser_accessor(&self) -> bool {
        self.parser.is_some()
    }

    /// decoder を取得。持たない、またはアクセスできない場合は `None`
    pub fn parser(&self) -> Option<Arc<dyn Parser>> {
        self.parser.and_then(|accessor| accessor())
    }
}
