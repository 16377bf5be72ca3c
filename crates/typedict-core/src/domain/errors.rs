//! Errors - エラー型と分類
//!
//! - `HandlerError`: handler 実行時のエラー（Transient / Permanent に分類）
//! - `ResolutionError`: handler インスタンスの構築失敗（候補単位で回復可能）
//! - `DiscoveryError`: 型発見そのものの失敗（ビルド全体を中断する）

use std::error::Error as StdError;

pub type BoxError = Box<dyn StdError + Send + Sync>;

/// ErrorKind は handler 実行エラーの分類
///
/// - Transient: 一時的なエラー（再配送で回復し得る）
/// - Permanent: 恒久的なエラー（再配送は無意味）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Transient,
    Permanent,
}

/// HandlerError は MessageHandler が返すドメインエラー
#[derive(Debug)]
pub struct HandlerError {
    kind: ErrorKind,
    message: String,
    source: Option<BoxError>,
}

impl HandlerError {
    pub fn transient(message: impl Into<String>) -> Self {
        Self {
            kind: ErrorKind::Transient,
            message: message.into(),
            source: None,
        }
    }

    pub fn permanent(message: impl Into<String>) -> Self {
        Self {
            kind: ErrorKind::Permanent,
            message: message.into(),
            source: None,
        }
    }

    pub fn with_source(mut self, source: impl Into<BoxError>) -> Self {
        self.source = Some(source.into());
        self
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl std::fmt::Display for HandlerError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "HandlerError (kind: {:?}): {}", self.kind, self.message)
    }
}

impl StdError for HandlerError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.source.as_deref().map(|e| e as &(dyn StdError + 'static))
    }
}

/// ResolutionError は object-construction collaborator の失敗
///
/// 型辞書の構築では候補単位で吸収されます（その handler だけが除外される）。
#[derive(Debug, thiserror::Error)]
pub enum ResolutionError {
    #[error("no binding for type '{type_name}'")]
    NoBinding { type_name: &'static str },

    #[error("failed to provision '{type_name}': {source}")]
    Provisioning {
        type_name: &'static str,
        #[source]
        source: BoxError,
    },

    #[error("dependency cycle while resolving '{type_name}'")]
    Cycle { type_name: &'static str },

    #[error("binding for '{expected}' produced an instance of a different type")]
    TypeMismatch { expected: &'static str },
}

impl ResolutionError {
    /// factory 内で発生したエラーを Provisioning として包む
    pub fn provisioning<T: ?Sized>(source: impl Into<BoxError>) -> Self {
        Self::Provisioning {
            type_name: std::any::type_name::<T>(),
            source: source.into(),
        }
    }
}

/// DiscoveryError は型発見 collaborator 自体の失敗
///
/// 候補が一つも分からない状態なので、辞書の構築を中断します。
#[derive(Debug, thiserror::Error)]
pub enum DiscoveryError {
    #[error("type discovery unavailable: {0}")]
    Unavailable(String),

    #[error("type discovery failed: {source}")]
    Failed {
        #[source]
        source: BoxError,
    },
}
