//! TypeDictionaryFactory - 型辞書の組み立て
//!
//! # 学習ポイント
//! - Builder パターンの実装
//! - 二つの独立した構築パス（handler / parser）を一つの不変な値にまとめる
//! - 起動時検証（Fail-fast 設計、任意）

use tracing::info;

use super::dictionary::TypeDictionary;
use super::handler_builder::build_handler_registry;
use super::parser_builder::build_parser_registry;
use crate::config::DictionaryConfig;
use crate::domain::{BuildReport, DiscoveryError, MessageType};
use crate::ports::{ObjectResolver, TypeIntrospector};

/// TypeDictionaryFactory は発見された型から TypeDictionary を構築
///
/// # 使用例
/// ```ignore
/// let dictionary = TypeDictionaryFactory::new(manifest, container)
///     .expect_handlers([MessageType::of::<OrderPlaced>()])
///     .create_from_discovery()?;
/// ```
///
/// # 失敗の扱い
/// - 個々の候補の失敗（型引数なし、構築失敗、decoder なし）は除外されるだけ
/// - 型発見そのものの失敗は `BuildError::Discovery` でビルド全体を中断
/// - expect_handlers() / require_parsers() を設定した場合のみ、組み立て後に検証する
pub struct TypeDictionaryFactory<I, R> {
    introspector: I,
    resolver: R,
    expected_handlers: Option<Vec<MessageType>>,
    require_parsers: bool,
}

/// BuildError は型辞書の構築時のエラー
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    #[error(transparent)]
    Discovery(#[from] DiscoveryError),

    #[error(
        "Missing handlers for message types: {0:?}. These types were expected but not registered."
    )]
    MissingHandlers(Vec<MessageType>),

    #[error("Message types have a handler but no parser: {0:?}")]
    MissingParsers(Vec<MessageType>),
}

impl<I: TypeIntrospector, R: ObjectResolver> TypeDictionaryFactory<I, R> {
    pub fn new(introspector: I, resolver: R) -> Self {
        Self {
            introspector,
            resolver,
            expected_handlers: None,
            require_parsers: false,
        }
    }

    /// handler が必ず登録されているべき MessageType を設定
    pub fn expect_handlers(mut self, message_types: impl IntoIterator<Item = MessageType>) -> Self {
        self.expected_handlers = Some(message_types.into_iter().collect());
        self
    }

    /// handler を持つ MessageType すべてに parser を要求する
    pub fn require_parsers(mut self, require: bool) -> Self {
        self.require_parsers = require;
        self
    }

    pub fn with_config(self, config: &DictionaryConfig) -> Self {
        let expected = config.expected_message_types();
        let factory = self.require_parsers(config.require_parsers);
        if expected.is_empty() {
            factory
        } else {
            factory.expect_handlers(expected)
        }
    }

    /// 型発見から TypeDictionary を構築
    pub fn create_from_discovery(&self) -> Result<TypeDictionary, BuildError> {
        info!("Creating type dictionary from registered types");

        let candidates = self.introspector.find_handler_implementors()?;
        let kinds = self.introspector.find_message_kinds()?;

        let mut report = BuildReport::new();
        let handlers = build_handler_registry(candidates, &self.resolver, &mut report);
        let parsers = build_parser_registry(kinds, &mut report);

        let dictionary = TypeDictionary::with_report(handlers, parsers, report);
        self.verify(&dictionary)?;

        info!(
            handlers = dictionary.handler_count(),
            parsers = dictionary.parser_count(),
            "Type dictionary created"
        );
        Ok(dictionary)
    }

    fn verify(&self, dictionary: &TypeDictionary) -> Result<(), BuildError> {
        if let Some(expected) = &self.expected_handlers {
            let missing: Vec<MessageType> = expected
                .iter()
                .filter(|t| dictionary.handler_for(t).is_none())
                .cloned()
                .collect();
            if !missing.is_empty() {
                return Err(BuildError::MissingHandlers(missing));
            }
        }
        if self.require_parsers {
            let missing = dictionary.handled_without_parser();
            if !missing.is_empty() {
                return Err(BuildError::MissingParsers(missing));
            }
        }
        Ok(())
    }
}
