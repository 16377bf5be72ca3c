//! App - アプリケーション層
//!
//! このモジュールは、ports を組み合わせて型辞書を構築・利用します。
//!
//! # 主要コンポーネント
//! - **build_handler_registry**: handler 候補 → `MessageType → handler`
//! - **build_parser_registry**: メッセージ種別 → `MessageType → parser`
//! - **TypeDictionaryFactory**: 二つのマッピングを不変な TypeDictionary に組み立てる
//! - **Dispatcher**: TypeDictionary を使って一つのメッセージをルーティング

pub mod builder;
pub mod dictionary;
pub mod dispatch;
pub mod handler_builder;
pub mod parser_builder;

// 主要な型を再エクスポート
pub use self::builder::{BuildError, TypeDictionaryFactory};
pub use self::dictionary::TypeDictionary;
pub use self::dispatch::{DispatchError, Dispatcher};
pub use self::handler_builder::build_handler_registry;
pub use self::parser_builder::build_parser_registry;
