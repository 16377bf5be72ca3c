//! Ports - 抽象化レイヤー
//!
//! このモジュールは Hexagonal Architecture の「ポート」を定義します。
//! 型辞書の構築が依存する外部 collaborator を trait として切り出し、
//! 発見方法やインスタンス構築方法の詳細を隠蔽します。
//!
//! - `TypeIntrospector`: handler / メッセージ種別の候補を列挙
//! - `ObjectResolver`: handler の型から依存配線済みインスタンスを構築

pub mod introspection;
pub mod resolver;

pub use self::introspection::TypeIntrospector;
pub use self::resolver::ObjectResolver;
