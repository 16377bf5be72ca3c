//! Impls - ports の実装
//!
//! # 含まれる実装
//! - **Manifest**: 明示的な登録リストによる TypeIntrospector（順序が決定的）
//! - **InventoryIntrospector**: `register_*!` マクロによるリンク時登録
//! - **Container**: factory ベースの ObjectResolver（DI コンテナの代替）

pub mod container;
pub mod manifest;
pub mod registration;

// 主要な型を再エクスポート
pub use self::container::Container;
pub use self::manifest::Manifest;
pub use self::registration::{HandlerRegistration, InventoryIntrospector, MessageRegistration};
