//! TypeIntrospector port - 登録候補の列挙
//!
//! # 実装
//! - **Manifest**: 明示的な登録リスト（順序が決定的）
//! - **InventoryIntrospector**: `inventory` によるリンク時登録（順序は未規定）

use crate::domain::DiscoveryError;
use crate::typed::{HandlerCandidate, MessageKind};

/// TypeIntrospector は handler とメッセージ種別の候補を列挙する
///
/// 二つの問い合わせは独立しており、副作用を持ちません。
/// 列挙順は呼び出しごとに保証されませんが、重複 handler の解決は
/// この順序（後に来た方が勝つ）に依存します。
///
/// 環境をスキャンできない場合でも、可能なら空の列を返すべきです。
/// `Err` は候補が一切分からない致命的な失敗としてビルド全体を中断します。
pub trait TypeIntrospector {
    /// `MessageHandler` を実装する具体的な型
    fn find_handler_implementors(&self) -> Result<Vec<HandlerCandidate>, DiscoveryError>;

    /// 具体的なメッセージ種別
    fn find_message_kinds(&self) -> Result<Vec<MessageKind>, DiscoveryError>;
}

impl<T: TypeIntrospector + ?Sized> TypeIntrospector for &T {
    fn find_handler_implementors(&self) -> Result<Vec<HandlerCandidate>, DiscoveryError> {
        (**self).find_handler_implementors()
    }

    fn find_message_kinds(&self) -> Result<Vec<MessageKind>, DiscoveryError> {
        (**self).find_message_kinds()
    }
}
