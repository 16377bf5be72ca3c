//! ObjectResolver port - handler インスタンスの構築
//!
//! handler は DB やメトリクスなど自身の依存を必要とするため、
//! 単純なデフォルトコンストラクタではなく、この collaborator に
//! 「依存が配線済みのインスタンス」を要求します。

use crate::domain::ResolutionError;
use crate::typed::{HandlerTypeId, Instance};

/// ObjectResolver は handler の型から構築済みインスタンスを返す
///
/// 失敗（binding がない、provisioning 中のエラー）は `ResolutionError` で返し、
/// 呼び出し側はその候補だけを除外します。
pub trait ObjectResolver {
    fn resolve(&self, handler_type: HandlerTypeId) -> Result<Instance, ResolutionError>;
}

impl<T: ObjectResolver + ?Sized> ObjectResolver for &T {
    fn resolve(&self, handler_type: HandlerTypeId) -> Result<Instance, ResolutionError> {
        (**self).resolve(handler_type)
    }
}
