//! Container - handler の依存を配線する factory レジストリ
//!
//! # 学習ポイント
//! - `TypeId` をキーにした `Box<dyn Fn>` の管理
//! - factory が `&Container` を受け取り、自身の依存を `get::<T>()` で解決する
//! - RefCell による解決中スタックで依存の循環を検出

use std::any::{Any, TypeId, type_name};
use std::cell::RefCell;
use std::collections::HashMap;

use crate::domain::ResolutionError;
use crate::ports::ObjectResolver;
use crate::typed::{HandlerTypeId, Instance};

type Factory = Box<dyn Fn(&Container) -> Result<Instance, ResolutionError> + Send + Sync>;

struct Binding {
    type_name: &'static str,
    factory: Factory,
}

/// Container は型ごとの factory を保持する
///
/// # 使用例
/// ```ignore
/// let container = Container::new()
///     .bind_instance(Arc::new(Database::connect(url)?))
///     .bind(|c| Ok(OrderPlacedHandler::new(c.get::<Arc<Database>>()?)));
///
/// let handler: OrderPlacedHandler = container.get()?;
/// ```
///
/// 型辞書の構築はシングルスレッドで一度だけ行われるため、Container は `Sync` ではありません。
#[derive(Default)]
pub struct Container {
    bindings: HashMap<TypeId, Binding>,
    resolving: RefCell<Vec<TypeId>>,
}

impl Container {
    pub fn new() -> Self {
        Self::default()
    }

    /// T の factory を登録。同じ型への再登録は上書き
    pub fn bind<T, F>(mut self, factory: F) -> Self
    where
        T: Any + Send + Sync,
        F: Fn(&Container) -> Result<T, ResolutionError> + Send + Sync + 'static,
    {
        self.bindings.insert(
            TypeId::of::<T>(),
            Binding {
                type_name: type_name::<T>(),
                factory: Box::new(move |c: &Container| {
                    factory(c).map(|value| Box::new(value) as Instance)
                }),
            },
        );
        self
    }

    /// 共有する値を登録（解決のたびに clone される）
    pub fn bind_instance<T: Any + Clone + Send + Sync>(self, value: T) -> Self {
        self.bind(move |_| Ok(value.clone()))
    }

    pub fn contains<T: Any>(&self) -> bool {
        self.bindings.contains_key(&TypeId::of::<T>())
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    /// T を解決
    pub fn get<T: Any + Send + Sync>(&self) -> Result<T, ResolutionError> {
        let expected = type_name::<T>();
        let instance = self.resolve_by_id(TypeId::of::<T>(), expected)?;
        instance
            .downcast::<T>()
            .map(|value| *value)
            .map_err(|_| ResolutionError::TypeMismatch { expected })
    }

    fn resolve_by_id(
        &self,
        id: TypeId,
        requested: &'static str,
    ) -> Result<Instance, ResolutionError> {
        let binding = self
            .bindings
            .get(&id)
            .ok_or(ResolutionError::NoBinding {
                type_name: requested,
            })?;

        {
            let mut stack = self.resolving.borrow_mut();
            if stack.contains(&id) {
                return Err(ResolutionError::Cycle {
                    type_name: binding.type_name,
                });
            }
            stack.push(id);
        }

        let result = (binding.factory)(self);
        self.resolving.borrow_mut().pop();
        result
    }
}

impl ObjectResolver for Container {
    fn resolve(&self, handler_type: HandlerTypeId) -> Result<Instance, ResolutionError> {
        self.resolve_by_id(handler_type.type_id(), handler_type.name())
    }
}
