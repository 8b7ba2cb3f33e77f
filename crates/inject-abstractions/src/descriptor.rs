//! 类型描述符
//!
//! 用显式的构造器闭包代替运行时反射：描述符列出实现类型的构造器、
//! 它满足的服务契约，以及可选的释放器。

use inject_common::{DependencyError, DependencyResult, ServiceKey};
use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::marker::PhantomData;
use std::sync::Arc;

/// 容器内部传递的实例
///
/// 负载总是某个 `Arc<T>`，`T` 是实例被产出时的类型。
pub type Instance = Arc<dyn Any + Send + Sync>;

/// 构造器调用函数类型
pub type ConstructorFn = Arc<dyn Fn(&mut Arguments) -> DependencyResult<Instance> + Send + Sync>;

/// 契约转换函数类型
pub type ContractCast = Arc<dyn Fn(&Instance) -> Option<Instance> + Send + Sync>;

/// 释放函数类型
pub type Disposer = Arc<dyn Fn(&Instance) + Send + Sync>;

/// 将 `Arc<T>` 包装为 [`Instance`]
pub fn into_instance<T>(value: Arc<T>) -> Instance
where
    T: ?Sized + Send + Sync + 'static,
{
    Arc::new(value)
}

/// 将 [`Instance`] 还原为 `Arc<T>`
pub fn downcast_instance<T>(instance: &Instance) -> DependencyResult<Arc<T>>
where
    T: ?Sized + Send + Sync + 'static,
{
    instance
        .downcast_ref::<Arc<T>>()
        .cloned()
        .ok_or_else(|| DependencyError::TypeMismatch {
            expected: std::any::type_name::<T>().to_string(),
        })
}

/// 可释放资源 trait
///
/// 容器释放时，已创建的单例如果声明了可释放，会被调用且只调用一次。
pub trait Dispose: Send + Sync {
    /// 释放资源
    fn dispose(&self);
}

/// 实现类型满足服务契约 `S`
///
/// 对 `dyn Trait` 服务，实现通常只是一次 unsized 转换：
///
/// ```rust
/// use inject_abstractions::Implements;
/// use std::sync::Arc;
///
/// trait Greeter: Send + Sync {}
/// struct English;
/// impl Greeter for English {}
///
/// impl Implements<dyn Greeter> for English {
///     fn upcast(self: Arc<Self>) -> Arc<dyn Greeter> {
///         self
///     }
/// }
/// ```
pub trait Implements<S>: Send + Sync + 'static
where
    S: ?Sized + Send + Sync + 'static,
{
    /// 转换为服务类型
    fn upcast(self: Arc<Self>) -> Arc<S>;
}

impl<T> Implements<T> for T
where
    T: Send + Sync + 'static,
{
    fn upcast(self: Arc<Self>) -> Arc<T> {
        self
    }
}

/// 为实现类型声明一个或多个 `dyn Trait` 契约
#[macro_export]
macro_rules! implements {
    ($implementation:ty => $($service:ty),+ $(,)?) => {
        $(
            impl $crate::Implements<$service> for $implementation {
                fn upcast(self: ::std::sync::Arc<Self>) -> ::std::sync::Arc<$service> {
                    self
                }
            }
        )+
    };
}

/// 可注入组件 trait
///
/// 提供实现类型的描述符，通常由 `#[derive(Injectable)]` 生成。
pub trait Injectable: Send + Sync + Sized + 'static {
    /// 获取类型描述符
    fn type_descriptor() -> TypeDescriptor;
}

/// 构造器参数
///
/// 按构造器声明顺序依次取出已解析的依赖。
pub struct Arguments {
    owner: &'static str,
    values: std::vec::IntoIter<Instance>,
}

impl Arguments {
    /// 创建参数列表
    pub fn new(owner: &'static str, values: Vec<Instance>) -> Self {
        Self {
            owner,
            values: values.into_iter(),
        }
    }

    /// 取出下一个参数
    pub fn take<S>(&mut self) -> DependencyResult<Arc<S>>
    where
        S: ?Sized + Send + Sync + 'static,
    {
        let value = self.values.next().ok_or_else(|| {
            DependencyError::construction_failure(
                self.owner,
                format!("缺少参数: {}", std::any::type_name::<S>()),
            )
        })?;
        downcast_instance::<S>(&value)
    }

    /// 剩余参数数量
    pub fn remaining(&self) -> usize {
        self.values.len()
    }
}

/// 构造器描述符
#[derive(Clone)]
pub struct ConstructorDescriptor {
    declaring_type: ServiceKey,
    parameters: Vec<ServiceKey>,
    public: bool,
    invoke: ConstructorFn,
}

impl ConstructorDescriptor {
    /// 为实现类型 `I` 开始构建构造器
    pub fn of<I>() -> ConstructorBuilder<I>
    where
        I: Send + Sync + 'static,
    {
        ConstructorBuilder {
            parameters: Vec::new(),
            public: true,
            _marker: PhantomData,
        }
    }

    /// 声明该构造器的类型
    pub fn declaring_type(&self) -> ServiceKey {
        self.declaring_type
    }

    /// 参数类型列表（声明顺序）
    pub fn parameters(&self) -> &[ServiceKey] {
        &self.parameters
    }

    /// 是否为公开构造器
    pub fn is_public(&self) -> bool {
        self.public
    }

    /// 使用已解析的参数调用构造器
    pub fn invoke(&self, arguments: Vec<Instance>) -> DependencyResult<Instance> {
        if arguments.len() != self.parameters.len() {
            return Err(DependencyError::construction_failure(
                self.declaring_type.name,
                format!(
                    "参数数量不匹配: 期望 {}, 实际 {}",
                    self.parameters.len(),
                    arguments.len()
                ),
            ));
        }

        let mut arguments = Arguments::new(self.declaring_type.name, arguments);
        (self.invoke)(&mut arguments)
    }
}

impl std::fmt::Debug for ConstructorDescriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConstructorDescriptor")
            .field("declaring_type", &self.declaring_type.name)
            .field(
                "parameters",
                &self.parameters.iter().map(|p| p.name).collect::<Vec<_>>(),
            )
            .field("public", &self.public)
            .field("invoke", &"<function>")
            .finish()
    }
}

/// 构造器构建器
pub struct ConstructorBuilder<I> {
    parameters: Vec<ServiceKey>,
    public: bool,
    _marker: PhantomData<fn() -> I>,
}

impl<I> ConstructorBuilder<I>
where
    I: Send + Sync + 'static,
{
    /// 追加一个参数
    pub fn param<S>(mut self) -> Self
    where
        S: ?Sized + 'static,
    {
        self.parameters.push(ServiceKey::of::<S>());
        self
    }

    /// 标记为非公开构造器，默认选择器会忽略它
    pub fn private(mut self) -> Self {
        self.public = false;
        self
    }

    /// 完成构建
    pub fn build<F>(self, construct: F) -> ConstructorDescriptor
    where
        F: Fn(&mut Arguments) -> DependencyResult<I> + Send + Sync + 'static,
    {
        ConstructorDescriptor {
            declaring_type: ServiceKey::of::<I>(),
            parameters: self.parameters,
            public: self.public,
            invoke: Arc::new(move |arguments| {
                construct(arguments).map(|value| into_instance(Arc::new(value)))
            }),
        }
    }
}

/// 类型种类
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeKind {
    /// 可以直接构造的具体类型
    Concrete,
    /// 抽象服务类型（例如 `dyn Trait`），不能作为实现
    Abstract,
}

#[derive(Clone)]
struct Contract {
    service: ServiceKey,
    cast: ContractCast,
}

/// 类型描述符
#[derive(Clone)]
pub struct TypeDescriptor {
    key: ServiceKey,
    kind: TypeKind,
    constructors: Vec<ConstructorDescriptor>,
    contracts: HashMap<TypeId, Contract>,
    disposer: Option<Disposer>,
}

impl TypeDescriptor {
    /// 为具体类型 `I` 开始构建描述符
    ///
    /// 描述符自动包含 `I` 自身这一契约。
    pub fn concrete<I>() -> TypeDescriptorBuilder<I>
    where
        I: Send + Sync + 'static,
    {
        let mut descriptor = Self {
            key: ServiceKey::of::<I>(),
            kind: TypeKind::Concrete,
            constructors: Vec::new(),
            contracts: HashMap::new(),
            disposer: None,
        };
        descriptor.add_contract::<I, I>();

        TypeDescriptorBuilder {
            descriptor,
            _marker: PhantomData,
        }
    }

    /// 描述一个抽象服务类型
    pub fn abstract_type<S>() -> Self
    where
        S: ?Sized + 'static,
    {
        Self {
            key: ServiceKey::of::<S>(),
            kind: TypeKind::Abstract,
            constructors: Vec::new(),
            contracts: HashMap::new(),
            disposer: None,
        }
    }

    /// 类型标识
    pub fn key(&self) -> ServiceKey {
        self.key
    }

    /// 类型种类
    pub fn kind(&self) -> TypeKind {
        self.kind
    }

    /// 是否为具体类型
    pub fn is_concrete(&self) -> bool {
        self.kind == TypeKind::Concrete
    }

    /// 声明的构造器
    pub fn constructors(&self) -> &[ConstructorDescriptor] {
        &self.constructors
    }

    /// 是否满足指定服务契约
    pub fn satisfies(&self, service: &ServiceKey) -> bool {
        self.contracts.contains_key(&service.id)
    }

    /// 满足的全部服务契约
    pub fn contracts(&self) -> Vec<ServiceKey> {
        self.contracts.values().map(|c| c.service).collect()
    }

    /// 是否声明了释放器
    pub fn is_disposable(&self) -> bool {
        self.disposer.is_some()
    }

    /// 追加契约 `S`，用于类型化注册
    pub fn with_contract<I, S>(mut self) -> Self
    where
        I: Implements<S>,
        S: ?Sized + Send + Sync + 'static,
    {
        self.add_contract::<I, S>();
        self
    }

    /// 将实现实例转换为服务实例
    pub fn cast_to(&self, service: &ServiceKey, raw: &Instance) -> DependencyResult<Instance> {
        let contract = self.contracts.get(&service.id).ok_or_else(|| {
            DependencyError::invalid_binding(service.name, self.key.name, "实现类型不满足服务契约")
        })?;

        (contract.cast)(raw).ok_or_else(|| DependencyError::TypeMismatch {
            expected: self.key.name.to_string(),
        })
    }

    /// 释放实例，返回是否执行了释放器
    pub fn dispose(&self, raw: &Instance) -> bool {
        match &self.disposer {
            Some(disposer) => {
                disposer(raw);
                true
            }
            None => false,
        }
    }

    fn add_contract<I, S>(&mut self)
    where
        I: Implements<S>,
        S: ?Sized + Send + Sync + 'static,
    {
        let service = ServiceKey::of::<S>();
        let cast: ContractCast = Arc::new(|raw: &Instance| {
            raw.downcast_ref::<Arc<I>>().map(|implementation| {
                into_instance::<S>(<I as Implements<S>>::upcast(implementation.clone()))
            })
        });
        self.contracts.insert(service.id, Contract { service, cast });
    }
}

impl std::fmt::Debug for TypeDescriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TypeDescriptor")
            .field("key", &self.key.name)
            .field("kind", &self.kind)
            .field("constructors", &self.constructors)
            .field(
                "contracts",
                &self.contracts.values().map(|c| c.service.name).collect::<Vec<_>>(),
            )
            .field("disposable", &self.disposer.is_some())
            .finish()
    }
}

/// 类型描述符构建器
pub struct TypeDescriptorBuilder<I> {
    descriptor: TypeDescriptor,
    _marker: PhantomData<fn() -> I>,
}

impl<I> TypeDescriptorBuilder<I>
where
    I: Send + Sync + 'static,
{
    /// 声明满足服务契约 `S`
    pub fn implements<S>(mut self) -> Self
    where
        I: Implements<S>,
        S: ?Sized + Send + Sync + 'static,
    {
        self.descriptor.add_contract::<I, S>();
        self
    }

    /// 添加构造器
    pub fn constructor(mut self, constructor: ConstructorDescriptor) -> Self {
        self.descriptor.constructors.push(constructor);
        self
    }

    /// 添加基于 `Default` 的无参构造器
    pub fn default_constructor(self) -> Self
    where
        I: Default,
    {
        self.constructor(ConstructorDescriptor::of::<I>().build(|_| Ok(I::default())))
    }

    /// 声明实例在容器释放时需要释放
    pub fn disposable(mut self) -> Self
    where
        I: Dispose,
    {
        let disposer: Disposer = Arc::new(|raw: &Instance| {
            if let Some(instance) = raw.downcast_ref::<Arc<I>>() {
                instance.dispose();
            }
        });
        self.descriptor.disposer = Some(disposer);
        self
    }

    /// 完成构建
    pub fn build(self) -> TypeDescriptor {
        self.descriptor
    }
}
