//! 错误类型定义

use thiserror::Error;

/// 配置错误类型
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("配置文件不存在: {path}")]
    FileNotFound { path: String },

    #[error("配置解析失败: {source}")]
    ParseError {
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("配置验证失败: {message}")]
    ValidationError { message: String },
}

/// 依赖注入错误类型
#[derive(Error, Debug)]
pub enum DependencyError {
    #[error("缺少必需参数: {argument}")]
    InvalidArgument { argument: &'static str },

    #[error("无效的服务绑定: {service} -> {implementation}, 原因: {reason}")]
    InvalidBinding {
        service: String,
        implementation: String,
        reason: String,
    },

    #[error("服务已注册: {service}")]
    DuplicateRegistration { service: String },

    #[error("无法解析服务: {service}")]
    UnresolvedService { service: String },

    #[error("解析服务时必须指定服务类型")]
    ServiceTypeRequired,

    #[error("类型 {implementation} 必须有且只有一个公开构造器, 实际找到 {found} 个")]
    AmbiguousOrMissingConstructor { implementation: String, found: usize },

    #[error("构造器选择器没有为 {implementation} 返回构造器")]
    InvalidConstructorSelection { implementation: String },

    #[error("循环依赖检测到: {service}, 依赖链: {dependency_chain}")]
    CircularDependency {
        service: String,
        dependency_chain: String,
    },

    #[error("构造失败: {type_name}, 原因: {message}")]
    ConstructionFailure { type_name: String, message: String },

    #[error("组件创建失败: {type_name}, 原因: {source}")]
    ComponentCreationFailed {
        type_name: String,
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("类型转换失败: 期望 {expected}")]
    TypeMismatch { expected: String },
}

impl DependencyError {
    /// 创建无效绑定错误
    pub fn invalid_binding(
        service: impl Into<String>,
        implementation: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::InvalidBinding {
            service: service.into(),
            implementation: implementation.into(),
            reason: reason.into(),
        }
    }

    /// 创建构造失败错误
    pub fn construction_failure(type_name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ConstructionFailure {
            type_name: type_name.into(),
            message: message.into(),
        }
    }

    /// 包装用户构造器返回的错误
    pub fn creation_failed<E>(type_name: impl Into<String>, source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::ComponentCreationFailed {
            type_name: type_name.into(),
            source: Box::new(source),
        }
    }

    /// 是否为"服务未注册"错误
    pub fn is_unresolved(&self) -> bool {
        matches!(self, Self::UnresolvedService { .. })
    }
}

/// 结果类型别名
pub type ConfigResult<T> = Result<T, ConfigError>;
pub type DependencyResult<T> = Result<T, DependencyError>;
