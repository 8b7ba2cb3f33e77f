//! 可序列化的容器设置
//!
//! 设置可以来自 TOML/JSON/YAML 文件和 `INJECT_` 前缀的环境变量，
//! 构建容器时被转换为不可变的容器选项。

use crate::errors::{ConfigError, ConfigResult};
use crate::lifetime::{ConflictBehavior, Lifetime};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

/// 环境变量前缀
pub const ENV_PREFIX: &str = "INJECT";

/// 容器设置
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContainerSettings {
    /// 未指定生命周期时使用的默认生命周期
    pub default_lifetime: Lifetime,
    /// 未指定冲突策略时使用的默认策略
    pub default_conflict_behavior: ConflictBehavior,
}

impl Default for ContainerSettings {
    fn default() -> Self {
        Self {
            default_lifetime: Lifetime::Transient,
            default_conflict_behavior: ConflictBehavior::Throw,
        }
    }
}

impl ContainerSettings {
    /// 从配置文件和环境变量加载设置
    ///
    /// 环境变量优先于文件，例如 `INJECT_DEFAULT_LIFETIME=singleton`。
    pub fn load(path: Option<&Path>) -> ConfigResult<Self> {
        let mut builder = config::Config::builder();

        if let Some(path) = path {
            if !path.exists() {
                return Err(ConfigError::FileNotFound {
                    path: path.display().to_string(),
                });
            }
            debug!("加载容器设置文件: {}", path.display());
            builder = builder.add_source(config::File::from(path));
        }

        let settings: Self = builder
            .add_source(config::Environment::with_prefix(ENV_PREFIX).separator("__"))
            .build()
            .and_then(|c| c.try_deserialize())
            .map_err(|e| ConfigError::ParseError {
                source: Box::new(e),
            })?;

        settings.validate()?;
        Ok(settings)
    }

    /// 从 TOML 字符串解析设置
    pub fn from_toml_str(content: &str) -> ConfigResult<Self> {
        let settings: Self = toml::from_str(content).map_err(|e| ConfigError::ParseError {
            source: Box::new(e),
        })?;
        settings.validate()?;
        Ok(settings)
    }

    /// 验证设置
    pub fn validate(&self) -> ConfigResult<()> {
        if self.default_conflict_behavior == ConflictBehavior::Default {
            return Err(ConfigError::ValidationError {
                message: "default_conflict_behavior 必须是 replace、keep 或 throw".to_string(),
            });
        }
        Ok(())
    }
}
