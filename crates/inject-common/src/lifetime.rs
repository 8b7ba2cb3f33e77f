//! 服务生命周期与冲突处理策略

use serde::{Deserialize, Serialize};

/// 服务生命周期类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Lifetime {
    /// 单例模式 - 每个容器只创建一个实例
    Singleton,
    /// 瞬时模式 - 每次解析都创建新实例
    #[default]
    Transient,
}

impl std::fmt::Display for Lifetime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Singleton => f.write_str("singleton"),
            Self::Transient => f.write_str("transient"),
        }
    }
}

/// 重复注册同一服务类型时的处理策略
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConflictBehavior {
    /// 使用容器配置的默认策略
    #[default]
    Default,
    /// 替换已有注册
    Replace,
    /// 保留已有注册，丢弃新注册
    Keep,
    /// 返回重复注册错误
    Throw,
}

impl ConflictBehavior {
    /// 根据容器默认策略得到实际生效的策略
    ///
    /// 容器默认策略本身为 `Default` 时按 `Throw` 处理。
    pub fn resolve_against(self, container_default: ConflictBehavior) -> ConflictBehavior {
        match self {
            Self::Default => container_default.normalized(),
            other => other,
        }
    }

    /// 将 `Default` 归一化为 `Throw`
    pub fn normalized(self) -> ConflictBehavior {
        match self {
            Self::Default => Self::Throw,
            other => other,
        }
    }
}
