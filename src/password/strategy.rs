//! 哈希策略
//!
//! 两种互不兼容的哈希契约：
//!
//! - [`ConcatenationHasher`]: 旧式，对 `password ‖ salt` 计算固定摘要，只用于兼容旧哈希
//! - [`AdaptiveCostHasher`]: 现代，算法自带 salt，工作因子可配置
//!
//! [`HashingStrategy`] 在构造时确定一次，之后不再检查具体类型。

use std::fmt;
use std::sync::Arc;

use super::options::HashOptions;
use crate::error::Result;

/// 拼接式哈希：对 `password ‖ salt` 计算固定算法的摘要
///
/// **已废弃**：只用于读取和验证迁移前生成的哈希。
pub trait ConcatenationHasher: Send + Sync {
    /// 对输入计算摘要
    fn hash(&self, input: &[u8]) -> String;

    /// 以常量时间比较输入的摘要和已存储的摘要
    fn verify(&self, input: &[u8], expected: &str) -> bool {
        crate::random::constant_time_compare_str(&self.hash(input), expected)
    }
}

/// 自适应成本哈希：算法自带 salt，工作因子可配置
pub trait AdaptiveCostHasher: Send + Sync {
    /// 使用给定选项哈希密码
    fn hash(&self, password: &[u8], options: &HashOptions) -> Result<String>;

    /// 验证密码是否匹配哈希
    fn verify(&self, password: &[u8], hash: &str) -> Result<bool>;

    /// 哈希中嵌入的算法或参数是否与 `current` 不同
    fn needs_rehash(&self, hash: &str, current: &HashOptions) -> bool;
}

/// 已解析的哈希策略
#[derive(Clone)]
pub enum HashingStrategy {
    /// 旧式拼接哈希
    Concatenation(Arc<dyn ConcatenationHasher>),
    /// 自适应成本哈希
    AdaptiveCost(Arc<dyn AdaptiveCostHasher>),
}

impl HashingStrategy {
    /// 是否为旧式拼接哈希
    pub fn is_legacy(&self) -> bool {
        matches!(self, HashingStrategy::Concatenation(_))
    }
}

impl fmt::Debug for HashingStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HashingStrategy::Concatenation(_) => f.write_str("HashingStrategy::Concatenation"),
            HashingStrategy::AdaptiveCost(_) => f.write_str("HashingStrategy::AdaptiveCost"),
        }
    }
}

/// 可以交给 [`PasswordHasher`](super::PasswordHasher) 的哈希服务
///
/// 服务通过 [`into_strategy`](Self::into_strategy) 声明自己实现了哪种契约；
/// 两种都没有实现的服务会在构造分发器时被拒绝。
pub trait HashService: Send + Sync {
    /// 用于错误信息的服务名称
    fn name(&self) -> &str {
        std::any::type_name::<Self>()
    }

    /// 转换为具体的哈希策略
    fn into_strategy(self: Arc<Self>) -> Option<HashingStrategy> {
        None
    }
}

impl HashService for HashingStrategy {
    fn name(&self) -> &str {
        match self {
            HashingStrategy::Concatenation(_) => "concatenation",
            HashingStrategy::AdaptiveCost(_) => "adaptive-cost",
        }
    }

    fn into_strategy(self: Arc<Self>) -> Option<HashingStrategy> {
        Some(Arc::unwrap_or_clone(self))
    }
}
