//! cost 策略
//!
//! 当前 cost 由调用方注入的 [`CostPolicyProvider`] 提供，
//! [`BcryptConfig`] 是基于配置的默认实现。

use serde::{Deserialize, Serialize};

use super::options::{DEFAULT_COST, HashOptions, MAX_COST, MIN_COST};
use crate::error::{Error, Result};

/// 提供当前配置的工作因子
pub trait CostPolicyProvider: Send + Sync {
    /// 当前的 cost
    fn cost(&self) -> u32;

    /// 由当前策略组成的哈希选项
    fn options(&self) -> HashOptions {
        HashOptions::with_cost(self.cost())
    }
}

/// bcrypt 配置
///
/// ```rust
/// use hashrs::password::{BcryptConfig, CostPolicyProvider};
///
/// let config = BcryptConfig::from_json(r#"{ "cost": 11 }"#).unwrap();
/// assert_eq!(config.cost(), 11);
///
/// assert!(BcryptConfig::from_json(r#"{ "cost": "eleven" }"#).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BcryptConfig {
    /// cost 参数 (4-31, 默认 12)
    pub cost: u32,
}

impl Default for BcryptConfig {
    fn default() -> Self {
        Self { cost: DEFAULT_COST }
    }
}

impl BcryptConfig {
    /// 创建默认配置
    pub fn new() -> Self {
        Self::default()
    }

    /// 设置 cost
    pub fn with_cost(mut self, cost: u32) -> Self {
        self.cost = cost;
        self
    }

    /// 测试场景的预设配置，使用最小 cost
    pub fn for_testing() -> Self {
        Self { cost: MIN_COST }
    }

    /// 从 JSON 文本加载并校验配置
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| Error::invalid_config("bcrypt", e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// 校验 cost 是否在 bcrypt 支持的范围内
    pub fn validate(&self) -> Result<()> {
        if !(MIN_COST..=MAX_COST).contains(&self.cost) {
            return Err(Error::invalid_config(
                "cost",
                format!(
                    "must be between {} and {}, got {}",
                    MIN_COST, MAX_COST, self.cost
                ),
            ));
        }
        Ok(())
    }
}

impl CostPolicyProvider for BcryptConfig {
    fn cost(&self) -> u32 {
        self.cost
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ConfigError;

    #[test]
    fn test_default_config() {
        let config = BcryptConfig::default();
        assert_eq!(config.cost, DEFAULT_COST);
        assert!(config.validate().is_ok());
        assert_eq!(config.options(), HashOptions::with_cost(DEFAULT_COST));
    }

    #[test]
    fn test_builder() {
        let config = BcryptConfig::new().with_cost(10);
        assert_eq!(config.cost(), 10);
        assert_eq!(BcryptConfig::for_testing().cost(), MIN_COST);
    }

    #[test]
    fn test_from_json() {
        assert_eq!(BcryptConfig::from_json(r#"{"cost": 9}"#).unwrap().cost, 9);
        // 缺少字段时使用默认值
        assert_eq!(BcryptConfig::from_json("{}").unwrap().cost, DEFAULT_COST);
    }

    #[test]
    fn test_from_json_rejects_invalid_values() {
        for json in [
            r#"{"cost": "nine"}"#,
            r#"{"cost": -1}"#,
            r#"{"cost": 3}"#,
            r#"{"cost": 32}"#,
            "not json",
        ] {
            let err = BcryptConfig::from_json(json).unwrap_err();
            assert!(
                matches!(err, Error::Config(ConfigError::InvalidValue { .. })),
                "{} should be rejected",
                json
            );
        }
    }
}
