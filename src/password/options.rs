//! 自适应哈希选项
//!
//! `cost` 是必需的工作因子；`salt` 已废弃，只为兼容旧调用保留。

use serde_json::Value;

use crate::error::{Error, PasswordHashError, Result};

/// cost 参数的最小值
pub const MIN_COST: u32 = 4;

/// cost 参数的最大值（bcrypt 自身的上限）
pub const MAX_COST: u32 = 31;

/// 默认 cost
pub const DEFAULT_COST: u32 = bcrypt::DEFAULT_COST;

/// 废弃的 salt 选项的最小长度
pub const MIN_SALT_OPTION_LENGTH: usize = 22;

/// 自适应哈希的选项
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HashOptions {
    /// 工作因子
    pub cost: Option<u32>,

    /// 调用方提供的 salt
    ///
    /// **已废弃**：算法会自动生成 salt，设置此项只会降低安全性。
    pub salt: Option<String>,
}

impl HashOptions {
    /// 创建空选项
    pub fn new() -> Self {
        Self::default()
    }

    /// 只包含 cost 的选项
    pub fn with_cost(cost: u32) -> Self {
        Self {
            cost: Some(cost),
            salt: None,
        }
    }

    /// 设置 cost
    pub fn cost(mut self, cost: u32) -> Self {
        self.cost = Some(cost);
        self
    }

    /// 设置废弃的 salt 选项
    #[deprecated(note = "bcrypt generates its own salt; a caller-supplied salt weakens the hash")]
    pub fn salt(mut self, salt: impl Into<String>) -> Self {
        self.salt = Some(salt.into());
        self
    }

    /// 从松散类型的键值映射解析选项
    ///
    /// - `cost`: 非负整数或只包含非负整数的字符串
    /// - `salt`: 字符串，数字和布尔值会转换成字符串形式
    ///
    /// 其他键被忽略。
    ///
    /// ```rust
    /// use hashrs::password::HashOptions;
    /// use serde_json::json;
    ///
    /// let options = HashOptions::from_value(&json!({ "cost": "10" })).unwrap();
    /// assert_eq!(options.cost, Some(10));
    ///
    /// assert!(HashOptions::from_value(&json!({ "cost": "ten" })).is_err());
    /// ```
    pub fn from_value(value: &Value) -> Result<Self> {
        let map = value.as_object().ok_or_else(|| {
            Error::PasswordHash(PasswordHashError::InvalidFormat(
                "hash options must be a key/value mapping".to_string(),
            ))
        })?;

        let cost = map.get("cost").map(parse_cost).transpose()?;
        let salt = map.get("salt").map(parse_salt).transpose()?;

        Ok(Self { cost, salt })
    }

    /// 校验 cost 并返回其值
    ///
    /// cost 必须存在且不小于 [`MIN_COST`]。上限由哈希原语自己检查。
    pub fn validated_cost(&self) -> Result<u32> {
        match self.cost {
            None => Err(Error::invalid_cost("the cost option is required")),
            Some(cost) if cost < MIN_COST => Err(Error::invalid_cost(format!(
                "the cost option must not be smaller than {}, got {}",
                MIN_COST, cost
            ))),
            Some(cost) => Ok(cost),
        }
    }
}

fn parse_cost(value: &Value) -> Result<u32> {
    let cost = match value {
        Value::Number(n) => n.as_u64(),
        Value::String(s) => s.trim().parse::<u64>().ok(),
        _ => None,
    };

    cost.and_then(|c| u32::try_from(c).ok()).ok_or_else(|| {
        Error::invalid_cost(format!(
            "the cost option must be a non-negative integer, got {}",
            value
        ))
    })
}

fn parse_salt(value: &Value) -> Result<String> {
    match value {
        Value::String(s) => Ok(s.clone()),
        Value::Number(n) => Ok(n.to_string()),
        // 旧系统把 false 转换为空字符串，true 转换为 "1"
        Value::Bool(true) => Ok("1".to_string()),
        Value::Bool(false) => Ok(String::new()),
        _ => Err(Error::PasswordHash(
            PasswordHashError::MalformedDeprecatedSaltOption(format!(
                "the salt option must be a string, got {}",
                value
            )),
        )),
    }
}
