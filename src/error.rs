//! 统一错误类型模块
//!
//! 提供 hashrs 库中所有操作的错误类型定义。
//!
//! 所有错误都直接返回给调用方，库内部不做重试，也不记录日志。

use std::fmt;

/// hashrs 库的统一结果类型
pub type Result<T> = std::result::Result<T, Error>;

/// hashrs 库的错误类型
#[derive(Debug)]
pub enum Error {
    /// 密码哈希错误
    PasswordHash(PasswordHashError),

    /// Salt 生成错误
    Salt(SaltError),

    /// 配置错误
    Config(ConfigError),

    /// 加密原语错误
    Crypto(CryptoError),
}

impl Error {
    /// 创建一个 cost 参数无效的错误
    pub fn invalid_cost(msg: impl Into<String>) -> Self {
        Error::PasswordHash(PasswordHashError::InvalidCost(msg.into()))
    }

    /// 创建一个无效配置值的错误
    pub fn invalid_config(key: impl Into<String>, message: impl Into<String>) -> Self {
        Error::Config(ConfigError::InvalidValue {
            key: key.into(),
            message: message.into(),
        })
    }
}

/// 密码哈希相关错误
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PasswordHashError {
    /// 哈希服务既不是拼接式也不是自适应成本式
    UnsupportedHashService(String),
    /// cost 参数缺失、非数字或小于最小值
    InvalidCost(String),
    /// 底层哈希原语失败
    HashFailed(String),
    /// 已废弃的 salt 选项无法使用
    MalformedDeprecatedSaltOption(String),
    /// 无效的哈希或选项格式
    InvalidFormat(String),
}

/// Salt 生成相关错误
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaltError {
    /// 请求的长度不在允许范围内或不是偶数
    InvalidLength {
        length: usize,
        min: usize,
        max: usize,
    },
    /// 无法获得密码学安全的随机数
    InsufficientEntropy(String),
}

/// 配置相关错误
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// 无效的配置值
    InvalidValue { key: String, message: String },
}

/// 加密相关错误
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CryptoError {
    /// 随机数生成失败
    RngFailed(String),
}

// ============================================================================
// Display 实现
// ============================================================================

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::PasswordHash(e) => write!(f, "Password hash error: {}", e),
            Error::Salt(e) => write!(f, "Salt error: {}", e),
            Error::Config(e) => write!(f, "Config error: {}", e),
            Error::Crypto(e) => write!(f, "Crypto error: {}", e),
        }
    }
}

impl fmt::Display for PasswordHashError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PasswordHashError::UnsupportedHashService(name) => {
                write!(f, "unsupported password hashing service: {}", name)
            }
            PasswordHashError::InvalidCost(msg) => write!(f, "invalid cost option: {}", msg),
            PasswordHashError::HashFailed(msg) => write!(f, "hash generation failed: {}", msg),
            PasswordHashError::MalformedDeprecatedSaltOption(msg) => {
                write!(f, "malformed salt option: {}", msg)
            }
            PasswordHashError::InvalidFormat(msg) => write!(f, "invalid format: {}", msg),
        }
    }
}

impl fmt::Display for SaltError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SaltError::InvalidLength { length, min, max } => write!(
                f,
                "invalid salt length {}: must be an even value between {} and {}",
                length, min, max
            ),
            SaltError::InsufficientEntropy(msg) => {
                write!(f, "no cryptographically strong random source: {}", msg)
            }
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidValue { key, message } => {
                write!(f, "invalid configuration value for '{}': {}", key, message)
            }
        }
    }
}

impl fmt::Display for CryptoError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CryptoError::RngFailed(msg) => write!(f, "random number generation failed: {}", msg),
        }
    }
}

// ============================================================================
// std::error::Error 实现
// ============================================================================

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::PasswordHash(e) => Some(e),
            Error::Salt(e) => Some(e),
            Error::Config(e) => Some(e),
            Error::Crypto(e) => Some(e),
        }
    }
}

impl std::error::Error for PasswordHashError {}
impl std::error::Error for SaltError {}
impl std::error::Error for ConfigError {}
impl std::error::Error for CryptoError {}

// ============================================================================
// From 实现 - 方便错误转换
// ============================================================================

impl From<PasswordHashError> for Error {
    fn from(err: PasswordHashError) -> Self {
        Error::PasswordHash(err)
    }
}

impl From<SaltError> for Error {
    fn from(err: SaltError) -> Self {
        Error::Salt(err)
    }
}

impl From<ConfigError> for Error {
    fn from(err: ConfigError) -> Self {
        Error::Config(err)
    }
}

impl From<CryptoError> for Error {
    fn from(err: CryptoError) -> Self {
        Error::Crypto(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn test_error_display() {
        let err = Error::PasswordHash(PasswordHashError::InvalidCost("got 3".to_string()));
        assert_eq!(
            err.to_string(),
            "Password hash error: invalid cost option: got 3"
        );
    }

    #[test]
    fn test_error_from_salt() {
        let salt_err = SaltError::InvalidLength {
            length: 31,
            min: 32,
            max: 128,
        };
        let err: Error = salt_err.into();
        assert!(matches!(
            err,
            Error::Salt(SaltError::InvalidLength { length: 31, .. })
        ));
    }

    #[test]
    fn test_salt_error_display() {
        let err = SaltError::InvalidLength {
            length: 129,
            min: 32,
            max: 128,
        };
        assert_eq!(
            err.to_string(),
            "invalid salt length 129: must be an even value between 32 and 128"
        );
    }

    #[test]
    fn test_error_source() {
        let err = Error::invalid_config("cost", "must be a number");
        assert!(err.source().is_some());
        assert_eq!(
            err.to_string(),
            "Config error: invalid configuration value for 'cost': must be a number"
        );
    }
}
