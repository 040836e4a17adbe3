//! # hashrs
//!
//! 密码哈希抽象层。
//!
//! ## 功能特性
//!
//! - **密码哈希分发**: 在构造时确定哈希策略，统一哈希、验证和过期检查
//! - **bcrypt**: 校验 cost 下限，由注入的策略提供当前 cost，检测哈希是否需要重新生成
//! - **Salt 生成**: 密码学安全的十六进制 salt，随机源不可用时报错而不是降级
//! - **旧系统兼容**: SHA-512 拼接哈希和降级 salt 生成
//!
//! ## Features
//!
//! - `legacy` - 启用旧系统兼容代码路径（默认启用）
//!
//! ## 密码哈希示例
//!
//! ```rust
//! use hashrs::{BcryptConfig, PasswordHasher};
//!
//! let hasher = PasswordHasher::bcrypt(BcryptConfig::new().with_cost(4));
//!
//! // bcrypt 自带 salt，salt 参数会被忽略
//! let hash = hasher.hash("my_secure_password", "").unwrap();
//! assert!(hasher.verify("my_secure_password", "", &hash).unwrap());
//!
//! // 当前策略与哈希参数一致，不需要重新生成
//! assert!(!hasher.needs_rehash(&hash));
//! ```
//!
//! ## Salt 生成示例
//!
//! ```rust
//! use hashrs::SaltGenerator;
//!
//! let salt = SaltGenerator::new().generate_strong(32).unwrap();
//! assert_eq!(salt.len(), 32);
//! ```
//!
//! ## 线程安全
//!
//! 所有类型都不包含可变状态，可以在多个线程间共享。bcrypt 的耗时与 cost 成正比，
//! 大量并发哈希时应由调用方限制并行度。

pub mod error;
pub mod password;
pub mod random;
pub mod salt;

pub use error::{Error, Result};

// ============================================================================
// 密码相关导出
// ============================================================================

pub use password::{
    AdaptiveCostHasher, BcryptConfig, BcryptHashService, ConcatenationHasher, CostPolicyProvider,
    HashOptions, HashService, HashingStrategy, PasswordHasher, bcrypt_hash, bcrypt_needs_rehash,
    bcrypt_verify, hash_password,
};

#[cfg(feature = "legacy")]
pub use password::LegacySha512Hasher;

// ============================================================================
// Salt 相关导出
// ============================================================================

pub use salt::{EntropySource, OsEntropy, SaltGenerator};

#[cfg(feature = "legacy")]
pub use salt::generate_fallback_salt;
