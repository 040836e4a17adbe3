//! 密码哈希模块
//!
//! 提供密码哈希、验证和参数过期检查，支持两种哈希策略。
//!
//! ## 支持的策略
//!
//! - **bcrypt** (推荐): 自适应成本算法，salt 嵌入哈希结果，cost 由 [`CostPolicyProvider`] 提供
//! - **SHA-512 拼接** (兼容): 迁移前的旧哈希格式，仅用于验证（需启用 `legacy` feature）
//!
//! ## 示例
//!
//! ### 使用分发器
//!
//! ```rust
//! use hashrs::password::{BcryptConfig, PasswordHasher};
//!
//! let hasher = PasswordHasher::bcrypt(BcryptConfig::new().with_cost(4));
//! let hash = hasher.hash("my_password", "").unwrap();
//!
//! assert!(hasher.verify("my_password", "", &hash).unwrap());
//! ```
//!
//! ### 直接使用 bcrypt
//!
//! ```rust
//! use hashrs::password::{HashOptions, bcrypt_hash, bcrypt_needs_rehash};
//!
//! let hash = bcrypt_hash("my_password", &HashOptions::with_cost(4)).unwrap();
//!
//! // 策略升级后提示重新哈希
//! assert!(bcrypt_needs_rehash(&hash, &HashOptions::with_cost(10)));
//! assert!(!bcrypt_needs_rehash(&hash, &HashOptions::with_cost(4)));
//! ```
//!
//! ### 注入自定义 cost 策略
//!
//! ```rust
//! use std::sync::Arc;
//! use hashrs::password::{BcryptHashService, CostPolicyProvider, PasswordHasher};
//!
//! struct FixedCost;
//!
//! impl CostPolicyProvider for FixedCost {
//!     fn cost(&self) -> u32 {
//!         5
//!     }
//! }
//!
//! let policy: Arc<dyn CostPolicyProvider> = Arc::new(FixedCost);
//! let service = Arc::new(BcryptHashService::new(policy.clone()));
//! let hasher = PasswordHasher::new(service, policy).unwrap();
//!
//! let hash = hasher.hash("my_password", "").unwrap();
//! assert!(hash.starts_with("$2y$05$"));
//! ```

mod adaptive;
mod hasher;
#[cfg(feature = "legacy")]
mod legacy;
mod options;
mod policy;
mod strategy;

pub use adaptive::{BcryptHashService, bcrypt_hash, bcrypt_needs_rehash, bcrypt_verify};
pub use hasher::{PasswordHasher, hash_password};
#[cfg(feature = "legacy")]
pub use legacy::LegacySha512Hasher;
pub use options::{DEFAULT_COST, HashOptions, MAX_COST, MIN_COST, MIN_SALT_OPTION_LENGTH};
pub use policy::{BcryptConfig, CostPolicyProvider};
pub use strategy::{AdaptiveCostHasher, ConcatenationHasher, HashService, HashingStrategy};
