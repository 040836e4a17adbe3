//! 密码哈希分发器
//!
//! 根据构造时确定的哈希策略哈希和验证密码。

use std::fmt;
use std::sync::Arc;

use super::adaptive::BcryptHashService;
use super::options::HashOptions;
use super::policy::{BcryptConfig, CostPolicyProvider};
use super::strategy::{HashService, HashingStrategy};
use crate::error::{Error, PasswordHashError, Result};

/// 密码哈希器
///
/// 持有一个哈希策略和一个 cost 策略，构造后不可变，可以在整个进程生命周期内共享。
#[derive(Clone)]
pub struct PasswordHasher {
    strategy: HashingStrategy,
    cost_policy: Arc<dyn CostPolicyProvider>,
}

impl PasswordHasher {
    /// 根据任意哈希服务创建哈希器
    ///
    /// # Errors
    ///
    /// 服务既不是拼接式也不是自适应成本式时返回
    /// [`PasswordHashError::UnsupportedHashService`]
    pub fn new(
        service: Arc<dyn HashService>,
        cost_policy: Arc<dyn CostPolicyProvider>,
    ) -> Result<Self> {
        let name = service.name().to_string();
        let strategy = service.into_strategy().ok_or(Error::PasswordHash(
            PasswordHashError::UnsupportedHashService(name),
        ))?;

        Ok(Self::from_strategy(strategy, cost_policy))
    }

    /// 使用已解析的策略创建哈希器
    pub fn from_strategy(
        strategy: HashingStrategy,
        cost_policy: Arc<dyn CostPolicyProvider>,
    ) -> Self {
        Self {
            strategy,
            cost_policy,
        }
    }

    /// 创建使用 bcrypt 的哈希器
    ///
    /// 服务和分发器共享同一个 cost 策略。
    ///
    /// ```rust
    /// use hashrs::password::{BcryptConfig, PasswordHasher};
    ///
    /// let hasher = PasswordHasher::bcrypt(BcryptConfig::for_testing());
    /// let hash = hasher.hash("my_password", "").unwrap();
    ///
    /// assert!(hasher.verify("my_password", "", &hash).unwrap());
    /// assert!(!hasher.needs_rehash(&hash));
    /// ```
    pub fn bcrypt(config: BcryptConfig) -> Self {
        let policy: Arc<dyn CostPolicyProvider> = Arc::new(config);
        let service = Arc::new(BcryptHashService::new(Arc::clone(&policy)));
        Self::from_strategy(HashingStrategy::AdaptiveCost(service), policy)
    }

    /// 创建使用旧式 SHA-512 拼接哈希的哈希器
    ///
    /// **仅用于验证迁移前的哈希。**
    #[cfg(feature = "legacy")]
    pub fn legacy() -> Self {
        Self::from_strategy(
            HashingStrategy::Concatenation(Arc::new(super::legacy::LegacySha512Hasher::new())),
            Arc::new(BcryptConfig::default()),
        )
    }

    /// 当前使用的哈希策略
    pub fn strategy(&self) -> &HashingStrategy {
        &self.strategy
    }

    /// 哈希密码
    ///
    /// 拼接式策略对 `password ‖ salt` 求摘要；自适应策略忽略 `salt`，
    /// 使用当前 cost 和算法自带的 salt。
    pub fn hash(&self, password: impl AsRef<[u8]>, salt: &str) -> Result<String> {
        hash_password(&self.strategy, self.cost_policy.as_ref(), password, salt)
    }

    /// 验证密码
    ///
    /// `salt` 必须与哈希时传入的相同；自适应策略会忽略它。
    pub fn verify(&self, password: impl AsRef<[u8]>, salt: &str, hash: &str) -> Result<bool> {
        match &self.strategy {
            HashingStrategy::Concatenation(hasher) => {
                Ok(hasher.verify(&concat(password.as_ref(), salt), hash))
            }
            HashingStrategy::AdaptiveCost(hasher) => hasher.verify(password.as_ref(), hash),
        }
    }

    /// 哈希是否需要按当前策略重新生成
    ///
    /// 与 [`hash`](Self::hash) 使用同一个 cost 策略比较。旧式拼接哈希总是需要重新生成。
    pub fn needs_rehash(&self, hash: &str) -> bool {
        match &self.strategy {
            HashingStrategy::Concatenation(_) => true,
            HashingStrategy::AdaptiveCost(hasher) => {
                hasher.needs_rehash(hash, &HashOptions::with_cost(self.cost_policy.cost()))
            }
        }
    }
}

impl fmt::Debug for PasswordHasher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PasswordHasher")
            .field("strategy", &self.strategy)
            .field("cost", &self.cost_policy.cost())
            .finish()
    }
}

// ============================================================================
// 便捷函数
// ============================================================================

/// 使用给定策略哈希密码
///
/// 自适应策略的选项只包含 `cost_policy` 提供的 cost，不传递 salt。
pub fn hash_password(
    strategy: &HashingStrategy,
    cost_policy: &dyn CostPolicyProvider,
    password: impl AsRef<[u8]>,
    salt: &str,
) -> Result<String> {
    match strategy {
        HashingStrategy::Concatenation(hasher) => Ok(hasher.hash(&concat(password.as_ref(), salt))),
        HashingStrategy::AdaptiveCost(hasher) => {
            let options = HashOptions::with_cost(cost_policy.cost());
            hasher.hash(password.as_ref(), &options)
        }
    }
}

fn concat(password: &[u8], salt: &str) -> Vec<u8> {
    let mut input = Vec::with_capacity(password.len() + salt.len());
    input.extend_from_slice(password);
    input.extend_from_slice(salt.as_bytes());
    input
}
