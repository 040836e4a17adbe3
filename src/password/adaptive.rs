//! bcrypt 自适应哈希服务
//!
//! bcrypt 只使用密码的前 72 个字节，前 72 字节相同的密码在相同选项下得到相同的哈希。

use std::fmt;
use std::sync::Arc;

use base64::Engine;
use base64::alphabet;
use base64::engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig};
use bcrypt::{HashParts, Version};

use super::options::{DEFAULT_COST, HashOptions, MIN_SALT_OPTION_LENGTH};
use super::policy::{BcryptConfig, CostPolicyProvider};
use super::strategy::{AdaptiveCostHasher, HashService, HashingStrategy};
use crate::error::{Error, PasswordHashError, Result};

/// 输出哈希使用的版本标识，与已存储的 `$2y$` 哈希保持一致
const HASH_VERSION: Version = Version::TwoY;

const BCRYPT_SALT_CHARS: usize = 22;
const BCRYPT_SALT_BYTES: usize = 16;

/// bcrypt 的 radix-64 编码，解码 22 个字符时忽略最后 4 个多余位
const BCRYPT_SALT_ENGINE: GeneralPurpose = GeneralPurpose::new(
    &alphabet::BCRYPT,
    GeneralPurposeConfig::new()
        .with_encode_padding(false)
        .with_decode_padding_mode(DecodePaddingMode::RequireNone)
        .with_decode_allow_trailing_bits(true),
);

/// bcrypt 哈希服务
///
/// cost 来自注入的 [`CostPolicyProvider`]。
///
/// ```rust
/// use hashrs::password::{BcryptConfig, BcryptHashService};
///
/// let service = BcryptHashService::from_config(BcryptConfig::new().with_cost(4));
/// let hash = service.hash("secret").unwrap();
///
/// assert!(hash.starts_with("$2y$04$"));
/// assert!(service.verify("secret", &hash).unwrap());
/// assert!(!service.needs_rehash(&hash));
/// ```
#[derive(Clone)]
pub struct BcryptHashService {
    policy: Arc<dyn CostPolicyProvider>,
}

impl BcryptHashService {
    /// 使用给定的 cost 策略创建服务
    pub fn new(policy: Arc<dyn CostPolicyProvider>) -> Self {
        Self { policy }
    }

    /// 使用静态配置创建服务
    pub fn from_config(config: BcryptConfig) -> Self {
        Self::new(Arc::new(config))
    }

    /// 当前策略对应的选项
    pub fn current_options(&self) -> HashOptions {
        self.policy.options()
    }

    /// 使用当前策略哈希密码
    pub fn hash(&self, password: impl AsRef<[u8]>) -> Result<String> {
        bcrypt_hash(password, &self.current_options())
    }

    /// 使用显式选项哈希密码
    pub fn hash_with_options(
        &self,
        password: impl AsRef<[u8]>,
        options: &HashOptions,
    ) -> Result<String> {
        bcrypt_hash(password, options)
    }

    /// 验证密码是否匹配哈希
    pub fn verify(&self, password: impl AsRef<[u8]>, hash: &str) -> Result<bool> {
        bcrypt_verify(password, hash)
    }

    /// 哈希是否需要按当前策略重新生成
    pub fn needs_rehash(&self, hash: &str) -> bool {
        bcrypt_needs_rehash(hash, &self.current_options())
    }
}

impl fmt::Debug for BcryptHashService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BcryptHashService")
            .field("cost", &self.policy.cost())
            .finish()
    }
}

impl AdaptiveCostHasher for BcryptHashService {
    fn hash(&self, password: &[u8], options: &HashOptions) -> Result<String> {
        bcrypt_hash(password, options)
    }

    fn verify(&self, password: &[u8], hash: &str) -> Result<bool> {
        bcrypt_verify(password, hash)
    }

    fn needs_rehash(&self, hash: &str, current: &HashOptions) -> bool {
        bcrypt_needs_rehash(hash, current)
    }
}

impl HashService for BcryptHashService {
    fn name(&self) -> &str {
        "bcrypt"
    }

    fn into_strategy(self: Arc<Self>) -> Option<HashingStrategy> {
        Some(HashingStrategy::AdaptiveCost(self))
    }
}

// ============================================================================
// 便捷函数
// ============================================================================

/// 使用 bcrypt 哈希密码
///
/// # Errors
///
/// - cost 缺失或小于 4: [`PasswordHashError::InvalidCost`]
/// - salt 选项少于 22 个字符: [`PasswordHashError::MalformedDeprecatedSaltOption`]
/// - bcrypt 拒绝参数（如 cost 大于 31）: [`PasswordHashError::HashFailed`]
pub fn bcrypt_hash(password: impl AsRef<[u8]>, options: &HashOptions) -> Result<String> {
    let cost = options.validated_cost()?;

    let parts = match options.salt.as_deref() {
        Some(salt) => {
            let salt = decode_salt_option(salt)?;
            log::warn!(
                "the bcrypt salt option is deprecated, omit it to use a generated salt"
            );
            bcrypt::hash_with_salt(password.as_ref(), cost, salt)
        }
        None => bcrypt::hash_with_result(password.as_ref(), cost),
    }
    .map_err(|e| {
        Error::PasswordHash(PasswordHashError::HashFailed(format!(
            "bcrypt hash failed: {}",
            e
        )))
    })?;

    Ok(parts.format_for_version(HASH_VERSION))
}

/// 验证密码是否匹配 bcrypt 哈希
pub fn bcrypt_verify(password: impl AsRef<[u8]>, hash: &str) -> Result<bool> {
    bcrypt::verify(password.as_ref(), hash).map_err(|e| {
        Error::PasswordHash(PasswordHashError::InvalidFormat(format!(
            "bcrypt verify failed: {}",
            e
        )))
    })
}

/// 哈希的算法或 cost 是否与给定选项不同
///
/// 无法解析为 bcrypt 的哈希总是需要重新生成。选项中没有 cost 时按默认 cost 比较。
pub fn bcrypt_needs_rehash(hash: &str, current: &HashOptions) -> bool {
    let current_cost = current.cost.unwrap_or(DEFAULT_COST);
    match hash.parse::<HashParts>() {
        Ok(parts) => parts.get_cost() != current_cost,
        Err(_) => true,
    }
}

/// 将废弃的 salt 选项转换为 16 字节的原始 salt
///
/// 前 22 个字符都属于 bcrypt 字母表时按 radix-64 解码，否则取前 16 个原始字节。
fn decode_salt_option(salt: &str) -> Result<[u8; BCRYPT_SALT_BYTES]> {
    let bytes = salt.as_bytes();
    if bytes.len() < MIN_SALT_OPTION_LENGTH {
        return Err(Error::PasswordHash(
            PasswordHashError::MalformedDeprecatedSaltOption(format!(
                "the salt option must be at least {} characters long, got {}",
                MIN_SALT_OPTION_LENGTH,
                bytes.len()
            )),
        ));
    }

    let prefix = &bytes[..BCRYPT_SALT_CHARS];
    if prefix.iter().all(|&b| is_bcrypt_char(b)) {
        let decoded = BCRYPT_SALT_ENGINE.decode(prefix).map_err(|e| {
            Error::PasswordHash(PasswordHashError::MalformedDeprecatedSaltOption(
                e.to_string(),
            ))
        })?;
        return decoded.try_into().map_err(|_| {
            Error::PasswordHash(PasswordHashError::MalformedDeprecatedSaltOption(
                "the salt option does not decode to 16 bytes".to_string(),
            ))
        });
    }

    let mut raw = [0u8; BCRYPT_SALT_BYTES];
    raw.copy_from_slice(&bytes[..BCRYPT_SALT_BYTES]);
    Ok(raw)
}

fn is_bcrypt_char(b: u8) -> bool {
    b == b'.' || b == b'/' || b.is_ascii_alphanumeric()
}
