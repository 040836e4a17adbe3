//! Salt 生成模块
//!
//! 提供两种 salt：
//!
//! - **强 salt**: 由 CSPRNG 生成的 32-128 位十六进制字符串，随机源不可用时直接报错
//! - **兼容 salt** (`legacy` feature): 旧系统使用的 32 字符 salt，随机源不可用时
//!   降级为基于摘要链的生成方式，**不适合密码学用途**
//!
//! bcrypt 等自适应算法会在哈希结果中嵌入自己的 salt，新代码不需要调用本模块。
//!
//! ## 示例
//!
//! ```rust
//! use hashrs::salt::SaltGenerator;
//!
//! let generator = SaltGenerator::new();
//! let salt = generator.generate_strong(64).unwrap();
//! assert_eq!(salt.len(), 64);
//!
//! // 长度必须是 32 到 128 之间的偶数
//! assert!(generator.generate_strong(31).is_err());
//! assert!(generator.generate_strong(129).is_err());
//! ```

use crate::error::{Result, SaltError};
use crate::random::{fill_random_bytes, hex_encode};

/// 强 salt 的最小长度（十六进制字符数）
pub const MIN_STRONG_SALT_LENGTH: usize = 32;

/// 强 salt 的最大长度（十六进制字符数）
pub const MAX_STRONG_SALT_LENGTH: usize = 128;

/// 强 salt 的默认长度
pub const DEFAULT_STRONG_SALT_LENGTH: usize = 32;

/// 随机字节来源
///
/// 默认实现 [`OsEntropy`] 使用操作系统的 CSPRNG。实现必须是线程安全的。
pub trait EntropySource: Send + Sync {
    /// 用随机字节填充 `dest`，无法提供强随机数时返回错误
    fn fill(&self, dest: &mut [u8]) -> Result<()>;
}

/// 操作系统提供的密码学安全随机源
#[derive(Debug, Clone, Copy, Default)]
pub struct OsEntropy;

impl EntropySource for OsEntropy {
    fn fill(&self, dest: &mut [u8]) -> Result<()> {
        fill_random_bytes(dest)
    }
}

/// Salt 生成器
#[derive(Debug, Clone, Default)]
pub struct SaltGenerator<S = OsEntropy> {
    source: S,
}

impl SaltGenerator {
    /// 创建使用操作系统随机源的生成器
    pub fn new() -> Self {
        Self { source: OsEntropy }
    }
}

impl<S: EntropySource> SaltGenerator<S> {
    /// 使用指定的随机源创建生成器
    pub fn with_source(source: S) -> Self {
        Self { source }
    }

    /// 生成密码学安全的十六进制 salt
    ///
    /// # Arguments
    ///
    /// * `length` - salt 的字符数，必须是 32 到 128 之间的偶数
    ///
    /// # Errors
    ///
    /// - 长度不合法时返回 [`SaltError::InvalidLength`]
    /// - 随机源不可用时返回 [`SaltError::InsufficientEntropy`]，不会降级
    pub fn generate_strong(&self, length: usize) -> Result<String> {
        if !(MIN_STRONG_SALT_LENGTH..=MAX_STRONG_SALT_LENGTH).contains(&length) || length % 2 != 0
        {
            return Err(SaltError::InvalidLength {
                length,
                min: MIN_STRONG_SALT_LENGTH,
                max: MAX_STRONG_SALT_LENGTH,
            }
            .into());
        }

        let mut bytes = vec![0u8; length / 2];
        self.source
            .fill(&mut bytes)
            .map_err(|e| SaltError::InsufficientEntropy(e.to_string()))?;

        Ok(hex_encode(&bytes))
    }

    /// 生成默认长度（32 字符）的强 salt
    pub fn generate_strong_default(&self) -> Result<String> {
        self.generate_strong(DEFAULT_STRONG_SALT_LENGTH)
    }

    /// 尽力而为地生成 32 字符的兼容 salt
    ///
    /// 优先使用随机源的 16 字节输出；随机源失败时降级为
    /// [`generate_fallback`](Self::generate_fallback)。
    ///
    /// **仅用于兼容旧数据**，新代码请使用 [`generate_strong`](Self::generate_strong)。
    #[cfg(feature = "legacy")]
    pub fn generate(&self) -> String {
        let mut bytes = [0u8; LEGACY_RANDOM_BYTES];
        match self.source.fill(&mut bytes) {
            Ok(()) => hex_encode(&bytes),
            Err(e) => {
                log::debug!("random source unavailable, using fallback salt: {}", e);
                self.generate_fallback()
            }
        }
    }

    /// 不依赖密码学随机源的降级 salt
    ///
    /// 输出不可预测，但**不适合密码学用途**。见 [`generate_fallback_salt`]。
    #[cfg(feature = "legacy")]
    pub fn generate_fallback(&self) -> String {
        generate_fallback_salt()
    }
}

// ============================================================================
// 降级 salt 实现
// ============================================================================

#[cfg(feature = "legacy")]
const LEGACY_RANDOM_BYTES: usize = 16;

#[cfg(feature = "legacy")]
const FALLBACK_SALT_LENGTH: usize = 32;

/// SHA-256 十六进制摘要中可选取的最大下标（兼容旧 salt 的取值范围）
#[cfg(feature = "legacy")]
const FALLBACK_MAX_POSITION: usize = 62;

/// 基于摘要链生成 32 字符的 salt
///
/// 累加器初始为空字符串，迭代 32 次：
/// `accumulator = hex(SHA-256(accumulator ‖ r))`，其中 `r` 是非密码学随机数，
/// 然后取累加器中随机位置的一个字符追加到结果。
///
/// 随机数生成器的种子来自系统时间和进程号，不读取操作系统熵池。
/// 该输出**不适合密码学用途**，只为没有其他随机源的系统保留。
#[cfg(feature = "legacy")]
pub fn generate_fallback_salt() -> String {
    use rand::{SeedableRng, rngs::SmallRng};

    let mut rng = SmallRng::seed_from_u64(fallback_seed());
    fallback_salt_with(&mut rng)
}

#[cfg(feature = "legacy")]
fn fallback_salt_with<R: rand::Rng>(rng: &mut R) -> String {
    use sha2::{Digest, Sha256};

    let mut accumulator = String::new();
    let mut salt = String::with_capacity(FALLBACK_SALT_LENGTH);

    for _ in 0..FALLBACK_SALT_LENGTH {
        let value = rng.random::<u32>() >> 1;
        let mut hasher = Sha256::new();
        hasher.update(accumulator.as_bytes());
        hasher.update(value.to_string().as_bytes());
        accumulator = hex_encode(&hasher.finalize());

        let position = rng.random_range(0..=FALLBACK_MAX_POSITION);
        salt.push(char::from(accumulator.as_bytes()[position]));
    }

    salt
}

#[cfg(feature = "legacy")]
fn fallback_seed() -> u64 {
    use std::sync::atomic::{AtomicU64, Ordering};
    use std::time::{SystemTime, UNIX_EPOCH};

    static COUNTER: AtomicU64 = AtomicU64::new(0);

    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or_default();
    let count = COUNTER.fetch_add(1, Ordering::Relaxed);

    nanos ^ (u64::from(std::process::id()) << 32) ^ count.wrapping_mul(0x9E37_79B9_7F4A_7C15)
}
