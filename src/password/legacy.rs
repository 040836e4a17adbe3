//! 旧式拼接哈希
//!
//! 迁移到 bcrypt 之前的哈希格式：`hex(SHA-512(password ‖ salt))`。
//! 只用于验证已存储的旧哈希，新哈希请使用 [`BcryptHashService`](super::BcryptHashService)。

use std::sync::Arc;

use sha2::{Digest, Sha512};

use super::strategy::{ConcatenationHasher, HashService, HashingStrategy};
use crate::random::hex_encode;

/// SHA-512 拼接哈希
#[derive(Debug, Clone, Copy, Default)]
pub struct LegacySha512Hasher;

impl LegacySha512Hasher {
    /// 创建哈希器
    pub fn new() -> Self {
        Self
    }
}

impl ConcatenationHasher for LegacySha512Hasher {
    fn hash(&self, input: &[u8]) -> String {
        hex_encode(&Sha512::digest(input))
    }
}

impl HashService for LegacySha512Hasher {
    fn name(&self) -> &str {
        "legacy-sha512"
    }

    fn into_strategy(self: Arc<Self>) -> Option<HashingStrategy> {
        Some(HashingStrategy::Concatenation(self))
    }
}
