//! 密码哈希集成测试
//!
//! 测试分发器、bcrypt 服务和 cost 策略的组合使用。

use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};
use std::thread;

use hashrs::error::{Error, PasswordHashError};
use hashrs::password::{
    BcryptConfig, BcryptHashService, CostPolicyProvider, HashOptions, HashService,
    HashingStrategy, PasswordHasher, bcrypt_hash, bcrypt_needs_rehash, bcrypt_verify,
    hash_password,
};

/// 运行时可调整的 cost 策略
struct AdjustableCost(AtomicU32);

impl AdjustableCost {
    fn new(cost: u32) -> Arc<Self> {
        Arc::new(Self(AtomicU32::new(cost)))
    }

    fn set(&self, cost: u32) {
        self.0.store(cost, Ordering::SeqCst);
    }
}

impl CostPolicyProvider for AdjustableCost {
    fn cost(&self) -> u32 {
        self.0.load(Ordering::SeqCst)
    }
}

/// 什么都不实现的服务
struct NotAHasher;

impl HashService for NotAHasher {
    fn name(&self) -> &str {
        "NotAHasher"
    }
}

/// 测试完整的注册-登录-升级流程
#[test]
fn test_register_login_upgrade_flow() {
    let policy = AdjustableCost::new(4);
    let service = Arc::new(BcryptHashService::new(policy.clone()));
    let hasher = PasswordHasher::new(service, policy.clone()).unwrap();

    // 注册
    let stored = hasher.hash("correct horse battery staple", "").unwrap();
    assert!(stored.starts_with("$2y$04$"));
    assert!(!hasher.needs_rehash(&stored));

    // 登录
    assert!(hasher.verify("correct horse battery staple", "", &stored).unwrap());
    assert!(!hasher.verify("wrong", "", &stored).unwrap());

    // 提高 cost 后旧哈希过期
    policy.set(5);
    assert!(hasher.needs_rehash(&stored));

    // 登录成功后重新哈希
    let upgraded = hasher.hash("correct horse battery staple", "").unwrap();
    assert!(upgraded.starts_with("$2y$05$"));
    assert!(!hasher.needs_rehash(&upgraded));
    assert!(hasher.verify("correct horse battery staple", "", &upgraded).unwrap());
}

/// 测试构造时拒绝不支持的服务
#[test]
fn test_unsupported_service() {
    let result = PasswordHasher::new(Arc::new(NotAHasher), Arc::new(BcryptConfig::default()));

    match result {
        Err(Error::PasswordHash(PasswordHashError::UnsupportedHashService(name))) => {
            assert_eq!(name, "NotAHasher");
        }
        other => panic!("expected UnsupportedHashService, got {:?}", other),
    }
}

/// 测试 cost 下限
#[test]
fn test_cost_lower_bound() {
    let err = bcrypt_hash("password", &HashOptions::with_cost(3)).unwrap_err();
    assert!(matches!(
        err,
        Error::PasswordHash(PasswordHashError::InvalidCost(_))
    ));

    let hash = bcrypt_hash("password", &HashOptions::with_cost(4)).unwrap();
    assert!(bcrypt_verify("password", &hash).unwrap());
}

/// 测试同一密码两次哈希结果不同
#[test]
fn test_hashes_are_salted() {
    let options = HashOptions::with_cost(4);
    let first = bcrypt_hash("same_password", &options).unwrap();
    let second = bcrypt_hash("same_password", &options).unwrap();

    assert_ne!(first, second);
    assert!(bcrypt_verify("same_password", &first).unwrap());
    assert!(bcrypt_verify("same_password", &second).unwrap());
}

/// 测试 72 字节截断：前 72 字节相同的密码互相验证通过
#[test]
fn test_truncation_at_72_bytes() {
    let prefix = "x".repeat(72);
    let hash = bcrypt_hash(format!("{}first-suffix", prefix), &HashOptions::with_cost(4)).unwrap();

    assert!(bcrypt_verify(format!("{}second-suffix", prefix), &hash).unwrap());
    assert!(bcrypt_verify(&prefix, &hash).unwrap());
    assert!(!bcrypt_verify(&prefix[..71], &hash).unwrap());
}

/// 测试 needs_rehash 与当前策略比较
#[test]
fn test_needs_rehash_against_policy() {
    let hash = bcrypt_hash("password", &HashOptions::with_cost(4)).unwrap();

    assert!(bcrypt_needs_rehash(&hash, &HashOptions::with_cost(10)));
    assert!(!bcrypt_needs_rehash(&hash, &HashOptions::with_cost(4)));

    let service = BcryptHashService::from_config(BcryptConfig::new().with_cost(10));
    assert!(service.needs_rehash(&hash));
}

/// 测试使用松散类型配置的选项
#[test]
fn test_options_from_loose_mapping() {
    let options = HashOptions::from_value(&serde_json::json!({ "cost": "4" })).unwrap();
    let hash = bcrypt_hash("password", &options).unwrap();
    assert!(hash.starts_with("$2y$04$"));

    let options = HashOptions::from_value(&serde_json::json!({ "cost": 3 })).unwrap();
    assert!(bcrypt_hash("password", &options).is_err());
}

/// 测试便捷函数与分发器结果一致
#[test]
fn test_hash_password_function() {
    let config = BcryptConfig::for_testing();
    let strategy = HashingStrategy::AdaptiveCost(Arc::new(BcryptHashService::from_config(config)));

    let hash = hash_password(&strategy, &config, "password", "unused").unwrap();
    assert!(hash.starts_with("$2y$04$"));
    assert!(bcrypt_verify("password", &hash).unwrap());
}

/// 测试在多个线程间共享哈希器
#[test]
fn test_shared_across_threads() {
    let hasher = Arc::new(PasswordHasher::bcrypt(BcryptConfig::for_testing()));

    let handles: Vec<_> = (0..4)
        .map(|i| {
            let hasher = Arc::clone(&hasher);
            thread::spawn(move || {
                let password = format!("password-{}", i);
                let hash = hasher.hash(&password, "").unwrap();
                assert!(hasher.verify(&password, "", &hash).unwrap());
                hash
            })
        })
        .collect();

    let hashes: Vec<String> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    assert_eq!(hashes.len(), 4);
}

/// 测试旧哈希迁移：旧哈希验证通过后用 bcrypt 重新哈希
#[test]
#[cfg(feature = "legacy")]
fn test_migrate_legacy_hash() {
    use hashrs::generate_fallback_salt;

    let legacy = PasswordHasher::legacy();
    let modern = PasswordHasher::bcrypt(BcryptConfig::for_testing());

    let salt = generate_fallback_salt();
    let stored = legacy.hash("password", &salt).unwrap();

    assert!(legacy.needs_rehash(&stored));
    assert!(modern.needs_rehash(&stored));
    assert!(legacy.verify("password", &salt, &stored).unwrap());

    let migrated = modern.hash("password", &salt).unwrap();
    assert!(!modern.needs_rehash(&migrated));
    assert!(modern.verify("password", "", &migrated).unwrap());
}
