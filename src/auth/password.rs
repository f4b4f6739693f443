use argon2::{
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Algorithm, Argon2, Params, Version,
};
use rand::rngs::OsRng;

use crate::config::PasswordConfig;

/// Argon2id hasher with a configured cost. Verification reads the cost
/// embedded in the stored hash, so raising the cost keeps old hashes valid.
#[derive(Clone)]
pub struct Hasher {
    params: Params,
}

impl Hasher {
    pub fn new(cfg: PasswordConfig) -> anyhow::Result<Self> {
        let params = Params::new(cfg.memory_kib, cfg.iterations, Params::DEFAULT_P_COST, None)
            .map_err(|e| anyhow::anyhow!("invalid argon2 parameters: {e}"))?;
        Ok(Self { params })
    }

    fn argon2(&self) -> Argon2<'static> {
        Argon2::new(Algorithm::Argon2id, Version::V0x13, self.params.clone())
    }

    pub fn hash(&self, plain: &str) -> anyhow::Result<String> {
        let salt = SaltString::generate(&mut OsRng);
        let hash = self
            .argon2()
            .hash_password(plain.as_bytes(), &salt)
            .map_err(|e| anyhow::anyhow!("argon2 hash_password error: {e}"))?
            .to_string();
        Ok(hash)
    }

    pub fn verify(&self, plain: &str, hash: &str) -> anyhow::Result<bool> {
        let parsed = PasswordHash::new(hash)
            .map_err(|e| anyhow::anyhow!("argon2 parse hash error: {e}"))?;
        Ok(Argon2::default()
            .verify_password(plain.as_bytes(), &parsed)
            .is_ok())
    }
}

#[cfg(test)]
pub(crate) fn cheap_hasher() -> Hasher {
    Hasher::new(PasswordConfig {
        memory_kib: 64,
        iterations: 1,
    })
    .expect("cheap params are valid")
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn hash_and_verify_roundtrip() {
        let hasher = cheap_hasher();
        let password = "Secur3P@ssw0rd!";
        let hash = hasher.hash(password).expect("hashing should succeed");
        assert!(hasher.verify(password, &hash).expect("verify should succeed"));
    }

    #[test]
    fn verify_rejects_wrong_password() {
        let hasher = cheap_hasher();
        let hash = hasher.hash("correct-horse-battery-staple").unwrap();
        assert!(!hasher.verify("wrong-password", &hash).expect("verify should not error"));
    }

    #[test]
    fn verify_errors_on_malformed_hash() {
        // The error carries the detail; AuthError::Internal logs it once.
        let err = cheap_hasher().verify("anything", "not-a-valid-hash").unwrap_err();
        assert!(err.to_string().starts_with("argon2 parse hash error:"));
    }

    #[test]
    fn same_password_gets_distinct_salts() {
        let hasher = cheap_hasher();
        let a = hasher.hash("secret1").unwrap();
        let b = hasher.hash("secret1").unwrap();
        assert_ne!(a, b);
        assert!(!a.contains("secret1"));
    }

    #[test]
    fn hash_records_configured_cost() {
        let hash = cheap_hasher().hash("secret1").unwrap();
        assert!(hash.starts_with("$argon2id$"));
        assert!(hash.contains("m=64,t=1,p=1"));
    }

    #[test]
    fn hashes_from_another_cost_still_verify() {
        let old = Hasher::new(PasswordConfig {
            memory_kib: 128,
            iterations: 2,
        })
        .unwrap();
        let hash = old.hash("secret1").unwrap();
        assert!(cheap_hasher().verify("secret1", &hash).unwrap());
    }

    #[test]
    fn zero_iterations_are_rejected() {
        assert!(Hasher::new(PasswordConfig {
            memory_kib: 64,
            iterations: 0,
        })
        .is_err());
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(8))]

        #[test]
        fn verify_matches_only_the_hashed_password(p in ".{0,24}", q in ".{0,24}") {
            let hasher = cheap_hasher();
            let hash = hasher.hash(&p).unwrap();
            prop_assert!(hasher.verify(&p, &hash).unwrap());
            prop_assert_eq!(hasher.verify(&q, &hash).unwrap(), p == q);
        }
    }
}
