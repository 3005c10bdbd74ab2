use certscope_core::{CheckResult, CHECK_KEY_SIZE};

use crate::structure::PublicKey;

const RSA_MIN_PASS: usize = 2048;
const RSA_MIN_WARN: usize = 1024;
const EC_MIN_PASS: usize = 256;
const DSA_MIN_PASS: usize = 2048;

pub fn check(key: &PublicKey) -> CheckResult {
    if let PublicKey::Other(other) = key {
        return CheckResult::unknown(CHECK_KEY_SIZE, "Unknown public key type")
            .with_detail(other.name.clone());
    }

    let bits = match key.key_size() {
        Ok(bits) => bits,
        Err(e) => {
            return CheckResult::unknown(CHECK_KEY_SIZE, "Could not determine key size")
                .with_detail(e.to_string())
        }
    };

    match key {
        PublicKey::Rsa(_) => {
            let label = format!("(RSA {bits} bits)");
            if bits >= RSA_MIN_PASS {
                CheckResult::passed(CHECK_KEY_SIZE, label)
            } else if bits >= RSA_MIN_WARN {
                CheckResult::warning(CHECK_KEY_SIZE, format!("{label} - consider 2048+"))
            } else {
                CheckResult::failed(CHECK_KEY_SIZE, format!("{label} - too small"))
            }
        }
        PublicKey::Ec(ec) => {
            let curve = ec.curve.name().unwrap_or("explicit curve");
            let label = format!("(EC {curve} / {bits} bits)");
            if bits >= EC_MIN_PASS {
                CheckResult::passed(CHECK_KEY_SIZE, label)
            } else {
                CheckResult::warning(CHECK_KEY_SIZE, format!("{label} - consider 256+"))
            }
        }
        PublicKey::Dsa(_) => {
            let label = format!("(DSA {bits} bits)");
            if bits >= DSA_MIN_PASS {
                CheckResult::passed(CHECK_KEY_SIZE, label)
            } else {
                CheckResult::warning(CHECK_KEY_SIZE, format!("{label} - consider 2048+"))
            }
        }
        PublicKey::Other(_) => CheckResult::unknown(CHECK_KEY_SIZE, "Unknown public key type"),
    }
}
