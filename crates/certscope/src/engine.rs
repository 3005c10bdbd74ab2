//! Decode orchestration: sniff, decode, extract, check, assemble.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use certscope_core::{DecodedObject, RawInput};

use crate::checks::{PolicyBattery, PolicyConfig};
use crate::error::Result;
use crate::{extract, sniff, structure};

/// Engine configuration, embeddable in a caller's config file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub policy: PolicyConfig,
}

/// Stateless decoder. Cheap to clone and safe to share across threads.
#[derive(Debug, Clone, Default)]
pub struct Engine {
    battery: PolicyBattery,
}

impl Engine {
    #[must_use]
    pub fn new(config: EngineConfig) -> Self {
        Self {
            battery: PolicyBattery::new(config.policy),
        }
    }

    /// Decode `raw` and run the policy battery at the current time.
    ///
    /// # Errors
    ///
    /// Returns `DecodeError::UnrecognizedFormat` if no format matched and
    /// `DecodeError::MalformedEncoding` if the parser rejected the sniffed
    /// bytes.
    pub fn decode_and_validate(&self, raw: &RawInput) -> Result<DecodedObject> {
        self.decode_and_validate_at(raw, Utc::now())
    }

    /// Same as [`Engine::decode_and_validate`] with an explicit clock.
    ///
    /// # Errors
    ///
    /// See [`Engine::decode_and_validate`].
    pub fn decode_and_validate_at(
        &self,
        raw: &RawInput,
        now: DateTime<Utc>,
    ) -> Result<DecodedObject> {
        let sniffed = sniff::sniff(raw.bytes())?;
        let obj = structure::decode(&sniffed)?;

        let checks = self.battery.run(&obj, now);
        let subject_dn = extract::format_name(&obj.subject);

        let decoded = DecodedObject {
            source: raw.filename().map(str::to_string),
            kind: obj.kind,
            encoding: sniffed.encoding,
            subject: extract::name_map(&obj.subject),
            subject_dn,
            issuer: obj.issuer.as_ref().map(extract::name_map),
            issuer_dn: obj.issuer.as_ref().map(extract::format_name),
            public_key_summary: extract::public_key_summary(&obj.public_key),
            signature_summary: extract::signature_summary(&obj),
            serial_number_hex: obj.serial.as_deref().map(extract::serial_hex),
            thumbprint_sha1_hex: extract::thumbprint(&obj),
            validity: extract::validity(&obj),
            extensions: extract::extension_summaries(&obj),
            checks,
        };

        debug!(
            source = decoded.source.as_deref().unwrap_or("-"),
            kind = %decoded.kind,
            encoding = %decoded.encoding,
            checks = decoded.checks.len(),
            "decoded"
        );

        Ok(decoded)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checks::BlocklistConfig;
    use certscope_core::{ObjectKind, SourceEncoding};

    #[test]
    fn filename_is_carried_through() {
        let raw = RawInput::new(include_bytes!("../tests/fixtures/rsa2048_selfsigned.pem").to_vec())
            .with_filename("selfsigned.pem");
        let decoded = Engine::default().decode_and_validate(&raw).unwrap();
        assert_eq!(decoded.source.as_deref(), Some("selfsigned.pem"));
        assert_eq!(decoded.kind, ObjectKind::Certificate);
        assert_eq!(decoded.encoding, SourceEncoding::Pem);
    }

    #[test]
    fn config_round_trips_through_serde() {
        let config = EngineConfig {
            policy: PolicyConfig {
                blocklist: BlocklistConfig::only("/srv/badkeys"),
                expiry_warning_days: 30,
            },
        };
        let json = serde_json::to_string(&config).unwrap();
        let back: EngineConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back, config);

        let empty: EngineConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(empty, EngineConfig::default());
    }
}
