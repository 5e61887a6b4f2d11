//! DNS record model.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::DnsMgrError;

/// TTL applied when a record is created without one, in seconds.
pub const DEFAULT_TTL: u32 = 60;

/// The record types the store accepts. Anything else is rejected at
/// parse time.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "UPPERCASE")]
pub enum RecordType {
    A,
    Aaaa,
    Cname,
    Mx,
    Txt,
    Ns,
}

impl RecordType {
    pub const ALL: [RecordType; 6] = [
        RecordType::A,
        RecordType::Aaaa,
        RecordType::Cname,
        RecordType::Mx,
        RecordType::Txt,
        RecordType::Ns,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            RecordType::A => "A",
            RecordType::Aaaa => "AAAA",
            RecordType::Cname => "CNAME",
            RecordType::Mx => "MX",
            RecordType::Txt => "TXT",
            RecordType::Ns => "NS",
        }
    }
}

impl fmt::Display for RecordType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RecordType {
    type Err = DnsMgrError;

    /// Parses the upper-case mnemonic exactly as stored.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        RecordType::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| DnsMgrError::Validation {
                message: format!("unknown record type: {s}"),
            })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DnsRecord {
    pub id: Uuid,
    /// The owning domain.
    pub domain_id: Uuid,
    /// Label within the parent domain (e.g., `www`, `mail`).
    pub subdomain: String,
    #[serde(rename = "type")]
    pub record_type: RecordType,
    /// Target data. Not validated against `record_type`.
    pub value: String,
    /// Time-to-live in seconds.
    pub ttl: u32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fields required to create a new DNS record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateDnsRecord {
    pub domain_id: Uuid,
    pub subdomain: String,
    #[serde(rename = "type")]
    pub record_type: RecordType,
    pub value: String,
    /// Falls back to [`DEFAULT_TTL`] when omitted.
    #[serde(default)]
    pub ttl: Option<u32>,
}

/// Fields that can be updated on an existing DNS record.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct UpdateDnsRecord {
    pub subdomain: Option<String>,
    #[serde(rename = "type")]
    pub record_type: Option<RecordType>,
    pub value: Option<String>,
    pub ttl: Option<u32>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_every_known_type() {
        for t in RecordType::ALL {
            assert_eq!(t.as_str().parse::<RecordType>().unwrap(), t);
        }
    }

    #[test]
    fn rejects_unknown_and_lowercase_types() {
        for bad in ["SRV", "PTR", "a", "aaaa", ""] {
            let err = bad.parse::<RecordType>().unwrap_err();
            assert!(matches!(err, DnsMgrError::Validation { .. }), "{bad}");
        }
    }

    #[test]
    fn serde_uses_upper_case_mnemonics() {
        assert_eq!(
            serde_json::to_string(&RecordType::Aaaa).unwrap(),
            "\"AAAA\""
        );
        assert_eq!(
            serde_json::from_str::<RecordType>("\"CNAME\"").unwrap(),
            RecordType::Cname
        );
        assert!(serde_json::from_str::<RecordType>("\"SOA\"").is_err());
    }

    #[test]
    fn create_input_reads_type_field_and_optional_ttl() {
        let input: CreateDnsRecord = serde_json::from_str(&format!(
            r#"{{"domain_id":"{}","subdomain":"www","type":"A","value":"1.2.3.4"}}"#,
            Uuid::now_v7()
        ))
        .unwrap();

        assert_eq!(input.record_type, RecordType::A);
        assert_eq!(input.ttl, None);
    }

    #[test]
    fn record_serializes_type_key() {
        let record = DnsRecord {
            id: Uuid::now_v7(),
            domain_id: Uuid::now_v7(),
            subdomain: "mail".into(),
            record_type: RecordType::Mx,
            value: "10 mx.example.com.".into(),
            ttl: DEFAULT_TTL,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };

        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["type"], "MX");
        assert_eq!(json["ttl"], 60);
        assert!(json.get("record_type").is_none());
    }
}
