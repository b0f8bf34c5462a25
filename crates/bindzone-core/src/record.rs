use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ZoneError;

/// Default TTL applied when the operator does not give one
pub const DEFAULT_TTL: u32 = 3600;

/// Record types the editor can render and validate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RecordType {
    /// IPv4 address
    A,
    /// IPv6 address
    Aaaa,
    /// Canonical name
    Cname,
    /// Mail exchanger
    Mx,
    /// Free-form text
    Txt,
    /// Name server
    Ns,
    /// Reverse pointer
    Ptr,
    /// Service locator
    Srv,
}

impl RecordType {
    /// Every supported type, in menu order
    pub const ALL: [Self; 8] = [
        Self::A,
        Self::Aaaa,
        Self::Cname,
        Self::Mx,
        Self::Txt,
        Self::Ns,
        Self::Ptr,
        Self::Srv,
    ];

    /// Mnemonic as written in zone files
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::A => "A",
            Self::Aaaa => "AAAA",
            Self::Cname => "CNAME",
            Self::Mx => "MX",
            Self::Txt => "TXT",
            Self::Ns => "NS",
            Self::Ptr => "PTR",
            Self::Srv => "SRV",
        }
    }

    /// Returns true if the type carries a priority
    #[must_use]
    pub const fn needs_priority(self) -> bool {
        matches!(self, Self::Mx | Self::Srv)
    }

    /// Returns true if the type carries weight and port
    #[must_use]
    pub const fn needs_weight_and_port(self) -> bool {
        matches!(self, Self::Srv)
    }
}

impl FromStr for RecordType {
    type Err = ZoneError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "A" => Ok(Self::A),
            "AAAA" => Ok(Self::Aaaa),
            "CNAME" => Ok(Self::Cname),
            "MX" => Ok(Self::Mx),
            "TXT" => Ok(Self::Txt),
            "NS" => Ok(Self::Ns),
            "PTR" => Ok(Self::Ptr),
            "SRV" => Ok(Self::Srv),
            _ => Err(ZoneError::UnsupportedType(s.trim().to_string())),
        }
    }
}

impl fmt::Display for RecordType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One resource record as the editor sees it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceRecord {
    /// Owner name, relative or fully qualified
    pub name: String,

    /// Time to live in seconds
    pub ttl: u32,

    /// Record type
    #[serde(rename = "type")]
    pub record_type: RecordType,

    /// Type-specific data (address, target host, text)
    pub value: String,

    /// MX preference or SRV priority
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<u16>,

    /// SRV weight
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<u16>,

    /// SRV port
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub port: Option<u16>,
}

impl ResourceRecord {
    /// Create a record without type-specific fields
    pub fn new(
        record_type: RecordType,
        name: impl Into<String>,
        value: impl Into<String>,
        ttl: u32,
    ) -> Self {
        Self {
            name: name.into(),
            ttl,
            record_type,
            value: value.into(),
            priority: None,
            weight: None,
            port: None,
        }
    }

    /// Set the MX/SRV priority
    #[must_use]
    pub fn with_priority(mut self, priority: u16) -> Self {
        self.priority = Some(priority);
        self
    }

    /// Set the SRV weight and port
    #[must_use]
    pub fn with_weight_and_port(mut self, weight: u16, port: u16) -> Self {
        self.weight = Some(weight);
        self.port = Some(port);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_type_parse_is_case_insensitive() {
        assert_eq!("mx".parse::<RecordType>().unwrap(), RecordType::Mx);
        assert_eq!(" aaaa ".parse::<RecordType>().unwrap(), RecordType::Aaaa);
        assert_eq!("Srv".parse::<RecordType>().unwrap(), RecordType::Srv);
    }

    #[test]
    fn test_record_type_rejects_unknown() {
        let err = "SOA".parse::<RecordType>().unwrap_err();
        assert!(matches!(err, ZoneError::UnsupportedType(t) if t == "SOA"));
    }

    #[test]
    fn test_required_fields_by_type() {
        for rt in RecordType::ALL {
            let expect_priority = matches!(rt, RecordType::Mx | RecordType::Srv);
            assert_eq!(rt.needs_priority(), expect_priority, "{rt}");
            assert_eq!(rt.needs_weight_and_port(), rt == RecordType::Srv, "{rt}");
        }
    }

    #[test]
    fn test_record_serialization() {
        let r = ResourceRecord::new(RecordType::Aaaa, "v6", "2001:db8::1", 300);
        let json = serde_json::to_value(&r).unwrap();
        assert_eq!(json["type"], "AAAA");
        assert_eq!(json["ttl"], 300);
        assert!(json.get("priority").is_none());

        let mx: ResourceRecord = serde_json::from_str(
            r#"{"name":"mail","ttl":3600,"type":"MX","value":"mx.example.","priority":10}"#,
        )
        .unwrap();
        assert_eq!(mx, ResourceRecord::new(RecordType::Mx, "mail", "mx.example.", 3600).with_priority(10));
    }
}
