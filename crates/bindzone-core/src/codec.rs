//! Resource record line codec.
//!
//! Records are written one per line as `NAME\tTTL\tIN\tTYPE\tRDATA`, which
//! is the only shape the editor produces. Decoding accepts any run of tabs
//! or spaces between the first four fields and keeps the rest of the line as
//! RDATA.

use regex::Regex;
use std::net::Ipv6Addr;
use std::sync::OnceLock;

use crate::error::{Result, ZoneError};
use crate::record::{RecordType, ResourceRecord};

/// Record class written on every line.
const CLASS_IN: &str = "IN";

fn srv_name_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^_[A-Za-z0-9-]+\._(tcp|udp)(\..+)?$").expect("valid SRV name pattern")
    })
}

/// Check a record's type-specific shape without rendering it.
pub fn validate(record: &ResourceRecord) -> Result<()> {
    if record.ttl == 0 {
        return Err(ZoneError::InvalidTtl(record.ttl.to_string()));
    }
    check_text(record)?;

    match record.record_type {
        RecordType::Aaaa => {
            record
                .value
                .trim()
                .parse::<Ipv6Addr>()
                .map_err(|_| ZoneError::InvalidAddress(record.value.clone()))?;
        }
        RecordType::Mx => {
            require(record, record.priority, "priority")?;
        }
        RecordType::Srv => {
            if !srv_name_pattern().is_match(&record.name) {
                return Err(ZoneError::InvalidName(record.name.clone()));
            }
            require(record, record.priority, "priority")?;
            require(record, record.weight, "weight")?;
            require(record, record.port, "port")?;
        }
        RecordType::A
        | RecordType::Cname
        | RecordType::Txt
        | RecordType::Ns
        | RecordType::Ptr => {}
    }

    Ok(())
}

/// A record must render as exactly one line that `decode` reads back.
fn check_text(record: &ResourceRecord) -> Result<()> {
    let missing = |field| ZoneError::MissingField {
        record_type: record.record_type.to_string(),
        field,
    };
    if record.name.trim().is_empty() {
        return Err(missing("name"));
    }
    if record.value.trim().is_empty() {
        return Err(missing("value"));
    }
    if record.name.chars().any(char::is_whitespace) {
        return Err(ZoneError::InvalidRecord(format!(
            "owner name contains whitespace: {:?}",
            record.name
        )));
    }
    if record.value.chars().any(|c| c.is_control() && c != '\t') {
        return Err(ZoneError::InvalidRecord(format!(
            "value contains a line break or control character: {:?}",
            record.value
        )));
    }
    Ok(())
}

fn require(record: &ResourceRecord, field: Option<u16>, name: &'static str) -> Result<u16> {
    field.ok_or_else(|| ZoneError::MissingField {
        record_type: record.record_type.to_string(),
        field: name,
    })
}

/// Render the type-specific RDATA of a record.
pub fn rdata(record: &ResourceRecord) -> Result<String> {
    validate(record)?;

    let rdata = match record.record_type {
        RecordType::Txt => format!("\"{}\"", record.value),
        RecordType::Mx => format!("{} {}", require(record, record.priority, "priority")?, record.value),
        RecordType::Srv => format!(
            "{} {} {} {}",
            require(record, record.priority, "priority")?,
            require(record, record.weight, "weight")?,
            require(record, record.port, "port")?,
            record.value
        ),
        RecordType::A
        | RecordType::Aaaa
        | RecordType::Cname
        | RecordType::Ns
        | RecordType::Ptr => record.value.clone(),
    };

    Ok(rdata)
}

/// Render a record as a zone file line (without the line terminator).
pub fn encode(record: &ResourceRecord) -> Result<String> {
    let rdata = rdata(record)?;
    Ok(format!(
        "{}\t{}\t{CLASS_IN}\t{}\t{}",
        record.name, record.ttl, record.record_type, rdata
    ))
}

/// Parse a zone file line back into a record.
///
/// Fails with [`ZoneError::InvalidRecord`] for lines that are not
/// `NAME TTL IN TYPE RDATA` and with [`ZoneError::UnsupportedType`] for
/// record types outside the editable set (SOA, CAA, ...).
pub fn decode(line: &str) -> Result<ResourceRecord> {
    let invalid = || ZoneError::InvalidRecord(line.trim().to_string());

    let ([name, ttl, class, rtype], rest) = split_fields(line).ok_or_else(invalid)?;

    let ttl: u32 = ttl.parse().map_err(|_| invalid())?;
    if !class.eq_ignore_ascii_case(CLASS_IN) {
        return Err(invalid());
    }
    let record_type: RecordType = rtype.parse()?;

    let mut record = ResourceRecord::new(record_type, name, rest, ttl);

    match record_type {
        RecordType::Txt => {
            if let Some(inner) = rest
                .strip_prefix('"')
                .and_then(|r| r.strip_suffix('"'))
            {
                record.value = inner.to_string();
            }
        }
        RecordType::Mx => {
            let [priority, value] = rdata_tokens::<2>(rest).ok_or_else(invalid)?;
            record.priority = Some(priority.parse().map_err(|_| invalid())?);
            record.value = value.to_string();
        }
        RecordType::Srv => {
            let [priority, weight, port, value] = rdata_tokens::<4>(rest).ok_or_else(invalid)?;
            record.priority = Some(priority.parse().map_err(|_| invalid())?);
            record.weight = Some(weight.parse().map_err(|_| invalid())?);
            record.port = Some(port.parse().map_err(|_| invalid())?);
            record.value = value.to_string();
        }
        RecordType::A
        | RecordType::Aaaa
        | RecordType::Cname
        | RecordType::Ns
        | RecordType::Ptr => {}
    }

    Ok(record)
}

/// Split off the first four whitespace-separated fields, returning the
/// remainder untouched so quoted TXT data keeps its inner spacing.
fn split_fields(line: &str) -> Option<([&str; 4], &str)> {
    let mut rest = line.trim();
    let mut fields = [""; 4];

    for field in &mut fields {
        let end = rest.find(char::is_whitespace)?;
        *field = &rest[..end];
        rest = rest[end..].trim_start();
    }

    if rest.is_empty() {
        return None;
    }

    Some((fields, rest))
}

fn rdata_tokens<const N: usize>(rdata: &str) -> Option<[&str; N]> {
    let tokens: Vec<&str> = rdata.split_whitespace().collect();
    tokens.try_into().ok()
}

/// Parse an operator-supplied TTL; it must be a positive integer.
pub fn parse_ttl(input: &str) -> Result<u32> {
    match input.trim().parse::<u32>() {
        Ok(ttl) if ttl > 0 => Ok(ttl),
        _ => Err(ZoneError::InvalidTtl(input.trim().to_string())),
    }
}

/// Parse an operator-supplied priority, weight or port.
pub fn parse_integer(field: &'static str, input: &str) -> Result<u16> {
    input.trim().parse().map_err(|_| ZoneError::InvalidInteger {
        field,
        value: input.trim().to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(rt: RecordType, name: &str, value: &str) -> ResourceRecord {
        ResourceRecord::new(rt, name, value, 3600)
    }

    #[test]
    fn test_plain_types_need_only_name_ttl_value() {
        for rt in [
            RecordType::A,
            RecordType::Cname,
            RecordType::Txt,
            RecordType::Ns,
            RecordType::Ptr,
        ] {
            let line = encode(&record(rt, "host", "target.example.")).unwrap();
            assert!(line.starts_with("host\t3600\tIN\t"), "{line}");
        }
    }

    #[test]
    fn test_encode_a_record() {
        let line = encode(&record(RecordType::A, "www", "192.0.2.10")).unwrap();
        assert_eq!(line, "www\t3600\tIN\tA\t192.0.2.10");
    }

    #[test]
    fn test_encode_txt_wraps_in_quotes() {
        let line = encode(&record(RecordType::Txt, "@", "v=spf1 mx -all")).unwrap();
        assert_eq!(line, "@\t3600\tIN\tTXT\t\"v=spf1 mx -all\"");
    }

    #[test]
    fn test_encode_mx_requires_priority() {
        let err = encode(&record(RecordType::Mx, "mail", "mailhost.example.")).unwrap_err();
        assert!(matches!(err, ZoneError::MissingField { field: "priority", .. }));

        let mx = record(RecordType::Mx, "mail", "mailhost.example.").with_priority(10);
        assert_eq!(rdata(&mx).unwrap(), "10 mailhost.example.");
        assert_eq!(encode(&mx).unwrap(), "mail\t3600\tIN\tMX\t10 mailhost.example.");
    }

    #[test]
    fn test_encode_srv() {
        let srv = record(RecordType::Srv, "_sip._tcp", "sip.example.")
            .with_priority(10)
            .with_weight_and_port(60, 5060);
        assert_eq!(
            encode(&srv).unwrap(),
            "_sip._tcp\t3600\tIN\tSRV\t10 60 5060 sip.example."
        );
    }

    #[test]
    fn test_encode_srv_missing_fields() {
        let srv = record(RecordType::Srv, "_sip._udp", "sip.example.").with_priority(10);
        let err = encode(&srv).unwrap_err();
        assert!(matches!(err, ZoneError::MissingField { field: "weight", .. }));
    }

    #[test]
    fn test_encode_srv_name_checked_first() {
        // Name is rejected even though every numeric field is also missing.
        let err = encode(&record(RecordType::Srv, "sip.tcp", "sip.example.")).unwrap_err();
        assert!(matches!(err, ZoneError::InvalidName(_)));

        let full = record(RecordType::Srv, "_sip._sctp", "sip.example.")
            .with_priority(1)
            .with_weight_and_port(1, 1);
        assert!(matches!(encode(&full).unwrap_err(), ZoneError::InvalidName(_)));
    }

    #[test]
    fn test_encode_aaaa() {
        let err = encode(&record(RecordType::Aaaa, "v6", "not-an-ip")).unwrap_err();
        assert!(matches!(err, ZoneError::InvalidAddress(_)));

        let ok = record(RecordType::Aaaa, "v6", "2001:db8::1");
        assert_eq!(rdata(&ok).unwrap(), "2001:db8::1");
    }

    #[test]
    fn test_zero_ttl_rejected() {
        let mut r = record(RecordType::A, "www", "192.0.2.1");
        r.ttl = 0;
        assert!(matches!(encode(&r).unwrap_err(), ZoneError::InvalidTtl(_)));
    }

    #[test]
    fn test_decode_inverts_encode() {
        let records = vec![
            record(RecordType::A, "www", "192.0.2.10"),
            record(RecordType::Aaaa, "v6", "2001:db8::1"),
            record(RecordType::Cname, "ftp", "www.example."),
            record(RecordType::Ns, "@", "ns1.example."),
            record(RecordType::Ptr, "10", "host.example."),
            record(RecordType::Txt, "@", "hello   spaced world"),
            record(RecordType::Mx, "mail", "mailhost.example.").with_priority(10),
            record(RecordType::Srv, "_ldap._tcp", "dc.example.")
                .with_priority(0)
                .with_weight_and_port(100, 389),
        ];

        for original in records {
            let line = encode(&original).unwrap();
            assert_eq!(decode(&line).unwrap(), original, "{line}");
        }
    }

    #[test]
    fn test_empty_name_or_value_rejected() {
        let err = encode(&record(RecordType::A, "www", "")).unwrap_err();
        assert!(matches!(err, ZoneError::MissingField { field: "value", .. }));

        let err = encode(&record(RecordType::Cname, "ftp", "   ")).unwrap_err();
        assert!(matches!(err, ZoneError::MissingField { field: "value", .. }));

        let err = encode(&record(RecordType::A, "", "192.0.2.1")).unwrap_err();
        assert!(matches!(err, ZoneError::MissingField { field: "name", .. }));
    }

    #[test]
    fn test_line_breaks_rejected() {
        let injected = record(RecordType::Txt, "@", "x\nevil\t60\tIN\tA\t6.6.6.6\n;");
        assert!(matches!(encode(&injected).unwrap_err(), ZoneError::InvalidRecord(_)));

        let carriage = record(RecordType::A, "www", "192.0.2.1\r");
        assert!(matches!(validate(&carriage).unwrap_err(), ZoneError::InvalidRecord(_)));

        for name in ["www\nevil", "two words", "tab\tname"] {
            let err = encode(&record(RecordType::A, name, "192.0.2.1")).unwrap_err();
            assert!(matches!(err, ZoneError::InvalidRecord(_)), "{name:?}");
        }
    }

    #[test]
    fn test_decode_accepts_space_runs() {
        let r = decode("mail   600  in  MX   5   mx1.example.").unwrap();
        assert_eq!(r.record_type, RecordType::Mx);
        assert_eq!(r.ttl, 600);
        assert_eq!(r.priority, Some(5));
        assert_eq!(r.value, "mx1.example.");
    }

    #[test]
    fn test_decode_rejects_non_records() {
        assert!(matches!(
            decode("2024010101\t; serial").unwrap_err(),
            ZoneError::InvalidRecord(_)
        ));
        assert!(matches!(
            decode("$TTL 86400").unwrap_err(),
            ZoneError::InvalidRecord(_)
        ));
        assert!(matches!(
            decode("@ 3600 IN SOA ns1.example. admin.example. (").unwrap_err(),
            ZoneError::UnsupportedType(_)
        ));
        assert!(matches!(
            decode("mail 3600 IN MX mailhost.example.").unwrap_err(),
            ZoneError::InvalidRecord(_)
        ));
    }

    #[test]
    fn test_parse_ttl() {
        assert_eq!(parse_ttl("3600").unwrap(), 3600);
        assert_eq!(parse_ttl(" 60 ").unwrap(), 60);
        assert!(matches!(parse_ttl("0").unwrap_err(), ZoneError::InvalidTtl(_)));
        assert!(matches!(parse_ttl("-5").unwrap_err(), ZoneError::InvalidTtl(_)));
        assert!(matches!(parse_ttl("soon").unwrap_err(), ZoneError::InvalidTtl(_)));
    }

    #[test]
    fn test_parse_integer() {
        assert_eq!(parse_integer("priority", "10").unwrap(), 10);
        let err = parse_integer("port", "http").unwrap_err();
        assert!(matches!(err, ZoneError::InvalidInteger { field: "port", .. }));
    }
}
