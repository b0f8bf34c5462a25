use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for zone editing operations
pub type Result<T> = std::result::Result<T, ZoneError>;

/// Errors that can occur while reading or editing BIND zones
#[derive(Error, Debug)]
pub enum ZoneError {
    /// No zone has been selected for the operation
    #[error("no zone selected")]
    NoZoneSelected,

    /// The zone has no file, or the file does not exist
    #[error("zone file missing for {zone}: {}", path.as_ref().map_or_else(|| "(no file declared)".to_string(), |p| p.display().to_string()))]
    ZoneFileMissing {
        /// Zone name
        zone: String,
        /// Path the zone declared, if any
        path: Option<PathBuf>,
    },

    /// Zone name not present in the configuration
    #[error("unknown zone: {0}")]
    UnknownZone(String),

    /// Record type outside the supported set
    #[error("unsupported record type: {0}")]
    UnsupportedType(String),

    /// A type-specific field is required but absent
    #[error("{record_type} records require a non-empty {field}")]
    MissingField {
        /// Record type being rendered
        record_type: String,
        /// Name of the absent field
        field: &'static str,
    },

    /// AAAA value is not a valid IPv6 literal
    #[error("invalid IPv6 address: {0}")]
    InvalidAddress(String),

    /// SRV owner name is not of the `_service._proto` form
    #[error("invalid SRV name (expected _service._tcp or _service._udp): {0}")]
    InvalidName(String),

    /// TTL is non-numeric or not positive
    #[error("invalid TTL: {0}")]
    InvalidTtl(String),

    /// Numeric field is non-numeric or out of range
    #[error("invalid {field}: {value}")]
    InvalidInteger {
        /// Field being parsed
        field: &'static str,
        /// Raw input
        value: String,
    },

    /// Line is not a resource record the codec understands
    #[error("not a resource record line: {0}")]
    InvalidRecord(String),

    /// Delete/update target is absent from the zone file
    #[error("record not found: {0}")]
    RecordNotFound(String),

    /// External checker or reload command failed
    #[error("command `{command}` failed: {reason}")]
    ExternalCommandFailed {
        /// Command line that was run
        command: String,
        /// Exit status or failure description
        reason: String,
    },

    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),

    /// Reading or writing a file failed
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        /// File being accessed
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },
}

impl ZoneError {
    /// Wrap an I/O error with the path it happened on
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Returns true if the error comes from input validation
    #[must_use]
    pub const fn is_validation_error(&self) -> bool {
        matches!(
            self,
            Self::UnsupportedType(_)
                | Self::MissingField { .. }
                | Self::InvalidAddress(_)
                | Self::InvalidName(_)
                | Self::InvalidTtl(_)
                | Self::InvalidInteger { .. }
                | Self::InvalidRecord(_)
        )
    }

    /// Returns true if the error is raised before any backup or write happens
    #[must_use]
    pub const fn aborts_before_write(&self) -> bool {
        self.is_validation_error()
            || matches!(
                self,
                Self::NoZoneSelected
                    | Self::ZoneFileMissing { .. }
                    | Self::UnknownZone(_)
                    | Self::RecordNotFound(_)
            )
    }
}
