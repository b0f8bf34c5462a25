//! Zone file record model and mutation engine for BIND zone editing.
//!
//! This crate holds everything the `bindzone` tool does to zone data:
//!
//! - **Discovery**: [`parse_zones`] scans `named.conf.local` for zones
//! - **Records**: [`codec`] renders and parses `NAME TTL IN TYPE RDATA` lines
//! - **Documents**: [`ZoneDocument`] edits a zone file line by line
//! - **Serials**: [`SerialPolicy`] computes the next SOA serial
//! - **Editing**: [`ZoneEditor`] ties it together with backups and BIND tooling
//!
//! # Example
//!
//! ```rust,ignore
//! use bindzone_core::{
//!     BackupStore, RecordType, ResourceRecord, SerialPolicy, ZoneEditor, ZoneSession,
//! };
//!
//! let zones = bindzone_core::load_zones("/etc/bind/named.conf.local".as_ref(), "/etc/bind".as_ref())?;
//! let session = ZoneSession::select(zones.require("example.com")?)?;
//! let editor = ZoneEditor::new(BackupStore::new("/etc/bind/zone_backups"), SerialPolicy::Counter);
//!
//! let mx = ResourceRecord::new(RecordType::Mx, "mail", "mailhost.example.", 3600).with_priority(10);
//! editor.add_record(&session, &mx, |_| true)?;
//! ```

pub mod backup;
pub mod codec;
pub mod command;
pub mod document;
pub mod editor;
mod error;
pub mod named_conf;
pub mod record;
pub mod serial;

pub use backup::BackupStore;
pub use command::{CommandRunner, CommandSpec, CommandStatus, SystemRunner, Toolchain};
pub use document::ZoneDocument;
pub use editor::{ChangeKind, ChangePreview, ChangeReport, EditOutcome, ZoneEditor, ZoneSession};
pub use error::{Result, ZoneError};
pub use named_conf::{load_zones, parse_zones, ZoneCatalog, ZoneEntry};
pub use record::{RecordType, ResourceRecord, DEFAULT_TTL};
pub use serial::{SerialChange, SerialPolicy};
