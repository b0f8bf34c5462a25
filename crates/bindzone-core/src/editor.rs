//! Zone editing workflow.
//!
//! Every mutation runs the same sequence against a freshly loaded file:
//!
//! ```text
//! validate -> render line -> preview/approve -> backup -> apply
//!          -> write -> bump serial -> write
//! ```
//!
//! Validation failures and missing targets abort before the backup, so a
//! rejected edit leaves no trace on disk.

use chrono::{Local, NaiveDateTime};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::backup::BackupStore;
use crate::codec;
use crate::command::{CommandRunner, SystemRunner, Toolchain};
use crate::document::ZoneDocument;
use crate::error::{Result, ZoneError};
use crate::named_conf::ZoneEntry;
use crate::record::{RecordType, ResourceRecord};
use crate::serial::{SerialChange, SerialPolicy};

/// The zone an operator is working on
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ZoneSession {
    /// Zone name
    pub zone: String,
    /// Zone file path
    pub file: PathBuf,
}

impl ZoneSession {
    /// Select a zone from the catalog; zones without a file cannot be selected
    pub fn select(entry: &ZoneEntry) -> Result<Self> {
        Ok(Self {
            zone: entry.name.clone(),
            file: entry.require_file()?.to_path_buf(),
        })
    }

    /// Unwrap an optional selection, failing with [`ZoneError::NoZoneSelected`]
    pub fn require(selection: Option<&Self>) -> Result<&Self> {
        selection.ok_or(ZoneError::NoZoneSelected)
    }

    fn ensure_file(&self) -> Result<()> {
        if self.file.is_file() {
            Ok(())
        } else {
            Err(ZoneError::ZoneFileMissing {
                zone: self.zone.clone(),
                path: Some(self.file.clone()),
            })
        }
    }
}

/// Kind of edit being made
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeKind {
    /// Record appended
    Add,
    /// Record lines removed
    Delete,
    /// Record line replaced in place
    Update,
}

/// What an edit is about to do, shown before the file is touched
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChangePreview {
    /// Kind of edit
    pub kind: ChangeKind,
    /// Zone being edited
    pub zone: String,
    /// Lines that will be removed or replaced
    pub remove: Vec<String>,
    /// Line that will be written
    pub insert: Option<String>,
}

/// Result of an applied edit
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChangeReport {
    /// Kind of edit
    pub kind: ChangeKind,
    /// Copy of the file taken before the edit
    pub backup: PathBuf,
    /// Number of lines added, removed or replaced
    pub lines_changed: usize,
    /// Line written, for add and update
    pub line: Option<String>,
    /// Serial rewrite, if the file has a serial line
    pub serial: Option<SerialChange>,
}

/// Outcome of a mutating call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditOutcome {
    /// The edit was written
    Applied(ChangeReport),
    /// The preview was declined; nothing was written
    Declined(ChangePreview),
}

fn local_now() -> NaiveDateTime {
    Local::now().naive_local()
}

/// Applies record edits to zone files
pub struct ZoneEditor {
    backups: BackupStore,
    policy: SerialPolicy,
    tools: Toolchain,
    runner: Box<dyn CommandRunner>,
    clock: fn() -> NaiveDateTime,
}

impl std::fmt::Debug for ZoneEditor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ZoneEditor")
            .field("backups", &self.backups)
            .field("policy", &self.policy)
            .field("tools", &self.tools)
            .finish_non_exhaustive()
    }
}

impl ZoneEditor {
    /// Editor writing backups to `backups` and bumping serials with `policy`
    #[must_use]
    pub fn new(backups: BackupStore, policy: SerialPolicy) -> Self {
        Self {
            backups,
            policy,
            tools: Toolchain::default(),
            runner: Box::new(SystemRunner::default()),
            clock: local_now,
        }
    }

    /// Use a different set of BIND utilities
    #[must_use]
    pub fn with_toolchain(mut self, tools: Toolchain) -> Self {
        self.tools = tools;
        self
    }

    /// Use a different command runner
    #[must_use]
    pub fn with_runner(mut self, runner: impl CommandRunner + 'static) -> Self {
        self.runner = Box::new(runner);
        self
    }

    /// Use a fixed clock for backup names and serials
    #[must_use]
    pub fn with_clock(mut self, clock: fn() -> NaiveDateTime) -> Self {
        self.clock = clock;
        self
    }

    /// Serial policy in use
    #[must_use]
    pub const fn policy(&self) -> SerialPolicy {
        self.policy
    }

    /// Backup store in use
    #[must_use]
    pub const fn backups(&self) -> &BackupStore {
        &self.backups
    }

    /// Read the selected zone file
    pub fn load(&self, session: &ZoneSession) -> Result<ZoneDocument> {
        session.ensure_file()?;
        ZoneDocument::load(&session.file)
    }

    /// Append a record to the zone.
    pub fn add_record(
        &self,
        session: &ZoneSession,
        record: &ResourceRecord,
        approve: impl FnOnce(&ChangePreview) -> bool,
    ) -> Result<EditOutcome> {
        let document = self.load(session)?;
        let line = codec::encode(record)?;

        let preview = ChangePreview {
            kind: ChangeKind::Add,
            zone: session.zone.clone(),
            remove: Vec::new(),
            insert: Some(line.clone()),
        };
        if !approve(&preview) {
            return Ok(EditOutcome::Declined(preview));
        }

        self.commit(session, document, ChangeKind::Add, Some(line), |doc, line| {
            doc.append(line.unwrap_or_default());
            Ok(1)
        })
    }

    /// Remove every line whose trimmed text equals `exact_line`.
    pub fn delete_record(
        &self,
        session: &ZoneSession,
        exact_line: &str,
        approve: impl FnOnce(&ChangePreview) -> bool,
    ) -> Result<EditOutcome> {
        let document = self.load(session)?;
        let remove = matching_lines(&document, exact_line)?;

        let preview = ChangePreview {
            kind: ChangeKind::Delete,
            zone: session.zone.clone(),
            remove,
            insert: None,
        };
        if !approve(&preview) {
            return Ok(EditOutcome::Declined(preview));
        }

        self.commit(session, document, ChangeKind::Delete, None, |doc, _| {
            doc.delete_exact(exact_line)
        })
    }

    /// Replace the line equal to `exact_line` with a rendering of `record`,
    /// keeping its position in the file.
    pub fn update_record(
        &self,
        session: &ZoneSession,
        exact_line: &str,
        record: &ResourceRecord,
        approve: impl FnOnce(&ChangePreview) -> bool,
    ) -> Result<EditOutcome> {
        let document = self.load(session)?;
        let line = codec::encode(record)?;
        let remove = matching_lines(&document, exact_line)?;

        let preview = ChangePreview {
            kind: ChangeKind::Update,
            zone: session.zone.clone(),
            remove,
            insert: Some(line.clone()),
        };
        if !approve(&preview) {
            return Ok(EditOutcome::Declined(preview));
        }

        self.commit(session, document, ChangeKind::Update, Some(line), |doc, line| {
            doc.replace_exact(exact_line, line.as_deref().unwrap_or_default())
        })
    }

    /// Remove records by name, type and value instead of by line text.
    ///
    /// Unlike [`ZoneEditor::delete_record`], spacing in the file does not
    /// matter; lines the codec cannot decode are never matched.
    pub fn delete_matching(
        &self,
        session: &ZoneSession,
        name: &str,
        record_type: RecordType,
        value: &str,
        approve: impl FnOnce(&ChangePreview) -> bool,
    ) -> Result<EditOutcome> {
        let document = self.load(session)?;
        let indices = document.find_matching(name, record_type, value);
        if indices.is_empty() {
            return Err(ZoneError::RecordNotFound(format!(
                "{name} {record_type} {value}"
            )));
        }

        let preview = ChangePreview {
            kind: ChangeKind::Delete,
            zone: session.zone.clone(),
            remove: indices
                .iter()
                .map(|&i| document.lines()[i].clone())
                .collect(),
            insert: None,
        };
        if !approve(&preview) {
            return Ok(EditOutcome::Declined(preview));
        }

        self.commit(session, document, ChangeKind::Delete, None, |doc, _| {
            doc.remove_lines(&indices);
            Ok(indices.len())
        })
    }

    /// Bump the serial without changing any record.
    ///
    /// Returns `None`, without taking a backup, when the file has no serial
    /// line the active policy recognizes.
    pub fn bump_serial(&self, session: &ZoneSession) -> Result<Option<(PathBuf, SerialChange)>> {
        let mut document = self.load(session)?;
        if self.policy.locate(&document).is_none() {
            return Ok(None);
        }

        let now = (self.clock)();
        let backup = self.backups.create(&session.file, now)?;
        let change = self.policy.apply(&mut document, now);
        document.save(&session.file)?;

        Ok(change.map(|c| {
            log_serial(session, &c);
            (backup, c)
        }))
    }

    /// Backups of the selected zone, oldest first
    pub fn list_backups(&self, session: &ZoneSession) -> Result<Vec<PathBuf>> {
        self.backups.list(&session.file)
    }

    /// Put a backup back in place. The current file is backed up first and
    /// the path of that safety copy is returned.
    pub fn restore_backup(&self, session: &ZoneSession, backup: &Path) -> Result<PathBuf> {
        session.ensure_file()?;

        let contents = std::fs::read(backup).map_err(|e| ZoneError::io(backup, e))?;
        let safety = self.backups.create(&session.file, (self.clock)())?;
        std::fs::write(&session.file, contents).map_err(|e| ZoneError::io(&session.file, e))?;
        info!(zone = %session.zone, backup = %backup.display(), "backup restored");
        Ok(safety)
    }

    /// Run the zone checker against the selected zone file
    pub async fn check_syntax(&self, session: &ZoneSession) -> Result<()> {
        session.ensure_file()?;
        let command = self.tools.checkzone_for(&session.zone, &session.file);
        self.runner.run(&command).await?.check(&command)
    }

    /// Run the configuration checker
    pub async fn check_config(&self) -> Result<()> {
        let command = &self.tools.checkconf;
        self.runner.run(command).await?.check(command)
    }

    /// Reload the name server after the zone passes its syntax check.
    ///
    /// A failed check is returned as is and the reload is not attempted.
    pub async fn reload_service(&self, session: &ZoneSession) -> Result<()> {
        self.check_syntax(session).await?;

        let command = &self.tools.reload;
        self.runner.run(command).await?.check(command)?;
        info!(zone = %session.zone, "name server reloaded");
        Ok(())
    }

    fn commit(
        &self,
        session: &ZoneSession,
        mut document: ZoneDocument,
        kind: ChangeKind,
        line: Option<String>,
        apply: impl FnOnce(&mut ZoneDocument, Option<String>) -> Result<usize>,
    ) -> Result<EditOutcome> {
        let now = (self.clock)();
        let backup = self.backups.create(&session.file, now)?;

        let lines_changed = apply(&mut document, line.clone())?;
        document.save(&session.file)?;
        info!(zone = %session.zone, kind = ?kind, lines = lines_changed, "zone file updated");

        let serial = self.policy.apply(&mut document, now);
        if let Some(change) = &serial {
            document.save(&session.file)?;
            log_serial(session, change);
        }

        Ok(EditOutcome::Applied(ChangeReport {
            kind,
            backup,
            lines_changed,
            line,
            serial,
        }))
    }
}

fn matching_lines(document: &ZoneDocument, exact_line: &str) -> Result<Vec<String>> {
    if !document.contains_exact(exact_line) {
        return Err(ZoneError::RecordNotFound(exact_line.trim().to_string()));
    }
    let target = exact_line.trim();
    Ok(document
        .lines()
        .iter()
        .filter(|l| l.trim() == target)
        .cloned()
        .collect())
}

fn log_serial(session: &ZoneSession, change: &SerialChange) {
    info!(
        zone = %session.zone,
        previous = change.previous,
        next = change.next,
        "serial updated"
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::{CommandSpec, CommandStatus};
    use async_trait::async_trait;
    use chrono::NaiveDate;
    use std::sync::{Arc, Mutex};
    use tempfile::TempDir;

    const ZONE: &str = "$TTL 86400\n\
@\tIN\tSOA\tns1.example.com. admin.example.com. (\n\
\t\t2024010100\t; serial\n\
\t\t3600 )\n\
www\t3600\tIN\tA\t192.0.2.10\n";

    fn fixed_now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 1, 2)
            .unwrap()
            .and_hms_opt(8, 30, 0)
            .unwrap()
    }

    struct Fixture {
        dir: TempDir,
        session: ZoneSession,
    }

    impl Fixture {
        fn new() -> Self {
            let dir = tempfile::tempdir().unwrap();
            let file = dir.path().join("db.example.com");
            std::fs::write(&file, ZONE).unwrap();
            Self {
                session: ZoneSession {
                    zone: "example.com".into(),
                    file,
                },
                dir,
            }
        }

        fn editor(&self, policy: SerialPolicy) -> ZoneEditor {
            ZoneEditor::new(BackupStore::new(self.dir.path().join("backups")), policy)
                .with_clock(fixed_now)
        }

        fn contents(&self) -> String {
            std::fs::read_to_string(&self.session.file).unwrap()
        }

        fn backup_count(&self) -> usize {
            std::fs::read_dir(self.dir.path().join("backups"))
                .map(Iterator::count)
                .unwrap_or(0)
        }
    }

    /// Records invocations and answers with scripted exit codes.
    #[derive(Clone, Default)]
    struct FakeRunner {
        calls: Arc<Mutex<Vec<String>>>,
        failing: Option<&'static str>,
    }

    #[async_trait]
    impl CommandRunner for FakeRunner {
        async fn run(&self, command: &CommandSpec) -> Result<CommandStatus> {
            self.calls.lock().unwrap().push(command.to_string());
            let code = if self.failing == Some(command.program.as_str()) { 1 } else { 0 };
            Ok(CommandStatus { code: Some(code) })
        }
    }

    fn applied(outcome: EditOutcome) -> ChangeReport {
        match outcome {
            EditOutcome::Applied(report) => report,
            EditOutcome::Declined(p) => panic!("edit declined: {p:?}"),
        }
    }

    #[test]
    fn test_add_mx_end_to_end() {
        let fx = Fixture::new();
        let editor = fx.editor(SerialPolicy::Counter);
        let mx = ResourceRecord::new(RecordType::Mx, "mail", "mailhost.example.", 3600)
            .with_priority(10);

        let report = applied(editor.add_record(&fx.session, &mx, |_| true).unwrap());

        assert!(report.backup.ends_with("db.example.com_20240102_083000.bak"));
        assert_eq!(std::fs::read_to_string(&report.backup).unwrap(), ZONE);

        let contents = fx.contents();
        assert!(contents.contains("www\t3600\tIN\tA\t192.0.2.10\n"));
        assert!(contents.ends_with("mail\t3600\tIN\tMX\t10 mailhost.example.\n"));
        assert!(contents.contains("\t\t2024010201\t; serial\n"));

        let serial = report.serial.unwrap();
        assert_eq!(serial.previous, 2_024_010_100);
        assert_eq!(serial.next, 2_024_010_201);
        assert_eq!(ZoneDocument::load(&fx.session.file).unwrap().records().count(), 2);
    }

    #[test]
    fn test_add_with_timestamp_policy() {
        let fx = Fixture::new();
        let editor = fx.editor(SerialPolicy::Timestamp);
        let txt = ResourceRecord::new(RecordType::Txt, "@", "hello", 300);

        let report = applied(editor.add_record(&fx.session, &txt, |_| true).unwrap());
        assert_eq!(report.serial.unwrap().next, 2_024_010_208);
        assert!(fx.contents().contains("\t\t2024010208\t; serial\n"));
        assert!(fx.contents().ends_with("@\t300\tIN\tTXT\t\"hello\"\n"));
    }

    #[test]
    fn test_validation_failure_leaves_no_trace() {
        let fx = Fixture::new();
        let editor = fx.editor(SerialPolicy::Counter);
        let bad = ResourceRecord::new(RecordType::Aaaa, "v6", "not-an-ip", 3600);

        let err = editor.add_record(&fx.session, &bad, |_| true).unwrap_err();
        assert!(matches!(err, ZoneError::InvalidAddress(_)));
        assert!(err.aborts_before_write());
        assert_eq!(fx.contents(), ZONE);
        assert_eq!(fx.backup_count(), 0);
    }

    #[test]
    fn test_declined_preview_writes_nothing() {
        let fx = Fixture::new();
        let editor = fx.editor(SerialPolicy::Counter);
        let a = ResourceRecord::new(RecordType::A, "ftp", "192.0.2.20", 3600);

        let outcome = editor
            .add_record(&fx.session, &a, |preview| {
                assert_eq!(preview.insert.as_deref(), Some("ftp\t3600\tIN\tA\t192.0.2.20"));
                false
            })
            .unwrap();
        assert!(matches!(outcome, EditOutcome::Declined(_)));
        assert_eq!(fx.contents(), ZONE);
        assert_eq!(fx.backup_count(), 0);
    }

    #[test]
    fn test_delete_exact_line() {
        let fx = Fixture::new();
        let editor = fx.editor(SerialPolicy::Counter);

        let report = applied(
            editor
                .delete_record(&fx.session, "  www\t3600\tIN\tA\t192.0.2.10 ", |p| {
                    p.remove.len() == 1
                })
                .unwrap(),
        );
        assert_eq!(report.lines_changed, 1);
        assert!(!fx.contents().contains("www"));
        assert_eq!(fx.backup_count(), 1);
    }

    #[test]
    fn test_delete_missing_record() {
        let fx = Fixture::new();
        let editor = fx.editor(SerialPolicy::Counter);

        // Same record with spaces instead of tabs is a different line.
        let err = editor
            .delete_record(&fx.session, "www 3600 IN A 192.0.2.10", |_| true)
            .unwrap_err();
        assert!(matches!(err, ZoneError::RecordNotFound(_)));
        assert_eq!(fx.contents(), ZONE);
        assert_eq!(fx.backup_count(), 0);
    }

    #[test]
    fn test_update_replaces_in_place() {
        let fx = Fixture::new();
        std::fs::write(
            &fx.session.file,
            format!("{ZONE}www\t3600\tIN\tA\t192.0.2.11\nftp\t3600\tIN\tCNAME\twww\n"),
        )
        .unwrap();
        let editor = fx.editor(SerialPolicy::Counter);
        let new = ResourceRecord::new(RecordType::A, "www", "198.51.100.7", 600);

        let report = applied(
            editor
                .update_record(&fx.session, "www\t3600\tIN\tA\t192.0.2.10", &new, |_| true)
                .unwrap(),
        );
        assert_eq!(report.kind, ChangeKind::Update);

        let doc = ZoneDocument::load(&fx.session.file).unwrap();
        let lines = doc.lines();
        assert_eq!(lines[4], "www\t600\tIN\tA\t198.51.100.7");
        // The other record with the same name is untouched.
        assert_eq!(lines[5], "www\t3600\tIN\tA\t192.0.2.11");
        assert_eq!(lines[6], "ftp\t3600\tIN\tCNAME\twww");
    }

    #[test]
    fn test_update_validates_before_lookup() {
        let fx = Fixture::new();
        let editor = fx.editor(SerialPolicy::Counter);
        let mx = ResourceRecord::new(RecordType::Mx, "mail", "mx.example.", 3600);

        let err = editor
            .update_record(&fx.session, "no such line", &mx, |_| true)
            .unwrap_err();
        assert!(matches!(err, ZoneError::MissingField { .. }));
    }

    #[test]
    fn test_delete_matching_ignores_spacing() {
        let fx = Fixture::new();
        std::fs::write(&fx.session.file, format!("{ZONE}www  3600  IN  A  192.0.2.10\n")).unwrap();
        let editor = fx.editor(SerialPolicy::Counter);

        let report = applied(
            editor
                .delete_matching(&fx.session, "www", RecordType::A, "192.0.2.10", |_| true)
                .unwrap(),
        );
        assert_eq!(report.lines_changed, 2);
        assert!(!fx.contents().contains("192.0.2.10"));

        let err = editor
            .delete_matching(&fx.session, "www", RecordType::A, "192.0.2.10", |_| true)
            .unwrap_err();
        assert!(matches!(err, ZoneError::RecordNotFound(_)));
    }

    #[test]
    fn test_missing_zone_file() {
        let fx = Fixture::new();
        let editor = fx.editor(SerialPolicy::Counter);
        let session = ZoneSession {
            zone: "gone.example".into(),
            file: fx.dir.path().join("db.gone"),
        };
        let a = ResourceRecord::new(RecordType::A, "x", "192.0.2.1", 60);
        let err = editor.add_record(&session, &a, |_| true).unwrap_err();
        assert!(matches!(err, ZoneError::ZoneFileMissing { .. }));
    }

    #[test]
    fn test_no_zone_selected() {
        assert!(matches!(
            ZoneSession::require(None).unwrap_err(),
            ZoneError::NoZoneSelected
        ));
        let entry = ZoneEntry {
            name: "nofile.example".into(),
            file: None,
        };
        assert!(matches!(
            ZoneSession::select(&entry).unwrap_err(),
            ZoneError::ZoneFileMissing { .. }
        ));
    }

    #[test]
    fn test_bump_serial_only() {
        let fx = Fixture::new();
        let editor = fx.editor(SerialPolicy::Counter);

        let (backup, change) = editor.bump_serial(&fx.session).unwrap().unwrap();
        assert!(backup.exists());
        assert_eq!(change.next, 2_024_010_201);

        std::fs::write(&fx.session.file, "www\t3600\tIN\tA\t192.0.2.10\n").unwrap();
        assert!(editor.bump_serial(&fx.session).unwrap().is_none());
    }

    #[test]
    fn test_restore_backup() {
        let fx = Fixture::new();
        let editor = fx.editor(SerialPolicy::Counter);
        let a = ResourceRecord::new(RecordType::A, "ftp", "192.0.2.20", 3600);
        let report = applied(editor.add_record(&fx.session, &a, |_| true).unwrap());

        // Same fixed clock: the safety copy lands in the same second.
        let safety = editor.restore_backup(&fx.session, &report.backup).unwrap();
        assert_eq!(fx.contents(), ZONE);
        assert_ne!(safety, report.backup);
        assert_eq!(std::fs::read_to_string(&report.backup).unwrap(), ZONE);
        assert!(std::fs::read_to_string(&safety).unwrap().contains("ftp\t3600\tIN\tA\t192.0.2.20"));
        assert_eq!(editor.list_backups(&fx.session).unwrap(), vec![report.backup, safety]);
    }

    #[test]
    fn test_blank_delete_target_is_not_found() {
        let fx = Fixture::new();
        std::fs::write(&fx.session.file, format!("{ZONE}\n\n")).unwrap();
        let before = fx.contents();
        let editor = fx.editor(SerialPolicy::Counter);

        let err = editor.delete_record(&fx.session, "   ", |_| true).unwrap_err();
        assert!(matches!(err, ZoneError::RecordNotFound(_)));

        let record = ResourceRecord::new(RecordType::A, "www", "192.0.2.11", 3600);
        let err = editor.update_record(&fx.session, "", &record, |_| true).unwrap_err();
        assert!(matches!(err, ZoneError::RecordNotFound(_)));

        assert_eq!(fx.contents(), before);
        assert_eq!(fx.backup_count(), 0);
    }

    #[test]
    fn test_multiline_value_is_rejected() {
        let fx = Fixture::new();
        let editor = fx.editor(SerialPolicy::Counter);
        let injected = ResourceRecord::new(RecordType::Txt, "@", "x\nevil\t60\tIN\tA\t6.6.6.6\n;", 3600);

        let err = editor.add_record(&fx.session, &injected, |_| true).unwrap_err();
        assert!(matches!(err, ZoneError::InvalidRecord(_)));
        assert_eq!(fx.contents(), ZONE);
        assert_eq!(fx.backup_count(), 0);
    }

    #[tokio::test]
    async fn test_reload_runs_check_first() {
        let fx = Fixture::new();
        let runner = FakeRunner::default();
        let calls = Arc::clone(&runner.calls);
        let editor = fx.editor(SerialPolicy::Counter).with_runner(runner);

        editor.reload_service(&fx.session).await.unwrap();

        let calls = calls.lock().unwrap();
        assert_eq!(calls.len(), 2);
        assert!(calls[0].starts_with("named-checkzone example.com "));
        assert_eq!(calls[1], "rndc reload");
    }

    #[tokio::test]
    async fn test_failed_check_blocks_reload() {
        let fx = Fixture::new();
        let runner = FakeRunner {
            failing: Some("named-checkzone"),
            ..FakeRunner::default()
        };
        let calls = Arc::clone(&runner.calls);
        let editor = fx.editor(SerialPolicy::Counter).with_runner(runner);

        let err = editor.reload_service(&fx.session).await.unwrap_err();
        assert!(matches!(err, ZoneError::ExternalCommandFailed { .. }));
        assert_eq!(calls.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_check_config() {
        let fx = Fixture::new();
        let runner = FakeRunner {
            failing: Some("named-checkconf"),
            ..FakeRunner::default()
        };
        let editor = fx.editor(SerialPolicy::Counter).with_runner(runner);
        assert!(editor.check_config().await.is_err());
        assert!(editor.check_syntax(&fx.session).await.is_ok());
    }
}
