//! Audit log collaborator.
//!
//! Every dispatch attempt, success or failure, produces exactly one
//! [`AuditRecord`]. Implementations are fire-and-forget from the
//! dispatcher's perspective and must not block the response path.

use std::sync::Mutex;

/// Log type key stamped on every console audit record.
pub const PROMPT_ALERT: &str = "PROMPT_ALERT";

/// One structured audit entry for a dispatch attempt.
#[derive(Debug, Clone)]
pub struct AuditRecord {
    pub log_type: String,
    /// Ordered key/value detail pairs (Command, IsValid, Output, ...).
    pub properties: Vec<(String, String)>,
    /// Exception detail when the handler failed.
    pub exception: Option<String>,
}

impl AuditRecord {
    /// A new `PROMPT_ALERT` record with no properties.
    pub fn new() -> Self {
        Self {
            log_type: PROMPT_ALERT.to_string(),
            properties: Vec::new(),
            exception: None,
        }
    }

    /// Append one detail pair.
    pub fn property(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.properties.push((key.into(), value.into()));
    }
}

impl Default for AuditRecord {
    fn default() -> Self {
        Self::new()
    }
}

/// Sink for audit records.
pub trait AuditLog: Send + Sync {
    /// Record one entry. Must not block; errors are swallowed by the sink.
    fn add(&self, record: AuditRecord);
}

/// Default sink: one log line per record via the `log` crate.
#[derive(Debug, Default)]
pub struct LogAudit;

impl AuditLog for LogAudit {
    fn add(&self, record: AuditRecord) {
        let detail: Vec<String> = record
            .properties
            .iter()
            .map(|(k, v)| format!("{k}={v}"))
            .collect();
        match &record.exception {
            Some(e) => log::error!("{} {} exception={e}", record.log_type, detail.join(" ")),
            None => log::info!("{} {}", record.log_type, detail.join(" ")),
        }
    }
}

/// Capturing sink for tests.
#[derive(Debug, Default)]
pub struct MemoryAudit {
    records: Mutex<Vec<AuditRecord>>,
}

impl MemoryAudit {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything recorded so far.
    pub fn records(&self) -> Vec<AuditRecord> {
        self.records.lock().map(|r| r.clone()).unwrap_or_default()
    }

    /// Number of records captured.
    pub fn len(&self) -> usize {
        self.records.lock().map(|r| r.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl AuditLog for MemoryAudit {
    fn add(&self, record: AuditRecord) {
        if let Ok(mut records) = self.records.lock() {
            records.push(record);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_accumulates_properties_in_order() {
        let mut rec = AuditRecord::new();
        rec.property("Command", "list-users");
        rec.property("IsValid", "true");
        assert_eq!(rec.log_type, PROMPT_ALERT);
        assert_eq!(rec.properties[0].0, "Command");
        assert_eq!(rec.properties[1].1, "true");
    }

    #[test]
    fn memory_audit_captures_records() {
        let audit = MemoryAudit::new();
        assert!(audit.is_empty());
        let mut rec = AuditRecord::new();
        rec.property("Command", "help");
        audit.add(rec);
        assert_eq!(audit.len(), 1);
        assert_eq!(audit.records()[0].properties[0].1, "help");
    }

    #[test]
    fn log_audit_does_not_panic() {
        let mut rec = AuditRecord::new();
        rec.property("Command", "x");
        rec.exception = Some("boom".into());
        LogAudit.add(rec);
    }
}
