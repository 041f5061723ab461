//! Import batch lifecycle.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use tenura_shared::types::ImportBatchId;

use super::error::ImportError;
use super::normalize::{MIN_PHONE_DIGITS, is_well_formed_email, normalize_email, normalize_phone};

/// Batch lifecycle status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BatchStatus {
    /// Rows staged, not validated.
    Staged,
    /// Validation pass done.
    Validated,
    /// Ready rows handed over; batch frozen.
    Committed,
}

/// Row status derived by validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RowStatus {
    /// Not yet validated.
    Pending,
    /// Will be imported.
    Ready,
    /// Matches an existing contact or an earlier row.
    Duplicate,
    /// Missing or malformed data.
    Invalid,
}

/// A raw row as read from the import file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeadRowInput {
    /// Lead name.
    pub name: String,
    /// Phone number.
    #[serde(default)]
    pub phone: Option<String>,
    /// Email address.
    #[serde(default)]
    pub email: Option<String>,
    /// Where the lead came from.
    #[serde(default)]
    pub source: Option<String>,
}

/// A staged row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeadImportRow {
    /// 1-based row number in the file.
    pub row_number: usize,
    /// Row as imported.
    pub input: LeadRowInput,
    /// Derived status.
    pub status: RowStatus,
    /// Why the row is not ready.
    pub reason: Option<String>,
}

/// Contacts already in the CRM, normalized.
#[derive(Debug, Clone, Default)]
pub struct KnownContacts {
    phones: HashSet<String>,
    emails: HashSet<String>,
}

impl KnownContacts {
    /// Builds the index from raw phone numbers and emails.
    #[must_use]
    pub fn new<'a>(
        phones: impl IntoIterator<Item = &'a str>,
        emails: impl IntoIterator<Item = &'a str>,
    ) -> Self {
        Self {
            phones: phones.into_iter().filter_map(normalize_phone).collect(),
            emails: emails.into_iter().filter_map(normalize_email).collect(),
        }
    }

    fn contains(&self, phone: Option<&str>, email: Option<&str>) -> bool {
        phone.is_some_and(|p| self.phones.contains(p)) || email.is_some_and(|e| self.emails.contains(e))
    }

    fn insert(&mut self, phone: Option<String>, email: Option<String>) {
        self.phones.extend(phone);
        self.emails.extend(email);
    }
}

/// Row counts after validation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportSummary {
    /// Ready rows.
    pub ready: usize,
    /// Duplicate rows.
    pub duplicate: usize,
    /// Invalid rows.
    pub invalid: usize,
}

/// A batch of staged lead rows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeadImportBatch {
    /// Batch ID.
    pub id: ImportBatchId,
    /// Lifecycle status.
    pub status: BatchStatus,
    /// Staged rows.
    pub rows: Vec<LeadImportRow>,
}

impl LeadImportBatch {
    /// Stages rows for validation.
    pub fn stage(rows: Vec<LeadRowInput>) -> Result<Self, ImportError> {
        if rows.is_empty() {
            return Err(ImportError::EmptyBatch);
        }
        let rows = rows
            .into_iter()
            .enumerate()
            .map(|(idx, input)| LeadImportRow {
                row_number: idx + 1,
                input,
                status: RowStatus::Pending,
                reason: None,
            })
            .collect();
        Ok(Self {
            id: ImportBatchId::new(),
            status: BatchStatus::Staged,
            rows,
        })
    }

    /// Derives every row's status. May be re-run until the batch is committed.
    ///
    /// A row is invalid without a name, without any contact, or with a
    /// malformed email or phone. A valid row is a duplicate when its phone or
    /// email matches `existing` or an earlier ready row.
    pub fn validate(&mut self, existing: &KnownContacts) -> Result<ImportSummary, ImportError> {
        if self.status == BatchStatus::Committed {
            return Err(ImportError::AlreadyCommitted(self.id));
        }

        let mut seen = KnownContacts::default();
        let mut summary = ImportSummary::default();

        for row in &mut self.rows {
            let phone = row.input.phone.as_deref().and_then(normalize_phone);
            let email = row.input.email.as_deref().and_then(normalize_email);

            let problem = if row.input.name.trim().is_empty() {
                Some("missing name")
            } else if phone.is_none() && email.is_none() {
                Some("no phone or email")
            } else if email.as_deref().is_some_and(|e| !is_well_formed_email(e)) {
                Some("malformed email")
            } else if phone.as_ref().is_some_and(|p| p.len() < MIN_PHONE_DIGITS) {
                Some("malformed phone")
            } else {
                None
            };

            (row.status, row.reason) = if let Some(problem) = problem {
                summary.invalid += 1;
                (RowStatus::Invalid, Some(problem.to_string()))
            } else if existing.contains(phone.as_deref(), email.as_deref()) {
                summary.duplicate += 1;
                (RowStatus::Duplicate, Some("matches an existing contact".to_string()))
            } else if seen.contains(phone.as_deref(), email.as_deref()) {
                summary.duplicate += 1;
                (RowStatus::Duplicate, Some("repeated in this batch".to_string()))
            } else {
                summary.ready += 1;
                seen.insert(phone, email);
                (RowStatus::Ready, None)
            };
        }

        self.status = BatchStatus::Validated;
        Ok(summary)
    }

    /// Freezes the batch and returns the ready rows.
    pub fn commit(&mut self) -> Result<Vec<LeadImportRow>, ImportError> {
        match self.status {
            BatchStatus::Committed => Err(ImportError::AlreadyCommitted(self.id)),
            BatchStatus::Staged => Err(ImportError::NotValidated(self.id)),
            BatchStatus::Validated => {
                self.status = BatchStatus::Committed;
                Ok(self
                    .rows
                    .iter()
                    .filter(|r| r.status == RowStatus::Ready)
                    .cloned()
                    .collect())
            }
        }
    }
}
