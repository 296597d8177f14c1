use chrono::{DateTime, Utc};
use stagegate_types::{CoreError, CoreResult, DocumentStatus, DocumentUpload, UserId};

/// URI schemes a file reference may use.
pub const ALLOWED_SCHEMES: &[&str] = &["http", "https", "ftp"];

/// Applies verification transitions to document uploads.
#[derive(Clone, Debug, Default)]
pub struct DocumentStateMachine;

impl DocumentStateMachine {
    pub fn new() -> Self {
        Self
    }

    /// Allowed target states from a given status.
    pub fn allowed_next(from: DocumentStatus) -> &'static [DocumentStatus] {
        match from {
            DocumentStatus::Pending => &[DocumentStatus::Uploaded],
            DocumentStatus::Uploaded => &[DocumentStatus::Verified, DocumentStatus::Rejected],
            DocumentStatus::Verified | DocumentStatus::Rejected => &[],
        }
    }

    /// Validate a file reference against the scheme allow-list.
    ///
    /// Accepts `scheme://rest` where the scheme is allow-listed and the
    /// remainder is non-empty. Anything else is a malformed reference.
    pub fn validate_file_ref(&self, file_ref: &str) -> CoreResult<()> {
        let malformed = || CoreError::InvalidFileReference {
            file_ref: file_ref.to_string(),
        };

        let (scheme, rest) = file_ref.split_once("://").ok_or_else(malformed)?;
        if rest.trim().is_empty() {
            return Err(malformed());
        }
        if !ALLOWED_SCHEMES.contains(&scheme.to_ascii_lowercase().as_str()) {
            return Err(malformed());
        }
        Ok(())
    }

    /// Apply a verification decision to an uploaded document.
    ///
    /// Same-state transitions are rejected as no-ops; rejection with
    /// blank or whitespace-only remarks fails before any mutation.
    pub fn update_status(
        &self,
        doc: &mut DocumentUpload,
        to: DocumentStatus,
        remarks: Option<String>,
        actor: UserId,
        now: DateTime<Utc>,
    ) -> CoreResult<()> {
        if doc.status == to {
            return Err(CoreError::NoOpTransition {
                document: doc.id,
                status: doc.status,
            });
        }
        if !Self::allowed_next(doc.status).contains(&to) {
            return Err(CoreError::InvalidDocumentTransition {
                document: doc.id,
                from: doc.status,
                to,
            });
        }
        if to == DocumentStatus::Rejected
            && remarks.as_deref().map_or(true, |r| r.trim().is_empty())
        {
            return Err(CoreError::RemarksRequired);
        }

        doc.status = to;
        doc.remarks = remarks;
        if to.is_terminal() {
            doc.reviewed_by = Some(actor);
        }
        doc.updated_at = now;
        Ok(())
    }
}
