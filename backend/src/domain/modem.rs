//! Device record aggregate and payload validation.
//!
//! A modem record stores the access credentials for a network device
//! (modem/router). Records belong to exactly one account; ownership is the
//! only access-control dimension and is enforced by the service layer.
//!
//! Validation collects every field violation rather than failing on the
//! first, so clients can surface all problems in one response.

use std::sync::OnceLock;

use chrono::{DateTime, Utc};
use regex::Regex;
use serde::Serialize;
use uuid::Uuid;

use super::UserId;

static IPV4_RE: OnceLock<Regex> = OnceLock::new();

fn ipv4_regex() -> &'static Regex {
    IPV4_RE.get_or_init(|| {
        // Four dot-separated 1-3 digit groups. Out-of-range octets such as
        // 999.1.1.1 pass; this mirrors the historical behaviour and is a
        // documented limitation, not an oversight to fix silently.
        let pattern = r"^(\d{1,3}\.){3}\d{1,3}$";
        Regex::new(pattern)
            .unwrap_or_else(|error| panic!("IPv4 regex failed to compile: {error}"))
    })
}

/// A single field-level validation failure.
///
/// Field names use the wire (camelCase) spelling so the violation list can be
/// returned to clients verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldViolation {
    /// Wire name of the offending field.
    pub field: &'static str,
    /// Stable machine-readable violation code.
    pub code: &'static str,
    /// Human-readable description.
    pub message: String,
}

impl FieldViolation {
    /// Violation for a field that is missing or blank.
    pub fn empty(field: &'static str) -> Self {
        Self {
            field,
            code: "empty_field",
            message: format!("{field} must not be empty"),
        }
    }

    /// Violation for a field whose content is malformed.
    pub fn malformed(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            code: "malformed_field",
            message: message.into(),
        }
    }
}

/// Candidate field set for creating or replacing a modem record.
///
/// Drafts are unvalidated by construction; callers must run [`validate`]
/// before handing a draft to [`Modem::create`] or [`Modem::apply`].
///
/// [`validate`]: ModemDraft::validate
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModemDraft {
    /// Display name for the device.
    pub name: String,
    /// Device type label (vendor/model).
    pub device_type: String,
    /// Dotted-quad IPv4 address of the device.
    pub ip_address: String,
    /// Device login username.
    pub username: String,
    /// Device login secret.
    pub password: String,
    /// Optional free-text description.
    pub description: Option<String>,
}

impl ModemDraft {
    /// Check every field and return the full violation list.
    ///
    /// # Examples
    /// ```
    /// use backend::domain::ModemDraft;
    ///
    /// let draft = ModemDraft {
    ///     name: String::new(),
    ///     device_type: "TP-Link Archer C7".into(),
    ///     ip_address: "1.2.3".into(),
    ///     username: "admin".into(),
    ///     password: "admin123".into(),
    ///     description: None,
    /// };
    /// let violations = draft.validate().expect_err("two violations");
    /// assert_eq!(violations.len(), 2);
    /// ```
    pub fn validate(&self) -> Result<(), Vec<FieldViolation>> {
        let mut violations = Vec::new();

        if self.name.trim().is_empty() {
            violations.push(FieldViolation::empty("name"));
        }
        if self.device_type.trim().is_empty() {
            violations.push(FieldViolation::empty("type"));
        }
        if self.ip_address.trim().is_empty() {
            violations.push(FieldViolation::empty("ipAddress"));
        } else if !ipv4_regex().is_match(&self.ip_address) {
            violations.push(FieldViolation::malformed(
                "ipAddress",
                "ipAddress must be a dotted-quad IPv4 address",
            ));
        }
        if self.username.trim().is_empty() {
            violations.push(FieldViolation::empty("username"));
        }
        if self.password.is_empty() {
            violations.push(FieldViolation::empty("password"));
        }

        if violations.is_empty() {
            Ok(())
        } else {
            Err(violations)
        }
    }
}

/// Stored access credentials for a network device.
///
/// ## Invariants
/// - `owner_id` references exactly one account; the record is visible and
///   mutable only through that account's identity.
/// - The device login secret is stored and returned in clear: the record is
///   the payload of a credential manager (unlike the *account* credential,
///   which is always redacted).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Modem {
    /// Stable record identifier.
    pub id: Uuid,
    /// Display name for the device.
    pub name: String,
    /// Device type label (vendor/model).
    pub device_type: String,
    /// Dotted-quad IPv4 address of the device.
    pub ip_address: String,
    /// Device login username.
    pub username: String,
    /// Device login secret.
    pub password: String,
    /// Optional free-text description.
    pub description: Option<String>,
    /// The owning account.
    pub owner_id: UserId,
    /// Record creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last modification timestamp.
    pub updated_at: DateTime<Utc>,
}

impl Modem {
    /// Materialize a new record from a validated draft, owned by `owner`.
    ///
    /// Generates the identifier and stamps both timestamps with the current
    /// time.
    pub fn create(owner: UserId, draft: ModemDraft) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            name: draft.name,
            device_type: draft.device_type,
            ip_address: draft.ip_address,
            username: draft.username,
            password: draft.password,
            description: draft.description,
            owner_id: owner,
            created_at: now,
            updated_at: now,
        }
    }

    /// Replace all mutable fields from a validated draft.
    ///
    /// Identifier, owner, and creation timestamp are immutable; the
    /// modification timestamp is refreshed.
    pub fn apply(&mut self, draft: ModemDraft) {
        self.name = draft.name;
        self.device_type = draft.device_type;
        self.ip_address = draft.ip_address;
        self.username = draft.username;
        self.password = draft.password;
        self.description = draft.description;
        self.updated_at = Utc::now();
    }
}
