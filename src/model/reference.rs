use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

/// Authority every reference issued by this application starts with.
pub const AUTHORITY: &str = "notepad";

/// Scheme shared by all note references.
pub const SCHEME: &str = "content://";

/// Reference to the notes collection, used as the parent for inserts.
pub const NOTES_COLLECTION: &str = "content://notepad/notes";

/// Decimal form of `i64::MIN`. Ids carrying it come from a corrupt row.
pub const CORRUPT_ID_SENTINEL: &str = "-9223372036854775808";

/// Prefix of the legacy provider whose references must not be dereferenced.
pub const LEGACY_PROVIDER_PREFIX: &str = "content://com.google.provider.NotePad";

static NOTE_REF_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^content://notepad/notes/(-?\d+)$").expect("note reference pattern is valid")
});

/// Error type for reference parsing
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RefError {
    #[error("missing note reference")]
    Missing,
    #[error("invalid note reference: {0}")]
    Invalid(String),
}

/// A validated reference to a single note, e.g. `content://notepad/notes/7`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct NoteRef {
    raw: String,
    id: i64,
}

impl NoteRef {
    /// Build the reference for a store-assigned id.
    pub fn for_id(id: i64) -> Self {
        NoteRef {
            raw: format!("{}/{}", NOTES_COLLECTION, id),
            id,
        }
    }

    /// Parse a reference string, applying [`is_invalid_reference`] first.
    pub fn parse(s: &str) -> Result<Self, RefError> {
        if is_invalid_reference(Some(s)) {
            return Err(RefError::Invalid(s.to_string()));
        }
        let caps = NOTE_REF_RE
            .captures(s)
            .ok_or_else(|| RefError::Invalid(s.to_string()))?;
        let id = caps[1]
            .parse::<i64>()
            .map_err(|_| RefError::Invalid(s.to_string()))?;
        Ok(NoteRef {
            raw: s.to_string(),
            id,
        })
    }

    /// Parse user input: a bare decimal id is expanded to a full reference
    /// before validation, anything else is taken as-is.
    pub fn parse_user_input(s: &str) -> Result<Self, RefError> {
        if s.trim().is_empty() {
            return Err(RefError::Missing);
        }
        Self::parse(&expand_user_input(s))
    }

    pub fn id(&self) -> i64 {
        self.id
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Re-run the validity check on an already parsed reference.
    pub fn is_valid(&self) -> bool {
        !is_invalid_reference(Some(&self.raw))
    }
}

impl fmt::Display for NoteRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

impl TryFrom<String> for NoteRef {
    type Error = RefError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        NoteRef::parse(&s)
    }
}

impl From<NoteRef> for String {
    fn from(r: NoteRef) -> Self {
        r.raw
    }
}

/// Expand a bare decimal id to a full note reference. Anything else is
/// returned trimmed and otherwise untouched; nothing is validated.
pub fn expand_user_input(s: &str) -> String {
    let s = s.trim();
    let digits = s.strip_prefix('-').unwrap_or(s);
    if !digits.is_empty() && digits.chars().all(|c| c.is_ascii_digit()) {
        format!("{}/{}", NOTES_COLLECTION, s)
    } else {
        s.to_string()
    }
}

/// Whether a reference must be rejected before any store access.
///
/// The conditions overlap (a legacy reference also fails the prefix test)
/// but are kept as independent checks:
/// - the reference is absent
/// - it contains the corrupt id sentinel
/// - it points at the legacy provider
/// - it does not start with this application's scheme and authority
pub fn is_invalid_reference(reference: Option<&str>) -> bool {
    let Some(s) = reference else {
        return true;
    };
    s.contains(CORRUPT_ID_SENTINEL)
        || s.contains(LEGACY_PROVIDER_PREFIX)
        || !s.starts_with(&format!("{}{}", SCHEME, AUTHORITY))
}
