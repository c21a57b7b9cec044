//! Document identifiers.
//!
//! A [`DocumentId`] is 12 bytes: a big-endian seconds timestamp followed by
//! eight random bytes. It renders as 24 lowercase hex characters, which is
//! also its serialized form.

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Length of a [`DocumentId`] in bytes.
pub const DOCUMENT_ID_LEN: usize = 12;

/// A 12-byte document identifier, hex-encoded for display.
///
/// Ids sort by creation second first, so ids generated later compare greater
/// (within the same second the order is random).
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct DocumentId([u8; DOCUMENT_ID_LEN]);

impl DocumentId {
    /// Create a new `DocumentId` from raw bytes.
    #[must_use]
    pub const fn from_bytes(bytes: [u8; DOCUMENT_ID_LEN]) -> Self {
        Self(bytes)
    }

    /// Generate a fresh `DocumentId` stamped with the current time.
    #[must_use]
    pub fn generate() -> Self {
        Self::generate_at(Utc::now())
    }

    /// Generate a `DocumentId` stamped with the given time.
    ///
    /// Times outside the 32-bit seconds range are clamped.
    #[must_use]
    pub fn generate_at(at: DateTime<Utc>) -> Self {
        let seconds = u32::try_from(at.timestamp().max(0)).unwrap_or(u32::MAX);
        let random = uuid::Uuid::new_v4();

        let mut bytes = [0u8; DOCUMENT_ID_LEN];
        bytes[..4].copy_from_slice(&seconds.to_be_bytes());
        bytes[4..].copy_from_slice(&random.as_bytes()[..8]);
        Self(bytes)
    }

    /// Parse a `DocumentId` from a hex-encoded string.
    ///
    /// # Errors
    ///
    /// Returns an error if the string is not valid hex or not exactly 24 characters.
    pub fn from_hex(s: &str) -> Result<Self, IdError> {
        let bytes = hex::decode(s).map_err(|_| IdError::InvalidHex)?;
        let arr: [u8; DOCUMENT_ID_LEN] =
            bytes.try_into().map_err(|_| IdError::InvalidLength {
                expected: DOCUMENT_ID_LEN,
                got: s.len() / 2,
            })?;
        Ok(Self(arr))
    }

    /// Return the underlying bytes.
    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; DOCUMENT_ID_LEN] {
        &self.0
    }

    /// Return the hex-encoded string representation.
    #[must_use]
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// The creation time encoded in the first four bytes.
    #[must_use]
    pub fn timestamp(&self) -> DateTime<Utc> {
        let seconds = u32::from_be_bytes([self.0[0], self.0[1], self.0[2], self.0[3]]);
        Utc.timestamp_opt(i64::from(seconds), 0)
            .single()
            .unwrap_or_default()
    }
}

impl fmt::Debug for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DocumentId({})", self.to_hex())
    }
}

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl FromStr for DocumentId {
    type Err = IdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

impl TryFrom<String> for DocumentId {
    type Error = IdError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_hex(&value)
    }
}

impl From<DocumentId> for String {
    fn from(id: DocumentId) -> Self {
        id.to_hex()
    }
}

impl AsRef<[u8]> for DocumentId {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

/// Errors that can occur when parsing identifiers.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IdError {
    /// The input string contains invalid hexadecimal characters.
    #[error("invalid hex encoding")]
    InvalidHex,

    /// The input has an incorrect length.
    #[error("invalid length: expected {expected} bytes, got {got}")]
    InvalidLength {
        /// The expected number of bytes.
        expected: usize,
        /// The actual number of bytes.
        got: usize,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_id_roundtrip() {
        let id = DocumentId::generate();
        let parsed = DocumentId::from_hex(&id.to_hex()).unwrap();
        assert_eq!(id, parsed);
        assert_eq!(id.to_string().len(), 24);
    }

    #[test]
    fn document_id_invalid_hex() {
        let result = DocumentId::from_hex("not-valid-hex");
        assert!(matches!(result, Err(IdError::InvalidHex)));
    }

    #[test]
    fn document_id_wrong_length() {
        let result = DocumentId::from_hex("deadbeef");
        assert!(matches!(
            result,
            Err(IdError::InvalidLength {
                expected: 12,
                got: 4
            })
        ));
    }

    #[test]
    fn document_id_unique() {
        let id1 = DocumentId::generate();
        let id2 = DocumentId::generate();
        assert_ne!(id1, id2);
    }

    #[test]
    fn document_id_timestamp() {
        let at = Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap();
        let id = DocumentId::generate_at(at);
        assert_eq!(id.timestamp(), at);

        let later = DocumentId::generate_at(at + chrono::Duration::seconds(1));
        assert!(later > id);
    }

    #[test]
    fn document_id_serde_json() {
        let id = DocumentId::from_bytes([0xab; 12]);
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"abababababababababababab\"");
        let parsed: DocumentId = serde_json::from_str(&json).unwrap();
        assert_eq!(id, parsed);
    }

    #[test]
    fn document_id_from_str() {
        let id: DocumentId = "000000000000000000000001".parse().unwrap();
        assert_eq!(id.as_bytes()[11], 1);
    }
}
