//! Native document identifier.
//!
//! Layout (12 bytes): 4-byte big-endian unix seconds, 5 bytes unique to this
//! process, 3-byte big-endian counter. The portable form is 24 lowercase hex
//! characters.

use once_cell::sync::Lazy;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::sync::atomic::{AtomicU32, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};
use uuid::Uuid;

const OBJECT_ID_LEN: usize = 12;
const COUNTER_MASK: u32 = 0x00FF_FFFF;

static PROCESS_UNIQUE: Lazy<[u8; 5]> = Lazy::new(|| {
    let random = Uuid::new_v4();
    let mut bytes = [0u8; 5];
    bytes.copy_from_slice(&random.as_bytes()[..5]);
    bytes
});

static COUNTER: Lazy<AtomicU32> = Lazy::new(|| {
    let random = Uuid::new_v4();
    let seed = random.as_bytes();
    AtomicU32::new(u32::from_be_bytes([0, seed[0], seed[1], seed[2]]))
});

/// Store-native identifier of one document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectId([u8; OBJECT_ID_LEN]);

impl ObjectId {
    /// Generates a fresh identifier, unique within this process.
    pub fn new() -> Self {
        let seconds = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|elapsed| elapsed.as_secs() as u32)
            .unwrap_or(0);
        let count = COUNTER.fetch_add(1, Ordering::Relaxed) & COUNTER_MASK;

        let mut bytes = [0u8; OBJECT_ID_LEN];
        bytes[..4].copy_from_slice(&seconds.to_be_bytes());
        bytes[4..9].copy_from_slice(PROCESS_UNIQUE.as_slice());
        bytes[9..].copy_from_slice(&count.to_be_bytes()[1..]);
        Self(bytes)
    }

    pub fn bytes(&self) -> [u8; OBJECT_ID_LEN] {
        self.0
    }

    /// Decodes the 24-char hex form. Never touches any store.
    pub fn parse_str(value: &str) -> Result<Self, ObjectIdError> {
        if value.len() != OBJECT_ID_LEN * 2 {
            return Err(ObjectIdError::InvalidLength {
                input: value.to_string(),
                length: value.len(),
            });
        }

        let mut bytes = [0u8; OBJECT_ID_LEN];
        hex::decode_to_slice(value, &mut bytes).map_err(|source| ObjectIdError::InvalidHex {
            input: value.to_string(),
            source,
        })?;
        Ok(Self(bytes))
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// Creation time in unix seconds embedded in the identifier.
    pub fn timestamp(&self) -> u32 {
        u32::from_be_bytes([self.0[0], self.0[1], self.0[2], self.0[3]])
    }
}

impl Default for ObjectId {
    fn default() -> Self {
        Self::new()
    }
}

impl Display for ObjectId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_hex())
    }
}

/// Rejection reasons for a portable identifier string.
#[derive(Debug, Clone, PartialEq)]
pub enum ObjectIdError {
    InvalidLength { input: String, length: usize },
    InvalidHex {
        input: String,
        source: hex::FromHexError,
    },
}

impl Display for ObjectIdError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidLength { input, length } => write!(
                f,
                "invalid object id `{input}`: expected {} hex characters, got {length}",
                OBJECT_ID_LEN * 2
            ),
            Self::InvalidHex { input, source } => {
                write!(f, "invalid object id `{input}`: {source}")
            }
        }
    }
}

impl Error for ObjectIdError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::InvalidLength { .. } => None,
            Self::InvalidHex { source, .. } => Some(source),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{ObjectId, ObjectIdError};
    use std::collections::HashSet;

    #[test]
    fn hex_form_is_24_lowercase_chars() {
        let id = ObjectId::new();
        let hex = id.to_hex();
        assert_eq!(hex.len(), 24);
        assert!(hex
            .chars()
            .all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c)));
    }

    #[test]
    fn parse_accepts_uppercase_and_formats_lowercase() {
        let id = ObjectId::parse_str("5F1A2B3C4D5E6F7081929AAB").unwrap();
        assert_eq!(id.to_string(), "5f1a2b3c4d5e6f7081929aab");
        assert_eq!(id.timestamp(), 0x5F1A_2B3C);
    }

    #[test]
    fn parse_rejects_wrong_length() {
        let err = ObjectId::parse_str("abc").unwrap_err();
        assert!(matches!(err, ObjectIdError::InvalidLength { length: 3, .. }));

        let err = ObjectId::parse_str("").unwrap_err();
        assert!(matches!(err, ObjectIdError::InvalidLength { length: 0, .. }));
    }

    #[test]
    fn parse_rejects_non_hex_characters() {
        let err = ObjectId::parse_str("zzzzzzzzzzzzzzzzzzzzzzzz").unwrap_err();
        assert!(matches!(err, ObjectIdError::InvalidHex { .. }));
        assert!(err.to_string().contains("zzzz"));
    }

    #[test]
    fn generated_ids_are_unique_and_parse_back() {
        let ids: Vec<ObjectId> = (0..1_000).map(|_| ObjectId::new()).collect();
        let distinct: HashSet<_> = ids.iter().copied().collect();
        assert_eq!(distinct.len(), ids.len());

        for id in ids {
            assert_eq!(ObjectId::parse_str(&id.to_hex()).unwrap(), id);
        }
    }
}
