//! Object id generation and parsing.

use std::fmt;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::OnceLock;
use std::time::{SystemTime, UNIX_EPOCH};

use rand::Rng;

use crate::error::DocumentError;

/// Random value shared by every id this process generates.
static PROCESS_UNIQUE: OnceLock<[u8; 5]> = OnceLock::new();

/// Monotonic counter, randomly seeded, truncated to 24 bits per id.
static COUNTER: OnceLock<AtomicU32> = OnceLock::new();

/// A 12-byte object id: 4-byte big-endian seconds-since-epoch timestamp,
/// 5-byte process-unique random value, 3-byte big-endian counter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObjectId([u8; 12]);

impl ObjectId {
    /// Generates a fresh id. Never fails; a pre-epoch system clock reads as
    /// timestamp 0.
    pub fn generate() -> ObjectId {
        let secs = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs() as u32)
            .unwrap_or(0);
        let unique = PROCESS_UNIQUE.get_or_init(|| rand::thread_rng().gen());
        let counter = COUNTER.get_or_init(|| AtomicU32::new(rand::thread_rng().gen()));
        let count = counter.fetch_add(1, Ordering::Relaxed) & 0x00ff_ffff;

        let mut bytes = [0u8; 12];
        bytes[0..4].copy_from_slice(&secs.to_be_bytes());
        bytes[4..9].copy_from_slice(unique);
        bytes[9] = (count >> 16) as u8;
        bytes[10] = (count >> 8) as u8;
        bytes[11] = count as u8;
        ObjectId(bytes)
    }

    pub fn from_bytes(bytes: [u8; 12]) -> ObjectId {
        ObjectId(bytes)
    }

    pub fn bytes(&self) -> [u8; 12] {
        self.0
    }

    /// Parses a 24-character hex string, case-insensitive.
    pub fn from_hex(hex: &str) -> Result<ObjectId, DocumentError> {
        if hex.len() != 24 || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(DocumentError::InvalidObjectId(hex.to_owned()));
        }
        let mut bytes = [0u8; 12];
        for (i, byte) in bytes.iter_mut().enumerate() {
            *byte = u8::from_str_radix(&hex[i * 2..i * 2 + 2], 16).unwrap_or(0);
        }
        Ok(ObjectId(bytes))
    }

    /// Lowercase 24-character hex rendering.
    pub fn to_hex(&self) -> String {
        self.0.iter().map(|b| format!("{b:02x}")).collect()
    }

    /// The id's embedded creation timestamp, in seconds since the epoch.
    pub fn timestamp(&self) -> u32 {
        u32::from_be_bytes([self.0[0], self.0[1], self.0[2], self.0[3]])
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_is_unique() {
        let a = ObjectId::generate();
        let b = ObjectId::generate();
        assert_ne!(a, b);
        // process-unique bytes are stable within a process
        assert_eq!(a.bytes()[4..9], b.bytes()[4..9]);
    }

    #[test]
    fn test_generate_embeds_wall_clock() {
        let before = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs() as u32)
            .unwrap_or(0);
        let id = ObjectId::generate();
        assert!(id.timestamp() >= before);
        assert!(id.timestamp() <= before + 2);
    }

    #[test]
    fn test_hex_round_trip() {
        let id = ObjectId::from_hex("507f1f77bcf86cd799439011").unwrap();
        assert_eq!(id.to_hex(), "507f1f77bcf86cd799439011");
        assert_eq!(id.bytes()[0], 0x50);
        assert_eq!(id.bytes()[11], 0x11);
        assert_eq!(id.to_string(), "507f1f77bcf86cd799439011");
    }

    #[test]
    fn test_from_hex_accepts_uppercase() {
        let id = ObjectId::from_hex("507F1F77BCF86CD799439011").unwrap();
        assert_eq!(id.to_hex(), "507f1f77bcf86cd799439011");
    }

    #[test]
    fn test_from_hex_rejects_malformed() {
        assert!(ObjectId::from_hex("").is_err());
        assert!(ObjectId::from_hex("507f1f77bcf86cd79943901").is_err());
        assert!(ObjectId::from_hex("507f1f77bcf86cd7994390111").is_err());
        assert!(ObjectId::from_hex("507f1f77bcf86cd79943901g").is_err());
        assert_eq!(
            ObjectId::from_hex("nope"),
            Err(DocumentError::InvalidObjectId("nope".to_owned()))
        );
    }

    #[test]
    fn test_byte_round_trip() {
        let raw = [1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12];
        assert_eq!(ObjectId::from_bytes(raw).bytes(), raw);
    }
}
