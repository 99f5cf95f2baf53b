//! Blake3 content addressing over canonical bytes.

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// A 256-bit content digest.
///
/// Serializes as a hex string in human-readable formats (JSON) and as raw
/// bytes in binary formats (bincode).
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Digest(pub [u8; 32]);

impl Digest {
    /// The all-zero digest, used as the genesis link sentinel.
    pub const ZERO: Self = Self([0u8; 32]);

    pub fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Render as lowercase hex.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// Parse from a hex string (64 hex characters).
    pub fn from_hex(s: &str) -> Result<Self, hex::FromHexError> {
        let bytes = hex::decode(s)?;
        let arr: [u8; 32] = bytes
            .try_into()
            .map_err(|_| hex::FromHexError::InvalidStringLength)?;
        Ok(Self(arr))
    }
}

impl fmt::Debug for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Digest({}..)", &self.to_hex()[..8])
    }
}

impl fmt::Display for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl AsRef<[u8]> for Digest {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl Serialize for Digest {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if serializer.is_human_readable() {
            serializer.serialize_str(&self.to_hex())
        } else {
            serializer.serialize_bytes(&self.0)
        }
    }
}

impl<'de> Deserialize<'de> for Digest {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        if deserializer.is_human_readable() {
            let s = String::deserialize(deserializer)?;
            Self::from_hex(&s).map_err(D::Error::custom)
        } else {
            let bytes: Vec<u8> = serde_bytes_compat::deserialize(deserializer)?;
            let arr: [u8; 32] = bytes
                .try_into()
                .map_err(|_| D::Error::custom("expected 32 bytes"))?;
            Ok(Self(arr))
        }
    }
}

// bincode encodes serialize_bytes as a length-prefixed byte sequence; read it
// back through the matching visitor.
mod serde_bytes_compat {
    use serde::de::{Deserializer, Error, SeqAccess, Visitor};
    use std::fmt;

    struct BytesVisitor;

    impl<'de> Visitor<'de> for BytesVisitor {
        type Value = Vec<u8>;

        fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
            f.write_str("a byte buffer")
        }

        fn visit_bytes<E: Error>(self, v: &[u8]) -> Result<Self::Value, E> {
            Ok(v.to_vec())
        }

        fn visit_byte_buf<E: Error>(self, v: Vec<u8>) -> Result<Self::Value, E> {
            Ok(v)
        }

        fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Self::Value, A::Error> {
            let mut out = Vec::with_capacity(seq.size_hint().unwrap_or(32));
            while let Some(b) = seq.next_element()? {
                out.push(b);
            }
            Ok(out)
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<u8>, D::Error> {
        deserializer.deserialize_byte_buf(BytesVisitor)
    }
}

/// Digest any serializable value.
///
/// The value is encoded with bincode first. bincode length-prefixes variable
/// sized fields and keeps struct fields in declaration order, so the byte
/// sequence is canonical and two distinct field tuples cannot collide by
/// concatenation (`("ab","c")` vs `("a","bc")`).
pub fn digest_of<T: Serialize>(value: &T) -> Digest {
    let encoded = bincode::serialize(value).expect("serialization should not fail");
    Digest(blake3::hash(&encoded).into())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_digest_deterministic() {
        let d1 = digest_of(&("batch", 42u64));
        let d2 = digest_of(&("batch", 42u64));
        assert_eq!(d1, d2);
    }

    #[test]
    fn test_digest_sensitive_to_any_field() {
        let base = digest_of(&("batch", 42u64));
        assert_ne!(base, digest_of(&("batch", 43u64)));
        assert_ne!(base, digest_of(&("hatch", 42u64)));
    }

    #[test]
    fn test_digest_no_concatenation_ambiguity() {
        let d1 = digest_of(&("ab".to_string(), "c".to_string()));
        let d2 = digest_of(&("a".to_string(), "bc".to_string()));
        assert_ne!(d1, d2);
    }

    #[test]
    fn test_hex_roundtrip() {
        let d = digest_of(&"roundtrip");
        let parsed = Digest::from_hex(&d.to_hex()).unwrap();
        assert_eq!(d, parsed);
    }

    #[test]
    fn test_from_hex_rejects_wrong_length() {
        assert!(Digest::from_hex("abcd").is_err());
    }

    #[test]
    fn test_zero_sentinel() {
        assert_eq!(Digest::ZERO.0, [0u8; 32]);
        assert_ne!(digest_of(&0u8), Digest::ZERO);
    }

    #[test]
    fn test_json_serializes_as_hex() {
        let d = digest_of(&"json");
        let json = serde_json::to_string(&d).unwrap();
        assert_eq!(json, format!("\"{}\"", d.to_hex()));
        let back: Digest = serde_json::from_str(&json).unwrap();
        assert_eq!(back, d);
    }

    #[test]
    fn test_bincode_roundtrip() {
        let d = digest_of(&"bincode");
        let bytes = bincode::serialize(&d).unwrap();
        let back: Digest = bincode::deserialize(&bytes).unwrap();
        assert_eq!(back, d);
    }
}
