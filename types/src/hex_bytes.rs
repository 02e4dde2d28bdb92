//! Fixed-width byte arrays as upper-case hex strings.
//!
//! Output is always upper-case; input is accepted in either case.

use crate::TypesError;

pub(crate) fn encode(bytes: &[u8]) -> String {
    hex::encode_upper(bytes)
}

pub(crate) fn decode<const N: usize>(s: &str) -> Result<[u8; N], TypesError> {
    let bytes = hex::decode(s).map_err(|e| TypesError::InvalidHex(e.to_string()))?;
    let actual = bytes.len();
    bytes.try_into().map_err(|_| TypesError::InvalidLength {
        expected: N,
        actual,
    })
}

pub(crate) mod serde_hex {
    use serde::{de, Deserialize, Deserializer, Serializer};
    use std::borrow::Cow;

    pub fn serialize<S: Serializer, const N: usize>(
        bytes: &[u8; N],
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&super::encode(bytes))
    }

    pub fn deserialize<'de, D: Deserializer<'de>, const N: usize>(
        deserializer: D,
    ) -> Result<[u8; N], D::Error> {
        let s: Cow<'de, str> = Deserialize::deserialize(deserializer)?;
        super::decode::<N>(&s).map_err(de::Error::custom)
    }
}
