//! Blake2b-384 hashing.

use blake2::digest::consts::U48;
use blake2::{Blake2b, Digest as _};
use merit_types::{Digest, Element, DIGEST_LEN};

type Blake2b384 = Blake2b<U48>;

/// Compute a 384-bit Blake2b hash of arbitrary data.
pub fn blake2b_384(data: &[u8]) -> Digest {
    blake2b_384_multi(&[data])
}

/// Hash multiple byte slices in sequence (avoids concatenation allocation).
pub fn blake2b_384_multi(parts: &[&[u8]]) -> Digest {
    let mut hasher = Blake2b384::new();
    for part in parts {
        hasher.update(part);
    }
    let result = hasher.finalize();
    let mut output = [0u8; DIGEST_LEN];
    output.copy_from_slice(&result);
    Digest::new(output)
}

/// Digest of an element's canonical content bytes.
pub fn hash_element(element: &Element) -> Digest {
    blake2b_384(&element.content_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;
    use merit_types::{HolderKey, HOLDER_KEY_LEN};

    #[test]
    fn blake2b_deterministic() {
        assert_eq!(blake2b_384(b"merit"), blake2b_384(b"merit"));
    }

    #[test]
    fn blake2b_different_inputs() {
        assert_ne!(blake2b_384(b"hello"), blake2b_384(b"world"));
    }

    #[test]
    fn blake2b_empty_is_not_zero() {
        assert!(!blake2b_384(b"").is_zero());
    }

    #[test]
    fn blake2b_multi_equivalent() {
        assert_eq!(
            blake2b_384(b"helloworld"),
            blake2b_384_multi(&[b"hello", b"world"])
        );
    }

    #[test]
    fn element_hash_ignores_holder() {
        let tx = blake2b_384(b"tx");
        let a = Element::verification(HolderKey::new([1; HOLDER_KEY_LEN]), 4, tx);
        let b = Element::verification(HolderKey::new([2; HOLDER_KEY_LEN]), 4, tx);
        assert_eq!(hash_element(&a), hash_element(&b));
    }

    #[test]
    fn element_hash_binds_nonce() {
        let tx = blake2b_384(b"tx");
        let holder = HolderKey::new([1; HOLDER_KEY_LEN]);
        assert_ne!(
            hash_element(&Element::verification(holder, 0, tx)),
            hash_element(&Element::verification(holder, 1, tx))
        );
    }
}
