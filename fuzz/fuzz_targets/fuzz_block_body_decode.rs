#![no_main]

use libfuzzer_sys::fuzz_target;

use merit_epochs::BlockBody;

// Decoding arbitrary bytes must never panic, and anything that decodes must
// re-encode to exactly the input.
fuzz_target!(|data: &[u8]| {
    if let Ok(body) = BlockBody::from_bytes(data) {
        let encoded = body.to_bytes().expect("decoded body re-encodes");
        assert_eq!(encoded, data);
    }
});
