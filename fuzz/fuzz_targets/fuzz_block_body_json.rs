#![no_main]

use libfuzzer_sys::fuzz_target;

use merit_epochs::BlockBody;

// Parse arbitrary text as BlockBody JSON; accepted bodies must survive the
// binary form unchanged.
fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };
    let Ok(body) = BlockBody::from_json_str(text) else {
        return;
    };
    let Ok(bytes) = body.to_bytes() else {
        return;
    };
    let decoded = BlockBody::from_bytes(&bytes).expect("encoded body decodes");
    assert_eq!(decoded, body);
});
