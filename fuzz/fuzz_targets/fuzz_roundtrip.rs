#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // A decoded document that encodes must decode again to the same document
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };
    let Ok(document) = libgltf::Document::from_json(text) else {
        return;
    };
    // Encoding may still reject it, e.g. for extensions missing from extensionsUsed
    let Ok(json) = document.to_json() else {
        return;
    };

    let again = libgltf::Document::from_json(&json).expect("encoded output must decode");
    assert_eq!(again, document);

    // Compact output parses to the same JSON value
    let compact = document
        .to_json_with_config(&libgltf::WriterConfig::default().with_pretty(false))
        .expect("compact encoding must succeed when pretty encoding did");
    let pretty: serde_json::Value = serde_json::from_str(&json).expect("valid JSON");
    let dense: serde_json::Value = serde_json::from_str(&compact).expect("valid JSON");
    assert_eq!(pretty, dense);
});
