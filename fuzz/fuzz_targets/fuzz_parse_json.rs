#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Full decode pipeline: JSON syntax -> schema -> mapping -> extensions -> invariants
    if let Ok(text) = std::str::from_utf8(data) {
        let _ = libgltf::Document::from_json(text);

        // Same input with no extension decoders and no schema
        let config = libgltf::ParserConfig::new().without_schema();
        let _ = libgltf::Document::from_json_with_config(text, &config);
    }
});
