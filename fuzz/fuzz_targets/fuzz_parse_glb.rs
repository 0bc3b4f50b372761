#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Container framing first, then the embedded JSON
    let _ = libgltf::glb::read_glb(data);
    let _ = libgltf::Document::from_glb(data, &libgltf::ParserConfig::default());
});
