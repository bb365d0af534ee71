#![no_main]
use arithcode::Container;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(container) = Container::from_bytes(data) {
        let _ = container.decode();
    }
});
