#![no_main]
use arithcode::{decode, encode, BitSequence, FrequencyModel};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|text: String| {
    // Empty, terminator-bearing and oversized inputs must fail cleanly.
    let model = match FrequencyModel::build(&text) {
        Ok(model) => model,
        Err(_) => return,
    };

    let bits = encode(&model, &text).unwrap();
    assert_eq!(decode(&model, &bits).unwrap(), text);

    let padded = BitSequence::from_bytes(&bits.to_bytes());
    assert_eq!(decode(&model, &padded).unwrap(), text);
});
