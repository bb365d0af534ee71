use arithcode::{
    compress, decode, decompress, encode, BitSequence, Container, Error, FrequencyModel,
};
use proptest::prelude::*;

proptest! {
    #[test]
    fn test_roundtrip(text in "[a-z \n]{1,500}") {
        let model = FrequencyModel::build(&text).unwrap();
        let bits = encode(&model, &text).unwrap();
        prop_assert_eq!(decode(&model, &bits).unwrap(), text);
    }

    #[test]
    fn test_roundtrip_after_packing(text in "[xyz]{1,400}") {
        let model = FrequencyModel::build(&text).unwrap();
        let bits = encode(&model, &text).unwrap();

        let unpacked = BitSequence::from_bytes(&bits.to_bytes());
        prop_assert_eq!(unpacked.len() % 8, 0);
        prop_assert!(unpacked.len() - bits.len() < 8);
        prop_assert!(unpacked.iter().skip(bits.len()).all(|bit| !bit));
        prop_assert_eq!(decode(&model, &unpacked).unwrap(), text);
    }

    #[test]
    fn test_deterministic(text in "[a-f]{1,200}") {
        let model = FrequencyModel::build(&text).unwrap();
        prop_assert_eq!(encode(&model, &text).unwrap(), encode(&model, &text).unwrap());
    }

    #[test]
    fn test_cumulative_table(text in "\\PC{1,300}") {
        let model = FrequencyModel::build(&text).unwrap();
        let table = model.cumulative();
        prop_assert!(table.windows(2).all(|w| w[0] <= w[1]));
        prop_assert_eq!(model.total() as usize, text.chars().count() + 1);
        prop_assert_eq!(model.counts().iter().sum::<u32>(), model.total());
    }

    #[test]
    fn test_single_symbol(symbol in "[^\\x00]", n in 1usize..2000) {
        let text = symbol.repeat(n);
        let model = FrequencyModel::build(&text).unwrap();
        prop_assert_eq!(model.alphabet().len(), 2);
        let bits = encode(&model, &text).unwrap();
        prop_assert_eq!(decode(&model, &bits).unwrap(), text);
    }

    #[test]
    fn test_container_roundtrip(text in "\\PC{1,300}") {
        let bytes = compress(&text).unwrap();
        prop_assert_eq!(decompress(&bytes).unwrap(), text);
    }

    #[test]
    fn test_payload_corruption_never_panics(
        text in "[abc]{1,100}",
        flip in any::<prop::sample::Index>(),
    ) {
        let container = Container::encode(&text).unwrap();
        let mut bits: Vec<bool> = container.payload().iter().collect();
        let i = flip.index(bits.len());
        bits[i] = !bits[i];
        let corrupted = Container::new(container.model().clone(), bits.into_iter().collect());
        // Either a (wrong) string or a clean error, never a panic or a hang.
        let _ = corrupted.decode();
    }
}

#[test]
fn test_precision_limit_rejected() {
    let text = "ab".repeat(9000);
    assert!(matches!(
        FrequencyModel::build(&text),
        Err(Error::PrecisionExceeded { .. })
    ));
}

#[test]
fn test_concrete_scenario() {
    let model = FrequencyModel::build("aaabb").unwrap();
    assert_eq!(model.counts(), vec![1, 3, 2]);
    assert_eq!(model.cumulative(), &[1, 4, 6]);

    let bits = encode(&model, "aaabb").unwrap();
    assert_eq!(bits, "0110011101".parse::<BitSequence>().unwrap());
    assert_eq!(decode(&model, &bits).unwrap(), "aaabb");
}

#[test]
fn test_empty_input() {
    assert!(matches!(compress(""), Err(Error::EmptyInput)));
}
