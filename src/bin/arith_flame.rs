use arithcode::{decode, encode, FrequencyModel};

fn main() -> arithcode::Result<()> {
    let iterations = std::env::args()
        .nth(1)
        .and_then(|arg| arg.parse().ok())
        .unwrap_or(1000usize);

    let alphabet = ['a', 'b', 'c', 'd', ' ', '\n'];
    let input: String = (0..10000)
        .map(|i: usize| alphabet[(i * i + i / 7) % alphabet.len()])
        .collect();
    let model = FrequencyModel::build(&input)?;

    let mut bits = encode(&model, &input)?;
    for _ in 1..iterations {
        bits = encode(&model, &input)?;
        let output = decode(&model, &bits)?;
        assert_eq!(output.len(), input.len());
    }

    println!(
        "{} symbols -> {} bits, {} iterations",
        input.len(),
        bits.len(),
        iterations
    );
    Ok(())
}
