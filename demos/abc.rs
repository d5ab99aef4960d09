//! Prints the six FIPS 202 hashes of `"abc"` as lowercase hex.
use fips202::{hash, Mode};

const XOF_OUTPUT_BYTES: usize = 64;

fn main() -> Result<(), fips202::Error> {
    let message = std::env::args().nth(1).unwrap_or_else(|| "abc".to_string());

    for mode in Mode::ALL {
        let n = mode.params().fixed_output_bytes().unwrap_or(XOF_OUTPUT_BYTES);
        println!("{mode:>8}: {}", hex::encode(hash(mode, &message, n)?));
    }

    Ok(())
}
