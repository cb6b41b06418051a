use std::io::Read;
use ini_core::{parse_bytes, Config, Entry};

fn main() {
    let mut input = Vec::new();
    std::io::stdin().read_to_end(&mut input).unwrap();

    let outcome = parse_bytes(&input, |entry: &Entry<'_>| {
        eprintln!("ENTRY: {:?}", entry);
        true
    }, &Config::default())
    .unwrap();

    eprintln!("OUTCOME: {:?}", outcome);
}
