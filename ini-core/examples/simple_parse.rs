use ini_core::{parse_str, Config, Entry, EntryKind};

fn main() {
    let input = "; sample\n[server]\nhost = example.org ; primary\nports = 80\n  443\n[client]\nretries: 3\n";

    println!("Input: {:?}\n", input);
    println!("Entries:");

    let outcome = parse_str(input, |entry: &Entry<'_>| {
        match entry.kind {
            EntryKind::Pair => {
                println!("  [{}] {} = {:?}", entry.section_str(), entry.name_str(), entry.value_str());
            }
            EntryKind::Continuation => {
                println!("  [{}] {} += {:?}", entry.section_str(), entry.name_str(), entry.value_str());
            }
        }
        true
    }, &Config::default())
    .unwrap();

    println!("\nLines: {}, first error: {:?}", outcome.lines, outcome.first_error);
}
