//! Test harness for running tests with stochastic variations

use crate::common::{Gen, TestCase};
use ini_core::{parse_bytes, Config, Dialect, Entry, Outcome};

/// (section, name, value) as owned strings
pub type Triple = (String, String, String);

/// Result of running a test
#[derive(Debug)]
pub struct TestResult {
    pub passed: bool,
    pub input: Vec<u8>,
    pub expected: Vec<Triple>,
    pub actual: Vec<Triple>,
    pub seed: u64,
    pub errors: Vec<String>,
}

/// Config for a fixture's dialect
pub fn config_for(case: &TestCase) -> Config {
    match &case.dialect {
        Some(name) => Dialect::from_name(name)
            .unwrap_or_else(|e| panic!("fixture {}: {}", case.id, e))
            .config(),
        None => Config::default(),
    }
}

/// Scan input and collect every entry
pub fn collect(input: &[u8], config: &Config) -> (Outcome, Vec<Triple>) {
    let mut entries = Vec::new();
    let outcome = parse_bytes(input, |e: &Entry<'_>| {
        entries.push((
            e.section_str().into_owned(),
            e.name_str().into_owned(),
            e.value_str().into_owned(),
        ));
        true
    }, config)
    .expect("in-memory scan cannot fail");
    (outcome, entries)
}

fn check(
    input: Vec<u8>,
    config: &Config,
    expected: &[Triple],
    expected_error: usize,
    seed: u64,
) -> TestResult {
    let (outcome, actual) = collect(&input, config);
    let mut errors = Vec::new();

    if actual.len() != expected.len() {
        errors.push(format!(
            "Entry count mismatch: expected {}, got {}",
            expected.len(),
            actual.len()
        ));
    }

    for (i, (act, exp)) in actual.iter().zip(expected.iter()).enumerate() {
        if act != exp {
            errors.push(format!("Entry {}: expected {:?}, got {:?}", i, exp, act));
        }
    }

    let got_error = outcome.first_error.unwrap_or(0);
    if got_error != expected_error {
        errors.push(format!("First error: expected line {}, got {}", expected_error, got_error));
    }

    TestResult {
        passed: errors.is_empty(),
        input,
        expected: expected.to_vec(),
        actual,
        seed,
        errors,
    }
}

/// Run a single test case (canonical, no variations)
pub fn run_test(case: &TestCase) -> TestResult {
    let config = config_for(case);
    check(case.ini.as_bytes().to_vec(), &config, &case.events, case.error, 0)
}

/// Run test with stochastic variations
///
/// Applies independent variations that must not change the entries:
/// - Filler lines (blank, whitespace, comments) between lines
/// - Trailing spaces, tabs, carriage returns
///
/// Nothing is inserted before the first line, which may carry a BOM.
/// The expected error line is shifted by the filler inserted before it.
pub fn run_with_variations(case: &TestCase, gen: &mut Gen) -> TestResult {
    let config = config_for(case);
    let pieces: Vec<&[u8]> = case.ini.as_bytes().split(|&b| b == b'\n').collect();
    let last = pieces.len() - 1;

    let mut input = Vec::new();
    let mut shift = 0;
    let mut expected_error = 0;

    for (i, piece) in pieces.iter().enumerate() {
        if i > 0 {
            for filler in gen.filler_lines() {
                input.extend(filler);
                shift += 1;
            }
        }
        if case.error == i + 1 {
            expected_error = case.error + shift;
        }

        input.extend_from_slice(piece);
        if i < last {
            input.extend(gen.trailing_whitespace());
            input.push(b'\n');
        }
    }

    check(input, &config, &case.events, expected_error, gen.seed)
}

impl TestResult {
    /// Dump input, both entry lists and the mismatches to stderr
    pub fn print_failure(&self, label: &str) {
        eprintln!("\n--- {} (seed {}) ---", label, self.seed);
        eprintln!("input: {:?}", String::from_utf8_lossy(&self.input));
        eprintln!("expected: {:#?}", self.expected);
        eprintln!("actual:   {:#?}", self.actual);
        for problem in &self.errors {
            eprintln!("  * {}", problem);
        }
    }
}
