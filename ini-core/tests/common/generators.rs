//! Seeded random content for wrapping fixtures
//!
//! Set `INI_TEST_SEED` to replay a failure; the seed is printed with it.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const NAME_TAIL: &[u8] = b"abcdefghijklmnopqrstuvwxyz0123456789-_.";

pub struct Gen {
    pub rng: StdRng,
    pub seed: u64,
}

#[allow(dead_code)]
impl Gen {
    pub fn new(seed: u64) -> Self {
        Self { rng: StdRng::seed_from_u64(seed), seed }
    }

    /// Seed from `INI_TEST_SEED`, else a fresh random one
    pub fn from_env_or_random() -> Self {
        let seed = match std::env::var("INI_TEST_SEED") {
            Ok(s) => s.parse().unwrap_or_else(|_| panic!("INI_TEST_SEED is not a u64: {}", s)),
            Err(_) => rand::random(),
        };
        Self::new(seed)
    }

    /// Number of successes before the first failure, each with probability `p`.
    pub fn geometric(&mut self, p: f64) -> usize {
        (0..).take_while(|_| self.rng.gen_bool(p)).count()
    }

    pub fn chance(&mut self, p: f64) -> bool {
        self.rng.gen_bool(p)
    }

    /// A line the parser must ignore: blank, whitespace-only, or a comment.
    /// Always newline-terminated.
    pub fn filler_line(&mut self) -> Vec<u8> {
        let mut line = match self.rng.gen_range(0..4) {
            0 => Vec::new(),
            1 => self.whitespace(),
            2 => b"; filler".to_vec(),
            _ => {
                let mut indented = self.whitespace();
                indented.extend_from_slice(b"; indented filler = 1");
                indented
            }
        };
        line.push(b'\n');
        line
    }

    /// Zero or more filler lines
    pub fn filler_lines(&mut self) -> Vec<Vec<u8>> {
        let count = self.geometric(0.3);
        (0..count).map(|_| self.filler_line()).collect()
    }

    /// Non-empty run of spaces and tabs
    pub fn whitespace(&mut self) -> Vec<u8> {
        let len = 1 + self.geometric(0.5);
        (0..len)
            .map(|_| if self.chance(0.8) { b' ' } else { b'\t' })
            .collect()
    }

    /// Trailing junk the parser strips: spaces, tabs, a carriage return
    pub fn trailing_whitespace(&mut self) -> Vec<u8> {
        let mut out = Vec::new();
        if self.chance(0.3) {
            out.extend(self.whitespace());
        }
        if self.chance(0.3) {
            out.push(b'\r');
        }
        out
    }

    /// Key name: a lowercase letter, then letters, digits, `-`, `_`, `.`
    pub fn name(&mut self) -> Vec<u8> {
        let tail = self.geometric(0.7);
        let first = self.rng.gen_range(b'a'..=b'z');
        std::iter::once(first)
            .chain((0..tail).map(|_| NAME_TAIL[self.rng.gen_range(0..NAME_TAIL.len())]))
            .collect()
    }
}
