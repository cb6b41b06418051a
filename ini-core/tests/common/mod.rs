//! Test infrastructure for the INI parser
//!
//! Provides fixture loading, stochastic test generation, and assertion helpers.

mod loader;
mod harness;
mod generators;

#[allow(unused_imports)]
pub use loader::{TestCase, fixture_names, load_fixtures_by_name, try_load_fixtures};
#[allow(unused_imports)]
pub use harness::{collect, config_for, run_test, run_with_variations, Triple};
pub use generators::Gen;
