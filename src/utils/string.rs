//! String utility functions

use std::sync::Mutex;

use once_cell::sync::Lazy;
use rand::distributions::Alphanumeric;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Length of the random suffix appended to duplicate proxy names
pub const SUFFIX_LEN: usize = 8;

/// Process-wide generator for name suffixes, seeded once from OS entropy
pub static SUFFIX_RNG: Lazy<Mutex<StdRng>> = Lazy::new(|| Mutex::new(StdRng::from_entropy()));

/// Split a comma separated list, trimming entries and dropping empty ones
///
/// # Examples
/// ```
/// use clash_aggregator::utils::string::split_list;
///
/// assert_eq!(split_list("a, b,,c"), vec!["a", "b", "c"]);
/// ```
pub fn split_list(s: &str) -> Vec<String> {
    s.split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}

/// Generate a random string of ASCII letters and digits
pub fn random_alphanumeric<R: Rng>(rng: &mut R, len: usize) -> String {
    (0..len).map(|_| char::from(rng.sample(Alphanumeric))).collect()
}
