//! Monotonic ULID generation
//!
//! `Ulid::new()` gives no ordering guarantee between two ids minted in the
//! same millisecond. Note ids come from a single process-wide generator so
//! every id is strictly greater than the one before it.

use std::sync::{Mutex, OnceLock};
use ulid::{Generator, Ulid};

static ULID_GENERATOR: OnceLock<Mutex<Generator>> = OnceLock::new();

fn get_generator() -> &'static Mutex<Generator> {
    ULID_GENERATOR.get_or_init(|| Mutex::new(Generator::new()))
}

/// Generate a ULID strictly greater than every previous one from this process.
///
/// If the random component overflows within one millisecond (2^80 ids), a
/// fresh non-monotonic ULID is returned instead; it is still unique in
/// practice.
pub fn generate_monotonic_ulid() -> Ulid {
    let mut generator = get_generator()
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner());
    generator.generate().unwrap_or_else(|_| Ulid::new())
}

/// Generate a monotonic ULID as its 26-character string form
pub fn generate_monotonic_ulid_string() -> String {
    generate_monotonic_ulid().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use std::thread;

    #[test]
    fn test_sequential_ids_are_ordered() {
        let ids: Vec<Ulid> = (0..500).map(|_| generate_monotonic_ulid()).collect();
        for pair in ids.windows(2) {
            assert!(pair[0] < pair[1]);
        }
    }

    #[test]
    fn test_concurrent_ids_are_unique() {
        let handles: Vec<_> = (0..8)
            .map(|_| {
                thread::spawn(|| {
                    (0..200)
                        .map(|_| generate_monotonic_ulid_string())
                        .collect::<Vec<_>>()
                })
            })
            .collect();

        let mut seen = HashSet::new();
        for handle in handles {
            for id in handle.join().unwrap() {
                assert_eq!(id.len(), 26);
                assert!(seen.insert(id), "duplicate id generated");
            }
        }
        assert_eq!(seen.len(), 1600);
    }
}
