//! External id assignment for contacts created without one.

use std::sync::Mutex;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::regime::INBOUND_MAX_EXTERNAL_ID;

/// Source of external ids for new contacts.
pub trait IdAssigner: Send + Sync {
    /// Produce the next external id, rendered as text.
    fn next_external_id(&self) -> String;
}

/// Draws ids uniformly from `0..=100`, so assigned contacts mirror a directory user.
#[derive(Debug)]
pub struct RandomIdAssigner {
    rng: Mutex<StdRng>,
}

impl RandomIdAssigner {
    /// Create an assigner seeded from the operating system.
    pub fn new() -> Self {
        Self {
            rng: Mutex::new(StdRng::from_entropy()),
        }
    }

    /// Create a reproducible assigner.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }
}

impl Default for RandomIdAssigner {
    fn default() -> Self {
        Self::new()
    }
}

impl IdAssigner for RandomIdAssigner {
    fn next_external_id(&self) -> String {
        let mut rng = self.rng.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        rng.gen_range(0..=INBOUND_MAX_EXTERNAL_ID).to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_stay_in_range() {
        let assigner = RandomIdAssigner::new();
        for _ in 0..1000 {
            let id: i64 = assigner.next_external_id().parse().unwrap();
            assert!((0..=INBOUND_MAX_EXTERNAL_ID).contains(&id));
        }
    }

    #[test]
    fn test_both_ends_reachable() {
        let assigner = RandomIdAssigner::seeded(7);
        let ids: Vec<i64> = (0..5000)
            .map(|_| assigner.next_external_id().parse().unwrap())
            .collect();
        assert!(ids.contains(&0));
        assert!(ids.contains(&INBOUND_MAX_EXTERNAL_ID));
    }

    #[test]
    fn test_seeded_is_reproducible() {
        let a = RandomIdAssigner::seeded(42);
        let b = RandomIdAssigner::seeded(42);
        for _ in 0..20 {
            assert_eq!(a.next_external_id(), b.next_external_id());
        }
    }
}
