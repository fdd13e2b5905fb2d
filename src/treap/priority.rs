use rand::Rng;
use siphasher::sip::SipHasher;
use std::hash::{BuildHasher, Hash, Hasher};

/// Builds the `SipHasher` used to derive the priority of a key.
///
/// Two builders with the same keys assign the same priority to every key, so a map built with
/// `SipPriority::with_keys` has a reproducible shape. `SipPriority::new` draws its keys at random,
/// which keeps priorities stable for the lifetime of a map but not across runs.
///
/// # Examples
///
/// ```
/// use hashed_treap::treap::{priority, SipPriority};
///
/// let hasher = SipPriority::with_keys(0, 1);
/// assert_eq!(priority(&hasher, "key"), priority(&hasher, "key"));
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SipPriority {
    k0: u64,
    k1: u64,
}

impl SipPriority {
    /// Constructs a new `SipPriority` with random keys.
    pub fn new() -> Self {
        let mut rng = rand::thread_rng();
        Self::with_keys(rng.next_u64(), rng.next_u64())
    }

    /// Constructs a new `SipPriority` with fixed keys.
    pub fn with_keys(k0: u64, k1: u64) -> Self {
        SipPriority { k0, k1 }
    }

    /// Returns the pair of keys used to seed the hasher.
    pub fn keys(&self) -> (u64, u64) {
        (self.k0, self.k1)
    }
}

impl Default for SipPriority {
    fn default() -> Self {
        Self::new()
    }
}

impl BuildHasher for SipPriority {
    type Hasher = SipHasher;

    fn build_hasher(&self) -> Self::Hasher {
        SipHasher::new_with_keys(self.k0, self.k1)
    }
}

/// Returns the priority of `key` under `hasher`. Lower values sit closer to the root.
pub fn priority<S, V>(hasher: &S, key: &V) -> u64
where
    S: BuildHasher,
    V: Hash + ?Sized,
{
    let mut state = hasher.build_hasher();
    key.hash(&mut state);
    state.finish()
}
