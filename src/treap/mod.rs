//! Probabilistic binary search tree where each node also maintains the heap invariant on a
//! priority hashed from its key.

mod map;
mod node;
mod priority;
mod tree;

pub use self::map::{TreapMap, TreapMapIntoIter, TreapMapIter, TreapMapIterMut};
pub use self::priority::{priority, SipPriority};
