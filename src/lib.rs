#[macro_use]
extern crate log;
extern crate rand;
extern crate siphasher;

mod entry;
pub mod treap;
