//! An ordered in-memory index backed by a skip list.
//!
//! The purpose of this crate is to provide the sorted in-memory index a
//! log-structured store keeps in front of its on-disk data: point lookups,
//! inserts and deletes in expected logarithmic time, without rebalancing.
//!
//! ```
//! use skipindex::SkipList;
//!
//! let mut list = SkipList::new(32, 0.5);
//!
//! list.insert(3, "c");
//! list.insert(1, "a");
//! assert_eq!(list.get(&3), Some(&"c"));
//!
//! // inserting an existing key replaces its value
//! assert_eq!(list.insert(3, "d"), Some("c"));
//! assert_eq!(list.len(), 2);
//!
//! list.remove(&1);
//! assert_eq!(list.get(&1), None);
//! ```
//!
//! The list is not synchronized. Mutation requires `&mut self`; wrap it in a
//! lock to share it between writers.
#![warn(
    missing_debug_implementations,
    rust_2018_idioms,
    unreachable_pub
)]
#![forbid(unsafe_code)]

pub mod config;
mod error;
mod internal;
pub mod level;
pub mod skiplist;

pub use config::Config;
pub use error::{Error, Result};
pub use level::{GeometricLevels, LevelGenerator};
pub use skiplist::SkipList;
