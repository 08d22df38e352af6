//! Generic sequential and ordered containers.
//!
//! The ordered containers (`OrderedSet`, `OrderedMultiset` and `OrderedMap`) share an avl tree
//! whose nodes live in a `TypedArena`. The sequential containers are a growable array, a doubly
//! linked list with stack and queue adapters, and a fixed-size array.

#[macro_use]
extern crate log;
extern crate serde;
#[macro_use]
extern crate serde_derive;

#[cfg(test)]
extern crate rand;
#[cfg(test)]
extern crate serde_test;

pub mod arena;
pub mod array;
pub mod avl_tree;
mod error;
pub mod list;
pub mod vector;

pub use crate::error::{Error, Result};
