//! Doubly linked list and the stack and queue adapters built on it.

mod linked_list;
mod queue;
mod stack;

pub use self::linked_list::{CursorMut, IntoIter, Iter, IterMut, LinkedList};
pub use self::queue::Queue;
pub use self::stack::Stack;
