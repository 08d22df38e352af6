use crate::arena::Entry;

/// A struct representing an internal node of an avl tree.
///
/// Children are owned through the arena that stores the node; `parent` is a back-link used only
/// for navigation.
#[derive(Clone)]
pub struct Node<T> {
    pub value: T,
    pub height: usize,
    pub left: Option<Entry>,
    pub right: Option<Entry>,
    pub parent: Option<Entry>,
}

impl<T> Node<T> {
    pub fn new(value: T, parent: Option<Entry>) -> Self {
        Node {
            value,
            height: 1,
            left: None,
            right: None,
            parent,
        }
    }
}
