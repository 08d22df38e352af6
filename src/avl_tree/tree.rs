use crate::arena::{Entry, TypedArena};
use crate::avl_tree::node::Node;
use std::cmp::{self, Ordering};
use std::fmt;

pub type Arena<T> = TypedArena<Node<T>>;

pub fn height<T>(arena: &Arena<T>, link: Option<Entry>) -> usize {
    match link {
        None => 0,
        Some(entry) => arena[entry].height,
    }
}

fn update<T>(arena: &mut Arena<T>, entry: Entry) {
    let node = &arena[entry];
    let new_height = cmp::max(height(arena, node.left), height(arena, node.right)) + 1;
    arena[entry].height = new_height;
}

pub fn balance_factor<T>(arena: &Arena<T>, entry: Entry) -> isize {
    let node = &arena[entry];
    (height(arena, node.left) as isize) - (height(arena, node.right) as isize)
}

fn set_left<T>(arena: &mut Arena<T>, parent: Entry, child: Option<Entry>) {
    arena[parent].left = child;
    if let Some(child) = child {
        arena[child].parent = Some(parent);
    }
}

fn set_right<T>(arena: &mut Arena<T>, parent: Entry, child: Option<Entry>) {
    arena[parent].right = child;
    if let Some(child) = child {
        arena[child].parent = Some(parent);
    }
}

// The returned subtree root inherits the parent link of `entry`; the caller reattaches it.
fn rotate_left<T>(arena: &mut Arena<T>, entry: Entry) -> Entry {
    let child = match arena[entry].right {
        Some(child) => child,
        None => unreachable!(),
    };
    trace!("rotating left around {:?}", entry);
    let parent = arena[entry].parent;
    let inner = arena[child].left;
    set_right(arena, entry, inner);
    update(arena, entry);
    set_left(arena, child, Some(entry));
    update(arena, child);
    arena[child].parent = parent;
    child
}

fn rotate_right<T>(arena: &mut Arena<T>, entry: Entry) -> Entry {
    let child = match arena[entry].left {
        Some(child) => child,
        None => unreachable!(),
    };
    trace!("rotating right around {:?}", entry);
    let parent = arena[entry].parent;
    let inner = arena[child].right;
    set_left(arena, entry, inner);
    update(arena, entry);
    set_right(arena, child, Some(entry));
    update(arena, child);
    arena[child].parent = parent;
    child
}

fn balance<T>(arena: &mut Arena<T>, entry: Entry) -> Entry {
    update(arena, entry);
    let factor = balance_factor(arena, entry);

    if factor > 1 {
        if let Some(child) = arena[entry].left {
            if balance_factor(arena, child) < 0 {
                let child = rotate_left(arena, child);
                set_left(arena, entry, Some(child));
            }
        }
        rotate_right(arena, entry)
    } else if factor < -1 {
        if let Some(child) = arena[entry].right {
            if balance_factor(arena, child) > 0 {
                let child = rotate_right(arena, child);
                set_right(arena, entry, Some(child));
            }
        }
        rotate_left(arena, entry)
    } else {
        entry
    }
}

// Replaces the link from `parent` (or the root) to `old` with `new`.
fn replace_child<T>(
    arena: &mut Arena<T>,
    root: &mut Option<Entry>,
    parent: Option<Entry>,
    old: Entry,
    new: Option<Entry>,
) {
    match parent {
        Some(parent) => {
            if arena[parent].left == Some(old) {
                set_left(arena, parent, new);
            } else {
                set_right(arena, parent, new);
            }
        },
        None => {
            if let Some(new) = new {
                arena[new].parent = None;
            }
            *root = new;
        },
    }
}

// Rebalances every node from `curr` up to the root.
fn retrace<T>(arena: &mut Arena<T>, root: &mut Option<Entry>, mut curr: Option<Entry>) {
    while let Some(entry) = curr {
        let parent = arena[entry].parent;
        let subtree = balance(arena, entry);
        if subtree != entry {
            replace_child(arena, root, parent, entry, Some(subtree));
        }
        curr = parent;
    }
}

pub fn insert<T>(
    arena: &mut Arena<T>,
    root: &mut Option<Entry>,
    value: T,
    allow_duplicates: bool,
) -> (Entry, bool)
where
    T: Ord,
{
    let mut parent = None;
    let mut is_left = false;
    let mut curr = *root;

    while let Some(entry) = curr {
        match value.cmp(&arena[entry].value) {
            Ordering::Less => {
                is_left = true;
                curr = arena[entry].left;
            },
            Ordering::Equal if !allow_duplicates => return (entry, false),
            _ => {
                is_left = false;
                curr = arena[entry].right;
            },
        }
        parent = Some(entry);
    }

    let entry = arena.allocate(Node::new(value, parent));
    match parent {
        Some(parent) if is_left => arena[parent].left = Some(entry),
        Some(parent) => arena[parent].right = Some(entry),
        None => *root = Some(entry),
    }
    retrace(arena, root, parent);
    (entry, true)
}

// Unlinks `entry` from the tree, frees it and returns its value. A node with two children is
// replaced by its in-order successor.
pub fn remove<T>(arena: &mut Arena<T>, root: &mut Option<Entry>, entry: Entry) -> T {
    let (left, right, parent) = {
        let node = &arena[entry];
        (node.left, node.right, node.parent)
    };

    let (replacement, retrace_from) = match (left, right) {
        (None, right) => (right, parent),
        (left, None) => (left, parent),
        (Some(left), Some(right)) => {
            let successor = min_node(arena, right);
            let retrace_from = if successor == right {
                successor
            } else {
                let successor_parent = match arena[successor].parent {
                    Some(successor_parent) => successor_parent,
                    None => unreachable!(),
                };
                let successor_right = arena[successor].right;
                set_left(arena, successor_parent, successor_right);
                set_right(arena, successor, Some(right));
                successor_parent
            };
            set_left(arena, successor, Some(left));
            (Some(successor), Some(retrace_from))
        },
    };

    replace_child(arena, root, parent, entry, replacement);
    let node = arena.free(&entry);
    retrace(arena, root, retrace_from);
    node.value
}

/// Descends from `root` using `cmp`, which orders the searched key against a node's value, and
/// returns the first equal node met.
pub fn find_by<T, F>(arena: &Arena<T>, root: Option<Entry>, cmp: F) -> Option<Entry>
where
    F: Fn(&T) -> Ordering,
{
    let mut curr = root;
    while let Some(entry) = curr {
        match cmp(&arena[entry].value) {
            Ordering::Less => curr = arena[entry].left,
            Ordering::Greater => curr = arena[entry].right,
            Ordering::Equal => return Some(entry),
        }
    }
    None
}

/// Returns the first node in in-order for which `is_after` holds. `is_after` must be false for a
/// prefix of the in-order sequence and true for the rest.
pub fn partition_point<T, F>(arena: &Arena<T>, root: Option<Entry>, is_after: F) -> Option<Entry>
where
    F: Fn(&T) -> bool,
{
    let mut found = None;
    let mut curr = root;
    while let Some(entry) = curr {
        if is_after(&arena[entry].value) {
            found = Some(entry);
            curr = arena[entry].left;
        } else {
            curr = arena[entry].right;
        }
    }
    found
}

// Equal values can end up under either child of an equal node after rotations, so an equal node
// continues the walk on both sides.
pub fn count_by<T, F>(arena: &Arena<T>, link: Option<Entry>, cmp: &F) -> usize
where
    F: Fn(&T) -> Ordering,
{
    match link {
        None => 0,
        Some(entry) => {
            let node = &arena[entry];
            match cmp(&node.value) {
                Ordering::Less => count_by(arena, node.left, cmp),
                Ordering::Greater => count_by(arena, node.right, cmp),
                Ordering::Equal => {
                    1 + count_by(arena, node.left, cmp) + count_by(arena, node.right, cmp)
                },
            }
        },
    }
}

pub fn min_node<T>(arena: &Arena<T>, mut entry: Entry) -> Entry {
    while let Some(left) = arena[entry].left {
        entry = left;
    }
    entry
}

pub fn max_node<T>(arena: &Arena<T>, mut entry: Entry) -> Entry {
    while let Some(right) = arena[entry].right {
        entry = right;
    }
    entry
}

pub fn successor<T>(arena: &Arena<T>, entry: Entry) -> Option<Entry> {
    if let Some(right) = arena[entry].right {
        return Some(min_node(arena, right));
    }
    let mut curr = entry;
    while let Some(parent) = arena[curr].parent {
        if arena[parent].left == Some(curr) {
            return Some(parent);
        }
        curr = parent;
    }
    None
}

pub fn predecessor<T>(arena: &Arena<T>, entry: Entry) -> Option<Entry> {
    if let Some(left) = arena[entry].left {
        return Some(max_node(arena, left));
    }
    let mut curr = entry;
    while let Some(parent) = arena[curr].parent {
        if arena[parent].right == Some(curr) {
            return Some(parent);
        }
        curr = parent;
    }
    None
}

/// Writes the subtree in root-left-right order, one value per token.
pub fn print<T, W>(arena: &Arena<T>, link: Option<Entry>, out: &mut W) -> fmt::Result
where
    T: fmt::Debug,
    W: fmt::Write,
{
    if let Some(entry) = link {
        let node = &arena[entry];
        write!(out, "{:?} ", node.value)?;
        print(arena, node.left, out)?;
        print(arena, node.right, out)?;
    }
    Ok(())
}

#[cfg(test)]
pub fn check_invariants<T>(arena: &Arena<T>, root: Option<Entry>) -> usize
where
    T: Ord,
{
    fn walk<T: Ord>(arena: &Arena<T>, link: Option<Entry>, parent: Option<Entry>) -> (usize, usize) {
        match link {
            None => (0, 0),
            Some(entry) => {
                let node = &arena[entry];
                assert_eq!(node.parent, parent, "parent link is stale");
                if let Some(left) = node.left {
                    assert!(arena[left].value <= node.value, "left child is out of order");
                }
                if let Some(right) = node.right {
                    assert!(arena[right].value >= node.value, "right child is out of order");
                }
                let (left_height, left_len) = walk(arena, node.left, Some(entry));
                let (right_height, right_len) = walk(arena, node.right, Some(entry));
                assert!(
                    (left_height as isize - right_height as isize).abs() <= 1,
                    "avl balance invariant violated",
                );
                let expected_height = cmp::max(left_height, right_height) + 1;
                assert_eq!(node.height, expected_height, "cached height is stale");
                (expected_height, left_len + right_len + 1)
            },
        }
    }

    walk(arena, root, None).1
}

#[cfg(test)]
mod tests {
    use super::*;

    fn build(values: &[i32], allow_duplicates: bool) -> (Arena<i32>, Option<Entry>) {
        let mut arena = TypedArena::new(8);
        let mut root = None;
        for value in values {
            insert(&mut arena, &mut root, *value, allow_duplicates);
            check_invariants(&arena, root);
        }
        (arena, root)
    }

    fn in_order(arena: &Arena<i32>, root: Option<Entry>) -> Vec<i32> {
        let mut ret = Vec::new();
        let mut curr = root.map(|root| min_node(arena, root));
        while let Some(entry) = curr {
            ret.push(arena[entry].value);
            curr = successor(arena, entry);
        }
        ret
    }

    #[test]
    fn test_rotate_right_on_descending_inserts() {
        let (arena, root) = build(&[30, 20, 10], false);
        assert_eq!(root.map(|root| arena[root].value), Some(20));
        assert_eq!(in_order(&arena, root), vec![10, 20, 30]);
    }

    #[test]
    fn test_left_right_case() {
        let (arena, root) = build(&[5, 1, 2], false);
        assert_eq!(root.map(|root| arena[root].value), Some(2));
    }

    #[test]
    fn test_right_left_case() {
        let (arena, root) = build(&[5, 15, 10], false);
        assert_eq!(root.map(|root| arena[root].value), Some(10));
    }

    #[test]
    fn test_insert_unique_rejects_equal() {
        let mut arena = TypedArena::new(8);
        let mut root = None;
        let (first, inserted) = insert(&mut arena, &mut root, 1, false);
        assert!(inserted);
        assert_eq!(insert(&mut arena, &mut root, 1, false), (first, false));
        assert_eq!(arena.len(), 1);
    }

    #[test]
    fn test_remove_two_children_uses_successor() {
        let (mut arena, mut root) = build(&[4, 2, 6, 1, 3, 5, 7], false);
        let four = find_by(&arena, root, |value| 4.cmp(value)).unwrap();
        assert_eq!(remove(&mut arena, &mut root, four), 4);
        check_invariants(&arena, root);
        assert_eq!(root.map(|root| arena[root].value), Some(5));
        assert_eq!(in_order(&arena, root), vec![1, 2, 3, 5, 6, 7]);
    }

    #[test]
    fn test_remove_rebalances_ancestors() {
        let values: Vec<i32> = (-10..=10).rev().collect();
        let (mut arena, mut root) = build(&values, false);
        for value in &[-10, -5, 0, 3, 10] {
            let entry = find_by(&arena, root, |probe| value.cmp(probe)).unwrap();
            remove(&mut arena, &mut root, entry);
            check_invariants(&arena, root);
        }
        assert_eq!(arena.len(), 16);
    }

    #[test]
    fn test_count_with_rotated_duplicates() {
        let (arena, root) = build(&[5, 5, 5, 5, 5, 1, 9, 5], true);
        assert_eq!(count_by(&arena, root, &|value: &i32| 5.cmp(value)), 6);
        assert_eq!(count_by(&arena, root, &|value: &i32| 4.cmp(value)), 0);
    }

    #[test]
    fn test_duplicates_are_appended_stably() {
        let mut arena = TypedArena::new(8);
        let mut root = None;
        let mut entries = Vec::new();
        for _ in 0..6 {
            entries.push(insert(&mut arena, &mut root, 7, true).0);
        }
        let mut curr = root.map(|root| min_node(&arena, root));
        let mut visited = Vec::new();
        while let Some(entry) = curr {
            visited.push(entry);
            curr = successor(&arena, entry);
        }
        assert_eq!(visited, entries);
    }

    #[test]
    fn test_partition_point() {
        let (arena, root) = build(&[1, 3, 3, 3, 5], true);
        let lower = partition_point(&arena, root, |value| *value >= 3).unwrap();
        let upper = partition_point(&arena, root, |value| *value > 3).unwrap();
        assert_eq!(arena[lower].value, 3);
        assert_eq!(predecessor(&arena, lower).map(|entry| arena[entry].value), Some(1));
        assert_eq!(arena[upper].value, 5);
        assert_eq!(partition_point(&arena, root, |value| *value > 5), None);
    }

    #[test]
    fn test_print_root_left_right() {
        let (arena, root) = build(&[10, 20, 30, 40], false);
        let mut out = String::new();
        print(&arena, root, &mut out).unwrap();
        assert_eq!(out, "20 10 30 40 ");
    }
}
