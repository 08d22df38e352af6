//! Chunked slab allocator used for tree nodes.

use std::cmp;
use std::mem;
use std::ops::{Index, IndexMut};

/// A handle to an object stored in a `TypedArena<T>`.
///
/// Handles are plain indices: copying one never copies the object, and a handle stays valid
/// until the object it names is freed.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct Entry {
    chunk: usize,
    offset: usize,
}

#[derive(Clone)]
enum Slot<T> {
    Live(T),
    Free { next_free: Option<Entry> },
}

/// A slab allocator for objects of a single type.
///
/// Objects are stored in chunks of at most `chunk_size` slots. A chunk grows on demand up to
/// that bound and a full arena opens a new chunk, so a handle stays valid across any number of
/// later allocations. Freed slots are threaded onto a free list and reused by the next
/// allocation. Once the last live object is freed, every chunk is released. The arena uses no
/// unsafe code, and cloning an arena clones every live object while preserving handles.
///
/// # Examples
///
/// ```
/// use extended_containers::arena::TypedArena;
///
/// let mut arena = TypedArena::new(1024);
///
/// let node = arena.allocate(1);
/// assert_eq!(arena[node], 1);
///
/// arena[node] += 1;
/// assert_eq!(arena.get(&node), Some(&2));
///
/// assert_eq!(arena.free(&node), 2);
/// assert!(arena.is_empty());
/// ```
#[derive(Clone)]
pub struct TypedArena<T> {
    chunks: Vec<Vec<Slot<T>>>,
    free_head: Option<Entry>,
    chunk_size: usize,
    live: usize,
}

impl<T> TypedArena<T> {
    /// Constructs a new, empty `TypedArena<T>` holding `chunk_size` objects per chunk.
    ///
    /// # Panics
    ///
    /// Panics if `chunk_size` is zero.
    ///
    /// # Examples
    ///
    /// ```
    /// use extended_containers::arena::TypedArena;
    ///
    /// let arena: TypedArena<u32> = TypedArena::new(64);
    /// assert_eq!(arena.chunk_size(), 64);
    /// ```
    pub fn new(chunk_size: usize) -> Self {
        assert!(chunk_size > 0, "Error: chunk size must be positive.");
        TypedArena {
            chunks: Vec::new(),
            free_head: None,
            chunk_size,
            live: 0,
        }
    }

    /// Returns the number of objects stored per chunk.
    pub fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    /// Returns the number of live objects in the arena.
    ///
    /// # Examples
    ///
    /// ```
    /// use extended_containers::arena::TypedArena;
    ///
    /// let mut arena = TypedArena::new(64);
    /// arena.allocate(0);
    /// assert_eq!(arena.len(), 1);
    /// ```
    pub fn len(&self) -> usize {
        self.live
    }

    /// Returns `true` if the arena holds no live objects.
    pub fn is_empty(&self) -> bool {
        self.live == 0
    }

    /// Drops every object and releases all chunks. Every outstanding handle becomes invalid.
    pub fn clear(&mut self) {
        self.chunks.clear();
        self.free_head = None;
        self.live = 0;
    }

    fn slot(&self, entry: &Entry) -> Option<&Slot<T>> {
        self.chunks
            .get(entry.chunk)
            .and_then(|chunk| chunk.get(entry.offset))
    }

    fn slot_mut(&mut self, entry: &Entry) -> Option<&mut Slot<T>> {
        self.chunks
            .get_mut(entry.chunk)
            .and_then(|chunk| chunk.get_mut(entry.offset))
    }

    // Appends a slot to the last chunk, opening a new chunk when the last one is full. A chunk's
    // capacity doubles as it fills but never exceeds `chunk_size`.
    fn push_slot(&mut self, value: T) -> Entry {
        let needs_chunk = match self.chunks.last() {
            Some(chunk) => chunk.len() == self.chunk_size,
            None => true,
        };
        if needs_chunk {
            trace!("arena opening chunk {} of up to {} slots", self.chunks.len(), self.chunk_size);
            self.chunks.push(Vec::new());
        }
        let chunk = self.chunks.len() - 1;
        let chunk_size = self.chunk_size;
        let slots = &mut self.chunks[chunk];
        if slots.len() == slots.capacity() {
            let additional = cmp::min(cmp::max(slots.len(), 1), chunk_size - slots.len());
            slots.reserve_exact(additional);
        }
        slots.push(Slot::Live(value));
        Entry {
            chunk,
            offset: slots.len() - 1,
        }
    }

    /// Allocates an object and returns its handle.
    ///
    /// # Examples
    ///
    /// ```
    /// use extended_containers::arena::TypedArena;
    ///
    /// let mut arena = TypedArena::new(64);
    /// let node = arena.allocate(7);
    /// assert_eq!(arena.get(&node), Some(&7));
    /// ```
    pub fn allocate(&mut self, value: T) -> Entry {
        self.live += 1;
        let entry = match self.free_head {
            Some(entry) => entry,
            None => return self.push_slot(value),
        };
        let next_free = match self.slot_mut(&entry) {
            Some(slot) => match mem::replace(slot, Slot::Live(value)) {
                Slot::Free { next_free } => next_free,
                Slot::Live(_) => panic!("Error: free list points at a live slot."),
            },
            None => panic!("Error: free list points outside the arena."),
        };
        self.free_head = next_free;
        entry
    }

    /// Deallocates an object and returns it. Freeing the last live object releases every chunk.
    ///
    /// # Panics
    ///
    /// Panics if `entry` does not name a live object.
    ///
    /// # Examples
    ///
    /// ```
    /// use extended_containers::arena::TypedArena;
    ///
    /// let mut arena = TypedArena::new(64);
    /// let node = arena.allocate(0);
    /// assert_eq!(arena.free(&node), 0);
    /// ```
    pub fn free(&mut self, entry: &Entry) -> T {
        let next_free = self.free_head;
        let old = match self.slot_mut(entry) {
            Some(slot) => mem::replace(slot, Slot::Free { next_free }),
            None => panic!("Error: attempting to free a slot outside the arena."),
        };
        match old {
            Slot::Live(value) => {
                self.free_head = Some(*entry);
                self.live -= 1;
                if self.live == 0 {
                    trace!("arena drained, releasing {} chunks", self.chunks.len());
                    self.clear();
                }
                value
            },
            Slot::Free { .. } => panic!("Error: attempting to free a vacant slot."),
        }
    }

    /// Returns a reference to an object, or `None` if `entry` does not name a live object.
    pub fn get(&self, entry: &Entry) -> Option<&T> {
        match self.slot(entry) {
            Some(Slot::Live(value)) => Some(value),
            _ => None,
        }
    }

    /// Returns a mutable reference to an object, or `None` if `entry` does not name a live
    /// object.
    pub fn get_mut(&mut self, entry: &Entry) -> Option<&mut T> {
        match self.slot_mut(entry) {
            Some(Slot::Live(value)) => Some(value),
            _ => None,
        }
    }
}

impl<T> Index<Entry> for TypedArena<T> {
    type Output = T;

    fn index(&self, entry: Entry) -> &T {
        match self.get(&entry) {
            Some(value) => value,
            None => panic!("Error: {:?} does not name a live object.", entry),
        }
    }
}

impl<T> IndexMut<Entry> for TypedArena<T> {
    fn index_mut(&mut self, entry: Entry) -> &mut T {
        match self.get_mut(&entry) {
            Some(value) => value,
            None => panic!("Error: {:?} does not name a live object.", entry),
        }
    }
}
