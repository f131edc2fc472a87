//! LRU replacement policy.
//!
//! Tracks the unpinned frames of one pool instance in least-recently-used
//! order and produces eviction victims. A doubly-linked list keeps the
//! order and a hash map locates a frame's node, so victim selection,
//! pinning, and unpinning are all O(1).

use std::collections::HashMap;
use std::ptr::NonNull;

use parking_lot::Mutex;

use crate::frame::FrameId;

/// A node in the LRU linked list.
struct Node {
    frame_id: FrameId,
    prev: Option<NonNull<Node>>,
    next: Option<NonNull<Node>>,
}

/// List state behind the replacer's mutex.
///
/// Front = most recently unpinned, back = least recently unpinned.
struct LruList {
    capacity: usize,
    map: HashMap<FrameId, NonNull<Node>>,
    head: Option<NonNull<Node>>,
    tail: Option<NonNull<Node>>,
}

// Safety: LruList owns its nodes outright; the raw pointers never escape
// the structure.
unsafe impl Send for LruList {}

impl LruList {
    fn new(capacity: usize) -> Self {
        Self {
            capacity,
            map: HashMap::with_capacity(capacity),
            head: None,
            tail: None,
        }
    }

    /// Pushes a node to the front of the list.
    fn push_front(&mut self, node_ptr: NonNull<Node>) {
        unsafe {
            (*node_ptr.as_ptr()).prev = None;
            (*node_ptr.as_ptr()).next = self.head;

            if let Some(head) = self.head {
                (*head.as_ptr()).prev = Some(node_ptr);
            }

            self.head = Some(node_ptr);

            if self.tail.is_none() {
                self.tail = Some(node_ptr);
            }
        }
    }

    /// Unlinks a node from the list.
    fn unlink(&mut self, node_ptr: NonNull<Node>) {
        unsafe {
            let prev = (*node_ptr.as_ptr()).prev;
            let next = (*node_ptr.as_ptr()).next;

            if let Some(prev) = prev {
                (*prev.as_ptr()).next = next;
            } else {
                self.head = next;
            }

            if let Some(next) = next {
                (*next.as_ptr()).prev = prev;
            } else {
                self.tail = prev;
            }
        }
    }

    /// Removes and frees the back node, returning its frame id.
    fn pop_back(&mut self) -> Option<FrameId> {
        let tail = self.tail?;
        self.unlink(tail);
        // Safety: the node was allocated by insert and is no longer linked
        let node = unsafe { Box::from_raw(tail.as_ptr()) };
        self.map.remove(&node.frame_id);
        Some(node.frame_id)
    }

    /// Removes and frees the node for `frame_id`, if present.
    fn remove(&mut self, frame_id: FrameId) -> bool {
        match self.map.remove(&frame_id) {
            Some(node_ptr) => {
                self.unlink(node_ptr);
                // Safety: removed from the map, so we own it
                drop(unsafe { Box::from_raw(node_ptr.as_ptr()) });
                true
            }
            None => false,
        }
    }

    /// Inserts `frame_id` at the front.
    fn insert_front(&mut self, frame_id: FrameId) {
        let node = Box::new(Node {
            frame_id,
            prev: None,
            next: None,
        });
        let node_ptr = NonNull::from(Box::leak(node));
        self.push_front(node_ptr);
        self.map.insert(frame_id, node_ptr);
    }

    fn len(&self) -> usize {
        self.map.len()
    }
}

impl Drop for LruList {
    fn drop(&mut self) {
        let mut current = self.head;
        while let Some(node_ptr) = current {
            unsafe {
                current = (*node_ptr.as_ptr()).next;
                drop(Box::from_raw(node_ptr.as_ptr()));
            }
        }
    }
}

/// LRU replacer over frame ids with pin/unpin semantics.
///
/// Only unpinned frames are tracked; a pinned frame is simply absent. The
/// replacer carries its own mutex, but the owning instance always calls in
/// while holding its instance latch, which is what makes the sequence
/// "victim, then reuse the frame" atomic.
pub struct LruReplacer {
    inner: Mutex<LruList>,
}

impl LruReplacer {
    /// Creates a replacer that will track at most `capacity` frames.
    pub fn new(capacity: usize) -> Self {
        Self {
            inner: Mutex::new(LruList::new(capacity)),
        }
    }

    /// Removes and returns the least recently unpinned frame.
    ///
    /// Returns `None` when no frame is evictable.
    pub fn victim(&self) -> Option<FrameId> {
        self.inner.lock().pop_back()
    }

    /// Marks `frame_id` as referenced, removing it from eviction
    /// candidacy. No-op if the frame is not tracked.
    pub fn pin(&self, frame_id: FrameId) {
        self.inner.lock().remove(frame_id);
    }

    /// Marks `frame_id` as unreferenced, making it the most recent
    /// eviction candidate. No-op if the frame is already tracked.
    ///
    /// In correct use the capacity never binds (an instance holds at most
    /// `capacity` frames total); if it somehow does, the least recent
    /// entry is dropped to make room.
    pub fn unpin(&self, frame_id: FrameId) {
        let mut list = self.inner.lock();
        if list.map.contains_key(&frame_id) {
            return;
        }
        if list.len() >= list.capacity {
            list.pop_back();
        }
        list.insert_front(frame_id);
    }

    /// Returns the number of frames currently evictable.
    pub fn len(&self) -> usize {
        self.inner.lock().len()
    }

    /// Returns true if no frame is evictable.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl std::fmt::Debug for LruReplacer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let list = self.inner.lock();
        f.debug_struct("LruReplacer")
            .field("len", &list.len())
            .field("capacity", &list.capacity)
            .finish()
    }
}
