//! Singly-linked list under measurement
//!
//! An unordered chain of `i32` values. Each node exclusively owns its
//! successor and the list owns the head, so unlinking a node releases it
//! without touching its siblings.
//!
//! Uniqueness is NOT enforced here: [`LinkedList::insert`] always links a new
//! head. Callers that need a duplicate-free list (population and the
//! workload generator) test membership first.
//!
//! ## Example
//!
//! ```rust
//! use listbench::list::LinkedList;
//!
//! let mut list = LinkedList::new();
//! list.insert(7);
//! assert!(list.member(7));
//!
//! list.delete(7);
//! assert!(!list.member(7));
//! assert!(list.is_empty());
//! ```

use std::fmt;

struct Node {
    value: i32,
    next: Option<Box<Node>>,
}

/// Singly-linked list of integers with insert-at-front, membership test and
/// delete-first-match.
#[derive(Default)]
pub struct LinkedList {
    head: Option<Box<Node>>,
    len: usize,
}

impl LinkedList {
    /// Create an empty list.
    #[must_use]
    pub const fn new() -> Self {
        Self { head: None, len: 0 }
    }

    /// Link a new node holding `value` as the head. O(1), always succeeds.
    pub fn insert(&mut self, value: i32) {
        let next = self.head.take();
        self.head = Some(Box::new(Node { value, next }));
        self.len += 1;
    }

    /// Linear scan from the head; `true` on the first equal value.
    #[must_use]
    pub fn member(&self, value: i32) -> bool {
        self.iter().any(|v| v == value)
    }

    /// Unlink and release the first node holding `value`.
    ///
    /// Returns `true` if a node was removed. No-op when the value is absent;
    /// later duplicates (only possible if a caller bypassed the membership
    /// check) are left in place.
    pub fn delete(&mut self, value: i32) -> bool {
        let mut cursor = &mut self.head;
        while cursor.as_ref().is_some_and(|node| node.value != value) {
            if let Some(node) = cursor {
                cursor = &mut node.next;
            }
        }

        // cursor now points at the matching link, or at the terminal None
        match cursor.take() {
            Some(node) => {
                *cursor = node.next;
                self.len -= 1;
                true
            }
            None => false,
        }
    }

    /// Number of nodes in the chain.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Check if the list holds no nodes.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.head.is_none()
    }

    /// Iterate values from head to tail.
    #[must_use]
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            next: self.head.as_deref(),
        }
    }

    /// Release every node, leaving an empty list.
    pub fn clear(&mut self) {
        let mut current = self.head.take();
        while let Some(mut node) = current {
            current = node.next.take();
        }
        self.len = 0;
    }
}

// Iterative release: the default recursive drop would overflow the stack on
// long chains.
impl Drop for LinkedList {
    fn drop(&mut self) {
        self.clear();
    }
}

impl fmt::Debug for LinkedList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl Extend<i32> for LinkedList {
    fn extend<I: IntoIterator<Item = i32>>(&mut self, iter: I) {
        for value in iter {
            self.insert(value);
        }
    }
}

impl FromIterator<i32> for LinkedList {
    fn from_iter<I: IntoIterator<Item = i32>>(iter: I) -> Self {
        let mut list = Self::new();
        list.extend(iter);
        list
    }
}

/// Borrowing iterator over list values, head first.
pub struct Iter<'a> {
    next: Option<&'a Node>,
}

impl Iterator for Iter<'_> {
    type Item = i32;

    fn next(&mut self) -> Option<i32> {
        self.next.map(|node| {
            self.next = node.next.as_deref();
            node.value
        })
    }
}

impl<'a> IntoIterator for &'a LinkedList {
    type Item = i32;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Iter<'a> {
        self.iter()
    }
}
