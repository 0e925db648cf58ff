/*!
 * Thread Table
 * Storage for every live thread record, keyed by id
 */

use super::Thread;
use crate::core::ThreadId;
use ahash::RandomState;
use std::collections::HashMap;

/// Live thread records
///
/// Records are boxed so their machine contexts keep a fixed address while the
/// switch primitive holds pointers to them.
#[derive(Debug)]
pub struct ThreadTable {
    threads: HashMap<ThreadId, Box<Thread>, RandomState>,
    next_id: u64,
}

impl ThreadTable {
    pub fn new() -> Self {
        Self {
            threads: HashMap::with_hasher(RandomState::new()),
            next_id: 1,
        }
    }

    /// Reserve a fresh id; ids are never reused
    pub fn allocate_id(&mut self) -> ThreadId {
        let id = ThreadId::new(self.next_id);
        self.next_id += 1;
        id
    }

    /// Register a thread record
    pub fn insert(&mut self, thread: Thread) -> ThreadId {
        let id = thread.id();
        let previous = self.threads.insert(id, Box::new(thread));
        assert!(previous.is_none(), "thread {} registered twice", id);
        id
    }

    #[inline]
    pub fn get(&self, id: ThreadId) -> Option<&Thread> {
        self.threads.get(&id).map(|t| &**t)
    }

    #[inline]
    pub fn get_mut(&mut self, id: ThreadId) -> Option<&mut Thread> {
        self.threads.get_mut(&id).map(|t| &mut **t)
    }

    /// Look up a thread that must exist
    #[track_caller]
    pub fn thread(&self, id: ThreadId) -> &Thread {
        match self.get(id) {
            Some(thread) => thread,
            None => panic!("thread {} is not a live thread", id),
        }
    }

    #[track_caller]
    pub fn thread_mut(&mut self, id: ThreadId) -> &mut Thread {
        match self.get_mut(id) {
            Some(thread) => thread,
            None => panic!("thread {} is not a live thread", id),
        }
    }

    /// Take a record out of the table, handing ownership to the caller
    pub(crate) fn remove(&mut self, id: ThreadId) -> Option<Box<Thread>> {
        self.threads.remove(&id)
    }

    #[inline]
    pub fn contains(&self, id: ThreadId) -> bool {
        self.threads.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.threads.len()
    }

    pub fn is_empty(&self) -> bool {
        self.threads.is_empty()
    }

    /// Live thread ids in ascending order
    pub fn ids(&self) -> Vec<ThreadId> {
        let mut ids: Vec<ThreadId> = self.threads.keys().copied().collect();
        ids.sort_unstable();
        ids
    }
}

impl Default for ThreadTable {
    fn default() -> Self {
        Self::new()
    }
}
