/*!
 * Thread Stacks
 * Heap-allocated execution stacks guarded by a fencepost word
 */

use crate::core::{MIN_STACK_WORDS, STACK_ALIGN, STACK_FENCEPOST};
use std::mem::size_of;

/// Execution stack owned by one forked thread
///
/// The stack grows down; word 0 is the fencepost at the lowest address. The
/// memory is released only when the owning thread is destroyed.
pub struct Stack {
    words: Box<[usize]>,
}

impl Stack {
    pub fn new(words: usize) -> Self {
        assert!(
            words >= MIN_STACK_WORDS,
            "stack of {} words is below the {} word minimum",
            words,
            MIN_STACK_WORDS
        );
        let mut words = vec![0usize; words].into_boxed_slice();
        words[0] = STACK_FENCEPOST;
        Self { words }
    }

    /// Lowest address of the allocation
    #[inline]
    pub fn bottom(&self) -> usize {
        self.words.as_ptr() as usize
    }

    /// Initial stack pointer: one past the highest word, rounded down to alignment
    #[inline]
    pub fn top(&self) -> usize {
        let end = self.bottom() + self.words.len() * size_of::<usize>();
        end & !(STACK_ALIGN - 1)
    }

    #[inline]
    pub fn len_words(&self) -> usize {
        self.words.len()
    }

    /// Whether the fencepost still holds its marker
    #[inline]
    pub fn is_intact(&self) -> bool {
        self.words[0] == STACK_FENCEPOST
    }

    #[cfg(test)]
    pub(crate) fn smash_fencepost(&mut self) {
        self.words[0] = 0;
    }
}

impl std::fmt::Debug for Stack {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Stack")
            .field("bottom", &format_args!("{:#x}", self.bottom()))
            .field("words", &self.words.len())
            .field("intact", &self.is_intact())
            .finish()
    }
}
