use std::iter::Rev;
use std::vec::Drain;

use crate::pumpkin_assert_simple;

/// A stack of undo entries split into checkpoints.
///
/// Entries pushed after [`Trail::new_checkpoint`] are handed back, most recent first, when the
/// trail is restored to an earlier checkpoint.
#[derive(Clone, Debug)]
pub(crate) struct Trail<T> {
    /// At index i is the length of the trail when checkpoint i + 1 was created
    checkpoint_delimiters: Vec<usize>,
    entries: Vec<T>,
}

// We explicitly implement the Default and not as a macro, because we want to avoid imposing Default
// on the generic type T.
impl<T> Default for Trail<T> {
    fn default() -> Self {
        Trail {
            checkpoint_delimiters: Default::default(),
            entries: Default::default(),
        }
    }
}

impl<T> Trail<T> {
    pub(crate) fn new_checkpoint(&mut self) {
        self.checkpoint_delimiters.push(self.entries.len());
    }

    /// The checkpoint which is currently active; `0` is the root.
    pub(crate) fn checkpoint(&self) -> usize {
        self.checkpoint_delimiters.len()
    }

    /// Removes every entry pushed since `checkpoint` was created and returns them in reverse
    /// order of insertion.
    pub(crate) fn restore(&mut self, checkpoint: usize) -> Rev<Drain<'_, T>> {
        pumpkin_assert_simple!(
            checkpoint < self.checkpoint(),
            "Can only restore to a checkpoint before the current one"
        );

        let new_len = self.checkpoint_delimiters[checkpoint];
        self.checkpoint_delimiters.truncate(checkpoint);
        self.entries.drain(new_len..).rev()
    }

    pub(crate) fn push(&mut self, entry: T) {
        self.entries.push(entry)
    }
}
