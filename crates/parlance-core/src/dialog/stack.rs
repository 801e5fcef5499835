use super::instance::{DialogInstance, DialogStackSnapshot};
use crate::error::{DialogError, Result};
use std::collections::VecDeque;
use tracing::warn;

#[derive(Debug, Clone)]
struct Entry {
    generation: u64,
    instance: DialogInstance,
}

/// The ordered stack of active dialog instances for one conversation.
///
/// The front of the deque is the top of the stack, matching the snapshot
/// layout where index 0 is the active dialog.
///
/// Every entry carries a generation number, unique within this stack, that
/// tells two activations of the same dialog at the same depth apart. It is
/// not persisted.
#[derive(Debug, Clone, Default)]
pub struct DialogStack {
    entries: VecDeque<Entry>,
    max_depth: Option<usize>,
    next_generation: u64,
}

impl DialogStack {
    /// Creates an empty stack with an optional depth guard.
    pub fn new(max_depth: Option<usize>) -> Self {
        Self {
            entries: VecDeque::new(),
            max_depth,
            next_generation: 0,
        }
    }

    /// Materializes a stack from its persisted snapshot.
    ///
    /// The depth guard only applies to later pushes; a stored stack that is
    /// already deeper than `max_depth` is loaded as-is.
    pub fn from_snapshot(snapshot: DialogStackSnapshot, max_depth: Option<usize>) -> Self {
        let mut stack = Self::new(max_depth);
        for instance in snapshot.dialog_stack {
            let generation = stack.next_generation();
            stack.entries.push_back(Entry {
                generation,
                instance,
            });
        }
        stack
    }

    /// Copies the current stack into a snapshot.
    pub fn to_snapshot(&self) -> DialogStackSnapshot {
        DialogStackSnapshot {
            dialog_stack: self.iter().cloned().collect(),
        }
    }

    pub fn into_snapshot(self) -> DialogStackSnapshot {
        DialogStackSnapshot {
            dialog_stack: self.entries.into_iter().map(|e| e.instance).collect(),
        }
    }

    fn next_generation(&mut self) -> u64 {
        let generation = self.next_generation;
        self.next_generation += 1;
        generation
    }

    /// Pushes a new top instance and returns its generation.
    ///
    /// # Errors
    ///
    /// Returns `StackDepthExceeded` if the push would go past the configured
    /// maximum depth. The stack is left unchanged in that case.
    pub fn push(&mut self, instance: DialogInstance) -> Result<u64> {
        if let Some(limit) = self.max_depth {
            if self.entries.len() >= limit {
                warn!(
                    dialog_id = %instance.id,
                    limit,
                    "dialog stack depth limit reached"
                );
                return Err(DialogError::StackDepthExceeded { limit });
            }
        }
        let generation = self.next_generation();
        self.entries.push_front(Entry {
            generation,
            instance,
        });
        Ok(generation)
    }

    /// Removes and returns the top instance, or `None` when empty.
    pub fn pop(&mut self) -> Option<DialogInstance> {
        self.entries.pop_front().map(|e| e.instance)
    }

    /// The top instance, or `None` when empty.
    pub fn peek(&self) -> Option<&DialogInstance> {
        self.entries.front().map(|e| &e.instance)
    }

    pub fn peek_mut(&mut self) -> Option<&mut DialogInstance> {
        self.entries.front_mut().map(|e| &mut e.instance)
    }

    /// Generation of the top instance.
    pub fn top_generation(&self) -> Option<u64> {
        self.entries.front().map(|e| e.generation)
    }

    /// Empties the stack, returning how many instances were dropped.
    pub fn clear(&mut self) -> usize {
        let dropped = self.entries.len();
        self.entries.clear();
        dropped
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn max_depth(&self) -> Option<usize> {
        self.max_depth
    }

    /// Iterates from the top of the stack down.
    pub fn iter(&self) -> impl Iterator<Item = &DialogInstance> {
        self.entries.iter().map(|e| &e.instance)
    }
}
