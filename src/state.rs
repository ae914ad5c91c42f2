//! Protocol state threaded across decode attempts.
//!
//! Multi-step protocols describe their steps as a closed enum and move
//! between them only through
//! [`ReplayBuf::checkpoint_with`](crate::ReplayBuf::checkpoint_with):
//!
//! ```
//! #[derive(Clone, Debug, Default, PartialEq)]
//! enum Step {
//!     #[default]
//!     AwaitingHeader,
//!     AwaitingBody { length: usize },
//! }
//! ```
//!
//! Decoders that only need the buffer position use [`NoState`].

/// State sentinel for decoders without protocol steps.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct NoState;

/// Holds the current protocol state for one connection.
///
/// The generation counter changes only when an update replaces the state
/// with a different value, so the driver can tell an attempt that advanced
/// the protocol apart from one that re-committed the step it was already on.
#[derive(Debug, Default)]
pub struct StateCarrier<S> {
    current: S,
    generation: u64,
}

impl<S> StateCarrier<S> {
    /// Start from `initial`.
    #[must_use]
    pub fn new(initial: S) -> Self {
        Self {
            current: initial,
            generation: 0,
        }
    }

    /// Current state.
    #[must_use]
    pub fn get(&self) -> &S { &self.current }

    /// Number of state changes applied so far.
    #[must_use]
    pub fn generation(&self) -> u64 { self.generation }
}

impl<S: PartialEq> StateCarrier<S> {
    /// Replace the state, returning `true` when the value changed.
    ///
    /// Setting a value equal to the current one leaves the generation alone.
    pub fn set(&mut self, next: S) -> bool {
        if self.current == next {
            return false;
        }
        self.current = next;
        self.generation = self.generation.wrapping_add(1);
        true
    }
}
