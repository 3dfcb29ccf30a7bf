//! # Typeahead Buffer
//!
//! Holds key events that arrive while nothing owns input focus (a request is
//! in flight, or a prompt widget has not been attached yet) and hands them
//! back in arrival order once something does.
//!
//! Replay is not re-entrant. The queue is taken out before delivery starts;
//! if a delivered event opens a new gap, the undelivered rest goes back to the
//! front of the queue, ahead of anything captured later.

use std::collections::VecDeque;

#[derive(Debug)]
pub struct Typeahead<E> {
    queue: VecDeque<E>,
    engaged: bool,
}

impl<E> Default for Typeahead<E> {
    fn default() -> Self {
        Self {
            queue: VecDeque::new(),
            engaged: false,
        }
    }
}

impl<E> Typeahead<E> {
    pub fn new() -> Self {
        Self::default()
    }

    /// True between the first capture of a gap and the replay that ends it.
    pub fn is_engaged(&self) -> bool {
        self.engaged
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Record an event that had no receiver.
    pub fn capture(&mut self, event: E) {
        self.engaged = true;
        self.queue.push_back(event);
    }

    /// Deliver buffered events in order. `deliver` returns whether a receiver
    /// still holds focus afterwards; on `false` the remaining events are
    /// requeued and the buffer stays engaged. Returns the number delivered.
    pub fn replay(&mut self, mut deliver: impl FnMut(E) -> bool) -> usize {
        let mut pending = std::mem::take(&mut self.queue);
        self.engaged = false;
        let mut delivered = 0;

        while let Some(event) = pending.pop_front() {
            delivered += 1;
            if !deliver(event) {
                break;
            }
        }

        if !pending.is_empty() {
            self.engaged = true;
            // Anything captured meanwhile arrived later than `pending`.
            pending.append(&mut self.queue);
            self.queue = pending;
        }
        delivered
    }
}
