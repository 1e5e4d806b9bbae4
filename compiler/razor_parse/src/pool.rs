//! Reusable `Vec` buffers.
//!
//! Balancing and lookahead need short-lived token vectors many times per
//! parse; the pool hands back cleared vectors so their allocations are
//! reused.

/// Free list of cleared vectors.
#[derive(Debug)]
pub(crate) struct BufferPool<T> {
    free: Vec<Vec<T>>,
}

/// Vectors beyond this many are dropped instead of kept.
const MAX_POOLED: usize = 8;

impl<T> Default for BufferPool<T> {
    fn default() -> Self {
        BufferPool { free: Vec::new() }
    }
}

impl<T> BufferPool<T> {
    pub(crate) fn get(&mut self) -> Vec<T> {
        self.free.pop().unwrap_or_default()
    }

    pub(crate) fn put(&mut self, mut buffer: Vec<T>) {
        buffer.clear();
        if self.free.len() < MAX_POOLED && buffer.capacity() > 0 {
            self.free.push(buffer);
        }
    }

    #[cfg(test)]
    pub(crate) fn pooled(&self) -> usize {
        self.free.len()
    }
}
