//! Bounded, position-ordered cache of tokenizer restore points.

use std::collections::VecDeque;
use std::ops::Range;

/// A restore point: the tokenizer state in effect at `position`.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) struct Checkpoint<S> {
    pub position: u32,
    pub state: S,
}

/// Outcome of [`CheckpointCache::restore`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum Restore<S> {
    /// A restore point sits exactly at the requested position.
    Exact(S),
    /// The position lies inside lexed text; replay forward from here.
    Replay(Checkpoint<S>),
    /// The tokenizer never lexed up to the position.
    Unlexed,
}

#[derive(Copy, Clone, Debug)]
struct Entry<S> {
    checkpoint: Checkpoint<S>,
    /// Push count along the current history; thinning keys off it.
    seq: u64,
}

/// Restore points in non-decreasing position order, plus the stretches of
/// text the tokenizer lexed without a jump.
///
/// The newest `dense` points are all kept. Older points thin out with age:
/// a point `age` pushes old survives only if its sequence number is a
/// multiple of the next power of two above `age / dense`, so spacing grows
/// in proportion to distance from the newest point and no region of the
/// document is ever left without one. When thinning alone cannot keep the
/// cache under `capacity`, `dense` halves.
///
/// Each stretch keeps the state it began in, so a replay can start at the
/// stretch start when no point inside it survives.
#[derive(Clone, Debug)]
pub(crate) struct CheckpointCache<S> {
    entries: VecDeque<Entry<S>>,
    runs: Vec<Run<S>>,
    capacity: usize,
    dense: u64,
}

/// A stretch of text lexed without a jump.
#[derive(Clone, Debug)]
struct Run<S> {
    span: Range<u32>,
    start_state: S,
}

impl<S: Copy> CheckpointCache<S> {
    pub(crate) fn new(capacity: usize) -> Self {
        CheckpointCache {
            entries: VecDeque::with_capacity(capacity.min(1024)),
            runs: Vec::new(),
            capacity: capacity.max(4),
            dense: u64::try_from(capacity / 4).unwrap_or(1).max(1),
        }
    }

    /// Begin a new stretch of lexed text at a point the tokenizer jumped to.
    pub(crate) fn start_run(&mut self, checkpoint: Checkpoint<S>) {
        self.truncate(checkpoint.position);
        self.runs.push(Run {
            span: checkpoint.position..checkpoint.position,
            start_state: checkpoint.state,
        });
        self.append(checkpoint);
    }

    /// Record a restore point reached by lexing forward from the previous
    /// one.
    ///
    /// A point before the newest entry drops the entries after it. A point
    /// at the newest entry's position replaces it.
    pub(crate) fn push(&mut self, checkpoint: Checkpoint<S>) {
        match self.runs.last_mut() {
            Some(run) => run.span.end = run.span.end.max(checkpoint.position),
            None => self.runs.push(Run {
                span: checkpoint.position..checkpoint.position,
                start_state: checkpoint.state,
            }),
        }
        self.append(checkpoint);
    }

    /// Where to resume lexing at `position`. Every entry and stretch after
    /// `position` is discarded.
    pub(crate) fn restore(&mut self, position: u32) -> Restore<S> {
        let inside = self
            .runs
            .iter()
            .rev()
            .find(|run| run.span.start <= position)
            .is_some_and(|run| run.span.end >= position);
        self.truncate(position);
        let Some(run) = self.runs.last().filter(|_| inside) else {
            return Restore::Unlexed;
        };
        match self.entries.back().map(|e| e.checkpoint) {
            Some(c) if c.position == position => Restore::Exact(c.state),
            Some(c) if c.position >= run.span.start => Restore::Replay(c),
            _ => Restore::Replay(Checkpoint {
                position: run.span.start,
                state: run.start_state,
            }),
        }
    }

    /// Forget every entry after `position` and clip the stretches to it.
    pub(crate) fn truncate(&mut self, position: u32) {
        let keep = self
            .entries
            .partition_point(|e| e.checkpoint.position <= position);
        self.entries.truncate(keep);
        let runs = self.runs.partition_point(|run| run.span.start <= position);
        self.runs.truncate(runs);
        if let Some(run) = self.runs.last_mut() {
            run.span.end = run.span.end.min(position);
        }
    }

    fn append(&mut self, checkpoint: Checkpoint<S>) {
        let keep = self
            .entries
            .partition_point(|e| e.checkpoint.position < checkpoint.position);
        self.entries.truncate(keep);
        let seq = self.entries.back().map_or(0, |e| e.seq + 1);
        self.entries.push_back(Entry { checkpoint, seq });
        if self.entries.len() > self.capacity {
            self.thin();
        }
    }

    fn thin(&mut self) {
        let Some(newest) = self.entries.back().map(|e| e.seq) else {
            return;
        };
        loop {
            let dense = self.dense;
            self.entries.retain(|e| survives(newest - e.seq, e.seq, dense));
            if self.entries.len() <= self.capacity * 3 / 4 || self.dense == 1 {
                break;
            }
            self.dense /= 2;
        }
    }

    #[cfg(test)]
    pub(crate) fn positions(&self) -> Vec<u32> {
        self.entries.iter().map(|e| e.checkpoint.position).collect()
    }

    #[cfg(test)]
    pub(crate) fn runs(&self) -> Vec<Range<u32>> {
        self.runs.iter().map(|run| run.span.clone()).collect()
    }
}

/// Whether a point `age` pushes behind the newest is kept.
fn survives(age: u64, seq: u64, dense: u64) -> bool {
    match (age / dense).checked_ilog2() {
        None => true,
        Some(level) => seq.trailing_zeros() > level,
    }
}
