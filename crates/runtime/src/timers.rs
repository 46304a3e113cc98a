use crate::frame::Time;

/// Outcome of draining a [`TimerQueue`].
#[derive(Debug, PartialEq, Eq)]
pub struct DueActions<A> {
    /// Live actions whose deadline has passed, in (deadline, schedule) order.
    pub actions: Vec<A>,
    /// Due entries dropped because their epoch was superseded. This is an
    /// expected condition, not an error: a newer selection invalidated them.
    pub superseded: usize,
}

#[derive(Debug)]
struct Entry<A> {
    fire_at: Time,
    epoch: u64,
    seq: u64,
    action: A,
}

/// Deadline queue for choreography steps.
///
/// Every entry is tagged with the selection epoch that scheduled it. Draining
/// yields only entries whose epoch matches the caller's current epoch, so a
/// step scheduled by a superseded selection can never fire late and corrupt
/// the newer selection's visual state. There are no cancellation tokens; the
/// epoch comparison is the cancellation mechanism.
#[derive(Debug)]
pub struct TimerQueue<A> {
    next_seq: u64,
    entries: Vec<Entry<A>>,
}

impl<A> Default for TimerQueue<A> {
    fn default() -> Self {
        Self {
            next_seq: 0,
            entries: Vec::new(),
        }
    }
}

impl<A> TimerQueue<A> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn schedule(&mut self, fire_at: Time, epoch: u64, action: A) {
        let seq = self.next_seq;
        self.next_seq = self.next_seq.wrapping_add(1);
        self.entries.push(Entry {
            fire_at,
            epoch,
            seq,
            action,
        });
    }

    pub fn pending(&self) -> usize {
        self.entries.len()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Removes every entry whose deadline is at or before `now`.
    ///
    /// Entries matching `current_epoch` come back as actions ordered by
    /// `(fire_at, schedule order)`; stale entries are counted and dropped.
    /// Entries still in the future stay queued regardless of epoch — they
    /// will be dropped on the drain that reaches their deadline.
    pub fn drain_due(&mut self, now: Time, current_epoch: u64) -> DueActions<A> {
        let mut due: Vec<Entry<A>> = Vec::new();
        let mut idx = 0;
        while idx < self.entries.len() {
            if self.entries[idx].fire_at <= now {
                due.push(self.entries.swap_remove(idx));
            } else {
                idx += 1;
            }
        }

        due.sort_by(|a, b| {
            a.fire_at
                .0
                .total_cmp(&b.fire_at.0)
                .then_with(|| a.seq.cmp(&b.seq))
        });

        let mut actions = Vec::new();
        let mut superseded = 0usize;
        for entry in due {
            if entry.epoch == current_epoch {
                actions.push(entry.action);
            } else {
                superseded += 1;
            }
        }

        DueActions {
            actions,
            superseded,
        }
    }
}
