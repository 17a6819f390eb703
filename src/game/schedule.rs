use std::cmp::Reverse;
use std::collections::BinaryHeap;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ScheduledEvent {
    Respawn { snake_id: Uuid },
    OrbFloor,
}

// Field order is the ordering: due time, then insertion sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
struct Entry {
    due_at: i64,
    seq: u64,
    event: ScheduledEvent,
}

/// Virtual-time event queue polled by the driver once per tick.
#[derive(Debug, Default)]
pub struct Scheduler {
    queue: BinaryHeap<Reverse<Entry>>,
    next_seq: u64,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn schedule(&mut self, due_at: i64, event: ScheduledEvent) {
        let seq = self.next_seq;
        self.next_seq = self.next_seq.wrapping_add(1);
        self.queue.push(Reverse(Entry { due_at, seq, event }));
    }

    /// Removes and returns every event due at or before `now` with its due time, earliest first.
    pub fn pop_due(&mut self, now: i64) -> Vec<(i64, ScheduledEvent)> {
        let mut due = Vec::new();
        while let Some(Reverse(entry)) = self.queue.peek() {
            if entry.due_at > now {
                break;
            }
            due.push((entry.due_at, entry.event));
            self.queue.pop();
        }
        due
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }
}
