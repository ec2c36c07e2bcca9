//! Deferred-task queue
//!
//! Models the host's "invoke after N seconds" primitive. Outcome sequences
//! submit a payload with a wall-clock delay; the host loop drains due payloads
//! once per frame on the logic thread. There is no cancellation API - dropping
//! the queue at scene teardown discards anything still pending.

/// A scheduled payload counting down in wall-clock seconds
#[derive(Debug, Clone)]
struct Deferred<T> {
    remaining: f32,
    payload: T,
}

/// FIFO queue of delayed payloads
#[derive(Debug)]
pub struct DelayQueue<T> {
    tasks: Vec<Deferred<T>>,
}

impl<T> Default for DelayQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> DelayQueue<T> {
    pub fn new() -> Self {
        Self { tasks: Vec::new() }
    }

    /// Submit a payload to be delivered after `delay_secs` of wall-clock time
    pub fn schedule(&mut self, delay_secs: f32, payload: T) {
        self.tasks.push(Deferred {
            remaining: delay_secs.max(0.0),
            payload,
        });
    }

    /// Advance the clock by `dt` seconds and return the payloads that came
    /// due, in the order they were scheduled
    pub fn advance(&mut self, dt: f32) -> Vec<T> {
        let mut due = Vec::new();
        let mut pending = Vec::new();
        for mut task in self.tasks.drain(..) {
            task.remaining -= dt;
            if task.remaining <= 0.0 {
                due.push(task.payload);
            } else {
                pending.push(task);
            }
        }
        self.tasks = pending;
        due
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_due_before_delay() {
        let mut queue = DelayQueue::new();
        queue.schedule(1.0, "reload");

        assert!(queue.advance(0.4).is_empty());
        assert!(queue.advance(0.4).is_empty());
        assert_eq!(queue.len(), 1);
    }

    #[test]
    fn test_due_after_delay_accumulates() {
        let mut queue = DelayQueue::new();
        queue.schedule(1.0, "reload");

        assert!(queue.advance(0.6).is_empty());
        assert_eq!(queue.advance(0.6), vec!["reload"]);
        assert!(queue.is_empty());
    }

    #[test]
    fn test_exact_boundary_fires() {
        let mut queue = DelayQueue::new();
        queue.schedule(0.5, 7u32);
        assert_eq!(queue.advance(0.5), vec![7]);
    }

    #[test]
    fn test_zero_delay_fires_next_advance() {
        let mut queue = DelayQueue::new();
        queue.schedule(0.0, 1u32);
        assert_eq!(queue.advance(0.0), vec![1]);
    }

    #[test]
    fn test_schedule_order_preserved() {
        let mut queue = DelayQueue::new();
        queue.schedule(0.2, "first");
        queue.schedule(0.2, "second");
        queue.schedule(0.5, "later");

        assert_eq!(queue.advance(0.3), vec!["first", "second"]);
        assert_eq!(queue.advance(0.3), vec!["later"]);
    }
}
