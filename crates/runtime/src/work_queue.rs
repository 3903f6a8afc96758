/// Deterministic work queue for feed-fetch style task scheduling.
///
/// Key properties:
/// - Total ordering on `(priority, id)`; smaller priority values run first.
/// - Equal priorities are processed in insertion order.
/// - Cancellation does not perturb the order of remaining items.
/// - Optional backpressure via a deterministic maximum pending length.
///
/// Vec-backed on purpose: the pending set is tiny (one request per layer)
/// and determinism matters more than asymptotics here.

#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct WorkId(pub u64);

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct QueueFull {
    pub max_len: usize,
}

impl std::fmt::Display for QueueFull {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "work queue full (max {})", self.max_len)
    }
}

impl std::error::Error for QueueFull {}

#[derive(Debug)]
struct Item<T> {
    priority: i32,
    id: WorkId,
    payload: T,
    canceled: bool,
}

#[derive(Debug)]
pub struct WorkQueue<T> {
    next_id: u64,
    items: Vec<Item<T>>,
    max_len: Option<usize>,
}

impl<T> Default for WorkQueue<T> {
    fn default() -> Self {
        Self {
            next_id: 0,
            items: Vec::new(),
            max_len: None,
        }
    }
}

impl<T> WorkQueue<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_len(max_len: usize) -> Self {
        Self {
            max_len: Some(max_len),
            ..Self::default()
        }
    }

    pub fn len(&self) -> usize {
        self.items.iter().filter(|i| !i.canceled).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn push(&mut self, priority: i32, payload: T) -> WorkId {
        let id = WorkId(self.next_id);
        self.next_id = self.next_id.wrapping_add(1);
        self.items.push(Item {
            priority,
            id,
            payload,
            canceled: false,
        });
        id
    }

    pub fn try_push(&mut self, priority: i32, payload: T) -> Result<WorkId, QueueFull> {
        if let Some(max_len) = self.max_len
            && self.len() >= max_len
        {
            return Err(QueueFull { max_len });
        }
        Ok(self.push(priority, payload))
    }

    /// Marks a pending item as canceled. Returns false if the id already
    /// left the queue.
    pub fn cancel(&mut self, id: WorkId) -> bool {
        if let Some(item) = self.items.iter_mut().find(|i| i.id == id && !i.canceled) {
            item.canceled = true;
            return true;
        }
        false
    }

    /// Pops the next (highest priority, then oldest) live item.
    pub fn pop_next(&mut self) -> Option<(WorkId, T)> {
        let mut best: Option<usize> = None;
        for (idx, item) in self.items.iter().enumerate() {
            if item.canceled {
                continue;
            }
            let better = match best {
                None => true,
                Some(b) => {
                    let cur = &self.items[b];
                    (item.priority, item.id) < (cur.priority, cur.id)
                }
            };
            if better {
                best = Some(idx);
            }
        }

        let idx = best?;
        let item = self.items.swap_remove(idx);
        Some((item.id, item.payload))
    }
}

#[cfg(test)]
mod tests {
    use super::{QueueFull, WorkQueue};

    #[test]
    fn same_priority_is_insertion_order() {
        let mut q = WorkQueue::new();
        q.push(0, "a");
        q.push(0, "b");
        q.push(0, "c");

        let order: Vec<_> = std::iter::from_fn(|| q.pop_next().map(|(_, v)| v)).collect();
        assert_eq!(order, vec!["a", "b", "c"]);
    }

    #[test]
    fn lower_priority_value_runs_first() {
        let mut q = WorkQueue::new();
        q.push(10, "late");
        q.push(-1, "early");
        assert_eq!(q.pop_next().unwrap().1, "early");
    }

    #[test]
    fn cancel_skips_item_without_reordering() {
        let mut q = WorkQueue::new();
        let a = q.push(0, "a");
        q.push(0, "b");
        q.push(0, "c");
        assert!(q.cancel(a));
        assert!(!q.cancel(a));

        assert_eq!(q.pop_next().unwrap().1, "b");
        assert_eq!(q.pop_next().unwrap().1, "c");
        assert!(q.pop_next().is_none());
    }

    #[test]
    fn backpressure_rejects_when_full() {
        let mut q = WorkQueue::with_max_len(2);
        assert!(q.try_push(0, "a").is_ok());
        assert!(q.try_push(0, "b").is_ok());
        assert_eq!(q.try_push(0, "c").unwrap_err(), QueueFull { max_len: 2 });
    }

    #[test]
    fn canceled_items_free_backpressure_slots() {
        let mut q = WorkQueue::with_max_len(1);
        let a = q.try_push(0, "a").unwrap();
        assert!(q.cancel(a));
        assert!(q.try_push(0, "b").is_ok());
    }
}
