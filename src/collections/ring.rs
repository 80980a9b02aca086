/// Fixed-capacity circular history buffer.
///
/// Once the total number of pushes reaches the capacity, each further push
/// overwrites the oldest retained element. The push counter keeps growing
/// past the capacity; the retained window never exceeds it.
#[derive(Debug, Clone)]
pub struct RingBuffer<T> {
    buffer: Vec<T>,
    capacity: usize,
    pointer: usize,
    count: u64,
}

impl<T> RingBuffer<T> {
    /// Create a buffer retaining at most `capacity` elements.
    ///
    /// `capacity` must be non-zero.
    pub fn new(capacity: usize) -> Self {
        assert!(capacity > 0, "ring buffer capacity must be non-zero");
        Self {
            buffer: Vec::with_capacity(capacity),
            capacity,
            pointer: 0,
            count: 0,
        }
    }

    /// Store `value`, overwriting the oldest element when full.
    pub fn push(&mut self, value: T) {
        if self.buffer.len() < self.capacity {
            self.buffer.push(value);
        } else {
            self.buffer[self.pointer] = value;
        }
        self.pointer = (self.pointer + 1) % self.capacity;
        self.count += 1;
    }

    /// Total number of pushes ever made, including overwritten ones.
    pub fn count(&self) -> u64 {
        self.count
    }

    /// Number of currently retained elements: `min(count, capacity)`.
    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    /// True if nothing has been retained.
    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    /// Element at logical position `index` within the retained window,
    /// oldest first. `None` when out of range.
    pub fn get(&self, index: usize) -> Option<&T> {
        if index >= self.len() {
            return None;
        }
        let start = if (self.count as usize) > self.capacity {
            self.pointer
        } else {
            0
        };
        self.buffer.get((start + index) % self.capacity)
    }

    /// Reset to empty: count, cursor, and storage.
    pub fn clear(&mut self) {
        self.buffer.clear();
        self.pointer = 0;
        self.count = 0;
    }
}

impl<T: PartialEq> RingBuffer<T> {
    /// Linear membership test over the retained elements.
    pub fn contains(&self, value: &T) -> bool {
        self.buffer.contains(value)
    }
}

impl<T: Clone> RingBuffer<T> {
    /// The retained elements in push order, oldest first.
    pub fn data(&self) -> Vec<T> {
        (0..self.len())
            .filter_map(|i| self.get(i).cloned())
            .collect()
    }
}
