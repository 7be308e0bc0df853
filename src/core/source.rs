/// Lazy sequence of record ordinals `1..=limit`.
#[derive(Debug, Clone)]
pub struct IndexSource {
    next: u64,
    remaining: u64,
}

impl IndexSource {
    pub fn new(limit: u64) -> Self {
        Self {
            next: 1,
            remaining: limit,
        }
    }
}

impl Iterator for IndexSource {
    type Item = u64;

    fn next(&mut self) -> Option<u64> {
        if self.remaining == 0 {
            return None;
        }
        let index = self.next;
        self.remaining -= 1;
        // only saturates after yielding u64::MAX, when nothing remains
        self.next = self.next.saturating_add(1);
        Some(index)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match usize::try_from(self.remaining) {
            Ok(remaining) => (remaining, Some(remaining)),
            Err(_) => (usize::MAX, None),
        }
    }
}
