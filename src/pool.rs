use std::collections::HashSet;

/// Deduplicating accumulator of discovered hostnames for one run.
///
/// Keys are the exact strings given; the pool only grows.
#[derive(Debug, Default)]
pub struct ResultPool {
    seen: HashSet<String>,
    ordered: Vec<String>,
}

impl ResultPool {
    pub fn new() -> Self {
        ResultPool::default()
    }

    /// Returns true iff `hostname` was not already present.
    pub fn insert(&mut self, hostname: &str) -> bool {
        if self.seen.contains(hostname) {
            return false;
        }
        self.seen.insert(hostname.to_string());
        self.ordered.push(hostname.to_string());
        true
    }

    pub fn contains(&self, hostname: &str) -> bool {
        self.seen.contains(hostname)
    }

    pub fn len(&self) -> usize {
        self.ordered.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ordered.is_empty()
    }

    /// Hostnames in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.ordered.iter().map(|s| s.as_str())
    }
}
