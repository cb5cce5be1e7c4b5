use std::time::{SystemTime, UNIX_EPOCH};

use crate::QuestionId;

/// Hands out question ids derived from the wall clock.
///
/// Ids are milliseconds since the Unix epoch, bumped to `last + 1` whenever
/// the clock has not advanced past the previous id. Two drafts created in the
/// same millisecond therefore still get distinct, increasing ids.
#[derive(Debug, Clone, Default)]
pub struct IdGenerator {
    last: Option<u64>,
}

impl IdGenerator {
    /// Create a generator with no ids handed out yet.
    pub fn new() -> Self {
        Self::default()
    }

    /// Generate the next id from the current time.
    pub fn next_id(&mut self) -> QuestionId {
        let millis = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|elapsed| u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX))
            .unwrap_or_default();
        self.next_id_at(millis)
    }

    /// Generate the next id for the given timestamp in milliseconds.
    pub fn next_id_at(&mut self, millis: u64) -> QuestionId {
        let raw = match self.last {
            Some(last) if millis <= last => last.saturating_add(1),
            _ => millis,
        };
        self.last = Some(raw);
        QuestionId::new(raw)
    }

    /// Make sure future ids are greater than `id`.
    ///
    /// Used when questions with externally chosen ids enter the session.
    pub fn observe(&mut self, id: QuestionId) {
        if self.last.is_none_or(|last| id.get() > last) {
            self.last = Some(id.get());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_tick_still_unique() {
        let mut ids = IdGenerator::new();
        let a = ids.next_id_at(1_000);
        let b = ids.next_id_at(1_000);
        let c = ids.next_id_at(999);
        assert_eq!(a.get(), 1_000);
        assert_eq!(b.get(), 1_001);
        assert_eq!(c.get(), 1_002);
    }

    #[test]
    fn follows_clock_when_it_advances() {
        let mut ids = IdGenerator::new();
        ids.next_id_at(1_000);
        assert_eq!(ids.next_id_at(5_000).get(), 5_000);
    }

    #[test]
    fn observed_ids_are_skipped() {
        let mut ids = IdGenerator::new();
        ids.observe(QuestionId::new(10_000));
        assert_eq!(ids.next_id_at(50).get(), 10_001);
    }

    #[test]
    fn wall_clock_ids_increase() {
        let mut ids = IdGenerator::new();
        let first = ids.next_id();
        let second = ids.next_id();
        assert!(second > first);
    }
}
