//! Ordered memo collection.
//!
//! Append-order list with identity-based removal and the one-shot
//! transcription fill-in. Mutated only by the session controller; the
//! presentation layer sees it through snapshots.

use crate::domain::types::VoiceMemo;

#[derive(Debug, Clone, Default)]
pub struct MemoList {
    memos: Vec<VoiceMemo>,
}

impl MemoList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a memo. Memos stay in insertion order, oldest first.
    pub fn push(&mut self, memo: VoiceMemo) {
        self.memos.push(memo);
    }

    pub fn get(&self, id: &str) -> Option<&VoiceMemo> {
        self.memos.iter().find(|m| m.id == id)
    }

    /// Fill a memo's transcription exactly once.
    ///
    /// Returns `false` and leaves the memo untouched when the id is unknown
    /// or the transcription is already present.
    pub fn fill_transcription(&mut self, id: &str, text: String) -> bool {
        match self.memos.iter_mut().find(|m| m.id == id) {
            Some(memo) if memo.transcription.is_none() => {
                memo.transcription = Some(text);
                true
            }
            _ => false,
        }
    }

    /// Remove the memo with the given id. Unknown ids are a no-op.
    pub fn remove(&mut self, id: &str) {
        self.memos.retain(|m| m.id != id);
    }

    /// Remove the memos at the given positions.
    ///
    /// All positions are resolved against the list as it is on entry,
    /// before any removal applies, so a multi-row delete cannot hit
    /// shifted indices. Out-of-range positions are skipped.
    /// Returns the number of memos removed.
    pub fn remove_at(&mut self, indices: &[usize]) -> usize {
        let ids: Vec<String> = indices
            .iter()
            .filter_map(|&i| self.memos.get(i))
            .map(|m| m.id.clone())
            .collect();

        let before = self.memos.len();
        self.memos.retain(|m| !ids.contains(&m.id));
        before - self.memos.len()
    }

    /// Drop oldest memos until at most `max` remain.
    /// Returns the number of memos removed.
    pub fn trim_to_limit(&mut self, max: usize) -> usize {
        if self.memos.len() <= max {
            return 0;
        }
        let removed = self.memos.len() - max;
        self.memos.drain(..removed);
        removed
    }

    pub fn as_slice(&self) -> &[VoiceMemo] {
        &self.memos
    }

    pub fn len(&self) -> usize {
        self.memos.len()
    }

    pub fn is_empty(&self) -> bool {
        self.memos.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn memo(duration_secs: f32) -> VoiceMemo {
        VoiceMemo::new(Utc::now(), duration_secs)
    }

    #[test]
    fn test_push_keeps_insertion_order() {
        let mut list = MemoList::new();
        list.push(memo(1.0));
        list.push(memo(2.0));
        list.push(memo(3.0));

        assert_eq!(list.len(), 3);
        assert_eq!(list.as_slice()[0].duration_secs, 1.0);
        assert_eq!(list.as_slice()[2].duration_secs, 3.0);
    }

    #[test]
    fn test_get_by_id() {
        let mut list = MemoList::new();
        let m = memo(4.0);
        let id = m.id.clone();
        list.push(m);
        list.push(memo(5.0));

        assert_eq!(list.get(&id).unwrap().duration_secs, 4.0);
        assert!(list.get("nonexistent-id").is_none());
    }

    #[test]
    fn test_remove_by_id() {
        let mut list = MemoList::new();
        let m = memo(1.0);
        let id = m.id.clone();
        list.push(m);

        list.remove(&id);
        assert!(list.is_empty());
    }

    #[test]
    fn test_remove_nonexistent_id_is_noop() {
        let mut list = MemoList::new();
        list.push(memo(1.0));

        list.remove("nonexistent-id");
        assert_eq!(list.len(), 1);
    }

    #[test]
    fn test_fill_transcription_once() {
        let mut list = MemoList::new();
        let m = memo(1.0);
        let id = m.id.clone();
        list.push(m);

        assert!(list.fill_transcription(&id, "hello world".to_string()));
        assert_eq!(
            list.get(&id).unwrap().transcription.as_deref(),
            Some("hello world")
        );
    }

    #[test]
    fn test_fill_transcription_is_one_shot() {
        let mut list = MemoList::new();
        let m = memo(1.0);
        let id = m.id.clone();
        list.push(m);

        assert!(list.fill_transcription(&id, "first".to_string()));
        assert!(!list.fill_transcription(&id, "second".to_string()));
        assert_eq!(list.get(&id).unwrap().transcription.as_deref(), Some("first"));
    }

    #[test]
    fn test_fill_transcription_unknown_id() {
        let mut list = MemoList::new();
        assert!(!list.fill_transcription("nonexistent-id", "text".to_string()));
    }

    #[test]
    fn test_remove_at_single_index() {
        let mut list = MemoList::new();
        list.push(memo(1.0));
        list.push(memo(2.0));
        list.push(memo(3.0));
        let removed_id = list.as_slice()[1].id.clone();

        assert_eq!(list.remove_at(&[1]), 1);
        assert_eq!(list.len(), 2);
        assert!(list.get(&removed_id).is_none());
        // Relative order of the survivors is preserved
        assert_eq!(list.as_slice()[0].duration_secs, 1.0);
        assert_eq!(list.as_slice()[1].duration_secs, 3.0);
    }

    #[test]
    fn test_remove_at_batch_resolves_before_removal() {
        let mut list = MemoList::new();
        list.push(memo(1.0));
        list.push(memo(2.0));
        list.push(memo(3.0));
        let survivor_id = list.as_slice()[1].id.clone();

        // Both positions refer to the pre-deletion list: removing 0 must
        // not shift what 2 means.
        assert_eq!(list.remove_at(&[0, 2]), 2);
        assert_eq!(list.len(), 1);
        assert_eq!(list.as_slice()[0].id, survivor_id);
    }

    #[test]
    fn test_remove_at_skips_out_of_range() {
        let mut list = MemoList::new();
        list.push(memo(1.0));

        assert_eq!(list.remove_at(&[5, 0]), 1);
        assert!(list.is_empty());
    }

    #[test]
    fn test_remove_at_duplicate_indices() {
        let mut list = MemoList::new();
        list.push(memo(1.0));
        list.push(memo(2.0));

        assert_eq!(list.remove_at(&[0, 0]), 1);
        assert_eq!(list.len(), 1);
        assert_eq!(list.as_slice()[0].duration_secs, 2.0);
    }

    #[test]
    fn test_trim_to_limit_drops_oldest() {
        let mut list = MemoList::new();
        for i in 0..10 {
            list.push(memo(i as f32));
        }

        assert_eq!(list.trim_to_limit(4), 6);
        assert_eq!(list.len(), 4);
        // Oldest (front) dropped, newest kept
        assert_eq!(list.as_slice()[0].duration_secs, 6.0);
        assert_eq!(list.as_slice()[3].duration_secs, 9.0);
    }

    #[test]
    fn test_trim_to_limit_no_op_when_under() {
        let mut list = MemoList::new();
        list.push(memo(1.0));

        assert_eq!(list.trim_to_limit(10), 0);
        assert_eq!(list.len(), 1);
    }
}
