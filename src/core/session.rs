use crate::models::ScoredCandidate;

/// Per-viewer presentation queue with a cursor
///
/// Created on every (re)load of candidates. Skips and likes of the current
/// candidate advance the cursor. Liking an upcoming candidate drops them
/// from the queue, so they are not shown again. A reload replaces the
/// whole session.
#[derive(Debug, Clone, Default)]
pub struct RankingSession {
    viewer_id: String,
    queue: Vec<ScoredCandidate>,
    cursor: usize,
}

impl RankingSession {
    pub fn new(viewer_id: impl Into<String>, queue: Vec<ScoredCandidate>) -> Self {
        Self {
            viewer_id: viewer_id.into(),
            queue,
            cursor: 0,
        }
    }

    pub fn viewer_id(&self) -> &str {
        &self.viewer_id
    }

    pub fn queue(&self) -> &[ScoredCandidate] {
        &self.queue
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Candidate under the cursor, `None` once the queue is exhausted
    pub fn current(&self) -> Option<&ScoredCandidate> {
        self.queue.get(self.cursor)
    }

    /// Candidates not yet skipped or liked, including the current one
    pub fn remaining(&self) -> usize {
        self.queue.len().saturating_sub(self.cursor)
    }

    pub fn is_exhausted(&self) -> bool {
        self.current().is_none()
    }

    /// Move past the current candidate, returning the new current one
    pub fn advance(&mut self) -> Option<&ScoredCandidate> {
        if self.cursor < self.queue.len() {
            self.cursor += 1;
        }
        self.current()
    }

    /// Record a like of `target_id`
    ///
    /// Liking the current candidate advances the cursor. Liking one further
    /// down the queue removes them. Candidates already passed are left
    /// alone. Returns whether the session changed.
    pub fn mark_liked(&mut self, target_id: &str) -> bool {
        let Some(offset) = self.queue[self.cursor..]
            .iter()
            .position(|candidate| candidate.user_id() == target_id)
        else {
            return false;
        };

        if offset == 0 {
            self.cursor += 1;
        } else {
            self.queue.remove(self.cursor + offset);
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Profile;

    fn create_session(ids: &[&str]) -> RankingSession {
        let queue = ids
            .iter()
            .map(|id| ScoredCandidate::unranked(Profile::new(*id, *id)))
            .collect();
        RankingSession::new("viewer", queue)
    }

    #[test]
    fn test_advance_walks_queue() {
        let mut session = create_session(&["a", "b"]);

        assert_eq!(session.current().map(|c| c.user_id()), Some("a"));
        assert_eq!(session.remaining(), 2);

        assert_eq!(session.advance().map(|c| c.user_id()), Some("b"));
        assert!(session.advance().is_none());
        assert!(session.is_exhausted());

        // Stays put once exhausted
        assert!(session.advance().is_none());
        assert_eq!(session.cursor(), 2);
        assert_eq!(session.remaining(), 0);
    }

    fn ids(session: &RankingSession) -> Vec<&str> {
        session.queue().iter().map(|c| c.user_id()).collect()
    }

    #[test]
    fn test_like_current_advances() {
        let mut session = create_session(&["a", "b"]);

        assert!(session.mark_liked("a"));
        assert_eq!(session.cursor(), 1);
        assert_eq!(session.current().map(|c| c.user_id()), Some("b"));
    }

    #[test]
    fn test_like_upcoming_removes_from_queue() {
        let mut session = create_session(&["a", "b", "c"]);

        assert!(session.mark_liked("c"));
        assert_eq!(session.cursor(), 0);
        assert_eq!(ids(&session), vec!["a", "b"]);

        // Skipping through never shows the liked candidate again
        assert_eq!(session.advance().map(|c| c.user_id()), Some("b"));
        assert!(session.advance().is_none());
    }

    #[test]
    fn test_like_passed_or_unknown_is_ignored() {
        let mut session = create_session(&["a", "b"]);
        session.advance();

        assert!(!session.mark_liked("a"));
        assert!(!session.mark_liked("zed"));
        assert_eq!(ids(&session), vec!["a", "b"]);
        assert_eq!(session.cursor(), 1);
    }

    #[test]
    fn test_empty_session() {
        let mut session = create_session(&[]);
        assert!(session.is_exhausted());
        assert!(!session.mark_liked("a"));
        assert_eq!(session.viewer_id(), "viewer");
    }
}
