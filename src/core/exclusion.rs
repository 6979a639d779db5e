use std::collections::HashSet;

/// Ids hidden from a viewer's ranking pool
///
/// Built fresh on every ranking pass from the viewer's likes, matches and
/// own id. Never persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExclusionSet {
    ids: HashSet<String>,
}

impl ExclusionSet {
    /// Union of liked ids, matched ids and the viewer's own id
    pub fn for_viewer(viewer_id: &str, liked: &[String], matched: &[String]) -> Self {
        let mut ids: HashSet<String> = liked.iter().chain(matched).cloned().collect();
        ids.insert(viewer_id.to_string());
        Self { ids }
    }

    pub fn from_ids<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            ids: ids.into_iter().map(Into::into).collect(),
        }
    }

    #[inline]
    pub fn contains(&self, id: &str) -> bool {
        self.ids.contains(id)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}
