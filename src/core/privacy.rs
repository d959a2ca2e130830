use std::collections::HashSet;
use uuid::Uuid;

/// User ids that must never surface as candidates for one viewer
///
/// Blocks are stored directionally but act symmetrically here: a block in
/// either direction puts the other party in the set. The set is computed
/// once per matching request and applied during candidate retrieval, before
/// any scoring — it is a privacy guarantee, not a ranking preference, so
/// threshold and sort logic can never reintroduce an excluded user.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExclusionSet {
    ids: HashSet<Uuid>,
}

impl ExclusionSet {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build the exclusion set for a viewer from directed (blocker, blocked)
    /// pairs involving them
    pub fn for_viewer(viewer_id: Uuid, blocks: &[(Uuid, Uuid)]) -> Self {
        let ids = blocks
            .iter()
            .filter_map(|&(blocker, blocked)| {
                if blocker == viewer_id {
                    Some(blocked)
                } else if blocked == viewer_id {
                    Some(blocker)
                } else {
                    None
                }
            })
            .collect();

        Self { ids }
    }

    pub fn excludes(&self, user_id: &Uuid) -> bool {
        self.ids.contains(user_id)
    }

    pub fn ids(&self) -> Vec<Uuid> {
        self.ids.iter().copied().collect()
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

impl FromIterator<Uuid> for ExclusionSet {
    fn from_iter<I: IntoIterator<Item = Uuid>>(iter: I) -> Self {
        Self {
            ids: iter.into_iter().collect(),
        }
    }
}
