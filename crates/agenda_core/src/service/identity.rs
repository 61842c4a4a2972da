//! Identity allocation over the shared agenda id namespace.

use crate::model::agenda::AgendaId;

/// Returns `max(ids) + 1`, treating an empty input as max 0.
///
/// Returns `None` once the id space is exhausted.
pub fn next_id_after(ids: impl IntoIterator<Item = AgendaId>) -> Option<AgendaId> {
    ids.into_iter().max().unwrap_or(0).checked_add(1)
}

#[cfg(test)]
mod tests {
    use super::next_id_after;

    #[test]
    fn empty_namespace_starts_at_one() {
        assert_eq!(next_id_after(Vec::new()), Some(1));
    }

    #[test]
    fn next_id_exceeds_every_existing_id() {
        assert_eq!(next_id_after([3, 17, 4]), Some(18));
    }

    #[test]
    fn exhausted_namespace_yields_none() {
        assert_eq!(next_id_after([u32::MAX]), None);
    }
}
