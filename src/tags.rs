//! Tag-merge helper.
//!
//! Tags group items for bulk invalidation, which is resolved by the
//! backend; the pool only carries them. Merging is a plain set union,
//! kept as a free function so both the item and tests share one
//! definition.

use std::collections::BTreeSet;

/// Union `new` into `existing`, deduplicating.
///
/// Tags only ever grow on an item; there is no removal operation.
pub fn merge_tags<I>(existing: &mut BTreeSet<String>, new: I)
where
    I: IntoIterator,
    I::Item: Into<String>,
{
    existing.extend(new.into_iter().map(Into::into));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_merge_deduplicates() {
        let mut tags = BTreeSet::new();
        merge_tags(&mut tags, ["a", "b"]);
        merge_tags(&mut tags, ["b", "c"]);

        let expected: BTreeSet<String> =
            ["a", "b", "c"].into_iter().map(String::from).collect();
        assert_eq!(tags, expected);
    }

    #[test]
    fn test_merge_empty_is_noop() {
        let mut tags: BTreeSet<String> = ["node.1".to_string()].into_iter().collect();
        merge_tags(&mut tags, Vec::<String>::new());
        assert_eq!(tags.len(), 1);
    }
}
