//! Folds flat one-to-many join rows into one entry per parent.

use std::collections::HashMap;
use std::hash::Hash;

/// Group `(parent, child)` pairs by `key(parent)`.
///
/// Each parent appears once, in the order its key was first seen; its children keep row order.
/// When several rows share a key, the parent from the first row is kept.
pub fn group_by_parent<P, C, K, I, F>(rows: I, key: F) -> Vec<(P, Vec<C>)>
where
    I: IntoIterator<Item = (P, C)>,
    K: Eq + Hash,
    F: Fn(&P) -> K,
{
    let mut index: HashMap<K, usize> = HashMap::new();
    let mut groups: Vec<(P, Vec<C>)> = Vec::new();
    for (parent, child) in rows {
        let k = key(&parent);
        match index.get(&k) {
            Some(&slot) => groups[slot].1.push(child),
            None => {
                index.insert(k, groups.len());
                groups.push((parent, vec![child]));
            }
        }
    }
    groups
}
