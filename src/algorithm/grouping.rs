//! Region partitioning shared by the per-region computations

use itertools::Itertools;
use rayon::prelude::*;
use rustc_hash::FxHashMap;

/// Borrowed (state, district) key
pub type RegionRef<'a> = (&'a str, &'a str);

/// Partition `items` by region
///
/// Input order is preserved inside each partition and partitions are
/// returned sorted by region, so results never depend on hash order.
pub fn group_by_region<'a, T, F>(items: &'a [T], key: F) -> Vec<(RegionRef<'a>, Vec<&'a T>)>
where
    F: Fn(&'a T) -> RegionRef<'a>,
{
    let mut groups: FxHashMap<RegionRef<'a>, Vec<&'a T>> = FxHashMap::default();
    for item in items {
        groups.entry(key(item)).or_default().push(item);
    }

    groups
        .into_iter()
        .sorted_unstable_by(|a, b| a.0.cmp(&b.0))
        .collect_vec()
}

/// Apply `f` to every partition, on the rayon pool when `parallel` is set
///
/// Output order matches input order either way.
pub fn map_groups<G, T, F>(groups: Vec<G>, parallel: bool, f: F) -> Vec<T>
where
    G: Send,
    T: Send,
    F: Fn(G) -> T + Sync + Send,
{
    if parallel {
        groups.into_par_iter().map(f).collect()
    } else {
        groups.into_iter().map(f).collect()
    }
}
