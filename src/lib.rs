//! A BK-tree: an index over a discrete metric space answering fuzzy range
//! queries ("every stored item within distance `r` of this one").
//!
//! Each node keeps its children keyed by their exact distance to it. During
//! a search the triangle inequality bounds which of those keys can lead to
//! a match, so whole subtrees are skipped without evaluating the metric.
//!
//! ```
//! use bk_index::{BkTree, Levenshtein};
//!
//! let tree = BkTree::from_items(
//!     Levenshtein,
//!     ["some", "soft", "same", "mole", "soda", "salmon"].map(String::from),
//! );
//!
//! let mut found: Vec<_> = tree
//!     .search("bole", 2)
//!     .into_iter()
//!     .map(|r| (r.value.as_str(), r.distance))
//!     .collect();
//! found.sort_unstable();
//! assert_eq!(found, vec![("mole", 1), ("some", 2)]);
//! ```
//!
//! The tree is only correct for a true metric. Symmetry and the triangle
//! inequality are never checked; a distance function violating them makes
//! searches silently miss matches.

use std::{
    borrow::Borrow,
    collections::{hash_map::Entry, HashMap},
};

mod error;
mod iter;
mod metric;

pub use error::{BkIndexError, Result};
pub use iter::{Find, Iter, SearchResult};
pub use metric::Levenshtein;

/// A distance function over `K`.
///
/// Implementations must satisfy, for all `a`, `b`, `c`:
/// `d(a, a) == 0`, `d(a, b) == d(b, a)` and `d(a, c) <= d(a, b) + d(b, c)`.
pub trait Metric<K: ?Sized> {
    fn distance(&self, a: &K, b: &K) -> u32;
}

impl<K, F> Metric<K> for F
where
    K: ?Sized,
    F: Fn(&K, &K) -> u32,
{
    fn distance(&self, a: &K, b: &K) -> u32 {
        self(a, b)
    }
}

#[derive(Clone, Debug)]
struct Node<T> {
    value: T,
    children: HashMap<u32, Node<T>>,
}

impl<T> Node<T> {
    fn new_leaf(value: T) -> Self {
        Node {
            value,
            children: HashMap::new(),
        }
    }
}

/// A BK-tree over items of type `T`, bound for its whole life to `metric`.
///
/// There is no internal synchronization: mutation needs `&mut self`, while
/// any number of searches may share `&self`.
#[derive(Clone)]
pub struct BkTree<T, M> {
    root: Option<Node<T>>,
    metric: M,
    len: usize,
}

impl<T, M> BkTree<T, M> {
    pub fn new(metric: M) -> Self {
        BkTree {
            root: None,
            metric,
            len: 0,
        }
    }

    pub fn metric(&self) -> &M {
        &self.metric
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    pub fn iter(&self) -> Iter<'_, T> {
        Iter::new(self)
    }
}

impl<T, M> BkTree<T, M>
where
    M: Metric<T>,
{
    /// Builds a tree by inserting `items` in iteration order.
    pub fn from_items<I>(metric: M, items: I) -> Self
    where
        I: IntoIterator<Item = T>,
    {
        let mut tree = BkTree::new(metric);
        tree.extend(items);
        tree
    }

    /// Adds `item` to the tree. Never fails; an item equal to one already
    /// stored is kept as a second entry under key 0.
    pub fn insert(&mut self, item: T) {
        self.len += 1;

        let Some(mut node) = self.root.as_mut() else {
            #[cfg(feature = "trace")]
            tracing::trace!("bk-tree insert: new root");

            self.root = Some(Node::new_leaf(item));
            return;
        };

        loop {
            let distance = self.metric.distance(&item, &node.value);
            node = match node.children.entry(distance) {
                Entry::Occupied(occupied) => occupied.into_mut(),
                Entry::Vacant(vacant) => {
                    #[cfg(feature = "trace")]
                    tracing::trace!(
                        key = distance,
                        len = self.len,
                        "bk-tree insert: new leaf"
                    );

                    vacant.insert(Node::new_leaf(item));
                    return;
                }
            };
        }
    }
}

impl<T, M> BkTree<T, M> {
    /// Lazily yields every stored value within `radius` of `query`.
    ///
    /// Results come out in breadth-first visiting order, which depends on
    /// tree shape and is not otherwise meaningful.
    pub fn find<'a, 'q, Q>(&'a self, query: &'q Q, radius: u32) -> Find<'a, 'q, T, M, Q>
    where
        Q: ?Sized,
        T: Borrow<Q>,
        M: Metric<Q>,
    {
        Find::new(self, query, radius)
    }

    pub fn search<Q>(&self, query: &Q, radius: u32) -> Vec<SearchResult<'_, T>>
    where
        Q: ?Sized,
        T: Borrow<Q>,
        M: Metric<Q>,
    {
        let mut found = self.find(query, radius);
        let results: Vec<_> = found.by_ref().collect();

        #[cfg(feature = "trace")]
        tracing::debug!(
            radius,
            matches = results.len(),
            evaluations = found.evaluations(),
            "bk-tree search"
        );

        results
    }

    /// Like [`search`](Self::search), ordered by ascending distance.
    pub fn search_sorted<Q>(&self, query: &Q, radius: u32) -> Vec<SearchResult<'_, T>>
    where
        Q: ?Sized,
        T: Borrow<Q>,
        M: Metric<Q>,
    {
        let mut results = self.search(query, radius);
        results.sort_by_key(|r| r.distance);
        results
    }

    /// Search with a signed radius. Negative radii are rejected rather than
    /// answered with an empty set; radii past `u32::MAX` are clamped.
    pub fn try_search<Q>(&self, query: &Q, radius: i64) -> Result<Vec<SearchResult<'_, T>>>
    where
        Q: ?Sized,
        T: Borrow<Q>,
        M: Metric<Q>,
    {
        if radius < 0 {
            return Err(BkIndexError::negative_radius(radius));
        }
        let radius = u32::try_from(radius).unwrap_or(u32::MAX);

        Ok(self.search(query, radius))
    }
}

impl<T, M> Extend<T> for BkTree<T, M>
where
    M: Metric<T>,
{
    fn extend<I: IntoIterator<Item = T>>(&mut self, items: I) {
        for item in items {
            self.insert(item);
        }
    }
}

impl<'a, T, M> IntoIterator for &'a BkTree<T, M> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
impl<T, M> BkTree<T, M>
where
    M: Metric<T>,
{
    fn check_validity_node(&self, node: &Node<T>) -> usize {
        let mut count = 1;
        for (&key, child) in node.children.iter() {
            let distance = self.metric.distance(&child.value, &node.value);
            assert!(
                distance == key,
                "child stored under key {} is at distance {}",
                key,
                distance
            );
            count += self.check_validity_node(child);
        }
        count
    }

    fn check_validity(&self) {
        let count = self
            .root
            .as_ref()
            .map(|root| self.check_validity_node(root))
            .unwrap_or(0);
        assert!(count == self.len, "reachable: {} != len: {}", count, self.len);
    }
}
