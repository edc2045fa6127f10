use crate::{BkTree, Metric, Node};
use std::{borrow::Borrow, collections::VecDeque};

/// A stored value within the search radius, with its distance to the query.
#[derive(Debug, PartialEq, Eq, Hash)]
pub struct SearchResult<'a, T> {
    pub distance: u32,
    pub value: &'a T,
}

impl<'a, T> Clone for SearchResult<'a, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<'a, T> Copy for SearchResult<'a, T> {}

/// Breadth-first range query over a [`BkTree`].
///
/// Each visited node costs one metric evaluation. A child stored under key
/// `k` is only queued when `dist - radius <= k <= dist + radius`, where
/// `dist` is the query's distance to the parent; by the triangle inequality
/// no match can hide under any other key.
pub struct Find<'a, 'q, T, M, Q: ?Sized> {
    query: &'q Q,
    radius: u32,
    metric: &'a M,
    candidates: VecDeque<&'a Node<T>>,
    evaluations: usize,
}

impl<'a, 'q, T, M, Q> Find<'a, 'q, T, M, Q>
where
    Q: ?Sized,
    T: Borrow<Q>,
    M: Metric<Q>,
{
    pub(crate) fn new(tree: &'a BkTree<T, M>, query: &'q Q, radius: u32) -> Self {
        let mut candidates = VecDeque::new();
        if let Some(root) = tree.root.as_ref() {
            candidates.push_back(root);
        }

        Find {
            query,
            radius,
            metric: &tree.metric,
            candidates,
            evaluations: 0,
        }
    }

    /// Number of metric evaluations performed so far.
    pub fn evaluations(&self) -> usize {
        self.evaluations
    }
}

impl<'a, 'q, T, M, Q> Iterator for Find<'a, 'q, T, M, Q>
where
    Q: ?Sized,
    T: Borrow<Q>,
    M: Metric<Q>,
{
    type Item = SearchResult<'a, T>;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(node) = self.candidates.pop_front() {
            let dist = self.metric.distance(self.query, node.value.borrow());
            self.evaluations += 1;

            // keys are never negative, so clamping the low end loses nothing
            let low = dist.saturating_sub(self.radius);
            let high = dist.saturating_add(self.radius);
            for (&key, child) in node.children.iter() {
                if low <= key && key <= high {
                    self.candidates.push_back(child);
                }
            }

            if dist <= self.radius {
                return Some(SearchResult {
                    distance: dist,
                    value: &node.value,
                });
            }
        }

        None
    }
}

/// Every value stored in a [`BkTree`], in no particular order.
pub struct Iter<'a, T> {
    stack: Vec<&'a Node<T>>,
    remaining: usize,
}

impl<'a, T> Iter<'a, T> {
    pub(crate) fn new<M>(tree: &'a BkTree<T, M>) -> Self {
        Iter {
            stack: tree.root.iter().collect(),
            remaining: tree.len(),
        }
    }
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.stack.extend(node.children.values());
        self.remaining -= 1;
        Some(&node.value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<'a, T> ExactSizeIterator for Iter<'a, T> {}
