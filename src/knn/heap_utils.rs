//! This module contains utility structures for keeping the k nearest candidates seen during a scan.

use std::cmp::Ordering;
use std::collections::BinaryHeap;
use ordered_float::OrderedFloat; // For using f64 in BinaryHeap

/// Represents an element in the KBestNeighbors heap, pairing a distance with data.
///
/// `index` is the position of the candidate in the scanned collection and breaks
/// distance ties, so the earlier candidate always ranks closer.
#[derive(Debug)]
pub struct HeapElement<P> {
    pub distance: OrderedFloat<f64>,
    pub index: usize,
    pub data: P,
}

impl<P> PartialEq for HeapElement<P> {
    fn eq(&self, other: &Self) -> bool {
        self.distance == other.distance && self.index == other.index
    }
}
impl<P> Eq for HeapElement<P> {}

impl<P> PartialOrd for HeapElement<P> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<P> Ord for HeapElement<P> {
    fn cmp(&self, other: &Self) -> Ordering {
        // BinaryHeap is a max-heap: the farthest kept candidate sits on top.
        self.distance
            .cmp(&other.distance)
            .then_with(|| self.index.cmp(&other.index))
    }
}

/// Manages a collection of the K "best" (smallest distance) items seen so far.
#[derive(Debug)]
pub struct KBestNeighbors<P> {
    capacity: usize,
    heap: BinaryHeap<HeapElement<P>>,
}

impl<P> KBestNeighbors<P> {
    pub fn new(capacity: usize) -> Self {
        KBestNeighbors {
            capacity,
            heap: BinaryHeap::with_capacity(capacity + 1),
        }
    }

    pub fn add(&mut self, distance: f64, index: usize, point_data: P) {
        if self.capacity == 0 {
            return;
        }
        let item = HeapElement { distance: OrderedFloat(distance), index, data: point_data };
        if self.heap.len() < self.capacity {
            self.heap.push(item);
            return;
        }
        let replaces_farthest = self.heap.peek().is_some_and(|farthest| item < *farthest);
        if replaces_farthest {
            self.heap.pop();
            self.heap.push(item);
        }
    }

    /// Consumes the collection, returning `(distance, data)` pairs nearest first.
    pub fn into_sorted_vec(self) -> Vec<(f64, P)> {
        self.heap
            .into_sorted_vec()
            .into_iter()
            .map(|elem| (elem.distance.0, elem.data))
            .collect()
    }

    /// Returns the current number of neighbors stored.
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }
}
