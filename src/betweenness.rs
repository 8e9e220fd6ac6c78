//! A module for computing betweenness centrality.

use std::collections::VecDeque;

/// this is an implementation of Ulrik Brandes's
/// A Faster Algorithm for Betweenness Centrality
/// http://snap.stanford.edu/class/cs224w-readings/brandes01centrality.pdf
/// page 10, "Algorithm 1: Betweenness centrality in unweighted graphs"
fn betweenness_for_node(index: usize, lists: &[Vec<usize>], betweenness_count: &mut [f64]) {
    let num_nodes = lists.len();

    let mut sigma: Vec<f64> = vec![0.0; num_nodes];
    let mut distance: Vec<Option<usize>> = vec![None; num_nodes];
    let mut predecessors: Vec<Vec<usize>> = vec![Vec::new(); num_nodes];
    let mut delta: Vec<f64> = vec![0.0; num_nodes];
    let mut queue: VecDeque<usize> = VecDeque::new();
    let mut stack: Vec<usize> = Vec::with_capacity(num_nodes);

    sigma[index] = 1.0;
    distance[index] = Some(0);
    queue.push_back(index);

    while let Some(v) = queue.pop_front() {
        stack.push(v);
        // Only visited nodes are ever queued.
        let next = distance[v].unwrap_or_default() + 1;

        for &w in &lists[v] {
            if distance[w].is_none() {
                distance[w] = Some(next);
                queue.push_back(w);
            }
            if distance[w] == Some(next) {
                sigma[w] += sigma[v];
                predecessors[w].push(v);
            }
        }
    }

    while let Some(w) = stack.pop() {
        for &v in &predecessors[w] {
            delta[v] += sigma[v] / sigma[w] * (1.0 + delta[w]);
        }
        if w != index {
            betweenness_count[w] += delta[w];
        }
    }
}

/// Computes the betweenness of every node from its neighbour lists.
///
/// Every pair gets counted from both ends, normalising by `(n - 1)(n - 2)` therefore yields the
/// fraction of shortest paths between other node pairs passing through each node.
pub fn compute_betweenness(lists: &[Vec<usize>]) -> Vec<f64> {
    let num_nodes = lists.len();
    let mut betweenness_count: Vec<f64> = vec![0.0; num_nodes];

    for index in 0..num_nodes {
        betweenness_for_node(index, lists, &mut betweenness_count);
    }

    // With fewer than three nodes nothing can lie between a pair, every count is still zero.
    if num_nodes > 2 {
        let divisor = ((num_nodes - 1) * (num_nodes - 2)) as f64;
        for count in &mut betweenness_count {
            *count /= divisor;
        }
    }

    betweenness_count
}
