//! A module for computing closeness centrality.

use std::collections::VecDeque;

/// Breadth-first search from `index`, returns the number of other nodes reached and the sum of
/// their distances.
fn closeness_for_node(index: usize, lists: &[Vec<usize>]) -> (usize, usize) {
    let num_nodes = lists.len();

    let mut queue: VecDeque<usize> = VecDeque::new();
    let mut deltas: Vec<Option<usize>> = vec![None; num_nodes];
    let mut reached = 0;
    let mut total_path_length = 0;

    deltas[index] = Some(0);
    queue.push_back(index);

    while let Some(current) = queue.pop_front() {
        let next = deltas[current].unwrap_or_default() + 1;

        for &j in &lists[current] {
            if deltas[j].is_none() {
                deltas[j] = Some(next);
                queue.push_back(j);
                reached += 1;
                total_path_length += next;
            }
        }
    }

    (reached, total_path_length)
}

/// Computes the closeness of every node: the reciprocal of the mean distance to the nodes it can
/// reach. Nodes reaching nothing score 0.
pub fn compute_closeness(lists: &[Vec<usize>]) -> Vec<f64> {
    (0..lists.len())
        .map(|index| match closeness_for_node(index, lists) {
            (_, 0) => 0.0,
            (reached, total) => reached as f64 / total as f64,
        })
        .collect()
}
