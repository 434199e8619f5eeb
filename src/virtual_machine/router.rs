//! Shortest-hop routing over the live graph.
//!
//! Routes are recomputed from scratch on every query. The scheduler asks once
//! per thread per step, and any instruction executed earlier in the same step
//! may have changed the topology.

use crate::virtual_machine::graph::{Graph, NodeId};
use std::collections::{HashMap, VecDeque};

/// Nodes to visit after leaving the start, destination last.
pub type Route = Vec<NodeId>;

/// Finds a minimum-hop path from `start` to `destination`.
///
/// Returns `Some(vec![])` when `start == destination`, `None` when either node
/// is missing or no path exists in the current topology. Among several
/// shortest paths, any one may be returned.
pub fn find_route(graph: &Graph, start: NodeId, destination: NodeId) -> Option<Route> {
    if start == destination {
        return Some(Route::new());
    }
    if !graph.contains(start) || !graph.contains(destination) {
        return None;
    }

    // Unit edge costs make the cheapest frontier node the oldest one, so a FIFO
    // queue expands nodes in cost order.
    let mut parents: HashMap<NodeId, NodeId> = HashMap::from([(start, start)]);
    let mut frontier = VecDeque::from([start]);

    while let Some(node) = frontier.pop_front() {
        for neighbor in graph.neighbors(node) {
            if parents.contains_key(&neighbor) {
                continue;
            }
            parents.insert(neighbor, node);
            if neighbor == destination {
                return Some(unwind(&parents, start, destination));
            }
            frontier.push_back(neighbor);
        }
    }

    None
}

/// Walks the parent links back from `destination`, excluding `start`.
fn unwind(parents: &HashMap<NodeId, NodeId>, start: NodeId, destination: NodeId) -> Route {
    let mut route = vec![destination];
    let mut current = destination;
    while let Some(&parent) = parents.get(&current) {
        if parent == start {
            break;
        }
        route.push(parent);
        current = parent;
    }
    route.reverse();
    route
}
