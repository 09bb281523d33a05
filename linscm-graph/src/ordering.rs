//! Topological ordering of the DAG arrows.
//!
//! Kahn's algorithm over a petgraph `DiGraph`, with ties broken by
//! declaration order so positions are stable for a given description.
//! Cycles are reported through Tarjan's SCC.

use std::cmp::Reverse;
use std::collections::{BTreeSet, BinaryHeap, HashMap, HashSet};

use linscm_core::errors::{GraphError, ScmResult};
use petgraph::algo::tarjan_scc;
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::Direction;

use crate::arrow::Arrow;

/// Order `nodes` so every DAG arrow points from an earlier to a later position.
pub fn topological_order(nodes: &[String], dag_arrows: &BTreeSet<Arrow>) -> ScmResult<Vec<String>> {
    let mut graph: DiGraph<&str, ()> = DiGraph::with_capacity(nodes.len(), dag_arrows.len());
    let mut index: HashMap<&str, NodeIndex> = HashMap::with_capacity(nodes.len());
    for name in nodes {
        index.insert(name.as_str(), graph.add_node(name.as_str()));
    }

    for arrow in dag_arrows {
        if arrow.is_self_loop() {
            return Err(GraphError::CycleDetected {
                path: format!("{0} -> {0}", arrow.parent),
            }
            .into());
        }
        let parent = lookup(&index, &arrow.parent)?;
        let child = lookup(&index, &arrow.child)?;
        graph.update_edge(parent, child, ());
    }

    let mut in_degree: Vec<usize> = graph
        .node_indices()
        .map(|idx| graph.neighbors_directed(idx, Direction::Incoming).count())
        .collect();

    let mut ready: BinaryHeap<Reverse<NodeIndex>> = graph
        .node_indices()
        .filter(|idx| in_degree[idx.index()] == 0)
        .map(Reverse)
        .collect();

    let mut order = Vec::with_capacity(nodes.len());
    while let Some(Reverse(idx)) = ready.pop() {
        order.push(graph[idx].to_string());
        for succ in graph.neighbors_directed(idx, Direction::Outgoing) {
            in_degree[succ.index()] -= 1;
            if in_degree[succ.index()] == 0 {
                ready.push(Reverse(succ));
            }
        }
    }

    if order.len() < nodes.len() {
        return Err(GraphError::CycleDetected {
            path: describe_cycle(&graph),
        }
        .into());
    }
    Ok(order)
}

fn lookup(index: &HashMap<&str, NodeIndex>, name: &str) -> ScmResult<NodeIndex> {
    index.get(name).copied().ok_or_else(|| {
        GraphError::UnknownNode {
            name: name.to_string(),
        }
        .into()
    })
}

/// Walk one strongly connected component until a node repeats.
fn describe_cycle(graph: &DiGraph<&str, ()>) -> String {
    let Some(scc) = tarjan_scc(graph).into_iter().find(|scc| scc.len() > 1) else {
        return "unknown".to_string();
    };
    let members: HashSet<NodeIndex> = scc.iter().copied().collect();

    let mut path = vec![scc[0]];
    while let Some(&last) = path.last() {
        let next = graph
            .neighbors_directed(last, Direction::Outgoing)
            .filter(|n| members.contains(n))
            .min();
        let Some(next) = next else { break };
        if let Some(pos) = path.iter().position(|&n| n == next) {
            path.drain(..pos);
            path.push(next);
            break;
        }
        path.push(next);
    }

    path.iter()
        .map(|&idx| graph[idx])
        .collect::<Vec<_>>()
        .join(" -> ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    fn arrows(list: &[(&str, &str)]) -> BTreeSet<Arrow> {
        list.iter().map(|&(p, c)| Arrow::new(p, c)).collect()
    }

    #[test]
    fn ties_follow_declaration_order() {
        let order = topological_order(&names(&["x", "y", "z"]), &BTreeSet::new()).unwrap();
        assert_eq!(order, names(&["x", "y", "z"]));
    }

    #[test]
    fn parents_precede_children() {
        let order = topological_order(
            &names(&["a", "b", "s", "n"]),
            &arrows(&[("a", "b"), ("a", "s"), ("n", "s"), ("n", "a"), ("n", "b")]),
        )
        .unwrap();
        assert_eq!(order, names(&["n", "a", "b", "s"]));
    }

    #[test]
    fn cycle_is_reported_as_path() {
        let err = topological_order(
            &names(&["a", "b", "c"]),
            &arrows(&[("a", "b"), ("b", "c"), ("c", "a")]),
        )
        .unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("cycle"), "{msg}");
        assert!(msg.contains("a") && msg.contains("b") && msg.contains("c"));
    }

    #[test]
    fn self_loop_is_a_cycle() {
        let err = topological_order(&names(&["a"]), &arrows(&[("a", "a")])).unwrap_err();
        assert!(err.to_string().contains("a -> a"));
    }

    #[test]
    fn undeclared_node_is_rejected() {
        let err = topological_order(&names(&["a"]), &arrows(&[("a", "ghost")])).unwrap_err();
        assert!(err.to_string().contains("ghost"));
    }
}
