use std::collections::{BTreeSet, HashSet};

use linscm_core::errors::{GraphError, ScmResult};
use tracing::debug;

use crate::arrow::Arrow;
use crate::graph::Graph;
use crate::ordering;

/// Collects nodes and arrows, then validates and orders them into a [`Graph`].
///
/// Nodes are declared implicitly by the arrows that mention them; the order
/// of first appearance breaks ties in the topological sort.
#[derive(Debug, Clone, Default)]
pub struct GraphBuilder {
    nodes: Vec<String>,
    seen: HashSet<String>,
    dag_arrows: Vec<Arrow>,
    fback_arrows: Vec<Arrow>,
    amputated: Vec<Arrow>,
}

impl GraphBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a node, possibly isolated.
    pub fn node(mut self, name: impl Into<String>) -> Self {
        self.declare(name.into());
        self
    }

    /// Add a same-slice arrow.
    pub fn arrow(mut self, parent: impl Into<String>, child: impl Into<String>) -> Self {
        let arrow = Arrow::new(parent, child);
        self.declare(arrow.parent.clone());
        self.declare(arrow.child.clone());
        self.dag_arrows.push(arrow);
        self
    }

    /// Add a cross-slice (feedback) arrow.
    pub fn fback_arrow(mut self, parent: impl Into<String>, child: impl Into<String>) -> Self {
        let arrow = Arrow::new(parent, child);
        self.declare(arrow.parent.clone());
        self.declare(arrow.child.clone());
        self.fback_arrows.push(arrow);
        self
    }

    /// Remove an arrow from the model, e.g. to represent an intervention.
    pub fn amputate(mut self, parent: impl Into<String>, child: impl Into<String>) -> Self {
        self.amputated.push(Arrow::new(parent, child));
        self
    }

    fn declare(&mut self, name: String) {
        if self.seen.insert(name.clone()) {
            self.nodes.push(name);
        }
    }

    pub fn build(self) -> ScmResult<Graph> {
        let mut dag: BTreeSet<Arrow> = self.dag_arrows.into_iter().collect();
        let mut fback: BTreeSet<Arrow> = self.fback_arrows.into_iter().collect();

        if let Some(shared) = dag.intersection(&fback).next() {
            return Err(GraphError::OverlappingArrow {
                parent: shared.parent.clone(),
                child: shared.child.clone(),
            }
            .into());
        }

        let mut amputated = BTreeSet::new();
        for arrow in self.amputated {
            if !dag.remove(&arrow) && !fback.remove(&arrow) {
                return Err(GraphError::UnknownArrow {
                    parent: arrow.parent,
                    child: arrow.child,
                }
                .into());
            }
            amputated.insert(arrow);
        }

        let ord_nodes = ordering::topological_order(&self.nodes, &dag)?;

        debug!(
            nodes = ord_nodes.len(),
            dag_arrows = dag.len(),
            fback_arrows = fback.len(),
            amputated = amputated.len(),
            "graph built"
        );

        Ok(Graph::from_parts(ord_nodes, dag, fback, amputated))
    }
}
