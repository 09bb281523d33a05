use std::collections::{BTreeSet, HashMap, HashSet};

use linscm_core::errors::{GraphError, ScmResult};

use crate::arrow::Arrow;
use crate::builder::GraphBuilder;
use crate::parser;

/// An immutable causal graph with a fixed node ordering.
///
/// Invariants: `dag_arrows` and `fback_arrows` are disjoint, the DAG arrows
/// are acyclic, and every DAG arrow points from a lower to a higher position
/// in `ord_nodes`.
#[derive(Debug, Clone)]
pub struct Graph {
    ord_nodes: Vec<String>,
    positions: HashMap<String, usize>,
    dag_arrows: BTreeSet<Arrow>,
    fback_arrows: BTreeSet<Arrow>,
    amputated_arrows: BTreeSet<Arrow>,
    /// `(parent position, child position)` for fast mask lookups.
    dag_pairs: HashSet<(usize, usize)>,
    fback_pairs: HashSet<(usize, usize)>,
}

impl Graph {
    pub fn builder() -> GraphBuilder {
        GraphBuilder::new()
    }

    /// Build a graph from the minimal digraph description language.
    ///
    /// ```text
    /// digraph G {
    ///   a->b;
    ///   n->s,a,b;
    ///   b->a [color=green];
    /// }
    /// ```
    pub fn from_dot(source: &str) -> ScmResult<Self> {
        parser::parse(source)?.build()
    }

    pub(crate) fn from_parts(
        ord_nodes: Vec<String>,
        dag_arrows: BTreeSet<Arrow>,
        fback_arrows: BTreeSet<Arrow>,
        amputated_arrows: BTreeSet<Arrow>,
    ) -> Self {
        let positions: HashMap<String, usize> = ord_nodes
            .iter()
            .enumerate()
            .map(|(pos, name)| (name.clone(), pos))
            .collect();
        let pairs = |arrows: &BTreeSet<Arrow>| -> HashSet<(usize, usize)> {
            arrows
                .iter()
                .filter_map(|a| Some((*positions.get(&a.parent)?, *positions.get(&a.child)?)))
                .collect()
        };
        let dag_pairs = pairs(&dag_arrows);
        let fback_pairs = pairs(&fback_arrows);
        Self {
            ord_nodes,
            positions,
            dag_arrows,
            fback_arrows,
            amputated_arrows,
            dag_pairs,
            fback_pairs,
        }
    }

    pub fn num_nodes(&self) -> usize {
        self.ord_nodes.len()
    }

    /// Node names in position order.
    pub fn ord_nodes(&self) -> &[String] {
        &self.ord_nodes
    }

    pub fn node(&self, position: usize) -> Option<&str> {
        self.ord_nodes.get(position).map(String::as_str)
    }

    pub fn position(&self, name: &str) -> Option<usize> {
        self.positions.get(name).copied()
    }

    /// Like [`Graph::position`], but an unknown name is an error.
    pub fn require_position(&self, name: &str) -> ScmResult<usize> {
        self.position(name).ok_or_else(|| {
            GraphError::UnknownNode {
                name: name.to_string(),
            }
            .into()
        })
    }

    pub fn dag_arrows(&self) -> &BTreeSet<Arrow> {
        &self.dag_arrows
    }

    pub fn fback_arrows(&self) -> &BTreeSet<Arrow> {
        &self.fback_arrows
    }

    /// Arrows removed from the description before the model was built.
    pub fn amputated_arrows(&self) -> &BTreeSet<Arrow> {
        &self.amputated_arrows
    }

    /// All arrows of the model, DAG and feedback.
    pub fn arrows(&self) -> impl Iterator<Item = &Arrow> {
        self.dag_arrows.iter().chain(self.fback_arrows.iter())
    }

    pub fn is_feedback(&self) -> bool {
        !self.fback_arrows.is_empty()
    }

    /// Is there a same-slice arrow from the node at `parent` to the node at `child`?
    pub fn has_dag_arrow(&self, parent: usize, child: usize) -> bool {
        self.dag_pairs.contains(&(parent, child))
    }

    /// Is there a cross-slice arrow from the node at `parent` to the node at `child`?
    pub fn has_fback_arrow(&self, parent: usize, child: usize) -> bool {
        self.fback_pairs.contains(&(parent, child))
    }

    /// Arrows of the graph unrolled over `slices` time slices.
    ///
    /// Node `x` in slice `t` is named `x[t]`. DAG arrows stay inside a slice,
    /// feedback arrows connect slice `t` to slice `t + 1`.
    pub fn unrolled_arrows(&self, slices: usize) -> Vec<Arrow> {
        let mut out = Vec::new();
        for t in 0..slices {
            for arrow in &self.dag_arrows {
                out.push(Arrow::new(
                    format!("{}[{t}]", arrow.parent),
                    format!("{}[{t}]", arrow.child),
                ));
            }
            if t + 1 < slices {
                for arrow in &self.fback_arrows {
                    out.push(Arrow::new(
                        format!("{}[{t}]", arrow.parent),
                        format!("{}[{}]", arrow.child, t + 1),
                    ));
                }
            }
        }
        out
    }
}
