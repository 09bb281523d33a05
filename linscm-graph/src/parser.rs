//! Reader for the minimal digraph language graphs are described in.
//!
//! Only arrow lines matter: `parent->child1,child2;`, with one parent per
//! line. A line whose attributes mention `green` holds feedback arrows.
//! A bare `name;` line declares an isolated node. Everything else
//! (`digraph G {`, `}`, `rankdir=LR;`, `node [shape=box];`) is ignored.

use std::sync::LazyLock;

use linscm_core::constants::FEEDBACK_ARROW_MARKER;
use linscm_core::errors::{GraphError, ScmResult};
use regex::Regex;

use crate::builder::GraphBuilder;

static NODE_NAME: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_]+$").unwrap());

static NODE_DECL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"^"?([A-Za-z0-9_]+)"?\s*(\[[^\]]*\])?\s*;?$"#).unwrap());

const RESERVED: [&str; 4] = ["graph", "digraph", "node", "edge"];

/// Parse a description into a builder; call `build()` to order and validate it.
pub fn parse(source: &str) -> ScmResult<GraphBuilder> {
    let mut builder = GraphBuilder::new();

    for (idx, raw) in source.lines().enumerate() {
        let line_no = idx + 1;
        let line = raw.trim();

        let Some((lhs, rhs)) = line.split_once("->") else {
            if let Some(caps) = NODE_DECL.captures(line) {
                let name = &caps[1];
                if !RESERVED.contains(&name) {
                    builder = builder.node(name);
                }
            }
            continue;
        };

        let is_fback = line.contains(FEEDBACK_ARROW_MARKER);
        let parent = node_name(lhs, line_no)?;

        let targets = rhs.split(['[', ';']).next().unwrap_or_default();
        for child in targets.split(',') {
            let child = node_name(child, line_no)?;
            builder = if is_fback {
                builder.fback_arrow(parent.clone(), child)
            } else {
                builder.arrow(parent.clone(), child)
            };
        }
    }

    Ok(builder)
}

fn node_name(raw: &str, line: usize) -> ScmResult<String> {
    let name = raw.trim().trim_matches('"');
    if NODE_NAME.is_match(name) {
        Ok(name.to_string())
    } else {
        Err(GraphError::MalformedDescription {
            line,
            reason: format!("invalid node name {:?}", raw.trim()),
        }
        .into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_comma_separated_children() {
        let graph = parse("digraph G {\nn->s,a,b;\n}").unwrap().build().unwrap();
        assert_eq!(graph.num_nodes(), 4);
        assert_eq!(graph.dag_arrows().len(), 3);
    }

    #[test]
    fn green_lines_are_feedback_arrows() {
        let graph = parse("digraph G {\na->b;\nb->a [color=green];\n}")
            .unwrap()
            .build()
            .unwrap();
        assert_eq!(graph.dag_arrows().len(), 1);
        assert_eq!(graph.fback_arrows().len(), 1);
        assert!(graph.is_feedback());
    }

    #[test]
    fn quoted_names_are_unquoted() {
        let graph = parse("\"x\" -> \"y\";").unwrap().build().unwrap();
        assert_eq!(graph.ord_nodes(), ["x", "y"]);
    }

    #[test]
    fn bare_statement_declares_isolated_node() {
        let graph = parse("digraph G {\nlonely;\na->b;\nrankdir=LR;\n}")
            .unwrap()
            .build()
            .unwrap();
        assert_eq!(graph.num_nodes(), 3);
        assert!(graph.position("lonely").is_some());
        assert!(graph.position("digraph").is_none());
    }

    #[test]
    fn missing_child_is_malformed() {
        let err = parse("a->;").unwrap_err();
        assert!(err.to_string().contains("line 1"), "{err}");
    }

    #[test]
    fn last_line_without_semicolon_is_accepted() {
        let graph = parse("digraph G {\na->b\n}").unwrap().build().unwrap();
        assert_eq!(graph.dag_arrows().len(), 1);
    }
}
