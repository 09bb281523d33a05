/// Graph construction errors.
#[derive(Debug, thiserror::Error)]
pub enum GraphError {
    #[error("cycle detected among DAG arrows: {path}")]
    CycleDetected { path: String },

    #[error("unknown node: {name}")]
    UnknownNode { name: String },

    #[error("unknown arrow: {parent} -> {child}")]
    UnknownArrow { parent: String, child: String },

    #[error("arrow {parent} -> {child} is both a DAG arrow and a feedback arrow")]
    OverlappingArrow { parent: String, child: String },

    #[error("malformed graph description at line {line}: {reason}")]
    MalformedDescription { line: usize, reason: String },
}
