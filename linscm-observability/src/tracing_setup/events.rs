//! Structured events emitted when a stage completes.

pub fn covariance_computed(num_nodes: usize, nonzero_entries: usize, conditioned: bool) {
    tracing::info!(
        event = "covariance_computed",
        num_nodes = num_nodes,
        nonzero_entries = nonzero_entries,
        conditioned = conditioned,
        "covariance matrix computed"
    );
}

pub fn growth_computed(num_nodes: usize, nonzero_entries: usize) {
    tracing::info!(
        event = "growth_computed",
        num_nodes = num_nodes,
        nonzero_entries = nonzero_entries,
        "growth matrix computed"
    );
}

pub fn dataset_generated(num_nodes: usize, num_rows: usize) {
    tracing::info!(
        event = "dataset_generated",
        num_nodes = num_nodes,
        num_rows = num_rows,
        "synthetic dataset generated"
    );
}

/// A stage method was called before its prerequisite.
pub fn stage_out_of_order(operation: &str, required: &str) {
    tracing::warn!(
        event = "stage_out_of_order",
        operation = %operation,
        required = %required,
        "operation called before its prerequisite"
    );
}
