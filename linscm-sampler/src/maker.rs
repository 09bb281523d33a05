//! Synthetic datasets for DAG models.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use std::sync::Arc;

use linscm_core::config::SamplerConfig;
use linscm_core::errors::{ScmError, ScmResult};
use linscm_graph::Graph;
use linscm_observability::sampling_span;
use linscm_observability::tracing_setup::events;
use nalgebra::{DMatrix, DVector};
use rand::distributions::Uniform;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::Normal;
use tracing::debug;

use crate::numeric::numeric_cov_mat;

/// Draws rows of node values from a linear SCM with numeric gains.
///
/// Node `i` is `eps_i + sum_{j < i} alpha[i, j] x_j`, with
/// `eps_i ~ Normal(noise_mean, sigma_eps[i])`. Only the strictly lower
/// triangle of the gain matrix is used, so feedback arrows play no part.
#[derive(Debug)]
pub struct RandomDataMaker {
    graph: Arc<Graph>,
    sigma_eps: Vec<f64>,
    alpha_mat: DMatrix<f64>,
    noise: Vec<Normal<f64>>,
    rng: StdRng,
    /// Row count used by the `configured` generators.
    num_rows: usize,
}

impl RandomDataMaker {
    /// Random gains on every DAG arrow.
    pub fn new(graph: Arc<Graph>, sigma_eps: Vec<f64>, config: &SamplerConfig) -> ScmResult<Self> {
        let mut rng = seeded_rng(config);
        let alpha_mat = Self::generate_random_gains(&graph, config.alpha_bound, &mut rng)?;
        Self::build(graph, sigma_eps, alpha_mat, config, rng)
    }

    /// Caller-supplied gains.
    pub fn with_gains(
        graph: Arc<Graph>,
        sigma_eps: Vec<f64>,
        alpha_mat: DMatrix<f64>,
        config: &SamplerConfig,
    ) -> ScmResult<Self> {
        let dim = graph.num_nodes();
        for actual in [alpha_mat.nrows(), alpha_mat.ncols()] {
            if actual != dim {
                return Err(ScmError::DimensionMismatch {
                    expected: dim,
                    actual,
                });
            }
        }
        let rng = seeded_rng(config);
        Self::build(graph, sigma_eps, alpha_mat, config, rng)
    }

    fn build(
        graph: Arc<Graph>,
        sigma_eps: Vec<f64>,
        alpha_mat: DMatrix<f64>,
        config: &SamplerConfig,
        rng: StdRng,
    ) -> ScmResult<Self> {
        if sigma_eps.len() != graph.num_nodes() {
            return Err(ScmError::DimensionMismatch {
                expected: graph.num_nodes(),
                actual: sigma_eps.len(),
            });
        }
        if !config.noise_mean.is_finite() {
            return Err(invalid("noise_mean", format!("must be finite, got {}", config.noise_mean)));
        }
        let noise = sigma_eps
            .iter()
            .enumerate()
            .map(|(i, &sigma)| {
                if !sigma.is_finite() {
                    return Err(invalid("sigma_eps", format!("entry {i} is {sigma}")));
                }
                Normal::new(config.noise_mean, sigma)
                    .map_err(|e| invalid("sigma_eps", format!("entry {i}: {e}")))
            })
            .collect::<ScmResult<Vec<_>>>()?;

        Ok(Self {
            graph,
            sigma_eps,
            alpha_mat,
            noise,
            rng,
            num_rows: config.num_rows,
        })
    }

    /// Gains uniform in `[-alpha_bound, alpha_bound]` wherever a DAG arrow
    /// `node(col) -> node(row)` exists with `row > col`, zero elsewhere.
    pub fn generate_random_gains<R: Rng>(
        graph: &Graph,
        alpha_bound: f64,
        rng: &mut R,
    ) -> ScmResult<DMatrix<f64>> {
        if !(alpha_bound.is_finite() && alpha_bound > 0.0) {
            return Err(invalid("alpha_bound", format!("must be positive, got {alpha_bound}")));
        }
        let dim = graph.num_nodes();
        let uniform = Uniform::new_inclusive(-alpha_bound, alpha_bound);
        let mut alpha = DMatrix::zeros(dim, dim);
        for row in 0..dim {
            for col in 0..row {
                if graph.has_dag_arrow(col, row) {
                    alpha[(row, col)] = rng.sample(&uniform);
                }
            }
        }
        Ok(alpha)
    }

    pub fn graph(&self) -> &Arc<Graph> {
        &self.graph
    }

    pub fn alpha_mat(&self) -> &DMatrix<f64> {
        &self.alpha_mat
    }

    pub fn sigma_eps(&self) -> &[f64] {
        &self.sigma_eps
    }

    pub fn num_rows(&self) -> usize {
        self.num_rows
    }

    /// One row of node values, in node order.
    pub fn generate_one_random_instance(&mut self) -> DVector<f64> {
        let dim = self.graph.num_nodes();
        let mut values = DVector::zeros(dim);
        for i in 0..dim {
            let mut value = self.rng.sample(&self.noise[i]);
            for j in 0..i {
                value += self.alpha_mat[(i, j)] * values[j];
            }
            values[i] = value;
        }
        values
    }

    /// `num_rows x num_nodes` matrix of samples.
    pub fn generate_dataset(&mut self, num_rows: usize) -> DMatrix<f64> {
        let dim = self.graph.num_nodes();
        let _span = sampling_span!(dim, num_rows).entered();
        let mut data = DMatrix::zeros(num_rows, dim);
        for r in 0..num_rows {
            let row = self.generate_one_random_instance();
            data.set_row(r, &row.transpose());
        }
        events::dataset_generated(dim, num_rows);
        data
    }

    /// CSV with a header of node names and one sampled row per line.
    pub fn write_csv<W: Write>(&mut self, num_rows: usize, writer: W) -> ScmResult<()> {
        let data = self.generate_dataset(num_rows);
        let mut wtr = csv::Writer::from_writer(writer);
        wtr.write_record(self.graph.ord_nodes()).map_err(std::io::Error::from)?;
        for row in data.row_iter() {
            wtr.write_record(row.iter().map(|v| v.to_string()))
                .map_err(std::io::Error::from)?;
        }
        wtr.flush()?;
        Ok(())
    }

    pub fn generate_dataset_csv(
        &mut self,
        num_rows: usize,
        path: impl AsRef<Path>,
    ) -> ScmResult<()> {
        let path = path.as_ref();
        let file = File::create(path)?;
        self.write_csv(num_rows, BufWriter::new(file))?;
        debug!(path = %path.display(), num_rows, "dataset written");
        Ok(())
    }

    /// [`Self::generate_dataset`] with the configured `num_rows`.
    pub fn generate_configured_dataset(&mut self) -> DMatrix<f64> {
        self.generate_dataset(self.num_rows)
    }

    /// [`Self::generate_dataset_csv`] with the configured `num_rows`.
    pub fn generate_configured_dataset_csv(&mut self, path: impl AsRef<Path>) -> ScmResult<()> {
        self.generate_dataset_csv(self.num_rows, path)
    }

    /// Covariance the sampled rows converge to.
    pub fn numeric_cov_mat(&self) -> ScmResult<DMatrix<f64>> {
        let lower =
            self.alpha_mat.lower_triangle() - DMatrix::from_diagonal(&self.alpha_mat.diagonal());
        numeric_cov_mat(&lower, &self.sigma_eps)
    }
}

fn seeded_rng(config: &SamplerConfig) -> StdRng {
    match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}

fn invalid(name: &str, reason: String) -> ScmError {
    ScmError::InvalidParameter {
        name: name.to_string(),
        reason,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chain() -> Arc<Graph> {
        Arc::new(Graph::from_dot("digraph G {\na->b;\n}").unwrap())
    }

    fn seeded(seed: u64) -> SamplerConfig {
        SamplerConfig {
            seed: Some(seed),
            ..SamplerConfig::default()
        }
    }

    #[test]
    fn random_gains_respect_bound_and_arrows() {
        let graph = Graph::from_dot("digraph G {\na->b;\na->s;\nn->s,a,b;\n}").unwrap();
        let mut rng = StdRng::seed_from_u64(7);
        let alpha = RandomDataMaker::generate_random_gains(&graph, 0.5, &mut rng).unwrap();
        assert_eq!(alpha[(3, 2)], 0.0);
        for r in 0..4 {
            for c in 0..4 {
                assert!(alpha[(r, c)].abs() <= 0.5);
                if r <= c {
                    assert_eq!(alpha[(r, c)], 0.0);
                }
            }
        }
    }

    #[test]
    fn non_positive_bound_is_rejected() {
        let mut rng = StdRng::seed_from_u64(0);
        for bound in [0.0, -1.0, f64::NAN] {
            assert!(RandomDataMaker::generate_random_gains(&chain(), bound, &mut rng).is_err());
        }
    }

    #[test]
    fn sigma_length_must_match_nodes() {
        let err = RandomDataMaker::new(chain(), vec![1.0], &seeded(1)).unwrap_err();
        assert!(matches!(err, ScmError::DimensionMismatch { expected: 2, actual: 1 }));
    }

    #[test]
    fn negative_sigma_is_rejected() {
        let err = RandomDataMaker::new(chain(), vec![1.0, -1.0], &seeded(1)).unwrap_err();
        assert!(matches!(err, ScmError::InvalidParameter { .. }));
    }

    #[test]
    fn same_seed_same_dataset() {
        let mut a = RandomDataMaker::new(chain(), vec![1.0, 2.0], &seeded(42)).unwrap();
        let mut b = RandomDataMaker::new(chain(), vec![1.0, 2.0], &seeded(42)).unwrap();
        assert_eq!(a.alpha_mat(), b.alpha_mat());
        assert_eq!(a.generate_dataset(5), b.generate_dataset(5));
    }

    #[test]
    fn configured_dataset_uses_config_row_count() {
        let config = SamplerConfig {
            num_rows: 7,
            ..seeded(5)
        };
        let mut maker = RandomDataMaker::new(chain(), vec![1.0, 1.0], &config).unwrap();
        assert_eq!(maker.num_rows(), 7);
        let data = maker.generate_configured_dataset();
        assert_eq!(data.shape(), (7, 2));
    }
}
