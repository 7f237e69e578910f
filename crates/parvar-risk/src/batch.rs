//! Parallel evaluation of independent VaR requests.

use parvar_core::{PriceSeries, RiskParameters, VarResult};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::var::{ParametricVar, VaRReport};

/// One independent VaR request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VaRRequest {
    /// Caller-supplied identifier, echoed in the result
    pub id: String,
    /// Price history for the request
    pub prices: PriceSeries,
    /// Risk parameters for the request
    pub params: RiskParameters,
}

impl VaRRequest {
    /// Creates a request.
    pub fn new(id: impl Into<String>, prices: PriceSeries, params: RiskParameters) -> Self {
        Self {
            id: id.into(),
            prices,
            params,
        }
    }
}

/// Outcome of one request in a batch.
#[derive(Debug, Clone)]
pub struct BatchResult {
    /// Identifier of the request
    pub id: String,
    /// Report, or the error that request failed with
    pub outcome: VarResult<VaRReport>,
}

/// Evaluates requests in parallel.
///
/// Results come back in request order. A failing request does not affect
/// the others.
pub fn evaluate_batch(requests: &[VaRRequest], estimator: &ParametricVar) -> Vec<BatchResult> {
    tracing::debug!(requests = requests.len(), "evaluating VaR batch");

    requests
        .par_iter()
        .map(|request| BatchResult {
            id: request.id.clone(),
            outcome: estimator.estimate(&request.prices, &request.params),
        })
        .collect()
}
