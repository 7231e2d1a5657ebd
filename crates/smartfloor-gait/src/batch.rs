//! Batches of gait cycles and exact nearest-neighbor queries.

use smartfloor_core::Result;

use crate::analysis::GaitAnalysis;
use crate::cycles::GaitCycle;

/// One ranked result of a nearest-neighbor query.
#[derive(Debug, Clone, Copy)]
pub struct Neighbor<'a> {
    pub cycle: GaitCycle<'a>,
    pub distance: f64,
}

/// An ordered collection of gait cycles, possibly drawn from several
/// recordings, supporting name-based partitioning and exact k-nearest-
/// neighbor queries.
#[derive(Debug, Clone, Default)]
pub struct GaitCycleBatch<'a> {
    cycles: Vec<GaitCycle<'a>>,
}

impl<'a> GaitCycleBatch<'a> {
    pub fn new() -> Self {
        Self { cycles: Vec::new() }
    }

    /// Collect every cycle of every analysis, in recording order.
    pub fn from_analyses<I>(analyses: I) -> Self
    where
        I: IntoIterator<Item = &'a GaitAnalysis>,
    {
        let mut cycles = Vec::new();
        for analysis in analyses {
            cycles.extend(analysis.cycles());
        }
        Self { cycles }
    }

    pub fn push(&mut self, cycle: GaitCycle<'a>) {
        self.cycles.push(cycle);
    }

    pub fn cycles(&self) -> &[GaitCycle<'a>] {
        &self.cycles
    }

    pub fn len(&self) -> usize {
        self.cycles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cycles.is_empty()
    }

    /// Split the batch by a predicate over recording names, e.g. to
    /// separate one subject's cycles from the rest.
    pub fn partition<F>(&self, predicate: F) -> (Self, Self)
    where
        F: Fn(&str) -> bool,
    {
        let (matching, rest) = self
            .cycles
            .iter()
            .copied()
            .partition(|cycle| predicate(cycle.recording_name()));
        (Self { cycles: matching }, Self { cycles: rest })
    }

    /// The `k` cycles most similar to the query, in ascending distance
    /// order.
    ///
    /// Exact brute-force search: every reference cycle is compared against
    /// the query. Cycles without defined features are skipped, and a query
    /// without defined features matches nothing.
    pub fn nearest(&self, query: &GaitCycle<'_>, k: usize) -> Result<Vec<Neighbor<'a>>> {
        let query_features = match query.features()? {
            Some(features) => features,
            None => {
                tracing::debug!("query cycle has no defined features");
                return Ok(Vec::new());
            }
        };

        let mut ranked = Vec::with_capacity(self.cycles.len());
        for cycle in &self.cycles {
            let features = match cycle.features()? {
                Some(features) => features,
                None => {
                    tracing::debug!(
                        recording = cycle.recording_name(),
                        "skipped cycle with undefined features"
                    );
                    continue;
                }
            };
            if let Some(distance) = query_features.distance(&features) {
                ranked.push(Neighbor {
                    cycle: *cycle,
                    distance,
                });
            }
        }

        ranked.sort_by(|a, b| a.distance.total_cmp(&b.distance));
        ranked.truncate(k);
        Ok(ranked)
    }
}
