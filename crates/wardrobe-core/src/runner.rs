//! Pipeline Runner: chains stages, checks boundaries and records a trace
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::candidate::CandidateSet;
use crate::error::WardrobeError;
use crate::stage::{Stage, StageEnv, StageError};

/// What one stage did to the candidate set
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StageTrace {
    pub id: String,
    pub in_hash: String,
    pub out_hash: String,
    pub in_count: usize,
    pub out_count: usize,
    pub deterministic: bool,
    pub latency_us: u64,
}

pub struct PipelineRunner {
    stages: Vec<Box<dyn Stage>>,
    pipeline_id: String,
}

impl PipelineRunner {
    pub fn new(stages: Vec<Box<dyn Stage>>) -> Self {
        let pipeline_id = stages
            .iter()
            .map(|s| s.id().split('.').next().unwrap_or("?"))
            .collect::<Vec<_>>()
            .join("→");

        Self { stages, pipeline_id }
    }

    pub fn run(
        &self,
        input: CandidateSet,
        env: &mut StageEnv<'_>,
    ) -> Result<(CandidateSet, Vec<StageTrace>), WardrobeError> {
        let mut current = input;
        let mut traces = Vec::with_capacity(self.stages.len());

        for stage in &self.stages {
            let start = Instant::now();
            let in_hash = current.fingerprint();
            let in_count = current.len();

            let result = stage.run(current, env)?;

            if let Some(item_id) = result.find_duplicate_id() {
                return Err(StageError::DuplicateItem {
                    stage: stage.id().to_string(),
                    item_id,
                }
                .into());
            }

            let trace = StageTrace {
                id: stage.id().to_string(),
                in_hash,
                out_hash: result.fingerprint(),
                in_count,
                out_count: result.len(),
                deterministic: stage.deterministic(),
                latency_us: start.elapsed().as_micros() as u64,
            };
            tracing::debug!(
                stage = %trace.id,
                in_count = trace.in_count,
                out_count = trace.out_count,
                "stage complete"
            );
            traces.push(trace);

            current = result;
        }

        Ok((current, traces))
    }

    pub fn pipeline_id(&self) -> &str {
        &self.pipeline_id
    }

    pub fn len(&self) -> usize {
        self.stages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }
}
