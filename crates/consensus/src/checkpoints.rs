//! Hard-coded checkpoints and chain statistics at the last checkpoint.

use crate::hash::{hash256_from_hex, Hash256, HexError};

/// Signature checks cost roughly this much more than checkpointed blocks.
const SIGCHECK_VERIFICATION_FACTOR: f64 = 5.0;

const SECONDS_PER_DAY: f64 = 86_400.0;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Checkpoint {
    pub height: i32,
    pub hash: Hash256,
}

#[derive(Clone, Debug, PartialEq)]
pub struct CheckpointData {
    /// Ordered by strictly increasing height.
    pub checkpoints: Vec<Checkpoint>,
    /// UNIX timestamp of the last checkpoint block.
    pub last_checkpoint_time: i64,
    /// Total transactions between genesis and the last checkpoint.
    pub transactions_last_checkpoint: i64,
    /// Estimated transactions per day after the last checkpoint.
    pub transactions_per_day: f64,
}

impl CheckpointData {
    pub fn parse(
        entries: &[(i32, &str)],
        last_checkpoint_time: i64,
        transactions_last_checkpoint: i64,
        transactions_per_day: f64,
    ) -> Result<Self, HexError> {
        let checkpoints = entries
            .iter()
            .map(|(height, hash)| {
                Ok(Checkpoint {
                    height: *height,
                    hash: hash256_from_hex(hash)?,
                })
            })
            .collect::<Result<Vec<_>, HexError>>()?;
        Ok(Self {
            checkpoints,
            last_checkpoint_time,
            transactions_last_checkpoint,
            transactions_per_day,
        })
    }

    pub fn lookup(&self, height: i32) -> Option<&Hash256> {
        self.checkpoints
            .binary_search_by_key(&height, |checkpoint| checkpoint.height)
            .ok()
            .map(|index| &self.checkpoints[index].hash)
    }

    /// True when `hash` is acceptable at `height`: either no checkpoint pins
    /// that height or the pinned hash matches.
    pub fn check(&self, height: i32, hash: &Hash256) -> bool {
        self.lookup(height).map_or(true, |expected| expected == hash)
    }

    pub fn last_checkpoint(&self) -> Option<&Checkpoint> {
        self.checkpoints.last()
    }

    pub fn total_blocks_estimate(&self) -> i32 {
        self.last_checkpoint()
            .map(|checkpoint| checkpoint.height)
            .unwrap_or(0)
    }

    /// Rough fraction of total verification work done, for progress display
    /// only. `tip_chain_tx` is the cumulative transaction count at the tip.
    pub fn guess_verification_progress(
        &self,
        tip_chain_tx: i64,
        tip_time: i64,
        now: i64,
        sigchecks: bool,
    ) -> f64 {
        let factor = if sigchecks {
            SIGCHECK_VERIFICATION_FACTOR
        } else {
            1.0
        };

        let (work_before, work_after) = if tip_chain_tx <= self.transactions_last_checkpoint {
            let cheap_before = tip_chain_tx as f64;
            let cheap_after = (self.transactions_last_checkpoint - tip_chain_tx) as f64;
            let expensive_after = days_since(self.last_checkpoint_time, now)
                * self.transactions_per_day;
            (cheap_before, cheap_after + expensive_after * factor)
        } else {
            let cheap_before = self.transactions_last_checkpoint as f64;
            let expensive_before = (tip_chain_tx - self.transactions_last_checkpoint) as f64;
            let expensive_after = days_since(tip_time, now) * self.transactions_per_day;
            (
                cheap_before + expensive_before * factor,
                expensive_after * factor,
            )
        };

        let total = work_before + work_after;
        if total <= 0.0 {
            return 0.0;
        }
        work_before / total
    }
}

fn days_since(time: i64, now: i64) -> f64 {
    (now - time).max(0) as f64 / SECONDS_PER_DAY
}
