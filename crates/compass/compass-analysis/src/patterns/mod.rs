//! Pattern miner: sequential, contextual, and temporal passes over a bounded
//! trailing window of interactions.

mod contextual;
mod follow;
mod sequential;
mod temporal;

use std::collections::HashMap;

use compass_core::config::MiningConfig;
use compass_core::models::{Interaction, UsagePattern};

pub use follow::follow_probabilities;

/// Runs every mining pass with one configuration.
#[derive(Debug, Clone)]
pub struct PatternMiner {
    config: MiningConfig,
    usage_share: f64,
}

impl PatternMiner {
    /// `usage_share` is the fraction of a contextual group that must use a
    /// standard before it is recorded as a `standard_used` outcome.
    pub fn new(config: MiningConfig, usage_share: f64) -> Self {
        Self {
            config,
            usage_share,
        }
    }

    /// The trailing window the passes see.
    pub fn window<'a>(&self, interactions: &'a [Interaction]) -> &'a [Interaction] {
        let start = interactions.len().saturating_sub(self.config.window);
        &interactions[start..]
    }

    /// Mine all pattern kinds. Output is sorted by pattern id.
    pub fn mine(&self, interactions: &[Interaction]) -> Vec<UsagePattern> {
        let window = self.window(interactions);
        if window.is_empty() {
            return Vec::new();
        }

        let mut patterns = sequential::mine(window, self.config.sequential_min_frequency);
        patterns.extend(contextual::mine(
            window,
            self.config.contextual_min_group,
            self.usage_share,
        ));
        patterns.extend(temporal::mine(
            window,
            self.config.temporal_min_bucket,
            self.config.temporal_confidence,
        ));
        patterns.sort_by(|a, b| a.pattern_id.cmp(&b.pattern_id));

        tracing::debug!(
            window = window.len(),
            patterns = patterns.len(),
            "pattern mining finished"
        );
        patterns
    }
}

/// Counts from [`merge_patterns`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MergeStats {
    pub inserted: usize,
    pub replaced: usize,
}

/// Merge mined patterns into the pattern book, replacing by id.
///
/// Merging the same batch twice leaves the book unchanged. The book stays
/// sorted by id.
pub fn merge_patterns(book: &mut Vec<UsagePattern>, mined: Vec<UsagePattern>) -> MergeStats {
    let mut stats = MergeStats::default();
    let mut positions: HashMap<String, usize> = book
        .iter()
        .enumerate()
        .map(|(i, p)| (p.pattern_id.clone(), i))
        .collect();

    for pattern in mined {
        match positions.get(&pattern.pattern_id) {
            Some(&i) => {
                book[i] = pattern;
                stats.replaced += 1;
            }
            None => {
                positions.insert(pattern.pattern_id.clone(), book.len());
                book.push(pattern);
                stats.inserted += 1;
            }
        }
    }
    book.sort_by(|a, b| a.pattern_id.cmp(&b.pattern_id));
    stats
}
