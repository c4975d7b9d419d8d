//! Built-in action handlers.

use std::collections::BTreeSet;

use compass_core::constants::MAX_COMPRESSION_LEVEL;
use compass_core::errors::{CompassError, CompassResult};
use compass_core::models::{ExperienceLevel, RecommendedAction};

use super::ActionContext;

fn required_target<'a>(action: &'a RecommendedAction) -> CompassResult<&'a str> {
    action
        .target
        .as_deref()
        .filter(|t| !t.trim().is_empty())
        .ok_or_else(|| CompassError::InvalidInput {
            reason: format!("{} needs a target", action.action),
        })
}

/// Raise every cached entry's priority by one.
pub(super) fn boost_cache_priority(
    ctx: &mut ActionContext<'_>,
    _action: &RecommendedAction,
) -> CompassResult<usize> {
    ctx.cache.shift_priorities(1);
    Ok(ctx.cache.len())
}

/// Raise the compression floor one level above the current effective level.
pub(super) fn tighten_compression(
    ctx: &mut ActionContext<'_>,
    _action: &RecommendedAction,
) -> CompassResult<usize> {
    let current = ctx
        .priors
        .compression_floor
        .max(ctx.config.loading.compression_level);
    let next = current.saturating_add(1).min(MAX_COMPRESSION_LEVEL);
    if next == ctx.priors.compression_floor {
        return Ok(0);
    }
    ctx.priors.compression_floor = next;
    Ok(1)
}

/// Halve the preload candidate cap, never below one.
pub(super) fn limit_preload(
    ctx: &mut ActionContext<'_>,
    _action: &RecommendedAction,
) -> CompassResult<usize> {
    let current = ctx
        .priors
        .preload_limit
        .unwrap_or(ctx.config.cache.max_preload_candidates);
    let next = (current / 2).max(1);
    if ctx.priors.preload_limit == Some(next) {
        return Ok(0);
    }
    ctx.priors.preload_limit = Some(next);
    Ok(1)
}

/// Cap priority items for the target experience level at half the
/// configured maximum.
pub(super) fn simplify_for_level(
    ctx: &mut ActionContext<'_>,
    action: &RecommendedAction,
) -> CompassResult<usize> {
    let level = ExperienceLevel::from(required_target(action)?.to_string());
    let limit = (ctx.config.loading.max_priority_items / 2).max(1);
    let previous = ctx.priors.level_item_limits.insert(level, limit);
    Ok(usize::from(previous != Some(limit)))
}

/// Lower the success rate of every standard used for the target task type.
pub(super) fn demote_task_standards(
    ctx: &mut ActionContext<'_>,
    action: &RecommendedAction,
) -> CompassResult<usize> {
    let task = required_target(action)?;
    let used: BTreeSet<&str> = ctx
        .interactions
        .iter()
        .filter(|i| i.task_type.as_deref() == Some(task))
        .flat_map(|i| i.standards.iter().map(String::as_str))
        .collect();

    let delta = ctx.config.graph.feedback_delta;
    let mut changed = 0;
    for id in used {
        if ctx.graph.contains(id) {
            ctx.graph.adjust_success_rate(id, -delta)?;
            changed += 1;
        }
    }
    Ok(changed)
}

/// Lower the success rate of one node with net-negative feedback.
pub(super) fn demote_negative_feedback_target(
    ctx: &mut ActionContext<'_>,
    action: &RecommendedAction,
) -> CompassResult<usize> {
    let id = required_target(action)?;
    if !ctx.graph.contains(id) {
        tracing::debug!(node_id = id, "negative feedback target not in graph");
        return Ok(0);
    }
    ctx.graph
        .adjust_success_rate(id, -ctx.config.graph.feedback_delta)?;
    Ok(1)
}

/// No state change; surfaces the error-rate insight in the logs.
pub(super) fn flag_error_investigation(
    _ctx: &mut ActionContext<'_>,
    action: &RecommendedAction,
) -> CompassResult<usize> {
    tracing::warn!(target_item = ?action.target, "error rate flagged for investigation");
    Ok(0)
}
