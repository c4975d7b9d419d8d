use std::collections::{BTreeMap, BTreeSet};

use compass_core::models::Interaction;

/// Follow probabilities from per-session load sequences.
///
/// `P(y | x)` is the share of sessions containing `x` in which `y` is loaded
/// later in the same session. Each item keeps its `limit` most likely
/// followers (ties by id). Interactions without a session id are ignored.
pub fn follow_probabilities(
    interactions: &[Interaction],
    limit: usize,
) -> BTreeMap<String, BTreeMap<String, f64>> {
    let mut sessions: BTreeMap<&str, Vec<&str>> = BTreeMap::new();
    for interaction in interactions.iter().filter(|i| !i.session_id.is_empty()) {
        sessions
            .entry(interaction.session_id.as_str())
            .or_default()
            .extend(interaction.standards.iter().map(String::as_str));
    }

    let mut seen_in: BTreeMap<&str, usize> = BTreeMap::new();
    let mut followed: BTreeMap<&str, BTreeMap<&str, usize>> = BTreeMap::new();
    for loads in sessions.values() {
        let mut counted: BTreeSet<(&str, &str)> = BTreeSet::new();
        let mut firsts: BTreeSet<&str> = BTreeSet::new();
        for (i, &item) in loads.iter().enumerate() {
            if firsts.insert(item) {
                *seen_in.entry(item).or_default() += 1;
            }
            for &next in &loads[i + 1..] {
                if next != item && counted.insert((item, next)) {
                    *followed.entry(item).or_default().entry(next).or_default() += 1;
                }
            }
        }
    }

    followed
        .into_iter()
        .filter_map(|(item, nexts)| {
            let base = *seen_in.get(item)? as f64;
            let mut ranked: Vec<(&str, f64)> = nexts
                .into_iter()
                .map(|(next, count)| (next, count as f64 / base))
                .collect();
            ranked.sort_by(|a, b| {
                b.1.partial_cmp(&a.1)
                    .unwrap_or(std::cmp::Ordering::Equal)
                    .then_with(|| a.0.cmp(b.0))
            });
            ranked.truncate(limit);
            let table = ranked
                .into_iter()
                .map(|(next, p)| (next.to_string(), p.min(1.0)))
                .collect::<BTreeMap<_, _>>();
            (!table.is_empty()).then(|| (item.to_string(), table))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session(id: &str, loads: &[&str]) -> Vec<Interaction> {
        loads
            .iter()
            .map(|s| {
                let mut i = Interaction::new("load");
                i.session_id = id.to_string();
                i.standards = vec![s.to_string()];
                i
            })
            .collect()
    }

    #[test]
    fn probability_is_share_of_sessions() {
        let mut history = session("s1", &["a", "b"]);
        history.extend(session("s2", &["a", "c"]));
        history.extend(session("s3", &["a", "b", "b"]));
        history.extend(session("s4", &["b", "a"]));

        let probs = follow_probabilities(&history, 10);
        assert!((probs["a"]["b"] - 0.5).abs() < 1e-12);
        assert!((probs["a"]["c"] - 0.25).abs() < 1e-12);
        assert!((probs["b"]["a"] - 1.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn followers_are_truncated_to_limit() {
        let history = session("s1", &["a", "b", "c", "d"]);
        let probs = follow_probabilities(&history, 2);
        let followers: Vec<&String> = probs["a"].keys().collect();
        assert_eq!(followers, vec!["b", "c"]);
    }
}
