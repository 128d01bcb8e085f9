//! Per-date candidate sanitization: group-size requirements, meeting-value
//! thresholds, and exact conflict resolution over small clusters.
//!
//! Removing one candidate can invalidate another on either axis, so
//! [`sanitize_date`] re-applies the size and value passes until a full pass
//! removes nobody.

use std::collections::{BTreeSet, HashMap, VecDeque};

use chrono::NaiveDate;
use rand::Rng;

use crate::types::{AttendanceHistory, ParticipantPreference};

/// The exact conflict search explores at most this many nodes per cluster.
/// Beyond it, clusters are consumed frontier by frontier — a pragmatic bound
/// that keeps the memoized state space at `2^7`.
pub const CONFLICT_DEPTH_CAP: usize = 7;

/// Historical-value ceiling, so "never attended" (epoch sentinel) stays a
/// large but bounded priority.
const NEVER_ATTENDED_CAP_DAYS: i64 = 36_500;

/// Remove candidates whose minimal group size cannot be met on this date.
///
/// Candidates are checked in descending order of their requirement while a
/// running pool size shrinks with each removal. A single ordered pass is
/// enough: removing a high-threshold candidate can only invalidate
/// candidates with equal or lower thresholds, which are checked later.
/// Survivors keep their original relative order.
pub fn sanitize_size(candidates: &mut Vec<usize>, preferences: &[ParticipantPreference]) {
    let mut by_requirement = candidates.clone();
    by_requirement
        .sort_by(|a, b| preferences[*b].min_group_size.cmp(&preferences[*a].min_group_size));

    let mut current_size = candidates.len() as u32;
    let mut removed = BTreeSet::new();
    for &candidate in &by_requirement {
        if preferences[candidate].min_group_size > current_size {
            removed.insert(candidate);
            current_size -= 1;
        }
    }
    candidates.retain(|c| !removed.contains(c));
}

/// Remove candidates whose meeting-value threshold cannot be met, resolving
/// repairable conflicts through an exact search over the conflict graph.
///
/// For each candidate the meeting value is 1 (the self term) plus their
/// configured or default weight toward every other candidate present.
/// A candidate below threshold is either *unresolvable* (still below after
/// dropping every negative contributor — removed unconditionally) or has a
/// *conflict set*: the minimal prefix of their most negative contributors
/// whose removal restores the threshold. Equal weights are ordered randomly
/// so no name is systematically sacrificed first.
///
/// `date` anchors the historical value used by the conflict search;
/// `histories` is indexed like `preferences`.
pub fn sanitize_value<R: Rng>(
    candidates: &mut Vec<usize>,
    preferences: &[ParticipantPreference],
    histories: &[AttendanceHistory],
    date: NaiveDate,
    rng: &mut R,
) {
    let mut unresolvable: BTreeSet<usize> = BTreeSet::new();
    let mut conflict_sets: Vec<(usize, Vec<usize>)> = Vec::new();

    for &p in candidates.iter() {
        let overrides = preferences[p].weight_overrides();
        let threshold = preferences[p].min_meeting_value;

        let mut total: i64 = 1;
        let mut negative: Vec<(usize, i64)> = Vec::new();
        for &q in candidates.iter() {
            if q == p {
                continue;
            }
            let weight = overrides
                .get(preferences[q].name.as_str())
                .copied()
                .unwrap_or(1);
            total += weight;
            if weight < 0 {
                negative.push((q, weight));
            }
        }

        if total >= threshold {
            continue;
        }
        let worst_case = total - negative.iter().map(|(_, w)| w).sum::<i64>();
        if worst_case < threshold {
            // Even removing every detractor cannot restore the threshold.
            unresolvable.insert(p);
            continue;
        }

        // Most negative first; equal weights in random order. The cached
        // key matters: a fresh random key per comparison would make the
        // ordering inconsistent.
        negative.sort_by_cached_key(|&(_, weight)| (weight, rng.random::<u64>()));
        let mut recovered = total;
        let mut conflict_set = Vec::new();
        for (q, weight) in negative {
            if recovered >= threshold {
                break;
            }
            recovered -= weight;
            conflict_set.push(q);
        }
        conflict_sets.push((p, conflict_set));
    }

    // Undirected conflict graph: a participant is tied to everyone whose
    // removal their threshold demands. Unresolvables are out regardless.
    let mut adjacency: HashMap<usize, BTreeSet<usize>> = HashMap::new();
    for (p, conflict_set) in &conflict_sets {
        for q in conflict_set {
            if unresolvable.contains(q) {
                continue;
            }
            adjacency.entry(*p).or_default().insert(*q);
            adjacency.entry(*q).or_default().insert(*p);
        }
    }

    let mut removed = unresolvable;
    let nodes: BTreeSet<usize> = adjacency.keys().copied().collect();
    let mut visited: BTreeSet<usize> = BTreeSet::new();
    for &start in &nodes {
        if visited.contains(&start) {
            continue;
        }
        // BFS in index order keeps the component ordering stable across runs.
        let mut component = Vec::new();
        let mut queue = VecDeque::from([start]);
        visited.insert(start);
        while let Some(node) = queue.pop_front() {
            component.push(node);
            for &next in &adjacency[&node] {
                if visited.insert(next) {
                    queue.push_back(next);
                }
            }
        }
        for frontier in component.chunks(CONFLICT_DEPTH_CAP) {
            let kept = select_optimal_subset(frontier, &adjacency, histories, date);
            for &node in frontier {
                if !kept.contains(&node) {
                    removed.insert(node);
                }
            }
        }
    }

    candidates.retain(|c| !removed.contains(c));
}

/// Run size and value sanitization to a fixed point.
///
/// Each re-application only runs because the previous pass removed someone,
/// so the loop is bounded by the initial pool size.
pub fn sanitize_date<R: Rng>(
    candidates: &mut Vec<usize>,
    preferences: &[ParticipantPreference],
    histories: &[AttendanceHistory],
    date: NaiveDate,
    rng: &mut R,
) {
    loop {
        let before = candidates.len();
        sanitize_size(candidates, preferences);
        sanitize_value(candidates, preferences, histories, date, rng);
        if candidates.len() == before {
            break;
        }
    }
}

/// Best include/exclude outcome over one conflict-cluster frontier.
#[derive(Clone, Copy)]
struct Choice {
    value: i64,
    count: u32,
    mask: u32,
}

impl Choice {
    const EMPTY: Self = Self {
        value: 0,
        count: 0,
        mask: 0,
    };

    fn beats(&self, other: &Self) -> bool {
        (self.value, self.count) > (other.value, other.count)
    }
}

/// Exact search over one frontier of a conflict cluster.
///
/// Maximizes total historical value over nodes that are pairwise
/// non-adjacent in the conflict graph; ties go to the larger selection.
/// Frontier positions act as a local arena, so the memo key is a bitmask of
/// still-undecided nodes.
fn select_optimal_subset(
    frontier: &[usize],
    adjacency: &HashMap<usize, BTreeSet<usize>>,
    histories: &[AttendanceHistory],
    date: NaiveDate,
) -> BTreeSet<usize> {
    debug_assert!(frontier.len() <= CONFLICT_DEPTH_CAP);

    let values: Vec<i64> = frontier
        .iter()
        .map(|&p| historical_value(&histories[p], date))
        .collect();
    let neighbor_masks: Vec<u32> = frontier
        .iter()
        .map(|&p| {
            let mut mask = 0u32;
            if let Some(neighbors) = adjacency.get(&p) {
                for (j, &q) in frontier.iter().enumerate() {
                    if neighbors.contains(&q) {
                        mask |= 1 << j;
                    }
                }
            }
            mask
        })
        .collect();

    let full = (1u32 << frontier.len()) - 1;
    let mut memo: HashMap<u32, Choice> = HashMap::new();
    let best = search(full, &values, &neighbor_masks, &mut memo);

    frontier
        .iter()
        .enumerate()
        .filter(|(j, _)| best.mask & (1 << j) != 0)
        .map(|(_, &p)| p)
        .collect()
}

fn search(
    remaining: u32,
    values: &[i64],
    neighbor_masks: &[u32],
    memo: &mut HashMap<u32, Choice>,
) -> Choice {
    if remaining == 0 {
        return Choice::EMPTY;
    }
    if let Some(&cached) = memo.get(&remaining) {
        return cached;
    }
    let node = remaining.trailing_zeros() as usize;
    let bit = 1u32 << node;

    // Exclude `node`.
    let mut best = search(remaining & !bit, values, neighbor_masks, memo);

    // Include `node`; its conflict-graph neighbors become ineligible.
    let sub = search(
        remaining & !bit & !neighbor_masks[node],
        values,
        neighbor_masks,
        memo,
    );
    let with_node = Choice {
        value: sub.value + values[node],
        count: sub.count + 1,
        mask: sub.mask | bit,
    };
    if with_node.beats(&best) {
        best = with_node;
    }

    memo.insert(remaining, best);
    best
}

/// Days since last confirmed attendance as of the candidate date, capped so
/// the epoch "never attended" sentinel stays finite.
fn historical_value(history: &AttendanceHistory, date: NaiveDate) -> i64 {
    (date - history.last_confirmed.date_naive())
        .num_days()
        .clamp(0, NEVER_ATTENDED_CAP_DAYS)
}
