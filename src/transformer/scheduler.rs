//! Batch-building for one stage's active transformer set.
//!
//! Works purely at the graph level (name + declared dependencies) so it can schedule both node
//! transformers and code transformers with the same algorithm; callers are responsible for
//! building visitors/transforms from the ordering this produces.

use std::collections::{HashMap, HashSet};

use crate::error::ObfuscationError;
use crate::transformer::TransformerName;

/// One candidate for scheduling: its name, its declared dependencies (already known to be
/// active, or not — pruning happens here), and its position in the catalog's declaration order
/// (used to break ties deterministically within a batch).
pub struct Candidate {
    pub name: TransformerName,
    pub dependencies: HashSet<TransformerName>,
    pub catalog_index: usize,
}

/// Assigns each active candidate a level = 1 + max(level of its active dependencies), with level
/// 0 for candidates with no active dependencies, then groups by level into ascending batches.
/// Within a batch, candidates are ordered by `catalog_index`.
///
/// Dependencies on names absent from `candidates` are silently dropped (per the "dependencies are
/// hints, not hard requirements" rule) before level assignment runs.
pub fn build_batches(candidates: Vec<Candidate>) -> Result<Vec<Vec<TransformerName>>, ObfuscationError> {
    let active: HashSet<TransformerName> = candidates.iter().map(|c| c.name).collect();

    let pruned: HashMap<TransformerName, (HashSet<TransformerName>, usize)> = candidates
        .into_iter()
        .map(|c| {
            let deps: HashSet<TransformerName> =
                c.dependencies.into_iter().filter(|d| active.contains(d)).collect();
            (c.name, (deps, c.catalog_index))
        })
        .collect();

    let mut levels: HashMap<TransformerName, usize> = HashMap::new();
    let mut in_progress: HashSet<TransformerName> = HashSet::new();

    fn resolve(
        name: TransformerName,
        pruned: &HashMap<TransformerName, (HashSet<TransformerName>, usize)>,
        levels: &mut HashMap<TransformerName, usize>,
        in_progress: &mut HashSet<TransformerName>,
        cycle: &mut Vec<TransformerName>,
    ) -> Option<usize> {
        if let Some(&level) = levels.get(&name) {
            return Some(level);
        }
        if in_progress.contains(&name) {
            cycle.push(name);
            return None;
        }
        in_progress.insert(name);

        let (deps, _) = &pruned[&name];
        let mut level = 0usize;
        for &dep in deps {
            match resolve(dep, pruned, levels, in_progress, cycle) {
                Some(dep_level) => level = level.max(dep_level + 1),
                None => {
                    cycle.push(name);
                    return None;
                }
            }
        }

        in_progress.remove(&name);
        levels.insert(name, level);
        Some(level)
    }

    for &name in pruned.keys() {
        let mut cycle = Vec::new();
        if resolve(name, &pruned, &mut levels, &mut in_progress, &mut cycle).is_none() {
            cycle.dedup();
            return Err(ObfuscationError::ScheduleCycle { involved: cycle });
        }
    }

    let max_level = levels.values().copied().max().unwrap_or(0);
    let mut batches: Vec<Vec<TransformerName>> = vec![Vec::new(); max_level + 1];
    for (&name, &level) in &levels {
        batches[level].push(name);
    }
    for batch in &mut batches {
        batch.sort_by_key(|name| pruned[name].1);
    }
    batches.retain(|batch| !batch.is_empty());

    Ok(batches)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidate(name: TransformerName, deps: &[TransformerName], index: usize) -> Candidate {
        Candidate { name, dependencies: deps.iter().copied().collect(), catalog_index: index }
    }

    #[test]
    fn independent_candidates_land_in_one_batch_in_catalog_order() {
        let batches = build_batches(vec![
            candidate(TransformerName::RenameIdentifiers, &[], 1),
            candidate(TransformerName::StringArray, &[], 0),
        ])
        .unwrap();
        assert_eq!(batches.len(), 1);
        assert_eq!(
            batches[0],
            vec![TransformerName::StringArray, TransformerName::RenameIdentifiers]
        );
    }

    #[test]
    fn dependent_candidate_lands_in_a_later_batch() {
        let batches = build_batches(vec![
            candidate(TransformerName::Parentification, &[], 0),
            candidate(
                TransformerName::RenameIdentifiers,
                &[TransformerName::Parentification],
                1,
            ),
        ])
        .unwrap();
        assert_eq!(batches.len(), 2);
        assert_eq!(batches[0], vec![TransformerName::Parentification]);
        assert_eq!(batches[1], vec![TransformerName::RenameIdentifiers]);
    }

    #[test]
    fn dependency_on_inactive_transformer_is_dropped() {
        let batches = build_batches(vec![candidate(
            TransformerName::RenameIdentifiers,
            &[TransformerName::Parentification],
            0,
        )])
        .unwrap();
        assert_eq!(batches.len(), 1);
        assert_eq!(batches[0], vec![TransformerName::RenameIdentifiers]);
    }

    #[test]
    fn cycle_is_reported_as_schedule_cycle_error() {
        let result = build_batches(vec![
            candidate(TransformerName::Parentification, &[TransformerName::RenameIdentifiers], 0),
            candidate(TransformerName::RenameIdentifiers, &[TransformerName::Parentification], 1),
        ]);
        assert!(matches!(result, Err(ObfuscationError::ScheduleCycle { .. })));
    }
}
