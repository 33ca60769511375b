//! Greedy vertex coloring.

use super::types::{ColorClasses, ColoringOrder};
use crate::error::{IsingError, Result};
use crate::model::{Adjacency, SpinId};
use std::collections::BTreeMap;

/// Colors the coupling graph, visiting spins in ascending id order.
///
/// Equivalent to [`greedy_coloring_with`] using [`ColoringOrder::Ascending`].
///
/// # Examples
///
/// ```
/// use std::collections::{BTreeMap, BTreeSet};
/// use u_ising::coloring::greedy_coloring;
///
/// // Path 0 - 1 - 2
/// let adjacency = BTreeMap::from([
///     (0, BTreeSet::from([1])),
///     (1, BTreeSet::from([0, 2])),
///     (2, BTreeSet::from([1])),
/// ]);
/// let colors = greedy_coloring(&adjacency).unwrap();
/// assert_eq!(colors[&0], BTreeSet::from([0, 2]));
/// assert_eq!(colors[&1], BTreeSet::from([1]));
/// ```
pub fn greedy_coloring(adjacency: &Adjacency) -> Result<ColorClasses> {
    greedy_coloring_with(adjacency, ColoringOrder::Ascending)
}

/// Colors the coupling graph so that no edge joins two spins of one class.
///
/// Each spin, in the visiting order given by `order`, receives the lowest
/// color not already taken by one of its colored neighbors. The result is
/// deterministic for a given adjacency and order.
///
/// Fails with [`IsingError::InvalidGraph`] when the adjacency is not a
/// valid undirected simple graph (see [`validate_adjacency`]).
pub fn greedy_coloring_with(adjacency: &Adjacency, order: ColoringOrder) -> Result<ColorClasses> {
    validate_adjacency(adjacency)?;

    let mut visit: Vec<SpinId> = adjacency.keys().copied().collect();
    if order == ColoringOrder::LargestDegreeFirst {
        // Stable sort keeps ascending id order among equal degrees.
        visit.sort_by_key(|id| std::cmp::Reverse(adjacency[id].len()));
    }

    let mut assigned: BTreeMap<SpinId, usize> = BTreeMap::new();
    let mut classes = ColorClasses::new();

    for id in visit {
        let mut taken: Vec<usize> = adjacency[&id]
            .iter()
            .filter_map(|n| assigned.get(n).copied())
            .collect();
        taken.sort_unstable();
        taken.dedup();

        // Lowest color absent from the sorted, deduplicated list.
        let mut color = 0;
        for &t in &taken {
            if t == color {
                color += 1;
            } else if t > color {
                break;
            }
        }

        assigned.insert(id, color);
        classes.entry(color).or_default().insert(id);
    }

    tracing::trace!(
        spins = adjacency.len(),
        colors = classes.len(),
        ?order,
        "greedy coloring complete"
    );

    Ok(classes)
}

/// Checks that `adjacency` describes an undirected graph without loops.
///
/// Fails with [`IsingError::InvalidGraph`] if a spin lists itself, lists a
/// neighbor that is not a key of the map, or lists a neighbor that does not
/// list it back.
pub fn validate_adjacency(adjacency: &Adjacency) -> Result<()> {
    for (&id, neighbors) in adjacency {
        for &n in neighbors {
            if n == id {
                return Err(IsingError::InvalidGraph(format!(
                    "spin {id} is adjacent to itself"
                )));
            }
            match adjacency.get(&n) {
                None => {
                    return Err(IsingError::InvalidGraph(format!(
                        "spin {id} lists unknown neighbor {n}"
                    )))
                }
                Some(back) if !back.contains(&id) => {
                    return Err(IsingError::InvalidGraph(format!(
                        "edge {id} -> {n} has no reverse edge"
                    )))
                }
                Some(_) => {}
            }
        }
    }
    Ok(())
}

/// Whether `classes` is a proper coloring of `adjacency`: every spin
/// appears in exactly one class and no class contains both ends of an edge.
pub fn is_proper_coloring(adjacency: &Adjacency, classes: &ColorClasses) -> bool {
    let mut color_of: BTreeMap<SpinId, usize> = BTreeMap::new();
    for (&color, members) in classes {
        for &id in members {
            if color_of.insert(id, color).is_some() {
                return false;
            }
        }
    }
    if color_of.len() != adjacency.len() {
        return false;
    }

    adjacency.iter().all(|(id, neighbors)| {
        let Some(own) = color_of.get(id) else {
            return false;
        };
        neighbors.iter().all(|n| color_of.get(n) != Some(own))
    })
}
