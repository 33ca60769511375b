//! Grouping energies into levels.

/// A group of (nearly) equal energies.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EnergyLevel {
    /// Lowest energy in the group.
    pub energy: f64,
    /// Number of energies in the group: the degeneracy when the input lists
    /// each state once, the occurrence count when it lists samples.
    pub count: usize,
}

/// Groups energies into ascending levels.
///
/// An energy joins the current level when it is within `tolerance` of the
/// level's lowest energy. Non-finite energies are ignored.
///
/// # Examples
///
/// ```
/// use u_ising::analysis::energy_levels;
///
/// let levels = energy_levels(&[2.0, -2.0, -2.0, 2.0, -2.0], 1e-9);
/// assert_eq!(levels.len(), 2);
/// assert_eq!((levels[0].energy, levels[0].count), (-2.0, 3));
/// assert_eq!((levels[1].energy, levels[1].count), (2.0, 2));
/// ```
pub fn energy_levels(energies: &[f64], tolerance: f64) -> Vec<EnergyLevel> {
    let mut sorted: Vec<f64> = energies.iter().copied().filter(|e| e.is_finite()).collect();
    sorted.sort_by(f64::total_cmp);

    let mut levels: Vec<EnergyLevel> = Vec::new();
    for energy in sorted {
        match levels.last_mut() {
            Some(level) if energy - level.energy <= tolerance => level.count += 1,
            _ => levels.push(EnergyLevel { energy, count: 1 }),
        }
    }
    levels
}
