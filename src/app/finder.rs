use log::debug;

use crate::app::branch::Geolocated;
use crate::app::coordinates::Coordinates;

pub const TOP_NUMBER_OF_BRANCHES: usize = 5;

/// A branch paired with its distance in kilometers from the reference location.
#[derive(Debug)]
pub struct BranchDistance<'a, B> {
    pub branch: &'a B,
    pub distance: f64,
}

/// Distance to every branch that has usable coordinates, in input order.
pub fn branch_distances<'a, B: Geolocated>(
    location: &Coordinates,
    branches: &'a [B],
) -> Vec<BranchDistance<'a, B>> {
    branches
        .iter()
        .filter_map(|branch| {
            branch.coordinates().map(|coordinates| BranchDistance {
                branch,
                distance: location.distance(&coordinates),
            })
        })
        .collect()
}

/// Up to `limit` branches ordered by ascending distance. Equal distances keep
/// their input order. `None` when no branch has usable coordinates.
pub fn nearest_branches<'a, B: Geolocated>(
    location: &Coordinates,
    branches: &'a [B],
    limit: usize,
) -> Option<Vec<BranchDistance<'a, B>>> {
    let mut candidates = branch_distances(location, branches);
    if candidates.is_empty() {
        debug!(
            "None of the {} branches has a usable geolocation",
            branches.len()
        );
        return None;
    }
    candidates.sort_by(|a, b| a.distance.total_cmp(&b.distance));
    candidates.truncate(limit);
    Some(candidates)
}

/// The five branches closest to `location`, nearest first.
pub fn closest_branches_to<'a, B: Geolocated>(
    location: &Coordinates,
    branches: &'a [B],
) -> Option<Vec<&'a B>> {
    nearest_branches(location, branches, TOP_NUMBER_OF_BRANCHES).map(|candidates| {
        candidates
            .into_iter()
            .map(|branch_distance| branch_distance.branch)
            .collect()
    })
}
