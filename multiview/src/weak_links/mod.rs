//! Weak links derived from view registration metadata.
//!
//! When point matching cannot connect two views, their stored registrations
//! still say where the views sit relative to each other. Views whose
//! world-space extents overlap get a [`LinkStrength::Weak`] link carrying the
//! overlap region and the relative transform, so a global solve can keep
//! otherwise unconnected groups in place.
//!
//! Registrations are handed in explicitly through [`ViewRegistrations`].


use std::fmt;

use glam::DAffine3;
use hashbrown::{HashMap, HashSet};
use serde::{Deserialize, Serialize};

use crate::config::WeakLinkConfig;
use crate::link::{Link, LinkNode, LinkStrength};
use crate::math::Aabb3;

/// Identifier of one view: a setup (angle, channel, tile, ...) at a timepoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ViewId {
    pub timepoint: u32,
    pub setup: u32,
}

impl ViewId {
    pub const fn new(timepoint: u32, setup: u32) -> Self {
        Self { timepoint, setup }
    }
}

impl fmt::Display for ViewId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "tp{}-s{}", self.timepoint, self.setup)
    }
}

impl LinkNode for ViewId {}

/// Per-view model mapping view-local coordinates to world coordinates.
#[derive(Debug, Clone, Default)]
pub struct ViewRegistrations {
    models: HashMap<ViewId, DAffine3>,
}

impl ViewRegistrations {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, view: ViewId, model: DAffine3) -> Option<DAffine3> {
        self.models.insert(view, model)
    }

    pub fn get(&self, view: &ViewId) -> Option<&DAffine3> {
        self.models.get(view)
    }

    pub fn len(&self) -> usize {
        self.models.len()
    }

    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }
}

impl FromIterator<(ViewId, DAffine3)> for ViewRegistrations {
    fn from_iter<I: IntoIterator<Item = (ViewId, DAffine3)>>(iter: I) -> Self {
        Self {
            models: iter.into_iter().collect(),
        }
    }
}

/// Creates weak links between overlapping views from their registrations.
#[derive(Debug)]
pub struct MetadataWeakLinks<'a> {
    registrations: &'a ViewRegistrations,
    config: WeakLinkConfig,
}

impl<'a> MetadataWeakLinks<'a> {
    pub fn new(registrations: &'a ViewRegistrations, config: WeakLinkConfig) -> Self {
        Self {
            registrations,
            config,
        }
    }

    /// Weak links for every overlapping pair in `views`.
    ///
    /// `views` pairs each view with its extent in view-local coordinates.
    /// A link from `views[i]` to `views[j]` (`i < j`) carries the world-space
    /// overlap box and the transform `reg(i)^-1 * reg(j)`, which maps
    /// coordinates of the second view into the first. Pairs joined by a
    /// strong link in `strong_links` are skipped if configured.
    pub fn create_links(
        &self,
        views: &[(ViewId, Aabb3)],
        strong_links: &[Link<ViewId>],
    ) -> Vec<Link<ViewId>> {
        let linked: HashSet<(ViewId, ViewId)> = if self.config.skip_strongly_linked {
            strong_links
                .iter()
                .filter(|l| l.strength() == LinkStrength::Strong)
                .map(|l| ordered_pair(*l.first(), *l.second()))
                .collect()
        } else {
            HashSet::new()
        };

        let placed: Vec<(ViewId, &DAffine3, Aabb3)> = views
            .iter()
            .filter_map(|(view, extent)| match self.registrations.get(view) {
                Some(model) => Some((*view, model, extent.transformed(model))),
                None => {
                    tracing::warn!(%view, "View has no registration, skipping");
                    None
                }
            })
            .collect();

        let mut links = Vec::new();
        for (i, (view_a, model_a, world_a)) in placed.iter().enumerate() {
            for (view_b, model_b, world_b) in &placed[i + 1..] {
                if view_a == view_b || linked.contains(&ordered_pair(*view_a, *view_b)) {
                    continue;
                }
                let Some(overlap) = world_a.intersection(world_b) else {
                    continue;
                };
                if overlap.volume() <= self.config.min_overlap_volume {
                    continue;
                }

                let relative = model_a.inverse() * **model_b;
                links.push(
                    Link::weak(*view_a, *view_b)
                        .with_bounding_box(overlap)
                        .with_transform(relative),
                );
            }
        }

        tracing::debug!(
            views = views.len(),
            registered = placed.len(),
            links = links.len(),
            "Created metadata weak links"
        );

        links
    }
}

fn ordered_pair(a: ViewId, b: ViewId) -> (ViewId, ViewId) {
    if a <= b { (a, b) } else { (b, a) }
}
