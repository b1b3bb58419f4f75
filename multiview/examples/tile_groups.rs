//! Example: Grouping tiles for global alignment
//!
//! This example demonstrates the correspondence-to-groups flow on a synthetic
//! row of overlapping tiles:
//! 1. Scatter interest points in world space and observe them from each tile
//! 2. Build local frame descriptors per tile and match neighboring tiles
//! 3. Turn pairs with enough matches into strong links
//! 4. Add weak links from the tile registrations
//! 5. Partition the link graph by strength
//!
//! # Usage
//!
//! ```bash
//! RUST_LOG=debug cargo run --release --example tile_groups
//! ```

use glam::{DAffine3, DVec3};
use multiview::{
    Aabb3, KdTree, Link, LinkStrength, LocalFrameDescriptor, MatchConfig, MetadataWeakLinks,
    ViewId, ViewRegistrations, WeakLinkConfig, connected_components, link_groups,
    match_descriptors,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing_subscriber::EnvFilter;

const TILE_SIZE: f64 = 100.0;
const TILE_STEP: f64 = 85.0;
const TILE_COUNT: u32 = 5;
const MIN_MATCHES: usize = 8;

fn main() {
    init_tracing();

    let mut rng = StdRng::seed_from_u64(17);
    let world_points: Vec<DVec3> = (0..1500)
        .map(|_| {
            DVec3::new(
                rng.random_range(0.0..TILE_STEP * (TILE_COUNT - 1) as f64 + TILE_SIZE),
                rng.random_range(0.0..TILE_SIZE),
                rng.random_range(0.0..TILE_SIZE),
            )
        })
        .collect();

    let extent = Aabb3::from_size(DVec3::splat(TILE_SIZE));
    let views: Vec<(ViewId, Aabb3)> = (0..TILE_COUNT)
        .map(|setup| (ViewId::new(0, setup), extent))
        .collect();
    let registrations: ViewRegistrations = views
        .iter()
        .map(|(view, _)| {
            let offset = DVec3::new(TILE_STEP * view.setup as f64, 0.0, 0.0);
            (*view, DAffine3::from_translation(offset))
        })
        .collect();

    // Tile 2 has no usable signal, so matching cannot bridge 1-2 and 2-3
    let descriptors: Vec<Vec<LocalFrameDescriptor>> = views
        .iter()
        .map(|(view, extent)| {
            if view.setup == 2 {
                return Vec::new();
            }
            let Some(model) = registrations.get(view) else {
                return Vec::new();
            };
            let local: Vec<DVec3> = world_points
                .iter()
                .map(|p| model.inverse().transform_point3(*p))
                .filter(|p| extent.contains(*p))
                .collect();
            build_descriptors(&local)
        })
        .collect();

    let config = MatchConfig::default();
    let mut links: Vec<Link<ViewId>> = Vec::new();
    for i in 0..views.len() - 1 {
        let matches = match_descriptors(&descriptors[i], &descriptors[i + 1], &config);
        println!(
            "{} <-> {}: {} descriptor matches",
            views[i].0,
            views[i + 1].0,
            matches.len()
        );
        if matches.len() >= MIN_MATCHES {
            links.push(Link::strong(views[i].0, views[i + 1].0));
        }
    }

    let weak_links = MetadataWeakLinks::new(&registrations, WeakLinkConfig::default());
    links.extend(weak_links.create_links(&views, &links));

    for strength in [LinkStrength::Strong, LinkStrength::Weak] {
        let components = match connected_components(&links, strength) {
            Ok(c) => c,
            Err(e) => {
                eprintln!("Partitioning failed: {}", e);
                std::process::exit(1);
            }
        };
        println!("\n{} components:", strength);
        for component in &components {
            let mut members: Vec<ViewId> = component.iter().copied().collect();
            members.sort();
            let names: Vec<String> = members.iter().map(ToString::to_string).collect();
            println!("  {{{}}}", names.join(", "));
        }

        match link_groups(&components, &links, strength) {
            Ok(groups) => {
                for group in groups {
                    let names: Vec<String> = group.iter().map(|l| l.to_string()).collect();
                    println!("  links: {}", names.join(" "));
                }
            }
            Err(e) => eprintln!("Link grouping failed: {}", e),
        }
    }
}

/// One descriptor per point from its two nearest neighbors, centered on it.
fn build_descriptors(points: &[DVec3]) -> Vec<LocalFrameDescriptor> {
    let flat: Vec<f64> = points.iter().flat_map(|p| p.to_array()).collect();
    let Some(tree) = KdTree::build(&flat, 3) else {
        return Vec::new();
    };

    points
        .iter()
        .filter_map(|&basis| {
            let neighbors = tree.k_nearest(&basis.to_array(), 3);
            let [_, n1, n2] = neighbors.as_slice() else {
                return None;
            };
            let a = DVec3::from_slice(tree.point(n1.index)) - basis;
            let b = DVec3::from_slice(tree.point(n2.index)) - basis;
            Some(LocalFrameDescriptor::from_points(basis, a, b))
        })
        .collect()
}

/// Initialize tracing subscriber with console output.
fn init_tracing() {
    use tracing_subscriber::prelude::*;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_target(true)
        .with_level(true)
        .with_file(false)
        .with_line_number(false);

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .init();
}
