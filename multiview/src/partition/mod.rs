//! Partitioning of the link graph into connected components.
//!
//! Only links of a chosen [`LinkStrength`] merge nodes. Nodes reached solely
//! through links of the other strength still show up, each as a singleton, so
//! every node mentioned by a link lands in exactly one component.
//!
//! # Example
//!
//! ```
//! use multiview::{Link, LinkStrength, connected_components, link_groups};
//!
//! let links = vec![Link::strong(1, 2), Link::weak(2, 3), Link::strong(4, 5)];
//! let components = connected_components(&links, LinkStrength::Strong)?;
//! assert_eq!(components.len(), 3); // {1, 2}, {3}, {4, 5}
//!
//! let groups = link_groups(&components, &links, LinkStrength::Strong)?;
//! assert_eq!(groups.len(), 2);
//! # Ok::<(), multiview::PartitionError>(())
//! ```

mod union_find;

use hashbrown::hash_map::Entry;
use hashbrown::{HashMap, HashSet};

use crate::error::PartitionError;
use crate::link::{Link, LinkNode, LinkStrength};

use union_find::UnionFind;

/// A set of nodes mutually reachable through links of one strength.
pub type Component<T> = HashSet<T>;

/// Compute the node partition induced by links of `strength`.
///
/// The result is the transitive closure over `strength` links and does not
/// depend on link order. Components are listed in order of the first
/// appearance of any member in `links`.
///
/// Fails with [`PartitionError::InvalidLink`] if any link has a nil endpoint.
pub fn connected_components<T: LinkNode>(
    links: &[Link<T>],
    strength: LinkStrength,
) -> Result<Vec<Component<T>>, PartitionError> {
    let mut node_index: HashMap<&T, usize> = HashMap::new();
    let mut nodes: Vec<&T> = Vec::new();
    let mut sets = UnionFind::with_capacity(links.len() * 2);

    for (index, link) in links.iter().enumerate() {
        let (first, second) = link.endpoints();
        if first.is_nil() || second.is_nil() {
            return Err(PartitionError::InvalidLink { index });
        }

        let a = *node_index.entry(first).or_insert_with(|| {
            nodes.push(first);
            sets.make_set()
        });
        let b = *node_index.entry(second).or_insert_with(|| {
            nodes.push(second);
            sets.make_set()
        });

        if link.strength() == strength {
            sets.union(a, b);
        }
    }

    let mut root_to_component: HashMap<usize, usize> = HashMap::new();
    let mut components: Vec<Component<T>> = Vec::new();
    for (idx, node) in nodes.into_iter().enumerate() {
        let root = sets.find(idx);
        let component = match root_to_component.entry(root) {
            Entry::Occupied(e) => *e.get(),
            Entry::Vacant(e) => {
                components.push(Component::new());
                *e.insert(components.len() - 1)
            }
        };
        components[component].insert(node.clone());
    }

    tracing::debug!(
        links = links.len(),
        nodes = sets.len(),
        components = components.len(),
        %strength,
        "Computed connected components"
    );

    Ok(components)
}

/// Collect, per component, the links of `strength` touching it.
///
/// Groups follow the order of `components`, links keep their input order and
/// components without any such link are omitted.
///
/// Fails with [`PartitionError::InvalidLink`] for a nil endpoint and with
/// [`PartitionError::InconsistentLink`] if a `strength` link joins two
/// different components, which means `components` was not computed from the
/// same links and strength.
pub fn link_groups<'a, T: LinkNode>(
    components: &[Component<T>],
    links: &'a [Link<T>],
    strength: LinkStrength,
) -> Result<Vec<Vec<&'a Link<T>>>, PartitionError> {
    let mut component_of: HashMap<&T, usize> = HashMap::new();
    for (idx, component) in components.iter().enumerate() {
        for node in component {
            component_of.entry(node).or_insert(idx);
        }
    }

    let mut groups: Vec<Vec<&Link<T>>> = vec![Vec::new(); components.len()];
    for (index, link) in links.iter().enumerate() {
        let (first, second) = link.endpoints();
        if first.is_nil() || second.is_nil() {
            return Err(PartitionError::InvalidLink { index });
        }
        if link.strength() != strength {
            continue;
        }

        match (component_of.get(first), component_of.get(second)) {
            (Some(a), Some(b)) if a != b => {
                return Err(PartitionError::InconsistentLink { index });
            }
            (Some(&c), _) | (None, Some(&c)) => groups[c].push(link),
            (None, None) => {}
        }
    }

    groups.retain(|group| !group.is_empty());

    tracing::debug!(
        components = components.len(),
        groups = groups.len(),
        %strength,
        "Grouped links by component"
    );

    Ok(groups)
}
