use glam::{DAffine3, DVec3};
use strum::IntoEnumIterator;

use super::*;

#[test]
fn test_link_accessors() {
    let bbox = Aabb3::from_size(DVec3::splat(4.0));
    let transform = DAffine3::from_translation(DVec3::new(1.0, 2.0, 3.0));
    let link = Link::new(3u32, 7u32, LinkStrength::Strong)
        .with_bounding_box(bbox)
        .with_transform(transform);

    assert_eq!(*link.first(), 3);
    assert_eq!(*link.second(), 7);
    assert_eq!(link.endpoints(), (&3, &7));
    assert_eq!(link.strength(), LinkStrength::Strong);
    assert_eq!(link.bounding_box(), Some(&bbox));
    assert_eq!(link.transform(), Some(&transform));
}

#[test]
fn test_link_defaults_without_region_or_transform() {
    let link = Link::weak("a", "b");
    assert_eq!(link.strength(), LinkStrength::Weak);
    assert!(link.bounding_box().is_none());
    assert!(link.transform().is_none());
}

#[test]
fn test_link_touches() {
    let link = Link::strong(1, 2);
    assert!(link.touches(&1));
    assert!(link.touches(&2));
    assert!(!link.touches(&3));
}

#[test]
fn test_link_display() {
    assert_eq!(Link::strong(4, 9).to_string(), "(4, 9)");
}

#[test]
fn test_link_strength_display() {
    let names: Vec<String> = LinkStrength::iter().map(|s| s.to_string()).collect();
    assert_eq!(names, vec!["Weak", "Strong"]);
}

#[test]
fn test_link_equality() {
    assert_eq!(Link::strong(1, 2), Link::strong(1, 2));
    assert_ne!(Link::strong(1, 2), Link::weak(1, 2));
    assert_ne!(Link::strong(1, 2), Link::strong(2, 1));
}

#[test]
fn test_link_node_nil() {
    assert!(!5u64.is_nil());
    assert!(String::new().is_nil());
    assert!(!"view".to_string().is_nil());
    assert!(None::<u32>.is_nil());
    assert!(!Some(0u32).is_nil());
    assert!(Some(String::new()).is_nil());
}
