//! Geometric helpers shared by links and weak link creation.

mod bbox;

pub use bbox::Aabb3;
