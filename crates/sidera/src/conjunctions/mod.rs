//! Conjunctions between moving bodies and catalog points.

pub mod matcher;
pub mod types;

pub use matcher::{
    ecliptic_orb, group_by_exactness, has_conjunctions, match_conjunctions, natal_conjunctions,
    personal_transit_activations, tightest, transit_activations,
};
pub use types::{Conjunction, Exactness, ExactnessGroups, Subject, CLOSE_ORB, EXACT_ORB};
