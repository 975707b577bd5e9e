//! # Actors and Roles
//!
//! The surrounding application owns authentication and role storage;
//! this core only reads a role flag. The role ladder matters in exactly
//! one place: [`ActorRole::TestPublisher`] is the lowest-privilege role
//! and is restricted to the test registry regardless of any requested
//! mode.

use serde::{Deserialize, Serialize};

/// Role flag supplied by the surrounding application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActorRole {
    Administrator,
    Curator,
    /// Lowest privilege; may only mint DOIs against the test registry.
    TestPublisher,
}

impl ActorRole {
    /// Whether this role is confined to the test registry.
    pub fn is_test_restricted(&self) -> bool {
        matches!(self, ActorRole::TestPublisher)
    }
}

/// An authenticated caller of the publishing core.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Actor {
    pub name: String,
    pub role: ActorRole,
}

impl Actor {
    pub fn new(name: impl Into<String>, role: ActorRole) -> Self {
        Self {
            name: name.into(),
            role,
        }
    }
}
