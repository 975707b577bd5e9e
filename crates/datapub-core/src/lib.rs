//! # datapub-core — Foundational Types for the Publishing Core
//!
//! Defines the Resource aggregate and the domain primitives shared by the
//! export, validation and registration crates. Every other crate in the
//! workspace depends on `datapub-core`; it depends on nothing internal.
//!
//! ## Key Design Principles
//!
//! 1. **Newtype wrappers for domain identifiers.** `ResourceId` and `Doi`
//!    are newtypes with validated constructors. No bare strings for
//!    identifiers.
//!
//! 2. **The aggregate is read-only from this core's perspective.** The
//!    curation workflow owns creation and mutation; the single exception
//!    is [`Resource::assign_doi`], which writes the minted identifier back
//!    exactly once. Registration is not retractable.
//!
//! 3. **Named parties are a sum type.** [`party::Party`] is tagged over
//!    `Person` and `Institution` with disjoint field sets; projection code
//!    matches on the tag rather than dispatching through a trait object.
//!
//! 4. **The creator/contributor split is a pure function.** Whether a
//!    party serializes as a creator or a contributor is derived from its
//!    role set by [`party::partition_parties`], never stored as a
//!    denormalized flag, so the two wire formats cannot drift.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `datapub-*` crates (this is the leaf of the DAG).
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.
//! - All public types derive `Debug`, `Clone`, and implement `Serialize`/`Deserialize`.

pub mod actor;
pub mod error;
pub mod identifier;
pub mod party;
pub mod resource;

// Re-export primary types for ergonomic imports.
pub use actor::{Actor, ActorRole};
pub use error::CoreError;
pub use identifier::{Doi, ResourceId};
pub use party::{partition_parties, Party, PartyAssignment, PartyRole};
pub use resource::{LandingPage, Resource, ResourceType, Title, TitleType};
