//! Data model for the artifact evaluator.
//!
//! A [`Dataset`] is built once from a [`WireDataset`] document and never
//! mutated afterwards. It is indexed three ways:
//! - by set ([`SetEntry`], used by the Browse view),
//! - by exact Set × Slot × MainStat ([`ArtifactKey`] → [`ArtifactCombo`],
//!   used by the Evaluate view),
//! - by Slot × MainStat across all sets ([`SlotKey`], optional).
//!
//! Every lookup is total: a missing key yields `None` or an empty slice.

pub mod check;
pub mod dataset;
pub mod entities;
pub mod error;
pub mod ids;

pub use check::{DatasetCounts, IntegrityIssue, IntegrityIssueKind, IntegrityReport};
pub use dataset::{Dataset, WireDataset};
pub use entities::{
    ArtifactCombo, CharacterWant, FixedSlot, MainStatBreakdown, Meta, SetEntry, SubstatWant,
};
pub use error::{ModelError, Result};
pub use ids::{ArtifactKey, CharacterRole, KEY_SEPARATOR, SlotKey};
