//! Style extraction and resolution.
//!
//! The fingerprinter reduces a template to a [`StyleProfile`]; the resolver
//! maps content blocks onto that profile.

pub mod fingerprint;
pub mod overrides;
pub mod profile;
pub mod resolver;
mod tally;

pub use fingerprint::{FingerprintOptions, ParagraphInfo, ParagraphRole, StyleFingerprinter};
pub use overrides::{FontDirective, StyleOverrides};
pub use profile::{
    BulletRule, FontRole, FontSpec, HeadingRule, LineRule, Marker, ParagraphSpacing,
    ProfileStats, RuleSource, StyleProfile, SIZE_LADDER,
};
pub use resolver::{resolve, resolve_with, Indent, ResolvedMarker, ResolvedStyle, StyleResolver, StyleRole};
pub use tally::Tally;
