//! Office Open XML word-processing package internals.
//!
//! Reading is split by part: the package itself, styles, numbering, theme
//! and the main document body. Lengths are in twips (1/20 pt) and font sizes
//! in half-points throughout, as in the file format.

pub mod body;
pub mod numbering;
pub mod package;
pub mod props;
pub mod styles;
pub mod theme;
pub mod xml;

pub use body::{BodyChild, BodyLayout, ChildKind, TemplateParagraph};
pub use numbering::{LevelDef, Numbering};
pub use package::{Package, PartRelations};
pub use props::{FontRef, NumProps, ParaProps, RunProps, ThemeFont};
pub use styles::{StyleDef, StyleKind, StyleSheet};
pub use theme::ThemeFonts;

/// Twips per inch.
pub const TWIPS_PER_INCH: u32 = 1440;

/// Twips per point.
pub const TWIPS_PER_POINT: u32 = 20;
