//! Side-by-side comparison of two style profiles.

use std::fmt::Write;

use serde::Serialize;

use super::text::spacing_text;
use crate::style::{FontRole, StyleProfile};

/// One attribute whose value differs between two profiles.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProfileDifference {
    /// Attribute name, e.g. "heading2 font"
    pub attribute: String,
    pub left: String,
    pub right: String,
}

/// Attributes that differ between `left` and `right`, in a fixed order.
pub fn compare(left: &StyleProfile, right: &StyleProfile) -> Vec<ProfileDifference> {
    let mut diffs = Vec::new();
    let mut check = |attribute: String, a: String, b: String| {
        if a != b {
            diffs.push(ProfileDifference {
                attribute,
                left: a,
                right: b,
            });
        }
    };

    let mut roles: Vec<FontRole> = left.fonts().keys().copied().collect();
    for role in right.fonts().keys() {
        if !roles.contains(role) {
            roles.push(*role);
        }
    }
    roles.sort();
    for role in roles {
        check(
            format!("{} font", role),
            font_text(left, role),
            font_text(right, role),
        );
    }

    for level in 1..=crate::model::MAX_HEADING_LEVEL {
        check(
            format!("heading{} style", level),
            left.heading_rule(level).style_id.clone().unwrap_or_default(),
            right.heading_rule(level).style_id.clone().unwrap_or_default(),
        );
    }

    let (a, b) = (left.bullet_rule(), right.bullet_rule());
    check(
        "bullet marker".to_string(),
        a.marker.glyph().to_string(),
        b.marker.glyph().to_string(),
    );
    check(
        "bullet indent".to_string(),
        format!("{}/{}", a.indent, a.hanging),
        format!("{}/{}", b.indent, b.hanging),
    );
    check(
        "bullet spacing".to_string(),
        spacing_text(&a.spacing),
        spacing_text(&b.spacing),
    );
    check(
        "paragraph spacing".to_string(),
        spacing_text(&left.paragraph_spacing()),
        spacing_text(&right.paragraph_spacing()),
    );

    diffs
}

/// Comparison as an aligned table; "identical" when nothing differs.
pub fn compare_text(left: &StyleProfile, right: &StyleProfile) -> String {
    let diffs = compare(left, right);
    if diffs.is_empty() {
        return "identical".to_string();
    }

    let width = diffs.iter().map(|d| d.attribute.len()).max().unwrap_or(0);
    let mut out = String::new();
    for diff in &diffs {
        let _ = writeln!(
            out,
            "{:<width$}  {}  |  {}",
            diff.attribute,
            or_dash(&diff.left),
            or_dash(&diff.right),
            width = width
        );
    }
    out.trim_end().to_string()
}

fn font_text(profile: &StyleProfile, role: FontRole) -> String {
    profile
        .font(role)
        .map(ToString::to_string)
        .unwrap_or_default()
}

fn or_dash(value: &str) -> &str {
    if value.is_empty() {
        "-"
    } else {
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identical() {
        let profile = StyleProfile::default();
        assert!(compare(&profile, &profile.clone()).is_empty());
        assert_eq!(compare_text(&profile, &profile), "identical");
    }
}
