//! Spanner directives
//!
//! The set of spanner kinds is closed. Each kind is a plain struct holding
//! its directive attributes; two spanners match (and may fuse) when their
//! kinds compare equal. Formatting goes through [`FormatContributor`],
//! dispatched over the enum with a `match`.

mod beam;
mod bracket;
mod glissando;
mod grob_override;
mod hairpin;
mod ottava;
mod parenthesize;
mod slur;
mod tie;

pub use beam::Beam;
pub use bracket::HorizontalBracket;
pub use glissando::Glissando;
pub use grob_override::GrobOverride;
pub use hairpin::{Hairpin, HairpinShape};
pub use ottava::Ottava;
pub use parenthesize::Parenthesize;
pub use slur::{PhrasingSlur, Slur};
pub use tie::Tie;

use serde::{Deserialize, Serialize};

use super::contributor::FormatContributor;
use super::spanner::Spanner;
use crate::models::{ComponentId, Direction};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpannerKind {
    Slur(Slur),
    PhrasingSlur(PhrasingSlur),
    Beam(Beam),
    Tie(Tie),
    Hairpin(Hairpin),
    Glissando(Glissando),
    HorizontalBracket(HorizontalBracket),
    Ottava(Ottava),
    Override(GrobOverride),
    Parenthesize(Parenthesize),
}

/// Run `$body` with `$inner` bound to the directive of any variant
macro_rules! dispatch {
    ($kind:expr, $inner:ident => $body:expr) => {
        match $kind {
            SpannerKind::Slur($inner) => $body,
            SpannerKind::PhrasingSlur($inner) => $body,
            SpannerKind::Beam($inner) => $body,
            SpannerKind::Tie($inner) => $body,
            SpannerKind::Hairpin($inner) => $body,
            SpannerKind::Glissando($inner) => $body,
            SpannerKind::HorizontalBracket($inner) => $body,
            SpannerKind::Ottava($inner) => $body,
            SpannerKind::Override($inner) => $body,
            SpannerKind::Parenthesize($inner) => $body,
        }
    };
}

impl SpannerKind {
    pub fn name(&self) -> &'static str {
        match self {
            SpannerKind::Slur(_) => "slur",
            SpannerKind::PhrasingSlur(_) => "phrasing_slur",
            SpannerKind::Beam(_) => "beam",
            SpannerKind::Tie(_) => "tie",
            SpannerKind::Hairpin(_) => "hairpin",
            SpannerKind::Glissando(_) => "glissando",
            SpannerKind::HorizontalBracket(_) => "horizontal_bracket",
            SpannerKind::Ottava(_) => "ottava",
            SpannerKind::Override(_) => "override",
            SpannerKind::Parenthesize(_) => "parenthesize",
        }
    }

    /// Same variant, ignoring directive attributes
    pub fn same_variant(&self, other: &SpannerKind) -> bool {
        std::mem::discriminant(self) == std::mem::discriminant(other)
    }

    /// Kinds for which two overlapping instances make no sense on one voice
    pub fn is_exclusive(&self) -> bool {
        matches!(
            self,
            SpannerKind::Slur(_)
                | SpannerKind::PhrasingSlur(_)
                | SpannerKind::Beam(_)
                | SpannerKind::Tie(_)
                | SpannerKind::Hairpin(_)
                | SpannerKind::HorizontalBracket(_)
        )
    }
}

impl FormatContributor for SpannerKind {
    fn before(&self, spanner: &Spanner, leaf: ComponentId) -> Vec<String> {
        dispatch!(self, kind => kind.before(spanner, leaf))
    }

    fn after(&self, spanner: &Spanner, leaf: ComponentId) -> Vec<String> {
        dispatch!(self, kind => kind.after(spanner, leaf))
    }

    fn left_of_token(&self, spanner: &Spanner, leaf: ComponentId) -> Vec<String> {
        dispatch!(self, kind => kind.left_of_token(spanner, leaf))
    }

    fn right_of_token(&self, spanner: &Spanner, leaf: ComponentId) -> Vec<String> {
        dispatch!(self, kind => kind.right_of_token(spanner, leaf))
    }
}

macro_rules! impl_from_directive {
    ($($directive:ident => $variant:ident),* $(,)?) => {
        $(
            impl From<$directive> for SpannerKind {
                fn from(directive: $directive) -> Self {
                    SpannerKind::$variant(directive)
                }
            }
        )*
    };
}

impl_from_directive! {
    Slur => Slur,
    PhrasingSlur => PhrasingSlur,
    Beam => Beam,
    Tie => Tie,
    Hairpin => Hairpin,
    Glissando => Glissando,
    HorizontalBracket => HorizontalBracket,
    Ottava => Ottava,
    GrobOverride => Override,
    Parenthesize => Parenthesize,
}

/// `"^ ("`, `"_ ("` or plain `"("`
fn with_direction(direction: Option<Direction>, token: &str) -> String {
    match direction {
        Some(direction) => format!("{} {}", direction.symbol(), token),
        None => token.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kinds_match_by_value() {
        let up = SpannerKind::from(Slur::new(Some(Direction::Up)));
        let down = SpannerKind::from(Slur::new(Some(Direction::Down)));
        assert_ne!(up, down);
        assert!(up.same_variant(&down));
        assert_eq!(up, SpannerKind::from(Slur::new(Some(Direction::Up))));
        assert!(!up.same_variant(&Beam::default().into()));
    }

    #[test]
    fn test_kind_serializes_with_variant_name() {
        let kind = SpannerKind::from(Ottava::new(1));
        let json = serde_json::to_string(&kind).unwrap();
        assert_eq!(json, r#"{"ottava":{"shift":1}}"#);
        let back: SpannerKind = serde_json::from_str(&json).unwrap();
        assert_eq!(back, kind);
    }
}
