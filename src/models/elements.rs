//! Element types for score components
//!
//! Leaf and container kinds, time signatures, and the marks a leaf can carry.

use serde::{Deserialize, Serialize};

use super::duration::{Duration, Rational};
use super::pitch::{Pitch, PitchLanguage};

/// What a leaf sounds (or doesn't)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum LeafKind {
    Note(Pitch),
    Chord(Vec<Pitch>),
    Rest,
    /// Invisible spacer
    Skip,
}

impl LeafKind {
    /// Primary token without duration: "c'", "<c' e'>", "r", "s"
    pub fn body(&self, language: PitchLanguage) -> String {
        match self {
            LeafKind::Note(pitch) => pitch.to_lilypond_string(language),
            LeafKind::Chord(pitches) => {
                let inner = pitches
                    .iter()
                    .map(|p| p.to_lilypond_string(language))
                    .collect::<Vec<_>>()
                    .join(" ");
                format!("<{}>", inner)
            }
            LeafKind::Rest => "r".to_string(),
            LeafKind::Skip => "s".to_string(),
        }
    }

    pub fn is_pitched(&self) -> bool {
        matches!(self, LeafKind::Note(_) | LeafKind::Chord(_))
    }
}

/// Time signature of a measure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeSignature {
    pub numerator: u32,
    pub denominator: u32,
}

impl TimeSignature {
    pub fn new(numerator: u32, denominator: u32) -> Self {
        Self {
            numerator,
            denominator,
        }
    }

    pub fn duration(&self) -> Duration {
        Duration::new(self.numerator as i32, self.denominator as i32)
    }
}

/// How a container groups its children
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ContainerKind {
    /// `{ ... }`
    Sequential,
    /// `<< ... >>`
    Simultaneous,
    Voice { name: Option<String> },
    Staff { name: Option<String> },
    Measure { time_signature: TimeSignature },
    /// (actual, normal): 3 in the time of 2 is `(3, 2)`
    Tuplet { ratio: (u32, u32) },
}

impl ContainerKind {
    /// Multiplier applied to the written durations of descendants
    pub fn multiplier(&self) -> Rational {
        match self {
            ContainerKind::Tuplet { ratio: (actual, normal) } if *actual > 0 => {
                Rational::new(*normal as i32, *actual as i32)
            }
            _ => Rational::new(1, 1),
        }
    }

    pub fn is_simultaneous(&self) -> bool {
        matches!(self, ContainerKind::Simultaneous)
    }
}

/// Placement of a mark above or below the staff
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Up,
    Down,
}

impl Direction {
    /// LilyPond direction indicator
    pub fn symbol(&self) -> &'static str {
        match self {
            Direction::Up => "^",
            Direction::Down => "_",
        }
    }
}

/// Non-spanning metadata attached to a single leaf
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Mark {
    /// Named articulation, e.g. "staccato" or "accent"
    Articulation(String),
    /// Dynamic, e.g. "p" or "sfz"
    Dynamic(String),
    Markup {
        text: String,
        direction: Option<Direction>,
    },
}

impl Mark {
    pub fn to_lilypond_string(&self) -> String {
        match self {
            Mark::Articulation(name) => format!("-\\{}", name),
            Mark::Dynamic(name) => format!("\\{}", name),
            Mark::Markup { text, direction } => {
                let prefix = direction.map(|d| d.symbol()).unwrap_or("-");
                format!("{} \\markup {{ {} }}", prefix, text)
            }
        }
    }
}
