//! Pitches and LilyPond note-name languages

use serde::{Deserialize, Serialize};

/// Note naming language for LilyPond output
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PitchLanguage {
    /// Dutch: c d e f g a b (cis/ees for sharps/flats) - LilyPond default
    #[default]
    Nederlands,

    /// English: c d e f g a b (cs/ef for sharps/flats)
    English,

    /// German: c d e f g a h (cis/es for sharps/flats)
    Deutsch,

    /// Italian: do re mi fa sol la si (dod/mib for sharps/flats)
    Italiano,
}

impl PitchLanguage {
    /// Name used by the `\language` directive
    pub fn lilypond_name(&self) -> &'static str {
        match self {
            PitchLanguage::Nederlands => "nederlands",
            PitchLanguage::English => "english",
            PitchLanguage::Deutsch => "deutsch",
            PitchLanguage::Italiano => "italiano",
        }
    }
}

/// Musical pitch representation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Pitch {
    /// Scale degree (0=C, 1=D, 2=E, 3=F, 4=G, 5=A, 6=B)
    pub step: u8,

    /// Accidental (-2=double flat, -1=flat, 0=natural, +1=sharp, +2=double sharp)
    pub alteration: i8,

    /// Octave number (4 = middle C octave)
    pub octave: i8,
}

impl Pitch {
    /// Create a new pitch with validation
    pub fn new(step: u8, alteration: i8, octave: i8) -> Result<Self, String> {
        if step > 6 {
            return Err(format!("Invalid step: {} (must be 0-6)", step));
        }
        if !(-2..=2).contains(&alteration) {
            return Err(format!(
                "Invalid alteration: {} (must be -2 to +2)",
                alteration
            ));
        }
        if !(-1..=9).contains(&octave) {
            return Err(format!("Invalid octave: {} (must be -1 to 9)", octave));
        }
        Ok(Self {
            step,
            alteration,
            octave,
        })
    }

    /// Middle C
    pub fn middle_c() -> Self {
        Self {
            step: 0,
            alteration: 0,
            octave: 4,
        }
    }

    /// Pitch from a MIDI-style semitone number (60 = middle C), spelled with sharps
    pub fn from_semitones(number: i32) -> Self {
        const SPELLING: [(u8, i8); 12] = [
            (0, 0),
            (0, 1),
            (1, 0),
            (1, 1),
            (2, 0),
            (3, 0),
            (3, 1),
            (4, 0),
            (4, 1),
            (5, 0),
            (5, 1),
            (6, 0),
        ];
        let (step, alteration) = SPELLING[number.rem_euclid(12) as usize];
        Self {
            step,
            alteration,
            octave: (number.div_euclid(12) - 1) as i8,
        }
    }

    /// Convert pitch to LilyPond notation in specified language
    pub fn to_lilypond_string(&self, language: PitchLanguage) -> String {
        format!("{}{}", self.note_name(language), self.octave_marks())
    }

    fn note_name(&self, language: PitchLanguage) -> String {
        let index = self.step as usize % 7;
        let (base, flat, sharp) = match language {
            PitchLanguage::Nederlands => (["c", "d", "e", "f", "g", "a", "b"][index], "es", "is"),
            PitchLanguage::English => (["c", "d", "e", "f", "g", "a", "b"][index], "f", "s"),
            PitchLanguage::Deutsch => (["c", "d", "e", "f", "g", "a", "h"][index], "es", "is"),
            PitchLanguage::Italiano => {
                (["do", "re", "mi", "fa", "sol", "la", "si"][index], "b", "d")
            }
        };
        // German contracts the vowel: "es" and "as", not "ees" and "aes"
        let first_flat = match (language, base) {
            (PitchLanguage::Deutsch, "e" | "a") => "s",
            _ => flat,
        };
        match self.alteration {
            -1 if language == PitchLanguage::Deutsch && base == "h" => "b".to_string(),
            -2 => format!("{}{}{}", base, first_flat, flat),
            -1 => format!("{}{}", base, first_flat),
            1 => format!("{}{}", base, sharp),
            2 => format!("{}{}{}", base, sharp, sharp),
            _ => base.to_string(),
        }
    }

    fn octave_marks(&self) -> String {
        // LilyPond: c' is octave 4 (middle C), c is octave 3, c, is octave 2
        if self.octave >= 4 {
            "'".repeat((self.octave - 3) as usize)
        } else {
            ",".repeat((3 - self.octave) as usize)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_note_names() {
        let cs = Pitch::new(0, 1, 4).unwrap();
        assert_eq!(cs.to_lilypond_string(PitchLanguage::Nederlands), "cis'");
        assert_eq!(cs.to_lilypond_string(PitchLanguage::English), "cs'");
        assert_eq!(cs.to_lilypond_string(PitchLanguage::Italiano), "dod'");

        let ef = Pitch::new(2, -1, 5).unwrap();
        assert_eq!(ef.to_lilypond_string(PitchLanguage::Nederlands), "ees''");
        assert_eq!(ef.to_lilypond_string(PitchLanguage::English), "ef''");

        let b = Pitch::new(6, 0, 2).unwrap();
        assert_eq!(b.to_lilypond_string(PitchLanguage::Deutsch), "h,");
    }

    #[test]
    fn test_from_semitones() {
        assert_eq!(Pitch::from_semitones(60), Pitch::middle_c());
        assert_eq!(Pitch::from_semitones(61).to_lilypond_string(PitchLanguage::English), "cs'");
        assert_eq!(Pitch::from_semitones(48).to_lilypond_string(PitchLanguage::English), "c");
    }

    #[test]
    fn test_rejects_invalid_pitch() {
        assert!(Pitch::new(7, 0, 4).is_err());
        assert!(Pitch::new(0, 3, 4).is_err());
        assert!(Pitch::new(0, 0, 10).is_err());
    }
}
