use serde::{Deserialize, Serialize};

use crate::models::ComponentId;
use crate::spanners::{FormatContributor, Spanner};

/// Octave transposition bracket (8va, 8vb, 15ma)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ottava {
    /// Octaves up (positive) or down (negative)
    pub shift: i8,
}

impl Default for Ottava {
    fn default() -> Self {
        Self { shift: 1 }
    }
}

impl Ottava {
    pub fn new(shift: i8) -> Self {
        Self { shift }
    }
}

impl FormatContributor for Ottava {
    fn before(&self, spanner: &Spanner, leaf: ComponentId) -> Vec<String> {
        if spanner.is_first(leaf) {
            vec![format!("\\ottava #{}", self.shift)]
        } else {
            Vec::new()
        }
    }

    fn after(&self, spanner: &Spanner, leaf: ComponentId) -> Vec<String> {
        if spanner.is_last(leaf) {
            vec!["\\ottava #0".to_string()]
        } else {
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::SpannerId;

    #[test]
    fn test_ottava_wraps_run() {
        let ottava = Ottava::new(-1);
        let s = Spanner::new(
            SpannerId(0),
            ottava.clone().into(),
            vec![ComponentId(0), ComponentId(1)],
        );
        assert_eq!(ottava.before(&s, ComponentId(0)), vec!["\\ottava #-1"]);
        assert!(ottava.after(&s, ComponentId(0)).is_empty());
        assert_eq!(ottava.after(&s, ComponentId(1)), vec!["\\ottava #0"]);
        assert!(ottava.right_of_token(&s, ComponentId(0)).is_empty());
    }
}
