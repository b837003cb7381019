use serde::{Deserialize, Serialize};

use super::with_direction;
use crate::models::{ComponentId, Direction};
use crate::spanners::{FormatContributor, Spanner};

/// Manual beam: `[` on the first leaf, `]` on the last
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Beam {
    pub direction: Option<Direction>,
}

impl Beam {
    pub fn new(direction: Option<Direction>) -> Self {
        Self { direction }
    }
}

impl FormatContributor for Beam {
    fn right_of_token(&self, spanner: &Spanner, leaf: ComponentId) -> Vec<String> {
        // A beam needs at least two stems
        if spanner.len() < 2 {
            return Vec::new();
        }
        let mut result = Vec::new();
        if spanner.is_first(leaf) {
            result.push(with_direction(self.direction, "["));
        }
        if spanner.is_last(leaf) {
            result.push("]".to_string());
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::SpannerId;

    #[test]
    fn test_single_leaf_beam_is_silent() {
        let beam = Beam::default();
        let s = Spanner::new(SpannerId(0), beam.clone().into(), vec![ComponentId(4)]);
        assert!(beam.right_of_token(&s, ComponentId(4)).is_empty());
    }

    #[test]
    fn test_beam_brackets() {
        let beam = Beam::new(Some(Direction::Up));
        let s = Spanner::new(
            SpannerId(0),
            beam.clone().into(),
            vec![ComponentId(1), ComponentId(2)],
        );
        assert_eq!(beam.right_of_token(&s, ComponentId(1)), vec!["^ ["]);
        assert_eq!(beam.right_of_token(&s, ComponentId(2)), vec!["]"]);
    }
}
