//! Parent/child consistency
//!
//! Every child listed by a container must point back at that container.

use super::{DiagnosticMark, DiagnosticSeverity, DiagnosticTarget};
use crate::models::ComponentId;
use crate::score::Score;

pub fn analyze_parentage(score: &Score, root: ComponentId) -> Vec<DiagnosticMark> {
    let mut marks = Vec::new();
    for container in score.descendants(root) {
        for &child in score.children(container) {
            let parent = score.parent(child);
            if parent != Some(container) {
                marks.push(DiagnosticMark::new(
                    DiagnosticTarget::Component(child),
                    DiagnosticSeverity::Error,
                    "parent_mismatch",
                    format!(
                        "{} is listed by {} but its parent is {:?}",
                        child, container, parent
                    ),
                ));
            }
        }
    }
    marks
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Duration;

    #[test]
    fn test_detects_parent_mismatch() {
        let mut score = Score::new();
        let staff = score.new_sequential();
        let rest = score.new_rest(Duration::new(1, 4));
        score.append(staff, rest).unwrap();
        score.write_parent(rest, None);

        let marks = analyze_parentage(&score, staff);
        assert_eq!(marks.len(), 1);
        assert_eq!(marks[0].kind, "parent_mismatch");
        assert_eq!(marks[0].target, DiagnosticTarget::Component(rest));
    }
}
