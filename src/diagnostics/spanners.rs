//! Spanner diagnostics
//!
//! - Errors: gaps in an active spanner's run, and receptor lists that
//!   disagree with spanner leaf lists (missing, stale or blocked entries).
//! - Warnings: two spanners of the same exclusive kind sharing more than a
//!   boundary leaf, and hairpins too short to draw.

use std::collections::{BTreeSet, HashSet};

use super::{DiagnosticMark, DiagnosticSeverity, DiagnosticTarget};
use crate::models::{ComponentId, SpannerId};
use crate::score::Score;
use crate::spanners::SpannerKind;

/// Analyze every spanner that touches a leaf under `root`
pub fn analyze_spanners(score: &Score, root: ComponentId) -> Vec<DiagnosticMark> {
    let leaves = score.leaves_of(root);
    let under_root: HashSet<ComponentId> = leaves.iter().copied().collect();

    let mut marks = Vec::new();
    let mut relevant = BTreeSet::new();

    for spanner in score.active_spanners() {
        if spanner.leaves().iter().any(|l| under_root.contains(l)) {
            relevant.insert(spanner.id());
        }
    }

    for &leaf in &leaves {
        for &id in score.spanners_of(leaf) {
            match score.spanner(id) {
                Err(_) => marks.push(receptor_mark(
                    leaf,
                    "receptor_unknown",
                    format!("{} lists unknown {}", leaf, id),
                )),
                Ok(spanner) if spanner.is_blocked() => marks.push(receptor_mark(
                    leaf,
                    "receptor_blocked",
                    format!("{} still lists blocked {}", leaf, id),
                )),
                Ok(spanner) if !spanner.contains(leaf) => marks.push(receptor_mark(
                    leaf,
                    "receptor_stale",
                    format!("{} lists {} which does not reference it", leaf, id),
                )),
                Ok(_) => {
                    relevant.insert(id);
                }
            }
        }
    }

    for &id in &relevant {
        marks.extend(check_spanner(score, id));
    }
    marks.extend(find_overlaps(score, &relevant));
    marks
}

fn receptor_mark(leaf: ComponentId, kind: &str, message: String) -> DiagnosticMark {
    DiagnosticMark::new(
        DiagnosticTarget::Component(leaf),
        DiagnosticSeverity::Error,
        kind,
        message,
    )
}

fn check_spanner(score: &Score, id: SpannerId) -> Vec<DiagnosticMark> {
    let mut marks = Vec::new();
    let Ok(spanner) = score.spanner(id) else {
        return marks;
    };
    let target = DiagnosticTarget::Spanner(id);

    if let Err(error) = score.validate_spanner(id) {
        marks.push(DiagnosticMark::new(
            target,
            DiagnosticSeverity::Error,
            "spanner_gap",
            error.to_string(),
        ));
    }

    for &leaf in spanner.leaves() {
        if !score.spanners_of(leaf).contains(&id) {
            marks.push(DiagnosticMark::new(
                target,
                DiagnosticSeverity::Error,
                "receptor_missing",
                format!("{} references {} but is not listed there", id, leaf),
            ));
        }
    }

    if matches!(spanner.kind(), SpannerKind::Hairpin(_)) && spanner.len() < 2 {
        marks.push(DiagnosticMark::new(
            target,
            DiagnosticSeverity::Warning,
            "hairpin_too_short",
            format!("{} covers {} leaf and will not be drawn", id, spanner.len()),
        ));
    }
    marks
}

/// Pairs of same-kind exclusive spanners sharing two or more leaves
fn find_overlaps(score: &Score, relevant: &BTreeSet<SpannerId>) -> Vec<DiagnosticMark> {
    let spanners: Vec<_> = relevant
        .iter()
        .filter_map(|&id| score.spanner(id).ok())
        .filter(|s| s.kind().is_exclusive())
        .collect();

    let mut marks = Vec::new();
    for (i, a) in spanners.iter().enumerate() {
        for b in &spanners[i + 1..] {
            if !a.kind().same_variant(b.kind()) {
                continue;
            }
            let shared = a.leaves().iter().filter(|&&l| b.contains(l)).count();
            if shared >= 2 {
                marks.push(DiagnosticMark::new(
                    DiagnosticTarget::Spanner(b.id()),
                    DiagnosticSeverity::Warning,
                    "overlapping_spanners",
                    format!(
                        "{} and {} are both {} spanners sharing {} leaves",
                        a.id(),
                        b.id(),
                        a.kind().name(),
                        shared
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
    use crate::models::{Duration, Pitch};
    use crate::spanners::kinds::{Beam, Hairpin, Slur};

    fn staff(score: &mut Score, count: usize) -> (ComponentId, Vec<ComponentId>) {
        let staff = score.new_sequential();
        let notes: Vec<_> = (0..count)
            .map(|i| score.new_note(Pitch::from_semitones(60 + i as i32), Duration::new(1, 8)))
            .collect();
        score.extend(staff, &notes).unwrap();
        (staff, notes)
    }

    #[test]
    fn test_detects_gap_and_missing_receptor() {
        let mut score = Score::new();
        let (root, n) = staff(&mut score, 3);
        let slur = score.push_spanner(Slur::default().into());
        score.write_spanner_leaves(slur, vec![n[0], n[2]]);
        score.add_receptor(n[0], slur);

        let marks = analyze_spanners(&score, root);
        let kinds: Vec<_> = marks.iter().map(|m| m.kind.as_str()).collect();
        assert!(kinds.contains(&"spanner_gap"));
        assert!(kinds.contains(&"receptor_missing"));
    }

    #[test]
    fn test_detects_stale_receptor() {
        let mut score = Score::new();
        let (root, n) = staff(&mut score, 2);
        let slur = score.attach(Slur::default(), &n[..1]).unwrap();
        score.add_receptor(n[1], slur);

        let marks = analyze_spanners(&score, root);
        assert_eq!(marks.len(), 1);
        assert_eq!(marks[0].kind, "receptor_stale");
        assert_eq!(marks[0].target, DiagnosticTarget::Component(n[1]));
    }

    #[test]
    fn test_warns_on_overlap_and_short_hairpin() {
        let mut score = Score::new();
        let (root, n) = staff(&mut score, 4);
        score.attach(Beam::default(), &n[..3]).unwrap();
        score.attach(Beam::default(), &n[1..]).unwrap();
        // Touching at one leaf is fine
        score.attach(Slur::default(), &n[..2]).unwrap();
        score.attach(Slur::default(), &n[1..]).unwrap();
        score.attach(Hairpin::crescendo(), &n[..1]).unwrap();

        let marks = analyze_spanners(&score, root);
        assert_eq!(
            marks.iter().filter(|m| m.kind == "overlapping_spanners").count(),
            1
        );
        assert_eq!(
            marks.iter().filter(|m| m.kind == "hairpin_too_short").count(),
            1
        );
        assert!(marks.iter().all(|m| m.severity == DiagnosticSeverity::Warning));
    }
}
