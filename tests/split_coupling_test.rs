//! Split and removal coupling with spanners across nested containers
//!
//! Splitting a leaf replaces it in place in every spanner that references
//! it; removing a subtree severs exactly the references inside it. Failed
//! edits leave the score unchanged.

use score_engine::models::{ComponentId, ContainerKind, Duration, Pitch};
use score_engine::spanners::kinds::{Beam, Hairpin, Slur, Tie};
use score_engine::{Score, ScoreError, SpannerId};

/// voice { L0 tuplet { L1 L2 L3 } L4 }
fn nested_voice(score: &mut Score) -> (ComponentId, ComponentId, Vec<ComponentId>) {
    let voice = score.new_container(ContainerKind::Voice {
        name: Some("one".into()),
    });
    let tuplet = score.new_container(ContainerKind::Tuplet { ratio: (3, 2) });
    let leaves: Vec<_> = (0..5)
        .map(|i| score.new_note(Pitch::from_semitones(60 + i), Duration::new(1, 8)))
        .collect();
    score.extend(tuplet, &leaves[1..4]).unwrap();
    score.extend(voice, &[leaves[0], tuplet, leaves[4]]).unwrap();
    (voice, tuplet, leaves)
}

fn leaves_of(score: &Score, spanner: SpannerId) -> Vec<ComponentId> {
    score.spanner(spanner).unwrap().leaves().to_vec()
}

#[test]
fn test_split_updates_every_referencing_spanner() {
    let mut score = Score::new();
    let (voice, _, l) = nested_voice(&mut score);
    let slur = score.attach(Slur::default(), &l).unwrap();
    let beam = score.attach(Beam::default(), &l[1..4]).unwrap();
    let hairpin = score.attach(Hairpin::crescendo(), &l[2..]).unwrap();
    let untouched = score.attach(Tie::default(), &l[..2]).unwrap();

    let (a, b) = score.split(l[2], Duration::new(1, 16)).unwrap();

    assert_eq!(leaves_of(&score, slur), vec![l[0], l[1], a, b, l[3], l[4]]);
    assert_eq!(leaves_of(&score, beam), vec![l[1], a, b, l[3]]);
    assert_eq!(leaves_of(&score, hairpin), vec![a, b, l[3], l[4]]);
    assert_eq!(leaves_of(&score, untouched), vec![l[0], l[1]]);
    assert_eq!(score.leaves_of(voice), vec![l[0], l[1], a, b, l[3], l[4]]);
    assert!(score.spanners_of(l[2]).is_empty(), "split-off leaf keeps no receptors");
}

#[test]
fn test_split_halves_inherit_tuplet_prolation() {
    let mut score = Score::new();
    let (_, tuplet, l) = nested_voice(&mut score);
    let (a, b) = score.split(l[1], Duration::new(1, 16)).unwrap();
    assert_eq!(score.parent(a), Some(tuplet));
    assert_eq!(score.prolated_duration(a), Some(Duration::new(1, 24)));
    assert_eq!(
        score.prolated_duration(a).unwrap() + score.prolated_duration(b).unwrap(),
        Duration::new(1, 12)
    );
}

#[test]
fn test_failed_split_changes_nothing() {
    let mut score = Score::new();
    let (voice, _, l) = nested_voice(&mut score);
    let slur = score.attach(Slur::default(), &l).unwrap();
    let before = score.clone();

    let result = score.split(l[1], Duration::new(1, 8));
    assert!(matches!(result, Err(ScoreError::SplitOffset { .. })));
    assert_eq!(score.component_count(), before.component_count());
    assert_eq!(score.leaves_of(voice), before.leaves_of(voice));
    assert_eq!(leaves_of(&score, slur), l);
}

#[test]
fn test_remove_tuplet_severs_its_leaves() {
    let mut score = Score::new();
    let (voice, tuplet, l) = nested_voice(&mut score);
    let slur = score.attach(Slur::default(), &l).unwrap();
    let inner = score.attach(Beam::default(), &l[1..4]).unwrap();
    let edge = score.attach(Hairpin::decrescendo(), &l[..2]).unwrap();

    score.remove(voice, tuplet).unwrap();

    assert_eq!(leaves_of(&score, slur), vec![l[0], l[4]]);
    assert_eq!(leaves_of(&score, edge), vec![l[0]]);
    assert!(score.spanner(inner).unwrap().is_blocked());
    for &leaf in &l[1..4] {
        assert!(score.spanners_of(leaf).is_empty());
    }
}

#[test]
fn test_reinserting_subtree_inside_spanner_absorbs_leaves() {
    let mut score = Score::new();
    let (voice, tuplet, l) = nested_voice(&mut score);
    score.remove(voice, tuplet).unwrap();
    let slur = score.attach(Slur::default(), &[l[0], l[4]]).unwrap();

    score.insert(voice, 1, tuplet).unwrap();
    assert_eq!(leaves_of(&score, slur), l);
}

#[test]
fn test_graft_replaces_tuplet_with_plain_notes() {
    let mut score = Score::new();
    let (voice, tuplet, l) = nested_voice(&mut score);
    let slur = score.attach(Slur::default(), &l).unwrap();

    let replacements: Vec<_> = (0..2)
        .map(|i| score.new_note(Pitch::from_semitones(70 + i), Duration::new(1, 8)))
        .collect();
    score.graft(tuplet, &replacements).unwrap();

    assert_eq!(
        leaves_of(&score, slur),
        vec![l[0], replacements[0], replacements[1], l[4]]
    );
    assert_eq!(score.parent(tuplet), None);
    assert_eq!(score.duration_of(voice), Duration::new(1, 2));
}
