//! LilyPond notation generation
//!
//! Containers become indented blocks. A leaf becomes its `before` lines,
//! then one line of `left... token marks... right...`, then its `after`
//! lines, where the slot fragments come from the leaf's active spanners.

use super::settings::FormatSettings;
use crate::errors::ScoreResult;
use crate::models::{ComponentBody, ComponentId, Container, ContainerKind, Leaf};
use crate::score::Score;

pub struct LilyPondFormatter<'a> {
    score: &'a Score,
    settings: &'a FormatSettings,
}

impl<'a> LilyPondFormatter<'a> {
    pub fn new(score: &'a Score, settings: &'a FormatSettings) -> Self {
        Self { score, settings }
    }

    /// Format the subtree under `root`, one statement per line
    pub fn format(&self, root: ComponentId) -> ScoreResult<String> {
        let mut lines = Vec::new();
        self.push_component(root, 0, &mut lines)?;
        Ok(lines.join("\n"))
    }

    /// Primary token of a leaf: pitch content plus duration
    pub fn leaf_token(&self, leaf: &Leaf) -> String {
        format!(
            "{}{}",
            leaf.kind.body(self.settings.language),
            leaf.duration.to_lilypond_string()
        )
    }

    /// The lines one leaf formats to, without indentation
    pub fn leaf_lines(&self, id: ComponentId) -> ScoreResult<Vec<String>> {
        let leaf = self.score.leaf(id)?;
        let contributions = self.score.contributions(id);

        let mut words = contributions.left_of_token.clone();
        words.push(self.leaf_token(leaf));
        words.extend(leaf.marks.iter().map(|m| m.to_lilypond_string()));
        words.extend(contributions.right_of_token.iter().cloned());

        let mut lines = contributions.before;
        lines.push(words.join(" "));
        lines.extend(contributions.after);
        Ok(lines)
    }

    fn push_component(
        &self,
        id: ComponentId,
        depth: usize,
        lines: &mut Vec<String>,
    ) -> ScoreResult<()> {
        let indent = " ".repeat(self.settings.indent * depth);
        match &self.score.component(id)?.body {
            ComponentBody::Leaf(_) => {
                for line in self.leaf_lines(id)? {
                    lines.push(format!("{}{}", indent, line));
                }
            }
            ComponentBody::Container(container) => {
                lines.push(format!("{}{}", indent, opening(container)));
                if let ContainerKind::Measure { time_signature } = &container.kind {
                    let inner = " ".repeat(self.settings.indent * (depth + 1));
                    lines.push(format!(
                        "{}\\time {}/{}",
                        inner, time_signature.numerator, time_signature.denominator
                    ));
                }
                for &child in container.children() {
                    self.push_component(child, depth + 1, lines)?;
                }
                lines.push(format!("{}{}", indent, closing(container)));
            }
        }
        Ok(())
    }
}

fn opening(container: &Container) -> String {
    match &container.kind {
        ContainerKind::Sequential | ContainerKind::Measure { .. } => "{".to_string(),
        ContainerKind::Simultaneous => "<<".to_string(),
        ContainerKind::Voice { name } => context_opening("Voice", name.as_deref()),
        ContainerKind::Staff { name } => context_opening("Staff", name.as_deref()),
        ContainerKind::Tuplet {
            ratio: (actual, normal),
        } => format!("\\tuplet {}/{} {{", actual, normal),
    }
}

fn closing(container: &Container) -> &'static str {
    if container.kind.is_simultaneous() {
        ">>"
    } else {
        "}"
    }
}

fn context_opening(context: &str, name: Option<&str>) -> String {
    match name {
        Some(name) => format!("\\new {} = \"{}\" {{", context, name),
        None => format!("\\new {} {{", context),
    }
}

/// Format the subtree under `root` with `settings`
pub fn format_component(
    score: &Score,
    root: ComponentId,
    settings: &FormatSettings,
) -> ScoreResult<String> {
    LilyPondFormatter::new(score, settings).format(root)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Duration, LeafKind, Mark, Pitch, TimeSignature};
    use crate::spanners::kinds::Slur;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_format_nested_containers() {
        let mut score = Score::new();
        let measure = score.new_container(ContainerKind::Measure {
            time_signature: TimeSignature::new(2, 4),
        });
        let tuplet = score.new_container(ContainerKind::Tuplet { ratio: (3, 2) });
        let notes: Vec<_> = (0..3)
            .map(|i| score.new_note(Pitch::from_semitones(60 + 2 * i), Duration::new(1, 8)))
            .collect();
        score.extend(tuplet, &notes).unwrap();
        let rest = score.new_rest(Duration::new(1, 4));
        score.extend(measure, &[tuplet, rest]).unwrap();

        let settings = FormatSettings {
            indent: 2,
            ..FormatSettings::default()
        };
        let expected = "{\n  \\time 2/4\n  \\tuplet 3/2 {\n    c'8\n    d'8\n    e'8\n  }\n  r4\n}";
        assert_eq!(format_component(&score, measure, &settings).unwrap(), expected);
    }

    #[test]
    fn test_leaf_line_orders_slots_and_marks() {
        let mut score = Score::new();
        let staff = score.new_container(ContainerKind::Staff { name: None });
        let a = score.new_leaf(
            LeafKind::Chord(vec![Pitch::middle_c(), Pitch::from_semitones(64)]),
            Duration::new(3, 8),
        );
        let b = score.new_note(Pitch::from_semitones(62), Duration::new(1, 8));
        score.extend(staff, &[a, b]).unwrap();
        score.leaf_mut(a).unwrap().marks.push(Mark::Dynamic("p".into()));
        score.attach(Slur::default(), &[a, b]).unwrap();

        let settings = FormatSettings::default();
        let formatter = LilyPondFormatter::new(&score, &settings);
        assert_eq!(formatter.leaf_lines(a).unwrap(), vec!["<c' e'>4. \\p ("]);
        assert_eq!(formatter.leaf_lines(b).unwrap(), vec!["d'8 )"]);
    }
}
