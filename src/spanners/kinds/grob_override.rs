use serde::{Deserialize, Serialize};

use crate::models::ComponentId;
use crate::spanners::{FormatContributor, Spanner};

/// Grob property override held for the duration of the run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GrobOverride {
    /// Context name, e.g. "Staff"; the bottom context when absent
    pub context: Option<String>,
    pub grob: String,
    pub attribute: String,
    /// Scheme value, written verbatim after `#`
    pub value: String,
}

impl GrobOverride {
    pub fn new(
        grob: impl Into<String>,
        attribute: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        Self {
            context: None,
            grob: grob.into(),
            attribute: attribute.into(),
            value: value.into(),
        }
    }

    pub fn in_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }

    fn path(&self) -> String {
        match &self.context {
            Some(context) => format!("{}.{}.{}", context, self.grob, self.attribute),
            None => format!("{}.{}", self.grob, self.attribute),
        }
    }

    fn override_string(&self) -> String {
        format!("\\override {} = #{}", self.path(), self.value)
    }

    fn revert_string(&self) -> String {
        match &self.context {
            Some(context) => format!("\\revert {}.{}.{}", context, self.grob, self.attribute),
            None => format!("\\revert {}.{}", self.grob, self.attribute),
        }
    }
}

impl FormatContributor for GrobOverride {
    fn before(&self, spanner: &Spanner, leaf: ComponentId) -> Vec<String> {
        if spanner.is_only(leaf) {
            vec![format!("\\once {}", self.override_string())]
        } else if spanner.is_first(leaf) {
            vec![self.override_string()]
        } else {
            Vec::new()
        }
    }

    fn after(&self, spanner: &Spanner, leaf: ComponentId) -> Vec<String> {
        if spanner.is_last(leaf) && !spanner.is_only(leaf) {
            vec![self.revert_string()]
        } else {
            Vec::new()
        }
    }
}
