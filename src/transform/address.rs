use std::fmt;
use std::str::FromStr;

use crate::foundation::error::BlocksError;

/// Operand position under a parent node, written `operand[k]`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Slot(pub usize);

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "operand[{}]", self.0)
    }
}

impl FromStr for Slot {
    type Err = BlocksError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.strip_prefix("operand[")
            .and_then(|rest| rest.strip_suffix(']'))
            .and_then(|k| k.parse::<usize>().ok())
            .map(Slot)
            .ok_or_else(|| BlocksError::config(format!("invalid operand slot '{s}'")))
    }
}

impl serde::Serialize for Slot {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> serde::Deserialize<'de> for Slot {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// One level of a structural address.
///
/// Texts are canonical serializations, so a step identifies a node by what it says, where it sits
/// under its parent, and what that parent says.
#[derive(Clone, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct AddressStep {
    pub node_text: String,
    /// `None` for the root.
    pub child_path: Option<Slot>,
    /// `None` for the root.
    pub parent_text: Option<String>,
}

impl AddressStep {
    pub fn root(node_text: impl Into<String>) -> Self {
        Self {
            node_text: node_text.into(),
            child_path: None,
            parent_text: None,
        }
    }

    pub fn child(node_text: impl Into<String>, slot: Slot, parent_text: impl Into<String>) -> Self {
        Self {
            node_text: node_text.into(),
            child_path: Some(slot),
            parent_text: Some(parent_text.into()),
        }
    }

    pub(crate) fn matches(
        &self,
        node_text: &str,
        slot: Option<Slot>,
        parent_text: Option<&str>,
    ) -> bool {
        self.node_text == node_text
            && self.child_path == slot
            && self.parent_text.as_deref() == parent_text
    }
}

/// Root-to-node chain of [`AddressStep`]s.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct StructuralAddress(Vec<AddressStep>);

impl StructuralAddress {
    pub fn new(steps: Vec<AddressStep>) -> Self {
        Self(steps)
    }

    /// Copy of `self` with `step` appended.
    pub fn extended(&self, step: AddressStep) -> Self {
        let mut steps = Vec::with_capacity(self.0.len() + 1);
        steps.extend_from_slice(&self.0);
        steps.push(step);
        Self(steps)
    }

    pub fn steps(&self) -> &[AddressStep] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn last(&self) -> Option<&AddressStep> {
        self.0.last()
    }
}

impl fmt::Display for StructuralAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, step) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(" > ")?;
            }
            match (&step.child_path, &step.parent_text) {
                (Some(slot), Some(parent)) => write!(f, "{slot} of {parent}: {}", step.node_text)?,
                _ => write!(f, "root: {}", step.node_text)?,
            }
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/transform/address.rs"]
mod tests;
