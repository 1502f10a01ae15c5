use crate::foundation::core::Point;
use crate::foundation::ids::PlacedId;

/// A root expression and where it sits on the canvas.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PlacedExpression {
    pub expression: String,
    /// Canvas-space origin (before scrolling).
    pub origin: Point,
}

impl PlacedExpression {
    pub fn new(expression: impl Into<String>, origin: Point) -> Self {
        Self {
            expression: expression.into(),
            origin,
        }
    }
}

/// Ordered placed expressions. Later entries draw on top of earlier ones.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PlacedExpressions {
    entries: Vec<(PlacedId, PlacedExpression)>,
    next_id: u64,
}

impl PlacedExpressions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append on top; the returned id is never handed out again.
    pub fn add(&mut self, placed: PlacedExpression) -> PlacedId {
        let id = PlacedId(self.next_id);
        self.next_id += 1;
        self.entries.push((id, placed));
        id
    }

    pub fn get(&self, id: PlacedId) -> Option<&PlacedExpression> {
        self.entries.iter().find(|(i, _)| *i == id).map(|(_, p)| p)
    }

    /// Replace in place, keeping id and z-order. Returns the previous value.
    pub fn set(&mut self, id: PlacedId, placed: PlacedExpression) -> Option<PlacedExpression> {
        let slot = self.entries.iter_mut().find(|(i, _)| *i == id)?;
        Some(std::mem::replace(&mut slot.1, placed))
    }

    pub fn remove(&mut self, id: PlacedId) -> Option<PlacedExpression> {
        let pos = self.entries.iter().position(|(i, _)| *i == id)?;
        Some(self.entries.remove(pos).1)
    }

    pub fn contains(&self, id: PlacedId) -> bool {
        self.get(id).is_some()
    }

    /// Bottom to top.
    pub fn iter(&self) -> impl Iterator<Item = (PlacedId, &PlacedExpression)> {
        self.entries.iter().map(|(i, p)| (*i, p))
    }

    pub fn ids(&self) -> Vec<PlacedId> {
        self.entries.iter().map(|(i, _)| *i).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drop everything; ids keep counting up.
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

impl FromIterator<PlacedExpression> for PlacedExpressions {
    fn from_iter<I: IntoIterator<Item = PlacedExpression>>(iter: I) -> Self {
        let mut out = Self::new();
        for p in iter {
            out.add(p);
        }
        out
    }
}

#[cfg(test)]
#[path = "../../tests/unit/interaction/placed.rs"]
mod tests;
