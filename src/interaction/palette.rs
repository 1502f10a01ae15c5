use crate::foundation::config::TemplateSpec;
use crate::foundation::core::Point;
use crate::foundation::error::BlocksResult;
use crate::foundation::ids::BlockId;
use crate::layout::block::BlockTree;
use crate::layout::walker::LayoutEngine;

/// Template blocks laid out once, in palette content space.
#[derive(Clone, Debug, PartialEq)]
pub struct Palette {
    templates: Vec<BlockTree>,
}

impl Palette {
    #[tracing::instrument(skip_all, fields(templates = specs.len()))]
    pub fn build(specs: &[TemplateSpec], engine: &mut LayoutEngine) -> BlocksResult<Self> {
        let mut templates = Vec::with_capacity(specs.len());
        for spec in specs {
            let mut tree = engine.layout(&spec.expression)?;
            tree.set_origin(spec.origin);
            tree.set_template(true);
            templates.push(tree);
        }
        Ok(Self { templates })
    }

    pub fn templates(&self) -> &[BlockTree] {
        &self.templates
    }

    pub fn get(&self, index: usize) -> Option<&BlockTree> {
        self.templates.get(index)
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }

    /// Template whose branch captures `point` (palette content space).
    pub fn hit_test(&self, point: Point) -> Option<(usize, BlockId)> {
        self.templates
            .iter()
            .enumerate()
            .rev()
            .find_map(|(i, t)| t.hit_test(point).map(|b| (i, b)))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/interaction/palette.rs"]
mod tests;
