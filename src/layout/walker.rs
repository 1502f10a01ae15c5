use crate::expression::{Node, Value, parse};
use crate::foundation::config::{BlocksConfig, GeometryConfig};
use crate::foundation::core::Vec2;
use crate::foundation::error::{BlocksError, BlocksResult};
use crate::foundation::ids::BlockId;
use crate::layout::block::{BlockFlags, BlockShape, BlockTree, Highlight, VisualBlock};
use crate::layout::geometry::{ChildSlot, GeometryBuilder};
use crate::layout::infer::{
    OperatorFamily, ResultType, infer_slot_type, is_equality_text_function, operator_family,
    produced_type,
};
use crate::layout::measure::{TextMeasure, measure_from_config};
use crate::transform::address::{AddressStep, Slot, StructuralAddress};

/// Turns expression text into a [`BlockTree`].
pub struct LayoutEngine {
    cfg: GeometryConfig,
    measure: Box<dyn TextMeasure>,
}

impl LayoutEngine {
    pub fn new(cfg: GeometryConfig, measure: Box<dyn TextMeasure>) -> Self {
        Self { cfg, measure }
    }

    pub fn from_config(cfg: &BlocksConfig) -> BlocksResult<Self> {
        Ok(Self::new(
            cfg.geometry.clone(),
            measure_from_config(&cfg.measure)?,
        ))
    }

    pub fn geometry(&self) -> &GeometryConfig {
        &self.cfg
    }

    /// Parse and lay out `text`.
    ///
    /// Fails on malformed text or on any node kind without a block shape; nothing is partially
    /// built in that case.
    #[tracing::instrument(skip(self), fields(len = text.len()))]
    pub fn layout(&mut self, text: &str) -> BlocksResult<BlockTree> {
        let node = parse(text)?;
        self.layout_node(&node)
    }

    pub fn layout_node(&mut self, node: &Node) -> BlocksResult<BlockTree> {
        let mut walk = Walk {
            builder: GeometryBuilder::new(&self.cfg, self.measure.as_mut()),
            blocks: Vec::new(),
            leaves: Vec::new(),
            branches: Vec::new(),
        };
        let root = walk.visit(node, None, &StructuralAddress::default())?;
        walk.blocks[root.index()].flags.is_root = true;

        tracing::debug!(
            blocks = walk.blocks.len(),
            leaves = walk.leaves.len(),
            "laid out expression"
        );
        Ok(BlockTree::from_parts(
            walk.blocks,
            root,
            walk.leaves,
            walk.branches,
        ))
    }
}

impl std::fmt::Debug for LayoutEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LayoutEngine")
            .field("cfg", &self.cfg)
            .finish_non_exhaustive()
    }
}

/// Parent seen from one of its operands.
#[derive(Clone, Copy)]
struct ParentCtx<'n> {
    node: &'n Node,
    text: &'n str,
    slot: Slot,
}

struct Walk<'a> {
    builder: GeometryBuilder<'a>,
    blocks: Vec<VisualBlock>,
    leaves: Vec<BlockId>,
    branches: Vec<BlockId>,
}

impl Walk<'_> {
    fn visit(
        &mut self,
        node: &Node,
        parent: Option<ParentCtx<'_>>,
        prefix: &StructuralAddress,
    ) -> BlocksResult<BlockId> {
        let node = node.strip_parens();
        let text = node.to_canonical();
        let step = match parent {
            Some(p) => AddressStep::child(text.clone(), p.slot, p.text),
            None => AddressStep::root(text.clone()),
        };
        let address = prefix.extended(step);

        match node {
            Node::Symbol(name) => {
                let ty = infer_slot_type(parent.map(|p| p.node))?;
                self.push_leaf(name.clone(), ty, text, address)
            }
            Node::Constant(value) => {
                let ty = ResultType::of_value(value)?;
                self.push_leaf(constant_label(value), ty, text, address)
            }
            Node::Operator { op, operands } => {
                let ty = produced_type(node)?;
                let stacked = match operator_family(*op) {
                    Some(OperatorFamily::Logical) => true,
                    Some(_) => op.is_unary() || operands.len() != 2,
                    None => return Err(BlocksError::unknown_operator(op.symbol())),
                };
                self.push_branch(node, op.symbol().to_owned(), stacked, ty, text, address)
            }
            Node::Function { name, .. } => {
                if !is_equality_text_function(name) {
                    return Err(BlocksError::unknown_function(name.clone()));
                }
                let ty = produced_type(node)?;
                self.push_branch(node, name.clone(), true, ty, text, address)
            }
            Node::Parenthesis(inner) => self.visit(inner, parent, prefix),
        }
    }

    fn push_leaf(
        &mut self,
        label: String,
        result_type: ResultType,
        expression: String,
        address: StructuralAddress,
    ) -> BlocksResult<BlockId> {
        let (size, shape) = self.builder.atomic(&label);
        let id = self.next_id()?;
        self.blocks.push(VisualBlock {
            id,
            parent: None,
            children: Vec::new(),
            offset: Vec2::ZERO,
            size,
            shape: BlockShape::Leaf(shape),
            result_type,
            flags: BlockFlags {
                is_leaf: true,
                ..BlockFlags::default()
            },
            expression,
            address,
            highlight: Highlight::default(),
        });
        self.leaves.push(id);
        Ok(id)
    }

    fn push_branch(
        &mut self,
        node: &Node,
        label: String,
        stacked: bool,
        result_type: ResultType,
        expression: String,
        address: StructuralAddress,
    ) -> BlocksResult<BlockId> {
        let mut children = Vec::with_capacity(node.operands().len());
        for (k, operand) in node.operands().iter().enumerate() {
            let ctx = ParentCtx {
                node,
                text: &expression,
                slot: Slot(k),
            };
            children.push(self.visit(operand, Some(ctx), &address)?);
        }

        let slots: Vec<ChildSlot> = children
            .iter()
            .map(|&c| {
                let b = &self.blocks[c.index()];
                ChildSlot {
                    size: b.size,
                    is_leaf: b.is_leaf(),
                    result_type: b.result_type,
                }
            })
            .collect();
        let geometry = match slots.as_slice() {
            [l, r] if !stacked => self.builder.binary(&label, l, r),
            _ => self.builder.dynamic(&label, &slots),
        };

        let id = self.next_id()?;
        for (&child, offset) in children.iter().zip(geometry.child_offsets) {
            let b = &mut self.blocks[child.index()];
            b.parent = Some(id);
            b.offset = offset;
        }
        self.blocks.push(VisualBlock {
            id,
            parent: None,
            children,
            offset: Vec2::ZERO,
            size: geometry.size,
            shape: BlockShape::Branch(geometry.shape),
            result_type,
            flags: BlockFlags::default(),
            expression,
            address,
            highlight: Highlight::default(),
        });
        self.branches.push(id);
        Ok(id)
    }

    fn next_id(&self) -> BlocksResult<BlockId> {
        u32::try_from(self.blocks.len())
            .map(BlockId)
            .map_err(|_| anyhow::anyhow!("block arena exceeds u32 ids").into())
    }
}

/// Atom label; `NaN` reads as an empty slot and strings show unquoted.
fn constant_label(value: &Value) -> String {
    match value {
        Value::Number(v) if v.is_nan() => String::new(),
        Value::Str(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/layout/walker.rs"]
mod tests;
