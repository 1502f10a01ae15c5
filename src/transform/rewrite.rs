use crate::expression::{Node, parse};
use crate::foundation::error::BlocksResult;
use crate::transform::address::{Slot, StructuralAddress};

/// Replace the node at `address` inside `expression` with `replacement`.
///
/// Returns the canonical serialization of the result. Both texts are parsed before anything is
/// touched, so a malformed replacement fails without side effects. An address that no longer
/// resolves leaves the expression unchanged (apart from canonicalization).
#[tracing::instrument(skip(address), fields(steps = address.len()))]
pub fn transform(
    expression: &str,
    address: &StructuralAddress,
    replacement: &str,
) -> BlocksResult<String> {
    let replacement = parse(replacement)?;
    let root = parse(expression)?;

    let mut cursor = Cursor {
        address,
        at: 0,
        replacement: Some(replacement),
    };
    let out = cursor.visit(root, None, None);
    if !cursor.done() {
        tracing::debug!(
            resolved = cursor.at,
            "address did not resolve; expression left unchanged"
        );
    }
    Ok(out.to_canonical())
}

struct Cursor<'a> {
    address: &'a StructuralAddress,
    at: usize,
    /// Taken when the final step matches.
    replacement: Option<Node>,
}

impl Cursor<'_> {
    fn done(&self) -> bool {
        self.at >= self.address.len()
    }

    fn visit(&mut self, node: Node, slot: Option<Slot>, parent_text: Option<&str>) -> Node {
        if self.done() {
            return node;
        }
        let node = match node {
            // grouping is transparent to addressing and dropped from the output
            Node::Parenthesis(inner) => return self.visit(*inner, slot, parent_text),
            Node::Operator { op, operands } => {
                // operands are offered the cursor before their parent
                let own_text = Node::Operator {
                    op,
                    operands: operands.clone(),
                }
                .to_canonical();
                let node = Node::Operator {
                    op,
                    operands: self.visit_all(operands, &own_text),
                };
                if self.done() {
                    return node;
                }
                node
            }
            other => other,
        };

        let text = node.to_canonical();
        let step = &self.address.steps()[self.at];
        if step.matches(&text, slot, parent_text) {
            self.at += 1;
            if self.done() {
                if let Some(replacement) = self.replacement.take() {
                    return replacement;
                }
            }
        }

        match node {
            Node::Operator { op, operands } => Node::Operator {
                op,
                operands: self.visit_all(operands, &text),
            },
            Node::Function { name, operands } => Node::Function {
                name,
                operands: self.visit_all(operands, &text),
            },
            atom => atom,
        }
    }

    fn visit_all(&mut self, operands: Vec<Node>, parent_text: &str) -> Vec<Node> {
        operands
            .into_iter()
            .enumerate()
            .map(|(k, child)| self.visit(child, Some(Slot(k)), Some(parent_text)))
            .collect()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/transform/rewrite.rs"]
mod tests;
