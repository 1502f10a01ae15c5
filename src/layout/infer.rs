use crate::expression::ast::{Node, Op, Value};
use crate::foundation::error::{BlocksError, BlocksResult};

/// Functions laid out as a text-equality test; their slots hold strings.
pub const EQUALITY_TEXT_FUNCTIONS: &[&str] = &["equalText"];

/// Displayed type of a slot or block.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResultType {
    Number,
    String,
    Boolean,
}

impl ResultType {
    /// Type of a literal, from its primitive kind.
    pub fn of_value(value: &Value) -> BlocksResult<Self> {
        match value {
            Value::Number(_) => Ok(Self::Number),
            Value::Str(_) => Ok(Self::String),
            Value::Bool(_) => Ok(Self::Boolean),
            Value::Null => Err(BlocksError::unknown_value(value.kind_name())),
        }
    }

    /// Expression text of the empty value left behind when a block of this type is pulled out.
    pub fn placeholder(self) -> &'static str {
        match self {
            Self::Number => "NaN",
            Self::Boolean => "true",
            Self::String => "\"\"",
        }
    }

    /// Corner radius of a box of `height` holding this type: pills for numbers, soft corners for
    /// strings, square for booleans.
    pub fn corner_radius(self, height: f64) -> f64 {
        match self {
            Self::Number => height / 2.0,
            Self::String => height / 4.0,
            Self::Boolean => 0.0,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Number => "number",
            Self::String => "string",
            Self::Boolean => "boolean",
        }
    }
}

impl std::fmt::Display for ResultType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum OperatorFamily {
    /// `+ - * /` and unary minus.
    Arithmetic,
    /// `> < >= <= == !=`.
    Relational,
    /// `not and or xor`.
    Logical,
}

pub(crate) fn operator_family(op: Op) -> Option<OperatorFamily> {
    match op {
        Op::Add | Op::Sub | Op::Mul | Op::Div | Op::Neg => Some(OperatorFamily::Arithmetic),
        Op::Gt | Op::Lt | Op::Ge | Op::Le | Op::Eq | Op::Ne => Some(OperatorFamily::Relational),
        Op::And | Op::Or | Op::Xor | Op::Not => Some(OperatorFamily::Logical),
        Op::Mod | Op::Pow => None,
    }
}

pub(crate) fn is_equality_text_function(name: &str) -> bool {
    EQUALITY_TEXT_FUNCTIONS.contains(&name)
}

/// Type expected by an operand slot of `parent`; `None` is the root slot.
pub fn infer_slot_type(parent: Option<&Node>) -> BlocksResult<ResultType> {
    let Some(parent) = parent else {
        return Ok(ResultType::Number);
    };
    match parent.strip_parens() {
        Node::Operator { op, .. } => match operator_family(*op) {
            Some(OperatorFamily::Arithmetic | OperatorFamily::Relational) => Ok(ResultType::Number),
            Some(OperatorFamily::Logical) => Ok(ResultType::Boolean),
            None => Err(BlocksError::unknown_operator(op.symbol())),
        },
        Node::Function { name, .. } if is_equality_text_function(name) => Ok(ResultType::String),
        Node::Function { name, .. } => Err(BlocksError::unknown_operator(format!(
            "function {name}"
        ))),
        other => Err(BlocksError::unknown_operator(other.kind_name())),
    }
}

/// Type produced by a composite node: arithmetic yields a number, everything else a boolean.
pub(crate) fn produced_type(node: &Node) -> BlocksResult<ResultType> {
    match node.strip_parens() {
        Node::Operator { op, .. } => match operator_family(*op) {
            Some(OperatorFamily::Arithmetic) => Ok(ResultType::Number),
            Some(OperatorFamily::Relational | OperatorFamily::Logical) => Ok(ResultType::Boolean),
            None => Err(BlocksError::unknown_operator(op.symbol())),
        },
        Node::Function { name, .. } if is_equality_text_function(name) => Ok(ResultType::Boolean),
        Node::Function { name, .. } => Err(BlocksError::unknown_function(name.clone())),
        other => Err(BlocksError::unknown_operator(other.kind_name())),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/layout/infer.rs"]
mod tests;
