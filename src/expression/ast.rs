use std::fmt;

/// Literal payload of a [`Node::Constant`].
#[derive(Debug, Clone)]
pub enum Value {
    Number(f64),
    Str(String),
    Bool(bool),
    /// Parses, but has no displayable kind.
    Null,
}

// `NaN` is the placeholder for an empty number slot, so two placeholders compare equal.
impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Number(a), Value::Number(b)) => a == b || (a.is_nan() && b.is_nan()),
            (Value::Str(a), Value::Str(b)) => a == b,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Null, Value::Null) => true,
            _ => false,
        }
    }
}

impl Value {
    /// Primitive kind name, as reported in `UnknownValueKind` errors.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Value::Number(_) => "number",
            Value::Str(_) => "string",
            Value::Bool(_) => "boolean",
            Value::Null => "null",
        }
    }
}

/// Operator symbols the grammar understands. Not all of them can be laid out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Op {
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    Pow,
    Gt,
    Lt,
    Ge,
    Le,
    Eq,
    Ne,
    And,
    Or,
    Xor,
    Not,
    /// Unary minus.
    Neg,
}

impl Op {
    pub fn symbol(self) -> &'static str {
        match self {
            Op::Add => "+",
            Op::Sub | Op::Neg => "-",
            Op::Mul => "*",
            Op::Div => "/",
            Op::Mod => "%",
            Op::Pow => "^",
            Op::Gt => ">",
            Op::Lt => "<",
            Op::Ge => ">=",
            Op::Le => "<=",
            Op::Eq => "==",
            Op::Ne => "!=",
            Op::And => "and",
            Op::Or => "or",
            Op::Xor => "xor",
            Op::Not => "not",
        }
    }

    /// Word operators are separated from their operands by spaces when serialized.
    pub fn is_keyword(self) -> bool {
        matches!(self, Op::And | Op::Or | Op::Xor | Op::Not)
    }

    pub fn is_unary(self) -> bool {
        matches!(self, Op::Not | Op::Neg)
    }
}

impl fmt::Display for Op {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// Parsed expression tree.
///
/// Trees are throwaway values: the layout pass and the transformer each parse their own copy.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Symbol(String),
    Constant(Value),
    Operator { op: Op, operands: Vec<Node> },
    Function { name: String, operands: Vec<Node> },
    /// Explicit grouping from the source text.
    Parenthesis(Box<Node>),
}

impl Node {
    pub fn operands(&self) -> &[Node] {
        match self {
            Node::Operator { operands, .. } | Node::Function { operands, .. } => operands,
            Node::Symbol(_) | Node::Constant(_) | Node::Parenthesis(_) => &[],
        }
    }

    /// Skip any number of wrapping [`Node::Parenthesis`] layers.
    pub fn strip_parens(&self) -> &Node {
        let mut n = self;
        while let Node::Parenthesis(inner) = n {
            n = inner;
        }
        n
    }

    pub fn kind_name(&self) -> &'static str {
        match self {
            Node::Symbol(_) => "Symbol",
            Node::Constant(_) => "Constant",
            Node::Operator { .. } => "Operator",
            Node::Function { .. } => "Function",
            Node::Parenthesis(_) => "Parenthesis",
        }
    }

    /// Fully parenthesized serialization; stable across re-parses.
    pub fn to_canonical(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Number(v) => fmt_number(*v, f),
            Value::Str(s) => {
                f.write_str("\"")?;
                for ch in s.chars() {
                    match ch {
                        '"' => f.write_str("\\\"")?,
                        '\\' => f.write_str("\\\\")?,
                        '\n' => f.write_str("\\n")?,
                        '\t' => f.write_str("\\t")?,
                        '\r' => f.write_str("\\r")?,
                        c => write!(f, "{c}")?,
                    }
                }
                f.write_str("\"")
            }
            Value::Bool(b) => write!(f, "{b}"),
            Value::Null => f.write_str("null"),
        }
    }
}

fn fmt_number(v: f64, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    if v.is_nan() {
        f.write_str("NaN")
    } else if v.is_infinite() {
        f.write_str(if v > 0.0 { "Infinity" } else { "-Infinity" })
    } else {
        write!(f, "{v}")
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Node::Symbol(name) => f.write_str(name),
            Node::Constant(v) => write!(f, "{v}"),
            Node::Parenthesis(inner) => write!(f, "{inner}"),
            Node::Operator { op, operands } => match operands.as_slice() {
                [x] if op.is_keyword() => write!(f, "({op} {x})"),
                [x] => write!(f, "({op}{x})"),
                [l, r] if op.is_keyword() => write!(f, "({l} {op} {r})"),
                [l, r] => write!(f, "({l}{op}{r})"),
                rest => {
                    f.write_str("(")?;
                    for (i, x) in rest.iter().enumerate() {
                        if i > 0 {
                            if op.is_keyword() {
                                write!(f, " {op} ")?;
                            } else {
                                write!(f, "{op}")?;
                            }
                        }
                        write!(f, "{x}")?;
                    }
                    f.write_str(")")
                }
            },
            Node::Function { name, operands } => {
                write!(f, "{name}(")?;
                for (i, x) in operands.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{x}")?;
                }
                f.write_str(")")
            }
        }
    }
}
