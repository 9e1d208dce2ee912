//! Typed Python syntax tree.
//!
//! The node set is closed: every construct the reader understands is a
//! variant here, including the ones the translator refuses (classes,
//! comprehensions, `try`, ...). Refusal is a translation decision, not a
//! parsing one.

use serde::Serialize;

/// A parsed Python module.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Module {
    pub body: Vec<Stmt>,
}

/// A statement together with the 1-based source line it starts on.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Stmt {
    pub kind: StmtKind,
    pub line: usize,
}

impl Stmt {
    pub fn new(kind: StmtKind, line: usize) -> Self {
        Self { kind, line }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum StmtKind {
    FunctionDef(FunctionDef),
    Return(Option<Expr>),
    Delete(Vec<Expr>),
    /// `a = b = value` has targets `[a, b]`.
    Assign {
        targets: Vec<Expr>,
        value: Expr,
    },
    AugAssign {
        target: Expr,
        op: BinaryOp,
        value: Expr,
    },
    AnnAssign {
        target: Expr,
        annotation: Expr,
        value: Option<Expr>,
    },
    For {
        target: Expr,
        iter: Expr,
        body: Vec<Stmt>,
        orelse: Vec<Stmt>,
        is_async: bool,
    },
    While {
        test: Expr,
        body: Vec<Stmt>,
        orelse: Vec<Stmt>,
    },
    /// `elif` is an `If` as the only statement of `orelse`.
    If {
        test: Expr,
        body: Vec<Stmt>,
        orelse: Vec<Stmt>,
    },
    Import(Vec<Alias>),
    /// `level` counts the leading dots of a relative import. A wildcard
    /// import has a single alias named `*`.
    ImportFrom {
        module: Option<String>,
        level: usize,
        names: Vec<Alias>,
    },
    Expr(Expr),
    Pass,
    Break,
    Continue,
    ClassDef {
        name: String,
    },
    Try,
    Raise,
    With {
        is_async: bool,
    },
    Global(Vec<String>),
    Nonlocal(Vec<String>),
    Assert,
    Match,
    TypeAlias,
}

impl StmtKind {
    /// Human-readable construct name, used in diagnostics.
    pub fn name(&self) -> &'static str {
        match self {
            StmtKind::FunctionDef(_) => "function definition",
            StmtKind::Return(_) => "return statement",
            StmtKind::Delete(_) => "del statement",
            StmtKind::Assign { .. } => "assignment",
            StmtKind::AugAssign { .. } => "augmented assignment",
            StmtKind::AnnAssign { .. } => "annotated assignment",
            StmtKind::For { .. } => "for loop",
            StmtKind::While { .. } => "while loop",
            StmtKind::If { .. } => "if statement",
            StmtKind::Import(_) => "import statement",
            StmtKind::ImportFrom { .. } => "from-import statement",
            StmtKind::Expr(_) => "expression statement",
            StmtKind::Pass => "pass statement",
            StmtKind::Break => "break statement",
            StmtKind::Continue => "continue statement",
            StmtKind::ClassDef { .. } => "class definition",
            StmtKind::Try => "try statement",
            StmtKind::Raise => "raise statement",
            StmtKind::With { .. } => "with statement",
            StmtKind::Global(_) => "global statement",
            StmtKind::Nonlocal(_) => "nonlocal statement",
            StmtKind::Assert => "assert statement",
            StmtKind::Match => "match statement",
            StmtKind::TypeAlias => "type alias",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FunctionDef {
    pub name: String,
    pub args: Arguments,
    pub body: Vec<Stmt>,
    /// Outermost decorator first, as written in source.
    pub decorators: Vec<Expr>,
    pub is_async: bool,
}

/// Parameter list of a `def` or `lambda`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Arguments {
    /// Parameters before a `/` marker.
    pub posonly: Vec<Arg>,
    pub args: Vec<Arg>,
    pub vararg: Option<String>,
    /// Parameters after `*` or `*args`.
    pub kwonly: Vec<Arg>,
    pub kwarg: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Arg {
    pub name: String,
    pub default: Option<Expr>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Alias {
    /// Dotted module or member name.
    pub name: String,
    pub asname: Option<String>,
}

/// A keyword argument at a call site. `arg` is `None` for `**mapping`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Keyword {
    pub arg: Option<String>,
    pub value: Expr,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Expr {
    /// `a and b and c` is one node with three values.
    BoolOp {
        op: BoolOp,
        values: Vec<Expr>,
    },
    NamedExpr {
        target: String,
        value: Box<Expr>,
    },
    BinOp {
        left: Box<Expr>,
        op: BinaryOp,
        right: Box<Expr>,
    },
    UnaryOp {
        op: UnaryOp,
        operand: Box<Expr>,
    },
    Lambda {
        args: Arguments,
        body: Box<Expr>,
    },
    IfExp {
        test: Box<Expr>,
        body: Box<Expr>,
        orelse: Box<Expr>,
    },
    /// A `None` key marks a `**mapping` entry.
    Dict {
        keys: Vec<Option<Expr>>,
        values: Vec<Expr>,
    },
    Set(Vec<Expr>),
    List(Vec<Expr>),
    Tuple(Vec<Expr>),
    ListComp,
    SetComp,
    DictComp,
    GeneratorExp,
    Await(Box<Expr>),
    Yield,
    YieldFrom,
    Compare {
        left: Box<Expr>,
        ops: Vec<CmpOp>,
        comparators: Vec<Expr>,
    },
    Call {
        func: Box<Expr>,
        args: Vec<Expr>,
        keywords: Vec<Keyword>,
    },
    JoinedStr(Vec<FStringPart>),
    Constant(Constant),
    Attribute {
        value: Box<Expr>,
        attr: String,
    },
    /// `a[1, 2]` has a `Tuple` slice.
    Subscript {
        value: Box<Expr>,
        slice: Box<Expr>,
    },
    Starred(Box<Expr>),
    Name(String),
    Slice {
        lower: Option<Box<Expr>>,
        upper: Option<Box<Expr>>,
        step: Option<Box<Expr>>,
    },
}

impl Expr {
    pub fn name(id: impl Into<String>) -> Self {
        Expr::Name(id.into())
    }

    pub fn int(text: impl Into<String>) -> Self {
        Expr::Constant(Constant::Int(text.into()))
    }

    pub fn str(value: impl Into<String>) -> Self {
        Expr::Constant(Constant::Str(value.into()))
    }

    pub fn call(func: Expr, args: Vec<Expr>) -> Self {
        Expr::Call {
            func: Box::new(func),
            args,
            keywords: Vec::new(),
        }
    }

    pub fn attribute(value: Expr, attr: impl Into<String>) -> Self {
        Expr::Attribute {
            value: Box::new(value),
            attr: attr.into(),
        }
    }

    pub fn binary(left: Expr, op: BinaryOp, right: Expr) -> Self {
        Expr::BinOp {
            left: Box::new(left),
            op,
            right: Box::new(right),
        }
    }

    /// Human-readable construct name, used in diagnostics.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Expr::BoolOp { .. } => "boolean operation",
            Expr::NamedExpr { .. } => "assignment expression",
            Expr::BinOp { .. } => "binary operation",
            Expr::UnaryOp { .. } => "unary operation",
            Expr::Lambda { .. } => "lambda",
            Expr::IfExp { .. } => "conditional expression",
            Expr::Dict { .. } => "dict literal",
            Expr::Set(_) => "set literal",
            Expr::List(_) => "list literal",
            Expr::Tuple(_) => "tuple literal",
            Expr::ListComp => "list comprehension",
            Expr::SetComp => "set comprehension",
            Expr::DictComp => "dict comprehension",
            Expr::GeneratorExp => "generator expression",
            Expr::Await(_) => "await expression",
            Expr::Yield => "yield expression",
            Expr::YieldFrom => "yield from expression",
            Expr::Compare { .. } => "comparison",
            Expr::Call { .. } => "call",
            Expr::JoinedStr(_) => "f-string",
            Expr::Constant(c) => c.kind_name(),
            Expr::Attribute { .. } => "attribute access",
            Expr::Subscript { .. } => "subscript",
            Expr::Starred(_) => "starred expression",
            Expr::Name(_) => "name",
            Expr::Slice { .. } => "slice",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Constant {
    None,
    Bool(bool),
    /// Source spelling, underscores and radix prefix included.
    Int(String),
    Float(String),
    Complex(String),
    /// Decoded string value.
    Str(String),
    /// Source spelling of the bytes literal.
    Bytes(String),
    Ellipsis,
}

impl Constant {
    pub fn kind_name(&self) -> &'static str {
        match self {
            Constant::None => "None",
            Constant::Bool(_) => "boolean literal",
            Constant::Int(_) => "integer literal",
            Constant::Float(_) => "float literal",
            Constant::Complex(_) => "complex literal",
            Constant::Str(_) => "string literal",
            Constant::Bytes(_) => "bytes literal",
            Constant::Ellipsis => "Ellipsis",
        }
    }
}

/// One piece of an f-string.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum FStringPart {
    /// Decoded literal text, `{{` and `}}` already collapsed.
    Literal(String),
    Replacement {
        value: Box<Expr>,
        /// `s`, `r` or `a`.
        conversion: Option<char>,
        format_spec: Option<Vec<FStringPart>>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum BinaryOp {
    Add,
    Sub,
    Mult,
    MatMult,
    Div,
    Mod,
    Pow,
    LShift,
    RShift,
    BitOr,
    BitXor,
    BitAnd,
    FloorDiv,
}

impl BinaryOp {
    /// Python spelling of the operator.
    pub fn symbol(self) -> &'static str {
        match self {
            BinaryOp::Add => "+",
            BinaryOp::Sub => "-",
            BinaryOp::Mult => "*",
            BinaryOp::MatMult => "@",
            BinaryOp::Div => "/",
            BinaryOp::Mod => "%",
            BinaryOp::Pow => "**",
            BinaryOp::LShift => "<<",
            BinaryOp::RShift => ">>",
            BinaryOp::BitOr => "|",
            BinaryOp::BitXor => "^",
            BinaryOp::BitAnd => "&",
            BinaryOp::FloorDiv => "//",
        }
    }

    pub fn from_symbol(symbol: &str) -> Option<Self> {
        Some(match symbol {
            "+" => BinaryOp::Add,
            "-" => BinaryOp::Sub,
            "*" => BinaryOp::Mult,
            "@" => BinaryOp::MatMult,
            "/" => BinaryOp::Div,
            "%" => BinaryOp::Mod,
            "**" => BinaryOp::Pow,
            "<<" => BinaryOp::LShift,
            ">>" => BinaryOp::RShift,
            "|" => BinaryOp::BitOr,
            "^" => BinaryOp::BitXor,
            "&" => BinaryOp::BitAnd,
            "//" => BinaryOp::FloorDiv,
            _ => return None,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum UnaryOp {
    Invert,
    Not,
    UAdd,
    USub,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum BoolOp {
    And,
    Or,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum CmpOp {
    Eq,
    NotEq,
    Lt,
    LtE,
    Gt,
    GtE,
    Is,
    IsNot,
    In,
    NotIn,
}

impl CmpOp {
    pub fn from_symbol(symbol: &str) -> Option<Self> {
        Some(match symbol {
            "==" => CmpOp::Eq,
            "!=" => CmpOp::NotEq,
            "<" => CmpOp::Lt,
            "<=" => CmpOp::LtE,
            ">" => CmpOp::Gt,
            ">=" => CmpOp::GtE,
            "is" => CmpOp::Is,
            "is not" => CmpOp::IsNot,
            "in" => CmpOp::In,
            "not in" => CmpOp::NotIn,
            _ => return None,
        })
    }
}
