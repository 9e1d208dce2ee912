//! Tree-sitter based Python reader.

use super::strings;
use crate::ast::*;
use crate::error::ReadError;
use tree_sitter::{Node, Parser, Tree};

/// Parse Python source into the syntax tree.
pub fn read_python(source: &str) -> Result<Module, ReadError> {
    let mut parser = Parser::new();
    parser
        .set_language(&arborium_python::language().into())
        .map_err(|err| ReadError::Parse(err.to_string()))?;

    let tree = parser
        .parse(source, None)
        .ok_or_else(|| ReadError::Parse("failed to parse".into()))?;

    let ctx = ReadContext::new(source);
    ctx.read_module(&tree)
}

struct ReadContext<'a> {
    source: &'a str,
}

/// First erroneous or missing node, in source order.
fn first_error<'t>(node: Node<'t>) -> Option<Node<'t>> {
    if node.is_error() || node.is_missing() {
        return Some(node);
    }
    let mut cursor = node.walk();
    let children: Vec<Node<'t>> = node.children(&mut cursor).collect();
    children
        .into_iter()
        .filter(|child| child.has_error() || child.is_missing())
        .find_map(first_error)
}

fn line(node: Node) -> usize {
    node.start_position().row + 1
}

/// Named children, without comments and line continuations.
fn named_children<'t>(node: Node<'t>) -> Vec<Node<'t>> {
    let mut cursor = node.walk();
    node.children(&mut cursor)
        .filter(|child| {
            child.is_named() && !matches!(child.kind(), "comment" | "line_continuation")
        })
        .collect()
}

fn all_children<'t>(node: Node<'t>) -> Vec<Node<'t>> {
    let mut cursor = node.walk();
    node.children(&mut cursor).collect()
}

fn has_token(node: Node, token: &str) -> bool {
    all_children(node)
        .iter()
        .any(|child| !child.is_named() && child.kind() == token)
}

fn is_statement_kind(kind: &str) -> bool {
    kind.ends_with("_statement") || kind.ends_with("_definition")
}

impl<'a> ReadContext<'a> {
    fn new(source: &'a str) -> Self {
        Self { source }
    }

    fn node_text(&self, node: Node) -> &'a str {
        node.utf8_text(self.source.as_bytes()).unwrap_or("")
    }

    fn slice(&self, start: usize, end: usize) -> &'a str {
        self.source.get(start..end).unwrap_or("")
    }

    fn unsupported(&self, node: Node, what: impl Into<String>) -> ReadError {
        ReadError::Unsupported {
            what: what.into(),
            line: line(node),
        }
    }

    fn field<'t>(&self, node: Node<'t>, name: &str) -> Result<Node<'t>, ReadError> {
        node.child_by_field_name(name)
            .ok_or_else(|| ReadError::Parse(format!("{} missing {}", node.kind(), name)))
    }

    fn first_named<'t>(&self, node: Node<'t>) -> Result<Node<'t>, ReadError> {
        named_children(node)
            .into_iter()
            .next()
            .ok_or_else(|| ReadError::Parse(format!("{} has no child", node.kind())))
    }

    fn read_module(&self, tree: &Tree) -> Result<Module, ReadError> {
        let root = tree.root_node();

        if root.has_error() {
            let line = first_error(root).map_or(1, line);
            return Err(ReadError::Syntax { line });
        }

        Ok(Module {
            body: self.read_block(root)?,
        })
    }

    fn read_block(&self, node: Node) -> Result<Vec<Stmt>, ReadError> {
        named_children(node)
            .into_iter()
            .map(|child| self.read_stmt(child))
            .collect()
    }

    fn read_stmt(&self, node: Node) -> Result<Stmt, ReadError> {
        let kind = match node.kind() {
            "expression_statement" => self.read_expression_statement(node)?,
            "assignment" => self.read_assignment(node)?,
            "augmented_assignment" => self.read_augmented_assignment(node)?,

            "return_statement" => {
                let value = named_children(node).into_iter().next();
                StmtKind::Return(value.map(|v| self.read_expr(v)).transpose()?)
            }

            "delete_statement" => {
                let target = self.first_named(node)?;
                let targets = match target.kind() {
                    "expression_list" => self.read_exprs(named_children(target))?,
                    _ => vec![self.read_expr(target)?],
                };
                StmtKind::Delete(targets)
            }

            "pass_statement" => StmtKind::Pass,
            "break_statement" => StmtKind::Break,
            "continue_statement" => StmtKind::Continue,

            "if_statement" => self.read_if_statement(node)?,
            "for_statement" => self.read_for_statement(node)?,
            "while_statement" => self.read_while_statement(node)?,

            "function_definition" => {
                StmtKind::FunctionDef(self.read_function_definition(node, Vec::new())?)
            }
            "decorated_definition" => self.read_decorated_definition(node)?,
            "class_definition" => StmtKind::ClassDef {
                name: self.node_text(self.field(node, "name")?).to_string(),
            },

            "import_statement" => StmtKind::Import(self.read_import_names(node)?),
            "import_from_statement" => self.read_import_from(node)?,
            "future_import_statement" => StmtKind::ImportFrom {
                module: Some("__future__".into()),
                level: 0,
                names: self.read_import_names(node)?,
            },

            "global_statement" => StmtKind::Global(self.identifiers(node)),
            "nonlocal_statement" => StmtKind::Nonlocal(self.identifiers(node)),
            "try_statement" => StmtKind::Try,
            "raise_statement" => StmtKind::Raise,
            "with_statement" => StmtKind::With {
                is_async: has_token(node, "async"),
            },
            "assert_statement" => StmtKind::Assert,
            "match_statement" => StmtKind::Match,
            "type_alias_statement" => StmtKind::TypeAlias,

            "print_statement" | "exec_statement" => {
                return Err(self.unsupported(node, "Python 2 statement"));
            }

            other if is_statement_kind(other) => {
                return Err(self.unsupported(node, format!("statement `{other}`")));
            }

            // the grammar puts bare expressions directly in the block
            _ => StmtKind::Expr(self.read_expr(node)?),
        };

        Ok(Stmt::new(kind, line(node)))
    }

    fn read_expression_statement(&self, node: Node) -> Result<StmtKind, ReadError> {
        let children = named_children(node);
        match children.as_slice() {
            [single] => match single.kind() {
                "assignment" => self.read_assignment(*single),
                "augmented_assignment" => self.read_augmented_assignment(*single),
                _ => Ok(StmtKind::Expr(self.read_expr(*single)?)),
            },
            // `a, b` as a statement is a tuple
            _ => Ok(StmtKind::Expr(Expr::Tuple(self.read_exprs(children.clone())?))),
        }
    }

    fn read_assignment(&self, node: Node) -> Result<StmtKind, ReadError> {
        let target = self.read_expr(self.field(node, "left")?)?;
        let right = node.child_by_field_name("right");

        if let Some(annotation) = node.child_by_field_name("type") {
            return Ok(StmtKind::AnnAssign {
                target,
                annotation: self.read_expr(annotation)?,
                value: right.map(|r| self.read_expr(r)).transpose()?,
            });
        }

        // a = b = value nests the second assignment on the right
        let mut targets = vec![target];
        let mut value = right.ok_or_else(|| ReadError::Parse("assignment missing right".into()))?;
        while value.kind() == "assignment" {
            targets.push(self.read_expr(self.field(value, "left")?)?);
            value = self.field(value, "right")?;
        }
        if value.kind() == "augmented_assignment" {
            return Err(self.unsupported(value, "augmented assignment inside assignment"));
        }

        Ok(StmtKind::Assign {
            targets,
            value: self.read_expr(value)?,
        })
    }

    fn read_augmented_assignment(&self, node: Node) -> Result<StmtKind, ReadError> {
        let op_node = self.field(node, "operator")?;
        let op_text = self.node_text(op_node);
        let op = BinaryOp::from_symbol(op_text.trim_end_matches('='))
            .ok_or_else(|| ReadError::Parse(format!("unknown augmented op: {op_text}")))?;

        Ok(StmtKind::AugAssign {
            target: self.read_expr(self.field(node, "left")?)?,
            op,
            value: self.read_expr(self.field(node, "right")?)?,
        })
    }

    fn read_if_statement(&self, node: Node) -> Result<StmtKind, ReadError> {
        let test = self.read_expr(self.field(node, "condition")?)?;
        let body = self.read_block(self.field(node, "consequence")?)?;

        let mut cursor = node.walk();
        let alternatives: Vec<Node> = node
            .children_by_field_name("alternative", &mut cursor)
            .collect();

        Ok(StmtKind::If {
            test,
            body,
            orelse: self.read_alternatives(&alternatives)?,
        })
    }

    /// Fold `elif`/`else` clauses into nested `orelse` lists.
    fn read_alternatives(&self, clauses: &[Node]) -> Result<Vec<Stmt>, ReadError> {
        let Some((clause, rest)) = clauses.split_first() else {
            return Ok(Vec::new());
        };
        match clause.kind() {
            "elif_clause" => {
                let kind = StmtKind::If {
                    test: self.read_expr(self.field(*clause, "condition")?)?,
                    body: self.read_block(self.field(*clause, "consequence")?)?,
                    orelse: self.read_alternatives(rest)?,
                };
                Ok(vec![Stmt::new(kind, line(*clause))])
            }
            "else_clause" => self.read_block(self.field(*clause, "body")?),
            other => Err(ReadError::UnexpectedNode {
                expected: "elif_clause or else_clause".into(),
                got: other.into(),
            }),
        }
    }

    fn read_else_clause(&self, node: Node) -> Result<Vec<Stmt>, ReadError> {
        match node.child_by_field_name("alternative") {
            Some(clause) => self.read_block(self.field(clause, "body")?),
            None => Ok(Vec::new()),
        }
    }

    fn read_for_statement(&self, node: Node) -> Result<StmtKind, ReadError> {
        Ok(StmtKind::For {
            target: self.read_expr(self.field(node, "left")?)?,
            iter: self.read_expr(self.field(node, "right")?)?,
            body: self.read_block(self.field(node, "body")?)?,
            orelse: self.read_else_clause(node)?,
            is_async: has_token(node, "async"),
        })
    }

    fn read_while_statement(&self, node: Node) -> Result<StmtKind, ReadError> {
        Ok(StmtKind::While {
            test: self.read_expr(self.field(node, "condition")?)?,
            body: self.read_block(self.field(node, "body")?)?,
            orelse: self.read_else_clause(node)?,
        })
    }

    fn read_function_definition(
        &self,
        node: Node,
        decorators: Vec<Expr>,
    ) -> Result<FunctionDef, ReadError> {
        let name = self.node_text(self.field(node, "name")?).to_string();
        let args = self.read_parameters(self.field(node, "parameters")?)?;
        let body = self.read_block(self.field(node, "body")?)?;

        Ok(FunctionDef {
            name,
            args,
            body,
            decorators,
            is_async: has_token(node, "async"),
        })
    }

    fn read_decorated_definition(&self, node: Node) -> Result<StmtKind, ReadError> {
        let decorators = named_children(node)
            .into_iter()
            .filter(|child| child.kind() == "decorator")
            .map(|decorator| self.read_expr(self.first_named(decorator)?))
            .collect::<Result<Vec<_>, _>>()?;

        let definition = self.field(node, "definition")?;
        match definition.kind() {
            "function_definition" => Ok(StmtKind::FunctionDef(
                self.read_function_definition(definition, decorators)?,
            )),
            "class_definition" => Ok(StmtKind::ClassDef {
                name: self.node_text(self.field(definition, "name")?).to_string(),
            }),
            other => Err(ReadError::UnexpectedNode {
                expected: "function_definition or class_definition".into(),
                got: other.into(),
            }),
        }
    }

    /// Read `parameters` or `lambda_parameters`.
    fn read_parameters(&self, node: Node) -> Result<Arguments, ReadError> {
        let mut args = Arguments::default();
        let mut keyword_only = false;

        for param in named_children(node) {
            let arg = match param.kind() {
                "identifier" => Arg {
                    name: self.node_text(param).to_string(),
                    default: None,
                },
                "typed_parameter" => {
                    let inner = self.first_named(param)?;
                    match inner.kind() {
                        "list_splat_pattern" => {
                            args.vararg = Some(self.splat_name(inner)?);
                            keyword_only = true;
                            continue;
                        }
                        "dictionary_splat_pattern" => {
                            args.kwarg = Some(self.splat_name(inner)?);
                            continue;
                        }
                        _ => Arg {
                            name: self.node_text(inner).to_string(),
                            default: None,
                        },
                    }
                }
                "default_parameter" | "typed_default_parameter" => {
                    let name = self.field(param, "name")?;
                    if name.kind() != "identifier" {
                        return Err(self.unsupported(param, "tuple parameter"));
                    }
                    Arg {
                        name: self.node_text(name).to_string(),
                        default: Some(self.read_expr(self.field(param, "value")?)?),
                    }
                }
                "list_splat_pattern" => {
                    args.vararg = Some(self.splat_name(param)?);
                    keyword_only = true;
                    continue;
                }
                "dictionary_splat_pattern" => {
                    args.kwarg = Some(self.splat_name(param)?);
                    continue;
                }
                "keyword_separator" => {
                    keyword_only = true;
                    continue;
                }
                "positional_separator" => {
                    args.posonly.append(&mut args.args);
                    continue;
                }
                other => return Err(self.unsupported(param, format!("parameter `{other}`"))),
            };

            if keyword_only {
                args.kwonly.push(arg);
            } else {
                args.args.push(arg);
            }
        }

        Ok(args)
    }

    fn splat_name(&self, node: Node) -> Result<String, ReadError> {
        Ok(self.node_text(self.first_named(node)?).to_string())
    }

    fn dotted_name(&self, node: Node) -> String {
        named_children(node)
            .into_iter()
            .map(|part| self.node_text(part))
            .collect::<Vec<_>>()
            .join(".")
    }

    fn identifiers(&self, node: Node) -> Vec<String> {
        named_children(node)
            .into_iter()
            .map(|ident| self.node_text(ident).to_string())
            .collect()
    }

    fn read_import_names(&self, node: Node) -> Result<Vec<Alias>, ReadError> {
        let mut cursor = node.walk();
        let names: Vec<Node> = node.children_by_field_name("name", &mut cursor).collect();
        names.into_iter().map(|name| self.read_alias(name)).collect()
    }

    fn read_alias(&self, node: Node) -> Result<Alias, ReadError> {
        match node.kind() {
            "dotted_name" => Ok(Alias {
                name: self.dotted_name(node),
                asname: None,
            }),
            "aliased_import" => Ok(Alias {
                name: self.dotted_name(self.field(node, "name")?),
                asname: Some(self.node_text(self.field(node, "alias")?).to_string()),
            }),
            other => Err(ReadError::UnexpectedNode {
                expected: "dotted_name or aliased_import".into(),
                got: other.into(),
            }),
        }
    }

    fn read_import_from(&self, node: Node) -> Result<StmtKind, ReadError> {
        let module_node = self.field(node, "module_name")?;
        let (module, level) = match module_node.kind() {
            "relative_import" => {
                let mut level = 0;
                let mut module = None;
                for part in named_children(module_node) {
                    match part.kind() {
                        "import_prefix" => level = self.node_text(part).matches('.').count(),
                        "dotted_name" => module = Some(self.dotted_name(part)),
                        _ => {}
                    }
                }
                (module, level)
            }
            _ => (Some(self.dotted_name(module_node)), 0),
        };

        let wildcard = named_children(node)
            .iter()
            .any(|child| child.kind() == "wildcard_import");
        let names = if wildcard {
            vec![Alias {
                name: "*".into(),
                asname: None,
            }]
        } else {
            self.read_import_names(node)?
        };

        Ok(StmtKind::ImportFrom {
            module,
            level,
            names,
        })
    }

    fn read_exprs(&self, nodes: Vec<Node>) -> Result<Vec<Expr>, ReadError> {
        nodes.into_iter().map(|node| self.read_expr(node)).collect()
    }

    fn read_boxed(&self, node: Node) -> Result<Box<Expr>, ReadError> {
        self.read_expr(node).map(Box::new)
    }

    fn read_expr(&self, node: Node) -> Result<Expr, ReadError> {
        match node.kind() {
            "identifier" | "keyword_identifier" => Ok(Expr::Name(self.node_text(node).to_string())),

            "integer" | "float" => {
                let text = self.node_text(node).to_string();
                Ok(Expr::Constant(if text.ends_with(['j', 'J']) {
                    Constant::Complex(text)
                } else if node.kind() == "integer" {
                    Constant::Int(text)
                } else {
                    Constant::Float(text)
                }))
            }
            "true" => Ok(Expr::Constant(Constant::Bool(true))),
            "false" => Ok(Expr::Constant(Constant::Bool(false))),
            "none" => Ok(Expr::Constant(Constant::None)),
            "ellipsis" => Ok(Expr::Constant(Constant::Ellipsis)),

            "string" => self.read_string(node),
            "concatenated_string" => self.read_concatenated_string(node),

            "parenthesized_expression" | "type" => self.read_expr(self.first_named(node)?),

            "expression_list" | "pattern_list" | "tuple" | "tuple_pattern" => {
                Ok(Expr::Tuple(self.read_exprs(named_children(node))?))
            }
            "list" | "list_pattern" => Ok(Expr::List(self.read_exprs(named_children(node))?)),
            "set" => Ok(Expr::Set(self.read_exprs(named_children(node))?)),
            "dictionary" => self.read_dictionary(node),

            "list_splat" | "list_splat_pattern" | "parenthesized_list_splat" => {
                Ok(Expr::Starred(self.read_boxed(self.first_named(node)?)?))
            }

            "attribute" => Ok(Expr::Attribute {
                value: self.read_boxed(self.field(node, "object")?)?,
                attr: self.node_text(self.field(node, "attribute")?).to_string(),
            }),

            "subscript" => {
                let mut cursor = node.walk();
                let subscripts: Vec<Node> = node
                    .children_by_field_name("subscript", &mut cursor)
                    .collect();
                let slice = match subscripts.as_slice() {
                    [single] => self.read_expr(*single)?,
                    _ => Expr::Tuple(self.read_exprs(subscripts.clone())?),
                };
                Ok(Expr::Subscript {
                    value: self.read_boxed(self.field(node, "value")?)?,
                    slice: Box::new(slice),
                })
            }
            "slice" => self.read_slice(node),

            "call" => self.read_call(node),

            "binary_operator" => {
                let op_node = self.field(node, "operator")?;
                let op = BinaryOp::from_symbol(op_node.kind()).ok_or_else(|| {
                    ReadError::Parse(format!("unknown binary op: {}", op_node.kind()))
                })?;
                Ok(Expr::BinOp {
                    left: self.read_boxed(self.field(node, "left")?)?,
                    op,
                    right: self.read_boxed(self.field(node, "right")?)?,
                })
            }

            "unary_operator" => {
                let op_node = self.field(node, "operator")?;
                let op = match op_node.kind() {
                    "-" => UnaryOp::USub,
                    "+" => UnaryOp::UAdd,
                    "~" => UnaryOp::Invert,
                    other => return Err(ReadError::Parse(format!("unknown unary op: {other}"))),
                };
                Ok(Expr::UnaryOp {
                    op,
                    operand: self.read_boxed(self.field(node, "argument")?)?,
                })
            }

            "not_operator" => Ok(Expr::UnaryOp {
                op: UnaryOp::Not,
                operand: self.read_boxed(self.field(node, "argument")?)?,
            }),

            "boolean_operator" => {
                let op = self.bool_op(node)?;
                let mut values = Vec::new();
                self.collect_bool_operands(node, op, &mut values)?;
                Ok(Expr::BoolOp { op, values })
            }

            "comparison_operator" => self.read_comparison(node),

            "lambda" => {
                let args = match node.child_by_field_name("parameters") {
                    Some(params) => self.read_parameters(params)?,
                    None => Arguments::default(),
                };
                Ok(Expr::Lambda {
                    args,
                    body: self.read_boxed(self.field(node, "body")?)?,
                })
            }

            "conditional_expression" => match named_children(node).as_slice() {
                [body, test, orelse] => Ok(Expr::IfExp {
                    test: self.read_boxed(*test)?,
                    body: self.read_boxed(*body)?,
                    orelse: self.read_boxed(*orelse)?,
                }),
                _ => Err(ReadError::Parse(
                    "conditional_expression needs three operands".into(),
                )),
            },

            "named_expression" => Ok(Expr::NamedExpr {
                target: self.node_text(self.field(node, "name")?).to_string(),
                value: self.read_boxed(self.field(node, "value")?)?,
            }),

            "await" => Ok(Expr::Await(self.read_boxed(self.first_named(node)?)?)),

            "yield" => Ok(if has_token(node, "from") {
                Expr::YieldFrom
            } else {
                Expr::Yield
            }),

            "list_comprehension" => Ok(Expr::ListComp),
            "set_comprehension" => Ok(Expr::SetComp),
            "dictionary_comprehension" => Ok(Expr::DictComp),
            "generator_expression" => Ok(Expr::GeneratorExp),

            other => Err(self.unsupported(node, format!("expression `{other}`"))),
        }
    }

    fn bool_op(&self, node: Node) -> Result<BoolOp, ReadError> {
        match self.field(node, "operator")?.kind() {
            "and" => Ok(BoolOp::And),
            "or" => Ok(BoolOp::Or),
            other => Err(ReadError::Parse(format!("unknown boolean op: {other}"))),
        }
    }

    /// Flatten `a and b and c` into one operand list.
    fn collect_bool_operands(
        &self,
        node: Node,
        op: BoolOp,
        values: &mut Vec<Expr>,
    ) -> Result<(), ReadError> {
        for side in ["left", "right"] {
            let operand = self.field(node, side)?;
            if operand.kind() == "boolean_operator" && self.bool_op(operand)? == op {
                self.collect_bool_operands(operand, op, values)?;
            } else {
                values.push(self.read_expr(operand)?);
            }
        }
        Ok(())
    }

    fn read_comparison(&self, node: Node) -> Result<Expr, ReadError> {
        let mut operands = Vec::new();
        let mut ops = Vec::new();

        for child in all_children(node) {
            if child.is_named() {
                if child.kind() != "comment" {
                    operands.push(self.read_expr(child)?);
                }
            } else {
                let op = CmpOp::from_symbol(child.kind())
                    .ok_or_else(|| self.unsupported(child, format!("comparison `{}`", child.kind())))?;
                ops.push(op);
            }
        }

        let mut operands = operands.into_iter();
        let left = operands
            .next()
            .ok_or_else(|| ReadError::Parse("comparison_operator has no operands".into()))?;
        let comparators: Vec<Expr> = operands.collect();
        if comparators.len() != ops.len() {
            return Err(ReadError::Parse(
                "comparison operators and operands do not line up".into(),
            ));
        }

        Ok(Expr::Compare {
            left: Box::new(left),
            ops,
            comparators,
        })
    }

    fn read_slice(&self, node: Node) -> Result<Expr, ReadError> {
        let mut parts: [Option<Box<Expr>>; 3] = [None, None, None];
        let mut index = 0;

        for child in all_children(node) {
            if child.kind() == ":" {
                index += 1;
            } else if child.is_named() && child.kind() != "comment" && index < parts.len() {
                parts[index] = Some(self.read_boxed(child)?);
            }
        }

        let [lower, upper, step] = parts;
        Ok(Expr::Slice { lower, upper, step })
    }

    fn read_call(&self, node: Node) -> Result<Expr, ReadError> {
        let func = self.read_boxed(self.field(node, "function")?)?;
        let arguments = self.field(node, "arguments")?;

        let mut args = Vec::new();
        let mut keywords = Vec::new();

        if arguments.kind() == "generator_expression" {
            args.push(Expr::GeneratorExp);
        } else {
            for arg in named_children(arguments) {
                match arg.kind() {
                    "keyword_argument" => keywords.push(Keyword {
                        arg: Some(self.node_text(self.field(arg, "name")?).to_string()),
                        value: self.read_expr(self.field(arg, "value")?)?,
                    }),
                    "dictionary_splat" => keywords.push(Keyword {
                        arg: None,
                        value: self.read_expr(self.first_named(arg)?)?,
                    }),
                    _ => args.push(self.read_expr(arg)?),
                }
            }
        }

        Ok(Expr::Call {
            func,
            args,
            keywords,
        })
    }

    fn read_dictionary(&self, node: Node) -> Result<Expr, ReadError> {
        let mut keys = Vec::new();
        let mut values = Vec::new();

        for entry in named_children(node) {
            match entry.kind() {
                "pair" => {
                    keys.push(Some(self.read_expr(self.field(entry, "key")?)?));
                    values.push(self.read_expr(self.field(entry, "value")?)?);
                }
                "dictionary_splat" => {
                    keys.push(None);
                    values.push(self.read_expr(self.first_named(entry)?)?);
                }
                other => {
                    return Err(ReadError::UnexpectedNode {
                        expected: "pair or dictionary_splat".into(),
                        got: other.into(),
                    });
                }
            }
        }

        Ok(Expr::Dict { keys, values })
    }

    fn read_string(&self, node: Node) -> Result<Expr, ReadError> {
        let children = all_children(node);
        let start = children
            .iter()
            .find(|child| child.kind() == "string_start")
            .ok_or_else(|| ReadError::Parse("string missing string_start".into()))?;
        let end = children
            .iter()
            .find(|child| child.kind() == "string_end")
            .ok_or_else(|| ReadError::Parse("string missing string_end".into()))?;

        let start_text = self.node_text(*start);
        let quote = start_text.find(['\'', '"']).unwrap_or(start_text.len());
        let prefix = start_text[..quote].to_ascii_lowercase();
        let raw = prefix.contains('r');

        if prefix.contains('b') {
            return Ok(Expr::Constant(Constant::Bytes(self.node_text(node).to_string())));
        }
        if prefix.contains('t') {
            return Err(self.unsupported(node, "template string"));
        }

        if prefix.contains('f') {
            let interpolations: Vec<Node> = children
                .iter()
                .copied()
                .filter(|child| child.kind() == "interpolation")
                .collect();
            let parts =
                self.read_fstring_parts(node, &interpolations, start.end_byte(), end.start_byte(), raw)?;
            return Ok(Expr::JoinedStr(parts));
        }

        let body = self.slice(start.end_byte(), end.start_byte());
        Ok(Expr::str(self.decode(node, body, raw, false)?))
    }

    fn read_concatenated_string(&self, node: Node) -> Result<Expr, ReadError> {
        let pieces = self.read_exprs(named_children(node))?;

        if pieces
            .iter()
            .any(|piece| matches!(piece, Expr::Constant(Constant::Bytes(_))))
        {
            return Ok(Expr::Constant(Constant::Bytes(self.node_text(node).to_string())));
        }

        if pieces.iter().any(|piece| matches!(piece, Expr::JoinedStr(_))) {
            let mut parts = Vec::new();
            for piece in pieces {
                match piece {
                    Expr::JoinedStr(more) => parts.extend(more),
                    Expr::Constant(Constant::Str(text)) => parts.push(FStringPart::Literal(text)),
                    other => {
                        return Err(ReadError::UnexpectedNode {
                            expected: "string".into(),
                            got: other.kind_name().into(),
                        });
                    }
                }
            }
            return Ok(Expr::JoinedStr(parts));
        }

        let mut joined = String::new();
        for piece in pieces {
            if let Expr::Constant(Constant::Str(text)) = piece {
                joined.push_str(&text);
            }
        }
        Ok(Expr::str(joined))
    }

    /// Literal text and replacement fields between `from` and `to`.
    fn read_fstring_parts(
        &self,
        node: Node,
        interpolations: &[Node],
        from: usize,
        to: usize,
        raw: bool,
    ) -> Result<Vec<FStringPart>, ReadError> {
        let mut parts = Vec::new();
        let mut pos = from;

        for interpolation in interpolations {
            self.push_literal(node, &mut parts, pos, interpolation.start_byte(), raw)?;
            parts.extend(self.read_interpolation(*interpolation, raw)?);
            pos = interpolation.end_byte();
        }
        self.push_literal(node, &mut parts, pos, to, raw)?;

        Ok(parts)
    }

    fn push_literal(
        &self,
        node: Node,
        parts: &mut Vec<FStringPart>,
        start: usize,
        end: usize,
        raw: bool,
    ) -> Result<(), ReadError> {
        if start < end {
            let text = self.decode(node, self.slice(start, end), raw, true)?;
            if !text.is_empty() {
                parts.push(FStringPart::Literal(text));
            }
        }
        Ok(())
    }

    fn read_interpolation(&self, node: Node, raw: bool) -> Result<Vec<FStringPart>, ReadError> {
        let value = self.read_boxed(self.field(node, "expression")?)?;

        let mut conversion = node
            .child_by_field_name("type_conversion")
            .and_then(|conv| self.node_text(conv).trim_start_matches('!').chars().next());

        let format_spec = match node.child_by_field_name("format_specifier") {
            Some(spec) => {
                let nested: Vec<Node> = named_children(spec)
                    .into_iter()
                    .filter(|child| matches!(child.kind(), "format_expression" | "interpolation"))
                    .collect();
                // skip the leading ':'
                Some(self.read_fstring_parts(spec, &nested, spec.start_byte() + 1, spec.end_byte(), raw)?)
            }
            None => None,
        };

        let mut parts = Vec::new();

        // `{expr=}` echoes the expression text and defaults to repr()
        let equals = all_children(node)
            .into_iter()
            .find(|child| !child.is_named() && child.kind() == "=");
        if let Some(equals) = equals {
            let echoed = self.slice(node.start_byte() + 1, equals.end_byte());
            parts.push(FStringPart::Literal(echoed.to_string()));
            if conversion.is_none() && format_spec.is_none() {
                conversion = Some('r');
            }
        }

        parts.push(FStringPart::Replacement {
            value,
            conversion,
            format_spec,
        });
        Ok(parts)
    }

    fn decode(&self, node: Node, body: &str, raw: bool, fstring: bool) -> Result<String, ReadError> {
        let body = if fstring {
            body.replace("{{", "{").replace("}}", "}")
        } else {
            body.to_string()
        };
        if raw {
            return Ok(body);
        }
        strings::unescape(&body).map_err(|what| self.unsupported(node, what))
    }
}
