//! Node dispatcher.
//!
//! One exhaustive `match` per syntax enum routes every node kind to its
//! handler. Handlers borrow the syntax tree, recurse through the
//! dispatcher for their children, and return fragments. Kinds without a
//! lowering become [`TranspileError::Compilation`] errors; nothing is
//! emitted for a module that fails anywhere.

mod contract;
mod expressions;
mod functions;
mod literals;
mod module_emission;
mod scope;
mod statements;
mod template_literals;

use crate::error::{Result, TranspileError};
use crate::options::TranspileOptions;
use crate::tables::names;
use crate::tree::{Block, Expression, Fragment, Statement};
use pyjs_syntax::{Expr, Module, Stmt, StmtKind};
use std::collections::HashSet;
use tracing::debug;

/// Any syntax-tree node the dispatcher accepts.
#[derive(Debug, Clone, Copy)]
pub enum Node<'a> {
    Module(&'a Module),
    Stmt(&'a Stmt),
    Expr(&'a Expr),
}

pub struct Dispatcher<'o> {
    options: &'o TranspileOptions,
    /// Names the program binds in the current scope; these are never renamed.
    shadowed: HashSet<String>,
}

impl<'o> Dispatcher<'o> {
    pub fn new(options: &'o TranspileOptions) -> Self {
        Self {
            options,
            shadowed: HashSet::new(),
        }
    }

    /// A dispatcher for a nested scope that also binds `bound`.
    fn scope(&self, bound: HashSet<String>) -> Dispatcher<'o> {
        let mut shadowed = self.shadowed.clone();
        shadowed.extend(bound);
        Dispatcher {
            options: self.options,
            shadowed,
        }
    }

    /// Table entry for a name or dotted attribute chain, unless its root
    /// name is bound by the program.
    fn builtin(&self, expr: &Expr) -> Option<&'static str> {
        let path = names::dotted_path(expr)?;
        let root = path.split('.').next().unwrap_or(&path);
        if self.shadowed.contains(root) {
            return None;
        }
        names::lookup(&path)
    }

    /// Whether calling `func` elides the call.
    fn elides(&self, func: &Expr) -> bool {
        self.builtin(func) == Some("")
    }

    /// Lower one node to its fragments.
    pub fn dispatch(&self, node: Node) -> Result<Vec<Fragment>> {
        match node {
            Node::Module(module) => Ok(vec![self.module(module)?.into()]),
            Node::Stmt(stmt) => self.statement(stmt),
            Node::Expr(expr) => Ok(vec![self.expression(expr)?.into()]),
        }
    }

    /// Statement fragments for `stmt`; errors carry its line unless an
    /// inner statement already set one.
    pub fn statement(&self, stmt: &Stmt) -> Result<Vec<Fragment>> {
        debug!(kind = stmt.kind.name(), line = stmt.line, "dispatching statement");

        let fragments = self
            .lower_statement(&stmt.kind)
            .map_err(|err| err.at_line(stmt.line))?;

        if self.options.contract_checks {
            contract::check_statements(stmt.kind.name(), &fragments)
                .map_err(|err| err.at_line(stmt.line))?;
        }
        Ok(fragments)
    }

    pub fn expression(&self, expr: &Expr) -> Result<Expression> {
        debug!(kind = expr.kind_name(), "dispatching expression");

        let lowered = self.lower_expression(expr)?;
        if self.options.contract_checks {
            contract::check_expression(expr.kind_name(), &lowered)?;
        }
        Ok(lowered)
    }

    fn lower_statement(&self, kind: &StmtKind) -> Result<Vec<Fragment>> {
        match kind {
            StmtKind::FunctionDef(def) => self.function_def(def),
            StmtKind::Return(value) => self.return_stmt(value.as_ref()),
            StmtKind::Delete(targets) => self.delete(targets),
            StmtKind::Assign { targets, value } => self.assign(targets, value),
            StmtKind::AugAssign { target, op, value } => self.aug_assign(target, *op, value),
            StmtKind::AnnAssign { target, value, .. } => match value {
                Some(value) => self.assign(std::slice::from_ref(target), value),
                None => Ok(Vec::new()),
            },
            StmtKind::For {
                target,
                iter,
                body,
                orelse,
                is_async,
            } => self.for_loop(target, iter, body, orelse, *is_async),
            StmtKind::While { test, body, orelse } => self.while_loop(test, body, orelse),
            StmtKind::If { test, body, orelse } => self.if_chain(test, body, orelse, false),
            StmtKind::Import(names) => self.import(names),
            StmtKind::ImportFrom {
                module,
                level,
                names,
            } => self.import_from(module.as_deref(), *level, names),
            StmtKind::Expr(expr) => self.expression_statement(expr),
            StmtKind::Pass => Ok(Vec::new()),
            StmtKind::Break => Ok(vec![Statement::terminated("break").into()]),
            StmtKind::Continue => Ok(vec![Statement::terminated("continue").into()]),
            StmtKind::ClassDef { name } => Err(TranspileError::compilation(format!(
                "class definitions are not supported (class `{name}`)"
            ))),
            StmtKind::Try
            | StmtKind::Raise
            | StmtKind::With { .. }
            | StmtKind::Global(_)
            | StmtKind::Nonlocal(_)
            | StmtKind::Assert
            | StmtKind::Match
            | StmtKind::TypeAlias => Err(unsupported(kind.name())),
        }
    }

    fn lower_expression(&self, expr: &Expr) -> Result<Expression> {
        match expr {
            Expr::Name(id) => self.name(id),
            Expr::Constant(constant) => self.constant(constant),
            Expr::Attribute { value, attr } => self.attribute(expr, value, attr),
            Expr::Subscript { value, slice } => self.subscript(value, slice),
            Expr::Call {
                func,
                args,
                keywords,
            } => self.call(func, args, keywords),
            Expr::BinOp { left, op, right } => self.binary(left, *op, right),
            Expr::UnaryOp { op, operand } => self.unary(*op, operand),
            Expr::BoolOp { op, values } => self.boolean(*op, values),
            Expr::Compare {
                left,
                ops,
                comparators,
            } => self.compare(left, ops, comparators),
            Expr::IfExp { test, body, orelse } => self.conditional(test, body, orelse),
            Expr::NamedExpr { target, value } => self.named(target, value),
            Expr::Lambda { args, body } => self.lambda(args, body),
            Expr::Await(value) => Ok(Expression::from("await ").append(self.operand(value)?)),
            Expr::List(items) => self.list(items),
            Expr::Tuple(items) => self.tuple(items),
            Expr::Set(items) => self.set(items),
            Expr::Dict { keys, values } => self.dict(keys, values),
            Expr::JoinedStr(parts) => self.joined_str(parts),
            Expr::Slice { .. } => Err(TranspileError::compilation("slicing is not supported")),
            Expr::Starred(_) => Err(TranspileError::compilation(
                "starred expressions are only supported as call arguments",
            )),
            Expr::ListComp
            | Expr::SetComp
            | Expr::DictComp
            | Expr::GeneratorExp
            | Expr::Yield
            | Expr::YieldFrom => Err(unsupported(expr.kind_name())),
        }
    }

    /// Dispatch `expr`, parenthesizing it when it is compound.
    fn operand(&self, expr: &Expr) -> Result<Expression> {
        let lowered = self.expression(expr)?;
        Ok(if is_compound(expr) {
            lowered.parenthesized()
        } else {
            lowered
        })
    }

    fn statements(&self, body: &[Stmt]) -> Result<Vec<Fragment>> {
        let mut fragments = Vec::new();
        for stmt in body {
            fragments.extend(self.statement(stmt)?);
        }
        Ok(fragments)
    }

    fn block(&self, body: &[Stmt]) -> Result<Block> {
        Ok(Block::braced(self.statements(body)?))
    }
}

fn unsupported(what: &str) -> TranspileError {
    TranspileError::compilation(format!("unsupported construct: {what}"))
}

/// Expressions that need parentheses when used as an operand. Ternaries
/// and walrus assignments parenthesize themselves.
fn is_compound(expr: &Expr) -> bool {
    matches!(
        expr,
        Expr::BoolOp { .. }
            | Expr::BinOp { .. }
            | Expr::UnaryOp { .. }
            | Expr::Lambda { .. }
            | Expr::Compare { .. }
            | Expr::Await(_)
            | Expr::Yield
            | Expr::YieldFrom
    )
}
