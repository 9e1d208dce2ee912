//! Assignments, control flow and expression statements.

use super::Dispatcher;
use crate::error::{Result, TranspileError};
use crate::tables::{names, operators};
use crate::tree::{Expression, Fragment, Statement};
use pyjs_syntax::{BinaryOp, Expr, Stmt, StmtKind};

impl Dispatcher<'_> {
    pub(super) fn expression_statement(&self, expr: &Expr) -> Result<Vec<Fragment>> {
        // an elided call keeps each argument as its own statement
        if let Expr::Call {
            func,
            args,
            keywords,
        } = expr
            && self.elides(func)
        {
            let args = self.call_arguments(func, args, keywords)?;
            return Ok(args
                .into_iter()
                .map(|arg| Statement::terminated(arg).into())
                .collect());
        }
        Ok(vec![Statement::terminated(self.expression(expr)?).into()])
    }

    /// `a = b = value;`
    pub(super) fn assign(&self, targets: &[Expr], value: &Expr) -> Result<Vec<Fragment>> {
        let mut line = Expression::new();
        for target in targets {
            line = line.append(self.assign_target(target)?).text(" = ");
        }
        line = line.append(self.expression(value)?);
        Ok(vec![Statement::terminated(line).into()])
    }

    fn assign_target(&self, target: &Expr) -> Result<Expression> {
        match target {
            Expr::Tuple(items) | Expr::List(items) => {
                let parts = items
                    .iter()
                    .map(|item| self.simple_target(item))
                    .collect::<Result<Vec<_>>>()?;
                Ok(Expression::from("[")
                    .append(Expression::join(parts, ", "))
                    .text("]"))
            }
            other => self.simple_target(other),
        }
    }

    fn simple_target(&self, target: &Expr) -> Result<Expression> {
        match target {
            Expr::Name(_) | Expr::Attribute { .. } | Expr::Subscript { .. } => {
                self.expression(target)
            }
            Expr::Tuple(_) | Expr::List(_) | Expr::Starred(_) => Err(TranspileError::compilation(
                format!("unpacking into a {} is not supported", target.kind_name()),
            )),
            other => Err(TranspileError::compilation(format!(
                "cannot assign to {}",
                other.kind_name()
            ))),
        }
    }

    /// `x += v` becomes `x = x + v`.
    pub(super) fn aug_assign(&self, target: &Expr, op: BinaryOp, value: &Expr) -> Result<Vec<Fragment>> {
        let lower = operators::binary(op).ok_or_else(|| {
            TranspileError::compilation(format!(
                "operator `{}=` has no JavaScript equivalent",
                op.symbol()
            ))
        })?;
        let target = self.simple_target(target)?;
        let line = target
            .clone()
            .text(" = ")
            .append(lower(target, self.operand(value)?));
        Ok(vec![Statement::terminated(line).into()])
    }

    pub(super) fn delete(&self, targets: &[Expr]) -> Result<Vec<Fragment>> {
        targets
            .iter()
            .map(|target| {
                let target = self.simple_target(target)?;
                Ok(Statement::terminated(Expression::from("delete ").append(target)).into())
            })
            .collect()
    }

    /// `if`, with `elif` arms as ` else if` headers glued onto the
    /// previous closing brace.
    pub(super) fn if_chain(
        &self,
        test: &Expr,
        body: &[Stmt],
        orelse: &[Stmt],
        is_elif: bool,
    ) -> Result<Vec<Fragment>> {
        let keyword = if is_elif { " else if (" } else { "if (" };
        let mut header = Statement::open(
            Expression::from(keyword)
                .append(self.expression(test)?)
                .text(")"),
        );
        header.set_force_concat(is_elif);

        let mut fragments = vec![header.into(), self.block(body)?.into()];

        match orelse {
            [] => {}
            [
                Stmt {
                    kind:
                        StmtKind::If {
                            test,
                            body,
                            orelse,
                        },
                    line,
                },
            ] => fragments.extend(
                self.if_chain(test, body, orelse, true)
                    .map_err(|err| err.at_line(*line))?,
            ),
            _ => {
                fragments.push(Statement::open(" else").force_concat().into());
                fragments.push(self.block(orelse)?.into());
            }
        }
        Ok(fragments)
    }

    pub(super) fn while_loop(&self, test: &Expr, body: &[Stmt], orelse: &[Stmt]) -> Result<Vec<Fragment>> {
        if !orelse.is_empty() {
            return Err(TranspileError::compilation("while-else is not supported"));
        }
        let header = Expression::from("while (")
            .append(self.expression(test)?)
            .text(")");
        Ok(vec![Statement::open(header).into(), self.block(body)?.into()])
    }

    pub(super) fn for_loop(
        &self,
        target: &Expr,
        iter: &Expr,
        body: &[Stmt],
        orelse: &[Stmt],
        is_async: bool,
    ) -> Result<Vec<Fragment>> {
        if is_async {
            return Err(TranspileError::compilation("async for loops are not supported"));
        }
        if !orelse.is_empty() {
            return Err(TranspileError::compilation("for-else is not supported"));
        }

        let header = match iter {
            Expr::Call {
                func,
                args,
                keywords,
            } if matches!(func.as_ref(), Expr::Name(name) if name == "range")
                && !self.shadowed.contains("range") =>
            {
                if !keywords.is_empty() {
                    return Err(TranspileError::compilation(
                        "range() does not take keyword arguments",
                    ));
                }
                self.range_header(target, args)?
            }
            _ => self.for_of_header(target, iter)?,
        };

        Ok(vec![Statement::open(header).into(), self.block(body)?.into()])
    }

    /// A counting loop. The step's sign is only known at run time, so the
    /// loop condition checks it.
    fn range_header(&self, target: &Expr, args: &[Expr]) -> Result<Expression> {
        if !matches!(target, Expr::Name(_)) {
            return Err(TranspileError::compilation(format!(
                "range loop variable must be a plain name, got {}",
                target.kind_name()
            )));
        }
        if args.iter().any(|arg| matches!(arg, Expr::Starred(_))) {
            return Err(TranspileError::compilation(
                "range() arguments must be positional",
            ));
        }

        let (start, end, step) = match args {
            [end] => (Expression::from("0"), self.operand(end)?, Expression::from("1")),
            [start, end] => (self.expression(start)?, self.operand(end)?, Expression::from("1")),
            [start, end, step] => (
                self.expression(start)?,
                self.operand(end)?,
                self.operand(step)?,
            ),
            _ => {
                return Err(TranspileError::compilation(format!(
                    "range() takes 1 to 3 arguments, got {}",
                    args.len()
                )));
            }
        };

        let var = self.expression(target)?;
        Ok(Expression::from("for (let ")
            .append(var.clone())
            .text(" = ")
            .append(start)
            .text("; (")
            .append(step.clone())
            .text(" >= 0 ? ")
            .append(var.clone())
            .text(" < ")
            .append(end.clone())
            .text(" : ")
            .append(var.clone())
            .text(" > ")
            .append(end)
            .text("); ")
            .append(var)
            .text(" += ")
            .append(step)
            .text(")"))
    }

    fn for_of_header(&self, target: &Expr, iter: &Expr) -> Result<Expression> {
        let binding = match target {
            Expr::Name(_) => self.expression(target)?,
            Expr::Tuple(items) | Expr::List(items) => {
                let parts = items
                    .iter()
                    .map(|item| match item {
                        Expr::Name(_) => self.expression(item),
                        other => Err(TranspileError::compilation(format!(
                            "unsupported for loop target element: {}",
                            other.kind_name()
                        ))),
                    })
                    .collect::<Result<Vec<_>>>()?;
                Expression::from("[")
                    .append(Expression::join(parts, ", "))
                    .text("]")
            }
            other => {
                return Err(TranspileError::compilation(format!(
                    "unsupported for loop target: {}",
                    other.kind_name()
                )));
            }
        };

        Ok(Expression::from("for (const ")
            .append(binding)
            .text(" of ")
            .text(names::resolve("iter"))
            .text("(")
            .append(self.expression(iter)?)
            .text("))"))
    }
}
