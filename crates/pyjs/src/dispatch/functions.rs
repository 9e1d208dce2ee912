//! Function definitions, lambdas, returns and calls.

use super::{Dispatcher, scope};
use crate::error::{Result, TranspileError};
use crate::options::KeywordArguments;
use crate::tables::names;
use crate::tree::{Block, Expression, Fragment, Statement};
use pyjs_syntax::{Arguments, Expr, FunctionDef, Keyword};
use tracing::warn;

/// Name of the parameter that receives `**kwargs`.
const OPTIONS_PARAM: &str = "options";

impl Dispatcher<'_> {
    /// `let f = d1(d2((function f(x) {` body `})));`
    pub(super) fn function_def(&self, def: &FunctionDef) -> Result<Vec<Fragment>> {
        let mut header = Expression::from(format!("let {} = ", def.name));
        for decorator in &def.decorators {
            header = header.append(self.operand(decorator)?).text("(");
        }
        header = header
            .text("(")
            .text(if def.is_async {
                "async function "
            } else {
                "function "
            })
            .text(def.name.as_str())
            .text("(")
            .append(self.parameters(&def.args)?)
            .text(")");

        let mut bound = scope::parameter_names(&def.args);
        bound.extend(scope::bound_names(&def.body));
        let inner = self.scope(bound);

        let mut body = Vec::new();
        if let Some(kwarg) = &def.args.kwarg
            && kwarg != OPTIONS_PARAM
        {
            body.push(Statement::terminated(format!("const {kwarg} = {OPTIONS_PARAM}")).into());
        }
        body.extend(inner.statements(&def.body)?);

        let closing = ")".repeat(def.decorators.len() + 1);
        Ok(vec![
            Statement::open(header).into(),
            Block::braced(body).into(),
            Statement::terminated(closing).force_concat().into(),
        ])
    }

    /// Positional and keyword-only parameters in order, then `options`,
    /// then the rest parameter.
    fn parameters(&self, args: &Arguments) -> Result<Expression> {
        let mut params = Vec::new();
        for arg in args.posonly.iter().chain(&args.args).chain(&args.kwonly) {
            let mut param = Expression::from(arg.name.as_str());
            if let Some(default) = &arg.default {
                param = param.text(" = ").append(self.expression(default)?);
            }
            params.push(param);
        }
        if args.kwarg.is_some() {
            params.push(OPTIONS_PARAM.into());
        }
        if let Some(rest) = &args.vararg {
            params.push(format!("...{rest}").into());
        }
        Ok(Expression::join(params, ", "))
    }

    pub(super) fn lambda(&self, args: &Arguments, body: &Expr) -> Result<Expression> {
        if args.kwarg.is_some() {
            return Err(TranspileError::compilation(
                "lambdas cannot take `**` parameters",
            ));
        }
        Ok(Expression::from("(")
            .append(self.parameters(args)?)
            .text(") => (")
            .append(self.scope(scope::parameter_names(args)).expression(body)?)
            .text(")"))
    }

    /// The value is a separate force-concat statement, so `return` and its
    /// value render as one line.
    pub(super) fn return_stmt(&self, value: Option<&Expr>) -> Result<Vec<Fragment>> {
        let Some(value) = value else {
            return Ok(vec![Statement::terminated("return").into()]);
        };
        let mut value = Statement::terminated(self.expression(value)?);
        value.set_force_concat(true);
        Ok(vec![Statement::open("return ").into(), value.into()])
    }

    pub(super) fn call(&self, func: &Expr, args: &[Expr], keywords: &[Keyword]) -> Result<Expression> {
        let args = self.call_arguments(func, args, keywords)?;

        if self.elides(func) {
            let mut args = args.into_iter();
            return Ok(match (args.next(), args.len()) {
                (None, _) => "undefined".into(),
                (Some(only), 0) => only,
                (Some(first), _) => {
                    Expression::join(std::iter::once(first).chain(args), ", ").parenthesized()
                }
            });
        }

        let callee = match self.builtin(func) {
            Some(target) => Expression::from(target),
            None => self.operand(func)?,
        };
        Ok(callee
            .text("(")
            .append(Expression::join(args, ", "))
            .text(")"))
    }

    /// Lowered positional arguments. Keyword arguments go through the
    /// configured policy.
    pub(super) fn call_arguments(
        &self,
        func: &Expr,
        args: &[Expr],
        keywords: &[Keyword],
    ) -> Result<Vec<Expression>> {
        if !keywords.is_empty() {
            self.keyword_arguments(func, keywords)?;
        }

        let elided = self.elides(func);
        args.iter()
            .map(|arg| match arg {
                Expr::Starred(_) if elided => Err(TranspileError::compilation(
                    "starred arguments to an elided call are not supported",
                )),
                Expr::Starred(inner) => Ok(Expression::from("...").append(self.expression(inner)?)),
                other => self.expression(other),
            })
            .collect()
    }

    fn keyword_arguments(&self, func: &Expr, keywords: &[Keyword]) -> Result<()> {
        let callee = names::dotted_path(func).unwrap_or_else(|| func.kind_name().to_string());
        let dropped = keywords
            .iter()
            .map(|keyword| match &keyword.arg {
                Some(name) => name.clone(),
                None => "**".to_string(),
            })
            .collect::<Vec<_>>()
            .join(", ");

        match self.options.keyword_arguments {
            KeywordArguments::Reject => Err(TranspileError::compilation(format!(
                "keyword arguments are not supported (`{callee}` called with {dropped})"
            ))),
            KeywordArguments::Drop => {
                warn!(callee = %callee, dropped = %dropped, "dropping keyword arguments");
                Ok(())
            }
        }
    }
}
