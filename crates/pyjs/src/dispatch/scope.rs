//! Names bound by the translated program.
//!
//! A binding shadows a builtin rename for the whole scope: once a function
//! takes a `max` parameter, `max` in its body is that parameter and not
//! `Math.max`. Nested functions inherit the shadowing of their parents.

use pyjs_syntax::{Arguments, Expr, FStringPart, Stmt, StmtKind};
use std::collections::HashSet;

/// Names bound directly in `body`. Nested function bodies are not entered;
/// their own scope is collected when they are lowered.
pub(super) fn bound_names(body: &[Stmt]) -> HashSet<String> {
    let mut names = HashSet::new();
    collect_block(body, &mut names);
    names
}

/// Parameter names, including the `options` parameter that receives `**`.
pub(super) fn parameter_names(args: &Arguments) -> HashSet<String> {
    let mut names: HashSet<String> = args
        .posonly
        .iter()
        .chain(&args.args)
        .chain(&args.kwonly)
        .map(|arg| arg.name.clone())
        .collect();
    names.extend(args.vararg.iter().cloned());
    if let Some(kwarg) = &args.kwarg {
        names.insert(kwarg.clone());
        names.insert("options".into());
    }
    names
}

fn collect_block(body: &[Stmt], names: &mut HashSet<String>) {
    for stmt in body {
        collect_stmt(&stmt.kind, names);
    }
}

fn collect_stmt(kind: &StmtKind, names: &mut HashSet<String>) {
    match kind {
        StmtKind::FunctionDef(def) => {
            names.insert(def.name.clone());
            for decorator in &def.decorators {
                collect_walrus(decorator, names);
            }
        }
        StmtKind::ClassDef { name } => {
            names.insert(name.clone());
        }
        StmtKind::Assign { targets, value } => {
            for target in targets {
                collect_target(target, names);
            }
            collect_walrus(value, names);
        }
        StmtKind::AugAssign { target, value, .. } => {
            collect_target(target, names);
            collect_walrus(value, names);
        }
        StmtKind::AnnAssign { target, value, .. } => {
            collect_target(target, names);
            if let Some(value) = value {
                collect_walrus(value, names);
            }
        }
        StmtKind::For {
            target,
            iter,
            body,
            orelse,
            ..
        } => {
            collect_target(target, names);
            collect_walrus(iter, names);
            collect_block(body, names);
            collect_block(orelse, names);
        }
        StmtKind::While { test, body, orelse } | StmtKind::If { test, body, orelse } => {
            collect_walrus(test, names);
            collect_block(body, names);
            collect_block(orelse, names);
        }
        // `import m` binds the module the rename table describes
        StmtKind::ImportFrom { names: aliases, .. } => {
            for alias in aliases {
                names.insert(alias.asname.clone().unwrap_or_else(|| alias.name.clone()));
            }
        }
        StmtKind::Return(Some(value)) | StmtKind::Expr(value) => collect_walrus(value, names),
        StmtKind::Delete(targets) => {
            for target in targets {
                collect_walrus(target, names);
            }
        }
        StmtKind::Return(None)
        | StmtKind::Import(_)
        | StmtKind::Pass
        | StmtKind::Break
        | StmtKind::Continue
        | StmtKind::Try
        | StmtKind::Raise
        | StmtKind::With { .. }
        | StmtKind::Global(_)
        | StmtKind::Nonlocal(_)
        | StmtKind::Assert
        | StmtKind::Match
        | StmtKind::TypeAlias => {}
    }
}

fn collect_target(target: &Expr, names: &mut HashSet<String>) {
    match target {
        Expr::Name(id) => {
            names.insert(id.clone());
        }
        Expr::Tuple(items) | Expr::List(items) => {
            for item in items {
                collect_target(item, names);
            }
        }
        Expr::Starred(inner) => collect_target(inner, names),
        other => collect_walrus(other, names),
    }
}

/// `(n := v)` binds `n` in the enclosing function scope.
fn collect_walrus(expr: &Expr, names: &mut HashSet<String>) {
    match expr {
        Expr::NamedExpr { target, value } => {
            names.insert(target.clone());
            collect_walrus(value, names);
        }
        Expr::BoolOp { values: items, .. }
        | Expr::Set(items)
        | Expr::List(items)
        | Expr::Tuple(items) => {
            for item in items {
                collect_walrus(item, names);
            }
        }
        Expr::BinOp { left, right, .. } => {
            collect_walrus(left, names);
            collect_walrus(right, names);
        }
        Expr::IfExp { test, body, orelse } => {
            collect_walrus(test, names);
            collect_walrus(body, names);
            collect_walrus(orelse, names);
        }
        Expr::Dict { keys, values } => {
            for key in keys.iter().flatten() {
                collect_walrus(key, names);
            }
            for value in values {
                collect_walrus(value, names);
            }
        }
        Expr::Compare {
            left, comparators, ..
        } => {
            collect_walrus(left, names);
            for comparator in comparators {
                collect_walrus(comparator, names);
            }
        }
        Expr::Call {
            func,
            args,
            keywords,
        } => {
            collect_walrus(func, names);
            for arg in args {
                collect_walrus(arg, names);
            }
            for keyword in keywords {
                collect_walrus(&keyword.value, names);
            }
        }
        Expr::JoinedStr(parts) => collect_fstring(parts, names),
        Expr::UnaryOp { operand: inner, .. }
        | Expr::Await(inner)
        | Expr::Starred(inner)
        | Expr::Attribute { value: inner, .. } => collect_walrus(inner, names),
        Expr::Subscript { value, slice } => {
            collect_walrus(value, names);
            collect_walrus(slice, names);
        }
        Expr::Slice { lower, upper, step } => {
            for part in [lower, upper, step].into_iter().flatten() {
                collect_walrus(part, names);
            }
        }
        // a lambda body is its own scope
        Expr::Lambda { .. }
        | Expr::ListComp
        | Expr::SetComp
        | Expr::DictComp
        | Expr::GeneratorExp
        | Expr::Yield
        | Expr::YieldFrom
        | Expr::Constant(_)
        | Expr::Name(_) => {}
    }
}

fn collect_fstring(parts: &[FStringPart], names: &mut HashSet<String>) {
    for part in parts {
        if let FStringPart::Replacement {
            value, format_spec, ..
        } = part
        {
            collect_walrus(value, names);
            if let Some(spec) = format_spec {
                collect_fstring(spec, names);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pyjs_syntax::read_python;

    fn bound(source: &str) -> Vec<String> {
        let module = read_python(source).unwrap();
        let mut names: Vec<_> = bound_names(&module.body).into_iter().collect();
        names.sort();
        names
    }

    #[test]
    fn test_assignment_and_loop_targets() {
        assert_eq!(
            bound("max = 0\nfor i, len in pairs:\n    if (n := 3):\n        pass\n"),
            ["i", "len", "max", "n"]
        );
    }

    #[test]
    fn test_nested_function_bodies_are_not_entered() {
        assert_eq!(bound("def f(str):\n    int = 1\n"), ["f"]);
    }

    #[test]
    fn test_from_imports_bind_but_module_imports_do_not() {
        assert_eq!(bound("import asyncio\nfrom m import len, x as format\n"), ["format", "len"]);
    }

    #[test]
    fn test_parameters() {
        let module = read_python("def f(a, /, b, *rest, c, **kw):\n    pass\n").unwrap();
        let StmtKind::FunctionDef(def) = &module.body[0].kind else {
            panic!("expected function");
        };
        let mut names: Vec<_> = parameter_names(&def.args).into_iter().collect();
        names.sort();
        assert_eq!(names, ["a", "b", "c", "kw", "options", "rest"]);
    }
}
