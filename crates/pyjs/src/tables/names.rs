//! Builtin renames.
//!
//! An empty target means the call is elided: the callee disappears and
//! only its arguments survive.

use pyjs_syntax::Expr;

/// Module binding of the runtime adapter in every translated file.
pub const RUNTIME_BINDING: &str = "unholy_js";

/// Target spelling for `name`, if the table has an entry.
pub fn lookup(name: &str) -> Option<&'static str> {
    let target = match name {
        "print" => "console.log",
        "asyncio.create_task" => "",
        "asyncio.ensure_future" => "",
        "format" => "unholy_js.py__format",
        "iter" => "unholy_js.py__iter",
        "next" => "unholy_js.py__next",
        "range" => "unholy_js.py__range",
        "len" => "unholy_js.py__len",
        "int" => "unholy_js.py__int",
        "str" => "String",
        "float" => "Number",
        "abs" => "Math.abs",
        "min" => "Math.min",
        "max" => "Math.max",
        _ => return None,
    };
    Some(target)
}

/// Table lookup falling through to the name itself.
pub fn resolve(name: &str) -> &str {
    lookup(name).unwrap_or(name)
}

/// `a.b.c` for an attribute chain rooted at a plain name.
pub fn dotted_path(expr: &Expr) -> Option<String> {
    match expr {
        Expr::Name(id) => Some(id.clone()),
        Expr::Attribute { value, attr } => {
            let mut path = dotted_path(value)?;
            path.push('.');
            path.push_str(attr);
            Some(path)
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_fallthrough() {
        assert_eq!(resolve("print"), "console.log");
        assert_eq!(resolve("my_function"), "my_function");
    }

    #[test]
    fn test_runtime_helpers_use_binding() {
        for name in ["format", "iter", "next", "range", "len", "int"] {
            let target = resolve(name);
            assert!(target.starts_with(RUNTIME_BINDING), "{name} -> {target}");
        }
    }

    #[test]
    fn test_dotted_lookup() {
        let create_task = Expr::attribute(Expr::name("asyncio"), "create_task");
        assert_eq!(dotted_path(&create_task).as_deref(), Some("asyncio.create_task"));
        assert_eq!(lookup("asyncio.create_task"), Some(""));
        assert_eq!(lookup("asyncio.sleep"), None);
    }

    #[test]
    fn test_dotted_path_needs_plain_root() {
        let call_root = Expr::attribute(Expr::call(Expr::name("f"), Vec::new()), "x");
        assert_eq!(dotted_path(&call_root), None);
    }
}
