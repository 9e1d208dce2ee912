//! Shared helpers for handler tests, plus end-to-end checks.

use crate::dispatch::Dispatcher;
use crate::options::TranspileOptions;
use crate::tree::{Fragment, Renderer};
use crate::{TranspileError, jsify, translate};
use pyjs_syntax::{StmtKind, read_python};

fn checked() -> TranspileOptions {
    TranspileOptions {
        contract_checks: true,
        ..TranspileOptions::default()
    }
}

fn lower_expr(source: &str) -> Result<String, TranspileError> {
    let module = read_python(source).expect("parse failed");
    let StmtKind::Expr(expr) = &module.body[0].kind else {
        panic!("{source:?} is not an expression statement");
    };
    let lowered = Dispatcher::new(&checked()).expression(expr)?;
    Ok(Renderer::default().render(&Fragment::Expression(lowered), 0))
}

/// Render a single expression.
pub(crate) fn expr(source: &str) -> String {
    lower_expr(source).expect("translation failed")
}

pub(crate) fn expr_err(source: &str) -> String {
    lower_expr(source).unwrap_err().to_string()
}

fn lower_body(source: &str, options: &TranspileOptions) -> Result<String, TranspileError> {
    let module = read_python(source).expect("parse failed");
    let output = translate(&module, options)?;
    let (_preamble, body) = output.split_once('\n').expect("missing preamble");
    Ok(body.trim_end_matches('\n').to_string())
}

/// Translate a module and drop the runtime preamble.
pub(crate) fn body(source: &str) -> String {
    body_with(source, &checked())
}

pub(crate) fn body_with(source: &str, options: &TranspileOptions) -> String {
    lower_body(source, options).expect("translation failed")
}

pub(crate) fn body_err(source: &str) -> String {
    lower_body(source, &checked()).unwrap_err().to_string()
}

#[test]
fn test_end_to_end_function() {
    let js = jsify("def f(x):\n    return x + 1\n", "f.py", &checked()).unwrap();
    assert_eq!(
        js,
        "const unholy_js = require(\"./not_python/unholy_js.js\");\n\
         let f = (function f(x) {\n    return x + 1;\n});\n"
    );
}

#[test]
fn test_empty_module_is_just_the_preamble() {
    let js = jsify("", "empty.py", &checked()).unwrap();
    assert_eq!(js, "const unholy_js = require(\"./not_python/unholy_js.js\");\n");
}

#[test]
fn test_errors_name_the_file() {
    let err = jsify("x = a[1:2]\n", "slices.py", &checked()).unwrap_err();
    assert_eq!(err.to_string(), "slices.py: line 1: slicing is not supported");

    let err = jsify("def f(:\n", "broken.py", &checked()).unwrap_err();
    assert!(err.to_string().starts_with("broken.py: syntax error on line 1"), "{err}");
}

#[test]
fn test_indent_width() {
    let options = TranspileOptions {
        indent_width: 2,
        ..checked()
    };
    assert_eq!(
        body_with("while x:\n    x -= 1\n", &options),
        "while (x) {\n  x = x - 1;\n}"
    );
}

#[test]
fn test_translation_is_deterministic() {
    let source = "import m\nfor i in range(3):\n    if i % 2 == 0:\n        print(f'{i} even')\n";
    assert_eq!(body(source), body(source));
}

#[test]
fn test_statements_at_module_level() {
    let js = jsify(
        "\"\"\"Module doc.\"\"\"\ntotal = 0\ntotal += 2\nasyncio.create_task()\nprint(total)\n",
        "stmts.py",
        &checked(),
    )
    .unwrap();
    assert_eq!(
        js,
        "const unholy_js = require(\"./not_python/unholy_js.js\");\n\
         \"Module doc.\";\n\
         total = 0;\n\
         total = total + 2;\n\
         console.log(total);\n"
    );
}
