//! Whole-program translation tests.
//!
//! Run `cargo insta review` to update snapshots after intentional changes.

use pyjs::{KeywordArguments, TranspileOptions, jsify};

fn options() -> TranspileOptions {
    TranspileOptions {
        contract_checks: true,
        ..TranspileOptions::default()
    }
}

fn translate(source: &str) -> String {
    jsify(source, "test.py", &options()).expect("translation failed")
}

const PROGRAM: &str = r#"import asyncio
from helpers import load


async def main(path, *rest, retries=3, **opts):
    """Sum the positive entries."""
    data = await load(path)
    total = 0
    for i in range(len(data)):
        if data[i] > 0 and i not in rest:
            total += data[i]
        elif data[i] == 0:
            continue
        else:
            break
    print(f"total: {total:>8}")
    return total


asyncio.create_task(main("x.json"))
"#;

#[test]
fn async_program() {
    insta::assert_snapshot!(translate(PROGRAM), @r#"
    const unholy_js = require("./not_python/unholy_js.js");
    const asyncio = require("./not_python/asyncio.js");
    const { load } = require("./not_python/helpers.js");
    let main = (async function main(path, retries = 3, options, ...rest) {
        const opts = options;
        "Sum the positive entries.";
        data = await load(path);
        total = 0;
        for (let i = 0; (1 >= 0 ? i < unholy_js.py__len(data) : i > unholy_js.py__len(data)); i += 1) {
            if ((data[i] > 0) && (!unholy_js.py__contains(rest, i))) {
                total = total + data[i];
            } else if (data[i] === 0) {
                continue;
            } else {
                break;
            }
        }
        console.log(`total: ${unholy_js.py__format(total, `>8`)}`);
        return total;
    });
    main("x.json");
    "#);
}

#[test]
fn decorated_helpers() {
    let source = "\
@cache
def area(w, h=1):
    scale = lambda v: v * 2
    while w > 0:
        w -= 1
    return scale(w * h) if w else 0
";
    insta::assert_snapshot!(translate(source), @r#"
    const unholy_js = require("./not_python/unholy_js.js");
    let area = cache((function area(w, h = 1) {
        scale = (v) => (v * 2);
        while (w > 0) {
            w = w - 1;
        }
        return (w ? scale(w * h) : 0);
    }));
    "#);
}

#[test]
fn output_ends_with_single_newline() {
    for source in ["", "x = 1\n", "if a:\n    pass\n\n\n"] {
        let js = translate(source);
        assert!(js.ends_with('\n') && !js.ends_with("\n\n"), "{js:?}");
    }
}

#[test]
fn translation_is_independent_of_contract_checks() {
    let unchecked = TranspileOptions {
        contract_checks: false,
        ..TranspileOptions::default()
    };
    assert_eq!(
        jsify(PROGRAM, "test.py", &unchecked).unwrap(),
        translate(PROGRAM)
    );
}

#[test]
fn nothing_is_emitted_on_failure() {
    let err = jsify("x = 1\nclass A:\n    pass\n", "model.py", &options()).unwrap_err();
    assert_eq!(
        err.to_string(),
        "model.py: line 2: class definitions are not supported (class `A`)"
    );
}

#[test]
fn keyword_policy() {
    let source = "open(path, mode='r')\n";
    let err = jsify(source, "io.py", &options()).unwrap_err();
    assert!(err.to_string().contains("`open` called with mode"), "{err}");

    let lenient = TranspileOptions {
        keyword_arguments: KeywordArguments::Drop,
        ..options()
    };
    assert!(jsify(source, "io.py", &lenient).unwrap().ends_with("open(path);\n"));
}
