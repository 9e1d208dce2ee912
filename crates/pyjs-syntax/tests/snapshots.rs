//! Snapshot tests for the Python reader.
//!
//! Run `cargo insta review` to update snapshots after intentional changes.

mod python_reader {
    use pyjs_syntax::{Module, read_python};

    fn parse(code: &str) -> Module {
        read_python(code).expect("parse failed")
    }

    #[test]
    fn assignment() {
        insta::assert_json_snapshot!(parse("x = 1"), @r#"
        {
          "body": [
            {
              "kind": {
                "Assign": {
                  "targets": [
                    {
                      "Name": "x"
                    }
                  ],
                  "value": {
                    "Constant": {
                      "Int": "1"
                    }
                  }
                }
              },
              "line": 1
            }
          ]
        }
        "#);
    }

    #[test]
    fn print_call() {
        insta::assert_json_snapshot!(parse("print('hi')"), @r#"
        {
          "body": [
            {
              "kind": {
                "Expr": {
                  "Call": {
                    "func": {
                      "Name": "print"
                    },
                    "args": [
                      {
                        "Constant": {
                          "Str": "hi"
                        }
                      }
                    ],
                    "keywords": []
                  }
                }
              },
              "line": 1
            }
          ]
        }
        "#);
    }

    #[test]
    fn bare_statements() {
        insta::assert_json_snapshot!(parse("while x:\n    break\npass\n"), @r#"
        {
          "body": [
            {
              "kind": {
                "While": {
                  "test": {
                    "Name": "x"
                  },
                  "body": [
                    {
                      "kind": "Break",
                      "line": 2
                    }
                  ],
                  "orelse": []
                }
              },
              "line": 1
            },
            {
              "kind": "Pass",
              "line": 3
            }
          ]
        }
        "#);
    }
}
