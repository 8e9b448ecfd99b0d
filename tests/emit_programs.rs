use jsast::{
    config::resolved::{EmitConfig, PassConfig},
    js::{
        ast::{
            block::{Block, BlockKind},
            program::Program,
            stmt::StmtKind,
        },
        emitter::emit_program,
        pipeline::{compile, CompileError},
    },
};
use serde_json::{json, Value};

fn program(body: Value) -> Program {
    serde_json::from_value(json!({ "body": body })).expect("valid program")
}

fn call(name: &str) -> Value {
    json!({
        "type": "expr",
        "expr": { "type": "call", "callee": { "type": "ident", "name": name } }
    })
}

fn no_passes() -> EmitConfig {
    EmitConfig {
        passes: PassConfig {
            inline_calls: false,
            strip_dead_code: false,
            flatten_virtual_blocks: false,
        },
        ..EmitConfig::default()
    }
}

#[test]
fn virtual_and_scoped_blocks_from_json() {
    let p = program(json!([
        { "type": "block", "block": { "kind": "virtual", "stmts": [call("a"), call("b")] } },
        { "type": "block", "block": { "stmts": [call("c")] } }
    ]));
    let out = emit_program(&p, &EmitConfig::default()).unwrap();
    assert_eq!(out, "a();\nb();\n{\n    c();\n}\n");
}

#[test]
fn null_statement_is_rejected_anywhere() {
    let nested = json!({
        "body": [{
            "type": "if",
            "condition": { "type": "ident", "name": "c" },
            "then_block": { "kind": "virtual", "stmts": [call("a"), null] }
        }]
    });
    let err = serde_json::from_value::<Program>(nested).unwrap_err();
    assert!(err.to_string().contains("Statement 1 of block is null"), "{}", err);
}

#[test]
fn same_statement_in_both_block_kinds() {
    let stmt: jsast::js::ast::stmt::Stmt = serde_json::from_value(call("a")).unwrap();
    let scoped = Block::try_from_slots(BlockKind::Scoped, vec![Some(stmt.clone())], Default::default()).unwrap();
    let virt = Block::try_from_slots(BlockKind::Virtual, vec![Some(stmt.clone())], Default::default()).unwrap();
    assert_eq!(scoped.stmts(), virt.stmts());
    assert_ne!(scoped.is_virtual(), virt.is_virtual());
}

#[test]
fn inlining_picks_virtual_block_and_emits_flat() {
    let p = program(json!([
        {
            "type": "function",
            "name": "greet",
            "body": { "stmts": [call("hello"), call("world")] }
        },
        call("greet"),
        call("done")
    ]));
    let compiled = compile(p, &EmitConfig::default()).unwrap();
    assert_eq!(
        compiled.code,
        "function greet() {\n    hello();\n    world();\n}\nhello();\nworld();\ndone();\n"
    );
}

#[test]
fn inlined_let_is_kept_in_its_own_scope() {
    let p = program(json!([
        {
            "type": "function",
            "name": "setup",
            "body": { "stmts": [{ "type": "var", "kind": "let", "name": "x" }] }
        },
        { "type": "var", "kind": "let", "name": "x" },
        call("setup")
    ]));
    let compiled = compile(p, &EmitConfig::default()).unwrap();
    assert!(compiled.lints.is_empty());
    assert!(compiled.code.ends_with("let x;\n{\n    let x;\n}\n"), "{}", compiled.code);
}

#[test]
fn hand_built_leak_fails_lint() {
    let p = program(json!([
        { "type": "var", "kind": "const", "name": "x", "init": { "type": "literal", "value": 1 },
          "pos": { "line": 1, "column": 1 } },
        { "type": "block", "block": { "kind": "virtual", "stmts": [
            { "type": "var", "kind": "let", "name": "x", "pos": { "line": 2, "column": 3 } }
        ] } }
    ]));
    match compile(p, &no_passes()) {
        Err(CompileError::Lint(errs)) => {
            assert_eq!(errs.len(), 1);
            assert_eq!(errs[0].rule, "scope-leak");
            assert_eq!(errs[0].to_string().split_whitespace().next(), Some("2:3"));
        }
        other => panic!("unexpected {:?}", other),
    }
}

#[test]
fn dead_code_after_inlined_throw() {
    let p = program(json!([
        {
            "type": "function",
            "name": "fail",
            "body": { "stmts": [{ "type": "throw", "value": { "type": "literal", "value": "boom" } }] }
        },
        {
            "type": "function",
            "name": "main",
            "body": { "stmts": [call("fail"), call("unreachable")] }
        }
    ]));
    let compiled = compile(p, &EmitConfig::default()).unwrap();
    assert!(!compiled.code.contains("unreachable"), "{}", compiled.code);
    assert!(compiled.code.contains("function main() {\n    throw \"boom\";\n}"), "{}", compiled.code);
}

#[test]
fn flatten_removes_all_virtual_blocks() {
    let p = program(json!([
        { "type": "block", "block": { "stmts": [
            { "type": "block", "block": { "kind": "virtual", "stmts": [call("a")] } },
            call("b")
        ] } }
    ]));
    let mut config = no_passes();
    config.passes.flatten_virtual_blocks = true;
    let compiled = compile(p.clone(), &config).unwrap();
    assert_eq!(compiled.code, "{\n    a();\n    b();\n}\n");

    // output is the same as splicing at emission time
    assert_eq!(emit_program(&p, &no_passes()).unwrap(), compiled.code);
}

#[test]
fn wire_form_round_trip_keeps_kinds() {
    let p = program(json!([
        { "type": "block", "block": { "kind": "virtual", "stmts": [] } }
    ]));
    let back: Program = serde_json::from_value(serde_json::to_value(&p).unwrap()).unwrap();
    match &back.body.stmts()[0].kind {
        StmtKind::Block { block } => assert!(block.is_virtual()),
        other => panic!("unexpected {:?}", other),
    }
    assert_eq!(back, p);
}

#[test]
fn expressions_and_objects() {
    let p = program(json!([
        {
            "type": "var", "kind": "const", "name": "o",
            "init": { "type": "object", "properties": [
                { "key": "a", "value": { "type": "literal", "value": null } },
                { "key": "b-c", "value": { "type": "literal", "value": true } }
            ] }
        },
        {
            "type": "expr",
            "expr": {
                "type": "assign",
                "target": { "type": "member", "object": { "type": "ident", "name": "o" }, "property": "a" },
                "value": {
                    "type": "conditional",
                    "test": { "type": "binary", "op": "===", "left": { "type": "ident", "name": "x" },
                              "right": { "type": "literal", "value": 1.5 } },
                    "consequent": { "type": "new", "callee": { "type": "ident", "name": "Map" } },
                    "alternate": { "type": "array", "items": [] }
                }
            }
        }
    ]));
    let out = emit_program(&p, &EmitConfig::default()).unwrap();
    assert_eq!(
        out,
        "const o = { a: null, \"b-c\": true };\no.a = x === 1.5 ? new Map() : [];\n"
    );
}

#[test]
fn callee_with_var_keeps_its_own_scope() {
    let p = program(json!([
        { "type": "var", "kind": "var", "name": "count", "init": { "type": "literal", "value": 0 } },
        { "type": "function", "name": "reset", "body": { "stmts": [
            { "type": "var", "kind": "var", "name": "count", "init": { "type": "literal", "value": 5 } }
        ] } },
        call("reset"),
        { "type": "expr", "expr": { "type": "call", "callee": { "type": "ident", "name": "log" },
          "args": [{ "type": "ident", "name": "count" }] } }
    ]));
    let compiled = compile(p, &EmitConfig::default()).unwrap();
    assert_eq!(
        compiled.code,
        "var count = 0;\nfunction reset() {\n    var count = 5;\n}\nreset();\nlog(count);\n"
    );
}

#[test]
fn nested_function_of_the_same_name_wins() {
    let p = program(json!([
        { "type": "function", "name": "f", "body": { "stmts": [call("a")] } },
        { "type": "function", "name": "g", "body": { "stmts": [
            { "type": "function", "name": "f", "body": { "stmts": [call("b")] } },
            call("f")
        ] } }
    ]));
    let compiled = compile(p, &EmitConfig::default()).unwrap();
    assert!(
        compiled.code.ends_with("function g() {\n    function f() {\n        b();\n    }\n    f();\n}\n"),
        "{}",
        compiled.code
    );
}
