use tracing::debug;

use crate::{
    config::resolved::EmitConfig,
    js::{
        ast::{
            binop::{precedence, UnaryOp},
            block::Block,
            expr::{Expr, ExprKind},
            literal::Literal,
            position::Position,
            program::Program,
            stmt::{Stmt, StmtKind, SwitchCase},
        },
        emitter::{
            errors::EmitError,
            strings::{is_identifier, number, quote_str},
        },
    },
};

pub type EmitResult<T> = Result<T, EmitError>;

pub fn emit_program(program: &Program, config: &EmitConfig) -> EmitResult<String> {
    let mut p = Printer::new(config, 0);
    p.listed_block(&program.body)?;
    let out = p.finish();
    debug!(bytes = out.len(), "emitted program");
    Ok(out)
}

/// Emits `block` as if it stood in a statement list at the top level.
pub fn emit_block(block: &Block, config: &EmitConfig) -> EmitResult<String> {
    let mut p = Printer::new(config, 0);
    p.listed_block(block)?;
    Ok(p.finish())
}

struct Printer<'c> {
    config: &'c EmitConfig,
    out: String,
    level: usize,
}

impl<'c> Printer<'c> {
    fn new(config: &'c EmitConfig, level: usize) -> Self {
        Self {
            config,
            out: String::new(),
            level,
        }
    }

    fn finish(mut self) -> String {
        if !self.config.trailing_newline && self.out.ends_with('\n') {
            self.out.pop();
        }
        self.out
    }

    fn indent(&self, level: usize) -> String {
        self.config.indent.repeat(level)
    }

    fn line(&mut self, text: &str) {
        let indent = self.indent(self.level);
        self.out.push_str(&indent);
        self.out.push_str(text);
        self.out.push('\n');
    }

    fn nested<F>(&mut self, f: F) -> EmitResult<()>
    where
        F: FnOnce(&mut Self) -> EmitResult<()>,
    {
        self.level += 1;
        let res = f(self);
        self.level -= 1;
        res
    }

    fn stmts(&mut self, block: &Block) -> EmitResult<()> {
        for s in block.iter() {
            self.stmt(s)?;
        }
        Ok(())
    }

    /// A block sitting in a statement list: virtual ones are spliced, scoped ones braced.
    fn listed_block(&mut self, block: &Block) -> EmitResult<()> {
        if block.is_virtual() {
            return self.stmts(block);
        }
        self.braced_block(block)
    }

    fn braced_block(&mut self, block: &Block) -> EmitResult<()> {
        if block.is_empty() {
            self.line("{}");
            return Ok(());
        }
        self.line("{");
        self.nested(|p| p.stmts(block))?;
        self.line("}");
        Ok(())
    }

    /// Body slot of a control structure. The owner always supplies the braces.
    fn body(&mut self, header: &str, block: &Block, footer: &str) -> EmitResult<()> {
        if block.is_empty() {
            self.line(&format!("{header} {{}}{footer}"));
            return Ok(());
        }
        self.line(&format!("{header} {{"));
        self.nested(|p| p.stmts(block))?;
        self.line(&format!("}}{footer}"));
        Ok(())
    }

    fn stmt(&mut self, s: &Stmt) -> EmitResult<()> {
        match &s.kind {
            StmtKind::Block { block } => self.listed_block(block)?,
            StmtKind::Var { kind, name, init } => {
                let name = self.name(name, s.pos)?;
                let text = match init {
                    Some(e) => format!(
                        "{} {} = {};",
                        kind.keyword(),
                        name,
                        self.operand(e, precedence::ASSIGN)?
                    ),
                    None => format!("{} {};", kind.keyword(), name),
                };
                self.line(&text);
            }
            StmtKind::Expr { expr } => {
                let text = self.expr(expr)?;
                // `function` or `{` at statement start would parse as a declaration or block
                let needs_parens = matches!(
                    expr.leftmost().kind,
                    ExprKind::Function { .. } | ExprKind::Object { .. }
                );
                if needs_parens {
                    self.line(&format!("({text});"));
                } else {
                    self.line(&format!("{text};"));
                }
            }
            StmtKind::Return { value } => match value {
                Some(e) => {
                    let text = self.expr(e)?;
                    self.line(&format!("return {text};"));
                }
                None => self.line("return;"),
            },
            StmtKind::If {
                condition,
                then_block,
                else_block,
            } => self.if_chain("if", condition, then_block, else_block.as_ref())?,
            StmtKind::While { condition, body } => {
                let header = format!("while ({})", self.expr(condition)?);
                self.body(&header, body, "")?;
            }
            StmtKind::DoWhile { body, condition } => {
                let footer = format!(" while ({});", self.expr(condition)?);
                self.body("do", body, &footer)?;
            }
            StmtKind::For {
                init,
                condition,
                increment,
                body,
            } => {
                let init = match init.as_deref() {
                    None => String::new(),
                    Some(s0) => self.for_init(s0)?,
                };
                let condition = match condition {
                    Some(c) => format!(" {}", self.expr(c)?),
                    None => String::new(),
                };
                let increment = match increment {
                    Some(i) => format!(" {}", self.expr(i)?),
                    None => String::new(),
                };
                let header = format!("for ({init};{condition};{increment})");
                self.body(&header, body, "")?;
            }
            StmtKind::Switch {
                discriminant,
                cases,
            } => {
                self.line(&format!("switch ({}) {{", self.expr(discriminant)?));
                self.nested(|p| {
                    for case in cases {
                        p.switch_case(case)?;
                    }
                    Ok(())
                })?;
                self.line("}");
            }
            StmtKind::Function { name, params, body } => {
                let header = format!(
                    "function {}({})",
                    self.name(name, s.pos)?,
                    self.params(params, s.pos)?
                );
                self.body(&header, body, "")?;
            }
            StmtKind::Throw { value } => {
                let text = self.expr(value)?;
                self.line(&format!("throw {text};"));
            }
            StmtKind::Try {
                block,
                handler,
                finalizer,
            } => {
                self.line("try {");
                self.nested(|p| p.stmts(block))?;
                if let Some(h) = handler {
                    match &h.param {
                        Some(param) => {
                            let param = self.name(param, s.pos)?;
                            self.line(&format!("}} catch ({param}) {{"));
                        }
                        None => self.line("} catch {"),
                    }
                    self.nested(|p| p.stmts(&h.body))?;
                }
                if let Some(f) = finalizer {
                    self.line("} finally {");
                    self.nested(|p| p.stmts(f))?;
                }
                self.line("}");
            }
            StmtKind::Labeled { label, body } => {
                let label = self.name(label, s.pos)?;
                match &body.kind {
                    // a label needs exactly one statement, so a virtual block is braced here
                    StmtKind::Block { block } => {
                        self.body(&format!("{label}:"), block, "")?;
                    }
                    _ => {
                        self.line(&format!("{label}:"));
                        self.stmt(body)?;
                    }
                }
            }
            StmtKind::Break { label } => match label {
                Some(l) => {
                    let l = self.name(l, s.pos)?;
                    self.line(&format!("break {l};"));
                }
                None => self.line("break;"),
            },
            StmtKind::Continue { label } => match label {
                Some(l) => {
                    let l = self.name(l, s.pos)?;
                    self.line(&format!("continue {l};"));
                }
                None => self.line("continue;"),
            },
            StmtKind::Debugger => self.line("debugger;"),
            StmtKind::Empty => self.line(";"),
        }
        Ok(())
    }

    /// `if`/`else if`/`else`. A virtual else-block holding a lone `if` continues the chain.
    fn if_chain(
        &mut self,
        keyword: &str,
        condition: &Expr,
        then_block: &Block,
        else_block: Option<&Block>,
    ) -> EmitResult<()> {
        let header = format!("{keyword} ({})", self.expr(condition)?);
        let Some(else_block) = else_block else {
            return self.body(&header, then_block, "");
        };

        self.line(&format!("{header} {{"));
        self.nested(|p| p.stmts(then_block))?;

        if let [Stmt {
            kind:
                StmtKind::If {
                    condition: next_condition,
                    then_block: next_then,
                    else_block: next_else,
                },
            ..
        }] = else_block.stmts()
        {
            if else_block.is_virtual() {
                return self.if_chain("} else if", next_condition, next_then, next_else.as_ref());
            }
        }

        if else_block.is_empty() {
            self.line("} else {}");
            return Ok(());
        }
        self.line("} else {");
        self.nested(|p| p.stmts(else_block))?;
        self.line("}");
        Ok(())
    }

    fn switch_case(&mut self, case: &SwitchCase) -> EmitResult<()> {
        let label = match &case.test {
            Some(t) => format!("case {}:", self.expr(t)?),
            None => "default:".to_string(),
        };
        if case.body.is_virtual() {
            self.line(&label);
            return self.nested(|p| p.stmts(&case.body));
        }
        self.body(&label, &case.body, "")
    }

    fn for_init(&self, s: &Stmt) -> EmitResult<String> {
        match &s.kind {
            StmtKind::Var { kind, name, init } => Ok(match init {
                Some(e) => format!(
                    "{} {} = {}",
                    kind.keyword(),
                    self.name(name, s.pos)?,
                    self.operand(e, precedence::ASSIGN)?
                ),
                None => format!("{} {}", kind.keyword(), self.name(name, s.pos)?),
            }),
            StmtKind::Expr { expr } => self.expr(expr),
            _ => Err(EmitError::InvalidForInit(s.pos)),
        }
    }

    /// Prints `e`, parenthesized when it binds looser than `min`.
    fn operand(&self, e: &Expr, min: u8) -> EmitResult<String> {
        let text = self.expr(e)?;
        if e.precedence() < min {
            Ok(format!("({text})"))
        } else {
            Ok(text)
        }
    }

    fn args(&self, args: &[Expr]) -> EmitResult<String> {
        let parts = args
            .iter()
            .map(|a| self.operand(a, precedence::ASSIGN))
            .collect::<EmitResult<Vec<_>>>()?;
        Ok(parts.join(", "))
    }

    fn expr(&self, e: &Expr) -> EmitResult<String> {
        let text = match &e.kind {
            ExprKind::Literal { value } => match value {
                Literal::Null => "null".to_string(),
                Literal::Bool(b) => b.to_string(),
                Literal::Number(n) => number(*n),
                Literal::String(s) => quote_str(s, self.config.quote),
            },
            ExprKind::Ident { name } => self.name(name, e.pos)?.to_string(),
            ExprKind::Array { items } => format!("[{}]", self.args(items)?),
            ExprKind::Object { properties } => {
                if properties.is_empty() {
                    "{}".to_string()
                } else {
                    let mut parts = Vec::with_capacity(properties.len());
                    for prop in properties {
                        let key = if is_identifier(&prop.key) {
                            prop.key.clone()
                        } else {
                            quote_str(&prop.key, self.config.quote)
                        };
                        parts.push(format!(
                            "{}: {}",
                            key,
                            self.operand(&prop.value, precedence::ASSIGN)?
                        ));
                    }
                    format!("{{ {} }}", parts.join(", "))
                }
            }
            ExprKind::Member { object, property } => {
                let object = self.member_object(object)?;
                if is_identifier(property) {
                    format!("{}.{}", object, property)
                } else {
                    format!("{}[{}]", object, quote_str(property, self.config.quote))
                }
            }
            ExprKind::Index { object, index } => {
                format!("{}[{}]", self.member_object(object)?, self.expr(index)?)
            }
            ExprKind::Call { callee, args } => {
                format!(
                    "{}({})",
                    self.operand(callee, precedence::CALL)?,
                    self.args(args)?
                )
            }
            ExprKind::New { callee, args } => {
                // `new f()()` or `new f().g()` would apply `new` to `f` alone
                let callee_text = if calls_in_chain(callee) {
                    format!("({})", self.expr(callee)?)
                } else {
                    self.operand(callee, precedence::CALL)?
                };
                format!("new {}({})", callee_text, self.args(args)?)
            }
            ExprKind::Unary { op, operand } => {
                let inner = self.operand(operand, precedence::UNARY)?;
                let op_text = op.to_string();
                let spaced = op.is_keyword()
                    || (matches!(op, UnaryOp::Neg | UnaryOp::Plus) && inner.starts_with(&op_text));
                if spaced {
                    format!("{op_text} {inner}")
                } else {
                    format!("{op_text}{inner}")
                }
            }
            ExprKind::Binary { op, left, right } => {
                let prec = op.precedence();
                format!(
                    "{} {} {}",
                    self.operand(left, prec)?,
                    op,
                    self.operand(right, prec + 1)?
                )
            }
            ExprKind::Assign { target, value } => {
                if !target.is_assign_target() {
                    return Err(EmitError::InvalidAssignmentTarget(target.pos));
                }
                format!(
                    "{} = {}",
                    self.expr(target)?,
                    self.operand(value, precedence::ASSIGN)?
                )
            }
            ExprKind::Conditional {
                test,
                consequent,
                alternate,
            } => format!(
                "{} ? {} : {}",
                self.operand(test, precedence::CONDITIONAL + 1)?,
                self.operand(consequent, precedence::ASSIGN)?,
                self.operand(alternate, precedence::ASSIGN)?
            ),
            ExprKind::Function { name, params, body } => {
                let params = self.params(params, e.pos)?;
                let header = match name {
                    Some(n) => format!("function {}({})", self.name(n, e.pos)?, params),
                    None => format!("function({})", params),
                };
                if body.is_empty() {
                    format!("{header} {{}}")
                } else {
                    let mut inner = Printer::new(self.config, self.level + 1);
                    inner.stmts(body)?;
                    format!("{header} {{\n{}{}}}", inner.out, self.indent(self.level))
                }
            }
        };
        Ok(text)
    }

    fn name<'n>(&self, name: &'n str, pos: Position) -> EmitResult<&'n str> {
        if is_identifier(name) {
            Ok(name)
        } else {
            Err(EmitError::InvalidIdentifier(name.to_string(), pos))
        }
    }

    fn params(&self, params: &[String], pos: Position) -> EmitResult<String> {
        for p in params {
            self.name(p, pos)?;
        }
        Ok(params.join(", "))
    }

    /// Object of a member access; number literals need parens before `.`.
    fn member_object(&self, object: &Expr) -> EmitResult<String> {
        if let ExprKind::Literal {
            value: Literal::Number(_),
        } = object.kind
        {
            return Ok(format!("({})", self.expr(object)?));
        }
        self.operand(object, precedence::CALL)
    }
}

/// Is there a call anywhere along the `a().b[c]` chain of `callee`?
fn calls_in_chain(callee: &Expr) -> bool {
    let mut e = callee;
    loop {
        match &e.kind {
            ExprKind::Call { .. } => return true,
            ExprKind::Member { object, .. } | ExprKind::Index { object, .. } => e = object,
            _ => return false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        config::resolved::QuoteStyle,
        js::ast::{
            binop::BinOp,
            node::Located,
            position::Position,
            stmt::{CatchClause, VarKind},
        },
    };

    fn ident(name: &str) -> Expr {
        Expr::synthetic(ExprKind::Ident { name: name.into() })
    }

    fn num(n: f64) -> Expr {
        Expr::synthetic(ExprKind::Literal {
            value: Literal::Number(n),
        })
    }

    fn call(name: &str) -> Stmt {
        Stmt::synthetic(StmtKind::Expr {
            expr: Expr::synthetic(ExprKind::Call {
                callee: Box::new(ident(name)),
                args: vec![],
            }),
        })
    }

    fn bin(op: BinOp, l: Expr, r: Expr) -> Expr {
        Expr::synthetic(ExprKind::Binary {
            op,
            left: Box::new(l),
            right: Box::new(r),
        })
    }

    fn emit(stmts: Vec<Stmt>) -> String {
        emit_program(&Program::new(stmts), &EmitConfig::default()).unwrap()
    }

    #[test]
    fn virtual_block_is_spliced() {
        let inner = Block::new_virtual(vec![call("a"), call("b")], Position::UNKNOWN);
        let out = emit(vec![call("x"), Stmt::block(inner), call("y")]);
        assert_eq!(out, "x();\na();\nb();\ny();\n");
    }

    #[test]
    fn scoped_block_is_braced() {
        let inner = Block::new(vec![call("a")], Position::UNKNOWN);
        let out = emit(vec![Stmt::block(inner)]);
        assert_eq!(out, "{\n    a();\n}\n");
    }

    #[test]
    fn empty_blocks() {
        let out = emit(vec![
            Stmt::block(Block::new_virtual(vec![], Position::UNKNOWN)),
            Stmt::block(Block::new(vec![], Position::UNKNOWN)),
        ]);
        assert_eq!(out, "{}\n");
    }

    #[test]
    fn nested_virtual_inside_scoped_keeps_depth() {
        let virt = Block::new_virtual(vec![call("a")], Position::UNKNOWN);
        let scoped = Block::new(vec![Stmt::block(virt), call("b")], Position::UNKNOWN);
        let out = emit_block(&scoped, &EmitConfig::default()).unwrap();
        assert_eq!(out, "{\n    a();\n    b();\n}\n");
    }

    #[test]
    fn if_body_is_braced_even_when_virtual() {
        let s = Stmt::synthetic(StmtKind::If {
            condition: ident("c"),
            then_block: Block::new_virtual(vec![call("a"), call("b")], Position::UNKNOWN),
            else_block: None,
        });
        assert_eq!(emit(vec![s]), "if (c) {\n    a();\n    b();\n}\n");
    }

    #[test]
    fn virtual_else_with_lone_if_chains() {
        let inner = Stmt::synthetic(StmtKind::If {
            condition: ident("d"),
            then_block: Block::new(vec![call("b")], Position::UNKNOWN),
            else_block: Some(Block::new(vec![call("c")], Position::UNKNOWN)),
        });
        let s = Stmt::synthetic(StmtKind::If {
            condition: ident("c"),
            then_block: Block::new(vec![call("a")], Position::UNKNOWN),
            else_block: Some(Block::new_virtual(vec![inner.clone()], Position::UNKNOWN)),
        });
        assert_eq!(
            emit(vec![s]),
            "if (c) {\n    a();\n} else if (d) {\n    b();\n} else {\n    c();\n}\n"
        );

        let scoped_else = Stmt::synthetic(StmtKind::If {
            condition: ident("c"),
            then_block: Block::new(vec![call("a")], Position::UNKNOWN),
            else_block: Some(Block::new(vec![inner], Position::UNKNOWN)),
        });
        assert!(emit(vec![scoped_else]).contains("} else {\n    if (d) {"));
    }

    #[test]
    fn for_loop_header() {
        let init = Stmt::synthetic(StmtKind::Var {
            kind: VarKind::Let,
            name: "i".into(),
            init: Some(num(0.0)),
        });
        let s = Stmt::synthetic(StmtKind::For {
            init: Some(Box::new(init)),
            condition: Some(bin(BinOp::Lt, ident("i"), ident("n"))),
            increment: None,
            body: Block::new(vec![], Position::UNKNOWN),
        });
        assert_eq!(emit(vec![s]), "for (let i = 0; i < n;) {}\n");

        let forever = Stmt::synthetic(StmtKind::For {
            init: None,
            condition: None,
            increment: None,
            body: Block::new(vec![Stmt::synthetic(StmtKind::Break { label: None })], Position::UNKNOWN),
        });
        assert_eq!(emit(vec![forever]), "for (;;) {\n    break;\n}\n");
    }

    #[test]
    fn bad_for_init_is_an_error() {
        let s = Stmt::synthetic(StmtKind::For {
            init: Some(Box::new(Located::new(StmtKind::Debugger, Position::new(3, 6)))),
            condition: None,
            increment: None,
            body: Block::new(vec![], Position::UNKNOWN),
        });
        let err = emit_program(&Program::new(vec![s]), &EmitConfig::default()).unwrap_err();
        assert_eq!(err, EmitError::InvalidForInit(Position::new(3, 6)));
    }

    #[test]
    fn switch_case_bodies_follow_block_kind() {
        let s = Stmt::synthetic(StmtKind::Switch {
            discriminant: ident("x"),
            cases: vec![
                SwitchCase {
                    test: Some(num(1.0)),
                    body: Block::new_virtual(
                        vec![call("a"), Stmt::synthetic(StmtKind::Break { label: None })],
                        Position::UNKNOWN,
                    ),
                },
                SwitchCase {
                    test: None,
                    body: Block::new(vec![call("b")], Position::UNKNOWN),
                },
            ],
        });
        assert_eq!(
            emit(vec![s]),
            "switch (x) {\n    case 1:\n        a();\n        break;\n    default: {\n        b();\n    }\n}\n"
        );
    }

    #[test]
    fn try_catch_finally() {
        let s = Stmt::synthetic(StmtKind::Try {
            block: Block::new(vec![call("a")], Position::UNKNOWN),
            handler: Some(CatchClause {
                param: Some("e".into()),
                body: Block::new(vec![call("b")], Position::UNKNOWN),
            }),
            finalizer: Some(Block::new(vec![call("c")], Position::UNKNOWN)),
        });
        assert_eq!(
            emit(vec![s]),
            "try {\n    a();\n} catch (e) {\n    b();\n} finally {\n    c();\n}\n"
        );
    }

    #[test]
    fn labeled_virtual_block_gets_braces() {
        let s = Stmt::synthetic(StmtKind::Labeled {
            label: "outer".into(),
            body: Box::new(Stmt::block(Block::new_virtual(
                vec![Stmt::synthetic(StmtKind::Break {
                    label: Some("outer".into()),
                })],
                Position::UNKNOWN,
            ))),
        });
        assert_eq!(emit(vec![s]), "outer: {\n    break outer;\n}\n");
    }

    #[test]
    fn precedence_parens() {
        // a - (b - c)
        let e = bin(BinOp::Sub, ident("a"), bin(BinOp::Sub, ident("b"), ident("c")));
        // (a + b) * c
        let f = bin(BinOp::Mul, bin(BinOp::Add, ident("a"), ident("b")), ident("c"));
        let out = emit(vec![
            Stmt::synthetic(StmtKind::Expr { expr: e }),
            Stmt::synthetic(StmtKind::Expr { expr: f }),
        ]);
        assert_eq!(out, "a - (b - c);\n(a + b) * c;\n");
    }

    #[test]
    fn unary_spacing_and_member_on_number() {
        let neg = Expr::synthetic(ExprKind::Unary {
            op: UnaryOp::Neg,
            operand: Box::new(num(-1.0)),
        });
        let ty = Expr::synthetic(ExprKind::Unary {
            op: UnaryOp::TypeOf,
            operand: Box::new(ident("x")),
        });
        let member = Expr::synthetic(ExprKind::Member {
            object: Box::new(num(1.0)),
            property: "toString".into(),
        });
        let out = emit(vec![
            Stmt::synthetic(StmtKind::Expr { expr: neg }),
            Stmt::synthetic(StmtKind::Expr { expr: ty }),
            Stmt::synthetic(StmtKind::Expr { expr: member }),
        ]);
        assert_eq!(out, "- -1;\ntypeof x;\n(1).toString;\n");
    }

    #[test]
    fn function_expression_statement_is_wrapped() {
        let func = Expr::synthetic(ExprKind::Function {
            name: None,
            params: vec!["a".into()],
            body: Block::new(vec![call("a")], Position::UNKNOWN),
        });
        let iife = Expr::synthetic(ExprKind::Call {
            callee: Box::new(func),
            args: vec![num(1.0)],
        });
        let out = emit(vec![Stmt::synthetic(StmtKind::Expr { expr: iife })]);
        assert_eq!(out, "(function(a) {\n    a();\n}(1));\n");
    }

    #[test]
    fn invalid_assignment_target() {
        let e = Expr::synthetic(ExprKind::Assign {
            target: Box::new(Located::new(
                ExprKind::Literal {
                    value: Literal::Number(1.0),
                },
                Position::new(2, 1),
            )),
            value: Box::new(num(2.0)),
        });
        let err = emit_program(
            &Program::new(vec![Stmt::synthetic(StmtKind::Expr { expr: e })]),
            &EmitConfig::default(),
        )
        .unwrap_err();
        assert_eq!(err, EmitError::InvalidAssignmentTarget(Position::new(2, 1)));
    }

    #[test]
    fn config_controls_indent_quotes_and_newline() {
        let config = EmitConfig {
            indent: "\t".into(),
            quote: QuoteStyle::Single,
            trailing_newline: false,
            ..EmitConfig::default()
        };
        let s = Stmt::synthetic(StmtKind::Function {
            name: "f".into(),
            params: vec![],
            body: Block::new(
                vec![Stmt::synthetic(StmtKind::Return {
                    value: Some(Expr::synthetic(ExprKind::Literal {
                        value: Literal::String("hi".into()),
                    })),
                })],
                Position::UNKNOWN,
            ),
        });
        let out = emit_program(&Program::new(vec![s]), &config).unwrap();
        assert_eq!(out, "function f() {\n\treturn 'hi';\n}");
    }

    fn member(object: Expr, property: &str) -> Expr {
        Expr::synthetic(ExprKind::Member {
            object: Box::new(object),
            property: property.into(),
        })
    }

    fn expr_stmt(expr: Expr) -> Stmt {
        Stmt::synthetic(StmtKind::Expr { expr })
    }

    #[test]
    fn new_parenthesizes_callee_with_a_call_in_its_chain() {
        let f_call = Expr::synthetic(ExprKind::Call {
            callee: Box::new(ident("f")),
            args: vec![],
        });
        let new_g = Expr::synthetic(ExprKind::New {
            callee: Box::new(member(f_call.clone(), "G")),
            args: vec![],
        });
        let index = Expr::synthetic(ExprKind::New {
            callee: Box::new(Expr::synthetic(ExprKind::Index {
                object: Box::new(member(f_call, "m")),
                index: Box::new(num(0.0)),
            })),
            args: vec![],
        });
        let plain = Expr::synthetic(ExprKind::New {
            callee: Box::new(member(ident("ns"), "G")),
            args: vec![],
        });
        let out = emit(vec![expr_stmt(new_g), expr_stmt(index), expr_stmt(plain)]);
        assert_eq!(out, "new (f().G)();\nnew (f().m[0])();\nnew ns.G();\n");
    }

    #[test]
    fn non_identifier_property_uses_brackets() {
        let out = emit(vec![
            expr_stmt(member(ident("o"), "a-b")),
            expr_stmt(member(ident("o"), "ok")),
        ]);
        assert_eq!(out, "o[\"a-b\"];\no.ok;\n");
    }

    #[test]
    fn invalid_names_are_rejected() {
        let at = Position::new(4, 2);
        let emit_err = |s: Stmt| {
            emit_program(&Program::new(vec![s]), &EmitConfig::default()).unwrap_err()
        };

        let bad_ident = expr_stmt(Located::new(ExprKind::Ident { name: "a-b".into() }, at));
        assert_eq!(emit_err(bad_ident), EmitError::InvalidIdentifier("a-b".into(), at));

        let bad_param = Located::new(
            StmtKind::Function {
                name: "f".into(),
                params: vec!["x y".into()],
                body: Block::new(vec![], Position::UNKNOWN),
            },
            at,
        );
        assert_eq!(emit_err(bad_param), EmitError::InvalidIdentifier("x y".into(), at));

        let bad_label = Located::new(
            StmtKind::Labeled {
                label: "1st".into(),
                body: Box::new(Stmt::synthetic(StmtKind::Empty)),
            },
            at,
        );
        assert_eq!(emit_err(bad_label).pos(), at);

        let bad_var = Located::new(
            StmtKind::Var {
                kind: VarKind::Let,
                name: "".into(),
                init: None,
            },
            at,
        );
        assert!(matches!(emit_err(bad_var), EmitError::InvalidIdentifier(..)));
    }
}
