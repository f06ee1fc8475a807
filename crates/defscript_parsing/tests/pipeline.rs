use defscript_ast::operators::LogicalOperator;
use defscript_ast::target::{self, BinaryOperator, ExprKind, StmtKind};
use defscript_ast::{Position, SourceLocation};
use defscript_parsing::parser::{parse, SyntaxErrorKind};
use defscript_parsing::rewrite::{tokenize, tokenize_raw, CascadeOptions};
use defscript_parsing::{transform, LexingError};
use defscript_tokens::source::SourceFile;
use defscript_tokens::token::TokenKind;
use test_log::test;

mod common;

use common::LineGrammar;

fn compile(text: &str) -> target::Program {
    let source = SourceFile::new("pipeline.ds", text);
    let tokens = tokenize(&source, 0, &CascadeOptions::default()).expect("could not tokenize");
    let program = parse(&source, tokens, LineGrammar::default()).expect("could not parse");
    transform(program).expect("could not transform")
}

fn expression_of(stmt: &target::Stmt) -> &target::Expr {
    match &stmt.kind {
        StmtKind::Expression(expr) => expr,
        other => panic!("expected an expression statement, got {other:?}"),
    }
}

#[test]
fn test_compile_assignments() {
    let program = compile("a = 1 < x < 3\nb = a // 2\n");
    let kinds = program
        .body
        .iter()
        .map(target::Stmt::kind_name)
        .collect::<Vec<_>>();
    assert_eq!(
        kinds,
        ["VariableDeclaration", "ExpressionStatement", "ExpressionStatement"]
    );

    let ExprKind::Assignment { right, .. } = &expression_of(&program.body[1]).kind else {
        panic!("expected an assignment: {program:?}");
    };
    let ExprKind::Logical {
        operator: LogicalOperator::And,
        left,
        right: last,
    } = &right.kind
    else {
        panic!("expected a conjunction: {right:?}");
    };
    assert!(matches!(
        &left.kind,
        ExprKind::Binary { operator: BinaryOperator::Lt, right, .. }
            if right.kind_name() == "AssignmentExpression"
    ));
    assert!(matches!(
        &last.kind,
        ExprKind::Binary { left, .. } if left.as_identifier() == Some("_temp$1")
    ));

    let ExprKind::Assignment { right, .. } = &expression_of(&program.body[2]).kind else {
        panic!("expected an assignment: {program:?}");
    };
    assert_eq!(right.kind_name(), "CallExpression");
}

#[test]
fn test_locations_survive_the_pipeline() {
    let program = compile("first = a < b <= c\nsecond = first\n");
    let rendered = format!("{program:?}");
    assert!(!rendered.contains("loc: None"), "{rendered}");
    assert_eq!(
        program.body[2].loc,
        Some(SourceLocation::new(Position::new(2, 0), Position::new(2, 14)))
    );
}

#[test]
fn test_indented_block_tokens() {
    let source = SourceFile::anonymous("do\n  a\n  b\nc\n");
    let kinds = tokenize(&source, 0, &CascadeOptions::default())
        .unwrap()
        .map(|token| token.map(|token| token.kind()))
        .collect::<Result<Vec<_>, _>>()
        .unwrap();
    assert_eq!(
        kinds,
        [
            TokenKind::Do,
            TokenKind::Indent,
            TokenKind::Nl,
            TokenKind::Id,
            TokenKind::Nl,
            TokenKind::Id,
            TokenKind::Dedent,
            TokenKind::Nl,
            TokenKind::Id,
        ]
    );
}

#[test]
fn test_raw_tokens_keep_trivia() {
    let source = SourceFile::anonymous("a  # note\n");
    let kinds = tokenize_raw(&source, 0)
        .unwrap()
        .map(|token| token.map(|token| token.kind()))
        .collect::<Result<Vec<_>, _>>()
        .unwrap();
    assert_eq!(
        kinds,
        [TokenKind::Id, TokenKind::Ws, TokenKind::Comment, TokenKind::Nl]
    );
}

#[test]
fn test_lexing_error_stops_the_pipeline() {
    let source = SourceFile::anonymous("a = 'open\n");
    let tokens = tokenize(&source, 0, &CascadeOptions::default()).unwrap();
    let error = parse(&source, tokens, LineGrammar::default()).unwrap_err();
    assert!(matches!(
        error.error(),
        SyntaxErrorKind::Lex(LexingError::UnterminatedString { offset: 4 })
    ));
}

#[test]
fn test_grammar_error() {
    let source = SourceFile::anonymous("a = = b\n");
    let tokens = tokenize(&source, 0, &CascadeOptions::default()).unwrap();
    let error = parse(&source, tokens, LineGrammar::default()).unwrap_err();
    assert!(matches!(error.error(), SyntaxErrorKind::Grammar(_)));
}
