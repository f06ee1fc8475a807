//! nom grammar of template snippets

use super::{TExpr, TStmt};
use defscript_ast::operators::{LogicalOperator, UnaryOperator};
use defscript_ast::target::BinaryOperator;
use defscript_common::nom_helpers::recognize_identifier;
use nom::branch::alt;
use nom::bytes::complete::{tag, take_while};
use nom::character::complete::{char, digit1, multispace0, one_of, satisfy};
use nom::combinator::{all_consuming, map, map_res, not, opt, recognize, value, verify};
use nom::error::{context, convert_error, VerboseError};
use nom::multi::separated_list0;
use nom::sequence::{delimited, pair, preceded, terminated, tuple};
use nom::{Finish, IResult};

type Result<'a, O> = IResult<&'a str, O, VerboseError<&'a str>>;

const RESERVED: &[&str] = &["this", "return", "typeof", "void", "in", "instanceof"];

/// Parses a template into its statements, or a rendered error
pub(super) fn parse_template(src: &str) -> std::result::Result<Vec<TStmt>, String> {
    match all_consuming(program)(src).finish() {
        Ok((_, body)) => Ok(body),
        Err(e) => Err(convert_error(src, e)),
    }
}

fn ws<'a, O>(
    inner: impl FnMut(&'a str) -> Result<'a, O>,
) -> impl FnMut(&'a str) -> Result<'a, O> {
    delimited(multispace0, inner, multispace0)
}

fn keyword<'a>(word: &'static str) -> impl FnMut(&'a str) -> Result<'a, &'a str> {
    terminated(
        tag(word),
        not(satisfy(|c: char| c.is_alphanumeric() || c == '_' || c == '$')),
    )
}

fn program(src: &str) -> Result<Vec<TStmt>> {
    context(
        "program",
        terminated(
            separated_list0(char(';'), ws(statement)),
            tuple((multispace0, opt(char(';')), multispace0)),
        ),
    )(src)
}

fn statement(src: &str) -> Result<TStmt> {
    context(
        "statement",
        alt((
            map(
                preceded(keyword("return"), opt(preceded(multispace0, expression))),
                TStmt::Return,
            ),
            map(expression, TStmt::Expression),
        )),
    )(src)
}

fn expression(src: &str) -> Result<TExpr> {
    context("expression", logical_or)(src)
}

#[derive(Debug, Clone, Copy)]
enum Op {
    Binary(BinaryOperator),
    Logical(LogicalOperator),
}

impl Op {
    fn apply(self, left: TExpr, right: TExpr) -> TExpr {
        let (left, right) = (Box::new(left), Box::new(right));
        match self {
            Op::Binary(operator) => TExpr::Binary {
                operator,
                left,
                right,
            },
            Op::Logical(operator) => TExpr::Logical {
                operator,
                left,
                right,
            },
        }
    }
}

/// Folds `operand (operator operand)*` to the left
fn left_assoc<'a>(
    src: &'a str,
    operand: fn(&'a str) -> Result<'a, TExpr>,
    operator: fn(&'a str) -> Result<'a, Op>,
) -> Result<'a, TExpr> {
    let (mut src, mut left) = operand(src)?;
    loop {
        match preceded(multispace0, operator)(src) {
            Ok((rest, op)) => {
                let (rest, right) = preceded(multispace0, operand)(rest)?;
                left = op.apply(left, right);
                src = rest;
            }
            Err(nom::Err::Error(_)) => return Ok((src, left)),
            Err(e) => return Err(e),
        }
    }
}

fn logical_or(src: &str) -> Result<TExpr> {
    left_assoc(src, logical_and, |i| {
        value(Op::Logical(LogicalOperator::Or), tag("||"))(i)
    })
}

fn logical_and(src: &str) -> Result<TExpr> {
    left_assoc(src, equality, |i| {
        value(Op::Logical(LogicalOperator::And), tag("&&"))(i)
    })
}

fn equality(src: &str) -> Result<TExpr> {
    left_assoc(src, relational, |i| {
        map(
            alt((
                value(BinaryOperator::StrictEq, tag("===")),
                value(BinaryOperator::StrictNotEq, tag("!==")),
                value(BinaryOperator::Eq, tag("==")),
                value(BinaryOperator::NotEq, tag("!=")),
            )),
            Op::Binary,
        )(i)
    })
}

fn relational(src: &str) -> Result<TExpr> {
    left_assoc(src, additive, |i| {
        map(
            alt((
                value(BinaryOperator::LtEq, tag("<=")),
                value(BinaryOperator::GtEq, tag(">=")),
                value(BinaryOperator::Lt, terminated(char('<'), not(char('%')))),
                value(BinaryOperator::Gt, char('>')),
                value(BinaryOperator::InstanceOf, keyword("instanceof")),
                value(BinaryOperator::In, keyword("in")),
            )),
            Op::Binary,
        )(i)
    })
}

fn additive(src: &str) -> Result<TExpr> {
    left_assoc(src, multiplicative, |i| {
        map(
            alt((
                value(BinaryOperator::Add, char('+')),
                value(BinaryOperator::Sub, char('-')),
            )),
            Op::Binary,
        )(i)
    })
}

fn multiplicative(src: &str) -> Result<TExpr> {
    left_assoc(src, exponent, |i| {
        map(
            alt((
                value(BinaryOperator::Mul, terminated(char('*'), not(char('*')))),
                value(BinaryOperator::Div, char('/')),
                value(BinaryOperator::Rem, terminated(char('%'), not(char('>')))),
            )),
            Op::Binary,
        )(i)
    })
}

/// `**` binds to the right
fn exponent(src: &str) -> Result<TExpr> {
    let (src, base) = unary(src)?;
    match preceded(ws(tag("**")), exponent)(src) {
        Ok((rest, power)) => Ok((rest, Op::Binary(BinaryOperator::Exp).apply(base, power))),
        Err(nom::Err::Error(_)) => Ok((src, base)),
        Err(e) => Err(e),
    }
}

fn unary(src: &str) -> Result<TExpr> {
    alt((
        map(
            pair(
                alt((
                    value(UnaryOperator::Not, terminated(char('!'), not(char('=')))),
                    value(UnaryOperator::BitNot, char('~')),
                    value(UnaryOperator::Neg, char('-')),
                    value(UnaryOperator::Plus, char('+')),
                    value(UnaryOperator::TypeOf, keyword("typeof")),
                    value(UnaryOperator::Void, keyword("void")),
                )),
                preceded(multispace0, unary),
            ),
            |(operator, argument)| TExpr::Unary {
                operator,
                argument: Box::new(argument),
            },
        ),
        postfix,
    ))(src)
}

enum Suffix {
    Member(String),
    Computed(TExpr),
    Call(Vec<TExpr>),
}

fn postfix(src: &str) -> Result<TExpr> {
    let (mut src, mut expr) = primary(src)?;
    loop {
        let suffix = preceded(
            multispace0,
            alt((
                map(
                    preceded(ws(char('.')), recognize_identifier),
                    |name: &str| Suffix::Member(name.to_string()),
                ),
                map(delimited(char('['), ws(expression), char(']')), Suffix::Computed),
                map(arguments, Suffix::Call),
            )),
        )(src);
        let (rest, suffix) = match suffix {
            Ok(parsed) => parsed,
            Err(nom::Err::Error(_)) => return Ok((src, expr)),
            Err(e) => return Err(e),
        };
        expr = match suffix {
            Suffix::Member(name) => TExpr::Member {
                object: Box::new(expr),
                property: Box::new(TExpr::Identifier(name)),
                computed: false,
            },
            Suffix::Computed(property) => TExpr::Member {
                object: Box::new(expr),
                property: Box::new(property),
                computed: true,
            },
            Suffix::Call(arguments) => TExpr::Call {
                callee: Box::new(expr),
                arguments,
            },
        };
        src = rest;
    }
}

fn arguments(src: &str) -> Result<Vec<TExpr>> {
    context(
        "arguments",
        delimited(
            char('('),
            ws(separated_list0(char(','), ws(expression))),
            char(')'),
        ),
    )(src)
}

fn primary(src: &str) -> Result<TExpr> {
    context(
        "primary",
        alt((
            placeholder,
            number,
            string,
            map(
                delimited(
                    char('['),
                    ws(separated_list0(char(','), ws(expression))),
                    char(']'),
                ),
                TExpr::Array,
            ),
            delimited(char('('), ws(expression), char(')')),
            value(TExpr::This, keyword("this")),
            identifier,
        )),
    )(src)
}

fn placeholder(src: &str) -> Result<TExpr> {
    context(
        "placeholder",
        map(
            delimited(tag("<%="), ws(recognize_identifier), tag("%>")),
            |name: &str| TExpr::Placeholder(name.to_string()),
        ),
    )(src)
}

fn number(src: &str) -> Result<TExpr> {
    map_res(
        recognize(tuple((
            digit1,
            opt(pair(char('.'), digit1)),
            opt(tuple((one_of("eE"), opt(one_of("+-")), digit1))),
        ))),
        |digits: &str| digits.parse::<f64>().map(TExpr::Number),
    )(src)
}

fn string(src: &str) -> Result<TExpr> {
    alt((
        delimited(char('\''), take_while(|c| c != '\''), char('\'')),
        delimited(char('"'), take_while(|c| c != '"'), char('"')),
    ))(src)
    .map(|(rest, text)| (rest, TExpr::String(text.to_string())))
}

fn identifier(src: &str) -> Result<TExpr> {
    map(
        verify(recognize_identifier, |name: &str| !RESERVED.contains(&name)),
        |name: &str| TExpr::Identifier(name.to_string()),
    )(src)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn placeholder_expr(name: &str) -> Box<TExpr> {
        Box::new(TExpr::Placeholder(name.to_string()))
    }

    #[test]
    fn test_floor_division_template() {
        let body = parse_template("Math.floor(<%= left %> / <%= right %>)").unwrap();
        assert_eq!(
            body,
            [TStmt::Expression(TExpr::Call {
                callee: Box::new(TExpr::Member {
                    object: Box::new(TExpr::Identifier("Math".to_string())),
                    property: Box::new(TExpr::Identifier("floor".to_string())),
                    computed: false,
                }),
                arguments: vec![TExpr::Binary {
                    operator: BinaryOperator::Div,
                    left: placeholder_expr("left"),
                    right: placeholder_expr("right"),
                }],
            })]
        );
    }

    #[test]
    fn test_apply_template() {
        let body = parse_template("(<%= fn %>).apply(this, [])").unwrap();
        let [TStmt::Expression(TExpr::Call { callee, arguments })] = body.as_slice() else {
            panic!("unexpected shape: {body:?}");
        };
        assert_eq!(arguments, &[TExpr::This, TExpr::Array(vec![])]);
        assert!(matches!(
            callee.as_ref(),
            TExpr::Member { object, computed: false, .. }
                if **object == TExpr::Placeholder("fn".to_string())
        ));
    }

    #[test]
    fn test_precedence() {
        let body = parse_template("a || b && c < d + e * f ** g ** h").unwrap();
        let [TStmt::Expression(TExpr::Logical {
            operator: LogicalOperator::Or,
            right,
            ..
        })] = body.as_slice()
        else {
            panic!("unexpected shape: {body:?}");
        };
        let TExpr::Logical {
            operator: LogicalOperator::And,
            right,
            ..
        } = right.as_ref()
        else {
            panic!("unexpected shape: {right:?}");
        };
        let TExpr::Binary {
            operator: BinaryOperator::Lt,
            right,
            ..
        } = right.as_ref()
        else {
            panic!("unexpected shape: {right:?}");
        };
        let TExpr::Binary {
            operator: BinaryOperator::Add,
            right,
            ..
        } = right.as_ref()
        else {
            panic!("unexpected shape: {right:?}");
        };
        let TExpr::Binary {
            operator: BinaryOperator::Mul,
            right,
            ..
        } = right.as_ref()
        else {
            panic!("unexpected shape: {right:?}");
        };
        let TExpr::Binary {
            operator: BinaryOperator::Exp,
            right,
            ..
        } = right.as_ref()
        else {
            panic!("unexpected shape: {right:?}");
        };
        assert!(matches!(
            right.as_ref(),
            TExpr::Binary {
                operator: BinaryOperator::Exp,
                ..
            }
        ));
    }

    #[test]
    fn test_statements() {
        let body = parse_template("x; return <%= value %>;").unwrap();
        assert_eq!(
            body,
            [
                TStmt::Expression(TExpr::Identifier("x".to_string())),
                TStmt::Return(Some(TExpr::Placeholder("value".to_string()))),
            ]
        );
        assert_eq!(parse_template("return").unwrap(), [TStmt::Return(None)]);
        assert!(parse_template("  ").unwrap().is_empty());
    }

    #[test]
    fn test_literals() {
        let body = parse_template("f(1.5e3, 'a b', !x, typeof y, o['k'])").unwrap();
        let [TStmt::Expression(TExpr::Call { arguments, .. })] = body.as_slice() else {
            panic!("unexpected shape: {body:?}");
        };
        assert_eq!(arguments.len(), 5);
        assert_eq!(arguments[0], TExpr::Number(1500.0));
        assert_eq!(arguments[1], TExpr::String("a b".to_string()));
        assert!(matches!(
            arguments[4],
            TExpr::Member { computed: true, .. }
        ));
    }

    #[test]
    fn test_syntax_error() {
        assert!(parse_template("Math.floor(<%= left %>").is_err());
        assert!(parse_template("a +").is_err());
    }
}
