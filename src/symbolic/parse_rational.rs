//! # Expression parser
//!
//! Turns infix text such as `"x/(y*z**2) - 3.5e-1*x^2"` into an [`AlgebraicValue`].
//!
//! ## Grammar
//! - binary operators `+ - * /`, power `^` or `**` (right associative), unary `-` and `+`;
//! - precedence, lowest first: `+ -`, `* /`, unary sign, power; so `-x^2 == -(x^2)`;
//! - numbers: `digits [. digits] [e|E [+-] digits]`, converted exactly;
//! - identifiers: letters, digits, `_` and `$`, with at least one letter (`2x`, `k_1`, `$a`);
//! - exponents must evaluate to nonnegative integer constants.
//!
//! ## How it works
//! 1. [`ExpressionGrammar::tokenize`] splits the text with `nom` combinators; numeric literals
//!    are matched by an anchored regex so the whole `digits.digits e digits` run is taken;
//! 2. [`ExpressionGrammar::to_postfix`] reorders the tokens with the shunting-yard algorithm,
//!    using an operator stack that encodes precedence and associativity;
//! 3. [`ExpressionGrammar::evaluate`] folds the postfix sequence on a value stack owned by the call.
//!
//! The grammar object is immutable; one shared instance is built lazily by [`shared_grammar`].
//! No state survives between parses.
use crate::symbolic::algebra_error::{AlgebraError, AlgebraResult};
use crate::symbolic::algebraic_value::AlgebraicValue;
use crate::symbolic::exact_field::to_rational;
use crate::symbolic::sparse_polynomial::SparsePolynomial;
use crate::symbolic::monomial::Monomial;
use crate::symbolic::variables::VariableList;
use log::debug;
use nom::{
    IResult, Parser,
    branch::alt,
    bytes::complete::{tag, take_while1},
    character::complete::{multispace0, one_of},
    combinator::map,
};
use num::ToPrimitive;
use regex::Regex;
use std::sync::OnceLock;
use strum_macros::{Display, EnumIter};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumIter)]
pub enum Operator {
    #[strum(serialize = "+")]
    Add,
    #[strum(serialize = "-")]
    Sub,
    #[strum(serialize = "*")]
    Mul,
    #[strum(serialize = "/")]
    Div,
    #[strum(serialize = "^")]
    Pow,
    #[strum(serialize = "neg")]
    Neg,
}

impl Operator {
    fn precedence(self) -> u8 {
        match self {
            Operator::Add | Operator::Sub => 1,
            Operator::Mul | Operator::Div => 2,
            Operator::Neg => 3,
            Operator::Pow => 4,
        }
    }

    fn right_associative(self) -> bool {
        matches!(self, Operator::Pow | Operator::Neg)
    }

    fn arity(self) -> usize {
        match self {
            Operator::Neg => 1,
            _ => 2,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    Number(String),
    Ident(String),
    Op(Operator),
    LeftParen,
    RightParen,
}

fn is_ident_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || c == '$'
}

fn parse_word(input: &str) -> IResult<&str, &str> {
    take_while1(is_ident_char).parse(input)
}

fn parse_symbol(input: &str) -> IResult<&str, Token> {
    alt((
        map(tag("**"), |_| Token::Op(Operator::Pow)),
        map(one_of("+-*/^()"), |c| match c {
            '+' => Token::Op(Operator::Add),
            '-' => Token::Op(Operator::Sub),
            '*' => Token::Op(Operator::Mul),
            '/' => Token::Op(Operator::Div),
            '^' => Token::Op(Operator::Pow),
            '(' => Token::LeftParen,
            _ => Token::RightParen,
        }),
    ))
    .parse(input)
}

/// Immutable description of the expression language.
#[derive(Debug)]
pub struct ExpressionGrammar {
    identifier: Regex,
    number: Regex,
}

impl Default for ExpressionGrammar {
    fn default() -> Self {
        ExpressionGrammar::new()
    }
}

impl ExpressionGrammar {
    pub fn new() -> Self {
        ExpressionGrammar {
            identifier: Regex::new(r"^[0-9A-Za-z_$]*[A-Za-z][0-9A-Za-z_$]*$")
                .expect("identifier pattern is a valid regex"),
            number: Regex::new(r"^[0-9]+(?:\.[0-9]*)?(?:[eE][+-]?[0-9]+)?")
                .expect("number pattern is a valid regex"),
        }
    }

    /// longest numeric literal at the start of `input`
    fn leading_number<'a>(&self, input: &'a str) -> Option<&'a str> {
        self.number.find(input).map(|m| m.as_str())
    }

    /// true if `name` can be written as a variable in an expression
    pub fn is_identifier(&self, name: &str) -> bool {
        self.identifier.is_match(name)
    }

    /// Splits the text into tokens. A digit run followed by identifier characters is an
    /// identifier (`2x`), otherwise the longest numeric literal wins.
    pub fn tokenize(&self, text: &str) -> AlgebraResult<Vec<Token>> {
        let mut tokens = Vec::new();
        let mut rest = text;
        loop {
            let (after_space, _) = multispace0::<&str, nom::error::Error<&str>>(rest)
                .map_err(|_| AlgebraError::parse(text, "unexpected input"))?;
            rest = after_space;
            if rest.is_empty() {
                break;
            }
            let word = parse_word(rest).ok();
            let number = self
                .leading_number(rest)
                .filter(|literal| word.is_none_or(|(_, w)| w.len() <= literal.len()));
            match (number, word) {
                (Some(literal), _) => {
                    tokens.push(Token::Number(literal.to_string()));
                    rest = &rest[literal.len()..];
                }
                (None, Some((after_word, w))) => {
                    if !self.is_identifier(w) {
                        return Err(AlgebraError::parse(
                            text,
                            format!("'{}' is neither a number nor a name", w),
                        ));
                    }
                    tokens.push(Token::Ident(w.to_string()));
                    rest = after_word;
                }
                (None, None) => {
                    let (after_symbol, token) = parse_symbol(rest).map_err(|_| {
                        AlgebraError::parse(
                            text,
                            format!("unexpected character at '{}'", rest),
                        )
                    })?;
                    tokens.push(token);
                    rest = after_symbol;
                }
            }
        }
        Ok(tokens)
    }

    /// Shunting-yard: infix tokens to postfix order. Unary signs are recognized by position;
    /// adjacency errors (two operands in a row, missing operands) are reported here.
    pub fn to_postfix(&self, text: &str, tokens: Vec<Token>) -> AlgebraResult<Vec<Token>> {
        let mut output = Vec::with_capacity(tokens.len());
        let mut stack: Vec<Token> = Vec::new();
        let mut expect_operand = true;
        for token in tokens {
            match token {
                Token::Number(_) | Token::Ident(_) => {
                    if !expect_operand {
                        return Err(AlgebraError::parse(text, "missing operator between operands"));
                    }
                    output.push(token);
                    expect_operand = false;
                }
                Token::LeftParen => {
                    if !expect_operand {
                        return Err(AlgebraError::parse(text, "missing operator before '('"));
                    }
                    stack.push(token);
                }
                Token::RightParen => {
                    if expect_operand {
                        return Err(AlgebraError::parse(text, "missing operand before ')'"));
                    }
                    loop {
                        match stack.pop() {
                            Some(Token::LeftParen) => break,
                            Some(op) => output.push(op),
                            None => return Err(AlgebraError::parse(text, "unbalanced ')'")),
                        }
                    }
                }
                Token::Op(op) if expect_operand => match op {
                    Operator::Sub => stack.push(Token::Op(Operator::Neg)),
                    Operator::Add => {}
                    _ => {
                        return Err(AlgebraError::parse(
                            text,
                            format!("operator '{}' without a left operand", op),
                        ));
                    }
                },
                Token::Op(op) => {
                    while let Some(Token::Op(top)) = stack.last() {
                        let top = *top;
                        let pops = top.precedence() > op.precedence()
                            || (top.precedence() == op.precedence() && !op.right_associative());
                        if !pops {
                            break;
                        }
                        stack.pop();
                        output.push(Token::Op(top));
                    }
                    stack.push(Token::Op(op));
                    expect_operand = true;
                }
            }
        }
        if expect_operand {
            return Err(AlgebraError::parse(text, "expression ends without an operand"));
        }
        while let Some(token) = stack.pop() {
            if token == Token::LeftParen {
                return Err(AlgebraError::parse(text, "unbalanced '('"));
            }
            output.push(token);
        }
        Ok(output)
    }

    /// Folds a postfix sequence on a fresh value stack.
    pub fn evaluate(
        &self,
        text: &str,
        postfix: &[Token],
        varnames: &VariableList,
    ) -> AlgebraResult<AlgebraicValue> {
        let index = varnames.index_map();
        let mut stack: Vec<AlgebraicValue> = Vec::with_capacity(postfix.len());
        for token in postfix {
            match token {
                Token::Number(literal) => {
                    stack.push(AlgebraicValue::Constant(to_rational(literal)?));
                }
                Token::Ident(name) => {
                    let i = index.get(name.as_str()).ok_or_else(|| {
                        AlgebraError::invalid_argument(format!(
                            "unknown variable '{}' in '{}', expected one of {:?}",
                            name, text, varnames
                        ))
                    })?;
                    stack.push(AlgebraicValue::Polynomial(SparsePolynomial::from_monomial(
                        Monomial::var(*i),
                        varnames,
                    )));
                }
                Token::Op(op) => {
                    if stack.len() < op.arity() {
                        return Err(AlgebraError::parse(text, format!("'{}' lacks operands", op)));
                    }
                    let right = stack.pop().unwrap_or_default();
                    let value = match op {
                        Operator::Neg => -right,
                        _ => {
                            let left = stack.pop().unwrap_or_default();
                            apply_binary(*op, left, right)?
                        }
                    };
                    stack.push(value);
                }
                Token::LeftParen | Token::RightParen => {
                    return Err(AlgebraError::parse(text, "parenthesis in postfix sequence"));
                }
            }
        }
        match (stack.pop(), stack.is_empty()) {
            (Some(value), true) => Ok(value),
            _ => Err(AlgebraError::parse(text, "dangling operands")),
        }
    }

    pub fn parse(&self, text: &str, varnames: &VariableList) -> AlgebraResult<AlgebraicValue> {
        let tokens = self.tokenize(text)?;
        if tokens.is_empty() {
            return Err(AlgebraError::parse(text, "empty expression"));
        }
        let postfix = self.to_postfix(text, tokens)?;
        let value = self.evaluate(text, &postfix, varnames)?;
        debug!("parsed '{}' over {:?} as {}", text, varnames, value);
        Ok(value)
    }
}

fn apply_binary(
    op: Operator,
    left: AlgebraicValue,
    right: AlgebraicValue,
) -> AlgebraResult<AlgebraicValue> {
    match op {
        Operator::Add => left.checked_add(right),
        Operator::Sub => left.checked_sub(right),
        Operator::Mul => left.checked_mul(right),
        Operator::Div => left.checked_div(right),
        Operator::Pow => {
            let exponent = right
                .as_constant()
                .filter(|c| c.is_integer())
                .and_then(|c| c.to_integer().to_i64())
                .ok_or_else(|| {
                    AlgebraError::invalid_argument(format!(
                        "exponent {} is not an integer constant",
                        right
                    ))
                })?;
            left.pow(exponent)
        }
        Operator::Neg => Ok(-right),
    }
}

static GRAMMAR: OnceLock<ExpressionGrammar> = OnceLock::new();

/// The process-wide grammar instance, built on first use.
pub fn shared_grammar() -> &'static ExpressionGrammar {
    GRAMMAR.get_or_init(ExpressionGrammar::new)
}

/// Parses `text` over `varnames` with the shared grammar.
pub fn parse_expression(text: &str, varnames: &VariableList) -> AlgebraResult<AlgebraicValue> {
    shared_grammar().parse(text, varnames)
}
