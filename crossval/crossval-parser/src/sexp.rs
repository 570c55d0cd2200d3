//! Parser for tree-sitter S-expression dumps.
//!
//! `tree-sitter parse` prints one parenthesized node per syntactic
//! category, annotated with position ranges:
//!
//! ```text
//! (source_file [0, 0] - [7, 0]
//!   (class_declaration [4, 0] - [6, 1]
//!     name: (type_identifier [4, 6] - [4, 14])))
//! ```
//!
//! Positions and field labels (`name:`) carry no structural information
//! and are dropped during tokenization.

use logos::Logos;

use crate::{ParseError, tree::Node};

#[derive(Logos, Clone, Copy, PartialEq, Eq, Debug)]
enum Kind {
    #[regex(r"[ \t\n\r]+")]
    Whitespace,

    /// `[row, col] - [row, col]` range annotation
    #[regex(r"\[[0-9]+,[ \t]*[0-9]+\][ \t]*-[ \t]*\[[0-9]+,[ \t]*[0-9]+\]")]
    Position,

    #[token("(")]
    ParenOpen,

    #[token(")")]
    ParenClose,

    #[regex(r"[^() \t\n\r]+")]
    Word,
}

#[derive(Clone, Copy, Debug)]
enum Token<'a> {
    Open,
    Close,
    Word(&'a str),
}

pub fn parse_sexp(input: &str) -> Result<Node, ParseError> {
    let input = input.trim();
    if input.is_empty() {
        return Err(ParseError::EmptyInput);
    }

    let tokens = tokenize(input);
    let mut pos = 0;
    parse_node(&tokens, &mut pos)
}

fn tokenize(input: &str) -> Vec<Token<'_>> {
    let mut lexer = Kind::lexer(input);
    let mut tokens = vec![];

    while let Some(result) = lexer.next() {
        match result {
            Ok(Kind::ParenOpen) => tokens.push(Token::Open),
            Ok(Kind::ParenClose) => tokens.push(Token::Close),
            Ok(Kind::Word) => tokens.push(Token::Word(lexer.slice())),
            Ok(Kind::Whitespace | Kind::Position) => {}
            // Word matches any run of non-delimiter characters,
            // so the lexer itself cannot fail
            Err(_) => {}
        }
    }

    tokens
}

fn parse_node(tokens: &[Token], pos: &mut usize) -> Result<Node, ParseError> {
    match tokens.get(*pos) {
        Some(Token::Open) => {}
        Some(Token::Close) => return Err(ParseError::ExpectedOpen(")".into())),
        Some(Token::Word(word)) => return Err(ParseError::ExpectedOpen((*word).into())),
        None => return Err(ParseError::UnexpectedEof),
    }
    *pos += 1;

    let name = match tokens.get(*pos) {
        Some(Token::Word(word)) => (*word).to_string(),
        Some(Token::Open) => return Err(ParseError::ExpectedName("(".into())),
        Some(Token::Close) => return Err(ParseError::ExpectedName(")".into())),
        None => return Err(ParseError::UnexpectedEof),
    };
    *pos += 1;

    let mut children = vec![];
    loop {
        match tokens.get(*pos) {
            Some(Token::Open) => children.push(parse_node(tokens, pos)?),
            // field labels and other bare words between children
            Some(Token::Word(_)) => *pos += 1,
            Some(Token::Close) => {
                *pos += 1;
                return Ok(Node::new(name, children));
            }
            None => return Err(ParseError::UnexpectedEof),
        }
    }
}
