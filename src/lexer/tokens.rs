use lazy_static::lazy_static;
use std::{collections::HashMap, fmt::Display};

lazy_static! {
    pub static ref RESERVED_LOOKUP: HashMap<&'static str, TokenKind> = {
        let mut map = HashMap::new();
        map.insert("let", TokenKind::Let);
        map.insert("if", TokenKind::If);
        map.insert("else", TokenKind::Else);
        map.insert("while", TokenKind::While);
        map.insert("for", TokenKind::For);
        map.insert("return", TokenKind::Return);
        map.insert("function", TokenKind::Function);
        map.insert("entry", TokenKind::Entry);
        map.insert("true", TokenKind::True);
        map.insert("false", TokenKind::False);
        map.insert("int", TokenKind::TypeInt);
        map.insert("float", TokenKind::TypeFloat);
        map.insert("byte", TokenKind::TypeByte);
        map.insert("bool", TokenKind::TypeBool);
        map.insert("string", TokenKind::TypeString);
        map.insert("void", TokenKind::TypeVoid);
        map
    };
}

#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum TokenKind {
    EOF,
    Illegal,
    Identifier,
    Integer,
    Float,
    Byte,

    OpenBracket,
    CloseBracket,
    OpenCurly,
    CloseCurly,
    OpenParen,
    CloseParen,

    Assignment, // =
    Equals,     // ==
    Bang,       // !
    NotEquals,  // !=

    Less,
    LessEquals,
    Greater,
    GreaterEquals,

    Semicolon,
    Comma,

    Plus,
    Dash,
    Slash,
    Star,

    // Reserved
    Let,
    If,
    Else,
    While,
    For,
    Return,
    Function,
    Entry,
    True,
    False,

    // Type specifiers
    TypeInt,
    TypeFloat,
    TypeByte,
    TypeBool,
    TypeString,
    TypeVoid,
}

impl Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub value: String,
    pub line: u32,
}

impl Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Token {{\nkind: {},\nvalue: {}}}", self.kind, self.value)
    }
}

impl Token {
    fn is_one_of_many(&self, tokens: &[TokenKind]) -> bool {
        tokens.contains(&self.kind)
    }

    pub fn is_type_specifier(&self) -> bool {
        self.is_one_of_many(&[
            TokenKind::TypeInt,
            TokenKind::TypeFloat,
            TokenKind::TypeByte,
            TokenKind::TypeBool,
            TokenKind::TypeString,
            TokenKind::TypeVoid,
        ])
    }
}
