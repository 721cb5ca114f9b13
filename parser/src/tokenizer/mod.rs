mod lexer;
mod token;

pub use lexer::{tokenize_all, Tokenizer};
pub use token::{describe, kind_name, payload, Token};
