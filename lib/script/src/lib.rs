mod ast;
mod parser;
mod parser_error;
mod scanner;
mod script_error;
mod session;
mod span;
mod token;

pub use crate::ast::*;
pub use crate::parser::*;
pub use parser_error::*;
pub use scanner::*;
pub use script_error::*;
pub use session::*;
pub use span::*;
pub use token::*;

/**
 * Parse the input string and returns a tuple with the program and errors.
 * The program may be incomplete when there are parser errors
 */
pub fn parse(source: &str) -> (Program, Vec<ParserError>) {
    let scanner = Scanner::new(source);
    let mut parser = Parser::new(scanner);
    parser.parse()
}

/**
 * Parse the input and returns a complete program
 * Function will panic if there are any parser errors
 */
pub fn parse_panic(source: &str) -> Program {
    let (program, errors) = parse(source);

    if errors.is_empty() {
        return program;
    }

    println!("Errors found while parsing the source, found {} errors", errors.len());

    for e in errors {
        println!("{e:#?}");
    }

    panic!("parsed with errors");
}
