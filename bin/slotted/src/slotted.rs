use crate::cli::{Cli, Commands};
use ariadne::Source;
use log::info;
use rustyline::error::ReadlineError;
use rustyline::Editor;
use script::{Object, Program, Session};
use std::process;

pub struct Slotted;

impl Slotted {
    pub fn new() -> Slotted {
        Slotted
    }

    pub fn run(&mut self, cli: Cli) {
        match &cli.command {
            Commands::Run { file, dump_ast } => self.run_file(file, *dump_ast),
            Commands::Repl => {
                if let Err(e) = self.run_repl() {
                    println!("{}", e)
                }
            }
        }
    }

    pub fn run_file(&mut self, file_path: &str, dump_ast: bool) {
        let source = match std::fs::read_to_string(file_path) {
            Ok(contents) => contents,
            Err(e) => {
                eprintln!("cannot read {}: {}", file_path, e);
                process::exit(1);
            }
        };
        info!("running {}", file_path);

        let program = match self.parse_contents(&source) {
            Ok(program) => program,
            Err(_) => process::exit(1),
        };

        if dump_ast {
            println!("{program:#?}");
            return;
        }

        let mut session = Session::new();
        if self.eval_contents(&mut session, &source, &program).is_err() {
            process::exit(1);
        }
    }

    pub fn run_repl(&mut self) -> rustyline::Result<()> {
        let mut rl = Editor::<()>::new()?;
        let mut session = Session::new();
        println!("Welcome to the slotted repl.");
        loop {
            match rl.readline("> ") {
                Ok(line) => {
                    rl.add_history_entry(line.as_str());
                    let program = match self.parse_contents(&line) {
                        Ok(program) => program,
                        Err(_) => continue,
                    };
                    // errors are already reported, keep the session going
                    let _ = self.eval_contents(&mut session, &line, &program);
                }
                Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => break,
                Err(err) => {
                    println!("Error: {:#?}", err);
                    break;
                }
            }
        }
        rustyline::Result::Ok(())
    }

    fn parse_contents(&mut self, source: &str) -> Result<Program, String> {
        let (program, errors) = script::parse(source);

        if !errors.is_empty() {
            for err in errors {
                if let Err(e) = err.into_report().print(Source::from(source)) {
                    println!("{}", e);
                }
            }
            return Err("Parser error".to_string());
        }

        Ok(program)
    }

    /// Runs the program statement by statement and prints the value of every
    /// statement that produces one. Stops at the first error.
    fn eval_contents(
        &mut self,
        session: &mut Session,
        source: &str,
        program: &Program,
    ) -> Result<(), String> {
        for stmt in program {
            match session.run_statement(stmt) {
                Ok(Object::Unit) => {}
                Ok(obj) => println!("{}", obj),
                Err(err) => {
                    if let Err(e) = err.into_report().print(Source::from(source)) {
                        println!("{}", e);
                    }
                    return Err("Runtime error".to_string());
                }
            }
        }
        Ok(())
    }
}
