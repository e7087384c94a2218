//! # rpal
//!
//! This binary is the interpreter for RPAL. It drives the full pipeline:
//! lexing, screening, parsing, standardizing, control-structure flattening,
//! and CSE machine execution.
extern crate rpal;

mod cli;

use cli::Cli;

use std::fs;
use std::process::ExitCode;

use clap::Parser as _;
use log::info;

fn main() -> ExitCode {
    let args = match Cli::try_parse() {
        Ok(args) => args,
        Err(err) => {
            eprintln!("{err}");
            return ExitCode::FAILURE;
        }
    };

    simple_logger::init_with_level((&args.verbosity).into()).unwrap();

    let source = match fs::read_to_string(&args.file) {
        Ok(source) => source,
        Err(err) => {
            eprintln!("[IO Error]: {err}");
            return ExitCode::FAILURE;
        }
    };

    info!("loading {:?}", args.file);

    if args.listing {
        print!("{source}");
        // The blank line after the echoed source must be guaranteed, not an
        // accident of whether the file itself ends in a newline.
        if !source.ends_with('\n') {
            println!();
        }
        println!();
    }

    if args.dump_ast || args.dump_st {
        match rpal::parse_to_ast(&source) {
            Ok(ast) => {
                if args.dump_ast {
                    println!("{}", ast.preorder_dump());
                }
                if args.dump_st {
                    match rpal::standardizer::standardize(ast) {
                        Ok(st) => println!("{}", st.preorder_dump()),
                        Err(err) => {
                            eprintln!("{err}");
                            return ExitCode::FAILURE;
                        }
                    }
                }
            }
            Err(err) => {
                eprintln!("{err}");
                return ExitCode::FAILURE;
            }
        }
        return ExitCode::SUCCESS;
    }

    if args.listing {
        return ExitCode::SUCCESS;
    }

    match rpal::run(&source) {
        Ok(result) => {
            println!("{result}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("{err}");
            ExitCode::FAILURE
        }
    }
}
