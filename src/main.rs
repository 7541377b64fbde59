use std::{fs::read_to_string, path::PathBuf, process::ExitCode, time::Instant};

use clap::Parser;
use log::info;
use pasfront::{
    ast::ast::Tree,
    display_error,
    errors::errors::Error,
    lexer::{lexer::tokenize, tokens::Token},
    parser::parser::parse,
    symbols::{builder::build_scopes, scope::ScopeTree},
};

#[derive(Parser)]
#[command(
    author,
    version,
    about = "Front end for a small Pascal dialect",
    long_about = "Front end for a small Pascal dialect.\n\
                 Tokenizes a source file, parses it into a syntax tree and declares\n\
                 every variable and procedure in nested scopes.\n\
                 \n\
                 Example usage:\n\
                 pasfront demo.pas               # Check the program\n\
                 pasfront demo.pas --tokens      # Print the token stream\n\
                 pasfront demo.pas --ast         # Print the syntax tree\n\
                 pasfront demo.pas --scopes      # Print the scope tree\n\
                 RUST_LOG=debug pasfront demo.pas"
)]
struct Cli {
    // The source file to process
    path: PathBuf,

    // Print every token
    #[arg(long)]
    tokens: bool,

    // Print the syntax tree as an S-expression
    #[arg(long)]
    ast: bool,

    // Print the declared scopes with their values
    #[arg(long)]
    scopes: bool,
}

fn run(cli: &Cli, source: &str) -> Result<(Vec<Token>, Tree, ScopeTree), Error> {
    let file_name = cli
        .path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| cli.path.display().to_string());

    let start = Instant::now();
    let tokens = tokenize(source.to_string(), Some(file_name))?;
    info!("Tokenized {} token(s) in {:?}", tokens.len(), start.elapsed());

    let parse_start = Instant::now();
    let tree = parse(tokens.clone())?;
    info!("Parsed in {:?}", parse_start.elapsed());

    let scopes = build_scopes(&tree)?;
    Ok((tokens, tree, scopes))
}

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();

    let source = match read_to_string(&cli.path) {
        Ok(source) => source,
        Err(error) => {
            eprintln!("Failed to read {}: {}", cli.path.display(), error);
            return ExitCode::FAILURE;
        }
    };

    let (tokens, tree, scopes) = match run(&cli, &source) {
        Ok(result) => result,
        Err(error) => {
            display_error(&error, &source);
            return ExitCode::FAILURE;
        }
    };

    if cli.tokens {
        for token in &tokens {
            println!("{}", token);
        }
    }

    if cli.ast {
        if let Some(root) = tree.root() {
            println!("{}", tree.to_sexpr(root));
        }
    }

    if cli.scopes {
        print!("{}", scopes);
    }

    ExitCode::SUCCESS
}
