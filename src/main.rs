use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use std::io::{self, Read};

use patgram::{Policy, logging, pattern, run};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Format {
    Text,
    Json,
}

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Pattern to compile (read from stdin if omitted)
    #[arg(value_name = "PATTERN")]
    pattern: Option<String>,

    /// Output format for the attribute grammar
    #[arg(short = 'f', long, value_enum, default_value_t = Format::Text)]
    format: Format,

    /// Do not build a grammar for patterns that fail validation
    #[arg(short = 's', long)]
    strict: bool,

    /// Do not print the syntax tree
    #[arg(short = 'q', long)]
    quiet_ast: bool,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short = 'v', long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> Result<()> {
    let args = Args::parse();
    logging::init_tracing(args.verbose);

    let source = match args.pattern {
        Some(pattern) => pattern,
        None => {
            let mut input = String::new();
            io::stdin()
                .read_to_string(&mut input)
                .context("Failed to read stdin")?;
            input.trim_end_matches(['\r', '\n']).to_string()
        }
    };

    let policy = if args.strict {
        Policy::Strict
    } else {
        Policy::Advisory
    };
    let compilation = run(&source, policy)?;

    if compilation.validation.is_valid() {
        println!("correct expression");
    } else {
        println!("incorrect expression");
    }
    println!("{}", compilation.source);
    if !args.quiet_ast {
        print!("{}", pattern::render_tree(&compilation.parse.root));
    }

    println!();
    println!("Context-free grammar:");
    println!();
    print!("{}", compilation.grammar);

    println!();
    println!("Attribute grammar:");
    match args.format {
        Format::Text => print!("{}", patgram::attributes::render_tree(&compilation.attributes)),
        Format::Json => println!(
            "{}",
            serde_json::to_string_pretty(&compilation.attributes)
                .context("Failed to serialize attribute grammar")?
        ),
    }
    Ok(())
}
