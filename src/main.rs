use clap::{Parser as ClapParser, Subcommand};
use search_expr::{
    Limits,
    cli::{self, CheckOptions, CheckResult, CliError, OutputFormat, TokensOptions},
    limits::{DEFAULT_MAX_DEPTH, MAX_EXPRESSION_LENGTH},
};
use std::io::{self, Read};
use tracing_subscriber::EnvFilter;

#[derive(ClapParser)]
#[command(name = "search-expr")]
#[command(about = "Check, tokenize and inspect search expressions")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse an expression and print its tree
    Check {
        /// The expression (reads from stdin if not provided)
        expression: Option<String>,

        /// Output format: infix, sexpr or json
        #[arg(short, long, default_value = "sexpr")]
        format: String,

        /// Pretty-print JSON output
        #[arg(short, long)]
        pretty: bool,

        /// Only validate syntax, don't print the tree
        #[arg(long)]
        syntax_only: bool,

        /// Maximum nesting of groups, calls and operator chains
        #[arg(long, default_value_t = DEFAULT_MAX_DEPTH)]
        max_depth: usize,

        /// Maximum expression length in characters
        #[arg(long, default_value_t = MAX_EXPRESSION_LENGTH)]
        max_length: usize,
    },

    /// Print the token stream as JSON lines
    Tokens {
        /// The expression (reads from stdin if not provided)
        expression: Option<String>,

        /// Include whitespace tokens
        #[arg(long)]
        hidden: bool,
    },

    /// Validate a document field name
    Field {
        name: String,
    },

    /// List documentation categories
    Docs,

    /// Show documentation for a specific category
    Doc {
        /// Category name (use 'search-expr docs' to list categories)
        category: String,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("search_expr=warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Check {
            expression,
            format,
            pretty,
            syntax_only,
            max_depth,
            max_length,
        } => run_check(expression, &format, pretty, syntax_only, max_depth, max_length),
        Commands::Tokens { expression, hidden } => run_tokens(expression, hidden),
        Commands::Field { name } => match cli::execute_field(&name) {
            Ok(()) => {
                println!("Field name is valid");
                Ok(())
            }
            Err(e) => Err(e),
        },
        Commands::Docs => {
            print!("{}", cli::get_docs_overview());
            Ok(())
        }
        Commands::Doc { category } => match cli::get_doc_category(&category) {
            Ok(content) => {
                print!("{}", content);
                Ok(())
            }
            Err(e) => Err(e),
        },
    };

    if let Err(e) = result {
        eprintln!("{}", e);
        std::process::exit(1);
    }
}

fn read_expression(expression: Option<String>) -> Result<String, CliError> {
    match expression {
        Some(s) => Ok(s),
        None if !atty::is(atty::Stream::Stdin) => {
            let mut buffer = String::new();
            io::stdin().read_to_string(&mut buffer)?;
            Ok(buffer)
        }
        None => Err(CliError::NoInput),
    }
}

fn run_check(
    expression: Option<String>,
    format: &str,
    pretty: bool,
    syntax_only: bool,
    max_depth: usize,
    max_length: usize,
) -> Result<(), CliError> {
    let options = CheckOptions {
        expression: read_expression(expression)?,
        format: format.parse::<OutputFormat>()?,
        pretty,
        syntax_only,
        limits: Limits::default()
            .with_max_depth(max_depth)
            .with_max_expression_length(max_length),
    };

    match cli::execute_check(&options)? {
        CheckResult::SyntaxValid => println!("Syntax is valid"),
        CheckResult::Rendered(output) => println!("{}", output),
    }
    Ok(())
}

fn run_tokens(expression: Option<String>, hidden: bool) -> Result<(), CliError> {
    let options = TokensOptions {
        expression: read_expression(expression)?,
        include_hidden: hidden,
    };

    for token in cli::execute_tokens(&options)? {
        println!("{}", serde_json::to_string(&token)?);
    }
    Ok(())
}
