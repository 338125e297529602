use clap::{Parser, Subcommand};
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use stlc::session::Session;

const PROMPT: &str = "λ> ";

#[derive(Parser)]
#[command(name = "stlc", version)]
#[command(about = "Simply typed lambda calculus interpreter", long_about = None)]
struct Cli {
    /// Maximum level of log messages written to stderr
    #[arg(long, global = true, value_name = "LEVEL", default_value = "warn")]
    log_level: Level,

    /// Print the parsed expression to stderr before its result
    #[arg(long, global = true)]
    ast: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Evaluate a single expression and print the result
    Eval {
        #[arg(value_name = "EXPR")]
        expr: String,
    },
    /// Read expressions line by line until an empty line, Ctrl-C or Ctrl-D
    Repl,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let subscriber = FmtSubscriber::builder()
        .with_max_level(cli.log_level)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let mut session = Session::spawn()?;
    match cli.command {
        Command::Eval { expr } => {
            show_ast(cli.ast, &expr);
            println!("{}", session.interpret(&expr)?);
        }
        Command::Repl => repl(&mut session, cli.ast)?,
    }

    Ok(())
}

fn repl(session: &mut Session, ast: bool) -> anyhow::Result<()> {
    let mut editor = DefaultEditor::new()?;
    loop {
        match editor.readline(PROMPT) {
            Ok(line) if line.trim().is_empty() => break,
            Ok(line) => {
                editor.add_history_entry(line.as_str())?;
                show_ast(ast, &line);
                println!("{}", session.interpret(&line)?);
            }
            Err(ReadlineError::Interrupted | ReadlineError::Eof) => break,
            Err(err) => return Err(err.into()),
        }
    }
    Ok(())
}

fn show_ast(enabled: bool, source: &str) {
    if !enabled {
        return;
    }
    if let Ok(expr) = stlc::parser::parse(source) {
        eprintln!("{expr}");
    }
}
