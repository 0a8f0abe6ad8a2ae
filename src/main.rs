use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use kirat_calc::config::Config;
use kirat_calc::history::{DeleteOutcome, HistoryPage};
use kirat_calc::{Calculator, DigitScript, DisplayState};
use std::io::{Write, stdin, stdout};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "kirat-calc", version, about = "Calculator for English, Nepali and Limbu digits")]
struct Cli {
    /// Config file (defaults to the user config directory)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Digit script to start in: english, nepali or limbu
    #[arg(long, global = true)]
    script: Option<DigitScript>,

    /// History database file
    #[arg(long, global = true)]
    database: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Interactive calculator (default)
    Repl,
    /// Feed tokens to the calculator and print the display
    Eval {
        /// Tokens such as 200 + 10 % or AC; numbers are split into digits
        #[arg(required = true, allow_hyphen_values = true)]
        tokens: Vec<String>,
    },
    /// Show one page of calculation history, newest first
    History {
        #[arg(long, default_value_t = 0)]
        offset: usize,
        /// Print the page as JSON
        #[arg(long)]
        json: bool,
    },
    /// Delete a history record
    Delete {
        id: i64,
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_env("KIRAT_CALC_LOG").unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => Config::load(path)?,
        None => Config::load_default()?,
    };
    if let Some(script) = cli.script {
        config.script = script;
    }
    if let Some(database) = cli.database {
        config.database = Some(database);
    }

    let mut calc = Calculator::from_config(&config);

    match cli.command.unwrap_or(Command::Repl) {
        Command::Repl => run_repl(&mut calc),
        Command::Eval { tokens } => {
            let display = feed_words(&mut calc, tokens.iter().map(String::as_str))?;
            print_display(&display);
            Ok(())
        }
        Command::History { offset, json } => {
            let page = calc
                .history_page(offset)
                .context("Failed to load history")?;
            if json {
                println!("{}", serde_json::to_string_pretty(&page)?);
            } else {
                print_history(&page, calc.active_script());
            }
            Ok(())
        }
        Command::Delete { id, yes } => {
            let pending = calc.history_delete(id);
            if !yes && !confirm(&format!("Delete record {id}?"))? {
                println!("Cancelled");
                return Ok(());
            }
            report_delete(calc.confirm_delete(pending).context("Failed to delete record")?, id);
            Ok(())
        }
    }
}

/// Feed whitespace-separated words, one at a time.
fn feed_words<'a>(
    calc: &mut Calculator,
    words: impl IntoIterator<Item = &'a str>,
) -> Result<DisplayState> {
    let mut display = calc.display();
    for word in words {
        display = calc
            .on_word(word)
            .with_context(|| format!("Invalid input {word:?}"))?;
    }
    Ok(display)
}

fn run_repl(calc: &mut Calculator) -> Result<()> {
    println!("Kirat calculator ({}). Type :help for commands.", calc.active_script());
    print_display(&calc.display());

    let mut line = String::new();
    loop {
        print!("> ");
        stdout().flush()?;

        line.clear();
        if stdin().read_line(&mut line)? == 0 {
            break;
        }
        let cmd = line.trim();

        match cmd.split_whitespace().collect::<Vec<_>>().as_slice() {
            [] => continue,
            [":quit"] | [":q"] | ["exit"] => break,
            [":help"] => print_help(),
            [":script", name] => match name.parse::<DigitScript>() {
                Ok(script) => print_display(&calc.set_active_script(script)),
                Err(e) => println!("{e}"),
            },
            [":history"] => match calc.open_history() {
                Ok(page) => print_history(&page, calc.active_script()),
                Err(e) => println!("Error loading history: {e}"),
            },
            [":more"] => match calc.load_more() {
                Ok(Some(page)) => print_history(&page, calc.active_script()),
                Ok(None) => println!("No more records"),
                Err(e) => println!("Error loading history: {e}"),
            },
            [":delete", id] => {
                let Ok(id) = id.parse::<i64>() else {
                    println!("Not a record id: {id}");
                    continue;
                };
                let pending = calc.history_delete(id);
                if !confirm("Are you sure you want to delete this record?")? {
                    continue;
                }
                match calc.confirm_delete(pending) {
                    Ok(outcome) => report_delete(outcome, id),
                    Err(e) => println!("Failed to delete record: {e}"),
                }
            }
            words => match feed_words(calc, words.iter().copied()) {
                Ok(display) => print_display(&display),
                Err(e) => println!("{e:#}"),
            },
        }
    }

    Ok(())
}

fn confirm(question: &str) -> Result<bool> {
    print!("{question} [y/N] ");
    stdout().flush()?;

    let mut answer = String::new();
    stdin().read_line(&mut answer)?;
    Ok(matches!(answer.trim().to_lowercase().as_str(), "y" | "yes"))
}

fn report_delete(outcome: DeleteOutcome, id: i64) {
    match outcome {
        DeleteOutcome::Deleted => println!("Record deleted successfully!"),
        DeleteOutcome::NotFound => println!("No record with id {id}"),
    }
}

fn print_display(display: &DisplayState) {
    println!("  {}", display.input);
    println!("= {}", display.result);
}

fn print_history(page: &HistoryPage, script: DigitScript) {
    if page.is_empty() && page.offset == 0 {
        println!("No history found");
        return;
    }

    for record in &page.records {
        println!(
            "[{}] {} = {}",
            record.id,
            record.expression_in(script),
            record.result_in(script)
        );
        println!("     {}", record.timestamp_in(script));
    }

    if page.has_more {
        println!("(:more for older records)");
    } else {
        println!("No more records");
    }
}

fn print_help() {
    println!("Type tokens separated by spaces, e.g. `200 + 10 %` or `12 × 3 =`.");
    println!("Commands: AC, DEL (first char), BS or ⌫ (last char), =");
    println!("  :script <english|nepali|limbu>  switch digits");
    println!("  :history                        first page of history");
    println!("  :more                           next page");
    println!("  :delete <id>                    delete a record");
    println!("  :quit");
}
