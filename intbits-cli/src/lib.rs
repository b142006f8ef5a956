use std::{
    fmt::Display,
    io::{self, Write},
    path::Path,
};

use anyhow::{Context, bail};
use intbits_ast::span::Span;
use intbits_eval::interp::Interpreter;
use intbits_lex::scan::{ScanTokens, Scanner};
use intbits_parse::parse::Parser;
use tracing::{debug, error, info};

pub mod logging;

/// Runs one program after another against the same variables.
struct Runner<W: Write> {
    interp: Interpreter<W>,
}

impl<W: Write> Runner<W> {
    fn new(out: W) -> Self {
        Self {
            interp: Interpreter::new(out),
        }
    }

    /// Reports every diagnostic on stderr and fails if there was any.
    fn run(&mut self, source: &str) -> anyhow::Result<()> {
        let ScanTokens {
            tokens,
            eof_span,
            errors: scan_errors,
        } = Scanner::new(source).scan_tokens();

        for error in &scan_errors {
            report(error, error.span);
        }

        let mut parser = Parser::new(
            tokens.into_iter().peekable(),
            eof_span,
            self.interp.interner_mut(),
        );

        let stmts = match parser.parse() {
            Ok(stmts) => stmts,
            Err(error) => {
                report(&error, error.span);
                bail!("failed to parse program");
            }
        };

        if !scan_errors.is_empty() {
            bail!("{} scan error(s)", scan_errors.len());
        }

        debug!(stmts = stmts.len(), "parsed program");

        if let Err(error) = self.interp.interpret(&stmts) {
            report(&error, error.span);
            bail!("program stopped with a runtime error");
        }

        Ok(())
    }
}

fn report(message: impl Display, span: Span) {
    error!(%span, "{message}");
    eprintln!("error: {message} at {span}");
}

/// Runs `source` as a single program, writing its output to `out`.
pub fn run_source(source: &str, out: &mut impl Write) -> anyhow::Result<()> {
    Runner::new(out).run(source)
}

pub fn run_file(path: &Path) -> anyhow::Result<()> {
    let source = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;

    info!(path = %path.display(), "running script");

    let mut runner = Runner::new(io::stdout());
    runner
        .run(&source)
        .with_context(|| format!("{} did not run cleanly", path.display()))
}

pub fn run_repl() -> anyhow::Result<()> {
    info!("starting prompt");

    let mut runner = Runner::new(io::stdout());

    loop {
        let mut line = String::new();
        print!("> ");
        io::stdout().flush()?;

        let read = io::stdin()
            .read_line(&mut line)
            .context("failed to read from stdin")?;
        if read == 0 {
            break;
        }

        if let Err(error) = runner.run(&line) {
            debug!(%error, "line failed");
        }
    }

    println!();

    Ok(())
}
