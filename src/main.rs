use std::{env, fs, process::ExitCode};

use anyhow::Context;
use tracing_subscriber::EnvFilter;

use thunderbird::{compiler::compiler::compile, config::Config, display_error};

fn main() -> anyhow::Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let config = Config::from_args(env::args().skip(1))?;

    let source = fs::read_to_string(&config.file)
        .with_context(|| format!("reading {:?}", config.file))?;

    let compilation = compile(&source);

    if !config.quiet {
        if config.dump_ast {
            println!("{:#?}", compilation.program);
        }

        if config.dump_symbols {
            let mut tables = String::new();
            compilation
                .program
                .dump_symbol_tables(&mut tables)
                .context("formatting symbol tables")?;
            print!("{}", tables);
        }

        for error in &compilation.diagnostics {
            display_error(error, &source, &config.file);
        }

        if !compilation.has_errors() {
            println!("no errors");
        }
    }

    if compilation.has_errors() {
        return Ok(ExitCode::FAILURE);
    }
    Ok(ExitCode::SUCCESS)
}
