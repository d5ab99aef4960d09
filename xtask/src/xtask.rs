use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use xshell::{cmd, Shell};

#[derive(Debug, Parser)]
struct Xtask {
    #[command(subcommand)]
    cmd: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Format, lint, test, and build for no_std.
    Ci,
    /// Format the code and fix lints.
    Format,
    /// Run the criterion benchmarks.
    Bench {
        /// Only run benchmarks matching this filter.
        filter: Option<String>,
    },
    /// Print the hashes of a message in every mode.
    Demo {
        #[arg(default_value = "abc")]
        message: String,
    },
}

fn main() -> Result<()> {
    let xtask = Xtask::parse();
    let sh = Shell::new()?;
    sh.change_dir(project_root()?);

    match xtask.cmd.unwrap_or(Command::Ci) {
        Command::Ci => ci(&sh),
        Command::Format => format(&sh),
        Command::Bench { filter } => bench(&sh, filter),
        Command::Demo { message } => demo(&sh, &message),
    }
}

fn ci(sh: &Shell) -> Result<()> {
    cmd!(sh, "cargo fmt --all --check").run().context("formatting")?;
    cmd!(sh, "cargo clippy --all-features --all-targets -- -D warnings")
        .run()
        .context("clippy")?;
    cmd!(sh, "cargo test --all-features --all-targets").run().context("tests")?;
    cmd!(sh, "cargo test --doc").run().context("doc tests")?;
    cmd!(sh, "cargo build --no-default-features --lib").run().context("no_std build")?;
    Ok(())
}

fn format(sh: &Shell) -> Result<()> {
    cmd!(sh, "cargo fmt --all").run()?;
    cmd!(sh, "cargo clippy --fix --allow-dirty --allow-staged --all-features --all-targets")
        .run()?;
    Ok(())
}

fn bench(sh: &Shell, filter: Option<String>) -> Result<()> {
    let filter = filter.into_iter();
    cmd!(sh, "cargo bench --bench benchmarks -- {filter...}").run()?;
    Ok(())
}

fn demo(sh: &Shell, message: &str) -> Result<()> {
    cmd!(sh, "cargo run --release --example abc -- {message}").run()?;
    Ok(())
}

fn project_root() -> Result<std::path::PathBuf> {
    let dir = std::env::var("CARGO_MANIFEST_DIR").context("CARGO_MANIFEST_DIR not set")?;
    Ok(std::path::Path::new(&dir)
        .ancestors()
        .nth(1)
        .context("xtask has no parent directory")?
        .to_path_buf())
}
