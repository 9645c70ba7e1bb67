use anyhow::Context;
use augtree::batch::{self, Exercise};
use clap::Parser;
use std::io::{BufWriter, Read, Write};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Which exercise the requests belong to.
    #[arg(value_enum)]
    exercise: Exercise,

    /// Read the requests from this file instead of stdin.
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Seed for treap priorities. Drawn from the OS when absent.
    #[arg(short, long)]
    seed: Option<u64>,
}

fn main() -> anyhow::Result<()> {
    if std::env::var("AUGTREE_LOG").is_ok() {
        let e = env_logger::Env::new()
            .filter("AUGTREE_LOG")
            .write_style("AUGTREE_LOG_STYLE");
        env_logger::init_from_env(e);
    }

    let args = Args::parse();
    log::debug!("{:?}", args);

    let input = match &args.input {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("cannot read {}", path.display()))?,
        None => {
            let mut input = String::new();
            std::io::stdin()
                .read_to_string(&mut input)
                .context("cannot read stdin")?;
            input
        }
    };

    let stdout = std::io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    batch::run(args.exercise, &input, args.seed, &mut out)
        .with_context(|| format!("{:?} failed", args.exercise))?;
    out.flush()?;
    Ok(())
}
