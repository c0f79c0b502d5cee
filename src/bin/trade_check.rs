//! Validate trade catalog directories the way a reload would.
//!
//! Loads every `.json` catalog under the configured directories against the
//! vanilla profession table, prints how many trades registered per profession
//! and tier, then prints the diagnostic report. Directories come from
//! `--dir` flags or `TRADEBOOK_TRADE_DIRS`.

use anyhow::{Context, Result, bail};
use std::env;
use std::ffi::OsString;
use std::io::{self, Write};
use std::path::PathBuf;
use tradebook::config::LOG_ENV;
use tradebook::{
    DiagnosticAudience, JsonAudience, ReloadConfig, TextAudience, TradeLoader, TradeTable, reload,
};

fn main() {
    match run() {
        Ok(clean) => {
            if !clean {
                std::process::exit(1);
            }
        }
        Err(err) => {
            eprintln!("{err:#}");
            std::process::exit(1);
        }
    }
}

/// Returns false when strict mode saw diagnostics.
fn run() -> Result<bool> {
    let args = CliArgs::parse()?;
    init_tracing(args.verbose)?;

    let config = ReloadConfig::from_env().merge_args(args.dirs, args.strict);
    if config.trade_dirs.is_empty() {
        bail!("no trade directories given; pass --dir or set TRADEBOOK_TRADE_DIRS");
    }

    let mut loader = TradeLoader::with_default_converters();
    let mut table = TradeTable::vanilla();
    let summary = reload(&mut loader, &mut table, &config.trade_dirs)?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let drained = if args.json {
        let mut audience = JsonAudience::new(&mut out);
        let audiences: &mut [&mut dyn DiagnosticAudience] = &mut [&mut audience];
        let drained = loader.drain_and_deliver(audiences);
        serde_json::to_writer(&mut out, &serde_json::json!({ "summary": summary }))
            .context("serializing reload summary")?;
        writeln!(out)?;
        drained
    } else {
        for (profession, tier, count) in table.counts() {
            writeln!(out, "{profession} {tier} {count}")?;
        }
        if !table.unleveled().is_empty() {
            writeln!(out, "wandering_trader - {}", table.unleveled().len())?;
        }
        writeln!(
            out,
            "{} documents, {} trades registered, {} diagnostics",
            summary.documents, summary.registered, summary.diagnostics
        )?;
        if summary.diagnostics > 0 {
            writeln!(out)?;
        }
        let mut audience = TextAudience::new(&mut out);
        let audiences: &mut [&mut dyn DiagnosticAudience] = &mut [&mut audience];
        loader.drain_and_deliver(audiences)
    };

    Ok(!(config.strict && drained > 0))
}

fn init_tracing(verbose: bool) -> Result<()> {
    let level = if verbose { "debug" } else { "warn" };
    let filter = tracing_subscriber::EnvFilter::try_from_env(LOG_ENV)
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init()
        .map_err(|error| anyhow::anyhow!("failed to initialize tracing subscriber: {error}"))
}

struct CliArgs {
    dirs: Vec<PathBuf>,
    strict: bool,
    json: bool,
    verbose: bool,
}

impl CliArgs {
    fn parse() -> Result<Self> {
        let mut args = env::args_os().skip(1);
        let mut dirs = Vec::new();
        let mut strict = false;
        let mut json = false;
        let mut verbose = false;

        while let Some(arg_os) = args.next() {
            let arg = arg_os
                .into_string()
                .map_err(|_| anyhow::anyhow!("argument is not valid UTF-8"))?;
            match arg.as_str() {
                "--dir" => dirs.push(PathBuf::from(next_value(&mut args, "--dir")?)),
                "--strict" => strict = true,
                "--json" => json = true,
                "-v" | "--verbose" => verbose = true,
                "--help" | "-h" => {
                    print!("{}", usage());
                    std::process::exit(0);
                }
                other => bail!("unknown flag: {other}\n{}", usage()),
            }
        }

        Ok(CliArgs {
            dirs,
            strict,
            json,
            verbose,
        })
    }
}

fn next_value(args: &mut impl Iterator<Item = OsString>, flag: &str) -> Result<String> {
    args.next()
        .map(|os| {
            os.into_string()
                .map_err(|_| anyhow::anyhow!("value for {flag} is not valid UTF-8"))
        })
        .transpose()?
        .ok_or_else(|| anyhow::anyhow!("missing value for {flag}"))
}

fn usage() -> &'static str {
    "Usage: trade-check [--dir PATH]... [--strict] [--json] [-v]\n\
Loads every trade catalog under the given directories (default: TRADEBOOK_TRADE_DIRS),\n\
prints registered counts and the diagnostic report.\n\
--strict (or TRADEBOOK_STRICT=1) exits 1 when any diagnostic was produced.\n\
Log filter: TRADEBOOK_LOG.\n"
}
