use anyhow::Context;
use clap::Parser;
use colored::*;
use std::fs;
use std::io::Write;
use std::process;

use vektor_core::{
    decode, decode_with, ConsoleSink, Metric, MetricSelection, ParseMode, ScoringSession,
    VECTOR_PREFIX,
};

#[derive(Parser, Debug)]
#[command(
    name = "VEKTOR",
    version,
    about = "CVSS 3.1 Base Score Calculator",
    override_usage = "vektor <vector>  <options>",
    after_help = "\x1b[1;36mEXAMPLES:\x1b[0m
  Score a vector:        vektor \"CVSS:3.1/AV:N/AC:L/PR:N/UI:N/S:U/C:H/I:H/A:H\"
  Metric breakdown:      vektor \"CVSS:3.1/AV:N/AC:L/PR:N/UI:N/S:U/C:H/I:H/A:H\" -b
  Partial vector:        vektor \"CVSS:3.1/AV:N/AC:L\" --lenient
  Score from file:       vektor -l vectors.txt
  JSON output:           vektor -l vectors.txt --json
  Append JSON lines:     vektor -l vectors.txt -o scores.json"
)]
pub struct Args {
    /// CVSS 3.1 vector string(s), e.g. CVSS:3.1/AV:N/AC:L/PR:N/UI:N/S:U/C:H/I:H/A:H
    #[arg(required_unless_present = "list")]
    pub vectors: Vec<String>,

    #[arg(short = 'l', long = "list", help = "File containing vectors (one per line)")]
    pub list: Option<String>,

    #[arg(long, default_value_t = false, help = "Fill metrics missing from a partial vector with the baseline")]
    pub lenient: bool,

    #[arg(long, default_value_t = false, help = "Emit one JSON object per vector on stdout")]
    pub json: bool,

    #[arg(short = 'o', long, help = "Append JSON-line results to this file")]
    pub output: Option<String>,

    #[arg(short = 'b', long, default_value_t = false, help = "Show the per-metric weight breakdown")]
    pub breakdown: bool,
}

fn main() {
    #[cfg(windows)]
    colored::control::set_virtual_terminal(true).ok();

    env_logger::init();
    let args = Args::parse();

    if !args.json {
        print_banner();
    }

    let mut vectors: Vec<String> = Vec::new();

    if let Some(ref list_path) = args.list {
        match read_vector_lines(list_path) {
            Ok(lines) => {
                if !args.json {
                    print!(
                        "{}\r\n",
                        format!("[+] Loaded {} vector(s) from {}", lines.len(), list_path)
                            .green().bold()
                    );
                    std::io::stdout().flush().ok();
                }
                vectors.extend(lines);
            }
            Err(e) => {
                eprint!("{}\r\n", format!("[!] {:#}", e).red());
                process::exit(1);
            }
        }
    }

    vectors.extend(args.vectors.iter().cloned());

    let mut out_file = match args.output.as_deref().map(open_output) {
        Some(Ok(f)) => Some(f),
        Some(Err(e)) => {
            eprint!("{}\r\n", format!("[!] {:#}", e).red());
            process::exit(1);
        }
        None => None,
    };

    let mut failures = 0usize;
    for raw in &vectors {
        if let Err(e) = score_one(raw, &args, out_file.as_mut()) {
            eprint!("{}\r\n", format!("[!] {}: {}", raw, e).red());
            failures += 1;
        }
    }

    if failures > 0 {
        eprint!(
            "{}\r\n",
            format!("[!] {} of {} vector(s) failed validation", failures, vectors.len()).red()
        );
        process::exit(1);
    }
}

fn score_one(raw: &str, args: &Args, out_file: Option<&mut fs::File>) -> anyhow::Result<()> {
    let selection = if args.lenient {
        decode_with(raw, ParseMode::Lenient, MetricSelection::default())?
    } else {
        decode(raw)?
    };

    let mut session = ScoringSession::with_selection(selection);
    if !args.json {
        session = session.attach_sink(ConsoleSink::new_ref());
    }
    let evaluation = session.commit();

    if args.json {
        println!("{}", serde_json::to_string(&evaluation)?);
    }

    if let Some(file) = out_file {
        writeln!(file, "{}", serde_json::to_string(&evaluation)?)
            .context("failed to write result line")?;
    }

    if args.breakdown && !args.json {
        print_breakdown(&selection);
    }

    Ok(())
}

fn print_breakdown(selection: &MetricSelection) {
    for metric in Metric::ALL {
        print!(
            "    {:<4} {:<22} {:<12} {:>5.2}\r\n",
            metric.code(),
            metric.name(),
            selection.label(metric),
            selection.effective_weight(metric)
        );
    }
    print!(
        "    {}\r\n",
        "──────────────────────────────────────────".dimmed()
    );
    std::io::stdout().flush().ok();
}

/// Reads one vector per line; blank lines and `#` comments are skipped.
fn read_vector_lines(path: &str) -> anyhow::Result<Vec<String>> {
    let content =
        fs::read_to_string(path).with_context(|| format!("failed to read '{}'", path))?;
    Ok(content
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty() && !l.starts_with('#'))
        .map(String::from)
        .collect())
}

fn open_output(path: &str) -> anyhow::Result<fs::File> {
    fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("failed to open output file '{}'", path))
}

fn print_banner() {
    print!(
        "{}\r\n{}\r\n",
        "VEKTOR — CVSS 3.1 Base Score Calculator".bright_cyan().bold(),
        format!("vector format: {}AV:_/AC:_/PR:_/UI:_/S:_/C:_/I:_/A:_", VECTOR_PREFIX).dimmed()
    );
    std::io::stdout().flush().ok();
}
