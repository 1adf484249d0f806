use anyhow::{bail, Context, Result};
use clap::{ArgAction, Parser};
use log::LevelFilter;
use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use tpatch_core::{MissPolicy, PatchRequest, ReplaceMode};

const STDIN_MARKER: &str = "-";

#[derive(Parser, Debug)]
#[command(
    name = "tpatch",
    version,
    about = "Replace a literal block of text in a file, in place and atomically."
)]
pub struct Args {
    /// File to patch
    pub path: PathBuf,

    /// SEARCH then REPLACE, unless supplied by --search-file / --replace-file.
    /// Put fragments starting with '-' after "--".
    #[arg(value_name = "FRAGMENT", num_args = 0..=2)]
    pub fragments: Vec<String>,

    /// Read the search block from FILE ("-" for stdin)
    #[arg(long, value_name = "FILE")]
    pub search_file: Option<PathBuf>,

    /// Read the replacement block from FILE ("-" for stdin)
    #[arg(long, value_name = "FILE")]
    pub replace_file: Option<PathBuf>,

    /// Replace only the first occurrence
    #[arg(long)]
    pub first: bool,

    /// Fail when the search block does not occur in the file
    #[arg(long)]
    pub strict: bool,

    /// Report what would change without writing
    #[arg(long)]
    pub dry_run: bool,

    /// More log output (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, conflicts_with = "quiet")]
    pub verbose: u8,

    /// Only report errors
    #[arg(short, long)]
    pub quiet: bool,
}

impl Args {
    pub fn log_level(&self) -> LevelFilter {
        if self.quiet {
            return LevelFilter::Error;
        }
        match self.verbose {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            2 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    }
}

/// Resolves the fragment sources and switches into a request.
pub fn build_request(args: &Args) -> Result<PatchRequest> {
    if is_stdin(args.search_file.as_deref()) && is_stdin(args.replace_file.as_deref()) {
        bail!("only one of --search-file and --replace-file may read from stdin");
    }

    let mut positional = args.fragments.iter().cloned();

    let search = match &args.search_file {
        Some(file) => read_fragment(file)?,
        None => positional
            .next()
            .context("missing search block (give SEARCH or --search-file)")?,
    };
    let replace = match &args.replace_file {
        Some(file) => read_fragment(file)?,
        None => positional
            .next()
            .context("missing replacement block (give REPLACE or --replace-file)")?,
    };
    if positional.next().is_some() {
        bail!("too many fragments: a block given by file must not also be given inline");
    }

    let mut req = PatchRequest::new(&args.path, search, replace);
    if args.first {
        req.mode = ReplaceMode::First;
    }
    if args.strict {
        req.on_miss = MissPolicy::Fail;
    }
    req.dry_run = args.dry_run;
    Ok(req)
}

fn is_stdin(file: Option<&Path>) -> bool {
    file.is_some_and(|f| f.as_os_str() == STDIN_MARKER)
}

fn read_fragment(file: &Path) -> Result<String> {
    if file.as_os_str() == STDIN_MARKER {
        if atty::is(atty::Stream::Stdin) {
            bail!("fragment requested from stdin, but no data is piped in");
        }
        let mut buffer = String::new();
        io::stdin()
            .read_to_string(&mut buffer)
            .context("failed to read fragment from stdin")?;
        return Ok(buffer);
    }
    fs::read_to_string(file).with_context(|| format!("failed to read fragment file {:?}", file))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn parse(argv: &[&str]) -> Args {
        Args::try_parse_from(std::iter::once("tpatch").chain(argv.iter().copied())).unwrap()
    }

    #[test]
    fn test_positional_fragments() {
        let args = parse(&["src/app.ts", "a = 1", "a = 42"]);
        let req = build_request(&args).unwrap();
        assert_eq!(req.target, PathBuf::from("src/app.ts"));
        assert_eq!(req.search, "a = 1");
        assert_eq!(req.replace, "a = 42");
        assert_eq!(req.mode, ReplaceMode::All);
        assert_eq!(req.on_miss, MissPolicy::Ignore);
        assert!(!req.dry_run);
    }

    #[test]
    fn test_switches() {
        let args = parse(&["f.txt", "x", "y", "--first", "--strict", "--dry-run"]);
        let req = build_request(&args).unwrap();
        assert_eq!(req.mode, ReplaceMode::First);
        assert_eq!(req.on_miss, MissPolicy::Fail);
        assert!(req.dry_run);
    }

    #[test]
    fn test_hyphenated_fragment() {
        let args = parse(&["list.md", "--", "- old item", "- new item"]);
        let req = build_request(&args).unwrap();
        assert_eq!(req.search, "- old item");
        assert_eq!(req.replace, "- new item");
    }

    #[test]
    fn test_fragment_files() {
        let dir = tempdir().unwrap();
        let search = dir.path().join("search.txt");
        fs::write(&search, "line one\nline two\n").unwrap();

        let args = parse(&[
            "target.txt",
            "--search-file",
            search.to_str().unwrap(),
            "replacement",
        ]);
        let req = build_request(&args).unwrap();
        assert_eq!(req.search, "line one\nline two\n");
        assert_eq!(req.replace, "replacement");
    }

    #[test]
    fn test_missing_and_extra_fragments() {
        let args = parse(&["target.txt", "only-search"]);
        let err = build_request(&args).unwrap_err();
        assert!(err.to_string().contains("missing replacement block"));

        let dir = tempdir().unwrap();
        let replace = dir.path().join("replace.txt");
        fs::write(&replace, "r").unwrap();
        let args = parse(&[
            "target.txt",
            "s",
            "extra",
            "--replace-file",
            replace.to_str().unwrap(),
        ]);
        let err = build_request(&args).unwrap_err();
        assert!(err.to_string().contains("too many fragments"));
    }

    #[test]
    fn test_both_from_stdin_rejected() {
        let args = parse(&["t.txt", "--search-file", "-", "--replace-file", "-"]);
        let err = build_request(&args).unwrap_err();
        assert!(err.to_string().contains("only one of"));
    }

    #[test]
    fn test_log_level() {
        assert_eq!(parse(&["t", "a", "b"]).log_level(), LevelFilter::Warn);
        assert_eq!(parse(&["-vv", "t", "a", "b"]).log_level(), LevelFilter::Debug);
        assert_eq!(parse(&["t", "a", "b", "-q"]).log_level(), LevelFilter::Error);
    }
}
