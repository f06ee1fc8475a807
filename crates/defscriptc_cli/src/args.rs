//! the args for running defscriptc

use clap::{value_parser, ArgAction, ArgGroup};
use std::path::PathBuf;
use tracing::level_filters::LevelFilter;

/// The args struct
#[derive(Debug, clap::Parser)]
#[clap(author, version, about = "Runs the defscript front-end over a source file")]
#[clap(group(ArgGroup::new("mode").required(true).args(["tokenize", "tokenize_raw"])))]
pub struct Args {
    #[clap(
        short = 'v',
        value_parser = value_parser!(u8).range(0..=2),
        action = ArgAction::Count,
        conflicts_with = "quiet"
    )]
    verbose: u8,
    #[clap(
        short = 'q',
        value_parser = value_parser!(u8).range(0..=2),
        action = ArgAction::Count,
        conflicts_with = "verbose"
    )]
    quiet: u8,

    /// The source file to read
    #[clap(value_name = "source file", value_hint = clap::ValueHint::FilePath)]
    pub file: PathBuf,
    /// Print the token stream after indentation is resolved
    #[clap(long)]
    pub tokenize: bool,
    /// Print the token stream exactly as the lexer produces it
    #[clap(long)]
    pub tokenize_raw: bool,
    /// How many tokens each rewrite stage remembers
    #[clap(short = 'l', long, env = "DEFSCRIPT_LOOKBACK")]
    pub lookback: Option<usize>,
}

impl Args {
    /// Gets the logging level based on whether `-v[v]` or `-q[q]` has been used,
    pub fn log_level_filter(&self) -> LevelFilter {
        match self.verbose as i8 - self.quiet as i8 {
            -2 => LevelFilter::OFF,
            -1 => LevelFilter::ERROR,
            0 => LevelFilter::INFO,
            1 => LevelFilter::DEBUG,
            _ => LevelFilter::TRACE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use std::path::Path;

    #[test]
    fn test_args_parsing() {
        let test = "defscriptc file.ds --tokenize";
        let args = Args::try_parse_from(test.split(" ")).expect("could not parse test string");
        assert_eq!(args.file, Path::new("file.ds"));
        assert!(args.tokenize);
        assert!(!args.tokenize_raw);
        assert_eq!(args.log_level_filter(), LevelFilter::INFO);
    }

    #[test]
    fn test_mode_is_required() {
        assert!(Args::try_parse_from(["defscriptc", "file.ds"]).is_err());
        let both = ["defscriptc", "file.ds", "--tokenize", "--tokenize-raw"];
        assert!(Args::try_parse_from(both).is_err());
    }

    #[test]
    fn test_verbosity() {
        let args = Args::try_parse_from(["defscriptc", "-vv", "file.ds", "--tokenize-raw"])
            .expect("could not parse test string");
        assert_eq!(args.log_level_filter(), LevelFilter::TRACE);
        let args = Args::try_parse_from(["defscriptc", "-q", "file.ds", "--tokenize-raw"])
            .expect("could not parse test string");
        assert_eq!(args.log_level_filter(), LevelFilter::ERROR);
        assert!(Args::try_parse_from(["defscriptc", "-v", "-q", "file.ds", "--tokenize"]).is_err());
        assert!(Args::try_parse_from(["defscriptc", "-vvv", "file.ds", "--tokenize"]).is_err());
    }

    #[test]
    fn test_lookback() {
        let args = Args::try_parse_from(["defscriptc", "file.ds", "--tokenize", "-l", "4"])
            .expect("could not parse test string");
        assert_eq!(args.lookback, Some(4));
    }
}
