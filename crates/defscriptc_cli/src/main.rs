use crate::args::Args;
use clap::Parser;
use defscript_tokens::token::Token;
use defscriptc::DefScriptC;
use std::io::{stderr, stdout, Write};
use tracing::metadata::LevelFilter;
use tracing::{debug, trace};
use tracing_error::ErrorLayer;
use tracing_subscriber::fmt::format;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::{Layer, Registry};

mod args;

fn main() -> eyre::Result<()> {
    color_eyre::install()?;
    let args = Args::parse();
    init_logging(args.log_level_filter())?;
    trace!("starting defscriptc with args: {args:?}");
    debug!("defscriptc version: {}", env!("CARGO_PKG_VERSION"));

    let mut builder = DefScriptC::builder();
    if let Some(lookback) = args.lookback {
        builder = builder.lookback(lookback);
    }
    let compiler = builder.build()?;
    let source = DefScriptC::read_source(&args.file)?;

    let tokens = if args.tokenize_raw {
        DefScriptC::collect_tokens(&source, compiler.tokenize_raw(&source, 0)?)?
    } else {
        DefScriptC::collect_tokens(&source, compiler.tokenize(&source, 0)?)?
    };
    debug!("{} tokens in {}", tokens.len(), source.name());

    let mut out = stdout().lock();
    for token in &tokens {
        writeln!(out, "{}", describe(token))?;
    }
    out.flush()?;
    Ok(())
}

/// `type : "text"`, with newlines and tabs escaped
fn describe(token: &Token) -> String {
    let kind: &'static str = token.kind().into();
    let text = token.text().replace('\n', "\\n").replace('\t', "\\t");
    format!("{kind} : \"{text}\"")
}

/// Logs go to stderr so stdout only carries tokens
fn init_logging(level_filter: LevelFilter) -> eyre::Result<()> {
    let registry = Registry::default()
        .with(
            tracing_subscriber::fmt::layer()
                .event_format(format().with_target(true))
                .with_writer(stderr)
                .with_filter(level_filter),
        )
        .with(ErrorLayer::default());

    tracing::subscriber::set_global_default(registry)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use defscript_tokens::source::SourceFile;

    #[test]
    fn test_describe_escapes_whitespace() {
        let source = SourceFile::anonymous("a\n\t b");
        let compiler = DefScriptC::builder().build().expect("could not build defscriptc");
        let tokens =
            DefScriptC::collect_tokens(&source, compiler.tokenize_raw(&source, 0).unwrap())
                .unwrap();
        let described = tokens.iter().map(describe).collect::<Vec<_>>();
        assert_eq!(described[0], "id : \"a\"");
        assert_eq!(described[1], "nl : \"\\n\\t \"");
    }
}
