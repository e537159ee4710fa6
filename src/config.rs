//! Host configuration.
//!
//! Every setting has a default, so the host runs without arguments. Each
//! flag can also come from the environment.

use clap::Parser;

use crate::heap::Heap;

#[derive(Debug, Clone, PartialEq, Eq, Parser)]
#[command(name = "tagrt", version, about = "Run a compiled program over tagged words")]
pub struct Config {
    /// Arena size in 32-bit words.
    #[arg(
        long,
        env = "TAGRT_HEAP_WORDS",
        default_value_t = Heap::DEFAULT_WORDS,
        value_parser = parse_heap_words
    )]
    pub heap_words: usize,

    /// Log filter, in `tracing_subscriber::EnvFilter` syntax.
    #[arg(long = "log", env = "TAGRT_LOG", default_value = "warn")]
    pub log_filter: String,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            heap_words: Heap::DEFAULT_WORDS,
            log_filter: "warn".to_string(),
        }
    }
}

fn parse_heap_words(s: &str) -> Result<usize, String> {
    let words: usize = s.parse().map_err(|e| format!("`{}` is not a word count: {}", s, e))?;
    if !(2..=Heap::MAX_WORDS).contains(&words) {
        return Err(format!("arena size must be between 2 and {} words", Heap::MAX_WORDS));
    }
    Ok(words)
}
