use std::path::PathBuf;

use clap::Parser;

/// Trim HTML by removing elements, unwrapping tags and stripping comments
#[derive(Parser, Debug)]
#[command(name = "pare")]
#[command(version)]
#[command(about = "Trim HTML by removing and unwrapping elements", long_about = None)]
pub struct Args {
    /// HTML file, or "-" for stdin
    #[arg(value_name = "INPUT", default_value = "-")]
    pub input: String,

    /// Output file (default: stdout)
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Remove elements matching tag, .class, #id or tag.class (repeatable)
    #[arg(short, long = "remove", value_name = "SELECTOR")]
    pub remove: Vec<String>,

    /// Unwrap elements with this exact tag name (repeatable)
    #[arg(long = "flatten", value_name = "TAG")]
    pub flatten: Vec<String>,

    /// Unwrap every element, leaving text
    #[arg(long)]
    pub flatten_all: bool,

    /// Remove img, audio and video elements
    #[arg(long)]
    pub remove_media: bool,

    /// Remove HTML comments
    #[arg(long)]
    pub remove_comments: bool,

    /// JSON rules file, merged with the flags above
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Treat the input as a fragment and wrap it in a UTF-8 document
    #[arg(long)]
    pub wrap: bool,

    /// Print removed elements to stderr
    #[arg(long)]
    pub show_removed: bool,

    /// Enable debug logging
    #[arg(short, long)]
    pub verbose: bool,
}
