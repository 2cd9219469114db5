use std::fs;
use std::io::{self, Read};

use anyhow::Context;
use clap::Parser;
use owo_colors::OwoColorize;
use pare_core::{FilterConfig, HtmlFormatter, wrap_html};
use tracing_subscriber::EnvFilter;

mod args;
mod echo;

use args::Args;
use echo::{format_size, print_banner, print_detail, print_info, print_removed, print_step, print_success};

const VERSION: &str = env!("CARGO_PKG_VERSION");

impl Args {
    fn flag_rules(&self) -> FilterConfig {
        FilterConfig {
            remove: self.remove.clone(),
            flatten: self.flatten.clone(),
            flatten_all: self.flatten_all,
            remove_media: self.remove_media,
            remove_comments: self.remove_comments,
        }
    }
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("pare=debug,pare_core=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn read_input(input: &str) -> anyhow::Result<String> {
    if input == "-" {
        let mut buffer = String::new();
        io::stdin()
            .read_to_string(&mut buffer)
            .context("Failed to read from stdin")?;
        Ok(buffer)
    } else {
        fs::read_to_string(input).with_context(|| format!("Failed to read file: {}", input))
    }
}

fn load_rules(args: &Args) -> anyhow::Result<FilterConfig> {
    let mut rules = match &args.config {
        Some(path) => {
            let json =
                fs::read_to_string(path).with_context(|| format!("Failed to read config: {}", path.display()))?;
            FilterConfig::from_json(&json).with_context(|| format!("Invalid config: {}", path.display()))?
        }
        None => FilterConfig::default(),
    };
    rules.merge(args.flag_rules());
    tracing::debug!(?rules, "loaded rules");
    Ok(rules)
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_tracing(args.verbose);

    if args.verbose {
        print_banner();
        print_info("Debug logging enabled");
        eprintln!();
        print_step(1, 3, "Reading input");
    }

    let html = read_input(&args.input)?;
    let rules = load_rules(&args)?;

    if args.verbose {
        print_detail("Size", &format_size(html.len()));
        print_detail("Selectors", &rules.remove.len().to_string());
        eprintln!();
        print_step(2, 3, "Filtering document");
    }

    let source = if args.wrap { wrap_html(&html) } else { html };
    let mut formatter = HtmlFormatter::with_config(source, &rules);
    let removed = formatter.filter_content().context("Failed to filter content")?;

    if args.verbose {
        print_detail("Removed", &removed.len().to_string());
        print_detail("Parsed", if formatter.is_parsed() { "yes" } else { "no" });
        eprintln!();
    }

    if args.show_removed {
        let fragments: Vec<String> = removed.iter().map(|el| formatter.get_text(Some(*el))).collect();
        print_removed(&fragments);
    }

    let output = formatter.get_text(None);

    if args.verbose {
        print_step(3, 3, "Writing output");
        eprintln!();
    }

    match args.output {
        Some(path) => {
            fs::write(&path, output).with_context(|| format!("Failed to write to file: {}", path.display()))?;
            print_success(&format!("Output written to {}", path.display().bright_white()));
        }
        None => {
            print!("{}", output);
        }
    }

    Ok(())
}
