use clap::Parser;
use std::path::PathBuf;

use docuflow_core::{Config, Format, NamingPolicy};

/// Convert documents between Markdown, Word, HTML, EPUB and plain text
#[derive(Debug, Parser)]
#[command(name = "docuflow", version, about)]
pub struct Args {
    /// Files or directories to convert
    #[arg(required_unless_present = "list_formats")]
    pub inputs: Vec<PathBuf>,

    /// Target format (md, docx, html, epub, txt)
    #[arg(short, long)]
    pub format: Option<Format>,

    /// Destination directory, defaults to each source's directory
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Append "_converted" to output file names
    #[arg(long)]
    pub suffix: bool,

    /// Descend into subdirectories
    #[arg(short, long)]
    pub recursive: bool,

    /// Convert up to N files at once
    #[arg(short, long, value_name = "N")]
    pub jobs: Option<usize>,

    /// Per-file timeout in seconds
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Path to the pandoc executable
    #[arg(long, value_name = "PATH")]
    pub pandoc: Option<PathBuf>,

    /// Configuration file, falls back to $DOCUFLOW_CONFIG
    #[arg(short, long, value_name = "PATH", env = "DOCUFLOW_CONFIG")]
    pub config: Option<PathBuf>,

    /// Print supported extensions and their targets, then exit
    #[arg(long)]
    pub list_formats: bool,

    /// Print the batch result as JSON on stdout
    #[arg(long)]
    pub json: bool,

    /// Disable the progress bar
    #[arg(long)]
    pub no_progress: bool,
}

impl Args {
    /// Applies command-line overrides on top of the loaded configuration.
    pub fn apply_to(&self, config: &mut Config) {
        if let Some(format) = self.format {
            config.output.format = Some(format);
        }
        if let Some(dir) = &self.output {
            config.output.directory = Some(dir.clone());
        }
        if self.suffix {
            config.output.naming = NamingPolicy::AppendSuffix;
        }
        if let Some(jobs) = self.jobs {
            config.engine.parallel = true;
            config.engine.max_workers = jobs;
        }
        if let Some(timeout) = self.timeout {
            config.engine.timeout_secs = timeout;
        }
        if let Some(pandoc) = &self.pandoc {
            config.transformer.program = pandoc.clone();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full() {
        let args = Args::try_parse_from([
            "docuflow", "-f", "epub", "-o", "out", "--suffix", "-r", "-j", "3", "--timeout", "60",
            "--pandoc", "/opt/pandoc", "docs", "notes.md",
        ])
        .unwrap();

        assert_eq!(args.format, Some(Format::Epub));
        assert_eq!(args.inputs, vec![PathBuf::from("docs"), PathBuf::from("notes.md")]);
        assert!(args.recursive);

        let mut config = Config::default();
        args.apply_to(&mut config);
        assert_eq!(config.output.format, Some(Format::Epub));
        assert_eq!(config.output.directory, Some(PathBuf::from("out")));
        assert_eq!(config.output.naming, NamingPolicy::AppendSuffix);
        assert!(config.engine.parallel);
        assert_eq!(config.engine.max_workers, 3);
        assert_eq!(config.engine.timeout_secs, 60);
        assert_eq!(config.transformer.program, PathBuf::from("/opt/pandoc"));
    }

    #[test]
    fn test_format_accepts_extension() {
        let args = Args::try_parse_from(["docuflow", "--format", ".docx", "a.md"]).unwrap();
        assert_eq!(args.format, Some(Format::WordPackage));
    }

    #[test]
    fn test_unknown_format_rejected() {
        assert!(Args::try_parse_from(["docuflow", "--format", "pdf", "a.md"]).is_err());
    }

    #[test]
    fn test_inputs_required_unless_listing() {
        assert!(Args::try_parse_from(["docuflow", "-f", "html"]).is_err());
        assert!(Args::try_parse_from(["docuflow", "--list-formats"]).is_ok());
    }

    #[test]
    fn test_no_overrides_keep_config() {
        let args = Args::try_parse_from(["docuflow", "a.md"]).unwrap();
        let mut config = Config::default();
        args.apply_to(&mut config);
        assert_eq!(config, Config::default());
    }
}
