//! Report formatting
//!
//! The report is line-oriented and its order is fixed; other tools diff it
//! between yt-dlp versions.

use colored::Colorize;
use std::io::{self, Write};

/// Placeholder when the n function name lookup fails outside trace mode
pub const N_FUNCTION_UNAVAILABLE: &str = "<unavailable>";

/// Output formatter for the probe report
pub struct OutputFormatter<W: Write> {
    out: W,
}

impl<W: Write> OutputFormatter<W> {
    /// Create a formatter writing to `out`
    pub fn new(out: W) -> Self {
        Self { out }
    }

    /// Give back the underlying writer
    pub fn into_inner(self) -> W {
        self.out
    }

    pub fn print_version(&mut self, version: &str) -> io::Result<()> {
        writeln!(self.out, "yt-dlp version: {}", version)
    }

    /// Print input and processed player URLs
    pub fn print_urls(&mut self, original: &str, processed: &str) -> io::Result<()> {
        writeln!(self.out, "original URL : {}", original)?;
        writeln!(self.out, "processed URL: {}", processed)
    }

    pub fn print_n_function(&mut self, name: &str) -> io::Result<()> {
        writeln!(self.out, "n function name: {}", name)
    }

    /// Print the lookup failure, with the reason only when tracing
    pub fn print_n_function_failure(&mut self, error: &str, trace: bool) -> io::Result<()> {
        if trace {
            writeln!(self.out, "n function name: <failed> ({})", error)
        } else {
            writeln!(self.out, "n function name: {}", N_FUNCTION_UNAVAILABLE)
        }
    }

    pub fn print_decoded(&mut self, decoded: &str) -> io::Result<()> {
        writeln!(self.out, "decoded nsig  : {}", decoded)
    }

    pub fn print_extractor_error(&mut self, message: &str) -> io::Result<()> {
        writeln!(self.out, "ExtractorError: {}", message)
    }

    pub fn print_unexpected_error(&mut self, message: &str) -> io::Result<()> {
        writeln!(self.out, "Unexpected error: {}", message)
    }
}

/// Print a usage diagnostic to stderr
pub fn print_usage_error(message: &str) {
    eprintln!("{} {}", "error:".red().bold(), message);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(f: impl FnOnce(&mut OutputFormatter<Vec<u8>>) -> io::Result<()>) -> String {
        let mut formatter = OutputFormatter::new(Vec::new());
        f(&mut formatter).unwrap();
        String::from_utf8(formatter.into_inner()).unwrap()
    }

    #[test]
    fn test_print_version() {
        assert_eq!(render(|f| f.print_version("2025.01.15")), "yt-dlp version: 2025.01.15\n");
    }

    #[test]
    fn test_print_urls() {
        let url = "https://www.youtube.com/s/player/abc123/base.js";
        assert_eq!(
            render(|f| f.print_urls(url, url)),
            format!("original URL : {url}\nprocessed URL: {url}\n")
        );
    }

    #[test]
    fn test_print_n_function() {
        assert_eq!(render(|f| f.print_n_function("Xka")), "n function name: Xka\n");
    }

    #[test]
    fn test_print_n_function_failure() {
        assert_eq!(
            render(|f| f.print_n_function_failure("boom", false)),
            "n function name: <unavailable>\n"
        );
        assert_eq!(
            render(|f| f.print_n_function_failure("boom", true)),
            "n function name: <failed> (boom)\n"
        );
    }

    #[test]
    fn test_print_result_lines() {
        assert_eq!(render(|f| f.print_decoded("XYZ")), "decoded nsig  : XYZ\n");
        assert_eq!(
            render(|f| f.print_extractor_error("bad token")),
            "ExtractorError: bad token\n"
        );
        assert_eq!(
            render(|f| f.print_unexpected_error("boom")),
            "Unexpected error: boom\n"
        );
    }
}
