//! Trust Display CLI (for previewing layouts only)
//! The main interface is the library and its WASM bindings.
//!
//! Usage: trust-display [--bold|--mono] [--break-words] HEADER [TEXT...]
//! Reads TEXT from stdin when none is given.

use std::io::Read;
use std::process::ExitCode;
use trust_display::{paginate_text, DisplayGeometry, FontLibrary, PaginateOptions, PageStyle, Style};

fn main() -> ExitCode {
    let mut options = PaginateOptions::default();
    let mut words = Vec::new();
    for arg in std::env::args().skip(1) {
        match arg.as_str() {
            "--bold" => options.style = Style::Bold,
            "--mono" => options.style = Style::Mono,
            "--break-words" => options.break_words = true,
            _ => words.push(arg),
        }
    }

    if words.is_empty() {
        eprintln!("usage: trust-display [--bold|--mono] [--break-words] HEADER [TEXT...]");
        return ExitCode::FAILURE;
    }
    let header = words.remove(0);
    let text = if words.is_empty() {
        let mut input = String::new();
        if let Err(err) = std::io::stdin().read_to_string(&mut input) {
            eprintln!("failed to read stdin: {err}");
            return ExitCode::FAILURE;
        }
        input.trim_end().to_string()
    } else {
        words.join(" ")
    };

    let geometry = DisplayGeometry::default();
    let fonts = FontLibrary::default();
    let pages = paginate_text(&text, &header, &options, &geometry, &fonts);

    for page in pages.pages() {
        match page.style() {
            PageStyle::Single => println!("== {} ==", header),
            PageStyle::Paginated { index, count } => println!("== {} ({}/{}) ==", header, index + 1, count),
        }
        for line in page.lines(&fonts) {
            let text = page.content().text_between(line.start, line.end);
            let hyphen = if line.hyphenated { "-" } else { "" };
            println!("{:>3}px | {}{}", line.width, text.trim_end_matches('\n'), hyphen);
        }
    }
    ExitCode::SUCCESS
}
