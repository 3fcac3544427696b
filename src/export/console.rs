//! Console rendering of match results

use crate::engine::MatchResult;
use std::fmt::Write as FmtWrite;

#[cfg(feature = "colored-output")]
use colored::Colorize;

const BANNER_WIDTH: usize = 65;

#[derive(Debug, Clone, Copy)]
enum Tone {
    Heading,
    Asn,
    Warning,
}

#[cfg(feature = "colored-output")]
fn paint(text: &str, tone: Tone, use_color: bool) -> String {
    if !use_color {
        return text.to_string();
    }
    match tone {
        Tone::Heading => text.yellow().bold().to_string(),
        Tone::Asn => text.green().bold().to_string(),
        Tone::Warning => text.red().bold().to_string(),
    }
}

#[cfg(not(feature = "colored-output"))]
fn paint(text: &str, _tone: Tone, _use_color: bool) -> String {
    text.to_string()
}

/// Three-line starred banner with `title` centred
pub fn banner(title: &str) -> String {
    let padding = BANNER_WIDTH.saturating_sub(title.chars().count() + 4);
    let pad_left = padding / 2;
    let pad_right = padding - pad_left;
    let stars = "*".repeat(BANNER_WIDTH);

    format!(
        "{}\n**{}{}{}**\n{}",
        stars,
        " ".repeat(pad_left),
        title,
        " ".repeat(pad_right),
        stars
    )
}

/// Format results for the terminal
///
/// Every ASN gets one line; prefixes are listed beneath it when
/// `show_prefixes` is set. An empty result set renders an explicit notice.
pub fn format_console(
    results: &[MatchResult],
    query: &str,
    show_prefixes: bool,
    use_color: bool,
) -> String {
    let mut out = String::new();

    if results.is_empty() {
        let _ = writeln!(
            out,
            "{}",
            paint(&format!("No ASNs found for company '{}'.", query), Tone::Warning, use_color)
        );
        return out;
    }

    let _ = writeln!(
        out,
        "\n{}",
        paint(&banner(&format!("Matched ASNs for '{}'", query)), Tone::Heading, use_color)
    );
    for result in results {
        let _ = writeln!(
            out,
            "  {} {}",
            paint(&format!("AS{}:", result.asn), Tone::Asn, use_color),
            result.organization
        );
        if show_prefixes {
            for prefix in &result.prefixes {
                let _ = writeln!(out, "      {}", prefix);
            }
        }
    }

    let prefix_count: usize = results.iter().map(|r| r.prefixes.len()).sum();
    let _ = writeln!(
        out,
        "\nFound {} ASN{} with {} prefix{}",
        results.len(),
        if results.len() == 1 { "" } else { "s" },
        prefix_count,
        if prefix_count == 1 { "" } else { "es" }
    );

    out
}
