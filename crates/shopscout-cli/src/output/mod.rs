//! Output rendering for terminal and JSON formats

use crate::app::OutputFormat;
use shopscout_core::{ResultSet, SearchResult, StructuredIntent};
use std::io::Write;
use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

pub fn print_result_set(results: &ResultSet, format: OutputFormat) {
    match format {
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::to_string_pretty(results).unwrap_or_else(|_| "{}".to_string())
            );
        }
        OutputFormat::Cli => {
            if let Some(ref attempt) = results.attempt {
                if attempt != "strict" {
                    eprintln!("(no strict matches; showing results from the '{attempt}' fallback)");
                }
            }
            println!("{} result(s), {} total", results.hits.len(), results.total);
            print_hits(&results.hits);
        }
    }
}

pub fn print_results(results: &[SearchResult], format: OutputFormat) {
    match format {
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::to_string_pretty(results).unwrap_or_else(|_| "[]".to_string())
            );
        }
        OutputFormat::Cli => {
            println!("{} result(s)", results.len());
            print_hits(results);
        }
    }
}

pub fn print_intent(intent: &StructuredIntent, format: OutputFormat) -> anyhow::Result<()> {
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(intent)?),
        OutputFormat::Cli => {
            if intent.is_empty() {
                println!("No filters extracted (free-text only).");
            } else {
                println!("{} filter(s):", intent.filter_count());
                // YAML reads well for the flat optional-field record
                print!("{}", serde_yaml_like(intent)?);
            }
        }
    }
    Ok(())
}

/// Render the non-empty intent fields as "  field: value" lines.
fn serde_yaml_like(intent: &StructuredIntent) -> anyhow::Result<String> {
    let value = serde_json::to_value(intent)?;
    let mut out = String::new();
    if let serde_json::Value::Object(map) = value {
        for (field, value) in map {
            if !value.is_null() {
                out.push_str(&format!("  {}: {}\n", field, value));
            }
        }
    }
    Ok(out)
}

fn print_hits(hits: &[SearchResult]) {
    let mut stdout = StandardStream::stdout(ColorChoice::Auto);
    for (rank, hit) in hits.iter().enumerate() {
        let name = hit
            .attributes
            .get("name")
            .and_then(|v| v.as_str())
            .unwrap_or(&hit.id);

        let _ = stdout.set_color(ColorSpec::new().set_fg(Some(Color::Cyan)).set_bold(true));
        let _ = write!(stdout, "{:>3}. {}", rank + 1, name);
        let _ = stdout.reset();

        if let Some(score) = hit.rerank_score.or(hit.score) {
            let _ = write!(stdout, "  ({:.3})", score);
        }
        let _ = writeln!(stdout);

        if let Some(description) = hit.attributes.get("description").and_then(|v| v.as_str()) {
            let _ = writeln!(stdout, "     {}", description);
        }
    }
}
