//! Renders the tailored resume text into a per-session PDF artifact.

use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use anyhow::Context;
use printpdf::{BuiltinFont, Mm, PdfDocument};

const PAGE_WIDTH_MM: f64 = 210.0;
const PAGE_HEIGHT_MM: f64 = 297.0;
const MARGIN_MM: f64 = 15.0;
const LINE_HEIGHT_MM: f64 = 6.0;
const FONT_SIZE: f64 = 11.0;
const MAX_LINE_CHARS: usize = 90;

/// Filename the download endpoint presents to the browser.
pub const DOWNLOAD_FILENAME: &str = "tailored_resume.pdf";

pub fn output_path(output_dir: &Path, session_id: &str) -> PathBuf {
    output_dir.join(format!("{session_id}.pdf"))
}

/// Write the text into `{output_dir}/{session_id}.pdf`, overwriting any
/// previous artifact for that session. The document is written to a temp
/// file and renamed into place so a concurrent download never observes a
/// partially written file.
pub async fn render_resume_pdf(
    output_dir: &Path,
    session_id: &str,
    text: &str,
) -> anyhow::Result<PathBuf> {
    tokio::fs::create_dir_all(output_dir).await?;

    let final_path = output_path(output_dir, session_id);
    let tmp_path = output_dir.join(format!("{session_id}.pdf.tmp"));

    // Clone into the blocking task (PDF generation is CPU bound).
    let text = text.to_string();
    let tmp = tmp_path.clone();
    tokio::task::spawn_blocking(move || write_pdf(&tmp, &text))
        .await
        .context("PDF render task panicked")??;

    tokio::fs::rename(&tmp_path, &final_path).await?;
    Ok(final_path)
}

fn write_pdf(path: &Path, text: &str) -> anyhow::Result<()> {
    let (doc, page1, layer1) = PdfDocument::new(
        "Tailored Resume",
        Mm(PAGE_WIDTH_MM),
        Mm(PAGE_HEIGHT_MM),
        "Layer 1",
    );
    let font = doc
        .add_builtin_font(BuiltinFont::Helvetica)
        .map_err(|e| anyhow::anyhow!("failed to load builtin font: {e}"))?;

    let mut layer = doc.get_page(page1).get_layer(layer1);
    let mut y = PAGE_HEIGHT_MM - MARGIN_MM;

    for line in text.split('\n') {
        for chunk in wrap_line(line, MAX_LINE_CHARS) {
            if y < MARGIN_MM {
                let (page, new_layer) =
                    doc.add_page(Mm(PAGE_WIDTH_MM), Mm(PAGE_HEIGHT_MM), "Layer 1");
                layer = doc.get_page(page).get_layer(new_layer);
                y = PAGE_HEIGHT_MM - MARGIN_MM;
            }
            layer.use_text(chunk, FONT_SIZE, Mm(MARGIN_MM), Mm(y), &font);
            y -= LINE_HEIGHT_MM;
        }
    }

    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    doc.save(&mut writer)
        .map_err(|e| anyhow::anyhow!("failed to write PDF: {e}"))?;
    Ok(())
}

/// Greedy word wrap at `max_chars` columns. Blank lines are preserved as a
/// single empty chunk so vertical spacing survives; tokens longer than the
/// limit are hard-split.
fn wrap_line(line: &str, max_chars: usize) -> Vec<String> {
    let mut out = Vec::new();
    let mut current = String::new();

    for word in line.split_whitespace() {
        let word_len = word.chars().count();
        if !current.is_empty() && current.chars().count() + 1 + word_len > max_chars {
            out.push(std::mem::take(&mut current));
        }
        if word_len > max_chars {
            let mut rest = word;
            while rest.chars().count() > max_chars {
                if !current.is_empty() {
                    out.push(std::mem::take(&mut current));
                }
                let split = rest
                    .char_indices()
                    .nth(max_chars)
                    .map(|(i, _)| i)
                    .unwrap_or(rest.len());
                out.push(rest[..split].to_string());
                rest = &rest[split..];
            }
            current = rest.to_string();
        } else {
            if !current.is_empty() {
                current.push(' ');
            }
            current.push_str(word);
        }
    }

    if !current.is_empty() {
        out.push(current);
    }
    if out.is_empty() {
        out.push(String::new());
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn temp_output_dir() -> PathBuf {
        std::env::temp_dir().join(format!("resume-tailor-test-{}", Uuid::new_v4()))
    }

    #[test]
    fn wrap_preserves_short_lines() {
        assert_eq!(wrap_line("Core skills: Rust, Go", 90), vec!["Core skills: Rust, Go"]);
    }

    #[test]
    fn wrap_preserves_blank_lines() {
        assert_eq!(wrap_line("", 90), vec![""]);
        assert_eq!(wrap_line("   ", 90), vec![""]);
    }

    #[test]
    fn wrap_breaks_on_word_boundaries() {
        let chunks = wrap_line("one two three four", 9);
        assert_eq!(chunks, vec!["one two", "three", "four"]);
        for chunk in &chunks {
            assert!(chunk.chars().count() <= 9);
        }
    }

    #[test]
    fn wrap_hard_splits_oversized_tokens() {
        let chunks = wrap_line("aaaaaaaaaabbbbb", 10);
        assert_eq!(chunks, vec!["aaaaaaaaaa", "bbbbb"]);
    }

    #[tokio::test]
    async fn render_overwrites_previous_artifact() {
        let dir = temp_output_dir();
        let sid = "render-overwrite-test";

        let long_text = "Experienced backend engineer with Rust and Go.\n".repeat(200);
        let long_path = render_resume_pdf(&dir, sid, &long_text).await.unwrap();
        let long_len = tokio::fs::metadata(&long_path).await.unwrap().len();

        let short_path = render_resume_pdf(&dir, sid, "Short resume.").await.unwrap();
        assert_eq!(long_path, short_path);
        let short_len = tokio::fs::metadata(&short_path).await.unwrap().len();

        // Fully overwritten: the multi-page document must not leave residue.
        assert!(short_len < long_len);

        tokio::fs::remove_dir_all(&dir).await.unwrap();
    }

    #[tokio::test]
    async fn render_handles_empty_text() {
        let dir = temp_output_dir();
        let path = render_resume_pdf(&dir, "render-empty-test", "").await.unwrap();
        assert!(tokio::fs::metadata(&path).await.unwrap().len() > 0);
        tokio::fs::remove_dir_all(&dir).await.unwrap();
    }
}
