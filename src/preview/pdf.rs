// src/preview/pdf.rs
use super::*;
use std::process::Command;

pub struct PdfPreview {
    max_pages: usize,
}

impl PdfPreview {
    pub fn new() -> Self {
        PdfPreview { max_pages: 3 }
    }
}

impl PreviewProvider for PdfPreview {
    fn can_preview(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase() == "pdf")
            .unwrap_or(false)
    }

    fn generate_preview(&self, path: &Path) -> Result<String, String> {
        let tool = which::which("pdftotext").map_err(|_| "pdftotext not found".to_string())?;
        let output = Command::new(tool)
            .args(["-l", &self.max_pages.to_string()])
            .arg(path)
            .arg("-")
            .output()
            .map_err(|e| e.to_string())?;

        if !output.status.success() {
            return Err(format!("pdftotext failed: {}", String::from_utf8_lossy(&output.stderr).trim()));
        }
        Ok(String::from_utf8_lossy(&output.stdout).to_string())
    }
}
