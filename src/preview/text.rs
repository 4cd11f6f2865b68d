// src/preview/text.rs
use super::*;
use std::fs;

pub struct TextPreview {
    max_lines: usize,
    max_width: usize,
}

impl TextPreview {
    pub fn new() -> Self {
        TextPreview { max_lines: 500, max_width: 200 }
    }
}

impl PreviewProvider for TextPreview {
    fn can_preview(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase() == "txt")
            .unwrap_or(false)
    }

    fn generate_preview(&self, path: &Path) -> Result<String, String> {
        let bytes = fs::read(path).map_err(|e| e.to_string())?;
        let content = String::from_utf8_lossy(&bytes);
        let lines: Vec<String> = content.lines()
            .take(self.max_lines)
            .map(|l| l.chars().take(self.max_width).collect())
            .collect();
        Ok(lines.join("\n"))
    }
}
