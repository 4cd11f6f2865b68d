// src/preview/mod.rs
//! In-terminal previews for documents found on the share.
use std::path::Path;

pub mod pdf;
pub mod text;

#[derive(Debug, Clone, PartialEq)]
pub struct Preview {
    pub title: String,
    pub lines: Vec<String>,
    pub scroll: u16,
}

impl Preview {
    pub fn new(title: impl Into<String>, content: &str) -> Self {
        Preview { title: title.into(), lines: content.lines().map(str::to_string).collect(), scroll: 0 }
    }

    pub fn scroll_down(&mut self) {
        let max = u16::try_from(self.lines.len().saturating_sub(1)).unwrap_or(u16::MAX);
        self.scroll = self.scroll.saturating_add(1).min(max);
    }

    pub fn scroll_up(&mut self) {
        self.scroll = self.scroll.saturating_sub(1);
    }
}

pub trait PreviewProvider {
    fn can_preview(&self, path: &Path) -> bool;
    fn generate_preview(&self, path: &Path) -> Result<String, String>;
}

pub struct PreviewManager {
    providers: Vec<Box<dyn PreviewProvider>>,
}

impl PreviewManager {
    /// A manager with no providers; every document goes to the external opener.
    pub fn empty() -> Self {
        PreviewManager { providers: Vec::new() }
    }

    pub fn new() -> Self {
        let mut manager = PreviewManager::empty();
        manager.register(Box::new(text::TextPreview::new()));
        manager.register(Box::new(pdf::PdfPreview::new()));
        manager
    }

    pub fn register(&mut self, provider: Box<dyn PreviewProvider>) {
        self.providers.push(provider);
    }

    pub fn get_preview(&self, path: &Path) -> Result<Preview, String> {
        let title = path.file_name().map(|n| n.to_string_lossy().to_string()).unwrap_or_default();
        for provider in &self.providers {
            if provider.can_preview(path) {
                return provider.generate_preview(path).map(|content| Preview::new(title, &content));
            }
        }
        Err("No preview provider available".to_string())
    }
}

impl Default for PreviewManager {
    fn default() -> Self {
        PreviewManager::new()
    }
}
