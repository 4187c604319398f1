pub mod apply;
pub mod compile;
pub mod new;
pub mod preview;
pub mod prompt;

pub use apply::{apply, ApplyArgs};
pub use compile::{compile, CompileArgs};
pub use new::{new, NewArgs};
pub use preview::{preview, PreviewArgs};
pub use prompt::{prompt, PromptArgs};

use anyhow::{Context, Result};
use pagekit_document::Document;
use std::fs;
use std::path::Path;

/// Suffix of page document files
pub const PAGE_SUFFIX: &str = ".page.json";

pub fn is_page_file(path: &Path) -> bool {
    path.file_name()
        .and_then(|name| name.to_str())
        .map(|name| name.ends_with(PAGE_SUFFIX))
        .unwrap_or(false)
}

/// File name without the page suffix
pub fn page_stem(path: &Path) -> String {
    let name = path.file_name().and_then(|n| n.to_str()).unwrap_or("page");
    name.strip_suffix(PAGE_SUFFIX)
        .or_else(|| name.strip_suffix(".json"))
        .unwrap_or(name)
        .to_string()
}

pub fn load_page(path: &Path) -> Result<Document> {
    let source = fs::read_to_string(path).with_context(|| format!("Cannot read {}", path.display()))?;
    Document::from_json(&source).with_context(|| format!("{} is not a page document", path.display()))
}

pub fn save_page(path: &Path, document: &Document) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, document.to_json_pretty()? + "\n")?;
    Ok(())
}
