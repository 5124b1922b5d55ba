//! Rendering and writing of the job flow document.

use std::fs;
use std::path::Path;

use crate::error::Result;

use super::component::FlowSpec;

/// Renders the document as block-style YAML.
pub fn render(spec: &FlowSpec) -> Result<String> {
    Ok(serde_yaml::to_string(spec)?)
}

/// Writes the rendered document to `destination`; `None` or `-` means
/// standard output. Parent directories are created as needed.
pub fn save(spec: &FlowSpec, destination: Option<&str>) -> Result<()> {
    let rendered = render(spec)?;
    match destination {
        None | Some("-") => {
            // The extra newline after the document is part of the stdout
            // format consumers already scrape.
            println!("{rendered}");
            Ok(())
        }
        Some(path) => write_file(Path::new(path), &rendered),
    }
}

fn write_file(path: &Path, rendered: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    fs::write(path, rendered)?;
    Ok(())
}
