//! Parallel batch conversion using Rayon.
//!
//! Each conversion is independent and single-threaded internally; only the
//! fan-out across input files is parallel.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Result};
use rayon::prelude::*;

use crate::config::RenderConfig;
use crate::render;

/// Outcome of one file in a batch run.
#[derive(Debug)]
pub struct BatchResult {
    pub input: PathBuf,
    pub output: PathBuf,
    pub result: Result<()>,
}

/// Convert many markdown files into `out_dir`, in parallel.
///
/// Output names are the input stems with a `.pdf` extension. Failures are
/// reported per file; one bad input does not abort the batch.
pub fn convert_files_parallel<P: AsRef<Path> + Sync>(
    inputs: &[P],
    out_dir: &Path,
    config: &RenderConfig,
) -> Vec<BatchResult> {
    inputs
        .par_iter()
        .map(|input| {
            let input = input.as_ref().to_path_buf();
            let stem = input
                .file_stem()
                .map(|s| s.to_string_lossy().to_string())
                .unwrap_or_else(|| "output".to_string());
            let output = out_dir.join(format!("{}.pdf", stem));
            let result = render::convert_file(&input, &output, config, None);
            BatchResult { input, output, result }
        })
        .collect()
}

/// Convert in-memory markdown documents in parallel, keyed by name.
///
/// # Example
/// ```rust
/// use std::collections::HashMap;
/// use mdpress::{parallel, RenderConfig};
///
/// let inputs = HashMap::from([
///     ("a.md".to_string(), "# Doc A".to_string()),
///     ("b.md".to_string(), "# Doc B".to_string()),
/// ]);
/// let results = parallel::convert_markdown_parallel(&inputs, &RenderConfig::default());
/// assert_eq!(results.unwrap().len(), 2);
/// ```
pub fn convert_markdown_parallel(
    inputs: &HashMap<String, String>,
    config: &RenderConfig,
) -> Result<HashMap<String, Vec<u8>>> {
    inputs
        .par_iter()
        .map(|(name, markdown)| {
            render::convert(markdown, config)
                .map(|bytes| (name.clone(), bytes))
                .map_err(|e| anyhow!("failed to convert {}: {}", name, e))
        })
        .collect()
}
