//! Output directories and the flat-file JSON dump.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde_json::ser::Formatter;
use tracing::{debug, info};

use crate::error::{PipelineError, Result};

/// Create `dir` unless it already exists.
pub fn ensure_dir(dir: &Path) -> Result<()> {
    if !dir.is_dir() {
        fs::create_dir_all(dir).map_err(|e| PipelineError::io(dir, e))?;
        debug!("created directory {}", dir.display());
    }
    Ok(())
}

/// Single-line JSON with `", "` and `": "` separators.
struct SpacedFormatter;

impl Formatter for SpacedFormatter {
    fn begin_array_value<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        if first {
            Ok(())
        } else {
            writer.write_all(b", ")
        }
    }

    fn begin_object_key<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        if first {
            Ok(())
        } else {
            writer.write_all(b", ")
        }
    }

    fn begin_object_value<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        writer.write_all(b": ")
    }
}

/// Write `items` as a JSON array to `{data_dir}/{name}.txt`.
///
/// Non-ASCII text is written as-is rather than escaped.
pub fn dump_json_list<T: Serialize>(data_dir: &Path, name: &str, items: &[T]) -> Result<PathBuf> {
    ensure_dir(data_dir)?;
    let path = data_dir.join(format!("{name}.txt"));
    let mut buf = Vec::new();
    let mut serializer = serde_json::Serializer::with_formatter(&mut buf, SpacedFormatter);
    items
        .serialize(&mut serializer)
        .map_err(|source| PipelineError::Json {
            path: path.clone(),
            source,
        })?;
    fs::write(&path, buf).map_err(|e| PipelineError::io(&path, e))?;
    info!("wrote {} items to {}", items.len(), path.display());
    Ok(path)
}
