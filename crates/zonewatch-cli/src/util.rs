use std::{
    fs::File,
    io::{self, BufReader, BufWriter, StdoutLock, Write as _},
    path::{Path, PathBuf},
};

use anyhow::Context;
use serde::{Serialize, de::DeserializeOwned};
use zonewatch_analysis::heatmap::MapProjection;
use zonewatch_core::GeometricBoundary;

/// Destination of a command's JSON result.
#[derive(Debug)]
pub enum Output {
    Stdout(StdoutLock<'static>),
    File {
        writer: BufWriter<File>,
        path: PathBuf,
    },
}

impl Output {
    /// Writes `value` as pretty JSON to `output_path`, or to stdout if unset.
    pub fn save_json<T>(value: &T, output_path: Option<PathBuf>) -> anyhow::Result<()>
    where
        T: Serialize,
    {
        let mut output = match output_path {
            Some(path) => Output::create(path)?,
            None => Output::Stdout(io::stdout().lock()),
        };
        output
            .write_json(value)
            .with_context(|| format!("Failed to write JSON to {}", output.describe()))?;
        if let Output::File { path, .. } = &output {
            tracing::info!(path = %path.display(), "wrote JSON output");
        }
        Ok(())
    }

    fn create(path: PathBuf) -> anyhow::Result<Self> {
        let file = File::create(&path)
            .with_context(|| format!("Failed to create output file: {}", path.display()))?;
        Ok(Output::File {
            writer: BufWriter::new(file),
            path,
        })
    }

    fn describe(&self) -> String {
        match self {
            Output::Stdout(_) => "stdout".to_owned(),
            Output::File { path, .. } => path.display().to_string(),
        }
    }

    fn write_json<T>(&mut self, value: &T) -> io::Result<()>
    where
        T: Serialize,
    {
        serde_json::to_writer_pretty(&mut *self, value)?;
        writeln!(self)?;
        self.flush()
    }
}

impl io::Write for Output {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            Output::Stdout(writer) => writer.write(buf),
            Output::File { writer, .. } => writer.write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            Output::Stdout(writer) => writer.flush(),
            Output::File { writer, .. } => writer.flush(),
        }
    }
}

pub fn read_json_file<T, P>(file_kind: &str, path: P) -> anyhow::Result<T>
where
    T: DeserializeOwned,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let file = File::open(path)
        .with_context(|| format!("Failed to open {file_kind} file: {}", path.display()))?;
    let value = serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("Failed to parse {file_kind} JSON file: {}", path.display()))?;
    tracing::debug!(path = %path.display(), file_kind, "read JSON file");
    Ok(value)
}

/// Read a boundary (`XY` vertices and `Z` interval) from a JSON file
///
/// Vertex count, finiteness and altitude order are validated while parsing.
pub fn read_boundary_file<P>(path: P) -> anyhow::Result<GeometricBoundary>
where
    P: AsRef<Path>,
{
    read_json_file("boundary", path)
}

/// Read a map projection profile from a JSON file
///
/// Missing fields fall back to the `de_overpass` radar values.
pub fn read_map_profile<P>(path: P) -> anyhow::Result<MapProjection>
where
    P: AsRef<Path>,
{
    read_json_file("map profile", path)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("zonewatch-cli-test-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        dir.join(name)
    }

    #[test]
    fn test_boundary_file_round_trip_through_output() {
        let path = temp_path("boundary.json");
        let boundary: GeometricBoundary =
            serde_json::from_str(r#"{"XY": [[0, 0], [4, 0], [0, 4]], "Z": [1, 2]}"#).unwrap();
        Output::save_json(&boundary, Some(path.clone())).unwrap();
        assert_eq!(read_boundary_file(&path).unwrap(), boundary);
    }

    #[test]
    fn test_invalid_boundary_file_is_rejected() {
        let path = temp_path("inverted.json");
        std::fs::write(&path, r#"{"XY": [[0, 0], [4, 0], [0, 4]], "Z": [5, 2]}"#).unwrap();
        let err = read_boundary_file(&path).unwrap_err();
        assert!(err.to_string().contains("boundary"));
    }

    #[test]
    fn test_missing_map_profile() {
        assert!(read_map_profile("/nonexistent/zonewatch/map.json").is_err());
    }
}
