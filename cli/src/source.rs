use std::{
    fmt,
    fs::File,
    io::{self, BufReader, Read},
    path::{Path, PathBuf},
};
use tracing::instrument;
use vulncount_common::report::Report;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(
        "no report provided: use --input <PATH>, or pipe the report into standard input"
    )]
    MissingSource,
    #[error("failed to read report from {source_name}")]
    Io {
        source_name: String,
        #[source]
        source: io::Error,
    },
    #[error("failed to decode report from {source_name}")]
    Decode {
        source_name: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Where to read the report from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Source {
    Stdin,
    File(PathBuf),
}

impl Source {
    /// Determine the source from the `--input` argument.
    ///
    /// `-` means standard input. Without an argument standard input is used too, unless it is
    /// an interactive terminal, which can't provide a report.
    pub fn resolve(input: Option<&Path>, stdin_is_terminal: bool) -> Result<Self, Error> {
        match input {
            Some(path) if path == Path::new("-") => Ok(Self::Stdin),
            Some(path) => Ok(Self::File(path.to_path_buf())),
            None if stdin_is_terminal => Err(Error::MissingSource),
            None => Ok(Self::Stdin),
        }
    }

    #[instrument(err)]
    pub fn load(&self) -> Result<Report, Error> {
        match self {
            Self::Stdin => self.decode(io::stdin().lock()),
            Self::File(path) => {
                let file = File::open(path).map_err(|source| Error::Io {
                    source_name: self.to_string(),
                    source,
                })?;
                self.decode(BufReader::new(file))
            }
        }
    }

    /// Decode a report, in the name of this source.
    pub fn decode(&self, reader: impl Read) -> Result<Report, Error> {
        let report: Report = serde_json::from_reader(reader).map_err(|source| {
            if source.is_io() {
                Error::Io {
                    source_name: self.to_string(),
                    source: source.into(),
                }
            } else {
                Error::Decode {
                    source_name: self.to_string(),
                    source,
                }
            }
        })?;

        log::info!(
            "Loaded report from {self}: {} results, {} vulnerabilities",
            report.results().count(),
            report.vulnerabilities().count()
        );

        Ok(report)
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Stdin => f.write_str("standard input"),
            Self::File(path) => write!(f, "'{}'", path.display()),
        }
    }
}
