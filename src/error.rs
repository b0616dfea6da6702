use std::path::PathBuf;

use thiserror::Error;

/// Failures while turning a problem description into files on disk.
#[derive(Debug, Error)]
pub enum ScaffoldError {
    /// The problem cannot be mapped onto a directory layout
    #[error("Invalid problem: {0}")]
    InvalidProblem(String),

    /// A path segment exists but is something other than a directory
    #[error("Not a directory: {}", .0.display())]
    NotADirectory(PathBuf),

    #[error("IO error at {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ScaffoldError {
    pub fn invalid(msg: impl Into<String>) -> Self {
        Self::InvalidProblem(msg.into())
    }

    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, ScaffoldError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_problem_message() {
        let err = ScaffoldError::invalid("group has no contest name");
        assert_eq!(err.to_string(), "Invalid problem: group has no contest name");
    }

    #[test]
    fn test_not_a_directory_message() {
        let err = ScaffoldError::NotADirectory(PathBuf::from("/tmp/cf/Codeforces"));
        assert_eq!(err.to_string(), "Not a directory: /tmp/cf/Codeforces");
    }

    #[test]
    fn test_io_error_keeps_path_and_source() {
        let source = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err = ScaffoldError::io("/root/1.in", source);
        assert_eq!(err.to_string(), "IO error at /root/1.in: denied");
        assert!(std::error::Error::source(&err).is_some());
    }
}
