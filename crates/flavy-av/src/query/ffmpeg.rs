//! Query runner backed by the ffmpeg CLI.

use super::{parse_query_output, QueryKind, QueryResult, QueryRunner};
use crate::command::{ToolCommand, DEFAULT_TIMEOUT};
use crate::Result;
use std::path::Path;
use std::time::Duration;

/// Runs `<engine> -hide_banner -formats|-encoders|-decoders` and parses the
/// listing from stdout.
#[derive(Debug, Clone)]
pub struct FfmpegQueryRunner {
    timeout: Duration,
}

impl FfmpegQueryRunner {
    pub fn new() -> Self {
        Self {
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Bound each query to `timeout`.
    pub fn with_timeout(timeout: Duration) -> Self {
        Self { timeout }
    }
}

impl Default for FfmpegQueryRunner {
    fn default() -> Self {
        Self::new()
    }
}

impl QueryRunner for FfmpegQueryRunner {
    fn run(&self, kind: QueryKind, engine_path: &Path) -> Result<QueryResult> {
        tracing::debug!(query = %kind, engine = %engine_path.display(), "running capability query");

        let output = ToolCommand::new(engine_path)
            .args(["-hide_banner", kind.flag()])
            .timeout(self.timeout)
            .execute()?;

        parse_query_output(kind, &output.stdout)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;

    #[test]
    fn test_missing_engine_is_tool_not_found() {
        let runner = FfmpegQueryRunner::new();
        let err = runner
            .run(QueryKind::Formats, Path::new("nonexistent_ffmpeg_12345"))
            .unwrap_err();
        assert!(matches!(err, Error::ToolNotFound { .. }));
    }

    #[cfg(unix)]
    #[test]
    fn test_runs_engine_and_parses_stdout() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let engine = dir.path().join("fake-ffmpeg");
        std::fs::write(
            &engine,
            "#!/bin/sh\n\
             [ \"$1\" = \"-hide_banner\" ] || exit 2\n\
             [ \"$2\" = \"-encoders\" ] || exit 3\n\
             printf 'Encoders:\\n V..... = Video\\n ------\\n A....D aac   AAC\\n V....D mpeg4 MPEG-4\\n'\n",
        )
        .unwrap();
        std::fs::set_permissions(&engine, std::fs::Permissions::from_mode(0o755)).unwrap();

        let result = FfmpegQueryRunner::with_timeout(Duration::from_secs(10))
            .run(QueryKind::Encoders, &engine)
            .unwrap();
        assert_eq!(result.column("format").unwrap(), ["aac", "mpeg4"]);
        assert_eq!(result.column("type").unwrap(), ["A", "V"]);
    }
}
