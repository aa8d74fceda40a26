//! Attachment staging: inline base64 image payloads become temp files that
//! can be handed to the CLI as `--file` arguments.

use std::io::Write;
use std::path::Path;

use base64::{Engine as _, engine::general_purpose::STANDARD};
use tempfile::NamedTempFile;
use tracing::{debug, warn};

/// Temp files staged for a single invocation.
///
/// The invocation that stages attachments owns them exclusively; dropping
/// this value removes every staged file, on success, failure and panic alike.
pub struct StagedAttachments {
    files: Vec<NamedTempFile>,
}

impl StagedAttachments {
    /// Decode and write each payload to its own uniquely named temp file.
    ///
    /// A payload that fails to decode, or a file that cannot be created or
    /// written, is skipped: the remaining attachments and the prompt still
    /// proceed. Content type and size are not inspected.
    pub fn stage(images: &[String]) -> Self {
        let mut files = Vec::with_capacity(images.len());

        for (index, encoded) in images.iter().enumerate() {
            let data = match STANDARD.decode(encoded) {
                Ok(data) => data,
                Err(e) => {
                    warn!(index, error = %e, "Skipping attachment that failed to decode");
                    continue;
                }
            };

            match Self::write_temp(&data) {
                Ok(file) => {
                    debug!(index, path = %file.path().display(), bytes = data.len(), "Staged attachment");
                    files.push(file);
                }
                Err(e) => {
                    warn!(index, error = %e, "Skipping attachment that could not be written");
                }
            }
        }

        Self { files }
    }

    fn write_temp(data: &[u8]) -> std::io::Result<NamedTempFile> {
        let mut file = tempfile::Builder::new()
            .prefix("qllama-attach-")
            .suffix(".png")
            .tempfile()?;
        file.write_all(data)?;
        Ok(file)
    }

    /// Paths of the successfully staged files, in input order.
    pub fn paths(&self) -> impl Iterator<Item = &Path> {
        self.files.iter().map(|file| file.path())
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn stages_decodable_payloads() {
        let payload = STANDARD.encode(b"fake png bytes");
        let staged = StagedAttachments::stage(&[payload]);

        assert_eq!(staged.len(), 1);
        let path = staged.paths().next().unwrap();
        assert_eq!(std::fs::read(path).unwrap(), b"fake png bytes");
    }

    #[test]
    fn skips_invalid_payloads_without_failing() {
        let good = STANDARD.encode(b"ok");
        let staged = StagedAttachments::stage(&[
            "not base64 at all!!!".to_string(),
            good,
            "%%%".to_string(),
        ]);

        assert_eq!(staged.len(), 1);
    }

    #[test]
    fn no_attachments_stages_nothing() {
        let staged = StagedAttachments::stage(&[]);
        assert!(staged.is_empty());
    }

    #[test]
    fn files_are_removed_on_drop() {
        let payloads: Vec<String> = (0..3).map(|i| STANDARD.encode(format!("img-{i}"))).collect();
        let staged = StagedAttachments::stage(&payloads);
        let paths: Vec<PathBuf> = staged.paths().map(Path::to_path_buf).collect();
        assert_eq!(paths.len(), 3);
        assert!(paths.iter().all(|p| p.exists()));

        drop(staged);
        assert!(paths.iter().all(|p| !p.exists()));
    }

    #[test]
    fn staged_names_do_not_collide() {
        let payload = STANDARD.encode(b"same bytes");
        let a = StagedAttachments::stage(std::slice::from_ref(&payload));
        let b = StagedAttachments::stage(std::slice::from_ref(&payload));

        let path_a = a.paths().next().unwrap();
        let path_b = b.paths().next().unwrap();
        assert_ne!(path_a, path_b);
    }
}
