//! Knowledge file attachments and prompt composition.

use std::path::Path;

use metaprompt_config::AttachmentConfig;

use crate::strings::Strings;

#[derive(Debug, thiserror::Error)]
pub enum AttachmentError {
    #[error("file is {size} bytes, limit is {limit}")]
    TooLarge { size: u64, limit: u64 },
    #[error("unsupported file type: {0}")]
    UnsupportedType(String),
    #[error("file is not valid UTF-8 text")]
    NotText,
    #[error("cannot read file: {0}")]
    Io(#[from] std::io::Error),
}

/// A text file waiting to be sent with the next prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attachment {
    name: String,
    content: String,
}

impl Attachment {
    /// Read `path`, enforcing the extension whitelist and size limit.
    pub fn load(path: &Path, config: &AttachmentConfig) -> Result<Self, AttachmentError> {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());

        let extension = path
            .extension()
            .map(|e| e.to_string_lossy().to_ascii_lowercase())
            .unwrap_or_default();
        if !config.allowed_extensions.iter().any(|e| *e == extension) {
            return Err(AttachmentError::UnsupportedType(name));
        }

        let size = std::fs::metadata(path)?.len();
        if size > config.max_bytes {
            return Err(AttachmentError::TooLarge {
                size,
                limit: config.max_bytes,
            });
        }

        let bytes = std::fs::read(path)?;
        let content = String::from_utf8(bytes).map_err(|_| AttachmentError::NotText)?;
        Ok(Self { name, content })
    }

    #[cfg(test)]
    pub fn from_text(name: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            content: content.into(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn size(&self) -> usize {
        self.content.len()
    }
}

/// What the transcript shows and what the model receives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComposedPrompt {
    pub display: String,
    pub prompt: String,
}

pub fn compose(text: &str, attachment: Option<&Attachment>, strings: &Strings) -> ComposedPrompt {
    let Some(file) = attachment else {
        return ComposedPrompt {
            display: text.to_string(),
            prompt: text.to_string(),
        };
    };

    let display = format!(
        "{text}\n\n📎 [{}: {}]",
        strings.attachment_marker,
        file.name()
    );
    let prompt = format!(
        "{text}\n\n---\n{}\n{}\n\n{}: {}\n{}:\n{}\n---",
        strings.file_analysis_header,
        strings.file_analysis_instruction,
        strings.file_name_label,
        file.name(),
        strings.file_content_label,
        file.content(),
    );
    ComposedPrompt { display, prompt }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::strings::EN;

    fn write(dir: &tempfile::TempDir, name: &str, content: &[u8]) -> std::path::PathBuf {
        let path = dir.path().join(name);
        std::fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn loads_allowed_text_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(&dir, "notes.MD", b"# Notes\nremember the milk");
        let file = Attachment::load(&path, &AttachmentConfig::default()).unwrap();
        assert_eq!(file.name(), "notes.MD");
        assert_eq!(file.content(), "# Notes\nremember the milk");
    }

    #[test]
    fn rejects_unknown_extension() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(&dir, "image.png", b"\x89PNG");
        let err = Attachment::load(&path, &AttachmentConfig::default()).unwrap_err();
        assert!(matches!(err, AttachmentError::UnsupportedType(name) if name == "image.png"));
    }

    #[test]
    fn rejects_file_without_extension() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(&dir, "Makefile", b"all:");
        assert!(matches!(
            Attachment::load(&path, &AttachmentConfig::default()),
            Err(AttachmentError::UnsupportedType(_))
        ));
    }

    #[test]
    fn rejects_oversized_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(&dir, "big.txt", &[b'a'; 64]);
        let config = AttachmentConfig {
            max_bytes: 32,
            ..AttachmentConfig::default()
        };
        let err = Attachment::load(&path, &config).unwrap_err();
        assert!(matches!(err, AttachmentError::TooLarge { size: 64, limit: 32 }));
    }

    #[test]
    fn rejects_binary_content() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(&dir, "data.csv", &[0xff, 0xfe, 0x00, 0x80]);
        assert!(matches!(
            Attachment::load(&path, &AttachmentConfig::default()),
            Err(AttachmentError::NotText)
        ));
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("gone.txt");
        assert!(matches!(
            Attachment::load(&path, &AttachmentConfig::default()),
            Err(AttachmentError::Io(_))
        ));
    }

    #[test]
    fn compose_without_attachment_is_plain() {
        let composed = compose("hello", None, &EN);
        assert_eq!(composed.display, "hello");
        assert_eq!(composed.prompt, "hello");
    }

    #[test]
    fn compose_embeds_name_and_content() {
        let file = Attachment::from_text("plan.txt", "step one\nstep two");
        let composed = compose("improve this", Some(&file), &EN);

        assert!(composed.display.starts_with("improve this"));
        assert!(composed.display.contains("plan.txt"));
        assert!(!composed.display.contains("step one"));

        assert!(composed.prompt.starts_with("improve this\n\n---\n"));
        assert!(composed.prompt.contains(EN.file_analysis_instruction));
        assert!(composed.prompt.contains("File name: plan.txt"));
        assert!(composed.prompt.contains("step one\nstep two"));
        assert!(composed.prompt.ends_with("---"));
    }
}
