// SPDX-FileCopyrightText: © Siemens AG
// SPDX-License-Identifier: Apache-2.0

//! Rewrites inline base64 PNG images in element descriptions to files on
//! disk, so fragments stay readable and the YAML stays small.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use regex::Regex;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

fn inline_png() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r#"src="data:image/png;base64,([^"]+)""#).unwrap()
    })
}

fn image_index(file_name: &str) -> Option<usize> {
    let digits = file_name.strip_prefix("img_")?.strip_suffix(".png")?;
    digits.parse().ok()
}

#[derive(Debug)]
pub enum SanitizeError {
    CreateDir { path: PathBuf, source: io::Error },
    ScanDir { path: PathBuf, source: io::Error },
    WriteImage { path: PathBuf, source: io::Error },
}

impl std::fmt::Display for SanitizeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SanitizeError::CreateDir { path, .. } => {
                write!(f, "failed to create image directory {}", path.display())
            }
            SanitizeError::ScanDir { path, .. } => {
                write!(f, "failed to scan image directory {}", path.display())
            }
            SanitizeError::WriteImage { path, .. } => {
                write!(f, "failed to write image {}", path.display())
            }
        }
    }
}

impl std::error::Error for SanitizeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SanitizeError::CreateDir { source, .. }
            | SanitizeError::ScanDir { source, .. }
            | SanitizeError::WriteImage { source, .. } => Some(source),
        }
    }
}

/// Extracts embedded PNGs from HTML descriptions into `img_<n>.png` files.
///
/// Numbering starts at `img_1.png` and continues past any images already
/// present in the directory, so repeated exports never overwrite earlier
/// extractions.
#[derive(Debug)]
pub struct ImageSanitizer {
    dir: PathBuf,
    next_index: usize,
    written: usize,
}

impl ImageSanitizer {
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self, SanitizeError> {
        let dir = dir.into();
        fs::create_dir_all(&dir).map_err(|source| SanitizeError::CreateDir {
            path: dir.clone(),
            source,
        })?;
        let next_index = next_free_index(&dir)?;
        Ok(ImageSanitizer {
            dir,
            next_index,
            written: 0,
        })
    }

    /// Number of images written by this sanitizer instance.
    pub fn images_written(&self) -> usize {
        self.written
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Replaces every decodable inline PNG with a file reference. An image
    /// that fails to decode stays inline; failing to write a decoded image
    /// is an error.
    pub fn sanitize(&mut self, html: &str) -> Result<String, SanitizeError> {
        let mut out = String::with_capacity(html.len());
        let mut last = 0;
        for caps in inline_png().captures_iter(html) {
            let (Some(whole), Some(payload)) = (caps.get(0), caps.get(1)) else {
                continue;
            };
            out.push_str(&html[last..whole.start()]);
            last = whole.end();

            let compact: String = payload
                .as_str()
                .chars()
                .filter(|c| !c.is_whitespace())
                .collect();
            match BASE64.decode(compact.as_bytes()) {
                Ok(bytes) => {
                    let file_name = format!("img_{}.png", self.next_index);
                    let path = self.dir.join(&file_name);
                    fs::write(&path, bytes)
                        .map_err(|source| SanitizeError::WriteImage { path, source })?;
                    self.next_index += 1;
                    self.written += 1;
                    out.push_str(&format!("src=\"{file_name}\""));
                }
                Err(err) => {
                    tracing::warn!(error = %err, "undecodable inline image left as-is");
                    out.push_str(whole.as_str());
                }
            }
        }
        out.push_str(&html[last..]);
        Ok(out)
    }
}

fn next_free_index(dir: &Path) -> Result<usize, SanitizeError> {
    let entries = fs::read_dir(dir).map_err(|source| SanitizeError::ScanDir {
        path: dir.to_path_buf(),
        source,
    })?;
    let mut next = 1;
    for entry in entries {
        let entry = entry.map_err(|source| SanitizeError::ScanDir {
            path: dir.to_path_buf(),
            source,
        })?;
        if let Some(index) = entry.file_name().to_str().and_then(image_index) {
            next = next.max(index + 1);
        }
    }
    Ok(next)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::fs;
    use std::path::PathBuf;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct TempDir(PathBuf);

    impl TempDir {
        fn new(label: &str) -> Self {
            static COUNTER: AtomicUsize = AtomicUsize::new(0);
            let n = COUNTER.fetch_add(1, Ordering::Relaxed);
            let path = env::temp_dir().join(format!(
                "capella-export-sanitize-{label}-{}-{n}",
                std::process::id()
            ));
            fs::create_dir_all(&path).unwrap();
            TempDir(path)
        }
    }

    impl Drop for TempDir {
        fn drop(&mut self) {
            let _ = fs::remove_dir_all(&self.0);
        }
    }

    const PNG_BYTES: &[u8] = &[0x89, b'P', b'N', b'G', 0x0d, 0x0a, 0x1a, 0x0a, 0, 0, 0, 0];

    #[test]
    fn inline_png_is_extracted_and_bytes_survive() {
        let tmp = TempDir::new("extract");
        let mut sanitizer = ImageSanitizer::new(&tmp.0).unwrap();

        let encoded = BASE64.encode(PNG_BYTES);
        let html = format!("<p>before</p><img src=\"data:image/png;base64,{encoded}\"/>after");
        let out = sanitizer.sanitize(&html).unwrap();

        assert!(out.contains("src=\"img_1.png\""));
        assert!(!out.contains("base64"));
        assert_eq!(fs::read(tmp.0.join("img_1.png")).unwrap(), PNG_BYTES);
        assert_eq!(sanitizer.images_written(), 1);
    }

    #[test]
    fn numbering_continues_past_existing_images() {
        let tmp = TempDir::new("resume");
        fs::write(tmp.0.join("img_0.png"), b"x").unwrap();
        fs::write(tmp.0.join("img_7.png"), b"x").unwrap();
        let mut sanitizer = ImageSanitizer::new(&tmp.0).unwrap();

        let encoded = BASE64.encode(PNG_BYTES);
        let html = format!("<img src=\"data:image/png;base64,{encoded}\"/>");
        let out = sanitizer.sanitize(&html).unwrap();
        assert!(out.contains("src=\"img_8.png\""));
    }

    #[test]
    fn undecodable_image_stays_inline() {
        let tmp = TempDir::new("bad");
        let mut sanitizer = ImageSanitizer::new(&tmp.0).unwrap();

        let html = "<img src=\"data:image/png;base64,@@not-base64@@\"/>";
        let out = sanitizer.sanitize(html).unwrap();
        assert_eq!(out, html);
        assert_eq!(sanitizer.images_written(), 0);
    }

    #[test]
    fn text_without_images_passes_through() {
        let tmp = TempDir::new("plain");
        let mut sanitizer = ImageSanitizer::new(&tmp.0).unwrap();
        let out = sanitizer.sanitize("<p>no images here</p>").unwrap();
        assert_eq!(out, "<p>no images here</p>");
    }
}
