/*!
 * File classification: decides what happens to each discovered file
 */

use std::collections::HashMap;
use std::path::Path;

use once_cell::sync::Lazy;

use crate::config::Rules;
use crate::types::{extension_of, Classification, IgnoreReason};

/// Extension to MIME type
///
/// Covers every image, audio and font type of the usual desktop MIME map so
/// the media rule catches them before any content is read.
static MIME_TYPES: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        // Images
        (".png", "image/png"),
        (".jpg", "image/jpeg"),
        (".jpe", "image/jpeg"),
        (".jpeg", "image/jpeg"),
        (".gif", "image/gif"),
        (".bmp", "image/bmp"),
        (".webp", "image/webp"),
        (".avif", "image/avif"),
        (".heic", "image/heic"),
        (".heif", "image/heif"),
        (".ief", "image/ief"),
        (".jxl", "image/jxl"),
        (".ico", "image/vnd.microsoft.icon"),
        (".svg", "image/svg+xml"),
        (".tif", "image/tiff"),
        (".tiff", "image/tiff"),
        (".ras", "image/x-cmu-raster"),
        (".pnm", "image/x-portable-anymap"),
        (".pbm", "image/x-portable-bitmap"),
        (".pgm", "image/x-portable-graymap"),
        (".ppm", "image/x-portable-pixmap"),
        (".rgb", "image/x-rgb"),
        (".xbm", "image/x-xbitmap"),
        (".xpm", "image/x-xpixmap"),
        (".xwd", "image/x-xwindowdump"),
        // Audio
        (".mp2", "audio/mpeg"),
        (".mp3", "audio/mpeg"),
        (".wav", "audio/x-wav"),
        (".aif", "audio/x-aiff"),
        (".aifc", "audio/x-aiff"),
        (".aiff", "audio/x-aiff"),
        (".au", "audio/basic"),
        (".snd", "audio/basic"),
        (".ra", "audio/x-pn-realaudio"),
        (".ogg", "audio/ogg"),
        (".oga", "audio/ogg"),
        (".flac", "audio/flac"),
        (".m4a", "audio/mp4"),
        (".aac", "audio/aac"),
        (".adts", "audio/aac"),
        (".loas", "audio/aac"),
        (".ass", "audio/aac"),
        (".opus", "audio/opus"),
        (".weba", "audio/webm"),
        (".3gp", "audio/3gpp"),
        (".3gpp", "audio/3gpp"),
        (".3g2", "audio/3gpp2"),
        (".3gpp2", "audio/3gpp2"),
        (".mid", "audio/midi"),
        (".midi", "audio/midi"),
        // Fonts
        (".woff", "font/woff"),
        (".woff2", "font/woff2"),
        (".ttf", "font/ttf"),
        (".otf", "font/otf"),
        (".eot", "application/vnd.ms-fontobject"),
        // Video and documents
        (".mp4", "video/mp4"),
        (".webm", "video/webm"),
        (".mov", "video/quicktime"),
        (".pdf", "application/pdf"),
        (".zip", "application/zip"),
        // Text
        (".txt", "text/plain"),
        (".md", "text/markdown"),
        (".html", "text/html"),
        (".htm", "text/html"),
        (".css", "text/css"),
        (".csv", "text/csv"),
        (".js", "text/javascript"),
        (".mjs", "text/javascript"),
        (".json", "application/json"),
        (".xml", "application/xml"),
        (".yaml", "application/yaml"),
        (".yml", "application/yaml"),
        (".py", "text/x-python"),
        (".sh", "application/x-sh"),
    ])
});

/// Guess a MIME type from the file extension
pub fn guess_mime(path: &Path) -> Option<&'static str> {
    MIME_TYPES.get(extension_of(path).as_str()).copied()
}

/// Pure classifier over a borrowed rule table
pub struct Classifier<'a> {
    rules: &'a Rules,
}

impl<'a> Classifier<'a> {
    /// Create a classifier for the given rules
    pub fn new(rules: &'a Rules) -> Self {
        Self { rules }
    }

    /// Classify a file from its path and size
    ///
    /// Rules are evaluated in order and the first match wins. A missing size
    /// (failed stat) never counts as oversized.
    pub fn classify(&self, path: &Path, size: Option<u64>) -> Classification {
        if let Some(reason) = self.ignore_reason(path) {
            return Classification::Ignored(reason);
        }

        if let Some(size) = size {
            if size > self.rules.max_file_size {
                return Classification::TooLarge(size);
            }
        }

        if self.is_media(path) {
            return Classification::Media;
        }

        Classification::Included(self.language_tag(path).to_string())
    }

    /// Naming rule that excludes this file, if any
    pub fn ignore_reason(&self, path: &Path) -> Option<IgnoreReason> {
        let name = path
            .file_name()
            .unwrap_or_default()
            .to_string_lossy()
            .to_lowercase();

        if self.rules.ignored_exact_names.contains(&name) {
            return Some(IgnoreReason::ExactName);
        }

        if self
            .rules
            .ignored_suffixes
            .iter()
            .any(|suffix| name.ends_with(suffix.as_str()))
        {
            return Some(IgnoreReason::Suffix);
        }

        let stem = path
            .file_stem()
            .unwrap_or_default()
            .to_string_lossy()
            .to_lowercase();
        if self
            .rules
            .ignored_substrings
            .iter()
            .any(|needle| stem.contains(needle.as_str()))
        {
            return Some(IgnoreReason::Substring);
        }

        if self.is_font(path) {
            return Some(IgnoreReason::Font);
        }

        None
    }

    fn is_font(&self, path: &Path) -> bool {
        if guess_mime(path).is_some_and(|mime| self.rules.font_mimes.contains(mime)) {
            return true;
        }
        self.rules.font_extensions.contains(&extension_of(path))
    }

    /// Whether the guessed MIME type carries a media prefix
    pub fn is_media(&self, path: &Path) -> bool {
        guess_mime(path).is_some_and(|mime| {
            self.rules
                .media_prefixes
                .iter()
                .any(|prefix| mime.starts_with(prefix.as_str()))
        })
    }

    /// Syntax hint for a path, empty when the extension is unmapped
    pub fn language_tag(&self, path: &Path) -> &str {
        self.rules
            .languages
            .get(&extension_of(path))
            .map(String::as_str)
            .unwrap_or("")
    }

    /// Whether a file is rendered inside a collapsible block
    pub fn is_collapsible(&self, rel_path: &str) -> bool {
        let ext = extension_of(Path::new(rel_path));
        self.rules.collapsible_extensions.contains(&ext)
            || self
                .rules
                .collapsible_paths
                .iter()
                .any(|part| rel_path.contains(part.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classify(name: &str, size: u64) -> Classification {
        let rules = Rules::default();
        Classifier::new(&rules).classify(Path::new(name), Some(size))
    }

    #[test]
    fn test_minified_suffix_ignored() {
        assert_eq!(
            classify("static/jquery.min.js", 10 * 1024),
            Classification::Ignored(IgnoreReason::Suffix)
        );
        assert_eq!(
            classify("APP.MIN.CSS", 10),
            Classification::Ignored(IgnoreReason::Suffix)
        );
    }

    #[test]
    fn test_exact_name_beats_other_rules() {
        assert_eq!(
            classify("TSConfig.tsbuildinfo", 10 * 1024 * 1024),
            Classification::Ignored(IgnoreReason::ExactName)
        );
    }

    #[test]
    fn test_stem_substring() {
        assert_eq!(
            classify("package-lock.json", 100),
            Classification::Ignored(IgnoreReason::Substring)
        );
        assert_eq!(
            classify("vendor/jquery-3.7.js", 100),
            Classification::Ignored(IgnoreReason::Substring)
        );
        // Only the stem is searched, not the extension or directories
        assert_eq!(
            classify("yarn/readme.md", 100),
            Classification::Included("md".to_string())
        );
    }

    #[test]
    fn test_fonts_by_extension_and_mime() {
        assert_eq!(
            classify("fonts/inter.woff2", 100),
            Classification::Ignored(IgnoreReason::Font)
        );
        assert_eq!(
            classify("fonts/legacy.pfb", 100),
            Classification::Ignored(IgnoreReason::Font)
        );
        assert_eq!(
            classify("fonts/icons.eot", 100),
            Classification::Ignored(IgnoreReason::Font)
        );
    }

    #[test]
    fn test_oversized() {
        let size = 6 * 1024 * 1024;
        assert_eq!(classify("src/main.rs", size), Classification::TooLarge(6291456));
        // Size ceiling is checked before the media prefix
        assert_eq!(classify("photo.png", size), Classification::TooLarge(size));
        // Exactly at the ceiling is still fine
        assert_eq!(
            classify("src/main.rs", 5 * 1024 * 1024),
            Classification::Included("rust".to_string())
        );
    }

    #[test]
    fn test_stat_failure_fails_open() {
        let rules = Rules::default();
        let result = Classifier::new(&rules).classify(Path::new("lib.py"), None);
        assert_eq!(result, Classification::Included("python".to_string()));
    }

    #[test]
    fn test_media() {
        assert_eq!(classify("logo.PNG", 100), Classification::Media);
        assert_eq!(classify("sound.mp3", 100), Classification::Media);
        assert_eq!(classify("icon.svg", 100), Classification::Media);
    }

    #[test]
    fn test_less_common_media_extensions() {
        for name in [
            "a.jpe", "a.heif", "a.aiff", "a.au", "a.xbm", "a.ppm", "a.pnm", "a.weba", "a.mp2",
            "a.XPM", "a.pgm", "a.3gp",
        ] {
            assert_eq!(classify(name, 10), Classification::Media, "{}", name);
        }
    }

    #[test]
    fn test_language_tags() {
        assert_eq!(classify("a/b.tsx", 1), Classification::Included("tsx".into()));
        assert_eq!(classify("notes.txt", 1), Classification::Included(String::new()));
        assert_eq!(classify("Makefile", 1), Classification::Included(String::new()));
        assert_eq!(classify("query.SQL", 1), Classification::Included("sql".into()));
    }

    #[test]
    fn test_collapsible() {
        let rules = Rules::default();
        let classifier = Classifier::new(&rules);
        assert!(classifier.is_collapsible("package.json"));
        assert!(classifier.is_collapsible("styles/Main.CSS"));
        assert!(classifier.is_collapsible("src/components/ui/button.tsx"));
        assert!(!classifier.is_collapsible("src/components/button.tsx"));
    }
}
