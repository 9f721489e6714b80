#![warn(missing_docs)]
//! `notepad-lang` - data-driven language detection helpers for `notepad-core`.
//!
//! This crate intentionally stays lightweight and does **not** depend on any parsing or
//! highlighting systems. It answers exactly one question: given a file path, which language
//! (if any) does the file appear to be written in? Hosts use the answer to decide whether
//! syntax highlighting should be enabled for a document; the actual coloring rules live in
//! the host, not here.
//!
//! Detection is by file extension only. Paths without a recognized extension, including the
//! synthetic names used for unsaved documents (`"Unsaved Document 1"`), yield `None`.

use std::path::Path;

/// Static description of a recognized language.
#[derive(Debug, PartialEq, Eq)]
pub struct LanguageInfo {
    /// Stable machine identifier (e.g. `"rust"`).
    pub id: &'static str,
    /// Human-readable name (e.g. `"Rust"`).
    pub name: &'static str,
    /// File extensions claimed by this language, lowercase, without the leading dot.
    pub extensions: &'static [&'static str],
}

static LANGUAGES: &[LanguageInfo] = &[
    LanguageInfo {
        id: "c",
        name: "C",
        extensions: &["c", "h"],
    },
    LanguageInfo {
        id: "cpp",
        name: "C++",
        extensions: &["cc", "cpp", "cxx", "hpp", "hxx"],
    },
    LanguageInfo {
        id: "css",
        name: "CSS",
        extensions: &["css"],
    },
    LanguageInfo {
        id: "html",
        name: "HTML",
        extensions: &["htm", "html", "xhtml"],
    },
    LanguageInfo {
        id: "ini",
        name: "INI",
        extensions: &["cfg", "conf", "ini"],
    },
    LanguageInfo {
        id: "javascript",
        name: "JavaScript",
        extensions: &["cjs", "js", "mjs"],
    },
    LanguageInfo {
        id: "json",
        name: "JSON",
        extensions: &["json"],
    },
    LanguageInfo {
        id: "markdown",
        name: "Markdown",
        extensions: &["markdown", "md"],
    },
    LanguageInfo {
        id: "python",
        name: "Python",
        extensions: &["py", "pyi", "pyw"],
    },
    LanguageInfo {
        id: "rust",
        name: "Rust",
        extensions: &["rs"],
    },
    LanguageInfo {
        id: "shell",
        name: "Shell",
        extensions: &["bash", "sh", "zsh"],
    },
    LanguageInfo {
        id: "toml",
        name: "TOML",
        extensions: &["toml"],
    },
    LanguageInfo {
        id: "xml",
        name: "XML",
        extensions: &["xml", "xsd", "xsl"],
    },
    LanguageInfo {
        id: "yaml",
        name: "YAML",
        extensions: &["yaml", "yml"],
    },
];

/// All recognized languages, sorted by id.
pub fn languages() -> &'static [LanguageInfo] {
    LANGUAGES
}

/// Look up a language by its stable id.
pub fn language_by_id(id: &str) -> Option<&'static LanguageInfo> {
    LANGUAGES.iter().find(|lang| lang.id == id)
}

/// Guess the language of a file from its path.
///
/// Matching is case-insensitive on the extension. Returns `None` for paths without an
/// extension or with an extension no registered language claims.
pub fn guess_language(path: &Path) -> Option<&'static LanguageInfo> {
    let extension = path.extension()?.to_str()?.to_ascii_lowercase();
    LANGUAGES
        .iter()
        .find(|lang| lang.extensions.contains(&extension.as_str()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_guess_by_extension() {
        let lang = guess_language(Path::new("src/main.rs")).unwrap();
        assert_eq!(lang.id, "rust");

        let lang = guess_language(Path::new("/etc/app/config.TOML")).unwrap();
        assert_eq!(lang.id, "toml");
    }

    #[test]
    fn test_unknown_extension_is_none() {
        assert_eq!(guess_language(Path::new("notes.xyzzy")), None);
    }

    #[test]
    fn test_unsaved_document_name_is_none() {
        // Synthetic tab names have no extension and must not enable highlighting.
        assert_eq!(guess_language(Path::new("Unsaved Document 1")), None);
    }

    #[test]
    fn test_language_by_id() {
        assert_eq!(language_by_id("python").unwrap().name, "Python");
        assert_eq!(language_by_id("cobol"), None);
    }

    #[test]
    fn test_extensions_are_lowercase() {
        for lang in languages() {
            for ext in lang.extensions {
                assert_eq!(*ext, ext.to_ascii_lowercase(), "{}", lang.id);
            }
        }
    }
}
