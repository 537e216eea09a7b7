//! Per-extension `metadata.ini` declarations.

use std::path::Path;
use std::sync::LazyLock;

use ext_fs::ExtPath;
use regex::Regex;

use crate::error::{Error, Result};
use crate::ini::IniDocument;

/// Declaration file looked up in every extension directory.
pub const METADATA_FILENAME: &str = ExtPath::MetadataFile.as_str();

/// Primary declaration section.
pub const EXTENSION_SECTION: &str = "Extension";

static LIST_SEPARATOR: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[,\s]+").unwrap());

/// Split a declared list on runs of commas and whitespace.
///
/// ```
/// use ext_manager::metadata::parse_list;
///
/// assert_eq!(parse_list("ext1 ext2, ext3  "), vec!["ext1", "ext2", "ext3"]);
/// assert!(parse_list(",, ,").is_empty());
/// ```
pub fn parse_list(text: &str) -> Vec<String> {
    LIST_SEPARATOR
        .split(text.trim())
        .filter(|token| !token.is_empty())
        .map(str::to_string)
        .collect()
}

/// What an extension declares about itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtensionMetadata {
    /// Identity key, always the lowercased directory name.
    pub canonical_name: String,
    /// `Name` as written in the declaration. Display only.
    pub declared_name: Option<String>,
    /// Lowercased requirement tokens in declaration order.
    pub requires: Vec<String>,
    document: IniDocument,
}

impl ExtensionMetadata {
    /// Metadata with no declaration file.
    pub fn empty(fallback_name: &str) -> Self {
        Self::from_document(IniDocument::empty(), fallback_name)
    }

    /// Load `metadata.ini` from `dir`.
    ///
    /// A missing file yields empty metadata. An unreadable or malformed file
    /// is logged and also yields empty metadata.
    pub fn load(dir: &Path, fallback_name: &str) -> Self {
        let file = dir.join(METADATA_FILENAME);
        if !file.is_file() {
            return Self::empty(fallback_name);
        }

        match read_document(&file) {
            Ok(document) => Self::from_document(document, fallback_name),
            Err(e) => {
                tracing::warn!(
                    extension = %fallback_name,
                    file = %file.display(),
                    error = %e,
                    "Error reading {METADATA_FILENAME}, ignoring declarations"
                );
                Self::empty(fallback_name)
            }
        }
    }

    /// Parse declaration text directly.
    pub fn parse(text: &str, fallback_name: &str) -> Result<Self> {
        Ok(Self::from_document(IniDocument::parse(text)?, fallback_name))
    }

    /// Read a list-valued `field` from `section`, plus `extra_section` when given.
    ///
    /// Tokens are lowercased. Missing sections or fields contribute nothing.
    pub fn requirements(&self, field: &str, section: &str, extra_section: Option<&str>) -> Vec<String> {
        let mut text = self.document.get_or(section, field, "").to_string();
        if let Some(extra) = extra_section {
            text.push_str(", ");
            text.push_str(self.document.get_or(extra, field, ""));
        }
        parse_list(&text.to_lowercase())
    }

    fn from_document(document: IniDocument, fallback_name: &str) -> Self {
        let declared_name = document
            .get(EXTENSION_SECTION, "Name")
            .map(str::to_string);
        let mut metadata = Self {
            canonical_name: fallback_name.trim().to_lowercase(),
            declared_name,
            requires: Vec::new(),
            document,
        };
        metadata.requires = metadata.requirements("Requires", EXTENSION_SECTION, None);
        metadata
    }
}

fn read_document(file: &Path) -> Result<IniDocument> {
    let text = std::fs::read_to_string(file).map_err(|e| Error::io(file, e))?;
    IniDocument::parse(&text)
}
