//! Syntax-level patching of size declarations
//!
//! Recognizes two fixed line grammars and rewrites only their value:
//!
//! - `parameter NAME = 123`
//! - `` `define NAME rest-of-line ``
//!
//! Both must sit on a single line. A valueless `` `define FLAG `` is not a
//! size declaration and is never rewritten.
//!
//! Names outside [`Declaration`] and names absent from the patch are left
//! untouched, as is every byte outside a rewritten match. Applying the same
//! patch twice gives the same text as applying it once.

use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use std::str::FromStr;
use std::sync::LazyLock;
use tracing::debug;

use crate::error::{Error, Result};

// Separators are horizontal whitespace only: a match never spans lines.
static PARAMETER_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"parameter[ \t]+(\w+)[ \t]*=[ \t]*(\d+)").expect("Invalid parameter regex")
});

static DEFINE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"`define[ \t]+(\w+)[ \t]+([^ \t\r\n][^\r\n]*)").expect("Invalid define regex")
});

/// Declaration names the patcher is allowed to rewrite
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Declaration {
    SineSize,
    TableSize,
    TableRegSize,
    DataWidth,
    BufferSize,
    AddrWidth,
}

impl Declaration {
    pub const ALL: [Declaration; 6] = [
        Declaration::SineSize,
        Declaration::TableSize,
        Declaration::TableRegSize,
        Declaration::DataWidth,
        Declaration::BufferSize,
        Declaration::AddrWidth,
    ];

    /// Identifier as it appears in the source text
    pub fn name(&self) -> &'static str {
        match self {
            Declaration::SineSize => "SINE_SIZE",
            Declaration::TableSize => "TABLE_SIZE",
            Declaration::TableRegSize => "TABLE_REG_SIZE",
            Declaration::DataWidth => "DATA_WIDTH",
            Declaration::BufferSize => "BUFFER_SIZE",
            Declaration::AddrWidth => "ADDR_WIDTH",
        }
    }
}

impl FromStr for Declaration {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Declaration::ALL
            .into_iter()
            .find(|d| d.name() == s)
            .ok_or_else(|| format!("Unknown declaration: {s}"))
    }
}

impl std::fmt::Display for Declaration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// New values for a set of recognized declarations
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeclarationPatch {
    values: BTreeMap<Declaration, u64>,
}

impl DeclarationPatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, declaration: Declaration, value: u64) -> Self {
        self.set(declaration, value);
        self
    }

    pub fn set(&mut self, declaration: Declaration, value: u64) {
        self.values.insert(declaration, value);
    }

    pub fn get(&self, declaration: Declaration) -> Option<u64> {
        self.values.get(&declaration).copied()
    }

    /// Merge `other` into this patch, `other` winning on conflicts
    pub fn merge(mut self, other: &DeclarationPatch) -> Self {
        self.values.extend(other.values.iter());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Declaration, u64)> + '_ {
        self.values.iter().map(|(&d, &v)| (d, v))
    }

    fn lookup(&self, name: &str) -> Option<u64> {
        name.parse::<Declaration>().ok().and_then(|d| self.get(d))
    }
}

/// Patched text and the number of declarations rewritten
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatchOutcome {
    pub text: String,
    pub replaced: usize,
}

impl PatchOutcome {
    /// Whether the text differs from the input it was computed from
    pub fn changed_from(&self, original: &str) -> bool {
        self.text != original
    }
}

/// Rewrite recognized declarations in `text`
pub fn patch_text(text: &str, patch: &DeclarationPatch) -> PatchOutcome {
    let mut replaced = 0;

    let after_parameters = PARAMETER_REGEX.replace_all(text, |caps: &Captures<'_>| {
        match patch.lookup(&caps[1]) {
            Some(value) => {
                replaced += 1;
                format!("parameter {} = {value}", &caps[1])
            }
            None => caps[0].to_string(),
        }
    });

    let after_defines = DEFINE_REGEX.replace_all(&after_parameters, |caps: &Captures<'_>| {
        match patch.lookup(&caps[1]) {
            Some(value) => {
                replaced += 1;
                format!("`define {} {value}", &caps[1])
            }
            None => caps[0].to_string(),
        }
    });

    PatchOutcome {
        text: after_defines.into_owned(),
        replaced,
    }
}

/// Patch a file in place, rewriting it only when the text changes
///
/// Returns the number of declarations matched.
pub fn patch_file(path: impl AsRef<Path>, patch: &DeclarationPatch) -> Result<usize> {
    let path = path.as_ref();
    let original = fs::read_to_string(path).map_err(|e| {
        Error::Patch(format!("failed to read {}: {e}", path.display()))
    })?;

    let outcome = patch_text(&original, patch);
    if outcome.changed_from(&original) {
        fs::write(path, &outcome.text)?;
    }
    debug!(path = %path.display(), replaced = outcome.replaced, "patched declarations");
    Ok(outcome.replaced)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const SOURCE: &str = "\
`define SINE_SIZE 8
`define TABLE_SIZE 100 // stale
`define OTHER_MACRO 3

module adc_buffer #(
    parameter DATA_WIDTH = 12,
    parameter BUFFER_SIZE=4096,
    parameter ADDR_WIDTH = 12,
    parameter KEEP = 7
) ();
endmodule
";

    #[test]
    fn test_declaration_names_roundtrip() {
        for d in Declaration::ALL {
            assert_eq!(d.name().parse::<Declaration>().unwrap(), d);
            assert_eq!(d.to_string(), d.name());
        }
        assert!("NOT_A_DECL".parse::<Declaration>().is_err());
    }

    #[test]
    fn test_patch_defines() {
        let patch = DeclarationPatch::new()
            .with(Declaration::SineSize, 10)
            .with(Declaration::TableSize, 300);
        let outcome = patch_text(SOURCE, &patch);
        assert_eq!(outcome.replaced, 2);
        assert!(outcome.text.contains("`define SINE_SIZE 10\n"));
        assert!(outcome.text.contains("`define TABLE_SIZE 300\n"));
        assert!(outcome.text.contains("`define OTHER_MACRO 3\n"));
        assert!(outcome.text.contains("parameter DATA_WIDTH = 12,"));
    }

    #[test]
    fn test_patch_parameters() {
        let patch = DeclarationPatch::new()
            .with(Declaration::DataWidth, 14)
            .with(Declaration::BufferSize, 1024)
            .with(Declaration::AddrWidth, 10);
        let outcome = patch_text(SOURCE, &patch);
        assert_eq!(outcome.replaced, 3);
        assert!(outcome.text.contains("parameter DATA_WIDTH = 14,"));
        assert!(outcome.text.contains("parameter BUFFER_SIZE = 1024,"));
        assert!(outcome.text.contains("parameter ADDR_WIDTH = 10,"));
        assert!(outcome.text.contains("parameter KEEP = 7"));
        assert!(outcome.text.contains("`define SINE_SIZE 8\n"));
    }

    #[test]
    fn test_patch_is_idempotent() {
        let patch = DeclarationPatch::new()
            .with(Declaration::TableSize, 64)
            .with(Declaration::AddrWidth, 6);
        let once = patch_text(SOURCE, &patch);
        let twice = patch_text(&once.text, &patch);
        assert_eq!(once.text, twice.text);
    }

    #[test]
    fn test_empty_patch_leaves_text_untouched() {
        let outcome = patch_text(SOURCE, &DeclarationPatch::new());
        assert_eq!(outcome.text, SOURCE);
        assert_eq!(outcome.replaced, 0);
        assert!(!outcome.changed_from(SOURCE));
    }

    #[test]
    fn test_patch_preserves_crlf() {
        let text = "`define TABLE_SIZE 5\r\nwire x;\r\n";
        let patch = DeclarationPatch::new().with(Declaration::TableSize, 9);
        assert_eq!(patch_text(text, &patch).text, "`define TABLE_SIZE 9\r\nwire x;\r\n");
    }

    #[test]
    fn test_flag_define_does_not_swallow_next_line() {
        let text = "`define USE_FAST\n`define TABLE_SIZE 100\n";
        let patch = DeclarationPatch::new().with(Declaration::TableSize, 64);
        let outcome = patch_text(text, &patch);
        assert_eq!(outcome.replaced, 1);
        assert_eq!(outcome.text, "`define USE_FAST\n`define TABLE_SIZE 64\n");
    }

    #[test]
    fn test_valueless_define_left_alone() {
        let patch = DeclarationPatch::new().with(Declaration::SineSize, 10);
        for text in [
            "`define SINE_SIZE\nwire keep_me;\n",
            "`define SINE_SIZE  \r\nwire keep_me;\r\n",
        ] {
            let outcome = patch_text(text, &patch);
            assert_eq!(outcome.replaced, 0);
            assert_eq!(outcome.text, text);
        }
    }

    #[test]
    fn test_parameter_split_across_lines_not_matched() {
        let text = "parameter DATA_WIDTH\n= 12,\nparameter\nADDR_WIDTH = 4\n";
        let patch = DeclarationPatch::new()
            .with(Declaration::DataWidth, 16)
            .with(Declaration::AddrWidth, 8);
        let outcome = patch_text(text, &patch);
        assert_eq!(outcome.replaced, 0);
        assert_eq!(outcome.text, text);
    }

    #[test]
    fn test_merge_prefers_other() {
        let a = DeclarationPatch::new()
            .with(Declaration::DataWidth, 8)
            .with(Declaration::SineSize, 4);
        let b = DeclarationPatch::new().with(Declaration::DataWidth, 16);
        let merged = a.merge(&b);
        assert_eq!(merged.get(Declaration::DataWidth), Some(16));
        assert_eq!(merged.get(Declaration::SineSize), Some(4));
        assert_eq!(merged.iter().count(), 2);
    }

    #[test]
    fn test_patch_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("sine_wave.v");
        fs::write(&path, SOURCE).unwrap();

        let patch = DeclarationPatch::new().with(Declaration::TableRegSize, 7);
        // TABLE_REG_SIZE is absent from the file
        assert_eq!(patch_file(&path, &patch).unwrap(), 0);
        assert_eq!(fs::read_to_string(&path).unwrap(), SOURCE);

        let patch = DeclarationPatch::new().with(Declaration::SineSize, 12);
        assert_eq!(patch_file(&path, &patch).unwrap(), 1);
        assert!(fs::read_to_string(&path)
            .unwrap()
            .starts_with("`define SINE_SIZE 12\n"));
    }

    #[test]
    fn test_patch_file_missing() {
        let dir = TempDir::new().unwrap();
        let result = patch_file(dir.path().join("missing.v"), &DeclarationPatch::new());
        assert!(matches!(result, Err(Error::Patch(_))));
    }
}
