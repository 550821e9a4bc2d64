//! UCI file parsing and serialisation
//!
//! Handles the subset of the OpenWrt UCI syntax that configuration files
//! in `/etc/config` use:
//!
//! ```text
//! config fancontrol 'settings'
//!     option enabled '1'
//!     list curve_point '35 0'
//! ```
//!
//! Values may be bare words, single-quoted, double-quoted (with backslash
//! escapes) or any concatenation of those. `#` starts a comment.

use crate::error::ConfigError;
use crate::uci::UciValue;
use std::fmt;

/// One `config` block
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    /// Section type (`config <type>`)
    pub kind: String,
    /// Section name; `None` for anonymous sections
    pub name: Option<String>,
    options: Vec<(String, UciValue)>,
}

impl Section {
    pub fn new(kind: impl Into<String>, name: Option<String>) -> Self {
        Self {
            kind: kind.into(),
            name,
            options: Vec::new(),
        }
    }

    /// Get an option value
    pub fn get(&self, option: &str) -> Option<&UciValue> {
        self.options
            .iter()
            .find(|(key, _)| key == option)
            .map(|(_, value)| value)
    }

    /// Set an option, keeping its position if it already exists
    pub fn set(&mut self, option: &str, value: UciValue) {
        match self.options.iter_mut().find(|(key, _)| key == option) {
            Some((_, slot)) => *slot = value,
            None => self.options.push((option.to_string(), value)),
        }
    }

    /// Append one entry to a list option
    ///
    /// A scalar option of the same name is replaced by the list.
    pub fn push_list(&mut self, option: &str, entry: String) {
        match self.options.iter_mut().find(|(key, _)| key == option) {
            Some((_, UciValue::List(items))) => items.push(entry),
            Some((_, slot)) => *slot = UciValue::List(vec![entry]),
            None => self
                .options
                .push((option.to_string(), UciValue::List(vec![entry]))),
        }
    }

    /// Remove an option; returns whether it existed
    pub fn delete(&mut self, option: &str) -> bool {
        let before = self.options.len();
        self.options.retain(|(key, _)| key != option);
        self.options.len() != before
    }

    /// Options in file order
    pub fn options(&self) -> impl Iterator<Item = (&str, &UciValue)> {
        self.options.iter().map(|(k, v)| (k.as_str(), v))
    }
}

/// A parsed configuration file
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UciDocument {
    sections: Vec<Section>,
}

impl UciDocument {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse file content
    ///
    /// `file` is only used in error messages.
    pub fn parse(file: &str, text: &str) -> Result<Self, ConfigError> {
        let mut doc = Self::new();

        for (number, line) in text.lines().enumerate() {
            let err = |message: &str| ConfigError::ParseError {
                file: file.to_string(),
                line: number + 1,
                message: message.to_string(),
            };

            let tokens = tokenize(line).map_err(|m| err(m))?;
            let Some((keyword, args)) = tokens.split_first() else {
                continue;
            };

            match keyword.as_str() {
                "package" => {}
                "config" => match args {
                    [kind] => doc.sections.push(Section::new(kind.clone(), None)),
                    [kind, name] => doc
                        .sections
                        .push(Section::new(kind.clone(), Some(name.clone()))),
                    _ => return Err(err("expected 'config <type> [name]'")),
                },
                "option" | "list" => {
                    let [key, value] = args else {
                        return Err(err(&format!("expected '{} <name> <value>'", keyword)));
                    };
                    let section = doc
                        .sections
                        .last_mut()
                        .ok_or_else(|| err("option outside of a config section"))?;
                    if keyword == "option" {
                        section.set(key, UciValue::Scalar(value.clone()));
                    } else {
                        section.push_list(key, value.clone());
                    }
                }
                other => return Err(err(&format!("unknown keyword '{}'", other))),
            }
        }

        Ok(doc)
    }

    /// All sections in file order
    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    fn position(&self, id: &str) -> Option<usize> {
        if let Some(pos) = self.sections.iter().position(|s| s.name.as_deref() == Some(id)) {
            return Some(pos);
        }

        // `@type[n]` addresses the n-th section of a type, negative from the end
        let (kind, index) = id.strip_prefix('@')?.strip_suffix(']')?.split_once('[')?;
        let index: isize = index.parse().ok()?;
        let matching: Vec<usize> = self
            .sections
            .iter()
            .enumerate()
            .filter(|(_, s)| s.kind == kind)
            .map(|(i, _)| i)
            .collect();
        let resolved = if index < 0 {
            matching.len().checked_sub(index.unsigned_abs())?
        } else {
            index as usize
        };
        matching.get(resolved).copied()
    }

    /// Look up a section by name or `@type[index]`
    pub fn section(&self, id: &str) -> Option<&Section> {
        self.position(id).map(|i| &self.sections[i])
    }

    /// Mutable section lookup
    pub fn section_mut(&mut self, id: &str) -> Option<&mut Section> {
        self.position(id).map(move |i| &mut self.sections[i])
    }

    /// Get a named section, creating it with `kind` if missing
    pub fn ensure_section(&mut self, name: &str, kind: &str) -> &mut Section {
        let index = match self.position(name) {
            Some(i) => i,
            None => {
                self.sections
                    .push(Section::new(kind, Some(name.to_string())));
                self.sections.len() - 1
            }
        };
        &mut self.sections[index]
    }

    /// Get one option
    pub fn get(&self, section: &str, option: &str) -> Option<&UciValue> {
        self.section(section)?.get(option)
    }
}

/// Quote a value for output, escaping embedded single quotes
fn quote(value: &str) -> String {
    format!("'{}'", value.replace('\'', r"'\''"))
}

impl fmt::Display for UciDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for section in &self.sections {
            match &section.name {
                Some(name) => writeln!(f, "\nconfig {} {}", section.kind, quote(name))?,
                None => writeln!(f, "\nconfig {}", section.kind)?,
            }
            for (key, value) in section.options() {
                match value {
                    UciValue::Scalar(v) => writeln!(f, "\toption {} {}", key, quote(v))?,
                    UciValue::List(items) => {
                        for item in items {
                            writeln!(f, "\tlist {} {}", key, quote(item))?;
                        }
                    }
                }
            }
        }
        Ok(())
    }
}

/// Split one line into words
fn tokenize(line: &str) -> Result<Vec<String>, &'static str> {
    let mut tokens = Vec::new();
    let mut current: Option<String> = None;
    let mut chars = line.chars();

    while let Some(c) = chars.next() {
        match c {
            c if c.is_whitespace() => {
                if let Some(token) = current.take() {
                    tokens.push(token);
                }
            }
            '#' if current.is_none() => break,
            '\'' => {
                let word = current.get_or_insert_with(String::new);
                loop {
                    match chars.next() {
                        Some('\'') => break,
                        Some(ch) => word.push(ch),
                        None => return Err("unterminated quote"),
                    }
                }
            }
            '"' => {
                let word = current.get_or_insert_with(String::new);
                loop {
                    match chars.next() {
                        Some('"') => break,
                        Some('\\') => match chars.next() {
                            Some(ch) => word.push(ch),
                            None => return Err("unterminated quote"),
                        },
                        Some(ch) => word.push(ch),
                        None => return Err("unterminated quote"),
                    }
                }
            }
            '\\' => match chars.next() {
                Some(ch) => current.get_or_insert_with(String::new).push(ch),
                None => return Err("trailing backslash"),
            },
            c => current.get_or_insert_with(String::new).push(c),
        }
    }

    if let Some(token) = current {
        tokens.push(token);
    }
    Ok(tokens)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
# fan settings
config fancontrol 'settings'
\toption enabled '1'
\toption thermal_file \"/sys/class/thermal/thermal_zone0/temp\"
\toption curve_data 35:0,45:36,60:90,85:255
\tlist curve_point '35 0'
\tlist curve_point '60 90'

config zone
\toption name cpu
";

    #[test]
    fn test_parse_sample() {
        let doc = UciDocument::parse("fancontrol", SAMPLE).unwrap();
        assert_eq!(doc.sections().len(), 2);
        assert_eq!(
            doc.get("settings", "enabled"),
            Some(&UciValue::Scalar("1".to_string()))
        );
        assert_eq!(
            doc.get("settings", "thermal_file"),
            Some(&UciValue::Scalar(
                "/sys/class/thermal/thermal_zone0/temp".to_string()
            ))
        );
        assert_eq!(
            doc.get("settings", "curve_point"),
            Some(&UciValue::List(vec!["35 0".to_string(), "60 90".to_string()]))
        );
    }

    #[test]
    fn test_anonymous_section_lookup() {
        let doc = UciDocument::parse("fancontrol", SAMPLE).unwrap();
        assert_eq!(
            doc.get("@zone[0]", "name"),
            Some(&UciValue::Scalar("cpu".to_string()))
        );
        assert_eq!(doc.section("@fancontrol[-1]").and_then(|s| s.name.as_deref()), Some("settings"));
        assert!(doc.section("@zone[1]").is_none());
    }

    #[test]
    fn test_tokenize_quoting() {
        assert_eq!(
            tokenize(r#"option x 'it'\''s' # trailing"#).unwrap(),
            vec!["option", "x", "it's"]
        );
        assert_eq!(
            tokenize(r#"option y "a \"b\" c""#).unwrap(),
            vec!["option", "y", "a \"b\" c"]
        );
        assert_eq!(tokenize("   ").unwrap(), Vec::<String>::new());
    }

    #[test]
    fn test_parse_errors_report_line() {
        let err = UciDocument::parse("broken", "config a 'b'\n\toption x 'open").unwrap_err();
        match err {
            ConfigError::ParseError { file, line, message } => {
                assert_eq!(file, "broken");
                assert_eq!(line, 2);
                assert_eq!(message, "unterminated quote");
            }
            other => panic!("unexpected error: {other}"),
        }

        assert!(UciDocument::parse("x", "option a b").is_err());
        assert!(UciDocument::parse("x", "frobnicate a").is_err());
        assert!(UciDocument::parse("x", "config t n\n\toption only_key").is_err());
    }

    #[test]
    fn test_serialise_reparses_identically() {
        let mut doc = UciDocument::parse("fancontrol", SAMPLE).unwrap();
        doc.ensure_section("settings", "fancontrol")
            .set("fan_file", UciValue::Scalar("it's here".to_string()));

        let text = doc.to_string();
        assert!(text.contains("\toption fan_file 'it'\\''s here'"));
        assert_eq!(UciDocument::parse("fancontrol", &text).unwrap(), doc);
    }

    #[test]
    fn test_ensure_section_and_delete() {
        let mut doc = UciDocument::new();
        doc.ensure_section("settings", "fancontrol")
            .set("enabled", UciValue::Scalar("0".to_string()));
        doc.ensure_section("settings", "fancontrol")
            .set("enabled", UciValue::Scalar("1".to_string()));
        assert_eq!(doc.sections().len(), 1);

        let section = doc.section_mut("settings").unwrap();
        assert!(section.delete("enabled"));
        assert!(!section.delete("enabled"));
    }

    #[test]
    fn test_option_after_list_replaces() {
        let doc = UciDocument::parse("x", "config t 'n'\n\tlist a '1'\n\toption a '2'").unwrap();
        assert_eq!(doc.get("n", "a"), Some(&UciValue::Scalar("2".to_string())));
    }
}
