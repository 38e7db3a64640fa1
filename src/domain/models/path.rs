use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
enum Segment {
    Key(String),
    Index(usize),
}

/// Location of a field inside a configuration document
///
/// Renders as `source.energy` or `executable_settings.output[0].mode`.
/// The empty path renders as `<root>`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct FieldPath {
    segments: Vec<Segment>,
}

impl FieldPath {
    /// Path of the document root
    pub const fn root() -> Self {
        Self {
            segments: Vec::new(),
        }
    }

    /// Child path for an object member
    #[must_use]
    pub fn key(&self, key: impl Into<String>) -> Self {
        let mut segments = self.segments.clone();
        segments.push(Segment::Key(key.into()));
        Self { segments }
    }

    /// Child path for an array element
    #[must_use]
    pub fn index(&self, index: usize) -> Self {
        let mut segments = self.segments.clone();
        segments.push(Segment::Index(index));
        Self { segments }
    }

    /// Final object key, if the path ends in one
    pub fn last_key(&self) -> Option<&str> {
        match self.segments.last() {
            Some(Segment::Key(key)) => Some(key),
            _ => None,
        }
    }

    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.segments.is_empty() {
            return f.write_str("<root>");
        }
        for (i, segment) in self.segments.iter().enumerate() {
            match segment {
                Segment::Key(key) if i == 0 => write!(f, "{key}")?,
                Segment::Key(key) => write!(f, ".{key}")?,
                Segment::Index(index) => write!(f, "[{index}]")?,
            }
        }
        Ok(())
    }
}

impl From<&str> for FieldPath {
    /// Builds a path from dotted keys, e.g. `"source.energy"`
    fn from(dotted: &str) -> Self {
        dotted
            .split('.')
            .filter(|part| !part.is_empty())
            .fold(Self::root(), |path, part| path.key(part))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_nested_path() {
        let path = FieldPath::root()
            .key("executable_settings")
            .key("output")
            .index(0)
            .key("mode");
        assert_eq!(path.to_string(), "executable_settings.output[0].mode");
    }

    #[test]
    fn test_display_root() {
        assert_eq!(FieldPath::root().to_string(), "<root>");
        assert!(FieldPath::root().is_root());
    }

    #[test]
    fn test_from_dotted() {
        assert_eq!(
            FieldPath::from("source.energy"),
            FieldPath::root().key("source").key("energy")
        );
    }
}
