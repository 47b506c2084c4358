use std::fmt;
use std::sync::Arc;

/// Resolved, ordered field names shared by every record of a session.
///
/// Clones share one allocation; [`FieldSchema::ptr_eq`] tells whether two
/// handles came from the same resolution.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FieldSchema {
    names: Arc<[String]>,
}

impl FieldSchema {
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            names: names.into_iter().map(Into::into).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.names.iter().position(|n| n == name)
    }

    pub fn ptr_eq(&self, other: &FieldSchema) -> bool {
        Arc::ptr_eq(&self.names, &other.names)
    }
}

impl fmt::Display for FieldSchema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}]", self.names.join(", "))
    }
}
