use std::fmt;

/// A value that was either parsed into a typed `T`, or is the raw text `Raw`
/// that could not be parsed.
///
/// Lenient document import keeps unparseable text around as `Unknown` so it
/// can be written back out unchanged instead of being replaced by a default.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Recognized<T, Raw = String> {
    Known(T),
    Unknown(Raw),
}

impl<T: Copy, Raw: Copy> Copy for Recognized<T, Raw> {}

impl<T, Raw> Recognized<T, Raw> {
    pub fn known(&self) -> Option<&T> {
        match self {
            Recognized::Known(t) => Some(t),
            Recognized::Unknown(_) => None,
        }
    }

    pub fn is_known(&self) -> bool {
        matches!(self, Recognized::Known(_))
    }
}

impl<T: Copy, Raw> Recognized<T, Raw> {
    /// Copies the known value out, if there is one.
    pub fn get(&self) -> Option<T> {
        self.known().copied()
    }
}

impl<T, Raw> From<T> for Recognized<T, Raw> {
    fn from(value: T) -> Self {
        Recognized::Known(value)
    }
}

impl<T: fmt::Display, Raw: fmt::Display> fmt::Display for Recognized<T, Raw> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Recognized::Known(t) => t.fmt(f),
            Recognized::Unknown(raw) => raw.fmt(f),
        }
    }
}
