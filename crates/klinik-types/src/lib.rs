/// Errors that can occur when creating validated text types.
#[derive(Debug, thiserror::Error)]
pub enum TextError {
    /// The input text was empty or contained only whitespace
    #[error("Text cannot be empty")]
    Empty,
}

/// Errors that can occur when creating a validated pain scale value.
#[derive(Debug, thiserror::Error)]
pub enum PainScaleError {
    /// The value was outside the 0-10 numeric rating scale
    #[error("Pain scale must be between 0 and 10")]
    OutOfRange,
}

/// Text guaranteed to carry real content.
///
/// Wraps a `String` that holds at least one non-whitespace character; leading
/// and trailing whitespace is stripped at construction. Intended for fields a
/// clinician must actually fill in, such as the chief complaint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NonEmptyText(String);

impl NonEmptyText {
    /// Builds a `NonEmptyText` from any string-like input.
    ///
    /// # Errors
    ///
    /// Returns [`TextError::Empty`] when the input is empty or whitespace-only
    /// after trimming.
    pub fn new(input: impl AsRef<str>) -> Result<Self, TextError> {
        let trimmed = input.as_ref().trim();
        if trimmed.is_empty() {
            return Err(TextError::Empty);
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Borrows the content as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for NonEmptyText {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for NonEmptyText {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl serde::Serialize for NonEmptyText {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> serde::Deserialize<'de> for NonEmptyText {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        NonEmptyText::new(&s).map_err(serde::de::Error::custom)
    }
}

/// A pain intensity rating on the standard 0-10 numeric rating scale.
///
/// Construction validates the bound, so a `PainScale` value is always within
/// 0 (no pain) to 10 (worst imaginable pain) inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct PainScale(u8);

impl PainScale {
    /// Maximum value on the numeric rating scale.
    pub const MAX: u8 = 10;

    /// Creates a new `PainScale` from the given value.
    ///
    /// # Returns
    ///
    /// Returns `Ok(PainScale)` if the value is within 0-10 inclusive,
    /// or `Err(PainScaleError::OutOfRange)` otherwise.
    pub fn new(value: u8) -> Result<Self, PainScaleError> {
        if value > Self::MAX {
            return Err(PainScaleError::OutOfRange);
        }
        Ok(Self(value))
    }

    /// Returns the rating as an integer.
    pub fn value(self) -> u8 {
        self.0
    }
}

impl std::fmt::Display for PainScale {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl serde::Serialize for PainScale {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_u8(self.0)
    }
}

impl<'de> serde::Deserialize<'de> for PainScale {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let value = u8::deserialize(deserializer)?;
        PainScale::new(value).map_err(serde::de::Error::custom)
    }
}
