use crate::domain::error::DomainError;

/// Languages enabled when the caller does not list any.
pub const DEFAULT_LANGUAGES: [&str; 2] = ["C", "CXX"];

/// Identity of the project being described.
///
/// `id` lands in the `PROJECT()` statement; `display_name` only appears in the
/// bootstrap script's banner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectIdentity {
    id: String,
    display_name: String,
    languages: Vec<String>,
}

impl ProjectIdentity {
    /// Create an identity, rejecting an empty identifier.
    pub fn new<I, S>(
        id: impl Into<String>,
        display_name: impl Into<String>,
        languages: I,
    ) -> Result<Self, DomainError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let id = id.into();
        if id.trim().is_empty() {
            return Err(DomainError::EmptyName {
                what: "Project identifier",
            });
        }

        let languages: Vec<String> = languages
            .into_iter()
            .map(Into::into)
            .filter(|l: &String| !l.trim().is_empty())
            .collect();

        Ok(Self {
            id,
            display_name: display_name.into(),
            languages,
        })
    }

    /// Identity with the default C/C++ language pair.
    pub fn with_default_languages(
        id: impl Into<String>,
        display_name: impl Into<String>,
    ) -> Result<Self, DomainError> {
        Self::new(id, display_name, DEFAULT_LANGUAGES)
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    pub fn languages(&self) -> &[String] {
        &self.languages
    }
}
