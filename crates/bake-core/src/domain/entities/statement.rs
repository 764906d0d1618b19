//! Target and flag statements.
//!
//! Text is the state of a directory descriptor: each statement is rendered
//! the moment it is added and only its text is kept. The enum exists so the
//! rendering lives in one projection ([`Statement::render`]) instead of being
//! spread across the call sites.

use crate::domain::{
    error::DomainError,
    value_objects::{LibraryKind, TokenList},
};

/// One target/flag operation, before rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Statement {
    AddLibrary {
        name: String,
        kind: LibraryKind,
        sources: TokenList,
    },
    AddExecutable {
        name: String,
        sources: TokenList,
    },
    AddCompilerFlags {
        name: String,
        flags: TokenList,
    },
    LinkLibraries {
        name: String,
        libraries: TokenList,
    },
    FindPackage {
        name: String,
        version_constraint: Option<String>,
        required: bool,
    },
    LiteralText(String),
}

impl Statement {
    pub fn add_library(
        name: impl Into<String>,
        kind: LibraryKind,
        sources: impl Into<TokenList>,
    ) -> Self {
        Self::AddLibrary {
            name: name.into(),
            kind,
            sources: sources.into(),
        }
    }

    pub fn add_executable(name: impl Into<String>, sources: impl Into<TokenList>) -> Self {
        Self::AddExecutable {
            name: name.into(),
            sources: sources.into(),
        }
    }

    pub fn add_compiler_flags(name: impl Into<String>, flags: impl Into<TokenList>) -> Self {
        Self::AddCompilerFlags {
            name: name.into(),
            flags: flags.into(),
        }
    }

    pub fn link_libraries(name: impl Into<String>, libraries: impl Into<TokenList>) -> Self {
        Self::LinkLibraries {
            name: name.into(),
            libraries: libraries.into(),
        }
    }

    pub fn find_package(
        name: impl Into<String>,
        version_constraint: Option<String>,
        required: bool,
    ) -> Self {
        Self::FindPackage {
            name: name.into(),
            version_constraint,
            required,
        }
    }

    pub fn literal(text: impl Into<String>) -> Self {
        Self::LiteralText(text.into())
    }

    /// Short label for log lines.
    pub fn label(&self) -> &str {
        match self {
            Self::AddLibrary { name, .. }
            | Self::AddExecutable { name, .. }
            | Self::AddCompilerFlags { name, .. }
            | Self::LinkLibraries { name, .. }
            | Self::FindPackage { name, .. } => name,
            Self::LiteralText(_) => "<literal>",
        }
    }

    /// Reject statements that would render into a broken descriptor.
    pub fn validate(&self) -> Result<(), DomainError> {
        match self {
            Self::AddLibrary { name, .. } | Self::AddExecutable { name, .. } => {
                require_name(name, "Target name")
            }
            Self::AddCompilerFlags { name, .. } | Self::LinkLibraries { name, .. } => {
                require_name(name, "Target name")
            }
            Self::FindPackage { name, .. } => require_name(name, "Package name"),
            Self::LiteralText(_) => Ok(()),
        }
    }

    /// Render to descriptor text. Every rendering ends with a newline.
    pub fn render(&self) -> String {
        match self {
            Self::AddLibrary {
                name,
                kind,
                sources,
            } => format!("ADD_LIBRARY({name} {kind} {sources})\n"),
            Self::AddExecutable { name, sources } => {
                format!("ADD_EXECUTABLE({name} {sources})\n")
            }
            Self::AddCompilerFlags { name, flags } => format!(
                "SET({name}_compile_flags ${{{name}_compile_flags}} {flags})\n\
                 SET_TARGET_PROPERTIES({name} PROPERTIES COMPILE_FLAGS ${{{name}_compile_flags}})\n"
            ),
            Self::LinkLibraries { name, libraries } => {
                format!("TARGET_LINK_LIBRARIES({name} {libraries})\n")
            }
            Self::FindPackage {
                name,
                version_constraint,
                required,
            } => {
                let mut text = format!(
                    "FIND_PACKAGE({name}{})\n",
                    if *required { " REQUIRED" } else { "" }
                );
                if let Some(constraint) = version_constraint {
                    text.push_str(&version_assertion(name, constraint));
                }
                text
            }
            Self::LiteralText(text) => format!("{}\n", text.trim()),
        }
    }
}

/// Fatal-error guard run after `FIND_PACKAGE` when a version is constrained.
fn version_assertion(name: &str, constraint: &str) -> String {
    format!(
        "IF(NOT ${{{name}_VERSION}} {constraint})\n\
         \x20   MESSAGE(FATAL_ERROR \"Package \\\"{name}\\\" too old (requires \\\"{constraint}\\\")\")\n\
         ENDIF(NOT ${{{name}_VERSION}} {constraint})\n"
    )
}

fn require_name(name: &str, what: &'static str) -> Result<(), DomainError> {
    if name.trim().is_empty() {
        Err(DomainError::EmptyName { what })
    } else {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn library_renders_kind_and_sources() {
        let s = Statement::add_library("core", LibraryKind::Static, ["a.c", "b.c"]);
        assert_eq!(s.render(), "ADD_LIBRARY(core STATIC a.c b.c)\n");
    }

    #[test]
    fn executable_accepts_single_token() {
        let s = Statement::add_executable("demo", "main.c");
        assert_eq!(s.render(), "ADD_EXECUTABLE(demo main.c)\n");
    }

    #[test]
    fn compiler_flags_render_two_lines() {
        let s = Statement::add_compiler_flags("demo", ["-Wall", "-O2"]);
        assert_eq!(
            s.render(),
            "SET(demo_compile_flags ${demo_compile_flags} -Wall -O2)\n\
             SET_TARGET_PROPERTIES(demo PROPERTIES COMPILE_FLAGS ${demo_compile_flags})\n"
        );
    }

    #[test]
    fn link_libraries_joins_targets() {
        let s = Statement::link_libraries("demo", vec!["m", "pthread"]);
        assert_eq!(s.render(), "TARGET_LINK_LIBRARIES(demo m pthread)\n");
    }

    #[test]
    fn find_package_without_constraint_has_no_guard() {
        let s = Statement::find_package("Foo", None, false);
        assert_eq!(s.render(), "FIND_PACKAGE(Foo)\n");

        let s = Statement::find_package("Foo", None, true);
        assert_eq!(s.render(), "FIND_PACKAGE(Foo REQUIRED)\n");
    }

    #[test]
    fn find_package_with_constraint_emits_version_guard() {
        let s = Statement::find_package("Foo", Some("VERSION_GREATER 1.2".into()), true);
        let expected = "FIND_PACKAGE(Foo REQUIRED)\n\
                        IF(NOT ${Foo_VERSION} VERSION_GREATER 1.2)\n    \
                        MESSAGE(FATAL_ERROR \"Package \\\"Foo\\\" too old (requires \\\"VERSION_GREATER 1.2\\\")\")\n\
                        ENDIF(NOT ${Foo_VERSION} VERSION_GREATER 1.2)\n";
        assert_eq!(s.render(), expected);
    }

    #[test]
    fn literal_text_is_trimmed() {
        let s = Statement::literal("\n  INCLUDE(CheckIncludeFile)  \n\n");
        assert_eq!(s.render(), "INCLUDE(CheckIncludeFile)\n");
    }

    #[test]
    fn empty_target_name_is_rejected() {
        let s = Statement::add_executable("", "main.c");
        assert_eq!(
            s.validate(),
            Err(DomainError::EmptyName {
                what: "Target name"
            })
        );
        assert!(Statement::literal("").validate().is_ok());
    }
}
