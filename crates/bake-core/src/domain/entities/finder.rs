//! Finder module generation.
//!
//! A finder module is a `Find<Name>.cmake` file that `FIND_PACKAGE(<Name>)`
//! loads. The generator never invents probing logic: binary names, the
//! version command, its regex and the run macro are caller-supplied fragments
//! copied verbatim. What it owns is the block nesting and the variable names:
//!
//! | Variable | Meaning |
//! |----------|---------|
//! | `<Name>_FOUND` | `TRUE` once the executable was located |
//! | `<Name>_EXECUTABLE` | path found by `FIND_PROGRAM` |
//! | `<Name>_VERSION` | version extracted from the check output |
//! | `<Name>_version_result/output/error` | captured subprocess state |

use std::collections::BTreeSet;

use crate::domain::{error::DomainError, value_objects::FinderKind};

/// Subprocess run to discover the version of a located executable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionCheck {
    /// Command line, usually referencing `${<Name>_EXECUTABLE}`.
    pub command: String,
    /// Exit status that counts as success.
    pub expected_status: i32,
    /// `REGEX REPLACE` pattern; its first capture group becomes the version.
    pub output_regex: String,
}

impl VersionCheck {
    pub fn new(
        command: impl Into<String>,
        expected_status: i32,
        output_regex: impl Into<String>,
    ) -> Self {
        Self {
            command: command.into(),
            expected_status,
            output_regex: output_regex.into(),
        }
    }
}

/// A `./configure` flag and the CMake cache variable it sets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigureOption {
    pub flag: String,
    pub variable: String,
}

impl ConfigureOption {
    pub fn new(flag: impl Into<String>, variable: impl Into<String>) -> Self {
        Self {
            flag: flag.into(),
            variable: variable.into(),
        }
    }
}

/// How to locate one external dependency. Input only; not retained.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FinderDescriptor {
    pub kinds: BTreeSet<FinderKind>,
    pub binary_names: Vec<String>,
    pub version_check: Option<VersionCheck>,
    pub run_macro: String,
    /// Declaration order is preserved into the option registry.
    pub configure_options: Vec<ConfigureOption>,
}

impl FinderDescriptor {
    /// Descriptor for an executable looked up under any of `binary_names`.
    pub fn executable<I, S>(binary_names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            kinds: BTreeSet::from([FinderKind::Executable]),
            binary_names: binary_names.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    pub fn with_version_check(mut self, check: VersionCheck) -> Self {
        self.version_check = Some(check);
        self
    }

    pub fn with_run_macro(mut self, text: impl Into<String>) -> Self {
        self.run_macro = text.into();
        self
    }

    pub fn with_option(mut self, flag: impl Into<String>, variable: impl Into<String>) -> Self {
        self.configure_options.push(ConfigureOption::new(flag, variable));
        self
    }

    pub fn probes_executable(&self) -> bool {
        self.kinds.contains(&FinderKind::Executable)
    }

    /// Required-field checks.
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.kinds.is_empty() {
            return Err(DomainError::MissingRequiredField { field: "type" });
        }
        if self.probes_executable() && self.binary_names.is_empty() {
            return Err(DomainError::MissingRequiredField {
                field: "exec_binary_names",
            });
        }
        if self.binary_names.iter().any(|b| b.trim().is_empty()) {
            return Err(DomainError::EmptyName {
                what: "Finder binary name",
            });
        }
        Ok(())
    }
}

/// Generated `Find<Name>.cmake` module.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FinderModule {
    name: String,
    text: String,
}

impl FinderModule {
    /// Render the module for `name`.
    pub fn generate(name: &str, descriptor: &FinderDescriptor) -> Result<Self, DomainError> {
        validate_name(name)?;
        descriptor.validate()?;

        let mut text = format!("SET({name}_FOUND FALSE)\n");

        if descriptor.probes_executable() {
            text.push_str(&format!(
                "FIND_PROGRAM({name}_EXECUTABLE NAMES {} DOC \"path to {name} executable\")\n",
                descriptor.binary_names.join(" ")
            ));
            text.push_str(&format!("IF({name}_EXECUTABLE)\n"));
            text.push_str(&format!("\tSET({name}_FOUND TRUE)\n"));
            if let Some(check) = &descriptor.version_check {
                text.push_str(&version_check_block(name, check));
            }
            text.push_str(&descriptor.run_macro);
            text.push('\n');
            text.push_str(&format!("ENDIF({name}_EXECUTABLE)\n"));
        }

        Ok(Self {
            name: name.to_string(),
            text,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// `Find<Name>.cmake`
    pub fn filename(&self) -> String {
        format!("Find{}.cmake", self.name)
    }

    pub fn text(&self) -> &str {
        &self.text
    }
}

/// A finder name becomes a file name under `CMake/`, so it must be one
/// path segment.
pub fn validate_name(name: &str) -> Result<(), DomainError> {
    if name.trim().is_empty() {
        return Err(DomainError::EmptyName {
            what: "Finder name",
        });
    }
    if name.contains(['/', '\\']) || name == "." || name == ".." {
        return Err(DomainError::InvalidFinderName(name.to_string()));
    }
    Ok(())
}

fn version_check_block(name: &str, check: &VersionCheck) -> String {
    let VersionCheck {
        command,
        expected_status: status,
        output_regex: regex,
    } = check;
    let mut block = String::new();
    block.push_str(&format!("    EXECUTE_PROCESS(COMMAND {command}\n"));
    block.push_str(&format!("        RESULT_VARIABLE {name}_version_result\n"));
    block.push_str(&format!("        OUTPUT_VARIABLE {name}_version_output\n"));
    block.push_str(&format!("        ERROR_VARIABLE {name}_version_error\n"));
    block.push_str("        OUTPUT_STRIP_TRAILING_WHITESPACE\n");
    block.push_str("    )\n\n");

    let condition = format!("NOT {name}_version_result EQUAL {status}");
    block.push_str(&format!("    IF({condition})\n"));
    block.push_str(&format!(
        "        MESSAGE(FATAL_ERROR \"Command \\\"{command}\\\" failed with output:\\n${{{name}_version_error}}\")\n"
    ));
    block.push_str(&format!("    ELSE({condition})\n"));
    block.push_str(&format!(
        "        STRING(REGEX REPLACE \"{regex}\" \"\\\\1\" {name}_VERSION \"${{{name}_version_output}}\")\n"
    ));
    block.push_str(&format!("    ENDIF({condition})\n"));
    block
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn module_starts_by_clearing_found_flag() {
        let descriptor = FinderDescriptor {
            kinds: BTreeSet::from([FinderKind::Executable]),
            binary_names: vec!["x".into()],
            ..FinderDescriptor::default()
        };
        let module = FinderModule::generate("X", &descriptor).unwrap();
        assert!(module.text().starts_with("SET(X_FOUND FALSE)\n"));
    }

    #[test]
    fn executable_finder_without_version_check() {
        let descriptor = FinderDescriptor::executable(["ragel", "ragel6"])
            .with_run_macro("MACRO(RAGEL_GEN)\nENDMACRO(RAGEL_GEN)");
        let module = FinderModule::generate("Ragel", &descriptor).unwrap();

        assert_eq!(
            module.text(),
            "SET(Ragel_FOUND FALSE)\n\
             FIND_PROGRAM(Ragel_EXECUTABLE NAMES ragel ragel6 DOC \"path to Ragel executable\")\n\
             IF(Ragel_EXECUTABLE)\n\
             \tSET(Ragel_FOUND TRUE)\n\
             MACRO(RAGEL_GEN)\nENDMACRO(RAGEL_GEN)\n\
             ENDIF(Ragel_EXECUTABLE)\n"
        );
        assert_eq!(module.filename(), "FindRagel.cmake");
    }

    #[test]
    fn version_check_block_nests_inside_found_guard() {
        let descriptor = FinderDescriptor::executable(["re2c"]).with_version_check(
            VersionCheck::new("${Re2c_EXECUTABLE} --version", 0, "^re2c ([0-9.]+)$"),
        );
        let text = FinderModule::generate("Re2c", &descriptor)
            .unwrap()
            .text()
            .to_string();

        let guard = text.find("IF(Re2c_EXECUTABLE)").unwrap();
        let exec = text.find("EXECUTE_PROCESS(COMMAND ${Re2c_EXECUTABLE} --version").unwrap();
        let end = text.find("ENDIF(Re2c_EXECUTABLE)").unwrap();
        assert!(guard < exec && exec < end);

        assert!(text.contains("        RESULT_VARIABLE Re2c_version_result\n"));
        assert!(text.contains("        OUTPUT_VARIABLE Re2c_version_output\n"));
        assert!(text.contains("        ERROR_VARIABLE Re2c_version_error\n"));
        assert!(text.contains("    IF(NOT Re2c_version_result EQUAL 0)\n"));
        assert!(text.contains(
            "MESSAGE(FATAL_ERROR \"Command \\\"${Re2c_EXECUTABLE} --version\\\" failed with output:\\n${Re2c_version_error}\")"
        ));
        assert!(text.contains("    ELSE(NOT Re2c_version_result EQUAL 0)\n"));
        assert!(text.contains(
            "STRING(REGEX REPLACE \"^re2c ([0-9.]+)$\" \"\\\\1\" Re2c_VERSION \"${Re2c_version_output}\")"
        ));
        assert!(text.contains("    ENDIF(NOT Re2c_version_result EQUAL 0)\n"));
    }

    #[test]
    fn missing_binary_names_is_contract_violation() {
        let descriptor = FinderDescriptor::executable(Vec::<String>::new());
        assert_eq!(
            FinderModule::generate("Foo", &descriptor),
            Err(DomainError::MissingRequiredField {
                field: "exec_binary_names"
            })
        );
    }

    #[test]
    fn missing_type_is_contract_violation() {
        let descriptor = FinderDescriptor::default();
        assert_eq!(
            descriptor.validate(),
            Err(DomainError::MissingRequiredField { field: "type" })
        );
    }

    #[test]
    fn finder_name_must_be_one_file_name() {
        let descriptor = FinderDescriptor::executable(["ragel"]);
        for name in ["a/b", "a\\b", "..", "."] {
            assert_eq!(
                FinderModule::generate(name, &descriptor),
                Err(DomainError::InvalidFinderName(name.to_string())),
                "{name}"
            );
        }
    }

    #[test]
    fn blank_binary_name_is_rejected() {
        let descriptor = FinderDescriptor::executable(["ragel", " "]);
        assert_eq!(
            descriptor.validate(),
            Err(DomainError::EmptyName {
                what: "Finder binary name"
            })
        );
    }
}
