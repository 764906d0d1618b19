// ============================================================================
//  CLEAN MODULE BOUNDARIES
// ============================================================================

//! Core domain layer for Bake.
//!
//! This module contains the descriptor model and its text-emission engine.
//! All I/O (writing artifacts, reading the script template from disk) is
//! handled via ports defined in the application layer.
//!
//! ## Hexagonal Architecture Compliance
//!
//! - **No async**: Domain logic is synchronous
//! - **No I/O**: No filesystem, network, or external calls
//! - **Text is state**: statements are rendered when added, never re-ordered
//! - **Errors, not exits**: contract violations come back as `DomainError`
//!
// Public API - what the world sees
pub mod emission;
pub mod entities;
pub mod error;
pub mod value_objects;

// Private implementation details - not visible outside domain
mod validation;

// Re-exports for convenience
pub use emission::{BAKE_URL, BAKE_VERSION, ScriptTemplate, ScriptVariables};
pub use entities::{
    Artifact, ConfigureOption, DirScope, FinderDescriptor, FinderModule, GeneratedArtifactSet,
    Location, OptionRegistry, ProjectIdentity, ProjectModel, Statement, SubdirectoryText,
    VersionCheck,
};

pub use error::{DomainError, ErrorCategory};

pub use value_objects::{FinderKind, LibraryKind, TokenList};

pub use entities::common::{Permissions, RelativePath};
pub use validation::DomainValidator;

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use super::*;

    fn template() -> ScriptTemplate {
        ScriptTemplate::new(
            "#!/bin/bash\n# Bake @@bake_version@@ @@bake_url@@ @@now@@\n@@package_options@@echo \"@@project_name@@\"\n",
        )
    }

    fn fixed_now() -> chrono::DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, 14, 9, 30, 0).unwrap()
    }

    fn demo_model() -> ProjectModel {
        let mut model = ProjectModel::new();
        model.start_project(ProjectIdentity::new("demo", "Demo Project", ["C"]).unwrap());
        model
    }

    // ========================================================================
    // Text Accumulator Tests
    // ========================================================================

    #[test]
    fn entering_a_name_twice_creates_one_entry() {
        let mut model = ProjectModel::new();
        let src = model.enter_subdirectory("src").unwrap();
        model.add_executable(&src, "demo", ["main.c"]).unwrap();

        let again = model.enter_subdirectory("src").unwrap();
        model.enter_subdirectory("lib").unwrap();
        model.enter_subdirectory("src").unwrap();

        assert_eq!(src, again);
        let names: Vec<_> = model.subdirectories().iter().map(|s| s.name()).collect();
        assert_eq!(names, ["src", "lib"]);
        assert_eq!(
            model.subdirectory("src").unwrap().text(),
            "ADD_EXECUTABLE(demo main.c)\n"
        );
    }

    #[test]
    fn fresh_subdirectory_starts_empty() {
        let mut model = ProjectModel::new();
        let lib = model.enter_subdirectory("lib").unwrap();
        assert_eq!(model.text_at(&lib), Some(""));
    }

    #[test]
    fn operations_concatenate_in_call_order() {
        let mut model = ProjectModel::new();
        let src = model.enter_subdirectory("src").unwrap();

        let statements = vec![
            Statement::add_library("util", LibraryKind::Static, ["util.c"]),
            Statement::add_executable("demo", ["main.c", "cli.c"]),
            Statement::add_compiler_flags("demo", "-Wall"),
            Statement::link_libraries("demo", ["util", "m"]),
            Statement::find_package("Threads", None, true),
            Statement::literal("INSTALL(TARGETS demo DESTINATION bin)"),
        ];
        let expected: String = statements.iter().map(Statement::render).collect();

        for s in statements {
            model.push(&src, s).unwrap();
        }

        assert_eq!(model.text_at(&src), Some(expected.as_str()));
        assert_eq!(model.root_text(), "");
    }

    #[test]
    fn root_cursor_appends_to_root_buffer() {
        let mut model = ProjectModel::new();
        let root = model.root();
        model.enter_subdirectory("src").unwrap();
        model.literal_text(&root, "INCLUDE(CheckIncludeFile)").unwrap();

        assert!(root.is_root());
        assert_eq!(model.root_text(), "INCLUDE(CheckIncludeFile)\n");
        assert_eq!(model.subdirectory("src").unwrap().text(), "");
    }

    #[test]
    fn append_inserts_no_separator() {
        let mut model = ProjectModel::new();
        let root = Location::Root;
        model.append(&root, "A").unwrap();
        model.append(&root, "B").unwrap();
        assert_eq!(model.root_text(), "AB");
    }

    #[test]
    fn unknown_location_is_rejected() {
        let mut model = ProjectModel::new();
        let ghost = Location::Subdirectory("ghost".into());
        assert_eq!(
            model.add_executable(&ghost, "x", "x.c"),
            Err(DomainError::UnknownSubdirectory("ghost".into()))
        );
    }

    #[test]
    fn subdirectory_names_are_validated() {
        let mut model = ProjectModel::new();
        assert!(matches!(
            model.enter_subdirectory(""),
            Err(DomainError::EmptyName { .. })
        ));
        assert!(matches!(
            model.enter_subdirectory("../outside"),
            Err(DomainError::InvalidSubdirectory { .. })
        ));
        assert!(model.subdirectories().is_empty());
    }

    #[test]
    fn current_dir_is_not_a_subdirectory() {
        let mut model = ProjectModel::new();
        for name in [".", "./", "./."] {
            assert!(
                matches!(
                    model.enter_subdirectory(name),
                    Err(DomainError::InvalidSubdirectory { .. })
                ),
                "{name:?} should be rejected"
            );
        }
        assert!(model.subdirectories().is_empty());
    }

    #[test]
    fn subdirectory_spellings_share_one_entry() {
        let mut model = demo_model();
        let plain = model.enter_subdirectory("src").unwrap();
        model.add_executable(&plain, "demo", "main.c").unwrap();

        let dotted = model.enter_subdirectory("./src").unwrap();
        let trailing = model.enter_subdirectory("src/").unwrap();
        assert_eq!(dotted, plain);
        assert_eq!(trailing, plain);
        model.target_link_libraries(&trailing, "demo", "m").unwrap();

        assert_eq!(model.subdirectories().len(), 1);
        assert_eq!(
            model.subdirectory("./src").unwrap().text(),
            "ADD_EXECUTABLE(demo main.c)\nTARGET_LINK_LIBRARIES(demo m)\n"
        );

        let set = model.emit_at(&template(), fixed_now()).unwrap();
        let paths: Vec<String> = set.paths().map(|p| p.to_string()).collect();
        assert_eq!(paths, ["CMakeLists.txt", "src/CMakeLists.txt", "configure"]);
        let root = set.content("CMakeLists.txt").unwrap();
        assert_eq!(root.matches("ADD_SUBDIRECTORY(src)").count(), 1);
    }

    #[test]
    fn nested_subdirectory_is_normalized() {
        let mut model = demo_model();
        let loc = model.enter_subdirectory("./src//lexer/").unwrap();
        assert_eq!(loc, Location::Subdirectory("src/lexer".into()));
        model.add_executable(&loc, "lex", "lex.c").unwrap();

        let set = model.emit_at(&template(), fixed_now()).unwrap();
        assert!(set.get("src/lexer/CMakeLists.txt").is_some());
        assert!(
            set.content("CMakeLists.txt")
                .unwrap()
                .contains("ADD_SUBDIRECTORY(src/lexer)")
        );
    }

    #[test]
    fn scoped_builder_chains_operations() {
        let mut model = ProjectModel::new();
        let src = model.enter_subdirectory("src").unwrap();
        model
            .at(src.clone())
            .add_executable("demo", "main.c")
            .unwrap()
            .target_link_libraries("demo", "m")
            .unwrap();

        assert_eq!(
            model.text_at(&src),
            Some("ADD_EXECUTABLE(demo main.c)\nTARGET_LINK_LIBRARIES(demo m)\n")
        );
    }

    #[test]
    fn failed_operation_leaves_text_untouched() {
        let mut model = ProjectModel::new();
        let src = model.enter_subdirectory("src").unwrap();
        model.add_executable(&src, "demo", "main.c").unwrap();
        assert!(model.add_executable(&src, " ", "other.c").is_err());
        assert_eq!(model.text_at(&src), Some("ADD_EXECUTABLE(demo main.c)\n"));
    }

    // ========================================================================
    // Finder Registry Tests
    // ========================================================================

    #[test]
    fn registering_a_finder_twice_keeps_the_second() {
        let mut model = ProjectModel::new();
        model
            .generate_find_command("Foo", &FinderDescriptor::executable(["foo-old"]))
            .unwrap();
        model
            .generate_find_command("Bar", &FinderDescriptor::executable(["bar"]))
            .unwrap();
        model
            .generate_find_command("Foo", &FinderDescriptor::executable(["foo-new"]))
            .unwrap();

        let names: Vec<_> = model.finders().iter().map(|f| f.name()).collect();
        assert_eq!(names, ["Foo", "Bar"]);
        let text = model.finder("Foo").unwrap().text();
        assert!(text.contains("NAMES foo-new "));
        assert!(!text.contains("foo-old"));
    }

    #[test]
    fn registering_a_finder_twice_appends_its_options_again() {
        let mut model = ProjectModel::new();
        let ragel = FinderDescriptor::executable(["ragel"])
            .with_option("--with-ragel", "Ragel_EXECUTABLE");
        model.generate_find_command("Ragel", &ragel).unwrap();
        model.generate_find_command("Ragel", &ragel).unwrap();

        assert_eq!(model.finders().len(), 1);
        let indexed: Vec<_> = model.options().indexed().collect();
        assert_eq!(
            indexed,
            vec![
                (0, "--with-ragel"),
                (1, "Ragel_EXECUTABLE"),
                (2, "--with-ragel"),
                (3, "Ragel_EXECUTABLE"),
            ]
        );
    }

    #[test]
    fn option_projection_follows_registration_order() {
        let mut model = ProjectModel::new();
        model
            .generate_find_command(
                "A",
                &FinderDescriptor::executable(["a"])
                    .with_option("--with-a", "A_EXECUTABLE")
                    .with_option("--a-flags", "A_FLAGS"),
            )
            .unwrap();
        model
            .generate_find_command(
                "B",
                &FinderDescriptor::executable(["b"]).with_option("--with-b", "B_EXECUTABLE"),
            )
            .unwrap();

        let indexed: Vec<_> = model.options().indexed().collect();
        assert_eq!(
            indexed,
            vec![
                (0, "--with-a"),
                (1, "A_EXECUTABLE"),
                (2, "--a-flags"),
                (3, "A_FLAGS"),
                (4, "--with-b"),
                (5, "B_EXECUTABLE"),
            ]
        );
    }

    #[test]
    fn rejected_finder_registers_no_options() {
        let mut model = ProjectModel::new();
        let descriptor = FinderDescriptor::executable(Vec::<String>::new()).with_option("--x", "X");
        assert!(model.generate_find_command("X", &descriptor).is_err());
        assert!(model.options().is_empty());
        assert!(model.finders().is_empty());
    }

    // ========================================================================
    // Emission Tests
    // ========================================================================

    #[test]
    fn emit_without_identity_fails() {
        let mut model = ProjectModel::new();
        let src = model.enter_subdirectory("src").unwrap();
        model.add_executable(&src, "demo", "main.c").unwrap();

        assert!(matches!(
            model.emit_at(&template(), fixed_now()),
            Err(DomainError::MissingProjectIdentity)
        ));
    }

    #[test]
    fn end_to_end_single_subdirectory() {
        let mut model = demo_model();
        let src = model.enter_subdirectory("src").unwrap();
        model.add_executable(&src, "demo", ["main.c"]).unwrap();

        let set = model.emit_at(&template(), fixed_now()).unwrap();
        let paths: Vec<String> = set.paths().map(|p| p.to_string()).collect();
        assert_eq!(paths, ["CMakeLists.txt", "src/CMakeLists.txt", "configure"]);

        let header =
            "# This file was generated by Bake at 09:30:00 10/14/2026 GMT.\n# Do not edit this file directly.\n\n";

        assert_eq!(
            set.content("CMakeLists.txt").unwrap(),
            format!("{header}PROJECT(demo)\n\nENABLE_LANGUAGE(C)\n\n\nADD_SUBDIRECTORY(src)\n")
        );
        assert_eq!(
            set.content("src/CMakeLists.txt").unwrap(),
            format!("{header}ADD_EXECUTABLE(demo main.c)\n")
        );

        let script = set.get("configure").unwrap();
        assert!(script.is_executable());
        assert!(script.content.starts_with("#!/bin/bash\n# This file was generated by Bake"));
        assert!(script.content.contains("echo \"Demo Project\""));
        assert!(script.content.contains("package_options=(\n)\n"));
        assert!(!script.content.contains("@@"));
        assert!(!script.content.contains("CMAKE_MODULE_PATH"));
    }

    #[test]
    fn root_descriptor_full_layout() {
        let mut model = ProjectModel::new();
        model.start_project(ProjectIdentity::new("demo", "Demo", ["C", "CXX"]).unwrap());
        model.require_cmake_version("2.6");
        model
            .generate_find_command("Ragel", &FinderDescriptor::executable(["ragel"]))
            .unwrap();
        let root = model.root();
        model
            .find_package(&root, "Ragel", None, true)
            .unwrap();
        model.enter_subdirectory("lib").unwrap();
        model.enter_subdirectory("src").unwrap();

        let set = model.emit_at(&template(), fixed_now()).unwrap();
        let root_text = set.content("CMakeLists.txt").unwrap();
        let body = root_text
            .split_once("# Do not edit this file directly.\n\n")
            .unwrap()
            .1;

        assert_eq!(
            body,
            "CMAKE_MINIMUM_REQUIRED(VERSION 2.6 FATAL_ERROR)\n\n\
             PROJECT(demo)\n\n\
             SET(CMAKE_MODULE_PATH ${CMAKE_MODULE_PATH} \"${CMAKE_SOURCE_DIR}/CMake\")\n\n\
             ENABLE_LANGUAGE(C)\n\
             ENABLE_LANGUAGE(CXX)\n\
             \n\
             FIND_PACKAGE(Ragel REQUIRED)\n\
             \n\
             ADD_SUBDIRECTORY(lib)\n\
             ADD_SUBDIRECTORY(src)\n"
        );

        let module = set.content("CMake/FindRagel.cmake").unwrap();
        assert!(module.starts_with("# This file was generated by Bake"));
        assert!(module.ends_with("ENDIF(Ragel_EXECUTABLE)\n"));
    }

    #[test]
    fn version_constraint_renders_guard_naming_package() {
        let mut model = demo_model();
        let root = model.root();
        model
            .find_package(&root, "Foo", Some("VERSION_GREATER 1.2"), false)
            .unwrap();

        let set = model.emit_at(&template(), fixed_now()).unwrap();
        let root_text = set.content("CMakeLists.txt").unwrap();
        assert!(root_text.contains("IF(NOT ${Foo_VERSION} VERSION_GREATER 1.2)\n"));
        assert!(root_text.contains(
            "MESSAGE(FATAL_ERROR \"Package \\\"Foo\\\" too old (requires \\\"VERSION_GREATER 1.2\\\")\")"
        ));
        assert!(root_text.contains("ENDIF(NOT ${Foo_VERSION} VERSION_GREATER 1.2)\n"));
    }

    #[test]
    fn option_projection_lands_in_script() {
        let mut model = demo_model();
        model
            .generate_find_command(
                "Ragel",
                &FinderDescriptor::executable(["ragel"]).with_option("--with-ragel", "Ragel_EXECUTABLE"),
            )
            .unwrap();

        let set = model.emit_at(&template(), fixed_now()).unwrap();
        assert!(set
            .content("configure")
            .unwrap()
            .contains("package_options=(\n\t[0]='--with-ragel'\t\t[1]='Ragel_EXECUTABLE'\n)\n"));
    }

    #[test]
    fn emission_is_deterministic() {
        let mut model = demo_model();
        let src = model.enter_subdirectory("src").unwrap();
        model.add_executable(&src, "demo", "main.c").unwrap();

        let a = model.emit_at(&template(), fixed_now()).unwrap();
        let b = model.emit_at(&template(), fixed_now()).unwrap();
        let a: Vec<_> = a.iter().map(|x| (x.path.clone(), x.content.clone())).collect();
        let b: Vec<_> = b.iter().map(|x| (x.path.clone(), x.content.clone())).collect();
        assert_eq!(a, b);
    }

    #[test]
    fn every_artifact_shares_the_header() {
        let mut model = demo_model();
        model.enter_subdirectory("src").unwrap();
        model
            .generate_find_command("Re2c", &FinderDescriptor::executable(["re2c"]))
            .unwrap();

        let set = model.emit_at(&template(), fixed_now()).unwrap();
        assert_eq!(set.len(), 4);
        for artifact in &set {
            assert!(
                artifact
                    .content
                    .contains("# This file was generated by Bake at 09:30:00 10/14/2026 GMT.\n"),
                "missing header in {}",
                artifact.path
            );
        }
    }
}
