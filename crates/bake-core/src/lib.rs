//! Bake Core - Hexagonal Architecture Implementation
//!
//! This crate provides the domain and application layers for Bake, a
//! generator of CMake build descriptors, following hexagonal (ports and
//! adapters) architecture.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │             bake-cli (CLI)              │
//! │     (Implements Driving Ports)          │
//! └──────────────────┬──────────────────────┘
//!                    │ calls
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Application Services            │
//! │            (GenerateService)            │
//! └──────────────────┬──────────────────────┘
//!                    │ uses
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │      Application Ports (Traits)         │
//! │  (Filesystem, ScriptTemplateSource)     │
//! └──────────────────┬──────────────────────┘
//!                    │ implemented by
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │     bake-adapters (Infrastructure)      │
//! │ (LocalFilesystem, BuiltinScriptTemplate)│
//! └─────────────────────────────────────────┘
//!                    │
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Domain Layer (Pure Logic)       │
//! │  (ProjectModel, FinderModule, Emission) │
//! │         No External Dependencies        │
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,no_run
//! use bake_core::domain::{FinderDescriptor, LibraryKind, ProjectIdentity, ProjectModel};
//!
//! let mut model = ProjectModel::new();
//! model.require_cmake_version("2.6");
//! model.start_project(ProjectIdentity::with_default_languages("demo", "Demo").unwrap());
//!
//! let src = model.enter_subdirectory("src").unwrap();
//! model
//!     .at(src)
//!     .add_library("util", LibraryKind::Static, "util.c")
//!     .unwrap()
//!     .add_executable("demo", ["main.c", "cli.c"])
//!     .unwrap()
//!     .target_link_libraries("demo", "util")
//!     .unwrap();
//!
//! model
//!     .generate_find_command(
//!         "Ragel",
//!         &FinderDescriptor::executable(["ragel"]).with_option("with-ragel", "RAGEL_EXECUTABLE"),
//!     )
//!     .unwrap();
//!
//! // Hand the model to `application::GenerateService` with injected adapters.
//! ```

pub mod domain;

pub mod application;

pub mod error;

// Public API - what external crates should use
pub mod prelude {
    pub use crate::application::{
        GenerateService, GenerationReport,
        ports::{Filesystem, ScriptTemplateSource},
    };
    pub use crate::domain::{
        FinderDescriptor, FinderKind, GeneratedArtifactSet, LibraryKind, Location,
        ProjectIdentity, ProjectModel, ScriptTemplate, Statement, TokenList, VersionCheck,
    };
    pub use crate::error::{BakeError, BakeResult};
}

// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
