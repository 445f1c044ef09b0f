//! Compiler argument classification.
//!
//! Splits one command line into the facets the index cares about. The flag
//! prefix depends on the compiler flavor: `/` for MSVC (`cl`), `-` for
//! everything else.

use std::path::Path;

use crate::database::{CompileCommandEntry, absolutize};

/// Option syntax used by a compiler invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CompilerFlavor {
    Msvc,
    UnixStyle,
}

impl CompilerFlavor {
    /// `cl` (any case, extension ignored) is MSVC; anything else is Unix-style.
    pub fn detect(entry: &CompileCommandEntry) -> Self {
        if entry.compiler_base_name().eq_ignore_ascii_case("cl") {
            Self::Msvc
        } else {
            Self::UnixStyle
        }
    }

    pub fn prefix(&self) -> char {
        match self {
            Self::Msvc => '/',
            Self::UnixStyle => '-',
        }
    }
}

/// Facets extracted from one entry's argument vector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassifiedArgs {
    pub flavor: CompilerFlavor,
    /// Include directories in command order, made absolute against the
    /// entry's working directory.
    pub include_paths: Vec<String>,
    /// Raw define tokens such as `FOO` or `BAR=1`.
    pub defines: Vec<String>,
    pub compiler_path: String,
    /// Flags not consumed as include, define, output or standard.
    pub compiler_args: Vec<String>,
    /// Text after `-std=` / `/std:` of the first standard flag, if any.
    pub standard: Option<String>,
}

/// Classify the arguments of a validated entry.
pub fn classify(entry: &CompileCommandEntry) -> ClassifiedArgs {
    let flavor = CompilerFlavor::detect(entry);
    let prefix = flavor.prefix();

    let include_flag = format!("{prefix}I");
    let define_flag = format!("{prefix}D");
    let output_flag = format!("{prefix}o");
    let std_flag = format!("{prefix}std");

    let mut classified = ClassifiedArgs {
        flavor,
        include_paths: Vec::new(),
        defines: Vec::new(),
        compiler_path: entry.compiler().to_string(),
        compiler_args: Vec::new(),
        standard: None,
    };

    // Position 0 is the shell placeholder and position 1 the compiler.
    for arg in entry.arguments.iter().skip(2) {
        if !arg.starts_with(prefix) {
            continue;
        }

        if let Some(include) = arg.strip_prefix(include_flag.as_str()) {
            classified
                .include_paths
                .push(resolve_include(&entry.directory, include));
        } else if let Some(define) = arg.strip_prefix(define_flag.as_str()) {
            classified.defines.push(define.to_string());
        } else if arg.starts_with(std_flag.as_str()) {
            // `-std=` and `/std:` are both five characters long
            if classified.standard.is_none() {
                classified.standard = Some(arg.get(5..).unwrap_or_default().to_string());
            }
        } else if !arg.starts_with(output_flag.as_str()) {
            classified.compiler_args.push(arg.clone());
        }
    }

    classified
}

fn resolve_include(directory: &Path, include: &str) -> String {
    absolutize(directory, Path::new(include))
        .to_string_lossy()
        .into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn entry(directory: &str, arguments: &[&str]) -> CompileCommandEntry {
        CompileCommandEntry {
            directory: PathBuf::from(directory),
            file: PathBuf::from("a.cpp"),
            arguments: arguments.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[test]
    fn test_unix_style_command() {
        let classified = classify(&entry(
            "/p",
            &["sh", "/usr/bin/g++", "-I../inc", "-DFOO", "-std=c++17", "-Wall"],
        ));

        assert_eq!(classified.flavor, CompilerFlavor::UnixStyle);
        assert_eq!(classified.include_paths, vec!["/p/../inc"]);
        assert_eq!(classified.defines, vec!["FOO"]);
        assert_eq!(classified.compiler_path, "/usr/bin/g++");
        assert_eq!(classified.compiler_args, vec!["-Wall"]);
        assert_eq!(classified.standard.as_deref(), Some("c++17"));
    }

    #[test]
    fn test_msvc_command() {
        let classified = classify(&entry(
            "C:\\proj",
            &["sh", "C:\\VC\\cl.exe", "/IC:\\inc", "/DBAR", "/std:c++14", "/W4", "-Wall"],
        ));

        assert_eq!(classified.flavor, CompilerFlavor::Msvc);
        assert_eq!(classified.include_paths, vec!["C:\\inc"]);
        assert_eq!(classified.defines, vec!["BAR"]);
        assert_eq!(classified.compiler_path, "C:\\VC\\cl.exe");
        // Dash flags are operands for MSVC
        assert_eq!(classified.compiler_args, vec!["/W4"]);
        assert_eq!(classified.standard.as_deref(), Some("c++14"));
    }

    #[test]
    fn test_flavor_detection_is_case_insensitive() {
        let upper = entry("/p", &["sh", "C:\\VC\\CL.EXE"]);
        let bare = entry("/p", &["sh", "cl"]);
        let clang_cl = entry("/p", &["sh", "clang-cl"]);

        assert_eq!(CompilerFlavor::detect(&upper), CompilerFlavor::Msvc);
        assert_eq!(CompilerFlavor::detect(&bare), CompilerFlavor::Msvc);
        assert_eq!(CompilerFlavor::detect(&clang_cl), CompilerFlavor::UnixStyle);
    }

    #[test]
    fn test_output_and_standard_flags_are_not_passed_through() {
        let classified = classify(&entry(
            "/p",
            &["sh", "cc", "-o", "a.o", "-obj", "-std", "-stdlib=libc++", "-O2", "-c", "a.c"],
        ));

        assert_eq!(classified.compiler_args, vec!["-O2", "-c"]);
        // `-std` is the first standard flag even though it carries no value
        assert_eq!(classified.standard.as_deref(), Some(""));
    }

    #[test]
    fn test_first_standard_flag_wins() {
        let classified = classify(&entry("/p", &["sh", "cc", "-std=c11", "-std=gnu17"]));
        assert_eq!(classified.standard.as_deref(), Some("c11"));
    }

    #[test]
    fn test_stdlib_flag_counts_as_standard_flag() {
        let classified = classify(&entry(
            "/p",
            &["sh", "clang++", "-stdlib=libc++", "-std=c++17"],
        ));

        // `-stdlib=` shares the `-std` prefix and comes first
        assert_eq!(classified.standard.as_deref(), Some("ib=libc++"));
        assert!(classified.compiler_args.is_empty());
    }

    #[test]
    fn test_missing_standard_flag() {
        let classified = classify(&entry("/p", &["sh", "cc", "-c"]));
        assert_eq!(classified.standard, None);
    }

    #[test]
    fn test_includes_keep_order_and_duplicates() {
        let classified = classify(&entry(
            "/p",
            &["sh", "cc", "-I/b", "-Ia", "-I/b", "-DX=1", "-DX=1"],
        ));

        assert_eq!(classified.include_paths, vec!["/b", "/p/a", "/b"]);
        assert_eq!(classified.defines, vec!["X=1", "X=1"]);
    }

    #[test]
    fn test_placeholder_and_compiler_are_not_flags() {
        let classified = classify(&entry("/p", &["-sh", "-cc", "-Wextra"]));
        assert_eq!(classified.compiler_path, "-cc");
        assert_eq!(classified.compiler_args, vec!["-Wextra"]);
    }
}
