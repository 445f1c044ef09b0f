//! Language standard and IntelliSense mode resolution.
//!
//! Both lookups are closed tables. Anything the tables do not know about
//! falls through to a fixed default instead of failing:
//!
//! - unknown or missing standard token -> [`StandardId::CPP20`]
//! - unknown compiler family -> [`IntelliSenseMode::MsvcX86`]
//!
//! The C++20 default applies to C sources as well. Hosts that care about
//! pure C translation units must pass an explicit `-std=` flag.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Canonical language standard identifiers understood by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StandardId {
    #[serde(rename = "c89")]
    C89,
    #[serde(rename = "c99")]
    C99,
    #[serde(rename = "c11")]
    C11,
    #[serde(rename = "c17")]
    C17,
    #[serde(rename = "gnu89")]
    Gnu89,
    #[serde(rename = "gnu99")]
    Gnu99,
    #[serde(rename = "gnu11")]
    Gnu11,
    #[serde(rename = "gnu17")]
    Gnu17,
    #[serde(rename = "c++98")]
    CPP98,
    #[serde(rename = "c++03")]
    CPP03,
    #[serde(rename = "c++11")]
    CPP11,
    #[serde(rename = "c++14")]
    CPP14,
    #[serde(rename = "c++17")]
    CPP17,
    #[serde(rename = "c++20")]
    CPP20,
    #[serde(rename = "gnu++98")]
    GnuPP98,
    #[serde(rename = "gnu++03")]
    GnuPP03,
    #[serde(rename = "gnu++11")]
    GnuPP11,
    #[serde(rename = "gnu++14")]
    GnuPP14,
    #[serde(rename = "gnu++17")]
    GnuPP17,
    #[serde(rename = "gnu++20")]
    GnuPP20,
}

impl StandardId {
    /// Every recognized standard, C family first.
    pub const ALL: [StandardId; 20] = [
        Self::C89,
        Self::C99,
        Self::C11,
        Self::C17,
        Self::Gnu89,
        Self::Gnu99,
        Self::Gnu11,
        Self::Gnu17,
        Self::CPP98,
        Self::CPP03,
        Self::CPP11,
        Self::CPP14,
        Self::CPP17,
        Self::CPP20,
        Self::GnuPP98,
        Self::GnuPP03,
        Self::GnuPP11,
        Self::GnuPP14,
        Self::GnuPP17,
        Self::GnuPP20,
    ];

    /// Used when a command carries no standard flag or an unknown one.
    pub const DEFAULT: StandardId = Self::CPP20;

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::C89 => "c89",
            Self::C99 => "c99",
            Self::C11 => "c11",
            Self::C17 => "c17",
            Self::Gnu89 => "gnu89",
            Self::Gnu99 => "gnu99",
            Self::Gnu11 => "gnu11",
            Self::Gnu17 => "gnu17",
            Self::CPP98 => "c++98",
            Self::CPP03 => "c++03",
            Self::CPP11 => "c++11",
            Self::CPP14 => "c++14",
            Self::CPP17 => "c++17",
            Self::CPP20 => "c++20",
            Self::GnuPP98 => "gnu++98",
            Self::GnuPP03 => "gnu++03",
            Self::GnuPP11 => "gnu++11",
            Self::GnuPP14 => "gnu++14",
            Self::GnuPP17 => "gnu++17",
            Self::GnuPP20 => "gnu++20",
        }
    }

    /// Exact, case-sensitive match against the canonical spelling.
    pub fn from_token(token: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|id| id.as_str() == token)
    }
}

impl fmt::Display for StandardId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Compiler families the mode table distinguishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CompilerFamily {
    Msvc,
    Gcc,
    Clang,
}

impl CompilerFamily {
    /// Match a compiler base name (already stripped of directories) against
    /// the known families. Comparison is case-insensitive and exact.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "msvc" => Some(Self::Msvc),
            "gcc" => Some(Self::Gcc),
            "clang" => Some(Self::Clang),
            _ => None,
        }
    }
}

/// Target architectures present in the mode table.
///
/// Only `X86` and `X64` are produced by [`TargetArch::canonicalize`]; the ARM
/// variants exist so the table stays complete for hosts that know about them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TargetArch {
    X86,
    X64,
    Arm,
    Arm64,
}

impl TargetArch {
    /// Literal `x86` stays `x86`; every other label becomes `x64`.
    pub fn canonicalize(label: &str) -> Self {
        if label == "x86" { Self::X86 } else { Self::X64 }
    }
}

/// IntelliSense mode identifiers: compiler family crossed with architecture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum IntelliSenseMode {
    MsvcX86,
    MsvcX64,
    MsvcArm,
    MsvcArm64,
    GccX86,
    GccX64,
    GccArm,
    GccArm64,
    ClangX86,
    ClangX64,
    ClangArm,
    ClangArm64,
}

impl IntelliSenseMode {
    /// Used for any compiler outside the known families.
    pub const DEFAULT: IntelliSenseMode = Self::MsvcX86;

    pub fn lookup(family: CompilerFamily, arch: TargetArch) -> Self {
        use CompilerFamily::*;
        use TargetArch::*;
        match (family, arch) {
            (Msvc, X86) => Self::MsvcX86,
            (Msvc, X64) => Self::MsvcX64,
            (Msvc, Arm) => Self::MsvcArm,
            (Msvc, Arm64) => Self::MsvcArm64,
            (Gcc, X86) => Self::GccX86,
            (Gcc, X64) => Self::GccX64,
            (Gcc, Arm) => Self::GccArm,
            (Gcc, Arm64) => Self::GccArm64,
            (Clang, X86) => Self::ClangX86,
            (Clang, X64) => Self::ClangX64,
            (Clang, Arm) => Self::ClangArm,
            (Clang, Arm64) => Self::ClangArm64,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::MsvcX86 => "msvc-x86",
            Self::MsvcX64 => "msvc-x64",
            Self::MsvcArm => "msvc-arm",
            Self::MsvcArm64 => "msvc-arm64",
            Self::GccX86 => "gcc-x86",
            Self::GccX64 => "gcc-x64",
            Self::GccArm => "gcc-arm",
            Self::GccArm64 => "gcc-arm64",
            Self::ClangX86 => "clang-x86",
            Self::ClangX64 => "clang-x64",
            Self::ClangArm => "clang-arm",
            Self::ClangArm64 => "clang-arm64",
        }
    }
}

impl fmt::Display for IntelliSenseMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Map a raw standard token (the text after `-std=` or `/std:`) to its
/// canonical identifier, defaulting to C++20.
pub fn resolve_standard(token: Option<&str>) -> StandardId {
    token
        .and_then(StandardId::from_token)
        .unwrap_or(StandardId::DEFAULT)
}

/// Pick the IntelliSense mode for a compiler base name and architecture label.
pub fn resolve_intellisense_mode(compiler_name: &str, architecture: &str) -> IntelliSenseMode {
    let arch = TargetArch::canonicalize(architecture);
    match CompilerFamily::from_name(compiler_name) {
        Some(family) => IntelliSenseMode::lookup(family, arch),
        None => IntelliSenseMode::DEFAULT,
    }
}
