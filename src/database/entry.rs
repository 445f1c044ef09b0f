//! Record-level validation for compile-commands entries.

use serde::Serialize;
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};

use super::MalformedReason;

/// Placeholder inserted at position 0 when a record only carries `command`.
const SHELL_PLACEHOLDER: &str = "sh";

/// One compiled source file from the database.
///
/// `arguments[0]` is a placeholder, `arguments[1]` is the compiler
/// executable, the rest are flags and operands.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CompileCommandEntry {
    pub directory: PathBuf,
    pub file: PathBuf,
    pub arguments: Vec<String>,
}

impl CompileCommandEntry {
    /// Source path used as the index key: `file` as-is when absolute,
    /// otherwise joined onto `directory` without normalization.
    pub fn absolute_file(&self) -> PathBuf {
        absolutize(&self.directory, &self.file)
    }

    /// Compiler executable path (`arguments[1]`), empty when absent.
    pub fn compiler(&self) -> &str {
        self.arguments.get(1).map_or("", String::as_str)
    }

    /// Compiler file name without directories, e.g. `cl.exe` for
    /// `C:\VC\bin\cl.exe`. Both separators are honored so MSVC paths split
    /// correctly on any host.
    pub fn compiler_file_name(&self) -> &str {
        let compiler = self.compiler();
        compiler.rsplit(['/', '\\']).next().unwrap_or(compiler)
    }

    /// Compiler base name with any extension removed, e.g. `cl` or `g++`.
    pub fn compiler_base_name(&self) -> &str {
        let name = self.compiler_file_name();
        match name.rfind('.') {
            Some(dot) if dot > 0 => &name[..dot],
            _ => name,
        }
    }
}

/// Outcome of validating one raw database record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParsedRecord {
    Valid(CompileCommandEntry),
    Malformed(MalformedReason),
}

impl ParsedRecord {
    /// Validate a raw JSON value into an entry.
    ///
    /// `directory` and `file` must be strings. Arguments come from
    /// `arguments` (array of strings) or, when that field is absent, from
    /// `command` split with POSIX shell rules and prefixed with a
    /// placeholder so the compiler lands at position 1.
    pub fn from_value(value: &Value) -> Self {
        match validate(value) {
            Ok(entry) => Self::Valid(entry),
            Err(reason) => Self::Malformed(reason),
        }
    }

    /// Check an entry built in code against the same argument rule as
    /// records read from JSON.
    pub fn from_entry(entry: CompileCommandEntry) -> Self {
        match check_compiler(&entry.arguments) {
            Ok(()) => Self::Valid(entry),
            Err(reason) => Self::Malformed(reason),
        }
    }

    pub fn is_valid(&self) -> bool {
        matches!(self, Self::Valid(_))
    }
}

fn validate(value: &Value) -> Result<CompileCommandEntry, MalformedReason> {
    let object = value.as_object().ok_or(MalformedReason::NotAnObject {
        found: json_type(value),
    })?;

    let directory = string_field(object, "directory")?;
    let file = string_field(object, "file")?;
    let arguments = match object.get("arguments") {
        Some(Value::Array(items)) => items
            .iter()
            .enumerate()
            .map(|(position, item)| {
                item.as_str()
                    .map(str::to_string)
                    .ok_or(MalformedReason::NonStringArgument { position })
            })
            .collect::<Result<Vec<_>, _>>()?,
        Some(other) => {
            return Err(MalformedReason::WrongType {
                field: "arguments",
                expected: "an array",
                found: json_type(other),
            });
        }
        None => split_command(object)?,
    };

    check_compiler(&arguments)?;

    Ok(CompileCommandEntry {
        directory: PathBuf::from(directory),
        file: PathBuf::from(file),
        arguments,
    })
}

fn check_compiler(arguments: &[String]) -> Result<(), MalformedReason> {
    if arguments.len() < 2 {
        return Err(MalformedReason::MissingCompiler {
            len: arguments.len(),
        });
    }
    Ok(())
}

fn split_command(object: &Map<String, Value>) -> Result<Vec<String>, MalformedReason> {
    let command = match object.get("command") {
        Some(Value::String(command)) => command,
        Some(other) => {
            return Err(MalformedReason::WrongType {
                field: "command",
                expected: "a string",
                found: json_type(other),
            });
        }
        None => return Err(MalformedReason::MissingField { field: "arguments" }),
    };

    let words = shlex::split(command).ok_or(MalformedReason::UnsplittableCommand)?;
    let mut arguments = Vec::with_capacity(words.len() + 1);
    arguments.push(SHELL_PLACEHOLDER.to_string());
    arguments.extend(words);
    Ok(arguments)
}

fn string_field<'a>(
    object: &'a Map<String, Value>,
    field: &'static str,
) -> Result<&'a str, MalformedReason> {
    match object.get(field) {
        Some(Value::String(s)) => Ok(s),
        Some(other) => Err(MalformedReason::WrongType {
            field,
            expected: "a string",
            found: json_type(other),
        }),
        None => Err(MalformedReason::MissingField { field }),
    }
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Join `path` onto `base` unless it is already absolute.
///
/// Windows drive paths (`C:\...`, `C:/...`) and UNC paths count as absolute
/// on every host, since MSVC databases are often read elsewhere.
pub(crate) fn absolutize(base: &Path, path: &Path) -> PathBuf {
    if is_absolute_any(path) {
        path.to_path_buf()
    } else {
        base.join(path)
    }
}

pub(crate) fn is_absolute_any(path: &Path) -> bool {
    if path.is_absolute() {
        return true;
    }
    let text = path.to_string_lossy();
    let bytes = text.as_bytes();
    let drive = bytes.len() >= 3
        && bytes[0].is_ascii_alphabetic()
        && bytes[1] == b':'
        && (bytes[2] == b'\\' || bytes[2] == b'/');
    drive || text.starts_with("\\\\")
}
