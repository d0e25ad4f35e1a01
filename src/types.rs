use std::fmt;
use std::str::FromStr;
use std::time::Duration;

/// Languages the engine knows how to build and run.
///
/// The set is closed: callers validate tags against it before a
/// [`Submission`](crate::submission::Submission) is created. Whether a
/// language is actually *served* depends on the adapter registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Language {
    C,
    Cpp,
    Go,
    Java,
    JavaScript,
    Python,
    Ruby,
    Rust,
    Lua,
    Perl,
    Zig,
    D,
    Haskell,
    Crystal,
    Julia,
    R,
    Dart,
    Groovy,
    Scala,
    Nix,
    Brainfuck,
}

impl Language {
    pub const ALL: [Language; 21] = [
        Language::C,
        Language::Cpp,
        Language::Go,
        Language::Java,
        Language::JavaScript,
        Language::Python,
        Language::Ruby,
        Language::Rust,
        Language::Lua,
        Language::Perl,
        Language::Zig,
        Language::D,
        Language::Haskell,
        Language::Crystal,
        Language::Julia,
        Language::R,
        Language::Dart,
        Language::Groovy,
        Language::Scala,
        Language::Nix,
        Language::Brainfuck,
    ];

    /// Canonical tag, as used in config sections and CLI output.
    pub fn tag(self) -> &'static str {
        match self {
            Language::C => "c",
            Language::Cpp => "cpp",
            Language::Go => "go",
            Language::Java => "java",
            Language::JavaScript => "javascript",
            Language::Python => "python",
            Language::Ruby => "ruby",
            Language::Rust => "rust",
            Language::Lua => "lua",
            Language::Perl => "perl",
            Language::Zig => "zig",
            Language::D => "d",
            Language::Haskell => "haskell",
            Language::Crystal => "crystal",
            Language::Julia => "julia",
            Language::R => "r",
            Language::Dart => "dart",
            Language::Groovy => "groovy",
            Language::Scala => "scala",
            Language::Nix => "nix",
            Language::Brainfuck => "brainfuck",
        }
    }

    /// Default source-file extension (without the dot).
    pub fn extension(self) -> &'static str {
        match self {
            Language::C => "c",
            Language::Cpp => "cpp",
            Language::Go => "go",
            Language::Java => "java",
            Language::JavaScript => "js",
            Language::Python => "py",
            Language::Ruby => "rb",
            Language::Rust => "rs",
            Language::Lua => "lua",
            Language::Perl => "pl",
            Language::Zig => "zig",
            Language::D => "d",
            Language::Haskell => "hs",
            Language::Crystal => "cr",
            Language::Julia => "jl",
            Language::R => "R",
            Language::Dart => "dart",
            Language::Groovy => "groovy",
            Language::Scala => "scala",
            Language::Nix => "nix",
            Language::Brainfuck => "bf",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for Language {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "c" => Ok(Language::C),
            "cpp" | "c++" | "cxx" | "cc" => Ok(Language::Cpp),
            "go" | "golang" => Ok(Language::Go),
            "java" => Ok(Language::Java),
            "javascript" | "js" | "node" | "typescript" | "ts" => Ok(Language::JavaScript),
            "python" | "py" | "python3" => Ok(Language::Python),
            "ruby" | "rb" => Ok(Language::Ruby),
            "rust" | "rs" => Ok(Language::Rust),
            "lua" => Ok(Language::Lua),
            "perl" | "pl" => Ok(Language::Perl),
            "zig" => Ok(Language::Zig),
            "d" | "dlang" => Ok(Language::D),
            "haskell" | "hs" => Ok(Language::Haskell),
            "crystal" | "cr" => Ok(Language::Crystal),
            "julia" | "jl" => Ok(Language::Julia),
            "r" => Ok(Language::R),
            "dart" => Ok(Language::Dart),
            "groovy" => Ok(Language::Groovy),
            "scala" => Ok(Language::Scala),
            "nix" => Ok(Language::Nix),
            "brainfuck" | "bf" => Ok(Language::Brainfuck),
            other => Err(format!("unknown language tag: {other}")),
        }
    }
}

/// Which step of a submission a stage performs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StageKind {
    Compile,
    Run,
}

impl fmt::Display for StageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StageKind::Compile => f.write_str("compile"),
            StageKind::Run => f.write_str("run"),
        }
    }
}

/// Parse a duration string such as `"500ms"`, `"10s"`, `"2m"` or `"1h"`.
pub fn parse_duration(s: &str) -> Result<Duration, String> {
    let s = s.trim();
    if s.is_empty() {
        return Err("empty duration string".to_string());
    }

    let idx = s
        .chars()
        .position(|c| !c.is_ascii_digit())
        .ok_or_else(|| "duration missing unit suffix".to_string())?;

    let (num_part, unit_part) = s.split_at(idx);
    let value: u64 = num_part
        .parse()
        .map_err(|e| format!("invalid duration number '{}': {}", num_part, e))?;
    let unit = unit_part.trim().to_lowercase();

    match unit.as_str() {
        "ms" => Ok(Duration::from_millis(value)),
        "s" => Ok(Duration::from_secs(value)),
        "m" => scaled_secs(value, 60),
        "h" => scaled_secs(value, 60 * 60),
        _ => Err(format!(
            "unsupported duration unit '{}'; expected ms, s, m, or h",
            unit
        )),
    }
}

fn scaled_secs(value: u64, factor: u64) -> Result<Duration, String> {
    value
        .checked_mul(factor)
        .map(Duration::from_secs)
        .ok_or_else(|| format!("duration '{value}' overflows"))
}

/// Human-readable rendering used in timeout messages.
pub fn format_duration(d: Duration) -> String {
    if d.as_millis() < 1000 || d.subsec_millis() != 0 {
        format!("{}ms", d.as_millis())
    } else {
        format!("{}s", d.as_secs())
    }
}
