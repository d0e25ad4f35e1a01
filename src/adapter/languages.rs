// src/adapter/languages.rs

//! Built-in toolchains.
//!
//! Compiled languages produce an executable named after the source stem in
//! the workspace directory and run it as `./<stem>`; JVM languages run a
//! class from the workspace instead. Interpreted languages invoke the
//! interpreter directly on the source file.

use crate::adapter::TemplateAdapter;
use crate::config::LanguageSettings;
use crate::types::Language;

/// Build the default adapter for `language` with the given settings.
pub fn builtin_adapter(language: Language, settings: &LanguageSettings) -> TemplateAdapter {
    let base = TemplateAdapter::new(language.extension(), settings);

    match language {
        Language::C => base
            .compile("gcc", &["-O2", "-o", "{stem}", "{source}", "-lm"])
            .run("./{stem}", &[]),
        Language::Cpp => base
            .compile("g++", &["-std=c++17", "-O2", "-o", "{stem}", "{source}"])
            .run("./{stem}", &[]),
        Language::Go => base
            .compile("go", &["build", "-o", "{stem}", "{source}"])
            .run("./{stem}", &[]),
        // The JVM entry point is the class named after the file stem.
        Language::Java => base
            .with_source_stem("Main")
            .compile("javac", &["{source}"])
            .run("java", &["-cp", ".", "{stem}"]),
        Language::Rust => base
            .compile("rustc", &["-O", "-A", "warnings", "-o", "{stem}", "{source}"])
            .run("./{stem}", &[]),
        Language::JavaScript => base.run("node", &["--no-warnings", "{source}"]),
        Language::Python => base.run("python3", &["{source}"]),
        Language::Ruby => base.run("ruby", &["{source}"]),
        Language::Lua => base.run("lua", &["{source}"]),
        Language::Perl => base.run("perl", &["{source}"]),
        Language::Zig => base
            .compile("zig", &["build-exe", "-femit-bin={stem}", "{source}"])
            .run("./{stem}", &[]),
        Language::D => base
            .compile("dmd", &["-of{stem}", "{source}"])
            .run("./{stem}", &[]),
        Language::Haskell => base
            .compile("ghc", &["-o", "{stem}", "{source}"])
            .run("./{stem}", &[]),
        Language::Crystal => base
            .compile("crystal", &["build", "{source}", "-o", "{stem}"])
            .run("./{stem}", &[]),
        Language::Dart => base
            .compile("dart", &["compile", "exe", "{source}", "-o", "{stem}"])
            .run("./{stem}", &[]),
        // bfc writes the executable as `<stem>` in the working directory.
        Language::Brainfuck => base.compile("bfc", &["{source}"]).run("./{stem}", &[]),
        Language::Groovy => base
            .compile("groovyc", &["{source}", "-d", "."])
            .run("groovy", &["-cp", ".", "{source}"]),
        Language::Scala => base
            .with_source_stem("Main")
            .compile("scalac", &["{source}", "-d", "."])
            .run("scala", &["-cp", ".", "{stem}"]),
        Language::Julia => base.run("julia", &["{source}"]),
        Language::R => base.run("Rscript", &["{source}"]),
        Language::Nix => base.run("nix", &["eval", "--file", "{source}", "--raw"]),
    }
}
