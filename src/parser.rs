use anyhow::{Context, Result};
use std::path::Path;
use tree_sitter::{Language, Parser, Tree};

/// Grammar used to parse a file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Dialect {
    /// TypeScript, which also accepts plain JavaScript.
    #[default]
    TypeScript,
    /// TypeScript with JSX.
    Tsx,
}

impl Dialect {
    /// JSX may appear in `.tsx` files and in any JavaScript file, so those
    /// get the JSX-aware grammar. Only `.ts`, `.mts` and `.cts` keep the
    /// plain TypeScript grammar, where `<T>expr` is a type assertion.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some("tsx" | "jsx" | "js" | "mjs" | "cjs") => Dialect::Tsx,
            _ => Dialect::TypeScript,
        }
    }

    fn language(self) -> Language {
        match self {
            Dialect::TypeScript => tree_sitter_typescript::LANGUAGE_TYPESCRIPT.into(),
            Dialect::Tsx => tree_sitter_typescript::LANGUAGE_TSX.into(),
        }
    }
}

pub fn parse_source(source: &str) -> Result<Tree> {
    parse_source_as(source, Dialect::TypeScript)
}

pub fn parse_source_as(source: &str, dialect: Dialect) -> Result<Tree> {
    let mut parser = Parser::new();
    parser
        .set_language(&dialect.language())
        .context("failed to load TypeScript grammar")?;

    parser
        .parse(source, None)
        .context("tree-sitter failed to parse source")
}
