use std::collections::HashMap;

use log::debug;

use super::dx::DxParser;
use super::dxbin::DxbinParser;
use super::error::ParseError;
use super::params::ParserParams;
use super::parser::Parser;
use super::pdb::PdbLikeParser;
use super::text::TextParser;
use crate::streamer::ByteSource;

/// Factory producing a parser instance for one format tag.
pub type ParserFactory = Box<dyn Fn(ByteSource, &ParserParams) -> Box<dyn Parser> + Send + Sync>;

/// Maps format tags to parser factories.
///
/// The registry is an explicit value: build it during startup, then share it
/// read-only. Concurrent reads are safe once populated; `register` calls are
/// not synchronized and must be serialized by the caller.
#[derive(Default)]
pub struct FormatRegistry {
    factories: HashMap<String, ParserFactory>,
}

impl FormatRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry with all built-in formats registered:
    /// `text`, `pdb`, `pqr`, `pdbqt`, `dx`, `dxbin`.
    pub fn with_builtin_formats() -> Self {
        let mut registry = Self::new();
        registry.register("text", |source, params| {
            Box::new(TextParser::new(source, params))
        });
        registry.register("pdb", |source, params| {
            Box::new(PdbLikeParser::pdb(source, params))
        });
        registry.register("pqr", |source, params| {
            Box::new(PdbLikeParser::pqr(source, params))
        });
        registry.register("pdbqt", |source, params| {
            Box::new(PdbLikeParser::pdbqt(source, params))
        });
        registry.register("dx", |source, params| {
            Box::new(DxParser::new(source, params))
        });
        registry.register("dxbin", |source, params| {
            Box::new(DxbinParser::new(source, params))
        });
        registry
    }

    /// Associate `tag` with a parser factory.
    ///
    /// Duplicate registration overwrites the previous entry: the last
    /// registration wins. This is deliberate, so embedders can replace a
    /// built-in parser with their own.
    pub fn register<F>(&mut self, tag: &str, factory: F)
    where
        F: Fn(ByteSource, &ParserParams) -> Box<dyn Parser> + Send + Sync + 'static,
    {
        debug!("registering parser for format {tag}");
        self.factories.insert(tag.to_string(), Box::new(factory));
    }

    /// True if a factory is registered for `tag`.
    pub fn contains(&self, tag: &str) -> bool {
        self.factories.contains_key(tag)
    }

    /// All registered tags, sorted.
    pub fn tags(&self) -> Vec<&str> {
        let mut tags: Vec<&str> = self.factories.keys().map(String::as_str).collect();
        tags.sort_unstable();
        tags
    }

    /// Instantiate the parser registered for `tag`.
    ///
    /// An unregistered tag is a configuration error of the caller and fails
    /// with [`ParseError::UnknownFormat`]; there is no fallback parser.
    pub fn create(
        &self,
        tag: &str,
        source: ByteSource,
        params: &ParserParams,
    ) -> Result<Box<dyn Parser>, ParseError> {
        let factory = self
            .factories
            .get(tag)
            .ok_or_else(|| ParseError::UnknownFormat(tag.to_string()))?;
        Ok(factory(source, params))
    }
}
