use serde::Serialize;

use super::error::ParseError;
use super::params::{resolve_identity, ParserParams};
use super::parser::{ParsedRecord, Parser};
use crate::streamer::{ByteSource, Streamer};

/// Verbatim text capture of a source.
#[derive(Debug, Clone, Serialize)]
pub struct TextRecord {
    pub name: String,
    pub path: String,
    pub data: String,
}

/// Captures the decoded text of the source without any structural
/// interpretation.
pub struct TextParser {
    streamer: Streamer,
    name: String,
    path: String,
}

impl TextParser {
    pub fn new(source: ByteSource, params: &ParserParams) -> Self {
        let (name, path) = resolve_identity(&source, params);
        Self {
            streamer: Streamer::new(source),
            name,
            path,
        }
    }
}

impl Parser for TextParser {
    fn tag(&self) -> &'static str {
        "text"
    }

    fn parse(self: Box<Self>) -> Result<ParsedRecord, ParseError> {
        let mut this = *self;
        let data = this.streamer.as_text()?.into_owned();
        Ok(ParsedRecord::Text(TextRecord {
            name: this.name,
            path: this.path,
            data,
        }))
    }
}
