//! Streaming XML parser driver
//!
//! [`SaxParser`] pulls events from a [`quick_xml::Reader`] and pushes them
//! into a [`ContentHandler`]. Only the current event and the stack of open
//! element names are held in memory, so documents of any size can be
//! processed.
//!
//! quick-xml is a lenient tokenizer; the driver adds the document-level
//! checks a SAX parser performs itself (one root element, no unclosed
//! elements at end of input, no stray text outside the root).

use crate::error::{Error, ParseError, Result};
use crate::handler::{Attributes, ContentHandler};
use crate::limits::Limits;
use quick_xml::escape;
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use std::borrow::Cow;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Event-driven XML parser
///
/// A new parser applies no limits; bounded presets from [`Limits`] are
/// opt-in through [`SaxParser::with_limits`].
#[derive(Debug, Clone)]
pub struct SaxParser {
    limits: Limits,
}

impl Default for SaxParser {
    fn default() -> Self {
        Self {
            limits: Limits::unbounded(),
        }
    }
}

impl SaxParser {
    /// Create an unbounded parser
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the limits
    pub fn with_limits(mut self, limits: Limits) -> Self {
        self.limits = limits;
        self
    }

    /// Get the limits
    pub fn limits(&self) -> &Limits {
        &self.limits
    }

    /// Parse an in-memory document
    pub fn parse_str<H: ContentHandler>(&self, xml: &str, handler: &mut H) -> Result<()> {
        self.parse_reader(xml.as_bytes(), handler)
    }

    /// Open and stream a document from the file system
    pub fn parse_file<P, H>(&self, path: P, handler: &mut H) -> Result<()>
    where
        P: AsRef<Path>,
        H: ContentHandler,
    {
        let path = path.as_ref();
        log::debug!("parsing {}", path.display());
        let file = File::open(path)?;
        self.parse_reader(BufReader::new(file), handler)
    }

    /// Stream a document from any buffered reader
    pub fn parse_reader<R: BufRead, H: ContentHandler>(
        &self,
        input: R,
        handler: &mut H,
    ) -> Result<()> {
        let mut reader = Reader::from_reader(input);
        reader.trim_text(false);
        reader.expand_empty_elements(false);
        reader.check_end_names(true);

        let mut open: Vec<String> = Vec::new();
        let mut seen_root = false;
        let mut buf = Vec::new();

        handler.start_document()?;

        loop {
            match reader.read_event_into(&mut buf) {
                Ok(Event::Start(e)) => {
                    let (name, attrs) = self.read_start(&reader, &e, &open)?;
                    self.check_open(&reader, &name, &open, &mut seen_root)?;
                    handler.start_element(&name, &attrs)?;
                    open.push(name);
                }
                Ok(Event::Empty(e)) => {
                    let (name, attrs) = self.read_start(&reader, &e, &open)?;
                    self.check_open(&reader, &name, &open, &mut seen_root)?;
                    handler.start_element(&name, &attrs)?;
                    handler.end_element(&name)?;
                }
                Ok(Event::End(e)) => {
                    let name = decode_name(&reader, e.name().as_ref(), &open)?;
                    match open.pop() {
                        Some(expected) if expected == name => {}
                        Some(expected) => {
                            return Err(parse_error(
                                &reader,
                                format!("expected </{}>, found </{}>", expected, name),
                                Some(&expected),
                            ))
                        }
                        None => {
                            return Err(parse_error(
                                &reader,
                                format!("unexpected end tag </{}>", name),
                                None,
                            ))
                        }
                    }
                    handler.end_element(&name)?;
                }
                Ok(Event::Text(e)) => {
                    let raw = reader.decoder().decode(&e).map_err(|err| {
                        parse_error(&reader, format!("invalid text: {}", err), open.last())
                    })?;
                    if open.is_empty() {
                        if !is_blank(&raw) {
                            return Err(parse_error(
                                &reader,
                                "text outside the root element",
                                None,
                            ));
                        }
                    } else {
                        let chunks = split_references(&raw).map_err(|message| {
                            parse_error(&reader, message, open.last())
                        })?;
                        for chunk in &chunks {
                            match chunk {
                                Chunk::Literal(text) => deliver_characters(handler, text)?,
                                Chunk::Reference(text) => handler.characters(text)?,
                            }
                        }
                    }
                }
                Ok(Event::CData(e)) => {
                    if open.is_empty() {
                        return Err(parse_error(
                            &reader,
                            "CDATA section outside the root element",
                            None,
                        ));
                    }
                    let raw = e.into_inner();
                    let text = reader.decoder().decode(&raw).map_err(|err| {
                        parse_error(&reader, format!("invalid CDATA section: {}", err), open.last())
                    })?;
                    deliver_characters(handler, &text)?;
                }
                Ok(Event::Eof) => {
                    if let Some(unclosed) = open.last() {
                        return Err(parse_error(
                            &reader,
                            "unexpected end of input: unclosed element",
                            Some(unclosed),
                        ));
                    }
                    if !seen_root {
                        return Err(parse_error(&reader, "no root element found", None));
                    }
                    break;
                }
                Err(e) => {
                    return Err(parse_error(&reader, e.to_string(), open.last()));
                }
                _ => {} // Comments, processing instructions, declarations, DOCTYPE
            }
            buf.clear();
        }

        handler.end_document()
    }

    /// Decode a start tag's name and attributes
    fn read_start<R>(
        &self,
        reader: &Reader<R>,
        start: &BytesStart,
        open: &[String],
    ) -> Result<(String, Attributes)> {
        let name = decode_name(reader, start.name().as_ref(), open)?;

        let mut attrs = Attributes::new();
        for attr_result in start.attributes() {
            let attr = attr_result.map_err(|e| {
                parse_error(reader, format!("failed to parse attribute: {}", e), Some(&name))
            })?;

            let key = decode_name(reader, attr.key.as_ref(), open)?;
            let value = attr.decode_and_unescape_value(reader).map_err(|e| {
                parse_error(
                    reader,
                    format!("failed to unescape attribute '{}': {}", key, e),
                    Some(&name),
                )
            })?;
            attrs.push(key, value.into_owned());
        }

        self.limits.check_attributes(attrs.len())?;

        Ok((name, attrs))
    }

    /// Document-level checks for an element about to be opened
    fn check_open<R>(
        &self,
        reader: &Reader<R>,
        name: &str,
        open: &[String],
        seen_root: &mut bool,
    ) -> Result<()> {
        if open.is_empty() {
            if *seen_root {
                return Err(parse_error(
                    reader,
                    format!("junk after document element: <{}>", name),
                    None,
                ));
            }
            *seen_root = true;
        }
        self.limits.check_xml_depth(open.len() + 1)
    }
}

/// A piece of a text node
#[derive(Debug, PartialEq)]
enum Chunk<'a> {
    /// Markup-free character data
    Literal(&'a str),
    /// Replacement text of one entity or character reference
    Reference(Cow<'a, str>),
}

/// Split raw text at entity and character references
///
/// Each reference becomes a chunk of its own, the way expat reports them,
/// so `AT&amp;T` is delivered as `AT`, `&` and `T`.
fn split_references(raw: &str) -> std::result::Result<Vec<Chunk<'_>>, String> {
    let mut chunks = Vec::new();
    let mut rest = raw;

    while let Some(start) = rest.find('&') {
        if start > 0 {
            chunks.push(Chunk::Literal(&rest[..start]));
        }
        let end = rest[start..]
            .find(';')
            .map(|offset| start + offset)
            .ok_or_else(|| format!("unterminated reference '{}'", &rest[start..]))?;
        let reference = &rest[start..=end];
        let text = escape::unescape(reference)
            .map_err(|e| format!("failed to unescape '{}': {}", reference, e))?;
        chunks.push(Chunk::Reference(text));
        rest = &rest[end + 1..];
    }
    if !rest.is_empty() {
        chunks.push(Chunk::Literal(rest));
    }
    Ok(chunks)
}

/// Send character data to the handler one line at a time
///
/// Line endings are normalised to `\n` first, and each `\n` is delivered as
/// a chunk of its own, the way expat-style SAX parsers report text.
fn deliver_characters<H: ContentHandler>(handler: &mut H, text: &str) -> Result<()> {
    let text = normalize_newlines(text);
    let mut rest: &str = &text;

    while let Some(idx) = rest.find('\n') {
        if idx > 0 {
            handler.characters(&rest[..idx])?;
        }
        handler.characters("\n")?;
        rest = &rest[idx + 1..];
    }
    if !rest.is_empty() {
        handler.characters(rest)?;
    }
    Ok(())
}

fn normalize_newlines(text: &str) -> Cow<'_, str> {
    if text.contains('\r') {
        Cow::Owned(text.replace("\r\n", "\n").replace('\r', "\n"))
    } else {
        Cow::Borrowed(text)
    }
}

fn is_blank(text: &str) -> bool {
    // A leading byte order mark may surface as text before the root
    text.chars().all(|c| c.is_whitespace() || c == '\u{feff}')
}

fn decode_name<R>(reader: &Reader<R>, raw: &[u8], open: &[String]) -> Result<String> {
    reader
        .decoder()
        .decode(raw)
        .map(|name| name.into_owned())
        .map_err(|e| parse_error(reader, format!("invalid name: {}", e), open.last()))
}

fn parse_error<R>(
    reader: &Reader<R>,
    message: impl Into<String>,
    location: Option<&String>,
) -> Error {
    let mut err = ParseError::new(message).at(reader.buffer_position());
    if let Some(loc) = location {
        err = err.with_location(loc.as_str());
    }
    Error::Xml(err)
}
