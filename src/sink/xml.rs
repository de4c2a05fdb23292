// src/sink/xml.rs
use crate::error::{TdmsError, Result};
use crate::sink::{StructureSink, Value};
use std::borrow::Cow;
use std::io::Write;

const XML_DECLARATION: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="no" ?>"#;

/// Formatting options for [`XmlSink`]
#[derive(Debug, Clone)]
pub struct XmlOptions {
    /// Spaces per nesting level
    pub indent: usize,
    /// Write the `<?xml ... ?>` declaration first
    pub declaration: bool,
}

impl Default for XmlOptions {
    fn default() -> Self {
        XmlOptions {
            indent: 2,
            declaration: true,
        }
    }
}

/// Writes the structure as indented XML, one element per line
pub struct XmlSink<W: Write> {
    writer: W,
    open: Vec<String>,
    options: XmlOptions,
}

impl<W: Write> XmlSink<W> {
    pub fn new(writer: W) -> Result<Self> {
        Self::with_options(writer, XmlOptions::default())
    }

    pub fn with_options(mut writer: W, options: XmlOptions) -> Result<Self> {
        if options.declaration {
            writeln!(writer, "{}", XML_DECLARATION)?;
        }
        Ok(XmlSink {
            writer,
            open: Vec::new(),
            options,
        })
    }

    /// Current nesting depth
    pub fn depth(&self) -> usize {
        self.open.len()
    }

    /// Flush and hand back the writer; every opened element must be closed
    pub fn finish(mut self) -> Result<W> {
        if let Some(tag) = self.open.last() {
            return Err(TdmsError::SinkMisuse(format!(
                "{} element(s) still open, innermost <{}>",
                self.open.len(),
                tag
            )));
        }
        self.writer.flush()?;
        Ok(self.writer)
    }

    fn write_indent(&mut self) -> Result<()> {
        let width = self.open.len() * self.options.indent;
        write!(self.writer, "{:width$}", "", width = width)?;
        Ok(())
    }
}

impl<W: Write> StructureSink for XmlSink<W> {
    fn enter(&mut self, name: &str) -> Result<()> {
        self.write_indent()?;
        writeln!(self.writer, "<{}>", name)?;
        self.open.push(name.to_string());
        Ok(())
    }

    fn record(&mut self, name: &str, value: Value) -> Result<()> {
        self.write_indent()?;
        let text = value.to_string();
        writeln!(self.writer, "<{}>{}</{}>", name, escape_xml(&text), name)?;
        Ok(())
    }

    fn leave(&mut self) -> Result<()> {
        let tag = self
            .open
            .pop()
            .ok_or_else(|| TdmsError::SinkMisuse("leave() without matching enter()".into()))?;
        self.write_indent()?;
        writeln!(self.writer, "</{}>", tag)?;
        Ok(())
    }
}

/// Whether `c` may appear as a literal character in XML 1.0 text
fn is_xml_char(c: char) -> bool {
    matches!(c, '\t' | '\n' | '\r' | '\u{20}'..='\u{FFFD}' | '\u{10000}'..)
}

/// Escape the characters XML reserves in text content.
///
/// Tab, newline and carriage return become character references so every
/// element stays on one line. Characters XML 1.0 cannot represent at all are
/// replaced with U+FFFD.
pub fn escape_xml(s: &str) -> Cow<'_, str> {
    let clean = |c: char| c >= ' ' && is_xml_char(c) && !matches!(c, '&' | '<' | '>' | '"' | '\'');
    if s.chars().all(clean) {
        return Cow::Borrowed(s);
    }

    let mut escaped = String::with_capacity(s.len() + 16);
    for c in s.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            '\t' => escaped.push_str("&#x9;"),
            '\n' => escaped.push_str("&#xA;"),
            '\r' => escaped.push_str("&#xD;"),
            c if !is_xml_char(c) => escaped.push(char::REPLACEMENT_CHARACTER),
            _ => escaped.push(c),
        }
    }
    Cow::Owned(escaped)
}
