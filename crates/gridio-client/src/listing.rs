//! Bucket-listing decode.
//!
//! Listing is the one non-JSON response in the protocol: an S3-style
//! `ListBucketResult` XML document. Only the entry keys and sizes are
//! modeled; every other element is skipped structurally.

use quick_xml::Reader;
use quick_xml::events::Event;

/// One object entry in a listing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListEntry {
    /// Object key, relative to the container root.
    pub key: String,
    /// Object size in bytes, when reported.
    pub size: u64,
}

/// Decoded output of a bucket listing.
#[derive(Debug, Clone, Default)]
pub struct ListBucketOutput {
    /// Container name, when reported.
    pub name: String,
    /// The prefix the listing was filtered by.
    pub prefix: String,
    /// The object entries.
    pub entries: Vec<ListEntry>,
}

/// Errors from decoding a listing document.
#[derive(Debug, thiserror::Error)]
pub enum XmlError {
    /// An error from the underlying XML parser.
    #[error("XML processing error: {0}")]
    QuickXml(#[from] quick_xml::Error),

    /// The document ended before the root element closed.
    #[error("unexpected end of listing document")]
    UnexpectedEof,

    /// An element's text content did not parse as the expected type.
    #[error("failed to parse value: {0}")]
    ParseError(String),
}

/// Decode an S3-style `ListBucketResult` document.
pub(crate) fn decode_list_bucket(xml: &[u8]) -> Result<ListBucketOutput, XmlError> {
    let mut reader = Reader::from_reader(xml);
    reader.config_mut().trim_text(true);

    // Find the root element, skipping the declaration.
    loop {
        match reader.read_event()? {
            Event::Start(_) => break,
            Event::Eof => return Err(XmlError::UnexpectedEof),
            _ => {}
        }
    }

    let mut output = ListBucketOutput::default();

    loop {
        match reader.read_event()? {
            Event::Start(e) => {
                let name = e.name();
                let tag_name = std::str::from_utf8(name.as_ref())
                    .map_err(|e| XmlError::ParseError(e.to_string()))?;
                match tag_name {
                    "Name" => output.name = read_text_content(&mut reader)?,
                    "Prefix" => output.prefix = read_text_content(&mut reader)?,
                    "Contents" => output.entries.push(read_entry(&mut reader)?),
                    _ => skip_element(&mut reader)?,
                }
            }
            Event::End(_) => break,
            Event::Eof => return Err(XmlError::UnexpectedEof),
            _ => {}
        }
    }

    Ok(output)
}

/// Read one `<Contents>` element.
fn read_entry(reader: &mut Reader<&[u8]>) -> Result<ListEntry, XmlError> {
    let mut entry = ListEntry::default();

    loop {
        match reader.read_event()? {
            Event::Start(e) => {
                let name = e.name();
                let tag_name = std::str::from_utf8(name.as_ref())
                    .map_err(|e| XmlError::ParseError(e.to_string()))?;
                match tag_name {
                    "Key" => entry.key = read_text_content(reader)?,
                    "Size" => {
                        let text = read_text_content(reader)?;
                        entry.size = text
                            .parse()
                            .map_err(|e| XmlError::ParseError(format!("invalid size '{text}': {e}")))?;
                    }
                    _ => skip_element(reader)?,
                }
            }
            Event::End(_) => return Ok(entry),
            Event::Eof => return Err(XmlError::UnexpectedEof),
            _ => {}
        }
    }
}

/// Read the text content of the current element and consume its end tag.
fn read_text_content(reader: &mut Reader<&[u8]>) -> Result<String, XmlError> {
    let mut text = String::new();
    loop {
        match reader.read_event()? {
            Event::Text(e) => {
                let decoded = e
                    .decode()
                    .map_err(|err| XmlError::ParseError(err.to_string()))?;
                let unescaped = quick_xml::escape::unescape(&decoded)
                    .map_err(|err| XmlError::ParseError(err.to_string()))?;
                text.push_str(&unescaped);
            }
            Event::End(_) => return Ok(text),
            Event::Eof => return Err(XmlError::UnexpectedEof),
            _ => {}
        }
    }
}

/// Skip over an element and all its children.
fn skip_element(reader: &mut Reader<&[u8]>) -> Result<(), XmlError> {
    let mut depth: u32 = 1;
    loop {
        match reader.read_event()? {
            Event::Start(_) => depth += 1,
            Event::End(_) => {
                depth -= 1;
                if depth == 0 {
                    return Ok(());
                }
            }
            Event::Eof => return Err(XmlError::UnexpectedEof),
            _ => {}
        }
    }
}
