//! Header block parsing.
//!
//! A header is the block between a leading `---` line and the next `---` line. The grammar is a
//! small YAML-like subset: `key: value` pairs at column 0, plain string lists, and one nested
//! shape, the `links` list of `key: value` records. Parsing runs as a line-driven state machine
//! ([`ScanState`]) so that a line ending a list is handed back to the key scanner.

const HEADER_OPEN: &str = "---\n";
const HEADER_CLOSE: &str = "\n---\n";
const LINKS_KEY: &str = "links";
const LINK_ITEM_PREFIX: &str = "  - ";
const LINK_BLOCK_PREFIXES: [&str; 2] = ["  -", "    "];
const LINK_FIELD_INDENT: &str = "    ";
const EMPTY_LIST_TOKEN: &str = "[]";
const NULL_TOKEN: &str = "null";

/// Parsed value of a header key.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum HeaderValue {
    Scalar(String),
    Null,
    List(Vec<String>),
    Links(LinksValue),
}

impl HeaderValue {
    /// Non-empty scalar text, if this value is one.
    pub fn as_scalar(&self) -> Option<&str> {
        match self {
            HeaderValue::Scalar(value) if !value.is_empty() => Some(value.as_str()),
            _ => None,
        }
    }
}

/// Value of the reserved `links` key.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LinksValue {
    Entries(Vec<LinkEntry>),
    /// `links:` carried an inline value other than `[]`.
    Invalid,
}

/// One item of a `links` block.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LinkEntry {
    Record(LinkRecord),
    /// A list item with no `key: value` shape and no nested fields.
    Malformed(String),
}

/// Ordered `key: value` fields of one link. Only `rel` and `target_id` are interpreted.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LinkRecord {
    fields: Vec<(String, String)>,
}

impl LinkRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style field insertion, mainly for tests and fixtures.
    pub fn with(mut self, key: &str, value: &str) -> Self {
        self.insert(key, value);
        self
    }

    /// Set a field; a repeated key overwrites the earlier value in place.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.fields.iter_mut().find(|(k, _)| *k == key) {
            Some(slot) => slot.1 = value,
            None => self.fields.push((key, value)),
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn rel(&self) -> Option<&str> {
        self.get("rel").filter(|v| !v.is_empty())
    }

    pub fn target_id(&self) -> Option<&str> {
        self.get("target_id").filter(|v| !v.is_empty())
    }

    pub fn fields(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// Ordered key/value mapping parsed from a header block.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Header {
    entries: Vec<(String, HeaderValue)>,
}

impl Header {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a key; a repeated key keeps its first position and takes the newer value.
    pub fn insert(&mut self, key: impl Into<String>, value: HeaderValue) {
        let key = key.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(slot) => slot.1 = value,
            None => self.entries.push((key, value)),
        }
    }

    pub fn get(&self, key: &str) -> Option<&HeaderValue> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v)
    }

    /// Non-empty scalar value of `key`. Lists, null and empty strings read as missing.
    pub fn scalar(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(HeaderValue::as_scalar)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &HeaderValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Parse the header block at the top of `text`.
///
/// Returns `None` when the document does not open with a complete delimited block.
pub fn parse_header(text: &str) -> Option<Header> {
    header_block(text).map(parse_header_block)
}

/// Raw text between the opening and closing markers.
pub fn header_block(text: &str) -> Option<&str> {
    let rest = text.strip_prefix(HEADER_OPEN)?;
    let end = rest.find(HEADER_CLOSE)?;
    Some(&rest[..end])
}

/// Parse the inside of a header block (markers already removed).
pub fn parse_header_block(block: &str) -> Header {
    let mut header = Header::new();
    let mut state = ScanState::BetweenKeys;
    for line in block.lines() {
        state = state.step(&mut header, line);
    }
    state.finish(&mut header);
    header
}

/// Link item under construction. `label` is the item text when it had no `key: value` shape.
#[derive(Debug, Default)]
struct OpenEntry {
    label: Option<String>,
    record: LinkRecord,
}

#[derive(Debug)]
enum ScanState {
    BetweenKeys,
    PlainList {
        key: String,
        items: Vec<String>,
    },
    LinkList {
        entries: Vec<LinkEntry>,
        current: Option<OpenEntry>,
    },
}

impl ScanState {
    fn step(self, header: &mut Header, line: &str) -> ScanState {
        match self {
            ScanState::BetweenKeys => scan_key_line(header, line),
            ScanState::PlainList { key, mut items } => {
                if let Some(item) = parse_plain_list_item(line) {
                    items.push(item);
                    return ScanState::PlainList { key, items };
                }
                header.insert(key, HeaderValue::List(items));
                scan_key_line(header, line)
            }
            ScanState::LinkList {
                mut entries,
                mut current,
            } => {
                if LINK_BLOCK_PREFIXES.iter().any(|p| line.starts_with(*p)) {
                    consume_link_line(line, &mut entries, &mut current);
                    return ScanState::LinkList { entries, current };
                }
                flush_entry(&mut entries, current);
                header.insert(LINKS_KEY, HeaderValue::Links(LinksValue::Entries(entries)));
                scan_key_line(header, line)
            }
        }
    }

    fn finish(self, header: &mut Header) {
        match self {
            ScanState::BetweenKeys => {}
            ScanState::PlainList { key, items } => header.insert(key, HeaderValue::List(items)),
            ScanState::LinkList {
                mut entries,
                current,
            } => {
                flush_entry(&mut entries, current);
                header.insert(LINKS_KEY, HeaderValue::Links(LinksValue::Entries(entries)));
            }
        }
    }
}

fn scan_key_line(header: &mut Header, line: &str) -> ScanState {
    if line.trim().is_empty() {
        return ScanState::BetweenKeys;
    }
    let Some((key, value)) = parse_key_value(line) else {
        return ScanState::BetweenKeys;
    };

    if key == LINKS_KEY {
        return match value {
            "" => ScanState::LinkList {
                entries: Vec::new(),
                current: None,
            },
            EMPTY_LIST_TOKEN => {
                header.insert(key, HeaderValue::Links(LinksValue::Entries(Vec::new())));
                ScanState::BetweenKeys
            }
            _ => {
                header.insert(key, HeaderValue::Links(LinksValue::Invalid));
                ScanState::BetweenKeys
            }
        };
    }

    if value.is_empty() {
        return ScanState::PlainList {
            key: key.to_string(),
            items: Vec::new(),
        };
    }
    header.insert(key, classify_inline_value(value));
    ScanState::BetweenKeys
}

fn consume_link_line(line: &str, entries: &mut Vec<LinkEntry>, current: &mut Option<OpenEntry>) {
    if let Some(rest) = line.strip_prefix(LINK_ITEM_PREFIX) {
        flush_entry(entries, current.take());
        let mut entry = OpenEntry::default();
        match rest.split_once(':') {
            Some((key, value)) => entry.record.insert(key.trim(), clean_value(value)),
            None if !rest.trim().is_empty() => entry.label = Some(rest.trim().to_string()),
            None => {}
        }
        *current = Some(entry);
    } else if line.starts_with(LINK_FIELD_INDENT) {
        if let Some((key, value)) = line.trim().split_once(':') {
            current
                .get_or_insert_with(OpenEntry::default)
                .record
                .insert(key.trim(), clean_value(value));
        }
    }
}

fn flush_entry(entries: &mut Vec<LinkEntry>, entry: Option<OpenEntry>) {
    let Some(entry) = entry else {
        return;
    };
    if !entry.record.is_empty() {
        entries.push(LinkEntry::Record(entry.record));
    } else if let Some(label) = entry.label {
        entries.push(LinkEntry::Malformed(label));
    }
}

fn parse_key_value(line: &str) -> Option<(&str, &str)> {
    let (key, value) = line.split_once(':')?;
    if key.is_empty()
        || !key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
    {
        return None;
    }
    Some((key, value.trim()))
}

fn parse_plain_list_item(line: &str) -> Option<String> {
    let rest = line.trim_start().strip_prefix('-')?;
    if !rest.starts_with(char::is_whitespace) {
        return None;
    }
    Some(clean_value(rest))
}

fn classify_inline_value(value: &str) -> HeaderValue {
    if value.starts_with('[') && value.ends_with(']') {
        return HeaderValue::List(parse_inline_list(value));
    }
    if value.eq_ignore_ascii_case(NULL_TOKEN) {
        return HeaderValue::Null;
    }
    HeaderValue::Scalar(strip_quotes(value).to_string())
}

fn clean_value(value: &str) -> String {
    strip_quotes(value).to_string()
}

fn strip_quotes(value: &str) -> &str {
    let value = value.trim();
    if value.len() >= 2 {
        let bytes = value.as_bytes();
        if (bytes[0] == b'"' && bytes[value.len() - 1] == b'"')
            || (bytes[0] == b'\'' && bytes[value.len() - 1] == b'\'')
        {
            return &value[1..value.len() - 1];
        }
    }
    value
}

fn parse_inline_list(value: &str) -> Vec<String> {
    let inner = value[1..value.len() - 1].trim();
    if inner.is_empty() {
        return Vec::new();
    }

    let mut items: Vec<String> = Vec::new();
    let mut buf = String::new();
    let mut quote: Option<char> = None;

    for ch in inner.chars() {
        if let Some(q) = quote {
            if ch == q {
                quote = None;
            }
            buf.push(ch);
            continue;
        }
        if ch == '\'' || ch == '"' {
            quote = Some(ch);
            buf.push(ch);
            continue;
        }
        if ch == ',' {
            if !buf.trim().is_empty() {
                items.push(clean_value(&buf));
            }
            buf.clear();
            continue;
        }
        buf.push(ch);
    }

    if !buf.trim().is_empty() {
        items.push(clean_value(&buf));
    }
    items
}
