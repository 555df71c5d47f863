//! Banlist configuration loading.
//!
//! Sources are byte streams (typically `BannedStepTextPatterns.xml` files
//! found next to the feature files) with an optional declared encoding.
//! Failure handling is two-tiered:
//!
//! - document-level: undecodable bytes, malformed XML, schema violations and
//!   unknown severities reject the whole source with one diagnostic;
//! - item-level: a phrase that does not compile as a regex drops only that
//!   item, siblings survive.
//!
//! Sources merge by concatenation; duplicate phrases are kept and fire
//! independently.

use encoding_rs::{Encoding, UTF_8};
use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};

use crate::banlist::BannedPhraseRule;
use crate::issues::{BanlistFileIssue, Severity};

/// One named configuration source.
#[derive(Debug, Clone)]
pub struct BanlistSource {
    pub path: String,
    pub bytes: Vec<u8>,
    /// Declared encoding label (e.g. "utf-16le", "latin1"), if any.
    /// A byte-order mark in `bytes` takes precedence.
    pub encoding: Option<String>,
}

/// The merged result of loading one or more sources.
#[derive(Debug, Default)]
pub struct LoadedBanlist {
    pub rules: Vec<BannedPhraseRule>,
    pub issues: Vec<BanlistFileIssue>,
}

/// Load and merge all sources, in order. A failing source contributes its
/// diagnostic and zero rules; the others are unaffected.
pub fn load_sources(sources: &[BanlistSource]) -> LoadedBanlist {
    let mut loaded = LoadedBanlist::default();
    for source in sources {
        let (rules, issues) = load_source(source);
        loaded.rules.extend(rules);
        loaded.issues.extend(issues);
    }
    loaded
}

/// Load a single source.
pub fn load_source(source: &BanlistSource) -> (Vec<BannedPhraseRule>, Vec<BanlistFileIssue>) {
    let reject = |error: String| {
        (
            Vec::new(),
            vec![BanlistFileIssue {
                file_path: source.path.clone(),
                error,
            }],
        )
    };

    let text = match decode(&source.bytes, source.encoding.as_deref()) {
        Ok(text) => text,
        Err(error) => return reject(error),
    };

    let items = match parse_items(&text) {
        Ok(items) => items,
        Err(error) => return reject(error),
    };

    // Severity is schema-constrained, so an unknown value rejects the
    // document just like any other schema violation.
    let mut parsed = Vec::with_capacity(items.len());
    for item in items {
        match item.severity.parse::<Severity>() {
            Ok(severity) => parsed.push((item, severity)),
            Err(error) => return reject(error),
        }
    }

    let mut rules = Vec::new();
    let mut issues = Vec::new();
    for (item, severity) in parsed {
        match BannedPhraseRule::new(&item.phrase, severity, item.message, item.ignore_case) {
            Ok(rule) => rules.push(rule),
            Err(_) => issues.push(BanlistFileIssue {
                file_path: source.path.clone(),
                error: format!("Invalid Regex: {}", item.phrase),
            }),
        }
    }

    (rules, issues)
}

// ============================================================
// Encoding detection
// ============================================================

/// Re-materialize the byte stream as text: byte-order mark first, then the
/// declared label, defaulting to UTF-8. Undecodable bytes are an error, not
/// silently replaced.
fn decode(bytes: &[u8], declared: Option<&str>) -> Result<String, String> {
    if let Some((encoding, bom_length)) = Encoding::for_bom(bytes) {
        return decode_as(encoding, &bytes[bom_length..]);
    }

    let encoding = match declared {
        Some(label) => Encoding::for_label(label.trim().as_bytes())
            .ok_or_else(|| format!("unknown encoding label '{label}'"))?,
        None => UTF_8,
    };
    decode_as(encoding, bytes)
}

fn decode_as(encoding: &'static Encoding, bytes: &[u8]) -> Result<String, String> {
    encoding
        .decode_without_bom_handling_and_without_replacement(bytes)
        .map(|cow| cow.into_owned())
        .ok_or_else(|| format!("content is not valid {}", encoding.name()))
}

// ============================================================
// XML parsing
// ============================================================

/// A structurally valid `<item>` before severity/phrase validation.
#[derive(Debug)]
struct RawItem {
    phrase: String,
    severity: String,
    message: Option<String>,
    ignore_case: bool,
}

/// Parse the fixed banlist schema:
/// `<banlist><items><item phrase=".." severity=".." message=".."
/// ignoreCase=".."/></items></banlist>`.
///
/// Any deviation is a document-level error.
fn parse_items(text: &str) -> Result<Vec<RawItem>, String> {
    let mut reader = Reader::from_str(text);
    reader.config_mut().trim_text(true);

    let mut items = Vec::new();
    let mut depth = 0usize;
    let mut saw_items = false;

    loop {
        match reader.read_event() {
            Err(e) => return Err(format!("malformed XML: {e}")),
            Ok(Event::Eof) => break,
            Ok(Event::Start(element)) => {
                check_element(&element, depth, &mut saw_items, &mut items)?;
                depth += 1;
            }
            Ok(Event::Empty(element)) => {
                check_element(&element, depth, &mut saw_items, &mut items)?;
            }
            Ok(Event::End(_)) => depth = depth.saturating_sub(1),
            // Declarations, comments and whitespace carry no schema meaning.
            Ok(_) => {}
        }
    }

    if depth != 0 {
        return Err("malformed XML: unexpected end of file".to_string());
    }
    if !saw_items {
        return Err("missing <items> element under <banlist>".to_string());
    }
    Ok(items)
}

fn check_element(
    element: &BytesStart<'_>,
    depth: usize,
    saw_items: &mut bool,
    items: &mut Vec<RawItem>,
) -> Result<(), String> {
    let name = String::from_utf8_lossy(element.local_name().as_ref()).into_owned();
    match depth {
        0 if name == "banlist" => Ok(()),
        0 => Err(format!("unexpected root element <{name}>, expected <banlist>")),
        1 if name == "items" => {
            *saw_items = true;
            Ok(())
        }
        1 => Err(format!("unexpected element <{name}>, expected <items>")),
        2 if name == "item" => {
            items.push(parse_item(element)?);
            Ok(())
        }
        _ => Err(format!("unexpected element <{name}>")),
    }
}

fn parse_item(element: &BytesStart<'_>) -> Result<RawItem, String> {
    let mut phrase = None;
    let mut severity = None;
    let mut message = None;
    let mut ignore_case = false;

    for attribute in element.attributes() {
        let attribute = attribute.map_err(|e| format!("malformed attribute on <item>: {e}"))?;
        let value = attribute
            .unescape_value()
            .map_err(|e| format!("malformed attribute value on <item>: {e}"))?
            .into_owned();
        match attribute.key.local_name().as_ref() {
            b"phrase" => phrase = Some(value),
            b"severity" => severity = Some(value),
            b"message" => message = Some(value),
            b"ignoreCase" => {
                ignore_case = parse_xs_boolean(&value)
                    .ok_or_else(|| format!("invalid boolean '{value}' for ignoreCase"))?;
            }
            other => {
                return Err(format!(
                    "unexpected attribute '{}' on <item>",
                    String::from_utf8_lossy(other)
                ));
            }
        }
    }

    Ok(RawItem {
        phrase: phrase.ok_or_else(|| "missing required attribute 'phrase' on <item>".to_string())?,
        severity: severity
            .ok_or_else(|| "missing required attribute 'severity' on <item>".to_string())?,
        message,
        ignore_case,
    })
}

/// The xs:boolean lexical space.
fn parse_xs_boolean(value: &str) -> Option<bool> {
    match value {
        "true" | "1" => Some(true),
        "false" | "0" => Some(false),
        _ => None,
    }
}
