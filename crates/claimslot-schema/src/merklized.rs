//! # Merklized Serialization Attribute
//!
//! Merklized credentials bind slots to document paths through a single string
//! attribute on the credential type:
//!
//! ```text
//! iden3:v1:slotIndexA=<path>&slotIndexB=<path>&slotValueA=<path>&slotValueB=<path>
//! ```
//!
//! Every fragment is optional and order is irrelevant. Each key may appear at
//! most once. Unknown keys, a fragment without exactly one `=`, or a path
//! with an empty segment are hard errors. A key with an empty path
//! (`slotIndexA=`) leaves that slot unbound, and an empty attribute binds
//! nothing.

use std::fmt;

use claimslot_core::{CodecError, SlotLabel};

use crate::directive::SlotBindings;

/// Required attribute prefix.
pub const SERIALIZATION_ATTR_PREFIX: &str = "iden3:v1:";

/// JSON-LD key under which a credential type carries the attribute.
pub const SERIALIZATION_ATTR_KEY: &str = "iden3_serialization";

/// A dotted document path such as `credentialSubject.birthday`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DocumentPath {
    segments: Vec<String>,
}

impl DocumentPath {
    /// Parse a dotted path; every segment must be non-empty.
    pub fn parse(path: &str) -> Option<Self> {
        let segments: Vec<String> = path.split('.').map(str::to_string).collect();
        if segments.iter().any(String::is_empty) {
            return None;
        }
        Some(Self { segments })
    }

    /// Path segments, outermost first.
    pub fn segments(&self) -> &[String] {
        &self.segments
    }
}

impl fmt::Display for DocumentPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.segments.join("."))
    }
}

/// Slot → document path bindings parsed from the attribute.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SlotPaths {
    bindings: SlotBindings,
}

impl SlotPaths {
    /// Bound slots and their parsed paths, in claim-position order.
    pub fn iter(&self) -> impl Iterator<Item = (SlotLabel, DocumentPath)> + '_ {
        // Paths were validated in `parse_serialization_attr`.
        self.bindings
            .iter()
            .filter_map(|(label, raw)| DocumentPath::parse(raw).map(|p| (label, p)))
    }

    /// Raw path bound to `label`.
    pub fn get(&self, label: SlotLabel) -> Option<&str> {
        self.bindings.get(label)
    }

    /// Returns true if no slot is bound.
    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}

fn label_for_key(key: &str) -> Option<SlotLabel> {
    match key {
        "slotIndexA" => Some(SlotLabel::IndexA),
        "slotIndexB" => Some(SlotLabel::IndexB),
        "slotValueA" => Some(SlotLabel::ValueA),
        "slotValueB" => Some(SlotLabel::ValueB),
        _ => None,
    }
}

/// Parse the serialization attribute.
///
/// # Errors
///
/// [`CodecError::MalformedSerializationAttribute`] for a bad prefix, more than
/// four fragments, a fragment that is not `key=path`, an unknown key, a
/// repeated key, or an invalid path.
pub fn parse_serialization_attr(attr: &str) -> Result<SlotPaths, CodecError> {
    if attr.is_empty() {
        return Ok(SlotPaths::default());
    }

    let body = attr.strip_prefix(SERIALIZATION_ATTR_PREFIX).ok_or_else(|| {
        CodecError::malformed_attribute(
            attr,
            format!("missing '{SERIALIZATION_ATTR_PREFIX}' prefix"),
        )
    })?;

    let parts: Vec<&str> = body.split('&').collect();
    if parts.len() > SlotLabel::ALL.len() {
        return Err(CodecError::malformed_attribute(
            attr,
            format!("too many parts: {}", parts.len()),
        ));
    }

    let mut bindings = SlotBindings::default();
    let mut seen = Vec::with_capacity(parts.len());
    for part in parts {
        let (key, path) = match part.split_once('=') {
            Some((k, p)) if !p.contains('=') => (k, p),
            _ => {
                return Err(CodecError::malformed_attribute(
                    attr,
                    format!("part '{part}' is not of the form key=path"),
                ))
            }
        };
        let label = label_for_key(key).ok_or_else(|| {
            CodecError::malformed_attribute(attr, format!("unknown slot key '{key}'"))
        })?;
        if seen.contains(&label) {
            return Err(CodecError::malformed_attribute(
                attr,
                format!("slot key '{key}' repeated"),
            ));
        }
        seen.push(label);
        if path.is_empty() {
            continue;
        }
        if DocumentPath::parse(path).is_none() {
            return Err(CodecError::malformed_attribute(
                attr,
                format!("invalid path '{path}' for {key}"),
            ));
        }
        bindings.bind(label, path)?;
    }

    Ok(SlotPaths { bindings })
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn empty_attribute_binds_nothing() {
        assert!(parse_serialization_attr("").unwrap().is_empty());
    }

    #[test]
    fn single_fragment() {
        let paths = parse_serialization_attr("iden3:v1:slotIndexA=credentialSubject.birthday")
            .unwrap();
        assert_eq!(
            paths.get(SlotLabel::IndexA),
            Some("credentialSubject.birthday")
        );
        assert_eq!(paths.get(SlotLabel::IndexB), None);
        let all: Vec<_> = paths.iter().collect();
        assert_eq!(all.len(), 1);
        assert_eq!(
            all[0].1.segments(),
            &["credentialSubject".to_string(), "birthday".to_string()]
        );
    }

    #[test]
    fn all_fragments_any_order() {
        let paths = parse_serialization_attr(
            "iden3:v1:slotValueB=a.d&slotIndexB=a.b&slotValueA=a.c&slotIndexA=a.a",
        )
        .unwrap();
        let labels: Vec<_> = paths.iter().map(|(l, _)| l).collect();
        assert_eq!(labels, SlotLabel::ALL.to_vec());
        assert_eq!(paths.get(SlotLabel::ValueB), Some("a.d"));
    }

    #[test]
    fn bad_prefix() {
        let err = parse_serialization_attr("iden3:v2:slotIndexA=a").unwrap_err();
        assert!(format!("{err}").contains("prefix"));
    }

    #[test]
    fn too_many_parts() {
        let err = parse_serialization_attr(
            "iden3:v1:slotIndexA=a&slotIndexB=b&slotValueA=c&slotValueB=d&slotIndexA=e",
        )
        .unwrap_err();
        assert!(format!("{err}").contains("too many parts"));
    }

    #[test]
    fn missing_equals() {
        let err = parse_serialization_attr("iden3:v1:slotIndexA").unwrap_err();
        assert!(matches!(
            err,
            CodecError::MalformedSerializationAttribute { .. }
        ));
    }

    #[test]
    fn double_equals() {
        assert!(parse_serialization_attr("iden3:v1:slotIndexA=a=b").is_err());
    }

    #[test]
    fn unknown_key() {
        let err = parse_serialization_attr("iden3:v1:slotIndexC=a").unwrap_err();
        assert!(format!("{err}").contains("unknown slot key 'slotIndexC'"));
    }

    #[test]
    fn repeated_key() {
        let err = parse_serialization_attr("iden3:v1:slotIndexA=a&slotIndexA=b").unwrap_err();
        assert!(format!("{err}").contains("repeated"));
    }

    #[test]
    fn empty_segment_is_rejected() {
        assert!(parse_serialization_attr("iden3:v1:slotIndexA=a..b").is_err());
        assert!(parse_serialization_attr("iden3:v1:slotIndexA=.a").is_err());
        assert!(parse_serialization_attr("iden3:v1:").is_err());
    }

    #[test]
    fn empty_path_leaves_slot_unbound() {
        let paths =
            parse_serialization_attr("iden3:v1:slotIndexA=&slotValueA=credentialSubject.age")
                .unwrap();
        assert_eq!(paths.get(SlotLabel::IndexA), None);
        assert_eq!(paths.get(SlotLabel::ValueA), Some("credentialSubject.age"));
        assert_eq!(paths.iter().count(), 1);
    }

    #[test]
    fn empty_path_still_counts_as_a_key() {
        let err = parse_serialization_attr("iden3:v1:slotIndexA=&slotIndexA=a").unwrap_err();
        assert!(format!("{err}").contains("repeated"));
    }

    #[test]
    fn path_display_joins_segments() {
        let p = DocumentPath::parse("credentialSubject.address.zip").unwrap();
        assert_eq!(p.to_string(), "credentialSubject.address.zip");
    }

    proptest! {
        /// Arbitrary input either parses or yields a malformed-attribute error.
        #[test]
        fn never_panics(attr in "(iden3:v1:)?[a-zA-Z.=&]{0,40}") {
            match parse_serialization_attr(&attr) {
                Ok(_) => {}
                Err(e) => prop_assert!(
                    matches!(e, CodecError::MalformedSerializationAttribute { .. }),
                    "unexpected error kind: {:?}", e
                ),
            }
        }

        /// Well-formed fragments always bind exactly the keys given.
        #[test]
        fn well_formed_fragments_bind(
            a in "[a-z]{1,8}(\\.[a-z]{1,8}){0,2}",
            b in "[a-z]{1,8}(\\.[a-z]{1,8}){0,2}",
        ) {
            let attr = format!("iden3:v1:slotValueA={a}&slotIndexB={b}");
            let paths = parse_serialization_attr(&attr).unwrap();
            prop_assert_eq!(paths.get(SlotLabel::ValueA), Some(a.as_str()));
            prop_assert_eq!(paths.get(SlotLabel::IndexB), Some(b.as_str()));
            prop_assert_eq!(paths.get(SlotLabel::IndexA), None);
        }
    }
}
