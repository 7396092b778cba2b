//! Envelope normalization into [`EmailDocument`]

use crate::envelope::{MessagePart, RawEnvelope};
use crate::error::{ParseError, Result};
use crate::types::EmailDocument;
use base64::Engine;
use base64::alphabet;
use base64::engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig};
use std::collections::HashMap;
use tracing::{debug, warn};

const LENIENT: GeneralPurposeConfig =
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent);

const URL_SAFE_LENIENT: GeneralPurpose = GeneralPurpose::new(&alphabet::URL_SAFE, LENIENT);

const STANDARD_LENIENT: GeneralPurpose = GeneralPurpose::new(&alphabet::STANDARD, LENIENT);

/// Normalize an envelope, degrading any structural problem to `None`
#[must_use]
pub fn normalize(envelope: &RawEnvelope) -> Option<EmailDocument> {
    try_normalize(envelope)
        .map_err(|e| warn!("Could not normalize email: {e}"))
        .ok()
}

/// Normalize an envelope given as JSON text
#[must_use]
pub fn normalize_json(json: &str) -> Option<EmailDocument> {
    serde_json::from_str::<RawEnvelope>(json)
        .map_err(|e| ParseError::Structure(e.to_string()))
        .and_then(|envelope| try_normalize(&envelope))
        .map_err(|e| warn!("Could not normalize email: {e}"))
        .ok()
}

/// Normalize an envelope given as an already-parsed JSON value
#[must_use]
pub fn normalize_value(value: serde_json::Value) -> Option<EmailDocument> {
    serde_json::from_value::<RawEnvelope>(value)
        .map_err(|e| ParseError::Structure(e.to_string()))
        .and_then(|envelope| try_normalize(&envelope))
        .map_err(|e| warn!("Could not normalize email: {e}"))
        .ok()
}

/// Normalize a raw RFC 822 message
#[must_use]
pub fn normalize_rfc822(raw: &[u8]) -> Option<EmailDocument> {
    try_normalize_rfc822(raw)
        .map_err(|e| warn!("Could not parse raw message: {e}"))
        .ok()
}

/// Normalize an envelope, reporting why it is unusable
///
/// Undecodable body data is not an error here: it yields an empty body.
pub fn try_normalize(envelope: &RawEnvelope) -> Result<EmailDocument> {
    let doc = if let Some(payload) = &envelope.payload {
        from_payload(payload)
    } else if let Some(raw) = &envelope.raw {
        try_normalize_rfc822(&decode_base64url(raw)?)?
    } else {
        return Err(ParseError::MissingPayload);
    };

    debug!("Normalized email: {}", doc.subject);

    Ok(doc.with_ids(envelope.id.clone(), envelope.thread_id.clone()))
}

pub fn try_normalize_rfc822(raw: &[u8]) -> Result<EmailDocument> {
    let parsed = mailparse::parse_mail(raw)?;

    let headers = collect_headers(
        parsed
            .headers
            .iter()
            .map(|h| (h.get_key(), h.get_value())),
    );
    let subject = headers.get("subject").cloned().unwrap_or_default();

    let mut html = None;
    let mut text = None;
    collect_mime_bodies(&parsed, &mut html, &mut text);
    let body = html
        .filter(|b: &String| !b.trim().is_empty())
        .or(text)
        .unwrap_or_default();

    Ok(EmailDocument::with_headers(subject, body, headers))
}

fn from_payload(payload: &MessagePart) -> EmailDocument {
    let headers = collect_headers(
        payload
            .headers
            .iter()
            .map(|h| (h.name.clone(), h.value.clone())),
    );
    let subject = headers.get("subject").cloned().unwrap_or_default();

    let body = select_body_data(payload).map_or_else(String::new, |data| {
        decode_text(data).unwrap_or_else(|e| {
            warn!("Discarding undecodable body: {e}");
            String::new()
        })
    });

    EmailDocument::with_headers(subject, body, headers)
}

/// Lowercase header names; a repeated name keeps its last value
fn collect_headers(headers: impl Iterator<Item = (String, String)>) -> HashMap<String, String> {
    headers
        .map(|(name, value)| (name.to_lowercase(), value))
        .collect()
}

/// Encoded body data: the payload's own body, else html, else plain text
fn select_body_data(payload: &MessagePart) -> Option<&str> {
    payload.data().or_else(|| {
        find_part_data(&payload.parts, "text/html")
            .or_else(|| find_part_data(&payload.parts, "text/plain"))
    })
}

/// Depth-first search for the first part of `mime_type` that carries data
fn find_part_data<'a>(parts: &'a [MessagePart], mime_type: &str) -> Option<&'a str> {
    parts.iter().find_map(|part| {
        if part.mime_type.eq_ignore_ascii_case(mime_type) {
            part.data()
        } else {
            find_part_data(&part.parts, mime_type)
        }
    })
}

fn collect_mime_bodies(
    parsed: &mailparse::ParsedMail,
    html: &mut Option<String>,
    text: &mut Option<String>,
) {
    if !parsed.subparts.is_empty() {
        for part in &parsed.subparts {
            collect_mime_bodies(part, html, text);
        }
        return;
    }

    let content_type = parsed.ctype.mimetype.to_lowercase();
    let slot = match content_type.as_str() {
        "text/html" => html,
        "text/plain" => text,
        _ => return,
    };

    if slot.is_none() {
        match parsed.get_body() {
            Ok(body) => *slot = Some(body),
            Err(e) => warn!("Skipping undecodable {content_type} part: {e}"),
        }
    }
}

/// Decode base64url data, tolerating missing padding and the standard alphabet
pub fn decode_base64url(data: &str) -> Result<Vec<u8>> {
    let compact: String = data.chars().filter(|c| !c.is_whitespace()).collect();
    URL_SAFE_LENIENT
        .decode(&compact)
        .or_else(|_| STANDARD_LENIENT.decode(&compact))
        .map_err(Into::into)
}

fn decode_text(data: &str) -> Result<String> {
    Ok(String::from_utf8(decode_base64url(data)?)?)
}
