//! Format sniffing: PEM, bare Base64 (optionally inside XML tags) or DER,
//! certificate or CSR.
//!
//! Branches are tried strictly in table order. An input may satisfy more
//! than one predicate (a PEM CSR also "contains BEGIN CERTIFICATE"), so the
//! order of [`BRANCHES`] decides the outcome.

use base64::engine::general_purpose::{STANDARD, STANDARD_NO_PAD};
use base64::Engine as _;
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::{debug, trace};
use x509_parser::certificate::X509Certificate;
use x509_parser::certification_request::X509CertificationRequest;
use x509_parser::prelude::FromDer;

use certscope_core::{ObjectKind, SourceEncoding};

use crate::error::{DecodeError, Result};

static XML_TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]+>").expect("valid regex"));
static BASE64_TEXT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9+/=\s]+$").expect("valid regex"));

const CSR_MARKERS: [&str; 2] = ["BEGIN CERTIFICATE REQUEST", "BEGIN NEW CERTIFICATE REQUEST"];
const CSR_TAGS: [&str; 2] = ["CERTIFICATE REQUEST", "NEW CERTIFICATE REQUEST"];
const CERT_TAG: &str = "CERTIFICATE";

/// Outcome of sniffing: what the bytes are and the DER to decode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sniffed {
    pub kind: ObjectKind,
    pub encoding: SourceEncoding,
    /// Exactly the DER the accepting parser consumed
    pub der: Vec<u8>,
}

/// Views of the input shared by every branch.
struct Input<'a> {
    raw: &'a [u8],
    /// Lossy UTF-8 with stray control bytes removed; `None` only for empty input
    text: Option<String>,
}

impl Input<'_> {
    fn text_contains(&self, needle: &str) -> bool {
        self.text.as_deref().is_some_and(|t| t.contains(needle))
    }
}

struct Branch {
    name: &'static str,
    applies: fn(&Input<'_>) -> bool,
    parse: fn(&Input<'_>) -> Option<Sniffed>,
}

const BRANCHES: &[Branch] = &[
    Branch {
        name: "pem-csr",
        applies: |input| CSR_MARKERS.iter().any(|m| input.text_contains(m)),
        parse: pem_csr,
    },
    Branch {
        name: "pem-certificate",
        applies: |input| input.text_contains("BEGIN CERTIFICATE") && !input.text_contains("REQUEST"),
        parse: pem_certificate,
    },
    Branch {
        name: "base64-der",
        applies: |input| input.text.is_some(),
        parse: base64_der,
    },
    Branch {
        name: "der-certificate",
        applies: |_| true,
        parse: |input| der_certificate(input.raw, SourceEncoding::Der),
    },
    Branch {
        name: "der-csr",
        applies: |_| true,
        parse: |input| der_csr(input.raw, SourceEncoding::Der),
    },
];

/// Classify `bytes` and return the DER to decode.
///
/// # Errors
///
/// Returns `DecodeError::UnrecognizedFormat` when no branch accepts the input.
pub fn sniff(bytes: &[u8]) -> Result<Sniffed> {
    let input = Input {
        raw: bytes,
        text: text_view(bytes),
    };

    for branch in BRANCHES {
        if !(branch.applies)(&input) {
            trace!(branch = branch.name, "branch does not apply");
            continue;
        }
        if let Some(found) = (branch.parse)(&input) {
            debug!(
                branch = branch.name,
                kind = %found.kind,
                encoding = %found.encoding,
                "input recognised"
            );
            return Ok(found);
        }
        trace!(branch = branch.name, "branch rejected input");
    }

    debug!(len = bytes.len(), "no sniffing branch matched");
    Err(DecodeError::UnrecognizedFormat)
}

/// Lossy UTF-8 view of the input, or `None` when the buffer is empty.
///
/// Control characters other than whitespace are dropped, so a PEM pasted
/// with a trailing NUL still reads as PEM. Binary DER produces a view no
/// text branch accepts and falls through to the raw-DER branches.
fn text_view(bytes: &[u8]) -> Option<String> {
    if bytes.is_empty() {
        return None;
    }
    let text = String::from_utf8_lossy(bytes);
    Some(
        text.chars()
            .filter(|c| !c.is_control() || c.is_ascii_whitespace())
            .collect(),
    )
}

fn pem_csr(input: &Input<'_>) -> Option<Sniffed> {
    let normalized = input.text.as_deref().map(normalize_lines)?;
    // Normalising drops the blank line that ends RFC 1421 headers, so a
    // block carrying headers only parses from the raw bytes.
    pem_block(normalized.as_bytes(), &CSR_TAGS)
        .or_else(|| pem_block(input.raw, &CSR_TAGS))
        .and_then(|der| der_csr(&der, SourceEncoding::Pem))
}

fn pem_certificate(input: &Input<'_>) -> Option<Sniffed> {
    let text = input.text.as_deref()?;
    pem_block(text.as_bytes(), &[CERT_TAG])
        .or_else(|| pem_block(input.raw, &[CERT_TAG]))
        .and_then(|der| der_certificate(&der, SourceEncoding::Pem))
}

fn base64_der(input: &Input<'_>) -> Option<Sniffed> {
    let text = input.text.as_deref()?;
    let stripped = XML_TAG.replace_all(text, "");
    if !BASE64_TEXT.is_match(&stripped) {
        return None;
    }
    let compact: String = stripped.chars().filter(|c| !c.is_whitespace()).collect();
    let der = decode_base64(&compact)?;

    der_certificate(&der, SourceEncoding::Base64)
        .or_else(|| der_csr(&der, SourceEncoding::Base64))
}

fn der_certificate(der: &[u8], encoding: SourceEncoding) -> Option<Sniffed> {
    let (rest, _) = X509Certificate::from_der(der).ok()?;
    Some(Sniffed {
        kind: ObjectKind::Certificate,
        encoding,
        der: consumed(der, rest),
    })
}

fn der_csr(der: &[u8], encoding: SourceEncoding) -> Option<Sniffed> {
    let (rest, _) = X509CertificationRequest::from_der(der).ok()?;
    Some(Sniffed {
        kind: ObjectKind::CertificateSigningRequest,
        encoding,
        der: consumed(der, rest),
    })
}

fn consumed(der: &[u8], rest: &[u8]) -> Vec<u8> {
    der[..der.len() - rest.len()].to_vec()
}

/// First PEM block whose tag is one of `tags`.
fn pem_block(bytes: &[u8], tags: &[&str]) -> Option<Vec<u8>> {
    let blocks = pem::parse_many(bytes).ok()?;
    blocks
        .into_iter()
        .find(|block| tags.contains(&block.tag()))
        .map(pem::Pem::into_contents)
}

/// Trim every line and drop blank ones, joined with `\n`.
fn normalize_lines(text: &str) -> String {
    let mut out = text
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n");
    out.push('\n');
    out
}

/// Strict Base64 first, then tolerate missing or partial padding.
fn decode_base64(compact: &str) -> Option<Vec<u8>> {
    if compact.is_empty() {
        return None;
    }
    STANDARD.decode(compact).ok().or_else(|| {
        let unpadded = compact.trim_end_matches('=');
        STANDARD_NO_PAD.decode(unpadded).ok()
    })
}
