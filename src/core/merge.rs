use crate::utils::error::{Result, SpliceError};

/// Separator between two merged payloads: comma + blank line.
pub const PAYLOAD_SEPARATOR: &str = ",\n\n";

/// Extracts the payload of a fragment: the text strictly between the
/// first `{` and the last `}`, trimmed, with at most one trailing comma
/// (and the whitespace before it) removed.
///
/// Returns `None` when either delimiter is missing or the last `}` does
/// not come after the first `{`. Callers treat that as a per-fragment
/// failure, never a fatal one.
pub fn extract_payload(text: &str) -> Option<String> {
    let open = text.find('{')?;
    let close = text.rfind('}')?;
    if close <= open {
        return None;
    }

    let inner = text[open + 1..close].trim();
    let inner = match inner.strip_suffix(',') {
        Some(stripped) => stripped.trim_end(),
        None => inner,
    };
    Some(inner.to_string())
}

/// Counts the top-level entries of a payload: commas at nesting depth
/// zero plus one. Braces, brackets and parens nest; commas inside
/// string literals (single, double or backtick quoted) do not count.
pub fn count_entries(payload: &str) -> usize {
    if payload.trim().is_empty() {
        return 0;
    }

    let mut depth = 0usize;
    let mut commas = 0usize;
    let mut in_string: Option<char> = None;
    let mut escaped = false;

    for ch in payload.chars() {
        if let Some(quote) = in_string {
            if escaped {
                escaped = false;
            } else if ch == '\\' {
                escaped = true;
            } else if ch == quote {
                in_string = None;
            }
            continue;
        }

        match ch {
            '"' | '\'' | '`' => in_string = Some(ch),
            '{' | '[' | '(' => depth += 1,
            '}' | ']' | ')' => depth = depth.saturating_sub(1),
            ',' if depth == 0 => commas += 1,
            _ => {}
        }
    }

    commas + 1
}

/// Joins payloads in input order with [`PAYLOAD_SEPARATOR`].
pub fn merge_payloads(payloads: &[String]) -> String {
    payloads.join(PAYLOAD_SEPARATOR)
}

pub fn start_marker(declaration_name: &str) -> String {
    format!("const {}={{", declaration_name)
}

/// Renders the full replacement declaration around a merged payload.
pub fn render_declaration(declaration_name: &str, merged: &str) -> String {
    format!("const {}={{\n{}\n}};", declaration_name, merged)
}

/// Replaces the `const <NAME>={ ... };` span of `document` with
/// `replacement`.
///
/// The span starts at the literal start marker and ends at the nearest
/// `};` found scanning backward from the end anchor. The anchor must
/// occur exactly once after the start marker; zero and multiple
/// occurrences are reported as distinct errors so a renamed or
/// duplicated anchor fails loudly instead of splicing the wrong span.
///
/// All failures here are fatal and happen before any write.
pub fn splice_document(
    document: &str,
    declaration_name: &str,
    end_anchor: &str,
    replacement: &str,
) -> Result<String> {
    let marker = start_marker(declaration_name);
    let start = document
        .find(&marker)
        .ok_or_else(|| SpliceError::StartMarkerMissing {
            marker: marker.clone(),
        })?;

    let block_body = start + marker.len();
    let mut anchor_hits = document[block_body..]
        .match_indices(end_anchor)
        .map(|(offset, _)| offset);
    let first_hit = anchor_hits.next().ok_or_else(|| SpliceError::AnchorMissing {
        anchor: end_anchor.to_string(),
    })?;
    let extra_hits = anchor_hits.count();
    if extra_hits > 0 {
        return Err(SpliceError::AnchorAmbiguous {
            anchor: end_anchor.to_string(),
            count: extra_hits + 1,
        });
    }
    let anchor = block_body + first_hit;

    // Nearest `};` before the anchor; the marker itself contains no `}`,
    // so any hit inside the searched range closes the block.
    let close = document[start..anchor]
        .rfind("};")
        .ok_or_else(|| SpliceError::CloseMarkerMissing {
            marker: marker.clone(),
        })?;
    let close_end = start + close + 2;

    let mut updated = String::with_capacity(document.len() + replacement.len());
    updated.push_str(&document[..start]);
    updated.push_str(replacement);
    updated.push_str(&document[close_end..]);
    Ok(updated)
}
