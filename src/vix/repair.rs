/// Converts the `window.masterPlaylist` JS object literal into strict JSON
///
/// The upstream object always has the same shape, so this is a fixed set of
/// text substitutions rather than a parser:
/// 1. the first `params:` key gets quoted
/// 2. the first `url:` key gets quoted
/// 3. every `'` becomes `"`
/// 4. commas directly followed (ignoring whitespace) by `}` are dropped
///
/// Escapes, comments, nested quotes and trailing commas before `]` are not
/// handled and will fail to decode afterwards.
#[must_use]
pub fn repair_object_literal(literal: &[u8]) -> Vec<u8> {
    let literal = replace_first(literal, b"params:", b"\"params\":");
    let literal = replace_first(&literal, b"url:", b"\"url\":");
    let literal = literal
        .into_iter()
        .map(|b| if b == b'\'' { b'"' } else { b })
        .collect::<Vec<u8>>();

    strip_trailing_commas(&literal)
}

fn replace_first(haystack: &[u8], needle: &[u8], replacement: &[u8]) -> Vec<u8> {
    let Some(at) = haystack.windows(needle.len()).position(|w| w == needle) else {
        return haystack.to_vec();
    };

    let mut out = Vec::with_capacity(haystack.len() + replacement.len() - needle.len());
    out.extend_from_slice(&haystack[..at]);
    out.extend_from_slice(replacement);
    out.extend_from_slice(&haystack[at + needle.len()..]);
    out
}

fn strip_trailing_commas(literal: &[u8]) -> Vec<u8> {
    literal
        .iter()
        .enumerate()
        .filter(|&(i, &b)| {
            b != b',' || literal[i + 1..].iter().find(|c| !is_whitespace(**c)) != Some(&b'}')
        })
        .map(|(_, &b)| b)
        .collect()
}

const fn is_whitespace(b: u8) -> bool {
    matches!(b, b' ' | b'\t' | b'\n' | b'\r')
}
