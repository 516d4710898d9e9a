use percent_encoding::percent_decode;

/// Escape HTML special characters
pub fn escape_html(text: &str) -> String {
    text.replace("&", "&amp;")
        .replace("<", "&lt;")
        .replace(">", "&gt;")
        .replace("\"", "&quot;")
        .replace("'", "&#39;")
}

/// First value of `key` in an `application/x-www-form-urlencoded` payload.
///
/// Values are decoded to raw bytes, so percent-escapes that are not valid
/// UTF-8 survive unchanged.
pub fn form_value(payload: &[u8], key: &str) -> Option<Vec<u8>> {
    payload
        .split(|&b| b == b'&')
        .filter(|pair| !pair.is_empty())
        .find_map(|pair| {
            let (name, value) = match pair.iter().position(|&b| b == b'=') {
                Some(i) => (&pair[..i], &pair[i + 1..]),
                None => (pair, &[][..]),
            };
            (decode_form_component(name) == key.as_bytes()).then(|| decode_form_component(value))
        })
}

fn decode_form_component(raw: &[u8]) -> Vec<u8> {
    let spaced: Vec<u8> = raw.iter().map(|&b| if b == b'+' { b' ' } else { b }).collect();
    percent_decode(&spaced).collect()
}
