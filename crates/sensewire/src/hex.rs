/// Parse a hex string (optionally whitespace-separated byte pairs) into bytes.
pub fn parse_hex(input: &str) -> Result<Vec<u8>, String> {
    let compact: String = input.chars().filter(|c| !c.is_ascii_whitespace()).collect();
    if compact.len() % 2 != 0 {
        return Err(format!("odd number of hex digits ({})", compact.len()));
    }

    let mut bytes = Vec::with_capacity(compact.len() / 2);
    for pair in compact.as_bytes().chunks(2) {
        let pair = std::str::from_utf8(pair).map_err(|_| "non-ASCII hex input".to_string())?;
        let byte =
            u8::from_str_radix(pair, 16).map_err(|_| format!("invalid hex byte {pair:?}"))?;
        bytes.push(byte);
    }
    Ok(bytes)
}

/// Render bytes as lowercase hex, no separators.
pub fn format_hex(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(bytes.len() * 2);
    for byte in bytes {
        out.push_str(&format!("{byte:02x}"));
    }
    out
}
