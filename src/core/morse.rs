//! Morse-code rendering used as an alternate matching channel for CW QSOs.

/// Dot/dash sequence for each byte from 0 through 95; `None` is unmapped.
const CW_MAPPING: [Option<&str>; 96] = {
    let mut table: [Option<&str>; 96] = [None; 96];
    table[b' ' as usize] = Some(" ");
    table[b'!' as usize] = Some("-.-.--");
    table[b'"' as usize] = Some(".-..-.");
    table[b'$' as usize] = Some("...-..-");
    table[b'&' as usize] = Some(".-...");
    table[b'(' as usize] = Some("-.--.");
    table[b')' as usize] = Some("-.--.-");
    table[b'+' as usize] = Some(".-.-.");
    table[b',' as usize] = Some("--..--");
    table[b'-' as usize] = Some("-....-");
    table[b'.' as usize] = Some(".-.-.-");
    table[b'/' as usize] = Some("-..-.");
    table[b'0' as usize] = Some("-----");
    table[b'1' as usize] = Some(".----");
    table[b'2' as usize] = Some("..---");
    table[b'3' as usize] = Some("...--");
    table[b'4' as usize] = Some("....-");
    table[b'5' as usize] = Some(".....");
    table[b'6' as usize] = Some("-....");
    table[b'7' as usize] = Some("--...");
    table[b'8' as usize] = Some("---..");
    table[b'9' as usize] = Some("----.");
    table[b':' as usize] = Some("---...");
    table[b';' as usize] = Some("-.-.-.");
    table[b'=' as usize] = Some("-...-");
    table[b'?' as usize] = Some("..--..");
    table[b'@' as usize] = Some(".--.-.");
    table[b'A' as usize] = Some(".-");
    table[b'B' as usize] = Some("-...");
    table[b'C' as usize] = Some("-.-.");
    table[b'D' as usize] = Some("-..");
    table[b'E' as usize] = Some(".");
    table[b'F' as usize] = Some("..-.");
    table[b'G' as usize] = Some("--.");
    table[b'H' as usize] = Some("....");
    table[b'I' as usize] = Some("..");
    table[b'J' as usize] = Some(".---");
    table[b'K' as usize] = Some("-.-");
    table[b'L' as usize] = Some(".-..");
    table[b'M' as usize] = Some("--");
    table[b'N' as usize] = Some("-.");
    table[b'O' as usize] = Some("---");
    table[b'P' as usize] = Some(".--.");
    table[b'Q' as usize] = Some("--.-");
    table[b'R' as usize] = Some(".-.");
    table[b'S' as usize] = Some("...");
    table[b'T' as usize] = Some("-");
    table[b'U' as usize] = Some("..-");
    table[b'V' as usize] = Some("...-");
    table[b'W' as usize] = Some(".--");
    table[b'X' as usize] = Some("-..-");
    table[b'Y' as usize] = Some("-.--");
    table[b'Z' as usize] = Some("--..");
    table[b'_' as usize] = Some("..--.-");
    table
};

/// Filler emitted for bytes without a Morse rendering.
const UNMAPPED: &str = " ";

/// Morse rendering of a single byte, or `None` when unmapped.
pub fn cw_symbol(byte: u8) -> Option<&'static str> {
    CW_MAPPING.get(usize::from(byte)).copied().flatten()
}

/// Concatenated Morse rendering of `s`, with no gaps between characters.
///
/// Lowercase letters are not in the table and render as the filler, the same
/// as any other unmapped byte.
pub fn to_cw(s: &[u8]) -> String {
    let mut out = String::with_capacity(s.len() * 4);
    for &byte in s {
        out.push_str(cw_symbol(byte).unwrap_or(UNMAPPED));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn letters_and_digits_concatenate_without_gaps() {
        assert_eq!(to_cw(b"K1ABC"), "-.-.----.--...-.-.");
        assert_eq!(to_cw(b"SOS"), "...---...");
    }

    #[test]
    fn unmapped_and_out_of_range_bytes_become_filler() {
        assert_eq!(to_cw(b"#"), " ");
        assert_eq!(to_cw(b"e"), " ");
        assert_eq!(to_cw(&[0xC3, 0xA9]), "  ");
        assert_eq!(to_cw(b"A#B"), ".- -...");
    }

    #[test]
    fn output_grows_with_input() {
        let long = "0".repeat(40);
        assert_eq!(to_cw(long.as_bytes()).len(), 200);
    }
}
