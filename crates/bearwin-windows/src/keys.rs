use bearwin_core::KeyCode;

/// Converts a key code to the Windows virtual key that produces it.
///
/// Letters map to their key regardless of case, and shifted US-layout
/// symbols map to the key they are typed with (`'!'` is the `1` key).
pub fn vk_from_key(key: KeyCode) -> Option<u16> {
    let ch = key.code();

    if ch.is_ascii_alphabetic() {
        return Some(u16::from(ch.to_ascii_uppercase()));
    }
    if ch.is_ascii_digit() {
        return Some(u16::from(ch));
    }

    match ch {
        // Named keys share their codes with the virtual keys.
        8 | 9 | 13 | 27 | b' ' => Some(u16::from(ch)),

        b')' => Some(u16::from(b'0')),
        b'!' => Some(u16::from(b'1')),
        b'@' => Some(u16::from(b'2')),
        b'#' => Some(u16::from(b'3')),
        b'$' => Some(u16::from(b'4')),
        b'%' => Some(u16::from(b'5')),
        b'^' => Some(u16::from(b'6')),
        b'&' => Some(u16::from(b'7')),
        b'*' => Some(u16::from(b'8')),
        b'(' => Some(u16::from(b'9')),

        // OEM keys
        b';' | b':' => Some(0xBA),
        b'=' | b'+' => Some(0xBB),
        b',' | b'<' => Some(0xBC),
        b'-' | b'_' => Some(0xBD),
        b'.' | b'>' => Some(0xBE),
        b'/' | b'?' => Some(0xBF),
        b'`' | b'~' => Some(0xC0),
        b'[' | b'{' => Some(0xDB),
        b'\\' | b'|' => Some(0xDC),
        b']' | b'}' => Some(0xDD),
        b'\'' | b'"' => Some(0xDE),

        _ => None,
    }
}
