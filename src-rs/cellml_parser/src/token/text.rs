//! Decoding of character entities.
//!
//! Attribute values are written with `&amp;`, `&lt;`, `&gt;` and `&quot;`
//! escaped. The decoder also accepts `&apos;` and numeric character
//! references, which other writers commonly produce.

use std::borrow::Cow;

/// Replaces every entity in `raw` with the character it stands for.
///
/// Returns the byte offset of the `&` that starts an entity which is not
/// recognized, or that is never terminated by `;`.
pub fn unescape(raw: &str) -> Result<Cow<'_, str>, usize> {
    if !raw.contains('&') {
        return Ok(Cow::Borrowed(raw));
    }

    let mut output = String::with_capacity(raw.len());
    let mut rest = raw;

    while let Some(ampersand) = rest.find('&') {
        output.push_str(&rest[..ampersand]);

        let entity_offset = raw.len() - rest.len() + ampersand;
        let after = &rest[ampersand + 1..];
        let semicolon = after.find(';').ok_or(entity_offset)?;

        let c = decode_entity(&after[..semicolon]).ok_or(entity_offset)?;
        output.push(c);

        rest = &after[semicolon + 1..];
    }

    output.push_str(rest);
    Ok(Cow::Owned(output))
}

fn decode_entity(entity: &str) -> Option<char> {
    match entity {
        "amp" => Some('&'),
        "lt" => Some('<'),
        "gt" => Some('>'),
        "quot" => Some('"'),
        "apos" => Some('\''),
        _ => {
            let number = entity.strip_prefix('#')?;
            let code = match number.strip_prefix(['x', 'X']) {
                Some(hex) => u32::from_str_radix(hex, 16).ok()?,
                None => number.parse().ok()?,
            };
            char::from_u32(code)
        }
    }
}
