use std::borrow::Cow;

/// Entities every XML parser resolves without a DTD.
const PREDEFINED_ENTITIES: [&str; 5] = ["amp", "lt", "gt", "quot", "apos"];
/// Longest reference body worth scanning for its `;`. `#x10FFFF` is the longest legal one.
const MAX_REFERENCE_LEN: usize = 8;

/// Escapes every `&` that does not start a well formed entity or character reference.
///
/// Object keys are allowed to contain a bare `&` (`name&file.txt`) and plenty of
/// servers put them into the listing unescaped. Those become `&amp;` while
/// `&amp;`, `&lt;`, `&#38;`, `&#x26;` and friends are left alone, so running this
/// twice is the same as running it once.
///
/// Named entities other than the five predefined ones (`&nbsp;`) are escaped as well
/// because they cannot be resolved without a DTD.
pub fn sanitize_entities(content: &str) -> Cow<'_, str> {
    if !content.contains('&') {
        return Cow::Borrowed(content);
    }
    let mut sanitized = String::with_capacity(content.len() + 16);
    let mut rest = content;
    while let Some(index) = rest.find('&') {
        sanitized.push_str(&rest[..index]);
        let reference = &rest[index..];
        if starts_with_valid_reference(reference) {
            sanitized.push('&');
        } else {
            sanitized.push_str("&amp;");
        }
        rest = &reference[1..];
    }
    sanitized.push_str(rest);
    Cow::Owned(sanitized)
}

/// `reference` must start with `&`.
fn starts_with_valid_reference(reference: &str) -> bool {
    let body = &reference.as_bytes()[1..];
    let Some(end) = body
        .iter()
        .take(MAX_REFERENCE_LEN + 1)
        .position(|byte| *byte == b';')
    else {
        return false;
    };
    // `;` is ASCII so this is always a char boundary
    let name = &reference[1..1 + end];
    match name.strip_prefix('#') {
        Some(number) => {
            let code_point = match number.strip_prefix('x') {
                Some(hex) if is_all(hex, |c| c.is_ascii_hexdigit()) => {
                    u32::from_str_radix(hex, 16).ok()
                }
                None if is_all(number, |c| c.is_ascii_digit()) => number.parse::<u32>().ok(),
                _ => None,
            };
            code_point
                .and_then(char::from_u32)
                .is_some_and(|c| c != '\0')
        }
        None => PREDEFINED_ENTITIES.contains(&name),
    }
}
fn is_all(value: &str, predicate: impl Fn(char) -> bool) -> bool {
    !value.is_empty() && value.chars().all(predicate)
}
