//! Primitive maskers for single PII values.
//!
//! Each masker is a pure, total function over a nullable string. Malformed
//! input falls back to the original value; missing input falls back to a
//! fixed sentinel. Lengths are counted in Unicode scalar values.

/// Token substituted for the hidden part of a value.
pub const MASK_TOKEN: &str = "***";

/// Sentinel returned for a missing email, identifier or IP address.
pub const NOT_AVAILABLE: &str = "N/A";

/// Sentinel returned for a missing name.
pub const ANONYMOUS: &str = "Anonymous";

/// Separator placed between the visible head and tail of an identifier.
pub const ID_ELLIPSIS: &str = "...";

/// Identifiers shorter than this are returned unchanged.
pub const MIN_MASKABLE_ID_LEN: usize = 8;

/// Number of leading and trailing characters an identifier keeps.
const ID_VISIBLE: usize = 4;

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

/// Masks an email address: `test@example.com` becomes `t***t@e***.com`.
///
/// The local part keeps its first character, and its last character when it
/// is longer than two. The first domain label keeps its first character when
/// it is longer than two, otherwise it is kept whole. Remaining labels are
/// kept verbatim. Input without a domain is returned unchanged.
///
/// ```
/// use adminmask::mask_email;
///
/// assert_eq!(mask_email(Some("ab@example.com")), "a***@e***.com");
/// assert_eq!(mask_email(Some("not-an-email")), "not-an-email");
/// assert_eq!(mask_email(None), "N/A");
/// ```
#[must_use]
pub fn mask_email(email: Option<&str>) -> String {
    let Some(email) = non_empty(email) else {
        return NOT_AVAILABLE.to_string();
    };

    let mut parts = email.split('@');
    let local = parts.next().unwrap_or_default();
    let domain = match parts.next() {
        Some(domain) if !domain.is_empty() => domain,
        _ => return email.to_string(),
    };

    let local_chars: Vec<char> = local.chars().collect();
    let mut masked = String::with_capacity(email.len() + 2 * MASK_TOKEN.len());
    masked.extend(local_chars.first());
    masked.push_str(MASK_TOKEN);
    if local_chars.len() > 2 {
        masked.extend(local_chars.last());
    }
    masked.push('@');

    let mut labels = domain.split('.');
    let first_label = labels.next().unwrap_or_default();
    if first_label.chars().count() > 2 {
        masked.extend(first_label.chars().next());
        masked.push_str(MASK_TOKEN);
    } else {
        masked.push_str(first_label);
    }

    // A bare host (`user@localhost`) has nothing after the first label.
    let rest: Vec<&str> = labels.collect();
    if !rest.is_empty() {
        masked.push('.');
        masked.push_str(&rest.join("."));
    }
    masked
}

/// Masks a personal name word by word: `Jane Doe` becomes `J*** D***`.
///
/// Single-character words (initials) are kept as they are.
#[must_use]
pub fn mask_name(name: Option<&str>) -> String {
    let Some(name) = non_empty(name) else {
        return ANONYMOUS.to_string();
    };

    let parts: Vec<String> = name
        .split_whitespace()
        .map(|part| {
            let mut chars = part.chars();
            match (chars.next(), chars.next()) {
                (Some(first), Some(_)) => format!("{first}{MASK_TOKEN}"),
                _ => part.to_string(),
            }
        })
        .collect();

    if parts.is_empty() {
        return ANONYMOUS.to_string();
    }
    parts.join(" ")
}

/// Masks an identifier to its first and last four characters: `abcd...wxyz`.
///
/// Identifiers shorter than [`MIN_MASKABLE_ID_LEN`] are returned unchanged.
/// This is a display heuristic, not a secrecy guarantee.
#[must_use]
pub fn mask_id(id: Option<&str>) -> String {
    let Some(id) = non_empty(id) else {
        return NOT_AVAILABLE.to_string();
    };

    let chars: Vec<char> = id.chars().collect();
    let total = chars.len();
    if total < MIN_MASKABLE_ID_LEN {
        return id.to_string();
    }

    let head: String = chars[..ID_VISIBLE].iter().collect();
    let tail: String = chars[total - ID_VISIBLE..].iter().collect();
    format!("{head}{ID_ELLIPSIS}{tail}")
}

/// Masks the last two octets of an IPv4 address: `192.168.***.***`.
///
/// Anything that does not split into exactly four dot-separated parts is
/// returned unchanged.
#[must_use]
pub fn mask_ip(ip: Option<&str>) -> String {
    let Some(ip) = non_empty(ip) else {
        return NOT_AVAILABLE.to_string();
    };

    let parts: Vec<&str> = ip.split('.').collect();
    match parts.as_slice() {
        [first, second, _, _] => format!("{first}.{second}.{MASK_TOKEN}.{MASK_TOKEN}"),
        _ => ip.to_string(),
    }
}
