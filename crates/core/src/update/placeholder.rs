//! Placeholder token generation for update expressions.

use std::collections::BTreeSet;

/// Prefix of attribute-name placeholders.
pub const NAME_PREFIX: char = '#';

/// Prefix of attribute-value placeholders.
pub const VALUE_PREFIX: char = ':';

/// Stem of positional tokens for names that cannot be used verbatim.
const POSITIONAL_STEM: &str = "attr";

/// Returns true if `name` can be embedded in a placeholder as-is.
///
/// The store's expression grammar only allows ASCII letters, digits and `_`
/// after the `#` / `:` prefix.
pub(crate) fn is_token_safe(name: &str) -> bool {
    !name.is_empty()
        && name
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'_')
}

/// Assigns a unique placeholder token to each attribute name, in input order.
///
/// Token-safe names are their own token. Every other name gets the first free
/// `attr<N>`, skipping tokens already claimed by a verbatim name.
pub fn assign_tokens<'a>(names: &[&'a str]) -> Vec<(&'a str, String)> {
    let mut taken: BTreeSet<String> = names
        .iter()
        .filter(|name| is_token_safe(name))
        .map(|name| (*name).to_string())
        .collect();

    let mut next_index = 0usize;
    names
        .iter()
        .map(|name| {
            if is_token_safe(name) {
                return (*name, (*name).to_string());
            }
            let token = loop {
                let candidate = format!("{POSITIONAL_STEM}{next_index}");
                next_index += 1;
                if !taken.contains(&candidate) {
                    break candidate;
                }
            };
            taken.insert(token.clone());
            (*name, token)
        })
        .collect()
}
