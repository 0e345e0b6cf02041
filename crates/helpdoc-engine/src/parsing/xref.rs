use crate::registry::NameResolver;

/// Separator marking a qualified `Type.member` reference.
pub const QUALIFIER: char = '.';

/// Splits the payload of a see-also line into trimmed, non-empty names.
pub fn split_names(list: &str) -> impl Iterator<Item = &str> {
    list.split(',').map(str::trim).filter(|n| !n.is_empty())
}

/// Recovers the display casing of a cross-referenced name.
///
/// Qualified names pass through untouched. Other names take the registry's
/// casing when known; unknown names keep mixed case and are lowercased when
/// written all upper (or all lower) case, since help text conventionally
/// shouts function names.
pub fn resolve_name<N: NameResolver + ?Sized>(resolver: &N, name: &str) -> String {
    if name.contains(QUALIFIER) {
        return name.to_string();
    }
    if let Some(canonical) = resolver.resolve(name) {
        return canonical;
    }
    if is_mixed_case(name) {
        name.to_string()
    } else {
        name.to_lowercase()
    }
}

fn is_mixed_case(name: &str) -> bool {
    let has_upper = name.chars().any(char::is_uppercase);
    let has_lower = name.chars().any(char::is_lowercase);
    has_upper && has_lower
}
