/// Split a `name@version` module id into its name and optional version.
///
/// Scoped names keep their leading `@scope/` intact; only the `@`
/// separating name from version splits the id. Ids without a version
/// (`"left-pad"`, `"@scope/pkg"`) yield `None`.
pub fn split_module_id(id: &str) -> (&str, Option<&str>) {
    let unscoped = id.strip_prefix('@').unwrap_or(id);

    match unscoped.find('@') {
        Some(pos) => {
            let split_at = pos + (id.len() - unscoped.len());
            let (name, version) = id.split_at(split_at);
            (name, Some(&version[1..]))
        }
        None => (id, None),
    }
}
