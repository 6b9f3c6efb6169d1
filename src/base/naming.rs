//! Name conversions shared by the compiler and the model.

/// Prefix of attribute setter methods.
pub const SETTER_PREFIX: &str = "set";
pub const GETTER_PREFIX: &str = "get";
pub const ISSER_PREFIX: &str = "is";
/// Suffix of getters that expose the enum values of a non-enum attribute.
pub const ENUM_GETTER_SUFFIX: &str = "Enum";

/// Upper-case the first character: `errorSender` → `ErrorSender`.
pub fn to_upper_camel_case(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Lower-case the first character: `Configuration` → `configuration`.
pub fn to_lower_camel_case(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// The attribute name of a setter method, `setFooBar` → `fooBar`.
///
/// Returns `None` when the method is not a setter or is exactly `set`.
pub fn attribute_name_of(method_name: &str) -> Option<String> {
    attribute_name_with_prefix(method_name, SETTER_PREFIX)
}

/// The attribute name of `method_name` after `prefix`, `getFoo` → `foo`.
pub fn attribute_name_with_prefix(method_name: &str, prefix: &str) -> Option<String> {
    let stripped = method_name.strip_prefix(prefix)?;
    if stripped.is_empty() {
        return None;
    }
    Some(to_lower_camel_case(stripped))
}

/// The boxed counterpart of a primitive type name, other names unchanged.
pub fn boxed_type_name(type_name: &str) -> &str {
    let name = type_name.strip_prefix("java.lang.").unwrap_or(type_name);
    match name {
        "int" => "Integer",
        "long" => "Long",
        "short" => "Short",
        "byte" => "Byte",
        "boolean" => "Boolean",
        "char" => "Character",
        "float" => "Float",
        "double" => "Double",
        _ => name,
    }
}

/// The simple name of a qualified name: `a.b.Foo` → `Foo`.
pub fn simple_name_of(qualified_name: &str) -> &str {
    qualified_name
        .rsplit_once('.')
        .map(|(_, simple)| simple)
        .unwrap_or(qualified_name)
}

/// Postfix that capability members carry in their simple name.
///
/// Interface names like `IPipe` lose their leading `I`; other names are
/// used as is.
pub fn capability_postfix(simple_name: &str) -> &str {
    let mut chars = simple_name.chars();
    match (chars.next(), chars.next()) {
        (Some('I'), Some(second)) if second.is_uppercase() => &simple_name[1..],
        _ => simple_name,
    }
}
