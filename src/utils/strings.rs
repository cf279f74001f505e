/// Converts a camelCase or PascalCase type name to snake_case.
///
/// Used to derive table names from the Rust type passed to the database
/// macros, so `Resource` maps to `resource` before pluralisation.
///
/// # Examples
///
/// ```
/// use resource_service::utils::strings::camel_to_snake_case;
///
/// assert_eq!(camel_to_snake_case("Resource"), "resource");
/// assert_eq!(camel_to_snake_case("ResourceTag"), "resource_tag");
/// ```
///
/// Consecutive uppercase letters are only lowercased, so acronyms such as
/// `ABC` collapse to `abc`.
pub fn camel_to_snake_case(camel: &str) -> String {
    let mut snake = String::with_capacity(camel.len() + 4);
    let mut chars = camel.chars().peekable();

    while let Some(current) = chars.next() {
        match chars.peek() {
            Some(&next) if current.is_ascii_lowercase() && next.is_ascii_uppercase() => {
                snake.push(current);
                snake.push('_');
            }
            _ => snake.push(current.to_ascii_lowercase()),
        }
    }

    snake
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_camel_to_snake_case() {
        assert_eq!(camel_to_snake_case("Resource"), "resource");
        assert_eq!(camel_to_snake_case("resourceTag"), "resource_tag");
        assert_eq!(camel_to_snake_case("ResourceTagLink"), "resource_tag_link");
        assert_eq!(camel_to_snake_case("ABC"), "abc");
        assert_eq!(camel_to_snake_case("simple"), "simple");
        assert_eq!(camel_to_snake_case(""), "");
    }
}
