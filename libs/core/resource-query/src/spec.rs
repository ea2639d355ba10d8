/// Per-resource rules consumed by the generic validators.
///
/// ```ignore
/// pub const PRODUCTS: ResourceSpec = ResourceSpec {
///     name: "product",
///     sortable: &["name", "costPrice"],
///     exclusive: &[("name", "nameRegex")],
///     enums: &[("type", ProductType::VARIANTS)],
/// };
/// ```
#[derive(Debug, Clone, Copy)]
pub struct ResourceSpec {
    /// Singular name used in messages, e.g. `product {id} not found`
    pub name: &'static str,
    /// Fields a list query may sort on
    pub sortable: &'static [&'static str],
    /// Filter parameters that cannot be combined, typically an exact match and its regex
    pub exclusive: &'static [(&'static str, &'static str)],
    /// Filter parameters restricted to a fixed set of values
    pub enums: &'static [(&'static str, &'static [&'static str])],
}

impl ResourceSpec {
    pub fn allowed_values(&self, param: &str) -> Option<&'static [&'static str]> {
        self.enums
            .iter()
            .find(|(name, _)| *name == param)
            .map(|(_, values)| *values)
    }

    pub fn not_found_message(&self, id: &str) -> String {
        format!("{} {} not found", self.name, id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WIDGETS: ResourceSpec = ResourceSpec {
        name: "widget",
        sortable: &["name"],
        exclusive: &[],
        enums: &[("color", &["red", "blue"])],
    };

    #[test]
    fn test_allowed_values() {
        assert_eq!(WIDGETS.allowed_values("color"), Some(&["red", "blue"][..]));
        assert_eq!(WIDGETS.allowed_values("name"), None);
    }

    #[test]
    fn test_not_found_message() {
        assert_eq!(WIDGETS.not_found_message("w-1"), "widget w-1 not found");
    }
}
