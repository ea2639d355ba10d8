//! Filter predicates and their translation to a MongoDB filter document.

use mongodb::bson::{Bson, Document, doc};
use regex::Regex;

use crate::error::{ValidationError, ValidationResult};
use crate::range::{NumberRange, validate_number_range};
use crate::spec::ResourceSpec;
use crate::timestamp::Timestamps;

#[derive(Debug, Clone, PartialEq)]
pub enum Condition {
    /// Field equals the value
    Equals(Bson),
    /// Case-insensitive regex match
    Matches(String),
    /// Inclusive numeric range
    Within(NumberRange),
    /// Field is present, e.g. a key of an embedded map
    Exists,
}

/// One predicate: the request parameter it came from and the stored field it targets.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldCondition {
    pub param: &'static str,
    pub field: String,
    pub condition: Condition,
}

/// Implemented by each resource's filter DTO.
pub trait FilterFields {
    /// Predicates for the parameters that are set.
    fn conditions(&self) -> Vec<FieldCondition>;
}

/// Collects predicates from optional parameters, skipping absent ones.
///
/// ```ignore
/// Conditions::new()
///     .equals("name", "name", self.name.as_deref())
///     .matches("nameRegex", "name", self.name_regex.as_deref())
///     .within("costPrice", "costPrice", self.cost_price.as_ref())
///     .build()
/// ```
#[derive(Debug, Default)]
pub struct Conditions(Vec<FieldCondition>);

impl Conditions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn equals<V: Into<Bson>>(
        mut self,
        param: &'static str,
        field: &str,
        value: Option<V>,
    ) -> Self {
        if let Some(value) = value {
            self.push(param, field, Condition::Equals(value.into()));
        }
        self
    }

    pub fn matches(mut self, param: &'static str, field: &str, pattern: Option<&str>) -> Self {
        if let Some(pattern) = pattern {
            self.push(param, field, Condition::Matches(pattern.to_string()));
        }
        self
    }

    pub fn within(mut self, param: &'static str, field: &str, range: Option<&NumberRange>) -> Self {
        if let Some(range) = range {
            self.push(param, field, Condition::Within(*range));
        }
        self
    }

    /// Require `field` to exist. The path usually embeds the parameter value.
    pub fn exists(mut self, param: &'static str, field: Option<String>) -> Self {
        if let Some(field) = field {
            self.0.push(FieldCondition {
                param,
                field,
                condition: Condition::Exists,
            });
        }
        self
    }

    pub fn build(self) -> Vec<FieldCondition> {
        self.0
    }

    fn push(&mut self, param: &'static str, field: &str, condition: Condition) {
        self.0.push(FieldCondition {
            param,
            field: field.to_string(),
            condition,
        });
    }
}

/// Exclusive pairs and enum values first, then regex syntax, then ranges.
pub fn validate_filter<F: FilterFields>(spec: &ResourceSpec, filter: Option<&F>) -> ValidationResult {
    let Some(filter) = filter else {
        return Ok(());
    };
    let conditions = filter.conditions();
    let is_set = |param: &str| conditions.iter().any(|c| c.param == param);

    for &(exact, regex) in spec.exclusive {
        if is_set(exact) && is_set(regex) {
            return Err(ValidationError::bad_request(format!(
                "provide either {exact} or {regex}"
            )));
        }
    }

    for condition in &conditions {
        let (Some(allowed), Condition::Equals(Bson::String(value))) =
            (spec.allowed_values(condition.param), &condition.condition)
        else {
            continue;
        };

        if !allowed.contains(&value.as_str()) {
            return Err(ValidationError::bad_request(format!(
                "{} must be one of: {}",
                condition.param,
                allowed.join(", ")
            )));
        }
    }

    for condition in &conditions {
        if let Condition::Matches(pattern) = &condition.condition {
            if Regex::new(pattern).is_err() {
                return Err(ValidationError::bad_request(format!(
                    "{} must be a valid regular expression",
                    condition.param
                )));
            }
        }
    }

    for condition in &conditions {
        if let Condition::Within(range) = &condition.condition {
            validate_number_range(condition.param, Some(range))?;
        }
    }

    Ok(())
}

/// Conjunction of all predicates; absent filter and timestamps match everything.
pub fn build_filter<F: FilterFields>(filter: Option<&F>, timestamps: Option<&Timestamps>) -> Document {
    let mut doc = Document::new();

    if let Some(filter) = filter {
        for FieldCondition {
            field, condition, ..
        } in filter.conditions()
        {
            match condition {
                Condition::Equals(value) => {
                    doc.insert(field, value);
                }
                Condition::Matches(pattern) => {
                    doc.insert(field, doc! { "$regex": pattern, "$options": "i" });
                }
                Condition::Within(range) => {
                    if let Some(bounds) = range.to_document() {
                        doc.insert(field, bounds);
                    }
                }
                Condition::Exists => {
                    doc.insert(field, doc! { "$exists": true });
                }
            }
        }
    }

    if let Some(timestamps) = timestamps {
        timestamps.apply(&mut doc);
    }

    doc
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::timestamp::DateRange;

    #[derive(Default)]
    struct WidgetFilter {
        name: Option<String>,
        name_regex: Option<String>,
        color: Option<String>,
        weight: Option<NumberRange>,
        part_id: Option<String>,
    }

    impl FilterFields for WidgetFilter {
        fn conditions(&self) -> Vec<FieldCondition> {
            Conditions::new()
                .equals("name", "name", self.name.as_deref())
                .matches("nameRegex", "name", self.name_regex.as_deref())
                .equals("color", "color", self.color.as_deref())
                .within("weight", "weight", self.weight.as_ref())
                .exists("partId", self.part_id.as_ref().map(|id| format!("parts.{id}")))
                .build()
        }
    }

    const WIDGETS: ResourceSpec = ResourceSpec {
        name: "widget",
        sortable: &["name"],
        exclusive: &[("name", "nameRegex")],
        enums: &[("color", &["red", "green", "blue"])],
    };

    #[test]
    fn test_empty_filter_builds_empty_document() {
        assert!(build_filter(Some(&WidgetFilter::default()), None).is_empty());
        assert!(build_filter::<WidgetFilter>(None, None).is_empty());
        assert!(build_filter::<WidgetFilter>(None, Some(&Timestamps::default())).is_empty());
    }

    #[test]
    fn test_exact_and_regex_are_exclusive() {
        let filter = WidgetFilter {
            name: Some("Foo".into()),
            name_regex: Some("Fo.*".into()),
            ..Default::default()
        };
        let err = validate_filter(&WIDGETS, Some(&filter)).unwrap_err();
        assert_eq!(err.kind, ErrorKind::BadRequest);
        assert_eq!(err.message, "provide either name or nameRegex");
    }

    #[test]
    fn test_enum_value_checked() {
        let filter = WidgetFilter {
            color: Some("purple".into()),
            ..Default::default()
        };
        let err = validate_filter(&WIDGETS, Some(&filter)).unwrap_err();
        assert_eq!(err.message, "color must be one of: red, green, blue");

        let filter = WidgetFilter {
            color: Some("green".into()),
            ..Default::default()
        };
        assert!(validate_filter(&WIDGETS, Some(&filter)).is_ok());
    }

    #[test]
    fn test_malformed_regex_rejected() {
        let filter = WidgetFilter {
            name_regex: Some("(".into()),
            ..Default::default()
        };
        let err = validate_filter(&WIDGETS, Some(&filter)).unwrap_err();
        assert_eq!(err.kind, ErrorKind::BadRequest);
        assert_eq!(err.message, "nameRegex must be a valid regular expression");

        let filter = WidgetFilter {
            name_regex: Some("^wid(get)?s$".into()),
            ..Default::default()
        };
        assert!(validate_filter(&WIDGETS, Some(&filter)).is_ok());
    }

    #[test]
    fn test_exclusion_checked_before_ranges() {
        let filter = WidgetFilter {
            name: Some("a".into()),
            name_regex: Some("b".into()),
            weight: Some(NumberRange::new(Some(5.0), Some(1.0))),
            ..Default::default()
        };
        let err = validate_filter(&WIDGETS, Some(&filter)).unwrap_err();
        assert_eq!(err.message, "provide either name or nameRegex");

        let filter = WidgetFilter {
            weight: Some(NumberRange::new(Some(5.0), Some(1.0))),
            ..Default::default()
        };
        let err = validate_filter(&WIDGETS, Some(&filter)).unwrap_err();
        assert_eq!(err.message, "weight end must be greater than or equal to start");
    }

    #[test]
    fn test_build_filter_combines_predicates() {
        let filter = WidgetFilter {
            name_regex: Some("^wid".into()),
            color: Some("red".into()),
            weight: Some(NumberRange::new(Some(1.5), None)),
            part_id: Some("p-9".into()),
            ..Default::default()
        };
        let timestamps = Timestamps {
            created_at: Some(DateRange::new(None, Some("2024-06-01T00:00:00Z"))),
            updated_at: None,
        };

        assert_eq!(
            build_filter(Some(&filter), Some(&timestamps)),
            doc! {
                "name": { "$regex": "^wid", "$options": "i" },
                "color": "red",
                "weight": { "$gte": 1.5 },
                "parts.p-9": { "$exists": true },
                "createdAt": { "$lte": "2024-06-01T00:00:00.000Z" },
            }
        );
    }
}
