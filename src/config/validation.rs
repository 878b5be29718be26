//! Validation of declarative provider trees.
//!
//! Tree files are validated before anything is built so that a file with
//! several mistakes reports all of them in one pass. The checks mirror what the
//! builder operations would reject (identifiers, slot clashes) plus the
//! problems the builders tolerate but a tree file should not contain:
//!
//! 1. **Identifiers**: every identifier, including matrix element identifiers,
//!    must satisfy the protocol character rules
//! 2. **Slots**: siblings must use distinct slot numbers
//! 3. **Enumerations**: enum parameters must declare at least one value and
//!    select an index inside the list
//! 4. **Ranges**: integer and real parameters need `min <= max` and an initial
//!    value inside the range
//! 5. **Blind sources**: blind-source matrices must name their blind source
//!
//! # Example
//! ```rust
//! use emberplus_provider::config::{validate_provider_config, ProviderConfig};
//! use emberplus_provider::errors::ValidationError;
//!
//! let cfg: ProviderConfig = serde_yaml::from_str(r#"
//! elements:
//!   - type: enum
//!     number: 1
//!     identifier: mode
//!     values: []
//! "#).unwrap();
//!
//! let errors = validate_provider_config(&cfg).unwrap_err();
//! assert_eq!(errors, vec![ValidationError::EmptyEnumeration { element: "mode".to_string() }]);
//! ```

use std::collections::HashSet;

use crate::config::{ElementConfig, MatrixKindConfig, ProviderConfig};
use crate::errors::ValidationError;
use crate::model::assert_identifier_valid;

/// Identifier path reported for top-level elements.
const ROOT_PATH: &str = "";

/// Validate a whole tree file, returning every problem found.
pub fn validate_provider_config(cfg: &ProviderConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();
    validate_elements(ROOT_PATH, &cfg.elements, &mut errors);

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn validate_elements(parent: &str, elements: &[ElementConfig], errors: &mut Vec<ValidationError>) {
    let mut slots = HashSet::new();

    for element in elements {
        if !slots.insert(element.number()) {
            errors.push(ValidationError::DuplicateSlot {
                parent: parent.to_string(),
                number: element.number(),
            });
        }

        check_identifier(parent, element.identifier(), errors);
        let path = child_path(parent, element.identifier());

        match element {
            ElementConfig::Node(node) => validate_elements(&path, &node.children, errors),
            ElementConfig::String(_) | ElementConfig::Boolean(_) => {}
            ElementConfig::Integer(integer) => {
                check_range(&path, integer.value, integer.range(), errors)
            }
            ElementConfig::Real(real) => check_range(&path, real.value, real.range(), errors),
            ElementConfig::Enum(enumeration) => {
                if enumeration.values.is_empty() {
                    errors.push(ValidationError::EmptyEnumeration { element: path });
                } else {
                    let maximum = enumeration.values.len() as i64 - 1;
                    check_range(&path, enumeration.value, (0, maximum), errors);
                }
            }
            ElementConfig::Matrix(matrix) => {
                if let Some(identifier) = &matrix.matrix_identifier {
                    check_identifier(&path, identifier, errors);
                }
                if matrix.kind == MatrixKindConfig::BlindSource && matrix.blind_source.is_none() {
                    errors.push(ValidationError::MissingBlindSource { element: path });
                }
            }
        }
    }
}

fn check_identifier(parent: &str, identifier: &str, errors: &mut Vec<ValidationError>) {
    if assert_identifier_valid(identifier).is_err() {
        errors.push(ValidationError::InvalidIdentifier {
            parent: parent.to_string(),
            identifier: identifier.to_string(),
        });
    }
}

fn check_range<T: PartialOrd>(
    element: &str,
    value: T,
    (minimum, maximum): (T, T),
    errors: &mut Vec<ValidationError>,
) {
    if minimum > maximum {
        errors.push(ValidationError::InvertedRange {
            element: element.to_string(),
        });
    } else if !(minimum <= value && value <= maximum) {
        errors.push(ValidationError::ValueOutOfRange {
            element: element.to_string(),
        });
    }
}

fn child_path(parent: &str, identifier: &str) -> String {
    if parent.is_empty() {
        identifier.to_string()
    } else {
        format!("{}/{}", parent, identifier)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(yaml: &str) -> ProviderConfig {
        serde_yaml::from_str(yaml).unwrap()
    }

    #[test]
    fn test_valid_tree_passes() {
        let cfg = parse(
            r#"
elements:
  - type: node
    number: 1
    identifier: device
    children:
      - {type: real, number: 1, identifier: level, value: -6.0, min: -60.0, max: 0.0}
      - {type: enum, number: 2, identifier: mode, values: [a, b], value: 1}
      - {type: matrix, number: 3, identifier: router, kind: blind_source, targets: [o], sources: [i], blind_source: Blind}
  - type: node
    number: 2
    identifier: other
"#,
        );

        assert_eq!(validate_provider_config(&cfg), Ok(()));
    }

    #[test]
    fn test_validation_errors_table_driven() {
        struct TestCase {
            name: &'static str,
            yaml: &'static str,
            expected: Vec<ValidationError>,
        }

        let test_cases = vec![
            TestCase {
                name: "nested duplicate slot",
                yaml: r#"
elements:
  - type: node
    number: 1
    identifier: device
    children:
      - {type: boolean, number: 4, identifier: a}
      - {type: boolean, number: 4, identifier: b}
"#,
                expected: vec![ValidationError::DuplicateSlot {
                    parent: "device".to_string(),
                    number: 4,
                }],
            },
            TestCase {
                name: "invalid identifier",
                yaml: "elements: [{type: string, number: 1, identifier: 9lives}]",
                expected: vec![ValidationError::InvalidIdentifier {
                    parent: "".to_string(),
                    identifier: "9lives".to_string(),
                }],
            },
            TestCase {
                name: "inverted range",
                yaml: "elements: [{type: integer, number: 1, identifier: gain, min: 5, max: 1}]",
                expected: vec![ValidationError::InvertedRange {
                    element: "gain".to_string(),
                }],
            },
            TestCase {
                name: "value outside default range",
                yaml: "elements: [{type: integer, number: 1, identifier: gain, value: 300}]",
                expected: vec![ValidationError::ValueOutOfRange {
                    element: "gain".to_string(),
                }],
            },
            TestCase {
                name: "enum index outside list",
                yaml: "elements: [{type: enum, number: 1, identifier: mode, values: [a], value: 1}]",
                expected: vec![ValidationError::ValueOutOfRange {
                    element: "mode".to_string(),
                }],
            },
            TestCase {
                name: "blind matrix without blind source",
                yaml: "elements: [{type: matrix, number: 1, identifier: r, kind: blind_source, targets: [o], sources: [i]}]",
                expected: vec![ValidationError::MissingBlindSource {
                    element: "r".to_string(),
                }],
            },
            TestCase {
                name: "invalid matrix identifier",
                yaml: "elements: [{type: matrix, number: 1, identifier: r, kind: dynamic, targets: [o], sources: [i], matrix_identifier: 'x y'}]",
                expected: vec![ValidationError::InvalidIdentifier {
                    parent: "r".to_string(),
                    identifier: "x y".to_string(),
                }],
            },
        ];

        for case in test_cases {
            let cfg = parse(case.yaml);
            assert_eq!(
                validate_provider_config(&cfg),
                Err(case.expected),
                "case: {}",
                case.name
            );
        }
    }
}
