//! End-to-end checking scenarios
//!
//! These tests feed YAML documents through the loader and the checker and
//! verify the issue list, including the fault class that is kept apart from
//! data issues.

use metaspec_core::{
    check, CheckOutcome, Constraint, DocumentLoader, Fault, Format, Issue, TreeValue, Violation,
};
use std::path::Path;

fn yaml(content: &str) -> TreeValue {
    DocumentLoader::new()
        .load_str(content, Format::Yaml, Path::new("inline.yml"))
        .unwrap()
}

const NAME_SPEC: &str = r#"
name:
  doc: Name of the demo
  constraints: [String, non-empty]
"#;

#[cfg(test)]
mod data_issues {
    use super::*;

    #[test]
    fn test_valid_name_has_no_issues() {
        let report = check(&yaml("name: x\n"), &yaml(NAME_SPEC)).unwrap();
        assert!(report.is_clean());
        assert_eq!(report.fields_checked, 1);
        assert!(CheckOutcome::from(report).ok);
    }

    #[test]
    fn test_empty_name_is_a_field_violation() {
        let report = check(&yaml("name: \"\"\n"), &yaml(NAME_SPEC)).unwrap();
        assert_eq!(
            report.issues,
            vec![Issue::FieldViolation {
                path: ".name".to_string(),
                value: "\"\"".to_string(),
                violations: vec![Violation::new(Constraint::NonEmpty)],
            }]
        );
        assert!(report.has_errors());
    }

    #[test]
    fn test_absent_name_is_missing_required() {
        let report = check(&yaml("{}\n"), &yaml(NAME_SPEC)).unwrap();
        assert_eq!(
            report.issues,
            vec![Issue::MissingRequired {
                paths: vec![".name".to_string()]
            }]
        );
        assert!(report.has_errors());
    }

    #[test]
    fn test_extra_field_is_only_a_warning() {
        let report = check(&yaml("name: x\nextra: 1\n"), &yaml(NAME_SPEC)).unwrap();
        assert_eq!(
            report.issues,
            vec![Issue::ExtraMetadata {
                paths: vec![".extra".to_string()]
            }]
        );
        assert!(!report.has_errors());

        let outcome = CheckOutcome::from(report);
        assert!(outcome.ok);
        assert!(!outcome.has_errors());
        assert!(outcome.has_warnings());
    }

    #[test]
    fn test_optional_field_may_be_absent() {
        let spec = yaml(
            r#"
name:
  constraints: [String, non-empty]
tags:
  doc: Free-form tags
  constraints: [Array]
"#,
        );
        let report = check(&yaml("name: x\n"), &spec).unwrap();
        assert!(report.is_clean());
    }

    #[test]
    fn test_violations_accumulate_per_field() {
        let spec = yaml(
            r#"
root:
  constraints: [String, Array, non-empty, absolute-path]
"#,
        );
        let report = check(&yaml("root: []\n"), &spec).unwrap();
        let Issue::FieldViolation { violations, .. } = &report.issues[0] else {
            panic!("expected a field violation, got {:?}", report.issues[0]);
        };
        let failed: Vec<Constraint> = violations.iter().map(|v| v.constraint).collect();
        assert_eq!(
            failed,
            vec![Constraint::String, Constraint::NonEmpty, Constraint::AbsolutePath]
        );
    }

    #[test]
    fn test_issue_order() {
        let spec = yaml(
            r#"
a:
  constraints: [String]
b:
  constraints: [String]
license:
  constraints: [non-empty]
"#,
        );
        let report = check(&yaml("b: 1\na: 2\nextra: x\n"), &spec).unwrap();
        let kinds: Vec<String> = report
            .issues
            .iter()
            .map(|issue| match issue {
                Issue::ExtraMetadata { .. } => "extra".to_string(),
                Issue::MissingRequired { .. } => "missing".to_string(),
                Issue::FieldViolation { path, .. } => path.clone(),
            })
            .collect();

        // Field violations follow data order
        assert_eq!(kinds, vec!["extra", "missing", ".b", ".a"]);
    }
}

#[cfg(test)]
mod sequences {
    use super::*;

    const SERVERS_SPEC: &str = r#"
servers:
  doc: Servers hosting the demo
  constraints: [Array]
  content:
    - constraints: []
      host:
        doc: Location on the host
        constraints: [String, non-empty, absolute-path]
"#;

    #[cfg(unix)]
    #[test]
    fn test_every_element_checked_against_one_entry() {
        let data = yaml(
            r#"
servers:
  - host: /a
  - host: rel
"#,
        );
        let report = check(&data, &yaml(SERVERS_SPEC)).unwrap();

        assert_eq!(
            report.issues,
            vec![Issue::FieldViolation {
                path: ".servers[1].host".to_string(),
                value: "\"rel\"".to_string(),
                violations: vec![Violation::new(Constraint::AbsolutePath)],
            }]
        );
        // .servers, two records and two hosts
        assert_eq!(report.fields_checked, 5);
    }

    #[test]
    fn test_missing_required_reports_data_side_path() {
        let report = check(&yaml("servers: []\n"), &yaml(SERVERS_SPEC)).unwrap();
        assert_eq!(
            report.issues,
            vec![Issue::MissingRequired {
                paths: vec![".servers[0].host".to_string()]
            }]
        );
    }

    #[test]
    fn test_unknown_record_fields_are_extra() {
        let data = yaml(
            r#"
servers:
  - host: /a
    port: 80
"#,
        );
        let report = check(&data, &yaml(SERVERS_SPEC)).unwrap();
        assert_eq!(
            report.issues[0],
            Issue::ExtraMetadata {
                paths: vec![".servers[0].port".to_string()]
            }
        );
    }
}

#[cfg(test)]
mod faults {
    use super::*;
    use metaspec_core::TreeKind;

    #[test]
    fn test_unknown_constraint_faults() {
        let spec = yaml("name:\n  constraints: [Bogus]\n");
        let result = check(&yaml("name: x\n"), &spec);

        assert_eq!(
            result.clone().unwrap_err(),
            Fault::unknown_constraint("Bogus".to_string(), ".name".to_string())
        );

        let outcome = CheckOutcome::from(result);
        assert!(!outcome.ok);
        assert!(outcome.buggy);
        assert!(outcome.issues.is_empty());
        assert!(outcome.message.contains("Bogus"));
    }

    #[test]
    fn test_unknown_constraint_on_unbound_field_faults() {
        let spec = yaml("name:\n  constraints: [String]\nother:\n  constraints: [Bogus]\n");
        let fault = check(&yaml("name: x\n"), &spec).unwrap_err();
        assert!(matches!(fault, Fault::UnknownConstraint { ref name, .. } if name == "Bogus"));
    }

    #[test]
    fn test_duplicate_signature_faults() {
        let spec = yaml(
            r#"
a:
  constraints: []
  b:
    constraints: [String]
  content:
    b:
      constraints: [String]
"#,
        );
        let fault = check(&yaml("a:\n  b: x\n"), &spec).unwrap_err();
        assert_eq!(
            fault,
            Fault::duplicate_signature(
                ".a.b".to_string(),
                ".a.b".to_string(),
                ".a.content.b".to_string()
            )
        );
    }

    #[test]
    fn test_bound_node_without_constraints_faults() {
        let spec = yaml("parent:\n  child:\n    constraints: [String]\n");
        let fault = check(&yaml("parent:\n  child: x\n"), &spec).unwrap_err();
        assert_eq!(fault, Fault::missing_constraints(".parent".to_string()));
    }

    #[test]
    fn test_malformed_constraints_fault() {
        let spec = yaml("name:\n  constraints: String\n");
        let fault = check(&yaml("name: x\n"), &spec).unwrap_err();
        assert!(matches!(fault, Fault::MalformedConstraints { .. }));
        assert_eq!(fault.path(), ".name");
    }

    #[test]
    fn test_path_not_found_names_the_tree() {
        let fault = Fault::path_not_found(".gone".to_string(), TreeKind::Spec);
        assert_eq!(fault.to_string(), "cannot find .gone in the spec file");
    }
}
