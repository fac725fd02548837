//! Selector table behaviour suite
//!
//! Covers first-match-wins ordering, the leading catch-all fast path, error
//! kinds, and table loading from JSON / YAML.

use std::cell::RefCell;

use gf_select::{
    FallbackPolicy, InputMap, InputValue, Inputs, Requirement, SelectError, SelectorRecord,
    SelectorTable,
};
use serde_json::json;

// ═══════════════════════════════════════════════════════════════════════════════
// TEST FIXTURES
// ═══════════════════════════════════════════════════════════════════════════════

/// Inputs that remember every hint looked up
struct RecordingInputs {
    inner: InputMap,
    requested: RefCell<Vec<String>>,
}

impl RecordingInputs {
    fn new(inner: InputMap) -> Self {
        Self {
            inner,
            requested: RefCell::new(Vec::new()),
        }
    }

    fn requested(&self) -> Vec<String> {
        self.requested.borrow().clone()
    }
}

impl Inputs for RecordingInputs {
    fn get(&self, hint: &str) -> Option<&InputValue> {
        self.requested.borrow_mut().push(hint.to_string());
        self.inner.get(hint)
    }
}

fn pid_table() -> SelectorTable<String> {
    SelectorTable::new(
        "pid",
        vec![
            SelectorRecord::new(
                vec![
                    Requirement::range("Denom", 1, 2),
                    Requirement::exact("Market", "NV"),
                ],
                "PID-NV-LOW".to_string(),
            ),
            SelectorRecord::new(vec![Requirement::range("Denom", 1, 2)], "PID-LOW".to_string()),
            SelectorRecord::new(vec![Requirement::range("Denom", 5, 10)], "PID-MID".to_string()),
            SelectorRecord::new(
                vec![Requirement::one_of("Denom", [25, 50, 100])],
                "PID-HIGH".to_string(),
            ),
        ],
    )
}

// ═══════════════════════════════════════════════════════════════════════════════
// ORDERING
// ═══════════════════════════════════════════════════════════════════════════════

#[test]
fn test_first_matching_record_wins() {
    let table = pid_table();
    let nv = InputMap::new().with("Denom", 1).with("Market", "NV");
    let nj = InputMap::new().with("Denom", 1).with("Market", "NJ");

    assert_eq!(table.select(&nv).unwrap(), "PID-NV-LOW");
    assert_eq!(table.select(&nj).unwrap(), "PID-LOW");
    assert_eq!(table.select(&InputMap::new().with("Denom", 50)).unwrap(), "PID-HIGH");
}

#[test]
fn test_later_records_not_evaluated_after_match() {
    let table = SelectorTable::new(
        "probe",
        vec![
            SelectorRecord::new(vec![Requirement::exact("Denom", 1)], "first"),
            SelectorRecord::new(vec![Requirement::exact("Lines", 20)], "second"),
        ],
    );
    let inputs = RecordingInputs::new(InputMap::new().with("Denom", 1).with("Lines", 20));

    assert_eq!(table.select(&inputs), Ok(&"first"));
    assert_eq!(inputs.requested(), vec!["Denom".to_string()]);
}

#[test]
fn test_record_short_circuits_on_first_miss() {
    let table = SelectorTable::new(
        "probe",
        vec![
            SelectorRecord::new(
                vec![
                    Requirement::exact("Denom", 1),
                    Requirement::exact("Market", "NV"),
                ],
                "nv",
            ),
            SelectorRecord::new(vec![Requirement::exact("Lines", 20)], "lines"),
        ],
    );
    let inputs = RecordingInputs::new(
        InputMap::new()
            .with("Denom", 2)
            .with("Market", "NV")
            .with("Lines", 20),
    );

    assert_eq!(table.select(&inputs), Ok(&"lines"));
    assert_eq!(inputs.requested(), vec!["Denom".to_string(), "Lines".to_string()]);
}

#[test]
fn test_leading_fallback_reads_no_inputs() {
    let table = SelectorTable::new(
        "probe",
        vec![
            SelectorRecord::fallback("default"),
            SelectorRecord::new(vec![Requirement::exact("Denom", 1)], "exact"),
        ],
    );
    let inputs = RecordingInputs::new(InputMap::new().with("Denom", 1));

    assert_eq!(table.select(&inputs), Ok(&"default"));
    assert!(inputs.requested().is_empty());
}

#[test]
fn test_selection_is_deterministic() {
    let table = pid_table();
    let inputs = InputMap::new().with("Denom", 7);
    let first = table.select(&inputs).unwrap().clone();
    for _ in 0..10 {
        assert_eq!(table.select(&inputs).unwrap(), &first);
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// CATCH-ALL PLACEMENT
// ═══════════════════════════════════════════════════════════════════════════════

#[test]
fn test_denomination_scenario() {
    let records = || {
        vec![
            SelectorRecord::new(vec![Requirement::one_of("Denom", [1, 2])], "P1"),
            SelectorRecord::new(vec![Requirement::range("Denom", 5, 10)], "P2"),
            SelectorRecord::fallback("Pdefault"),
        ]
    };

    let strict = SelectorTable::new("pid", records());
    assert_eq!(strict.select(&InputMap::new().with("Denom", 1)), Ok(&"P1"));
    assert_eq!(strict.select(&InputMap::new().with("Denom", 7)), Ok(&"P2"));
    assert!(matches!(
        strict.select(&InputMap::new().with("Denom", 999)),
        Err(SelectError::NoMatch { .. })
    ));

    let lenient = SelectorTable::with_policy("pid", FallbackPolicy::AnyPosition, records());
    assert_eq!(lenient.select(&InputMap::new().with("Denom", 999)), Ok(&"Pdefault"));

    let mut leading = records();
    leading.rotate_right(1);
    let leading = SelectorTable::new("pid", leading);
    assert_eq!(leading.select(&InputMap::new().with("Denom", 999)), Ok(&"Pdefault"));
    assert_eq!(leading.select(&InputMap::new().with("Denom", 1)), Ok(&"Pdefault"));
}

// ═══════════════════════════════════════════════════════════════════════════════
// LOADING
// ═══════════════════════════════════════════════════════════════════════════════

#[test]
fn test_table_from_json() {
    let doc = json!({
        "name": "pid",
        "records": [
            {
                "requirements": [
                    { "hint": "Denom", "matcher": { "type": "one_of", "values": [1, 2] } }
                ],
                "payload": { "pid": "A", "rtp": 9210 }
            },
            {
                "requirements": [
                    { "hint": "Market", "matcher": { "type": "exact", "value": "NJ" } }
                ],
                "payload": { "pid": "B", "rtp": 9400 }
            }
        ]
    });
    let table: SelectorTable<serde_json::Value> =
        SelectorTable::from_json_str(&doc.to_string()).unwrap();

    assert_eq!(table.name(), "pid");
    assert_eq!(table.policy(), FallbackPolicy::LeadingOnly);
    let picked = table.select(&InputMap::new().with("Market", "NJ")).unwrap();
    assert_eq!(picked["pid"], "B");
}

#[test]
fn test_table_from_yaml() {
    let yaml = r#"
name: pid
fallback: any_position
records:
  - requirements:
      - hint: Denom
        matcher: { type: at_least, min: 100 }
    payload: HIGH
  - payload: DEFAULT
"#;
    let table: SelectorTable<String> = SelectorTable::from_yaml_str(yaml).unwrap();
    assert_eq!(table.len(), 2);
    assert_eq!(table.select(&InputMap::new().with("Denom", 500)).unwrap(), "HIGH");
    assert_eq!(table.select(&InputMap::new().with("Denom", 5)).unwrap(), "DEFAULT");
}

#[test]
fn test_malformed_table_is_configuration_error() {
    let err = SelectorTable::<String>::from_json_str("{\"records\": 5}").unwrap_err();
    assert!(matches!(err, SelectError::Configuration { .. }));
}
