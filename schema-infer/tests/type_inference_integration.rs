//! Integration tests for TypeInferenceEngine through the public API.

use std::sync::{Arc, Mutex};

use arrow::array::{ArrayRef, BooleanArray, Date32Array, Float64Array, Int64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use schema_infer::observer::{InferenceEvent, NoopObserver};
use schema_infer::{
    CellValue, Column, ColumnType, Dataset, EmptyColumnPolicy, InferenceConfig, InferenceError,
    TypeInferenceEngine,
};

fn engine() -> TypeInferenceEngine {
    TypeInferenceEngine::builder()
        .observer(NoopObserver)
        .build()
        .unwrap()
}

fn infer(values: &[&str]) -> ColumnType {
    engine()
        .infer(&Column::from_values("col", values.iter().copied()))
        .unwrap()
}

/// `values` repeated until the column has `rows` rows.
fn repeated(name: &str, values: &[&str], rows: usize) -> Column {
    Column::from_values(name, values.iter().copied().cycle().take(rows))
}

#[test]
fn test_repeated_inference_is_stable() {
    let column = Column::from_values(
        "mixed",
        (0..5_000).map(|i| {
            if i % 7 == 0 {
                "n/a".to_string()
            } else {
                format!("{}.{}", i, i % 10)
            }
        }),
    );
    let engine = engine();

    let first = engine.infer_detailed(&column).unwrap();
    for _ in 0..10 {
        assert_eq!(engine.infer_detailed(&column).unwrap(), first);
    }

    // An independently built engine with the same configuration agrees.
    assert_eq!(self::engine().infer(&column).unwrap(), first.inferred_type);
}

#[test]
fn test_every_result_is_one_of_the_nine_types() {
    let columns = [
        vec!["1", "0"],
        vec!["10%", "abc"],
        vec!["", " ", "  "],
        vec!["-", "+", "."],
        vec!["1e3", "2.5E-2"],
        vec!["NaN", "inf"],
        vec!["12:30", "08:00"],
    ];
    for values in columns {
        let result = engine()
            .infer_detailed(&Column::from_values("c", values.clone()))
            .unwrap();
        assert!(
            ColumnType::ALL.contains(&result.inferred_type),
            "{values:?}"
        );
        assert!((1..=9).contains(&result.rule_position));
    }
}

#[test]
fn test_boolean_tokens_win_over_integer() {
    assert_eq!(infer(&["1", "0"]), ColumnType::Boolean);
    assert_eq!(infer(&["1", "0", "1", "1", "0"]), ColumnType::Boolean);
    assert_eq!(infer(&["Sí", "No"]), ColumnType::Boolean);
    assert_eq!(infer(&["1", "2"]), ColumnType::Integer);
}

#[test]
fn test_boolean_requires_two_distinct_tokens() {
    let result = infer(&["True", "True", "True", "True", "True"]);
    assert_ne!(result, ColumnType::Boolean);
    assert_eq!(result, ColumnType::String);

    // Three distinct tokens are not a boolean column either.
    assert_ne!(
        infer(&["true", "false", "True", "true"]),
        ColumnType::Boolean
    );
}

#[test]
fn test_percentage_values() {
    assert_eq!(infer(&["10%", "25%", "99%"]), ColumnType::Percentage);
    assert_eq!(infer(&["0.5%", "12.25%"]), ColumnType::Percentage);
    assert_ne!(infer(&["10%", "abc"]), ColumnType::Percentage);
    assert_ne!(infer(&["10%", "25"]), ColumnType::Percentage);
}

#[test]
fn test_currency_with_symbol_or_code() {
    assert_eq!(infer(&["$100", "$250"]), ColumnType::Currency);
    assert_eq!(infer(&["USD 100", "USD 250"]), ColumnType::Currency);
    assert_eq!(infer(&["€19.99", "100 EUR", "£5"]), ColumnType::Currency);
    assert_ne!(infer(&["$100", "free"]), ColumnType::Currency);
}

#[test]
fn test_numeric_columns() {
    assert_eq!(infer(&["1", "-22", "333"]), ColumnType::Integer);
    assert_eq!(infer(&["1.0", "2.0", "3"]), ColumnType::Integer);
    assert_eq!(infer(&["1.5", "2", "3.25"]), ColumnType::Float);
}

#[test]
fn test_date_strict_pattern() {
    let result = engine()
        .infer_detailed(&Column::from_values("d", vec!["2023-01-01", "2023-02-15"]))
        .unwrap();
    assert_eq!(result.inferred_type, ColumnType::Date);
    assert_eq!(result.rule_position, 7);

    assert_eq!(infer(&["31/12/2023", "01/01/2024"]), ColumnType::Date);
}

#[test]
fn test_timestamps_need_a_time_of_day() {
    assert_eq!(
        infer(&["2023-01-01 10:00:00", "2023-01-02 11:30:00"]),
        ColumnType::Timestamp
    );
    assert_eq!(
        infer(&["2023-01-01 00:00:00", "2023-01-02 00:00:00"]),
        ColumnType::Date
    );
}

#[test]
fn test_id_uses_full_column_cardinality() {
    let mut values: Vec<String> = (0..9_999).map(|i| format!("user_{i}")).collect();
    values.push("user_0".to_string());
    let column = Column::from_values("user", values);

    let result = engine().infer_detailed(&column).unwrap();
    assert_eq!(result.inferred_type, ColumnType::Id);
    assert_eq!(result.total_rows, 10_000);
    assert_eq!(result.distinct_count, 9_999);
    assert_eq!(result.samples_analyzed, 100);
}

#[test]
fn test_id_ratio_counts_duplicate_rows() {
    // 9,000 distinct codes and 1,000 extra copies of one of them: ratio 0.9.
    let mut values: Vec<String> = (0..9_000).map(|i| format!("order-{i}")).collect();
    values.extend(std::iter::repeat("order-0".to_string()).take(1_000));
    let column = Column::from_values("order", values);

    assert_eq!(engine().infer(&column).unwrap(), ColumnType::Id);
}

#[test]
fn test_all_null_column_is_empty_column_error() {
    let column = Column::new("blank", vec![CellValue::Null; 25]);
    let err = engine().infer(&column).unwrap_err();

    assert!(matches!(err, InferenceError::EmptyColumn { ref column } if column == "blank"));
    assert!(err.to_string().contains("blank"));
}

#[test]
fn test_free_text_is_string() {
    let column = repeated("words", &["hello", "world", "foo"], 30);
    assert_eq!(engine().infer(&column).unwrap(), ColumnType::String);

    // The same three values on three rows are all distinct: identifier-like.
    assert_eq!(infer(&["hello", "world", "foo"]), ColumnType::Id);
}

#[test]
fn test_nulls_are_ignored_when_sampling() {
    let column = Column::from_values(
        "flag",
        vec![
            CellValue::Null,
            CellValue::from("True"),
            CellValue::Float(f64::NAN),
            CellValue::from("False"),
        ],
    );
    let result = engine().infer_detailed(&column).unwrap();
    assert_eq!(result.inferred_type, ColumnType::Boolean);
    assert_eq!(result.null_count, 2);
    assert_eq!(result.samples_analyzed, 2);
}

#[test]
fn test_config_changes_decisions() {
    let column = repeated("answer", &["oui", "non"], 10);
    assert_eq!(engine().infer(&column).unwrap(), ColumnType::String);

    let engine = TypeInferenceEngine::builder()
        .boolean_tokens(["oui", "non"])
        .observer(NoopObserver)
        .build()
        .unwrap();
    assert_eq!(engine.infer(&column).unwrap(), ColumnType::Boolean);

    let strict = TypeInferenceEngine::builder()
        .cardinality_threshold(1.0)
        .observer(NoopObserver)
        .build()
        .unwrap();
    let mostly_unique = Column::from_values("k", (0..10).map(|i| format!("k{}", i.min(8))));
    assert_eq!(strict.infer(&mostly_unique).unwrap(), ColumnType::String);
}

#[test]
fn test_config_from_json_drives_the_engine() {
    let config = InferenceConfig::from_json(
        r#"{"sample_size": 10, "currency_symbols": ["₹"], "empty_columns": "skip"}"#,
    )
    .unwrap();
    let engine = TypeInferenceEngine::builder()
        .config(config)
        .observer(NoopObserver)
        .build()
        .unwrap();

    assert_eq!(
        engine
            .infer(&Column::from_values("inr", vec!["₹10", "₹25"]))
            .unwrap(),
        ColumnType::Currency
    );
    let result = engine
        .infer_detailed(&Column::from_values("n", (0..50).map(|i| i.to_string())))
        .unwrap();
    assert_eq!(result.samples_analyzed, 10);
}

#[test]
fn test_invalid_config_is_rejected() {
    let err = TypeInferenceEngine::builder()
        .sample_size(0)
        .build()
        .unwrap_err();
    assert!(matches!(err, InferenceError::InvalidConfiguration(_)));

    let err = TypeInferenceEngine::builder()
        .date_threshold(1.5)
        .build()
        .unwrap_err();
    assert!(matches!(err, InferenceError::InvalidConfiguration(_)));

    assert!(InferenceConfig::from_json(r#"{"cardinality_threshold": -0.1}"#).is_err());
}

#[test]
fn test_schema_for_dataset() {
    let dataset = Dataset::default()
        .with_column(repeated("active", &["True", "False"], 20))
        .with_column(repeated("discount", &["10%", "25%", "99%"], 20))
        .with_column(repeated("price", &["$100", "$250"], 20))
        .with_column(Column::from_values(
            "qty",
            (0..20).map(|i| (i % 4).to_string()),
        ))
        .with_column(repeated("signup", &["2023-01-01", "2023-02-15"], 20))
        .with_column(Column::from_values(
            "code",
            (0..20).map(|i| format!("c{i}")),
        ))
        .with_column(repeated("notes", &["hello", "world", "foo"], 20));

    let schema = engine().infer_schema(&dataset).unwrap();
    assert_eq!(schema.len(), 7);
    assert_eq!(
        schema.to_json().unwrap(),
        concat!(
            r#"{"schema":{"active":"boolean","discount":"percentage","price":"currency","#,
            r#""qty":"integer","signup":"date","code":"id","notes":"string"}}"#
        )
    );
}

#[test]
fn test_schema_empty_column_policies() {
    let dataset = Dataset::default()
        .with_column(Column::from_values("n", vec!["1", "2", "3", "3", "3"]))
        .with_column(Column::new("blank", vec![CellValue::Null; 5]));

    let err = engine().infer_schema(&dataset).unwrap_err();
    assert!(err.is_empty_column());

    let as_string = TypeInferenceEngine::builder()
        .empty_columns(EmptyColumnPolicy::String)
        .observer(NoopObserver)
        .build()
        .unwrap();
    let schema = as_string.infer_schema(&dataset).unwrap();
    assert_eq!(schema.get("blank"), Some(ColumnType::String));

    let skipping = TypeInferenceEngine::builder()
        .empty_columns(EmptyColumnPolicy::Skip)
        .observer(NoopObserver)
        .build()
        .unwrap();
    let schema = skipping.infer_schema(&dataset).unwrap();
    assert_eq!(schema.len(), 1);
    assert_eq!(schema.get("blank"), None);
}

#[test]
fn test_record_batch_inference() {
    let schema = Arc::new(Schema::new(vec![
        Field::new("flag", DataType::Boolean, true),
        Field::new("count", DataType::Int64, true),
        Field::new("ratio", DataType::Float64, true),
        Field::new("shipped", DataType::Date32, true),
        Field::new("status", DataType::Utf8, true),
    ]));
    let rows = 12;
    let batch = RecordBatch::try_new(
        schema,
        vec![
            Arc::new(BooleanArray::from(
                (0..rows).map(|i| Some(i % 2 == 0)).collect::<Vec<_>>(),
            )) as ArrayRef,
            Arc::new(Int64Array::from(
                (0..rows)
                    .map(|i| Some(i as i64 % 5 + 2))
                    .collect::<Vec<_>>(),
            )) as ArrayRef,
            Arc::new(Float64Array::from(
                (0..rows).map(|i| Some(i as f64 / 4.0)).collect::<Vec<_>>(),
            )) as ArrayRef,
            Arc::new(Date32Array::from(
                (0..rows).map(|i| Some(19_000 + i % 3)).collect::<Vec<_>>(),
            )) as ArrayRef,
            Arc::new(StringArray::from(
                (0..rows)
                    .map(|i| if i % 4 == 0 { None } else { Some("open") })
                    .collect::<Vec<_>>(),
            )) as ArrayRef,
        ],
    )
    .unwrap();

    let dataset = Dataset::from_record_batch(&batch).unwrap();
    let schema = engine().infer_schema(&dataset).unwrap();

    assert_eq!(schema.get("flag"), Some(ColumnType::Boolean));
    assert_eq!(schema.get("count"), Some(ColumnType::Integer));
    assert_eq!(schema.get("ratio"), Some(ColumnType::Float));
    assert_eq!(schema.get("shipped"), Some(ColumnType::Date));
    assert_eq!(schema.get("status"), Some(ColumnType::String));
}

#[test]
fn test_observer_sees_every_decision() {
    let events = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&events);
    let engine = TypeInferenceEngine::builder()
        .observer(move |event: &InferenceEvent<'_>| {
            if let InferenceEvent::RuleMatched {
                column,
                column_type,
                ..
            } = event
            {
                sink.lock()
                    .unwrap()
                    .push((column.to_string(), *column_type));
            }
        })
        .build()
        .unwrap();

    let dataset = Dataset::default()
        .with_column(Column::from_values("a", vec!["1", "0"]))
        .with_column(Column::from_values("b", vec!["$1", "$2"]));
    engine.infer_schema(&dataset).unwrap();

    assert_eq!(
        *events.lock().unwrap(),
        vec![
            ("a".to_string(), ColumnType::Boolean),
            ("b".to_string(), ColumnType::Currency),
        ]
    );
}
