use crate::unit_tests::TestResource;
use crate::{to_failure, to_resource, ConstructionError, Emptiness, ResourceKind, ResourceState};
use std::collections::HashMap;

fn active_classifications<T: Emptiness, E>(resource: &ResourceState<T, E>) -> usize {
    [
        resource.is_loading(),
        resource.is_success(),
        resource.is_failure(),
        resource.is_empty(),
    ]
    .into_iter()
    .filter(|active| *active)
    .count()
}

#[test]
fn test_exactly_one_classification() {
    let resources: Vec<TestResource> = vec![
        ResourceState::LOADING,
        to_resource("data".to_string()),
        to_resource(String::new()),
        to_failure("boom".to_string()),
        ResourceState::empty(),
        ResourceState::new(Some("data".to_string()), Some("boom".to_string()), false).unwrap(),
    ];
    for resource in &resources {
        assert_eq!(active_classifications(resource), 1, "{resource:?}");
    }
}

#[test]
fn test_loading_with_data_is_rejected() {
    let result = ResourceState::<_, String>::new(Some("test".to_string()), None, true);
    assert_eq!(result, Err(ConstructionError::LoadingWithData));
}

#[test]
fn test_loading_with_error_is_rejected() {
    let result = ResourceState::<String, _>::new(None, Some("There is an error".to_string()), true);
    assert_eq!(result, Err(ConstructionError::LoadingWithError));
}

#[test]
fn test_construction_defaults() {
    let resource = ResourceState::<_, String>::new(Some("test".to_string()), None, false).unwrap();
    assert_eq!(resource.data().map(String::as_str), Some("test"));
    assert_eq!(resource.error(), None);
    assert!(!resource.is_loading());
}

#[test]
fn test_round_trip() {
    assert_eq!(to_resource::<_, ()>(42).into_data(), Some(42));
    assert_eq!(to_resource::<_, ()>(vec![1, 2]).into_data(), Some(vec![1, 2]));
    assert_eq!(to_failure::<(), _>("boom").into_error(), Some("boom"));
    let (data, error, loading) = to_failure::<String, _>(404).into_parts();
    assert_eq!((data, error, loading), (None, Some(404), false));
}

#[test]
fn test_loading_constant_equals_fresh_loading() {
    let fresh = TestResource::new(None, None, true).unwrap();
    assert_eq!(fresh, TestResource::LOADING);
    assert_eq!(TestResource::loading(), TestResource::default());
}

#[test]
fn test_emptiness_table() {
    assert!(ResourceState::<i32, ()>::empty().is_empty());
    assert!(to_resource::<_, ()>("").is_empty());
    assert!(to_resource::<_, ()>(Vec::<i32>::new()).is_empty());
    assert!(!to_resource::<_, ()>(0i32).is_empty());
    assert!(!to_resource::<_, ()>(HashMap::<String, i32>::new()).is_empty());
    assert!(!to_resource::<_, ()>("x").is_empty());

    assert_eq!(to_resource::<_, ()>(0i32).kind(), ResourceKind::Success);
    assert_eq!(
        to_resource::<_, ()>(HashMap::<String, i32>::new()).kind(),
        ResourceKind::Success
    );
}

#[cfg(feature = "serde")]
#[test]
fn test_emptiness_table_for_json_values() {
    use serde_json::{json, Value};

    let cases = [
        (Value::Null, true),
        (json!(""), true),
        (json!([]), true),
        (json!(0), false),
        (json!({}), false),
        (json!("x"), false),
    ];
    for (value, empty) in cases {
        assert_eq!(to_resource::<_, ()>(value.clone()).is_empty(), empty, "{value}");
    }
}

#[cfg(feature = "serde")]
#[test]
fn test_deserialize_checks_construction() {
    let ok: TestResource = serde_json::from_str(r#"{"data":"a","error":null,"loading":false}"#).unwrap();
    assert_eq!(ok, to_resource("a".to_string()));

    let invalid = serde_json::from_str::<TestResource>(r#"{"data":"a","error":null,"loading":true}"#);
    assert!(invalid.is_err());
}

#[test]
fn test_as_ref_keeps_classification() {
    let resource: TestResource = to_failure("boom".to_string());
    let borrowed = resource.as_ref();
    assert_eq!(borrowed.kind(), ResourceKind::Failure);
    assert_eq!(borrowed.error(), Some(&&"boom".to_string()));
}
