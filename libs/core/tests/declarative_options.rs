use std::sync::Arc;
use std::thread;

use lg_core::{
    ActivityGenerator, ActivityOptions, AttachmentKind, AttachmentLayout, AttachmentSpec,
    GenerationRequest, HandlebarsEvaluator,
};
use lg_testutil::{
    RecordingEvaluator, StaticEvaluator, assert_activity_shape, attachment_content_types,
    fixture_path, load_fixture, load_fixture_text, message_contains_text,
};
use serde_json::{Value, json};

const HERO: &str = "application/vnd.microsoft.card.hero";
const ADAPTIVE: &str = "application/vnd.microsoft.card.adaptive";

fn static_evaluator() -> StaticEvaluator {
    StaticEvaluator::new()
        .with("T", "Hello||Hi")
        .with("C1", "[HeroCard\ntitle=first\n]")
        .with("C2", r#"{"type":"AdaptiveCard","version":"1.6","body":[]}"#)
}

fn weather_generator() -> ActivityGenerator<HandlebarsEvaluator> {
    let path =
        fixture_path("libs/core/tests/fixtures/templates/weather.yaml").expect("fixture path");
    ActivityGenerator::new(HandlebarsEvaluator::from_yaml_file(path).expect("template store"))
}

#[test]
fn attachments_keep_declared_order_with_default_layout() {
    let options = ActivityOptions::from_value(json!({
        "TextTemplateId": "T",
        "Attachments": [{"CardTemplateId": "C1"}, {"AdaptiveCardTemplateId": "C2"}]
    }))
    .unwrap();
    let evaluator = RecordingEvaluator::new(static_evaluator());
    let generator = ActivityGenerator::new(&evaluator);

    let activity = generator.generate_from_options(&options, &json!({})).unwrap();

    assert_eq!(activity.attachment_layout, AttachmentLayout::Carousel);
    assert_eq!(activity.text.as_deref(), Some("Hello"));
    assert_eq!(activity.speak.as_deref(), Some("Hi"));
    let value = serde_json::to_value(&activity).unwrap();
    assert_eq!(value["attachmentLayout"], "carousel");
    assert_eq!(
        attachment_content_types(&value),
        vec![Some(HERO.to_string()), Some(ADAPTIVE.to_string())]
    );
    assert_eq!(evaluator.calls(), ["T", "C1", "C2"]);
}

#[test]
fn skipped_entries_are_not_evaluated() {
    let options = ActivityOptions {
        attachments: vec![
            AttachmentSpec {
                kind: AttachmentKind::Card,
                template_id: None,
            },
            AttachmentSpec::new(AttachmentKind::Card, "  "),
            AttachmentSpec::new(AttachmentKind::Card, "C1"),
        ],
        ..Default::default()
    };
    let evaluator = RecordingEvaluator::new(static_evaluator());
    let activity = ActivityGenerator::new(&evaluator)
        .generate_from_options(&options, &json!({}))
        .unwrap();
    assert_eq!(activity.attachments.len(), 1);
    assert!(activity.text.is_none());
    assert_eq!(evaluator.calls(), ["C1"]);
}

#[test]
fn empty_options_produce_empty_activity() {
    let generator = ActivityGenerator::new(static_evaluator());
    let activity = generator
        .generate(&GenerationRequest::Declarative {
            options: ActivityOptions::default(),
            scope: Value::Null,
        })
        .unwrap();
    assert!(activity.is_empty());
    assert_activity_shape(&activity).unwrap();
}

#[test]
fn weather_options_match_golden() {
    let yaml = load_fixture_text("libs/core/tests/fixtures/options/weather_list.yaml").unwrap();
    let options = ActivityOptions::from_yaml_str(&yaml).unwrap();
    let scope: Value = load_fixture!("libs/core/tests/fixtures/scopes/weather.json");

    let activity = weather_generator()
        .generate_from_options(&options, &scope)
        .unwrap();

    let expected: Value = load_fixture!("libs/core/tests/fixtures/activities/weather_list.json");
    let actual = serde_json::to_value(&activity).unwrap();
    assert_eq!(actual, expected);
    assert!(message_contains_text(&actual["attachments"], "Weather for Seattle"));
    assert!(!message_contains_text(&actual, "{{"));
    assert_activity_shape(&activity).unwrap();
}

#[test]
fn options_separator_overrides_default() {
    let evaluator = StaticEvaluator::new().with("Amp", "Shown || still shown && Spoken || too");
    let options = ActivityOptions::from_value(json!({
        "TextTemplateId": "Amp",
        "Separtor": "&&"
    }))
    .unwrap();

    let activity = ActivityGenerator::new(evaluator)
        .generate_from_options(&options, &json!({}))
        .unwrap();
    assert_eq!(activity.text.as_deref(), Some("Shown || still shown"));
    assert_eq!(activity.speak.as_deref(), Some("Spoken || too"));
}

#[test]
fn empty_options_separator_keeps_output_whole() {
    let options = ActivityOptions::from_value(json!({
        "TextTemplateId": "T",
        "Separtor": ""
    }))
    .unwrap();

    let activity = ActivityGenerator::new(static_evaluator())
        .generate_from_options(&options, &json!({}))
        .unwrap();
    assert_eq!(activity.text.as_deref(), Some("Hello||Hi"));
    assert_eq!(activity.speak.as_deref(), Some("Hello||Hi"));
}

#[test]
fn generation_is_deterministic() {
    let yaml = load_fixture_text("libs/core/tests/fixtures/options/weather_list.yaml").unwrap();
    let request = GenerationRequest::Declarative {
        options: ActivityOptions::from_yaml_str(&yaml).unwrap(),
        scope: load_fixture!("libs/core/tests/fixtures/scopes/weather.json"),
    };
    let generator = weather_generator();

    let first = serde_json::to_vec(&generator.generate(&request).unwrap()).unwrap();
    let second = serde_json::to_vec(&generator.generate(&request).unwrap()).unwrap();
    assert_eq!(first, second);
}

#[test]
fn failing_attachment_aborts_generation() {
    let options = ActivityOptions {
        attachments: vec![
            AttachmentSpec::new(AttachmentKind::Card, "WeatherCard"),
            AttachmentSpec::new(AttachmentKind::Card, "BrokenCard"),
        ],
        ..Default::default()
    };
    let scope: Value = load_fixture!("libs/core/tests/fixtures/scopes/weather.json");
    let err = weather_generator()
        .generate_from_options(&options, &scope)
        .unwrap_err();
    assert_eq!(err.template_id(), Some("BrokenCard"));
}

#[test]
fn generators_can_be_shared_across_threads() {
    let generator = Arc::new(weather_generator());
    let scope: Value = load_fixture!("libs/core/tests/fixtures/scopes/weather.json");
    let options = ActivityOptions::from_value(json!({
        "TextTemplateId": "Greeting",
        "Attachments": [{"CardTemplateId": "WeatherCard"}]
    }))
    .unwrap();
    let expected = generator.generate_from_options(&options, &scope).unwrap();

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let generator = Arc::clone(&generator);
            let options = options.clone();
            let scope = scope.clone();
            thread::spawn(move || generator.generate_from_options(&options, &scope).unwrap())
        })
        .collect();
    for handle in handles {
        assert_eq!(handle.join().unwrap(), expected);
    }
}
