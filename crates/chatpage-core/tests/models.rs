use chatpage_core::error::CoreError;
use chatpage_core::models::generation::{GenerationRequest, GenerationResult};
use chatpage_core::models::message::{ConversationLog, Message, Sender};
use chatpage_core::models::model::ModelSelection;
use chatpage_core::prompt::{combine, SYSTEM_INSTRUCTION};

#[test]
fn model_ids_round_trip_through_from_str() {
    for model in ModelSelection::ALL {
        assert_eq!(model.as_str().parse::<ModelSelection>().unwrap(), model);
    }
}

#[test]
fn unknown_model_is_rejected() {
    let err = "gpt-3.5-turbo".parse::<ModelSelection>().unwrap_err();
    assert!(matches!(err, CoreError::UnknownModel(ref id) if id == "gpt-3.5-turbo"));
}

#[test]
fn only_o1_is_a_reasoning_model() {
    assert!(ModelSelection::O1.is_reasoning());
    assert!(!ModelSelection::Gpt4.is_reasoning());
    assert!(!ModelSelection::Gpt4oMini.is_reasoning());
}

#[test]
fn request_serializes_model_as_its_id() {
    let req = GenerationRequest {
        prompt: "Hello".to_string(),
        model: ModelSelection::Gpt4oMini,
    };
    let json = serde_json::to_value(&req).unwrap();
    assert_eq!(json, serde_json::json!({"prompt": "Hello", "model": "gpt-4o-mini"}));
}

#[test]
fn result_envelope_parses_both_shapes() {
    let ok: GenerationResult = serde_json::from_str(r#"{"text":"<p>hi</p>"}"#).unwrap();
    assert_eq!(ok.into_result(), Ok("<p>hi</p>".to_string()));

    let err: GenerationResult = serde_json::from_str(r#"{"error":"API key missing"}"#).unwrap();
    assert_eq!(err.into_result(), Err("API key missing".to_string()));
}

#[test]
fn log_appends_in_order_and_reports_indices() {
    let mut log = ConversationLog::new();
    assert!(log.is_empty());

    let first = log.push(Message::user("Hello"));
    let second = log.push(Message::bot_placeholder());

    assert_eq!((first, second), (0, 1));
    assert_eq!(log.get(0).unwrap().sender, Sender::User);
    assert_eq!(log.get(1).unwrap().sender, Sender::Bot);
    assert_eq!(log.get(1).unwrap().text, "");
}

#[test]
fn append_char_touches_only_the_target() {
    let mut log = ConversationLog::new();
    log.push(Message::user("Hello"));
    let bot = log.push(Message::bot_placeholder());

    log.append_char(bot, 'H').unwrap();
    log.append_char(bot, 'i').unwrap();

    assert_eq!(log.get(0).unwrap().text, "Hello");
    assert_eq!(log.get(bot).unwrap().text, "Hi");
    assert!(matches!(log.append_char(7, 'x'), Err(CoreError::NoSuchMessage(7))));
}

#[test]
fn combined_prompt_wraps_user_text() {
    let prompt = combine("What is Rust?");
    assert!(prompt.starts_with(SYSTEM_INSTRUCTION));
    assert!(prompt.ends_with("\n\nUser: What is Rust?\nChatbot:"));
}
