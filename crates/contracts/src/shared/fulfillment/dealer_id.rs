use crate::domain::a003_dealer::DealerRef;
use serde_json::{Map, Value};

/// Строки-заглушки, которые означают "дилер не назначен"
pub const PLACEHOLDER_DEALER_IDS: [&str; 5] = ["n/a", "na", "null", "undefined", "-"];

/// Привести ссылку на дилера к каноническому ID
///
/// Пустая строка означает "дилер не определён". Функция тотальная и
/// идемпотентная: повторная нормализация результата даёт тот же результат.
///
/// # Примеры
/// ```
/// use contracts::domain::a003_dealer::DealerRef;
/// use contracts::shared::fulfillment::normalize_dealer_id;
///
/// assert_eq!(normalize_dealer_id(Some(&DealerRef::from("D-17"))), "D-17");
/// assert_eq!(normalize_dealer_id(Some(&DealerRef::from("N/A"))), "");
/// assert_eq!(normalize_dealer_id(Some(&DealerRef::from(42))), "42");
/// assert_eq!(normalize_dealer_id(None), "");
/// ```
pub fn normalize_dealer_id(input: Option<&DealerRef>) -> String {
    match input {
        None => String::new(),
        Some(DealerRef::Text(text)) => normalize_text(text),
        Some(DealerRef::Number(number)) => normalize_number(number),
        Some(DealerRef::Object(object)) => normalize_object(object),
        Some(DealerRef::Other(_)) => String::new(),
    }
}

/// Является ли строка заглушкой (пустая строка тоже считается заглушкой)
pub fn is_placeholder(text: &str) -> bool {
    let lowered = text.trim().to_lowercase();
    lowered.is_empty() || PLACEHOLDER_DEALER_IDS.contains(&lowered.as_str())
}

fn normalize_text(text: &str) -> String {
    if is_placeholder(text) {
        String::new()
    } else {
        text.to_string()
    }
}

fn normalize_number(number: &serde_json::Number) -> String {
    match number.as_f64() {
        Some(value) if !value.is_finite() => String::new(),
        _ => number.to_string(),
    }
}

fn normalize_object(object: &Map<String, Value>) -> String {
    let resolved = ["_id", "id"]
        .into_iter()
        .filter_map(|key| object.get(key))
        .find(|value| !value.is_null());

    match resolved {
        Some(Value::String(text)) => normalize_text(text),
        Some(Value::Number(number)) if number.as_f64() != Some(0.0) => normalize_number(number),
        Some(Value::Bool(true)) => "true".to_string(),
        _ => String::new(),
    }
}
