use serde_json::Value;

/// ID записи из нескольких ключей документа
///
/// Сервисы отдают одновременно `_id` базы и бизнес-ID (`orderId`,
/// `picklistId`, `dealerId`). Кандидаты передаются в порядке приоритета,
/// берётся первый непустой строковый или числовой.
pub fn record_id<const N: usize>(candidates: [Option<Value>; N]) -> String {
    candidates
        .into_iter()
        .flatten()
        .find_map(|value| match value {
            Value::String(text) if !text.trim().is_empty() => Some(text),
            Value::Number(number) => Some(number.to_string()),
            _ => None,
        })
        .unwrap_or_default()
}
