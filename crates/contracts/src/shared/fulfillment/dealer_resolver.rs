use super::dealer_id::normalize_dealer_id;
use crate::domain::a001_order::LineItem;

/// Определить дилера, ответственного за позицию заказа
///
/// Явное назначение (`dealerMapped`, первая запись) всегда приоритетнее
/// устаревшего поля `dealerId`, даже если последнее заполнено.
/// Пустая строка означает, что дилера нужно назначить.
pub fn resolve_dealer_id(item: &LineItem) -> String {
    if let Some(first) = item.dealer_mapped.first() {
        let mapped = normalize_dealer_id(first.dealer_id.as_ref());
        if !mapped.is_empty() {
            return mapped;
        }
    }

    normalize_dealer_id(item.dealer_id.as_ref())
}
