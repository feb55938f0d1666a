use super::dealer_resolver::resolve_dealer_id;
use crate::domain::a001_order::LineItem;
use crate::domain::a002_picklist::PicklistSku;
use std::collections::{BTreeMap, BTreeSet};

/// Позиции без пиклиста, сгруппированные по каноническому ID дилера
pub type DealerGroups = BTreeMap<String, Vec<PicklistSku>>;

/// Сгруппировать позиции по дилерам для массового создания пиклистов
///
/// Пропускаются позиции без дилера, без SKU и с уже созданным пиклистом
/// (их нельзя предлагать повторно). Порядок позиций внутри группы сохраняется.
pub fn group_by_dealer<'a, I>(items: I) -> DealerGroups
where
    I: IntoIterator<Item = &'a LineItem>,
{
    let mut groups = DealerGroups::new();

    for item in items {
        if item.picklist_generated || item.sku.is_empty() {
            continue;
        }
        let dealer_id = resolve_dealer_id(item);
        if dealer_id.is_empty() {
            continue;
        }
        groups
            .entry(dealer_id)
            .or_default()
            .push(PicklistSku::new(item.sku.clone(), item.quantity_or_default()));
    }

    groups
}

/// Дилеры, для которых нужно подгрузить карточку (имя для UI)
pub fn dealer_ids_needing_lookup<'a, I>(items: I) -> BTreeSet<String>
where
    I: IntoIterator<Item = &'a LineItem>,
{
    items
        .into_iter()
        .map(resolve_dealer_id)
        .filter(|dealer_id| !dealer_id.is_empty())
        .collect()
}
