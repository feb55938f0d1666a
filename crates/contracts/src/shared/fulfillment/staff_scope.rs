use crate::domain::a001_order::LineItem;
use crate::domain::a002_picklist::Picklist;
use crate::enums::UserRole;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};

/// Карта SKU -> агрегированный `scanStatus` пиклиста
///
/// Строится заново из каждого снимка пиклистов и не изменяется после
/// построения. При повторе SKU в нескольких пиклистах побеждает последний,
/// даже если у последнего `scanStatus` не задан: тогда статус SKU неизвестен.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanStatusMap {
    by_sku: HashMap<String, String>,
}

impl ScanStatusMap {
    pub fn from_picklists(picklists: &[Picklist]) -> Self {
        let mut by_sku = HashMap::new();
        for picklist in picklists {
            for entry in &picklist.sku_list {
                match picklist.scan_status.as_ref() {
                    Some(scan_status) => {
                        by_sku.insert(entry.sku.clone(), scan_status.clone());
                    }
                    None => {
                        by_sku.remove(&entry.sku);
                    }
                }
            }
        }
        Self { by_sku }
    }

    pub fn scan_status_of(&self, sku: &str) -> Option<&str> {
        self.by_sku.get(sku).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.by_sku.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_sku.is_empty()
    }
}

/// Область видимости позиций для текущего пользователя
///
/// Два пустых состояния различаются: `IdentityPending` (ID сотрудника ещё
/// не известен) и `NothingAssigned` (сотруднику ничего не назначено).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", content = "skus", rename_all = "snake_case")]
pub enum StaffScope {
    /// Не сотрудник склада: фильтр не применяется
    Unrestricted,
    IdentityPending,
    NothingAssigned,
    Assigned(BTreeSet<String>),
}

impl StaffScope {
    pub fn visible_items<'a>(&self, items: &'a [LineItem]) -> Vec<&'a LineItem> {
        match self {
            StaffScope::Unrestricted => items.iter().collect(),
            StaffScope::IdentityPending | StaffScope::NothingAssigned => Vec::new(),
            StaffScope::Assigned(skus) => staff_visible_items(items, skus),
        }
    }
}

/// Все SKU из пиклистов сотрудника
pub fn staff_picklist_skus(picklists: &[Picklist]) -> BTreeSet<String> {
    picklists
        .iter()
        .flat_map(|picklist| picklist.sku_list.iter())
        .map(|entry| entry.sku.clone())
        .collect()
}

pub fn staff_visible_items<'a>(items: &'a [LineItem], skus: &BTreeSet<String>) -> Vec<&'a LineItem> {
    items.iter().filter(|item| skus.contains(&item.sku)).collect()
}

/// Определить область видимости по роли и пиклистам сотрудника
///
/// `NothingAssigned`, если ни один SKU из пиклистов не совпал с позициями
/// заказа.
pub fn resolve_staff_scope(
    role: &UserRole,
    employee_id: Option<&str>,
    staff_picklists: &[Picklist],
    items: &[LineItem],
) -> StaffScope {
    if !role.is_fulfillment_staff() {
        return StaffScope::Unrestricted;
    }
    if employee_id.map_or(true, |id| id.trim().is_empty()) {
        return StaffScope::IdentityPending;
    }

    let skus: BTreeSet<String> = staff_picklist_skus(staff_picklists)
        .into_iter()
        .filter(|sku| items.iter().any(|item| &item.sku == sku))
        .collect();
    if skus.is_empty() {
        StaffScope::NothingAssigned
    } else {
        StaffScope::Assigned(skus)
    }
}

/// ID текущего пиклиста сотрудника (первый из назначенных)
pub fn current_picklist_id(staff_picklists: &[Picklist]) -> Option<&str> {
    staff_picklists
        .iter()
        .map(|picklist| picklist.picklist_id.as_str())
        .find(|id| !id.is_empty())
}

/// Пиклист, в котором есть указанный SKU
pub fn picklist_for_sku<'a>(picklists: &'a [Picklist], sku: &str) -> Option<&'a Picklist> {
    picklists.iter().find(|picklist| picklist.contains_sku(sku))
}
