/// Трейт для корня агрегата
///
/// Агрегаты заказа, пиклиста и дилера принадлежат внешнему сервису заказов:
/// здесь они только читаются. Трейт даёт единые метаданные для URL, логов и UI.
pub trait AggregateRoot {
    // ============================================================================
    // Методы экземпляра (данные конкретной записи)
    // ============================================================================

    /// Получить ID записи (идентификатор внешнего сервиса)
    fn id(&self) -> &str;

    // ============================================================================
    // Метаданные класса агрегата (статические данные)
    // ============================================================================

    /// Индекс агрегата в системе (например, "a001")
    fn aggregate_index() -> &'static str;

    /// Имя коллекции во внешнем сервисе (сегмент URL, например, "orders")
    fn collection_name() -> &'static str;

    /// Имя элемента для UI (единственное число)
    fn element_name() -> &'static str;

    /// Имя списка для UI (множественное число)
    fn list_name() -> &'static str;

    // ============================================================================
    // Методы с реализацией по умолчанию
    // ============================================================================

    /// Полное имя агрегата для системы (например, "a001_orders")
    fn full_name() -> String {
        format!("{}_{}", Self::aggregate_index(), Self::collection_name())
    }
}
