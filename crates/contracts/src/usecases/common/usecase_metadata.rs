/// Метаданные UseCase для идентификации, маршрутов API и логов
pub trait UseCaseMetadata {
    /// Индекс UseCase (например, "u601")
    fn usecase_index() -> &'static str;

    /// Техническое имя (например, "order_fulfillment")
    fn usecase_name() -> &'static str;

    /// Отображаемое имя для UI
    fn display_name() -> &'static str;

    /// Описание UseCase
    fn description() -> &'static str {
        ""
    }

    /// Полное имя вида "u601_order_fulfillment"
    fn full_name() -> String {
        format!("{}_{}", Self::usecase_index(), Self::usecase_name())
    }

    /// Префикс маршрутов backend вида "/api/u601"
    fn route_prefix() -> String {
        format!("/api/{}", Self::usecase_index())
    }
}
