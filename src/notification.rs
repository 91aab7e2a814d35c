//! Rendering of a completed booking
//!
//! The same field block is shown to the user for confirmation and sent to
//! the operator once the user confirms. Output is HTML; everything the user
//! typed is escaped.

use crate::state_machine::{BookingForm, TimeWindow};
use teloxide::utils::html::{bold, escape};

const HEADER: &str = "🔔 Новое бронирование ожидает подтверждения и оплаты";

/// Time as shown to people: the custom range verbatim, else "с start до end"
pub fn time_info(form: &BookingForm) -> String {
    match form.time_window() {
        Some(TimeWindow::Custom(range)) => range.to_string(),
        Some(TimeWindow::Hours { start, end }) => format!("с {start} до {end}"),
        None => "не указано".to_string(),
    }
}

fn poster_info(form: &BookingForm) -> &'static str {
    match form.wants_poster {
        Some(true) => "Да",
        Some(false) => "Нет",
        None => "не указано",
    }
}

/// One labelled line per collected field
pub fn render_fields(form: &BookingForm) -> String {
    let room = form.room.map_or("не указано", |room| room.label());
    let date = form.date.as_deref().unwrap_or("не указано");

    [
        ("👤", "Имя клиента:", escape(&form.client_name)),
        ("📞", "Контакт:", escape(&form.contact_info)),
        ("📝", "Название:", escape(&form.appointment_purpose)),
        ("🏢", "Помещение:", room.to_string()),
        ("📅", "Дата:", escape(date)),
        ("⏰", "Время:", escape(&time_info(form))),
        ("🖼", "Афиша:", poster_info(form).to_string()),
    ]
    .iter()
    .map(|(icon, label, value)| format!("{icon} {} {value}", bold(label)))
    .collect::<Vec<_>>()
    .join("\n")
}

/// Message forwarded to the operator chat
pub fn render_operator_message(form: &BookingForm) -> String {
    format!("{}\n\n{}", bold(HEADER), render_fields(form))
}
